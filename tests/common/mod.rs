//! Shared helpers for the integration tests.
#![allow(dead_code)]

use simdarr::OpConfig;

/// One configuration per execution path: scalar loop, SIMD kernel, and SIMD
/// kernels on small rayon chunks.
pub fn paths() -> [(&'static str, OpConfig); 3] {
    [
        ("scalar", OpConfig::scalar_only()),
        (
            "simd",
            OpConfig::default()
                .with_simd_threshold(0)
                .with_parallel_threshold(None),
        ),
        (
            "parallel",
            OpConfig::default()
                .with_simd_threshold(0)
                .with_parallel_threshold(Some(0))
                .with_parallel_chunk_size(24),
        ),
    ]
}

/// Every length up to a few vectors, so each tail length is hit for every lane
/// width, plus a handful of longer inputs.
pub fn lengths() -> impl Iterator<Item = usize> {
    (1..=100).chain([127, 128, 129, 255, 256, 257, 1000, 4099])
}
