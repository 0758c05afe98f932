//! Maximum and minimum reductions.
//!
//! The vector path keeps a lane-wise accumulator across the aligned prefix,
//! folds it horizontally and finishes with the tail. For floats a NaN anywhere in
//! the processed input makes the result NaN. `-0.0` and `0.0` compare equal, so
//! when both compete for the result its sign depends on the path taken.

use rayon::prelude::*;

use crate::config::OpConfig;
use crate::dispatch::{self, Plan};
use crate::element::{is_nan, Element};
use crate::error::Result;
use crate::ops::prepare;
use crate::scalar;
use crate::simd::tables::ReduceFn;

/// Largest element.
///
/// The sign of a zero result is unspecified when the input holds both zeros.
///
/// # Examples
///
/// ```rust
/// use simdarr::ops::reduce::max;
/// use simdarr::{ArrayError, OpConfig};
///
/// let cfg = OpConfig::default();
/// assert_eq!(max(&[3u16, 9, 2], &cfg), Ok(9));
/// assert!(max(&[1.0f32, f32::NAN], &cfg).unwrap().is_nan());
/// assert_eq!(max::<i8>(&[], &cfg), Err(ArrayError::EmptyArray));
/// ```
pub fn max<T: Element>(data: &[T], cfg: &OpConfig) -> Result<T> {
    let data = prepare(data, cfg)?;
    let kernel = dispatch::kernels::<T>(cfg).map(|table| table.max);
    Ok(reduce(data, cfg, kernel, scalar::max, |a, b| if b > a { b } else { a }))
}

/// Smallest element. See [`max`] for zero results.
pub fn min<T: Element>(data: &[T], cfg: &OpConfig) -> Result<T> {
    let data = prepare(data, cfg)?;
    let kernel = dispatch::kernels::<T>(cfg).map(|table| table.min);
    Ok(reduce(data, cfg, kernel, scalar::min, |a, b| if b < a { b } else { a }))
}

fn reduce<T: Element>(
    data: &[T],
    cfg: &OpConfig,
    kernel: Option<ReduceFn<T>>,
    fallback: fn(&[T]) -> T,
    pick: fn(T, T) -> T,
) -> T {
    match dispatch::plan(data.len(), cfg, kernel) {
        Plan::Scalar => fallback(data),
        Plan::Simd(kernel) => unsafe { kernel(data) },
        Plan::Parallel(kernel, chunk) => data
            .par_chunks(chunk)
            .map(|part| unsafe { kernel(part) })
            .reduce_with(|a, b| {
                if is_nan(a) {
                    a
                } else if is_nan(b) {
                    b
                } else {
                    pick(a, b)
                }
            })
            .unwrap_or(data[0]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extremes_at_both_ends() {
        let cfg = OpConfig::default().with_simd_threshold(0);
        let mut data: Vec<i32> = (0..1000).map(|i| (i * 37) % 501).collect();
        data[0] = -9;
        data[999] = 9999;
        assert_eq!(max(&data, &cfg), Ok(9999));
        assert_eq!(min(&data, &cfg), Ok(-9));
    }

    #[test]
    fn test_nan_in_parallel_chunk() {
        let cfg = OpConfig::default()
            .with_simd_threshold(0)
            .with_parallel_threshold(Some(0))
            .with_parallel_chunk_size(64);
        let mut data = vec![2.0f64; 1000];
        data[700] = f64::NAN;
        assert!(max(&data, &cfg).unwrap().is_nan());
        assert!(min(&data, &cfg).unwrap().is_nan());
    }

    #[test]
    fn test_unsigned_extremes() {
        let cfg = OpConfig::default().with_simd_threshold(0);
        let data = vec![u64::MAX, 0, 1 << 63, 5, 77];
        assert_eq!(max(&data, &cfg), Ok(u64::MAX));
        assert_eq!(min(&data, &cfg), Ok(0));
    }
}
