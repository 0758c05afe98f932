//! Runtime selection between the scalar loop, the SIMD kernels and the parallel
//! SIMD path.
//!
//! The instruction set is detected once per process. Every call then picks a
//! [`Path`] from the input length and its [`OpConfig`]:
//!
//! | Input length | Path |
//! |--------------|------|
//! | `< simd_threshold`, SIMD disabled, or no kernel | scalar loop |
//! | `>= parallel_threshold` | SIMD kernel on rayon chunks |
//! | otherwise | SIMD kernel |

use std::sync::OnceLock;

use crate::config::OpConfig;
use crate::element::{Element, FloatElement, IntElement, SignedElement};
use crate::simd::tables::{FloatTable, IntTable, KernelTable, SignedTable};

/// Instruction set the SIMD kernels are compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsaLevel {
    Scalar,
    /// 256-bit AVX2 kernels (x86_64).
    Avx2,
    /// 128-bit NEON kernels (aarch64).
    Neon,
}

impl IsaLevel {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Avx2 => "AVX2",
            Self::Neon => "NEON",
        }
    }

    /// Vector register width in bytes, zero for the scalar level.
    pub fn register_bytes(&self) -> usize {
        match self {
            Self::Scalar => 0,
            Self::Avx2 => 32,
            Self::Neon => 16,
        }
    }
}

static ISA_LEVEL: OnceLock<IsaLevel> = OnceLock::new();

/// The instruction set detected on this machine.
pub fn isa_level() -> IsaLevel {
    *ISA_LEVEL.get_or_init(|| {
        let level = detect_isa_features();
        log::debug!("simd kernels: detected {} support", level.name());
        level
    })
}

#[cfg(target_arch = "x86_64")]
fn detect_isa_features() -> IsaLevel {
    if is_x86_feature_detected!("avx2") {
        IsaLevel::Avx2
    } else {
        IsaLevel::Scalar
    }
}

#[cfg(target_arch = "aarch64")]
fn detect_isa_features() -> IsaLevel {
    IsaLevel::Neon
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
fn detect_isa_features() -> IsaLevel {
    IsaLevel::Scalar
}

/// Number of `T` lanes in one vector register on this machine.
pub fn lane_count<T: Element>() -> usize {
    match isa_level() {
        IsaLevel::Scalar => 1,
        level => level.register_bytes() / std::mem::size_of::<T>(),
    }
}

/// Execution strategy chosen for a single call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Path {
    Scalar,
    Simd,
    ParallelSimd,
}

/// A chosen path together with the kernel that runs it.
#[derive(Clone, Copy)]
pub(crate) enum Plan<F> {
    Scalar,
    Simd(F),
    Parallel(F, usize),
}

impl<F> Plan<F> {
    pub(crate) fn path(&self) -> Path {
        match self {
            Plan::Scalar => Path::Scalar,
            Plan::Simd(_) => Path::Simd,
            Plan::Parallel(..) => Path::ParallelSimd,
        }
    }

    /// Same plan without the rayon split.
    pub(crate) fn sequential(self) -> Self {
        match self {
            Plan::Parallel(kernel, _) => Plan::Simd(kernel),
            other => other,
        }
    }
}

/// The path an operation on `len` elements of `T` would take.
pub fn select_path<T: Element>(len: usize, cfg: &OpConfig) -> Path {
    plan(len, cfg, kernels::<T>(cfg)).path()
}

pub(crate) fn plan<F>(len: usize, cfg: &OpConfig, kernel: Option<F>) -> Plan<F> {
    let plan = match kernel {
        Some(kernel) if cfg.simd && len >= cfg.simd_threshold => match cfg.parallel_threshold {
            Some(threshold) if len >= threshold => {
                Plan::Parallel(kernel, cfg.parallel_chunk_size.max(1))
            }
            _ => Plan::Simd(kernel),
        },
        _ => Plan::Scalar,
    };
    log::trace!("dispatch: {len} elements -> {:?}", plan.path());
    plan
}

pub(crate) fn kernels<T: Element>(cfg: &OpConfig) -> Option<&'static KernelTable<T>> {
    if !cfg.simd {
        return None;
    }
    T::kernel_table(isa_level())
}

pub(crate) fn signed_kernels<T: SignedElement>(cfg: &OpConfig) -> Option<&'static SignedTable<T>> {
    if !cfg.simd {
        return None;
    }
    T::signed_table(isa_level())
}

pub(crate) fn int_kernels<T: IntElement>(cfg: &OpConfig) -> Option<&'static IntTable<T>> {
    if !cfg.simd {
        return None;
    }
    T::int_table(isa_level())
}

pub(crate) fn float_kernels<T: FloatElement>(cfg: &OpConfig) -> Option<&'static FloatTable<T>> {
    if !cfg.simd {
        return None;
    }
    T::float_table(isa_level())
}
