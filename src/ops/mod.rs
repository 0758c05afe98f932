//! Public operations.
//!
//! Every operation validates its [`OpConfig`], clips the input to `max_len`,
//! rejects empty input and then lets [`crate::dispatch`] pick the scalar loop, a
//! SIMD kernel or the parallel SIMD path.
//!
//! Kernels come from tables the dispatcher only returns after the matching
//! instruction set was detected at runtime; that is the invariant behind every
//! `unsafe` call in these modules.

use rayon::prelude::*;

use crate::config::OpConfig;
use crate::dispatch::{self, Plan};
use crate::element::Element;
use crate::error::{length_mismatch, output_too_short, ArrayError, Result};
use crate::scalar;
use crate::simd::tables::{PairwiseArithFn, ScalarArithFn, UnaryFn};
use compare::Operand;

pub mod bitwise;
pub mod compare;
pub mod filter;
pub mod math;
pub mod predicate;
pub mod reduce;

pub(crate) fn prepare<'a, T>(data: &'a [T], cfg: &OpConfig) -> Result<&'a [T]> {
    cfg.validate()?;
    let data = cfg.limit(data);
    if data.is_empty() {
        return Err(ArrayError::EmptyArray);
    }
    Ok(data)
}

pub(crate) fn prepare_mut<'a, T>(data: &'a mut [T], cfg: &OpConfig) -> Result<&'a mut [T]> {
    cfg.validate()?;
    let data = cfg.limit_mut(data);
    if data.is_empty() {
        return Err(ArrayError::EmptyArray);
    }
    Ok(data)
}

/// Clips `other` like the primary input and checks that the lengths agree.
pub(crate) fn clip_pair<'a, T>(len: usize, other: &'a [T], cfg: &OpConfig) -> Result<&'a [T]> {
    let other = cfg.limit(other);
    if other.len() != len {
        return Err(length_mismatch(len, other.len()));
    }
    Ok(other)
}

/// Copies the processed prefix of `src` into the front of `dst` and returns that
/// part of `dst`.
pub(crate) fn copy_into<'a, T: Copy>(
    src: &[T],
    dst: &'a mut [T],
    cfg: &OpConfig,
) -> Result<&'a mut [T]> {
    let src = prepare(src, cfg)?;
    if dst.len() < src.len() {
        return Err(output_too_short(src.len(), dst.len()));
    }
    let dst = &mut dst[..src.len()];
    dst.copy_from_slice(src);
    Ok(dst)
}

/// Runs an in-place unary kernel, or `f` element by element on the scalar path.
pub(crate) fn run_unary<T, F>(data: &mut [T], cfg: &OpConfig, kernel: Option<UnaryFn<T>>, f: F)
where
    T: Element,
    F: Fn(T) -> T,
{
    match dispatch::plan(data.len(), cfg, kernel) {
        Plan::Scalar => scalar::map(data, f),
        Plan::Simd(kernel) => unsafe { kernel(data) },
        Plan::Parallel(kernel, chunk) => data
            .par_chunks_mut(chunk)
            .for_each(|part| unsafe { kernel(part) }),
    }
}

/// Runs an in-place binary kernel against a scalar or an equally long array.
pub(crate) fn run_binary<T, F>(
    data: &mut [T],
    rhs: Operand<'_, T>,
    cfg: &OpConfig,
    kernels: Option<(ScalarArithFn<T>, PairwiseArithFn<T>)>,
    f: F,
) where
    T: Element,
    F: Fn(T, T) -> T,
{
    match (dispatch::plan(data.len(), cfg, kernels), rhs) {
        (Plan::Scalar, rhs) => scalar::zip(data, rhs, f),
        (Plan::Simd((by_scalar, _)), Operand::Scalar(param)) => unsafe { by_scalar(data, param) },
        (Plan::Simd((_, pairwise)), Operand::Array(other)) => unsafe { pairwise(data, other) },
        (Plan::Parallel((by_scalar, _), chunk), Operand::Scalar(param)) => data
            .par_chunks_mut(chunk)
            .for_each(|part| unsafe { by_scalar(part, param) }),
        (Plan::Parallel((_, pairwise), chunk), Operand::Array(other)) => data
            .par_chunks_mut(chunk)
            .zip(other.par_chunks(chunk))
            .for_each(|(part, other)| unsafe { pairwise(part, other) }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_rejects_empty_after_clip() {
        let cfg = OpConfig::default();
        assert_eq!(prepare::<u8>(&[], &cfg), Err(ArrayError::EmptyArray));
        let clipped = cfg.with_max_len(Some(2));
        assert_eq!(prepare(&[1, 2, 3], &clipped), Ok(&[1, 2][..]));
    }

    #[test]
    fn test_clip_pair_compares_clipped_lengths() {
        let cfg = OpConfig::default().with_max_len(Some(3));
        assert!(clip_pair(3, &[1, 2, 3, 4, 5], &cfg).is_ok());
        assert_eq!(
            clip_pair(3, &[1, 2], &cfg),
            Err(ArrayError::LengthMismatch {
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn test_copy_into_checks_capacity() {
        let cfg = OpConfig::default();
        let mut dst = [0i32; 2];
        assert_eq!(
            copy_into(&[1, 2, 3], &mut dst, &cfg),
            Err(ArrayError::OutputTooShort {
                required: 3,
                available: 2
            })
        );
        let mut dst = [0i32; 4];
        assert_eq!(copy_into(&[1, 2, 3], &mut dst, &cfg).map(|d| d.len()), Ok(3));
        assert_eq!(dst, [1, 2, 3, 0]);
    }
}
