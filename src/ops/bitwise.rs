//! Bitwise operations on integer arrays.

use crate::config::OpConfig;
use crate::dispatch;
use crate::element::IntElement;
use crate::error::Result;
use crate::ops::compare::Operand;
use crate::ops::{clip_pair, copy_into, prepare_mut, run_binary, run_unary};
use crate::simd::tables::{IntTable, PairwiseArithFn, ScalarArithFn};

/// Bitwise NOT of every element.
///
/// # Examples
///
/// ```rust
/// use simdarr::ops::bitwise::invert;
/// use simdarr::OpConfig;
///
/// let mut flags = vec![0b1010_1010u8, 0xFF, 0];
/// invert(&mut flags, &OpConfig::default()).unwrap();
/// assert_eq!(flags, [0b0101_0101, 0, 0xFF]);
/// ```
pub fn invert<T: IntElement>(data: &mut [T], cfg: &OpConfig) -> Result<()> {
    let data = prepare_mut(data, cfg)?;
    let kernel = dispatch::int_kernels::<T>(cfg).map(|table| table.invert);
    run_unary(data, cfg, kernel, |x: T| !x);
    Ok(())
}

pub fn invert_into<T: IntElement>(src: &[T], dst: &mut [T], cfg: &OpConfig) -> Result<()> {
    invert(copy_into(src, dst, cfg)?, cfg)
}

type KernelPair<T> = (ScalarArithFn<T>, PairwiseArithFn<T>);

fn bitwise<T, F>(
    data: &mut [T],
    rhs: Operand<'_, T>,
    cfg: &OpConfig,
    pick: fn(&IntTable<T>) -> KernelPair<T>,
    f: F,
) -> Result<()>
where
    T: IntElement,
    F: Fn(T, T) -> T,
{
    let data = prepare_mut(data, cfg)?;
    let rhs = match rhs {
        Operand::Array(other) => Operand::Array(clip_pair(data.len(), other, cfg)?),
        param => param,
    };
    run_binary(data, rhs, cfg, dispatch::int_kernels::<T>(cfg).map(pick), f);
    Ok(())
}

pub fn and<T: IntElement>(data: &mut [T], rhs: Operand<'_, T>, cfg: &OpConfig) -> Result<()> {
    bitwise(data, rhs, cfg, |t| (t.and, t.and_pairwise), |a, b| a & b)
}

pub fn or<T: IntElement>(data: &mut [T], rhs: Operand<'_, T>, cfg: &OpConfig) -> Result<()> {
    bitwise(data, rhs, cfg, |t| (t.or, t.or_pairwise), |a, b| a | b)
}

pub fn xor<T: IntElement>(data: &mut [T], rhs: Operand<'_, T>, cfg: &OpConfig) -> Result<()> {
    bitwise(data, rhs, cfg, |t| (t.xor, t.xor_pairwise), |a, b| a ^ b)
}
