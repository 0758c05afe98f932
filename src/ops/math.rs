//! In-place math transforms.
//!
//! Every transform rewrites the processed prefix of its input and has an `_into`
//! variant that copies `src` into `dst` first and leaves `src` untouched.
//!
//! # Overflow handling
//!
//! With [`OpConfig::check_overflow`] set (the default):
//!
//! - `abs`/`neg` of a signed integer scan the input for `MIN` with a vector
//!   equality compare before transforming anything, and fail with
//!   [`ArrayError::Overflow`] if it is present.
//! - integer `add`/`sub`/`mul`/`div` run a checked scalar loop.
//! - float arithmetic and `sqrt` run on the vector path, then fail with
//!   [`ArrayError::ArithmeticError`] if any result is infinite or NaN.
//!
//! Integer division by zero is reported whatever the setting. After an
//! arithmetic error the contents of the buffer are unspecified.
//!
//! # Examples
//!
//! ```rust
//! use simdarr::ops::math::{abs, add};
//! use simdarr::{ArrayError, OpConfig, Operand};
//!
//! let cfg = OpConfig::default();
//! let mut data = vec![-3i8, 4, -5];
//! abs(&mut data, &cfg).unwrap();
//! assert_eq!(data, [3, 4, 5]);
//!
//! let mut data = vec![i8::MIN, 1];
//! assert_eq!(abs(&mut data, &cfg), Err(ArrayError::Overflow { op: "abs" }));
//! assert_eq!(data, [i8::MIN, 1]);
//!
//! let mut data = vec![250u8, 1];
//! assert!(add(&mut data, Operand::Scalar(10), &cfg).is_err());
//! add(&mut data, Operand::Scalar(10), &cfg.with_overflow_checks(false)).unwrap();
//! assert_eq!(data[1], 11);
//! ```

use rayon::prelude::*;

use crate::config::OpConfig;
use crate::dispatch::{self, Plan};
use crate::element::{ArithOp, Element, ElementKind, FloatElement, SignedElement};
use crate::error::{ArrayError, Result};
use crate::ops::compare::{CmpOp, Operand};
use crate::ops::{clip_pair, copy_into, predicate, prepare_mut, run_binary, run_unary};
use crate::scalar;
use crate::simd::tables::{
    FloatTable, KernelTable, PairwiseArithFn, ScalarArithFn, SignedTable, UnaryFn,
};

// ================================================================================================
// SIGNED TRANSFORMS
// ================================================================================================

/// Absolute value. Fails on a signed integer `MIN` when overflow checks are on.
pub fn abs<T: SignedElement>(data: &mut [T], cfg: &OpConfig) -> Result<()> {
    signed_transform("abs", data, cfg, |table| table.abs, T::lane_abs)
}

pub fn abs_into<T: SignedElement>(src: &[T], dst: &mut [T], cfg: &OpConfig) -> Result<()> {
    abs(copy_into(src, dst, cfg)?, cfg)
}

/// Negation. Fails on a signed integer `MIN` when overflow checks are on.
pub fn neg<T: SignedElement>(data: &mut [T], cfg: &OpConfig) -> Result<()> {
    signed_transform("neg", data, cfg, |table| table.neg, T::lane_neg)
}

pub fn neg_into<T: SignedElement>(src: &[T], dst: &mut [T], cfg: &OpConfig) -> Result<()> {
    neg(copy_into(src, dst, cfg)?, cfg)
}

fn signed_transform<T: SignedElement>(
    op: &'static str,
    data: &mut [T],
    cfg: &OpConfig,
    pick: fn(&SignedTable<T>) -> UnaryFn<T>,
    lane: fn(T) -> T,
) -> Result<()> {
    let data = prepare_mut(data, cfg)?;
    if cfg.check_overflow {
        reject_sentinel(op, data, cfg)?;
    }
    run_unary(data, cfg, dispatch::signed_kernels::<T>(cfg).map(pick), lane);
    Ok(())
}

/// Fails if `data` holds the one value whose absolute value or negation does not
/// fit the type. Runs before anything is written.
fn reject_sentinel<T: SignedElement>(op: &'static str, data: &[T], cfg: &OpConfig) -> Result<()> {
    match T::OVERFLOW_SENTINEL {
        Some(sentinel) if predicate::any_prepared(CmpOp::Eq, data, sentinel, cfg) => {
            log::debug!("{op}: {} input contains {sentinel:?}", T::NAME);
            Err(ArrayError::Overflow { op })
        }
        _ => Ok(()),
    }
}

// ================================================================================================
// ARITHMETIC
// ================================================================================================

/// `data[i] = data[i] OP rhs[i]` for a scalar or an equally long array `rhs`.
pub fn arith<T: Element>(
    op: ArithOp,
    data: &mut [T],
    rhs: Operand<'_, T>,
    cfg: &OpConfig,
) -> Result<()> {
    let data = prepare_mut(data, cfg)?;
    let rhs = match rhs {
        Operand::Array(other) => Operand::Array(clip_pair(data.len(), other, cfg)?),
        param => param,
    };

    match T::KIND {
        ElementKind::Float => float_arith(op, data, rhs, cfg),
        ElementKind::SignedInt | ElementKind::UnsignedInt => int_arith(op, data, rhs, cfg),
    }
}

fn arith_into<T: Element>(
    op: ArithOp,
    src: &[T],
    rhs: Operand<'_, T>,
    dst: &mut [T],
    cfg: &OpConfig,
) -> Result<()> {
    arith(op, copy_into(src, dst, cfg)?, rhs, cfg)
}

macro_rules! arith_fns {
    ($($name:ident, $into:ident => $op:ident;)*) => {
        $(
            #[doc = concat!("[`arith`] with [`ArithOp::", stringify!($op), "`].")]
            pub fn $name<T: Element>(
                data: &mut [T],
                rhs: Operand<'_, T>,
                cfg: &OpConfig,
            ) -> Result<()> {
                arith(ArithOp::$op, data, rhs, cfg)
            }

            #[doc = concat!("[`", stringify!($name), "`] into `dst`, leaving `src` untouched.")]
            pub fn $into<T: Element>(
                src: &[T],
                rhs: Operand<'_, T>,
                dst: &mut [T],
                cfg: &OpConfig,
            ) -> Result<()> {
                arith_into(ArithOp::$op, src, rhs, dst, cfg)
            }
        )*
    };
}

arith_fns! {
    add, add_into => Add;
    sub, sub_into => Sub;
    mul, mul_into => Mul;
    div, div_into => Div;
}

fn int_arith<T: Element>(
    op: ArithOp,
    data: &mut [T],
    rhs: Operand<'_, T>,
    cfg: &OpConfig,
) -> Result<()> {
    if op == ArithOp::Div {
        reject_zero_divisor(rhs, cfg)?;
    }

    if cfg.check_overflow {
        for (i, x) in data.iter_mut().enumerate() {
            *x = T::checked_arith(op, *x, rhs.at(i)).map_err(|err| {
                log::debug!("{}: {} overflow at index {i}", op.name(), T::NAME);
                err
            })?;
        }
        return Ok(());
    }

    let kernels = dispatch::kernels::<T>(cfg).and_then(|table| vector_arith(op, table));
    run_binary(data, rhs, cfg, kernels, |a, b| T::wrapping_arith(op, a, b));
    Ok(())
}

fn reject_zero_divisor<T: Element>(rhs: Operand<'_, T>, cfg: &OpConfig) -> Result<()> {
    let zero = T::default();
    let has_zero = match rhs {
        Operand::Scalar(divisor) => divisor == zero,
        Operand::Array(divisors) => predicate::any_prepared(CmpOp::Eq, divisors, zero, cfg),
    };
    if has_zero {
        log::debug!("div: {} divisor is zero", T::NAME);
        return Err(ArrayError::ZeroDivision { op: "div" });
    }
    Ok(())
}

fn float_arith<T: Element>(
    op: ArithOp,
    data: &mut [T],
    rhs: Operand<'_, T>,
    cfg: &OpConfig,
) -> Result<()> {
    let kernels = dispatch::kernels::<T>(cfg).and_then(|table| vector_arith(op, table));
    run_binary(data, rhs, cfg, kernels, |a, b| T::wrapping_arith(op, a, b));

    if cfg.check_overflow {
        ensure_finite(op.name(), data, cfg)?;
    }
    Ok(())
}

/// The kernel pair for `op`, if this table has a vector version of it.
fn vector_arith<T: Element>(
    op: ArithOp,
    table: &KernelTable<T>,
) -> Option<(ScalarArithFn<T>, PairwiseArithFn<T>)> {
    match op {
        ArithOp::Add => Some((table.add, table.add_pairwise)),
        ArithOp::Sub => Some((table.sub, table.sub_pairwise)),
        ArithOp::Mul => table.mul.zip(table.mul_pairwise),
        ArithOp::Div => table.div.zip(table.div_pairwise),
    }
}

fn ensure_finite<T: Element>(op: &'static str, data: &[T], cfg: &OpConfig) -> Result<()> {
    let kernel = dispatch::kernels::<T>(cfg).and_then(|table| table.all_finite);
    let finite = match dispatch::plan(data.len(), cfg, kernel) {
        Plan::Scalar => scalar::all_finite(data),
        Plan::Simd(kernel) => unsafe { kernel(data) },
        Plan::Parallel(kernel, chunk) => data
            .par_chunks(chunk)
            .all(|part| unsafe { kernel(part) }),
    };

    if !finite {
        log::debug!("{op}: {} result is not finite", T::NAME);
        return Err(ArrayError::ArithmeticError { op });
    }
    Ok(())
}

// ================================================================================================
// FLOAT TRANSFORMS
// ================================================================================================

/// Square root. Fails on negative or non-finite input when overflow checks are on.
pub fn sqrt<T: FloatElement>(data: &mut [T], cfg: &OpConfig) -> Result<()> {
    let data = prepare_mut(data, cfg)?;
    run_unary(data, cfg, float_kernel(cfg, |table| table.sqrt), |x: T| x.sqrt());
    if cfg.check_overflow {
        ensure_finite("sqrt", data, cfg)?;
    }
    Ok(())
}

pub fn sqrt_into<T: FloatElement>(src: &[T], dst: &mut [T], cfg: &OpConfig) -> Result<()> {
    sqrt(copy_into(src, dst, cfg)?, cfg)
}

pub fn floor<T: FloatElement>(data: &mut [T], cfg: &OpConfig) -> Result<()> {
    let data = prepare_mut(data, cfg)?;
    run_unary(data, cfg, float_kernel(cfg, |table| table.floor), |x: T| x.floor());
    Ok(())
}

pub fn floor_into<T: FloatElement>(src: &[T], dst: &mut [T], cfg: &OpConfig) -> Result<()> {
    floor(copy_into(src, dst, cfg)?, cfg)
}

pub fn ceil<T: FloatElement>(data: &mut [T], cfg: &OpConfig) -> Result<()> {
    let data = prepare_mut(data, cfg)?;
    run_unary(data, cfg, float_kernel(cfg, |table| table.ceil), |x: T| x.ceil());
    Ok(())
}

pub fn ceil_into<T: FloatElement>(src: &[T], dst: &mut [T], cfg: &OpConfig) -> Result<()> {
    ceil(copy_into(src, dst, cfg)?, cfg)
}

/// Rounds toward zero.
pub fn trunc<T: FloatElement>(data: &mut [T], cfg: &OpConfig) -> Result<()> {
    let data = prepare_mut(data, cfg)?;
    run_unary(data, cfg, float_kernel(cfg, |table| table.trunc), |x: T| x.trunc());
    Ok(())
}

pub fn trunc_into<T: FloatElement>(src: &[T], dst: &mut [T], cfg: &OpConfig) -> Result<()> {
    trunc(copy_into(src, dst, cfg)?, cfg)
}

fn float_kernel<T: FloatElement>(
    cfg: &OpConfig,
    pick: fn(&FloatTable<T>) -> UnaryFn<T>,
) -> Option<UnaryFn<T>> {
    dispatch::float_kernels::<T>(cfg).map(pick)
}
