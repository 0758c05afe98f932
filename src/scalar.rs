//! Scalar loops used below the SIMD threshold, when SIMD is disabled, and on
//! targets without a kernel table.
//!
//! Each loop applies exactly the per-element semantics of the SIMD tails, so the
//! two paths agree element for element.

use crate::element::{is_nan, Element};
use crate::ops::compare::{CmpOp, Operand};

pub(crate) fn all<T: Element>(op: CmpOp, data: &[T], param: T) -> bool {
    data.iter().all(|&x| op.apply(x, param))
}

pub(crate) fn any<T: Element>(op: CmpOp, data: &[T], param: T) -> bool {
    data.iter().any(|&x| op.apply(x, param))
}

pub(crate) fn all_pairwise<T: Element>(op: CmpOp, data: &[T], other: &[T]) -> bool {
    data.iter().zip(other).all(|(&x, &y)| op.apply(x, y))
}

/// First index whose predicate outcome equals `want`.
pub(crate) fn find<T: Element>(op: CmpOp, data: &[T], param: T, want: bool) -> Option<usize> {
    data.iter().position(|&x| op.apply(x, param) == want)
}

pub(crate) fn count<T: Element>(op: CmpOp, data: &[T], param: T) -> usize {
    data.iter().filter(|&&x| op.apply(x, param)).count()
}

pub(crate) fn filter<T: Element>(op: CmpOp, data: &[T], param: T, out: &mut [T]) -> usize {
    let mut written = 0;
    for &x in data {
        if op.apply(x, param) {
            out[written] = x;
            written += 1;
        }
    }
    written
}

pub(crate) fn indices<T: Element>(op: CmpOp, data: &[T], param: T, out: &mut [usize]) -> usize {
    let mut written = 0;
    for (i, &x) in data.iter().enumerate() {
        if op.apply(x, param) {
            out[written] = i;
            written += 1;
        }
    }
    written
}

/// Largest element; the first NaN if there is one. `data` must not be empty.
pub(crate) fn max<T: Element>(data: &[T]) -> T {
    let mut result = data[0];
    for &x in data {
        if is_nan(x) {
            return x;
        }
        if x > result {
            result = x;
        }
    }
    result
}

/// Smallest element; the first NaN if there is one. `data` must not be empty.
pub(crate) fn min<T: Element>(data: &[T]) -> T {
    let mut result = data[0];
    for &x in data {
        if is_nan(x) {
            return x;
        }
        if x < result {
            result = x;
        }
    }
    result
}

pub(crate) fn map<T: Element, F: Fn(T) -> T>(data: &mut [T], f: F) {
    for x in data {
        *x = f(*x);
    }
}

/// `data[i] = f(data[i], rhs[i])`. An array operand must be at least as long as `data`.
pub(crate) fn zip<T: Element, F: Fn(T, T) -> T>(data: &mut [T], rhs: Operand<'_, T>, f: F) {
    match rhs {
        Operand::Scalar(param) => data.iter_mut().for_each(|x| *x = f(*x, param)),
        Operand::Array(other) => data
            .iter_mut()
            .zip(other)
            .for_each(|(x, &y)| *x = f(*x, y)),
    }
}

pub(crate) fn all_finite<T: Element>(data: &[T]) -> bool {
    data.iter().all(|x| x.is_finite_value())
}
