//! Comparison operators and whole-array comparisons.
//!
//! [`compare`] answers "does every element pair satisfy `lhs OP rhs`?" for an
//! array against a scalar, a scalar against an array, or two arrays of equal
//! length. Floats follow IEEE semantics: NaN compares false under every operator
//! except [`CmpOp::Ne`].
//!
//! # Examples
//!
//! ```rust
//! use simdarr::ops::compare::{compare, gt, CmpOp, Operand};
//! use simdarr::OpConfig;
//!
//! let cfg = OpConfig::default();
//! let data = [3i32, 4, 5, 6];
//!
//! assert!(gt(Operand::Array(&data), Operand::Scalar(2), &cfg).unwrap());
//! // 10 > x for every x
//! assert!(compare(CmpOp::Gt, Operand::Scalar(10), Operand::Array(&data), &cfg).unwrap());
//! ```

use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;

use crate::config::OpConfig;
use crate::dispatch::{self, Plan};
use crate::element::Element;
use crate::error::{invalid_operands, ArrayError, Result};
use crate::ops::{clip_pair, predicate, prepare};
use crate::scalar;

/// A comparison between an element and a parameter: `x OP param`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CmpOp {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

impl CmpOp {
    pub const ALL: [CmpOp; 6] = [
        CmpOp::Eq,
        CmpOp::Ne,
        CmpOp::Gt,
        CmpOp::Ge,
        CmpOp::Lt,
        CmpOp::Le,
    ];

    /// Operator with the operands exchanged: `a OP b` iff `b OP.swap() a`.
    pub fn swap(self) -> Self {
        match self {
            CmpOp::Eq => CmpOp::Eq,
            CmpOp::Ne => CmpOp::Ne,
            CmpOp::Gt => CmpOp::Lt,
            CmpOp::Ge => CmpOp::Le,
            CmpOp::Lt => CmpOp::Gt,
            CmpOp::Le => CmpOp::Ge,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            CmpOp::Eq => "==",
            CmpOp::Ne => "!=",
            CmpOp::Gt => ">",
            CmpOp::Ge => ">=",
            CmpOp::Lt => "<",
            CmpOp::Le => "<=",
        }
    }

    /// `a OP b` on scalars.
    #[inline(always)]
    pub fn apply<T: PartialOrd>(self, a: T, b: T) -> bool {
        match self {
            CmpOp::Eq => a == b,
            CmpOp::Ne => a != b,
            CmpOp::Gt => a > b,
            CmpOp::Ge => a >= b,
            CmpOp::Lt => a < b,
            CmpOp::Le => a <= b,
        }
    }
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for CmpOp {
    type Err = ArrayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "==" | "eq" => Ok(CmpOp::Eq),
            "!=" | "ne" => Ok(CmpOp::Ne),
            ">" | "gt" => Ok(CmpOp::Gt),
            ">=" | "ge" => Ok(CmpOp::Ge),
            "<" | "lt" => Ok(CmpOp::Lt),
            "<=" | "le" => Ok(CmpOp::Le),
            other => Err(invalid_operands(format!("unknown comparison operator '{other}'"))),
        }
    }
}

/// One side of a comparison or an arithmetic operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand<'a, T> {
    Scalar(T),
    Array(&'a [T]),
}

impl<'a, T: Copy> Operand<'a, T> {
    /// Element `i` of the operand; a scalar is the same at every index.
    #[inline(always)]
    pub(crate) fn at(&self, i: usize) -> T {
        match self {
            Operand::Scalar(value) => *value,
            Operand::Array(values) => values[i],
        }
    }
}

impl<'a, T> From<&'a [T]> for Operand<'a, T> {
    fn from(values: &'a [T]) -> Self {
        Operand::Array(values)
    }
}

impl<'a, T> From<&'a Vec<T>> for Operand<'a, T> {
    fn from(values: &'a Vec<T>) -> Self {
        Operand::Array(values.as_slice())
    }
}

/// `true` when every element pair satisfies `lhs OP rhs`.
///
/// # Errors
///
/// - [`ArrayError::InvalidOperands`] for two scalars
/// - [`ArrayError::LengthMismatch`] for arrays of different (clipped) lengths
/// - [`ArrayError::EmptyArray`] for an empty array
pub fn compare<T: Element>(
    op: CmpOp,
    lhs: Operand<'_, T>,
    rhs: Operand<'_, T>,
    cfg: &OpConfig,
) -> Result<bool> {
    match (lhs, rhs) {
        (Operand::Array(data), Operand::Scalar(param)) => predicate::all(op, data, param, cfg),
        (Operand::Scalar(param), Operand::Array(data)) => {
            predicate::all(op.swap(), data, param, cfg)
        }
        (Operand::Array(data), Operand::Array(other)) => {
            let data = prepare(data, cfg)?;
            let other = clip_pair(data.len(), other, cfg)?;
            Ok(all_pairwise(op, data, other, cfg))
        }
        (Operand::Scalar(_), Operand::Scalar(_)) => Err(invalid_operands(format!(
            "{} needs at least one array operand, got two scalars",
            op
        ))),
    }
}

fn all_pairwise<T: Element>(op: CmpOp, data: &[T], other: &[T], cfg: &OpConfig) -> bool {
    let kernel = dispatch::kernels::<T>(cfg).map(|table| table.all_pairwise);
    match dispatch::plan(data.len(), cfg, kernel) {
        Plan::Scalar => scalar::all_pairwise(op, data, other),
        Plan::Simd(kernel) => unsafe { kernel(op, data, other) },
        Plan::Parallel(kernel, chunk) => data
            .par_chunks(chunk)
            .zip(other.par_chunks(chunk))
            .all(|(a, b)| unsafe { kernel(op, a, b) }),
    }
}

macro_rules! compare_fn {
    ($($name:ident => $op:ident),* $(,)?) => {
        $(
            #[doc = concat!("[`compare`] with [`CmpOp::", stringify!($op), "`].")]
            pub fn $name<T: Element>(
                lhs: Operand<'_, T>,
                rhs: Operand<'_, T>,
                cfg: &OpConfig,
            ) -> Result<bool> {
                compare(CmpOp::$op, lhs, rhs, cfg)
            }
        )*
    };
}

compare_fn!(eq => Eq, ne => Ne, gt => Gt, ge => Ge, lt => Lt, le => Le);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_mirrors_operands() {
        for op in CmpOp::ALL {
            for (a, b) in [(1, 2), (2, 1), (3, 3)] {
                assert_eq!(op.apply(a, b), op.swap().apply(b, a), "{op} on ({a}, {b})");
            }
        }
    }

    #[test]
    fn test_parse_symbols_and_names() {
        assert_eq!("==".parse::<CmpOp>(), Ok(CmpOp::Eq));
        assert_eq!(" <= ".parse::<CmpOp>(), Ok(CmpOp::Le));
        assert_eq!("ge".parse::<CmpOp>(), Ok(CmpOp::Ge));
        assert!("=>".parse::<CmpOp>().is_err());
        for op in CmpOp::ALL {
            assert_eq!(op.to_string().parse::<CmpOp>(), Ok(op));
        }
    }

    #[test]
    fn test_nan_only_satisfies_ne() {
        for op in CmpOp::ALL {
            assert_eq!(op.apply(f32::NAN, 1.0), op == CmpOp::Ne);
        }
    }

    #[test]
    fn test_two_scalars_rejected() {
        let err = compare(CmpOp::Eq, Operand::Scalar(1u8), Operand::Scalar(1), &OpConfig::default())
            .unwrap_err();
        assert!(matches!(err, ArrayError::InvalidOperands { .. }));
    }

    #[test]
    fn test_array_pairs() {
        let cfg = OpConfig::default();
        let a = [1i64, 2, 3];
        let b = [1i64, 5, 3];
        assert!(le(Operand::Array(&a), Operand::Array(&b), &cfg).unwrap());
        assert!(!eq(Operand::Array(&a), Operand::Array(&b), &cfg).unwrap());
        assert_eq!(
            eq(Operand::Array(&a), Operand::Array(&b[..2]), &cfg),
            Err(ArrayError::LengthMismatch {
                expected: 3,
                found: 2
            })
        );
    }
}
