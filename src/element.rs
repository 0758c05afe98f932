//! Numeric element types supported by every operation.
//!
//! [`Element`] is sealed and implemented for the ten fixed-width numeric types.
//! The refinement traits gate the operations that only make sense for a subset of
//! them: [`SignedElement`] for `abs`/`neg`, [`IntElement`] for bitwise operations
//! and [`FloatElement`] for rounding and `sqrt`.
//!
//! Each implementation also knows where its SIMD kernels live for every
//! instruction set the crate targets; the dispatcher asks for them at runtime.

use std::fmt::Debug;

use num::traits::{WrappingAdd, WrappingMul, WrappingNeg, WrappingSub};
use num::{Float, PrimInt};

use crate::dispatch::IsaLevel;
use crate::error::{ArrayError, Result};
use crate::simd::tables::{FloatTable, IntTable, KernelTable, SignedTable};

mod sealed {
    pub trait Sealed {}
}

/// Broad category of an element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    SignedInt,
    UnsignedInt,
    Float,
}

/// Binary arithmetic performed by [`crate::ops::math`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl ArithOp {
    pub fn name(self) -> &'static str {
        match self {
            ArithOp::Add => "add",
            ArithOp::Sub => "sub",
            ArithOp::Mul => "mul",
            ArithOp::Div => "div",
        }
    }
}

/// A fixed-width numeric type the kernels operate on.
pub trait Element:
    sealed::Sealed + Copy + Default + Send + Sync + PartialEq + PartialOrd + Debug + 'static
{
    const KIND: ElementKind;
    const NAME: &'static str;
    /// Smallest value; the most negative finite value for floats.
    const MIN: Self;
    const MAX: Self;

    /// Wrapping integer arithmetic, IEEE arithmetic for floats.
    ///
    /// Integer division by zero leaves `a` unchanged; callers reject zero
    /// divisors before reaching this point.
    fn wrapping_arith(op: ArithOp, a: Self, b: Self) -> Self;

    /// Arithmetic that reports integer overflow and division by zero.
    fn checked_arith(op: ArithOp, a: Self, b: Self) -> Result<Self>;

    /// Always `true` for integers.
    fn is_finite_value(self) -> bool;

    #[doc(hidden)]
    fn kernel_table(isa: IsaLevel) -> Option<&'static KernelTable<Self>>;
}

/// Element types with a sign: signed integers and floats.
pub trait SignedElement: Element {
    /// The value whose negation does not fit the type, if there is one.
    const OVERFLOW_SENTINEL: Option<Self>;

    fn lane_abs(self) -> Self;
    fn lane_neg(self) -> Self;

    #[doc(hidden)]
    fn signed_table(isa: IsaLevel) -> Option<&'static SignedTable<Self>>;
}

/// The eight integer element types.
pub trait IntElement: Element + PrimInt + WrappingAdd + WrappingSub + WrappingMul {
    #[doc(hidden)]
    fn int_table(isa: IsaLevel) -> Option<&'static IntTable<Self>>;
}

/// `f32` and `f64`.
pub trait FloatElement: Element + Float {
    #[doc(hidden)]
    fn float_table(isa: IsaLevel) -> Option<&'static FloatTable<Self>>;
}

/// NaN test usable on any element; integers are never NaN.
#[inline(always)]
#[allow(clippy::eq_op)]
pub(crate) fn is_nan<T: PartialEq + Copy>(x: T) -> bool {
    x != x
}

fn int_wrapping_arith<T: IntElement>(op: ArithOp, a: T, b: T) -> T {
    match op {
        ArithOp::Add => a.wrapping_add(&b),
        ArithOp::Sub => a.wrapping_sub(&b),
        ArithOp::Mul => a.wrapping_mul(&b),
        // Only MIN / -1 fails checked division once zero is excluded, and it wraps to MIN.
        ArithOp::Div if b.is_zero() => a,
        ArithOp::Div => a.checked_div(&b).unwrap_or(a),
    }
}

fn int_checked_arith<T: IntElement>(op: ArithOp, a: T, b: T) -> Result<T> {
    let result = match op {
        ArithOp::Add => a.checked_add(&b),
        ArithOp::Sub => a.checked_sub(&b),
        ArithOp::Mul => a.checked_mul(&b),
        ArithOp::Div => {
            if b.is_zero() {
                return Err(ArrayError::ZeroDivision { op: op.name() });
            }
            a.checked_div(&b)
        }
    };
    result.ok_or(ArrayError::Overflow { op: op.name() })
}

fn float_arith<T: Float>(op: ArithOp, a: T, b: T) -> T {
    match op {
        ArithOp::Add => a + b,
        ArithOp::Sub => a - b,
        ArithOp::Mul => a * b,
        ArithOp::Div => a / b,
    }
}

macro_rules! kernel_lookup {
    ($isa:expr, $table:ident) => {
        match $isa {
            #[cfg(target_arch = "x86_64")]
            IsaLevel::Avx2 => Some(&crate::simd::avx2::$table),
            #[cfg(target_arch = "aarch64")]
            IsaLevel::Neon => Some(&crate::simd::neon::$table),
            _ => None,
        }
    };
}

macro_rules! impl_int_element {
    ($elem:ty, $kind:expr, kernels = $kernels:ident, int = $int:ident) => {
        impl sealed::Sealed for $elem {}

        impl Element for $elem {
            const KIND: ElementKind = $kind;
            const NAME: &'static str = stringify!($elem);
            const MIN: Self = <$elem>::MIN;
            const MAX: Self = <$elem>::MAX;

            #[inline(always)]
            fn wrapping_arith(op: ArithOp, a: Self, b: Self) -> Self {
                int_wrapping_arith(op, a, b)
            }

            #[inline(always)]
            fn checked_arith(op: ArithOp, a: Self, b: Self) -> Result<Self> {
                int_checked_arith(op, a, b)
            }

            #[inline(always)]
            fn is_finite_value(self) -> bool {
                true
            }

            fn kernel_table(isa: IsaLevel) -> Option<&'static KernelTable<Self>> {
                kernel_lookup!(isa, $kernels)
            }
        }

        impl IntElement for $elem {
            fn int_table(isa: IsaLevel) -> Option<&'static IntTable<Self>> {
                kernel_lookup!(isa, $int)
            }
        }
    };
}

macro_rules! impl_signed_int {
    ($elem:ty, signed = $signed:ident) => {
        impl SignedElement for $elem {
            const OVERFLOW_SENTINEL: Option<Self> = Some(<$elem>::MIN);

            #[inline(always)]
            fn lane_abs(self) -> Self {
                if self < 0 {
                    WrappingNeg::wrapping_neg(&self)
                } else {
                    self
                }
            }

            #[inline(always)]
            fn lane_neg(self) -> Self {
                WrappingNeg::wrapping_neg(&self)
            }

            fn signed_table(isa: IsaLevel) -> Option<&'static SignedTable<Self>> {
                kernel_lookup!(isa, $signed)
            }
        }
    };
}

macro_rules! impl_float_element {
    ($elem:ty, kernels = $kernels:ident, signed = $signed:ident, float = $float:ident) => {
        impl sealed::Sealed for $elem {}

        impl Element for $elem {
            const KIND: ElementKind = ElementKind::Float;
            const NAME: &'static str = stringify!($elem);
            const MIN: Self = <$elem>::MIN;
            const MAX: Self = <$elem>::MAX;

            #[inline(always)]
            fn wrapping_arith(op: ArithOp, a: Self, b: Self) -> Self {
                float_arith(op, a, b)
            }

            #[inline(always)]
            fn checked_arith(op: ArithOp, a: Self, b: Self) -> Result<Self> {
                Ok(float_arith(op, a, b))
            }

            #[inline(always)]
            fn is_finite_value(self) -> bool {
                Float::is_finite(self)
            }

            fn kernel_table(isa: IsaLevel) -> Option<&'static KernelTable<Self>> {
                kernel_lookup!(isa, $kernels)
            }
        }

        impl SignedElement for $elem {
            const OVERFLOW_SENTINEL: Option<Self> = None;

            #[inline(always)]
            fn lane_abs(self) -> Self {
                Float::abs(self)
            }

            #[inline(always)]
            fn lane_neg(self) -> Self {
                -self
            }

            fn signed_table(isa: IsaLevel) -> Option<&'static SignedTable<Self>> {
                kernel_lookup!(isa, $signed)
            }
        }

        impl FloatElement for $elem {
            fn float_table(isa: IsaLevel) -> Option<&'static FloatTable<Self>> {
                kernel_lookup!(isa, $float)
            }
        }
    };
}

impl_int_element!(i8, ElementKind::SignedInt, kernels = I8_KERNELS, int = I8_INT);
impl_int_element!(u8, ElementKind::UnsignedInt, kernels = U8_KERNELS, int = U8_INT);
impl_int_element!(i16, ElementKind::SignedInt, kernels = I16_KERNELS, int = I16_INT);
impl_int_element!(u16, ElementKind::UnsignedInt, kernels = U16_KERNELS, int = U16_INT);
impl_int_element!(i32, ElementKind::SignedInt, kernels = I32_KERNELS, int = I32_INT);
impl_int_element!(u32, ElementKind::UnsignedInt, kernels = U32_KERNELS, int = U32_INT);
impl_int_element!(i64, ElementKind::SignedInt, kernels = I64_KERNELS, int = I64_INT);
impl_int_element!(u64, ElementKind::UnsignedInt, kernels = U64_KERNELS, int = U64_INT);

impl_signed_int!(i8, signed = I8_SIGNED);
impl_signed_int!(i16, signed = I16_SIGNED);
impl_signed_int!(i32, signed = I32_SIGNED);
impl_signed_int!(i64, signed = I64_SIGNED);

impl_float_element!(f32, kernels = F32_KERNELS, signed = F32_SIGNED, float = F32_FLOAT);
impl_float_element!(f64, kernels = F64_KERNELS, signed = F64_SIGNED, float = F64_FLOAT);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_arith_reports_overflow() {
        assert_eq!(i8::checked_arith(ArithOp::Add, 100, 27), Ok(127));
        assert_eq!(
            i8::checked_arith(ArithOp::Add, 100, 28),
            Err(ArrayError::Overflow { op: "add" })
        );
        assert_eq!(
            u16::checked_arith(ArithOp::Sub, 0, 1),
            Err(ArrayError::Overflow { op: "sub" })
        );
        assert_eq!(
            i32::checked_arith(ArithOp::Div, i32::MIN, -1),
            Err(ArrayError::Overflow { op: "div" })
        );
        assert_eq!(
            u64::checked_arith(ArithOp::Div, 5, 0),
            Err(ArrayError::ZeroDivision { op: "div" })
        );
    }

    #[test]
    fn test_wrapping_arith() {
        assert_eq!(u8::wrapping_arith(ArithOp::Add, 250, 10), 4);
        assert_eq!(i16::wrapping_arith(ArithOp::Mul, i16::MAX, 2), -2);
        assert_eq!(i64::wrapping_arith(ArithOp::Div, i64::MIN, -1), i64::MIN);
        assert_eq!(f32::wrapping_arith(ArithOp::Div, 1.0, 0.0), f32::INFINITY);
    }

    #[test]
    fn test_signed_lane_ops() {
        assert_eq!(i8::MIN.lane_abs(), i8::MIN);
        assert_eq!((-5i32).lane_abs(), 5);
        assert_eq!(i64::MIN.lane_neg(), i64::MIN);
        assert_eq!((-0.0f64).lane_abs().to_bits(), 0.0f64.to_bits());
        assert_eq!(i16::OVERFLOW_SENTINEL, Some(i16::MIN));
        assert_eq!(f32::OVERFLOW_SENTINEL, None);
    }

    #[test]
    fn test_is_nan_and_finite() {
        assert!(is_nan(f32::NAN));
        assert!(!is_nan(3u8));
        assert!(!f64::INFINITY.is_finite_value());
        assert!(i32::MAX.is_finite_value());
        assert_eq!(<u32 as Element>::NAME, "u32");
        assert_eq!(<i16 as Element>::MIN, i16::MIN);
        assert_eq!(<u8 as Element>::MAX, 255);
    }
}
