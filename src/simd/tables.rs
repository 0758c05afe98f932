//! Function-pointer tables binding each element type to its compiled kernels.
//!
//! A backend declares one static table per element type with the
//! `define_*_table!` macros below. The macros wrap every generic driver from
//! [`super::kernels`] in a function carrying the backend's `#[target_feature]`
//! attribute, so the whole loop is compiled for that instruction set. The
//! dispatcher only hands a table out once the instruction set has been detected,
//! which is what makes calling through these pointers sound.

use crate::ops::compare::CmpOp;

pub type PredicateFn<T> = unsafe fn(CmpOp, &[T], T) -> bool;
pub type PairwisePredicateFn<T> = unsafe fn(CmpOp, &[T], &[T]) -> bool;
pub type FindFn<T> = unsafe fn(CmpOp, &[T], T, bool) -> Option<usize>;
pub type CountFn<T> = unsafe fn(CmpOp, &[T], T) -> usize;
pub type FilterFn<T> = unsafe fn(CmpOp, &[T], T, &mut [T]) -> usize;
pub type IndicesFn<T> = unsafe fn(CmpOp, &[T], T, &mut [usize]) -> usize;
pub type ReduceFn<T> = unsafe fn(&[T]) -> T;
pub type UnaryFn<T> = unsafe fn(&mut [T]);
pub type ScalarArithFn<T> = unsafe fn(&mut [T], T);
pub type PairwiseArithFn<T> = unsafe fn(&mut [T], &[T]);
pub type CheckFn<T> = unsafe fn(&[T]) -> bool;

/// Kernels available for every element type.
pub struct KernelTable<T: 'static> {
    pub(crate) all: PredicateFn<T>,
    pub(crate) any: PredicateFn<T>,
    pub(crate) all_pairwise: PairwisePredicateFn<T>,
    pub(crate) find: FindFn<T>,
    pub(crate) count: CountFn<T>,
    pub(crate) filter: FilterFn<T>,
    pub(crate) indices: IndicesFn<T>,
    pub(crate) max: ReduceFn<T>,
    pub(crate) min: ReduceFn<T>,
    pub(crate) add: ScalarArithFn<T>,
    pub(crate) add_pairwise: PairwiseArithFn<T>,
    pub(crate) sub: ScalarArithFn<T>,
    pub(crate) sub_pairwise: PairwiseArithFn<T>,
    /// `None` where the instruction set has no lane multiply for this width.
    pub(crate) mul: Option<ScalarArithFn<T>>,
    pub(crate) mul_pairwise: Option<PairwiseArithFn<T>>,
    /// Floats only.
    pub(crate) div: Option<ScalarArithFn<T>>,
    pub(crate) div_pairwise: Option<PairwiseArithFn<T>>,
    pub(crate) all_finite: Option<CheckFn<T>>,
}

/// `abs` and `neg` for signed integers and floats.
pub struct SignedTable<T: 'static> {
    pub(crate) abs: UnaryFn<T>,
    pub(crate) neg: UnaryFn<T>,
}

/// Bitwise kernels for integers.
pub struct IntTable<T: 'static> {
    pub(crate) invert: UnaryFn<T>,
    pub(crate) and: ScalarArithFn<T>,
    pub(crate) and_pairwise: PairwiseArithFn<T>,
    pub(crate) or: ScalarArithFn<T>,
    pub(crate) or_pairwise: PairwiseArithFn<T>,
    pub(crate) xor: ScalarArithFn<T>,
    pub(crate) xor_pairwise: PairwiseArithFn<T>,
}

/// Rounding and square root for floats.
pub struct FloatTable<T: 'static> {
    pub(crate) sqrt: UnaryFn<T>,
    pub(crate) floor: UnaryFn<T>,
    pub(crate) ceil: UnaryFn<T>,
    pub(crate) trunc: UnaryFn<T>,
}

/// `static $name: KernelTable<$elem>` for vector type `$vec`.
///
/// `mul = native` wires the lane multiply, `mul = none` leaves it to the scalar
/// loop. `float = yes` adds division and the finiteness scan.
macro_rules! define_kernel_table {
    (#[$feature:meta] $name:ident: $vec:ty => $elem:ty, mul = $mul:ident, float = $float:ident) => {
        pub(crate) static $name: $crate::simd::tables::KernelTable<$elem> = {
            use $crate::ops::compare::CmpOp;
            use $crate::simd::kernels;

            #[$feature]
            unsafe fn all(op: CmpOp, data: &[$elem], param: $elem) -> bool {
                kernels::all::<$vec>(op, data, param)
            }

            #[$feature]
            unsafe fn any(op: CmpOp, data: &[$elem], param: $elem) -> bool {
                kernels::any::<$vec>(op, data, param)
            }

            #[$feature]
            unsafe fn all_pairwise(op: CmpOp, data: &[$elem], other: &[$elem]) -> bool {
                kernels::all_pairwise::<$vec>(op, data, other)
            }

            #[$feature]
            unsafe fn find(op: CmpOp, data: &[$elem], param: $elem, want: bool) -> Option<usize> {
                kernels::find::<$vec>(op, data, param, want)
            }

            #[$feature]
            unsafe fn count(op: CmpOp, data: &[$elem], param: $elem) -> usize {
                kernels::count::<$vec>(op, data, param)
            }

            #[$feature]
            unsafe fn filter(op: CmpOp, data: &[$elem], param: $elem, out: &mut [$elem]) -> usize {
                kernels::filter::<$vec>(op, data, param, out)
            }

            #[$feature]
            unsafe fn indices(op: CmpOp, data: &[$elem], param: $elem, out: &mut [usize]) -> usize {
                kernels::indices::<$vec>(op, data, param, out)
            }

            #[$feature]
            unsafe fn max(data: &[$elem]) -> $elem {
                kernels::max::<$vec>(data)
            }

            #[$feature]
            unsafe fn min(data: &[$elem]) -> $elem {
                kernels::min::<$vec>(data)
            }

            #[$feature]
            unsafe fn add(data: &mut [$elem], param: $elem) {
                kernels::zip_scalar::<$vec, kernels::Add>(data, param)
            }

            #[$feature]
            unsafe fn add_pairwise(data: &mut [$elem], other: &[$elem]) {
                kernels::zip_pairwise::<$vec, kernels::Add>(data, other)
            }

            #[$feature]
            unsafe fn sub(data: &mut [$elem], param: $elem) {
                kernels::zip_scalar::<$vec, kernels::Sub>(data, param)
            }

            #[$feature]
            unsafe fn sub_pairwise(data: &mut [$elem], other: &[$elem]) {
                kernels::zip_pairwise::<$vec, kernels::Sub>(data, other)
            }

            let (mul, mul_pairwise) = $crate::simd::tables::mul_kernels!(#[$feature] $mul, $vec => $elem);
            let (div, div_pairwise, all_finite) =
                $crate::simd::tables::float_kernels!(#[$feature] $float, $vec => $elem);

            $crate::simd::tables::KernelTable {
                all,
                any,
                all_pairwise,
                find,
                count,
                filter,
                indices,
                max,
                min,
                add,
                add_pairwise,
                sub,
                sub_pairwise,
                mul,
                mul_pairwise,
                div,
                div_pairwise,
                all_finite,
            }
        };
    };
}

macro_rules! mul_kernels {
    (#[$feature:meta] none, $vec:ty => $elem:ty) => {
        (None, None)
    };
    (#[$feature:meta] native, $vec:ty => $elem:ty) => {{
        #[$feature]
        unsafe fn mul(data: &mut [$elem], param: $elem) {
            $crate::simd::kernels::zip_scalar::<$vec, $crate::simd::kernels::Mul>(data, param)
        }

        #[$feature]
        unsafe fn mul_pairwise(data: &mut [$elem], other: &[$elem]) {
            $crate::simd::kernels::zip_pairwise::<$vec, $crate::simd::kernels::Mul>(data, other)
        }

        (
            Some(mul as $crate::simd::tables::ScalarArithFn<$elem>),
            Some(mul_pairwise as $crate::simd::tables::PairwiseArithFn<$elem>),
        )
    }};
}

macro_rules! float_kernels {
    (#[$feature:meta] no, $vec:ty => $elem:ty) => {
        (None, None, None)
    };
    (#[$feature:meta] yes, $vec:ty => $elem:ty) => {{
        #[$feature]
        unsafe fn div(data: &mut [$elem], param: $elem) {
            $crate::simd::kernels::zip_scalar::<$vec, $crate::simd::kernels::Div>(data, param)
        }

        #[$feature]
        unsafe fn div_pairwise(data: &mut [$elem], other: &[$elem]) {
            $crate::simd::kernels::zip_pairwise::<$vec, $crate::simd::kernels::Div>(data, other)
        }

        #[$feature]
        unsafe fn all_finite(data: &[$elem]) -> bool {
            $crate::simd::kernels::all_finite::<$vec>(data)
        }

        (
            Some(div as $crate::simd::tables::ScalarArithFn<$elem>),
            Some(div_pairwise as $crate::simd::tables::PairwiseArithFn<$elem>),
            Some(all_finite as $crate::simd::tables::CheckFn<$elem>),
        )
    }};
}

macro_rules! define_signed_table {
    (#[$feature:meta] $name:ident: $vec:ty => $elem:ty) => {
        pub(crate) static $name: $crate::simd::tables::SignedTable<$elem> = {
            use $crate::simd::kernels;

            #[$feature]
            unsafe fn abs(data: &mut [$elem]) {
                kernels::map::<$vec, kernels::Abs>(data)
            }

            #[$feature]
            unsafe fn neg(data: &mut [$elem]) {
                kernels::map::<$vec, kernels::Neg>(data)
            }

            $crate::simd::tables::SignedTable { abs, neg }
        };
    };
}

macro_rules! define_int_table {
    (#[$feature:meta] $name:ident: $vec:ty => $elem:ty) => {
        pub(crate) static $name: $crate::simd::tables::IntTable<$elem> = {
            use $crate::simd::kernels;

            #[$feature]
            unsafe fn invert(data: &mut [$elem]) {
                kernels::map::<$vec, kernels::Not>(data)
            }

            #[$feature]
            unsafe fn and(data: &mut [$elem], param: $elem) {
                kernels::zip_scalar::<$vec, kernels::And>(data, param)
            }

            #[$feature]
            unsafe fn and_pairwise(data: &mut [$elem], other: &[$elem]) {
                kernels::zip_pairwise::<$vec, kernels::And>(data, other)
            }

            #[$feature]
            unsafe fn or(data: &mut [$elem], param: $elem) {
                kernels::zip_scalar::<$vec, kernels::Or>(data, param)
            }

            #[$feature]
            unsafe fn or_pairwise(data: &mut [$elem], other: &[$elem]) {
                kernels::zip_pairwise::<$vec, kernels::Or>(data, other)
            }

            #[$feature]
            unsafe fn xor(data: &mut [$elem], param: $elem) {
                kernels::zip_scalar::<$vec, kernels::Xor>(data, param)
            }

            #[$feature]
            unsafe fn xor_pairwise(data: &mut [$elem], other: &[$elem]) {
                kernels::zip_pairwise::<$vec, kernels::Xor>(data, other)
            }

            $crate::simd::tables::IntTable {
                invert,
                and,
                and_pairwise,
                or,
                or_pairwise,
                xor,
                xor_pairwise,
            }
        };
    };
}

macro_rules! define_float_table {
    (#[$feature:meta] $name:ident: $vec:ty => $elem:ty) => {
        pub(crate) static $name: $crate::simd::tables::FloatTable<$elem> = {
            use $crate::simd::kernels;

            #[$feature]
            unsafe fn sqrt(data: &mut [$elem]) {
                kernels::map::<$vec, kernels::Sqrt>(data)
            }

            #[$feature]
            unsafe fn floor(data: &mut [$elem]) {
                kernels::map::<$vec, kernels::Floor>(data)
            }

            #[$feature]
            unsafe fn ceil(data: &mut [$elem]) {
                kernels::map::<$vec, kernels::Ceil>(data)
            }

            #[$feature]
            unsafe fn trunc(data: &mut [$elem]) {
                kernels::map::<$vec, kernels::Trunc>(data)
            }

            $crate::simd::tables::FloatTable {
                sqrt,
                floor,
                ceil,
                trunc,
            }
        };
    };
}

#[allow(unused_imports)]
pub(crate) use {
    define_float_table, define_int_table, define_kernel_table, define_signed_table,
    float_kernels, mul_kernels,
};
