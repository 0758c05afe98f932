//! 256-bit float vectors.
//!
//! Ordered comparisons use the `_OQ` predicates, so any lane holding NaN
//! compares false. Masks come from `movemask_ps`/`movemask_pd`: one bit per lane.

use std::arch::x86_64::*;

use crate::simd::{SimdArith, SimdFloat, SimdMul, SimdSigned, SimdVec};

const ROUND_TO_ZERO: i32 = _MM_FROUND_TO_ZERO | _MM_FROUND_NO_EXC;

macro_rules! float_vector {
    (
        $name:ident($elem:ty, $reg:ty),
        lanes = $lanes:literal,
        full = $full:literal,
        load = $load:ident,
        store = $store:ident,
        set1 = $set1:ident,
        setzero = $setzero:ident,
        cmp = $cmp:ident,
        movemask = $movemask:ident,
        min = $min:ident,
        max = $max:ident,
        add = $add:ident,
        sub = $sub:ident,
        mul = $mul:ident,
        div = $div:ident,
        and_not = $andnot:ident,
        xor = $xor:ident,
        sqrt = $sqrt:ident,
        floor = $floor:ident,
        ceil = $ceil:ident,
        round = $round:ident
    ) => {
        #[derive(Clone, Copy)]
        pub(crate) struct $name($reg);

        impl $name {
            #[inline(always)]
            unsafe fn mask_of(cmp: $reg) -> u64 {
                $movemask(cmp) as u32 as u64
            }
        }

        impl SimdVec for $name {
            type Elem = $elem;

            const LANES: usize = $lanes;
            const MASK_STRIDE: u32 = 1;
            const FULL_MASK: u64 = $full;

            #[inline(always)]
            unsafe fn load(ptr: *const $elem) -> Self {
                Self($load(ptr))
            }

            #[inline(always)]
            unsafe fn store(self, ptr: *mut $elem) {
                $store(ptr, self.0)
            }

            #[inline(always)]
            unsafe fn splat(value: $elem) -> Self {
                Self($set1(value))
            }

            #[inline(always)]
            unsafe fn eq_mask(self, rhs: Self) -> u64 {
                Self::mask_of($cmp::<_CMP_EQ_OQ>(self.0, rhs.0))
            }

            #[inline(always)]
            unsafe fn gt_mask(self, rhs: Self) -> u64 {
                Self::mask_of($cmp::<_CMP_GT_OQ>(self.0, rhs.0))
            }

            #[inline(always)]
            unsafe fn ge_mask(self, rhs: Self) -> u64 {
                Self::mask_of($cmp::<_CMP_GE_OQ>(self.0, rhs.0))
            }

            #[inline(always)]
            unsafe fn lt_mask(self, rhs: Self) -> u64 {
                Self::mask_of($cmp::<_CMP_LT_OQ>(self.0, rhs.0))
            }

            #[inline(always)]
            unsafe fn le_mask(self, rhs: Self) -> u64 {
                Self::mask_of($cmp::<_CMP_LE_OQ>(self.0, rhs.0))
            }

            #[inline(always)]
            unsafe fn min(self, rhs: Self) -> Self {
                Self($min(self.0, rhs.0))
            }

            #[inline(always)]
            unsafe fn max(self, rhs: Self) -> Self {
                Self($max(self.0, rhs.0))
            }

            #[inline(always)]
            unsafe fn nan_mask(self) -> u64 {
                Self::mask_of($cmp::<_CMP_UNORD_Q>(self.0, self.0))
            }
        }

        impl SimdArith for $name {
            #[inline(always)]
            unsafe fn add(self, rhs: Self) -> Self {
                Self($add(self.0, rhs.0))
            }

            #[inline(always)]
            unsafe fn sub(self, rhs: Self) -> Self {
                Self($sub(self.0, rhs.0))
            }
        }

        impl SimdMul for $name {
            #[inline(always)]
            unsafe fn mul(self, rhs: Self) -> Self {
                Self($mul(self.0, rhs.0))
            }
        }

        impl SimdSigned for $name {
            /// Clears the sign bit.
            #[inline(always)]
            unsafe fn abs(self) -> Self {
                Self($andnot($set1(-0.0), self.0))
            }

            /// Flips the sign bit.
            #[inline(always)]
            unsafe fn neg(self) -> Self {
                Self($xor(self.0, $set1(-0.0)))
            }
        }

        impl SimdFloat for $name {
            #[inline(always)]
            unsafe fn div(self, rhs: Self) -> Self {
                Self($div(self.0, rhs.0))
            }

            #[inline(always)]
            unsafe fn sqrt(self) -> Self {
                Self($sqrt(self.0))
            }

            #[inline(always)]
            unsafe fn floor(self) -> Self {
                Self($floor(self.0))
            }

            #[inline(always)]
            unsafe fn ceil(self) -> Self {
                Self($ceil(self.0))
            }

            #[inline(always)]
            unsafe fn trunc(self) -> Self {
                Self($round::<ROUND_TO_ZERO>(self.0))
            }

            /// `x - x` is zero exactly when `x` is finite; infinities and NaN give NaN.
            #[inline(always)]
            unsafe fn finite_mask(self) -> u64 {
                let diff = $sub(self.0, self.0);
                Self::mask_of($cmp::<_CMP_EQ_OQ>(diff, $setzero()))
            }
        }
    };
}

float_vector!(
    F32x8(f32, __m256),
    lanes = 8,
    full = 0xFF,
    load = _mm256_loadu_ps,
    store = _mm256_storeu_ps,
    set1 = _mm256_set1_ps,
    setzero = _mm256_setzero_ps,
    cmp = _mm256_cmp_ps,
    movemask = _mm256_movemask_ps,
    min = _mm256_min_ps,
    max = _mm256_max_ps,
    add = _mm256_add_ps,
    sub = _mm256_sub_ps,
    mul = _mm256_mul_ps,
    div = _mm256_div_ps,
    and_not = _mm256_andnot_ps,
    xor = _mm256_xor_ps,
    sqrt = _mm256_sqrt_ps,
    floor = _mm256_floor_ps,
    ceil = _mm256_ceil_ps,
    round = _mm256_round_ps
);

float_vector!(
    F64x4(f64, __m256d),
    lanes = 4,
    full = 0xF,
    load = _mm256_loadu_pd,
    store = _mm256_storeu_pd,
    set1 = _mm256_set1_pd,
    setzero = _mm256_setzero_pd,
    cmp = _mm256_cmp_pd,
    movemask = _mm256_movemask_pd,
    min = _mm256_min_pd,
    max = _mm256_max_pd,
    add = _mm256_add_pd,
    sub = _mm256_sub_pd,
    mul = _mm256_mul_pd,
    div = _mm256_div_pd,
    and_not = _mm256_andnot_pd,
    xor = _mm256_xor_pd,
    sqrt = _mm256_sqrt_pd,
    floor = _mm256_floor_pd,
    ceil = _mm256_ceil_pd,
    round = _mm256_round_pd
);
