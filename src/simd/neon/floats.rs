//! 128-bit float vectors.
//!
//! NEON comparisons are ordered: a NaN lane compares false against everything.

use std::arch::aarch64::*;

use super::ints::nibble_mask;
use crate::simd::{SimdArith, SimdFloat, SimdMul, SimdSigned, SimdVec};

macro_rules! float_vector {
    (
        $name:ident($elem:ty, $reg:ty),
        lanes = $lanes:literal,
        stride = $stride:literal,
        load = $load:ident,
        store = $store:ident,
        splat = $splat:ident,
        to_bytes = $to_bytes:ident,
        eq = $eq:ident,
        gt = $gt:ident,
        ge = $ge:ident,
        lt = $lt:ident,
        le = $le:ident,
        min = $min:ident,
        max = $max:ident,
        add = $add:ident,
        sub = $sub:ident,
        mul = $mul:ident,
        div = $div:ident,
        abs = $abs:ident,
        neg = $neg:ident,
        sqrt = $sqrt:ident,
        floor = $floor:ident,
        ceil = $ceil:ident,
        trunc = $trunc:ident
    ) => {
        #[derive(Clone, Copy)]
        pub(crate) struct $name($reg);

        impl SimdVec for $name {
            type Elem = $elem;

            const LANES: usize = $lanes;
            const MASK_STRIDE: u32 = $stride;
            const FULL_MASK: u64 = u64::MAX;

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
                Self($splat(value))
            }

            #[inline(always)]
            unsafe fn eq_mask(self, rhs: Self) -> u64 {
                nibble_mask($to_bytes($eq(self.0, rhs.0)))
            }

            #[inline(always)]
            unsafe fn gt_mask(self, rhs: Self) -> u64 {
                nibble_mask($to_bytes($gt(self.0, rhs.0)))
            }

            #[inline(always)]
            unsafe fn ge_mask(self, rhs: Self) -> u64 {
                nibble_mask($to_bytes($ge(self.0, rhs.0)))
            }

            #[inline(always)]
            unsafe fn lt_mask(self, rhs: Self) -> u64 {
                nibble_mask($to_bytes($lt(self.0, rhs.0)))
            }

            #[inline(always)]
            unsafe fn le_mask(self, rhs: Self) -> u64 {
                nibble_mask($to_bytes($le(self.0, rhs.0)))
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
                self.eq_mask(self) ^ Self::FULL_MASK
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
            #[inline(always)]
            unsafe fn abs(self) -> Self {
                Self($abs(self.0))
            }

            #[inline(always)]
            unsafe fn neg(self) -> Self {
                Self($neg(self.0))
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
                Self($trunc(self.0))
            }

            /// `x - x` is zero exactly when `x` is finite.
            #[inline(always)]
            unsafe fn finite_mask(self) -> u64 {
                let diff = $sub(self.0, self.0);
                nibble_mask($to_bytes($eq(diff, $splat(0.0))))
            }
        }
    };
}

float_vector!(
    F32x4(f32, float32x4_t),
    lanes = 4,
    stride = 16,
    load = vld1q_f32,
    store = vst1q_f32,
    splat = vdupq_n_f32,
    to_bytes = vreinterpretq_u8_u32,
    eq = vceqq_f32,
    gt = vcgtq_f32,
    ge = vcgeq_f32,
    lt = vcltq_f32,
    le = vcleq_f32,
    min = vminq_f32,
    max = vmaxq_f32,
    add = vaddq_f32,
    sub = vsubq_f32,
    mul = vmulq_f32,
    div = vdivq_f32,
    abs = vabsq_f32,
    neg = vnegq_f32,
    sqrt = vsqrtq_f32,
    floor = vrndmq_f32,
    ceil = vrndpq_f32,
    trunc = vrndq_f32
);

float_vector!(
    F64x2(f64, float64x2_t),
    lanes = 2,
    stride = 32,
    load = vld1q_f64,
    store = vst1q_f64,
    splat = vdupq_n_f64,
    to_bytes = vreinterpretq_u8_u64,
    eq = vceqq_f64,
    gt = vcgtq_f64,
    ge = vcgeq_f64,
    lt = vcltq_f64,
    le = vcleq_f64,
    min = vminq_f64,
    max = vmaxq_f64,
    add = vaddq_f64,
    sub = vsubq_f64,
    mul = vmulq_f64,
    div = vdivq_f64,
    abs = vabsq_f64,
    neg = vnegq_f64,
    sqrt = vsqrtq_f64,
    floor = vrndmq_f64,
    ceil = vrndpq_f64,
    trunc = vrndq_f64
);
