//! 128-bit integer vectors.
//!
//! NEON has no `movemask`. Comparison results are narrowed with
//! `vshrn_n_u16::<4>`, which packs every byte of the 128-bit result into a nibble
//! of a 64-bit scalar, so each lane owns `4 * size_of::<T>()` bits and a full
//! match is `u64::MAX`.

use std::arch::aarch64::*;

use crate::simd::{SimdArith, SimdBits, SimdMul, SimdSigned, SimdVec};

/// Packs a byte-wise comparison result into a nibble mask.
#[inline(always)]
pub(super) unsafe fn nibble_mask(cmp: uint8x16_t) -> u64 {
    let narrowed = vshrn_n_u16::<4>(vreinterpretq_u16_u8(cmp));
    vget_lane_u64::<0>(vreinterpret_u64_u8(narrowed))
}

#[inline(always)]
unsafe fn bytes_u8(v: uint8x16_t) -> uint8x16_t {
    v
}

// 64-bit lanes have no native min/max/not.

#[inline(always)]
unsafe fn min_s64(a: int64x2_t, b: int64x2_t) -> int64x2_t {
    vbslq_s64(vcgtq_s64(a, b), b, a)
}

#[inline(always)]
unsafe fn max_s64(a: int64x2_t, b: int64x2_t) -> int64x2_t {
    vbslq_s64(vcgtq_s64(a, b), a, b)
}

#[inline(always)]
unsafe fn min_u64(a: uint64x2_t, b: uint64x2_t) -> uint64x2_t {
    vbslq_u64(vcgtq_u64(a, b), b, a)
}

#[inline(always)]
unsafe fn max_u64(a: uint64x2_t, b: uint64x2_t) -> uint64x2_t {
    vbslq_u64(vcgtq_u64(a, b), a, b)
}

#[inline(always)]
unsafe fn not_s64(a: int64x2_t) -> int64x2_t {
    vreinterpretq_s64_u8(vmvnq_u8(vreinterpretq_u8_s64(a)))
}

#[inline(always)]
unsafe fn not_u64(a: uint64x2_t) -> uint64x2_t {
    vreinterpretq_u64_u8(vmvnq_u8(vreinterpretq_u8_u64(a)))
}

macro_rules! int_vector {
    (
        $name:ident($elem:ty, $reg:ty),
        lanes = $lanes:literal,
        load = $load:ident,
        store = $store:ident,
        splat = $splat:ident,
        to_bytes = $to_bytes:path,
        eq = $eq:ident,
        gt = $gt:ident,
        ge = $ge:ident,
        lt = $lt:ident,
        le = $le:ident,
        min = $min:path,
        max = $max:path,
        add = $add:ident,
        sub = $sub:ident,
        not = $not:path,
        and = $and:ident,
        or = $or:ident,
        xor = $xor:ident
    ) => {
        #[derive(Clone, Copy)]
        pub(crate) struct $name($reg);

        impl SimdVec for $name {
            type Elem = $elem;

            const LANES: usize = $lanes;
            const MASK_STRIDE: u32 = 4 * std::mem::size_of::<$elem>() as u32;
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

        impl SimdBits for $name {
            #[inline(always)]
            unsafe fn not(self) -> Self {
                Self($not(self.0))
            }

            #[inline(always)]
            unsafe fn and(self, rhs: Self) -> Self {
                Self($and(self.0, rhs.0))
            }

            #[inline(always)]
            unsafe fn or(self, rhs: Self) -> Self {
                Self($or(self.0, rhs.0))
            }

            #[inline(always)]
            unsafe fn xor(self, rhs: Self) -> Self {
                Self($xor(self.0, rhs.0))
            }
        }
    };
}

int_vector!(I8x16(i8, int8x16_t), lanes = 16,
    load = vld1q_s8, store = vst1q_s8, splat = vdupq_n_s8, to_bytes = bytes_u8,
    eq = vceqq_s8, gt = vcgtq_s8, ge = vcgeq_s8, lt = vcltq_s8, le = vcleq_s8,
    min = vminq_s8, max = vmaxq_s8, add = vaddq_s8, sub = vsubq_s8,
    not = vmvnq_s8, and = vandq_s8, or = vorrq_s8, xor = veorq_s8);
int_vector!(U8x16(u8, uint8x16_t), lanes = 16,
    load = vld1q_u8, store = vst1q_u8, splat = vdupq_n_u8, to_bytes = bytes_u8,
    eq = vceqq_u8, gt = vcgtq_u8, ge = vcgeq_u8, lt = vcltq_u8, le = vcleq_u8,
    min = vminq_u8, max = vmaxq_u8, add = vaddq_u8, sub = vsubq_u8,
    not = vmvnq_u8, and = vandq_u8, or = vorrq_u8, xor = veorq_u8);
int_vector!(I16x8(i16, int16x8_t), lanes = 8,
    load = vld1q_s16, store = vst1q_s16, splat = vdupq_n_s16, to_bytes = vreinterpretq_u8_u16,
    eq = vceqq_s16, gt = vcgtq_s16, ge = vcgeq_s16, lt = vcltq_s16, le = vcleq_s16,
    min = vminq_s16, max = vmaxq_s16, add = vaddq_s16, sub = vsubq_s16,
    not = vmvnq_s16, and = vandq_s16, or = vorrq_s16, xor = veorq_s16);
int_vector!(U16x8(u16, uint16x8_t), lanes = 8,
    load = vld1q_u16, store = vst1q_u16, splat = vdupq_n_u16, to_bytes = vreinterpretq_u8_u16,
    eq = vceqq_u16, gt = vcgtq_u16, ge = vcgeq_u16, lt = vcltq_u16, le = vcleq_u16,
    min = vminq_u16, max = vmaxq_u16, add = vaddq_u16, sub = vsubq_u16,
    not = vmvnq_u16, and = vandq_u16, or = vorrq_u16, xor = veorq_u16);
int_vector!(I32x4(i32, int32x4_t), lanes = 4,
    load = vld1q_s32, store = vst1q_s32, splat = vdupq_n_s32, to_bytes = vreinterpretq_u8_u32,
    eq = vceqq_s32, gt = vcgtq_s32, ge = vcgeq_s32, lt = vcltq_s32, le = vcleq_s32,
    min = vminq_s32, max = vmaxq_s32, add = vaddq_s32, sub = vsubq_s32,
    not = vmvnq_s32, and = vandq_s32, or = vorrq_s32, xor = veorq_s32);
int_vector!(U32x4(u32, uint32x4_t), lanes = 4,
    load = vld1q_u32, store = vst1q_u32, splat = vdupq_n_u32, to_bytes = vreinterpretq_u8_u32,
    eq = vceqq_u32, gt = vcgtq_u32, ge = vcgeq_u32, lt = vcltq_u32, le = vcleq_u32,
    min = vminq_u32, max = vmaxq_u32, add = vaddq_u32, sub = vsubq_u32,
    not = vmvnq_u32, and = vandq_u32, or = vorrq_u32, xor = veorq_u32);
int_vector!(I64x2(i64, int64x2_t), lanes = 2,
    load = vld1q_s64, store = vst1q_s64, splat = vdupq_n_s64, to_bytes = vreinterpretq_u8_u64,
    eq = vceqq_s64, gt = vcgtq_s64, ge = vcgeq_s64, lt = vcltq_s64, le = vcleq_s64,
    min = min_s64, max = max_s64, add = vaddq_s64, sub = vsubq_s64,
    not = not_s64, and = vandq_s64, or = vorrq_s64, xor = veorq_s64);
int_vector!(U64x2(u64, uint64x2_t), lanes = 2,
    load = vld1q_u64, store = vst1q_u64, splat = vdupq_n_u64, to_bytes = vreinterpretq_u8_u64,
    eq = vceqq_u64, gt = vcgtq_u64, ge = vcgeq_u64, lt = vcltq_u64, le = vcleq_u64,
    min = min_u64, max = max_u64, add = vaddq_u64, sub = vsubq_u64,
    not = not_u64, and = vandq_u64, or = vorrq_u64, xor = veorq_u64);

macro_rules! mul_vector {
    ($($name:ident => $mul:ident),* $(,)?) => {
        $(
            impl SimdMul for $name {
                #[inline(always)]
                unsafe fn mul(self, rhs: Self) -> Self {
                    Self($mul(self.0, rhs.0))
                }
            }
        )*
    };
}

// NEON multiplies 8-, 16- and 32-bit lanes; 64-bit lanes stay scalar.
mul_vector!(
    I8x16 => vmulq_s8,
    U8x16 => vmulq_u8,
    I16x8 => vmulq_s16,
    U16x8 => vmulq_u16,
    I32x4 => vmulq_s32,
    U32x4 => vmulq_u32,
);

macro_rules! signed_vector {
    ($($name:ident => $abs:ident, $neg:ident);* $(;)?) => {
        $(
            impl SimdSigned for $name {
                /// Wrapping: `vabsq(MIN) == MIN`, unlike the saturating `vqabsq`.
                #[inline(always)]
                unsafe fn abs(self) -> Self {
                    Self($abs(self.0))
                }

                #[inline(always)]
                unsafe fn neg(self) -> Self {
                    Self($neg(self.0))
                }
            }
        )*
    };
}

signed_vector!(
    I8x16 => vabsq_s8, vnegq_s8;
    I16x8 => vabsq_s16, vnegq_s16;
    I32x4 => vabsq_s32, vnegq_s32;
    I64x2 => vabsq_s64, vnegq_s64;
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nibble_mask_layout() {
        let a = [0i32, 7, 0, 7];
        unsafe {
            let v = I32x4::load(a.as_ptr());
            let mask = v.eq_mask(I32x4::splat(7));
            assert_eq!(mask, 0xFFFF_0000_FFFF_0000);
            assert_eq!(mask.trailing_zeros() / I32x4::MASK_STRIDE, 1);
            assert_eq!(v.ne_mask(v), 0);
        }
    }

    #[test]
    fn test_u64_min_max_and_not() {
        let a = [u64::MAX, 3];
        let b = [1u64, 9];
        let mut out = [0u64; 2];
        unsafe {
            let (va, vb) = (U64x2::load(a.as_ptr()), U64x2::load(b.as_ptr()));
            va.min(vb).store(out.as_mut_ptr());
            assert_eq!(out, [1, 3]);
            va.max(vb).store(out.as_mut_ptr());
            assert_eq!(out, [u64::MAX, 9]);
            va.not().store(out.as_mut_ptr());
            assert_eq!(out, [0, !3]);
        }
    }

    #[test]
    fn test_wrapping_abs() {
        let a = [i8::MIN, -1, 5, 0, -128, 127, -7, 1, 0, 0, 0, 0, 0, 0, 0, 0];
        let mut out = [0i8; 16];
        unsafe {
            I8x16::load(a.as_ptr()).abs().store(out.as_mut_ptr());
        }
        assert_eq!(&out[..8], &[i8::MIN, 1, 5, 0, i8::MIN, 127, 7, 1]);
    }
}
