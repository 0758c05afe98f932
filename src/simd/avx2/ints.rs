//! 256-bit integer vectors.
//!
//! All eight integer widths share one `__m256i` wrapper shape. Comparison masks
//! come from `_mm256_movemask_epi8`, so each lane owns `size_of::<T>()` bits.
//! AVX2 only has signed `cmpgt`; unsigned comparisons flip the sign bit of both
//! operands first.

use std::arch::x86_64::*;

use crate::simd::{SimdArith, SimdBits, SimdMul, SimdSigned, SimdVec};

#[inline(always)]
unsafe fn byte_mask(cmp: __m256i) -> u64 {
    _mm256_movemask_epi8(cmp) as u32 as u64
}

#[inline(always)]
unsafe fn gt_u8(a: __m256i, b: __m256i) -> __m256i {
    let bias = _mm256_set1_epi8(i8::MIN);
    _mm256_cmpgt_epi8(_mm256_xor_si256(a, bias), _mm256_xor_si256(b, bias))
}

#[inline(always)]
unsafe fn gt_u16(a: __m256i, b: __m256i) -> __m256i {
    let bias = _mm256_set1_epi16(i16::MIN);
    _mm256_cmpgt_epi16(_mm256_xor_si256(a, bias), _mm256_xor_si256(b, bias))
}

#[inline(always)]
unsafe fn gt_u32(a: __m256i, b: __m256i) -> __m256i {
    let bias = _mm256_set1_epi32(i32::MIN);
    _mm256_cmpgt_epi32(_mm256_xor_si256(a, bias), _mm256_xor_si256(b, bias))
}

#[inline(always)]
unsafe fn gt_u64(a: __m256i, b: __m256i) -> __m256i {
    let bias = _mm256_set1_epi64x(i64::MIN);
    _mm256_cmpgt_epi64(_mm256_xor_si256(a, bias), _mm256_xor_si256(b, bias))
}

// No 64-bit min/max before AVX-512: select on the comparison instead.

#[inline(always)]
unsafe fn min_i64(a: __m256i, b: __m256i) -> __m256i {
    _mm256_blendv_epi8(a, b, _mm256_cmpgt_epi64(a, b))
}

#[inline(always)]
unsafe fn max_i64(a: __m256i, b: __m256i) -> __m256i {
    _mm256_blendv_epi8(b, a, _mm256_cmpgt_epi64(a, b))
}

#[inline(always)]
unsafe fn min_u64(a: __m256i, b: __m256i) -> __m256i {
    _mm256_blendv_epi8(a, b, gt_u64(a, b))
}

#[inline(always)]
unsafe fn max_u64(a: __m256i, b: __m256i) -> __m256i {
    _mm256_blendv_epi8(b, a, gt_u64(a, b))
}

macro_rules! int_vector {
    (
        $name:ident($elem:ty),
        lanes = $lanes:literal,
        splat = $splat:ident as $splat_ty:ty,
        eq = $eq:path,
        gt = $gt:path,
        min = $min:path,
        max = $max:path,
        add = $add:path,
        sub = $sub:path
    ) => {
        #[derive(Clone, Copy)]
        pub(crate) struct $name(__m256i);

        impl SimdVec for $name {
            type Elem = $elem;

            const LANES: usize = $lanes;
            const MASK_STRIDE: u32 = std::mem::size_of::<$elem>() as u32;
            const FULL_MASK: u64 = 0xFFFF_FFFF;

            #[inline(always)]
            unsafe fn load(ptr: *const $elem) -> Self {
                Self(_mm256_loadu_si256(ptr.cast()))
            }

            #[inline(always)]
            unsafe fn store(self, ptr: *mut $elem) {
                _mm256_storeu_si256(ptr.cast(), self.0)
            }

            #[inline(always)]
            unsafe fn splat(value: $elem) -> Self {
                Self($splat(value as $splat_ty))
            }

            #[inline(always)]
            unsafe fn eq_mask(self, rhs: Self) -> u64 {
                byte_mask($eq(self.0, rhs.0))
            }

            #[inline(always)]
            unsafe fn gt_mask(self, rhs: Self) -> u64 {
                byte_mask($gt(self.0, rhs.0))
            }

            #[inline(always)]
            unsafe fn ge_mask(self, rhs: Self) -> u64 {
                self.lt_mask(rhs) ^ Self::FULL_MASK
            }

            #[inline(always)]
            unsafe fn lt_mask(self, rhs: Self) -> u64 {
                byte_mask($gt(rhs.0, self.0))
            }

            #[inline(always)]
            unsafe fn le_mask(self, rhs: Self) -> u64 {
                self.gt_mask(rhs) ^ Self::FULL_MASK
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
                Self(_mm256_xor_si256(self.0, _mm256_set1_epi32(-1)))
            }

            #[inline(always)]
            unsafe fn and(self, rhs: Self) -> Self {
                Self(_mm256_and_si256(self.0, rhs.0))
            }

            #[inline(always)]
            unsafe fn or(self, rhs: Self) -> Self {
                Self(_mm256_or_si256(self.0, rhs.0))
            }

            #[inline(always)]
            unsafe fn xor(self, rhs: Self) -> Self {
                Self(_mm256_xor_si256(self.0, rhs.0))
            }
        }
    };
}

int_vector!(I8x32(i8), lanes = 32, splat = _mm256_set1_epi8 as i8,
    eq = _mm256_cmpeq_epi8, gt = _mm256_cmpgt_epi8,
    min = _mm256_min_epi8, max = _mm256_max_epi8,
    add = _mm256_add_epi8, sub = _mm256_sub_epi8);
int_vector!(U8x32(u8), lanes = 32, splat = _mm256_set1_epi8 as i8,
    eq = _mm256_cmpeq_epi8, gt = gt_u8,
    min = _mm256_min_epu8, max = _mm256_max_epu8,
    add = _mm256_add_epi8, sub = _mm256_sub_epi8);
int_vector!(I16x16(i16), lanes = 16, splat = _mm256_set1_epi16 as i16,
    eq = _mm256_cmpeq_epi16, gt = _mm256_cmpgt_epi16,
    min = _mm256_min_epi16, max = _mm256_max_epi16,
    add = _mm256_add_epi16, sub = _mm256_sub_epi16);
int_vector!(U16x16(u16), lanes = 16, splat = _mm256_set1_epi16 as i16,
    eq = _mm256_cmpeq_epi16, gt = gt_u16,
    min = _mm256_min_epu16, max = _mm256_max_epu16,
    add = _mm256_add_epi16, sub = _mm256_sub_epi16);
int_vector!(I32x8(i32), lanes = 8, splat = _mm256_set1_epi32 as i32,
    eq = _mm256_cmpeq_epi32, gt = _mm256_cmpgt_epi32,
    min = _mm256_min_epi32, max = _mm256_max_epi32,
    add = _mm256_add_epi32, sub = _mm256_sub_epi32);
int_vector!(U32x8(u32), lanes = 8, splat = _mm256_set1_epi32 as i32,
    eq = _mm256_cmpeq_epi32, gt = gt_u32,
    min = _mm256_min_epu32, max = _mm256_max_epu32,
    add = _mm256_add_epi32, sub = _mm256_sub_epi32);
int_vector!(I64x4(i64), lanes = 4, splat = _mm256_set1_epi64x as i64,
    eq = _mm256_cmpeq_epi64, gt = _mm256_cmpgt_epi64,
    min = min_i64, max = max_i64,
    add = _mm256_add_epi64, sub = _mm256_sub_epi64);
int_vector!(U64x4(u64), lanes = 4, splat = _mm256_set1_epi64x as i64,
    eq = _mm256_cmpeq_epi64, gt = gt_u64,
    min = min_u64, max = max_u64,
    add = _mm256_add_epi64, sub = _mm256_sub_epi64);

// Low-half multiplies are sign-agnostic. AVX2 has none for 8- or 64-bit lanes.

impl SimdMul for I16x16 {
    #[inline(always)]
    unsafe fn mul(self, rhs: Self) -> Self {
        Self(_mm256_mullo_epi16(self.0, rhs.0))
    }
}

impl SimdMul for U16x16 {
    #[inline(always)]
    unsafe fn mul(self, rhs: Self) -> Self {
        Self(_mm256_mullo_epi16(self.0, rhs.0))
    }
}

impl SimdMul for I32x8 {
    #[inline(always)]
    unsafe fn mul(self, rhs: Self) -> Self {
        Self(_mm256_mullo_epi32(self.0, rhs.0))
    }
}

impl SimdMul for U32x8 {
    #[inline(always)]
    unsafe fn mul(self, rhs: Self) -> Self {
        Self(_mm256_mullo_epi32(self.0, rhs.0))
    }
}

macro_rules! signed_vector {
    ($name:ident, abs = $abs:path, sub = $sub:path) => {
        impl SimdSigned for $name {
            /// `abs(MIN)` stays `MIN`, as with `wrapping_abs`.
            #[inline(always)]
            unsafe fn abs(self) -> Self {
                Self($abs(self.0))
            }

            #[inline(always)]
            unsafe fn neg(self) -> Self {
                Self($sub(_mm256_setzero_si256(), self.0))
            }
        }
    };
}

#[inline(always)]
unsafe fn abs_i64(a: __m256i) -> __m256i {
    let negated = _mm256_sub_epi64(_mm256_setzero_si256(), a);
    _mm256_blendv_epi8(a, negated, _mm256_cmpgt_epi64(_mm256_setzero_si256(), a))
}

signed_vector!(I8x32, abs = _mm256_abs_epi8, sub = _mm256_sub_epi8);
signed_vector!(I16x16, abs = _mm256_abs_epi16, sub = _mm256_sub_epi16);
signed_vector!(I32x8, abs = _mm256_abs_epi32, sub = _mm256_sub_epi32);
signed_vector!(I64x4, abs = abs_i64, sub = _mm256_sub_epi64);
