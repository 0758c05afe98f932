//! SIMD vector abstractions and the per-instruction-set kernels built on them.
//!
//! Each backend wraps its native registers in small `Copy` structs implementing
//! [`SimdVec`] and the capability traits below. The generic drivers in
//! [`kernels`] are written once against these traits and instantiated per
//! (element type, backend) pair by the table macros in [`tables`].
//!
//! # Comparison masks
//!
//! Comparisons return a `u64` bitmask in which every lane owns
//! [`SimdVec::MASK_STRIDE`] consecutive bits, all set when the lane satisfies the
//! comparison. A mask equal to [`SimdVec::FULL_MASK`] means "every lane matched"
//! and zero means "no lane matched"; the index of the first matching lane is
//! `mask.trailing_zeros() / MASK_STRIDE`.

use crate::element::Element;

pub(crate) mod kernels;

#[doc(hidden)]
pub mod tables;

#[cfg(target_arch = "x86_64")]
pub(crate) mod avx2;

#[cfg(target_arch = "aarch64")]
pub(crate) mod neon;

/// Upper bound on `SimdVec::LANES` across every backend (AVX2 `u8`).
pub(crate) const MAX_LANES: usize = 32;

/// A packed vector of `LANES` elements.
///
/// All methods are `unsafe`: they execute instructions that are only valid once
/// the backend's instruction set has been detected, and the pointer methods
/// read or write `LANES` consecutive elements.
pub(crate) trait SimdVec: Copy {
    type Elem: Element;

    const LANES: usize;
    /// Bits owned by each lane in a comparison mask.
    const MASK_STRIDE: u32;
    /// Mask value with every lane set.
    const FULL_MASK: u64;

    /// Unaligned load of `LANES` elements.
    unsafe fn load(ptr: *const Self::Elem) -> Self;
    /// Unaligned store of `LANES` elements.
    unsafe fn store(self, ptr: *mut Self::Elem);
    unsafe fn splat(value: Self::Elem) -> Self;

    unsafe fn eq_mask(self, rhs: Self) -> u64;
    unsafe fn gt_mask(self, rhs: Self) -> u64;
    unsafe fn ge_mask(self, rhs: Self) -> u64;
    unsafe fn lt_mask(self, rhs: Self) -> u64;
    unsafe fn le_mask(self, rhs: Self) -> u64;

    /// `!=` is the complement of `==` for integers and IEEE floats alike.
    #[inline(always)]
    unsafe fn ne_mask(self, rhs: Self) -> u64 {
        self.eq_mask(rhs) ^ Self::FULL_MASK
    }

    unsafe fn min(self, rhs: Self) -> Self;
    unsafe fn max(self, rhs: Self) -> Self;

    /// Lanes holding NaN. Integers never do.
    #[inline(always)]
    unsafe fn nan_mask(self) -> u64 {
        0
    }
}

/// Wrapping lane arithmetic; IEEE arithmetic for float vectors.
pub(crate) trait SimdArith: SimdVec {
    unsafe fn add(self, rhs: Self) -> Self;
    unsafe fn sub(self, rhs: Self) -> Self;
}

/// Lane multiply, only for lane widths with a native multiply instruction.
pub(crate) trait SimdMul: SimdVec {
    unsafe fn mul(self, rhs: Self) -> Self;
}

pub(crate) trait SimdSigned: SimdVec {
    /// Wrapping absolute value: `abs(MIN) == MIN` for integers.
    unsafe fn abs(self) -> Self;
    /// Wrapping negation: `neg(MIN) == MIN` for integers.
    unsafe fn neg(self) -> Self;
}

pub(crate) trait SimdBits: SimdVec {
    unsafe fn not(self) -> Self;
    unsafe fn and(self, rhs: Self) -> Self;
    unsafe fn or(self, rhs: Self) -> Self;
    unsafe fn xor(self, rhs: Self) -> Self;
}

pub(crate) trait SimdFloat: SimdArith + SimdMul + SimdSigned {
    unsafe fn div(self, rhs: Self) -> Self;
    unsafe fn sqrt(self) -> Self;
    unsafe fn floor(self) -> Self;
    unsafe fn ceil(self) -> Self;
    unsafe fn trunc(self) -> Self;
    /// Lanes holding a finite value.
    unsafe fn finite_mask(self) -> u64;
}

/// Right-hand side of a lane-wise operation: a broadcast scalar or a second array.
pub(crate) trait Rhs<V: SimdVec> {
    /// Lanes `[i, i + LANES)`.
    unsafe fn lanes(&self, i: usize) -> V;
    /// Element `i`, for the scalar tail.
    fn scalar(&self, i: usize) -> V::Elem;
}

/// A scalar parameter broadcast to every lane.
pub(crate) struct Splat<V: SimdVec> {
    vector: V,
    value: V::Elem,
}

impl<V: SimdVec> Splat<V> {
    #[inline(always)]
    pub(crate) unsafe fn new(value: V::Elem) -> Self {
        Self {
            vector: V::splat(value),
            value,
        }
    }
}

impl<V: SimdVec> Rhs<V> for Splat<V> {
    #[inline(always)]
    unsafe fn lanes(&self, _i: usize) -> V {
        self.vector
    }

    #[inline(always)]
    fn scalar(&self, _i: usize) -> V::Elem {
        self.value
    }
}

/// A second array, read in lockstep with the first. Must be at least as long.
pub(crate) struct Pairwise<'a, T>(pub(crate) &'a [T]);

impl<'a, V: SimdVec> Rhs<V> for Pairwise<'a, V::Elem> {
    #[inline(always)]
    unsafe fn lanes(&self, i: usize) -> V {
        debug_assert!(i + V::LANES <= self.0.len());
        V::load(self.0.as_ptr().add(i))
    }

    #[inline(always)]
    fn scalar(&self, i: usize) -> V::Elem {
        self.0[i]
    }
}
