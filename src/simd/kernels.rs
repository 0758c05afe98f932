//! Generic SIMD drivers shared by every backend.
//!
//! Every driver follows the same shape:
//!
//! 1. `aligned_len = len - (len % LANES)`
//! 2. `[0, aligned_len)` is processed `LANES` elements at a time with vector
//!    instructions; predicates test the comparison mask of each chunk and return
//!    as soon as the answer is known
//! 3. `[aligned_len, len)` is finished with a scalar loop that applies the exact
//!    same per-element semantics
//!
//! The drivers are `#[inline(always)]` so that they are compiled inside the
//! `#[target_feature]` entry points generated by [`super::tables`].

use num::Float;

use crate::element::{is_nan, ArithOp, Element, FloatElement, IntElement, SignedElement};
use crate::ops::compare::CmpOp;

use super::{
    Pairwise, Rhs, SimdArith, SimdBits, SimdFloat, SimdMul, SimdSigned, SimdVec, Splat, MAX_LANES,
};

// ================================================================================================
// LANE PREDICATES
// ================================================================================================

/// A comparison operator resolved at compile time.
pub(crate) trait LanePredicate {
    unsafe fn mask<V: SimdVec>(a: V, b: V) -> u64;
    fn test<T: Element>(a: T, b: T) -> bool;
}

macro_rules! lane_predicate {
    ($name:ident, $mask:ident, $op:tt) => {
        pub(crate) struct $name;

        impl LanePredicate for $name {
            #[inline(always)]
            unsafe fn mask<V: SimdVec>(a: V, b: V) -> u64 {
                a.$mask(b)
            }

            #[inline(always)]
            fn test<T: Element>(a: T, b: T) -> bool {
                a $op b
            }
        }
    };
}

lane_predicate!(IsEq, eq_mask, ==);
lane_predicate!(IsNe, ne_mask, !=);
lane_predicate!(IsGt, gt_mask, >);
lane_predicate!(IsGe, ge_mask, >=);
lane_predicate!(IsLt, lt_mask, <);
lane_predicate!(IsLe, le_mask, <=);

/// Monomorphizes `$body` for the predicate type matching `$op`.
macro_rules! with_predicate {
    ($op:expr, $p:ident => $body:expr) => {
        match $op {
            CmpOp::Eq => {
                type $p = IsEq;
                $body
            }
            CmpOp::Ne => {
                type $p = IsNe;
                $body
            }
            CmpOp::Gt => {
                type $p = IsGt;
                $body
            }
            CmpOp::Ge => {
                type $p = IsGe;
                $body
            }
            CmpOp::Lt => {
                type $p = IsLt;
                $body
            }
            CmpOp::Le => {
                type $p = IsLe;
                $body
            }
        }
    };
}

/// Calls `f` with the index of every set lane of `mask`, lowest first.
#[inline(always)]
fn for_each_lane<F: FnMut(usize)>(mut mask: u64, stride: u32, mut f: F) {
    let lane_bits = if stride >= 64 { u64::MAX } else { (1u64 << stride) - 1 };
    while mask != 0 {
        let lane = mask.trailing_zeros() / stride;
        f(lane as usize);
        mask &= !(lane_bits << (lane * stride));
    }
}

// ================================================================================================
// PREDICATE DRIVERS
// ================================================================================================

#[inline(always)]
unsafe fn all_match<V, P, R>(data: &[V::Elem], rhs: &R) -> bool
where
    V: SimdVec,
    P: LanePredicate,
    R: Rhs<V>,
{
    let size = data.len();
    let aligned_len = size - (size % V::LANES);
    let ptr = data.as_ptr();

    for i in (0..aligned_len).step_by(V::LANES) {
        if P::mask(V::load(ptr.add(i)), rhs.lanes(i)) != V::FULL_MASK {
            return false;
        }
    }

    (aligned_len..size).all(|i| P::test(data[i], rhs.scalar(i)))
}

#[inline(always)]
unsafe fn any_match<V, P, R>(data: &[V::Elem], rhs: &R) -> bool
where
    V: SimdVec,
    P: LanePredicate,
    R: Rhs<V>,
{
    let size = data.len();
    let aligned_len = size - (size % V::LANES);
    let ptr = data.as_ptr();

    for i in (0..aligned_len).step_by(V::LANES) {
        if P::mask(V::load(ptr.add(i)), rhs.lanes(i)) != 0 {
            return true;
        }
    }

    (aligned_len..size).any(|i| P::test(data[i], rhs.scalar(i)))
}

/// First index whose predicate outcome equals `want`.
#[inline(always)]
unsafe fn find_first<V, P, R>(data: &[V::Elem], rhs: &R, want: bool) -> Option<usize>
where
    V: SimdVec,
    P: LanePredicate,
    R: Rhs<V>,
{
    let size = data.len();
    let aligned_len = size - (size % V::LANES);
    let ptr = data.as_ptr();

    for i in (0..aligned_len).step_by(V::LANES) {
        let mut mask = P::mask(V::load(ptr.add(i)), rhs.lanes(i));
        if !want {
            mask ^= V::FULL_MASK;
        }
        if mask != 0 {
            return Some(i + (mask.trailing_zeros() / V::MASK_STRIDE) as usize);
        }
    }

    (aligned_len..size).find(|&i| P::test(data[i], rhs.scalar(i)) == want)
}

#[inline(always)]
unsafe fn count_matches<V, P, R>(data: &[V::Elem], rhs: &R) -> usize
where
    V: SimdVec,
    P: LanePredicate,
    R: Rhs<V>,
{
    let size = data.len();
    let aligned_len = size - (size % V::LANES);
    let ptr = data.as_ptr();

    let mut count = 0usize;
    for i in (0..aligned_len).step_by(V::LANES) {
        let mask = P::mask(V::load(ptr.add(i)), rhs.lanes(i));
        count += (mask.count_ones() / V::MASK_STRIDE) as usize;
    }

    count + (aligned_len..size).filter(|&i| P::test(data[i], rhs.scalar(i))).count()
}

// ================================================================================================
// FILTER DRIVERS
// ================================================================================================

/// Compacts matching elements to the front of `out`. `out` must be at least as
/// long as `data`.
#[inline(always)]
unsafe fn filter_into<V, P, R>(data: &[V::Elem], rhs: &R, out: &mut [V::Elem]) -> usize
where
    V: SimdVec,
    P: LanePredicate,
    R: Rhs<V>,
{
    debug_assert!(out.len() >= data.len());

    let size = data.len();
    let aligned_len = size - (size % V::LANES);
    let ptr = data.as_ptr();

    let mut written = 0usize;
    for i in (0..aligned_len).step_by(V::LANES) {
        let chunk = V::load(ptr.add(i));
        let mask = P::mask(chunk, rhs.lanes(i));

        if mask == 0 {
            continue;
        }
        if mask == V::FULL_MASK {
            // written <= i, so the whole chunk fits below `size`.
            chunk.store(out.as_mut_ptr().add(written));
            written += V::LANES;
            continue;
        }
        for_each_lane(mask, V::MASK_STRIDE, |lane| {
            out[written] = data[i + lane];
            written += 1;
        });
    }

    for i in aligned_len..size {
        if P::test(data[i], rhs.scalar(i)) {
            out[written] = data[i];
            written += 1;
        }
    }

    written
}

/// Writes the indices of matching elements to the front of `out`. `out` must be
/// at least as long as `data`.
#[inline(always)]
unsafe fn indices_into<V, P, R>(data: &[V::Elem], rhs: &R, out: &mut [usize]) -> usize
where
    V: SimdVec,
    P: LanePredicate,
    R: Rhs<V>,
{
    debug_assert!(out.len() >= data.len());

    let size = data.len();
    let aligned_len = size - (size % V::LANES);
    let ptr = data.as_ptr();

    let mut written = 0usize;
    for i in (0..aligned_len).step_by(V::LANES) {
        let mask = P::mask(V::load(ptr.add(i)), rhs.lanes(i));
        if mask == 0 {
            continue;
        }
        for_each_lane(mask, V::MASK_STRIDE, |lane| {
            out[written] = i + lane;
            written += 1;
        });
    }

    for i in aligned_len..size {
        if P::test(data[i], rhs.scalar(i)) {
            out[written] = i;
            written += 1;
        }
    }

    written
}

// ================================================================================================
// REDUCTION DRIVERS
// ================================================================================================

pub(crate) trait LaneReduce {
    unsafe fn lanes<V: SimdVec>(acc: V, v: V) -> V;
    fn scalar<T: Element>(acc: T, x: T) -> T;
}

pub(crate) struct Max;
pub(crate) struct Min;

impl LaneReduce for Max {
    #[inline(always)]
    unsafe fn lanes<V: SimdVec>(acc: V, v: V) -> V {
        acc.max(v)
    }

    #[inline(always)]
    fn scalar<T: Element>(acc: T, x: T) -> T {
        if x > acc {
            x
        } else {
            acc
        }
    }
}

impl LaneReduce for Min {
    #[inline(always)]
    unsafe fn lanes<V: SimdVec>(acc: V, v: V) -> V {
        acc.min(v)
    }

    #[inline(always)]
    fn scalar<T: Element>(acc: T, x: T) -> T {
        if x < acc {
            x
        } else {
            acc
        }
    }
}

/// Lane-wise accumulation over the aligned prefix, then a horizontal fold and
/// the tail. The first NaN encountered is returned as-is.
#[inline(always)]
unsafe fn reduce<V: SimdVec, R: LaneReduce>(data: &[V::Elem]) -> V::Elem {
    debug_assert!(!data.is_empty());
    debug_assert!(V::LANES <= MAX_LANES);

    let size = data.len();
    let aligned_len = size - (size % V::LANES);

    let mut result = data[0];
    if aligned_len > 0 {
        let ptr = data.as_ptr();
        let mut acc = V::load(ptr);
        for i in (0..aligned_len).step_by(V::LANES) {
            let chunk = V::load(ptr.add(i));
            if chunk.nan_mask() != 0 {
                return first_nan(&data[i..i + V::LANES]);
            }
            acc = R::lanes(acc, chunk);
        }

        let mut lanes = [data[0]; MAX_LANES];
        acc.store(lanes.as_mut_ptr());
        result = lanes[..V::LANES]
            .iter()
            .copied()
            .fold(lanes[0], R::scalar::<V::Elem>);
    }

    for &x in &data[aligned_len..] {
        if is_nan(x) {
            return x;
        }
        result = R::scalar(result, x);
    }

    result
}

#[inline(always)]
fn first_nan<T: Element>(chunk: &[T]) -> T {
    chunk.iter().copied().find(|&x| is_nan(x)).unwrap_or(chunk[0])
}

// ================================================================================================
// TRANSFORM DRIVERS
// ================================================================================================

pub(crate) trait UnaryLanes<V: SimdVec> {
    unsafe fn lanes(v: V) -> V;
    fn scalar(x: V::Elem) -> V::Elem;
}

pub(crate) trait BinaryLanes<V: SimdVec> {
    unsafe fn lanes(a: V, b: V) -> V;
    fn scalar(a: V::Elem, b: V::Elem) -> V::Elem;
}

#[inline(always)]
unsafe fn map_in_place<V: SimdVec, U: UnaryLanes<V>>(data: &mut [V::Elem]) {
    let size = data.len();
    let aligned_len = size - (size % V::LANES);
    let ptr = data.as_mut_ptr();

    for i in (0..aligned_len).step_by(V::LANES) {
        let p = ptr.add(i);
        U::lanes(V::load(p)).store(p);
    }

    for x in &mut data[aligned_len..] {
        *x = U::scalar(*x);
    }
}

#[inline(always)]
unsafe fn zip_in_place<V, B, R>(data: &mut [V::Elem], rhs: &R)
where
    V: SimdVec,
    B: BinaryLanes<V>,
    R: Rhs<V>,
{
    let size = data.len();
    let aligned_len = size - (size % V::LANES);
    let ptr = data.as_mut_ptr();

    for i in (0..aligned_len).step_by(V::LANES) {
        let p = ptr.add(i);
        B::lanes(V::load(p), rhs.lanes(i)).store(p);
    }

    for (k, x) in data[aligned_len..].iter_mut().enumerate() {
        *x = B::scalar(*x, rhs.scalar(aligned_len + k));
    }
}

macro_rules! binary_lanes {
    ($name:ident: $bound:ident, |$a:ident, $b:ident| $lanes:expr, $scalar:expr) => {
        pub(crate) struct $name;

        impl<V: $bound> BinaryLanes<V> for $name {
            #[inline(always)]
            unsafe fn lanes($a: V, $b: V) -> V {
                $lanes
            }

            #[inline(always)]
            fn scalar($a: V::Elem, $b: V::Elem) -> V::Elem {
                $scalar
            }
        }
    };
}

binary_lanes!(Add: SimdArith, |a, b| a.add(b), <V::Elem as Element>::wrapping_arith(ArithOp::Add, a, b));
binary_lanes!(Sub: SimdArith, |a, b| a.sub(b), <V::Elem as Element>::wrapping_arith(ArithOp::Sub, a, b));
binary_lanes!(Mul: SimdMul, |a, b| a.mul(b), <V::Elem as Element>::wrapping_arith(ArithOp::Mul, a, b));

pub(crate) struct And;
pub(crate) struct Or;
pub(crate) struct Xor;
pub(crate) struct Div;

impl<V: SimdBits> BinaryLanes<V> for And
where
    V::Elem: IntElement,
{
    #[inline(always)]
    unsafe fn lanes(a: V, b: V) -> V {
        a.and(b)
    }

    #[inline(always)]
    fn scalar(a: V::Elem, b: V::Elem) -> V::Elem {
        a & b
    }
}

impl<V: SimdBits> BinaryLanes<V> for Or
where
    V::Elem: IntElement,
{
    #[inline(always)]
    unsafe fn lanes(a: V, b: V) -> V {
        a.or(b)
    }

    #[inline(always)]
    fn scalar(a: V::Elem, b: V::Elem) -> V::Elem {
        a | b
    }
}

impl<V: SimdBits> BinaryLanes<V> for Xor
where
    V::Elem: IntElement,
{
    #[inline(always)]
    unsafe fn lanes(a: V, b: V) -> V {
        a.xor(b)
    }

    #[inline(always)]
    fn scalar(a: V::Elem, b: V::Elem) -> V::Elem {
        a ^ b
    }
}

impl<V: SimdFloat> BinaryLanes<V> for Div
where
    V::Elem: FloatElement,
{
    #[inline(always)]
    unsafe fn lanes(a: V, b: V) -> V {
        a.div(b)
    }

    #[inline(always)]
    fn scalar(a: V::Elem, b: V::Elem) -> V::Elem {
        a / b
    }
}

macro_rules! unary_lanes {
    ($name:ident: $bound:ident where $elem_bound:ident, |$x:ident| $lanes:expr, $scalar:expr) => {
        pub(crate) struct $name;

        impl<V: $bound> UnaryLanes<V> for $name
        where
            V::Elem: $elem_bound,
        {
            #[inline(always)]
            unsafe fn lanes($x: V) -> V {
                $lanes
            }

            #[inline(always)]
            fn scalar($x: V::Elem) -> V::Elem {
                $scalar
            }
        }
    };
}

unary_lanes!(Abs: SimdSigned where SignedElement, |x| x.abs(), x.lane_abs());
unary_lanes!(Neg: SimdSigned where SignedElement, |x| x.neg(), x.lane_neg());
unary_lanes!(Not: SimdBits where IntElement, |x| x.not(), !x);
unary_lanes!(Sqrt: SimdFloat where FloatElement, |x| x.sqrt(), x.sqrt());
unary_lanes!(Floor: SimdFloat where FloatElement, |x| x.floor(), x.floor());
unary_lanes!(Ceil: SimdFloat where FloatElement, |x| x.ceil(), x.ceil());
unary_lanes!(Trunc: SimdFloat where FloatElement, |x| x.trunc(), x.trunc());

// ================================================================================================
// ENTRY POINTS
// ================================================================================================
//
// Thin wrappers that resolve the comparison operator and the operand shape. The
// table macros call these from inside `#[target_feature]` functions.

#[inline(always)]
pub(crate) unsafe fn all<V: SimdVec>(op: CmpOp, data: &[V::Elem], param: V::Elem) -> bool {
    let rhs = Splat::<V>::new(param);
    with_predicate!(op, P => all_match::<V, P, _>(data, &rhs))
}

#[inline(always)]
pub(crate) unsafe fn any<V: SimdVec>(op: CmpOp, data: &[V::Elem], param: V::Elem) -> bool {
    let rhs = Splat::<V>::new(param);
    with_predicate!(op, P => any_match::<V, P, _>(data, &rhs))
}

#[inline(always)]
pub(crate) unsafe fn all_pairwise<V: SimdVec>(
    op: CmpOp,
    data: &[V::Elem],
    other: &[V::Elem],
) -> bool {
    debug_assert_eq!(data.len(), other.len());
    let rhs = Pairwise(other);
    with_predicate!(op, P => all_match::<V, P, _>(data, &rhs))
}

#[inline(always)]
pub(crate) unsafe fn find<V: SimdVec>(
    op: CmpOp,
    data: &[V::Elem],
    param: V::Elem,
    want: bool,
) -> Option<usize> {
    let rhs = Splat::<V>::new(param);
    with_predicate!(op, P => find_first::<V, P, _>(data, &rhs, want))
}

#[inline(always)]
pub(crate) unsafe fn count<V: SimdVec>(op: CmpOp, data: &[V::Elem], param: V::Elem) -> usize {
    let rhs = Splat::<V>::new(param);
    with_predicate!(op, P => count_matches::<V, P, _>(data, &rhs))
}

#[inline(always)]
pub(crate) unsafe fn filter<V: SimdVec>(
    op: CmpOp,
    data: &[V::Elem],
    param: V::Elem,
    out: &mut [V::Elem],
) -> usize {
    let rhs = Splat::<V>::new(param);
    with_predicate!(op, P => filter_into::<V, P, _>(data, &rhs, out))
}

#[inline(always)]
pub(crate) unsafe fn indices<V: SimdVec>(
    op: CmpOp,
    data: &[V::Elem],
    param: V::Elem,
    out: &mut [usize],
) -> usize {
    let rhs = Splat::<V>::new(param);
    with_predicate!(op, P => indices_into::<V, P, _>(data, &rhs, out))
}

#[inline(always)]
pub(crate) unsafe fn max<V: SimdVec>(data: &[V::Elem]) -> V::Elem {
    reduce::<V, Max>(data)
}

#[inline(always)]
pub(crate) unsafe fn min<V: SimdVec>(data: &[V::Elem]) -> V::Elem {
    reduce::<V, Min>(data)
}

#[inline(always)]
pub(crate) unsafe fn map<V: SimdVec, U: UnaryLanes<V>>(data: &mut [V::Elem]) {
    map_in_place::<V, U>(data)
}

#[inline(always)]
pub(crate) unsafe fn zip_scalar<V: SimdVec, B: BinaryLanes<V>>(
    data: &mut [V::Elem],
    param: V::Elem,
) {
    let rhs = Splat::<V>::new(param);
    zip_in_place::<V, B, _>(data, &rhs)
}

#[inline(always)]
pub(crate) unsafe fn zip_pairwise<V: SimdVec, B: BinaryLanes<V>>(
    data: &mut [V::Elem],
    other: &[V::Elem],
) {
    debug_assert_eq!(data.len(), other.len());
    let rhs = Pairwise(other);
    zip_in_place::<V, B, _>(data, &rhs)
}

#[inline(always)]
pub(crate) unsafe fn all_finite<V: SimdFloat>(data: &[V::Elem]) -> bool
where
    V::Elem: FloatElement,
{
    let size = data.len();
    let aligned_len = size - (size % V::LANES);
    let ptr = data.as_ptr();

    for i in (0..aligned_len).step_by(V::LANES) {
        if V::load(ptr.add(i)).finite_mask() != V::FULL_MASK {
            return false;
        }
    }

    data[aligned_len..].iter().all(|x| x.is_finite())
}
