mod common;

use common::{lengths, paths};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use simdarr::ops::math::{
    abs, abs_into, add, add_into, ceil, div, floor, floor_into, mul, neg, neg_into, sqrt, sub,
    trunc,
};
use simdarr::{ArrayError, OpConfig, Operand};

type ArithFn<T> = fn(&mut [T], Operand<'_, T>, &OpConfig) -> simdarr::Result<()>;

/// With checks off, integer arithmetic wraps on every path, for scalar and
/// array right-hand sides.
macro_rules! wrapping_arith_agrees {
    ($name:ident, $ty:ty) => {
        #[test]
        fn $name() {
            let mut rng = StdRng::seed_from_u64(0x5EED_0004);
            for len in lengths() {
                let lhs: Vec<$ty> = (0..len).map(|_| rng.random()).collect();
                let rhs: Vec<$ty> = (0..len)
                    .map(|_| match rng.random::<$ty>() {
                        0 => 1,
                        x => x,
                    })
                    .collect();
                let param: $ty = rng.random_range(1..=<$ty>::MAX);

                let cases: [(&str, ArithFn<$ty>, fn($ty, $ty) -> $ty); 4] = [
                    ("add", add, <$ty>::wrapping_add),
                    ("sub", sub, <$ty>::wrapping_sub),
                    ("mul", mul, <$ty>::wrapping_mul),
                    ("div", div, <$ty>::wrapping_div),
                ];

                for (op, run, reference) in cases {
                    let by_array: Vec<$ty> =
                        lhs.iter().zip(&rhs).map(|(&a, &b)| reference(a, b)).collect();
                    let by_scalar: Vec<$ty> = lhs.iter().map(|&a| reference(a, param)).collect();

                    for (path, cfg) in paths() {
                        let cfg = cfg.with_overflow_checks(false);
                        let mut data = lhs.clone();
                        run(&mut data, Operand::Array(&rhs), &cfg).unwrap();
                        assert_eq!(data, by_array, "{path} {op} array, len {len}");

                        let mut data = lhs.clone();
                        run(&mut data, Operand::Scalar(param), &cfg).unwrap();
                        assert_eq!(data, by_scalar, "{path} {op} scalar, len {len}");
                    }
                }
            }
        }
    };
}

wrapping_arith_agrees!(test_i8_wrapping_arith, i8);
wrapping_arith_agrees!(test_u8_wrapping_arith, u8);
wrapping_arith_agrees!(test_i16_wrapping_arith, i16);
wrapping_arith_agrees!(test_u16_wrapping_arith, u16);
wrapping_arith_agrees!(test_i32_wrapping_arith, i32);
wrapping_arith_agrees!(test_u32_wrapping_arith, u32);
wrapping_arith_agrees!(test_i64_wrapping_arith, i64);
wrapping_arith_agrees!(test_u64_wrapping_arith, u64);

macro_rules! signed_transforms_agree {
    ($name:ident, $ty:ty) => {
        #[test]
        fn $name() {
            let mut rng = StdRng::seed_from_u64(0x5EED_0005);
            for len in lengths() {
                let src: Vec<$ty> = (0..len)
                    .map(|_| rng.random_range(<$ty>::MIN + 1..=<$ty>::MAX))
                    .collect();
                let expected_abs: Vec<$ty> = src.iter().map(|x| x.abs()).collect();
                let expected_neg: Vec<$ty> = src.iter().map(|x| -x).collect();

                for (path, cfg) in paths() {
                    let mut dst = vec![0; len];
                    abs_into(&src, &mut dst, &cfg).unwrap();
                    assert_eq!(dst, expected_abs, "{path} abs, len {len}");
                    neg_into(&src, &mut dst, &cfg).unwrap();
                    assert_eq!(dst, expected_neg, "{path} neg, len {len}");

                    // The sentinel lands in the tail, the aligned prefix or a late chunk.
                    let mut data = src.clone();
                    let at = rng.random_range(0..len);
                    data[at] = <$ty>::MIN;
                    let before = data.clone();
                    assert_eq!(
                        abs(&mut data, &cfg),
                        Err(ArrayError::Overflow { op: "abs" }),
                        "{path} len {len} at {at}"
                    );
                    assert_eq!(
                        neg(&mut data, &cfg),
                        Err(ArrayError::Overflow { op: "neg" }),
                        "{path} len {len} at {at}"
                    );
                    assert_eq!(data, before, "{path} input must be untouched");

                    let unchecked = cfg.with_overflow_checks(false);
                    abs(&mut data, &unchecked).unwrap();
                    assert_eq!(data[at], <$ty>::MIN, "{path} abs wraps");
                }
            }
        }
    };
}

signed_transforms_agree!(test_i8_abs_neg, i8);
signed_transforms_agree!(test_i16_abs_neg, i16);
signed_transforms_agree!(test_i32_abs_neg, i32);
signed_transforms_agree!(test_i64_abs_neg, i64);

#[test]
fn test_checked_integer_overflow_is_reported() {
    for (path, cfg) in paths() {
        let mut data = vec![1u8; 64];
        data[50] = 255;
        assert_eq!(
            add(&mut data, Operand::Scalar(1), &cfg),
            Err(ArrayError::Overflow { op: "add" }),
            "{path}"
        );

        let mut data = vec![0i32; 64];
        assert_eq!(
            sub(&mut data, Operand::Scalar(i32::MIN), &cfg),
            Err(ArrayError::Overflow { op: "sub" }),
            "{path}"
        );

        let mut data = vec![1i64 << 40; 40];
        let factors = vec![1i64 << 30; 40];
        assert_eq!(
            mul(&mut data, Operand::Array(&factors), &cfg),
            Err(ArrayError::Overflow { op: "mul" }),
            "{path}"
        );

        let mut data = vec![i16::MIN; 40];
        assert_eq!(
            div(&mut data, Operand::Scalar(-1), &cfg),
            Err(ArrayError::Overflow { op: "div" }),
            "{path}"
        );
    }
}

#[test]
fn test_zero_divisor_is_reported_with_checks_off() {
    let mut divisors = vec![3u32; 100];
    divisors[77] = 0;
    for (path, cfg) in paths() {
        for checks in [true, false] {
            let cfg = cfg.with_overflow_checks(checks);
            let mut data = vec![9u32; 100];
            assert_eq!(
                div(&mut data, Operand::Array(&divisors), &cfg),
                Err(ArrayError::ZeroDivision { op: "div" }),
                "{path} checks={checks}"
            );
            assert_eq!(
                div(&mut data, Operand::Scalar(0), &cfg),
                Err(ArrayError::ZeroDivision { op: "div" }),
                "{path} checks={checks}"
            );
        }
    }
}

#[test]
fn test_signed_division_wraps_without_checks() {
    let cfg = OpConfig::default().with_overflow_checks(false);
    let mut data = vec![i8::MIN, 100, -7];
    div(&mut data, Operand::Scalar(-1), &cfg).unwrap();
    assert_eq!(data, [i8::MIN, -100, 7]);
}

macro_rules! float_arith_agrees {
    ($name:ident, $ty:ty) => {
        #[test]
        fn $name() {
            let mut rng = StdRng::seed_from_u64(0x5EED_0006);
            for len in lengths() {
                let lhs: Vec<$ty> = (0..len).map(|_| rng.random_range(-100.0..100.0)).collect();
                let rhs: Vec<$ty> = (0..len).map(|_| rng.random_range(0.5..50.0)).collect();
                for (path, cfg) in paths() {
                    let mut data = lhs.clone();
                    add(&mut data, Operand::Array(&rhs), &cfg).unwrap();
                    sub(&mut data, Operand::Scalar(1.5), &cfg).unwrap();
                    mul(&mut data, Operand::Array(&rhs), &cfg).unwrap();
                    div(&mut data, Operand::Scalar(4.0), &cfg).unwrap();
                    for i in 0..len {
                        let expected = (lhs[i] + rhs[i] - 1.5) * rhs[i] / 4.0;
                        assert_eq!(data[i], expected, "{path} len {len} at {i}");
                    }

                    let mut data = lhs.clone();
                    floor(&mut data, &cfg).unwrap();
                    assert!(data.iter().zip(&lhs).all(|(a, b)| *a == b.floor()), "{path} floor");
                    let mut data = lhs.clone();
                    ceil(&mut data, &cfg).unwrap();
                    assert!(data.iter().zip(&lhs).all(|(a, b)| *a == b.ceil()), "{path} ceil");
                    let mut data = lhs.clone();
                    trunc(&mut data, &cfg).unwrap();
                    assert!(data.iter().zip(&lhs).all(|(a, b)| *a == b.trunc()), "{path} trunc");
                    let mut data = rhs.clone();
                    sqrt(&mut data, &cfg).unwrap();
                    assert!(data.iter().zip(&rhs).all(|(a, b)| *a == b.sqrt()), "{path} sqrt");
                }
            }
        }
    };
}

float_arith_agrees!(test_f32_arith, f32);
float_arith_agrees!(test_f64_arith, f64);

#[test]
fn test_non_finite_float_results() {
    for (path, cfg) in paths() {
        let mut data = vec![1.0f64; 70];
        assert_eq!(
            div(&mut data, Operand::Scalar(0.0), &cfg),
            Err(ArrayError::ArithmeticError { op: "div" }),
            "{path}"
        );

        let mut data = vec![f32::MAX; 70];
        assert_eq!(
            mul(&mut data, Operand::Scalar(2.0), &cfg),
            Err(ArrayError::ArithmeticError { op: "mul" }),
            "{path}"
        );

        let mut data = vec![4.0f32; 70];
        data[69] = -4.0;
        assert_eq!(
            sqrt(&mut data, &cfg),
            Err(ArrayError::ArithmeticError { op: "sqrt" }),
            "{path}"
        );

        let unchecked = cfg.with_overflow_checks(false);
        let mut data = vec![1.0f64; 70];
        div(&mut data, Operand::Scalar(0.0), &unchecked).unwrap();
        assert!(data.iter().all(|x| *x == f64::INFINITY), "{path}");
    }
}

#[test]
fn test_float_abs_neg_keep_sign_bits_exact() {
    let src = vec![-0.0f32, 0.0, -1.5, f32::NEG_INFINITY, 3.25, -f32::MIN_POSITIVE];
    let src: Vec<f32> = src.iter().cycle().take(66).copied().collect();
    for (path, cfg) in paths() {
        let mut dst = vec![0.0; src.len()];
        abs_into(&src, &mut dst, &cfg).unwrap();
        assert!(dst.iter().zip(&src).all(|(a, b)| a.to_bits() == b.abs().to_bits()), "{path}");
        neg_into(&src, &mut dst, &cfg).unwrap();
        assert!(dst.iter().zip(&src).all(|(a, b)| a.to_bits() == (-b).to_bits()), "{path}");
    }
}

#[test]
fn test_into_variants_validate_destination() {
    let cfg = OpConfig::default();
    let src = vec![2.5f64; 40];
    let mut short = vec![0.0; 39];
    assert_eq!(
        floor_into(&src, &mut short, &cfg),
        Err(ArrayError::OutputTooShort {
            required: 40,
            available: 39
        })
    );

    let mut dst = vec![-1i16; 50];
    let src: Vec<i16> = (0..40).collect();
    add_into(&src, Operand::Scalar(1), &mut dst, &cfg).unwrap();
    assert_eq!(&dst[..40], &(1..41).collect::<Vec<i16>>()[..]);
    assert!(dst[40..].iter().all(|&x| x == -1));
    assert_eq!(src[0], 0);
}

#[test]
fn test_array_rhs_length_must_match() {
    let mut data = vec![1u64; 10];
    let rhs = vec![1u64; 11];
    assert_eq!(
        add(&mut data, Operand::Array(&rhs), &OpConfig::default()),
        Err(ArrayError::LengthMismatch {
            expected: 10,
            found: 11
        })
    );
}

#[test]
fn test_max_len_limits_transform() {
    let mut data = vec![-1i32; 100];
    abs(&mut data, &OpConfig::default().with_max_len(Some(60))).unwrap();
    assert!(data[..60].iter().all(|&x| x == 1));
    assert!(data[60..].iter().all(|&x| x == -1));
}
