mod common;

use common::{lengths, paths};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use simdarr::ops::compare::{self, compare};
use simdarr::{ArrayError, CmpOp, OpConfig, Operand};

macro_rules! pairwise_agrees {
    ($name:ident, $ty:ty, |$rng:ident| $gen:expr) => {
        #[test]
        fn $name() {
            let mut $rng = StdRng::seed_from_u64(0x5EED_0002);
            for len in lengths() {
                let lhs: Vec<$ty> = (0..len).map(|_| $gen).collect();
                // Mostly equal arrays, so `Eq`/`Le`/`Ge` are true often enough.
                let mut rhs = lhs.clone();
                if $rng.random_range(0..2) == 0 {
                    let at = $rng.random_range(0..len);
                    rhs[at] = $gen;
                }
                for op in CmpOp::ALL {
                    let expected = lhs.iter().zip(&rhs).all(|(a, b)| op.apply(*a, *b));
                    for (path, cfg) in paths() {
                        assert_eq!(
                            compare(op, Operand::Array(&lhs[..]), Operand::Array(&rhs[..]), &cfg),
                            Ok(expected),
                            "{path} {op} len {len}"
                        );
                    }
                }
            }
        }
    };
}

pairwise_agrees!(test_i8_pairwise, i8, |rng| rng.random_range(-3..3));
pairwise_agrees!(test_u8_pairwise, u8, |rng| rng.random_range(0..200));
pairwise_agrees!(test_i16_pairwise, i16, |rng| rng.random_range(-3..3));
pairwise_agrees!(test_u16_pairwise, u16, |rng| rng.random_range(0..u16::MAX));
pairwise_agrees!(test_i32_pairwise, i32, |rng| rng.random_range(-3..3));
pairwise_agrees!(test_u32_pairwise, u32, |rng| rng.random_range(0..u32::MAX));
pairwise_agrees!(test_i64_pairwise, i64, |rng| rng.random_range(-3..3));
pairwise_agrees!(test_u64_pairwise, u64, |rng| rng.random_range(0..u64::MAX));
pairwise_agrees!(test_f32_pairwise, f32, |rng| rng.random_range(-1.0..1.0));
pairwise_agrees!(test_f64_pairwise, f64, |rng| rng.random_range(-1.0..1.0));

#[test]
fn test_scalar_on_either_side() {
    let data: Vec<i32> = (10..60).collect();
    for (path, cfg) in paths() {
        // 5 < x for every x
        assert_eq!(
            compare(CmpOp::Lt, Operand::Scalar(5), Operand::Array(&data[..]), &cfg),
            Ok(true),
            "{path}"
        );
        assert_eq!(
            compare(CmpOp::Gt, Operand::Scalar(5), Operand::Array(&data[..]), &cfg),
            Ok(false),
            "{path}"
        );
        assert_eq!(
            compare(CmpOp::Ge, Operand::Array(&data[..]), Operand::Scalar(10), &cfg),
            Ok(true),
            "{path}"
        );
        assert_eq!(
            compare(CmpOp::Ge, Operand::Scalar(59), Operand::Array(&data[..]), &cfg),
            Ok(true),
            "{path}"
        );
    }
}

#[test]
fn test_named_wrappers() {
    let cfg = OpConfig::default();
    let a = vec![1.5f64; 40];
    let b = vec![2.5f64; 40];
    assert_eq!(compare::lt(Operand::Array(&a[..]), Operand::Array(&b[..]), &cfg), Ok(true));
    assert_eq!(compare::le(Operand::Array(&a[..]), Operand::Array(&a[..]), &cfg), Ok(true));
    assert_eq!(compare::eq(Operand::Array(&a[..]), Operand::Scalar(1.5), &cfg), Ok(true));
    assert_eq!(compare::ne(Operand::Array(&a[..]), Operand::Array(&b[..]), &cfg), Ok(true));
    assert_eq!(compare::gt(Operand::Scalar(3.0), Operand::Array(&b[..]), &cfg), Ok(true));
    assert_eq!(compare::ge(Operand::Array(&a[..]), Operand::Array(&b[..]), &cfg), Ok(false));
}

#[test]
fn test_nan_pairs_are_unequal() {
    let a = vec![f32::NAN; 33];
    for (path, cfg) in paths() {
        let same = Operand::Array(&a[..]);
        assert_eq!(compare::eq(same, same, &cfg), Ok(false), "{path}");
        assert_eq!(compare::ne(same, same, &cfg), Ok(true), "{path}");
    }
}

#[test]
fn test_operand_errors() {
    let cfg = OpConfig::default();
    let short = [1u8, 2, 3];
    let long = [1u8, 2, 3, 4];

    assert_eq!(
        compare(CmpOp::Eq, Operand::Array(&short[..]), Operand::Array(&long[..]), &cfg),
        Err(ArrayError::LengthMismatch {
            expected: 3,
            found: 4
        })
    );
    assert!(matches!(
        compare(CmpOp::Eq, Operand::Scalar(1u8), Operand::Scalar(1), &cfg),
        Err(ArrayError::InvalidOperands { .. })
    ));
    assert_eq!(
        compare::<u8>(CmpOp::Eq, Operand::Array(&[]), Operand::Scalar(1), &cfg),
        Err(ArrayError::EmptyArray)
    );
}

#[test]
fn test_pairwise_lengths_are_compared_after_clipping() {
    let a = vec![7i16; 120];
    let b = vec![7i16; 80];
    let cfg = OpConfig::default().with_max_len(Some(64));
    assert_eq!(compare::eq(Operand::Array(&a[..]), Operand::Array(&b[..]), &cfg), Ok(true));
}

#[test]
fn test_cmp_op_parses_symbols_and_names() {
    for op in CmpOp::ALL {
        assert_eq!(op.symbol().parse::<CmpOp>(), Ok(op));
        assert_eq!(op.to_string().parse::<CmpOp>(), Ok(op));
    }
    assert!("<>".parse::<CmpOp>().is_err());
}

#[test]
fn test_operand_from_vec_and_slice() {
    let values = vec![4u32, 5, 6];
    let from_vec: Operand<'_, u32> = (&values).into();
    let from_slice: Operand<'_, u32> = values.as_slice().into();
    assert_eq!(from_vec, from_slice);
    assert_eq!(
        compare(CmpOp::Gt, from_vec, Operand::Scalar(3), &OpConfig::default()),
        Ok(true)
    );
}
