//! Whole-array predicates: `x OP param` tested against every element.
//!
//! The vector path short-circuits: [`all`] stops at the first chunk whose mask is
//! not full, [`any`] and [`find_index`] at the first chunk with a set lane.
//!
//! # Examples
//!
//! ```rust
//! use simdarr::ops::predicate::{all, count, find_index};
//! use simdarr::{CmpOp, OpConfig};
//!
//! let cfg = OpConfig::default();
//! let data: Vec<u8> = (0..100).collect();
//!
//! assert!(all(CmpOp::Lt, &data, 100, &cfg).unwrap());
//! assert_eq!(find_index(CmpOp::Ge, &data, 42, &cfg).unwrap(), Some(42));
//! assert_eq!(count(CmpOp::Ge, &data, 90, &cfg).unwrap(), 10);
//! ```

use rayon::prelude::*;

use crate::config::OpConfig;
use crate::dispatch::{self, Plan};
use crate::element::Element;
use crate::error::Result;
use crate::ops::compare::CmpOp;
use crate::ops::prepare;
use crate::scalar;

/// `true` when every element satisfies `x OP param`.
pub fn all<T: Element>(op: CmpOp, data: &[T], param: T, cfg: &OpConfig) -> Result<bool> {
    let data = prepare(data, cfg)?;
    Ok(all_prepared(op, data, param, cfg))
}

/// `true` when at least one element satisfies `x OP param`.
pub fn any<T: Element>(op: CmpOp, data: &[T], param: T, cfg: &OpConfig) -> Result<bool> {
    let data = prepare(data, cfg)?;
    Ok(any_prepared(op, data, param, cfg))
}

/// Index of the first element satisfying `x OP param`.
pub fn find_index<T: Element>(
    op: CmpOp,
    data: &[T],
    param: T,
    cfg: &OpConfig,
) -> Result<Option<usize>> {
    let data = prepare(data, cfg)?;
    Ok(find_prepared(op, data, param, true, cfg))
}

/// Number of elements satisfying `x OP param`.
pub fn count<T: Element>(op: CmpOp, data: &[T], param: T, cfg: &OpConfig) -> Result<usize> {
    let data = prepare(data, cfg)?;
    let kernel = dispatch::kernels::<T>(cfg).map(|table| table.count);
    let counted = match dispatch::plan(data.len(), cfg, kernel) {
        Plan::Scalar => scalar::count(op, data, param),
        Plan::Simd(kernel) => unsafe { kernel(op, data, param) },
        Plan::Parallel(kernel, chunk) => data
            .par_chunks(chunk)
            .map(|part| unsafe { kernel(op, part, param) })
            .sum(),
    };
    Ok(counted)
}

pub(crate) fn all_prepared<T: Element>(op: CmpOp, data: &[T], param: T, cfg: &OpConfig) -> bool {
    let kernel = dispatch::kernels::<T>(cfg).map(|table| table.all);
    match dispatch::plan(data.len(), cfg, kernel) {
        Plan::Scalar => scalar::all(op, data, param),
        Plan::Simd(kernel) => unsafe { kernel(op, data, param) },
        Plan::Parallel(kernel, chunk) => data
            .par_chunks(chunk)
            .all(|part| unsafe { kernel(op, part, param) }),
    }
}

pub(crate) fn any_prepared<T: Element>(op: CmpOp, data: &[T], param: T, cfg: &OpConfig) -> bool {
    let kernel = dispatch::kernels::<T>(cfg).map(|table| table.any);
    match dispatch::plan(data.len(), cfg, kernel) {
        Plan::Scalar => scalar::any(op, data, param),
        Plan::Simd(kernel) => unsafe { kernel(op, data, param) },
        Plan::Parallel(kernel, chunk) => data
            .par_chunks(chunk)
            .any(|part| unsafe { kernel(op, part, param) }),
    }
}

/// First index whose predicate outcome equals `want`.
pub(crate) fn find_prepared<T: Element>(
    op: CmpOp,
    data: &[T],
    param: T,
    want: bool,
    cfg: &OpConfig,
) -> Option<usize> {
    let kernel = dispatch::kernels::<T>(cfg).map(|table| table.find);
    match dispatch::plan(data.len(), cfg, kernel) {
        Plan::Scalar => scalar::find(op, data, param, want),
        Plan::Simd(kernel) => unsafe { kernel(op, data, param, want) },
        Plan::Parallel(kernel, chunk) => data
            .par_chunks(chunk)
            .enumerate()
            .find_map_first(|(n, part)| {
                let found = unsafe { kernel(op, part, param, want) };
                found.map(|i| n * chunk + i)
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ArrayError;

    fn configs() -> [OpConfig; 3] {
        [
            OpConfig::scalar_only(),
            OpConfig::default().with_simd_threshold(0),
            OpConfig::default()
                .with_simd_threshold(0)
                .with_parallel_threshold(Some(0))
                .with_parallel_chunk_size(37),
        ]
    }

    #[test]
    fn test_all_and_any_every_path() {
        let data: Vec<i16> = (0..300).map(|i| i - 150).collect();
        for cfg in configs() {
            assert!(all(CmpOp::Ge, &data, -150, &cfg).unwrap());
            assert!(!all(CmpOp::Gt, &data, -150, &cfg).unwrap());
            assert!(any(CmpOp::Eq, &data, 149, &cfg).unwrap());
            assert!(!any(CmpOp::Gt, &data, 149, &cfg).unwrap());
        }
    }

    #[test]
    fn test_find_index_in_tail_and_prefix() {
        let mut data = vec![0u32; 103];
        data[101] = 7;
        for cfg in configs() {
            assert_eq!(find_index(CmpOp::Eq, &data, 7, &cfg).unwrap(), Some(101));
            assert_eq!(find_index(CmpOp::Eq, &data, 0, &cfg).unwrap(), Some(0));
            assert_eq!(find_index(CmpOp::Gt, &data, 7, &cfg).unwrap(), None);
        }
    }

    #[test]
    fn test_count_with_max_len() {
        let data = vec![1.5f64; 500];
        for cfg in configs() {
            assert_eq!(count(CmpOp::Eq, &data, 1.5, &cfg).unwrap(), 500);
            let clipped = cfg.with_max_len(Some(123));
            assert_eq!(count(CmpOp::Eq, &data, 1.5, &clipped).unwrap(), 123);
        }
    }

    #[test]
    fn test_empty_input_rejected() {
        let cfg = OpConfig::default();
        assert_eq!(all::<u8>(CmpOp::Eq, &[], 0, &cfg), Err(ArrayError::EmptyArray));
        assert_eq!(count::<f32>(CmpOp::Eq, &[], 0.0, &cfg), Err(ArrayError::EmptyArray));
    }
}
