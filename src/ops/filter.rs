//! Compaction of matching elements into a caller-provided buffer.
//!
//! Output order is input order, so these operations always run sequentially,
//! even above the parallel threshold. [`filter`] and [`find_indices`] need an
//! output buffer at least as long as the processed input; [`take_while`] and
//! [`drop_while`] only need room for what they copy.

use crate::config::OpConfig;
use crate::dispatch::{self, Plan};
use crate::element::Element;
use crate::error::{output_too_short, Result};
use crate::ops::compare::CmpOp;
use crate::ops::{predicate, prepare};
use crate::scalar;

/// Copies every element satisfying `x OP param` to the front of `out` and
/// returns how many were copied.
///
/// # Examples
///
/// ```rust
/// use simdarr::ops::filter::filter;
/// use simdarr::{CmpOp, OpConfig};
///
/// let data = [4i32, -1, 9, 0, 12];
/// let mut out = [0i32; 5];
/// let n = filter(CmpOp::Gt, &data, 3, &mut out, &OpConfig::default()).unwrap();
/// assert_eq!(&out[..n], &[4, 9, 12]);
/// ```
pub fn filter<T: Element>(
    op: CmpOp,
    data: &[T],
    param: T,
    out: &mut [T],
    cfg: &OpConfig,
) -> Result<usize> {
    let data = prepare(data, cfg)?;
    if out.len() < data.len() {
        return Err(output_too_short(data.len(), out.len()));
    }

    let kernel = dispatch::kernels::<T>(cfg).map(|table| table.filter);
    let written = match dispatch::plan(data.len(), cfg, kernel).sequential() {
        Plan::Simd(kernel) => unsafe { kernel(op, data, param, out) },
        _ => scalar::filter(op, data, param, out),
    };
    Ok(written)
}

/// Writes the index of every element satisfying `x OP param` to the front of
/// `out` and returns how many were written.
pub fn find_indices<T: Element>(
    op: CmpOp,
    data: &[T],
    param: T,
    out: &mut [usize],
    cfg: &OpConfig,
) -> Result<usize> {
    let data = prepare(data, cfg)?;
    if out.len() < data.len() {
        return Err(output_too_short(data.len(), out.len()));
    }

    let kernel = dispatch::kernels::<T>(cfg).map(|table| table.indices);
    let written = match dispatch::plan(data.len(), cfg, kernel).sequential() {
        Plan::Simd(kernel) => unsafe { kernel(op, data, param, out) },
        _ => scalar::indices(op, data, param, out),
    };
    Ok(written)
}

/// Copies the leading run of elements satisfying `x OP param`.
pub fn take_while<T: Element>(
    op: CmpOp,
    data: &[T],
    param: T,
    out: &mut [T],
    cfg: &OpConfig,
) -> Result<usize> {
    let data = prepare(data, cfg)?;
    let run = leading_run(op, data, param, cfg);
    copy_run(&data[..run], out)
}

/// Skips the leading run of elements satisfying `x OP param` and copies the rest.
pub fn drop_while<T: Element>(
    op: CmpOp,
    data: &[T],
    param: T,
    out: &mut [T],
    cfg: &OpConfig,
) -> Result<usize> {
    let data = prepare(data, cfg)?;
    let run = leading_run(op, data, param, cfg);
    copy_run(&data[run..], out)
}

/// Length of the matching prefix. Searching for the first failing element keeps
/// NaN exact: `!(x < p)` is not `x >= p` for floats.
fn leading_run<T: Element>(op: CmpOp, data: &[T], param: T, cfg: &OpConfig) -> usize {
    let sequential = cfg.with_parallel_threshold(None);
    predicate::find_prepared(op, data, param, false, &sequential).unwrap_or(data.len())
}

fn copy_run<T: Copy>(run: &[T], out: &mut [T]) -> Result<usize> {
    if out.len() < run.len() {
        return Err(output_too_short(run.len(), out.len()));
    }
    out[..run.len()].copy_from_slice(run);
    Ok(run.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ArrayError;

    #[test]
    fn test_filter_requires_room_for_every_element() {
        let data = [1u8, 2, 3];
        let mut out = [0u8; 2];
        assert_eq!(
            filter(CmpOp::Eq, &data, 9, &mut out, &OpConfig::default()),
            Err(ArrayError::OutputTooShort {
                required: 3,
                available: 2
            })
        );
    }

    #[test]
    fn test_filter_full_and_partial_chunks() {
        let cfg = OpConfig::default().with_simd_threshold(0);
        let data: Vec<i32> = (0..77).map(|i| if i < 40 { 5 } else { i % 3 }).collect();
        let mut out = vec![0; data.len()];

        let n = filter(CmpOp::Ge, &data, 2, &mut out, &cfg).unwrap();
        let expected: Vec<i32> = data.iter().copied().filter(|&x| x >= 2).collect();
        assert_eq!(&out[..n], expected.as_slice());
    }

    #[test]
    fn test_take_and_drop_while_with_nan() {
        let cfg = OpConfig::default().with_simd_threshold(0);
        let mut data = vec![1.0f32; 50];
        data[20] = f32::NAN;
        let mut out = vec![0.0f32; 50];

        assert_eq!(take_while(CmpOp::Lt, &data, 2.0, &mut out, &cfg).unwrap(), 20);
        let n = drop_while(CmpOp::Lt, &data, 2.0, &mut out, &cfg).unwrap();
        assert_eq!(n, 30);
        assert!(out[0].is_nan());
    }

    #[test]
    fn test_take_while_only_needs_room_for_run() {
        let data = [1u64, 1, 9, 1];
        let mut out = [0u64; 2];
        assert_eq!(take_while(CmpOp::Eq, &data, 1, &mut out, &OpConfig::default()), Ok(2));
        assert_eq!(out, [1, 1]);
        assert!(drop_while(CmpOp::Eq, &data, 7, &mut out, &OpConfig::default()).is_err());
    }
}
