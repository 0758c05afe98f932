//! Method syntax on slices with the default [`OpConfig`].
//!
//! # Examples
//!
//! ```rust
//! use simdarr::{ArrayExt, CmpOp};
//!
//! let readings = vec![12.5f32, 13.0, 11.75, 14.25];
//! assert!(readings.all_match(CmpOp::Gt, 10.0).unwrap());
//! assert_eq!(readings.find_index(CmpOp::Ge, 14.0).unwrap(), Some(3));
//! assert_eq!(readings.max_value().unwrap(), 14.25);
//! ```

use crate::config::OpConfig;
use crate::element::Element;
use crate::error::Result;
use crate::ops::compare::CmpOp;
use crate::ops::{predicate, reduce};

pub trait ArrayExt<T: Element> {
    /// Every element satisfies `x OP param`.
    fn all_match(&self, op: CmpOp, param: T) -> Result<bool>;
    /// At least one element satisfies `x OP param`.
    fn any_match(&self, op: CmpOp, param: T) -> Result<bool>;
    fn find_index(&self, op: CmpOp, param: T) -> Result<Option<usize>>;
    fn count_matches(&self, op: CmpOp, param: T) -> Result<usize>;
    fn max_value(&self) -> Result<T>;
    fn min_value(&self) -> Result<T>;
}

impl<T: Element> ArrayExt<T> for [T] {
    fn all_match(&self, op: CmpOp, param: T) -> Result<bool> {
        predicate::all(op, self, param, &OpConfig::default())
    }

    fn any_match(&self, op: CmpOp, param: T) -> Result<bool> {
        predicate::any(op, self, param, &OpConfig::default())
    }

    fn find_index(&self, op: CmpOp, param: T) -> Result<Option<usize>> {
        predicate::find_index(op, self, param, &OpConfig::default())
    }

    fn count_matches(&self, op: CmpOp, param: T) -> Result<usize> {
        predicate::count(op, self, param, &OpConfig::default())
    }

    fn max_value(&self) -> Result<T> {
        reduce::max(self, &OpConfig::default())
    }

    fn min_value(&self) -> Result<T> {
        reduce::min(self, &OpConfig::default())
    }
}
