//! Element-wise comparisons, predicates, filters, math transforms and
//! reductions over numeric slices.
//!
//! Every operation is available for `i8`, `u8`, `i16`, `u16`, `i32`, `u32`,
//! `i64`, `u64`, `f32` and `f64`. The instruction set is detected at runtime
//! (AVX2 on x86_64, NEON on aarch64); inputs long enough for it run on SIMD
//! kernels that process the largest lane-aligned prefix with vector
//! instructions and finish the tail with a scalar loop. Very long inputs are
//! additionally split across the rayon thread pool.
//!
//! ```rust
//! use simdarr::ops::{filter, math};
//! use simdarr::{ArrayExt, CmpOp, OpConfig, Operand};
//!
//! let cfg = OpConfig::default();
//! let mut samples: Vec<i32> = (-500..500).collect();
//!
//! assert!(samples.any_match(CmpOp::Lt, 0).unwrap());
//! math::abs(&mut samples, &cfg).unwrap();
//! math::add(&mut samples, Operand::Scalar(1), &cfg).unwrap();
//! assert_eq!(samples.min_value().unwrap(), 1);
//!
//! let mut big = vec![0; samples.len()];
//! let n = filter::filter(CmpOp::Gt, &samples, 400, &mut big, &cfg).unwrap();
//! assert_eq!(n, 201);
//! ```

pub mod config;
pub mod dispatch;
pub mod element;
pub mod error;
pub mod ops;
mod scalar;
#[doc(hidden)]
pub mod simd;
pub mod slice;

pub use config::OpConfig;
pub use dispatch::{isa_level, lane_count, select_path, IsaLevel, Path};
pub use element::{ArithOp, Element, ElementKind, FloatElement, IntElement, SignedElement};
pub use error::{ArrayError, Result};
pub use ops::compare::{CmpOp, Operand};
pub use slice::ArrayExt;
