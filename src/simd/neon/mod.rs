//! ARM NEON kernels for 128-bit vectors.
//!
//! NEON is mandatory on AArch64, so these tables are always usable on that
//! architecture: Apple Silicon, AWS Graviton and modern Android devices alike.
//! Entry points still carry `#[target_feature(enable = "neon")]` so the
//! intrinsics inline into the loops.
//!
//! # Vector types
//!
//! | Element | Vector | Lanes | Native multiply |
//! |---------|--------|-------|-----------------|
//! | `i8`/`u8` | `I8x16`/`U8x16` | 16 | yes |
//! | `i16`/`u16` | `I16x8`/`U16x8` | 8 | yes |
//! | `i32`/`u32` | `I32x4`/`U32x4` | 4 | yes |
//! | `i64`/`u64` | `I64x2`/`U64x2` | 2 | no |
//! | `f32` | `F32x4` | 4 | yes |
//! | `f64` | `F64x2` | 2 | yes |

mod floats;
mod ints;

use floats::{F32x4, F64x2};
use ints::{I16x8, I32x4, I64x2, I8x16, U16x8, U32x4, U64x2, U8x16};

use crate::simd::tables::{
    define_float_table, define_int_table, define_kernel_table, define_signed_table,
};

define_kernel_table!(#[target_feature(enable = "neon")] I8_KERNELS: I8x16 => i8, mul = native, float = no);
define_kernel_table!(#[target_feature(enable = "neon")] U8_KERNELS: U8x16 => u8, mul = native, float = no);
define_kernel_table!(#[target_feature(enable = "neon")] I16_KERNELS: I16x8 => i16, mul = native, float = no);
define_kernel_table!(#[target_feature(enable = "neon")] U16_KERNELS: U16x8 => u16, mul = native, float = no);
define_kernel_table!(#[target_feature(enable = "neon")] I32_KERNELS: I32x4 => i32, mul = native, float = no);
define_kernel_table!(#[target_feature(enable = "neon")] U32_KERNELS: U32x4 => u32, mul = native, float = no);
define_kernel_table!(#[target_feature(enable = "neon")] I64_KERNELS: I64x2 => i64, mul = none, float = no);
define_kernel_table!(#[target_feature(enable = "neon")] U64_KERNELS: U64x2 => u64, mul = none, float = no);
define_kernel_table!(#[target_feature(enable = "neon")] F32_KERNELS: F32x4 => f32, mul = native, float = yes);
define_kernel_table!(#[target_feature(enable = "neon")] F64_KERNELS: F64x2 => f64, mul = native, float = yes);

define_signed_table!(#[target_feature(enable = "neon")] I8_SIGNED: I8x16 => i8);
define_signed_table!(#[target_feature(enable = "neon")] I16_SIGNED: I16x8 => i16);
define_signed_table!(#[target_feature(enable = "neon")] I32_SIGNED: I32x4 => i32);
define_signed_table!(#[target_feature(enable = "neon")] I64_SIGNED: I64x2 => i64);
define_signed_table!(#[target_feature(enable = "neon")] F32_SIGNED: F32x4 => f32);
define_signed_table!(#[target_feature(enable = "neon")] F64_SIGNED: F64x2 => f64);

define_int_table!(#[target_feature(enable = "neon")] I8_INT: I8x16 => i8);
define_int_table!(#[target_feature(enable = "neon")] U8_INT: U8x16 => u8);
define_int_table!(#[target_feature(enable = "neon")] I16_INT: I16x8 => i16);
define_int_table!(#[target_feature(enable = "neon")] U16_INT: U16x8 => u16);
define_int_table!(#[target_feature(enable = "neon")] I32_INT: I32x4 => i32);
define_int_table!(#[target_feature(enable = "neon")] U32_INT: U32x4 => u32);
define_int_table!(#[target_feature(enable = "neon")] I64_INT: I64x2 => i64);
define_int_table!(#[target_feature(enable = "neon")] U64_INT: U64x2 => u64);

define_float_table!(#[target_feature(enable = "neon")] F32_FLOAT: F32x4 => f32);
define_float_table!(#[target_feature(enable = "neon")] F64_FLOAT: F64x2 => f64);
