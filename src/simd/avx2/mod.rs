//! AVX2 kernels for 256-bit vectors.
//!
//! AVX2 is available on Intel processors since Haswell (2013) and AMD processors
//! since Excavator (2015). Every entry point is compiled with
//! `#[target_feature(enable = "avx,avx2")]`, so the crate itself builds for any
//! x86_64 target; the dispatcher only hands these tables out after
//! `is_x86_feature_detected!("avx2")` succeeded.
//!
//! # Vector types
//!
//! | Element | Vector | Lanes | Native multiply |
//! |---------|--------|-------|-----------------|
//! | `i8`/`u8` | `I8x32`/`U8x32` | 32 | no |
//! | `i16`/`u16` | `I16x16`/`U16x16` | 16 | yes |
//! | `i32`/`u32` | `I32x8`/`U32x8` | 8 | yes |
//! | `i64`/`u64` | `I64x4`/`U64x4` | 4 | no |
//! | `f32` | `F32x8` | 8 | yes |
//! | `f64` | `F64x4` | 4 | yes |

mod floats;
mod ints;

use floats::{F32x8, F64x4};
use ints::{I16x16, I32x8, I64x4, I8x32, U16x16, U32x8, U64x4, U8x32};

use crate::simd::tables::{
    define_float_table, define_int_table, define_kernel_table, define_signed_table,
};

define_kernel_table!(#[target_feature(enable = "avx,avx2")] I8_KERNELS: I8x32 => i8, mul = none, float = no);
define_kernel_table!(#[target_feature(enable = "avx,avx2")] U8_KERNELS: U8x32 => u8, mul = none, float = no);
define_kernel_table!(#[target_feature(enable = "avx,avx2")] I16_KERNELS: I16x16 => i16, mul = native, float = no);
define_kernel_table!(#[target_feature(enable = "avx,avx2")] U16_KERNELS: U16x16 => u16, mul = native, float = no);
define_kernel_table!(#[target_feature(enable = "avx,avx2")] I32_KERNELS: I32x8 => i32, mul = native, float = no);
define_kernel_table!(#[target_feature(enable = "avx,avx2")] U32_KERNELS: U32x8 => u32, mul = native, float = no);
define_kernel_table!(#[target_feature(enable = "avx,avx2")] I64_KERNELS: I64x4 => i64, mul = none, float = no);
define_kernel_table!(#[target_feature(enable = "avx,avx2")] U64_KERNELS: U64x4 => u64, mul = none, float = no);
define_kernel_table!(#[target_feature(enable = "avx,avx2")] F32_KERNELS: F32x8 => f32, mul = native, float = yes);
define_kernel_table!(#[target_feature(enable = "avx,avx2")] F64_KERNELS: F64x4 => f64, mul = native, float = yes);

define_signed_table!(#[target_feature(enable = "avx,avx2")] I8_SIGNED: I8x32 => i8);
define_signed_table!(#[target_feature(enable = "avx,avx2")] I16_SIGNED: I16x16 => i16);
define_signed_table!(#[target_feature(enable = "avx,avx2")] I32_SIGNED: I32x8 => i32);
define_signed_table!(#[target_feature(enable = "avx,avx2")] I64_SIGNED: I64x4 => i64);
define_signed_table!(#[target_feature(enable = "avx,avx2")] F32_SIGNED: F32x8 => f32);
define_signed_table!(#[target_feature(enable = "avx,avx2")] F64_SIGNED: F64x4 => f64);

define_int_table!(#[target_feature(enable = "avx,avx2")] I8_INT: I8x32 => i8);
define_int_table!(#[target_feature(enable = "avx,avx2")] U8_INT: U8x32 => u8);
define_int_table!(#[target_feature(enable = "avx,avx2")] I16_INT: I16x16 => i16);
define_int_table!(#[target_feature(enable = "avx,avx2")] U16_INT: U16x16 => u16);
define_int_table!(#[target_feature(enable = "avx,avx2")] I32_INT: I32x8 => i32);
define_int_table!(#[target_feature(enable = "avx,avx2")] U32_INT: U32x8 => u32);
define_int_table!(#[target_feature(enable = "avx,avx2")] I64_INT: I64x4 => i64);
define_int_table!(#[target_feature(enable = "avx,avx2")] U64_INT: U64x4 => u64);

define_float_table!(#[target_feature(enable = "avx,avx2")] F32_FLOAT: F32x8 => f32);
define_float_table!(#[target_feature(enable = "avx,avx2")] F64_FLOAT: F64x4 => f64);
