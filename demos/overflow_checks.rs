//! Overflow Checks Demonstration
//!
//! Shows how the same calls behave with overflow checks on (the default) and
//! off, and how every failure comes back as an `ArrayError` instead of a panic.

use simdarr::ops::{filter, math};
use simdarr::{isa_level, lane_count, ArrayError, CmpOp, OpConfig, Operand};

fn main() {
    println!("🔧 simdarr overflow checks\n");
    println!(
        "   Detected ISA: {:?} ({} i8 lanes, {} f64 lanes)\n",
        isa_level(),
        lane_count::<i8>(),
        lane_count::<f64>()
    );

    let checked = OpConfig::default();
    let wrapping = checked.with_overflow_checks(false);

    // Example 1: abs of i8::MIN
    println!("✅ Example 1: abs with i8::MIN in the input");
    let mut data: Vec<i8> = (-128..=127).collect();
    match math::abs(&mut data, &checked) {
        Ok(()) => println!("   Unexpected success"),
        Err(e) => println!("   Checked:   {} (input untouched: first = {})", e, data[0]),
    }
    math::abs(&mut data, &wrapping).expect("abs never fails without checks");
    println!("   Unchecked: first = {}, last = {}", data[0], data[255]);
    println!();

    // Example 2: u8 addition past 255
    println!("✅ Example 2: u8 addition");
    let mut data = vec![200u8; 64];
    match math::add(&mut data, Operand::Scalar(100), &checked) {
        Ok(()) => println!("   Unexpected success"),
        Err(ArrayError::Overflow { op }) => println!("   Checked:   overflow in {}", op),
        Err(e) => println!("   Checked:   other error {}", e),
    }
    let mut data = vec![200u8; 64];
    math::add(&mut data, Operand::Scalar(100), &wrapping).expect("valid operands");
    println!("   Unchecked: 200 + 100 = {}", data[0]);
    println!();

    // Example 3: division by zero is reported either way
    println!("❌ Example 3: integer division by zero");
    let mut divisors = vec![3i32; 100];
    divisors[42] = 0;
    for (label, cfg) in [("Checked", &checked), ("Unchecked", &wrapping)] {
        let mut data = vec![9i32; 100];
        match math::div(&mut data, Operand::Array(&divisors), cfg) {
            Ok(()) => println!("   {label}: unexpected success"),
            Err(e) => println!("   {label}: {e}"),
        }
    }
    println!();

    // Example 4: non-finite float results
    println!("❌ Example 4: float results that are not finite");
    let mut data = vec![1.0e30f32; 16];
    match math::mul(&mut data, Operand::Scalar(1.0e30), &checked) {
        Ok(()) => println!("   Unexpected success"),
        Err(e) => println!("   Checked:   {}", e),
    }
    let mut data = vec![1.0e30f32; 16];
    math::mul(&mut data, Operand::Scalar(1.0e30), &wrapping).expect("valid operands");
    println!("   Unchecked: {}", data[0]);
    println!();

    // Example 5: argument errors
    println!("❌ Example 5: argument errors");
    let data = [5u16, 1, 7];
    let mut out = [0u16; 2];
    if let Err(e) = filter::filter(CmpOp::Gt, &data, 2, &mut out, &checked) {
        println!("   filter: {}", e);
    }
    let mut data = vec![1i64; 4];
    if let Err(e) = math::sub(&mut data, Operand::Array(&[1, 2]), &checked) {
        println!("   sub:    {}", e);
    }
    if let Err(e) = "=~".parse::<CmpOp>() {
        println!("   parse:  {}", e);
    }
}
