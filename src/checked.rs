//! Overflow-raising primitive arithmetic.
//!
//! Thin wrappers over the standard checked/overflowing intrinsics that turn
//! wraparound into [`ValueError::ArithmeticOverflow`] instead of silently
//! wrapping. Stateless; the promotion engine (`crate::promote`) decides which
//! width to compute in, these helpers only perform the computation.
//!
//! Division is special-cased twice: a zero divisor raises
//! [`ValueError::DivisionByZero`], and integral division always returns `f64`
//! so `7 / 2 == 3.5` regardless of operand shapes. Modulo keeps truncating
//! semantics (`-7 % 3 == -1`).

use crate::errors::ValueError;

/// Signed addition, raising on overflow.
pub fn add_i64(a: i64, b: i64) -> Result<i64, ValueError> {
    a.checked_add(b)
        .ok_or(ValueError::ArithmeticOverflow { op: "add" })
}

/// Signed subtraction, raising on overflow.
pub fn sub_i64(a: i64, b: i64) -> Result<i64, ValueError> {
    a.checked_sub(b)
        .ok_or(ValueError::ArithmeticOverflow { op: "sub" })
}

/// Signed multiplication, raising on overflow.
pub fn mul_i64(a: i64, b: i64) -> Result<i64, ValueError> {
    a.checked_mul(b)
        .ok_or(ValueError::ArithmeticOverflow { op: "mul" })
}

/// Narrow-width signed addition. Used when both operands are `I32` so that
/// `2_000_000_000 + 2_000_000_000` raises instead of quietly widening.
pub fn add_i32(a: i32, b: i32) -> Result<i32, ValueError> {
    a.checked_add(b)
        .ok_or(ValueError::ArithmeticOverflow { op: "add" })
}

/// Narrow-width signed subtraction.
pub fn sub_i32(a: i32, b: i32) -> Result<i32, ValueError> {
    a.checked_sub(b)
        .ok_or(ValueError::ArithmeticOverflow { op: "sub" })
}

/// Narrow-width signed multiplication.
pub fn mul_i32(a: i32, b: i32) -> Result<i32, ValueError> {
    a.checked_mul(b)
        .ok_or(ValueError::ArithmeticOverflow { op: "mul" })
}

/// Integral division. Always produces `f64`; zero divisor and the
/// `i64::MIN / -1` corner both raise.
pub fn div_i64(a: i64, b: i64) -> Result<f64, ValueError> {
    if b == 0 {
        return Err(ValueError::DivisionByZero);
    }
    if a == i64::MIN && b == -1 {
        return Err(ValueError::ArithmeticOverflow { op: "div" });
    }
    Ok(a as f64 / b as f64)
}

/// Unsigned integral division, producing `f64`.
pub fn div_u64(a: u64, b: u64) -> Result<f64, ValueError> {
    if b == 0 {
        return Err(ValueError::DivisionByZero);
    }
    Ok(a as f64 / b as f64)
}

/// Truncating signed remainder.
pub fn rem_i64(a: i64, b: i64) -> Result<i64, ValueError> {
    if b == 0 {
        return Err(ValueError::ModuloByZero);
    }
    // i64::MIN % -1 overflows in the hardware op even though the
    // mathematical result is 0.
    if a == i64::MIN && b == -1 {
        return Ok(0);
    }
    Ok(a % b)
}

/// Unsigned remainder.
pub fn rem_u64(a: u64, b: u64) -> Result<u64, ValueError> {
    if b == 0 {
        return Err(ValueError::ModuloByZero);
    }
    Ok(a % b)
}

/// Float op that raises when finite inputs produce an infinity.
fn float_guard(op: &'static str, inputs_finite: bool, out: f64) -> Result<f64, ValueError> {
    if inputs_finite && out.is_infinite() {
        Err(ValueError::ArithmeticOverflow { op })
    } else {
        Ok(out)
    }
}

/// Float addition with infinity escalation check.
pub fn add_f64(a: f64, b: f64) -> Result<f64, ValueError> {
    float_guard("add", a.is_finite() && b.is_finite(), a + b)
}

/// Float subtraction with infinity escalation check.
pub fn sub_f64(a: f64, b: f64) -> Result<f64, ValueError> {
    float_guard("sub", a.is_finite() && b.is_finite(), a - b)
}

/// Float multiplication with infinity escalation check.
pub fn mul_f64(a: f64, b: f64) -> Result<f64, ValueError> {
    float_guard("mul", a.is_finite() && b.is_finite(), a * b)
}

/// Float division. A zero divisor raises rather than yielding an infinity.
pub fn div_f64(a: f64, b: f64) -> Result<f64, ValueError> {
    if b == 0.0 {
        return Err(ValueError::DivisionByZero);
    }
    float_guard("div", a.is_finite() && b.is_finite(), a / b)
}

/// Float remainder, truncating like the integer form.
pub fn rem_f64(a: f64, b: f64) -> Result<f64, ValueError> {
    if b == 0.0 {
        return Err(ValueError::ModuloByZero);
    }
    Ok(a % b)
}
