//! Numeric promotion for mixed-shape arithmetic.
//!
//! The ladder ranks numeric shapes `Bool < I32 < U64 < I64 < F32 < F64`;
//! strings outrank every numeric and force string semantics in the dispatcher.
//! A binary op between two numeric shapes is classified once:
//!
//! - either side floating -> compute in `f64`, narrow to `F32` only when the
//!   result round-trips exactly;
//! - both sides unsigned (bool counts as unsigned) -> compute in `u128`,
//!   narrow to the smallest unsigned shape that fits;
//! - otherwise -> compute in `i128`, narrow to the smallest signed shape.
//!
//! Subtraction always takes the signed branch. Narrowing never lands on
//! `Bool`. When even the widest integer cannot hold the result the value
//! escalates to `F64` silently; that escalation is the one recovered case in
//! the crate, everything else raises.

use serde::{Deserialize, Serialize};

use crate::value::{Tag, Value};

/// Promotion rank of a numeric shape. `None` for non-numerics.
pub fn rank(tag: Tag) -> Option<u8> {
    match tag {
        Tag::Bool => Some(0),
        Tag::I32 => Some(1),
        Tag::U64 => Some(2),
        Tag::I64 => Some(3),
        Tag::F32 => Some(4),
        Tag::F64 => Some(5),
        _ => None,
    }
}

/// True for shapes that participate in promotion.
pub fn is_numeric(tag: Tag) -> bool {
    rank(tag).is_some()
}

/// Which wide domain a mixed-shape op computes in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PromotionClass {
    /// Either operand is floating; compute in `f64`.
    Float,
    /// Both operands are unsigned-or-bool; compute in `u128`.
    Unsigned,
    /// Any signed operand (or a subtraction); compute in `i128`.
    Signed,
}

/// Classify a numeric pair. `force_signed` is set by the dispatcher for
/// subtraction, which must be able to go negative.
pub fn classify(a: Tag, b: Tag, force_signed: bool) -> PromotionClass {
    let floating = matches!(a, Tag::F32 | Tag::F64) || matches!(b, Tag::F32 | Tag::F64);
    if floating {
        return PromotionClass::Float;
    }
    if force_signed {
        return PromotionClass::Signed;
    }
    let unsigned = |t: Tag| matches!(t, Tag::Bool | Tag::U64);
    if unsigned(a) && unsigned(b) {
        PromotionClass::Unsigned
    } else {
        PromotionClass::Signed
    }
}

/// Narrow a signed wide result to the smallest signed shape that fits,
/// escalating to `F64` when `i64` cannot hold it.
pub fn fit_signed(wide: i128) -> Value {
    if let Ok(v) = i32::try_from(wide) {
        Value::I32(v)
    } else if let Ok(v) = i64::try_from(wide) {
        Value::I64(v)
    } else {
        Value::F64(wide as f64)
    }
}

/// Narrow an unsigned wide result, escalating to `F64` past `u64::MAX`.
pub fn fit_unsigned(wide: u128) -> Value {
    if let Ok(v) = u64::try_from(wide) {
        Value::U64(v)
    } else {
        Value::F64(wide as f64)
    }
}

/// Narrow a floating result to `F32` only when the conversion is exact.
pub fn fit_float(wide: f64) -> Value {
    let narrow = wide as f32;
    if f64::from(narrow) == wide && narrow.is_finite() == wide.is_finite() {
        Value::F32(narrow)
    } else {
        Value::F64(wide)
    }
}

/// Extract a numeric payload as `i128`, when the shape is an integer kind.
pub fn as_i128(v: &Value) -> Option<i128> {
    match *v {
        Value::Bool(b) => Some(b as i128),
        Value::I32(n) => Some(n as i128),
        Value::I64(n) => Some(n as i128),
        Value::U64(n) => Some(n as i128),
        _ => None,
    }
}

/// Extract a numeric payload as `u128`. `None` for negatives and non-integers.
pub fn as_u128(v: &Value) -> Option<u128> {
    match *v {
        Value::Bool(b) => Some(b as u128),
        Value::I32(n) if n >= 0 => Some(n as u128),
        Value::I64(n) if n >= 0 => Some(n as u128),
        Value::U64(n) => Some(n as u128),
        _ => None,
    }
}

/// Extract any numeric payload as `f64` (lossy for huge integers).
pub fn as_f64(v: &Value) -> Option<f64> {
    match *v {
        Value::Bool(b) => Some(if b { 1.0 } else { 0.0 }),
        Value::I32(n) => Some(n as f64),
        Value::I64(n) => Some(n as f64),
        Value::U64(n) => Some(n as f64),
        Value::F32(n) => Some(n as f64),
        Value::F64(n) => Some(n),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_fit_prefers_narrowest() {
        assert!(matches!(fit_signed(5), Value::I32(5)));
        assert!(matches!(fit_signed(i64::MAX as i128), Value::I64(_)));
        assert!(matches!(fit_signed(i128::from(i64::MAX) + 1), Value::F64(_)));
    }

    #[test]
    fn unsigned_fit_escalates_to_float() {
        assert!(matches!(fit_unsigned(7), Value::U64(7)));
        assert!(matches!(
            fit_unsigned(u128::from(u64::MAX) + 1),
            Value::F64(_)
        ));
    }

    #[test]
    fn float_fit_requires_exact_roundtrip() {
        assert!(matches!(fit_float(1.5), Value::F32(_)));
        assert!(matches!(fit_float(1e300), Value::F64(_)));
        // 0.1 is not representable in f32 without rounding.
        assert!(matches!(fit_float(0.1), Value::F64(_)));
    }

    #[test]
    fn subtraction_forces_signed() {
        assert_eq!(classify(Tag::U64, Tag::U64, true), PromotionClass::Signed);
        assert_eq!(classify(Tag::U64, Tag::U64, false), PromotionClass::Unsigned);
        assert_eq!(classify(Tag::U64, Tag::F32, true), PromotionClass::Float);
        assert_eq!(classify(Tag::I32, Tag::U64, false), PromotionClass::Signed);
    }
}
