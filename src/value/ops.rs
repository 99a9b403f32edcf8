//! Binary operator dispatch.
//!
//! [`Value::bin_op`] is an explicit dispatcher keyed on the operand tags and
//! the operator: a same-tag fast path computes in the operands' own width,
//! strings force string semantics, containers get their set-algebra, and
//! every remaining numeric pair falls through to the promotion engine.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{Tag, Value};
use crate::checked;
use crate::errors::ValueError;
use crate::promote::{self, PromotionClass};

/// The binary operators a [`Value`] understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    /// `&`: intersection.
    And,
    /// `|`: union, right-hand side wins map key collisions.
    Or,
    /// `^`: symmetric difference.
    Xor,
}

impl BinOp {
    fn name(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Rem => "%",
            BinOp::And => "&",
            BinOp::Or => "|",
            BinOp::Xor => "^",
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    /// Apply a binary operator with full dynamic-language semantics.
    ///
    /// ```
    /// use vargraph::value::{BinOp, Value};
    ///
    /// let sum = Value::from(2).bin_op(BinOp::Add, &Value::from(3.5)).unwrap();
    /// assert_eq!(sum, Value::from(5.5));
    ///
    /// let banner = Value::from("ab").bin_op(BinOp::Mul, &Value::from(3)).unwrap();
    /// assert_eq!(banner, Value::from("ababab"));
    /// ```
    pub fn bin_op(&self, op: BinOp, rhs: &Value) -> Result<Value, ValueError> {
        trace!(op = %op, left = %self.tag(), right = %rhs.tag(), "value op");

        // Strings outrank every numeric.
        if self.is_string() || rhs.is_string() {
            return string_op(self, op, rhs);
        }
        if self.is_container() || rhs.is_container() {
            return container_op(self, op, rhs);
        }
        if self.is_numeric() && rhs.is_numeric() {
            return numeric_op(self, op, rhs);
        }
        Err(ValueError::TypeMismatch {
            op: op.name(),
            left: self.tag(),
            right: rhs.tag(),
        })
    }
}

// ============================================================================
// Numeric dispatch
// ============================================================================

fn numeric_op(lhs: &Value, op: BinOp, rhs: &Value) -> Result<Value, ValueError> {
    // Same-tag fast path: compute in the operands' own width so overflow
    // raises instead of widening.
    match (lhs, rhs) {
        (Value::I32(a), Value::I32(b)) => return same_i32(*a, op, *b),
        (Value::I64(a), Value::I64(b)) => return same_i64(*a, op, *b),
        (Value::U64(a), Value::U64(b)) => return same_u64(*a, op, *b),
        (Value::F32(a), Value::F32(b)) => return same_f32(*a, op, *b),
        (Value::F64(a), Value::F64(b)) => return same_f64(*a, op, *b),
        _ => {}
    }

    let mismatch = || ValueError::TypeMismatch {
        op: op.name(),
        left: lhs.tag(),
        right: rhs.tag(),
    };
    let force_signed = op == BinOp::Sub;
    match promote::classify(lhs.tag(), rhs.tag(), force_signed) {
        PromotionClass::Float => {
            let a = promote::as_f64(lhs).ok_or_else(mismatch)?;
            let b = promote::as_f64(rhs).ok_or_else(mismatch)?;
            let wide = match op {
                BinOp::Add => checked::add_f64(a, b)?,
                BinOp::Sub => checked::sub_f64(a, b)?,
                BinOp::Mul => checked::mul_f64(a, b)?,
                BinOp::Div => checked::div_f64(a, b)?,
                BinOp::Rem => checked::rem_f64(a, b)?,
                _ => return Err(mismatch()),
            };
            Ok(promote::fit_float(wide))
        }
        PromotionClass::Unsigned => {
            let a = promote::as_u128(lhs).ok_or_else(mismatch)?;
            let b = promote::as_u128(rhs).ok_or_else(mismatch)?;
            match op {
                // u128 cannot overflow from 64-bit operands; narrowing
                // escalates past u64 instead of raising.
                BinOp::Add => Ok(promote::fit_unsigned(a + b)),
                BinOp::Mul => Ok(promote::fit_unsigned(a * b)),
                BinOp::Div => {
                    if b == 0 {
                        Err(ValueError::DivisionByZero)
                    } else {
                        Ok(promote::fit_float(a as f64 / b as f64))
                    }
                }
                BinOp::Rem => {
                    if b == 0 {
                        Err(ValueError::ModuloByZero)
                    } else {
                        Ok(promote::fit_unsigned(a % b))
                    }
                }
                _ => Err(mismatch()),
            }
        }
        PromotionClass::Signed => {
            let a = promote::as_i128(lhs).ok_or_else(mismatch)?;
            let b = promote::as_i128(rhs).ok_or_else(mismatch)?;
            match op {
                BinOp::Add => Ok(promote::fit_signed(a + b)),
                BinOp::Sub => Ok(promote::fit_signed(a - b)),
                BinOp::Mul => Ok(promote::fit_signed(a * b)),
                BinOp::Div => {
                    if b == 0 {
                        Err(ValueError::DivisionByZero)
                    } else {
                        Ok(promote::fit_float(a as f64 / b as f64))
                    }
                }
                BinOp::Rem => {
                    if b == 0 {
                        Err(ValueError::ModuloByZero)
                    } else {
                        Ok(promote::fit_signed(a % b))
                    }
                }
                _ => Err(mismatch()),
            }
        }
    }
}

fn same_i32(a: i32, op: BinOp, b: i32) -> Result<Value, ValueError> {
    match op {
        BinOp::Add => Ok(Value::I32(checked::add_i32(a, b)?)),
        BinOp::Sub => Ok(Value::I32(checked::sub_i32(a, b)?)),
        BinOp::Mul => Ok(Value::I32(checked::mul_i32(a, b)?)),
        BinOp::Div => Ok(promote::fit_float(checked::div_i64(a as i64, b as i64)?)),
        BinOp::Rem => Ok(Value::I32((checked::rem_i64(a as i64, b as i64)?) as i32)),
        _ => Err(ValueError::mismatch(op.name(), Tag::I32)),
    }
}

fn same_i64(a: i64, op: BinOp, b: i64) -> Result<Value, ValueError> {
    match op {
        BinOp::Add => Ok(Value::I64(checked::add_i64(a, b)?)),
        BinOp::Sub => Ok(Value::I64(checked::sub_i64(a, b)?)),
        BinOp::Mul => Ok(Value::I64(checked::mul_i64(a, b)?)),
        BinOp::Div => Ok(promote::fit_float(checked::div_i64(a, b)?)),
        BinOp::Rem => Ok(Value::I64(checked::rem_i64(a, b)?)),
        _ => Err(ValueError::mismatch(op.name(), Tag::I64)),
    }
}

fn same_u64(a: u64, op: BinOp, b: u64) -> Result<Value, ValueError> {
    match op {
        // Unsigned add and mul compute wide and escalate to floating past
        // the u64 range rather than raising.
        BinOp::Add => Ok(promote::fit_unsigned(a as u128 + b as u128)),
        // Subtraction must be able to go negative.
        BinOp::Sub => Ok(promote::fit_signed(a as i128 - b as i128)),
        BinOp::Mul => Ok(promote::fit_unsigned(a as u128 * b as u128)),
        BinOp::Div => Ok(promote::fit_float(checked::div_u64(a, b)?)),
        BinOp::Rem => Ok(Value::U64(checked::rem_u64(a, b)?)),
        _ => Err(ValueError::mismatch(op.name(), Tag::U64)),
    }
}

fn same_f32(a: f32, op: BinOp, b: f32) -> Result<Value, ValueError> {
    let inputs_finite = a.is_finite() && b.is_finite();
    let out = match op {
        BinOp::Add => a + b,
        BinOp::Sub => a - b,
        BinOp::Mul => a * b,
        BinOp::Div => {
            if b == 0.0 {
                return Err(ValueError::DivisionByZero);
            }
            a / b
        }
        BinOp::Rem => {
            if b == 0.0 {
                return Err(ValueError::ModuloByZero);
            }
            a % b
        }
        _ => return Err(ValueError::mismatch(op.name(), Tag::F32)),
    };
    if inputs_finite && out.is_infinite() {
        return Err(ValueError::ArithmeticOverflow { op: op.name() });
    }
    Ok(Value::F32(out))
}

fn same_f64(a: f64, op: BinOp, b: f64) -> Result<Value, ValueError> {
    let out = match op {
        BinOp::Add => checked::add_f64(a, b)?,
        BinOp::Sub => checked::sub_f64(a, b)?,
        BinOp::Mul => checked::mul_f64(a, b)?,
        BinOp::Div => checked::div_f64(a, b)?,
        BinOp::Rem => checked::rem_f64(a, b)?,
        _ => return Err(ValueError::mismatch(op.name(), Tag::F64)),
    };
    Ok(Value::F64(out))
}

// ============================================================================
// String semantics
// ============================================================================

fn string_op(lhs: &Value, op: BinOp, rhs: &Value) -> Result<Value, ValueError> {
    let mismatch = || ValueError::TypeMismatch {
        op: op.name(),
        left: lhs.tag(),
        right: rhs.tag(),
    };
    match op {
        // Concatenation; a numeric operand coerces to its string form.
        BinOp::Add => {
            let coerce = |v: &Value| -> Result<String, ValueError> {
                match v {
                    Value::Str(s) => Ok(s.clone()),
                    n if n.is_numeric() => Ok(n.to_string()),
                    _ => Err(mismatch()),
                }
            };
            let mut out = coerce(lhs)?;
            out.push_str(&coerce(rhs)?);
            Ok(Value::Str(out))
        }
        // Repetition against an integral operand, either order.
        BinOp::Mul => {
            let (s, n) = match (lhs, rhs) {
                (Value::Str(s), n) => (s, n),
                (n, Value::Str(s)) => (s, n),
                _ => return Err(mismatch()),
            };
            let count = promote::as_i128(n).ok_or_else(mismatch)?;
            Ok(Value::Str(s.repeat(count.max(0) as usize)))
        }
        _ => Err(mismatch()),
    }
}

// ============================================================================
// Container algebra
// ============================================================================

fn container_op(lhs: &Value, op: BinOp, rhs: &Value) -> Result<Value, ValueError> {
    let mismatch = || ValueError::TypeMismatch {
        op: op.name(),
        left: lhs.tag(),
        right: rhs.tag(),
    };

    // List repetition mirrors string repetition.
    if op == BinOp::Mul {
        let (items, n) = match (lhs, rhs) {
            (Value::List(items), n) if n.is_numeric() => (items, n),
            (n, Value::List(items)) if n.is_numeric() => (items, n),
            _ => return Err(mismatch()),
        };
        let count = promote::as_i128(n).ok_or_else(mismatch)?.max(0) as usize;
        let mut out = Vec::with_capacity(items.len() * count);
        for _ in 0..count {
            out.extend(items.iter().cloned());
        }
        return Ok(Value::List(out));
    }

    match (lhs, rhs) {
        (Value::List(a), Value::List(b)) => list_op(a, op, b).ok_or_else(mismatch),
        (Value::Set(a), Value::Set(b)) => {
            let out = match op {
                BinOp::Sub => a.iter().filter(|v| !b.contains(v)).cloned().collect(),
                BinOp::And => a.iter().filter(|v| b.contains(v)).cloned().collect(),
                BinOp::Or => a.iter().chain(b.iter()).cloned().collect(),
                BinOp::Xor => a.symmetric_difference(b).cloned().collect(),
                _ => return Err(mismatch()),
            };
            Ok(Value::Set(Box::new(out)))
        }
        (Value::OrdSet(a), Value::OrdSet(b)) => {
            let out = match op {
                BinOp::Sub => a.difference(b).cloned().collect(),
                BinOp::And => a.intersection(b).cloned().collect(),
                BinOp::Or => a.union(b).cloned().collect(),
                BinOp::Xor => a.symmetric_difference(b).cloned().collect(),
                _ => return Err(mismatch()),
            };
            Ok(Value::OrdSet(Box::new(out)))
        }
        (Value::Map(a), Value::Map(b)) => {
            let out: rustc_hash::FxHashMap<String, Value> = match op {
                BinOp::Sub => a
                    .iter()
                    .filter(|(k, _)| !b.contains_key(*k))
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
                // Keys present in both; left-hand values survive.
                BinOp::And => a
                    .iter()
                    .filter(|(k, _)| b.contains_key(*k))
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
                // Right-hand side wins key collisions.
                BinOp::Or => a
                    .iter()
                    .chain(b.iter())
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
                BinOp::Xor => a
                    .iter()
                    .filter(|(k, _)| !b.contains_key(*k))
                    .chain(b.iter().filter(|(k, _)| !a.contains_key(*k)))
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
                _ => return Err(mismatch()),
            };
            Ok(Value::Map(Box::new(out)))
        }
        (Value::OrdMap(a), Value::OrdMap(b)) => {
            let out: BTreeMap<String, Value> = match op {
                BinOp::Sub => a
                    .iter()
                    .filter(|(k, _)| !b.contains_key(*k))
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
                BinOp::And => a
                    .iter()
                    .filter(|(k, _)| b.contains_key(*k))
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
                BinOp::Or => a
                    .iter()
                    .chain(b.iter())
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
                BinOp::Xor => a
                    .iter()
                    .filter(|(k, _)| !b.contains_key(*k))
                    .chain(b.iter().filter(|(k, _)| !a.contains_key(*k)))
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
                _ => return Err(mismatch()),
            };
            Ok(Value::OrdMap(Box::new(out)))
        }
        _ => Err(mismatch()),
    }
}

fn list_op(a: &[Value], op: BinOp, b: &[Value]) -> Option<Value> {
    let out = match op {
        BinOp::Add => {
            let mut v = a.to_vec();
            v.extend_from_slice(b);
            v
        }
        // Removes one occurrence per matching right-hand element.
        BinOp::Sub => {
            let mut v = a.to_vec();
            for needle in b {
                if let Some(pos) = v.iter().position(|x| x == needle) {
                    v.remove(pos);
                }
            }
            v
        }
        // De-duplicated sequence variants of the set ops, left order kept.
        BinOp::And => dedup_filter(a, |x| b.contains(x)),
        BinOp::Or => {
            let mut v = dedup_filter(a, |_| true);
            for item in b {
                if !v.contains(item) {
                    v.push(item.clone());
                }
            }
            v
        }
        BinOp::Xor => {
            let mut v = dedup_filter(a, |x| !b.contains(x));
            for item in b {
                if !a.contains(item) && !v.contains(item) {
                    v.push(item.clone());
                }
            }
            v
        }
        _ => return None,
    };
    Some(Value::List(out))
}

fn dedup_filter(items: &[Value], keep: impl Fn(&Value) -> bool) -> Vec<Value> {
    let mut out: Vec<Value> = Vec::new();
    for item in items {
        if keep(item) && !out.contains(item) {
            out.push(item.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_width_overflow_raises() {
        let a = Value::from(2_000_000_000);
        let err = a.bin_op(BinOp::Add, &a);
        assert!(matches!(err, Err(ValueError::ArithmeticOverflow { .. })));

        let a = Value::from(2_000_000_000i64);
        let sum = a.bin_op(BinOp::Add, &a).unwrap();
        assert_eq!(sum, Value::I64(4_000_000_000));
    }

    #[test]
    fn unsigned_overflow_escalates_to_double() {
        let max = Value::from(u64::MAX);
        let one = Value::from(1u64);
        let sum = max.bin_op(BinOp::Add, &one).unwrap();
        assert_eq!(sum, Value::F64(u64::MAX as f64 + 1.0));

        let product = max.bin_op(BinOp::Mul, &Value::from(2u64)).unwrap();
        assert_eq!(product.tag(), Tag::F64);

        // In-range results stay unsigned.
        let small = Value::from(3u64).bin_op(BinOp::Mul, &Value::from(4u64)).unwrap();
        assert_eq!(small, Value::U64(12));
    }

    #[test]
    fn mixed_width_narrows_to_smallest_fit() {
        let sum = Value::from(1)
            .bin_op(BinOp::Add, &Value::from(2i64))
            .unwrap();
        assert!(matches!(sum, Value::I32(3)));

        let big = Value::from(i64::MAX)
            .bin_op(BinOp::Mul, &Value::from(2))
            .unwrap();
        assert!(matches!(big, Value::F64(_)));
    }

    #[test]
    fn unsigned_subtraction_goes_signed() {
        let diff = Value::from(1u64)
            .bin_op(BinOp::Sub, &Value::from(2u64))
            .unwrap();
        assert_eq!(diff, Value::I32(-1));
    }

    #[test]
    fn division_always_floats() {
        let q = Value::from(7).bin_op(BinOp::Div, &Value::from(2)).unwrap();
        assert_eq!(q, Value::from(3.5));
        assert!(matches!(
            Value::from(1).bin_op(BinOp::Div, &Value::from(0)),
            Err(ValueError::DivisionByZero)
        ));
    }

    #[test]
    fn modulo_truncates() {
        let r = Value::from(-7).bin_op(BinOp::Rem, &Value::from(3)).unwrap();
        assert_eq!(r, Value::I32(-1));
    }

    #[test]
    fn string_repetition_commutes() {
        let ab = Value::from("ab");
        let three = Value::from(3);
        assert_eq!(ab.bin_op(BinOp::Mul, &three).unwrap(), Value::from("ababab"));
        assert_eq!(three.bin_op(BinOp::Mul, &ab).unwrap(), Value::from("ababab"));
    }

    #[test]
    fn string_concat_coerces_numbers() {
        let out = Value::from("n=").bin_op(BinOp::Add, &Value::from(7)).unwrap();
        assert_eq!(out, Value::from("n=7"));
        assert!(Value::from("x").bin_op(BinOp::Sub, &Value::from("y")).is_err());
    }

    #[test]
    fn map_union_right_wins() {
        let left = Value::map([("a", Value::from(1))]);
        let right = Value::map([("a", Value::from(2)), ("b", Value::from(3))]);
        let merged = left.bin_op(BinOp::Or, &right).unwrap();
        assert_eq!(
            merged,
            Value::map([("a", Value::from(2)), ("b", Value::from(3))])
        );
    }

    #[test]
    fn set_algebra() {
        let a = Value::set([Value::from(1), Value::from(2)]);
        let b = Value::set([Value::from(2), Value::from(3)]);
        assert_eq!(
            a.bin_op(BinOp::And, &b).unwrap(),
            Value::set([Value::from(2)])
        );
        assert_eq!(
            a.bin_op(BinOp::Xor, &b).unwrap(),
            Value::set([Value::from(1), Value::from(3)])
        );
    }

    #[test]
    fn list_difference_removes_one_occurrence() {
        let a = Value::list([Value::from(1), Value::from(1), Value::from(2)]);
        let b = Value::list([Value::from(1)]);
        assert_eq!(
            a.bin_op(BinOp::Sub, &b).unwrap(),
            Value::list([Value::from(1), Value::from(2)])
        );
    }

    #[test]
    fn graph_operand_is_a_mismatch() {
        let g = Value::graph(2);
        assert!(g.bin_op(BinOp::Add, &Value::from(1)).is_err());
    }
}
