//! Equality, hashing, and ordering for [`Value`].
//!
//! Two layers:
//!
//! - [`PartialEq`]/[`Hash`]/[`Ord`] implement a *storage* discipline usable
//!   by hash and B-tree containers: a total order over all shapes (tag rank,
//!   then payload, floats via `total_cmp`) whose equality agrees with
//!   hashing. Numerics are canonicalized first, so `1i32`, `1u64`, and
//!   `1.0f64` are the same element in a set.
//! - [`Value::compare`] implements the *language* ordering: numerics promote
//!   and compare, strings and sequences compare lexicographically, and any
//!   other cross-shape pair raises `TypeMismatch`.
//!
//! Numeric canonicalization is exact for integers: an integral payload keys
//! as `i128`, a float keys as `i128` only when the conversion round-trips,
//! and every other float keys as its widened `f64`. This keeps equality
//! transitive where plain widen-to-double equality is not.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use super::Value;
use crate::errors::ValueError;

// ============================================================================
// Numeric canonical key
// ============================================================================

/// Canonical identity of a numeric payload.
enum NumKey {
    Int(i128),
    Float(f64),
}

fn num_key(v: &Value) -> Option<NumKey> {
    match *v {
        Value::Bool(b) => Some(NumKey::Int(b as i128)),
        Value::I32(n) => Some(NumKey::Int(n as i128)),
        Value::I64(n) => Some(NumKey::Int(n as i128)),
        Value::U64(n) => Some(NumKey::Int(n as i128)),
        Value::F32(n) => Some(float_key(n as f64)),
        Value::F64(n) => Some(float_key(n)),
        _ => None,
    }
}

fn float_key(f: f64) -> NumKey {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < (i128::MAX as f64) {
        let int = f as i128;
        if int as f64 == f {
            return NumKey::Int(int);
        }
    }
    NumKey::Float(f)
}

impl NumKey {
    fn eq_key(&self, other: &NumKey) -> bool {
        match (self, other) {
            (NumKey::Int(a), NumKey::Int(b)) => a == b,
            (NumKey::Float(a), NumKey::Float(b)) => a.total_cmp(b) == Ordering::Equal,
            _ => false,
        }
    }

    fn cmp_key(&self, other: &NumKey) -> Ordering {
        match (self, other) {
            (NumKey::Int(a), NumKey::Int(b)) => a.cmp(b),
            (NumKey::Float(a), NumKey::Float(b)) => a.total_cmp(b),
            // Mixed: order by magnitude, ties broken with Int first so the
            // order stays antisymmetric.
            (NumKey::Int(a), NumKey::Float(b)) => {
                (*a as f64).total_cmp(b).then(Ordering::Less)
            }
            (NumKey::Float(a), NumKey::Int(b)) => {
                a.total_cmp(&(*b as f64)).then(Ordering::Greater)
            }
        }
    }

    fn hash_key<H: Hasher>(&self, state: &mut H) {
        match self {
            NumKey::Int(n) => {
                state.write_u8(0);
                n.hash(state);
            }
            NumKey::Float(f) => {
                state.write_u8(1);
                f.to_bits().hash(state);
            }
        }
    }
}

// ============================================================================
// Equality
// ============================================================================

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        if let (Some(a), Some(b)) = (num_key(self), num_key(other)) {
            return a.eq_key(&b);
        }
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            // Order-independent, backed by Value's own Hash/Eq.
            (Value::Set(a), Value::Set(b)) => a == b,
            (Value::OrdSet(a), Value::OrdSet(b)) => a == b,
            // Cardinality check plus per-key value equality.
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::OrdMap(a), Value::OrdMap(b)) => a == b,
            // Graph equality is handle identity, not structural.
            (Value::Graph(a), Value::Graph(b)) => a.same_graph(b),
            _ => false,
        }
    }
}

impl Eq for Value {}

// ============================================================================
// Hashing
// ============================================================================

fn unordered_fold<'a, H: Hasher>(
    state: &mut H,
    items: impl Iterator<Item = &'a Value>,
) {
    // Commutative fold so hash-set iteration order cannot leak in.
    let mut acc: u64 = 0;
    let mut len: usize = 0;
    for item in items {
        let mut h = FxHasher::default();
        item.hash(&mut h);
        acc = acc.wrapping_add(h.finish());
        len += 1;
    }
    state.write_usize(len);
    state.write_u64(acc);
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if let Some(key) = num_key(self) {
            // All numeric shapes share one hash domain.
            state.write_u8(1);
            key.hash_key(state);
            return;
        }
        match self {
            Value::None => state.write_u8(0),
            Value::Str(s) => {
                state.write_u8(2);
                s.hash(state);
            }
            Value::List(items) => {
                state.write_u8(3);
                for item in items {
                    item.hash(state);
                }
            }
            Value::Set(s) => {
                state.write_u8(4);
                unordered_fold(state, s.iter());
            }
            Value::OrdSet(s) => {
                state.write_u8(5);
                for item in s.iter() {
                    item.hash(state);
                }
            }
            Value::Map(m) => {
                state.write_u8(6);
                let mut acc: u64 = 0;
                for (k, v) in m.iter() {
                    let mut h = FxHasher::default();
                    k.hash(&mut h);
                    v.hash(&mut h);
                    acc = acc.wrapping_add(h.finish());
                }
                state.write_usize(m.len());
                state.write_u64(acc);
            }
            Value::OrdMap(m) => {
                state.write_u8(7);
                for (k, v) in m.iter() {
                    k.hash(state);
                    v.hash(state);
                }
            }
            Value::Graph(g) => {
                state.write_u8(8);
                g.identity().hash(state);
            }
            // Numerics handled above.
            _ => {}
        }
    }
}

// ============================================================================
// Storage order
// ============================================================================

fn sorted_refs<'a>(items: impl Iterator<Item = &'a Value>) -> Vec<&'a Value> {
    let mut v: Vec<&Value> = items.collect();
    v.sort();
    v
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        if let (Some(a), Some(b)) = (num_key(self), num_key(other)) {
            return a.cmp_key(&b);
        }
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => a.cmp(b),
            (Value::List(a), Value::List(b)) => a.cmp(b),
            (Value::Set(a), Value::Set(b)) => sorted_refs(a.iter()).cmp(&sorted_refs(b.iter())),
            (Value::OrdSet(a), Value::OrdSet(b)) => a.iter().cmp(b.iter()),
            (Value::Map(a), Value::Map(b)) => {
                let mut left: Vec<_> = a.iter().collect();
                let mut right: Vec<_> = b.iter().collect();
                left.sort_by(|x, y| x.0.cmp(y.0));
                right.sort_by(|x, y| x.0.cmp(y.0));
                left.cmp(&right)
            }
            (Value::OrdMap(a), Value::OrdMap(b)) => a.iter().cmp(b.iter()),
            (Value::Graph(a), Value::Graph(b)) => a.identity().cmp(&b.identity()),
            // Cross-shape: tag rank decides.
            _ => self.tag().cmp(&other.tag()),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================================
// Language ordering
// ============================================================================

impl Value {
    /// Ordering with language semantics.
    ///
    /// Numerics promote and compare; strings, sequences, ordered sets, and
    /// ordered maps compare lexicographically; everything else (including a
    /// NaN operand) raises `TypeMismatch`.
    ///
    /// ```
    /// use vargraph::value::Value;
    /// use std::cmp::Ordering;
    ///
    /// assert_eq!(Value::from(2).compare(&Value::from(2.5)).unwrap(), Ordering::Less);
    /// assert!(Value::from(1).compare(&Value::from("1")).is_err());
    /// ```
    pub fn compare(&self, other: &Value) -> Result<Ordering, ValueError> {
        let fail = || ValueError::TypeMismatch {
            op: "compare",
            left: self.tag(),
            right: other.tag(),
        };
        if let (Some(a), Some(b)) = (
            crate::promote::as_f64(self),
            crate::promote::as_f64(other),
        ) {
            // Exact path for two integers, promoted path otherwise.
            if let (Some(ia), Some(ib)) =
                (crate::promote::as_i128(self), crate::promote::as_i128(other))
            {
                return Ok(ia.cmp(&ib));
            }
            return a.partial_cmp(&b).ok_or_else(fail);
        }
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => Ok(a.cmp(b)),
            (Value::List(a), Value::List(b)) => compare_seq(a.iter(), b.iter()),
            (Value::OrdSet(a), Value::OrdSet(b)) => compare_seq(a.iter(), b.iter()),
            (Value::OrdMap(a), Value::OrdMap(b)) => {
                for ((ka, va), (kb, vb)) in a.iter().zip(b.iter()) {
                    match ka.cmp(kb) {
                        Ordering::Equal => {}
                        other => return Ok(other),
                    }
                    match va.compare(vb)? {
                        Ordering::Equal => {}
                        other => return Ok(other),
                    }
                }
                Ok(a.len().cmp(&b.len()))
            }
            _ => Err(fail()),
        }
    }
}

fn compare_seq<'a>(
    mut a: impl Iterator<Item = &'a Value>,
    mut b: impl Iterator<Item = &'a Value>,
) -> Result<Ordering, ValueError> {
    loop {
        match (a.next(), b.next()) {
            (None, None) => return Ok(Ordering::Equal),
            (None, Some(_)) => return Ok(Ordering::Less),
            (Some(_), None) => return Ok(Ordering::Greater),
            (Some(x), Some(y)) => match x.compare(y)? {
                Ordering::Equal => {}
                other => return Ok(other),
            },
        }
    }
}
