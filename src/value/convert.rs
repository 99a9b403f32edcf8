//! Explicit casts and the JSON bridge.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use super::{Tag, Value};
use crate::errors::ValueError;

// ============================================================================
// Explicit casts
// ============================================================================

impl Value {
    /// Cast to a signed integer: numerics truncate, strings parse, booleans
    /// widen. Anything else raises [`ValueError::Conversion`].
    pub fn to_i64(&self) -> Result<i64, ValueError> {
        let fail = |detail: String| ValueError::Conversion {
            from: self.tag(),
            to: "long",
            detail,
        };
        match self {
            Value::Bool(b) => Ok(*b as i64),
            Value::I32(n) => Ok(*n as i64),
            Value::I64(n) => Ok(*n),
            Value::U64(n) => i64::try_from(*n).map_err(|_| fail(format!("{n} exceeds i64"))),
            Value::F32(n) => Ok(*n as i64),
            Value::F64(n) => Ok(*n as i64),
            Value::Str(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|e| fail(format!("'{s}': {e}"))),
            other => Err(fail(format!("shape {} has no integer form", other.tag()))),
        }
    }

    /// Cast to a double; strings parse.
    pub fn to_f64(&self) -> Result<f64, ValueError> {
        let fail = |detail: String| ValueError::Conversion {
            from: self.tag(),
            to: "double",
            detail,
        };
        match self {
            Value::Str(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|e| fail(format!("'{s}': {e}"))),
            other => crate::promote::as_f64(other)
                .ok_or_else(|| fail(format!("shape {} has no numeric form", other.tag()))),
        }
    }

    /// Cast to a string value via the plain display form.
    pub fn to_string_value(&self) -> Value {
        Value::Str(self.to_string())
    }
}

// ============================================================================
// JSON bridge
// ============================================================================

impl From<serde_json::Value> for Value {
    /// JSON maps onto the value shapes directly: numbers pick the narrowest
    /// shape their payload fits, objects become hash maps.
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::None,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    if let Ok(narrow) = i32::try_from(i) {
                        Value::I32(narrow)
                    } else {
                        Value::I64(i)
                    }
                } else if let Some(u) = n.as_u64() {
                    Value::U64(u)
                } else {
                    Value::F64(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(fields) => {
                let map: FxHashMap<String, Value> = fields
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect();
                Value::Map(Box::new(map))
            }
        }
    }
}

impl TryFrom<&Value> for serde_json::Value {
    type Error = ValueError;

    /// Graph-shaped values have no JSON form; sets serialize as arrays.
    fn try_from(value: &Value) -> Result<Self, ValueError> {
        let number = |f: f64, tag: Tag| {
            serde_json::Number::from_f64(f)
                .map(serde_json::Value::Number)
                .ok_or_else(|| ValueError::Conversion {
                    from: tag,
                    to: "json",
                    detail: "non-finite float".into(),
                })
        };
        Ok(match value {
            Value::None => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::I32(n) => serde_json::Value::from(*n),
            Value::I64(n) => serde_json::Value::from(*n),
            Value::U64(n) => serde_json::Value::from(*n),
            Value::F32(n) => number(*n as f64, Tag::F32)?,
            Value::F64(n) => number(*n, Tag::F64)?,
            Value::Str(s) => serde_json::Value::String(s.clone()),
            Value::List(items) => serde_json::Value::Array(
                items
                    .iter()
                    .map(serde_json::Value::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            Value::Set(s) => set_to_json(s.iter())?,
            Value::OrdSet(s) => set_to_json(s.iter())?,
            Value::Map(m) => map_to_json(m.iter())?,
            Value::OrdMap(m) => map_to_json(m.iter())?,
            Value::Graph(_) => {
                return Err(ValueError::Conversion {
                    from: Tag::Graph,
                    to: "json",
                    detail: "graphs use the flat text format instead".into(),
                });
            }
        })
    }
}

fn set_to_json<'a>(
    items: impl Iterator<Item = &'a Value>,
) -> Result<serde_json::Value, ValueError> {
    Ok(serde_json::Value::Array(
        items
            .map(serde_json::Value::try_from)
            .collect::<Result<_, _>>()?,
    ))
}

fn map_to_json<'a>(
    pairs: impl Iterator<Item = (&'a String, &'a Value)>,
) -> Result<serde_json::Value, ValueError> {
    let mut out = serde_json::Map::new();
    // Deterministic key order regardless of the source map shape.
    let sorted: BTreeMap<&String, &Value> = pairs.collect();
    for (k, v) in sorted {
        out.insert(k.clone(), serde_json::Value::try_from(v)?);
    }
    Ok(serde_json::Value::Object(out))
}
