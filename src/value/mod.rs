//! The dynamically-typed value core.
//!
//! [`Value`] is a closed sum type covering fourteen runtime shapes: the
//! absence marker, booleans, three integer widths, two float widths, strings,
//! five container shapes, and a shared-ownership graph handle. The compiler
//! enforces tag/payload coupling, so a `Value` is never partially valid and
//! destruction needs no hand-written cleanup.
//!
//! Copy semantics are deep for every shape except [`Value::Graph`], which
//! clones a reference-counted handle: two graph-shaped values alias one
//! graph, and a mutation through either is visible to both.
//!
//! ```
//! use vargraph::value::Value;
//!
//! let v = Value::list([Value::from(1), Value::from("two")]);
//! assert!(v.is_truthy());
//! assert_eq!(v.to_string(), "[1, 'two']");
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::bridge::GraphHandle;
use crate::errors::ValueError;

pub mod compare;
pub mod containers;
pub mod convert;
pub mod iter;
pub mod ops;

pub use iter::ValueIter;
pub use ops::BinOp;

// ============================================================================
// Tags
// ============================================================================

/// The discriminant identifying which shape a [`Value`] currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tag {
    None,
    Bool,
    I32,
    I64,
    U64,
    F32,
    F64,
    Str,
    List,
    Set,
    OrdSet,
    Map,
    OrdMap,
    Graph,
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tag::None => "none",
            Tag::Bool => "bool",
            Tag::I32 => "int",
            Tag::I64 => "long",
            Tag::U64 => "unsigned",
            Tag::F32 => "float",
            Tag::F64 => "double",
            Tag::Str => "string",
            Tag::List => "list",
            Tag::Set => "set",
            Tag::OrdSet => "ordered set",
            Tag::Map => "map",
            Tag::OrdMap => "ordered map",
            Tag::Graph => "graph",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Value
// ============================================================================

/// One dynamically-typed cell.
///
/// Containers nest arbitrarily (elements are themselves `Value`s) but
/// ownership stays tree-shaped; the only aliasing path is the graph handle.
#[derive(Debug, Clone)]
pub enum Value {
    /// Absence marker.
    None,
    Bool(bool),
    I32(i32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
    Str(String),
    /// Ordered sequence, duplicates allowed.
    List(Vec<Value>),
    /// Unordered unique elements, expected O(1) membership.
    Set(Box<FxHashSet<Value>>),
    /// Sorted unique elements, O(log n) membership.
    OrdSet(Box<BTreeSet<Value>>),
    /// String-keyed, expected O(1) lookup.
    Map(Box<FxHashMap<String, Value>>),
    /// String-keyed, sorted iteration order.
    OrdMap(Box<BTreeMap<String, Value>>),
    /// Shared handle to a graph engine instance.
    Graph(GraphHandle),
}

impl Default for Value {
    fn default() -> Self {
        Value::None
    }
}

// ============================================================================
// Construction
// ============================================================================

impl Value {
    /// Build a list from anything iterable over values.
    pub fn list<I: IntoIterator<Item = Value>>(items: I) -> Self {
        Value::List(items.into_iter().collect())
    }

    /// Build a hash set; duplicate elements collapse.
    pub fn set<I: IntoIterator<Item = Value>>(items: I) -> Self {
        Value::Set(Box::new(items.into_iter().collect()))
    }

    /// Build an ordered set sorted by storage order.
    pub fn ord_set<I: IntoIterator<Item = Value>>(items: I) -> Self {
        Value::OrdSet(Box::new(items.into_iter().collect()))
    }

    /// Build a hash map from `(key, value)` pairs; later keys win.
    pub fn map<K, I>(pairs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Map(Box::new(
            pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ))
    }

    /// Build an ordered map from `(key, value)` pairs.
    pub fn ord_map<K, I>(pairs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::OrdMap(Box::new(
            pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ))
    }

    /// Build a graph-shaped value with `nodes` payload-less nodes.
    pub fn graph(nodes: usize) -> Self {
        Value::Graph(GraphHandle::with_nodes(nodes))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::I32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::I64(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::U64(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::F32(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::F64(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<GraphHandle> for Value {
    fn from(v: GraphHandle) -> Self {
        Value::Graph(v)
    }
}

// ============================================================================
// Inspection & checked access
// ============================================================================

impl Value {
    /// The shape this value currently holds. O(1).
    pub fn tag(&self) -> Tag {
        match self {
            Value::None => Tag::None,
            Value::Bool(_) => Tag::Bool,
            Value::I32(_) => Tag::I32,
            Value::I64(_) => Tag::I64,
            Value::U64(_) => Tag::U64,
            Value::F32(_) => Tag::F32,
            Value::F64(_) => Tag::F64,
            Value::Str(_) => Tag::Str,
            Value::List(_) => Tag::List,
            Value::Set(_) => Tag::Set,
            Value::OrdSet(_) => Tag::OrdSet,
            Value::Map(_) => Tag::Map,
            Value::OrdMap(_) => Tag::OrdMap,
            Value::Graph(_) => Tag::Graph,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    pub fn is_numeric(&self) -> bool {
        crate::promote::is_numeric(self.tag())
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::Str(_))
    }

    pub fn is_container(&self) -> bool {
        matches!(
            self,
            Value::List(_) | Value::Set(_) | Value::OrdSet(_) | Value::Map(_) | Value::OrdMap(_)
        )
    }

    pub fn is_graph(&self) -> bool {
        matches!(self, Value::Graph(_))
    }

    fn wrong_shape(&self, op: &'static str) -> ValueError {
        ValueError::mismatch(op, self.tag())
    }

    /// Checked boolean accessor.
    pub fn as_bool(&self) -> Result<bool, ValueError> {
        match self {
            Value::Bool(b) => Ok(*b),
            _ => Err(self.wrong_shape("as_bool")),
        }
    }

    pub fn as_i32(&self) -> Result<i32, ValueError> {
        match self {
            Value::I32(n) => Ok(*n),
            _ => Err(self.wrong_shape("as_i32")),
        }
    }

    pub fn as_i64(&self) -> Result<i64, ValueError> {
        match self {
            Value::I64(n) => Ok(*n),
            _ => Err(self.wrong_shape("as_i64")),
        }
    }

    pub fn as_u64(&self) -> Result<u64, ValueError> {
        match self {
            Value::U64(n) => Ok(*n),
            _ => Err(self.wrong_shape("as_u64")),
        }
    }

    pub fn as_f32(&self) -> Result<f32, ValueError> {
        match self {
            Value::F32(n) => Ok(*n),
            _ => Err(self.wrong_shape("as_f32")),
        }
    }

    pub fn as_f64(&self) -> Result<f64, ValueError> {
        match self {
            Value::F64(n) => Ok(*n),
            _ => Err(self.wrong_shape("as_f64")),
        }
    }

    pub fn as_str(&self) -> Result<&str, ValueError> {
        match self {
            Value::Str(s) => Ok(s),
            _ => Err(self.wrong_shape("as_str")),
        }
    }

    pub fn as_list(&self) -> Result<&Vec<Value>, ValueError> {
        match self {
            Value::List(v) => Ok(v),
            _ => Err(self.wrong_shape("as_list")),
        }
    }

    pub fn as_list_mut(&mut self) -> Result<&mut Vec<Value>, ValueError> {
        match self {
            Value::List(v) => Ok(v),
            _ => Err(ValueError::mismatch("as_list", self.tag())),
        }
    }

    pub fn as_set(&self) -> Result<&FxHashSet<Value>, ValueError> {
        match self {
            Value::Set(s) => Ok(s),
            _ => Err(self.wrong_shape("as_set")),
        }
    }

    pub fn as_ord_set(&self) -> Result<&BTreeSet<Value>, ValueError> {
        match self {
            Value::OrdSet(s) => Ok(s),
            _ => Err(self.wrong_shape("as_ord_set")),
        }
    }

    pub fn as_map(&self) -> Result<&FxHashMap<String, Value>, ValueError> {
        match self {
            Value::Map(m) => Ok(m),
            _ => Err(self.wrong_shape("as_map")),
        }
    }

    pub fn as_map_mut(&mut self) -> Result<&mut FxHashMap<String, Value>, ValueError> {
        match self {
            Value::Map(m) => Ok(m),
            _ => Err(ValueError::mismatch("as_map", self.tag())),
        }
    }

    pub fn as_ord_map(&self) -> Result<&BTreeMap<String, Value>, ValueError> {
        match self {
            Value::OrdMap(m) => Ok(m),
            _ => Err(self.wrong_shape("as_ord_map")),
        }
    }

    /// Checked graph accessor; clones the shared handle.
    pub fn as_graph(&self) -> Result<GraphHandle, ValueError> {
        match self {
            Value::Graph(h) => Ok(h.clone()),
            _ => Err(self.wrong_shape("as_graph")),
        }
    }

    /// Unchecked-style accessor for hot paths: `None` instead of an error.
    pub fn try_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn try_list(&self) -> Option<&Vec<Value>> {
        match self {
            Value::List(v) => Some(v),
            _ => None,
        }
    }
}

// ============================================================================
// Truthiness
// ============================================================================

impl Value {
    /// Dynamic-language truthiness: absence, `false`, numeric zero, and empty
    /// strings/containers are false; a graph is true iff it has at least one
    /// node.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::None => false,
            Value::Bool(b) => *b,
            Value::I32(n) => *n != 0,
            Value::I64(n) => *n != 0,
            Value::U64(n) => *n != 0,
            Value::F32(n) => *n != 0.0,
            Value::F64(n) => *n != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(v) => !v.is_empty(),
            Value::Set(s) => !s.is_empty(),
            Value::OrdSet(s) => !s.is_empty(),
            Value::Map(m) => !m.is_empty(),
            Value::OrdMap(m) => !m.is_empty(),
            Value::Graph(g) => g.node_count().map(|n| n > 0).unwrap_or(false),
        }
    }
}

// ============================================================================
// Display
// ============================================================================

impl Value {
    /// Repr-like form: strings quoted, used for elements inside containers.
    fn fmt_inner(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "'{s}'"),
            other => fmt::Display::fmt(other, f),
        }
    }

    /// Recursive, indentation-aware string form for nested containers.
    pub fn pretty(&self) -> String {
        let mut out = String::new();
        self.pretty_into(&mut out, 0);
        out
    }

    fn pretty_into(&self, out: &mut String, indent: usize) {
        let pad = "  ".repeat(indent);
        let child = "  ".repeat(indent + 1);
        match self {
            Value::List(items) if !items.is_empty() => {
                out.push_str("[\n");
                for item in items {
                    out.push_str(&child);
                    item.pretty_into(out, indent + 1);
                    out.push_str(",\n");
                }
                out.push_str(&pad);
                out.push(']');
            }
            Value::Set(s) if !s.is_empty() => {
                pretty_elems(out, s.iter(), indent, &pad, &child);
            }
            Value::OrdSet(s) if !s.is_empty() => {
                pretty_elems(out, s.iter(), indent, &pad, &child);
            }
            Value::Map(m) if !m.is_empty() => {
                pretty_pairs(out, m.iter(), indent, &pad, &child);
            }
            Value::OrdMap(m) if !m.is_empty() => {
                pretty_pairs(out, m.iter(), indent, &pad, &child);
            }
            Value::Str(s) => {
                out.push('\'');
                out.push_str(s);
                out.push('\'');
            }
            other => {
                out.push_str(&other.to_string());
            }
        }
    }
}

fn pretty_elems<'a>(
    out: &mut String,
    items: impl Iterator<Item = &'a Value>,
    indent: usize,
    pad: &str,
    child: &str,
) {
    out.push_str("{\n");
    for item in items {
        out.push_str(child);
        item.pretty_into(out, indent + 1);
        out.push_str(",\n");
    }
    out.push_str(pad);
    out.push('}');
}

fn pretty_pairs<'a>(
    out: &mut String,
    pairs: impl Iterator<Item = (&'a String, &'a Value)>,
    indent: usize,
    pad: &str,
    child: &str,
) {
    out.push_str("{\n");
    for (k, v) in pairs {
        out.push_str(child);
        out.push('\'');
        out.push_str(k);
        out.push_str("': ");
        v.pretty_into(out, indent + 1);
        out.push_str(",\n");
    }
    out.push_str(pad);
    out.push('}');
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("None"),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::I32(n) => write!(f, "{n}"),
            Value::I64(n) => write!(f, "{n}"),
            Value::U64(n) => write!(f, "{n}"),
            Value::F32(n) => write!(f, "{n}"),
            Value::F64(n) => write!(f, "{n}"),
            Value::Str(s) => f.write_str(s),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    item.fmt_inner(f)?;
                }
                f.write_str("]")
            }
            Value::Set(s) => fmt_set(f, s.iter()),
            Value::OrdSet(s) => fmt_set(f, s.iter()),
            Value::Map(m) => fmt_map(f, m.iter()),
            Value::OrdMap(m) => fmt_map(f, m.iter()),
            // The engine's own printer renders the graph shape.
            Value::Graph(g) => match g.describe() {
                Ok(text) => f.write_str(&text),
                Err(_) => f.write_str("<graph: poisoned>"),
            },
        }
    }
}

fn fmt_set<'a>(
    f: &mut fmt::Formatter<'_>,
    items: impl Iterator<Item = &'a Value>,
) -> fmt::Result {
    f.write_str("{")?;
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        item.fmt_inner(f)?;
    }
    f.write_str("}")
}

fn fmt_map<'a>(
    f: &mut fmt::Formatter<'_>,
    pairs: impl Iterator<Item = (&'a String, &'a Value)>,
) -> fmt::Result {
    f.write_str("{")?;
    for (i, (k, v)) in pairs.enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "'{k}': ")?;
        v.fmt_inner(f)?;
    }
    f.write_str("}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_match_payloads() {
        assert_eq!(Value::from(1).tag(), Tag::I32);
        assert_eq!(Value::from(1i64).tag(), Tag::I64);
        assert_eq!(Value::from("x").tag(), Tag::Str);
        assert_eq!(Value::graph(3).tag(), Tag::Graph);
        assert_eq!(Value::None.tag(), Tag::None);
    }

    #[test]
    fn truthiness_table() {
        assert!(!Value::None.is_truthy());
        assert!(!Value::from(0).is_truthy());
        assert!(!Value::from("").is_truthy());
        assert!(!Value::list([]).is_truthy());
        assert!(Value::from(-1).is_truthy());
        assert!(Value::from("x").is_truthy());
        assert!(!Value::graph(0).is_truthy());
        assert!(Value::graph(1).is_truthy());
    }

    #[test]
    fn checked_accessors_raise_on_mismatch() {
        let v = Value::from(3);
        assert_eq!(v.as_i32().unwrap(), 3);
        assert!(matches!(
            v.as_str(),
            Err(ValueError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn display_forms() {
        let v = Value::list([Value::from(1), Value::from("a"), Value::Bool(true)]);
        assert_eq!(v.to_string(), "[1, 'a', True]");
        let m = Value::ord_map([("a", Value::from(1)), ("b", Value::from("x"))]);
        assert_eq!(m.to_string(), "{'a': 1, 'b': 'x'}");
    }

    #[test]
    fn pretty_indents_nested_containers() {
        let v = Value::list([Value::from(1), Value::list([Value::from(2)])]);
        let text = v.pretty();
        assert!(text.contains("[\n"));
        assert!(text.contains("  1,\n"));
        assert!(text.contains("    2,\n"));
    }

    #[test]
    fn clone_is_deep_for_containers() {
        let original = Value::list([Value::from(1)]);
        let mut copy = original.clone();
        copy.as_list_mut().unwrap().push(Value::from(2));
        assert_eq!(original.as_list().unwrap().len(), 1);
        assert_eq!(copy.as_list().unwrap().len(), 2);
    }
}
