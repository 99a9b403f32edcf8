//! Uniform iteration over container shapes.
//!
//! [`ValueIter`] is a closed union over each container's native iterator plus
//! a one-character string iterator. Map iteration yields **keys**, matching
//! the scripting convention the value core mimics; use
//! [`Value::items`](crate::value::Value::items) for pairs.

use std::collections::{btree_map, btree_set};
use std::str::Chars;

use rustc_hash::FxHashMap;
use rustc_hash::FxHashSet;

use super::Value;
use crate::errors::ValueError;

/// Iterator over the elements of any iterable [`Value`] shape.
///
/// Yields owned values: container elements are cloned, map keys become
/// string values, and string iteration produces one-character strings.
pub enum ValueIter<'a> {
    List(std::slice::Iter<'a, Value>),
    Set(<&'a FxHashSet<Value> as IntoIterator>::IntoIter),
    OrdSet(btree_set::Iter<'a, Value>),
    MapKeys(<&'a FxHashMap<String, Value> as IntoIterator>::IntoIter),
    OrdMapKeys(btree_map::Keys<'a, String, Value>),
    Chars(Chars<'a>),
}

impl Iterator for ValueIter<'_> {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        match self {
            ValueIter::List(it) => it.next().cloned(),
            ValueIter::Set(it) => it.next().cloned(),
            ValueIter::OrdSet(it) => it.next().cloned(),
            ValueIter::MapKeys(it) => it.next().map(|(k, _)| Value::Str(k.clone())),
            ValueIter::OrdMapKeys(it) => it.next().map(|k| Value::Str(k.clone())),
            ValueIter::Chars(it) => it.next().map(|c| Value::Str(c.to_string())),
        }
    }
}

impl Value {
    /// Iterate over an iterable shape; non-iterables raise
    /// [`ValueError::IterationUnsupported`].
    ///
    /// ```
    /// use vargraph::value::Value;
    ///
    /// let m = Value::ord_map([("a", Value::from(1)), ("b", Value::from(2))]);
    /// let keys: Vec<Value> = m.iter().unwrap().collect();
    /// assert_eq!(keys, vec![Value::from("a"), Value::from("b")]);
    /// ```
    pub fn iter(&self) -> Result<ValueIter<'_>, ValueError> {
        match self {
            Value::List(v) => Ok(ValueIter::List(v.iter())),
            Value::Set(s) => Ok(ValueIter::Set(s.iter())),
            Value::OrdSet(s) => Ok(ValueIter::OrdSet(s.iter())),
            Value::Map(m) => Ok(ValueIter::MapKeys(m.iter())),
            Value::OrdMap(m) => Ok(ValueIter::OrdMapKeys(m.keys())),
            Value::Str(s) => Ok(ValueIter::Chars(s.chars())),
            other => Err(ValueError::IterationUnsupported { shape: other.tag() }),
        }
    }
}
