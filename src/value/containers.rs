//! Container and string methods on [`Value`].
//!
//! Every method validates the receiver's shape first; a method applied to a
//! shape that lacks it raises [`ValueError::AttributeUnsupported`] rather
//! than `TypeMismatch`, so callers can distinguish "wrong operand" from
//! "wrong receiver". String methods operate byte-wise.

use super::{Tag, Value};
use crate::errors::ValueError;

fn unsupported(shape: Tag, method: &'static str) -> ValueError {
    ValueError::AttributeUnsupported { shape, method }
}

// ============================================================================
// Size & membership
// ============================================================================

impl Value {
    /// Element count (byte length for strings).
    pub fn len(&self) -> Result<usize, ValueError> {
        match self {
            Value::Str(s) => Ok(s.len()),
            Value::List(v) => Ok(v.len()),
            Value::Set(s) => Ok(s.len()),
            Value::OrdSet(s) => Ok(s.len()),
            Value::Map(m) => Ok(m.len()),
            Value::OrdMap(m) => Ok(m.len()),
            other => Err(unsupported(other.tag(), "len")),
        }
    }

    pub fn is_empty(&self) -> Result<bool, ValueError> {
        Ok(self.len()? == 0)
    }

    /// Shape-appropriate membership: substring for strings, key for maps,
    /// element lookup otherwise.
    pub fn contains(&self, needle: &Value) -> Result<bool, ValueError> {
        match self {
            Value::Str(s) => match needle {
                Value::Str(sub) => Ok(s.contains(sub.as_str())),
                _ => Err(ValueError::TypeMismatch {
                    op: "contains",
                    left: Tag::Str,
                    right: needle.tag(),
                }),
            },
            Value::List(v) => Ok(v.contains(needle)),
            Value::Set(s) => Ok(s.contains(needle)),
            Value::OrdSet(s) => Ok(s.contains(needle)),
            Value::Map(m) => match needle {
                Value::Str(k) => Ok(m.contains_key(k)),
                _ => Ok(false),
            },
            Value::OrdMap(m) => match needle {
                Value::Str(k) => Ok(m.contains_key(k)),
                _ => Ok(false),
            },
            other => Err(unsupported(other.tag(), "contains")),
        }
    }

    /// Index of the first matching element in a sequence, `-1` on a miss.
    pub fn index_of(&self, needle: &Value) -> Result<i64, ValueError> {
        match self {
            Value::List(v) => Ok(v
                .iter()
                .position(|x| x == needle)
                .map(|i| i as i64)
                .unwrap_or(-1)),
            other => Err(unsupported(other.tag(), "index_of")),
        }
    }

    /// Number of matching elements in a sequence.
    pub fn count_of(&self, needle: &Value) -> Result<usize, ValueError> {
        match self {
            Value::List(v) => Ok(v.iter().filter(|x| *x == needle).count()),
            other => Err(unsupported(other.tag(), "count_of")),
        }
    }
}

// ============================================================================
// Growth & removal
// ============================================================================

impl Value {
    /// Append to a sequence.
    pub fn append(&mut self, item: Value) -> Result<(), ValueError> {
        match self {
            Value::List(v) => {
                v.push(item);
                Ok(())
            }
            other => Err(unsupported(other.tag(), "append")),
        }
    }

    /// Add to a set. Returns whether the element was new.
    pub fn add(&mut self, item: Value) -> Result<bool, ValueError> {
        match self {
            Value::Set(s) => Ok(s.insert(item)),
            Value::OrdSet(s) => Ok(s.insert(item)),
            other => Err(unsupported(other.tag(), "add")),
        }
    }

    /// Insert into a sequence at a (negative-normalized) position.
    pub fn insert_at(&mut self, index: i64, item: Value) -> Result<(), ValueError> {
        match self {
            Value::List(v) => {
                let len = v.len();
                let pos = normalize_insert_index(index, len);
                v.insert(pos, item);
                Ok(())
            }
            other => Err(unsupported(other.tag(), "insert")),
        }
    }

    /// Absorb another sequence, set, or string (character-wise) into a list.
    pub fn extend(&mut self, other: &Value) -> Result<(), ValueError> {
        let items = other.iter()?.collect::<Vec<_>>();
        match self {
            Value::List(v) => {
                v.extend(items);
                Ok(())
            }
            receiver => Err(unsupported(receiver.tag(), "extend")),
        }
    }

    /// Absorb another set, sequence, or string (character-wise) into a set.
    pub fn update(&mut self, other: &Value) -> Result<(), ValueError> {
        let items = other.iter()?.collect::<Vec<_>>();
        match self {
            Value::Set(s) => {
                s.extend(items);
                Ok(())
            }
            Value::OrdSet(s) => {
                s.extend(items);
                Ok(())
            }
            receiver => Err(unsupported(receiver.tag(), "update")),
        }
    }

    /// Remove the first match from a sequence, the exact element from a set,
    /// or a string key from a map. Returns whether anything was removed.
    pub fn remove(&mut self, item: &Value) -> Result<bool, ValueError> {
        match self {
            Value::List(v) => match v.iter().position(|x| x == item) {
                Some(pos) => {
                    v.remove(pos);
                    Ok(true)
                }
                None => Ok(false),
            },
            Value::Set(s) => Ok(s.remove(item)),
            Value::OrdSet(s) => Ok(s.remove(item)),
            Value::Map(m) => match item {
                Value::Str(k) => Ok(m.remove(k).is_some()),
                _ => Ok(false),
            },
            Value::OrdMap(m) => match item {
                Value::Str(k) => Ok(m.remove(k).is_some()),
                _ => Ok(false),
            },
            other => Err(unsupported(other.tag(), "remove")),
        }
    }

    /// Pop the last element of a sequence.
    pub fn pop(&mut self) -> Result<Value, ValueError> {
        match self {
            Value::List(v) => v.pop().ok_or(ValueError::IndexOutOfRange {
                shape: Tag::List,
                index: -1,
                len: 0,
            }),
            other => Err(unsupported(other.tag(), "pop")),
        }
    }

    /// Pop the element at a (negative-normalized) position.
    pub fn pop_at(&mut self, index: i64) -> Result<Value, ValueError> {
        match self {
            Value::List(v) => {
                let len = v.len();
                let pos = normalize_index(index, len).ok_or(ValueError::IndexOutOfRange {
                    shape: Tag::List,
                    index,
                    len,
                })?;
                Ok(v.remove(pos))
            }
            other => Err(unsupported(other.tag(), "pop")),
        }
    }

    /// Empty the container.
    pub fn clear(&mut self) -> Result<(), ValueError> {
        match self {
            Value::Str(s) => s.clear(),
            Value::List(v) => v.clear(),
            Value::Set(s) => s.clear(),
            Value::OrdSet(s) => s.clear(),
            Value::Map(m) => m.clear(),
            Value::OrdMap(m) => m.clear(),
            other => return Err(unsupported(other.tag(), "clear")),
        }
        Ok(())
    }
}

// ============================================================================
// Indexing & ordering
// ============================================================================

impl Value {
    /// Element at a position; negative indices count from the end.
    pub fn at(&self, index: i64) -> Result<&Value, ValueError> {
        match self {
            Value::List(v) => {
                let pos = normalize_index(index, v.len()).ok_or(ValueError::IndexOutOfRange {
                    shape: Tag::List,
                    index,
                    len: v.len(),
                })?;
                Ok(&v[pos])
            }
            other => Err(unsupported(other.tag(), "at")),
        }
    }

    /// Replace the element at a position.
    pub fn set_at(&mut self, index: i64, item: Value) -> Result<(), ValueError> {
        match self {
            Value::List(v) => {
                let pos = normalize_index(index, v.len()).ok_or(ValueError::IndexOutOfRange {
                    shape: Tag::List,
                    index,
                    len: v.len(),
                })?;
                v[pos] = item;
                Ok(())
            }
            other => Err(unsupported(other.tag(), "set_at")),
        }
    }

    /// Sort a sequence in storage order.
    pub fn sort(&mut self) -> Result<(), ValueError> {
        match self {
            Value::List(v) => {
                v.sort();
                Ok(())
            }
            other => Err(unsupported(other.tag(), "sort")),
        }
    }

    /// Reverse a sequence in place.
    pub fn reverse(&mut self) -> Result<(), ValueError> {
        match self {
            Value::List(v) => {
                v.reverse();
                Ok(())
            }
            other => Err(unsupported(other.tag(), "reverse")),
        }
    }
}

// ============================================================================
// Map access
// ============================================================================

impl Value {
    /// Insert or replace a map entry.
    pub fn map_insert(&mut self, key: impl Into<String>, item: Value) -> Result<(), ValueError> {
        match self {
            Value::Map(m) => {
                m.insert(key.into(), item);
                Ok(())
            }
            Value::OrdMap(m) => {
                m.insert(key.into(), item);
                Ok(())
            }
            other => Err(unsupported(other.tag(), "insert")),
        }
    }

    /// Map lookup.
    pub fn get(&self, key: &str) -> Result<Option<&Value>, ValueError> {
        match self {
            Value::Map(m) => Ok(m.get(key)),
            Value::OrdMap(m) => Ok(m.get(key)),
            other => Err(unsupported(other.tag(), "get")),
        }
    }

    /// Map lookup with a fallback.
    pub fn get_or(&self, key: &str, default: Value) -> Result<Value, ValueError> {
        Ok(self.get(key)?.cloned().unwrap_or(default))
    }

    /// Map keys as a list of strings (sorted for the ordered shape).
    pub fn keys(&self) -> Result<Value, ValueError> {
        match self {
            Value::Map(m) => Ok(Value::list(m.keys().map(|k| Value::Str(k.clone())))),
            Value::OrdMap(m) => Ok(Value::list(m.keys().map(|k| Value::Str(k.clone())))),
            other => Err(unsupported(other.tag(), "keys")),
        }
    }

    /// Map values as a list.
    pub fn values(&self) -> Result<Value, ValueError> {
        match self {
            Value::Map(m) => Ok(Value::list(m.values().cloned())),
            Value::OrdMap(m) => Ok(Value::list(m.values().cloned())),
            other => Err(unsupported(other.tag(), "values")),
        }
    }

    /// Map entries as a list of `[key, value]` pairs.
    pub fn items(&self) -> Result<Value, ValueError> {
        let pair = |k: &String, v: &Value| Value::list([Value::Str(k.clone()), v.clone()]);
        match self {
            Value::Map(m) => Ok(Value::list(m.iter().map(|(k, v)| pair(k, v)))),
            Value::OrdMap(m) => Ok(Value::list(m.iter().map(|(k, v)| pair(k, v)))),
            other => Err(unsupported(other.tag(), "items")),
        }
    }
}

// ============================================================================
// Slicing
// ============================================================================

/// Resolve `[start:stop:step]` bounds the way a scripting language does.
///
/// Returns the concrete index walk. `step == 0` is rejected by the caller.
fn slice_indices(start: Option<i64>, stop: Option<i64>, step: i64, len: usize) -> Vec<usize> {
    let len_i = len as i64;
    let clamp = |idx: i64, low: i64, high: i64| idx.max(low).min(high);
    let norm = |idx: i64, low: i64, high: i64| {
        let idx = if idx < 0 { idx + len_i } else { idx };
        clamp(idx, low, high)
    };

    let mut out = Vec::new();
    if step > 0 {
        let begin = start.map(|s| norm(s, 0, len_i)).unwrap_or(0);
        let end = stop.map(|s| norm(s, 0, len_i)).unwrap_or(len_i);
        let mut i = begin;
        while i < end {
            out.push(i as usize);
            // Extreme steps overflow a plain add; past the far end is done.
            match i.checked_add(step) {
                Some(next) => i = next,
                None => break,
            }
        }
    } else {
        // Omitted bounds run off the front: start defaults to the last
        // element, stop to one before index zero.
        let begin = start.map(|s| norm(s, -1, len_i - 1)).unwrap_or(len_i - 1);
        let end = stop.map(|s| norm(s, -1, len_i - 1)).unwrap_or(-1);
        let mut i = begin;
        while i > end {
            out.push(i as usize);
            match i.checked_add(step) {
                Some(next) => i = next,
                None => break,
            }
        }
    }
    out
}

impl Value {
    /// `slice(start, stop, step)` over a sequence or string.
    ///
    /// Negative indices count from the end; omitted bounds default per step
    /// sign; `step == 0` raises.
    ///
    /// ```
    /// use vargraph::value::Value;
    ///
    /// let v = Value::list([Value::from(3), Value::from(1), Value::from(2)]);
    /// let rev = v.slice(None, None, -1).unwrap();
    /// assert_eq!(rev, Value::list([Value::from(2), Value::from(1), Value::from(3)]));
    /// ```
    pub fn slice(
        &self,
        start: Option<i64>,
        stop: Option<i64>,
        step: i64,
    ) -> Result<Value, ValueError> {
        if step == 0 {
            return Err(ValueError::TypeMismatch {
                op: "slice step 0",
                left: self.tag(),
                right: Tag::I64,
            });
        }
        match self {
            Value::List(v) => {
                let picks = slice_indices(start, stop, step, v.len());
                Ok(Value::List(picks.into_iter().map(|i| v[i].clone()).collect()))
            }
            Value::Str(s) => {
                let bytes = s.as_bytes();
                let picks = slice_indices(start, stop, step, bytes.len());
                let out: Vec<u8> = picks.into_iter().map(|i| bytes[i]).collect();
                Ok(Value::Str(String::from_utf8_lossy(&out).into_owned()))
            }
            other => Err(unsupported(other.tag(), "slice")),
        }
    }
}

/// Normalize a possibly-negative element index; `None` when out of range.
fn normalize_index(index: i64, len: usize) -> Option<usize> {
    let len_i = len as i64;
    let idx = if index < 0 { index + len_i } else { index };
    if idx >= 0 && idx < len_i { Some(idx as usize) } else { None }
}

/// Insertion position: out-of-range indices clamp instead of raising.
fn normalize_insert_index(index: i64, len: usize) -> usize {
    let len_i = len as i64;
    let idx = if index < 0 { index + len_i } else { index };
    idx.clamp(0, len_i) as usize
}

// ============================================================================
// String methods (byte-wise)
// ============================================================================

impl Value {
    fn str_payload(&self, method: &'static str) -> Result<&str, ValueError> {
        match self {
            Value::Str(s) => Ok(s),
            other => Err(unsupported(other.tag(), method)),
        }
    }

    pub fn upper(&self) -> Result<Value, ValueError> {
        Ok(Value::Str(self.str_payload("upper")?.to_ascii_uppercase()))
    }

    pub fn lower(&self) -> Result<Value, ValueError> {
        Ok(Value::Str(self.str_payload("lower")?.to_ascii_lowercase()))
    }

    pub fn strip(&self) -> Result<Value, ValueError> {
        Ok(Value::Str(self.str_payload("strip")?.trim().to_owned()))
    }

    pub fn lstrip(&self) -> Result<Value, ValueError> {
        Ok(Value::Str(self.str_payload("lstrip")?.trim_start().to_owned()))
    }

    pub fn rstrip(&self) -> Result<Value, ValueError> {
        Ok(Value::Str(self.str_payload("rstrip")?.trim_end().to_owned()))
    }

    pub fn replace_str(&self, from: &str, to: &str) -> Result<Value, ValueError> {
        Ok(Value::Str(self.str_payload("replace")?.replace(from, to)))
    }

    /// Byte offset of the first occurrence, `-1` on a miss.
    pub fn find(&self, needle: &str) -> Result<i64, ValueError> {
        Ok(self
            .str_payload("find")?
            .find(needle)
            .map(|i| i as i64)
            .unwrap_or(-1))
    }

    /// Split on a separator into a list of strings.
    pub fn split(&self, sep: &str) -> Result<Value, ValueError> {
        let s = self.str_payload("split")?;
        Ok(Value::list(
            s.split(sep).map(|part| Value::Str(part.to_owned())),
        ))
    }

    /// Join an iterable of strings with this string as the separator.
    pub fn join(&self, parts: &Value) -> Result<Value, ValueError> {
        let sep = self.str_payload("join")?;
        let mut pieces = Vec::new();
        for part in parts.iter()? {
            match part {
                Value::Str(s) => pieces.push(s),
                other => {
                    return Err(ValueError::TypeMismatch {
                        op: "join",
                        left: Tag::Str,
                        right: other.tag(),
                    });
                }
            }
        }
        Ok(Value::Str(pieces.join(sep)))
    }

    pub fn starts_with_str(&self, prefix: &str) -> Result<bool, ValueError> {
        Ok(self.str_payload("starts_with")?.starts_with(prefix))
    }

    pub fn ends_with_str(&self, suffix: &str) -> Result<bool, ValueError> {
        Ok(self.str_payload("ends_with")?.ends_with(suffix))
    }

    pub fn capitalize(&self) -> Result<Value, ValueError> {
        let s = self.str_payload("capitalize")?;
        let mut out = s.to_ascii_lowercase();
        if let Some(first) = out.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        Ok(Value::Str(out))
    }

    pub fn is_digit(&self) -> Result<bool, ValueError> {
        let s = self.str_payload("is_digit")?;
        Ok(!s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()))
    }

    pub fn is_alpha(&self) -> Result<bool, ValueError> {
        let s = self.str_payload("is_alpha")?;
        Ok(!s.is_empty() && s.bytes().all(|b| b.is_ascii_alphabetic()))
    }

    pub fn is_alnum(&self) -> Result<bool, ValueError> {
        let s = self.str_payload("is_alnum")?;
        Ok(!s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric()))
    }

    pub fn is_space(&self) -> Result<bool, ValueError> {
        let s = self.str_payload("is_space")?;
        Ok(!s.is_empty() && s.bytes().all(|b| b.is_ascii_whitespace()))
    }
}
