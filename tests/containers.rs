//! Container methods, slicing, iteration, and string methods.

use vargraph::errors::ValueError;
use vargraph::value::{BinOp, Value};
use vargraph::{vlist, vmap, vset};

#[test]
fn append_extend_and_remove() {
    let mut v = vlist![1];
    v.append(Value::from(2)).unwrap();
    v.extend(&vlist![3, 4]).unwrap();
    assert_eq!(v, vlist![1, 2, 3, 4]);

    assert!(v.remove(&Value::from(3)).unwrap());
    assert!(!v.remove(&Value::from(99)).unwrap());
    assert_eq!(v, vlist![1, 2, 4]);

    assert_eq!(v.pop().unwrap(), Value::from(4));
    assert_eq!(v.pop_at(0).unwrap(), Value::from(1));
    assert_eq!(v, vlist![2]);
}

#[test]
fn sets_deduplicate_and_update() {
    let mut s = vset![1, 2];
    assert!(!s.add(Value::from(2)).unwrap());
    assert!(s.add(Value::from(3)).unwrap());
    s.update(&vlist![3, 4]).unwrap();
    assert_eq!(s.len().unwrap(), 4);
}

#[test]
fn ordered_set_iterates_sorted() {
    let s = Value::ord_set([Value::from(3), Value::from(1), Value::from(2)]);
    let collected: Vec<Value> = s.iter().unwrap().collect();
    assert_eq!(collected, vec![Value::from(1), Value::from(2), Value::from(3)]);
}

#[test]
fn slice_reverses_with_negative_step() {
    let v = vlist![3, 1, 2];
    assert_eq!(v.slice(None, None, -1).unwrap(), vlist![2, 1, 3]);
}

#[test]
fn slice_laws_hold_for_simple_cases() {
    let v = vlist![0, 1, 2, 3, 4];
    // Identity slice.
    assert_eq!(v.slice(Some(0), Some(5), 1).unwrap(), v);
    // Concatenation of adjacent slices.
    let left = v.slice(Some(0), Some(2), 1).unwrap();
    let right = v.slice(Some(2), Some(5), 1).unwrap();
    assert_eq!(left.bin_op(BinOp::Add, &right).unwrap(), v);
    // Negative indices count from the end.
    assert_eq!(v.slice(Some(-3), Some(-1), 1).unwrap(), vlist![2, 3]);
}

#[test]
fn slice_steps_and_rejection() {
    let v = vlist![0, 1, 2, 3, 4, 5];
    assert_eq!(v.slice(None, None, 2).unwrap(), vlist![0, 2, 4]);
    assert_eq!(v.slice(Some(4), Some(0), -2).unwrap(), vlist![4, 2]);
    assert!(v.slice(None, None, 0).is_err());
}

#[test]
fn slice_survives_extreme_steps() {
    // A step wider than the index range takes one element and stops.
    let v = vlist![0, 1, 2, 3, 4, 5];
    assert_eq!(v.slice(Some(1), Some(5), i64::MAX).unwrap(), vlist![1]);
    assert_eq!(v.slice(None, None, i64::MAX).unwrap(), vlist![0]);
    assert_eq!(v.slice(None, None, i64::MIN).unwrap(), vlist![5]);
    assert_eq!(v.slice(Some(4), Some(1), i64::MIN).unwrap(), vlist![4]);
}

#[test]
fn membership_is_shape_appropriate() {
    assert!(Value::from("hello").contains(&Value::from("ell")).unwrap());
    assert!(vmap! {"k" => 1}.contains(&Value::from("k")).unwrap());
    assert!(!vmap! {"k" => 1}.contains(&Value::from("z")).unwrap());
    assert!(vset![1, 2].contains(&Value::from(2)).unwrap());
    assert!(vlist![1, 2].contains(&Value::from(1)).unwrap());
}

#[test]
fn map_iteration_yields_keys_not_pairs() {
    let m = Value::ord_map([("a", Value::from(1)), ("b", Value::from(2))]);
    let keys: Vec<Value> = m.iter().unwrap().collect();
    assert_eq!(keys, vec![Value::from("a"), Value::from("b")]);

    let items = m.items().unwrap();
    assert_eq!(
        items,
        vlist![
            Value::list([Value::from("a"), Value::from(1)]),
            Value::list([Value::from("b"), Value::from(2)])
        ]
    );
}

#[test]
fn string_iteration_yields_characters() {
    let chars: Vec<Value> = Value::from("abc").iter().unwrap().collect();
    assert_eq!(chars.len(), 3);
    assert_eq!(chars[0], Value::from("a"));
}

#[test]
fn iteration_reconstruction_roundtrip() {
    let original = vlist![1, "x", 2.5];
    let rebuilt = Value::list(original.iter().unwrap());
    assert_eq!(original, rebuilt);

    let set = vset![1, 2, 3];
    let rebuilt = Value::set(set.iter().unwrap());
    assert_eq!(set, rebuilt);
}

#[test]
fn indexing_normalizes_and_raises() {
    let v = vlist![10, 20, 30];
    assert_eq!(*v.at(-1).unwrap(), Value::from(30));
    assert_eq!(*v.at(0).unwrap(), Value::from(10));
    assert!(matches!(
        v.at(3),
        Err(ValueError::IndexOutOfRange { index: 3, len: 3, .. })
    ));
}

#[test]
fn wrong_shape_methods_raise_attribute_errors() {
    let mut g = Value::graph(1);
    assert!(matches!(
        g.append(Value::from(1)),
        Err(ValueError::AttributeUnsupported { .. })
    ));
    assert!(matches!(
        Value::from(1).keys(),
        Err(ValueError::AttributeUnsupported { .. })
    ));
    assert!(matches!(
        Value::from(1).iter(),
        Err(ValueError::IterationUnsupported { .. })
    ));
}

#[test]
fn string_methods_are_bytewise() {
    let s = Value::from(" Hello ");
    assert_eq!(s.strip().unwrap(), Value::from("Hello"));
    assert_eq!(s.lstrip().unwrap(), Value::from("Hello "));
    assert_eq!(s.rstrip().unwrap(), Value::from(" Hello"));
    assert_eq!(
        Value::from("aXbXc").replace_str("X", "-").unwrap(),
        Value::from("a-b-c")
    );
    assert!(Value::from("abc").starts_with_str("ab").unwrap());
    assert!(Value::from("abc").ends_with_str("bc").unwrap());
    assert!(Value::from("  \t").is_space().unwrap());
    assert!(Value::from("abc123").is_alnum().unwrap());
    assert!(!Value::from("abc 123").is_alnum().unwrap());
}

#[test]
fn sort_uses_storage_order() {
    let mut v = vlist![2.5, 1, 3u64];
    v.sort().unwrap();
    assert_eq!(v, vlist![1, 2.5, 3u64]);
}

#[test]
fn nested_containers_compare_recursively() {
    let a = vmap! {"xs" => vlist![1, 2]};
    let b = vmap! {"xs" => vlist![1, 2]};
    assert_eq!(a, b);

    let c = vmap! {"xs" => vlist![2, 1]};
    assert_ne!(a, c);
}
