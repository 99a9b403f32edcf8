//! Factory macros for building container-shaped values from literals.

/// Build a list-shaped [`Value`](crate::value::Value); elements are anything
/// `Value: From` accepts.
///
/// ```
/// use vargraph::vlist;
///
/// let v = vlist![1, "two", 3.0];
/// assert_eq!(v.len().unwrap(), 3);
/// ```
#[macro_export]
macro_rules! vlist {
    () => {
        $crate::value::Value::list([])
    };
    ($($item:expr),+ $(,)?) => {
        $crate::value::Value::list([$($crate::value::Value::from($item)),+])
    };
}

/// Build a hash-set-shaped [`Value`](crate::value::Value).
///
/// ```
/// use vargraph::vset;
///
/// let s = vset![1, 2, 2];
/// assert_eq!(s.len().unwrap(), 2);
/// ```
#[macro_export]
macro_rules! vset {
    () => {
        $crate::value::Value::set([])
    };
    ($($item:expr),+ $(,)?) => {
        $crate::value::Value::set([$($crate::value::Value::from($item)),+])
    };
}

/// Build a hash-map-shaped [`Value`](crate::value::Value) from `key => value`
/// pairs.
///
/// ```
/// use vargraph::vmap;
///
/// let m = vmap!{"a" => 1, "b" => "x"};
/// assert!(m.contains(&"a".into()).unwrap());
/// ```
#[macro_export]
macro_rules! vmap {
    () => {
        $crate::value::Value::map(::std::iter::empty::<(::std::string::String, $crate::value::Value)>())
    };
    ($($key:expr => $val:expr),+ $(,)?) => {
        $crate::value::Value::map([$(($key, $crate::value::Value::from($val))),+])
    };
}
