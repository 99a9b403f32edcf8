//! Arithmetic, promotion, and equality behavior of the value core.

use vargraph::errors::ValueError;
use vargraph::value::{BinOp, Tag, Value};

#[test]
fn i32_overflow_raises_but_i64_succeeds() {
    let narrow = Value::from(2_000_000_000);
    assert!(matches!(
        narrow.bin_op(BinOp::Add, &narrow),
        Err(ValueError::ArithmeticOverflow { .. })
    ));

    let wide = Value::from(2_000_000_000i64);
    let sum = wide.bin_op(BinOp::Add, &wide).unwrap();
    assert_eq!(sum, Value::from(4_000_000_000i64));
    assert_eq!(sum.tag(), Tag::I64);
}

#[test]
fn string_repetition_works_in_both_orders() {
    let ab = Value::from("ab");
    let three = Value::from(3);
    assert_eq!(ab.bin_op(BinOp::Mul, &three).unwrap(), Value::from("ababab"));
    assert_eq!(three.bin_op(BinOp::Mul, &ab).unwrap(), Value::from("ababab"));
}

#[test]
fn string_concatenation_and_coercion() {
    let hello = Value::from("hello ");
    assert_eq!(
        hello.bin_op(BinOp::Add, &Value::from("world")).unwrap(),
        Value::from("hello world")
    );
    assert_eq!(
        Value::from("v").bin_op(BinOp::Add, &Value::from(2)).unwrap(),
        Value::from("v2")
    );
    assert!(matches!(
        hello.bin_op(BinOp::Div, &Value::from("x")),
        Err(ValueError::TypeMismatch { .. })
    ));
}

#[test]
fn division_yields_floats_and_checks_zero() {
    assert_eq!(
        Value::from(7).bin_op(BinOp::Div, &Value::from(2)).unwrap(),
        Value::from(3.5)
    );
    assert!(matches!(
        Value::from(7).bin_op(BinOp::Div, &Value::from(0)),
        Err(ValueError::DivisionByZero)
    ));
    assert!(matches!(
        Value::from(7).bin_op(BinOp::Rem, &Value::from(0)),
        Err(ValueError::ModuloByZero)
    ));
}

#[test]
fn min_signed_divided_by_minus_one_overflows() {
    let min = Value::from(i64::MIN);
    assert!(matches!(
        min.bin_op(BinOp::Div, &Value::from(-1i64)),
        Err(ValueError::ArithmeticOverflow { .. })
    ));
}

#[test]
fn modulo_is_truncating() {
    assert_eq!(
        Value::from(-7).bin_op(BinOp::Rem, &Value::from(3)).unwrap(),
        Value::from(-1)
    );
    assert_eq!(
        Value::from(7).bin_op(BinOp::Rem, &Value::from(-3)).unwrap(),
        Value::from(1)
    );
}

#[test]
fn mixed_promotion_narrows_and_escalates() {
    // Small mixed result lands in the narrowest signed shape.
    let v = Value::from(1u64).bin_op(BinOp::Add, &Value::from(2)).unwrap();
    assert_eq!(v.tag(), Tag::I32);

    // Both unsigned stays unsigned.
    let v = Value::from(1u64)
        .bin_op(BinOp::Add, &Value::from(2u64))
        .unwrap();
    assert_eq!(v.tag(), Tag::U64);

    // Unsigned outgrowth escalates to floating instead of raising.
    let v = Value::from(u64::MAX)
        .bin_op(BinOp::Mul, &Value::from(2u64))
        .unwrap();
    assert_eq!(v.tag(), Tag::F64);

    // Floats narrow only when exact.
    let v = Value::from(0.5f64)
        .bin_op(BinOp::Add, &Value::from(1))
        .unwrap();
    assert_eq!(v.tag(), Tag::F32);
    assert_eq!(v, Value::from(1.5));
}

#[test]
fn float_infinity_escalation_raises() {
    let huge = Value::from(f64::MAX);
    assert!(matches!(
        huge.bin_op(BinOp::Mul, &Value::from(2.0)),
        Err(ValueError::ArithmeticOverflow { .. })
    ));
}

#[test]
fn subtraction_of_unsigned_goes_negative() {
    let v = Value::from(3u64)
        .bin_op(BinOp::Sub, &Value::from(5u64))
        .unwrap();
    assert_eq!(v, Value::from(-2));
}

#[test]
fn equality_promotes_numerics_but_not_strings() {
    assert_eq!(Value::from(1), Value::from(1.0));
    assert_eq!(Value::from(1i64), Value::from(1u64));
    assert_ne!(Value::from(1), Value::from("1"));
    assert_ne!(Value::None, Value::from(0));
}

#[test]
fn truthiness_follows_emptiness_and_zero() {
    assert!(!Value::from(0.0).is_truthy());
    assert!(Value::from(0.1).is_truthy());
    assert!(!Value::map::<String, _>([]).is_truthy());
    assert!(Value::set([Value::None]).is_truthy());
}

#[test]
fn none_operand_is_a_type_mismatch() {
    assert!(matches!(
        Value::None.bin_op(BinOp::Add, &Value::from(1)),
        Err(ValueError::TypeMismatch { .. })
    ));
}

#[test]
fn conversions_parse_and_fail_loudly() {
    assert_eq!(Value::from("12").to_i64().unwrap(), 12);
    assert_eq!(Value::from("1.25").to_f64().unwrap(), 1.25);
    assert!(matches!(
        Value::from("twelve").to_i64(),
        Err(ValueError::Conversion { .. })
    ));
    assert_eq!(Value::from(3.9).to_i64().unwrap(), 3);
}
