//! Numeric views: exactness, overflow and radix-independent equality.

use std::collections::HashSet;
use std::str::FromStr;
use std::sync::Arc;
use std::thread;

use json_tree::{parse, BigDecimal, BigInt, Node, NodeError, NumericValue, Radix};

fn num(text: &str) -> NumericValue {
    NumericValue::from_str(text).unwrap()
}

// ---------------------------------------------------------------------------
// overflow boundaries
// ---------------------------------------------------------------------------

#[test]
fn twenty_nines_overflow_i64_but_not_big_int() {
    let node = parse("99999999999999999999").unwrap();
    let err = node.as_i64().unwrap_err();
    assert!(matches!(err, NodeError::NumericOverflow(ref e) if e.target == "i64"));
    assert_eq!(
        node.as_big_int().unwrap(),
        BigInt::from_str("99999999999999999999").unwrap()
    );
    assert_eq!(node.as_i128().unwrap(), 99_999_999_999_999_999_999);
}

#[test]
fn signed_boundary_matrix() {
    assert_eq!(num("-128").as_i8().unwrap(), i8::MIN);
    assert!(num("-129").as_i8().is_err());
    assert_eq!(num("32767").as_i16().unwrap(), i16::MAX);
    assert!(num("32768").as_i16().is_err());
    assert_eq!(num("-2147483648").as_i32().unwrap(), i32::MIN);
    assert!(num("2147483648").as_i32().is_err());
    assert_eq!(num("9223372036854775807").as_i64().unwrap(), i64::MAX);
    assert_eq!(num("-9223372036854775808").as_i64().unwrap(), i64::MIN);
    assert!(num("9223372036854775808").as_i64().is_err());
    assert_eq!(num("-0x8000000000000000").as_i64().unwrap(), i64::MIN);
    assert!(num("0x8000000000000000").as_i64().is_err());
}

#[test]
fn unsigned_boundary_matrix() {
    assert_eq!(num("255").as_u8().unwrap(), u8::MAX);
    assert!(num("256").as_u8().is_err());
    assert!(num("-1").as_u8().is_err());
    assert_eq!(num("0xFFFF").as_u16().unwrap(), u16::MAX);
    assert_eq!(num("0b11111111111111111111111111111111").as_u32().unwrap(), u32::MAX);
    assert_eq!(num("18446744073709551615").as_u64().unwrap(), u64::MAX);
    assert!(num("18446744073709551616").as_u64().is_err());
    assert!(num("-0").as_u64().is_ok());
}

#[test]
fn fractions_do_not_fit_fixed_width() {
    for text in ["0.5", "-1.25", "1e-1", "123.000001"] {
        assert!(num(text).as_i64().is_err(), "{text}");
        assert!(!num(text).is_integral(), "{text}");
    }
    for (text, value) in [("1.0", 1), ("12e1", 120), ("1500e-2", 15), ("-0.0", 0)] {
        assert_eq!(num(text).as_i64().unwrap(), value, "{text}");
        assert!(num(text).is_integral(), "{text}");
    }
}

#[test]
fn overflow_error_names_literal_and_target() {
    let err = num("0x1FF").as_u8().unwrap_err();
    assert_eq!(err.to_string(), "number `0x1FF` does not fit in u8");
}

// ---------------------------------------------------------------------------
// arbitrary precision
// ---------------------------------------------------------------------------

#[test]
fn big_int_truncates_toward_zero() {
    assert_eq!(num("2.9").as_big_int(), BigInt::from(2));
    assert_eq!(num("-2.9").as_big_int(), BigInt::from(-2));
    assert_eq!(num("-0b1000").as_big_int(), BigInt::from(-8));
    assert_eq!(
        num("1e30").as_big_int(),
        BigInt::from_str("1000000000000000000000000000000").unwrap()
    );
}

#[test]
fn big_decimal_is_exact() {
    let value = num("3.14159265358979323846264338327950288419716939937510");
    let decimal = value.as_big_decimal();
    assert_eq!(decimal.as_bigint_and_exponent().1, 50);
    assert_eq!(
        NumericValue::from(decimal).literal(),
        "3.14159265358979323846264338327950288419716939937510"
    );
    assert_eq!(num("0x10").as_big_decimal(), BigDecimal::from(16i64));
    assert_eq!(
        BigDecimal::from_str("1.50").unwrap(),
        BigDecimal::from_str("15e-1").unwrap()
    );
}

#[test]
fn extreme_exponents_stay_bounded() {
    let huge = num("1e100000");
    assert_eq!(huge.as_big_int().to_string().len(), 100_001);
    assert!(huge.is_integral());
    assert_eq!(huge.as_u128().unwrap_err().target, "u128");
    assert!(huge.as_i128().is_err());
    assert_eq!(huge.as_f64(), f64::INFINITY);

    let tiny = num("1e-100000");
    assert_eq!(tiny.as_big_int(), BigInt::from(0));
    assert!(!tiny.is_integral());
    assert!(tiny.as_u128().is_err());
    assert_eq!(tiny.as_f64(), 0.0);
    assert!(tiny > num("0") && tiny < huge);

    assert_eq!(num("-12.5e-100000").as_big_int(), BigInt::from(0));
    assert_eq!(num("1.5e1").as_u128().unwrap(), 15);
    assert_eq!(num("0.25e2").as_u128().unwrap(), 25);
}

#[test]
fn exponents_beyond_the_limit_do_not_parse() {
    for text in ["1e100001", "1e999999999", "1e-999999999"] {
        assert!(NumericValue::from_str(text).is_err(), "{text}");
        assert!(parse(text).is_err(), "{text}");
    }
}

// ---------------------------------------------------------------------------
// floating point
// ---------------------------------------------------------------------------

#[test]
fn float_views_are_nearest_and_never_fail() {
    assert_eq!(num("0.1").as_f64(), 0.1);
    assert_eq!(num("-0x10").as_f64(), -16.0);
    assert_eq!(num("1e400").as_f64(), f64::INFINITY);
    assert_eq!(num("-1e400").as_f64(), f64::NEG_INFINITY);
    assert_eq!(num("1e-400").as_f64(), 0.0);
    assert_eq!(num("3.4028236e38").as_f32(), f32::INFINITY);
    assert_eq!(num("99999999999999999999").as_f64(), 1e20);
}

// ---------------------------------------------------------------------------
// equality
// ---------------------------------------------------------------------------

#[test]
fn hex_sixteen_equals_decimal_sixteen() {
    assert_eq!(parse("0x10").unwrap(), parse("16").unwrap());
    assert_eq!(parse("[0x10]").unwrap(), parse("[16]").unwrap());
}

#[test]
fn equal_value_matrix() {
    let groups = [
        &["16", "0x10", "0o20", "0b10000", "16.0", "1.6e1", "160e-1"][..],
        &["0", "-0", "0x0", "0.000", "0e10"][..],
        &["-255", "-0xff", "-0o377", "-2.55e2"][..],
    ];
    for group in groups {
        for a in group {
            for b in group {
                assert_eq!(num(a), num(b), "{a} vs {b}");
            }
        }
    }
    assert_ne!(num("0.1"), num("0.1000000000000000055511151231257827"));
    assert_ne!(num("1e-400"), num("0"));
}

#[test]
fn hash_agrees_with_equality() {
    let set: HashSet<NumericValue> = ["16", "0x10", "16.00", "1.6e1", "17"]
        .iter()
        .map(|t| num(t))
        .collect();
    assert_eq!(set.len(), 2);
}

#[test]
fn ordering_is_numeric() {
    let mut values: Vec<NumericValue> = ["1e2", "-0x10", "3.5", "0b1", "-20", "99.99"]
        .iter()
        .map(|t| num(t))
        .collect();
    values.sort();
    let literals: Vec<&str> = values.iter().map(NumericValue::literal).collect();
    assert_eq!(literals, ["-20", "-0x10", "0b1", "3.5", "99.99", "1e2"]);
}

// ---------------------------------------------------------------------------
// construction and memoization
// ---------------------------------------------------------------------------

#[test]
fn constructors_produce_parseable_literals() {
    let values = [
        NumericValue::from(i64::MIN),
        NumericValue::from(u128::MAX),
        NumericValue::from(BigInt::from_str("-123456789012345678901234567890").unwrap()),
        NumericValue::from(BigDecimal::from_str("-0.000125").unwrap()),
        NumericValue::from_f64(1e300).unwrap(),
        NumericValue::from_f64(-2.5e-300).unwrap(),
        NumericValue::from_f32(0.1).unwrap(),
    ];
    for value in values {
        let reparsed = num(value.literal());
        assert_eq!(reparsed, value, "{}", value.literal());
        assert_eq!(reparsed.radix(), Radix::Decimal);
    }
}

#[test]
fn concurrent_first_access_agrees() {
    let value = Arc::new(num("0x7FFFFFFFFFFFFFFFFFFF"));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let value = Arc::clone(&value);
            thread::spawn(move || (value.as_big_int(), value.as_f64(), value.as_i128().ok()))
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(results.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(results[0].2, Some(0x7FFF_FFFF_FFFF_FFFF_FFFF));
}

#[test]
fn sign_and_zero_queries() {
    assert_eq!(num("-0x1").signum(), -1);
    assert_eq!(num("0.0").signum(), 0);
    assert!(num("-0.0").is_zero());
    assert_eq!(num("1e-9").signum(), 1);
    assert_eq!(Node::ZERO.as_number().unwrap().signum(), 0);
}
