#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;

#[test]
fn test_integers_lose_fraction() {
    assert_eq!(format_number(1.0), "1");
    assert_eq!(format_number(42.0), "42");
    assert_eq!(format_number(-7.0), "-7");
    assert_eq!(format_number(100_000.0), "100000");
}

#[test]
fn test_fractions() {
    assert_eq!(format_number(0.1), "0.1");
    assert_eq!(format_number(0.5), "0.5");
    assert_eq!(format_number(-2.25), "-2.25");
    assert_eq!(format_number(1.0 / 3.0), "0.333333");
    assert_eq!(format_number(3.141_592_653_589_793), "3.14159");
}

#[test]
fn test_zero_has_no_sign() {
    assert_eq!(format_number(0.0), "0");
    assert_eq!(format_number(-0.0), "0");
}

#[test]
fn test_large_values_use_exponent() {
    assert_eq!(format_number(1e20), "1e+20");
    assert_eq!(format_number(1_000_000.0), "1e+6");
    assert_eq!(format_number(1.5e10), "1.5e+10");
    assert_eq!(format_number(123_456_789.0), "1.23457e+8");
    assert_eq!(format_number(-2.5e300), "-2.5e+300");
}

#[test]
fn test_small_values() {
    assert_eq!(format_number(0.00001), "0.00001");
    assert_eq!(format_number(0.000_012_5), "0.0000125");
    assert_eq!(format_number(0.000_001), "1e-6");
    assert_eq!(format_number(1.5e-7), "1.5e-7");
}

#[test]
fn test_non_finite() {
    assert_eq!(format_number(f64::INFINITY), "inf");
    assert_eq!(format_number(f64::NEG_INFINITY), "-inf");
    assert_eq!(format_number(f64::NAN), "nan");
}

#[test]
fn test_exact_ties_round_away_from_zero() {
    // 0.001953125 = 2^-9 is exactly representable.
    assert_eq!(format_number(0.001_953_125), "0.00195313");
    assert_eq!(format_number(1_234_565.0), "1.23457e+6");
    assert_eq!(format_number(-1_234_565.0), "-1.23457e+6");
}

#[test]
fn test_values_just_below_a_tie_round_down() {
    // One ulp under 1234565 is 1234564.99999999976...
    let below = f64::from_bits(1_234_565.0f64.to_bits() - 1);
    assert_eq!(format_number(below), "1.23456e+6");
    assert_eq!(format_number(100_000.5), "100001");
}

#[test]
fn test_long_expansions() {
    assert_eq!(format_number(f64::from_bits(1)), "4.94066e-324");
    assert_eq!(format_number(f64::MIN_POSITIVE), "2.22507e-308");
    assert_eq!(format_number(f64::MAX), "1.79769e+308");
}

#[test]
fn test_tie_detection_needs_exact_tail() {
    assert!(looks_like_tie(b"1234565000"));
    assert!(looks_like_tie(b"1234565"));
    assert!(!looks_like_tie(b"1234564999"));
    assert!(!looks_like_tie(b"1234565001"));
    assert!(!looks_like_tie(b"123456"));
}

#[test]
fn test_exact_expansion_has_no_rounding() {
    let (digits, exponent) = expand(0.1, EXACT_DIGITS);
    assert_eq!(exponent, -1);
    assert!(digits.starts_with(b"1000000000000000055511151231257827"));
    assert!(digits.ends_with(b"000"));
}

#[test]
fn test_carry_moves_decimal_point() {
    assert_eq!(format_number(999_999.5), "1e+6");
    assert_eq!(format_number(9.999_999), "10");
    assert_eq!(format_number(0.099_999_99), "0.1");
}

#[test]
fn test_write_number_appends() {
    let mut out = String::from("x=");
    write_number(&mut out, 2.5).unwrap();
    assert_eq!(out, "x=2.5");
}

#[test]
fn test_formatting_is_stable_under_reparse() {
    for value in [1.0, 0.1, 2.5e-3, 123.456, 1e21, 7.0e-8] {
        let text = format_number(value);
        let reparsed: f64 = text.parse().unwrap();
        assert_eq!(format_number(reparsed), text);
    }
}
