//! Canonical number text.
//!
//! Numbers render with [`NUMBER_PRECISION`] significant digits, rounded half
//! away from zero, then lose their trailing fractional zeroes:
//!
//! - `1.0` → `1`, `0.1` → `0.1`, `100000` → `100000`
//! - `1000000` → `1e+6`, `1.5e10` → `1.5e+10`, `0.000001` → `1e-6`
//! - `inf`, `-inf`, `nan` for the non-finite values
//! - `-0` renders as `0`
//!
//! Plain decimal notation is used while the decimal point sits within the
//! significant digits and there are at most [`MAX_LEADING_ZEROES`] zeroes
//! between the point and the first digit; everything else is exponential.

use std::fmt;

/// Significant digits in canonical number text.
pub const NUMBER_PRECISION: usize = 6;

/// Zeroes allowed between the decimal point and the first significant digit.
const MAX_LEADING_ZEROES: i32 = 5;

/// Digits requested from the formatter for the first rounding attempt.
///
/// The standard library rounds exact ties to even; the language rounds them
/// away from zero, so the decision is taken on a longer expansion.
const PROBE_DIGITS: usize = 40;

/// Enough digits to spell out any `f64` exactly; no expansion has more
/// than 767 significant digits.
const EXACT_DIGITS: usize = 767;

/// Format a number as canonical text.
pub fn format_number(value: f64) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_number(&mut out, value);
    out
}

/// Write a number's canonical text into `out`.
pub fn write_number<W: fmt::Write>(out: &mut W, value: f64) -> fmt::Result {
    if value.is_nan() {
        return out.write_str("nan");
    }
    if value.is_infinite() {
        return out.write_str(if value < 0.0 { "-inf" } else { "inf" });
    }

    if value < 0.0 {
        out.write_char('-')?;
    }
    let (digits, point) = significant_digits(value.abs());
    let mut text = if point > NUMBER_PRECISION as i32 || 1 - point > MAX_LEADING_ZEROES {
        exponential(&digits, point - 1)
    } else {
        decimal(&digits, point)
    };
    trim_trailing_zeroes(&mut text);
    out.write_str(&text)
}

/// Round `magnitude` to [`NUMBER_PRECISION`] digits.
///
/// Returns the digits and the position of the decimal point relative to the
/// first digit (`123.0` → `("123000", 3)`, `0.05` → `("500000", -1)`).
fn significant_digits(magnitude: f64) -> (Vec<u8>, i32) {
    let (mut all, mut exponent) = expand(magnitude, PROBE_DIGITS);
    if looks_like_tie(&all) {
        // The probe was rounded once already; only the exact expansion
        // tells a tie from a value just below it.
        (all, exponent) = expand(magnitude, EXACT_DIGITS);
    }
    let mut digits = all[..NUMBER_PRECISION].to_vec();
    let mut point = exponent + 1;

    if magnitude != 0.0 && all[NUMBER_PRECISION] >= b'5' && round_up(&mut digits) {
        point += 1;
    }
    (digits, point)
}

/// Scientific expansion with `precision` digits after the first: the digit
/// string and the decimal exponent.
fn expand(magnitude: f64, precision: usize) -> (Vec<u8>, i32) {
    let text = format!("{magnitude:.precision$e}");
    let (mantissa, exponent) = text.split_once('e').unwrap_or((text.as_str(), "0"));
    let digits = mantissa.bytes().filter(u8::is_ascii_digit).collect();
    (digits, exponent.parse().unwrap_or(0))
}

/// Whether the digits past the kept ones read exactly `5000…0`, the one
/// pattern a rounded expansion cannot decide.
fn looks_like_tie(all: &[u8]) -> bool {
    match all.get(NUMBER_PRECISION..) {
        Some([b'5', rest @ ..]) => rest.iter().all(|&d| d == b'0'),
        _ => false,
    }
}

/// Add one unit in the last place. Returns `true` when the carry spilled
/// out of the leading digit (`999999` → `100000`).
fn round_up(digits: &mut [u8]) -> bool {
    for digit in digits.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            return false;
        }
    }
    if let Some(first) = digits.first_mut() {
        *first = b'1';
    }
    true
}

fn exponential(digits: &[u8], exponent: i32) -> String {
    let mut text = String::with_capacity(digits.len() + 6);
    text.push(char::from(digits[0]));
    if digits.len() > 1 {
        text.push('.');
        text.extend(digits[1..].iter().copied().map(char::from));
    }
    text.push('e');
    text.push(if exponent < 0 { '-' } else { '+' });
    text.push_str(&exponent.unsigned_abs().to_string());
    text
}

fn decimal(digits: &[u8], point: i32) -> String {
    let digit_chars = || digits.iter().copied().map(char::from);
    let mut text = String::with_capacity(digits.len() + 8);
    if point <= 0 {
        text.push_str("0.");
        text.extend(std::iter::repeat('0').take(point.unsigned_abs() as usize));
        text.extend(digit_chars());
    } else {
        let split = (point as usize).min(digits.len());
        text.extend(digit_chars().take(split));
        if split < digits.len() {
            text.push('.');
            text.extend(digit_chars().skip(split));
        }
    }
    text
}

/// Drop trailing zeroes after the decimal point, and the point itself when
/// nothing follows it. An exponent suffix moves left with the cut.
fn trim_trailing_zeroes(text: &mut String) {
    let Some(point) = text.find('.') else {
        return;
    };
    let exponent_at = text.find('e').unwrap_or(text.len());
    let fraction_end = text[..exponent_at].trim_end_matches('0').len();
    let keep = if fraction_end == point + 1 { point } else { fraction_end };
    text.replace_range(keep..exponent_at, "");
}

#[cfg(test)]
mod tests;
