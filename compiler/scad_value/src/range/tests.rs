#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;

fn r(begin: f64, step: f64, end: f64) -> RangeValue {
    RangeValue::with_step(begin, step, end)
}

#[test]
fn test_num_values_basic() {
    assert_eq!(r(1.0, 1.0, 5.0).num_values(), 5);
    assert_eq!(r(5.0, -1.0, 1.0).num_values(), 5);
    assert_eq!(r(1.0, 0.0, 5.0).num_values(), RANGE_UNBOUNDED);
    assert_eq!(r(1.0, 1.0, 1.0).num_values(), 1);
    assert_eq!(r(5.0, 1.0, 1.0).num_values(), 0);
    assert_eq!(RangeValue::new(0.0, 3.0).num_values(), 4);
}

#[test]
fn test_num_values_special_fields() {
    assert_eq!(r(f64::NAN, 1.0, 5.0).num_values(), 0);
    assert_eq!(r(0.0, f64::NAN, 5.0).num_values(), 0);
    assert_eq!(r(0.0, 1.0, f64::NAN).num_values(), 0);
    assert_eq!(r(0.0, f64::INFINITY, 5.0).num_values(), 1);
    assert_eq!(r(0.0, 1.0, f64::INFINITY).num_values(), RANGE_UNBOUNDED);
    assert_eq!(r(f64::NEG_INFINITY, 1.0, 0.0).num_values(), RANGE_UNBOUNDED);
    // Zero step still honors direction.
    assert_eq!(r(5.0, 0.0, 1.0).num_values(), 0);
    assert_eq!(r(-1e308, 1.0, 1e308).num_values(), RANGE_UNBOUNDED);
}

#[test]
fn test_num_values_fractional_boundary() {
    // 0.1 * 3 is not exactly 0.3; the boundary value must still count.
    assert_eq!(r(0.0, 0.1, 0.3).num_values(), 4);
    assert_eq!(r(0.0, 0.3, 1.0).num_values(), 4);
    assert_eq!(r(0.0, 2.0, 5.0).num_values(), 3);
}

#[test]
fn test_iterates_by_index() {
    let values: Vec<f64> = r(0.0, 0.5, 2.0).iter().collect();
    assert_eq!(values, vec![0.0, 0.5, 1.0, 1.5, 2.0]);

    let down: Vec<f64> = r(3.0, -1.0, 0.0).iter().collect();
    assert_eq!(down, vec![3.0, 2.0, 1.0, 0.0]);
}

#[test]
fn test_iteration_without_drift() {
    let range = r(0.0, 0.1, 100.0);
    let last = range.iter().last().unwrap();
    assert_eq!(last, 0.1 * 1000.0);
    assert_eq!(range.iter().count(), 1001);
}

#[test]
fn test_empty_and_degenerate_iteration() {
    assert_eq!(r(5.0, 1.0, 1.0).iter().next(), None);
    assert_eq!(r(1.0, 0.0, 5.0).iter().next(), None);
    assert_eq!(r(f64::NAN, 1.0, 5.0).iter().next(), None);
    let single: Vec<f64> = r(2.0, 1.0, 2.0).iter().collect();
    assert_eq!(single, vec![2.0]);
}

#[test]
fn test_iterator_equality() {
    let range = r(0.0, 1.0, 3.0);
    let mut a = range.iter();
    let b = range.iter();
    assert!(a == b);
    a.next();
    assert!(a != b);

    let mut exhausted = range.iter();
    for _ in exhausted.by_ref() {}
    assert!(exhausted.is_done());
    assert!(exhausted == RangeIter::end(&range));
    assert!(range.iter() != RangeIter::end(&range));
}

#[test]
fn test_equality_by_count() {
    assert_eq!(r(0.0, 1.0, 3.0), r(0.0, 1.0, 3.5));
    assert_ne!(r(0.0, 1.0, 3.0), r(0.0, 1.0, 4.0));
    assert_ne!(r(0.0, 1.0, 3.0), r(0.0, 2.0, 3.0));
    // All empty ranges are equal.
    assert_eq!(r(5.0, 1.0, 1.0), r(9.0, -1.0, 10.0));
    assert_ne!(r(5.0, 1.0, 1.0), r(1.0, 1.0, 1.0));
}

#[test]
fn test_ordering() {
    let empty = r(5.0, 1.0, 1.0);
    let small = r(0.0, 1.0, 2.0);
    let longer = r(0.0, 1.0, 5.0);
    let later = r(1.0, 1.0, 2.0);
    assert!(empty < small);
    assert!(empty <= empty);
    assert!(!(empty < empty));
    assert!(small < longer);
    assert!(longer < later);
    assert!(later > small);
    assert!(small >= small);
    assert!(r(0.0, 0.5, 2.0) < small);
}

#[test]
fn test_display() {
    assert_eq!(r(0.0, 0.5, 10.0).to_string(), "[0 : 0.5 : 10]");
    assert_eq!(RangeValue::new(-1.0, f64::INFINITY).to_string(), "[-1 : 1 : inf]");
}
