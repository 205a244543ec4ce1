//! Property-based tests for the value core.
//!
//! Covers the laws the evaluator relies on:
//! 1. Cloning never changes rendering, and mutating a clone never changes
//!    the original
//! 2. Embedding whole sequences is indistinguishable from appending their
//!    elements one by one
//! 3. Codepoint counting and indexing agree with `str::chars`
//! 4. Range counts match their iteration

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::float_cmp,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "Proptest inputs are small, exact values"
)]

use proptest::prelude::*;
use scad_value::{format_number, RangeValue, Sequence, Utf8String, Value};

// -- Strategies --

fn leaf_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Undefined),
        any::<bool>().prop_map(Value::from),
        (-1e9f64..1e9).prop_map(Value::from),
        "[a-zß€ ]{0,8}".prop_map(Value::from),
        (-10i32..10, 1i32..4, -10i32..10).prop_map(|(b, s, e)| {
            Value::range(RangeValue::with_step(f64::from(b), f64::from(s), f64::from(e)))
        }),
    ]
}

fn value_strategy() -> impl Strategy<Value = Value> {
    leaf_strategy().prop_recursive(3, 32, 6, |inner| {
        prop::collection::vec(inner, 0..6).prop_map(Value::vector)
    })
}

fn chunks_strategy() -> impl Strategy<Value = Vec<Vec<i32>>> {
    prop::collection::vec(prop::collection::vec(-100i32..100, 0..5), 0..12)
}

fn seq_of(numbers: &[i32]) -> Sequence {
    numbers.iter().map(|&n| Value::from(n)).collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    #[test]
    fn prop_clone_renders_identically(value in value_strategy()) {
        let copy = value.clone();
        prop_assert_eq!(copy.to_string(), value.to_string());
        prop_assert_eq!(copy.to_echo_string(), value.to_echo_string());
    }

    #[test]
    fn prop_mutating_clone_keeps_original(numbers in prop::collection::vec(-50i32..50, 0..10), extra in -50i32..50) {
        let original = seq_of(&numbers);
        let before = Value::Vector(original.clone()).to_string();
        let mut copy = original.clone();
        copy.push(Value::from(extra));
        copy.embed(seq_of(&numbers));
        prop_assert_eq!(Value::Vector(original.clone()).to_string(), before);
        prop_assert_eq!(original.len(), numbers.len());
        prop_assert_eq!(copy.len(), 2 * numbers.len() + 1);
    }

    #[test]
    fn prop_embed_matches_append(chunks in chunks_strategy()) {
        let mut embedded = Sequence::new();
        let mut appended = Sequence::new();
        for chunk in &chunks {
            embedded.embed(seq_of(chunk));
            for &n in chunk {
                appended.push(Value::from(n));
            }
        }
        prop_assert_eq!(embedded.len(), appended.len());
        prop_assert!(embedded.iter().eq(appended.iter()));

        // Random access and an explicit flatten see the same elements.
        for i in 0..appended.len() {
            prop_assert_eq!(embedded.get(i), appended.get(i));
        }
        embedded.flatten();
        prop_assert!(embedded.is_flat());
        prop_assert_eq!(embedded.flat(), appended.flat());
    }

    #[test]
    fn prop_single_element_chain_matches_append(count in 0usize..64) {
        // Each step embeds the sequence built so far into a new one.
        let mut chain = Sequence::new();
        for n in 0..count {
            let mut next = Sequence::new();
            next.embed(chain);
            next.push(Value::from(n as i32));
            chain = next;
        }
        let direct: Sequence = (0..count).map(|n| Value::from(n as i32)).collect();
        prop_assert_eq!(chain.len(), count);
        prop_assert_eq!(&chain, &direct);
        chain.flatten();
        prop_assert_eq!(chain.flat(), direct.flat());
    }

    #[test]
    fn prop_codepoint_indexing(text in "\\PC{0,16}") {
        let s = Utf8String::new(text.as_str());
        prop_assert_eq!(s.char_count(), text.chars().count());
        prop_assert_eq!(s.len(), text.len());

        let value = Value::from(text.as_str());
        for (i, ch) in text.chars().enumerate() {
            prop_assert_eq!(value.index_at(i), Value::from(ch));
        }
        prop_assert_eq!(value.index_at(text.chars().count()), Value::Undefined);
    }

    #[test]
    fn prop_range_count_matches_iteration(begin in -50i32..50, step in 1i32..5, len in 0i32..40) {
        let end = begin + len;
        let range = RangeValue::with_step(f64::from(begin), f64::from(step), f64::from(end));
        let expected = (len / step + 1) as u32;
        prop_assert_eq!(range.num_values(), expected);
        prop_assert_eq!(range.iter().count(), expected as usize);

        let reversed = RangeValue::with_step(f64::from(end), -f64::from(step), f64::from(begin));
        prop_assert_eq!(reversed.num_values(), expected);
        if len > 0 {
            prop_assert_eq!(RangeValue::with_step(f64::from(end), f64::from(step), f64::from(begin)).num_values(), 0);
        }
    }

    #[test]
    fn prop_number_text_is_stable(n in any::<f64>().prop_filter("normal", |n| *n == 0.0 || n.is_normal())) {
        let text = format_number(n);
        let reparsed: f64 = text.parse().unwrap();
        prop_assert_eq!(format_number(reparsed), text);
    }
}
