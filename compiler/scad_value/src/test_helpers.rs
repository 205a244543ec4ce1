//! Shorthand constructors shared by the unit tests.

use crate::{Sequence, Value};

pub fn num(n: f64) -> Value {
    Value::Number(n)
}

pub fn seq_of(numbers: &[f64]) -> Sequence {
    numbers.iter().copied().map(Value::Number).collect()
}

pub fn vec_of(numbers: &[f64]) -> Value {
    Value::Vector(seq_of(numbers))
}

pub fn matrix(rows: &[&[f64]]) -> Value {
    Value::Vector(rows.iter().map(|row| vec_of(row)).collect())
}

/// Numbers of a flat numeric sequence, in order.
pub fn numbers(seq: &Sequence) -> Vec<f64> {
    seq.iter()
        .map(|value| match value {
            Value::Number(n) => n,
            other => panic!("expected a number, got {other:?}"),
        })
        .collect()
}
