//! Arithmetic on values.
//!
//! Direct pattern-match dispatch over the operand kinds. Any combination
//! without a defined meaning yields `Value::Undefined`; nothing here
//! fails. Vector arithmetic recurses into elements, so nested vectors
//! combine elementwise at every level.
//!
//! Products that degrade part way through (ragged matrices, non-numeric
//! entries, mismatched dimensions) also report a warning through the
//! caller's [`WarningSink`].

use std::ops;

use scad_stack::ensure_sufficient_stack;

use crate::{Sequence, Value, WarningSink};

impl Value {
    /// Numbers add; vectors add elementwise up to the shorter length.
    pub fn add(&self, rhs: &Value) -> Value {
        match (self, rhs) {
            (Value::Number(a), Value::Number(b)) => Value::Number(a + b),
            (
                Value::Vector(a) | Value::EmbeddedVector(a),
                Value::Vector(b) | Value::EmbeddedVector(b),
            ) => zip_with(a, b, Value::add),
            _ => Value::Undefined,
        }
    }

    /// Numbers subtract; vectors subtract elementwise up to the shorter length.
    pub fn sub(&self, rhs: &Value) -> Value {
        match (self, rhs) {
            (Value::Number(a), Value::Number(b)) => Value::Number(a - b),
            (
                Value::Vector(a) | Value::EmbeddedVector(a),
                Value::Vector(b) | Value::EmbeddedVector(b),
            ) => zip_with(a, b, Value::sub),
            _ => Value::Undefined,
        }
    }

    pub fn neg(&self) -> Value {
        match self {
            Value::Number(n) => Value::Number(-n),
            Value::Vector(items) | Value::EmbeddedVector(items) => map_items(items, Value::neg),
            _ => Value::Undefined,
        }
    }

    /// Product, warning through the log.
    pub fn mul(&self, rhs: &Value) -> Value {
        self.mul_with(rhs, &WarningSink::Log)
    }

    /// Product of numbers, scaled vectors, dot products and matrix
    /// products.
    ///
    /// Two vectors are told apart by their first elements: a number marks
    /// a plain vector, a vector marks a matrix (a vector of rows).
    pub fn mul_with(&self, rhs: &Value, sink: &WarningSink) -> Value {
        match (self, rhs) {
            (Value::Number(a), Value::Number(b)) => Value::Number(a * b),
            (Value::Vector(items) | Value::EmbeddedVector(items), Value::Number(_)) => {
                map_items(items, |item| item.mul_with(rhs, sink))
            }
            (Value::Number(_), Value::Vector(items) | Value::EmbeddedVector(items)) => {
                map_items(items, |item| item.mul_with(self, sink))
            }
            (
                Value::Vector(a) | Value::EmbeddedVector(a),
                Value::Vector(b) | Value::EmbeddedVector(b),
            ) => {
                let (a, b) = (a.flat(), b.flat());
                ensure_sufficient_stack(|| mul_vectors(&a, &b, sink))
            }
            _ => Value::Undefined,
        }
    }

    /// Quotient. A vector divides elementwise by a number, a number
    /// divides by each element; vector by vector is undefined.
    pub fn div(&self, rhs: &Value) -> Value {
        match (self, rhs) {
            (Value::Number(a), Value::Number(b)) => Value::Number(a / b),
            (Value::Vector(items) | Value::EmbeddedVector(items), Value::Number(_)) => {
                map_items(items, |item| item.div(rhs))
            }
            (Value::Number(_), Value::Vector(items) | Value::EmbeddedVector(items)) => {
                map_items(items, |item| self.div(item))
            }
            _ => Value::Undefined,
        }
    }

    /// Floating remainder, truncating toward zero like C's `fmod`.
    pub fn rem(&self, rhs: &Value) -> Value {
        match (self, rhs) {
            (Value::Number(a), Value::Number(b)) => Value::Number(a % b),
            _ => Value::Undefined,
        }
    }
}

fn zip_with(a: &Sequence, b: &Sequence, op: fn(&Value, &Value) -> Value) -> Value {
    ensure_sufficient_stack(|| Value::Vector(a.iter().zip(b).map(|(x, y)| op(&x, &y)).collect()))
}

fn map_items(items: &Sequence, op: impl Fn(&Value) -> Value) -> Value {
    ensure_sufficient_stack(|| Value::Vector(items.iter().map(|item| op(&item)).collect()))
}

/// Short description of an operand's shape for mismatch warnings.
fn shape(items: &[Value]) -> String {
    match items.first() {
        Some(Value::Vector(row)) => format!("{}x{} matrix", items.len(), row.len()),
        _ => format!("vector of {}", items.len()),
    }
}

fn mul_vectors(lhs: &[Value], rhs: &[Value], sink: &WarningSink) -> Value {
    let (Some(first_l), Some(first_r)) = (lhs.first(), rhs.first()) else {
        return Value::Undefined;
    };
    match (first_l, first_r) {
        (Value::Number(_), Value::Number(_)) if lhs.len() == rhs.len() => dot(lhs, rhs, sink),
        (Value::Number(_), Value::Vector(_)) if lhs.len() == rhs.len() => {
            vector_matrix(lhs, rhs, sink)
        }
        (Value::Vector(row), Value::Number(_)) if row.len() == rhs.len() => {
            matrix_vector(lhs, rhs, sink)
        }
        (Value::Vector(row), Value::Vector(_)) if row.len() == rhs.len() => {
            matrix_matrix(lhs, rhs, sink)
        }
        (Value::Number(_) | Value::Vector(_), Value::Number(_) | Value::Vector(_)) => {
            sink.warn(&format!(
                "Cannot multiply {} by {}: dimensions do not match",
                shape(lhs),
                shape(rhs)
            ));
            Value::Undefined
        }
        _ => Value::Undefined,
    }
}

/// Sum of elementwise products of two equal-length vectors.
fn dot(lhs: &[Value], rhs: &[Value], sink: &WarningSink) -> Value {
    let mut sum = 0.0;
    for (i, (a, b)) in lhs.iter().zip(rhs).enumerate() {
        let (Value::Number(a), Value::Number(b)) = (a, b) else {
            sink.warn(&format!(
                "Vector must contain only numbers. Problem at index {i}"
            ));
            return Value::Undefined;
        };
        sum += a * b;
    }
    Value::Number(sum)
}

/// Row vector times matrix: `out[i] = sum_j vector[j] * matrix[j][i]`.
///
/// The column count comes from the first row; every row must match it.
fn vector_matrix(vector: &[Value], matrix: &[Value], sink: &WarningSink) -> Value {
    debug_assert_eq!(vector.len(), matrix.len());
    let columns = match matrix.first() {
        Some(Value::Vector(row)) => row.len(),
        _ => 0,
    };
    let mut out = Sequence::with_capacity(columns);
    for i in 0..columns {
        let mut sum = 0.0;
        for (j, (scale, row)) in vector.iter().zip(matrix).enumerate() {
            let row = match row {
                Value::Vector(row) if row.len() == columns => row.flat(),
                _ => {
                    sink.warn(&format!(
                        "Matrix must be rectangular. Problem at row {j}"
                    ));
                    return Value::Undefined;
                }
            };
            let Value::Number(scale) = scale else {
                sink.warn(&format!(
                    "Vector must contain only numbers. Problem at index {j}"
                ));
                return Value::Undefined;
            };
            let Some(Value::Number(entry)) = row.get(i) else {
                sink.warn(&format!(
                    "Matrix must contain only numbers. Problem at row {j}, col {i}"
                ));
                return Value::Undefined;
            };
            sum += scale * entry;
        }
        out.push(Value::Number(sum));
    }
    Value::Vector(out)
}

/// Matrix times column vector: `out[i] = sum_j matrix[i][j] * vector[j]`.
fn matrix_vector(matrix: &[Value], vector: &[Value], sink: &WarningSink) -> Value {
    let mut out = Sequence::with_capacity(matrix.len());
    for (i, row) in matrix.iter().enumerate() {
        let row = match row {
            Value::Vector(row) if row.len() == vector.len() => row.flat(),
            _ => {
                sink.warn(&format!("Matrix must be rectangular. Problem at row {i}"));
                return Value::Undefined;
            }
        };
        let mut sum = 0.0;
        for (j, (entry, scale)) in row.iter().zip(vector).enumerate() {
            let Value::Number(scale) = scale else {
                sink.warn(&format!(
                    "Vector must contain only numbers. Problem at index {j}"
                ));
                return Value::Undefined;
            };
            let Value::Number(entry) = entry else {
                sink.warn(&format!(
                    "Matrix must contain only numbers. Problem at row {i}, col {j}"
                ));
                return Value::Undefined;
            };
            sum += entry * scale;
        }
        out.push(Value::Number(sum));
    }
    Value::Vector(out)
}

/// Each row of `lhs` times `rhs`. Undefined as soon as one row fails.
fn matrix_matrix(lhs: &[Value], rhs: &[Value], sink: &WarningSink) -> Value {
    let mut out = Sequence::with_capacity(lhs.len());
    for (i, row) in lhs.iter().enumerate() {
        let row = match row {
            Value::Vector(row) if row.len() == rhs.len() => row.flat(),
            _ => {
                sink.warn(&format!("Matrix must be rectangular. Problem at row {i}"));
                return Value::Undefined;
            }
        };
        match vector_matrix(&row, rhs, sink) {
            Value::Undefined => return Value::Undefined,
            product => out.push(product),
        }
    }
    Value::Vector(out)
}

// Operator forms. Multiplication warns through the log.

impl ops::Add for &Value {
    type Output = Value;

    fn add(self, rhs: &Value) -> Value {
        Value::add(self, rhs)
    }
}

impl ops::Sub for &Value {
    type Output = Value;

    fn sub(self, rhs: &Value) -> Value {
        Value::sub(self, rhs)
    }
}

impl ops::Mul for &Value {
    type Output = Value;

    fn mul(self, rhs: &Value) -> Value {
        Value::mul(self, rhs)
    }
}

impl ops::Div for &Value {
    type Output = Value;

    fn div(self, rhs: &Value) -> Value {
        Value::div(self, rhs)
    }
}

impl ops::Rem for &Value {
    type Output = Value;

    fn rem(self, rhs: &Value) -> Value {
        Value::rem(self, rhs)
    }
}

impl ops::Neg for &Value {
    type Output = Value;

    fn neg(self) -> Value {
        Value::neg(self)
    }
}
