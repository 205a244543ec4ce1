//! Runtime values for the SCAD expression language.
//!
//! # Variants
//!
//! Scalars (`Undefined`, `Bool`, `Number`) are stored inline. Everything
//! else is a reference-counted handle, so cloning any `Value` is O(1) and
//! never copies elements.
//!
//! `EmbeddedVector` is a construction detail of [`Sequence`]: it marks a
//! child whose elements are spliced into the parent. Pushing one into a
//! sequence splices it, so it does not surface as an element.
//!
//! # Comparison
//!
//! `PartialEq` follows the language: a `Bool` equals the `Number` 0 or 1,
//! other mixed kinds are unequal, and functions are unequal even to
//! themselves. Ordering between mixed kinds is not an order in Rust's
//! sense, so it is exposed through [`Value::less`] and friends instead of
//! `PartialOrd`.

mod ops;

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use scad_stack::ensure_sufficient_stack;

use crate::number::write_number;
use crate::range::MAX_RANGE_STEPS;
use crate::{Closure, CoordinateError, RangeValue, Sequence, Utf8String, WarningSink};

/// Discriminant of a [`Value`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueType {
    Undefined,
    Bool,
    Number,
    String,
    Vector,
    EmbeddedVector,
    Range,
    Function,
}

/// A runtime value.
#[derive(Clone, Debug, Default)]
pub enum Value {
    /// `undef`: absent or degraded result.
    #[default]
    Undefined,
    Bool(bool),
    Number(f64),
    String(Utf8String),
    Vector(Sequence),
    /// Elements to splice into the enclosing sequence.
    EmbeddedVector(Sequence),
    Range(Rc<RangeValue>),
    Function(Rc<Closure>),
}

// Factory methods

impl Value {
    pub fn number(n: f64) -> Self {
        Value::Number(n)
    }

    pub fn string(s: impl Into<String>) -> Self {
        Value::String(Utf8String::new(s))
    }

    pub fn vector(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Vector(items.into_iter().collect())
    }

    /// A three-component numeric vector.
    pub fn vec3(x: f64, y: f64, z: f64) -> Self {
        Value::vector([Value::Number(x), Value::Number(y), Value::Number(z)])
    }

    pub fn range(range: RangeValue) -> Self {
        Value::Range(Rc::new(range))
    }

    pub fn function(closure: Closure) -> Self {
        Value::Function(Rc::new(closure))
    }
}

// Type inspection and conversion

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Undefined => ValueType::Undefined,
            Value::Bool(_) => ValueType::Bool,
            Value::Number(_) => ValueType::Number,
            Value::String(_) => ValueType::String,
            Value::Vector(_) => ValueType::Vector,
            Value::EmbeddedVector(_) => ValueType::EmbeddedVector,
            Value::Range(_) => ValueType::Range,
            Value::Function(_) => ValueType::Function,
        }
    }

    /// Name used in messages to script authors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Vector(_) | Value::EmbeddedVector(_) => "vector",
            Value::Range(_) => "range",
            Value::Function(_) => "function",
        }
    }

    pub fn is_defined(&self) -> bool {
        !self.is_undefined()
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Truthiness: zero, empty strings and vectors, `undef` and functions
    /// are false. Every range is true.
    pub fn to_bool(&self) -> bool {
        match self {
            Value::Undefined | Value::Function(_) => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::Vector(seq) | Value::EmbeddedVector(seq) => !seq.is_empty(),
            Value::Range(_) => true,
        }
    }

    /// The number, or 0 for any other kind.
    pub fn to_double(&self) -> f64 {
        self.get_double().unwrap_or(0.0)
    }

    pub fn get_double(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The number if it is neither NaN nor infinite.
    pub fn get_finite_double(&self) -> Option<f64> {
        self.get_double().filter(|n| n.is_finite())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Value::Vector(seq) | Value::EmbeddedVector(seq) => Some(seq),
            _ => None,
        }
    }

    pub fn as_range(&self) -> Option<&RangeValue> {
        match self {
            Value::Range(range) => Some(range),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Closure> {
        match self {
            Value::Function(closure) => Some(closure),
            _ => None,
        }
    }

    /// Each codepoint of a string as its own string value; empty for
    /// other kinds.
    pub fn split_chars(&self) -> Vec<Value> {
        match self {
            Value::String(s) => s.chars().map(Value::String).collect(),
            _ => Vec::new(),
        }
    }
}

// Text

impl Value {
    /// Like `to_string`, but a top-level string keeps its quotes.
    pub fn to_echo_string(&self) -> String {
        match self {
            Value::String(s) => format!("\"{s}\""),
            other => other.to_string(),
        }
    }

    /// Like `to_echo_string`, with string contents escaped.
    pub fn to_quoted_string(&self) -> String {
        let Value::String(s) = self else {
            return self.to_string();
        };
        let mut out = String::with_capacity(s.len() + 2);
        out.push('"');
        for ch in s.as_str().chars() {
            match ch {
                '\t' => out.push_str("\\t"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '"' => out.push_str("\\\""),
                '\\' => out.push_str("\\\\"),
                ch => out.push(ch),
            }
        }
        out.push('"');
        out
    }

    /// Interpret numbers as codepoints, warning through the log.
    pub fn chr_string(&self) -> String {
        self.chr_string_with(&WarningSink::Log)
    }

    /// Interpret numbers as codepoints.
    ///
    /// A positive number names one codepoint (fraction truncated); zero
    /// and invalid codepoints give nothing. Vectors and ranges concatenate
    /// their elements. A range of [`MAX_RANGE_STEPS`] or more values is
    /// refused with a warning. Other kinds give the empty string.
    pub fn chr_string_with(&self, sink: &WarningSink) -> String {
        let mut out = String::new();
        self.push_chr(&mut out, sink);
        out
    }

    fn push_chr(&self, out: &mut String, sink: &WarningSink) {
        match self {
            Value::Number(n) => push_codepoint(out, *n),
            Value::Vector(seq) | Value::EmbeddedVector(seq) => ensure_sufficient_stack(|| {
                for item in seq {
                    item.push_chr(out, sink);
                }
            }),
            Value::Range(range) => {
                let steps = range.num_values();
                if steps >= MAX_RANGE_STEPS {
                    sink.warn(&format!(
                        "Bad range parameter in for statement: too many elements ({steps})."
                    ));
                    return;
                }
                for n in range.iter() {
                    push_codepoint(out, n);
                }
            }
            Value::Undefined | Value::Bool(_) | Value::String(_) | Value::Function(_) => {}
        }
    }

    fn write_to(&self, f: &mut fmt::Formatter<'_>, quote_strings: bool) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undef"),
            Value::Bool(b) => f.write_str(if *b { "true" } else { "false" }),
            Value::Number(n) => write_number(f, *n),
            Value::String(s) if quote_strings => write!(f, "\"{s}\""),
            Value::String(s) => f.write_str(s.as_str()),
            Value::Vector(seq) | Value::EmbeddedVector(seq) => ensure_sufficient_stack(|| {
                f.write_str("[")?;
                for (i, item) in seq.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    item.write_to(f, true)?;
                }
                f.write_str("]")
            }),
            Value::Range(range) => write!(f, "{range}"),
            Value::Function(closure) => write!(f, "{closure}"),
        }
    }
}

fn push_codepoint(out: &mut String, n: f64) {
    if n <= 0.0 || n.is_nan() {
        return;
    }
    // Saturating cast; anything past the Unicode range is rejected below.
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "positive and saturating; fraction dropped on purpose"
    )]
    let code = n as u32;
    if let Some(ch) = char::from_u32(code).filter(|&ch| ch != '\0') {
        out.push(ch);
    }
}

impl fmt::Display for Value {
    /// Element strings inside vectors are quoted; a top-level string is not.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f, false)
    }
}

// Indexing

/// Saturating index conversion: truncates in-range numbers, maps NaN,
/// infinities, negatives and overflow to `u32::MAX`.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "range checked before the cast"
)]
fn index_from_number(n: f64) -> u32 {
    if n.is_finite() && n > -1.0 && n < 4_294_967_296.0 {
        n as u32
    } else {
        u32::MAX
    }
}

impl Value {
    /// `self[index]`. Only numeric indices select anything.
    ///
    /// Strings index by codepoint, vectors by element, and ranges expose
    /// begin, step and end at 0, 1 and 2. Everything else is `undef`.
    pub fn index(&self, index: &Value) -> Value {
        match index {
            Value::Number(n) => self.index_u32(index_from_number(*n)),
            _ => Value::Undefined,
        }
    }

    pub fn index_at(&self, index: usize) -> Value {
        self.index_u32(u32::try_from(index).unwrap_or(u32::MAX))
    }

    fn index_u32(&self, index: u32) -> Value {
        let Ok(i) = usize::try_from(index) else {
            return Value::Undefined;
        };
        match self {
            Value::String(s) => s.char_at(i).map_or(Value::Undefined, Value::string),
            Value::Vector(seq) | Value::EmbeddedVector(seq) => {
                seq.get(i).unwrap_or_default()
            }
            Value::Range(range) => match index {
                0 => Value::Number(range.begin_value()),
                1 => Value::Number(range.step_value()),
                2 => Value::Number(range.end_value()),
                _ => Value::Undefined,
            },
            _ => Value::Undefined,
        }
    }
}

// Comparison

#[derive(Clone, Copy, Debug)]
enum Relation {
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

impl Relation {
    /// Unordered pairs satisfy no relation.
    fn holds(self, ordering: Option<Ordering>) -> bool {
        let Some(ordering) = ordering else {
            return false;
        };
        match self {
            Relation::Less => ordering.is_lt(),
            Relation::LessEqual => ordering.is_le(),
            Relation::Greater => ordering.is_gt(),
            Relation::GreaterEqual => ordering.is_ge(),
        }
    }
}

fn bool_as_number(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

impl Value {
    pub fn less(&self, other: &Value) -> bool {
        self.relate(other, Relation::Less)
    }

    pub fn less_equal(&self, other: &Value) -> bool {
        self.relate(other, Relation::LessEqual)
    }

    pub fn greater(&self, other: &Value) -> bool {
        self.relate(other, Relation::Greater)
    }

    pub fn greater_equal(&self, other: &Value) -> bool {
        self.relate(other, Relation::GreaterEqual)
    }

    fn relate(&self, other: &Value, relation: Relation) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => {
                matches!(relation, Relation::LessEqual | Relation::GreaterEqual)
            }
            (Value::Bool(a), Value::Bool(b)) => relation.holds(Some(a.cmp(b))),
            (Value::Number(a), Value::Number(b)) => relation.holds(a.partial_cmp(b)),
            (Value::Bool(a), Value::Number(b)) => relation.holds(bool_as_number(*a).partial_cmp(b)),
            (Value::Number(a), Value::Bool(b)) => relation.holds(a.partial_cmp(&bool_as_number(*b))),
            (Value::String(a), Value::String(b)) => relation.holds(Some(a.cmp(b))),
            (
                Value::Vector(a) | Value::EmbeddedVector(a),
                Value::Vector(b) | Value::EmbeddedVector(b),
            ) => ensure_sufficient_stack(|| match relation {
                Relation::Less => a.less(b),
                Relation::LessEqual => !b.less(a),
                Relation::Greater => b.less(a),
                Relation::GreaterEqual => !a.less(b),
            }),
            (Value::Range(a), Value::Range(b)) => relation.holds(a.partial_cmp(b)),
            (Value::Function(a), Value::Function(b)) => relation.holds(a.partial_cmp(b)),
            _ => false,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Bool(a), Value::Number(b)) => bool_as_number(*a) == *b,
            (Value::Number(a), Value::Bool(b)) => *a == bool_as_number(*b),
            (Value::String(a), Value::String(b)) => a == b,
            (
                Value::Vector(a) | Value::EmbeddedVector(a),
                Value::Vector(b) | Value::EmbeddedVector(b),
            ) => ensure_sufficient_stack(|| a == b),
            (Value::Range(a), Value::Range(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a == b,
            _ => false,
        }
    }
}

// Coordinates

impl Value {
    fn coordinates(&self) -> Result<Rc<Vec<Value>>, CoordinateError> {
        match self {
            Value::Vector(seq) | Value::EmbeddedVector(seq) => Ok(seq.flat()),
            other => Err(CoordinateError::NotAVector {
                found: other.type_name(),
            }),
        }
    }

    /// `[x, y]` as numbers. With `finite_only`, NaN and infinities are
    /// rejected too.
    pub fn to_vec2(&self, finite_only: bool) -> Result<[f64; 2], CoordinateError> {
        let items = self.coordinates()?;
        let [x, y] = items.as_slice() else {
            return Err(CoordinateError::WrongLength {
                expected: "2",
                found: items.len(),
            });
        };
        Ok([
            component(x, 0, finite_only)?,
            component(y, 1, finite_only)?,
        ])
    }

    /// `[x, y, z]` as numbers.
    pub fn to_vec3(&self) -> Result<[f64; 3], CoordinateError> {
        let items = self.coordinates()?;
        let [x, y, z] = items.as_slice() else {
            return Err(CoordinateError::WrongLength {
                expected: "3",
                found: items.len(),
            });
        };
        Ok([
            component(x, 0, false)?,
            component(y, 1, false)?,
            component(z, 2, false)?,
        ])
    }

    /// `[x, y, z]`, or `[x, y]` with `default_z` as the third component.
    pub fn to_vec3_or(&self, default_z: f64) -> Result<[f64; 3], CoordinateError> {
        let items = self.coordinates()?;
        match items.as_slice() {
            [x, y] => Ok([
                component(x, 0, false)?,
                component(y, 1, false)?,
                default_z,
            ]),
            [_, _, _] => self.to_vec3(),
            _ => Err(CoordinateError::WrongLength {
                expected: "2 or 3",
                found: items.len(),
            }),
        }
    }
}

fn component(value: &Value, index: usize, finite_only: bool) -> Result<f64, CoordinateError> {
    let n = value
        .get_double()
        .ok_or(CoordinateError::NotANumber { index })?;
    if finite_only && !n.is_finite() {
        return Err(CoordinateError::NotFinite { index });
    }
    Ok(n)
}

// Conversions

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<char> for Value {
    fn from(ch: char) -> Self {
        Value::string(ch.to_string())
    }
}

impl From<Utf8String> for Value {
    fn from(s: Utf8String) -> Self {
        Value::String(s)
    }
}

impl From<Sequence> for Value {
    fn from(seq: Sequence) -> Self {
        Value::Vector(seq)
    }
}

impl From<RangeValue> for Value {
    fn from(range: RangeValue) -> Self {
        Value::range(range)
    }
}

impl From<Closure> for Value {
    fn from(closure: Closure) -> Self {
        Value::function(closure)
    }
}
