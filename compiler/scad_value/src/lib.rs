//! SCAD Value - dynamic values for the SCAD expression language.
//!
//! This crate provides:
//! - The `Value` sum type (`Undefined`, `Bool`, `Number`, `String`,
//!   `Vector`, `EmbeddedVector`, `Range`, `Function`)
//! - The value algebra: arithmetic, comparison, indexing and conversion
//!   with the language's type-mismatch fallbacks
//! - `Sequence`, a shared vector with O(1) deferred concatenation
//! - Canonical number formatting (`format_number`)
//! - Warning sinks for degraded results (`WarningSink`)
//!
//! # Ownership
//!
//! Every heap-backed variant is a reference-counted handle, so
//! `Value::clone` is O(1). Shared storage is immutable once published;
//! mutating a `Sequence` copies its backing store first unless the
//! handle is the only owner.
//!
//! # Failure Model
//!
//! Operations on mismatched values yield `Value::Undefined` rather than an
//! error. Degraded results that a script author should hear about are
//! reported through a `WarningSink`; the default sink logs through
//! `tracing`.

mod errors;
mod function;
mod number;
mod range;
mod sequence;
mod text;
mod value;
mod warnings;

#[cfg(test)]
mod test_helpers;

pub use errors::CoordinateError;
pub use function::{Closure, Context, Expression, Parameter};
pub use number::{format_number, write_number, NUMBER_PRECISION};
pub use range::{RangeIter, RangeValue, MAX_RANGE_STEPS, RANGE_UNBOUNDED};
pub use sequence::{flatten_vector, Iter as SequenceIter, Sequence};
pub use text::Utf8String;
pub use value::{Value, ValueType};
pub use warnings::{BufferWarnings, WarningSink};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set. Safe to call more than once.
/// Enable with `RUST_LOG=scad_value=debug` or `RUST_LOG=scad_value=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
