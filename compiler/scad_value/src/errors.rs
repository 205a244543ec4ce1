//! Errors from extracting fixed-size coordinates out of values.
//!
//! Value arithmetic never errors; only the accessors used by geometry
//! consumers report why a value is not a usable point.

use thiserror::Error;

/// Why a value could not be read as a 2D or 3D coordinate.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CoordinateError {
    #[error("expected a vector, found {found}")]
    NotAVector { found: &'static str },
    #[error("expected {expected} components, found {found}")]
    WrongLength { expected: &'static str, found: usize },
    #[error("component {index} is not a number")]
    NotANumber { index: usize },
    #[error("component {index} is not finite")]
    NotFinite { index: usize },
}
