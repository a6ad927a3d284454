//! Error types for value conversion and keyed lookup.
//!
//! Two channels are kept apart:
//!
//! - [`ConversionError`] is the small `Copy` code returned by the result
//!   channel (`try_get`, `try_coerce`).
//! - [`LookupError`] is produced by bounds-checked object/array access
//!   (`at`, `at_index`).
//!
//! [`Error`] is what the raising entry points (`get`, `get_ref`, `get_to`,
//! `coerce`) return. It wraps a conversion code together with the kind that
//! was found and the type that was requested, and converts from
//! [`LookupError`] so lookups and conversions chain with `?`.

use crate::types::Kind;
use thiserror::Error;

/// Why a value could not be converted to the requested type.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversionError {
    /// The stored kind cannot produce the requested type.
    #[error("type mismatch")]
    TypeMismatch,

    /// The numeric value does not fit the target type, or is not finite.
    #[error("value out of range")]
    OutOfRange,

    /// A floating value with a fractional part was requested as an integer.
    #[error("fractional part would be lost")]
    FractionalLoss,

    /// A string could not be parsed as the requested number.
    #[error("string is not a valid number")]
    ParseError,
}

/// Failure of a bounds-checked object or array lookup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("expected an object, found {found}")]
    NotAnObject { found: Kind },

    #[error("key not found: {key:?}")]
    KeyNotFound { key: String },

    #[error("expected an array, found {found}")]
    NotAnArray { found: Kind },

    #[error("index {index} out of bounds for array of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// Errors returned by the raising accessors.
#[derive(Error, Debug)]
pub enum Error {
    /// The stored value could not be converted to `target`.
    #[error("cannot convert {found} value to {target}: {code}")]
    Conversion {
        code: ConversionError,
        found: Kind,
        target: &'static str,
    },

    /// `coerce` fell back to parsing a string and the string was rejected.
    #[error("cannot parse {input:?} as {target}")]
    Parse { input: String, target: &'static str },

    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// The input string was not valid JSON.
    #[cfg(feature = "serde")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// The conversion code behind this error, if it came from the conversion engine.
    pub fn code(&self) -> Option<ConversionError> {
        match self {
            Error::Conversion { code, .. } => Some(*code),
            Error::Parse { .. } => Some(ConversionError::ParseError),
            _ => None,
        }
    }
}

/// Convenience alias used throughout confval-core.
pub type Result<T> = std::result::Result<T, Error>;
