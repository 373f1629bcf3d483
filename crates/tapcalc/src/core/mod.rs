//! Core calculator engine
//!
//! A single-register calculator driven by key presses: digits build an
//! entry, operators commit it into the accumulator, and any arithmetic
//! failure latches the engine into an error mode until reset.

pub mod engine;
pub mod entry;
mod operations;

pub use engine::Engine;
pub use entry::EntryBuffer;
pub use operations::{BinaryOperator, Constant, Operation, OperationKind, UnaryFunction};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error types
///
/// Arithmetic errors never escape [`Engine::apply`]; they latch the engine
/// and show up as [`Readout::Error`]. Only keypad parsing returns them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Division by zero attempted
    #[error("Division by zero")]
    DivisionByZero,
    /// Argument outside the function's domain
    #[error("Domain error: {0}")]
    DomainError(String),
    /// Entry digits could not be parsed as a number
    #[error("Malformed input: {0}")]
    MalformedInput(String),
    /// Character with no keypad mapping
    #[error("Unknown key: {0:?}")]
    UnknownKey(char),
}

impl CalcError {
    /// Create a domain error
    #[must_use]
    pub fn domain(message: impl Into<String>) -> Self {
        Self::DomainError(message.into())
    }

    /// Create a malformed input error
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput(message.into())
    }
}

/// What the calculator currently shows
///
/// Exactly one of three states; the display formatter turns it into text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum Readout {
    /// The engine is latched in error
    Error,
    /// A number is being typed
    Editing {
        /// Entered digits without the decimal point
        digits: String,
        /// Count of trailing digits after the decimal point, if one was entered
        fraction_digits: Option<usize>,
        /// Leading minus toggled on
        negative: bool,
    },
    /// The committed accumulator
    Value(#[serde(with = "non_finite")] f64),
}

/// Text shown for a value no decimal format can hold
pub(crate) fn non_finite_text(value: f64) -> &'static str {
    if value.is_nan() {
        "NaN"
    } else if value.is_sign_negative() {
        "-∞"
    } else {
        "∞"
    }
}

/// JSON numbers cannot be infinite or NaN; those travel as their display text
mod non_finite {
    use std::fmt;

    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else {
            serializer.serialize_str(super::non_finite_text(*value))
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        deserializer.deserialize_any(FloatVisitor)
    }

    struct FloatVisitor;

    impl<'de> Visitor<'de> for FloatVisitor {
        type Value = f64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a number or one of \"∞\", \"-∞\", \"NaN\"")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
            match v {
                "∞" => Ok(f64::INFINITY),
                "-∞" => Ok(f64::NEG_INFINITY),
                "NaN" => Ok(f64::NAN),
                _ => Err(E::invalid_value(de::Unexpected::Str(v), &self)),
            }
        }
    }
}

impl Readout {
    /// Returns the committed value, if any
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns true for the error state
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }

    /// Returns true while a number is being typed
    #[must_use]
    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing { .. })
    }
}
