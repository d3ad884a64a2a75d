//! Error types for malformed definitions and structural misuse.
//!
//! Validation failures are not errors: they are recorded on the controller
//! as [`RuleFailure`](crate::validation::RuleFailure) values.

use thiserror::Error;

/// A field definition that cannot be turned into a controller.
#[derive(Debug, Error)]
pub enum DefinitionError {
    /// A length rule was given a negative value.
    #[error("field '{key}': {rule} must not be negative (got {value})")]
    NegativeLength {
        key: String,
        rule: &'static str,
        value: i64,
    },

    /// `minLength` is greater than `maxLength`.
    #[error("field '{key}': minLength {min} is greater than maxLength {max}")]
    ConflictingLengths { key: String, min: usize, max: usize },

    /// `min` is greater than `max`.
    #[error("field '{key}': min {min} is greater than max {max}")]
    ConflictingBounds { key: String, min: f64, max: f64 },

    /// The pattern rule is not a valid regular expression.
    #[error("field '{key}': invalid pattern '{pattern}'")]
    InvalidPattern {
        key: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The custom rule names a predicate that was never registered.
    #[error("field '{key}': unknown custom rule '{name}'")]
    UnknownCustomRule { key: String, name: String },

    /// No component factory is registered for the type tag.
    #[error("field '{key}': unknown component type '{component_type}'")]
    UnknownComponentType { key: String, component_type: String },

    /// Two fields in the same form share a key.
    #[error("duplicate field key '{key}'")]
    DuplicateKey { key: String },

    /// A field was defined without a key.
    #[error("field key must not be empty")]
    EmptyKey,
}

/// Misuse of a controller's structure by the composing code.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StructureError {
    /// An item index outside the repeater's bounds.
    #[error("field '{key}': index {index} is out of range for {len} item(s)")]
    IndexOutOfRange {
        key: String,
        index: usize,
        len: usize,
    },

    /// No field with this key exists in the form.
    #[error("no field with key '{key}'")]
    UnknownField { key: String },

    /// A value of the wrong shape for the field (a list for a single field,
    /// or a scalar for a repeatable one).
    #[error("field '{key}' expects {expected}")]
    ShapeMismatch { key: String, expected: &'static str },
}

impl StructureError {
    /// Creates a new out-of-range error.
    pub fn out_of_range(key: impl Into<String>, index: usize, len: usize) -> Self {
        Self::IndexOutOfRange {
            key: key.into(),
            index,
            len,
        }
    }
}

/// Any error raised by the engine.
#[derive(Debug, Error)]
pub enum FormError {
    #[error(transparent)]
    Definition(#[from] DefinitionError),

    #[error(transparent)]
    Structure(#[from] StructureError),
}

pub type Result<T, E = FormError> = std::result::Result<T, E>;
