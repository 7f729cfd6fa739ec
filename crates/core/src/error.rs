//! Error model: domain failures and per-field validation errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Domain-level error.
///
/// Keep this focused on deterministic failures (malformed input, broken
/// invariants). Field validation is *not* reported through this type; see
/// [`FieldError`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. an unknown job title).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant was violated (e.g. an employee slot outside the
    /// declared count).
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }
}

/// Category tag of a field validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    /// The field is mandatory and was left empty.
    Required,
    /// The value does not have the expected shape (e.g. email).
    Format,
    /// The value is not a number in the accepted range.
    Range,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Required => "required",
            ErrorKind::Format => "format",
            ErrorKind::Range => "range",
        }
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validation failure tied to one field.
///
/// Presence of a `FieldError` means the input is currently invalid; the
/// presentation layer shows `message` next to the input and uses `kind` to
/// style it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub kind: ErrorKind,
    pub message: String,
}

impl FieldError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn required(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Required, message)
    }

    pub fn format(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Format, message)
    }

    pub fn range(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Range, message)
    }
}

impl core::fmt::Display for FieldError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kind_serializes_as_lowercase_tag() {
        let json = serde_json::to_string(&ErrorKind::Required).unwrap();
        assert_eq!(json, "\"required\"");
        assert_eq!(ErrorKind::Format.to_string(), "format");
    }

    #[test]
    fn field_error_displays_its_message() {
        let err = FieldError::range("Age must be a positive number and at least 18");
        assert_eq!(err.kind, ErrorKind::Range);
        assert_eq!(err.to_string(), "Age must be a positive number and at least 18");
    }
}
