//! Error types for profile handling
//!
//! Provides error handling for:
//! - Decoding (text → Profile), including schema validation and migration
//! - Mutation of an in-memory profile
//! - Script generation (Profile → fragments)
//! - Encoding (Profile → text)

use serde::Serialize;

/// How serious a parsing diagnostic is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Severity {
    /// Informational; decoding continues
    Info,
    /// Fatal; decoding aborts
    Error,
}

/// A parse or validation diagnostic
///
/// Returned as the `Err` of a decode when `severity` is [`Severity::Error`];
/// recorded on the diagnostic channel of a [`DecodeReport`] otherwise.
///
/// [`DecodeReport`]: crate::codec::DecodeReport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct ParsingError {
    /// Fatal or informational
    pub severity: Severity,
    /// Human-readable message including the dotted field path
    pub message: String,
}

impl ParsingError {
    /// Create a fatal error
    #[inline]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    /// Create an informational diagnostic
    #[inline]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    /// Required key absent from a section
    pub fn missing_field(prefix: impl std::fmt::Display, key: &str) -> Self {
        Self::error(format!("'{prefix}.{key}' field is missing"))
    }

    /// Key present with a value of the wrong kind
    pub fn wrong_kind(prefix: impl std::fmt::Display, key: &str, expected: &str) -> Self {
        Self::error(format!("'{prefix}.{key}' must be {expected}"))
    }

    /// Whether this diagnostic aborts decoding
    #[inline]
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl From<serde_json::Error> for ParsingError {
    fn from(err: serde_json::Error) -> Self {
        Self::error(err.to_string())
    }
}

/// Errors from mutating a profile
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    /// `remove_asset` target is not in the asset list
    #[error("Tried to remove non-existing asset '{0}'")]
    AssetNotFound(String),
}

/// Errors from script generation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    /// The module template needs both branches
    #[error("module '{module}' has no {field}; both module instructions are required for generation")]
    MissingModuleInstruction {
        /// Module name
        module: String,
        /// Wire name of the missing instruction
        field: &'static str,
    },
}

impl GenerateError {
    /// Create a missing-instruction error for a module
    pub fn missing_instruction(module: impl Into<String>, field: &'static str) -> Self {
        Self::MissingModuleInstruction {
            module: module.into(),
            field,
        }
    }
}

/// Errors during profile serialization
#[derive(Debug, thiserror::Error)]
pub enum SerializeError {
    /// JSON writer failure
    #[error("serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_message() {
        let err = ParsingError::missing_field("camera", "anchor");
        assert_eq!(err.to_string(), "'camera.anchor' field is missing");
        assert!(err.is_fatal());
    }

    #[test]
    fn wrong_kind_message() {
        let err = ParsingError::wrong_kind("camera.position", "x", "a number");
        assert_eq!(err.to_string(), "'camera.position.x' must be a number");
    }

    #[test]
    fn info_is_not_fatal() {
        assert!(!ParsingError::info("Key 'a' not supported in 'meta'").is_fatal());
    }

    #[test]
    fn asset_not_found_display() {
        let err = ProfileError::AssetNotFound("base".to_string());
        assert_eq!(err.to_string(), "Tried to remove non-existing asset 'base'");
    }

    #[test]
    fn missing_instruction_display() {
        let err = GenerateError::missing_instruction("Globe", "loadedInstruction");
        assert_eq!(
            err.to_string(),
            "module 'Globe' has no loadedInstruction; both module instructions are required for generation"
        );
    }
}
