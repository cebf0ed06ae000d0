//! Error types for the library layer.

use std::fmt;

use crate::validation::ValidationErrors;

/// Errors produced by the library layer, wrapping upstream API errors
/// and adding serialization and input validation failures.
#[derive(Debug)]
pub enum ComparcarError {
    /// An error from the underlying API client.
    Api(comparcar_api::Error),
    /// A memoized response could not be decoded.
    Serialization(serde_json::Error),
    /// A car form failed client-side validation. Never reaches the network.
    Validation(ValidationErrors),
    /// User-provided filter input failed validation.
    InvalidInput(String),
}

impl ComparcarError {
    /// Returns `true` when the backend reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api(e) if e.is_not_found())
    }
}

impl fmt::Display for ComparcarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::Serialization(e) => write!(f, "Serialization error: {}", e),
            Self::Validation(errors) => write!(f, "Validation failed: {}", errors),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for ComparcarError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Serialization(e) => Some(e),
            _ => None,
        }
    }
}

impl From<comparcar_api::Error> for ComparcarError {
    fn from(e: comparcar_api::Error) -> Self {
        Self::Api(e)
    }
}

impl From<serde_json::Error> for ComparcarError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e)
    }
}

impl From<ValidationErrors> for ComparcarError {
    fn from(e: ValidationErrors) -> Self {
        Self::Validation(e)
    }
}
