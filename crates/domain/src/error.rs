//! Unified error types for the domain layer
//!
//! Provides a common error type that can be used across all domain operations,
//! enabling consistent error handling without forcing adapters to use String or anyhow.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Catalog has no usable entries
    #[error("Catalog is empty")]
    EmptyCatalog,

    /// Entry weight must be a positive, finite number
    #[error("Entry {id} has non-positive weight {weight}")]
    NonPositiveWeight { id: String, weight: f64 },

    /// Entry identifiers must be unique within a catalog
    #[error("Duplicate entry id: {0}")]
    DuplicateEntry(String),

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),
}

impl DomainError {
    /// Create a non-positive weight error with entry context.
    pub fn non_positive_weight(id: impl Into<String>, weight: f64) -> Self {
        Self::NonPositiveWeight {
            id: id.into(),
            weight,
        }
    }

    /// Create a duplicate entry error.
    pub fn duplicate_entry(id: impl Into<String>) -> Self {
        Self::DuplicateEntry(id.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    ///
    /// Use this in `FromStr` implementations when the input string
    /// doesn't match any known variant or format.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Creates a validation error for business rule violations.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_catalog_error() {
        let err = DomainError::EmptyCatalog;
        assert_eq!(err.to_string(), "Catalog is empty");
    }

    #[test]
    fn test_non_positive_weight_error() {
        let err = DomainError::non_positive_weight("prize_01", -0.5);
        assert!(matches!(err, DomainError::NonPositiveWeight { .. }));
        assert!(err.to_string().contains("prize_01"));
        assert!(err.to_string().contains("-0.5"));
    }

    #[test]
    fn test_duplicate_entry_error() {
        let err = DomainError::duplicate_entry("prize_01");
        assert_eq!(err.to_string(), "Duplicate entry id: prize_01");
    }

    #[test]
    fn test_parse_error() {
        let err = DomainError::parse("Unknown rarity tier: XX");
        assert!(matches!(err, DomainError::Parse(_)));
        assert_eq!(err.to_string(), "Parse error: Unknown rarity tier: XX");
    }
}
