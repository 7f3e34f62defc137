//! Domain-level errors.
//!
//! These errors represent business rule violations.
//! They are independent of infrastructure concerns (HTTP, database).

use thiserror::Error;

use crate::validation::FieldViolation;

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// One or more input fields failed validation
    #[error("Validation failed: {}", join_violations(.0))]
    Validation(Vec<FieldViolation>),
}

impl DomainError {
    /// Create a validation error
    pub fn validation(violations: Vec<FieldViolation>) -> Self {
        DomainError::Validation(violations)
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
