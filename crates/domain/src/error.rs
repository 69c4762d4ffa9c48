//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`ServiceCoreError`] via `#[from]` (or a manual `From` for adapter errors
//! that are boxed into [`ServiceCoreError::Storage`]).

use crate::id::ServiceTypeId;
use crate::validation::Violations;

/// Top-level error returned by domain invariants, application services and
/// repository ports.
#[derive(Debug, thiserror::Error)]
pub enum ServiceCoreError {
    /// Input or invariant check failed.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A requested record does not exist (or is soft-deleted).
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// The persistence layer failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Ways in which input can be rejected before it reaches storage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// One or more field constraints failed.
    #[error("{0}")]
    Invalid(Violations),

    /// The referenced service type is not part of the reference data.
    #[error("service type {0} not found")]
    UnknownServiceType(ServiceTypeId),

    /// An active business-hours row already exists for the weekday.
    #[error("business hours already exist for day {0}, use update instead")]
    DuplicateDay(u8),

    /// An open day closes at or before it opens.
    #[error("close time must be after open time for day {0}")]
    CloseBeforeOpen(u8),

    /// A path or body identifier is not a positive integer.
    #[error("invalid identifier `{0}`")]
    InvalidId(String),
}

impl From<Violations> for ValidationError {
    fn from(violations: Violations) -> Self {
        Self::Invalid(violations)
    }
}

impl From<Violations> for ServiceCoreError {
    fn from(violations: Violations) -> Self {
        Self::Validation(ValidationError::Invalid(violations))
    }
}

/// A lookup by identifier found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// Kind of record that was looked up (`"Provider"`, `"Service"`, …).
    pub entity: &'static str,
    /// Identifier as it was requested.
    pub id: String,
}

impl NotFoundError {
    #[must_use]
    pub fn new(entity: &'static str, id: &impl std::fmt::Display) -> Self {
        Self {
            entity,
            id: id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Violation;

    #[test]
    fn should_render_not_found_message_with_entity_and_id() {
        let err = NotFoundError::new("Provider", &42);
        assert_eq!(err.to_string(), "Provider 42 not found");
    }

    #[test]
    fn should_convert_violations_into_validation_error() {
        let mut violations = Violations::default();
        violations.push(Violation::new("title", "must not be empty"));

        let err = ServiceCoreError::from(violations);
        assert!(matches!(
            err,
            ServiceCoreError::Validation(ValidationError::Invalid(_))
        ));
    }

    #[test]
    fn should_render_duplicate_day_message() {
        let err = ValidationError::DuplicateDay(3);
        assert_eq!(
            err.to_string(),
            "business hours already exist for day 3, use update instead"
        );
    }
}
