//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use servicecore_domain::error::{ServiceCoreError, ValidationError};
use servicecore_domain::validation::{Violation, Violations};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    violations: Option<Violations>,
}

/// Maps [`ServiceCoreError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(ServiceCoreError);

impl ApiError {
    /// A request part that could not be decoded at all (`field` is `body`,
    /// `query` or a path parameter name).
    pub fn malformed(field: &str, message: impl Into<String>) -> Self {
        let mut violations = Violations::default();
        violations.push(Violation::new(field, message));
        Self(violations.into())
    }
}

impl From<ServiceCoreError> for ApiError {
    fn from(err: ServiceCoreError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self.0 {
            ServiceCoreError::Validation(ValidationError::Invalid(violations)) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: "validation failed".to_string(),
                    violations: Some(violations),
                },
            ),
            ServiceCoreError::Validation(err) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: err.to_string(),
                    violations: None,
                },
            ),
            ServiceCoreError::NotFound(err) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    error: err.to_string(),
                    violations: None,
                },
            ),
            ServiceCoreError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        error: "internal server error".to_string(),
                        violations: None,
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
