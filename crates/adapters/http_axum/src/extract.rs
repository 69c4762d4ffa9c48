//! Request extractors that report decoding failures as validation errors.

use std::convert::Infallible;
use std::str::FromStr;

use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use servicecore_domain::error::ValidationError;
use servicecore_domain::id::UserId;

use crate::error::ApiError;

/// The user every request acts on behalf of until authentication exists.
pub const DEFAULT_USER: UserId = UserId::new(1);

/// JSON body whose rejection (bad syntax, wrong types, unknown fields) is
/// rendered as a `400` violation on `body`.
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::malformed("body", rejection.body_text())),
        }
    }
}

/// Query string whose rejection (unknown parameters, wrong types) is
/// rendered as a `400` violation on `query`.
pub struct ValidQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::malformed("query", rejection.body_text())),
        }
    }
}

/// The caller of the current request.
pub struct CurrentUser(pub UserId);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(_parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(DEFAULT_USER))
    }
}

/// Parse a path segment into a typed identifier.
///
/// # Errors
///
/// Returns a `400` [`ApiError`] when the segment is not a positive integer.
pub fn parse_id<I: FromStr>(raw: &str) -> Result<I, ApiError> {
    I::from_str(raw).map_err(|_| ValidationError::InvalidId(raw.to_string()).into())
}

#[cfg(test)]
mod tests {
    use servicecore_domain::id::ProviderId;

    use super::*;

    #[test]
    fn should_parse_positive_path_id() {
        let id: ProviderId = parse_id("42").unwrap();
        assert_eq!(id, ProviderId::new(42));
    }

    #[test]
    fn should_reject_non_numeric_path_id() {
        assert!(parse_id::<ProviderId>("abc").is_err());
        assert!(parse_id::<ProviderId>("0").is_err());
    }
}
