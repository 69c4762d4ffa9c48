//! JSON REST handlers for providers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use servicecore_app::ports::{
    BusinessHoursRepository, CatalogueRepository, ProviderRepository, ServiceTypeRepository,
};
use servicecore_domain::id::{ProviderId, UserId};
use servicecore_domain::provider::{Provider, ProviderDraft, ProviderPatch};

use crate::error::ApiError;
use crate::extract::{CurrentUser, ValidJson, parse_id};
use crate::state::AppState;

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Provider>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get, update and delete endpoints.
pub enum GetResponse {
    Ok(Json<Provider>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Provider>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `POST /api/v1/services/providers`
pub async fn create<P, T, H, C>(
    State(state): State<AppState<P, T, H, C>>,
    CurrentUser(user_id): CurrentUser,
    ValidJson(draft): ValidJson<ProviderDraft>,
) -> Result<CreateResponse, ApiError>
where
    P: ProviderRepository + Send + Sync + 'static,
    T: ServiceTypeRepository + Send + Sync + 'static,
    H: BusinessHoursRepository + Send + Sync + 'static,
    C: CatalogueRepository + Send + Sync + 'static,
{
    let created = state
        .provider_service
        .create_provider(user_id, draft)
        .await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `GET /api/v1/services/providers/:provider_id`
pub async fn get<P, T, H, C>(
    State(state): State<AppState<P, T, H, C>>,
    Path(provider_id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    P: ProviderRepository + Send + Sync + 'static,
    T: ServiceTypeRepository + Send + Sync + 'static,
    H: BusinessHoursRepository + Send + Sync + 'static,
    C: CatalogueRepository + Send + Sync + 'static,
{
    let provider_id: ProviderId = parse_id(&provider_id)?;
    let provider = state.provider_service.get_provider(provider_id).await?;
    Ok(GetResponse::Ok(Json(provider)))
}

/// `GET /api/v1/services/providers/user/:user_id`
pub async fn list_by_user<P, T, H, C>(
    State(state): State<AppState<P, T, H, C>>,
    Path(user_id): Path<String>,
) -> Result<ListResponse, ApiError>
where
    P: ProviderRepository + Send + Sync + 'static,
    T: ServiceTypeRepository + Send + Sync + 'static,
    H: BusinessHoursRepository + Send + Sync + 'static,
    C: CatalogueRepository + Send + Sync + 'static,
{
    let user_id: UserId = parse_id(&user_id)?;
    let providers = state
        .provider_service
        .list_providers_by_user(user_id)
        .await?;
    Ok(ListResponse::Ok(Json(providers)))
}

/// `PUT /api/v1/services/providers/:provider_id`
pub async fn update<P, T, H, C>(
    State(state): State<AppState<P, T, H, C>>,
    Path(provider_id): Path<String>,
    CurrentUser(user_id): CurrentUser,
    ValidJson(patch): ValidJson<ProviderPatch>,
) -> Result<GetResponse, ApiError>
where
    P: ProviderRepository + Send + Sync + 'static,
    T: ServiceTypeRepository + Send + Sync + 'static,
    H: BusinessHoursRepository + Send + Sync + 'static,
    C: CatalogueRepository + Send + Sync + 'static,
{
    let provider_id: ProviderId = parse_id(&provider_id)?;
    let updated = state
        .provider_service
        .update_provider(provider_id, user_id, patch)
        .await?;
    Ok(GetResponse::Ok(Json(updated)))
}

/// `DELETE /api/v1/services/providers/:provider_id`
///
/// Answers with the soft-deleted record.
pub async fn delete<P, T, H, C>(
    State(state): State<AppState<P, T, H, C>>,
    Path(provider_id): Path<String>,
    CurrentUser(user_id): CurrentUser,
) -> Result<GetResponse, ApiError>
where
    P: ProviderRepository + Send + Sync + 'static,
    T: ServiceTypeRepository + Send + Sync + 'static,
    H: BusinessHoursRepository + Send + Sync + 'static,
    C: CatalogueRepository + Send + Sync + 'static,
{
    let provider_id: ProviderId = parse_id(&provider_id)?;
    let deleted = state
        .provider_service
        .delete_provider(provider_id, user_id)
        .await?;
    Ok(GetResponse::Ok(Json(deleted)))
}
