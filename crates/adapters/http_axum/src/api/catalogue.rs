//! JSON REST handlers for a provider's service catalogue.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use servicecore_app::ports::{
    BusinessHoursRepository, CatalogueRepository, ProviderRepository, ServiceTypeRepository,
};
use servicecore_domain::catalogue::{CatalogueDraft, CatalogueEntry, CataloguePatch};
use servicecore_domain::id::{CatalogueEntryId, ProviderId};

use crate::error::ApiError;
use crate::extract::{CurrentUser, ValidJson, parse_id};
use crate::state::AppState;

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<CatalogueEntry>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get and update endpoints.
pub enum GetResponse {
    Ok(Json<CatalogueEntry>),
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
    Created(Json<CatalogueEntry>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

fn parse_ids(
    provider_id: &str,
    catalogue_id: &str,
) -> Result<(ProviderId, CatalogueEntryId), ApiError> {
    Ok((parse_id(provider_id)?, parse_id(catalogue_id)?))
}

/// `POST /api/v1/services/providers/:provider_id/catalogue`
pub async fn create<P, T, H, C>(
    State(state): State<AppState<P, T, H, C>>,
    Path(provider_id): Path<String>,
    CurrentUser(user_id): CurrentUser,
    ValidJson(draft): ValidJson<CatalogueDraft>,
) -> Result<CreateResponse, ApiError>
where
    P: ProviderRepository + Send + Sync + 'static,
    T: ServiceTypeRepository + Send + Sync + 'static,
    H: BusinessHoursRepository + Send + Sync + 'static,
    C: CatalogueRepository + Send + Sync + 'static,
{
    let provider_id: ProviderId = parse_id(&provider_id)?;
    let created = state
        .catalogue_service
        .create_service(provider_id, user_id, draft)
        .await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `GET /api/v1/services/providers/:provider_id/catalogue`
pub async fn list<P, T, H, C>(
    State(state): State<AppState<P, T, H, C>>,
    Path(provider_id): Path<String>,
) -> Result<ListResponse, ApiError>
where
    P: ProviderRepository + Send + Sync + 'static,
    T: ServiceTypeRepository + Send + Sync + 'static,
    H: BusinessHoursRepository + Send + Sync + 'static,
    C: CatalogueRepository + Send + Sync + 'static,
{
    let provider_id: ProviderId = parse_id(&provider_id)?;
    let entries = state
        .catalogue_service
        .list_provider_services(provider_id)
        .await?;
    Ok(ListResponse::Ok(Json(entries)))
}

/// `GET /api/v1/services/providers/:provider_id/catalogue/:catalogue_id`
pub async fn get<P, T, H, C>(
    State(state): State<AppState<P, T, H, C>>,
    Path((provider_id, catalogue_id)): Path<(String, String)>,
) -> Result<GetResponse, ApiError>
where
    P: ProviderRepository + Send + Sync + 'static,
    T: ServiceTypeRepository + Send + Sync + 'static,
    H: BusinessHoursRepository + Send + Sync + 'static,
    C: CatalogueRepository + Send + Sync + 'static,
{
    let (provider_id, catalogue_id) = parse_ids(&provider_id, &catalogue_id)?;
    let entry = state
        .catalogue_service
        .get_service(provider_id, catalogue_id)
        .await?;
    Ok(GetResponse::Ok(Json(entry)))
}

/// `PUT /api/v1/services/providers/:provider_id/catalogue/:catalogue_id`
pub async fn update<P, T, H, C>(
    State(state): State<AppState<P, T, H, C>>,
    Path((provider_id, catalogue_id)): Path<(String, String)>,
    CurrentUser(user_id): CurrentUser,
    ValidJson(patch): ValidJson<CataloguePatch>,
) -> Result<GetResponse, ApiError>
where
    P: ProviderRepository + Send + Sync + 'static,
    T: ServiceTypeRepository + Send + Sync + 'static,
    H: BusinessHoursRepository + Send + Sync + 'static,
    C: CatalogueRepository + Send + Sync + 'static,
{
    let (provider_id, catalogue_id) = parse_ids(&provider_id, &catalogue_id)?;
    let updated = state
        .catalogue_service
        .update_service(provider_id, catalogue_id, user_id, patch)
        .await?;
    Ok(GetResponse::Ok(Json(updated)))
}

/// `DELETE /api/v1/services/providers/:provider_id/catalogue/:catalogue_id`
pub async fn delete<P, T, H, C>(
    State(state): State<AppState<P, T, H, C>>,
    Path((provider_id, catalogue_id)): Path<(String, String)>,
    CurrentUser(user_id): CurrentUser,
) -> Result<DeleteResponse, ApiError>
where
    P: ProviderRepository + Send + Sync + 'static,
    T: ServiceTypeRepository + Send + Sync + 'static,
    H: BusinessHoursRepository + Send + Sync + 'static,
    C: CatalogueRepository + Send + Sync + 'static,
{
    let (provider_id, catalogue_id) = parse_ids(&provider_id, &catalogue_id)?;
    state
        .catalogue_service
        .delete_service(provider_id, catalogue_id, user_id)
        .await?;
    Ok(DeleteResponse::NoContent)
}
