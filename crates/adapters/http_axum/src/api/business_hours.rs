//! JSON REST handlers for a provider's business hours.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use servicecore_app::ports::{
    BusinessHoursRepository, CatalogueRepository, ProviderRepository, ServiceTypeRepository,
};
use servicecore_domain::business_hours::{BusinessHours, HoursDraft, HoursPatch};
use servicecore_domain::id::{BusinessHoursId, ProviderId};

use crate::error::ApiError;
use crate::extract::{ValidJson, parse_id};
use crate::state::AppState;

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<BusinessHours>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the update and delete endpoints.
pub enum GetResponse {
    Ok(Json<BusinessHours>),
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
    Created(Json<BusinessHours>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the bulk endpoint.
pub enum BulkResponse {
    Created(Json<Vec<BusinessHours>>),
}

impl IntoResponse for BulkResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `POST /api/v1/services/providers/:provider_id/business-hours`
pub async fn create<P, T, H, C>(
    State(state): State<AppState<P, T, H, C>>,
    Path(provider_id): Path<String>,
    ValidJson(draft): ValidJson<HoursDraft>,
) -> Result<CreateResponse, ApiError>
where
    P: ProviderRepository + Send + Sync + 'static,
    T: ServiceTypeRepository + Send + Sync + 'static,
    H: BusinessHoursRepository + Send + Sync + 'static,
    C: CatalogueRepository + Send + Sync + 'static,
{
    let provider_id: ProviderId = parse_id(&provider_id)?;
    let created = state
        .business_hours_service
        .create_business_hours(provider_id, draft)
        .await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `GET /api/v1/services/providers/:provider_id/business-hours`
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
    let hours = state
        .business_hours_service
        .list_business_hours(provider_id)
        .await?;
    Ok(ListResponse::Ok(Json(hours)))
}

/// `PUT /api/v1/services/providers/:provider_id/business-hours/:hours_id`
pub async fn update<P, T, H, C>(
    State(state): State<AppState<P, T, H, C>>,
    Path((provider_id, hours_id)): Path<(String, String)>,
    ValidJson(patch): ValidJson<HoursPatch>,
) -> Result<GetResponse, ApiError>
where
    P: ProviderRepository + Send + Sync + 'static,
    T: ServiceTypeRepository + Send + Sync + 'static,
    H: BusinessHoursRepository + Send + Sync + 'static,
    C: CatalogueRepository + Send + Sync + 'static,
{
    let provider_id: ProviderId = parse_id(&provider_id)?;
    let hours_id: BusinessHoursId = parse_id(&hours_id)?;
    let updated = state
        .business_hours_service
        .update_business_hours(provider_id, hours_id, patch)
        .await?;
    Ok(GetResponse::Ok(Json(updated)))
}

/// `DELETE /api/v1/services/providers/:provider_id/business-hours/:hours_id`
///
/// Answers with the soft-deleted record.
pub async fn delete<P, T, H, C>(
    State(state): State<AppState<P, T, H, C>>,
    Path((provider_id, hours_id)): Path<(String, String)>,
) -> Result<GetResponse, ApiError>
where
    P: ProviderRepository + Send + Sync + 'static,
    T: ServiceTypeRepository + Send + Sync + 'static,
    H: BusinessHoursRepository + Send + Sync + 'static,
    C: CatalogueRepository + Send + Sync + 'static,
{
    let provider_id: ProviderId = parse_id(&provider_id)?;
    let hours_id: BusinessHoursId = parse_id(&hours_id)?;
    let deleted = state
        .business_hours_service
        .delete_business_hours(provider_id, hours_id)
        .await?;
    Ok(GetResponse::Ok(Json(deleted)))
}

/// `POST /api/v1/services/providers/:provider_id/business-hours/bulk`
///
/// The body is a JSON array of windows; each weekday is created or
/// overwritten.
pub async fn bulk_upsert<P, T, H, C>(
    State(state): State<AppState<P, T, H, C>>,
    Path(provider_id): Path<String>,
    ValidJson(drafts): ValidJson<Vec<HoursDraft>>,
) -> Result<BulkResponse, ApiError>
where
    P: ProviderRepository + Send + Sync + 'static,
    T: ServiceTypeRepository + Send + Sync + 'static,
    H: BusinessHoursRepository + Send + Sync + 'static,
    C: CatalogueRepository + Send + Sync + 'static,
{
    let provider_id: ProviderId = parse_id(&provider_id)?;
    let written = state
        .business_hours_service
        .bulk_upsert_business_hours(provider_id, drafts)
        .await?;
    Ok(BulkResponse::Created(Json(written)))
}
