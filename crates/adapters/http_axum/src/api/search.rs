//! Public catalogue search.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};

use servicecore_app::ports::{
    BusinessHoursRepository, CatalogueRepository, ProviderRepository, ServiceTypeRepository,
};
use servicecore_domain::search::{Listing, SearchQuery};

use crate::error::ApiError;
use crate::extract::ValidQuery;
use crate::state::AppState;

/// Possible responses from the search endpoint.
pub enum SearchResponse {
    Ok(Json<Vec<Listing>>),
}

impl IntoResponse for SearchResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/v1/services/search/services?serviceTypeId=&keyword=&lat=&lng=`
pub async fn services<P, T, H, C>(
    State(state): State<AppState<P, T, H, C>>,
    ValidQuery(query): ValidQuery<SearchQuery>,
) -> Result<SearchResponse, ApiError>
where
    P: ProviderRepository + Send + Sync + 'static,
    T: ServiceTypeRepository + Send + Sync + 'static,
    H: BusinessHoursRepository + Send + Sync + 'static,
    C: CatalogueRepository + Send + Sync + 'static,
{
    let filter = query.into_filter()?;
    let listings = state
        .catalogue_service
        .search_public_services(filter)
        .await?;
    Ok(SearchResponse::Ok(Json(listings)))
}
