//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod business_hours;
#[allow(clippy::missing_errors_doc)]
pub mod catalogue;
#[allow(clippy::missing_errors_doc)]
pub mod providers;
#[allow(clippy::missing_errors_doc)]
pub mod search;

use axum::Router;
use axum::routing::{get, post, put};

use servicecore_app::ports::{
    BusinessHoursRepository, CatalogueRepository, ProviderRepository, ServiceTypeRepository,
};

use crate::state::AppState;

/// Build the `/api/v1/services` sub-router.
pub fn routes<P, T, H, C>() -> Router<AppState<P, T, H, C>>
where
    P: ProviderRepository + Send + Sync + 'static,
    T: ServiceTypeRepository + Send + Sync + 'static,
    H: BusinessHoursRepository + Send + Sync + 'static,
    C: CatalogueRepository + Send + Sync + 'static,
{
    Router::new()
        // Providers
        .route("/providers", post(providers::create::<P, T, H, C>))
        .route(
            "/providers/user/{user_id}",
            get(providers::list_by_user::<P, T, H, C>),
        )
        .route(
            "/providers/{provider_id}",
            get(providers::get::<P, T, H, C>)
                .put(providers::update::<P, T, H, C>)
                .delete(providers::delete::<P, T, H, C>),
        )
        // Business hours
        .route(
            "/providers/{provider_id}/business-hours",
            get(business_hours::list::<P, T, H, C>).post(business_hours::create::<P, T, H, C>),
        )
        .route(
            "/providers/{provider_id}/business-hours/bulk",
            post(business_hours::bulk_upsert::<P, T, H, C>),
        )
        .route(
            "/providers/{provider_id}/business-hours/{hours_id}",
            put(business_hours::update::<P, T, H, C>)
                .delete(business_hours::delete::<P, T, H, C>),
        )
        // Catalogue
        .route(
            "/providers/{provider_id}/catalogue",
            get(catalogue::list::<P, T, H, C>).post(catalogue::create::<P, T, H, C>),
        )
        .route(
            "/providers/{provider_id}/catalogue/{catalogue_id}",
            get(catalogue::get::<P, T, H, C>)
                .put(catalogue::update::<P, T, H, C>)
                .delete(catalogue::delete::<P, T, H, C>),
        )
        // Search
        .route("/search/services", get(search::services::<P, T, H, C>))
}
