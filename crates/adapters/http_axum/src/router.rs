//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use servicecore_app::ports::{
    BusinessHoursRepository, CatalogueRepository, ProviderRepository, ServiceTypeRepository,
};

use crate::state::AppState;

/// Global prefix every API route is mounted under.
pub const API_PREFIX: &str = "/api/v1/services";

/// Build the top-level axum [`Router`].
///
/// Nests the API routes under [`API_PREFIX`] and serves `/health` at the
/// root. Includes a [`TraceLayer`] that logs each HTTP request/response at
/// the `DEBUG` level using the `tracing` ecosystem.
pub fn build<P, T, H, C>(state: AppState<P, T, H, C>) -> Router
where
    P: ProviderRepository + Send + Sync + 'static,
    T: ServiceTypeRepository + Send + Sync + 'static,
    H: BusinessHoursRepository + Send + Sync + 'static,
    C: CatalogueRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest(API_PREFIX, crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
