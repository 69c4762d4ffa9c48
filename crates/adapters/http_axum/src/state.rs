//! Shared application state for axum handlers.

use std::sync::Arc;

use servicecore_app::ports::{
    BusinessHoursRepository, CatalogueRepository, ProviderRepository, ServiceTypeRepository,
};
use servicecore_app::services::business_hours_service::BusinessHoursService;
use servicecore_app::services::catalogue_service::CatalogueService;
use servicecore_app::services::provider_service::ProviderService;

/// Application state shared across all axum handlers.
///
/// Generic over the provider, service-type, business-hours and catalogue
/// repositories to avoid dynamic dispatch. `Clone` is implemented manually so
/// the underlying types themselves do not need to be `Clone`; only the `Arc`
/// wrappers are cloned.
pub struct AppState<P, T, H, C> {
    /// Provider CRUD service.
    pub provider_service: Arc<ProviderService<P, T>>,
    /// Business-hours service.
    pub business_hours_service: Arc<BusinessHoursService<H, P>>,
    /// Catalogue CRUD and public search service.
    pub catalogue_service: Arc<CatalogueService<C, P>>,
}

impl<P, T, H, C> Clone for AppState<P, T, H, C> {
    fn clone(&self) -> Self {
        Self {
            provider_service: Arc::clone(&self.provider_service),
            business_hours_service: Arc::clone(&self.business_hours_service),
            catalogue_service: Arc::clone(&self.catalogue_service),
        }
    }
}

impl<P, T, H, C> AppState<P, T, H, C>
where
    P: ProviderRepository + Send + Sync + 'static,
    T: ServiceTypeRepository + Send + Sync + 'static,
    H: BusinessHoursRepository + Send + Sync + 'static,
    C: CatalogueRepository + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        provider_service: ProviderService<P, T>,
        business_hours_service: BusinessHoursService<H, P>,
        catalogue_service: CatalogueService<C, P>,
    ) -> Self {
        Self {
            provider_service: Arc::new(provider_service),
            business_hours_service: Arc::new(business_hours_service),
            catalogue_service: Arc::new(catalogue_service),
        }
    }
}
