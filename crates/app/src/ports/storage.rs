//! Storage port: repository traits for persistence.
//!
//! Reads never return soft-deleted rows. Writes take whole records so the
//! services own every field change, soft deletion included.

use std::future::Future;

use servicecore_domain::business_hours::{BusinessHours, NewBusinessHours};
use servicecore_domain::catalogue::{CatalogueEntry, NewCatalogueEntry};
use servicecore_domain::error::ServiceCoreError;
use servicecore_domain::id::{BusinessHoursId, CatalogueEntryId, ProviderId, ServiceTypeId, UserId};
use servicecore_domain::provider::{NewProvider, Provider};
use servicecore_domain::search::{Listing, SearchFilter};
use servicecore_domain::service_type::ServiceType;

/// Read access to the service-type reference data.
pub trait ServiceTypeRepository {
    /// Get a service type by its identifier.
    fn get_by_id(
        &self,
        id: ServiceTypeId,
    ) -> impl Future<Output = Result<Option<ServiceType>, ServiceCoreError>> + Send;
}

/// Repository for persisting and querying [`Provider`]s.
pub trait ProviderRepository {
    /// Insert a new provider and return it with its assigned id.
    fn create(
        &self,
        provider: NewProvider,
    ) -> impl Future<Output = Result<Provider, ServiceCoreError>> + Send;

    /// Get an active provider by id.
    fn get_by_id(
        &self,
        id: ProviderId,
    ) -> impl Future<Output = Result<Option<Provider>, ServiceCoreError>> + Send;

    /// Active providers owned by `user_id`, oldest first.
    fn find_by_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<Provider>, ServiceCoreError>> + Send;

    /// Overwrite a stored provider with `provider`.
    fn update(
        &self,
        provider: Provider,
    ) -> impl Future<Output = Result<Provider, ServiceCoreError>> + Send;
}

/// Repository for persisting and querying [`BusinessHours`].
pub trait BusinessHoursRepository {
    /// Active windows of a provider ordered by weekday.
    fn find_by_provider(
        &self,
        provider_id: ProviderId,
    ) -> impl Future<Output = Result<Vec<BusinessHours>, ServiceCoreError>> + Send;

    /// The active window of a provider for one weekday.
    fn find_by_provider_and_day(
        &self,
        provider_id: ProviderId,
        day_of_week: u8,
    ) -> impl Future<Output = Result<Option<BusinessHours>, ServiceCoreError>> + Send;

    /// Get an active window by id.
    fn get_by_id(
        &self,
        id: BusinessHoursId,
    ) -> impl Future<Output = Result<Option<BusinessHours>, ServiceCoreError>> + Send;

    /// Write the window for `(provider, day)`: overwrites the active row,
    /// otherwise revives a soft-deleted one, otherwise inserts.
    fn upsert(
        &self,
        hours: NewBusinessHours,
    ) -> impl Future<Output = Result<BusinessHours, ServiceCoreError>> + Send;

    /// [`upsert`](Self::upsert) every window atomically, in input order.
    fn upsert_many(
        &self,
        hours: Vec<NewBusinessHours>,
    ) -> impl Future<Output = Result<Vec<BusinessHours>, ServiceCoreError>> + Send;

    /// Overwrite a stored window with `hours`.
    fn update(
        &self,
        hours: BusinessHours,
    ) -> impl Future<Output = Result<BusinessHours, ServiceCoreError>> + Send;
}

/// Repository for persisting and querying [`CatalogueEntry`]s.
pub trait CatalogueRepository {
    /// Insert a new entry and return it with its assigned id.
    fn create(
        &self,
        entry: NewCatalogueEntry,
    ) -> impl Future<Output = Result<CatalogueEntry, ServiceCoreError>> + Send;

    /// Get an active entry by id.
    fn get_by_id(
        &self,
        id: CatalogueEntryId,
    ) -> impl Future<Output = Result<Option<CatalogueEntry>, ServiceCoreError>> + Send;

    /// Active entries of a provider, newest first.
    fn find_by_provider(
        &self,
        provider_id: ProviderId,
    ) -> impl Future<Output = Result<Vec<CatalogueEntry>, ServiceCoreError>> + Send;

    /// Overwrite a stored entry with `entry`.
    fn update(
        &self,
        entry: CatalogueEntry,
    ) -> impl Future<Output = Result<CatalogueEntry, ServiceCoreError>> + Send;

    /// Active entries of active providers matching the service type and
    /// keyword of `filter`, joined with their provider, newest first.
    ///
    /// The origin of `filter` is ignored here; distance ranking happens in
    /// the service.
    fn find_public_services(
        &self,
        filter: SearchFilter,
    ) -> impl Future<Output = Result<Vec<Listing>, ServiceCoreError>> + Send;
}
