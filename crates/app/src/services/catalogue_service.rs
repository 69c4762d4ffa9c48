//! Catalogue service: provider-scoped catalogue CRUD and the public search.

use servicecore_domain::catalogue::{
    CatalogueDraft, CatalogueEntry, CataloguePatch, NewCatalogueEntry,
};
use servicecore_domain::error::{NotFoundError, ServiceCoreError};
use servicecore_domain::id::{CatalogueEntryId, ProviderId, UserId};
use servicecore_domain::search::{self, Listing, SearchFilter};
use servicecore_domain::time::now;

use crate::ports::{CatalogueRepository, ProviderRepository};

/// Application service for catalogue entries.
pub struct CatalogueService<C, P> {
    catalogue: C,
    providers: P,
}

impl<C: CatalogueRepository, P: ProviderRepository> CatalogueService<C, P> {
    /// Create a new service backed by the given repositories.
    pub fn new(catalogue: C, providers: P) -> Self {
        Self {
            catalogue,
            providers,
        }
    }

    async fn require_provider(&self, id: ProviderId) -> Result<(), ServiceCoreError> {
        match self.providers.get_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(NotFoundError::new("Service provider", &id).into()),
        }
    }

    /// Add a service to a provider's catalogue.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceCoreError::NotFound`] if the provider does not exist,
    /// [`ServiceCoreError::Validation`] if a field is invalid, or a storage
    /// error from the repository.
    #[tracing::instrument(skip(self, draft), fields(title = %draft.title))]
    pub async fn create_service(
        &self,
        provider_id: ProviderId,
        user_id: UserId,
        draft: CatalogueDraft,
    ) -> Result<CatalogueEntry, ServiceCoreError> {
        self.require_provider(provider_id).await?;
        let details = draft.into_details();
        details.validate()?;
        let entry = self
            .catalogue
            .create(NewCatalogueEntry {
                user_id,
                provider_id,
                details,
                created_at: now(),
            })
            .await?;
        tracing::info!(catalogue_id = %entry.id, "service created");
        Ok(entry)
    }

    /// List a provider's services, newest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_provider_services(
        &self,
        provider_id: ProviderId,
    ) -> Result<Vec<CatalogueEntry>, ServiceCoreError> {
        self.catalogue.find_by_provider(provider_id).await
    }

    /// Look up one of a provider's services.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceCoreError::NotFound`] when the entry does not exist
    /// or belongs to another provider, or a storage error from the repository.
    pub async fn get_service(
        &self,
        provider_id: ProviderId,
        id: CatalogueEntryId,
    ) -> Result<CatalogueEntry, ServiceCoreError> {
        let entry = self
            .catalogue
            .get_by_id(id)
            .await?
            .ok_or_else(|| NotFoundError::new("Service", &id))?;
        if entry.service_provider_id != provider_id {
            let scoped = format!("{id} for this provider");
            return Err(NotFoundError::new("Service", &scoped).into());
        }
        Ok(entry)
    }

    /// Apply a partial update to one of a provider's services.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceCoreError::NotFound`] as [`get_service`](Self::get_service)
    /// does, [`ServiceCoreError::Validation`] if the result is invalid, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update_service(
        &self,
        provider_id: ProviderId,
        id: CatalogueEntryId,
        user_id: UserId,
        patch: CataloguePatch,
    ) -> Result<CatalogueEntry, ServiceCoreError> {
        let mut entry = self.get_service(provider_id, id).await?;
        patch.apply(&mut entry.details);
        entry.details.validate()?;
        entry.updated_at = now();
        entry.updated_by = Some(user_id);
        let entry = self.catalogue.update(entry).await?;
        tracing::info!("service updated");
        Ok(entry)
    }

    /// Soft-delete one of a provider's services.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceCoreError::NotFound`] as [`get_service`](Self::get_service)
    /// does, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_service(
        &self,
        provider_id: ProviderId,
        id: CatalogueEntryId,
        user_id: UserId,
    ) -> Result<(), ServiceCoreError> {
        let mut entry = self.get_service(provider_id, id).await?;
        entry.is_deleted = true;
        entry.updated_at = now();
        entry.updated_by = Some(user_id);
        self.catalogue.update(entry).await?;
        tracing::info!("service deleted");
        Ok(())
    }

    /// Public search across every provider's catalogue.
    ///
    /// With an origin, only providers whose radius covers it are kept and
    /// results are ordered nearest first; otherwise newest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn search_public_services(
        &self,
        filter: SearchFilter,
    ) -> Result<Vec<Listing>, ServiceCoreError> {
        let candidates = self.catalogue.find_public_services(filter.clone()).await?;
        let matched = candidates.len();
        let listings = search::finish(&filter, candidates);
        if filter.origin.is_some() {
            tracing::debug!(
                matched,
                in_range = listings.len(),
                "applied distance filter"
            );
        }
        Ok(listings)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use servicecore_domain::catalogue::DurationType;
    use servicecore_domain::geo::GeoPoint;
    use servicecore_domain::id::ServiceTypeId;
    use servicecore_domain::provider::ProviderDraft;

    use super::*;
    use crate::services::fakes::InMemoryStore;
    use crate::services::provider_service::ProviderService;

    const OWNER: UserId = UserId::new(1);
    const NEW_YORK: GeoPoint = GeoPoint::new(40.7128, -74.0060);

    struct Fixture {
        svc: CatalogueService<InMemoryStore, InMemoryStore>,
        providers: ProviderService<InMemoryStore, InMemoryStore>,
        store: InMemoryStore,
    }

    impl Fixture {
        fn new() -> Self {
            let store = InMemoryStore::default();
            Self {
                svc: CatalogueService::new(store.clone(), store.clone()),
                providers: ProviderService::new(store.clone(), store.clone()),
                store,
            }
        }

        async fn provider(
            &self,
            service_type: i64,
            lat: &str,
            lng: &str,
            radius: i64,
        ) -> ProviderId {
            self.providers
                .create_provider(
                    OWNER,
                    ProviderDraft::new(ServiceTypeId::new(service_type))
                        .located_at(lat, lng)
                        .geo_radius(radius),
                )
                .await
                .unwrap()
                .id
        }

        async fn service(&self, provider: ProviderId, title: &str) -> CatalogueEntry {
            self.svc
                .create_service(
                    provider,
                    OWNER,
                    CatalogueDraft::new(title, Decimal::from(50), 45, DurationType::Minute),
                )
                .await
                .unwrap()
        }
    }

    fn titles(listings: &[Listing]) -> Vec<&str> {
        listings
            .iter()
            .map(|l| l.entry.details.title.as_str())
            .collect()
    }

    #[tokio::test]
    async fn should_create_service_with_defaults() {
        let fx = Fixture::new();
        let provider = fx.provider(1, "40.7128", "-74.0060", 10).await;

        let entry = fx.service(provider, "Premium Haircut").await;
        assert_eq!(entry.service_provider_id, provider);
        assert_eq!(entry.details.currency, "USD");
        assert_eq!(entry.details.serve_capacity, 1);
    }

    #[tokio::test]
    async fn should_reject_create_when_provider_missing() {
        let fx = Fixture::new();
        let result = fx
            .svc
            .create_service(
                ProviderId::new(999),
                OWNER,
                CatalogueDraft::new("Cut", Decimal::from(10), 30, DurationType::Minute),
            )
            .await;
        assert!(matches!(result, Err(ServiceCoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_reject_create_when_price_has_three_decimals() {
        let fx = Fixture::new();
        let provider = fx.provider(1, "40.7128", "-74.0060", 10).await;
        let result = fx
            .svc
            .create_service(
                provider,
                OWNER,
                CatalogueDraft::new("Cut", Decimal::new(10_005, 3), 30, DurationType::Minute),
            )
            .await;
        assert!(matches!(result, Err(ServiceCoreError::Validation(_))));
    }

    #[tokio::test]
    async fn should_return_not_found_when_service_belongs_to_other_provider() {
        let fx = Fixture::new();
        let owner = fx.provider(1, "40.7128", "-74.0060", 10).await;
        let other = fx.provider(1, "40.7128", "-74.0060", 10).await;
        let entry = fx.service(owner, "Cut").await;

        let Err(ServiceCoreError::NotFound(err)) = fx.svc.get_service(other, entry.id).await else {
            panic!("expected not found");
        };
        assert!(err.to_string().contains("for this provider"));
    }

    #[tokio::test]
    async fn should_update_only_supplied_fields() {
        let fx = Fixture::new();
        let provider = fx.provider(1, "40.7128", "-74.0060", 10).await;
        let entry = fx.service(provider, "Cut").await;

        let updated = fx
            .svc
            .update_service(
                provider,
                entry.id,
                UserId::new(3),
                CataloguePatch {
                    price: Some(Decimal::new(6550, 2)),
                    ..CataloguePatch::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.details.price, Decimal::new(6550, 2));
        assert_eq!(updated.details.title, "Cut");
        assert_eq!(updated.updated_by, Some(UserId::new(3)));
    }

    #[tokio::test]
    async fn should_soft_delete_service_and_record_editor() {
        let fx = Fixture::new();
        let provider = fx.provider(1, "40.7128", "-74.0060", 10).await;
        let entry = fx.service(provider, "Cut").await;

        fx.svc
            .delete_service(provider, entry.id, UserId::new(9))
            .await
            .unwrap();

        let raw = fx.store.raw_entry(entry.id).unwrap();
        assert!(raw.is_deleted);
        assert_eq!(raw.updated_by, Some(UserId::new(9)));
        assert!(
            fx.svc
                .list_provider_services(provider)
                .await
                .unwrap()
                .is_empty()
        );
        let result = fx.svc.get_service(provider, entry.id).await;
        assert!(matches!(result, Err(ServiceCoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_return_all_services_newest_first_without_filters() {
        let fx = Fixture::new();
        let provider = fx.provider(1, "40.7128", "-74.0060", 10).await;
        fx.service(provider, "First").await;
        fx.service(provider, "Second").await;

        let listings = fx
            .svc
            .search_public_services(SearchFilter::default())
            .await
            .unwrap();
        assert_eq!(titles(&listings), vec!["Second", "First"]);
        assert!(listings.iter().all(|l| l.provider.distance.is_none()));
    }

    #[tokio::test]
    async fn should_include_nearby_provider_and_exclude_distant_one() {
        let fx = Fixture::new();
        let nyc = fx.provider(1, "40.7128", "-74.0060", 10).await;
        let chicago = fx.provider(1, "41.8781", "-87.6298", 10).await;
        fx.service(nyc, "Manhattan Cut").await;
        fx.service(chicago, "Chicago Cut").await;

        let listings = fx
            .svc
            .search_public_services(SearchFilter::default().near(NEW_YORK))
            .await
            .unwrap();
        assert_eq!(titles(&listings), vec!["Manhattan Cut"]);
        assert_eq!(listings[0].provider.distance, Some(0.0));
    }

    #[tokio::test]
    async fn should_order_results_nearest_first() {
        let fx = Fixture::new();
        let near = fx.provider(1, "40.7130", "-74.0060", 10).await;
        let far = fx.provider(1, "40.7500", "-74.0060", 10).await;
        let middle = fx.provider(1, "40.7300", "-74.0060", 10).await;
        fx.service(near, "Near").await;
        fx.service(far, "Far").await;
        fx.service(middle, "Middle").await;

        let listings = fx
            .svc
            .search_public_services(SearchFilter::default().near(NEW_YORK))
            .await
            .unwrap();
        assert_eq!(titles(&listings), vec!["Near", "Middle", "Far"]);
    }

    #[tokio::test]
    async fn should_filter_by_service_type_and_keyword() {
        let fx = Fixture::new();
        let barber = fx.provider(1, "40.7128", "-74.0060", 10).await;
        let spa = fx.provider(2, "40.7128", "-74.0060", 10).await;
        fx.service(barber, "Premium Haircut").await;
        fx.service(barber, "Beard Trim").await;
        fx.service(spa, "Premium Massage").await;

        let listings = fx
            .svc
            .search_public_services(
                SearchFilter::default()
                    .with_service_type(ServiceTypeId::new(1))
                    .with_keyword("Premium"),
            )
            .await
            .unwrap();
        assert_eq!(titles(&listings), vec!["Premium Haircut"]);
    }

    #[tokio::test]
    async fn should_hide_services_of_deleted_providers() {
        let fx = Fixture::new();
        let provider = fx.provider(1, "40.7128", "-74.0060", 10).await;
        fx.service(provider, "Cut").await;
        fx.providers.delete_provider(provider, OWNER).await.unwrap();

        let listings = fx
            .svc
            .search_public_services(SearchFilter::default())
            .await
            .unwrap();
        assert!(listings.is_empty());
    }
}
