//! Provider service: use-cases for managing providers.

use servicecore_domain::error::{NotFoundError, ServiceCoreError, ValidationError};
use servicecore_domain::id::{ProviderId, ServiceTypeId, UserId};
use servicecore_domain::provider::{NewProvider, Provider, ProviderDraft, ProviderPatch};
use servicecore_domain::service_type::ServiceType;
use servicecore_domain::time::now;

use crate::ports::{ProviderRepository, ServiceTypeRepository};

/// Application service for provider CRUD operations.
pub struct ProviderService<P, T> {
    providers: P,
    service_types: T,
}

impl<P: ProviderRepository, T: ServiceTypeRepository> ProviderService<P, T> {
    /// Create a new service backed by the given repositories.
    pub fn new(providers: P, service_types: T) -> Self {
        Self {
            providers,
            service_types,
        }
    }

    async fn require_service_type(
        &self,
        id: ServiceTypeId,
    ) -> Result<ServiceType, ServiceCoreError> {
        self.service_types
            .get_by_id(id)
            .await?
            .ok_or_else(|| ValidationError::UnknownServiceType(id).into())
    }

    /// Register a provider for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceCoreError::Validation`] if a field is invalid or the
    /// service type does not exist, or a storage error from the repository.
    #[tracing::instrument(skip(self, draft), fields(service_type_id = %draft.service_type_id))]
    pub async fn create_provider(
        &self,
        user_id: UserId,
        draft: ProviderDraft,
    ) -> Result<Provider, ServiceCoreError> {
        let profile = draft.into_profile();
        profile.validate()?;
        self.require_service_type(profile.service_type_id).await?;
        let provider = self
            .providers
            .create(NewProvider {
                user_id,
                profile,
                created_at: now(),
            })
            .await?;
        tracing::info!(provider_id = %provider.id, "provider created");
        Ok(provider)
    }

    /// Look up a provider by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceCoreError::NotFound`] when no active provider with
    /// `id` exists, or a storage error from the repository.
    pub async fn get_provider(&self, id: ProviderId) -> Result<Provider, ServiceCoreError> {
        self.providers
            .get_by_id(id)
            .await?
            .ok_or_else(|| NotFoundError::new("Service provider", &id).into())
    }

    /// List the active providers owned by a user.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_providers_by_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Provider>, ServiceCoreError> {
        self.providers.find_by_user(user_id).await
    }

    /// Apply a partial update to a provider.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceCoreError::NotFound`] if the provider does not exist,
    /// [`ServiceCoreError::Validation`] if the result is invalid or names an
    /// unknown service type, or a storage error from the repository.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update_provider(
        &self,
        id: ProviderId,
        user_id: UserId,
        patch: ProviderPatch,
    ) -> Result<Provider, ServiceCoreError> {
        let mut provider = self.get_provider(id).await?;
        let previous_type = provider.profile.service_type_id;
        patch.apply(&mut provider.profile);
        provider.profile.validate()?;
        if provider.profile.service_type_id != previous_type {
            provider.service_type = self
                .require_service_type(provider.profile.service_type_id)
                .await?;
        }
        provider.updated_at = now();
        provider.updated_by = Some(user_id);
        let provider = self.providers.update(provider).await?;
        tracing::info!("provider updated");
        Ok(provider)
    }

    /// Soft-delete a provider, returning the deleted record.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceCoreError::NotFound`] if the provider does not exist,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_provider(
        &self,
        id: ProviderId,
        user_id: UserId,
    ) -> Result<Provider, ServiceCoreError> {
        let mut provider = self.get_provider(id).await?;
        provider.is_deleted = true;
        provider.updated_at = now();
        provider.updated_by = Some(user_id);
        let provider = self.providers.update(provider).await?;
        tracing::info!("provider deleted");
        Ok(provider)
    }
}
