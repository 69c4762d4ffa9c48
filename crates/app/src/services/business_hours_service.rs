//! Business hours service: use-cases for a provider's weekly opening windows.

use chrono::NaiveTime;
use servicecore_domain::business_hours::{
    BusinessHours, HoursDraft, HoursPatch, HoursWindow, NewBusinessHours,
};
use servicecore_domain::error::{NotFoundError, ServiceCoreError, ValidationError};
use servicecore_domain::id::{BusinessHoursId, ProviderId};
use servicecore_domain::time::now;
use servicecore_domain::validation::Violations;

use crate::ports::{BusinessHoursRepository, ProviderRepository};

/// Application service for business-hours operations.
pub struct BusinessHoursService<H, P> {
    hours: H,
    providers: P,
}

impl<H: BusinessHoursRepository, P: ProviderRepository> BusinessHoursService<H, P> {
    /// Create a new service backed by the given repositories.
    pub fn new(hours: H, providers: P) -> Self {
        Self { hours, providers }
    }

    async fn require_provider(&self, id: ProviderId) -> Result<(), ServiceCoreError> {
        match self.providers.get_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(NotFoundError::new("Service provider", &id).into()),
        }
    }

    async fn owned(
        &self,
        provider_id: ProviderId,
        id: BusinessHoursId,
    ) -> Result<BusinessHours, ServiceCoreError> {
        self.hours
            .get_by_id(id)
            .await?
            .filter(|hours| hours.provider_id == provider_id)
            .ok_or_else(|| NotFoundError::new("Business hours", &id).into())
    }

    /// Add the window for one weekday.
    ///
    /// A soft-deleted row for the same day is revived.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceCoreError::NotFound`] if the provider does not exist,
    /// [`ServiceCoreError::Validation`] if the window is invalid or the day
    /// already has one, or a storage error from the repository.
    #[tracing::instrument(skip(self, draft), fields(day_of_week = draft.day_of_week))]
    pub async fn create_business_hours(
        &self,
        provider_id: ProviderId,
        draft: HoursDraft,
    ) -> Result<BusinessHours, ServiceCoreError> {
        let window = draft.into_window()?;
        self.require_provider(provider_id).await?;
        if self
            .hours
            .find_by_provider_and_day(provider_id, window.day_of_week)
            .await?
            .is_some()
        {
            return Err(ValidationError::DuplicateDay(window.day_of_week).into());
        }
        let hours = self
            .hours
            .upsert(NewBusinessHours {
                provider_id,
                window,
                created_at: now(),
            })
            .await?;
        tracing::info!(hours_id = %hours.id, "business hours created");
        Ok(hours)
    }

    /// List a provider's windows, Sunday first.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_business_hours(
        &self,
        provider_id: ProviderId,
    ) -> Result<Vec<BusinessHours>, ServiceCoreError> {
        self.hours.find_by_provider(provider_id).await
    }

    /// Apply a partial update to one window.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceCoreError::NotFound`] if the window does not exist or
    /// belongs to another provider, [`ServiceCoreError::Validation`] if the
    /// merged window is invalid or moves onto an occupied day, or a storage
    /// error from the repository.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update_business_hours(
        &self,
        provider_id: ProviderId,
        id: BusinessHoursId,
        patch: HoursPatch,
    ) -> Result<BusinessHours, ServiceCoreError> {
        let mut hours = self.owned(provider_id, id).await?;
        let window = patch.apply(&hours.window)?;
        if window.day_of_week != hours.window.day_of_week
            && self
                .hours
                .find_by_provider_and_day(provider_id, window.day_of_week)
                .await?
                .is_some()
        {
            return Err(ValidationError::DuplicateDay(window.day_of_week).into());
        }
        hours.window = window;
        hours.updated_at = now();
        let hours = self.hours.update(hours).await?;
        tracing::info!("business hours updated");
        Ok(hours)
    }

    /// Soft-delete one window, returning the deleted record.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceCoreError::NotFound`] if the window does not exist or
    /// belongs to another provider, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_business_hours(
        &self,
        provider_id: ProviderId,
        id: BusinessHoursId,
    ) -> Result<BusinessHours, ServiceCoreError> {
        let mut hours = self.owned(provider_id, id).await?;
        hours.is_deleted = true;
        hours.updated_at = now();
        let hours = self.hours.update(hours).await?;
        tracing::info!("business hours deleted");
        Ok(hours)
    }

    /// Whether the provider is open on `day_of_week` at `time`.
    ///
    /// Days without a window, and closed days, are never open.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn is_time_within_business_hours(
        &self,
        provider_id: ProviderId,
        day_of_week: u8,
        time: NaiveTime,
    ) -> Result<bool, ServiceCoreError> {
        let hours = self
            .hours
            .find_by_provider_and_day(provider_id, day_of_week)
            .await?;
        Ok(hours.is_some_and(|hours| hours.window.contains(time)))
    }

    /// Replace the windows for every day in `drafts`.
    ///
    /// Every draft is checked before anything is written; failures are
    /// reported together with their position (`[2].openTime`).
    ///
    /// # Errors
    ///
    /// Returns [`ServiceCoreError::NotFound`] if the provider does not exist,
    /// [`ServiceCoreError::Validation`] if any draft is invalid or two drafts
    /// name the same day, or a storage error from the repository.
    #[tracing::instrument(skip(self, drafts), fields(count = drafts.len()))]
    pub async fn bulk_upsert_business_hours(
        &self,
        provider_id: ProviderId,
        drafts: Vec<HoursDraft>,
    ) -> Result<Vec<BusinessHours>, ServiceCoreError> {
        let mut violations = Violations::default();
        let mut windows: Vec<HoursWindow> = Vec::with_capacity(drafts.len());
        for (idx, draft) in drafts.iter().enumerate() {
            let prefix = format!("[{idx}].");
            match draft.parse() {
                Ok(window) => {
                    let mut ordering = Violations::default();
                    ordering.check("closeTime", window.validate().map_err(|err| describe(&err)));
                    if windows.iter().any(|w| w.day_of_week == window.day_of_week) {
                        ordering.check("dayOfWeek", Err("day appears more than once".to_string()));
                    }
                    violations.extend_prefixed(&prefix, ordering);
                    windows.push(window);
                }
                Err(found) => violations.extend_prefixed(&prefix, found),
            }
        }
        violations.into_result()?;
        self.require_provider(provider_id).await?;

        let created_at = now();
        let rows = windows
            .into_iter()
            .map(|window| NewBusinessHours {
                provider_id,
                window,
                created_at,
            })
            .collect();
        let hours = self.hours.upsert_many(rows).await?;
        tracing::info!(count = hours.len(), "business hours upserted");
        Ok(hours)
    }
}

fn describe(err: &ServiceCoreError) -> String {
    match err {
        ServiceCoreError::Validation(inner) => inner.to_string(),
        other => other.to_string(),
    }
}
