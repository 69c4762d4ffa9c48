//! In-memory repositories shared by the service tests.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use servicecore_domain::business_hours::{BusinessHours, NewBusinessHours};
use servicecore_domain::catalogue::{CatalogueEntry, NewCatalogueEntry};
use servicecore_domain::error::ServiceCoreError;
use servicecore_domain::id::{BusinessHoursId, CatalogueEntryId, ProviderId, ServiceTypeId, UserId};
use servicecore_domain::provider::{NewProvider, Provider};
use servicecore_domain::search::{Listing, SearchFilter};
use servicecore_domain::service_type::ServiceType;

use crate::ports::{
    BusinessHoursRepository, CatalogueRepository, ProviderRepository, ServiceTypeRepository,
};

#[derive(Default)]
struct State {
    next_id: i64,
    service_types: HashMap<ServiceTypeId, ServiceType>,
    providers: HashMap<ProviderId, Provider>,
    hours: HashMap<BusinessHoursId, BusinessHours>,
    catalogue: HashMap<CatalogueEntryId, CatalogueEntry>,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn upsert_hours(&mut self, new: NewBusinessHours) -> BusinessHours {
        let existing = self
            .hours
            .values()
            .filter(|h| {
                h.provider_id == new.provider_id && h.window.day_of_week == new.window.day_of_week
            })
            .min_by_key(|h| (h.is_deleted, std::cmp::Reverse(h.id)))
            .cloned();
        let hours = match existing {
            Some(mut hours) => {
                hours.window = new.window;
                hours.is_deleted = false;
                hours.updated_at = new.created_at;
                hours
            }
            None => BusinessHours {
                id: BusinessHoursId::new(self.next_id()),
                provider_id: new.provider_id,
                window: new.window,
                status: 0,
                created_at: new.created_at,
                updated_at: new.created_at,
                is_deleted: false,
            },
        };
        self.hours.insert(hours.id, hours.clone());
        hours
    }
}

/// One shared store implementing every repository port.
#[derive(Clone)]
pub(crate) struct InMemoryStore {
    state: Arc<Mutex<State>>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        let mut state = State::default();
        for (id, name) in [(1, "Barber Shop"), (2, "Spa"), (3, "Hair Salon")] {
            let id = ServiceTypeId::new(id);
            state.service_types.insert(
                id,
                ServiceType {
                    id,
                    name: name.to_string(),
                    description: None,
                    icon: None,
                },
            );
        }
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }
}

impl InMemoryStore {
    /// Every stored provider, soft-deleted ones included.
    pub(crate) fn raw_provider(&self, id: ProviderId) -> Option<Provider> {
        self.state.lock().unwrap().providers.get(&id).cloned()
    }

    pub(crate) fn raw_entry(&self, id: CatalogueEntryId) -> Option<CatalogueEntry> {
        self.state.lock().unwrap().catalogue.get(&id).cloned()
    }

    pub(crate) fn hours_rows(&self) -> usize {
        self.state.lock().unwrap().hours.len()
    }
}

impl ServiceTypeRepository for InMemoryStore {
    fn get_by_id(
        &self,
        id: ServiceTypeId,
    ) -> impl Future<Output = Result<Option<ServiceType>, ServiceCoreError>> + Send {
        let result = self.state.lock().unwrap().service_types.get(&id).cloned();
        async { Ok(result) }
    }
}

impl ProviderRepository for InMemoryStore {
    fn create(
        &self,
        provider: NewProvider,
    ) -> impl Future<Output = Result<Provider, ServiceCoreError>> + Send {
        let mut state = self.state.lock().unwrap();
        let id = ProviderId::new(state.next_id());
        let service_type = state.service_types[&provider.profile.service_type_id].clone();
        let stored = Provider {
            id,
            user_id: provider.user_id,
            profile: provider.profile,
            status: 0,
            created_at: provider.created_at,
            updated_at: provider.created_at,
            updated_by: None,
            is_deleted: false,
            service_type,
        };
        state.providers.insert(id, stored.clone());
        async { Ok(stored) }
    }

    fn get_by_id(
        &self,
        id: ProviderId,
    ) -> impl Future<Output = Result<Option<Provider>, ServiceCoreError>> + Send {
        let state = self.state.lock().unwrap();
        let result = state.providers.get(&id).filter(|p| !p.is_deleted).cloned();
        async { Ok(result) }
    }

    fn find_by_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<Provider>, ServiceCoreError>> + Send {
        let state = self.state.lock().unwrap();
        let mut result: Vec<Provider> = state
            .providers
            .values()
            .filter(|p| p.user_id == user_id && !p.is_deleted)
            .cloned()
            .collect();
        result.sort_by_key(|p| p.id);
        async { Ok(result) }
    }

    fn update(
        &self,
        provider: Provider,
    ) -> impl Future<Output = Result<Provider, ServiceCoreError>> + Send {
        let mut state = self.state.lock().unwrap();
        state.providers.insert(provider.id, provider.clone());
        async { Ok(provider) }
    }
}

impl BusinessHoursRepository for InMemoryStore {
    fn find_by_provider(
        &self,
        provider_id: ProviderId,
    ) -> impl Future<Output = Result<Vec<BusinessHours>, ServiceCoreError>> + Send {
        let state = self.state.lock().unwrap();
        let mut result: Vec<BusinessHours> = state
            .hours
            .values()
            .filter(|h| h.provider_id == provider_id && !h.is_deleted)
            .cloned()
            .collect();
        result.sort_by_key(|h| h.window.day_of_week);
        async { Ok(result) }
    }

    fn find_by_provider_and_day(
        &self,
        provider_id: ProviderId,
        day_of_week: u8,
    ) -> impl Future<Output = Result<Option<BusinessHours>, ServiceCoreError>> + Send {
        let state = self.state.lock().unwrap();
        let result = state
            .hours
            .values()
            .find(|h| {
                h.provider_id == provider_id && h.window.day_of_week == day_of_week && !h.is_deleted
            })
            .cloned();
        async { Ok(result) }
    }

    fn get_by_id(
        &self,
        id: BusinessHoursId,
    ) -> impl Future<Output = Result<Option<BusinessHours>, ServiceCoreError>> + Send {
        let state = self.state.lock().unwrap();
        let result = state.hours.get(&id).filter(|h| !h.is_deleted).cloned();
        async { Ok(result) }
    }

    fn upsert(
        &self,
        hours: NewBusinessHours,
    ) -> impl Future<Output = Result<BusinessHours, ServiceCoreError>> + Send {
        let result = self.state.lock().unwrap().upsert_hours(hours);
        async { Ok(result) }
    }

    fn upsert_many(
        &self,
        hours: Vec<NewBusinessHours>,
    ) -> impl Future<Output = Result<Vec<BusinessHours>, ServiceCoreError>> + Send {
        let mut state = self.state.lock().unwrap();
        let result: Vec<BusinessHours> = hours.into_iter().map(|h| state.upsert_hours(h)).collect();
        async { Ok(result) }
    }

    fn update(
        &self,
        hours: BusinessHours,
    ) -> impl Future<Output = Result<BusinessHours, ServiceCoreError>> + Send {
        let mut state = self.state.lock().unwrap();
        state.hours.insert(hours.id, hours.clone());
        async { Ok(hours) }
    }
}

impl CatalogueRepository for InMemoryStore {
    fn create(
        &self,
        entry: NewCatalogueEntry,
    ) -> impl Future<Output = Result<CatalogueEntry, ServiceCoreError>> + Send {
        let mut state = self.state.lock().unwrap();
        let id = CatalogueEntryId::new(state.next_id());
        let stored = CatalogueEntry {
            id,
            user_id: entry.user_id,
            service_provider_id: entry.provider_id,
            details: entry.details,
            status: 0,
            created_at: entry.created_at,
            updated_at: entry.created_at,
            updated_by: None,
            is_deleted: false,
        };
        state.catalogue.insert(id, stored.clone());
        async { Ok(stored) }
    }

    fn get_by_id(
        &self,
        id: CatalogueEntryId,
    ) -> impl Future<Output = Result<Option<CatalogueEntry>, ServiceCoreError>> + Send {
        let state = self.state.lock().unwrap();
        let result = state.catalogue.get(&id).filter(|e| !e.is_deleted).cloned();
        async { Ok(result) }
    }

    fn find_by_provider(
        &self,
        provider_id: ProviderId,
    ) -> impl Future<Output = Result<Vec<CatalogueEntry>, ServiceCoreError>> + Send {
        let state = self.state.lock().unwrap();
        let mut result: Vec<CatalogueEntry> = state
            .catalogue
            .values()
            .filter(|e| e.service_provider_id == provider_id && !e.is_deleted)
            .cloned()
            .collect();
        result.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        async { Ok(result) }
    }

    fn update(
        &self,
        entry: CatalogueEntry,
    ) -> impl Future<Output = Result<CatalogueEntry, ServiceCoreError>> + Send {
        let mut state = self.state.lock().unwrap();
        state.catalogue.insert(entry.id, entry.clone());
        async { Ok(entry) }
    }

    fn find_public_services(
        &self,
        filter: SearchFilter,
    ) -> impl Future<Output = Result<Vec<Listing>, ServiceCoreError>> + Send {
        let state = self.state.lock().unwrap();
        let mut result: Vec<Listing> = state
            .catalogue
            .values()
            .filter_map(|entry| {
                let provider = state
                    .providers
                    .get(&entry.service_provider_id)
                    .filter(|p| !p.is_deleted)?;
                Some(Listing {
                    entry: entry.clone(),
                    provider: provider.into(),
                })
            })
            .filter(|listing| filter.admits(listing))
            .collect();
        result.sort_by(|a, b| {
            (b.entry.created_at, b.entry.id).cmp(&(a.entry.created_at, a.entry.id))
        });
        async { Ok(result) }
    }
}
