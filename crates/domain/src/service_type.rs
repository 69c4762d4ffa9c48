//! Service type: a category tag (e.g. "Hair Salon") shared by providers.

use serde::{Deserialize, Serialize};

use crate::id::ServiceTypeId;

/// Read-only reference data used to classify providers and filter searches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceType {
    pub id: ServiceTypeId,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
}

/// The subset of a [`ServiceType`] embedded in search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceTypeSummary {
    pub id: ServiceTypeId,
    pub name: String,
    pub description: Option<String>,
}

impl From<ServiceType> for ServiceTypeSummary {
    fn from(value: ServiceType) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
        }
    }
}
