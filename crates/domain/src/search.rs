//! Public catalogue search: filters, listings and proximity ranking.
//!
//! The store applies the type and keyword predicates and returns listings
//! newest first. When the caller supplies a position, [`rank_by_distance`]
//! keeps only providers whose radius covers it and orders them nearest first.

use serde::{Deserialize, Serialize};

use crate::catalogue::CatalogueEntry;
use crate::error::ServiceCoreError;
use crate::geo::{self, GeoPoint};
use crate::id::{ProviderId, ServiceTypeId};
use crate::provider::{Provider, radius_or_default};
use crate::service_type::ServiceTypeSummary;
use crate::validation::{self, Violations};

/// Validated search criteria. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilter {
    pub service_type_id: Option<ServiceTypeId>,
    pub keyword: Option<String>,
    pub origin: Option<GeoPoint>,
}

impl SearchFilter {
    #[must_use]
    pub fn with_service_type(mut self, id: ServiceTypeId) -> Self {
        self.service_type_id = Some(id);
        self
    }

    #[must_use]
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    #[must_use]
    pub fn near(mut self, origin: GeoPoint) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Whether a listing satisfies the store-side predicates (deletion,
    /// service type and keyword). Distance is not considered.
    #[must_use]
    pub fn admits(&self, listing: &Listing) -> bool {
        if listing.entry.is_deleted {
            return false;
        }
        if self
            .service_type_id
            .is_some_and(|id| id != listing.provider.service_type_id)
        {
            return false;
        }
        self.keyword
            .as_deref()
            .is_none_or(|keyword| listing.entry.details.matches_keyword(keyword))
    }
}

/// Raw query-string parameters, exactly as received.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SearchQuery {
    #[serde(default)]
    pub service_type_id: Option<String>,
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default)]
    pub lat: Option<String>,
    #[serde(default)]
    pub lng: Option<String>,
}

impl SearchQuery {
    /// Check every parameter and build the filter.
    ///
    /// Blank parameters count as absent. Coordinates only filter when both
    /// are present.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceCoreError::Validation`] listing each malformed
    /// parameter.
    pub fn into_filter(self) -> Result<SearchFilter, ServiceCoreError> {
        let mut violations = Violations::default();
        let mut filter = SearchFilter::default();

        if let Some(raw) = present(self.service_type_id) {
            match raw.parse::<ServiceTypeId>() {
                Ok(id) => filter.service_type_id = Some(id),
                Err(_) => violations.check(
                    "serviceTypeId",
                    Err("must be a positive integer".to_string()),
                ),
            }
        }

        filter.keyword = present(self.keyword);

        let lat = present(self.lat).and_then(|raw| match validation::latitude(&raw) {
            Ok(value) => Some(value),
            Err(message) => {
                violations.check("lat", Err(message));
                None
            }
        });
        let lng = present(self.lng).and_then(|raw| match validation::longitude(&raw) {
            Ok(value) => Some(value),
            Err(message) => {
                violations.check("lng", Err(message));
                None
            }
        });

        violations.into_result()?;
        if let (Some(lat), Some(lng)) = (lat, lng) {
            filter.origin = Some(GeoPoint::new(lat, lng));
        }
        Ok(filter)
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// The provider fields exposed alongside a search hit.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSummary {
    pub id: ProviderId,
    pub service_type_id: ServiceTypeId,
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub geo_radius: i64,
    pub service_type: ServiceTypeSummary,
    /// Kilometres from the caller, rounded to two decimals. Only set by
    /// [`rank_by_distance`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

impl ProviderSummary {
    #[must_use]
    pub fn location(&self) -> Option<GeoPoint> {
        geo::parse_location(self.lat.as_deref(), self.lng.as_deref())
    }

    #[must_use]
    pub fn radius_km(&self) -> f64 {
        radius_or_default(self.geo_radius)
    }
}

impl From<&Provider> for ProviderSummary {
    fn from(provider: &Provider) -> Self {
        Self {
            id: provider.id,
            service_type_id: provider.profile.service_type_id,
            lat: provider.profile.lat.clone(),
            lng: provider.profile.lng.clone(),
            geo_radius: provider.profile.geo_radius,
            service_type: provider.service_type.clone().into(),
            distance: None,
        }
    }
}

/// A catalogue entry joined with its provider.
#[derive(Debug, Clone, Serialize)]
pub struct Listing {
    #[serde(flatten)]
    pub entry: CatalogueEntry,
    pub provider: ProviderSummary,
}

/// Keep the listings whose provider serves `origin`, nearest first.
///
/// Providers without a recorded location are dropped. The sort is stable,
/// so equidistant listings keep their incoming order.
#[must_use]
pub fn rank_by_distance(listings: Vec<Listing>, origin: GeoPoint) -> Vec<Listing> {
    let mut ranked: Vec<(f64, Listing)> = listings
        .into_iter()
        .filter_map(|listing| {
            let location = listing.provider.location()?;
            let distance = origin.distance_km(location);
            (distance <= listing.provider.radius_km()).then_some((distance, listing))
        })
        .collect();
    ranked.sort_by(|(a, _), (b, _)| a.total_cmp(b));
    ranked
        .into_iter()
        .map(|(distance, mut listing)| {
            listing.provider.distance = Some(geo::round_km(distance));
            listing
        })
        .collect()
}

/// Apply the distance step of `filter`, if any.
#[must_use]
pub fn finish(filter: &SearchFilter, listings: Vec<Listing>) -> Vec<Listing> {
    match filter.origin {
        Some(origin) => rank_by_distance(listings, origin),
        None => listings,
    }
}
