//! Provider: a business that sells services from a location within a
//! declared service radius.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ServiceCoreError;
use crate::format::flag;
use crate::geo::{self, GeoPoint};
use crate::id::{ProviderId, ServiceTypeId, UserId};
use crate::service_type::ServiceType;
use crate::time::Timestamp;
use crate::validation::{self, Violations};

/// Service radius applied when a provider declares none, in kilometres.
pub const DEFAULT_GEO_RADIUS_KM: i64 = 10;

/// How an advance payment is expressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvancePayType {
    Amount,
    #[default]
    Percent,
}

impl AdvancePayType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Amount => "amount",
            Self::Percent => "percent",
        }
    }
}

impl fmt::Display for AdvancePayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`AdvancePayType`].
#[derive(Debug, thiserror::Error)]
#[error("unknown advance pay type `{0}`")]
pub struct UnknownAdvancePayType(String);

impl FromStr for AdvancePayType {
    type Err = UnknownAdvancePayType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "amount" => Ok(Self::Amount),
            "percent" => Ok(Self::Percent),
            other => Err(UnknownAdvancePayType(other.to_string())),
        }
    }
}

/// The editable attributes of a provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderProfile {
    pub service_type_id: ServiceTypeId,
    pub lat: Option<String>,
    pub lng: Option<String>,
    /// Maximum distance, in kilometres, at which the provider accepts customers.
    pub geo_radius: i64,
    pub advance_pay_type: AdvancePayType,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub advance_value: Option<Decimal>,
    #[serde(with = "flag")]
    pub has_cancellation: bool,
    /// Minutes before the appointment after which cancelling is refused.
    pub cancellation_time: Option<i64>,
    pub capacity: i64,
    pub logo: Option<String>,
}

impl ProviderProfile {
    /// Check field constraints, reporting every failure.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceCoreError::Validation`] listing each violated field.
    pub fn validate(&self) -> Result<(), ServiceCoreError> {
        let mut violations = Violations::default();
        match (self.lat.as_deref(), self.lng.as_deref()) {
            (Some(lat), Some(lng)) => {
                violations.check("lat", validation::latitude(lat).map(|_| ()));
                violations.check("lng", validation::longitude(lng).map(|_| ()));
            }
            (None, None) => {}
            _ => violations.check(
                "lat",
                Err("lat and lng must be provided together".to_string()),
            ),
        }
        violations.check("geoRadius", validation::at_least(self.geo_radius, 1));
        if let Some(value) = self.advance_value {
            violations.check("advanceValue", validation::non_negative_amount(value));
        }
        if let Some(minutes) = self.cancellation_time {
            violations.check("cancellationTime", validation::at_least(minutes, 0));
        }
        violations.check("capacity", validation::at_least(self.capacity, 1));
        violations.into_result()?;
        Ok(())
    }

    /// Parsed coordinates, when both are recorded.
    #[must_use]
    pub fn location(&self) -> Option<GeoPoint> {
        geo::parse_location(self.lat.as_deref(), self.lng.as_deref())
    }

    /// Service radius in kilometres, falling back to
    /// [`DEFAULT_GEO_RADIUS_KM`] when unset.
    #[must_use]
    pub fn radius_km(&self) -> f64 {
        radius_or_default(self.geo_radius)
    }
}

/// Service radius in kilometres for a stored `geo_radius`; zero or negative
/// means unset.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn radius_or_default(geo_radius: i64) -> f64 {
    if geo_radius > 0 {
        geo_radius as f64
    } else {
        DEFAULT_GEO_RADIUS_KM as f64
    }
}

/// A stored provider.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub id: ProviderId,
    pub user_id: UserId,
    #[serde(flatten)]
    pub profile: ProviderProfile,
    pub status: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub updated_by: Option<UserId>,
    #[serde(with = "flag")]
    pub is_deleted: bool,
    pub service_type: ServiceType,
}

/// Everything needed to insert a provider; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewProvider {
    pub user_id: UserId,
    pub profile: ProviderProfile,
    pub created_at: Timestamp,
}

/// Request payload for creating a provider.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProviderDraft {
    pub service_type_id: ServiceTypeId,
    #[serde(default)]
    pub lat: Option<String>,
    #[serde(default)]
    pub lng: Option<String>,
    #[serde(default)]
    pub geo_radius: Option<i64>,
    #[serde(default)]
    pub advance_pay_type: Option<AdvancePayType>,
    #[serde(default)]
    pub advance_value: Option<Decimal>,
    #[serde(default, deserialize_with = "flag::option::deserialize")]
    pub has_cancellation: Option<bool>,
    #[serde(default)]
    pub cancellation_time: Option<i64>,
    #[serde(default)]
    pub capacity: Option<i64>,
    #[serde(default)]
    pub logo: Option<String>,
}

impl ProviderDraft {
    /// Minimal draft: only the service type, every other field defaulted.
    #[must_use]
    pub fn new(service_type_id: ServiceTypeId) -> Self {
        Self {
            service_type_id,
            lat: None,
            lng: None,
            geo_radius: None,
            advance_pay_type: None,
            advance_value: None,
            has_cancellation: None,
            cancellation_time: None,
            capacity: None,
            logo: None,
        }
    }

    #[must_use]
    pub fn located_at(mut self, lat: impl Into<String>, lng: impl Into<String>) -> Self {
        self.lat = Some(lat.into());
        self.lng = Some(lng.into());
        self
    }

    #[must_use]
    pub fn geo_radius(mut self, km: i64) -> Self {
        self.geo_radius = Some(km);
        self
    }

    /// Apply defaults for every omitted field.
    #[must_use]
    pub fn into_profile(self) -> ProviderProfile {
        ProviderProfile {
            service_type_id: self.service_type_id,
            lat: self.lat,
            lng: self.lng,
            geo_radius: self.geo_radius.unwrap_or(DEFAULT_GEO_RADIUS_KM),
            advance_pay_type: self.advance_pay_type.unwrap_or_default(),
            advance_value: self.advance_value,
            has_cancellation: self.has_cancellation.unwrap_or(false),
            cancellation_time: self.cancellation_time,
            capacity: self.capacity.unwrap_or(1),
            logo: self.logo,
        }
    }
}

/// Request payload for a partial provider update; `None` leaves a field as is.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProviderPatch {
    #[serde(default)]
    pub service_type_id: Option<ServiceTypeId>,
    #[serde(default)]
    pub lat: Option<String>,
    #[serde(default)]
    pub lng: Option<String>,
    #[serde(default)]
    pub geo_radius: Option<i64>,
    #[serde(default)]
    pub advance_pay_type: Option<AdvancePayType>,
    #[serde(default)]
    pub advance_value: Option<Decimal>,
    #[serde(default, deserialize_with = "flag::option::deserialize")]
    pub has_cancellation: Option<bool>,
    #[serde(default)]
    pub cancellation_time: Option<i64>,
    #[serde(default)]
    pub capacity: Option<i64>,
    #[serde(default)]
    pub logo: Option<String>,
}

impl ProviderPatch {
    /// Overwrite the supplied fields of `profile`.
    pub fn apply(self, profile: &mut ProviderProfile) {
        if let Some(value) = self.service_type_id {
            profile.service_type_id = value;
        }
        if let Some(value) = self.lat {
            profile.lat = Some(value);
        }
        if let Some(value) = self.lng {
            profile.lng = Some(value);
        }
        if let Some(value) = self.geo_radius {
            profile.geo_radius = value;
        }
        if let Some(value) = self.advance_pay_type {
            profile.advance_pay_type = value;
        }
        if let Some(value) = self.advance_value {
            profile.advance_value = Some(value);
        }
        if let Some(value) = self.has_cancellation {
            profile.has_cancellation = value;
        }
        if let Some(value) = self.cancellation_time {
            profile.cancellation_time = Some(value);
        }
        if let Some(value) = self.capacity {
            profile.capacity = value;
        }
        if let Some(value) = self.logo {
            profile.logo = Some(value);
        }
    }
}
