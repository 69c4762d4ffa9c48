//! Catalogue entry: a service a provider sells.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ServiceCoreError;
use crate::format::flag;
use crate::id::{CatalogueEntryId, ProviderId, UserId};
use crate::time::Timestamp;
use crate::validation::{self, Violations};

/// Currency applied when none is given.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Unit in which a service's duration is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationType {
    Minute,
    Hour,
    Day,
}

impl DurationType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
        }
    }
}

impl fmt::Display for DurationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`DurationType`].
#[derive(Debug, thiserror::Error)]
#[error("unknown duration type `{0}`")]
pub struct UnknownDurationType(String);

impl FromStr for DurationType {
    type Err = UnknownDurationType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minute" => Ok(Self::Minute),
            "hour" => Ok(Self::Hour),
            "day" => Ok(Self::Day),
            other => Err(UnknownDurationType(other.to_string())),
        }
    }
}

/// The editable attributes of a catalogue entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogueDetails {
    pub image: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub currency: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(with = "flag")]
    pub is_price_range: bool,
    /// Upper bound of the price when `is_price_range` is set.
    #[serde(with = "rust_decimal::serde::float_option")]
    pub range_price: Option<Decimal>,
    pub duration_type: DurationType,
    pub duration: i64,
    /// How many customers can be served simultaneously.
    pub serve_capacity: i64,
}

impl CatalogueDetails {
    /// Check field constraints, reporting every failure.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceCoreError::Validation`] listing each violated field.
    pub fn validate(&self) -> Result<(), ServiceCoreError> {
        let mut violations = Violations::default();
        violations.check("title", validation::not_blank(&self.title));
        violations.check("title", validation::max_len(&self.title, 255));
        violations.check("currency", validation::not_blank(&self.currency));
        violations.check("currency", validation::max_len(&self.currency, 10));
        violations.check("price", validation::positive_amount(self.price));
        if let Some(range_price) = self.range_price {
            violations.check("rangePrice", validation::positive_amount(range_price));
        }
        violations.check("duration", validation::at_least(self.duration, 1));
        violations.check(
            "serveCapacity",
            validation::at_least(self.serve_capacity, 1),
        );
        violations.into_result()?;
        Ok(())
    }

    /// Case-insensitive substring match on title or description.
    #[must_use]
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        let needle = keyword.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self
                .description
                .as_deref()
                .is_some_and(|text| text.to_lowercase().contains(&needle))
    }
}

/// A stored catalogue entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogueEntry {
    pub id: CatalogueEntryId,
    pub user_id: UserId,
    pub service_provider_id: ProviderId,
    #[serde(flatten)]
    pub details: CatalogueDetails,
    pub status: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub updated_by: Option<UserId>,
    #[serde(with = "flag")]
    pub is_deleted: bool,
}

/// Everything needed to insert a catalogue entry; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewCatalogueEntry {
    pub user_id: UserId,
    pub provider_id: ProviderId,
    pub details: CatalogueDetails,
    pub created_at: Timestamp,
}

/// Request payload for creating a catalogue entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CatalogueDraft {
    pub title: String,
    pub price: Decimal,
    pub duration: i64,
    pub duration_type: DurationType,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "flag::option::deserialize")]
    pub is_price_range: Option<bool>,
    #[serde(default)]
    pub range_price: Option<Decimal>,
    #[serde(default)]
    pub serve_capacity: Option<i64>,
}

impl CatalogueDraft {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        price: Decimal,
        duration: i64,
        duration_type: DurationType,
    ) -> Self {
        Self {
            title: title.into(),
            price,
            duration,
            duration_type,
            description: None,
            image: None,
            currency: None,
            is_price_range: None,
            range_price: None,
            serve_capacity: None,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Apply defaults for every omitted field.
    #[must_use]
    pub fn into_details(self) -> CatalogueDetails {
        CatalogueDetails {
            image: self.image,
            title: self.title,
            description: self.description,
            currency: self
                .currency
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            price: self.price,
            is_price_range: self.is_price_range.unwrap_or(false),
            range_price: self.range_price,
            duration_type: self.duration_type,
            duration: self.duration,
            serve_capacity: self.serve_capacity.unwrap_or(1),
        }
    }
}

/// Request payload for a partial update; `None` leaves a field as is.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CataloguePatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub duration: Option<i64>,
    #[serde(default)]
    pub duration_type: Option<DurationType>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "flag::option::deserialize")]
    pub is_price_range: Option<bool>,
    #[serde(default)]
    pub range_price: Option<Decimal>,
    #[serde(default)]
    pub serve_capacity: Option<i64>,
}

impl CataloguePatch {
    /// Overwrite the supplied fields of `details`.
    pub fn apply(self, details: &mut CatalogueDetails) {
        if let Some(value) = self.title {
            details.title = value;
        }
        if let Some(value) = self.price {
            details.price = value;
        }
        if let Some(value) = self.duration {
            details.duration = value;
        }
        if let Some(value) = self.duration_type {
            details.duration_type = value;
        }
        if let Some(value) = self.description {
            details.description = Some(value);
        }
        if let Some(value) = self.image {
            details.image = Some(value);
        }
        if let Some(value) = self.currency {
            details.currency = value;
        }
        if let Some(value) = self.is_price_range {
            details.is_price_range = value;
        }
        if let Some(value) = self.range_price {
            details.range_price = Some(value);
        }
        if let Some(value) = self.serve_capacity {
            details.serve_capacity = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    fn haircut() -> CatalogueDetails {
        CatalogueDraft::new(
            "Premium Haircut",
            Decimal::new(5000, 2),
            45,
            DurationType::Minute,
        )
        .description("Professional haircut with styling")
        .into_details()
    }

    #[test]
    fn should_apply_defaults_when_draft_is_minimal() {
        let details = haircut();
        assert_eq!(details.currency, "USD");
        assert_eq!(details.serve_capacity, 1);
        assert!(!details.is_price_range);
        assert!(details.range_price.is_none());
    }

    #[test]
    fn should_accept_valid_details() {
        assert!(haircut().validate().is_ok());
    }

    #[test]
    fn should_reject_non_positive_price_and_duration() {
        let mut details = haircut();
        details.price = Decimal::ZERO;
        details.duration = 0;

        let Err(ServiceCoreError::Validation(ValidationError::Invalid(violations))) =
            details.validate()
        else {
            panic!("expected validation failure");
        };
        let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["price", "duration"]);
    }

    #[test]
    fn should_reject_blank_title_and_long_currency() {
        let mut details = haircut();
        details.title = String::new();
        details.currency = "DOLLARS-US-X".to_string();
        assert!(details.validate().is_err());
    }

    #[test]
    fn should_match_keyword_case_insensitively_on_title_or_description() {
        let details = haircut();
        assert!(details.matches_keyword("premium"));
        assert!(details.matches_keyword("STYLING"));
        assert!(!details.matches_keyword("massage"));
    }

    #[test]
    fn should_serialize_money_as_float_and_flags_as_integers() {
        let mut details = haircut();
        details.is_price_range = true;
        details.range_price = Some(Decimal::new(7550, 2));

        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["price"], 50.0);
        assert_eq!(json["rangePrice"], 75.5);
        assert_eq!(json["isPriceRange"], 1);
        assert_eq!(json["durationType"], "minute");
    }

    #[test]
    fn should_deserialize_draft_with_numeric_price() {
        let draft: CatalogueDraft = serde_json::from_str(
            r#"{"title":"Deep Tissue Massage","price":120.5,"duration":90,"durationType":"minute","isPriceRange":1,"rangePrice":150}"#,
        )
        .unwrap();
        assert_eq!(draft.price, Decimal::new(1205, 1));
        assert_eq!(draft.is_price_range, Some(true));
        assert_eq!(draft.range_price, Some(Decimal::from(150)));
    }

    #[test]
    fn should_only_overwrite_supplied_fields_when_patching() {
        let mut details = haircut();
        CataloguePatch {
            price: Some(Decimal::from(60)),
            ..CataloguePatch::default()
        }
        .apply(&mut details);
        assert_eq!(details.price, Decimal::from(60));
        assert_eq!(details.title, "Premium Haircut");
        assert_eq!(details.duration, 45);
    }
}
