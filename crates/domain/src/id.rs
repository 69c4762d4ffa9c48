//! Typed identifier newtypes backed by store-assigned 64-bit integers.
//!
//! Identifiers exceed the exact-integer range of a JSON double, so they are
//! always serialized as decimal strings. Deserialization accepts either a
//! string or an integer.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};

/// Error returned when text is not a positive decimal integer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("identifier must be a positive integer")]
pub struct IdParseError;

fn parse_positive(value: &str) -> Result<i64, IdParseError> {
    match value.trim().parse::<i64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(IdParseError),
    }
}

struct IdVisitor;

impl Visitor<'_> for IdVisitor {
    type Value = i64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a positive integer or a decimal string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<i64, E> {
        parse_positive(v).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
        if v > 0 {
            Ok(v)
        } else {
            Err(E::custom(IdParseError))
        }
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
        i64::try_from(v)
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| E::custom(IdParseError))
    }
}

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw store identifier.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Access the raw store identifier.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_positive(s).map(Self)
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(&self.0)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                deserializer.deserialize_any(IdVisitor).map(Self)
            }
        }
    };
}

define_id!(
    /// Unique identifier for a [`Provider`](crate::provider::Provider).
    ProviderId
);

define_id!(
    /// Unique identifier for a [`CatalogueEntry`](crate::catalogue::CatalogueEntry).
    CatalogueEntryId
);

define_id!(
    /// Unique identifier for a [`BusinessHours`](crate::business_hours::BusinessHours) row.
    BusinessHoursId
);

define_id!(
    /// Unique identifier for a [`ServiceType`](crate::service_type::ServiceType).
    ServiceTypeId
);

define_id!(
    /// Identifier of the user owning or editing a record.
    UserId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_roundtrip_through_display_and_from_str() {
        let id = ProviderId::new(9_007_199_254_740_993);
        let text = id.to_string();
        let parsed: ProviderId = text.parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn should_serialize_as_decimal_string() {
        let id = CatalogueEntryId::new(9_007_199_254_740_993);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"9007199254740993\"");
    }

    #[test]
    fn should_deserialize_from_string_or_integer() {
        let from_text: ServiceTypeId = serde_json::from_str("\"3\"").unwrap();
        let from_number: ServiceTypeId = serde_json::from_str("3").unwrap();
        assert_eq!(from_text, ServiceTypeId::new(3));
        assert_eq!(from_number, ServiceTypeId::new(3));
    }

    #[test]
    fn should_return_error_when_parsing_non_numeric_text() {
        assert!(ProviderId::from_str("abc").is_err());
        assert!(ProviderId::from_str("1.5").is_err());
    }

    #[test]
    fn should_reject_zero_and_negative_identifiers() {
        assert!(UserId::from_str("0").is_err());
        assert!(UserId::from_str("-4").is_err());
        assert!(serde_json::from_str::<UserId>("-4").is_err());
    }
}
