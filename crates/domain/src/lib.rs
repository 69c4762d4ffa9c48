//! # servicecore-domain
//!
//! Pure domain model for the servicecore marketplace catalogue.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Field validation that collects every violation instead of failing fast
//! - Define **Service types** (read-only categories such as "Hair Salon")
//! - Define **Providers** (businesses with a location and a service radius)
//! - Define **Business hours** (one opening window per provider and weekday)
//! - Define **Catalogue entries** (the services a provider sells)
//! - Great-circle distance and the radius/proximity ranking used by search
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod format;
pub mod id;
pub mod time;
pub mod validation;

pub mod business_hours;
pub mod catalogue;
pub mod geo;
pub mod provider;
pub mod search;
pub mod service_type;
