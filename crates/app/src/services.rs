//! Application services: use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod business_hours_service;
pub mod catalogue_service;
pub mod provider_service;

#[cfg(test)]
pub(crate) mod fakes;
