//! # servicecore-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `ServiceTypeRepository`: read-only reference data
//!   - `ProviderRepository`: CRUD for providers
//!   - `BusinessHoursRepository`: CRUD and upsert for opening windows
//!   - `CatalogueRepository`: CRUD for catalogue entries and the public search query
//! - Define **driving/inbound ports** as use-case structs:
//!   - `ProviderService`: create, get, update, list by user, delete
//!   - `BusinessHoursService`: per-day windows, bulk upsert, open-at checks
//!   - `CatalogueService`: provider-scoped CRUD and the geo-filtered public search
//! - Orchestrate domain objects without knowing *how* persistence or IO works
//!
//! ## Dependency rule
//! Depends on `servicecore-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
