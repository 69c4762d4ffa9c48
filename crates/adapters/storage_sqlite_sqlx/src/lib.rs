//! # servicecore-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `servicecore-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations), seeding the
//!   service-type reference data
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `servicecore-app` (for port traits) and `servicecore-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod codec;
pub mod error;
pub mod pool;

mod business_hours_repo;
mod catalogue_repo;
mod provider_repo;
mod service_type_repo;

pub use business_hours_repo::SqliteBusinessHoursRepository;
pub use catalogue_repo::SqliteCatalogueRepository;
pub use error::StorageError;
pub use pool::{Config, Database};
pub use provider_repo::SqliteProviderRepository;
pub use service_type_repo::SqliteServiceTypeRepository;
