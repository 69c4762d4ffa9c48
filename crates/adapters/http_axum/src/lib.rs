//! # servicecore-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **JSON API** under `/api/v1/services`: providers, their
//!   business hours and catalogue, plus the public geo-filtered search
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map malformed bodies, query strings and identifiers into `400` responses
//!   carrying the list of violated fields
//! - Map application results into HTTP responses
//!
//! ## Dependency rule
//! Depends on `servicecore-app` (for port traits and services) and
//! `servicecore-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod extract;
pub mod router;
pub mod state;
