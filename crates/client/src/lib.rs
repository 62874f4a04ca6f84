//! # Weblate Client
//!
//! Client library for the Weblate translation-management REST API.
//!
//! This crate contains:
//! - An authenticated HTTP transport (`http`) that resolves resource
//!   paths against a fixed endpoint and classifies every response
//! - The provider layer (`api`) with the domain operations: project,
//!   component and translation listings, file download and upload
//!
//! ## Architecture
//! - Transport and provider report errors through
//!   `weblate_domain::WeblateError` (client / server / processing)
//! - Endpoint and user-agent are fixed at construction; only the
//!   credential and the authenticated flag are mutable session state
//! - No caching, no retries, no rate limiting

pub mod api;
pub mod http;

// Re-export commonly used items
pub use api::{TranslationProvider, Weblate};
pub use http::{HttpClient, HttpClientBuilder};
pub use weblate_domain::{Result, WeblateError};
