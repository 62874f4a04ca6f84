//! Domain operations for the Weblate API
//!
//! This module provides the provider layer on top of the HTTP
//! transport: authentication state, the paginated listings over
//! projects, components and translations, and translation file
//! download and upload.

pub mod client;
pub mod provider;

pub use client::Weblate;
pub use provider::TranslationProvider;
