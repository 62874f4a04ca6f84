//! Authenticated HTTP transport for the Weblate REST API

pub mod client;

pub use client::{HttpClient, HttpClientBuilder, USER_AGENT};
