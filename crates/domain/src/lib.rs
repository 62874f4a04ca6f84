//! # Weblate Domain
//!
//! Shared types for the Weblate client.
//!
//! This crate contains:
//! - The closed error taxonomy (`WeblateError`) every operation reports
//! - The `Result` alias used throughout the client
//!
//! ## Architecture
//! - No dependencies on other workspace crates
//! - Pure types, no I/O

pub mod errors;

// Re-export commonly used items
pub use errors::{Result, WeblateError};
