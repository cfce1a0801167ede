//! `nalssi` - weather API gateway for Korean locations
//!
//! Forwards requests to the provider's edge functions or to Open-Meteo and
//! reshapes the answers into one response schema for the frontend. Open-Meteo
//! place names are resolved back to Korean administrative names.

pub mod api;
pub mod config;
pub mod error;
pub mod location;
pub mod models;
pub mod telemetry;
pub mod upstream;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use api::AppState;
pub use crate::config::NalssiConfig;
pub use error::NalssiError;
pub use location::NameResolver;
pub use models::{DisplayLocation, LocationKey};
pub use upstream::{HttpUpstream, Upstream, UpstreamRequest};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, NalssiError>;
