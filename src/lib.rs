//! OpenCP gateway for Civo
//!
//! Serves the normalized OpenCP resource API (metadata/spec/status triples)
//! and translates every call into Civo API requests made with the caller's
//! own credential.
//!
//! # Module Structure
//!
//! - [`civo`] - Civo API client, credential exchange and native resource types
//! - [`schema`] - The normalized OpenCP resource contract
//! - [`session`] - Per-call context carrying the provider session
//! - [`resource`] - Translators between native and normalized resources
//! - [`server`] - HTTP dispatcher, credential middleware and login check
//! - [`config`] - Gateway configuration
//! - [`error`] - Gateway error type and its wire mapping

pub mod civo;
pub mod config;
pub mod error;
pub mod resource;
pub mod schema;
pub mod secret;
pub mod server;
pub mod session;

/// Version injected at compile time via CIVO_OPENCP_VERSION env var (set by CI/CD),
/// or the crate version for local builds.
pub const VERSION: &str = match option_env!("CIVO_OPENCP_VERSION") {
    Some(v) => v,
    None => env!("CARGO_PKG_VERSION"),
};
