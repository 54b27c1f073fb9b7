//! Civo API interaction module
//!
//! This module provides everything the gateway needs to talk to Civo:
//! credential exchange, the HTTP client, and one file per resource family
//! with its native types and list/find/create/delete calls.
//!
//! # Module Structure
//!
//! - [`auth`] - Exchange of a caller API key for a region-bound session
//! - [`client`] - Session client with typed GET/POST/DELETE and pagination
//! - [`http`] - HTTP utilities for REST API calls
//! - [`find`] - Find-by-id-or-name over a listed collection
//! - resource families: [`network`], [`instance`], [`firewall`],
//!   [`kubernetes`], [`database`], [`ip`], [`objectstore`], [`dns`], [`sshkey`]
//!
//! # Example
//!
//! ```ignore
//! use civo_opencp::civo::{auth, http::CivoHttpClient, network};
//!
//! async fn example() -> anyhow::Result<()> {
//!     let http = CivoHttpClient::new("https://api.civo.com")?;
//!     let client = auth::exchange(&http, "my-api-key", Some("LON1".into()))?;
//!     let networks = network::list_networks(&client).await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod database;
pub mod dns;
pub mod error;
pub mod find;
pub mod firewall;
pub mod http;
pub mod instance;
pub mod ip;
pub mod kubernetes;
pub mod network;
pub mod objectstore;
pub mod sshkey;

pub use client::CivoClient;
pub use error::ProviderError;
