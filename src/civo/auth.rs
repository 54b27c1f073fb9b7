//! Civo credential exchange
//!
//! Turns a caller-supplied API key into a region-bound [`CivoClient`]. The
//! exchange is local: Civo validates the key on the first real request, and
//! its rejection surfaces from there.

use super::client::CivoClient;
use super::http::CivoHttpClient;
use crate::secret::SecretString;
use reqwest::header::HeaderValue;
use thiserror::Error;

/// Client identity every session announces to the provider
pub const CLIENT_NAME: &str = "opencp.io";
pub const CLIENT_VERSION: &str = "1.0.0";

/// Reasons a credential cannot become a provider session
#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("credential cannot be sent to the provider")]
    InvalidToken,

    #[error("no provider region configured")]
    NoRegion,
}

/// API key plus the user agent it is presented with
#[derive(Clone, Debug)]
pub struct Credentials {
    api_key: SecretString,
    user_agent: String,
}

impl Credentials {
    pub fn api_key(&self) -> &SecretString {
        &self.api_key
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

/// User agent carried by every session: gateway build plus fixed client identity
pub fn user_agent() -> String {
    format!(
        "civo-opencp/{} {}/{}",
        crate::VERSION,
        CLIENT_NAME,
        CLIENT_VERSION
    )
}

/// Exchange an API key for a session bound to `region`
pub fn exchange(
    http: &CivoHttpClient,
    token: &str,
    region: Option<String>,
) -> Result<CivoClient, ExchangeError> {
    // The key must survive being placed in an Authorization header
    if HeaderValue::from_str(&format!("Bearer {}", token)).is_err() {
        return Err(ExchangeError::InvalidToken);
    }

    let region = region
        .filter(|r| !r.trim().is_empty())
        .ok_or(ExchangeError::NoRegion)?;

    let credentials = Credentials {
        api_key: SecretString::new(token),
        user_agent: user_agent(),
    };

    tracing::debug!(region = %region, "provider session established");
    Ok(CivoClient::new(http.clone(), credentials, region))
}
