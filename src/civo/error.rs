//! Provider error type

use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a call against the Civo API.
///
/// The provider's own message is kept verbatim so callers see what Civo said.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    #[error("unable to find {search}, zero matches")]
    ZeroMatches { kind: &'static str, search: String },

    #[error("unable to find {search} because there were multiple matches")]
    MultipleMatches { kind: &'static str, search: String },

    #[error("failed to reach provider: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to parse provider response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid provider url: {0}")]
    Url(#[from] url::ParseError),
}

impl ProviderError {
    /// True when the provider says the looked-up resource does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            ProviderError::ZeroMatches { .. } => true,
            ProviderError::Api { status, .. } => *status == StatusCode::NOT_FOUND,
            _ => false,
        }
    }
}
