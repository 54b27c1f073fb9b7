//! Gateway error type and its mapping onto HTTP responses

use crate::civo::auth::ExchangeError;
use crate::civo::ProviderError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

pub type ApiResult<T> = std::result::Result<T, GatewayError>;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{0}")]
    Unauthenticated(String),

    #[error("{0}")]
    Unavailable(String),

    #[error("{0}")]
    InvalidArgument(String),

    /// Anything the provider said, surfaced verbatim
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl GatewayError {
    pub fn unauthenticated(msg: impl Into<String>) -> Self {
        Self::Unauthenticated(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        self.classify().0
    }

    pub fn code(&self) -> &'static str {
        self.classify().1
    }

    fn classify(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Unauthenticated(_) => (StatusCode::UNAUTHORIZED, "unauthenticated"),
            Self::Unavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "unavailable"),
            Self::InvalidArgument(_) => (StatusCode::BAD_REQUEST, "invalid_argument"),
            Self::Provider(err) => classify_provider(err),
        }
    }
}

fn classify_provider(err: &ProviderError) -> (StatusCode, &'static str) {
    match err {
        ProviderError::Api { status, .. } => match *status {
            StatusCode::UNAUTHORIZED => (StatusCode::UNAUTHORIZED, "unauthenticated"),
            StatusCode::FORBIDDEN => (StatusCode::FORBIDDEN, "permission_denied"),
            StatusCode::NOT_FOUND => (StatusCode::NOT_FOUND, "not_found"),
            StatusCode::TOO_MANY_REQUESTS => {
                (StatusCode::TOO_MANY_REQUESTS, "resource_exhausted")
            }
            s if s.is_client_error() => (StatusCode::BAD_REQUEST, "invalid_argument"),
            _ => (StatusCode::SERVICE_UNAVAILABLE, "unavailable"),
        },
        ProviderError::ZeroMatches { .. } => (StatusCode::NOT_FOUND, "not_found"),
        ProviderError::MultipleMatches { .. } => (StatusCode::BAD_REQUEST, "invalid_argument"),
        ProviderError::Transport(_) => (StatusCode::SERVICE_UNAVAILABLE, "unavailable"),
        ProviderError::Decode(_) | ProviderError::Url(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "internal")
        }
    }
}

impl From<ExchangeError> for GatewayError {
    fn from(err: ExchangeError) -> Self {
        match err {
            ExchangeError::InvalidToken => Self::Unauthenticated(err.to_string()),
            ExchangeError::NoRegion => Self::Unavailable(err.to_string()),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, code) = self.classify();
        if status.is_server_error() {
            tracing::error!(code, error = %self, "request failed");
        } else {
            tracing::debug!(code, error = %self, "request rejected");
        }
        let body = Json(serde_json::json!({
            "code": code,
            "error": self.to_string(),
        }));
        (status, body).into_response()
    }
}
