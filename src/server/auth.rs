//! Credential gate and login check
//!
//! Every `/v1` resource call passes through [`require_credential`] before any
//! handler runs. A call without a bearer credential never reaches the
//! provider.

use super::AppState;
use crate::civo::auth as civo_auth;
use crate::error::{ApiResult, GatewayError};
use crate::schema::{LoginRequest, LoginResponse};
use crate::session::CallContext;
use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use axum::{Extension, Json};
use tracing::Instrument;

pub const UNAUTHENTICATED_MESSAGE: &str = "Request unauthenticated with bearer";

const SCHEME: &str = "bearer";

fn unauthenticated() -> GatewayError {
    GatewayError::unauthenticated(UNAUTHENTICATED_MESSAGE)
}

/// Bearer token from the `authorization` header. `Bearer ` alone yields an empty token.
pub fn extract_bearer(headers: &HeaderMap) -> ApiResult<String> {
    let value = headers.get(AUTHORIZATION).ok_or_else(unauthenticated)?;
    let value = value.to_str().map_err(|_| unauthenticated())?.trim_start();

    // The separator is required; only `Bearer ` carries an empty token
    let (scheme, token) = value.split_once(' ').ok_or_else(unauthenticated)?;
    if !scheme.eq_ignore_ascii_case(SCHEME) {
        return Err(unauthenticated());
    }

    Ok(token.trim().to_string())
}

/// Resolve the caller's credential into a [`CallContext`] request extension
pub async fn require_credential(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> ApiResult<Response> {
    let route = req.uri().path().to_string();

    let token = match extract_bearer(req.headers()) {
        Ok(token) => token,
        Err(err) => {
            tracing::warn!(route = %route, "call rejected without bearer credential");
            return Err(err);
        },
    };

    let ctx = if token.is_empty() {
        CallContext::anonymous()
    } else {
        let session = civo_auth::exchange(&state.http, &token, state.config.region())
            .inspect_err(|err| {
                tracing::warn!(route = %route, error = %err, "credential exchange failed")
            })?;
        CallContext::authenticated(session)
    };

    let span = tracing::info_span!(
        "rpc",
        request_id = %ctx.request_id(),
        route = %route,
        authenticated = ctx.session().is_ok(),
    );
    req.extensions_mut().insert(ctx);

    Ok(next.run(req).instrument(span).await)
}

/// `POST /v1/login/check`: is the token (or the call's own key) accepted?
///
/// Any provider failure answers `valid: false` rather than an error.
pub async fn check(
    State(state): State<AppState>,
    Extension(ctx): Extension<CallContext>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let session = if request.token.is_empty() {
        ctx.session()?.clone()
    } else {
        civo_auth::exchange(&state.http, request.token.expose(), state.config.region())?
    };

    let valid = match session.account_id().await {
        Ok(account_id) => !account_id.is_empty(),
        Err(err) => {
            tracing::debug!(error = %err, "credential check failed");
            false
        },
    };

    Ok(Json(LoginResponse { valid }))
}
