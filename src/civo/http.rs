//! HTTP utilities for Civo REST API calls

use super::error::ProviderError;
use reqwest::header::USER_AGENT;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use url::Url;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
fn sanitize_for_log(body: &str) -> String {
    let total = body.chars().count();
    let truncated = if total > MAX_LOG_BODY_LENGTH {
        let head: String = body.chars().take(MAX_LOG_BODY_LENGTH).collect();
        format!("{}... [truncated, {} bytes total]", head, body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// Pull the human-readable reason out of a Civo error body.
///
/// Civo answers failures with `{"code": "...", "reason": "..."}`; anything
/// else is passed through untouched.
pub fn provider_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.get("reason")
                .or_else(|| v.get("message"))
                .and_then(|r| r.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}

/// Bearer credential and client identity attached to every outbound request.
pub struct RequestAuth<'a> {
    pub token: &'a str,
    pub user_agent: &'a str,
}

/// HTTP client wrapper for Civo API calls
#[derive(Clone, Debug)]
pub struct CivoHttpClient {
    client: Client,
    base_url: Url,
}

impl CivoHttpClient {
    /// Create a new HTTP client rooted at `base_url`
    pub fn new(base_url: &str) -> Result<Self, ProviderError> {
        let client = Client::builder().build()?;
        let base_url = Url::parse(base_url)?;

        Ok(Self { client, base_url })
    }

    /// Build an absolute API URL from a path and query pairs
    pub fn url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, ProviderError> {
        let mut url = self.base_url.join(path)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter().copied());
        }
        Ok(url)
    }

    /// Make a GET request to the Civo API
    pub async fn get(&self, url: Url, auth: &RequestAuth<'_>) -> Result<Value, ProviderError> {
        tracing::debug!("GET {}", url.path());
        let request = self.client.get(url);
        self.send(request, auth).await
    }

    /// Make a POST request to the Civo API
    pub async fn post(
        &self,
        url: Url,
        auth: &RequestAuth<'_>,
        body: &Value,
    ) -> Result<Value, ProviderError> {
        tracing::debug!("POST {}", url.path());
        let request = self.client.post(url).json(body);
        self.send(request, auth).await
    }

    /// Make a DELETE request to the Civo API
    pub async fn delete(&self, url: Url, auth: &RequestAuth<'_>) -> Result<Value, ProviderError> {
        tracing::debug!("DELETE {}", url.path());
        let request = self.client.delete(url);
        self.send(request, auth).await
    }

    async fn send(
        &self,
        request: RequestBuilder,
        auth: &RequestAuth<'_>,
    ) -> Result<Value, ProviderError> {
        let response = request
            .bearer_auth(auth.token)
            .header(USER_AGENT, auth.user_agent)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // Only the sanitized/truncated body reaches the log
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&body));
            return Err(ProviderError::Api {
                status,
                message: provider_message(&body),
            });
        }

        // Handle empty response
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&body)?)
    }
}
