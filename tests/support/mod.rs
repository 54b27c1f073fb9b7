//! Shared harness: a gateway router pointed at a wiremock provider

#![allow(dead_code)]

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Request, StatusCode};
use axum::Router;
use civo_opencp::config::Config;
use civo_opencp::server::{build_router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "test-token";
pub const BEARER: &str = "Bearer test-token";

pub struct Gateway {
    pub provider: MockServer,
    pub app: Router,
}

impl Gateway {
    pub async fn start() -> Self {
        let provider = MockServer::start().await;
        let config = Config {
            api_url: provider.uri(),
            default_region: Some("LON1".into()),
            ..Config::default()
        };
        let app = build_router(AppState::new(config).unwrap());
        Self { provider, app }
    }

    /// POST a JSON body to `route` with the given authorization header
    pub async fn post(&self, route: &str, auth: Option<&str>, body: Value) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method("POST")
            .uri(route)
            .header(CONTENT_TYPE, "application/json");
        if let Some(auth) = auth {
            builder = builder.header(AUTHORIZATION, auth);
        }
        let request = builder.body(Body::from(body.to_string())).unwrap();
        self.send(request).await
    }

    /// POST as an authenticated caller
    pub async fn call(&self, route: &str, body: Value) -> (StatusCode, Value) {
        self.post(route, Some(BEARER), body).await
    }

    pub async fn get(&self, route: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("GET")
            .uri(route)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    pub async fn provider_calls(&self) -> usize {
        self.provider
            .received_requests()
            .await
            .map(|r| r.len())
            .unwrap_or(0)
    }

    /// Answer GET `route` with a plain JSON array
    pub async fn mount_list(&self, route: &str, items: Value) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(items))
            .mount(&self.provider)
            .await;
    }

    /// Answer GET `route` with a single page of `items`
    pub async fn mount_page(&self, route: &str, items: Value) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "page": 1,
                "per_page": 100,
                "pages": 1,
                "items": items,
            })))
            .mount(&self.provider)
            .await;
    }

    /// `default` (n-0) and `net-a` (n-a)
    pub async fn mount_networks(&self) {
        self.mount_list(
            "/v2/networks",
            json!([
                {"id": "n-0", "name": "cust-default", "label": "default", "default": true},
                {"id": "n-a", "name": "cust-net-a", "label": "net-a", "default": false}
            ]),
        )
        .await;
    }

    /// Every collection answers empty
    pub async fn mount_empty_provider(&self) {
        for route in ["/v2/networks", "/v2/firewalls", "/v2/dns", "/v2/sshkeys"] {
            self.mount_list(route, json!([])).await;
        }
        for route in [
            "/v2/instances",
            "/v2/kubernetes/clusters",
            "/v2/databases",
            "/v2/ips",
            "/v2/objectstores",
            "/v2/objectstore/credentials",
        ] {
            self.mount_page(route, json!([])).await;
        }
    }
}
