//! Call dispatcher
//!
//! Mounts one `list`/`get`/`create`/`delete` route group per registered
//! kind. Every resource route, and the login check, sits behind the
//! credential gate.

pub mod auth;

use crate::civo::http::CivoHttpClient;
use crate::config::Config;
use crate::error::ApiResult;
use crate::resource::cluster::KubernetesClusterTranslator;
use crate::resource::database::DatabaseTranslator;
use crate::resource::domain::DomainTranslator;
use crate::resource::firewall::FirewallTranslator;
use crate::resource::instance::VirtualMachineTranslator;
use crate::resource::ip::IpTranslator;
use crate::resource::namespace::NamespaceTranslator;
use crate::resource::object_storage::ObjectStorageTranslator;
use crate::resource::object_storage_credential::ObjectStorageCredentialTranslator;
use crate::resource::ssh_key::SshKeyTranslator;
use crate::resource::{kinds, KindInfo, Resource, Translator};
use crate::schema::{FilterOptions, ObjectList};
use crate::session::CallContext;
use axum::routing::{get, post};
use axum::{middleware, Extension, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;

/// Shared, read-only state: the outbound HTTP client and the configuration
#[derive(Clone)]
pub struct AppState {
    pub http: CivoHttpClient,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let http = CivoHttpClient::new(&config.api_url)?;
        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }
}

pub fn build_router(state: AppState) -> Router {
    let gated = Router::new()
        .merge(kind_routes::<VirtualMachineTranslator>())
        .merge(kind_routes::<KubernetesClusterTranslator>())
        .merge(kind_routes::<NamespaceTranslator>())
        .merge(kind_routes::<FirewallTranslator>())
        .merge(kind_routes::<IpTranslator>())
        .merge(kind_routes::<DatabaseTranslator>())
        .merge(kind_routes::<ObjectStorageTranslator>())
        .merge(kind_routes::<ObjectStorageCredentialTranslator>())
        .merge(kind_routes::<DomainTranslator>())
        .merge(kind_routes::<SshKeyTranslator>())
        .route("/v1/login/check", post(auth::check))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_credential,
        ));

    Router::new()
        .merge(gated)
        .route("/v1/kinds", get(list_kinds))
        .route("/health", get(health))
        .with_state(state)
}

fn kind_routes<T: Translator>() -> Router<AppState> {
    let base = format!("/v1/{}", T::ROUTE);
    Router::new()
        .route(&format!("{base}/list"), post(list::<T>))
        .route(&format!("{base}/get"), post(get_one::<T>))
        .route(&format!("{base}/create"), post(create::<T>))
        .route(&format!("{base}/delete"), post(delete::<T>))
}

async fn list<T: Translator>(
    Extension(ctx): Extension<CallContext>,
    Json(filter): Json<FilterOptions>,
) -> ApiResult<Json<ObjectList<Resource<T>>>> {
    let items = T::list(&ctx, &filter).await?;
    tracing::debug!(kind = T::KIND, count = items.len(), "listed");
    Ok(Json(ObjectList::new(T::KIND, items)))
}

async fn get_one<T: Translator>(
    Extension(ctx): Extension<CallContext>,
    Json(filter): Json<FilterOptions>,
) -> ApiResult<Json<Option<Resource<T>>>> {
    Ok(Json(T::get(&ctx, &filter).await?))
}

async fn create<T: Translator>(
    Extension(ctx): Extension<CallContext>,
    Json(resource): Json<Resource<T>>,
) -> ApiResult<Json<Option<Resource<T>>>> {
    Ok(Json(T::create(&ctx, resource).await?))
}

async fn delete<T: Translator>(
    Extension(ctx): Extension<CallContext>,
    Json(filter): Json<FilterOptions>,
) -> ApiResult<Json<Option<Resource<T>>>> {
    Ok(Json(T::delete(&ctx, &filter).await?))
}

async fn list_kinds() -> Json<&'static [KindInfo]> {
    Json(kinds())
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": crate::VERSION,
    }))
}
