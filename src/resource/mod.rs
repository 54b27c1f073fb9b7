//! Resource translation layer
//!
//! Each resource kind gets one [`Translator`] that maps between Civo's native
//! shapes and the normalized `metadata`/`spec`/`status` objects. The shared
//! List/Get/Create/Delete protocol lives here; kind-specific mapping lives in
//! the sibling files.
//!
//! # Architecture
//!
//! - [`resolver`] - Cross-resource joins (network id → namespace name, firewall id → name)
//! - [`registry`] - Metadata about the registered kinds, served by `/v1/kinds`
//! - one translator per kind: [`instance`], [`cluster`], [`namespace`],
//!   [`firewall`], [`ip`], [`database`], [`object_storage`],
//!   [`object_storage_credential`], [`domain`], [`ssh_key`]
//!
//! # Protocol
//!
//! - **List** re-queries the provider, translates every item, then drops
//!   items outside the caller's namespace.
//! - **Get** finds one item by id (preferred) or name. A namespace filter that
//!   does not match yields [`Lookup::FilteredOut`], which callers see as `null`.
//! - **Create** resolves named dependencies, creates, then re-fetches by id.
//! - **Delete** looks the item up first; anything other than
//!   [`Lookup::Found`] is a successful no-op.

pub mod cluster;
pub mod database;
pub mod domain;
pub mod firewall;
pub mod instance;
pub mod ip;
pub mod namespace;
pub mod object_storage;
pub mod object_storage_credential;
pub mod registry;
pub mod resolver;
pub mod ssh_key;

pub use registry::{kinds, KindInfo};
pub use resolver::{resolve_reference, ReferenceKind, ReferenceTable};

use crate::civo::{firewall as civo_firewall, network as civo_network, CivoClient, ProviderError};
use crate::error::{ApiResult, GatewayError};
use crate::schema::{FilterOptions, Object};
use crate::session::CallContext;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;

/// Normalized object produced by translator `T`
pub type Resource<T> = Object<<T as Translator>::Spec, <T as Translator>::Status>;

/// Outcome of a single-item lookup
#[derive(Debug)]
pub enum Lookup<T> {
    Found(T),
    /// The provider has no such item; carries its error verbatim
    NotFound(GatewayError),
    /// The item exists but lies outside the requested namespace
    FilteredOut,
}

impl<T> Lookup<T> {
    /// Get semantics: missing is an error, filtered out is `None`
    pub fn into_get(self) -> ApiResult<Option<T>> {
        match self {
            Lookup::Found(item) => Ok(Some(item)),
            Lookup::NotFound(err) => Err(err),
            Lookup::FilteredOut => Ok(None),
        }
    }

    /// The found item, or the miss re-typed for the caller's own lookup
    pub fn into_found<U>(self) -> Result<T, Lookup<U>> {
        match self {
            Lookup::Found(item) => Ok(item),
            Lookup::NotFound(err) => Err(Lookup::NotFound(err)),
            Lookup::FilteredOut => Err(Lookup::FilteredOut),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Lookup::Found(item) => Lookup::Found(f(item)),
            Lookup::NotFound(err) => Lookup::NotFound(err),
            Lookup::FilteredOut => Lookup::FilteredOut,
        }
    }
}

/// Narrow a provider count, saturating instead of wrapping
pub(crate) fn saturating_i32(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

/// Turn a provider find into a lookup, keeping non-"not found" failures as errors
pub fn lookup_from<T>(result: Result<T, ProviderError>) -> ApiResult<Lookup<T>> {
    match result {
        Ok(item) => Ok(Lookup::Found(item)),
        Err(err) if err.is_not_found() => Ok(Lookup::NotFound(err.into())),
        Err(err) => Err(err.into()),
    }
}

/// One resource kind's mapping onto the provider
pub trait Translator: Send + Sync + 'static {
    type Spec: Serialize + DeserializeOwned + Default + Send + Sync + 'static;
    type Status: Serialize + DeserializeOwned + Default + Send + Sync + 'static;

    /// Normalized `kind`, e.g. `VirtualMachine`
    const KIND: &'static str;
    /// Route segment under `/v1/`
    const ROUTE: &'static str;
    /// Whether items carry a namespace (owning network)
    const NETWORK_SCOPED: bool;

    /// Every item, translated, then post-filtered by namespace
    fn list(
        ctx: &CallContext,
        filter: &FilterOptions,
    ) -> impl Future<Output = ApiResult<Vec<Resource<Self>>>> + Send;

    fn lookup(
        ctx: &CallContext,
        filter: &FilterOptions,
    ) -> impl Future<Output = ApiResult<Lookup<Resource<Self>>>> + Send;

    /// Create and return the re-fetched canonical object
    fn create(
        ctx: &CallContext,
        resource: Resource<Self>,
    ) -> impl Future<Output = ApiResult<Option<Resource<Self>>>> + Send;

    /// Provider delete of an item already looked up
    fn remove(
        ctx: &CallContext,
        resource: &Resource<Self>,
    ) -> impl Future<Output = ApiResult<()>> + Send;

    fn get(
        ctx: &CallContext,
        filter: &FilterOptions,
    ) -> impl Future<Output = ApiResult<Option<Resource<Self>>>> + Send {
        async move { Self::lookup(ctx, filter).await?.into_get() }
    }

    /// Get-then-delete; returns the pre-deletion snapshot
    fn delete(
        ctx: &CallContext,
        filter: &FilterOptions,
    ) -> impl Future<Output = ApiResult<Option<Resource<Self>>>> + Send {
        async move {
            match Self::lookup(ctx, filter).await? {
                Lookup::Found(resource) => {
                    Self::remove(ctx, &resource).await?;
                    tracing::info!(
                        kind = Self::KIND,
                        uid = %resource.metadata.uid,
                        "deleted"
                    );
                    Ok(Some(resource))
                },
                Lookup::NotFound(err) => {
                    tracing::debug!(kind = Self::KIND, error = %err, "delete of missing item");
                    Ok(None)
                },
                Lookup::FilteredOut => Ok(None),
            }
        }
    }
}

/// Drop items outside `filter`'s namespace; no-op when the filter has none
pub fn filter_namespace<S, St>(
    items: Vec<Object<S, St>>,
    filter: &FilterOptions,
) -> Vec<Object<S, St>> {
    match filter.namespace() {
        Some(namespace) => items
            .into_iter()
            .filter(|item| item.metadata.namespace == namespace)
            .collect(),
        None => items,
    }
}

/// Search key for Get; id wins over name
pub fn require_selector(filter: &FilterOptions) -> ApiResult<&str> {
    filter
        .selector()
        .ok_or_else(|| GatewayError::invalid_argument("either id or name must be set"))
}

/// Namespace name for an item found by Get.
///
/// With a namespace filter the filter's network must exist and own the item,
/// otherwise the item is filtered out (`None`). Without one the name comes
/// from the reference resolver.
pub async fn resolve_namespace(
    session: &CivoClient,
    filter: &FilterOptions,
    network_id: &str,
) -> ApiResult<Option<String>> {
    let Some(wanted) = filter.namespace() else {
        return Ok(Some(
            resolve_reference(session, ReferenceKind::Network, network_id).await?,
        ));
    };

    match civo_network::find_network(session, wanted).await {
        Ok(network) if network.id == network_id => Ok(Some(network.display_name().to_string())),
        Ok(_) => Ok(None),
        Err(err) if err.is_not_found() => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Network id a new item should live in; empty namespace means the default network
pub async fn network_id_for_create(session: &CivoClient, namespace: &str) -> ApiResult<String> {
    let network = if namespace.is_empty() {
        civo_network::default_network(session).await?
    } else {
        civo_network::find_network(session, namespace).await?
    };
    Ok(network.id)
}

/// Firewall id for a firewall named on create, `None` when unset
pub async fn firewall_id_for_create(session: &CivoClient, name: &str) -> ApiResult<Option<String>> {
    if name.is_empty() {
        return Ok(None);
    }
    let firewall = civo_firewall::find_firewall(session, name).await?;
    Ok(Some(firewall.id))
}
