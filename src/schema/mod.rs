//! Normalized resource contract
//!
//! Every resource crosses the gateway as a Kubernetes-shaped
//! `metadata`/`spec`/`status` triple. The shapes here are owned by the
//! wire contract; translators only map values into and out of them.

mod kinds;

pub use kinds::*;

use crate::secret::SecretString;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// `apiVersion` stamped on every object and list
pub const API_VERSION: &str = "v1";

/// Identity shared by every resource kind
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ObjectMeta {
    pub name: String,
    /// Provider-assigned immutable id
    pub uid: String,
    /// Display name of the owning network, empty when not network-scoped
    pub namespace: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_timestamp: Option<DateTime<Utc>>,
}

impl ObjectMeta {
    pub fn new(name: impl Into<String>, uid: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uid: uid.into(),
            ..Default::default()
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Attach a provider timestamp; unparseable or absent values are dropped
    pub fn with_created_at(mut self, created_at: Option<&str>) -> Self {
        self.creation_timestamp = created_at.and_then(parse_timestamp);
        self
    }
}

/// Parse a provider timestamp: RFC 3339, or a naive UTC date-time
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| chrono::NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// A single normalized resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    default,
    rename_all = "camelCase",
    bound(
        serialize = "S: Serialize, St: Serialize",
        deserialize = "S: DeserializeOwned + Default, St: DeserializeOwned + Default"
    )
)]
pub struct Object<S, St> {
    pub kind: String,
    pub api_version: String,
    pub metadata: ObjectMeta,
    pub spec: S,
    pub status: St,
}

impl<S, St> Object<S, St> {
    pub fn new(kind: &str, metadata: ObjectMeta, spec: S, status: St) -> Self {
        Self {
            kind: kind.to_string(),
            api_version: API_VERSION.to_string(),
            metadata,
            spec,
            status,
        }
    }
}

/// A list answer: `<Kind>List` plus the items in provider order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    rename_all = "camelCase",
    bound(serialize = "T: Serialize", deserialize = "T: DeserializeOwned")
)]
pub struct ObjectList<T> {
    pub kind: String,
    pub api_version: String,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

impl<T> ObjectList<T> {
    pub fn new(kind: &str, items: Vec<T>) -> Self {
        Self {
            kind: format!("{}List", kind),
            api_version: API_VERSION.to_string(),
            items,
        }
    }
}

/// Caller filter for List/Get/Delete; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

impl FilterOptions {
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Namespace filter, `None` when unset or empty
    pub fn namespace(&self) -> Option<&str> {
        non_empty(self.namespace.as_deref())
    }

    /// Search key for a single-item lookup: `id` wins over `name`
    pub fn selector(&self) -> Option<&str> {
        non_empty(self.id.as_deref()).or_else(|| non_empty(self.name.as_deref()))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub token: SecretString,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub valid: bool,
}
