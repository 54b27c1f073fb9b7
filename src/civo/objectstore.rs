//! Civo object stores and their credentials

use super::client::{item_path, nullable, CivoClient, SimpleResponse};
use super::error::ProviderError;
use super::find::find_match;
use crate::secret::SecretString;
use serde::{Deserialize, Serialize};

const OBJECT_STORES: &str = "/v2/objectstores";
const CREDENTIALS: &str = "/v2/objectstore/credentials";

/// A bucket as Civo reports it
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ObjectStore {
    pub id: String,
    pub name: String,
    pub max_size: i64,
    #[serde(deserialize_with = "nullable")]
    pub owner_info: OwnerInfo,
    #[serde(deserialize_with = "nullable")]
    pub bucket_url: String,
    pub status: String,
}

impl ObjectStore {
    pub fn endpoint(&self) -> String {
        format!("https://{}/{}", self.bucket_url, self.name)
    }
}

/// The credential that owns a bucket
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OwnerInfo {
    pub access_key_id: String,
    pub name: String,
    pub credential_id: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateObjectStoreRequest {
    pub name: String,
    pub max_size_gb: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_key_id: Option<String>,
    pub region: String,
}

/// An object store credential; both keys are secrets
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ObjectStoreCredential {
    pub id: String,
    pub name: String,
    pub access_key_id: SecretString,
    pub secret_access_key_id: SecretString,
    pub max_size_gb: i64,
    pub status: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateObjectStoreCredentialRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_key_id: Option<SecretString>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_access_key_id: Option<SecretString>,
    pub region: String,
}

pub async fn list_object_stores(client: &CivoClient) -> Result<Vec<ObjectStore>, ProviderError> {
    client.get_all_pages(OBJECT_STORES).await
}

pub async fn find_object_store(
    client: &CivoClient,
    search: &str,
) -> Result<ObjectStore, ProviderError> {
    let stores = list_object_stores(client).await?;
    find_match(stores, search, "object store", |o| {
        vec![o.id.as_str(), o.name.as_str()]
    })
}

pub async fn create_object_store(
    client: &CivoClient,
    request: &CreateObjectStoreRequest,
) -> Result<ObjectStore, ProviderError> {
    let body = serde_json::to_value(request)?;
    client.post(OBJECT_STORES, &body).await
}

pub async fn delete_object_store(
    client: &CivoClient,
    id: &str,
) -> Result<SimpleResponse, ProviderError> {
    client.delete(&item_path(OBJECT_STORES, id)).await
}

pub async fn list_credentials(
    client: &CivoClient,
) -> Result<Vec<ObjectStoreCredential>, ProviderError> {
    client.get_all_pages(CREDENTIALS).await
}

pub async fn find_credential(
    client: &CivoClient,
    search: &str,
) -> Result<ObjectStoreCredential, ProviderError> {
    let credentials = list_credentials(client).await?;
    find_match(credentials, search, "object store credential", |c| {
        vec![c.id.as_str(), c.name.as_str()]
    })
}

pub async fn create_credential(
    client: &CivoClient,
    request: &CreateObjectStoreCredentialRequest,
) -> Result<ObjectStoreCredential, ProviderError> {
    let body = serde_json::to_value(request)?;
    client.post(CREDENTIALS, &body).await
}

pub async fn delete_credential(
    client: &CivoClient,
    id: &str,
) -> Result<SimpleResponse, ProviderError> {
    client.delete(&item_path(CREDENTIALS, id)).await
}
