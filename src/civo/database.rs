//! Civo managed databases

use super::client::{item_path, nullable, CivoClient, SimpleResponse};
use super::error::ProviderError;
use super::find::find_match;
use crate::secret::SecretString;
use serde::{Deserialize, Serialize};

const DATABASES: &str = "/v2/databases";

/// A database as Civo reports it
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Database {
    pub id: String,
    pub name: String,
    pub nodes: i64,
    pub size: String,
    pub software: String,
    #[serde(deserialize_with = "nullable")]
    pub software_version: String,
    #[serde(deserialize_with = "nullable")]
    pub public_ipv4: String,
    pub network_id: String,
    #[serde(deserialize_with = "nullable")]
    pub firewall_id: String,
    pub port: i64,
    pub status: String,
    #[serde(deserialize_with = "nullable")]
    pub username: String,
    pub password: SecretString,
}

/// Database create request
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateDatabaseRequest {
    pub name: String,
    pub size: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub software: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub software_version: String,
    pub network_id: String,
    pub nodes: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firewall_id: Option<String>,
    pub region: String,
}

pub async fn list_databases(client: &CivoClient) -> Result<Vec<Database>, ProviderError> {
    client.get_all_pages(DATABASES).await
}

pub async fn find_database(client: &CivoClient, search: &str) -> Result<Database, ProviderError> {
    let databases = list_databases(client).await?;
    find_match(databases, search, "database", |d| {
        vec![d.id.as_str(), d.name.as_str()]
    })
}

pub async fn create_database(
    client: &CivoClient,
    request: &CreateDatabaseRequest,
) -> Result<Database, ProviderError> {
    let body = serde_json::to_value(request)?;
    client.post(DATABASES, &body).await
}

pub async fn delete_database(
    client: &CivoClient,
    id: &str,
) -> Result<SimpleResponse, ProviderError> {
    client.delete(&item_path(DATABASES, id)).await
}
