//! Civo private networks

use super::client::{item_path, CivoClient, SimpleResponse};
use super::error::ProviderError;
use super::find::find_match;
use serde::Deserialize;
use serde_json::json;

const NETWORKS: &str = "/v2/networks";

/// A private network as Civo reports it
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Network {
    pub id: String,
    pub name: String,
    pub label: String,
    pub default: bool,
    pub cidr: String,
    pub status: String,
}

impl Network {
    /// Name shown to callers (the label the network was created with)
    pub fn display_name(&self) -> &str {
        if self.label.is_empty() {
            &self.name
        } else {
            &self.label
        }
    }
}

/// Answer to a network create, which only carries the id and label
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NetworkResult {
    pub id: String,
    pub label: String,
    pub result: String,
}

pub async fn list_networks(client: &CivoClient) -> Result<Vec<Network>, ProviderError> {
    client.get(NETWORKS).await
}

pub async fn get_network(client: &CivoClient, id: &str) -> Result<Network, ProviderError> {
    client.get(&item_path(NETWORKS, id)).await
}

pub async fn find_network(client: &CivoClient, search: &str) -> Result<Network, ProviderError> {
    let networks = list_networks(client).await?;
    find_match(networks, search, "network", |n| {
        vec![n.id.as_str(), n.name.as_str(), n.label.as_str()]
    })
}

/// The network Civo places resources in when none is named
pub async fn default_network(client: &CivoClient) -> Result<Network, ProviderError> {
    list_networks(client)
        .await?
        .into_iter()
        .find(|n| n.default)
        .ok_or_else(|| ProviderError::ZeroMatches {
            kind: "network",
            search: "default network".to_string(),
        })
}

pub async fn create_network(
    client: &CivoClient,
    label: &str,
) -> Result<NetworkResult, ProviderError> {
    let body = json!({
        "label": label,
        "region": client.region(),
    });
    client.post(NETWORKS, &body).await
}

pub async fn delete_network(client: &CivoClient, id: &str) -> Result<SimpleResponse, ProviderError> {
    client.delete(&item_path(NETWORKS, id)).await
}
