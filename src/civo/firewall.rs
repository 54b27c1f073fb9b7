//! Civo firewalls

use super::client::{item_path, nullable, CivoClient, SimpleResponse};
use super::error::ProviderError;
use super::find::find_match;
use serde::{Deserialize, Serialize};

const FIREWALLS: &str = "/v2/firewalls";

/// A firewall as Civo reports it
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Firewall {
    pub id: String,
    pub name: String,
    pub rules_count: i64,
    pub instance_count: i64,
    pub cluster_count: i64,
    pub loadbalancer_count: i64,
    #[serde(deserialize_with = "nullable")]
    pub network_id: String,
    #[serde(deserialize_with = "nullable")]
    pub rules: Vec<FirewallRule>,
}

impl Firewall {
    /// A firewall nothing is attached to
    pub fn is_inactive(&self) -> bool {
        self.cluster_count == 0 && self.instance_count == 0 && self.loadbalancer_count == 0
    }
}

/// One rule; Civo keeps ingress and egress in a single list tagged by `direction`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct FirewallRule {
    pub protocol: String,
    pub cidr: Vec<String>,
    pub direction: String,
    pub label: String,
    pub action: String,
    pub ports: String,
}

/// Firewall create request
#[derive(Debug, Clone, Default, Serialize)]
pub struct FirewallConfig {
    pub name: String,
    pub region: String,
    pub network_id: String,
    pub create_rules: bool,
    pub rules: Vec<FirewallRule>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FirewallResult {
    pub id: String,
    pub name: String,
    pub result: String,
}

pub async fn list_firewalls(client: &CivoClient) -> Result<Vec<Firewall>, ProviderError> {
    client.get(FIREWALLS).await
}

pub async fn find_firewall(client: &CivoClient, search: &str) -> Result<Firewall, ProviderError> {
    let firewalls = list_firewalls(client).await?;
    find_match(firewalls, search, "firewall", |f| {
        vec![f.id.as_str(), f.name.as_str()]
    })
}

pub async fn create_firewall(
    client: &CivoClient,
    config: &FirewallConfig,
) -> Result<FirewallResult, ProviderError> {
    let body = serde_json::to_value(config)?;
    client.post(FIREWALLS, &body).await
}

pub async fn delete_firewall(
    client: &CivoClient,
    id: &str,
) -> Result<SimpleResponse, ProviderError> {
    client.delete(&item_path(FIREWALLS, id)).await
}
