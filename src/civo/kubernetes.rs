//! Civo managed Kubernetes clusters

use super::client::{item_path, nullable, CivoClient, SimpleResponse};
use super::error::ProviderError;
use super::find::find_match;
use crate::secret::SecretString;
use serde::{Deserialize, Serialize};

const CLUSTERS: &str = "/v2/kubernetes/clusters";

/// A cluster as Civo reports it
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct KubernetesCluster {
    pub id: String,
    pub name: String,
    pub version: String,
    pub status: String,
    pub network_id: String,
    #[serde(deserialize_with = "nullable")]
    pub firewall_id: String,
    pub kubeconfig: SecretString,
    #[serde(deserialize_with = "nullable")]
    pub api_endpoint: String,
    #[serde(deserialize_with = "nullable")]
    pub master_ip: String,
    #[serde(deserialize_with = "nullable")]
    pub cni_plugin: String,
    #[serde(deserialize_with = "nullable")]
    pub cluster_type: String,
    pub created_at: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub pools: Vec<KubernetesPool>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct KubernetesPool {
    pub id: String,
    pub size: String,
    pub count: i64,
}

/// Cluster create request
#[derive(Debug, Clone, Default, Serialize)]
pub struct KubernetesClusterConfig {
    pub name: String,
    pub region: String,
    pub network_id: String,
    pub pools: Vec<KubernetesPool>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub kubernetes_version: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cni_plugin: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cluster_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_firewall: Option<String>,
}

pub async fn list_clusters(client: &CivoClient) -> Result<Vec<KubernetesCluster>, ProviderError> {
    client.get_all_pages(CLUSTERS).await
}

pub async fn find_cluster(
    client: &CivoClient,
    search: &str,
) -> Result<KubernetesCluster, ProviderError> {
    let clusters = list_clusters(client).await?;
    find_match(clusters, search, "kubernetes cluster", |c| {
        vec![c.id.as_str(), c.name.as_str()]
    })
}

pub async fn create_cluster(
    client: &CivoClient,
    config: &KubernetesClusterConfig,
) -> Result<KubernetesCluster, ProviderError> {
    let body = serde_json::to_value(config)?;
    client.post(CLUSTERS, &body).await
}

pub async fn delete_cluster(
    client: &CivoClient,
    id: &str,
) -> Result<SimpleResponse, ProviderError> {
    client.delete(&item_path(CLUSTERS, id)).await
}
