//! Civo compute instances and the disk images they boot from

use super::client::{item_path, nullable, CivoClient, SimpleResponse};
use super::error::ProviderError;
use super::find::find_match;
use serde::{Deserialize, Serialize};

const INSTANCES: &str = "/v2/instances";
const DISK_IMAGES: &str = "/v2/disk_images";

/// An instance as Civo reports it
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Instance {
    pub id: String,
    pub hostname: String,
    #[serde(deserialize_with = "nullable")]
    pub reverse_dns: String,
    pub size: String,
    pub network_id: String,
    #[serde(deserialize_with = "nullable")]
    pub private_ip: String,
    #[serde(deserialize_with = "nullable")]
    pub public_ip: String,
    pub status: String,
    #[serde(deserialize_with = "nullable")]
    pub firewall_id: String,
    #[serde(deserialize_with = "nullable")]
    pub source_type: String,
    #[serde(deserialize_with = "nullable")]
    pub source_id: String,
    #[serde(deserialize_with = "nullable")]
    pub initial_user: String,
    #[serde(deserialize_with = "nullable")]
    pub ssh_key_id: String,
    #[serde(deserialize_with = "nullable")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub script: String,
    pub created_at: Option<String>,
}

/// Instance create request
#[derive(Debug, Clone, Default, Serialize)]
pub struct InstanceConfig {
    pub count: i32,
    pub hostname: String,
    pub reverse_dns: String,
    pub size: String,
    pub region: String,
    /// `create` or `none`
    pub public_ip: String,
    pub network_id: String,
    pub template_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssh_key_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firewall_id: Option<String>,
    pub script: String,
    /// Space separated, the way the create endpoint expects them
    pub tags: String,
}

/// A bootable disk image
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DiskImage {
    pub id: String,
    pub name: String,
    pub version: String,
    pub state: String,
    pub distribution: String,
    pub label: String,
}

pub async fn list_instances(client: &CivoClient) -> Result<Vec<Instance>, ProviderError> {
    client.get_all_pages(INSTANCES).await
}

pub async fn find_instance(client: &CivoClient, search: &str) -> Result<Instance, ProviderError> {
    let instances = list_instances(client).await?;
    find_match(instances, search, "instance", |i| {
        vec![i.id.as_str(), i.hostname.as_str()]
    })
}

pub async fn create_instance(
    client: &CivoClient,
    config: &InstanceConfig,
) -> Result<Instance, ProviderError> {
    let body = serde_json::to_value(config)?;
    client.post(INSTANCES, &body).await
}

pub async fn delete_instance(
    client: &CivoClient,
    id: &str,
) -> Result<SimpleResponse, ProviderError> {
    client.delete(&item_path(INSTANCES, id)).await
}

pub async fn list_disk_images(client: &CivoClient) -> Result<Vec<DiskImage>, ProviderError> {
    client.get(DISK_IMAGES).await
}

pub async fn find_disk_image(
    client: &CivoClient,
    search: &str,
) -> Result<DiskImage, ProviderError> {
    let images = list_disk_images(client).await?;
    find_match(images, search, "disk image", |d| {
        vec![d.id.as_str(), d.name.as_str()]
    })
}
