//! Civo reserved (floating) IPs

use super::client::{item_path, nullable, CivoClient, SimpleResponse};
use super::error::ProviderError;
use super::find::find_match;
use serde::Deserialize;
use serde_json::json;

const IPS: &str = "/v2/ips";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Ip {
    pub id: String,
    pub name: String,
    pub ip: String,
    #[serde(deserialize_with = "nullable")]
    pub assigned_to: AssignedTo,
}

/// What a reserved IP is currently attached to
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AssignedTo {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
}

pub async fn list_ips(client: &CivoClient) -> Result<Vec<Ip>, ProviderError> {
    client.get_all_pages(IPS).await
}

pub async fn find_ip(client: &CivoClient, search: &str) -> Result<Ip, ProviderError> {
    let ips = list_ips(client).await?;
    find_match(ips, search, "ip", |i| {
        vec![i.id.as_str(), i.name.as_str(), i.ip.as_str()]
    })
}

pub async fn create_ip(client: &CivoClient, name: &str) -> Result<Ip, ProviderError> {
    let body = json!({
        "name": name,
        "region": client.region(),
    });
    client.post(IPS, &body).await
}

pub async fn delete_ip(client: &CivoClient, id: &str) -> Result<SimpleResponse, ProviderError> {
    client.delete(&item_path(IPS, id)).await
}
