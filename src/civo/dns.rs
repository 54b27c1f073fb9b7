//! Civo DNS domains and records
//!
//! DNS is account-wide rather than regional; the region query parameter is
//! still sent and ignored by the provider.

use super::client::{item_path, CivoClient, SimpleResponse};
use super::error::ProviderError;
use super::find::find_match;
use serde::{Deserialize, Serialize};
use serde_json::json;

const DOMAINS: &str = "/v2/dns";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DnsDomain {
    pub id: String,
    pub account_id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DnsRecord {
    pub id: String,
    pub domain_id: String,
    pub name: String,
    pub value: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub priority: Option<i64>,
    pub ttl: Option<i64>,
    pub created_at: Option<String>,
}

/// Record create request; unset `ttl`/`priority` are left to the provider default
#[derive(Debug, Clone, Default, Serialize)]
pub struct DnsRecordConfig {
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<i64>,
}

pub async fn list_domains(client: &CivoClient) -> Result<Vec<DnsDomain>, ProviderError> {
    client.get(DOMAINS).await
}

pub async fn find_domain(client: &CivoClient, search: &str) -> Result<DnsDomain, ProviderError> {
    let domains = list_domains(client).await?;
    find_match(domains, search, "domain", |d| {
        vec![d.id.as_str(), d.name.as_str()]
    })
}

pub async fn create_domain(client: &CivoClient, name: &str) -> Result<DnsDomain, ProviderError> {
    let body = json!({ "name": name });
    client.post(DOMAINS, &body).await
}

pub async fn delete_domain(
    client: &CivoClient,
    id: &str,
) -> Result<SimpleResponse, ProviderError> {
    client.delete(&item_path(DOMAINS, id)).await
}

pub async fn list_records(
    client: &CivoClient,
    domain_id: &str,
) -> Result<Vec<DnsRecord>, ProviderError> {
    let path = format!("{}/records", item_path(DOMAINS, domain_id));
    client.get(&path).await
}

pub async fn create_record(
    client: &CivoClient,
    domain_id: &str,
    config: &DnsRecordConfig,
) -> Result<DnsRecord, ProviderError> {
    let path = format!("{}/records", item_path(DOMAINS, domain_id));
    let body = serde_json::to_value(config)?;
    client.post(&path, &body).await
}
