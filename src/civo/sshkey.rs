//! Civo SSH keys

use super::client::{item_path, CivoClient, SimpleResponse};
use super::error::ProviderError;
use super::find::find_match;
use serde::Deserialize;
use serde_json::json;

const SSH_KEYS: &str = "/v2/sshkeys";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SshKey {
    pub id: String,
    pub name: String,
    pub public_key: String,
    pub fingerprint: String,
    pub created_at: Option<String>,
}

pub async fn list_ssh_keys(client: &CivoClient) -> Result<Vec<SshKey>, ProviderError> {
    client.get(SSH_KEYS).await
}

pub async fn find_ssh_key(client: &CivoClient, search: &str) -> Result<SshKey, ProviderError> {
    let keys = list_ssh_keys(client).await?;
    find_match(keys, search, "ssh key", |k| {
        vec![k.id.as_str(), k.name.as_str()]
    })
}

pub async fn create_ssh_key(
    client: &CivoClient,
    name: &str,
    public_key: &str,
) -> Result<SimpleResponse, ProviderError> {
    let body = json!({
        "name": name,
        "public_key": public_key,
    });
    client.post(SSH_KEYS, &body).await
}

pub async fn delete_ssh_key(
    client: &CivoClient,
    id: &str,
) -> Result<SimpleResponse, ProviderError> {
    client.delete(&item_path(SSH_KEYS, id)).await
}
