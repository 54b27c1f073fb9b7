//! Per-kind spec and status shapes

use super::Object;
use crate::secret::SecretString;
use serde::{Deserialize, Deserializer, Serialize};

pub type VirtualMachine = Object<VirtualMachineSpec, VirtualMachineStatus>;
pub type KubernetesCluster = Object<KubernetesClusterSpec, KubernetesClusterStatus>;
pub type Namespace = Object<NamespaceSpec, NamespaceStatus>;
pub type Firewall = Object<FirewallSpec, FirewallStatus>;
pub type Ip = Object<IpSpec, IpStatus>;
pub type Database = Object<DatabaseSpec, DatabaseStatus>;
pub type ObjectStorage = Object<ObjectStorageSpec, ObjectStorageStatus>;
pub type ObjectStorageCredential =
    Object<ObjectStorageCredentialSpec, ObjectStorageCredentialStatus>;
pub type Domain = Object<DomainSpec, DomainStatus>;
pub type SshKey = Object<SshKeySpec, SshKeyStatus>;

// Compute instance

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VirtualMachineSpec {
    pub size: String,
    /// Firewall name
    pub firewall: String,
    pub ipv4: bool,
    pub ipv6: bool,
    /// Disk image name or id
    pub image: String,
    pub auth: VirtualMachineAuth,
    pub tags: Vec<String>,
    pub user_script: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VirtualMachineAuth {
    pub user: String,
    pub ssh_key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VirtualMachineStatus {
    pub private_ip: String,
    pub public_ip: String,
    pub state: String,
}

// Kubernetes cluster

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KubernetesClusterSpec {
    pub pools: Vec<KubernetesClusterPool>,
    pub version: String,
    pub firewall: String,
    pub cni_plugin: String,
    pub cluster_type: String,
    pub kubeconfig: SecretString,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KubernetesClusterPool {
    pub id: String,
    pub size: String,
    pub count: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KubernetesClusterStatus {
    pub state: String,
    pub endpoint: String,
    pub public_ip: String,
}

// Namespace (virtual network)

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamespaceSpec {
    pub finalizers: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamespaceStatus {
    pub phase: String,
}

// Firewall

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FirewallSpec {
    pub ingress: Vec<FirewallRule>,
    pub egress: Vec<FirewallRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FirewallRule {
    /// CIDR blocks; a single string is accepted on input
    #[serde(alias = "cidr", deserialize_with = "one_or_many")]
    pub source: Vec<String>,
    pub label: String,
    pub ports: String,
    pub protocol: String,
    pub action: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FirewallStatus {
    /// `Ready` or `Inactive`
    pub state: String,
    pub total_rules: String,
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(s)) if s.is_empty() => Vec::new(),
        Some(OneOrMany::One(s)) => vec![s],
        Some(OneOrMany::Many(v)) => v,
        None => Vec::new(),
    })
}

// Floating IP

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IpSpec {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IpStatus {
    pub ip: String,
    pub assigned_to: AssignedTo,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssignedTo {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
}

// Database

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DatabaseSpec {
    pub nodes: i32,
    pub size: String,
    pub engine: String,
    pub engine_version: String,
    pub firewall: String,
}

/// Carries the provider-generated password in plaintext
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DatabaseStatus {
    pub username: String,
    pub password: SecretString,
    pub port: i32,
    pub public_ip: String,
    pub state: String,
}

// Object storage

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ObjectStorageSpec {
    /// Max size in GB
    pub size: i32,
    /// Name of the owning credential
    pub storage_credential: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ObjectStorageStatus {
    pub state: String,
    pub endpoint: String,
    pub storage_credential: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ObjectStorageCredentialSpec {
    pub access_key: SecretString,
    pub secret_key: SecretString,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectStorageCredentialStatus {
    pub state: String,
}

// Domain

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainSpec {
    pub records: Vec<Record>,
}

/// A DNS record; unset `ttl`/`priority` mean "provider default", never zero
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Record {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub value: String,
    pub ttl: Option<i32>,
    pub priority: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainStatus {
    pub state: String,
}

// SSH key

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SshKeySpec {
    pub public_key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SshKeyStatus {
    pub finger_print: String,
    pub state: String,
}
