//! Kind registry
//!
//! Describes every registered resource kind: its route segment, normalized
//! kind name and the operations it answers. Served by `GET /v1/kinds`.

use super::cluster::KubernetesClusterTranslator;
use super::database::DatabaseTranslator;
use super::domain::DomainTranslator;
use super::firewall::FirewallTranslator;
use super::instance::VirtualMachineTranslator;
use super::ip::IpTranslator;
use super::namespace::NamespaceTranslator;
use super::object_storage::ObjectStorageTranslator;
use super::object_storage_credential::ObjectStorageCredentialTranslator;
use super::ssh_key::SshKeyTranslator;
use super::Translator;
use serde::Serialize;
use std::sync::OnceLock;

/// Operations every kind answers
pub const OPERATIONS: [&str; 4] = ["list", "get", "create", "delete"];

/// Description of one resource kind
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KindInfo {
    /// Route segment under `/v1/`
    pub route: &'static str,
    pub kind: &'static str,
    pub list_kind: String,
    pub api_version: &'static str,
    /// Items carry the owning network as namespace
    pub network_scoped: bool,
    pub operations: &'static [&'static str],
}

impl KindInfo {
    fn of<T: Translator>() -> Self {
        Self {
            route: T::ROUTE,
            kind: T::KIND,
            list_kind: format!("{}List", T::KIND),
            api_version: crate::schema::API_VERSION,
            network_scoped: T::NETWORK_SCOPED,
            operations: &OPERATIONS,
        }
    }
}

static KINDS: OnceLock<Vec<KindInfo>> = OnceLock::new();

/// All registered kinds, in route order
pub fn kinds() -> &'static [KindInfo] {
    KINDS.get_or_init(|| {
        vec![
            KindInfo::of::<VirtualMachineTranslator>(),
            KindInfo::of::<KubernetesClusterTranslator>(),
            KindInfo::of::<NamespaceTranslator>(),
            KindInfo::of::<FirewallTranslator>(),
            KindInfo::of::<IpTranslator>(),
            KindInfo::of::<DatabaseTranslator>(),
            KindInfo::of::<ObjectStorageTranslator>(),
            KindInfo::of::<ObjectStorageCredentialTranslator>(),
            KindInfo::of::<DomainTranslator>(),
            KindInfo::of::<SshKeyTranslator>(),
        ]
    })
}
