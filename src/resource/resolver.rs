//! Reference resolver
//!
//! Civo objects point at their network and firewall by id; the normalized
//! shape wants names. A [`ReferenceTable`] is one fresh List of the referenced
//! kind, scanned linearly per lookup. Nothing is cached across calls. An id
//! that no longer resolves yields an empty name, never an error.

use crate::civo::{firewall, network, CivoClient};
use crate::error::ApiResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Network,
    Firewall,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub id: String,
    pub name: String,
}

/// Snapshot of one referenced kind's id → display name pairs
#[derive(Debug, Clone)]
pub struct ReferenceTable {
    entries: Vec<Reference>,
}

impl ReferenceTable {
    pub async fn load(session: &CivoClient, kind: ReferenceKind) -> ApiResult<Self> {
        let entries = match kind {
            ReferenceKind::Network => network::list_networks(session)
                .await?
                .into_iter()
                .map(|n| Reference {
                    name: n.display_name().to_string(),
                    id: n.id,
                })
                .collect(),
            ReferenceKind::Firewall => firewall::list_firewalls(session)
                .await?
                .into_iter()
                .map(|f| Reference { id: f.id, name: f.name })
                .collect(),
        };
        Ok(Self { entries })
    }

    /// Display name for `id`, empty when unmatched
    pub fn name_of(&self, id: &str) -> String {
        if id.is_empty() {
            return String::new();
        }
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.name.clone())
            .unwrap_or_default()
    }
}

/// Resolve a single reference; an empty id costs no round trip
pub async fn resolve_reference(
    session: &CivoClient,
    kind: ReferenceKind,
    id: &str,
) -> ApiResult<String> {
    if id.is_empty() {
        return Ok(String::new());
    }
    let table = ReferenceTable::load(session, kind).await?;
    Ok(table.name_of(id))
}
