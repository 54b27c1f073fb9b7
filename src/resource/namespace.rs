//! Virtual networks as `Namespace`

use super::{filter_namespace, lookup_from, require_selector, Lookup, Resource, Translator};
use crate::civo::network::{self as civo_network, Network};
use crate::error::ApiResult;
use crate::schema::{FilterOptions, NamespaceSpec, NamespaceStatus, Object, ObjectMeta};
use crate::session::CallContext;

const PHASE_ACTIVE: &str = "Active";

pub struct NamespaceTranslator;

/// A namespace is named after the network's label
fn to_namespace(network: Network) -> Resource<NamespaceTranslator> {
    let name = network.display_name().to_string();
    let metadata = ObjectMeta::new(name, network.id);
    Object::new(
        NamespaceTranslator::KIND,
        metadata,
        NamespaceSpec {
            finalizers: Vec::new(),
        },
        NamespaceStatus {
            phase: PHASE_ACTIVE.to_string(),
        },
    )
}

impl Translator for NamespaceTranslator {
    type Spec = NamespaceSpec;
    type Status = NamespaceStatus;

    const KIND: &'static str = "Namespace";
    const ROUTE: &'static str = "namespace";
    const NETWORK_SCOPED: bool = false;

    async fn list(
        ctx: &CallContext,
        filter: &FilterOptions,
    ) -> ApiResult<Vec<Resource<Self>>> {
        let networks = civo_network::list_networks(ctx.session()?).await?;
        let items = networks.into_iter().map(to_namespace).collect();
        Ok(filter_namespace(items, filter))
    }

    async fn lookup(
        ctx: &CallContext,
        filter: &FilterOptions,
    ) -> ApiResult<Lookup<Resource<Self>>> {
        let session = ctx.session()?;
        let search = require_selector(filter)?;
        Ok(lookup_from(civo_network::find_network(session, search).await)?.map(to_namespace))
    }

    /// Create then re-read by id; the create answer only carries id and label
    async fn create(
        ctx: &CallContext,
        resource: Resource<Self>,
    ) -> ApiResult<Option<Resource<Self>>> {
        let session = ctx.session()?;
        let created = civo_network::create_network(session, &resource.metadata.name).await?;
        tracing::info!(id = %created.id, label = %created.label, "network created");

        let network = civo_network::get_network(session, &created.id).await?;
        Ok(Some(to_namespace(network)))
    }

    async fn remove(ctx: &CallContext, resource: &Resource<Self>) -> ApiResult<()> {
        civo_network::delete_network(ctx.session()?, &resource.metadata.uid).await?;
        Ok(())
    }
}
