//! Managed Kubernetes clusters

use super::{
    filter_namespace, firewall_id_for_create, lookup_from, network_id_for_create,
    require_selector, resolve_namespace, resolve_reference, saturating_i32, Lookup,
    ReferenceKind, ReferenceTable, Resource, Translator,
};
use crate::civo::kubernetes::{
    self as civo_kubernetes, KubernetesCluster, KubernetesClusterConfig, KubernetesPool,
};
use crate::error::ApiResult;
use crate::schema::{
    FilterOptions, KubernetesClusterPool, KubernetesClusterSpec, KubernetesClusterStatus,
    Object, ObjectMeta,
};
use crate::session::CallContext;

pub struct KubernetesClusterTranslator;

fn to_cluster(
    cluster: KubernetesCluster,
    namespace: String,
    firewall: String,
) -> Resource<KubernetesClusterTranslator> {
    let metadata = ObjectMeta::new(cluster.name, cluster.id)
        .with_namespace(namespace)
        .with_created_at(cluster.created_at.as_deref());

    let pools = cluster
        .pools
        .into_iter()
        .map(|pool| KubernetesClusterPool {
            id: pool.id,
            size: pool.size,
            count: saturating_i32(pool.count),
        })
        .collect();

    let spec = KubernetesClusterSpec {
        pools,
        version: cluster.version,
        firewall,
        cni_plugin: cluster.cni_plugin,
        cluster_type: cluster.cluster_type,
        kubeconfig: cluster.kubeconfig,
    };

    let status = KubernetesClusterStatus {
        state: cluster.status,
        endpoint: cluster.api_endpoint,
        public_ip: cluster.master_ip,
    };

    Object::new(KubernetesClusterTranslator::KIND, metadata, spec, status)
}

impl Translator for KubernetesClusterTranslator {
    type Spec = KubernetesClusterSpec;
    type Status = KubernetesClusterStatus;

    const KIND: &'static str = "KubernetesCluster";
    const ROUTE: &'static str = "kubernetescluster";
    const NETWORK_SCOPED: bool = true;

    async fn list(
        ctx: &CallContext,
        filter: &FilterOptions,
    ) -> ApiResult<Vec<Resource<Self>>> {
        let session = ctx.session()?;
        let clusters = civo_kubernetes::list_clusters(session).await?;
        let networks = ReferenceTable::load(session, ReferenceKind::Network).await?;
        let firewalls = ReferenceTable::load(session, ReferenceKind::Firewall).await?;

        let items = clusters
            .into_iter()
            .map(|cluster| {
                let namespace = networks.name_of(&cluster.network_id);
                let firewall = firewalls.name_of(&cluster.firewall_id);
                to_cluster(cluster, namespace, firewall)
            })
            .collect();

        Ok(filter_namespace(items, filter))
    }

    async fn lookup(
        ctx: &CallContext,
        filter: &FilterOptions,
    ) -> ApiResult<Lookup<Resource<Self>>> {
        let session = ctx.session()?;
        let search = require_selector(filter)?;

        let found = civo_kubernetes::find_cluster(session, search).await;

        let cluster = match lookup_from(found)?.into_found() {
            Ok(cluster) => cluster,
            Err(missing) => return Ok(missing),
        };

        let Some(namespace) = resolve_namespace(session, filter, &cluster.network_id).await? else {
            return Ok(Lookup::FilteredOut);
        };
        let firewall =
            resolve_reference(session, ReferenceKind::Firewall, &cluster.firewall_id).await?;

        Ok(Lookup::Found(to_cluster(cluster, namespace, firewall)))
    }

    async fn create(
        ctx: &CallContext,
        resource: Resource<Self>,
    ) -> ApiResult<Option<Resource<Self>>> {
        let session = ctx.session()?;
        let Object { metadata, spec, .. } = resource;

        let network_id = network_id_for_create(session, &metadata.namespace).await?;
        let instance_firewall = firewall_id_for_create(session, &spec.firewall).await?;

        let pools = spec
            .pools
            .into_iter()
            .map(|pool| KubernetesPool {
                id: pool.id,
                size: pool.size,
                count: i64::from(pool.count),
            })
            .collect();

        let config = KubernetesClusterConfig {
            name: metadata.name,
            region: session.region().to_string(),
            network_id,
            pools,
            kubernetes_version: spec.version,
            cni_plugin: spec.cni_plugin,
            cluster_type: spec.cluster_type,
            instance_firewall,
        };

        let created = civo_kubernetes::create_cluster(session, &config).await?;
        tracing::info!(id = %created.id, name = %created.name, "cluster created");

        Self::get(ctx, &FilterOptions::by_id(created.id)).await
    }

    async fn remove(ctx: &CallContext, resource: &Resource<Self>) -> ApiResult<()> {
        civo_kubernetes::delete_cluster(ctx.session()?, &resource.metadata.uid).await?;
        Ok(())
    }
}
