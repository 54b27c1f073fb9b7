//! Compute instances as `VirtualMachine`

use super::{
    filter_namespace, firewall_id_for_create, lookup_from, network_id_for_create,
    require_selector, resolve_namespace, resolve_reference, Lookup, ReferenceKind,
    ReferenceTable, Resource, Translator,
};
use crate::civo::instance::{self as civo_instance, Instance, InstanceConfig};
use crate::error::ApiResult;
use crate::schema::{
    FilterOptions, Object, ObjectMeta, VirtualMachineAuth, VirtualMachineSpec,
    VirtualMachineStatus,
};
use crate::session::CallContext;

pub struct VirtualMachineTranslator;

/// Map a native instance; `namespace` and `firewall` are already-resolved names
fn to_virtual_machine(
    instance: Instance,
    namespace: String,
    firewall: String,
) -> Resource<VirtualMachineTranslator> {
    let metadata = ObjectMeta::new(instance.hostname, instance.id)
        .with_namespace(namespace)
        .with_created_at(instance.created_at.as_deref());

    let spec = VirtualMachineSpec {
        size: instance.size,
        firewall,
        // Allocation is not reflected back
        ipv4: false,
        ipv6: false,
        image: instance.source_id,
        auth: VirtualMachineAuth {
            user: instance.initial_user,
            ssh_key: instance.ssh_key_id,
        },
        tags: instance.tags,
        user_script: instance.script,
    };

    let status = VirtualMachineStatus {
        private_ip: instance.private_ip,
        public_ip: instance.public_ip,
        state: instance.status,
    };

    Object::new(VirtualMachineTranslator::KIND, metadata, spec, status)
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

impl Translator for VirtualMachineTranslator {
    type Spec = VirtualMachineSpec;
    type Status = VirtualMachineStatus;

    const KIND: &'static str = "VirtualMachine";
    const ROUTE: &'static str = "virtualmachine";
    const NETWORK_SCOPED: bool = true;

    async fn list(
        ctx: &CallContext,
        filter: &FilterOptions,
    ) -> ApiResult<Vec<Resource<Self>>> {
        let session = ctx.session()?;
        let instances = civo_instance::list_instances(session).await?;
        let networks = ReferenceTable::load(session, ReferenceKind::Network).await?;
        let firewalls = ReferenceTable::load(session, ReferenceKind::Firewall).await?;

        let items = instances
            .into_iter()
            .map(|instance| {
                let namespace = networks.name_of(&instance.network_id);
                let firewall = firewalls.name_of(&instance.firewall_id);
                to_virtual_machine(instance, namespace, firewall)
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

        let found = civo_instance::find_instance(session, search).await;

        let instance = match lookup_from(found)?.into_found() {
            Ok(instance) => instance,
            Err(missing) => return Ok(missing),
        };

        let Some(namespace) = resolve_namespace(session, filter, &instance.network_id).await?
        else {
            return Ok(Lookup::FilteredOut);
        };
        let firewall =
            resolve_reference(session, ReferenceKind::Firewall, &instance.firewall_id).await?;

        Ok(Lookup::Found(to_virtual_machine(instance, namespace, firewall)))
    }

    async fn create(
        ctx: &CallContext,
        resource: Resource<Self>,
    ) -> ApiResult<Option<Resource<Self>>> {
        let session = ctx.session()?;
        let Object { metadata, spec, .. } = resource;

        let image = civo_instance::find_disk_image(session, &spec.image).await?;
        let network_id = network_id_for_create(session, &metadata.namespace).await?;
        let firewall_id = firewall_id_for_create(session, &spec.firewall).await?;

        let config = InstanceConfig {
            count: 1,
            hostname: metadata.name.clone(),
            reverse_dns: metadata.name.clone(),
            size: spec.size,
            region: session.region().to_string(),
            public_ip: if spec.ipv4 { "create" } else { "none" }.to_string(),
            network_id,
            template_id: image.id,
            initial_user: non_empty(spec.auth.user),
            ssh_key_id: non_empty(spec.auth.ssh_key),
            firewall_id,
            script: spec.user_script,
            tags: spec.tags.join(" "),
        };

        let created = civo_instance::create_instance(session, &config).await?;
        tracing::info!(id = %created.id, hostname = %metadata.name, "instance created");

        Self::get(ctx, &FilterOptions::by_id(created.id)).await
    }

    async fn remove(ctx: &CallContext, resource: &Resource<Self>) -> ApiResult<()> {
        civo_instance::delete_instance(ctx.session()?, &resource.metadata.uid).await?;
        Ok(())
    }
}
