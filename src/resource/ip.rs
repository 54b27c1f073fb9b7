//! Reserved IPs

use super::{filter_namespace, lookup_from, require_selector, Lookup, Resource, Translator};
use crate::civo::ip::{self as civo_ip, Ip};
use crate::error::ApiResult;
use crate::schema::{AssignedTo, FilterOptions, IpSpec, IpStatus, Object, ObjectMeta};
use crate::session::CallContext;

pub struct IpTranslator;

fn to_ip(ip: Ip) -> Resource<IpTranslator> {
    let spec = IpSpec {
        name: ip.name.clone(),
    };
    let status = IpStatus {
        ip: ip.ip,
        assigned_to: AssignedTo {
            id: ip.assigned_to.id,
            kind: ip.assigned_to.kind,
            name: ip.assigned_to.name,
        },
    };
    Object::new(IpTranslator::KIND, ObjectMeta::new(ip.name, ip.id), spec, status)
}

impl Translator for IpTranslator {
    type Spec = IpSpec;
    type Status = IpStatus;

    const KIND: &'static str = "Ip";
    const ROUTE: &'static str = "ip";
    const NETWORK_SCOPED: bool = false;

    async fn list(
        ctx: &CallContext,
        filter: &FilterOptions,
    ) -> ApiResult<Vec<Resource<Self>>> {
        let ips = civo_ip::list_ips(ctx.session()?).await?;
        Ok(filter_namespace(ips.into_iter().map(to_ip).collect(), filter))
    }

    async fn lookup(
        ctx: &CallContext,
        filter: &FilterOptions,
    ) -> ApiResult<Lookup<Resource<Self>>> {
        let session = ctx.session()?;
        let search = require_selector(filter)?;
        Ok(lookup_from(civo_ip::find_ip(session, search).await)?.map(to_ip))
    }

    async fn create(
        ctx: &CallContext,
        resource: Resource<Self>,
    ) -> ApiResult<Option<Resource<Self>>> {
        let session = ctx.session()?;
        let name = if resource.spec.name.is_empty() {
            resource.metadata.name
        } else {
            resource.spec.name
        };
        let created = civo_ip::create_ip(session, &name).await?;
        tracing::info!(id = %created.id, name = %name, "ip reserved");

        Self::get(ctx, &FilterOptions::by_id(created.id)).await
    }

    async fn remove(ctx: &CallContext, resource: &Resource<Self>) -> ApiResult<()> {
        civo_ip::delete_ip(ctx.session()?, &resource.metadata.uid).await?;
        Ok(())
    }
}
