//! Firewalls and their rules

use super::{
    filter_namespace, lookup_from, network_id_for_create, require_selector, resolve_namespace,
    Lookup, ReferenceKind, ReferenceTable, Resource, Translator,
};
use crate::civo::firewall::{self as civo_firewall, Firewall, FirewallConfig};
use crate::civo::firewall::FirewallRule as NativeRule;
use crate::error::ApiResult;
use crate::schema::{FilterOptions, FirewallRule, FirewallSpec, FirewallStatus, Object, ObjectMeta};
use crate::session::CallContext;

const INGRESS: &str = "ingress";
const EGRESS: &str = "egress";

pub struct FirewallTranslator;

fn to_rule(rule: NativeRule) -> FirewallRule {
    FirewallRule {
        source: rule.cidr,
        label: rule.label,
        ports: rule.ports,
        protocol: rule.protocol,
        action: rule.action,
    }
}

fn to_native(rule: FirewallRule, direction: &str) -> NativeRule {
    NativeRule {
        protocol: rule.protocol,
        cidr: rule.source,
        direction: direction.to_string(),
        label: rule.label,
        action: rule.action,
        ports: rule.ports,
    }
}

fn to_firewall(firewall: Firewall, namespace: String) -> Resource<FirewallTranslator> {
    let state = if firewall.is_inactive() { "Inactive" } else { "Ready" };
    let total_rules = firewall.rules_count.to_string();

    let (ingress, egress): (Vec<_>, Vec<_>) = firewall
        .rules
        .into_iter()
        .partition(|rule| rule.direction == INGRESS);

    let spec = FirewallSpec {
        ingress: ingress.into_iter().map(to_rule).collect(),
        egress: egress.into_iter().map(to_rule).collect(),
    };

    Object::new(
        FirewallTranslator::KIND,
        ObjectMeta::new(firewall.name, firewall.id).with_namespace(namespace),
        spec,
        FirewallStatus {
            state: state.to_string(),
            total_rules,
        },
    )
}

impl Translator for FirewallTranslator {
    type Spec = FirewallSpec;
    type Status = FirewallStatus;

    const KIND: &'static str = "Firewall";
    const ROUTE: &'static str = "firewall";
    const NETWORK_SCOPED: bool = true;

    async fn list(
        ctx: &CallContext,
        filter: &FilterOptions,
    ) -> ApiResult<Vec<Resource<Self>>> {
        let session = ctx.session()?;
        let firewalls = civo_firewall::list_firewalls(session).await?;
        let networks = ReferenceTable::load(session, ReferenceKind::Network).await?;

        let items = firewalls
            .into_iter()
            .map(|firewall| {
                let namespace = networks.name_of(&firewall.network_id);
                to_firewall(firewall, namespace)
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

        let found = civo_firewall::find_firewall(session, search).await;

        let firewall = match lookup_from(found)?.into_found() {
            Ok(firewall) => firewall,
            Err(missing) => return Ok(missing),
        };

        match resolve_namespace(session, filter, &firewall.network_id).await? {
            Some(namespace) => Ok(Lookup::Found(to_firewall(firewall, namespace))),
            None => Ok(Lookup::FilteredOut),
        }
    }

    async fn create(
        ctx: &CallContext,
        resource: Resource<Self>,
    ) -> ApiResult<Option<Resource<Self>>> {
        let session = ctx.session()?;
        let Object { metadata, spec, .. } = resource;

        let network_id = network_id_for_create(session, &metadata.namespace).await?;

        let rules = spec
            .ingress
            .into_iter()
            .map(|rule| to_native(rule, INGRESS))
            .chain(spec.egress.into_iter().map(|rule| to_native(rule, EGRESS)))
            .collect();

        let config = FirewallConfig {
            name: metadata.name,
            region: session.region().to_string(),
            network_id,
            create_rules: false,
            rules,
        };

        let created = civo_firewall::create_firewall(session, &config).await?;
        tracing::info!(id = %created.id, name = %created.name, "firewall created");

        Self::get(ctx, &FilterOptions::by_id(created.id)).await
    }

    async fn remove(ctx: &CallContext, resource: &Resource<Self>) -> ApiResult<()> {
        civo_firewall::delete_firewall(ctx.session()?, &resource.metadata.uid).await?;
        Ok(())
    }
}
