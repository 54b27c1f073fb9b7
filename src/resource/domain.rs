//! DNS domains and their records

use super::{
    filter_namespace, lookup_from, require_selector, saturating_i32, Lookup, Resource, Translator,
};
use crate::civo::dns::{self as civo_dns, DnsDomain, DnsRecord, DnsRecordConfig};
use crate::civo::CivoClient;
use crate::error::ApiResult;
use crate::schema::{DomainSpec, DomainStatus, FilterOptions, Object, ObjectMeta, Record};
use crate::session::CallContext;

const STATE_ACTIVE: &str = "Active";

pub struct DomainTranslator;

/// Zero on the provider side means "unset"
fn optional(value: Option<i64>) -> Option<i32> {
    value.filter(|v| *v != 0).map(saturating_i32)
}

fn to_record(record: DnsRecord) -> Record {
    Record {
        name: record.name,
        record_type: record.record_type,
        value: record.value,
        ttl: optional(record.ttl),
        priority: optional(record.priority),
    }
}

fn to_domain(domain: DnsDomain, records: Vec<DnsRecord>) -> Resource<DomainTranslator> {
    Object::new(
        DomainTranslator::KIND,
        ObjectMeta::new(domain.name, domain.id),
        DomainSpec {
            records: records.into_iter().map(to_record).collect(),
        },
        DomainStatus {
            state: STATE_ACTIVE.to_string(),
        },
    )
}

async fn with_records(
    session: &CivoClient,
    domain: DnsDomain,
) -> ApiResult<Resource<DomainTranslator>> {
    let records = civo_dns::list_records(session, &domain.id).await?;
    Ok(to_domain(domain, records))
}

impl Translator for DomainTranslator {
    type Spec = DomainSpec;
    type Status = DomainStatus;

    const KIND: &'static str = "Domain";
    const ROUTE: &'static str = "domain";
    const NETWORK_SCOPED: bool = false;

    /// One record listing per domain, issued in order
    async fn list(
        ctx: &CallContext,
        filter: &FilterOptions,
    ) -> ApiResult<Vec<Resource<Self>>> {
        let session = ctx.session()?;
        let domains = civo_dns::list_domains(session).await?;

        let mut items = Vec::with_capacity(domains.len());
        for domain in domains {
            items.push(with_records(session, domain).await?);
        }

        Ok(filter_namespace(items, filter))
    }

    async fn lookup(
        ctx: &CallContext,
        filter: &FilterOptions,
    ) -> ApiResult<Lookup<Resource<Self>>> {
        let session = ctx.session()?;
        let search = require_selector(filter)?;

        let found = civo_dns::find_domain(session, search).await;

        match lookup_from(found)?.into_found() {
            Ok(domain) => Ok(Lookup::Found(with_records(session, domain).await?)),
            Err(missing) => Ok(missing),
        }
    }

    async fn create(
        ctx: &CallContext,
        resource: Resource<Self>,
    ) -> ApiResult<Option<Resource<Self>>> {
        let session = ctx.session()?;
        let Object { metadata, spec, .. } = resource;

        let domain = civo_dns::create_domain(session, &metadata.name).await?;
        tracing::info!(id = %domain.id, name = %domain.name, "domain created");

        for record in spec.records {
            let config = DnsRecordConfig {
                record_type: record.record_type,
                name: record.name,
                value: record.value,
                priority: record.priority.map(i64::from),
                ttl: record.ttl.map(i64::from),
            };
            civo_dns::create_record(session, &domain.id, &config).await?;
        }

        Self::get(ctx, &FilterOptions::by_id(domain.id)).await
    }

    async fn remove(ctx: &CallContext, resource: &Resource<Self>) -> ApiResult<()> {
        civo_dns::delete_domain(ctx.session()?, &resource.metadata.uid).await?;
        Ok(())
    }
}
