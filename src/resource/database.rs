//! Managed databases

use super::{
    filter_namespace, firewall_id_for_create, lookup_from, network_id_for_create,
    require_selector, resolve_namespace, resolve_reference, saturating_i32, Lookup,
    ReferenceKind, ReferenceTable, Resource, Translator,
};
use crate::civo::database::{self as civo_database, CreateDatabaseRequest, Database};
use crate::error::ApiResult;
use crate::schema::{DatabaseSpec, DatabaseStatus, FilterOptions, Object, ObjectMeta};
use crate::session::CallContext;

pub struct DatabaseTranslator;

fn to_database(
    database: Database,
    namespace: String,
    firewall: String,
) -> Resource<DatabaseTranslator> {
    let spec = DatabaseSpec {
        nodes: saturating_i32(database.nodes),
        size: database.size,
        engine: database.software,
        engine_version: database.software_version,
        firewall,
    };
    let status = DatabaseStatus {
        username: database.username,
        password: database.password,
        port: saturating_i32(database.port),
        public_ip: database.public_ipv4,
        state: database.status,
    };
    Object::new(
        DatabaseTranslator::KIND,
        ObjectMeta::new(database.name, database.id).with_namespace(namespace),
        spec,
        status,
    )
}

impl Translator for DatabaseTranslator {
    type Spec = DatabaseSpec;
    type Status = DatabaseStatus;

    const KIND: &'static str = "Database";
    const ROUTE: &'static str = "database";
    const NETWORK_SCOPED: bool = true;

    async fn list(
        ctx: &CallContext,
        filter: &FilterOptions,
    ) -> ApiResult<Vec<Resource<Self>>> {
        let session = ctx.session()?;
        let databases = civo_database::list_databases(session).await?;
        let networks = ReferenceTable::load(session, ReferenceKind::Network).await?;
        let firewalls = ReferenceTable::load(session, ReferenceKind::Firewall).await?;

        let items = databases
            .into_iter()
            .map(|database| {
                let namespace = networks.name_of(&database.network_id);
                let firewall = firewalls.name_of(&database.firewall_id);
                to_database(database, namespace, firewall)
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

        let found = civo_database::find_database(session, search).await;

        let database = match lookup_from(found)?.into_found() {
            Ok(database) => database,
            Err(missing) => return Ok(missing),
        };

        let Some(namespace) = resolve_namespace(session, filter, &database.network_id).await?
        else {
            return Ok(Lookup::FilteredOut);
        };
        let firewall =
            resolve_reference(session, ReferenceKind::Firewall, &database.firewall_id).await?;

        Ok(Lookup::Found(to_database(database, namespace, firewall)))
    }

    async fn create(
        ctx: &CallContext,
        resource: Resource<Self>,
    ) -> ApiResult<Option<Resource<Self>>> {
        let session = ctx.session()?;
        let Object { metadata, spec, .. } = resource;

        let network_id = network_id_for_create(session, &metadata.namespace).await?;
        let firewall_id = firewall_id_for_create(session, &spec.firewall).await?;

        let request = CreateDatabaseRequest {
            name: metadata.name,
            size: spec.size,
            software: spec.engine,
            software_version: spec.engine_version,
            network_id,
            nodes: i64::from(spec.nodes),
            firewall_id,
            region: session.region().to_string(),
        };

        let created = civo_database::create_database(session, &request).await?;
        tracing::info!(id = %created.id, name = %created.name, "database created");

        Self::get(ctx, &FilterOptions::by_id(created.id)).await
    }

    async fn remove(ctx: &CallContext, resource: &Resource<Self>) -> ApiResult<()> {
        civo_database::delete_database(ctx.session()?, &resource.metadata.uid).await?;
        Ok(())
    }
}
