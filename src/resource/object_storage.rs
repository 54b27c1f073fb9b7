//! Object storage buckets

use super::{
    filter_namespace, lookup_from, require_selector, saturating_i32, Lookup, Resource, Translator,
};
use crate::civo::objectstore::{self as civo_objectstore, CreateObjectStoreRequest, ObjectStore};
use crate::error::ApiResult;
use crate::schema::{FilterOptions, Object, ObjectMeta, ObjectStorageSpec, ObjectStorageStatus};
use crate::session::CallContext;

pub struct ObjectStorageTranslator;

fn to_object_storage(store: ObjectStore) -> Resource<ObjectStorageTranslator> {
    let endpoint = store.endpoint();
    let credential = store.owner_info.name;

    let spec = ObjectStorageSpec {
        size: saturating_i32(store.max_size),
        storage_credential: credential.clone(),
    };
    let status = ObjectStorageStatus {
        state: store.status,
        endpoint,
        storage_credential: credential,
    };
    Object::new(
        ObjectStorageTranslator::KIND,
        ObjectMeta::new(store.name, store.id),
        spec,
        status,
    )
}

impl Translator for ObjectStorageTranslator {
    type Spec = ObjectStorageSpec;
    type Status = ObjectStorageStatus;

    const KIND: &'static str = "ObjectStorage";
    const ROUTE: &'static str = "objectstorage";
    const NETWORK_SCOPED: bool = false;

    async fn list(
        ctx: &CallContext,
        filter: &FilterOptions,
    ) -> ApiResult<Vec<Resource<Self>>> {
        let stores = civo_objectstore::list_object_stores(ctx.session()?).await?;
        let items = stores.into_iter().map(to_object_storage).collect();
        Ok(filter_namespace(items, filter))
    }

    async fn lookup(
        ctx: &CallContext,
        filter: &FilterOptions,
    ) -> ApiResult<Lookup<Resource<Self>>> {
        let session = ctx.session()?;
        let search = require_selector(filter)?;
        let found = civo_objectstore::find_object_store(session, search).await;
        Ok(lookup_from(found)?.map(to_object_storage))
    }

    async fn create(
        ctx: &CallContext,
        resource: Resource<Self>,
    ) -> ApiResult<Option<Resource<Self>>> {
        let session = ctx.session()?;
        let Object { metadata, spec, .. } = resource;

        // Buckets are owned by a credential named on input, addressed by its access key
        let access_key_id = if spec.storage_credential.is_empty() {
            None
        } else {
            let credential =
                civo_objectstore::find_credential(session, &spec.storage_credential).await?;
            Some(credential.access_key_id.expose().to_string())
        };

        let request = CreateObjectStoreRequest {
            name: metadata.name,
            max_size_gb: i64::from(spec.size),
            access_key_id,
            region: session.region().to_string(),
        };

        let created = civo_objectstore::create_object_store(session, &request).await?;
        tracing::info!(id = %created.id, name = %created.name, "object store created");

        Self::get(ctx, &FilterOptions::by_id(created.id)).await
    }

    async fn remove(ctx: &CallContext, resource: &Resource<Self>) -> ApiResult<()> {
        civo_objectstore::delete_object_store(ctx.session()?, &resource.metadata.uid).await?;
        Ok(())
    }
}
