//! Object storage credentials

use super::{filter_namespace, lookup_from, require_selector, Lookup, Resource, Translator};
use crate::civo::objectstore::{
    self as civo_objectstore, CreateObjectStoreCredentialRequest, ObjectStoreCredential,
};
use crate::error::ApiResult;
use crate::schema::{
    FilterOptions, Object, ObjectMeta, ObjectStorageCredentialSpec, ObjectStorageCredentialStatus,
};
use crate::secret::SecretString;
use crate::session::CallContext;

pub struct ObjectStorageCredentialTranslator;

fn to_credential(credential: ObjectStoreCredential) -> Resource<ObjectStorageCredentialTranslator> {
    Object::new(
        ObjectStorageCredentialTranslator::KIND,
        ObjectMeta::new(credential.name, credential.id),
        ObjectStorageCredentialSpec {
            access_key: credential.access_key_id,
            secret_key: credential.secret_access_key_id,
        },
        ObjectStorageCredentialStatus {
            state: credential.status,
        },
    )
}

fn provided(secret: SecretString) -> Option<SecretString> {
    if secret.is_empty() {
        None
    } else {
        Some(secret)
    }
}

impl Translator for ObjectStorageCredentialTranslator {
    type Spec = ObjectStorageCredentialSpec;
    type Status = ObjectStorageCredentialStatus;

    const KIND: &'static str = "ObjectStorageCredential";
    const ROUTE: &'static str = "objectstoragecredential";
    const NETWORK_SCOPED: bool = false;

    async fn list(
        ctx: &CallContext,
        filter: &FilterOptions,
    ) -> ApiResult<Vec<Resource<Self>>> {
        let credentials = civo_objectstore::list_credentials(ctx.session()?).await?;
        let items = credentials.into_iter().map(to_credential).collect();
        Ok(filter_namespace(items, filter))
    }

    async fn lookup(
        ctx: &CallContext,
        filter: &FilterOptions,
    ) -> ApiResult<Lookup<Resource<Self>>> {
        let session = ctx.session()?;
        let search = require_selector(filter)?;
        let found = civo_objectstore::find_credential(session, search).await;
        Ok(lookup_from(found)?.map(to_credential))
    }

    /// Keys are generated by the provider unless the caller supplies them
    async fn create(
        ctx: &CallContext,
        resource: Resource<Self>,
    ) -> ApiResult<Option<Resource<Self>>> {
        let session = ctx.session()?;
        let Object { metadata, spec, .. } = resource;

        let request = CreateObjectStoreCredentialRequest {
            name: metadata.name,
            access_key_id: provided(spec.access_key),
            secret_access_key_id: provided(spec.secret_key),
            region: session.region().to_string(),
        };

        let created = civo_objectstore::create_credential(session, &request).await?;
        tracing::info!(id = %created.id, name = %created.name, "object store credential created");

        Self::get(ctx, &FilterOptions::by_id(created.id)).await
    }

    async fn remove(ctx: &CallContext, resource: &Resource<Self>) -> ApiResult<()> {
        civo_objectstore::delete_credential(ctx.session()?, &resource.metadata.uid).await?;
        Ok(())
    }
}
