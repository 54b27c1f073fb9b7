//! SSH keys

use super::{filter_namespace, lookup_from, require_selector, Lookup, Resource, Translator};
use crate::civo::sshkey::{self as civo_sshkey, SshKey};
use crate::error::ApiResult;
use crate::schema::{FilterOptions, Object, ObjectMeta, SshKeySpec, SshKeyStatus};
use crate::session::CallContext;

pub struct SshKeyTranslator;

fn to_ssh_key(key: SshKey) -> Resource<SshKeyTranslator> {
    let metadata = ObjectMeta::new(key.name, key.id).with_created_at(key.created_at.as_deref());
    Object::new(
        SshKeyTranslator::KIND,
        metadata,
        SshKeySpec {
            public_key: key.public_key,
        },
        SshKeyStatus {
            finger_print: key.fingerprint,
            state: "Active".to_string(),
        },
    )
}

impl Translator for SshKeyTranslator {
    type Spec = SshKeySpec;
    type Status = SshKeyStatus;

    const KIND: &'static str = "SSHKey";
    const ROUTE: &'static str = "sshkey";
    const NETWORK_SCOPED: bool = false;

    async fn list(
        ctx: &CallContext,
        filter: &FilterOptions,
    ) -> ApiResult<Vec<Resource<Self>>> {
        let keys = civo_sshkey::list_ssh_keys(ctx.session()?).await?;
        Ok(filter_namespace(keys.into_iter().map(to_ssh_key).collect(), filter))
    }

    async fn lookup(
        ctx: &CallContext,
        filter: &FilterOptions,
    ) -> ApiResult<Lookup<Resource<Self>>> {
        let session = ctx.session()?;
        let search = require_selector(filter)?;
        Ok(lookup_from(civo_sshkey::find_ssh_key(session, search).await)?.map(to_ssh_key))
    }

    async fn create(
        ctx: &CallContext,
        resource: Resource<Self>,
    ) -> ApiResult<Option<Resource<Self>>> {
        let session = ctx.session()?;
        let name = resource.metadata.name;
        let created = civo_sshkey::create_ssh_key(session, &name, &resource.spec.public_key).await?;
        tracing::info!(id = %created.id, name = %name, "ssh key uploaded");

        let filter = if created.id.is_empty() {
            FilterOptions::by_name(name)
        } else {
            FilterOptions::by_id(created.id)
        };
        Self::get(ctx, &filter).await
    }

    async fn remove(ctx: &CallContext, resource: &Resource<Self>) -> ApiResult<()> {
        civo_sshkey::delete_ssh_key(ctx.session()?, &resource.metadata.uid).await?;
        Ok(())
    }
}
