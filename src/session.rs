//! Per-call session context
//!
//! Built by the credential middleware and handed to every translator
//! operation by reference. It lives exactly as long as one inbound call.

use crate::civo::CivoClient;
use crate::error::{ApiResult, GatewayError};
use uuid::Uuid;

#[derive(Clone)]
pub struct CallContext {
    request_id: Uuid,
    session: Option<CivoClient>,
}

impl CallContext {
    /// Call carrying an empty bearer; fails at first provider use
    pub fn anonymous() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            session: None,
        }
    }

    pub fn authenticated(session: CivoClient) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            session: Some(session),
        }
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    /// The provider session, or `Unauthenticated` for anonymous calls
    pub fn session(&self) -> ApiResult<&CivoClient> {
        self.session
            .as_ref()
            .ok_or_else(|| GatewayError::unauthenticated("no provider session for this call"))
    }
}

impl std::fmt::Debug for CallContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallContext")
            .field("request_id", &self.request_id)
            .field("authenticated", &self.session.is_some())
            .finish()
    }
}
