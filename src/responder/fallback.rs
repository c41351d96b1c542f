// src/responder/fallback.rs — Remote-then-local responder chain
//
// The remote webhook is tried first when configured; any failure there
// (network, timeout, bad status, malformed body) is recovered by the
// local engine, invisibly to the user apart from the extra latency.
// The cause of the remote failure never influences control flow.

use async_trait::async_trait;
use std::sync::Arc;

use super::Responder;
use crate::context::ConversationContext;
use crate::engine::Reply;
use crate::infra::errors::AssistantError;

pub struct FallbackResponder {
    remote: Option<Arc<dyn Responder>>,
    local: Arc<dyn Responder>,
}

impl FallbackResponder {
    pub fn new(remote: Option<Arc<dyn Responder>>, local: Arc<dyn Responder>) -> Self {
        Self { remote, local }
    }

    /// Chain with no remote leg: purely local resolution.
    pub fn local_only(local: Arc<dyn Responder>) -> Self {
        Self {
            remote: None,
            local,
        }
    }
}

#[async_trait]
impl Responder for FallbackResponder {
    fn id(&self) -> &str {
        "fallback-chain"
    }

    async fn respond(
        &self,
        message: &str,
        session_id: &str,
        context: &ConversationContext,
    ) -> Result<Reply, AssistantError> {
        if let Some(ref remote) = self.remote {
            match remote.respond(message, session_id, context).await {
                Ok(reply) => return Ok(reply),
                Err(e) => {
                    tracing::warn!(
                        responder = remote.id(),
                        "remote responder failed, using local engine: {e}"
                    );
                }
            }
        }

        self.local.respond(message, session_id, context).await
    }
}
