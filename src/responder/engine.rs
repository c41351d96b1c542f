// src/responder/engine.rs — Local intent engine as a Responder

use async_trait::async_trait;
use std::sync::Arc;

use super::Responder;
use crate::catalog::Catalog;
use crate::context::ConversationContext;
use crate::engine::{Reply, Resolver};
use crate::infra::errors::AssistantError;

pub struct EngineResponder {
    resolver: Resolver,
}

impl EngineResponder {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            resolver: Resolver::new(catalog),
        }
    }
}

#[async_trait]
impl Responder for EngineResponder {
    fn id(&self) -> &str {
        "local"
    }

    async fn respond(
        &self,
        message: &str,
        _session_id: &str,
        context: &ConversationContext,
    ) -> Result<Reply, AssistantError> {
        Ok(self.resolver.resolve(message, context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Intent;

    #[tokio::test]
    async fn test_local_responder_resolves() {
        let responder = EngineResponder::new(Arc::new(Catalog::new().unwrap()));
        let reply = responder
            .respond("track order o1001", "sess_x", &ConversationContext::default())
            .await
            .unwrap();
        assert_eq!(reply.intent, Intent::Order);
        assert!(reply.message.contains("O1001"));
    }
}
