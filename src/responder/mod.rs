// src/responder/mod.rs — The responder seam
//
// Anything that can turn (utterance, context) into a reply: the local
// intent engine, a remote webhook, or the fallback chain combining the
// two. The session manager only ever sees this trait.

mod engine;
mod fallback;
mod webhook;

pub use engine::EngineResponder;
pub use fallback::FallbackResponder;
pub use webhook::WebhookResponder;

use async_trait::async_trait;

use crate::context::ConversationContext;
use crate::engine::Reply;
use crate::infra::errors::AssistantError;

#[async_trait]
pub trait Responder: Send + Sync {
    fn id(&self) -> &str;

    async fn respond(
        &self,
        message: &str,
        session_id: &str,
        context: &ConversationContext,
    ) -> Result<Reply, AssistantError>;
}
