// src/responder/webhook.rs — Remote webhook responder
//
// Posts the turn to an external automation endpoint with a bounded
// timeout and normalizes whatever shape comes back. Remote responses
// are duck-typed (`message` / `reply` / `response`); the rest of the
// core only ever sees the normalized `Reply`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use super::Responder;
use crate::catalog::Genre;
use crate::context::{ConversationContext, Preferences};
use crate::engine::{Intent, Reply};
use crate::infra::errors::AssistantError;

/// Only the trailing topics travel over the wire.
const TOPICS_SENT: usize = 5;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WebhookRequest<'a> {
    message: &'a str,
    session_id: &'a str,
    timestamp: DateTime<Utc>,
    context: ContextPayload<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ContextPayload<'a> {
    last_intent: Option<Intent>,
    last_book_mentioned: Option<&'a str>,
    last_genre_viewed: Option<Genre>,
    last_order_checked: Option<&'a str>,
    questions_asked: u32,
    topics_discussed: &'a [Intent],
    preferences: &'a Preferences,
    conversation_duration: i64,
}

pub struct WebhookResponder {
    client: Client,
    url: String,
    timeout: Duration,
}

impl WebhookResponder {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            timeout,
        }
    }

    fn build_request<'a>(
        message: &'a str,
        session_id: &'a str,
        context: &'a ConversationContext,
        now: DateTime<Utc>,
    ) -> WebhookRequest<'a> {
        let topics = &context.topics_discussed;
        let tail = &topics[topics.len().saturating_sub(TOPICS_SENT)..];
        WebhookRequest {
            message,
            session_id,
            timestamp: now,
            context: ContextPayload {
                last_intent: context.last_intent,
                last_book_mentioned: context.last_book_mentioned.as_deref(),
                last_genre_viewed: context.last_genre_viewed,
                last_order_checked: context.last_order_checked.as_deref(),
                questions_asked: context.questions_asked,
                topics_discussed: tail,
                preferences: &context.preferences,
                conversation_duration: context.conversation_duration_minutes,
            },
        }
    }

    /// Collapse transport failures into the webhook error pair,
    /// carrying the configured timeout rather than a fixed number.
    fn transport_error(&self, e: reqwest::Error) -> AssistantError {
        if e.is_timeout() {
            AssistantError::WebhookTimeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            AssistantError::Webhook {
                message: e.to_string(),
            }
        }
    }

    /// Flatten the remote's loose response shape into a `Reply`.
    /// Missing or unrecognized fields degrade gracefully; the caller
    /// treats an empty message like any other placeholder reply.
    fn normalize(data: &Value) -> Reply {
        let message = data
            .get("message")
            .or_else(|| data.get("reply"))
            .or_else(|| data.get("response"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let intent = data
            .get("intent")
            .cloned()
            .and_then(|v| serde_json::from_value::<Intent>(v).ok())
            .unwrap_or(Intent::Unknown);

        Reply {
            message,
            intent,
            category: None,
            data: data.get("data").filter(|v| !v.is_null()).cloned(),
            book_mentioned: data
                .get("bookMentioned")
                .and_then(Value::as_str)
                .map(String::from),
        }
    }
}

#[async_trait]
impl Responder for WebhookResponder {
    fn id(&self) -> &str {
        "webhook"
    }

    async fn respond(
        &self,
        message: &str,
        session_id: &str,
        context: &ConversationContext,
    ) -> Result<Reply, AssistantError> {
        let body = Self::build_request(message, session_id, context, Utc::now());

        let response = self
            .client
            .post(&self.url)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !response.status().is_success() {
            return Err(AssistantError::Webhook {
                message: format!("server returned {}", response.status()),
            });
        }

        let data: Value = response
            .json()
            .await
            .map_err(|e| self.transport_error(e))?;
        Ok(Self::normalize(&data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_normalize_message_field() {
        let reply = WebhookResponder::normalize(&json!({
            "message": "Here you go",
            "intent": "browse"
        }));
        assert_eq!(reply.message, "Here you go");
        assert_eq!(reply.intent, Intent::Browse);
    }

    #[test]
    fn test_normalize_reply_and_response_fields() {
        let reply = WebhookResponder::normalize(&json!({ "reply": "a" }));
        assert_eq!(reply.message, "a");
        let reply = WebhookResponder::normalize(&json!({ "response": "b" }));
        assert_eq!(reply.message, "b");
    }

    #[test]
    fn test_normalize_prefers_message_over_aliases() {
        let reply = WebhookResponder::normalize(&json!({
            "message": "primary",
            "reply": "secondary",
            "response": "tertiary"
        }));
        assert_eq!(reply.message, "primary");
    }

    #[test]
    fn test_normalize_unknown_intent_and_missing_fields() {
        let reply = WebhookResponder::normalize(&json!({
            "message": "hi",
            "intent": "smalltalk"
        }));
        assert_eq!(reply.intent, Intent::Unknown);
        assert!(reply.data.is_none());
        assert!(reply.book_mentioned.is_none());

        let reply = WebhookResponder::normalize(&json!({}));
        assert_eq!(reply.message, "");
        assert_eq!(reply.intent, Intent::Unknown);
    }

    #[test]
    fn test_normalize_book_mention_and_data() {
        let reply = WebhookResponder::normalize(&json!({
            "message": "Dune is in stock",
            "intent": "browse",
            "bookMentioned": "Dune",
            "data": { "stock": 10 }
        }));
        assert_eq!(reply.book_mentioned.as_deref(), Some("Dune"));
        assert_eq!(reply.data.unwrap()["stock"], 10);
    }

    #[test]
    fn test_request_truncates_topics_to_last_five() {
        let mut ctx = ConversationContext::default();
        ctx.topics_discussed = vec![
            Intent::Greeting,
            Intent::Browse,
            Intent::Order,
            Intent::Recommend,
            Intent::Category,
            Intent::Faq,
            Intent::Thanks,
        ];
        let req = WebhookResponder::build_request("hi", "sess_x", &ctx, Utc::now());
        assert_eq!(req.context.topics_discussed.len(), 5);
        assert_eq!(req.context.topics_discussed[0], Intent::Order);
    }

    #[test]
    fn test_request_wire_format_is_camel_case() {
        let ctx = ConversationContext::default();
        let req = WebhookResponder::build_request("hello", "sess_1", &ctx, Utc::now());
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["message"], "hello");
        assert_eq!(v["sessionId"], "sess_1");
        assert!(v["context"].get("questionsAsked").is_some());
        assert!(v["context"].get("favoriteGenre").is_none());
        assert!(v["context"]["preferences"].get("favoriteGenre").is_some());
    }
}
