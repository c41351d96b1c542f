// src/session/mod.rs — Conversation session manager
//
// Owns session identity, turn history, context updates, typing-pace
// simulation, error/retry state, and the single-flight guard. `send`
// is the sole mutator of session state; at most one turn is in flight
// per session and reentrant sends are rejected, not queued.

pub mod delay;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analytics::{AnalyticsEntry, AnalyticsLog, ContextSnapshot};
use crate::context::{ConversationContext, ContextTracker};
use crate::engine::Intent;
use crate::infra::errors::AssistantError;
use crate::responder::Responder;
use crate::storage::KeyValueStore;
use delay::DelayFn;

const SESSION_ID_KEY: &str = "chat_session_id";
const CONTEXT_KEY: &str = "chat_context";

/// Placeholder when a remote responder sends an empty message body.
const EMPTY_REPLY_TEXT: &str = "I received your message!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

/// One entry in the append-only turn history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    /// Short display timestamp for the chat bubble.
    pub timestamp: String,
    pub full_timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ChatMessage {
    fn user(content: &str, now: DateTime<Utc>) -> Self {
        Self {
            role: Role::User,
            content: content.to_string(),
            timestamp: now.format("%H:%M:%S").to_string(),
            full_timestamp: now,
            intent: None,
            data: None,
        }
    }

    fn bot(content: String, intent: Intent, data: Option<serde_json::Value>, now: DateTime<Utc>) -> Self {
        Self {
            role: Role::Bot,
            content,
            timestamp: now.format("%H:%M:%S").to_string(),
            full_timestamp: now,
            intent: Some(intent),
            data,
        }
    }
}

#[derive(Debug, Clone)]
pub enum SendOutcome {
    /// Bot turn appended; carries the new message.
    Replied(ChatMessage),
    /// Empty input or a send already in flight; nothing changed.
    Ignored,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatStats {
    pub total_messages: usize,
    pub user_messages: usize,
    pub bot_messages: usize,
    pub session_duration_minutes: i64,
    pub topics_discussed: usize,
    pub questions_asked: u32,
}

struct SessionState {
    session_id: String,
    messages: Vec<ChatMessage>,
    context: ConversationContext,
    last_message: Option<String>,
    error: Option<String>,
}

impl SessionState {
    fn history_key(&self) -> String {
        format!("chat_history_{}", self.session_id)
    }
}

/// Clears the in-flight flag when the turn ends, on every path.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct ChatSession {
    state: Mutex<SessionState>,
    responding: AtomicBool,
    responder: Arc<dyn Responder>,
    analytics: Arc<AnalyticsLog>,
    store: Option<Arc<dyn KeyValueStore>>,
    delay: DelayFn,
}

impl ChatSession {
    /// Create a session, reusing a persisted identity and history when
    /// the store has them. A missing or unreadable store is a normal
    /// cold start.
    pub fn new(
        responder: Arc<dyn Responder>,
        analytics: Arc<AnalyticsLog>,
        store: Option<Arc<dyn KeyValueStore>>,
        delay: DelayFn,
    ) -> Self {
        let now = Utc::now();
        let session_id = store
            .as_deref()
            .and_then(|s| s.get(SESSION_ID_KEY))
            .unwrap_or_else(|| new_session_id(now));

        let messages = store
            .as_deref()
            .and_then(|s| s.get(&format!("chat_history_{session_id}")))
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();

        let mut context: ConversationContext = store
            .as_deref()
            .and_then(|s| s.get(CONTEXT_KEY))
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();
        if context.conversation_started.is_none() {
            context.conversation_started = Some(now);
        }

        if let Some(store) = store.as_deref() {
            if let Err(e) = store.set(SESSION_ID_KEY, &session_id) {
                tracing::warn!("failed to persist session id: {e}");
            }
        }

        tracing::info!(session = %session_id, "chat session initialized");

        Self {
            state: Mutex::new(SessionState {
                session_id,
                messages,
                context,
                last_message: None,
                error: None,
            }),
            responding: AtomicBool::new(false),
            responder,
            analytics,
            store,
            delay,
        }
    }

    /// Process one user turn. Empty input and reentrant calls are
    /// no-ops; a responder failure leaves a retryable error state and
    /// no bot turn.
    pub async fn send(&self, text: &str) -> Result<SendOutcome, AssistantError> {
        let message = text.trim().to_string();
        if message.is_empty() {
            return Ok(SendOutcome::Ignored);
        }

        // Single-flight guard: reject, don't queue.
        if self
            .responding
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!("send rejected: turn already in flight");
            return Ok(SendOutcome::Ignored);
        }
        let _guard = InFlightGuard(&self.responding);

        let now = Utc::now();
        let (session_id, context_snapshot) = {
            let mut state = self.lock()?;
            state.error = None;
            state.last_message = Some(message.clone());
            state.messages.push(ChatMessage::user(&message, now));
            state.context.questions_asked += 1;
            state.context.conversation_duration_minutes = state.context.duration_minutes(now);
            (state.session_id.clone(), state.context.clone())
        };

        let reply = match self
            .responder
            .respond(&message, &session_id, &context_snapshot)
            .await
        {
            Ok(reply) => reply,
            Err(e) => {
                let mut state = self.lock()?;
                state.error = Some(e.to_string());
                self.persist(&state);
                return Err(e);
            }
        };

        let response_text = if reply.message.is_empty() {
            EMPTY_REPLY_TEXT.to_string()
        } else {
            reply.message.clone()
        };

        // Emulate a natural typing pace before the reply appears.
        let pause = (self.delay)(response_text.len());
        if !pause.is_zero() {
            tokio::time::sleep(pause).await;
        }

        let now = Utc::now();
        let bot_message = {
            let mut state = self.lock()?;
            state.context = ContextTracker::update(&state.context, &message, &reply, now);
            let bot = ChatMessage::bot(response_text.clone(), reply.intent, reply.data.clone(), now);
            state.messages.push(bot.clone());

            self.analytics.record(AnalyticsEntry {
                session_id: state.session_id.clone(),
                user_message: message.clone(),
                bot_response: response_text,
                intent: reply.intent,
                timestamp: now,
                message_number: state.context.questions_asked,
                context: ContextSnapshot {
                    last_intent: state.context.last_intent,
                    favorite_genre: state.context.preferences.favorite_genre,
                },
            });

            self.persist(&state);
            bot
        };

        Ok(SendOutcome::Replied(bot_message))
    }

    /// Re-send the most recent user utterance verbatim, if any.
    pub async fn retry_last(&self) -> Result<SendOutcome, AssistantError> {
        let last = self.lock()?.last_message.clone();
        match last {
            Some(message) => self.send(&message).await,
            None => Ok(SendOutcome::Ignored),
        }
    }

    /// Reset turns and context to defaults; the session id survives.
    pub fn clear(&self) -> Result<(), AssistantError> {
        let mut state = self.lock()?;
        state.messages.clear();
        state.context = ConversationContext::started_at(Utc::now());
        state.error = None;
        state.last_message = None;
        if let Some(store) = self.store.as_deref() {
            store.remove(&state.history_key());
            store.remove(CONTEXT_KEY);
        }
        tracing::info!(session = %state.session_id, "chat cleared");
        Ok(())
    }

    /// Rotate the session identity and reset turns/context.
    pub fn new_session(&self) -> Result<String, AssistantError> {
        let mut state = self.lock()?;
        // Keep the old history around under its own key.
        self.persist(&state);

        let now = Utc::now();
        let fresh = new_session_id(now);
        if let Some(store) = self.store.as_deref() {
            store.remove(CONTEXT_KEY);
            if let Err(e) = store.set(SESSION_ID_KEY, &fresh) {
                tracing::warn!("failed to persist session id: {e}");
            }
        }

        state.session_id = fresh.clone();
        state.messages.clear();
        state.context = ConversationContext::started_at(now);
        state.error = None;
        state.last_message = None;
        tracing::info!(session = %fresh, "new session started");
        Ok(fresh)
    }

    pub fn session_id(&self) -> String {
        self.lock().map(|s| s.session_id.clone()).unwrap_or_default()
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.lock().map(|s| s.messages.clone()).unwrap_or_default()
    }

    pub fn context(&self) -> ConversationContext {
        self.lock().map(|s| s.context.clone()).unwrap_or_default()
    }

    pub fn error(&self) -> Option<String> {
        self.lock().ok().and_then(|s| s.error.clone())
    }

    pub fn is_responding(&self) -> bool {
        self.responding.load(Ordering::SeqCst)
    }

    pub fn stats(&self) -> ChatStats {
        let now = Utc::now();
        match self.lock() {
            Ok(state) => ChatStats {
                total_messages: state.messages.len(),
                user_messages: state.messages.iter().filter(|m| m.role == Role::User).count(),
                bot_messages: state.messages.iter().filter(|m| m.role == Role::Bot).count(),
                session_duration_minutes: state.context.duration_minutes(now),
                topics_discussed: state.context.topics_discussed.len(),
                questions_asked: state.context.questions_asked,
            },
            Err(_) => ChatStats {
                total_messages: 0,
                user_messages: 0,
                bot_messages: 0,
                session_duration_minutes: 0,
                topics_discussed: 0,
                questions_asked: 0,
            },
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, SessionState>, AssistantError> {
        self.state
            .lock()
            .map_err(|_| AssistantError::Turn("session state poisoned".into()))
    }

    /// Best-effort persistence, always after the in-memory change.
    fn persist(&self, state: &SessionState) {
        let Some(store) = self.store.as_deref() else {
            return;
        };
        match serde_json::to_string(&state.messages) {
            Ok(json) => {
                if let Err(e) = store.set(&state.history_key(), &json) {
                    tracing::warn!("failed to persist chat history: {e}");
                }
            }
            Err(e) => tracing::warn!("failed to serialize chat history: {e}"),
        }
        match serde_json::to_string(&state.context) {
            Ok(json) => {
                if let Err(e) = store.set(CONTEXT_KEY, &json) {
                    tracing::warn!("failed to persist context: {e}");
                }
            }
            Err(e) => tracing::warn!("failed to serialize context: {e}"),
        }
    }
}

/// Opaque `sess_<millis>_<suffix>` token, created once per session.
fn new_session_id(now: DateTime<Utc>) -> String {
    let suffix: String = uuid::Uuid::new_v4().simple().to_string()[..9].to_string();
    format!("sess_{}_{}", now.timestamp_millis(), suffix)
}
