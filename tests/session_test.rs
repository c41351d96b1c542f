// tests/session_test.rs — Integration tests for the chat session manager

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use pageturner::analytics::AnalyticsLog;
use pageturner::catalog::Catalog;
use pageturner::context::ConversationContext;
use pageturner::engine::{Intent, Reply};
use pageturner::infra::errors::AssistantError;
use pageturner::responder::{EngineResponder, Responder};
use pageturner::session::{delay, ChatSession, Role, SendOutcome};
use pageturner::storage::{KeyValueStore, MemoryStore};

// ---------- Mock responders ----------

/// Replies after an optional pause; fails for the first N calls.
struct SlowResponder {
    pause: Duration,
    failures_left: AtomicU32,
}

impl SlowResponder {
    fn instant() -> Self {
        Self {
            pause: Duration::ZERO,
            failures_left: AtomicU32::new(0),
        }
    }

    fn slow(pause: Duration) -> Self {
        Self {
            pause,
            failures_left: AtomicU32::new(0),
        }
    }

    fn failing_once() -> Self {
        Self {
            pause: Duration::ZERO,
            failures_left: AtomicU32::new(1),
        }
    }
}

#[async_trait]
impl Responder for SlowResponder {
    fn id(&self) -> &str {
        "mock"
    }

    async fn respond(
        &self,
        message: &str,
        _session_id: &str,
        _context: &ConversationContext,
    ) -> Result<Reply, AssistantError> {
        if !self.pause.is_zero() {
            tokio::time::sleep(self.pause).await;
        }
        if self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(AssistantError::Webhook {
                message: "remote down".into(),
            });
        }
        Ok(Reply::new(Intent::Browse, format!("echo: {message}")))
    }
}

fn session_with(responder: Arc<dyn Responder>, store: Option<Arc<dyn KeyValueStore>>) -> ChatSession {
    ChatSession::new(
        responder,
        Arc::new(AnalyticsLog::new(None)),
        store,
        Arc::new(delay::no_delay),
    )
}

// ---------- Basic turn flow ----------

#[tokio::test]
async fn test_send_appends_user_and_bot_turns() {
    let session = session_with(Arc::new(SlowResponder::instant()), None);
    let outcome = session.send("hello there").await.unwrap();

    match outcome {
        SendOutcome::Replied(bot) => {
            assert_eq!(bot.role, Role::Bot);
            assert_eq!(bot.content, "echo: hello there");
            assert_eq!(bot.intent, Some(Intent::Browse));
        }
        SendOutcome::Ignored => panic!("expected a reply"),
    }

    let messages = session.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, Role::User);
    assert_eq!(messages[0].content, "hello there");
    assert_eq!(messages[1].role, Role::Bot);
}

#[tokio::test]
async fn test_blank_input_is_ignored() {
    let session = session_with(Arc::new(SlowResponder::instant()), None);
    assert!(matches!(
        session.send("   ").await.unwrap(),
        SendOutcome::Ignored
    ));
    assert!(session.messages().is_empty());
    assert_eq!(session.context().questions_asked, 0);
}

#[tokio::test]
async fn test_context_updates_after_each_turn() {
    let catalog = Arc::new(Catalog::new().unwrap());
    let session = session_with(Arc::new(EngineResponder::new(catalog)), None);

    session.send("recommend a fantasy book").await.unwrap();
    let ctx = session.context();
    assert_eq!(ctx.questions_asked, 1);
    assert_eq!(ctx.last_intent, Some(Intent::Recommend));
    assert_eq!(
        ctx.preferences.favorite_genre.map(|g| g.name()),
        Some("Fantasy")
    );

    session.send("track order O1002").await.unwrap();
    let ctx = session.context();
    assert_eq!(ctx.questions_asked, 2);
    assert_eq!(ctx.last_order_checked.as_deref(), Some("O1002"));
}

// ---------- Single flight ----------

#[tokio::test(flavor = "multi_thread")]
async fn test_second_send_while_in_flight_is_ignored() {
    let session = Arc::new(session_with(
        Arc::new(SlowResponder::slow(Duration::from_millis(200))),
        None,
    ));

    let first = {
        let session = session.clone();
        tokio::spawn(async move { session.send("first").await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;

    // The session is busy with "first"; this send changes nothing.
    assert!(matches!(
        session.send("second").await.unwrap(),
        SendOutcome::Ignored
    ));

    assert!(matches!(
        first.await.unwrap().unwrap(),
        SendOutcome::Replied(_)
    ));
    let messages = session.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].content, "first");
}

#[tokio::test]
async fn test_flag_clears_after_turn_completes() {
    let session = session_with(Arc::new(SlowResponder::instant()), None);
    session.send("one").await.unwrap();
    assert!(!session.is_responding());
    session.send("two").await.unwrap();
    assert_eq!(session.messages().len(), 4);
}

// ---------- Errors and retry ----------

#[tokio::test]
async fn test_responder_failure_keeps_user_turn_and_sets_error() {
    let session = session_with(Arc::new(SlowResponder::failing_once()), None);

    assert!(session.send("flaky request").await.is_err());
    let messages = session.messages();
    assert_eq!(messages.len(), 1, "no bot turn on failure");
    assert_eq!(messages[0].role, Role::User);
    assert!(session.error().is_some());

    // The responder recovered; retry re-sends the same utterance.
    match session.retry_last().await.unwrap() {
        SendOutcome::Replied(bot) => assert_eq!(bot.content, "echo: flaky request"),
        SendOutcome::Ignored => panic!("expected a retry reply"),
    }
    assert!(session.error().is_none());
    // Original user turn, retried user turn, bot turn
    assert_eq!(session.messages().len(), 3);
}

#[tokio::test]
async fn test_retry_with_no_history_is_ignored() {
    let session = session_with(Arc::new(SlowResponder::instant()), None);
    assert!(matches!(
        session.retry_last().await.unwrap(),
        SendOutcome::Ignored
    ));
}

// ---------- Clear and new session ----------

#[tokio::test]
async fn test_clear_resets_turns_but_keeps_identity() {
    let session = session_with(Arc::new(SlowResponder::instant()), None);
    session.send("hello").await.unwrap();
    let id = session.session_id();

    session.clear().unwrap();
    assert!(session.messages().is_empty());
    assert_eq!(session.context().questions_asked, 0);
    assert_eq!(session.session_id(), id);
}

#[tokio::test]
async fn test_new_session_rotates_identity() {
    let session = session_with(Arc::new(SlowResponder::instant()), None);
    session.send("hello").await.unwrap();
    let old_id = session.session_id();

    let new_id = session.new_session().unwrap();
    assert_ne!(new_id, old_id);
    assert!(new_id.starts_with("sess_"));
    assert!(session.messages().is_empty());
}

// ---------- Persistence ----------

#[tokio::test]
async fn test_history_and_context_survive_restart() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());

    let session = session_with(Arc::new(SlowResponder::instant()), Some(store.clone()));
    session.send("remember this").await.unwrap();
    let id = session.session_id();
    drop(session);

    let restored = session_with(Arc::new(SlowResponder::instant()), Some(store));
    assert_eq!(restored.session_id(), id);
    assert_eq!(restored.messages().len(), 2);
    assert_eq!(restored.messages()[0].content, "remember this");
    assert_eq!(restored.context().questions_asked, 1);
}

#[tokio::test]
async fn test_cold_start_with_empty_store_uses_defaults() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let session = session_with(Arc::new(SlowResponder::instant()), Some(store));
    assert!(session.messages().is_empty());
    assert_eq!(session.context().questions_asked, 0);
    assert!(session.session_id().starts_with("sess_"));
}

// ---------- Stats ----------

#[tokio::test]
async fn test_stats_counts_roles() {
    let session = session_with(Arc::new(SlowResponder::instant()), None);
    session.send("one").await.unwrap();
    session.send("two").await.unwrap();

    let stats = session.stats();
    assert_eq!(stats.total_messages, 4);
    assert_eq!(stats.user_messages, 2);
    assert_eq!(stats.bot_messages, 2);
    assert_eq!(stats.questions_asked, 2);
}
