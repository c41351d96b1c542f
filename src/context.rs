// src/context.rs — Per-session conversation memory
//
// The context is the only thing that makes later turns "remember"
// earlier ones: last intent, last genre/order referenced, inferred
// preferences. It is rebuilt from defaults on a cold start and
// updated exactly once per completed turn.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Genre;
use crate::engine::{keywords, Intent, Reply};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub favorite_genre: Option<Genre>,
    pub favorite_author: Option<String>,
    pub price_range: Option<PriceRange>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: u32,
    pub max: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConversationContext {
    pub last_intent: Option<Intent>,
    pub last_book_mentioned: Option<String>,
    pub last_genre_viewed: Option<Genre>,
    pub last_order_checked: Option<String>,
    pub questions_asked: u32,
    /// Intents seen this session, insertion order, no duplicates.
    pub topics_discussed: Vec<Intent>,
    pub preferences: Preferences,
    pub conversation_started: Option<DateTime<Utc>>,
    pub conversation_duration_minutes: i64,
}

impl ConversationContext {
    /// Fresh context with the start-of-session timestamp set once.
    pub fn started_at(now: DateTime<Utc>) -> Self {
        Self {
            conversation_started: Some(now),
            ..Self::default()
        }
    }

    pub fn duration_minutes(&self, now: DateTime<Utc>) -> i64 {
        match self.conversation_started {
            Some(start) => (now - start).num_minutes().max(0),
            None => 0,
        }
    }
}

/// Pure per-turn context transformation. Never mutates its input.
pub struct ContextTracker;

impl ContextTracker {
    /// Apply the per-turn update rules in order:
    /// (a) record the reply's intent in `last_intent` and the topic
    ///     list (dedup, order-preserving);
    /// (b) record an explicit book reference;
    /// (c) first genre keyword in the utterance sets both
    ///     `last_genre_viewed` and the favorite-genre preference;
    /// (d) an order-id token sets `last_order_checked`;
    /// (e) first known-author substring sets the favorite author,
    ///     title-cased;
    /// (f) recompute the running duration.
    ///
    /// Genre and author scans stop at the first table hit.
    pub fn update(
        ctx: &ConversationContext,
        utterance: &str,
        reply: &Reply,
        now: DateTime<Utc>,
    ) -> ConversationContext {
        let msg = utterance.to_lowercase();
        let mut next = ctx.clone();

        next.last_intent = Some(reply.intent);
        if !next.topics_discussed.contains(&reply.intent) {
            next.topics_discussed.push(reply.intent);
        }

        if let Some(ref book) = reply.book_mentioned {
            next.last_book_mentioned = Some(book.clone());
        }

        if let Some(genre) = keywords::find_genre(&msg) {
            next.last_genre_viewed = Some(genre);
            next.preferences.favorite_genre = Some(genre);
        }

        if let Some(order_id) = keywords::find_order_id(&msg) {
            next.last_order_checked = Some(order_id);
        }

        if let Some(author) = keywords::find_author(&msg) {
            next.preferences.favorite_author = Some(title_case(author));
        }

        next.conversation_duration_minutes = next.duration_minutes(now);
        next
    }
}

fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
