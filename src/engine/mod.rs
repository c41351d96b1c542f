// src/engine/mod.rs — Deterministic intent resolution
//
// The resolver classifies a free-text utterance against the catalog
// using a fixed-priority rule chain and returns a structured reply.
// Pure function of (utterance, context, catalog): no side effects, no
// randomness, so every classification is reproducible in tests.

pub mod format;
pub mod keywords;
mod rules;
pub mod search;

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::catalog::{Catalog, Genre};
use crate::context::ConversationContext;

/// Classified purpose of a user utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Order,
    Browse,
    Recommend,
    Category,
    Faq,
    Greeting,
    Thanks,
    Goodbye,
    Fallback,
    /// Remote responders may report intents outside the local set.
    #[serde(other)]
    Unknown,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Order => "order",
            Intent::Browse => "browse",
            Intent::Recommend => "recommend",
            Intent::Category => "category",
            Intent::Faq => "faq",
            Intent::Greeting => "greeting",
            Intent::Thanks => "thanks",
            Intent::Goodbye => "goodbye",
            Intent::Fallback => "fallback",
            Intent::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured bot reply: display text plus the labels the context
/// tracker and analytics consume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reply {
    pub message: String,
    pub intent: Intent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Genre>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_mentioned: Option<String>,
}

impl Reply {
    pub fn new(intent: Intent, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            intent,
            category: None,
            data: None,
            book_mentioned: None,
        }
    }

    pub fn with_category(mut self, genre: Genre) -> Self {
        self.category = Some(genre);
        self
    }
}

/// A rule inspects the lowercased utterance and either produces a
/// terminal reply or lets the chain continue.
type Rule = fn(&Resolver, &str, &ConversationContext) -> Option<Reply>;

/// Priority order is product behavior, not an implementation detail:
/// the first matching rule wins and rules are never merged.
const RULES: &[(&str, Rule)] = &[
    ("order_tracking", rules::order_tracking),
    ("book_search", rules::book_search),
    ("follow_up", rules::follow_up),
    ("recommendations", rules::recommendations),
    ("genre_list", rules::genre_list),
    ("genre_browse", rules::genre_browse),
    ("store_info", rules::store_info),
    ("faq_match", rules::faq_match),
    ("catalog_browse", rules::catalog_browse),
    ("returning_greeting", rules::returning_greeting),
    ("first_greeting", rules::first_greeting),
    ("thanks", rules::thanks),
    ("goodbye", rules::goodbye),
    ("price_check", rules::price_check),
    ("stock_check", rules::stock_check),
];

pub struct Resolver {
    catalog: Arc<Catalog>,
}

impl Resolver {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Classify the utterance and build the reply. Deterministic and
    /// side-effect-free; the final fallback rule always succeeds.
    pub fn resolve(&self, utterance: &str, context: &ConversationContext) -> Reply {
        let msg = utterance.to_lowercase().trim().to_string();

        for (name, rule) in RULES {
            if let Some(reply) = rule(self, &msg, context) {
                tracing::debug!(rule = name, intent = %reply.intent, "intent matched");
                return reply;
            }
        }

        tracing::debug!("no rule matched, using fallback");
        rules::fallback()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Intent::Order).unwrap(), "\"order\"");
        let i: Intent = serde_json::from_str("\"recommend\"").unwrap();
        assert_eq!(i, Intent::Recommend);
    }

    #[test]
    fn test_unrecognized_intent_becomes_unknown() {
        let i: Intent = serde_json::from_str("\"banter\"").unwrap();
        assert_eq!(i, Intent::Unknown);
    }

    #[test]
    fn test_resolver_always_replies() {
        let resolver = Resolver::new(Arc::new(Catalog::new().unwrap()));
        let ctx = ConversationContext::default();
        let reply = resolver.resolve("qwerty zxcvb", &ctx);
        assert_eq!(reply.intent, Intent::Fallback);
        assert!(!reply.message.is_empty());
    }
}
