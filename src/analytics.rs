// src/analytics.rs — Per-turn analytics sink
//
// Receives every finalized turn for later aggregation in the admin
// dashboard. Capped at 1000 records, oldest evicted first. Persistence
// through the KV port is fire-and-forget: a failed write is logged,
// never surfaced to the conversation.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Genre;
use crate::engine::Intent;
use crate::storage::KeyValueStore;

const MAX_RECORDS: usize = 1000;
const MAX_RESPONSE_CHARS: usize = 500;
const STORE_KEY: &str = "chat_logs";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextSnapshot {
    pub last_intent: Option<Intent>,
    pub favorite_genre: Option<Genre>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEntry {
    pub session_id: String,
    pub user_message: String,
    /// Truncated to 500 chars; full replies live in the turn history.
    pub bot_response: String,
    pub intent: Intent,
    pub timestamp: DateTime<Utc>,
    pub message_number: u32,
    pub context: ContextSnapshot,
}

pub struct AnalyticsLog {
    records: Mutex<VecDeque<AnalyticsEntry>>,
    store: Option<Arc<dyn KeyValueStore>>,
}

impl AnalyticsLog {
    pub fn new(store: Option<Arc<dyn KeyValueStore>>) -> Self {
        let records = store
            .as_deref()
            .and_then(|s| s.get(STORE_KEY))
            .and_then(|raw| serde_json::from_str::<Vec<AnalyticsEntry>>(&raw).ok())
            .map(VecDeque::from)
            .unwrap_or_default();
        Self {
            records: Mutex::new(records),
            store,
        }
    }

    pub fn record(&self, mut entry: AnalyticsEntry) {
        entry.bot_response = truncate_chars(&entry.bot_response, MAX_RESPONSE_CHARS);

        let snapshot = {
            let Ok(mut records) = self.records.lock() else {
                return;
            };
            records.push_back(entry);
            while records.len() > MAX_RECORDS {
                records.pop_front();
            }
            self.store
                .is_some()
                .then(|| records.iter().cloned().collect::<Vec<_>>())
        };

        if let (Some(store), Some(records)) = (self.store.as_deref(), snapshot) {
            match serde_json::to_string(&records) {
                Ok(json) => {
                    if let Err(e) = store.set(STORE_KEY, &json) {
                        tracing::warn!("analytics persistence failed: {e}");
                    }
                }
                Err(e) => tracing::warn!("analytics serialization failed: {e}"),
            }
        }
    }

    pub fn entries(&self) -> Vec<AnalyticsEntry> {
        self.records
            .lock()
            .map(|r| r.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut records) = self.records.lock() {
            records.clear();
        }
        if let Some(store) = self.store.as_deref() {
            store.remove(STORE_KEY);
        }
    }
}

/// Truncate to at most `max` characters on a char boundary.
fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(n: u32, response: &str) -> AnalyticsEntry {
        AnalyticsEntry {
            session_id: "sess_test".into(),
            user_message: format!("message {n}"),
            bot_response: response.into(),
            intent: Intent::Browse,
            timestamp: Utc::now(),
            message_number: n,
            context: ContextSnapshot {
                last_intent: Some(Intent::Browse),
                favorite_genre: None,
            },
        }
    }

    #[test]
    fn test_record_and_read_back() {
        let log = AnalyticsLog::new(None);
        log.record(entry(1, "hello"));
        assert_eq!(log.len(), 1);
        assert_eq!(log.entries()[0].bot_response, "hello");
    }

    #[test]
    fn test_response_truncated_to_500_chars() {
        let log = AnalyticsLog::new(None);
        log.record(entry(1, &"x".repeat(900)));
        assert_eq!(log.entries()[0].bot_response.chars().count(), 500);
    }

    #[test]
    fn test_truncation_is_char_safe() {
        let log = AnalyticsLog::new(None);
        log.record(entry(1, &"⭐".repeat(600)));
        assert_eq!(log.entries()[0].bot_response.chars().count(), 500);
    }

    #[test]
    fn test_cap_evicts_oldest_first() {
        let log = AnalyticsLog::new(None);
        for n in 0..1005 {
            log.record(entry(n, "r"));
        }
        let entries = log.entries();
        assert_eq!(entries.len(), 1000);
        assert_eq!(entries[0].message_number, 5);
        assert_eq!(entries.last().unwrap().message_number, 1004);
    }

    #[test]
    fn test_persist_and_reload() {
        let store: Arc<dyn KeyValueStore> = Arc::new(crate::storage::MemoryStore::new());
        {
            let log = AnalyticsLog::new(Some(store.clone()));
            log.record(entry(1, "persisted"));
        }
        let reloaded = AnalyticsLog::new(Some(store));
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.entries()[0].bot_response, "persisted");
    }

    #[test]
    fn test_clear_wipes_store() {
        let store: Arc<dyn KeyValueStore> = Arc::new(crate::storage::MemoryStore::new());
        let log = AnalyticsLog::new(Some(store.clone()));
        log.record(entry(1, "r"));
        log.clear();
        assert!(log.is_empty());
        assert!(store.get(STORE_KEY).is_none());
    }
}
