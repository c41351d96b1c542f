// src/infra/errors.rs — Error types for the assistant

use thiserror::Error;

use crate::catalog::CatalogError;

#[derive(Error, Debug)]
pub enum AssistantError {
    // Remote responder errors (retriable: the local engine takes over)
    #[error("Webhook responder failed: {message}")]
    Webhook { message: String },

    #[error("Webhook responder timed out after {timeout_secs}s")]
    WebhookTimeout { timeout_secs: u64 },

    // Local resolution failed unexpectedly; surfaced as a retryable
    // session error so the user can resubmit the utterance.
    #[error("Turn failed: {0}")]
    Turn(String),

    // Infra
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AssistantError {
    /// Retriable errors are swallowed by the fallback chain; everything
    /// else surfaces on the session as a retryable error state.
    pub fn is_retriable(&self) -> bool {
        matches!(
            self,
            AssistantError::Webhook { .. } | AssistantError::WebhookTimeout { .. }
        )
    }
}
