// src/api/mod.rs — HTTP surface for the chat widget and admin dashboard

pub mod handlers;
pub mod types;

use axum::routing::{get, post};
use axum::Router;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tower_http::cors::CorsLayer;

use crate::analytics::AnalyticsLog;
use crate::catalog::Catalog;
use crate::infra::config::ApiConfig;
use crate::responder::Responder;
use crate::session::{delay, ChatSession};

/// At most this many live sessions per server; oldest evicted first,
/// like the analytics sink's record cap.
const MAX_SESSIONS: usize = 1000;

/// Sessions keyed by id, plus creation order for eviction.
#[derive(Default)]
struct SessionMap {
    by_id: HashMap<String, Arc<ChatSession>>,
    order: VecDeque<String>,
}

impl SessionMap {
    fn insert(&mut self, id: String, session: Arc<ChatSession>) {
        while self.by_id.len() >= MAX_SESSIONS {
            if let Some(oldest) = self.order.pop_front() {
                self.by_id.remove(&oldest);
            } else {
                break;
            }
        }
        self.by_id.insert(id.clone(), session);
        self.order.push_back(id);
    }
}

/// Shared state for API handlers. Sessions are created on demand and
/// each keeps its own context and single-flight guard.
#[derive(Clone)]
pub struct ApiState {
    pub catalog: Arc<Catalog>,
    pub responder: Arc<dyn Responder>,
    pub analytics: Arc<AnalyticsLog>,
    sessions: Arc<Mutex<SessionMap>>,
}

impl ApiState {
    pub fn new(
        catalog: Arc<Catalog>,
        responder: Arc<dyn Responder>,
        analytics: Arc<AnalyticsLog>,
    ) -> Self {
        Self {
            catalog,
            responder,
            analytics,
            sessions: Arc::new(Mutex::new(SessionMap::default())),
        }
    }

    /// Fetch the session for a known id, or start a fresh one. API
    /// sessions skip the typing delay; the pacing belongs to the
    /// widget, not the wire.
    pub fn session(&self, session_id: Option<&str>) -> Arc<ChatSession> {
        let mut sessions = match self.sessions.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Some(id) = session_id {
            if let Some(session) = sessions.by_id.get(id) {
                return session.clone();
            }
        }

        let session = Arc::new(ChatSession::new(
            self.responder.clone(),
            self.analytics.clone(),
            None,
            Arc::new(delay::no_delay),
        ));
        sessions.insert(session.session_id(), session.clone());
        session
    }
}

/// Build the axum router with all API routes.
pub fn build_router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin([
            "http://localhost:3000".parse().unwrap(),
            "http://localhost:5173".parse().unwrap(),
            "http://127.0.0.1:3000".parse().unwrap(),
            "http://127.0.0.1:5173".parse().unwrap(),
        ])
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any);

    Router::new()
        .route("/api/v1/chat", post(handlers::chat))
        .route("/api/v1/books", get(handlers::list_books))
        .route("/api/v1/orders", get(handlers::list_orders))
        .route("/api/v1/orders/{id}", get(handlers::get_order))
        .route("/api/v1/faqs", get(handlers::list_faqs))
        .route("/api/v1/stats", get(handlers::get_stats))
        .route("/api/v1/logs", get(handlers::get_logs))
        .route("/api/v1/health", get(handlers::health))
        .layer(cors)
        .with_state(state)
}

/// Start the API server on the given port (blocking).
pub async fn start_server(config: &ApiConfig, state: ApiState) -> anyhow::Result<()> {
    let port = config.port;
    let addr = format!("127.0.0.1:{port}");

    let router = build_router(state);

    tracing::info!("API server listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
