// src/api/handlers.rs

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::admin::{self, DashboardStats};
use crate::api::{types::*, ApiState};
use crate::catalog::{Book, Faq, Order};
use crate::session::SendOutcome;

/// POST /api/v1/chat — Run one conversation turn.
pub async fn chat(
    State(state): State<ApiState>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<ErrorResponse>)> {
    if body.message.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Message cannot be empty".into(),
            }),
        ));
    }

    let session = state.session(body.session_id.as_deref());
    let session_id = session.session_id();

    match session.send(&body.message).await {
        Ok(SendOutcome::Replied(bot)) => Ok(Json(ChatResponse {
            session_id,
            message: bot.content,
            intent: bot.intent,
        })),
        // Input was validated non-empty, so Ignored means a turn is
        // already in flight for this session.
        Ok(SendOutcome::Ignored) => Err((
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: "A message is already being processed for this session".into(),
            }),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )),
    }
}

/// GET /api/v1/books — Catalog listing with optional search/genre filter.
pub async fn list_books(
    State(state): State<ApiState>,
    Query(query): Query<BookQuery>,
) -> Json<Vec<Book>> {
    let hits = admin::filter_books(
        &state.catalog,
        query.search.as_deref().unwrap_or(""),
        query.genre,
    );
    Json(hits.into_iter().cloned().collect())
}

/// GET /api/v1/orders — Order listing with optional search/status filter.
pub async fn list_orders(
    State(state): State<ApiState>,
    Query(query): Query<OrderQuery>,
) -> Json<Vec<Order>> {
    let hits = admin::filter_orders(
        &state.catalog,
        query.search.as_deref().unwrap_or(""),
        query.status,
    );
    Json(hits.into_iter().cloned().collect())
}

/// GET /api/v1/orders/:id — Single order lookup.
pub async fn get_order(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<Order>, (StatusCode, Json<ErrorResponse>)> {
    state
        .catalog
        .find_order(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("Order '{id}' not found"),
                }),
            )
        })
}

/// GET /api/v1/faqs
pub async fn list_faqs(State(state): State<ApiState>) -> Json<Vec<Faq>> {
    Json(state.catalog.faqs().to_vec())
}

/// GET /api/v1/stats — Dashboard aggregations.
pub async fn get_stats(State(state): State<ApiState>) -> Json<DashboardStats> {
    let logs = state.analytics.entries();
    Json(DashboardStats::compute(&state.catalog, &logs))
}

/// GET /api/v1/logs — Raw analytics records.
pub async fn get_logs(
    State(state): State<ApiState>,
) -> Json<Vec<crate::analytics::AnalyticsEntry>> {
    Json(state.analytics.entries())
}

/// GET /api/v1/health
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
