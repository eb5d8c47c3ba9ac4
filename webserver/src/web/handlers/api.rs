//! REST API handlers
//!
//! HTTP endpoints for lunch recommendations and per-session history

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Json;
use chrono::Utc;
use serde_json::{Value, json};

use recommender::{RecommendationProvider, RecommendationRequest, RecommendationResponse};
use shared::{ProcessId, process_info};

use crate::error::{WebServerError, WebServerResult};
use crate::state::WebServerState;
use crate::types::{ApiResponse, CafeteriaRecommendRequest, HistoryCleared, HistorySnapshot, SessionQuery};

/// Service banner - /
pub async fn root<P>(State(state): State<Arc<WebServerState<P>>>) -> Json<Value>
where
    P: RecommendationProvider,
{
    Json(json!({
        "service": "lunchpick",
        "version": env!("CARGO_PKG_VERSION"),
        "ai_enabled": state.recommender.has_provider(),
        "endpoints": [
            "GET /health",
            "POST /api/recommend-from-cafeteria",
            "GET /api/history",
            "DELETE /api/history"
        ]
    }))
}

/// Health check - /health
pub async fn health_check<P>(State(state): State<Arc<WebServerState<P>>>) -> Json<Value>
where
    P: RecommendationProvider,
{
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().timestamp(),
        "uptime": state.get_uptime_seconds()
    }))
}

/// Recommend lunch away from today's cafeteria menu - /api/recommend-from-cafeteria
pub async fn recommend_from_cafeteria<P>(
    State(state): State<Arc<WebServerState<P>>>,
    Json(body): Json<CafeteriaRecommendRequest>,
) -> WebServerResult<Json<ApiResponse<RecommendationResponse>>>
where
    P: RecommendationProvider,
{
    let menu = body.cafeteria_menu.trim();
    if menu.is_empty() {
        return Err(WebServerError::invalid("cafeteria_menu is required"));
    }

    let session = body.session();
    process_info!(ProcessId::current(), session = %session, menu = %menu, "Recommendation requested");

    let request = RecommendationRequest {
        session,
        cafeteria_menu: menu.to_string(),
        weather: body.weather_snapshot(),
        prefer_external: body.prefer_external,
    };

    let response = state.recommender.recommend(request).await;
    Ok(Json(ApiResponse::ok(response)))
}

/// Last recorded batch for a session - GET /api/history
pub async fn get_history<P>(
    State(state): State<Arc<WebServerState<P>>>,
    Query(query): Query<SessionQuery>,
) -> Json<ApiResponse<HistorySnapshot>>
where
    P: RecommendationProvider,
{
    let session_id = query.session();
    let recommendations = state.recommender.previous(&session_id).await;
    Json(ApiResponse::ok(HistorySnapshot { session_id, recommendations }))
}

/// Forget a session's batch - DELETE /api/history
pub async fn clear_history<P>(
    State(state): State<Arc<WebServerState<P>>>,
    Query(query): Query<SessionQuery>,
) -> Json<ApiResponse<HistoryCleared>>
where
    P: RecommendationProvider,
{
    let session_id = query.session();
    let cleared = state.recommender.reset(&session_id).await;
    if cleared {
        process_info!(ProcessId::current(), session = %session_id, "History cleared");
    }
    Json(ApiResponse::ok(HistoryCleared { session_id, cleared }))
}
