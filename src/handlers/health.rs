use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::AppState;

pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "CoinAIRank Listing API",
            "version": version,
            "description": "Filtered, sorted and paginated access to AI-scored crypto tokens",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "listing": "/listing (public)",
                "listing_alias": "/api/crypto-projects-rated (public)",
            },
            "listing_parameters": [
                "page", "limit", "sortBy", "sortOrder", "minScore", "maxScore", "network",
                "tier", "search", "minLiquidity", "maxLiquidity", "tokenType"
            ]
        }
    }))
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => {
            tracing::warn!("health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": "database unavailable",
                    "data": {
                        "status": "degraded",
                        "timestamp": now
                    }
                })),
            )
        }
    }
}

pub async fn not_found() -> ApiError {
    ApiError::not_found("Route not found")
}
