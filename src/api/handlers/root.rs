use axum::{extract::State, http::StatusCode, Json, response::IntoResponse};
use serde_json::json;

use crate::api::state::AppState;

pub async fn root(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "name": state.settings.business.name,
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Car rental fleet, booking and payment back office",
        "status": "operational",
        "endpoints": {
            "health": "/health",
            "public": "/public",
            "admin": "/admin"
        }
    }))
}

pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}
