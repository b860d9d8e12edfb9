use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde_json::Value;

pub async fn root() -> Json<Value> {
    Json(serde_json::json!({
        "success": true,
        "message": "Welcome to the Washdesk API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "bookings": "/api/bookings",
            "partnerships": "/api/partnerships",
            "health": "/api/health",
        },
    }))
}

pub async fn health() -> Json<Value> {
    Json(serde_json::json!({
        "success": true,
        "message": "Washdesk API is running",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

pub async fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "success": false, "message": "Route not found" })),
    )
}
