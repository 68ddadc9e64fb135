use axum::Json;
use axum::http::StatusCode;
use chrono::{SecondsFormat, Utc};

/// Handler for `GET /healthz` — liveness check.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Handler for `GET /readyz` — readiness check (override per service as needed).
pub async fn readyz() -> StatusCode {
    StatusCode::OK
}

/// Handler for `GET /wake` — keepalive ping used by the hosted frontend to
/// spin the service up from idle. Not wrapped in the response envelope.
pub async fn wake() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Server is awake!",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        "status": "active",
    }))
}
