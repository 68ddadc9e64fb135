use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use herdbook_core::health::{healthz, readyz, wake};
use herdbook_core::middleware::{request_id_layer, trace_layer};

use crate::handlers::{
    animal::{dashboard_stats, get_attendance, record_attendance},
    farmer::{all_attendance, today_attendance},
    user::{login, signup},
    vet::{add_medication, dashboard_data, health_records, health_since_latest_treatment},
};
use crate::state::AppState;

/// Attendance scans carry a camera image; the original deployment accepted
/// uploads up to 50 MiB.
const UPLOAD_BODY_LIMIT: usize = 50 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/wake", get(wake))
        // Users (public)
        .route("/api/user/signup", post(signup))
        .route("/api/user/login", post(login))
        // Animals
        .route("/api/animal/attendance", post(record_attendance))
        .route("/api/animal/stats", get(dashboard_stats))
        .route("/api/animal/{tag_id}/attendance", get(get_attendance))
        // Farmer views
        .route("/api/farmer/today-attendance", get(today_attendance))
        .route("/api/farmer/all-attendance", get(all_attendance))
        // Vet views
        .route("/api/vet/dashboard-data", get(dashboard_data))
        .route(
            "/api/vet/{tag_id}/health-since-latest-treatment",
            get(health_since_latest_treatment),
        )
        .route("/api/vet/{tag_id}/health-records", get(health_records))
        .route("/api/vet/{tag_id}/medications", post(add_medication))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
        .layer(trace_layer())
        .layer(request_id_layer())
        .with_state(state)
}
