use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use chrono::{DateTime, Utc};
use serde::Serialize;

use herdbook_auth_types::identity::Identity;
use herdbook_core::response::Envelope;

use crate::error::ApiError;
use crate::handlers::animal::AttendanceSummaryResponse;
use crate::state::AppState;
use crate::usecase::stats::{AllAttendanceUseCase, TodayAttendance, TodayAttendanceUseCase};

// ── GET /api/farmer/today-attendance ─────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayAttendanceResponse {
    pub tag_id: String,
    pub animal_name: String,
    pub present: bool,
    #[serde(serialize_with = "herdbook_core::serde::vec_to_rfc3339_ms")]
    pub attendance_logs: Vec<DateTime<Utc>>,
    #[serde(serialize_with = "herdbook_core::serde::opt_to_rfc3339_ms")]
    pub last_seen: Option<DateTime<Utc>>,
}

impl From<TodayAttendance> for TodayAttendanceResponse {
    fn from(entry: TodayAttendance) -> Self {
        Self {
            tag_id: entry.tag_id,
            animal_name: entry.animal_name,
            present: entry.present,
            attendance_logs: entry.attendance_logs,
            last_seen: entry.last_seen,
        }
    }
}

pub async fn today_attendance(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = TodayAttendanceUseCase {
        animals: state.animal_repo(),
        attendance: state.attendance_repo(),
    };
    let entries = usecase.execute(identity.user_id).await?;
    let data: Vec<TodayAttendanceResponse> =
        entries.into_iter().map(TodayAttendanceResponse::from).collect();
    Ok(Json(Envelope::ok(
        "Today's attendance retrieved successfully",
        data,
    )))
}

// ── GET /api/farmer/all-attendance ───────────────────────────────────────────

pub async fn all_attendance(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = AllAttendanceUseCase {
        animals: state.animal_repo(),
        attendance: state.attendance_repo(),
    };
    let summaries = usecase.execute(identity.user_id).await?;
    let data: Vec<AttendanceSummaryResponse> = summaries
        .into_iter()
        .map(AttendanceSummaryResponse::from)
        .collect();
    Ok(Json(Envelope::ok(
        "Attendance records retrieved successfully",
        data,
    )))
}
