use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use herdbook_auth_types::identity::Identity;
use herdbook_core::response::Envelope;

use crate::error::{ApiError, FieldError};
use crate::state::AppState;
use crate::usecase::attendance::{
    AttendanceSummary, GetAttendanceUseCase, RecordAttendanceInput, RecordAttendanceUseCase,
};
use crate::usecase::stats::DashboardStatsUseCase;

// ── POST /api/animal/attendance ──────────────────────────────────────────────

pub async fn record_attendance(
    identity: Identity,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut image: Option<axum::body::Bytes> = None;
    let mut tag_id: Option<String> = None;
    let mut logged_at: Option<DateTime<Utc>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(vec![FieldError::new("body", e.to_string())]))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("image") => {
                image = Some(field.bytes().await.map_err(|e| {
                    ApiError::Validation(vec![FieldError::new("image", e.to_string())])
                })?);
            }
            Some("tagId") => {
                tag_id = Some(field.text().await.map_err(|e| {
                    ApiError::Validation(vec![FieldError::new("tagId", e.to_string())])
                })?);
            }
            Some("date") => {
                let text = field.text().await.map_err(|e| {
                    ApiError::Validation(vec![FieldError::new("date", e.to_string())])
                })?;
                let parsed = DateTime::parse_from_rfc3339(&text).map_err(|_| {
                    ApiError::Validation(vec![FieldError::new(
                        "date",
                        "Date must be an RFC 3339 timestamp",
                    )])
                })?;
                logged_at = Some(parsed.with_timezone(&Utc));
            }
            _ => {}
        }
    }

    // The image must accompany the scan but is never retained: the bytes are
    // dropped here on every path. The ML-processing and real-time
    // notification hooks of the original system are intentionally absent.
    if image.is_none() {
        return Err(ApiError::ImageRequired);
    }
    drop(image);

    let usecase = RecordAttendanceUseCase {
        animals: state.animal_repo(),
        attendance: state.attendance_repo(),
    };
    let tag = usecase
        .execute(
            identity.user_id,
            RecordAttendanceInput {
                tag_id: tag_id.unwrap_or_default(),
                logged_at,
            },
        )
        .await?;

    Ok((
        StatusCode::OK,
        Json(Envelope::ok(
            "Attendance recorded successfully",
            serde_json::json!({ "tagId": tag }),
        )),
    ))
}

// ── GET /api/animal/{tag_id}/attendance ──────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummaryResponse {
    pub tag_id: String,
    pub animal_name: String,
    pub total_attendance: usize,
    #[serde(serialize_with = "herdbook_core::serde::vec_to_rfc3339_ms")]
    pub attendance_logs: Vec<DateTime<Utc>>,
    #[serde(serialize_with = "herdbook_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<AttendanceSummary> for AttendanceSummaryResponse {
    fn from(summary: AttendanceSummary) -> Self {
        Self {
            tag_id: summary.tag_id,
            animal_name: summary.animal_name,
            total_attendance: summary.total_attendance,
            attendance_logs: summary.attendance_logs,
            created_at: summary.created_at,
        }
    }
}

pub async fn get_attendance(
    _identity: Identity,
    State(state): State<AppState>,
    Path(tag_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = GetAttendanceUseCase {
        animals: state.animal_repo(),
        attendance: state.attendance_repo(),
    };
    let summary = usecase.execute(&tag_id).await?;
    Ok(Json(Envelope::ok(
        "Attendance records retrieved successfully",
        AttendanceSummaryResponse::from(summary),
    )))
}

// ── GET /api/animal/stats ────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatsResponse {
    pub present_count: usize,
    pub absent_percentage: u32,
    pub flagged_count: usize,
    pub sync_status: &'static str,
}

pub async fn dashboard_stats(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = DashboardStatsUseCase {
        animals: state.animal_repo(),
        attendance: state.attendance_repo(),
        health: state.health_record_repo(),
    };
    let stats = usecase.execute(identity.user_id).await?;
    Ok(Json(Envelope::ok(
        "Dashboard stats retrieved successfully",
        DashboardStatsResponse {
            present_count: stats.present_count,
            absent_percentage: stats.absent_percentage,
            flagged_count: stats.flagged_count,
            sync_status: stats.sync_status,
        },
    )))
}
