use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use herdbook_auth_types::identity::Identity;
use herdbook_core::response::Envelope;
use herdbook_domain::health::RiskLevel;

use crate::domain::types::{HealthRecord, Medication};
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::vet::{
    AddMedicationInput, AddMedicationUseCase, AnimalTreatmentRollup, HealthRecordsUseCase,
    TreatmentHistoryUseCase, VetDashboardUseCase,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationResponse {
    pub id: String,
    pub tag_id: String,
    pub prescribed_by: String,
    pub disease: String,
    pub description: String,
    pub solution: String,
    #[serde(serialize_with = "herdbook_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<Medication> for MedicationResponse {
    fn from(medication: Medication) -> Self {
        Self {
            id: medication.id.to_string(),
            tag_id: medication.tag_id,
            prescribed_by: medication.prescribed_by.to_string(),
            disease: medication.disease,
            description: medication.description,
            solution: medication.solution,
            created_at: medication.created_at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthRecordResponse {
    pub id: String,
    pub tag_id: String,
    pub risk_level: RiskLevel,
    #[serde(serialize_with = "herdbook_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<HealthRecord> for HealthRecordResponse {
    fn from(record: HealthRecord) -> Self {
        Self {
            id: record.id.to_string(),
            tag_id: record.tag_id,
            risk_level: record.risk_level,
            created_at: record.created_at,
        }
    }
}

// ── GET /api/vet/dashboard-data ──────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentRollupResponse {
    pub tag_id: String,
    pub medication_count: usize,
    pub latest_medication: MedicationResponse,
    pub health_records: Vec<HealthRecordResponse>,
    #[serde(serialize_with = "herdbook_core::serde::vec_to_rfc3339_ms")]
    pub treatment_dates: Vec<DateTime<Utc>>,
}

impl From<AnimalTreatmentRollup> for TreatmentRollupResponse {
    fn from(rollup: AnimalTreatmentRollup) -> Self {
        Self {
            tag_id: rollup.tag_id,
            medication_count: rollup.medication_count,
            latest_medication: MedicationResponse::from(rollup.latest_medication),
            health_records: rollup
                .health_records
                .into_iter()
                .map(HealthRecordResponse::from)
                .collect(),
            treatment_dates: rollup.treatment_dates,
        }
    }
}

pub async fn dashboard_data(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = VetDashboardUseCase {
        meds: state.medication_repo(),
        health: state.health_record_repo(),
    };
    let rollups = usecase.execute(identity.user_id).await?;

    let message = if rollups.is_empty() {
        "No medication records found in the last 30 days".to_owned()
    } else {
        format!(
            "Health records for {} unique animals treated in the last 30 days",
            rollups.len()
        )
    };
    let data: Vec<TreatmentRollupResponse> = rollups
        .into_iter()
        .map(TreatmentRollupResponse::from)
        .collect();
    Ok(Json(Envelope::ok(message, data)))
}

// ── GET /api/vet/{tag_id}/health-since-latest-treatment ──────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentHistoryResponse {
    pub tag_id: String,
    #[serde(serialize_with = "herdbook_core::serde::to_rfc3339_ms")]
    pub latest_treatment_date: DateTime<Utc>,
    pub medication_count: usize,
    pub medication_records: Vec<MedicationResponse>,
    pub health_records: Vec<HealthRecordResponse>,
    pub total_health_records_days: usize,
}

pub async fn health_since_latest_treatment(
    _identity: Identity,
    State(state): State<AppState>,
    Path(tag_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = TreatmentHistoryUseCase {
        meds: state.medication_repo(),
        health: state.health_record_repo(),
    };
    let history = usecase.execute(&tag_id).await?;
    let message = format!(
        "Medication and health records for animal with ID {tag_id} retrieved successfully"
    );
    Ok(Json(Envelope::ok(
        message,
        TreatmentHistoryResponse {
            tag_id: history.tag_id,
            latest_treatment_date: history.latest_treatment_date,
            medication_count: history.medication_count,
            medication_records: history
                .medication_records
                .into_iter()
                .map(MedicationResponse::from)
                .collect(),
            health_records: history
                .health_records
                .into_iter()
                .map(HealthRecordResponse::from)
                .collect(),
            total_health_records_days: history.total_health_record_days,
        },
    )))
}

// ── GET /api/vet/{tag_id}/health-records ─────────────────────────────────────

pub async fn health_records(
    _identity: Identity,
    State(state): State<AppState>,
    Path(tag_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = HealthRecordsUseCase {
        health: state.health_record_repo(),
    };
    let records = usecase.execute(&tag_id).await?;
    let data: Vec<HealthRecordResponse> =
        records.into_iter().map(HealthRecordResponse::from).collect();
    Ok(Json(Envelope::ok(
        "Health records retrieved successfully",
        data,
    )))
}

// ── POST /api/vet/{tag_id}/medications ───────────────────────────────────────

#[derive(Deserialize)]
pub struct AddMedicationRequest {
    pub disease: String,
    pub description: String,
    pub solution: String,
}

pub async fn add_medication(
    identity: Identity,
    State(state): State<AppState>,
    Path(tag_id): Path<String>,
    Json(body): Json<AddMedicationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = AddMedicationUseCase {
        meds: state.medication_repo(),
    };
    let medication = usecase
        .execute(
            identity.user_id,
            AddMedicationInput {
                tag_id,
                disease: body.disease,
                description: body.description,
                solution: body.solution,
            },
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(Envelope::ok(
            "Medication record added successfully",
            MedicationResponse::from(medication),
        )),
    ))
}
