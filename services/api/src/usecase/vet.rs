use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::domain::repository::{HealthRecordRepository, MedicationRepository};
use crate::domain::types::{HealthRecord, Medication, falls_on_local_day, is_valid_tag_id, today_local};
use crate::error::{ApiError, FieldError};

/// Trailing window for the vet dashboard rollup.
pub const DASHBOARD_WINDOW_DAYS: i64 = 30;

// ── AddMedication ────────────────────────────────────────────────────────────

pub struct AddMedicationInput {
    pub tag_id: String,
    pub disease: String,
    pub description: String,
    pub solution: String,
}

pub struct AddMedicationUseCase<M: MedicationRepository> {
    pub meds: M,
}

impl<M: MedicationRepository> AddMedicationUseCase<M> {
    pub async fn execute(
        &self,
        vet_id: Uuid,
        input: AddMedicationInput,
    ) -> Result<Medication, ApiError> {
        let mut errors = Vec::new();
        if !is_valid_tag_id(&input.tag_id) {
            errors.push(FieldError::new("tagId", "Animal ID is required"));
        }
        if input.disease.trim().is_empty() {
            errors.push(FieldError::new("disease", "Disease is required"));
        }
        if input.description.trim().is_empty() {
            errors.push(FieldError::new("description", "Description is required"));
        }
        if input.solution.trim().is_empty() {
            errors.push(FieldError::new("solution", "Solution is required"));
        }
        if !errors.is_empty() {
            return Err(ApiError::Validation(errors));
        }

        let medication = Medication {
            id: Uuid::now_v7(),
            tag_id: input.tag_id.trim().to_owned(),
            prescribed_by: vet_id,
            disease: input.disease,
            description: input.description,
            solution: input.solution,
            created_at: Utc::now(),
        };
        self.meds.create(&medication).await?;
        Ok(medication)
    }
}

// ── VetDashboard ─────────────────────────────────────────────────────────────

/// Composite per-animal view for the vet dashboard: the vet's last 30 days of
/// prescriptions grouped by tag, joined with today's health records.
#[derive(Debug, Clone)]
pub struct AnimalTreatmentRollup {
    pub tag_id: String,
    pub medication_count: usize,
    pub latest_medication: Medication,
    pub health_records: Vec<HealthRecord>,
    pub treatment_dates: Vec<DateTime<Utc>>,
}

pub struct VetDashboardUseCase<M: MedicationRepository, H: HealthRecordRepository> {
    pub meds: M,
    pub health: H,
}

impl<M: MedicationRepository, H: HealthRecordRepository> VetDashboardUseCase<M, H> {
    pub async fn execute(&self, vet_id: Uuid) -> Result<Vec<AnimalTreatmentRollup>, ApiError> {
        let since = Utc::now() - Duration::days(DASHBOARD_WINDOW_DAYS);
        let medications = self.meds.list_by_vet_since(vet_id, since).await?;
        if medications.is_empty() {
            return Ok(vec![]);
        }

        // Distinct tags in first-seen order; medications arrive most-recent-
        // first, so the most recently treated animal leads the rollup.
        let mut tags: Vec<String> = Vec::new();
        for medication in &medications {
            if !tags.contains(&medication.tag_id) {
                tags.push(medication.tag_id.clone());
            }
        }

        let all_health = self.health.list_by_tags(&tags).await?;
        let today = today_local();

        let mut rollups = Vec::with_capacity(tags.len());
        for tag in tags {
            let animal_meds: Vec<&Medication> =
                medications.iter().filter(|m| m.tag_id == tag).collect();
            let Some(latest) = animal_meds.first() else {
                continue;
            };
            let health_records = all_health
                .iter()
                .filter(|h| h.tag_id == tag && falls_on_local_day(h.created_at, today))
                .cloned()
                .collect();
            rollups.push(AnimalTreatmentRollup {
                medication_count: animal_meds.len(),
                latest_medication: (*latest).clone(),
                health_records,
                treatment_dates: animal_meds.iter().map(|m| m.created_at).collect(),
                tag_id: tag,
            });
        }
        Ok(rollups)
    }
}

// ── TreatmentHistory ─────────────────────────────────────────────────────────

/// Medication history for one animal plus every health record produced since
/// its most recent treatment.
#[derive(Debug, Clone)]
pub struct TreatmentHistory {
    pub tag_id: String,
    pub latest_treatment_date: DateTime<Utc>,
    pub medication_count: usize,
    pub medication_records: Vec<Medication>,
    pub health_records: Vec<HealthRecord>,
    pub total_health_record_days: usize,
}

pub struct TreatmentHistoryUseCase<M: MedicationRepository, H: HealthRecordRepository> {
    pub meds: M,
    pub health: H,
}

impl<M: MedicationRepository, H: HealthRecordRepository> TreatmentHistoryUseCase<M, H> {
    pub async fn execute(&self, tag_id: &str) -> Result<TreatmentHistory, ApiError> {
        let medications = self.meds.list_by_tag(tag_id).await?;
        let Some(latest) = medications.first() else {
            return Err(ApiError::NoMedicationRecords(tag_id.to_owned()));
        };
        let latest_treatment_date = latest.created_at;

        let health_records = self
            .health
            .list_by_tag_since(tag_id, latest_treatment_date)
            .await?;

        Ok(TreatmentHistory {
            tag_id: tag_id.to_owned(),
            latest_treatment_date,
            medication_count: medications.len(),
            total_health_record_days: health_records.len(),
            medication_records: medications,
            health_records,
        })
    }
}

// ── HealthRecords ────────────────────────────────────────────────────────────

pub struct HealthRecordsUseCase<H: HealthRecordRepository> {
    pub health: H,
}

impl<H: HealthRecordRepository> HealthRecordsUseCase<H> {
    /// All health records for a tag, most recent first. An empty list is not
    /// an error — records join by tag equality and need no animal row.
    pub async fn execute(&self, tag_id: &str) -> Result<Vec<HealthRecord>, ApiError> {
        self.health.list_by_tag(tag_id).await
    }
}
