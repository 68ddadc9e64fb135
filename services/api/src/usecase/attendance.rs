use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::repository::{AnimalRepository, AttendanceRepository};
use crate::domain::types::is_valid_tag_id;
use crate::error::{ApiError, FieldError};

// ── RecordAttendance ─────────────────────────────────────────────────────────

pub struct RecordAttendanceInput {
    pub tag_id: String,
    /// Capture time; defaults to now when the scanner does not send one.
    pub logged_at: Option<DateTime<Utc>>,
}

pub struct RecordAttendanceUseCase<A: AnimalRepository, L: AttendanceRepository> {
    pub animals: A,
    pub attendance: L,
}

impl<A: AnimalRepository, L: AttendanceRepository> RecordAttendanceUseCase<A, L> {
    /// Record one sighting. Creates the animal on first sighting of the tag,
    /// owned by the requesting user; the find-or-create is race-safe at the
    /// storage layer. Returns the tag id.
    pub async fn execute(
        &self,
        owner_id: Uuid,
        input: RecordAttendanceInput,
    ) -> Result<String, ApiError> {
        if !is_valid_tag_id(&input.tag_id) {
            return Err(ApiError::Validation(vec![FieldError::new(
                "tagId",
                "Animal ID is required",
            )]));
        }
        let animal = self
            .animals
            .find_or_create(input.tag_id.trim(), owner_id)
            .await?;
        self.attendance
            .append(animal.id, input.logged_at.unwrap_or_else(Utc::now))
            .await?;
        Ok(animal.tag_id)
    }
}

// ── GetAttendance ────────────────────────────────────────────────────────────

/// Attendance log plus summary for one animal.
#[derive(Debug, Clone)]
pub struct AttendanceSummary {
    pub tag_id: String,
    pub animal_name: String,
    pub total_attendance: usize,
    pub attendance_logs: Vec<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

pub struct GetAttendanceUseCase<A: AnimalRepository, L: AttendanceRepository> {
    pub animals: A,
    pub attendance: L,
}

impl<A: AnimalRepository, L: AttendanceRepository> GetAttendanceUseCase<A, L> {
    pub async fn execute(&self, tag_id: &str) -> Result<AttendanceSummary, ApiError> {
        let animal = self
            .animals
            .find_by_tag(tag_id)
            .await?
            .ok_or_else(|| ApiError::AnimalNotFound(tag_id.to_owned()))?;
        let logs = self.attendance.list_for_animal(animal.id).await?;
        Ok(AttendanceSummary {
            tag_id: animal.tag_id.clone(),
            animal_name: animal.display_name(),
            total_attendance: logs.len(),
            attendance_logs: logs,
            created_at: animal.created_at,
        })
    }
}
