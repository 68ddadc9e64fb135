#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::types::{Animal, AttendanceEntry, HealthRecord, Medication, User};
use crate::error::ApiError;

/// Repository for user accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, ApiError>;
    async fn create(&self, user: &User) -> Result<(), ApiError>;
}

/// Repository for animals.
pub trait AnimalRepository: Send + Sync {
    async fn find_by_tag(&self, tag_id: &str) -> Result<Option<Animal>, ApiError>;

    /// Find the animal for `tag_id`, creating it (owned by `owner_id`) if it
    /// does not exist. Must be race-safe: concurrent first-sightings of the
    /// same tag resolve to a single animal row, using the unique tag_id
    /// constraint as the conflict target.
    async fn find_or_create(&self, tag_id: &str, owner_id: Uuid) -> Result<Animal, ApiError>;

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Animal>, ApiError>;
}

/// Repository for attendance sightings.
pub trait AttendanceRepository: Send + Sync {
    async fn append(&self, animal_id: Uuid, logged_at: DateTime<Utc>) -> Result<(), ApiError>;

    /// All sightings of one animal, oldest first.
    async fn list_for_animal(&self, animal_id: Uuid) -> Result<Vec<DateTime<Utc>>, ApiError>;

    /// All sightings of the given animals, oldest first. Callers group by
    /// `animal_id` in memory.
    async fn list_for_animals(
        &self,
        animal_ids: &[Uuid],
    ) -> Result<Vec<AttendanceEntry>, ApiError>;
}

/// Repository for medication records.
pub trait MedicationRepository: Send + Sync {
    async fn create(&self, medication: &Medication) -> Result<(), ApiError>;

    /// All records for a tag, most recent first.
    async fn list_by_tag(&self, tag_id: &str) -> Result<Vec<Medication>, ApiError>;

    /// Records prescribed by a vet at or after `since`, most recent first.
    async fn list_by_vet_since(
        &self,
        vet_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<Vec<Medication>, ApiError>;
}

/// Repository for externally produced health records (read-only).
pub trait HealthRecordRepository: Send + Sync {
    /// All records for a tag, most recent first.
    async fn list_by_tag(&self, tag_id: &str) -> Result<Vec<HealthRecord>, ApiError>;

    /// Records for a tag created at or after `since`, most recent first.
    async fn list_by_tag_since(
        &self,
        tag_id: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<HealthRecord>, ApiError>;

    /// All records for the given tags, most recent first across the whole
    /// result set. Callers take the first record seen per tag as its latest.
    async fn list_by_tags(&self, tag_ids: &[String]) -> Result<Vec<HealthRecord>, ApiError>;
}
