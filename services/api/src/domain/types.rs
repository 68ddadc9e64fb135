use chrono::{DateTime, Local, NaiveDate, Utc};
use uuid::Uuid;

use herdbook_domain::health::RiskLevel;
use herdbook_domain::user::UserRole;

/// Registered account (farmer or vet).
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub password_hash: String,
    pub role: UserRole,
    pub pincode: String,
    pub farm_name: Option<String>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Animal identified by its unique tag.
#[derive(Debug, Clone)]
pub struct Animal {
    pub id: Uuid,
    pub tag_id: String,
    pub species: Option<String>,
    pub breed: Option<String>,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Animal {
    /// Display name for attendance views: species plus breed when known,
    /// falling back to the tag id for animals auto-created by a scan.
    pub fn display_name(&self) -> String {
        match (&self.species, &self.breed) {
            (Some(species), Some(breed)) => format!("{species} - {breed}"),
            (Some(species), None) => species.clone(),
            _ => self.tag_id.clone(),
        }
    }
}

/// One attendance sighting, keyed by animal for in-memory grouping.
#[derive(Debug, Clone, Copy)]
pub struct AttendanceEntry {
    pub animal_id: Uuid,
    pub logged_at: DateTime<Utc>,
}

/// Prescription event recorded by a vet.
#[derive(Debug, Clone)]
pub struct Medication {
    pub id: Uuid,
    pub tag_id: String,
    pub prescribed_by: Uuid,
    pub disease: String,
    pub description: String,
    pub solution: String,
    pub created_at: DateTime<Utc>,
}

/// Risk classification emitted by the external flagging process.
#[derive(Debug, Clone)]
pub struct HealthRecord {
    pub id: Uuid,
    pub tag_id: String,
    pub risk_level: RiskLevel,
    pub created_at: DateTime<Utc>,
}

// ── Field validation ─────────────────────────────────────────────────────────

pub const MIN_NAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 6;

/// Phone numbers are exactly 10 ASCII digits.
pub fn is_valid_phone(phone: &str) -> bool {
    phone.len() == 10 && phone.chars().all(|c| c.is_ascii_digit())
}

/// Pincodes are exactly 6 ASCII digits.
pub fn is_valid_pincode(pincode: &str) -> bool {
    pincode.len() == 6 && pincode.chars().all(|c| c.is_ascii_digit())
}

/// Tag identifiers must be non-empty after trimming.
pub fn is_valid_tag_id(tag_id: &str) -> bool {
    !tag_id.trim().is_empty()
}

// ── Calendar-day windowing ───────────────────────────────────────────────────

/// The current calendar day on the local server clock. All "present today"
/// and "same-day" windows are anchored to this, per the dashboard contract
/// (day boundary at 00:00:00-23:59:59.999999 local).
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

/// Whether a stored UTC timestamp falls on the given local calendar day.
pub fn falls_on_local_day(ts: DateTime<Utc>, day: NaiveDate) -> bool {
    ts.with_timezone(&Local).date_naive() == day
}
