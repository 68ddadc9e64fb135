use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use herdbook_domain::health::RiskLevel;

use crate::domain::repository::{AnimalRepository, AttendanceRepository, HealthRecordRepository};
use crate::domain::types::{falls_on_local_day, today_local};
use crate::error::ApiError;
use crate::usecase::attendance::AttendanceSummary;

// ── DashboardStats ───────────────────────────────────────────────────────────

/// Farmer dashboard aggregate. Recomputed on every request; nothing cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardStats {
    pub present_count: usize,
    pub absent_percentage: u32,
    pub flagged_count: usize,
    pub sync_status: &'static str,
}

impl DashboardStats {
    fn empty() -> Self {
        Self {
            present_count: 0,
            absent_percentage: 0,
            flagged_count: 0,
            sync_status: "Synced",
        }
    }
}

pub struct DashboardStatsUseCase<A, L, H>
where
    A: AnimalRepository,
    L: AttendanceRepository,
    H: HealthRecordRepository,
{
    pub animals: A,
    pub attendance: L,
    pub health: H,
}

impl<A, L, H> DashboardStatsUseCase<A, L, H>
where
    A: AnimalRepository,
    L: AttendanceRepository,
    H: HealthRecordRepository,
{
    /// Present = any sighting on the current local calendar day. Flagged =
    /// animals whose latest health record (ties broken by retrieval order)
    /// is medium or high risk. Zero animals short-circuits to zero stats.
    pub async fn execute(&self, owner_id: Uuid) -> Result<DashboardStats, ApiError> {
        let animals = self.animals.list_by_owner(owner_id).await?;
        if animals.is_empty() {
            return Ok(DashboardStats::empty());
        }

        let animal_ids: Vec<Uuid> = animals.iter().map(|a| a.id).collect();
        let entries = self.attendance.list_for_animals(&animal_ids).await?;

        let today = today_local();
        let present_ids: HashSet<Uuid> = entries
            .iter()
            .filter(|e| falls_on_local_day(e.logged_at, today))
            .map(|e| e.animal_id)
            .collect();

        let total = animals.len();
        let present_count = present_ids.len();
        let absent = total - present_count;
        let absent_percentage = ((absent as f64 / total as f64) * 100.0).round() as u32;

        let tags: Vec<String> = animals.iter().map(|a| a.tag_id.clone()).collect();
        let records = self.health.list_by_tags(&tags).await?;

        // Records arrive most-recent-first; the first record seen per tag is
        // that animal's latest classification.
        let mut latest_risk: HashMap<&str, RiskLevel> = HashMap::new();
        for record in &records {
            latest_risk
                .entry(record.tag_id.as_str())
                .or_insert(record.risk_level);
        }
        let flagged_count = latest_risk.values().filter(|r| r.is_flagged()).count();

        Ok(DashboardStats {
            present_count,
            absent_percentage,
            flagged_count,
            sync_status: "Synced",
        })
    }
}

// ── TodayAttendance ──────────────────────────────────────────────────────────

/// One owned animal's sightings for the current local day.
#[derive(Debug, Clone)]
pub struct TodayAttendance {
    pub tag_id: String,
    pub animal_name: String,
    pub present: bool,
    pub attendance_logs: Vec<DateTime<Utc>>,
    pub last_seen: Option<DateTime<Utc>>,
}

pub struct TodayAttendanceUseCase<A: AnimalRepository, L: AttendanceRepository> {
    pub animals: A,
    pub attendance: L,
}

impl<A: AnimalRepository, L: AttendanceRepository> TodayAttendanceUseCase<A, L> {
    /// Every owned animal appears in the result, absent ones with an empty
    /// log, so the scan page can show both sides of the herd.
    pub async fn execute(&self, owner_id: Uuid) -> Result<Vec<TodayAttendance>, ApiError> {
        let animals = self.animals.list_by_owner(owner_id).await?;
        if animals.is_empty() {
            return Ok(vec![]);
        }

        let animal_ids: Vec<Uuid> = animals.iter().map(|a| a.id).collect();
        let entries = self.attendance.list_for_animals(&animal_ids).await?;

        let today = today_local();
        let mut logs_by_animal: HashMap<Uuid, Vec<DateTime<Utc>>> = HashMap::new();
        for entry in entries {
            if falls_on_local_day(entry.logged_at, today) {
                logs_by_animal
                    .entry(entry.animal_id)
                    .or_default()
                    .push(entry.logged_at);
            }
        }

        Ok(animals
            .into_iter()
            .map(|animal| {
                let logs = logs_by_animal.remove(&animal.id).unwrap_or_default();
                TodayAttendance {
                    animal_name: animal.display_name(),
                    tag_id: animal.tag_id,
                    present: !logs.is_empty(),
                    last_seen: logs.last().copied(),
                    attendance_logs: logs,
                }
            })
            .collect())
    }
}

// ── AllAttendance ────────────────────────────────────────────────────────────

pub struct AllAttendanceUseCase<A: AnimalRepository, L: AttendanceRepository> {
    pub animals: A,
    pub attendance: L,
}

impl<A: AnimalRepository, L: AttendanceRepository> AllAttendanceUseCase<A, L> {
    /// Full attendance summary for every owned animal.
    pub async fn execute(&self, owner_id: Uuid) -> Result<Vec<AttendanceSummary>, ApiError> {
        let animals = self.animals.list_by_owner(owner_id).await?;
        if animals.is_empty() {
            return Ok(vec![]);
        }

        let animal_ids: Vec<Uuid> = animals.iter().map(|a| a.id).collect();
        let entries = self.attendance.list_for_animals(&animal_ids).await?;

        let mut logs_by_animal: HashMap<Uuid, Vec<DateTime<Utc>>> = HashMap::new();
        for entry in entries {
            logs_by_animal
                .entry(entry.animal_id)
                .or_default()
                .push(entry.logged_at);
        }

        Ok(animals
            .into_iter()
            .map(|animal| {
                let logs = logs_by_animal.remove(&animal.id).unwrap_or_default();
                AttendanceSummary {
                    animal_name: animal.display_name(),
                    tag_id: animal.tag_id,
                    total_attendance: logs.len(),
                    attendance_logs: logs,
                    created_at: animal.created_at,
                }
            })
            .collect())
    }
}
