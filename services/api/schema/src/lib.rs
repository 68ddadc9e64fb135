//! sea-orm entities for the Herdbook record store.

pub mod animals;
pub mod attendance_logs;
pub mod health_records;
pub mod medications;
pub mod users;
