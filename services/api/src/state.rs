use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use herdbook_auth_types::identity::TokenSecret;

use crate::infra::db::{
    DbAnimalRepository, DbAttendanceRepository, DbHealthRecordRepository, DbMedicationRepository,
    DbUserRepository,
};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: String,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn animal_repo(&self) -> DbAnimalRepository {
        DbAnimalRepository {
            db: self.db.clone(),
        }
    }

    pub fn attendance_repo(&self) -> DbAttendanceRepository {
        DbAttendanceRepository {
            db: self.db.clone(),
        }
    }

    pub fn medication_repo(&self) -> DbMedicationRepository {
        DbMedicationRepository {
            db: self.db.clone(),
        }
    }

    pub fn health_record_repo(&self) -> DbHealthRecordRepository {
        DbHealthRecordRepository {
            db: self.db.clone(),
        }
    }
}

// Lets the `Identity` extractor pull the signing secret out of state.
impl FromRef<AppState> for TokenSecret {
    fn from_ref(state: &AppState) -> Self {
        TokenSecret(state.jwt_secret.clone())
    }
}
