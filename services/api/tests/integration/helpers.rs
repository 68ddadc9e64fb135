use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use herdbook_api::domain::repository::{
    AnimalRepository, AttendanceRepository, HealthRecordRepository, MedicationRepository,
    UserRepository,
};
use herdbook_api::domain::types::{Animal, AttendanceEntry, HealthRecord, Medication, User};
use herdbook_api::error::ApiError;
use herdbook_domain::health::RiskLevel;
use herdbook_domain::user::UserRole;

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn test_user(role: UserRole) -> User {
    let now = Utc::now();
    User {
        id: Uuid::now_v7(),
        name: "Ramesh Patel".into(),
        phone: "9876543210".into(),
        password_hash: bcrypt::hash("secret123", 4).unwrap(),
        role,
        pincode: "560001".into(),
        farm_name: Some("Green Pastures".into()),
        location: Some("Hosur".into()),
        created_at: now,
        updated_at: now,
    }
}

pub fn test_animal(tag_id: &str, owner_id: Uuid) -> Animal {
    Animal {
        id: Uuid::now_v7(),
        tag_id: tag_id.into(),
        species: Some("Cow".into()),
        breed: None,
        owner_id,
        created_at: Utc::now(),
    }
}

pub fn test_medication(tag_id: &str, vet_id: Uuid, created_at: DateTime<Utc>) -> Medication {
    Medication {
        id: Uuid::now_v7(),
        tag_id: tag_id.into(),
        prescribed_by: vet_id,
        disease: "Foot rot".into(),
        description: "Lameness in rear left hoof".into(),
        solution: "Topical antibiotic for 5 days".into(),
        created_at,
    }
}

pub fn test_health_record(
    tag_id: &str,
    risk_level: RiskLevel,
    created_at: DateTime<Utc>,
) -> HealthRecord {
    HealthRecord {
        id: Uuid::now_v7(),
        tag_id: tag_id.into(),
        risk_level,
        created_at,
    }
}

// ── MockUserRepo ─────────────────────────────────────────────────────────────

pub struct MockUserRepo {
    pub users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Shared handle to the stored users for post-execution inspection.
    pub fn users_handle(&self) -> Arc<Mutex<Vec<User>>> {
        Arc::clone(&self.users)
    }

    /// A second repo view over the same storage.
    pub fn share(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
        }
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, ApiError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.phone == phone)
            .cloned())
    }

    async fn create(&self, user: &User) -> Result<(), ApiError> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }
}

// ── MockAnimalRepo ───────────────────────────────────────────────────────────

pub struct MockAnimalRepo {
    pub animals: Arc<Mutex<Vec<Animal>>>,
}

impl MockAnimalRepo {
    pub fn new(animals: Vec<Animal>) -> Self {
        Self {
            animals: Arc::new(Mutex::new(animals)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn animals_handle(&self) -> Arc<Mutex<Vec<Animal>>> {
        Arc::clone(&self.animals)
    }
}

impl AnimalRepository for MockAnimalRepo {
    async fn find_by_tag(&self, tag_id: &str) -> Result<Option<Animal>, ApiError> {
        Ok(self
            .animals
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.tag_id == tag_id)
            .cloned())
    }

    async fn find_or_create(&self, tag_id: &str, owner_id: Uuid) -> Result<Animal, ApiError> {
        let mut animals = self.animals.lock().unwrap();
        if let Some(animal) = animals.iter().find(|a| a.tag_id == tag_id) {
            return Ok(animal.clone());
        }
        let animal = Animal {
            id: Uuid::now_v7(),
            tag_id: tag_id.to_owned(),
            species: None,
            breed: None,
            owner_id,
            created_at: Utc::now(),
        };
        animals.push(animal.clone());
        Ok(animal)
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Animal>, ApiError> {
        Ok(self
            .animals
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.owner_id == owner_id)
            .cloned()
            .collect())
    }
}

// ── MockAttendanceRepo ───────────────────────────────────────────────────────

pub struct MockAttendanceRepo {
    pub entries: Arc<Mutex<Vec<AttendanceEntry>>>,
}

impl MockAttendanceRepo {
    pub fn new(entries: Vec<AttendanceEntry>) -> Self {
        Self {
            entries: Arc::new(Mutex::new(entries)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn entries_handle(&self) -> Arc<Mutex<Vec<AttendanceEntry>>> {
        Arc::clone(&self.entries)
    }
}

impl AttendanceRepository for MockAttendanceRepo {
    async fn append(&self, animal_id: Uuid, logged_at: DateTime<Utc>) -> Result<(), ApiError> {
        self.entries.lock().unwrap().push(AttendanceEntry {
            animal_id,
            logged_at,
        });
        Ok(())
    }

    async fn list_for_animal(&self, animal_id: Uuid) -> Result<Vec<DateTime<Utc>>, ApiError> {
        let mut logs: Vec<DateTime<Utc>> = self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.animal_id == animal_id)
            .map(|e| e.logged_at)
            .collect();
        logs.sort();
        Ok(logs)
    }

    async fn list_for_animals(
        &self,
        animal_ids: &[Uuid],
    ) -> Result<Vec<AttendanceEntry>, ApiError> {
        let mut entries: Vec<AttendanceEntry> = self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| animal_ids.contains(&e.animal_id))
            .copied()
            .collect();
        entries.sort_by_key(|e| e.logged_at);
        Ok(entries)
    }
}

// ── MockMedicationRepo ───────────────────────────────────────────────────────

pub struct MockMedicationRepo {
    pub meds: Arc<Mutex<Vec<Medication>>>,
}

impl MockMedicationRepo {
    pub fn new(meds: Vec<Medication>) -> Self {
        Self {
            meds: Arc::new(Mutex::new(meds)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn share(&self) -> Self {
        Self {
            meds: Arc::clone(&self.meds),
        }
    }
}

impl MedicationRepository for MockMedicationRepo {
    async fn create(&self, medication: &Medication) -> Result<(), ApiError> {
        self.meds.lock().unwrap().push(medication.clone());
        Ok(())
    }

    async fn list_by_tag(&self, tag_id: &str) -> Result<Vec<Medication>, ApiError> {
        let mut meds: Vec<Medication> = self
            .meds
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.tag_id == tag_id)
            .cloned()
            .collect();
        meds.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(meds)
    }

    async fn list_by_vet_since(
        &self,
        vet_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<Vec<Medication>, ApiError> {
        let mut meds: Vec<Medication> = self
            .meds
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.prescribed_by == vet_id && m.created_at >= since)
            .cloned()
            .collect();
        meds.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(meds)
    }
}

// ── MockHealthRepo ───────────────────────────────────────────────────────────

pub struct MockHealthRepo {
    pub records: Arc<Mutex<Vec<HealthRecord>>>,
}

impl MockHealthRepo {
    pub fn new(records: Vec<HealthRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    fn sorted_desc(&self, keep: impl Fn(&HealthRecord) -> bool) -> Vec<HealthRecord> {
        let mut records: Vec<HealthRecord> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| keep(r))
            .cloned()
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records
    }
}

impl HealthRecordRepository for MockHealthRepo {
    async fn list_by_tag(&self, tag_id: &str) -> Result<Vec<HealthRecord>, ApiError> {
        Ok(self.sorted_desc(|r| r.tag_id == tag_id))
    }

    async fn list_by_tag_since(
        &self,
        tag_id: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<HealthRecord>, ApiError> {
        Ok(self.sorted_desc(|r| r.tag_id == tag_id && r.created_at >= since))
    }

    async fn list_by_tags(&self, tag_ids: &[String]) -> Result<Vec<HealthRecord>, ApiError> {
        Ok(self.sorted_desc(|r| tag_ids.contains(&r.tag_id)))
    }
}
