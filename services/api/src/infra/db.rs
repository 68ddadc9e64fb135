use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, sea_query::OnConflict,
};
use uuid::Uuid;

use herdbook_api_schema::{animals, attendance_logs, health_records, medications, users};
use herdbook_domain::health::RiskLevel;
use herdbook_domain::user::UserRole;

use crate::domain::repository::{
    AnimalRepository, AttendanceRepository, HealthRecordRepository, MedicationRepository,
    UserRepository,
};
use crate::domain::types::{Animal, AttendanceEntry, HealthRecord, Medication, User};
use crate::error::ApiError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(users::Column::Phone.eq(phone))
            .one(&self.db)
            .await
            .context("find user by phone")?;
        model.map(user_from_model).transpose()
    }

    async fn create(&self, user: &User) -> Result<(), ApiError> {
        users::ActiveModel {
            id: Set(user.id),
            name: Set(user.name.clone()),
            phone: Set(user.phone.clone()),
            password_hash: Set(user.password_hash.clone()),
            role: Set(user.role.as_str().to_owned()),
            pincode: Set(user.pincode.clone()),
            farm_name: Set(user.farm_name.clone()),
            location: Set(user.location.clone()),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create user")?;
        Ok(())
    }
}

fn user_from_model(model: users::Model) -> Result<User, ApiError> {
    let role = UserRole::from_str_opt(&model.role).ok_or_else(|| {
        ApiError::Internal(anyhow::anyhow!("unknown role in users row: {}", model.role))
    })?;
    Ok(User {
        id: model.id,
        name: model.name,
        phone: model.phone,
        password_hash: model.password_hash,
        role,
        pincode: model.pincode,
        farm_name: model.farm_name,
        location: model.location,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Animal repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAnimalRepository {
    pub db: DatabaseConnection,
}

impl AnimalRepository for DbAnimalRepository {
    async fn find_by_tag(&self, tag_id: &str) -> Result<Option<Animal>, ApiError> {
        let model = animals::Entity::find()
            .filter(animals::Column::TagId.eq(tag_id))
            .one(&self.db)
            .await
            .context("find animal by tag")?;
        Ok(model.map(animal_from_model))
    }

    async fn find_or_create(&self, tag_id: &str, owner_id: Uuid) -> Result<Animal, ApiError> {
        if let Some(animal) = self.find_by_tag(tag_id).await? {
            return Ok(animal);
        }

        // First sighting. Insert with ON CONFLICT (tag_id) DO NOTHING so a
        // concurrent scan of the same unseen tag cannot create a duplicate,
        // then re-read whichever row won the race.
        let insert = animals::Entity::insert(animals::ActiveModel {
            id: Set(Uuid::now_v7()),
            tag_id: Set(tag_id.to_owned()),
            species: Set(None),
            breed: Set(None),
            owner_id: Set(owner_id),
            created_at: Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::column(animals::Column::TagId)
                .do_nothing()
                .to_owned(),
        )
        .exec(&self.db)
        .await;

        match insert {
            Ok(_) | Err(DbErr::RecordNotInserted) => {}
            Err(e) => {
                return Err(ApiError::Internal(
                    anyhow::Error::new(e).context("insert animal"),
                ));
            }
        }

        self.find_by_tag(tag_id).await?.ok_or_else(|| {
            ApiError::Internal(anyhow::anyhow!("animal row missing after upsert: {tag_id}"))
        })
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Animal>, ApiError> {
        let models = animals::Entity::find()
            .filter(animals::Column::OwnerId.eq(owner_id))
            .order_by_asc(animals::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list animals by owner")?;
        Ok(models.into_iter().map(animal_from_model).collect())
    }
}

fn animal_from_model(model: animals::Model) -> Animal {
    Animal {
        id: model.id,
        tag_id: model.tag_id,
        species: model.species,
        breed: model.breed,
        owner_id: model.owner_id,
        created_at: model.created_at,
    }
}

// ── Attendance repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAttendanceRepository {
    pub db: DatabaseConnection,
}

impl AttendanceRepository for DbAttendanceRepository {
    async fn append(&self, animal_id: Uuid, logged_at: DateTime<Utc>) -> Result<(), ApiError> {
        attendance_logs::ActiveModel {
            id: Set(Uuid::now_v7()),
            animal_id: Set(animal_id),
            logged_at: Set(logged_at),
        }
        .insert(&self.db)
        .await
        .context("append attendance log")?;
        Ok(())
    }

    async fn list_for_animal(&self, animal_id: Uuid) -> Result<Vec<DateTime<Utc>>, ApiError> {
        let models = attendance_logs::Entity::find()
            .filter(attendance_logs::Column::AnimalId.eq(animal_id))
            .order_by_asc(attendance_logs::Column::LoggedAt)
            .all(&self.db)
            .await
            .context("list attendance for animal")?;
        Ok(models.into_iter().map(|m| m.logged_at).collect())
    }

    async fn list_for_animals(
        &self,
        animal_ids: &[Uuid],
    ) -> Result<Vec<AttendanceEntry>, ApiError> {
        let models = attendance_logs::Entity::find()
            .filter(attendance_logs::Column::AnimalId.is_in(animal_ids.iter().copied()))
            .order_by_asc(attendance_logs::Column::LoggedAt)
            .all(&self.db)
            .await
            .context("list attendance for animals")?;
        Ok(models
            .into_iter()
            .map(|m| AttendanceEntry {
                animal_id: m.animal_id,
                logged_at: m.logged_at,
            })
            .collect())
    }
}

// ── Medication repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbMedicationRepository {
    pub db: DatabaseConnection,
}

impl MedicationRepository for DbMedicationRepository {
    async fn create(&self, medication: &Medication) -> Result<(), ApiError> {
        medications::ActiveModel {
            id: Set(medication.id),
            tag_id: Set(medication.tag_id.clone()),
            prescribed_by: Set(medication.prescribed_by),
            disease: Set(medication.disease.clone()),
            description: Set(medication.description.clone()),
            solution: Set(medication.solution.clone()),
            created_at: Set(medication.created_at),
        }
        .insert(&self.db)
        .await
        .context("create medication")?;
        Ok(())
    }

    async fn list_by_tag(&self, tag_id: &str) -> Result<Vec<Medication>, ApiError> {
        let models = medications::Entity::find()
            .filter(medications::Column::TagId.eq(tag_id))
            .order_by_desc(medications::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list medications by tag")?;
        Ok(models.into_iter().map(medication_from_model).collect())
    }

    async fn list_by_vet_since(
        &self,
        vet_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<Vec<Medication>, ApiError> {
        let models = medications::Entity::find()
            .filter(medications::Column::PrescribedBy.eq(vet_id))
            .filter(medications::Column::CreatedAt.gte(since))
            .order_by_desc(medications::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list medications by vet")?;
        Ok(models.into_iter().map(medication_from_model).collect())
    }
}

fn medication_from_model(model: medications::Model) -> Medication {
    Medication {
        id: model.id,
        tag_id: model.tag_id,
        prescribed_by: model.prescribed_by,
        disease: model.disease,
        description: model.description,
        solution: model.solution,
        created_at: model.created_at,
    }
}

// ── Health-record repository ─────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbHealthRecordRepository {
    pub db: DatabaseConnection,
}

impl HealthRecordRepository for DbHealthRecordRepository {
    async fn list_by_tag(&self, tag_id: &str) -> Result<Vec<HealthRecord>, ApiError> {
        let models = health_records::Entity::find()
            .filter(health_records::Column::TagId.eq(tag_id))
            .order_by_desc(health_records::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list health records by tag")?;
        models.into_iter().map(health_record_from_model).collect()
    }

    async fn list_by_tag_since(
        &self,
        tag_id: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<HealthRecord>, ApiError> {
        let models = health_records::Entity::find()
            .filter(health_records::Column::TagId.eq(tag_id))
            .filter(health_records::Column::CreatedAt.gte(since))
            .order_by_desc(health_records::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list health records since")?;
        models.into_iter().map(health_record_from_model).collect()
    }

    async fn list_by_tags(&self, tag_ids: &[String]) -> Result<Vec<HealthRecord>, ApiError> {
        let models = health_records::Entity::find()
            .filter(health_records::Column::TagId.is_in(tag_ids.iter().cloned()))
            .order_by_desc(health_records::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list health records by tags")?;
        models.into_iter().map(health_record_from_model).collect()
    }
}

fn health_record_from_model(model: health_records::Model) -> Result<HealthRecord, ApiError> {
    let risk_level = RiskLevel::from_str_opt(&model.risk_level).ok_or_else(|| {
        ApiError::Internal(anyhow::anyhow!(
            "unknown risk level in health_records row: {}",
            model.risk_level
        ))
    })?;
    Ok(HealthRecord {
        id: model.id,
        tag_id: model.tag_id,
        risk_level,
        created_at: model.created_at,
    })
}
