use chrono::{Duration, Utc};
use uuid::Uuid;

use herdbook_api::domain::repository::MedicationRepository;
use herdbook_api::error::ApiError;
use herdbook_api::usecase::vet::{
    AddMedicationInput, AddMedicationUseCase, HealthRecordsUseCase, TreatmentHistoryUseCase,
    VetDashboardUseCase,
};
use herdbook_domain::health::RiskLevel;

use crate::helpers::{MockHealthRepo, MockMedicationRepo, test_health_record, test_medication};

fn medication_input(tag_id: &str) -> AddMedicationInput {
    AddMedicationInput {
        tag_id: tag_id.into(),
        disease: "Foot rot".into(),
        description: "Lameness in rear left hoof".into(),
        solution: "Topical antibiotic for 5 days".into(),
    }
}

// ── AddMedication / per-animal query round trip ──────────────────────────────

#[tokio::test]
async fn should_return_created_medications_most_recent_first() {
    let repo = MockMedicationRepo::empty();
    let vet = Uuid::now_v7();

    let usecase = AddMedicationUseCase { meds: repo.share() };
    let first = usecase.execute(vet, medication_input("COW-17")).await.unwrap();
    let mut second_input = medication_input("COW-17");
    second_input.disease = "Mastitis".into();
    let second = usecase.execute(vet, second_input).await.unwrap();

    // Force distinct timestamps so the ordering is deterministic.
    {
        let mut meds = repo.meds.lock().unwrap();
        meds[0].created_at = Utc::now() - Duration::minutes(5);
    }

    let listed = repo.list_by_tag("COW-17").await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, second.id);
    assert_eq!(listed[0].disease, "Mastitis");
    assert_eq!(listed[1].id, first.id);
    assert_eq!(listed[1].disease, "Foot rot");
    assert!(listed.iter().all(|m| m.prescribed_by == vet));
}

#[tokio::test]
async fn should_collect_missing_medication_fields() {
    let usecase = AddMedicationUseCase {
        meds: MockMedicationRepo::empty(),
    };
    let result = usecase
        .execute(
            Uuid::now_v7(),
            AddMedicationInput {
                tag_id: "COW-17".into(),
                disease: "".into(),
                description: "  ".into(),
                solution: "Rest".into(),
            },
        )
        .await;
    match result {
        Err(ApiError::Validation(fields)) => {
            let names: Vec<&str> = fields.iter().map(|f| f.field).collect();
            assert_eq!(names, vec!["disease", "description"]);
        }
        other => panic!("expected Validation, got {other:?}"),
    }
}

// ── Vet dashboard rollup ─────────────────────────────────────────────────────

#[tokio::test]
async fn should_return_empty_rollup_when_no_recent_prescriptions() {
    let usecase = VetDashboardUseCase {
        meds: MockMedicationRepo::empty(),
        health: MockHealthRepo::empty(),
    };
    let rollups = usecase.execute(Uuid::now_v7()).await.unwrap();
    assert!(rollups.is_empty());
}

#[tokio::test]
async fn should_group_prescriptions_by_tag_with_latest_first() {
    let vet = Uuid::now_v7();
    let now = Utc::now();
    let meds = vec![
        test_medication("COW-17", vet, now - Duration::days(10)),
        test_medication("COW-17", vet, now - Duration::days(1)),
        test_medication("GOAT-3", vet, now - Duration::days(5)),
        // Outside the 30-day window; must not appear.
        test_medication("SHEEP-8", vet, now - Duration::days(40)),
    ];
    let latest_cow_id = meds[1].id;

    let usecase = VetDashboardUseCase {
        meds: MockMedicationRepo::new(meds),
        health: MockHealthRepo::empty(),
    };
    let rollups = usecase.execute(vet).await.unwrap();

    assert_eq!(rollups.len(), 2);
    // Most recently treated animal leads.
    assert_eq!(rollups[0].tag_id, "COW-17");
    assert_eq!(rollups[0].medication_count, 2);
    assert_eq!(rollups[0].latest_medication.id, latest_cow_id);
    assert_eq!(rollups[0].treatment_dates.len(), 2);
    assert_eq!(rollups[1].tag_id, "GOAT-3");
    assert_eq!(rollups[1].medication_count, 1);
}

#[tokio::test]
async fn should_join_only_todays_health_records() {
    let vet = Uuid::now_v7();
    let now = Utc::now();
    let meds = vec![test_medication("COW-17", vet, now - Duration::days(1))];
    let health = vec![
        test_health_record("COW-17", RiskLevel::High, now),
        test_health_record("COW-17", RiskLevel::Low, now - Duration::days(3)),
    ];

    let usecase = VetDashboardUseCase {
        meds: MockMedicationRepo::new(meds),
        health: MockHealthRepo::new(health),
    };
    let rollups = usecase.execute(vet).await.unwrap();

    assert_eq!(rollups.len(), 1);
    assert_eq!(rollups[0].health_records.len(), 1);
    assert_eq!(rollups[0].health_records[0].risk_level, RiskLevel::High);
}

#[tokio::test]
async fn should_not_see_other_vets_prescriptions() {
    let vet = Uuid::now_v7();
    let other_vet = Uuid::now_v7();
    let meds = vec![test_medication("COW-17", other_vet, Utc::now())];

    let usecase = VetDashboardUseCase {
        meds: MockMedicationRepo::new(meds),
        health: MockHealthRepo::empty(),
    };
    let rollups = usecase.execute(vet).await.unwrap();
    assert!(rollups.is_empty());
}

// ── Treatment history ────────────────────────────────────────────────────────

#[tokio::test]
async fn should_return_404_when_tag_has_no_medications() {
    let usecase = TreatmentHistoryUseCase {
        meds: MockMedicationRepo::empty(),
        health: MockHealthRepo::empty(),
    };
    let result = usecase.execute("GHOST-1").await;
    assert!(matches!(result, Err(ApiError::NoMedicationRecords(tag)) if tag == "GHOST-1"));
}

#[tokio::test]
async fn should_fetch_health_records_since_latest_treatment() {
    let vet = Uuid::now_v7();
    let now = Utc::now();
    let latest_treatment = now - Duration::days(2);
    let meds = vec![
        test_medication("COW-17", vet, now - Duration::days(20)),
        test_medication("COW-17", vet, latest_treatment),
    ];
    let health = vec![
        // Before the latest treatment; excluded.
        test_health_record("COW-17", RiskLevel::High, now - Duration::days(10)),
        test_health_record("COW-17", RiskLevel::Medium, now - Duration::days(1)),
        test_health_record("COW-17", RiskLevel::Low, now),
    ];

    let usecase = TreatmentHistoryUseCase {
        meds: MockMedicationRepo::new(meds),
        health: MockHealthRepo::new(health),
    };
    let history = usecase.execute("COW-17").await.unwrap();

    assert_eq!(history.medication_count, 2);
    assert_eq!(history.latest_treatment_date, latest_treatment);
    assert_eq!(history.health_records.len(), 2);
    assert_eq!(history.total_health_record_days, 2);
    // Most recent first.
    assert_eq!(history.health_records[0].risk_level, RiskLevel::Low);
    assert_eq!(history.medication_records[0].created_at, latest_treatment);
}

// ── Health records for a tag ─────────────────────────────────────────────────

#[tokio::test]
async fn should_list_health_records_most_recent_first() {
    let now = Utc::now();
    let health = vec![
        test_health_record("COW-17", RiskLevel::Low, now - Duration::days(2)),
        test_health_record("COW-17", RiskLevel::High, now),
        test_health_record("GOAT-3", RiskLevel::Medium, now),
    ];

    let usecase = HealthRecordsUseCase {
        health: MockHealthRepo::new(health),
    };
    let records = usecase.execute("COW-17").await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].risk_level, RiskLevel::High);
    assert_eq!(records[1].risk_level, RiskLevel::Low);
}

#[tokio::test]
async fn should_return_empty_list_for_tag_with_no_records() {
    let usecase = HealthRecordsUseCase {
        health: MockHealthRepo::empty(),
    };
    let records = usecase.execute("GHOST-1").await.unwrap();
    assert!(records.is_empty());
}
