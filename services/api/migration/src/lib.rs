use sea_orm_migration::prelude::*;

mod m20260806_000001_create_users;
mod m20260806_000002_create_animals;
mod m20260806_000003_create_attendance_logs;
mod m20260806_000004_create_medications;
mod m20260806_000005_create_health_records;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260806_000001_create_users::Migration),
            Box::new(m20260806_000002_create_animals::Migration),
            Box::new(m20260806_000003_create_attendance_logs::Migration),
            Box::new(m20260806_000004_create_medications::Migration),
            Box::new(m20260806_000005_create_health_records::Migration),
        ]
    }
}
