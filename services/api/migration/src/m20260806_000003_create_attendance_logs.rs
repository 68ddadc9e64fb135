use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AttendanceLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AttendanceLogs::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AttendanceLogs::AnimalId).uuid().not_null())
                    .col(
                        ColumnDef::new(AttendanceLogs::LoggedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AttendanceLogs::Table, AttendanceLogs::AnimalId)
                            .to(Animals::Table, Animals::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_attendance_logs_animal_logged_at")
                    .table(AttendanceLogs::Table)
                    .col(AttendanceLogs::AnimalId)
                    .col(AttendanceLogs::LoggedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AttendanceLogs::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum AttendanceLogs {
    Table,
    Id,
    AnimalId,
    LoggedAt,
}

#[derive(Iden)]
enum Animals {
    Table,
    Id,
}
