use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // tag_id is intentionally NOT a foreign key — medication records join
        // to animals by tag equality and may reference tags with no animal row.
        manager
            .create_table(
                Table::create()
                    .table(Medications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Medications::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Medications::TagId).string().not_null())
                    .col(ColumnDef::new(Medications::PrescribedBy).uuid().not_null())
                    .col(ColumnDef::new(Medications::Disease).string().not_null())
                    .col(ColumnDef::new(Medications::Description).string().not_null())
                    .col(ColumnDef::new(Medications::Solution).string().not_null())
                    .col(
                        ColumnDef::new(Medications::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Medications::Table, Medications::PrescribedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_medications_prescriber_created_at")
                    .table(Medications::Table)
                    .col(Medications::PrescribedBy)
                    .col(Medications::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_medications_tag_created_at")
                    .table(Medications::Table)
                    .col(Medications::TagId)
                    .col(Medications::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Medications::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Medications {
    Table,
    Id,
    TagId,
    PrescribedBy,
    Disease,
    Description,
    Solution,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
