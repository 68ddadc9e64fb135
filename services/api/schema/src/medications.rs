use sea_orm::entity::prelude::*;

/// Prescription event recorded by a vet. Immutable once created. Joins to
/// animals by `tag_id` equality, not by foreign key — a record may reference
/// a tag with no animal row.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "medications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tag_id: String,
    pub prescribed_by: Uuid,
    pub disease: String,
    pub description: String,
    pub solution: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::PrescribedBy",
        to = "super::users::Column::Id"
    )]
    Prescriber,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Prescriber.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
