//! Cafe like database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::{CafeLike, EntityKind, SoftDeleteState};

use crate::repository::soft_delete::SoftDeleteEntity;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "cafe_likes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub cafe_id: i32,
    pub user_id: Uuid,
    pub liked_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub deleted_at: Option<DateTimeUtc>,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::cafe::Entity",
        from = "Column::CafeId",
        to = "super::cafe::Column::Id",
        on_delete = "Cascade"
    )]
    Cafe,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::cafe::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cafe.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl SoftDeleteEntity for Entity {
    const KIND: EntityKind = EntityKind::CafeLike;
    const IS_ACTIVE: Column = Column::IsActive;
    const DELETED_AT: Column = Column::DeletedAt;
    const UPDATED_AT: Column = Column::UpdatedAt;
}

impl From<Model> for CafeLike {
    fn from(model: Model) -> Self {
        CafeLike {
            id: model.id,
            cafe_id: model.cafe_id,
            user_id: model.user_id,
            liked_at: model.liked_at,
            lifecycle: SoftDeleteState {
                is_active: model.is_active,
                deleted_at: model.deleted_at,
                updated_at: model.updated_at,
            },
        }
    }
}
