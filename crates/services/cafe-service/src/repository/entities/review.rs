//! Review database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::{EntityKind, Review, SoftDeleteState};

use crate::repository::soft_delete::SoftDeleteEntity;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Nulled when the author is hard deleted
    pub user_id: Option<Uuid>,
    pub cafe_id: i32,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub crawled: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub deleted_at: Option<DateTimeUtc>,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "SetNull"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::cafe::Entity",
        from = "Column::CafeId",
        to = "super::cafe::Column::Id",
        on_delete = "Cascade"
    )]
    Cafe,
    #[sea_orm(has_many = "super::review_like::Entity")]
    Likes,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::cafe::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cafe.def()
    }
}

impl Related<super::review_like::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Likes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl SoftDeleteEntity for Entity {
    const KIND: EntityKind = EntityKind::Review;
    const IS_ACTIVE: Column = Column::IsActive;
    const DELETED_AT: Column = Column::DeletedAt;
    const UPDATED_AT: Column = Column::UpdatedAt;
}

impl From<Model> for Review {
    fn from(model: Model) -> Self {
        Review {
            id: model.id,
            user_id: model.user_id,
            cafe_id: model.cafe_id,
            body: model.body,
            crawled: model.crawled,
            created_at: model.created_at,
            lifecycle: SoftDeleteState {
                is_active: model.is_active,
                deleted_at: model.deleted_at,
                updated_at: model.updated_at,
            },
        }
    }
}
