//! Review like database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::{EntityKind, ReviewLike, SoftDeleteState};

use crate::repository::soft_delete::SoftDeleteEntity;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "review_likes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub review_id: i64,
    pub user_id: Uuid,
    pub liked_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub deleted_at: Option<DateTimeUtc>,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::review::Entity",
        from = "Column::ReviewId",
        to = "super::review::Column::Id",
        on_delete = "Cascade"
    )]
    Review,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Review.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl SoftDeleteEntity for Entity {
    const KIND: EntityKind = EntityKind::ReviewLike;
    const IS_ACTIVE: Column = Column::IsActive;
    const DELETED_AT: Column = Column::DeletedAt;
    const UPDATED_AT: Column = Column::UpdatedAt;
}

impl From<Model> for ReviewLike {
    fn from(model: Model) -> Self {
        ReviewLike {
            id: model.id,
            review_id: model.review_id,
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
