//! Cafe database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::{Cafe, EntityKind, SoftDeleteState};

use crate::repository::soft_delete::SoftDeleteEntity;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "cafes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub region_id: i32,
    pub crawl_id: Option<String>,
    pub is_crawled: bool,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub wordcloud: Option<String>,
    pub address: String,
    pub study_friendly: bool,
    pub phone: String,
    pub latitude: String,
    pub longitude: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub deleted_at: Option<DateTimeUtc>,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::region::Entity",
        from = "Column::RegionId",
        to = "super::region::Column::Id",
        on_delete = "Cascade"
    )]
    Region,
    #[sea_orm(has_many = "super::review::Entity")]
    Reviews,
    #[sea_orm(has_many = "super::cafe_like::Entity")]
    Likes,
}

impl Related<super::region::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Region.def()
    }
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl Related<super::cafe_like::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Likes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl SoftDeleteEntity for Entity {
    const KIND: EntityKind = EntityKind::Cafe;
    const IS_ACTIVE: Column = Column::IsActive;
    const DELETED_AT: Column = Column::DeletedAt;
    const UPDATED_AT: Column = Column::UpdatedAt;
}

impl From<Model> for Cafe {
    fn from(model: Model) -> Self {
        Cafe {
            id: model.id,
            region_id: model.region_id,
            crawl_id: model.crawl_id,
            is_crawled: model.is_crawled,
            name: model.name,
            wordcloud: model.wordcloud,
            address: model.address,
            study_friendly: model.study_friendly,
            phone: model.phone,
            latitude: model.latitude,
            longitude: model.longitude,
            created_at: model.created_at,
            lifecycle: SoftDeleteState {
                is_active: model.is_active,
                deleted_at: model.deleted_at,
                updated_at: model.updated_at,
            },
        }
    }
}
