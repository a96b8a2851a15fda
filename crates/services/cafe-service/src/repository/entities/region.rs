//! Region database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::{EntityKind, Region, SoftDeleteState};

use crate::repository::soft_delete::SoftDeleteEntity;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "regions")]
pub struct Model {
    /// Region code is used as the primary key
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub city_code: i32,
    pub city_name: String,
    pub county_code: i32,
    pub county_name: String,
    pub town_code: i32,
    pub town_name: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub deleted_at: Option<DateTimeUtc>,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::cafe::Entity")]
    Cafes,
}

impl Related<super::cafe::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cafes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl SoftDeleteEntity for Entity {
    const KIND: EntityKind = EntityKind::Region;
    const IS_ACTIVE: Column = Column::IsActive;
    const DELETED_AT: Column = Column::DeletedAt;
    const UPDATED_AT: Column = Column::UpdatedAt;
}

impl From<Model> for Region {
    fn from(model: Model) -> Self {
        Region {
            id: model.id,
            city_code: model.city_code,
            city_name: model.city_name,
            county_code: model.county_code,
            county_name: model.county_name,
            town_code: model.town_code,
            town_name: model.town_name,
            created_at: model.created_at,
            lifecycle: SoftDeleteState {
                is_active: model.is_active,
                deleted_at: model.deleted_at,
                updated_at: model.updated_at,
            },
        }
    }
}
