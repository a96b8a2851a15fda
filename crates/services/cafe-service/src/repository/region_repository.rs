//! Region repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, QueryFilter, QueryOrder, QuerySelect,
    Select, Set,
};

use super::entities::region::{self, ActiveModel, Entity as RegionEntity};
use super::soft_delete::{SoftDeleteEntity, SoftDeleteStore, Transitioned};
use common::{AppError, AppResult, Paginated, PaginationParams};
use domain::{Area, CreateRegion, DomainError, Region, Scope, UpdateRegion};
use validator::Validate;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Region repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RegionRepository: Send + Sync {
    async fn find_by_id(&self, id: i32, scope: Scope) -> AppResult<Option<Region>>;

    async fn list(&self, scope: Scope) -> AppResult<Vec<Region>>;

    async fn list_paginated(
        &self,
        scope: Scope,
        params: PaginationParams,
    ) -> AppResult<Paginated<Region>>;

    /// Create a region with a caller-assigned code
    async fn create(&self, input: CreateRegion) -> AppResult<Region>;

    /// Rename parts of an active region
    async fn update(&self, id: i32, input: UpdateRegion) -> AppResult<Region>;

    /// Distinct cities among active regions
    async fn cities(&self) -> AppResult<Vec<Area>>;

    /// Distinct counties of a city among active regions
    async fn counties(&self, city_code: i32) -> AppResult<Vec<Area>>;

    /// Towns of a county among active regions
    async fn towns(&self, county_code: i32) -> AppResult<Vec<Area>>;

    /// Soft delete a region and its cafes
    async fn delete(&self, id: i32) -> AppResult<Transitioned<Region>>;

    /// Restore a region and its cafes
    async fn restore(&self, id: i32) -> AppResult<Transitioned<Region>>;

    async fn hard_delete(&self, id: i32) -> AppResult<()>;
}

pub struct RegionStore {
    db: DatabaseConnection,
}

impl RegionStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn lifecycle(&self) -> SoftDeleteStore<'_, RegionEntity, DatabaseConnection> {
        SoftDeleteStore::new(&self.db)
    }

    async fn areas(
        &self,
        query: Select<RegionEntity>,
        code: region::Column,
        name: region::Column,
    ) -> AppResult<Vec<Area>> {
        let rows: Vec<(i32, String)> = query
            .select_only()
            .column(code)
            .column(name)
            .distinct()
            .order_by_asc(code)
            .into_tuple()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(code, name)| Area { code, name })
            .collect())
    }
}

#[async_trait]
impl RegionRepository for RegionStore {
    async fn find_by_id(&self, id: i32, scope: Scope) -> AppResult<Option<Region>> {
        let result = self.lifecycle().find(id, scope).await?;
        Ok(result.map(Region::from))
    }

    async fn list(&self, scope: Scope) -> AppResult<Vec<Region>> {
        let models = self.lifecycle().list(scope).await?;
        Ok(models.into_iter().map(Region::from).collect())
    }

    async fn list_paginated(
        &self,
        scope: Scope,
        params: PaginationParams,
    ) -> AppResult<Paginated<Region>> {
        let page = self.lifecycle().paginate(scope, &params).await?;
        Ok(page.map(Region::from))
    }

    async fn create(&self, input: CreateRegion) -> AppResult<Region> {
        input.validate().map_err(DomainError::from)?;

        if self.lifecycle().find(input.id, Scope::All).await?.is_some() {
            return Err(AppError::conflict("Region"));
        }

        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(input.id),
            city_code: Set(input.city_code),
            city_name: Set(input.city_name),
            county_code: Set(input.county_code),
            county_name: Set(input.county_name),
            town_code: Set(input.town_code),
            town_name: Set(input.town_name),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            is_active: Set(true),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Region::from(model))
    }

    async fn update(&self, id: i32, input: UpdateRegion) -> AppResult<Region> {
        input.validate().map_err(DomainError::from)?;

        let region = self.lifecycle().get(id, Scope::Active).await?;
        let mut active: ActiveModel = region.into();

        if let Some(city_name) = input.city_name {
            active.city_name = Set(city_name);
        }
        if let Some(county_name) = input.county_name {
            active.county_name = Set(county_name);
        }
        if let Some(town_name) = input.town_name {
            active.town_name = Set(town_name);
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Region::from(model))
    }

    async fn cities(&self) -> AppResult<Vec<Area>> {
        self.areas(
            RegionEntity::active(),
            region::Column::CityCode,
            region::Column::CityName,
        )
        .await
    }

    async fn counties(&self, city_code: i32) -> AppResult<Vec<Area>> {
        self.areas(
            RegionEntity::active().filter(region::Column::CityCode.eq(city_code)),
            region::Column::CountyCode,
            region::Column::CountyName,
        )
        .await
    }

    async fn towns(&self, county_code: i32) -> AppResult<Vec<Area>> {
        self.areas(
            RegionEntity::active().filter(region::Column::CountyCode.eq(county_code)),
            region::Column::TownCode,
            region::Column::TownName,
        )
        .await
    }

    async fn delete(&self, id: i32) -> AppResult<Transitioned<Region>> {
        let outcome = self.lifecycle().delete(id).await?;
        Ok(outcome.map(Region::from))
    }

    async fn restore(&self, id: i32) -> AppResult<Transitioned<Region>> {
        let outcome = self.lifecycle().restore(id).await?;
        Ok(outcome.map(Region::from))
    }

    async fn hard_delete(&self, id: i32) -> AppResult<()> {
        self.lifecycle().hard_delete(id).await
    }
}
