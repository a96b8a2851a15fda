//! Cafe repository.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, QueryFilter, QueryOrder, Set};

use super::entities::cafe::{self, ActiveModel, Entity as CafeEntity};
use super::entities::RegionEntity;
use super::soft_delete::{SoftDeleteEntity, SoftDeleteStore, Transitioned};
use common::{AppError, AppResult, Paginated, PaginationParams};
use domain::{Cafe, CreateCafe, DomainError, Scope, UpdateCafe};
use validator::Validate;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Cafe repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CafeRepository: Send + Sync {
    async fn find_by_id(&self, id: i32, scope: Scope) -> AppResult<Option<Cafe>>;

    async fn list(&self, scope: Scope) -> AppResult<Vec<Cafe>>;

    async fn list_paginated(
        &self,
        scope: Scope,
        params: PaginationParams,
    ) -> AppResult<Paginated<Cafe>>;

    /// Cafes located in a region
    async fn list_by_region(&self, region_id: i32, scope: Scope) -> AppResult<Vec<Cafe>>;

    /// Create a cafe in an active region
    async fn create(&self, input: CreateCafe) -> AppResult<Cafe>;

    /// Update an active cafe
    async fn update(&self, id: i32, input: UpdateCafe) -> AppResult<Cafe>;

    /// Soft delete a cafe along with its reviews and likes
    async fn delete(&self, id: i32) -> AppResult<Transitioned<Cafe>>;

    /// Restore a cafe along with its reviews and likes
    async fn restore(&self, id: i32) -> AppResult<Transitioned<Cafe>>;

    async fn hard_delete(&self, id: i32) -> AppResult<()>;
}

pub struct CafeStore {
    db: DatabaseConnection,
}

impl CafeStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn lifecycle(&self) -> SoftDeleteStore<'_, CafeEntity, DatabaseConnection> {
        SoftDeleteStore::new(&self.db)
    }
}

#[async_trait]
impl CafeRepository for CafeStore {
    async fn find_by_id(&self, id: i32, scope: Scope) -> AppResult<Option<Cafe>> {
        let result = self.lifecycle().find(id, scope).await?;
        Ok(result.map(Cafe::from))
    }

    async fn list(&self, scope: Scope) -> AppResult<Vec<Cafe>> {
        let models = self.lifecycle().list(scope).await?;
        Ok(models.into_iter().map(Cafe::from).collect())
    }

    async fn list_paginated(
        &self,
        scope: Scope,
        params: PaginationParams,
    ) -> AppResult<Paginated<Cafe>> {
        let page = self.lifecycle().paginate(scope, &params).await?;
        Ok(page.map(Cafe::from))
    }

    async fn list_by_region(&self, region_id: i32, scope: Scope) -> AppResult<Vec<Cafe>> {
        let models = CafeEntity::scoped(scope)
            .filter(cafe::Column::RegionId.eq(region_id))
            .order_by_asc(cafe::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Cafe::from).collect())
    }

    async fn create(&self, input: CreateCafe) -> AppResult<Cafe> {
        input.validate().map_err(DomainError::from)?;

        if self.lifecycle().find(input.id, Scope::All).await?.is_some() {
            return Err(AppError::conflict("Cafe"));
        }

        // New cafes may only be attached to a visible region
        SoftDeleteStore::<RegionEntity, _>::new(&self.db)
            .find(input.region_id, Scope::Active)
            .await?
            .ok_or_else(|| {
                AppError::validation(format!("Region {} does not exist", input.region_id))
            })?;

        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(input.id),
            region_id: Set(input.region_id),
            is_crawled: Set(input.crawl_id.is_some()),
            crawl_id: Set(input.crawl_id),
            name: Set(input.name),
            wordcloud: Set(None),
            address: Set(input.address),
            study_friendly: Set(input.study_friendly),
            phone: Set(input.phone),
            latitude: Set(input.latitude),
            longitude: Set(input.longitude),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            is_active: Set(true),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Cafe::from(model))
    }

    async fn update(&self, id: i32, input: UpdateCafe) -> AppResult<Cafe> {
        input.validate().map_err(DomainError::from)?;

        let cafe = self.lifecycle().get(id, Scope::Active).await?;
        let mut active: ActiveModel = cafe.into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(address) = input.address {
            active.address = Set(address);
        }
        if let Some(study_friendly) = input.study_friendly {
            active.study_friendly = Set(study_friendly);
        }
        if let Some(phone) = input.phone {
            active.phone = Set(phone);
        }
        if let Some(is_crawled) = input.is_crawled {
            active.is_crawled = Set(is_crawled);
        }
        if let Some(wordcloud) = input.wordcloud {
            active.wordcloud = Set(Some(wordcloud));
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Cafe::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<Transitioned<Cafe>> {
        let outcome = self.lifecycle().delete(id).await?;
        Ok(outcome.map(Cafe::from))
    }

    async fn restore(&self, id: i32) -> AppResult<Transitioned<Cafe>> {
        let outcome = self.lifecycle().restore(id).await?;
        Ok(outcome.map(Cafe::from))
    }

    async fn hard_delete(&self, id: i32) -> AppResult<()> {
        self.lifecycle().hard_delete(id).await
    }
}
