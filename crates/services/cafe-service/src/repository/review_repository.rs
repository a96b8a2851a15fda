//! Review repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::review::{self, ActiveModel, Entity as ReviewEntity};
use super::entities::{CafeEntity, UserEntity};
use super::soft_delete::{SoftDeleteEntity, SoftDeleteStore, Transitioned};
use common::{AppError, AppResult};
use domain::{CreateReview, DomainError, Review, Scope, UpdateReview};
use validator::Validate;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Review repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn find_by_id(&self, id: i64, scope: Scope) -> AppResult<Option<Review>>;

    async fn list(&self, scope: Scope) -> AppResult<Vec<Review>>;

    /// Reviews of one cafe, oldest first
    async fn list_by_cafe(&self, cafe_id: i32, scope: Scope) -> AppResult<Vec<Review>>;

    /// Number of reviews of one cafe
    async fn count_by_cafe(&self, cafe_id: i32, scope: Scope) -> AppResult<u64>;

    /// Reviews written by one user, oldest first
    async fn list_by_user(&self, user_id: Uuid, scope: Scope) -> AppResult<Vec<Review>>;

    async fn create(&self, input: CreateReview) -> AppResult<Review>;

    /// Replace the body of an active review
    async fn update(&self, id: i64, input: UpdateReview) -> AppResult<Review>;

    /// Soft delete a review and its likes
    async fn delete(&self, id: i64) -> AppResult<Transitioned<Review>>;

    /// Restore a review and its likes
    async fn restore(&self, id: i64) -> AppResult<Transitioned<Review>>;

    async fn hard_delete(&self, id: i64) -> AppResult<()>;
}

pub struct ReviewStore {
    db: DatabaseConnection,
}

impl ReviewStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn lifecycle(&self) -> SoftDeleteStore<'_, ReviewEntity, DatabaseConnection> {
        SoftDeleteStore::new(&self.db)
    }

    async fn list_where(&self, condition: Condition, scope: Scope) -> AppResult<Vec<Review>> {
        let models = ReviewEntity::scoped(scope)
            .filter(condition)
            .order_by_asc(review::Column::CreatedAt)
            .order_by_asc(review::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Review::from).collect())
    }
}

#[async_trait]
impl ReviewRepository for ReviewStore {
    async fn find_by_id(&self, id: i64, scope: Scope) -> AppResult<Option<Review>> {
        let result = self.lifecycle().find(id, scope).await?;
        Ok(result.map(Review::from))
    }

    async fn list(&self, scope: Scope) -> AppResult<Vec<Review>> {
        let models = self.lifecycle().list(scope).await?;
        Ok(models.into_iter().map(Review::from).collect())
    }

    async fn list_by_cafe(&self, cafe_id: i32, scope: Scope) -> AppResult<Vec<Review>> {
        self.list_where(
            Condition::all().add(review::Column::CafeId.eq(cafe_id)),
            scope,
        )
        .await
    }

    async fn count_by_cafe(&self, cafe_id: i32, scope: Scope) -> AppResult<u64> {
        ReviewEntity::scoped(scope)
            .filter(review::Column::CafeId.eq(cafe_id))
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }

    async fn list_by_user(&self, user_id: Uuid, scope: Scope) -> AppResult<Vec<Review>> {
        self.list_where(
            Condition::all().add(review::Column::UserId.eq(user_id)),
            scope,
        )
        .await
    }

    async fn create(&self, input: CreateReview) -> AppResult<Review> {
        input.validate().map_err(DomainError::from)?;

        SoftDeleteStore::<CafeEntity, _>::new(&self.db)
            .find(input.cafe_id, Scope::Active)
            .await?
            .ok_or_else(|| AppError::validation(format!("Cafe {} does not exist", input.cafe_id)))?;

        if let Some(user_id) = input.user_id {
            SoftDeleteStore::<UserEntity, _>::new(&self.db)
                .find(user_id, Scope::Active)
                .await?
                .ok_or_else(|| AppError::validation(format!("User {} does not exist", user_id)))?;
        }

        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: NotSet,
            user_id: Set(input.user_id),
            cafe_id: Set(input.cafe_id),
            body: Set(input.body),
            crawled: Set(input.crawled),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            is_active: Set(true),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Review::from(model))
    }

    async fn update(&self, id: i64, input: UpdateReview) -> AppResult<Review> {
        input.validate().map_err(DomainError::from)?;

        let review = self.lifecycle().get(id, Scope::Active).await?;
        let mut active: ActiveModel = review.into();
        active.body = Set(input.body);
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Review::from(model))
    }

    async fn delete(&self, id: i64) -> AppResult<Transitioned<Review>> {
        let outcome = self.lifecycle().delete(id).await?;
        Ok(outcome.map(Review::from))
    }

    async fn restore(&self, id: i64) -> AppResult<Transitioned<Review>> {
        let outcome = self.lifecycle().restore(id).await?;
        Ok(outcome.map(Review::from))
    }

    async fn hard_delete(&self, id: i64) -> AppResult<()> {
        self.lifecycle().hard_delete(id).await
    }
}
