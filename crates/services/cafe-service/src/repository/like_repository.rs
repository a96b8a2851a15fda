//! Cafe and review like repository.
//!
//! A user likes a given cafe or review at most once. Liking again after the
//! like was soft deleted reactivates the existing row.

use async_trait::async_trait;
use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use super::entities::cafe_like::{self, Entity as CafeLikeEntity};
use super::entities::review_like::{self, Entity as ReviewLikeEntity};
use super::entities::{CafeEntity, ReviewEntity, UserEntity};
use super::soft_delete::{SoftDeleteEntity, SoftDeleteStore, Transitioned};
use common::{AppError, AppResult};
use domain::{CafeLike, ReviewLike, Scope};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Like repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait LikeRepository: Send + Sync {
    async fn find_cafe_like(&self, id: i64, scope: Scope) -> AppResult<Option<CafeLike>>;

    /// Likes of one cafe
    async fn cafe_likes(&self, cafe_id: i32, scope: Scope) -> AppResult<Vec<CafeLike>>;

    /// Number of likes of one cafe
    async fn count_cafe_likes(&self, cafe_id: i32, scope: Scope) -> AppResult<u64>;

    /// Record that a user likes a cafe
    async fn like_cafe(&self, cafe_id: i32, user_id: Uuid) -> AppResult<CafeLike>;

    async fn delete_cafe_like(&self, id: i64) -> AppResult<Transitioned<CafeLike>>;

    async fn restore_cafe_like(&self, id: i64) -> AppResult<Transitioned<CafeLike>>;

    async fn hard_delete_cafe_like(&self, id: i64) -> AppResult<()>;

    async fn find_review_like(&self, id: i64, scope: Scope) -> AppResult<Option<ReviewLike>>;

    /// Likes of one review
    async fn review_likes(&self, review_id: i64, scope: Scope) -> AppResult<Vec<ReviewLike>>;

    /// Like counts keyed by review; reviews without likes are absent
    async fn review_like_counts(
        &self,
        review_ids: Vec<i64>,
        scope: Scope,
    ) -> AppResult<HashMap<i64, u64>>;

    /// Record that a user likes a review
    async fn like_review(&self, review_id: i64, user_id: Uuid) -> AppResult<ReviewLike>;

    async fn delete_review_like(&self, id: i64) -> AppResult<Transitioned<ReviewLike>>;

    async fn restore_review_like(&self, id: i64) -> AppResult<Transitioned<ReviewLike>>;

    async fn hard_delete_review_like(&self, id: i64) -> AppResult<()>;
}

pub struct LikeStore {
    db: DatabaseConnection,
}

impl LikeStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn cafe_like_lifecycle(&self) -> SoftDeleteStore<'_, CafeLikeEntity, DatabaseConnection> {
        SoftDeleteStore::new(&self.db)
    }

    fn review_like_lifecycle(&self) -> SoftDeleteStore<'_, ReviewLikeEntity, DatabaseConnection> {
        SoftDeleteStore::new(&self.db)
    }

    async fn ensure_active_user(&self, user_id: Uuid) -> AppResult<()> {
        SoftDeleteStore::<UserEntity, _>::new(&self.db)
            .find(user_id, Scope::Active)
            .await?
            .ok_or_else(|| AppError::validation(format!("User {} does not exist", user_id)))?;
        Ok(())
    }
}

#[async_trait]
impl LikeRepository for LikeStore {
    async fn find_cafe_like(&self, id: i64, scope: Scope) -> AppResult<Option<CafeLike>> {
        let result = self.cafe_like_lifecycle().find(id, scope).await?;
        Ok(result.map(CafeLike::from))
    }

    async fn cafe_likes(&self, cafe_id: i32, scope: Scope) -> AppResult<Vec<CafeLike>> {
        let models = CafeLikeEntity::scoped(scope)
            .filter(cafe_like::Column::CafeId.eq(cafe_id))
            .order_by_asc(cafe_like::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(CafeLike::from).collect())
    }

    async fn count_cafe_likes(&self, cafe_id: i32, scope: Scope) -> AppResult<u64> {
        CafeLikeEntity::scoped(scope)
            .filter(cafe_like::Column::CafeId.eq(cafe_id))
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }

    async fn like_cafe(&self, cafe_id: i32, user_id: Uuid) -> AppResult<CafeLike> {
        SoftDeleteStore::<CafeEntity, _>::new(&self.db)
            .find(cafe_id, Scope::Active)
            .await?
            .ok_or_else(|| AppError::validation(format!("Cafe {} does not exist", cafe_id)))?;
        self.ensure_active_user(user_id).await?;

        let existing = CafeLikeEntity::find()
            .filter(cafe_like::Column::CafeId.eq(cafe_id))
            .filter(cafe_like::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;

        match existing {
            Some(like) if like.is_active => Err(AppError::conflict("Cafe like")),
            Some(like) => {
                let outcome = self.cafe_like_lifecycle().restore(like.id).await?;
                Ok(CafeLike::from(outcome.record))
            }
            None => {
                let now = chrono::Utc::now();
                let active_model = cafe_like::ActiveModel {
                    id: NotSet,
                    cafe_id: Set(cafe_id),
                    user_id: Set(user_id),
                    liked_at: Set(now),
                    updated_at: Set(now),
                    deleted_at: Set(None),
                    is_active: Set(true),
                };
                let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
                Ok(CafeLike::from(model))
            }
        }
    }

    async fn delete_cafe_like(&self, id: i64) -> AppResult<Transitioned<CafeLike>> {
        let outcome = self.cafe_like_lifecycle().delete(id).await?;
        Ok(outcome.map(CafeLike::from))
    }

    async fn restore_cafe_like(&self, id: i64) -> AppResult<Transitioned<CafeLike>> {
        let outcome = self.cafe_like_lifecycle().restore(id).await?;
        Ok(outcome.map(CafeLike::from))
    }

    async fn hard_delete_cafe_like(&self, id: i64) -> AppResult<()> {
        self.cafe_like_lifecycle().hard_delete(id).await
    }

    async fn find_review_like(&self, id: i64, scope: Scope) -> AppResult<Option<ReviewLike>> {
        let result = self.review_like_lifecycle().find(id, scope).await?;
        Ok(result.map(ReviewLike::from))
    }

    async fn review_likes(&self, review_id: i64, scope: Scope) -> AppResult<Vec<ReviewLike>> {
        let models = ReviewLikeEntity::scoped(scope)
            .filter(review_like::Column::ReviewId.eq(review_id))
            .order_by_asc(review_like::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(ReviewLike::from).collect())
    }

    async fn review_like_counts(
        &self,
        review_ids: Vec<i64>,
        scope: Scope,
    ) -> AppResult<HashMap<i64, u64>> {
        if review_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(i64, i64)> = ReviewLikeEntity::scoped(scope)
            .select_only()
            .column(review_like::Column::ReviewId)
            .column_as(review_like::Column::Id.count(), "likes")
            .filter(review_like::Column::ReviewId.is_in(review_ids))
            .group_by(review_like::Column::ReviewId)
            .into_tuple()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(review_id, likes)| (review_id, likes as u64))
            .collect())
    }

    async fn like_review(&self, review_id: i64, user_id: Uuid) -> AppResult<ReviewLike> {
        SoftDeleteStore::<ReviewEntity, _>::new(&self.db)
            .find(review_id, Scope::Active)
            .await?
            .ok_or_else(|| AppError::validation(format!("Review {} does not exist", review_id)))?;
        self.ensure_active_user(user_id).await?;

        let existing = ReviewLikeEntity::find()
            .filter(review_like::Column::ReviewId.eq(review_id))
            .filter(review_like::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;

        match existing {
            Some(like) if like.is_active => Err(AppError::conflict("Review like")),
            Some(like) => {
                let outcome = self.review_like_lifecycle().restore(like.id).await?;
                Ok(ReviewLike::from(outcome.record))
            }
            None => {
                let now = chrono::Utc::now();
                let active_model = review_like::ActiveModel {
                    id: NotSet,
                    review_id: Set(review_id),
                    user_id: Set(user_id),
                    liked_at: Set(now),
                    updated_at: Set(now),
                    deleted_at: Set(None),
                    is_active: Set(true),
                };
                let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
                Ok(ReviewLike::from(model))
            }
        }
    }

    async fn delete_review_like(&self, id: i64) -> AppResult<Transitioned<ReviewLike>> {
        let outcome = self.review_like_lifecycle().delete(id).await?;
        Ok(outcome.map(ReviewLike::from))
    }

    async fn restore_review_like(&self, id: i64) -> AppResult<Transitioned<ReviewLike>> {
        let outcome = self.review_like_lifecycle().restore(id).await?;
        Ok(outcome.map(ReviewLike::from))
    }

    async fn hard_delete_review_like(&self, id: i64) -> AppResult<()> {
        self.review_like_lifecycle().hard_delete(id).await
    }
}
