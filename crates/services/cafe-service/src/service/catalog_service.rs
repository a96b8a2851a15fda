//! Catalog service - read-side use cases for the cafe catalog.
//!
//! Everything here is visitor facing, so every lookup runs under
//! `Scope::Active` and a soft-deleted record is reported as not found.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

use common::{AppResult, OptionExt, Paginated, PaginationParams};
use domain::{Area, Cafe, Region, Review, Scope};

use crate::infra::UnitOfWork;

/// A cafe together with its region and activity counts
#[derive(Debug, Clone, Serialize)]
pub struct CafeDetail {
    pub cafe: Cafe,
    pub region: Region,
    pub like_count: u64,
    pub review_count: u64,
}

/// A review with the number of active likes it has
#[derive(Debug, Clone, Serialize)]
pub struct ReviewEntry {
    pub review: Review,
    pub like_count: u64,
}

/// Catalog service trait for dependency injection.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Cities that have at least one active region
    async fn cities(&self) -> AppResult<Vec<Area>>;

    async fn counties(&self, city_code: i32) -> AppResult<Vec<Area>>;

    async fn towns(&self, county_code: i32) -> AppResult<Vec<Area>>;

    async fn get_region(&self, id: i32) -> AppResult<Region>;

    async fn list_regions(&self, params: PaginationParams) -> AppResult<Paginated<Region>>;

    /// Cafe detail with region, like and review counts
    async fn get_cafe(&self, id: i32) -> AppResult<CafeDetail>;

    /// Cafes of an active region
    async fn cafes_in_region(&self, region_id: i32) -> AppResult<Vec<Cafe>>;

    /// Reviews of an active cafe, with like counts
    async fn cafe_reviews(&self, cafe_id: i32) -> AppResult<Vec<ReviewEntry>>;
}

/// Concrete implementation of CatalogService using Unit of Work.
pub struct CatalogManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CatalogManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn active_cafe(&self, id: i32) -> AppResult<Cafe> {
        self.uow
            .cafes()
            .find_by_id(id, Scope::Active)
            .await?
            .ok_or_not_found()
    }
}

#[async_trait]
impl<U: UnitOfWork> CatalogService for CatalogManager<U> {
    async fn cities(&self) -> AppResult<Vec<Area>> {
        self.uow.regions().cities().await
    }

    async fn counties(&self, city_code: i32) -> AppResult<Vec<Area>> {
        self.uow.regions().counties(city_code).await
    }

    async fn towns(&self, county_code: i32) -> AppResult<Vec<Area>> {
        self.uow.regions().towns(county_code).await
    }

    async fn get_region(&self, id: i32) -> AppResult<Region> {
        self.uow
            .regions()
            .find_by_id(id, Scope::Active)
            .await?
            .ok_or_not_found()
    }

    async fn list_regions(&self, params: PaginationParams) -> AppResult<Paginated<Region>> {
        self.uow.regions().list_paginated(Scope::Active, params).await
    }

    async fn get_cafe(&self, id: i32) -> AppResult<CafeDetail> {
        let cafe = self.active_cafe(id).await?;
        let region = self.get_region(cafe.region_id).await?;
        let like_count = self.uow.likes().count_cafe_likes(id, Scope::Active).await?;
        let review_count = self.uow.reviews().count_by_cafe(id, Scope::Active).await?;

        Ok(CafeDetail {
            cafe,
            region,
            like_count,
            review_count,
        })
    }

    async fn cafes_in_region(&self, region_id: i32) -> AppResult<Vec<Cafe>> {
        self.get_region(region_id).await?;
        self.uow.cafes().list_by_region(region_id, Scope::Active).await
    }

    async fn cafe_reviews(&self, cafe_id: i32) -> AppResult<Vec<ReviewEntry>> {
        self.active_cafe(cafe_id).await?;

        let reviews = self
            .uow
            .reviews()
            .list_by_cafe(cafe_id, Scope::Active)
            .await?;

        let ids = reviews.iter().map(|review| review.id).collect();
        let counts = self.uow.likes().review_like_counts(ids, Scope::Active).await?;

        Ok(reviews
            .into_iter()
            .map(|review| {
                let like_count = counts.get(&review.id).copied().unwrap_or(0);
                ReviewEntry { review, like_count }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use common::AppError;
    use domain::SoftDeleteState;
    use mockall::predicate::eq;
    use std::collections::HashMap;

    use crate::infra::TransactionContext;
    use crate::repository::{
        CafeRepository, LikeRepository, MockCafeRepository, MockLikeRepository,
        MockRegionRepository, MockReviewRepository, MockUserRepository, RegionRepository,
        ReviewRepository, UserRepository,
    };

    fn test_region(id: i32) -> Region {
        Region {
            id,
            city_code: 11,
            city_name: "Seoul".to_string(),
            county_code: 11680,
            county_name: "Gangnam-gu".to_string(),
            town_code: id,
            town_name: "Yeoksam-dong".to_string(),
            created_at: Utc::now(),
            lifecycle: SoftDeleteState::new(Utc::now()),
        }
    }

    fn test_cafe(id: i32, region_id: i32) -> Cafe {
        Cafe {
            id,
            region_id,
            crawl_id: None,
            is_crawled: false,
            name: "Bean Counter".to_string(),
            wordcloud: None,
            address: "1 Teheran-ro".to_string(),
            study_friendly: true,
            phone: "02-000-0000".to_string(),
            latitude: "37.5".to_string(),
            longitude: "127.0".to_string(),
            created_at: Utc::now(),
            lifecycle: SoftDeleteState::new(Utc::now()),
        }
    }

    fn test_review(id: i64, cafe_id: i32) -> Review {
        Review {
            id,
            user_id: None,
            cafe_id,
            body: "Quiet and bright".to_string(),
            crawled: true,
            created_at: Utc::now(),
            lifecycle: SoftDeleteState::new(Utc::now()),
        }
    }

    /// Test mock for UnitOfWork that wraps mocked repositories
    #[derive(Default)]
    struct TestUnitOfWork {
        regions: MockRegionRepository,
        cafes: MockCafeRepository,
        reviews: MockReviewRepository,
        likes: MockLikeRepository,
    }

    struct Repos {
        regions: Arc<MockRegionRepository>,
        cafes: Arc<MockCafeRepository>,
        reviews: Arc<MockReviewRepository>,
        likes: Arc<MockLikeRepository>,
        users: Arc<MockUserRepository>,
    }

    impl TestUnitOfWork {
        fn build(self) -> Arc<Repos> {
            Arc::new(Repos {
                regions: Arc::new(self.regions),
                cafes: Arc::new(self.cafes),
                reviews: Arc::new(self.reviews),
                likes: Arc::new(self.likes),
                users: Arc::new(MockUserRepository::new()),
            })
        }
    }

    #[async_trait]
    impl UnitOfWork for Repos {
        fn regions(&self) -> Arc<dyn RegionRepository> {
            self.regions.clone()
        }

        fn cafes(&self) -> Arc<dyn CafeRepository> {
            self.cafes.clone()
        }

        fn reviews(&self) -> Arc<dyn ReviewRepository> {
            self.reviews.clone()
        }

        fn likes(&self) -> Arc<dyn LikeRepository> {
            self.likes.clone()
        }

        fn users(&self) -> Arc<dyn UserRepository> {
            self.users.clone()
        }

        async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
        where
            F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                    Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
                > + Send,
            T: Send,
        {
            // Transaction not supported in test mock
            Err(AppError::internal("Transactions not supported in test mock"))
        }

        async fn transaction_serializable<F, T>(&self, _f: F) -> AppResult<T>
        where
            F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                    Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
                > + Send,
            T: Send,
        {
            Err(AppError::internal("Transactions not supported in test mock"))
        }
    }

    #[tokio::test]
    async fn test_get_cafe_collects_counts() {
        let mut uow = TestUnitOfWork::default();
        uow.cafes
            .expect_find_by_id()
            .with(eq(7), eq(Scope::Active))
            .returning(|id, _| Ok(Some(test_cafe(id, 100))));
        uow.regions
            .expect_find_by_id()
            .with(eq(100), eq(Scope::Active))
            .returning(|id, _| Ok(Some(test_region(id))));
        uow.likes
            .expect_count_cafe_likes()
            .with(eq(7), eq(Scope::Active))
            .returning(|_, _| Ok(2));
        uow.reviews
            .expect_count_by_cafe()
            .with(eq(7), eq(Scope::Active))
            .returning(|_, _| Ok(1));

        let service = CatalogManager::new(uow.build());
        let detail = service.get_cafe(7).await.unwrap();

        assert_eq!(detail.cafe.id, 7);
        assert_eq!(detail.region.id, 100);
        assert_eq!(detail.like_count, 2);
        assert_eq!(detail.review_count, 1);
    }

    #[tokio::test]
    async fn test_get_cafe_hidden_when_inactive() {
        let mut uow = TestUnitOfWork::default();
        uow.cafes
            .expect_find_by_id()
            .with(eq(7), eq(Scope::Active))
            .returning(|_, _| Ok(None));

        let service = CatalogManager::new(uow.build());
        let result = service.get_cafe(7).await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_cafes_in_missing_region() {
        let mut uow = TestUnitOfWork::default();
        uow.regions
            .expect_find_by_id()
            .returning(|_, _| Ok(None));
        uow.cafes.expect_list_by_region().never();

        let service = CatalogManager::new(uow.build());
        let result = service.cafes_in_region(100).await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_cafe_reviews_counts_likes_per_review() {
        let mut uow = TestUnitOfWork::default();
        uow.cafes
            .expect_find_by_id()
            .returning(|id, _| Ok(Some(test_cafe(id, 100))));
        uow.reviews
            .expect_list_by_cafe()
            .returning(|cafe_id, _| Ok(vec![test_review(1, cafe_id), test_review(2, cafe_id)]));
        uow.likes
            .expect_review_like_counts()
            .with(eq(vec![1_i64, 2]), eq(Scope::Active))
            .times(1)
            .returning(|_, _| Ok(HashMap::from([(2, 1)])));

        let service = CatalogManager::new(uow.build());
        let entries = service.cafe_reviews(7).await.unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].like_count, 0);
        assert_eq!(entries[1].like_count, 1);
    }

    #[tokio::test]
    async fn test_cities_delegates_to_regions() {
        let mut uow = TestUnitOfWork::default();
        uow.regions.expect_cities().times(1).returning(|| {
            Ok(vec![Area {
                code: 11,
                name: "Seoul".to_string(),
            }])
        });

        let service = CatalogManager::new(uow.build());
        let cities = service.cities().await.unwrap();

        assert_eq!(cities.len(), 1);
        assert_eq!(cities[0].name, "Seoul");
    }
}
