//! Shared fixtures for the integration tests.
//!
//! Every test gets its own migrated in-memory SQLite database.

#![allow(dead_code)]

use cafe_service_lib::infra::Database;
use cafe_service_lib::repository::{
    CafeRepository, CafeStore, LikeRepository, LikeStore, RegionRepository, RegionStore,
    ReviewRepository, ReviewStore, UserRepository, UserStore,
};
use common::DatabaseConfig;
use domain::{
    Cafe, CafeLike, CreateCafe, CreateRegion, CreateReview, CreateUser, Region, Review,
    ReviewLike, User,
};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

pub async fn connect() -> DatabaseConnection {
    Database::connect(&DatabaseConfig::with_url("sqlite::memory:"))
        .await
        .expect("in-memory database")
        .get_connection()
}

/// All repositories over one database
pub struct Catalog {
    pub db: DatabaseConnection,
    pub regions: RegionStore,
    pub cafes: CafeStore,
    pub reviews: ReviewStore,
    pub likes: LikeStore,
    pub users: UserStore,
}

impl Catalog {
    pub async fn new() -> Self {
        let db = connect().await;
        Self {
            regions: RegionStore::new(db.clone()),
            cafes: CafeStore::new(db.clone()),
            reviews: ReviewStore::new(db.clone()),
            likes: LikeStore::new(db.clone()),
            users: UserStore::new(db.clone()),
            db,
        }
    }

    pub async fn region(&self, id: i32) -> Region {
        self.regions
            .create(region_input(id, 11, 11680))
            .await
            .expect("create region")
    }

    pub async fn cafe(&self, id: i32, region_id: i32) -> Cafe {
        self.cafes
            .create(cafe_input(id, region_id))
            .await
            .expect("create cafe")
    }

    pub async fn user(&self, username: &str) -> User {
        self.users
            .create(CreateUser {
                username: username.to_string(),
                email: format!("{}@example.com", username),
            })
            .await
            .expect("create user")
    }

    pub async fn review(&self, cafe_id: i32, user_id: Option<Uuid>) -> Review {
        self.reviews
            .create(CreateReview {
                cafe_id,
                user_id,
                body: "Plenty of outlets, quiet after 2pm".to_string(),
                crawled: user_id.is_none(),
            })
            .await
            .expect("create review")
    }

    pub async fn cafe_like(&self, cafe_id: i32, user_id: Uuid) -> CafeLike {
        self.likes
            .like_cafe(cafe_id, user_id)
            .await
            .expect("like cafe")
    }

    pub async fn review_like(&self, review_id: i64, user_id: Uuid) -> ReviewLike {
        self.likes
            .like_review(review_id, user_id)
            .await
            .expect("like review")
    }
}

pub fn region_input(id: i32, city_code: i32, county_code: i32) -> CreateRegion {
    CreateRegion {
        id,
        city_code,
        city_name: format!("City {}", city_code),
        county_code,
        county_name: format!("County {}", county_code),
        town_code: id,
        town_name: format!("Town {}", id),
    }
}

pub fn cafe_input(id: i32, region_id: i32) -> CreateCafe {
    CreateCafe {
        id,
        region_id,
        crawl_id: None,
        name: format!("Cafe {}", id),
        address: format!("{} Teheran-ro", id),
        study_friendly: true,
        phone: "02-555-0100".to_string(),
        latitude: "37.5006".to_string(),
        longitude: "127.0364".to_string(),
    }
}
