//! Repository layer for data access.
//!
//! Reads always take an explicit `Scope`; lifecycle writes go through
//! `SoftDeleteStore` so that every entity cascades the same way.

pub mod cascade;
pub mod entities;
mod cafe_repository;
mod like_repository;
mod region_repository;
mod review_repository;
pub mod soft_delete;
mod user_repository;

pub use cafe_repository::{CafeRepository, CafeStore};
pub use cascade::{CascadeSummary, CascadedRows};
pub use like_repository::{LikeRepository, LikeStore};
pub use region_repository::{RegionRepository, RegionStore};
pub use review_repository::{ReviewRepository, ReviewStore};
pub use soft_delete::{restrict, SoftDeleteEntity, SoftDeleteStore, Transitioned};
pub use user_repository::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use cafe_repository::MockCafeRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use like_repository::MockLikeRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use region_repository::MockRegionRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use review_repository::MockReviewRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
