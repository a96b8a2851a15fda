//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.
//! Every table carries the `is_active` / `deleted_at` / `updated_at`
//! lifecycle columns.

pub mod cafe;
pub mod cafe_like;
pub mod region;
pub mod review;
pub mod review_like;
pub mod user;

// Re-exports for public API convenience
pub use cafe::Entity as CafeEntity;
pub use cafe_like::Entity as CafeLikeEntity;
pub use region::Entity as RegionEntity;
pub use review::Entity as ReviewEntity;
pub use review_like::Entity as ReviewLikeEntity;
pub use user::Entity as UserEntity;
