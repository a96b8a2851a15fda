//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! the catalog entities, their soft delete lifecycle, and the ownership
//! relations that soft delete and restore cascade along.

pub mod cafe;
pub mod constants;
pub mod error;
pub mod like;
pub mod region;
pub mod relation;
pub mod review;
pub mod soft_delete;
pub mod user;
mod validation;

pub use cafe::{Cafe, CreateCafe, UpdateCafe};
pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use like::{CafeLike, ReviewLike};
pub use region::{Area, CreateRegion, Region, UpdateRegion};
pub use relation::{EntityKind, OnDelete, Relation};
pub use review::{CreateReview, Review, UpdateReview};
pub use soft_delete::{Scope, SoftDeleteState, Transition};
pub use user::{CreateUser, UpdateUser, User};
