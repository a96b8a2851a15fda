//! Like relationships between users and cafes or reviews.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::soft_delete::SoftDeleteState;

/// A user liking a cafe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CafeLike {
    pub id: i64,
    pub cafe_id: i32,
    pub user_id: Uuid,
    pub liked_at: DateTime<Utc>,
    #[serde(flatten)]
    pub lifecycle: SoftDeleteState,
}

/// A user liking a review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewLike {
    pub id: i64,
    pub review_id: i64,
    pub user_id: Uuid,
    pub liked_at: DateTime<Utc>,
    #[serde(flatten)]
    pub lifecycle: SoftDeleteState,
}
