//! Review domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::soft_delete::SoftDeleteState;
use crate::validation::not_blank;

/// Review domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    /// Author; `None` for collected reviews or after the author was removed
    pub user_id: Option<Uuid>,
    pub cafe_id: i32,
    pub body: String,
    /// Collected from a listing site rather than written by a user
    pub crawled: bool,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub lifecycle: SoftDeleteState,
}

impl Review {
    pub fn is_active(&self) -> bool {
        self.lifecycle.is_active
    }

    /// Check if the review still has an author
    pub fn has_author(&self) -> bool {
        self.user_id.is_some()
    }
}

/// Review creation data transfer object
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReview {
    pub cafe_id: i32,
    #[serde(default)]
    pub user_id: Option<Uuid>,
    #[validate(custom(function = "not_blank", message = "Review body must not be empty"))]
    pub body: String,
    #[serde(default)]
    pub crawled: bool,
}

/// Review update data transfer object
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateReview {
    #[validate(custom(function = "not_blank", message = "Review body must not be empty"))]
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_review_rejected() {
        let input = CreateReview {
            cafe_id: 1,
            user_id: None,
            body: "\n ".to_string(),
            crawled: true,
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_review_without_author() {
        let now = Utc::now();
        let review = Review {
            id: 1,
            user_id: None,
            cafe_id: 1,
            body: "Quiet, good outlets".to_string(),
            crawled: true,
            created_at: now,
            lifecycle: SoftDeleteState::new(now),
        };
        assert!(!review.has_author());
        assert!(review.is_active());
    }
}
