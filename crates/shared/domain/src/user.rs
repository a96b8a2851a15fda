//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::soft_delete::SoftDeleteState;
use crate::validation::not_blank;

/// User domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub lifecycle: SoftDeleteState,
}

impl User {
    /// Check if user is active (not deleted)
    pub fn is_active(&self) -> bool {
        self.lifecycle.is_active
    }
}

/// User creation data transfer object
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUser {
    #[validate(
        length(max = 100, message = "Username must be at most 100 characters"),
        custom(function = "not_blank", message = "Username must not be empty")
    )]
    pub username: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// User update data transfer object
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUser {
    #[validate(
        length(max = 100, message = "Username must be at most 100 characters"),
        custom(function = "not_blank", message = "Username must not be empty")
    )]
    pub username: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub last_login: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainError;

    fn create_user(username: &str, email: &str) -> CreateUser {
        CreateUser {
            username: username.into(),
            email: email.into(),
        }
    }

    fn test_user(lifecycle: SoftDeleteState) -> User {
        User {
            id: Uuid::new_v4(),
            username: "park".into(),
            email: "park@example.com".into(),
            last_login: None,
            created_at: lifecycle.updated_at,
            lifecycle,
        }
    }

    #[test]
    fn test_create_user_validation() {
        assert!(create_user("lee", "lee@example.com").validate().is_ok());
        assert!(create_user("lee", "lee.example.com").validate().is_err());
        assert!(create_user(" ", "lee@example.com").validate().is_err());
    }

    #[test]
    fn test_malformed_emails_rejected() {
        for email in ["a@.", "a b@c.d", "mina@example."] {
            let result = create_user("mina", email).validate();
            assert!(result.is_err(), "{} should be rejected", email);
        }
    }

    #[test]
    fn test_validation_errors_become_domain_errors() {
        let err: DomainError = create_user("mina", "a@.").validate().unwrap_err().into();
        assert_eq!(err, DomainError::Validation("Invalid email format".into()));
    }

    #[test]
    fn test_update_user_checks_present_fields_only() {
        assert!(UpdateUser::default().validate().is_ok());

        let update = UpdateUser {
            email: Some("not-an-email".into()),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_deleted_at_serialized_only_when_deleted() {
        let now = Utc::now();
        let user = test_user(SoftDeleteState::new(now));
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("deleted_at").is_none());

        let user = test_user(SoftDeleteState {
            is_active: false,
            deleted_at: Some(now),
            updated_at: now,
        });
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("deleted_at").is_some());
        assert_eq!(json["is_active"], false);
    }
}
