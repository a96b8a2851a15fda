//! Cafe domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::soft_delete::SoftDeleteState;
use crate::validation::not_blank;

/// Cafe domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cafe {
    /// Cafe identifier, assigned by the caller
    pub id: i32,
    /// Owning region
    pub region_id: i32,
    /// Identifier on the listing site the cafe was collected from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crawl_id: Option<String>,
    /// Whether reviews have been collected for this cafe
    pub is_crawled: bool,
    pub name: String,
    /// Pre-computed word cloud payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wordcloud: Option<String>,
    pub address: String,
    /// Suitable for studying or working
    pub study_friendly: bool,
    pub phone: String,
    pub latitude: String,
    pub longitude: String,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub lifecycle: SoftDeleteState,
}

impl Cafe {
    /// Check if cafe is active (not deleted)
    pub fn is_active(&self) -> bool {
        self.lifecycle.is_active
    }
}

/// Cafe creation data transfer object
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCafe {
    pub id: i32,
    pub region_id: i32,
    #[serde(default)]
    #[validate(length(max = 50, message = "Crawl id must be at most 50 characters"))]
    pub crawl_id: Option<String>,
    #[validate(
        length(max = 100, message = "Name must be at most 100 characters"),
        custom(function = "not_blank", message = "Name must not be empty")
    )]
    pub name: String,
    #[validate(
        length(max = 200, message = "Address must be at most 200 characters"),
        custom(function = "not_blank", message = "Address must not be empty")
    )]
    pub address: String,
    #[serde(default)]
    pub study_friendly: bool,
    #[serde(default)]
    #[validate(length(max = 20, message = "Phone must be at most 20 characters"))]
    pub phone: String,
    #[validate(length(min = 1, max = 20, message = "Latitude must be 1-20 characters"))]
    pub latitude: String,
    #[validate(length(min = 1, max = 20, message = "Longitude must be 1-20 characters"))]
    pub longitude: String,
}

/// Cafe update data transfer object
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCafe {
    #[validate(
        length(max = 100, message = "Name must be at most 100 characters"),
        custom(function = "not_blank", message = "Name must not be empty")
    )]
    pub name: Option<String>,
    #[validate(
        length(max = 200, message = "Address must be at most 200 characters"),
        custom(function = "not_blank", message = "Address must not be empty")
    )]
    pub address: Option<String>,
    pub study_friendly: Option<bool>,
    #[validate(length(max = 20, message = "Phone must be at most 20 characters"))]
    pub phone: Option<String>,
    pub is_crawled: Option<bool>,
    pub wordcloud: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_cafe() -> CreateCafe {
        CreateCafe {
            id: 1,
            region_id: 10,
            crawl_id: None,
            name: "Bean There".to_string(),
            address: "1 Main St".to_string(),
            study_friendly: true,
            phone: "02-123-4567".to_string(),
            latitude: "37.57".to_string(),
            longitude: "126.98".to_string(),
        }
    }

    #[test]
    fn test_create_cafe_valid() {
        assert!(create_cafe().validate().is_ok());
    }

    #[test]
    fn test_create_cafe_empty_phone_allowed() {
        let mut input = create_cafe();
        input.phone = String::new();
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_create_cafe_rejects_long_address() {
        let mut input = create_cafe();
        input.address = "a".repeat(201);
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_create_cafe_requires_coordinates() {
        let mut input = create_cafe();
        input.latitude = String::new();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_update_cafe_rejects_empty_name() {
        let update = UpdateCafe {
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }
}
