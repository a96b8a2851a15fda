//! Region (administrative area) reference data.
//!
//! A region is identified by its official town-level code and carries the
//! full city / county / town hierarchy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::soft_delete::SoftDeleteState;
use crate::validation::not_blank;

/// Region domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Region code, assigned by the caller
    pub id: i32,
    pub city_code: i32,
    pub city_name: String,
    pub county_code: i32,
    pub county_name: String,
    pub town_code: i32,
    pub town_name: String,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub lifecycle: SoftDeleteState,
}

impl Region {
    /// Check if region is active (not deleted)
    pub fn is_active(&self) -> bool {
        self.lifecycle.is_active
    }
}

/// One level of the region hierarchy (a city, county or town)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub code: i32,
    pub name: String,
}

/// Region creation data transfer object
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRegion {
    pub id: i32,
    pub city_code: i32,
    #[validate(
        length(max = 50, message = "City name must be at most 50 characters"),
        custom(function = "not_blank", message = "City name must not be empty")
    )]
    pub city_name: String,
    pub county_code: i32,
    #[validate(
        length(max = 50, message = "County name must be at most 50 characters"),
        custom(function = "not_blank", message = "County name must not be empty")
    )]
    pub county_name: String,
    pub town_code: i32,
    #[validate(
        length(max = 50, message = "Town name must be at most 50 characters"),
        custom(function = "not_blank", message = "Town name must not be empty")
    )]
    pub town_name: String,
}

/// Region update data transfer object
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateRegion {
    #[validate(
        length(max = 50, message = "City name must be at most 50 characters"),
        custom(function = "not_blank", message = "City name must not be empty")
    )]
    pub city_name: Option<String>,
    #[validate(
        length(max = 50, message = "County name must be at most 50 characters"),
        custom(function = "not_blank", message = "County name must not be empty")
    )]
    pub county_name: Option<String>,
    #[validate(
        length(max = 50, message = "Town name must be at most 50 characters"),
        custom(function = "not_blank", message = "Town name must not be empty")
    )]
    pub town_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainError;

    fn create_region() -> CreateRegion {
        CreateRegion {
            id: 1111051500,
            city_code: 11,
            city_name: "Seoul".to_string(),
            county_code: 11110,
            county_name: "Jongno-gu".to_string(),
            town_code: 1111051500,
            town_name: "Cheongun-dong".to_string(),
        }
    }

    #[test]
    fn test_create_region_valid() {
        assert!(create_region().validate().is_ok());
    }

    #[test]
    fn test_create_region_rejects_blank_name() {
        let mut input = create_region();
        input.town_name = "  ".to_string();

        let err = DomainError::from(input.validate().unwrap_err());
        assert_eq!(err, DomainError::Validation("Town name must not be empty".into()));
    }

    #[test]
    fn test_update_region_rejects_long_name() {
        let update = UpdateRegion {
            city_name: Some("x".repeat(51)),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_update_region_without_changes_is_valid() {
        assert!(UpdateRegion::default().validate().is_ok());
    }
}
