//! Soft delete lifecycle shared by every persisted entity.
//!
//! A record is never physically removed by a soft delete: it is flagged
//! inactive and timestamped, and can be restored later.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Lifecycle columns carried by every soft-deletable entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoftDeleteState {
    /// `false` means the record is logically deleted
    pub is_active: bool,
    /// Set while inactive, cleared on restore
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
    /// Refreshed on every mutating save
    pub updated_at: DateTime<Utc>,
}

impl SoftDeleteState {
    /// State of a freshly created record
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            is_active: true,
            deleted_at: None,
            updated_at: now,
        }
    }

    /// `deleted_at` is set exactly when the record is inactive.
    pub fn is_consistent(&self) -> bool {
        self.is_active == self.deleted_at.is_none()
    }
}

/// Reversible lifecycle transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    Delete,
    Restore,
}

impl Transition {
    /// Target `(is_active, deleted_at)` pair for a transition performed at `at`.
    pub fn target(self, at: DateTime<Utc>) -> (bool, Option<DateTime<Utc>>) {
        match self {
            Transition::Delete => (false, Some(at)),
            Transition::Restore => (true, None),
        }
    }

    /// Past-tense verb for logs and reports
    pub fn verb(self) -> &'static str {
        match self {
            Transition::Delete => "deleted",
            Transition::Restore => "restored",
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::Delete => write!(f, "delete"),
            Transition::Restore => write!(f, "restore"),
        }
    }
}

/// Which lifecycle states a query returns.
///
/// There is no implicit default: every read names its scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Only records with `is_active = true`
    Active,
    /// Only logically deleted records
    Inactive,
    /// Every record regardless of state
    All,
}

impl Scope {
    /// Value the `is_active` column must equal, `None` for no filter
    pub fn is_active_filter(self) -> Option<bool> {
        match self {
            Scope::Active => Some(true),
            Scope::Inactive => Some(false),
            Scope::All => None,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Active => write!(f, "active"),
            Scope::Inactive => write!(f, "inactive"),
            Scope::All => write!(f, "all"),
        }
    }
}

impl FromStr for Scope {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "active" => Ok(Scope::Active),
            "inactive" | "deleted" => Ok(Scope::Inactive),
            "all" => Ok(Scope::All),
            other => Err(DomainError::validation(format!("Unknown scope '{}'", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_new_state_is_active_and_consistent() {
        let state = SoftDeleteState::new(Utc::now());
        assert!(state.is_active);
        assert!(state.deleted_at.is_none());
        assert!(state.is_consistent());
    }

    #[test]
    fn test_transition_targets() {
        let at = Utc::now();
        assert_eq!(Transition::Delete.target(at), (false, Some(at)));
        assert_eq!(Transition::Restore.target(at), (true, None));
    }

    #[test]
    fn test_transition_targets_are_consistent() {
        let created = Utc::now();
        for transition in [Transition::Delete, Transition::Restore] {
            let at = created + Duration::seconds(5);
            let (is_active, deleted_at) = transition.target(at);
            let state = SoftDeleteState {
                is_active,
                deleted_at,
                updated_at: at,
            };
            assert!(state.is_consistent(), "{}", transition);
        }
    }

    #[test]
    fn test_manual_edit_can_break_consistency() {
        let mut state = SoftDeleteState::new(Utc::now());
        state.is_active = false;
        assert!(!state.is_consistent());
    }

    #[test]
    fn test_scope_filter_values() {
        assert_eq!(Scope::Active.is_active_filter(), Some(true));
        assert_eq!(Scope::Inactive.is_active_filter(), Some(false));
        assert_eq!(Scope::All.is_active_filter(), None);
    }

    #[test]
    fn test_scope_parse() {
        assert_eq!("active".parse::<Scope>().unwrap(), Scope::Active);
        assert_eq!("Deleted".parse::<Scope>().unwrap(), Scope::Inactive);
        assert_eq!("ALL".parse::<Scope>().unwrap(), Scope::All);
        assert!("gone".parse::<Scope>().is_err());
    }

    #[test]
    fn test_state_serialization_skips_null_deleted_at() {
        let state = SoftDeleteState::new(Utc::now());
        let json = serde_json::to_value(state).unwrap();
        assert_eq!(json["is_active"], true);
        assert!(json.get("deleted_at").is_none());
    }
}
