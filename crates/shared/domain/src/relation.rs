//! Entity kinds and the ownership relations between them.
//!
//! The cascade performed by soft delete and restore is driven by this table
//! alone. A transition on a record of kind `K` updates the children of every
//! relation whose parent is `K`, and stops there: the children's own
//! relations are not walked.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Every persisted, soft-deletable entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Region,
    Cafe,
    Review,
    CafeLike,
    ReviewLike,
    User,
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Region,
        EntityKind::Cafe,
        EntityKind::Review,
        EntityKind::CafeLike,
        EntityKind::ReviewLike,
        EntityKind::User,
    ];

    /// Backing table name
    pub fn table_name(self) -> &'static str {
        match self {
            EntityKind::Region => "regions",
            EntityKind::Cafe => "cafes",
            EntityKind::Review => "reviews",
            EntityKind::CafeLike => "cafe_likes",
            EntityKind::ReviewLike => "review_likes",
            EntityKind::User => "users",
        }
    }

    /// Relations in which this kind is the parent, in cascade order.
    pub fn dependents(self) -> impl Iterator<Item = Relation> {
        Relation::ALL
            .into_iter()
            .filter(move |relation| relation.parent() == self)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Region => "region",
            EntityKind::Cafe => "cafe",
            EntityKind::Review => "review",
            EntityKind::CafeLike => "cafe_like",
            EntityKind::ReviewLike => "review_like",
            EntityKind::User => "user",
        };
        f.write_str(name)
    }
}

impl FromStr for EntityKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "region" | "regions" | "area" | "areas" => Ok(EntityKind::Region),
            "cafe" | "cafes" => Ok(EntityKind::Cafe),
            "review" | "reviews" => Ok(EntityKind::Review),
            "cafe_like" | "cafe_likes" => Ok(EntityKind::CafeLike),
            "review_like" | "review_likes" => Ok(EntityKind::ReviewLike),
            "user" | "users" => Ok(EntityKind::User),
            other => Err(DomainError::validation(format!(
                "Unknown entity kind '{}'",
                other
            ))),
        }
    }
}

/// Referential action applied by the store when a parent row is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnDelete {
    /// Child rows are removed with the parent
    Cascade,
    /// Child rows keep existing with a null reference
    SetNull,
}

/// One-to-many ownership relation between two entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    RegionCafes,
    CafeReviews,
    CafeLikes,
    ReviewLikes,
    UserReviews,
    UserCafeLikes,
    UserReviewLikes,
}

impl Relation {
    pub const ALL: [Relation; 7] = [
        Relation::RegionCafes,
        Relation::CafeReviews,
        Relation::CafeLikes,
        Relation::ReviewLikes,
        Relation::UserReviews,
        Relation::UserCafeLikes,
        Relation::UserReviewLikes,
    ];

    /// The "one" side
    pub fn parent(self) -> EntityKind {
        match self {
            Relation::RegionCafes => EntityKind::Region,
            Relation::CafeReviews | Relation::CafeLikes => EntityKind::Cafe,
            Relation::ReviewLikes => EntityKind::Review,
            Relation::UserReviews | Relation::UserCafeLikes | Relation::UserReviewLikes => {
                EntityKind::User
            }
        }
    }

    /// The "many" side
    pub fn child(self) -> EntityKind {
        match self {
            Relation::RegionCafes => EntityKind::Cafe,
            Relation::CafeReviews | Relation::UserReviews => EntityKind::Review,
            Relation::CafeLikes | Relation::UserCafeLikes => EntityKind::CafeLike,
            Relation::ReviewLikes | Relation::UserReviewLikes => EntityKind::ReviewLike,
        }
    }

    /// Foreign key column on the child table
    pub fn foreign_key(self) -> &'static str {
        match self {
            Relation::RegionCafes => "region_id",
            Relation::CafeReviews | Relation::CafeLikes => "cafe_id",
            Relation::ReviewLikes => "review_id",
            Relation::UserReviews | Relation::UserCafeLikes | Relation::UserReviewLikes => {
                "user_id"
            }
        }
    }

    /// Storage-level action when the parent row is hard deleted
    pub fn on_delete(self) -> OnDelete {
        match self {
            Relation::UserReviews => OnDelete::SetNull,
            _ => OnDelete::Cascade,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{} -> {}",
            self.child().table_name(),
            self.foreign_key(),
            self.parent().table_name()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_cascades_to_cafes_only() {
        let deps: Vec<_> = EntityKind::Region.dependents().collect();
        assert_eq!(deps, vec![Relation::RegionCafes]);
    }

    #[test]
    fn test_cafe_cascades_to_reviews_and_likes() {
        let deps: Vec<_> = EntityKind::Cafe.dependents().collect();
        assert_eq!(deps, vec![Relation::CafeReviews, Relation::CafeLikes]);
    }

    #[test]
    fn test_user_cascades_to_reviews_and_both_likes() {
        let children: Vec<_> = EntityKind::User.dependents().map(Relation::child).collect();
        assert_eq!(
            children,
            vec![EntityKind::Review, EntityKind::CafeLike, EntityKind::ReviewLike]
        );
    }

    #[test]
    fn test_leaf_kinds_have_no_dependents() {
        assert_eq!(EntityKind::CafeLike.dependents().count(), 0);
        assert_eq!(EntityKind::ReviewLike.dependents().count(), 0);
    }

    #[test]
    fn test_every_relation_has_exactly_one_parent_entry() {
        let total: usize = EntityKind::ALL.iter().map(|k| k.dependents().count()).sum();
        assert_eq!(total, Relation::ALL.len());
    }

    #[test]
    fn test_only_user_reviews_is_set_null() {
        for relation in Relation::ALL {
            let expected = if relation == Relation::UserReviews {
                OnDelete::SetNull
            } else {
                OnDelete::Cascade
            };
            assert_eq!(relation.on_delete(), expected, "{}", relation);
        }
    }

    #[test]
    fn test_relation_display() {
        assert_eq!(Relation::RegionCafes.to_string(), "cafes.region_id -> regions");
        assert_eq!(
            Relation::UserReviewLikes.to_string(),
            "review_likes.user_id -> users"
        );
    }

    #[test]
    fn test_entity_kind_parse_round_trip() {
        for kind in EntityKind::ALL {
            assert_eq!(kind.to_string().parse::<EntityKind>().unwrap(), kind);
        }
        assert_eq!("review-likes".parse::<EntityKind>().unwrap(), EntityKind::ReviewLike);
        assert_eq!("area".parse::<EntityKind>().unwrap(), EntityKind::Region);
        assert!("menu".parse::<EntityKind>().is_err());
    }
}
