//! Cascade dispatch for lifecycle transitions.
//!
//! Maps every `domain::Relation` to the concrete child table and foreign key
//! column, and applies a transition to all children of one parent with a
//! single bulk `UPDATE`. Child rows are not loaded, so their own dependents
//! are left untouched.

use chrono::{DateTime, Utc};
use sea_orm::{sea_query::Expr, ColumnTrait, ConnectionTrait, DbErr, IdenStatic, QueryFilter, Value};

use common::AppResult;
use domain::{EntityKind, Relation, Transition};

use super::entities::{cafe, cafe_like, review, review_like};
use super::soft_delete::SoftDeleteEntity;

/// Rows updated for one relation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CascadedRows {
    pub relation: Relation,
    pub rows: u64,
}

/// Per-relation report of a cascade
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CascadeSummary {
    pub entries: Vec<CascadedRows>,
}

impl CascadeSummary {
    fn push(&mut self, relation: Relation, rows: u64) {
        self.entries.push(CascadedRows { relation, rows });
    }

    /// Total dependent rows updated
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|entry| entry.rows).sum()
    }

    /// Rows updated through one relation (0 if it was not walked)
    pub fn rows_for(&self, relation: Relation) -> u64 {
        self.entries
            .iter()
            .find(|entry| entry.relation == relation)
            .map(|entry| entry.rows)
            .unwrap_or(0)
    }
}

/// Apply `transition` to the direct dependents of the `kind` record keyed by `parent`.
pub async fn propagate<C: ConnectionTrait>(
    db: &C,
    kind: EntityKind,
    parent: Value,
    transition: Transition,
    at: DateTime<Utc>,
) -> AppResult<CascadeSummary> {
    let mut summary = CascadeSummary::default();

    for relation in kind.dependents() {
        let rows = match relation {
            Relation::RegionCafes => {
                apply::<cafe::Entity, _>(
                    db,
                    relation,
                    cafe::Column::RegionId,
                    &parent,
                    transition,
                    at,
                )
                .await?
            }
            Relation::CafeReviews => {
                apply::<review::Entity, _>(
                    db,
                    relation,
                    review::Column::CafeId,
                    &parent,
                    transition,
                    at,
                )
                .await?
            }
            Relation::CafeLikes => {
                apply::<cafe_like::Entity, _>(
                    db,
                    relation,
                    cafe_like::Column::CafeId,
                    &parent,
                    transition,
                    at,
                )
                .await?
            }
            Relation::ReviewLikes => {
                apply::<review_like::Entity, _>(
                    db,
                    relation,
                    review_like::Column::ReviewId,
                    &parent,
                    transition,
                    at,
                )
                .await?
            }
            Relation::UserReviews => {
                apply::<review::Entity, _>(
                    db,
                    relation,
                    review::Column::UserId,
                    &parent,
                    transition,
                    at,
                )
                .await?
            }
            Relation::UserCafeLikes => {
                apply::<cafe_like::Entity, _>(
                    db,
                    relation,
                    cafe_like::Column::UserId,
                    &parent,
                    transition,
                    at,
                )
                .await?
            }
            Relation::UserReviewLikes => {
                apply::<review_like::Entity, _>(
                    db,
                    relation,
                    review_like::Column::UserId,
                    &parent,
                    transition,
                    at,
                )
                .await?
            }
        };

        tracing::debug!(%relation, rows, "cascaded {}", transition);
        summary.push(relation, rows);
    }

    Ok(summary)
}

async fn apply<E, C>(
    db: &C,
    relation: Relation,
    foreign_key: E::Column,
    parent: &Value,
    transition: Transition,
    at: DateTime<Utc>,
) -> Result<u64, DbErr>
where
    E: SoftDeleteEntity,
    C: ConnectionTrait,
{
    debug_assert_eq!(E::KIND, relation.child());
    debug_assert_eq!(foreign_key.as_str(), relation.foreign_key());

    let (is_active, deleted_at) = transition.target(at);

    let result = E::update_many()
        .col_expr(E::IS_ACTIVE, Expr::value(is_active))
        .col_expr(E::DELETED_AT, Expr::value(deleted_at))
        .col_expr(E::UPDATED_AT, Expr::value(at))
        .filter(foreign_key.eq(parent.clone()))
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::EntityName;

    #[test]
    fn test_summary_totals() {
        let mut summary = CascadeSummary::default();
        summary.push(Relation::CafeReviews, 3);
        summary.push(Relation::CafeLikes, 2);

        assert_eq!(summary.total(), 5);
        assert_eq!(summary.rows_for(Relation::CafeLikes), 2);
        assert_eq!(summary.rows_for(Relation::RegionCafes), 0);
    }

    #[test]
    fn test_cascade_columns_match_relation_table() {
        let columns = [
            (Relation::RegionCafes, cafe::Column::RegionId.as_str()),
            (Relation::CafeReviews, review::Column::CafeId.as_str()),
            (Relation::CafeLikes, cafe_like::Column::CafeId.as_str()),
            (Relation::ReviewLikes, review_like::Column::ReviewId.as_str()),
            (Relation::UserReviews, review::Column::UserId.as_str()),
            (Relation::UserCafeLikes, cafe_like::Column::UserId.as_str()),
            (Relation::UserReviewLikes, review_like::Column::UserId.as_str()),
        ];
        for (relation, column) in columns {
            assert_eq!(column, relation.foreign_key(), "{}", relation);
        }
    }

    #[test]
    fn test_child_tables_match_entity_kinds() {
        assert_eq!(cafe::Entity.table_name(), EntityKind::Cafe.table_name());
        assert_eq!(review::Entity.table_name(), EntityKind::Review.table_name());
        assert_eq!(cafe_like::Entity.table_name(), EntityKind::CafeLike.table_name());
        assert_eq!(review_like::Entity.table_name(), EntityKind::ReviewLike.table_name());
    }
}
