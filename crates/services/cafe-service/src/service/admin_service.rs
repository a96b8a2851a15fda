//! Admin service - bulk lifecycle actions over one entity kind.
//!
//! A batch runs in a single transaction: if any key is malformed or missing,
//! nothing in the batch is changed.

use async_trait::async_trait;
use sea_orm::{ActiveModelBehavior, ActiveModelTrait, IntoActiveModel, Value};
use serde::Serialize;
use std::str::FromStr;
use std::sync::Arc;

use common::{AppError, AppResult};
use domain::{
    Cafe, CafeLike, EntityKind, Region, Review, ReviewLike, Scope, Transition, User,
};

use crate::infra::{TransactionContext, UnitOfWork};
use crate::repository::entities::{
    CafeEntity, CafeLikeEntity, RegionEntity, ReviewEntity, ReviewLikeEntity, UserEntity,
};
use crate::repository::soft_delete::PrimaryKeyOf;
use crate::repository::SoftDeleteEntity;

/// Result of one admin batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchOutcome {
    pub kind: EntityKind,
    pub action: String,
    /// Records addressed by the batch
    pub records: u64,
    /// Dependent rows updated by cascades (0 for hard deletes)
    pub cascaded: u64,
}

/// Admin service trait for dependency injection.
#[async_trait]
pub trait AdminService: Send + Sync {
    /// Soft delete every record in `ids`
    async fn soft_delete(&self, kind: EntityKind, ids: Vec<String>) -> AppResult<BatchOutcome>;

    /// Restore every record in `ids`
    async fn restore(&self, kind: EntityKind, ids: Vec<String>) -> AppResult<BatchOutcome>;

    /// Permanently remove every record in `ids`
    async fn hard_delete(&self, kind: EntityKind, ids: Vec<String>) -> AppResult<BatchOutcome>;

    /// Soft-deleted records of a kind as a JSON array
    async fn list_inactive(&self, kind: EntityKind) -> AppResult<serde_json::Value>;
}

/// Concrete implementation of AdminService using Unit of Work.
pub struct AdminManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> AdminManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn transition(
        &self,
        kind: EntityKind,
        ids: Vec<String>,
        transition: Transition,
    ) -> AppResult<BatchOutcome> {
        require_keys(&ids)?;

        let outcome = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    match kind {
                        EntityKind::Region => {
                            transition_batch::<RegionEntity>(&ctx, kind, &ids, transition).await
                        }
                        EntityKind::Cafe => {
                            transition_batch::<CafeEntity>(&ctx, kind, &ids, transition).await
                        }
                        EntityKind::Review => {
                            transition_batch::<ReviewEntity>(&ctx, kind, &ids, transition).await
                        }
                        EntityKind::CafeLike => {
                            transition_batch::<CafeLikeEntity>(&ctx, kind, &ids, transition).await
                        }
                        EntityKind::ReviewLike => {
                            transition_batch::<ReviewLikeEntity>(&ctx, kind, &ids, transition).await
                        }
                        EntityKind::User => {
                            transition_batch::<UserEntity>(&ctx, kind, &ids, transition).await
                        }
                    }
                })
            })
            .await?;

        tracing::info!(
            %kind,
            records = outcome.records,
            cascaded = outcome.cascaded,
            "admin batch {}",
            transition.verb()
        );
        Ok(outcome)
    }
}

#[async_trait]
impl<U: UnitOfWork> AdminService for AdminManager<U> {
    async fn soft_delete(&self, kind: EntityKind, ids: Vec<String>) -> AppResult<BatchOutcome> {
        self.transition(kind, ids, Transition::Delete).await
    }

    async fn restore(&self, kind: EntityKind, ids: Vec<String>) -> AppResult<BatchOutcome> {
        self.transition(kind, ids, Transition::Restore).await
    }

    async fn hard_delete(&self, kind: EntityKind, ids: Vec<String>) -> AppResult<BatchOutcome> {
        require_keys(&ids)?;

        let outcome = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    match kind {
                        EntityKind::Region => {
                            hard_delete_batch::<RegionEntity>(&ctx, kind, &ids).await
                        }
                        EntityKind::Cafe => hard_delete_batch::<CafeEntity>(&ctx, kind, &ids).await,
                        EntityKind::Review => {
                            hard_delete_batch::<ReviewEntity>(&ctx, kind, &ids).await
                        }
                        EntityKind::CafeLike => {
                            hard_delete_batch::<CafeLikeEntity>(&ctx, kind, &ids).await
                        }
                        EntityKind::ReviewLike => {
                            hard_delete_batch::<ReviewLikeEntity>(&ctx, kind, &ids).await
                        }
                        EntityKind::User => hard_delete_batch::<UserEntity>(&ctx, kind, &ids).await,
                    }
                })
            })
            .await?;

        tracing::warn!(%kind, records = outcome.records, "admin batch hard deleted");
        Ok(outcome)
    }

    async fn list_inactive(&self, kind: EntityKind) -> AppResult<serde_json::Value> {
        self.uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    match kind {
                        EntityKind::Region => inactive_json::<RegionEntity, Region>(&ctx).await,
                        EntityKind::Cafe => inactive_json::<CafeEntity, Cafe>(&ctx).await,
                        EntityKind::Review => inactive_json::<ReviewEntity, Review>(&ctx).await,
                        EntityKind::CafeLike => {
                            inactive_json::<CafeLikeEntity, CafeLike>(&ctx).await
                        }
                        EntityKind::ReviewLike => {
                            inactive_json::<ReviewLikeEntity, ReviewLike>(&ctx).await
                        }
                        EntityKind::User => inactive_json::<UserEntity, User>(&ctx).await,
                    }
                })
            })
            .await
    }
}

fn require_keys(ids: &[String]) -> AppResult<()> {
    if ids.is_empty() {
        return Err(AppError::validation("At least one key is required"));
    }
    Ok(())
}

/// Parse raw keys into the primary key type of `kind`.
///
/// Repeated keys are kept once, in first-seen order.
pub fn parse_keys<K: FromStr + PartialEq>(kind: EntityKind, ids: &[String]) -> AppResult<Vec<K>> {
    let mut keys = Vec::with_capacity(ids.len());
    for raw in ids {
        let key = raw
            .trim()
            .parse::<K>()
            .map_err(|_| AppError::validation(format!("Invalid {} key: {:?}", kind, raw)))?;
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    Ok(keys)
}

async fn transition_batch<E>(
    ctx: &TransactionContext<'_>,
    kind: EntityKind,
    ids: &[String],
    transition: Transition,
) -> AppResult<BatchOutcome>
where
    E: SoftDeleteEntity,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
    PrimaryKeyOf<E>: Clone + PartialEq + Into<Value> + FromStr + Send + Sync,
{
    let keys = parse_keys::<PrimaryKeyOf<E>>(kind, ids)?;
    let store = ctx.store::<E>();

    let outcomes = match transition {
        Transition::Delete => store.delete_many(keys).await?,
        Transition::Restore => store.restore_many(keys).await?,
    };

    Ok(BatchOutcome {
        kind,
        action: transition.verb().to_string(),
        records: outcomes.len() as u64,
        cascaded: outcomes.iter().map(|o| o.cascaded.total()).sum(),
    })
}

async fn hard_delete_batch<E>(
    ctx: &TransactionContext<'_>,
    kind: EntityKind,
    ids: &[String],
) -> AppResult<BatchOutcome>
where
    E: SoftDeleteEntity,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
    PrimaryKeyOf<E>: Clone + PartialEq + Into<Value> + FromStr + Send + Sync,
{
    let keys = parse_keys::<PrimaryKeyOf<E>>(kind, ids)?;
    let records = ctx.store::<E>().hard_delete_many(keys).await?;

    Ok(BatchOutcome {
        kind,
        action: "hard deleted".to_string(),
        records,
        cascaded: 0,
    })
}

async fn inactive_json<E, D>(ctx: &TransactionContext<'_>) -> AppResult<serde_json::Value>
where
    E: SoftDeleteEntity,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
    PrimaryKeyOf<E>: Clone + Into<Value> + Send + Sync,
    D: From<E::Model> + Serialize,
{
    let store = ctx.store::<E>();
    let records: Vec<D> = store
        .list(Scope::Inactive)
        .await?
        .into_iter()
        .map(D::from)
        .collect();

    serde_json::to_value(records).map_err(|e| AppError::internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn keys(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_integer_keys() {
        let parsed = parse_keys::<i32>(EntityKind::Region, &keys(&["1", " 42 "])).unwrap();
        assert_eq!(parsed, vec![1, 42]);
    }

    #[test]
    fn test_parse_uuid_keys() {
        let id = Uuid::new_v4();
        let parsed = parse_keys::<Uuid>(EntityKind::User, &keys(&[&id.to_string()])).unwrap();
        assert_eq!(parsed, vec![id]);
    }

    #[test]
    fn test_parse_rejects_malformed_key() {
        let result = parse_keys::<i64>(EntityKind::Review, &keys(&["7", "seven"]));
        match result {
            Err(AppError::Validation(msg)) => assert!(msg.contains("seven")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_collapses_repeated_keys() {
        let parsed = parse_keys::<i32>(EntityKind::Cafe, &keys(&["10", "11", " 10"])).unwrap();
        assert_eq!(parsed, vec![10, 11]);
    }

    #[test]
    fn test_empty_batch_rejected() {
        assert!(matches!(require_keys(&[]), Err(AppError::Validation(_))));
    }
}
