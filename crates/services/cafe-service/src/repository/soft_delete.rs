//! Soft delete store shared by every entity.
//!
//! `SoftDeleteStore` is the explicit query service for soft-deletable tables:
//! callers pick `active()`, `inactive()` or `all_with_deleted()` (or pass a
//! `Scope`) instead of relying on a filtered default. It also owns the
//! lifecycle transitions, which persist only the three lifecycle columns and
//! cascade one level down the relations declared in `domain::Relation`.

use std::marker::PhantomData;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait,
    IntoActiveModel, Iterable, PaginatorTrait, PrimaryKeyToColumn, PrimaryKeyTrait, QueryFilter,
    QueryOrder, Select, TransactionTrait, Value,
};

use common::{AppError, AppResult, Paginated, PaginationParams};
use domain::{EntityKind, Scope, Transition};

use super::cascade::{self, CascadeSummary};

/// Primary key value type of an entity
pub type PrimaryKeyOf<E> = <<E as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType;

/// An entity carrying the `is_active` / `deleted_at` / `updated_at` columns.
pub trait SoftDeleteEntity: EntityTrait {
    const KIND: EntityKind;
    const IS_ACTIVE: Self::Column;
    const DELETED_AT: Self::Column;
    const UPDATED_AT: Self::Column;

    /// Base query restricted to a scope
    fn scoped(scope: Scope) -> Select<Self> {
        restrict::<Self>(Self::find(), scope)
    }

    /// Records where `is_active = true`
    fn active() -> Select<Self> {
        Self::scoped(Scope::Active)
    }

    /// Records where `is_active = false`
    fn inactive() -> Select<Self> {
        Self::scoped(Scope::Inactive)
    }

    /// Every record regardless of state
    fn all_with_deleted() -> Select<Self> {
        Self::find()
    }
}

/// Add the `is_active` predicate for `scope` to an existing query.
pub fn restrict<E: SoftDeleteEntity>(query: Select<E>, scope: Scope) -> Select<E> {
    match scope.is_active_filter() {
        Some(is_active) => query.filter(E::IS_ACTIVE.eq(is_active)),
        None => query,
    }
}

/// Outcome of a delete or restore.
#[derive(Debug, Clone)]
pub struct Transitioned<M> {
    /// The record as persisted after the transition
    pub record: M,
    pub transition: Transition,
    pub at: DateTime<Utc>,
    /// Rows updated per dependent relation
    pub cascaded: CascadeSummary,
}

impl<M> Transitioned<M> {
    /// Convert the record while keeping the cascade report
    pub fn map<T>(self, f: impl FnOnce(M) -> T) -> Transitioned<T> {
        Transitioned {
            record: f(self.record),
            transition: self.transition,
            at: self.at,
            cascaded: self.cascaded,
        }
    }
}

/// Query and lifecycle operations for one soft-deletable entity.
///
/// Works on a plain connection or inside a transaction; transitions open
/// their own transaction (a savepoint when `C` already is one) so the parent
/// save and every cascade commit or roll back together.
pub struct SoftDeleteStore<'a, E, C> {
    db: &'a C,
    _entity: PhantomData<E>,
}

impl<'a, E, C> SoftDeleteStore<'a, E, C> {
    pub fn new(db: &'a C) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

impl<'a, E, C> SoftDeleteStore<'a, E, C>
where
    E: SoftDeleteEntity,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
    PrimaryKeyOf<E>: Clone + Into<Value> + Send + Sync,
    C: ConnectionTrait + TransactionTrait + Sync,
{
    pub fn active(&self) -> Select<E> {
        E::active()
    }

    pub fn inactive(&self) -> Select<E> {
        E::inactive()
    }

    pub fn all_with_deleted(&self) -> Select<E> {
        E::all_with_deleted()
    }

    /// Find a record by key under a scope
    pub async fn find(&self, id: PrimaryKeyOf<E>, scope: Scope) -> AppResult<Option<E::Model>> {
        restrict::<E>(E::find_by_id(id), scope)
            .one(self.db)
            .await
            .map_err(AppError::from)
    }

    /// Like `find`, but a missing record is `AppError::NotFound`
    pub async fn get(&self, id: PrimaryKeyOf<E>, scope: Scope) -> AppResult<E::Model> {
        self.find(id, scope).await?.ok_or(AppError::NotFound)
    }

    /// List records under a scope, ordered by primary key
    pub async fn list(&self, scope: Scope) -> AppResult<Vec<E::Model>> {
        ordered::<E>(E::scoped(scope))
            .all(self.db)
            .await
            .map_err(AppError::from)
    }

    /// Count records under a scope
    pub async fn count(&self, scope: Scope) -> AppResult<u64> {
        E::scoped(scope)
            .count(self.db)
            .await
            .map_err(AppError::from)
    }

    /// One page of records under a scope
    pub async fn paginate(
        &self,
        scope: Scope,
        params: &PaginationParams,
    ) -> AppResult<Paginated<E::Model>> {
        let paginator = ordered::<E>(E::scoped(scope)).paginate(self.db, params.limit());
        let total = paginator.num_items().await?;
        let data = paginator.fetch_page(params.page_index()).await?;
        Ok(Paginated::new(data, params.page, params.limit(), total))
    }

    /// Soft delete a record and deactivate its direct dependents.
    ///
    /// Deleting an already inactive record succeeds and refreshes `deleted_at`.
    pub async fn delete(&self, id: PrimaryKeyOf<E>) -> AppResult<Transitioned<E::Model>> {
        self.transition(id, Transition::Delete).await
    }

    /// Restore a record and reactivate its direct dependents.
    ///
    /// The parent's state is not checked: restore the topmost deleted
    /// ancestor first.
    pub async fn restore(&self, id: PrimaryKeyOf<E>) -> AppResult<Transitioned<E::Model>> {
        self.transition(id, Transition::Restore).await
    }

    /// Permanently remove a record in any state.
    ///
    /// Dependents follow the storage-level `ON DELETE` action of their
    /// foreign key.
    pub async fn hard_delete(&self, id: PrimaryKeyOf<E>) -> AppResult<()> {
        let result = E::delete_by_id(id.clone()).exec(self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        tracing::info!(kind = %E::KIND, id = ?id, "record hard deleted");
        Ok(())
    }

    /// Soft delete several records atomically
    pub async fn delete_many(
        &self,
        ids: Vec<PrimaryKeyOf<E>>,
    ) -> AppResult<Vec<Transitioned<E::Model>>> {
        self.transition_many(ids, Transition::Delete).await
    }

    /// Restore several records atomically
    pub async fn restore_many(
        &self,
        ids: Vec<PrimaryKeyOf<E>>,
    ) -> AppResult<Vec<Transitioned<E::Model>>> {
        self.transition_many(ids, Transition::Restore).await
    }

    /// Hard delete several records atomically
    pub async fn hard_delete_many(&self, ids: Vec<PrimaryKeyOf<E>>) -> AppResult<u64> {
        let txn = self.db.begin().await?;
        let store = SoftDeleteStore::<E, _>::new(&txn);
        let mut removed = 0;
        for id in ids {
            store.hard_delete(id).await?;
            removed += 1;
        }
        txn.commit().await?;
        Ok(removed)
    }

    async fn transition_many(
        &self,
        ids: Vec<PrimaryKeyOf<E>>,
        transition: Transition,
    ) -> AppResult<Vec<Transitioned<E::Model>>> {
        let txn = self.db.begin().await?;
        let store = SoftDeleteStore::<E, _>::new(&txn);
        let mut outcomes = Vec::with_capacity(ids.len());
        for id in ids {
            outcomes.push(store.transition(id, transition).await?);
        }
        txn.commit().await?;
        Ok(outcomes)
    }

    async fn transition(
        &self,
        id: PrimaryKeyOf<E>,
        transition: Transition,
    ) -> AppResult<Transitioned<E::Model>> {
        let at = Utc::now();
        let (is_active, deleted_at) = transition.target(at);

        // Dropping an uncommitted transaction rolls it back.
        let txn = self.db.begin().await?;

        let model = E::find_by_id(id.clone())
            .one(&txn)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active = model.into_active_model();
        active.set(E::IS_ACTIVE, is_active.into());
        active.set(E::DELETED_AT, deleted_at.into());
        active.set(E::UPDATED_AT, at.into());
        let record = active.update(&txn).await?;

        let cascaded = cascade::propagate(&txn, E::KIND, id.clone().into(), transition, at).await?;

        txn.commit().await?;

        tracing::info!(
            kind = %E::KIND,
            id = ?id,
            cascaded = cascaded.total(),
            "record {}",
            transition.verb()
        );

        Ok(Transitioned {
            record,
            transition,
            at,
            cascaded,
        })
    }
}

fn ordered<E: EntityTrait>(mut query: Select<E>) -> Select<E> {
    for key in E::PrimaryKey::iter() {
        query = query.order_by_asc(key.into_column());
    }
    query
}
