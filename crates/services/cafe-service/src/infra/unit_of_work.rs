//! Unit of Work pattern implementation.
//!
//! Centralizes repository access and runs multi-record workflows (bulk admin
//! actions in particular) in one database transaction.

use async_trait::async_trait;
use sea_orm::{
    AccessMode, DatabaseConnection, DatabaseTransaction, IsolationLevel, TransactionTrait,
};
use std::sync::Arc;

use crate::repository::{
    CafeRepository, CafeStore, LikeRepository, LikeStore, RegionRepository, RegionStore,
    ReviewRepository, ReviewStore, SoftDeleteEntity, SoftDeleteStore, UserRepository, UserStore,
};
use common::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Note: This trait is not mockable directly due to generic methods.
/// For testing, mock the repositories or use integration tests.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn regions(&self) -> Arc<dyn RegionRepository>;

    fn cafes(&self) -> Arc<dyn CafeRepository>;

    fn reviews(&self) -> Arc<dyn ReviewRepository>;

    fn likes(&self) -> Arc<dyn LikeRepository>;

    fn users(&self) -> Arc<dyn UserRepository>;

    /// Execute a closure within a transaction.
    ///
    /// The transaction is committed on success or rolled back on error.
    /// Uses ReadCommitted isolation level by default.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;

    /// Execute a closure within a transaction with serializable isolation.
    async fn transaction_serializable<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Transaction context providing store access within a transaction.
///
/// Lifecycle transitions issued through a store from this context open a
/// savepoint, so a failure anywhere rolls back the whole unit.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Soft delete aware store for `E` bound to this transaction
    pub fn store<E: SoftDeleteEntity>(&self) -> SoftDeleteStore<'a, E, DatabaseTransaction> {
        SoftDeleteStore::new(self.txn)
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    region_repo: Arc<RegionStore>,
    cafe_repo: Arc<CafeStore>,
    review_repo: Arc<ReviewStore>,
    like_repo: Arc<LikeStore>,
    user_repo: Arc<UserStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            region_repo: Arc::new(RegionStore::new(db.clone())),
            cafe_repo: Arc::new(CafeStore::new(db.clone())),
            review_repo: Arc::new(ReviewStore::new(db.clone())),
            like_repo: Arc::new(LikeStore::new(db.clone())),
            user_repo: Arc::new(UserStore::new(db.clone())),
            db,
        }
    }

    async fn execute_transaction<F, T>(&self, isolation: IsolationLevel, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(Some(isolation), Some(AccessMode::ReadWrite))
            .await
            .map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn regions(&self) -> Arc<dyn RegionRepository> {
        self.region_repo.clone()
    }

    fn cafes(&self) -> Arc<dyn CafeRepository> {
        self.cafe_repo.clone()
    }

    fn reviews(&self) -> Arc<dyn ReviewRepository> {
        self.review_repo.clone()
    }

    fn likes(&self) -> Arc<dyn LikeRepository> {
        self.like_repo.clone()
    }

    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::ReadCommitted, f).await
    }

    async fn transaction_serializable<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::Serializable, f).await
    }
}

/// Shorthand for running a block inside `UnitOfWork::transaction`.
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction(|$ctx| Box::pin(async move { $body })).await
    };
}
