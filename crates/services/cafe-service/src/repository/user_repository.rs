//! User repository implementation with soft delete support.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use super::soft_delete::{restrict, SoftDeleteStore, Transitioned};
use common::{AppError, AppResult};
use domain::{CreateUser, DomainError, Scope, UpdateUser, User};
use validator::Validate;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Every read names its `Scope`; pass `Scope::Active` for ordinary lookups.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid, scope: Scope) -> AppResult<Option<User>>;

    /// Find user by email address
    async fn find_by_email(&self, email: &str, scope: Scope) -> AppResult<Option<User>>;

    /// List users
    async fn list(&self, scope: Scope) -> AppResult<Vec<User>>;

    /// Create a new user
    async fn create(&self, input: CreateUser) -> AppResult<User>;

    /// Update user fields (only active users)
    async fn update(&self, id: Uuid, input: UpdateUser) -> AppResult<User>;

    /// Soft delete user along with their reviews and likes
    async fn delete(&self, id: Uuid) -> AppResult<Transitioned<User>>;

    /// Restore a soft-deleted user along with their reviews and likes
    async fn restore(&self, id: Uuid) -> AppResult<Transitioned<User>>;

    /// Permanently delete user from database (hard delete)
    async fn hard_delete(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of UserRepository with soft delete
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn lifecycle(&self) -> SoftDeleteStore<'_, UserEntity, DatabaseConnection> {
        SoftDeleteStore::new(&self.db)
    }

    async fn ensure_unique(
        &self,
        username: Option<&str>,
        email: Option<&str>,
        except: Option<Uuid>,
    ) -> AppResult<()> {
        if let Some(username) = username {
            let existing = UserEntity::find()
                .filter(user::Column::Username.eq(username))
                .one(&self.db)
                .await?;
            if existing.is_some_and(|u| Some(u.id) != except) {
                return Err(AppError::conflict("Username"));
            }
        }
        if let Some(email) = email {
            let existing = UserEntity::find()
                .filter(user::Column::Email.eq(email))
                .one(&self.db)
                .await?;
            if existing.is_some_and(|u| Some(u.id) != except) {
                return Err(AppError::conflict("Email"));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid, scope: Scope) -> AppResult<Option<User>> {
        let result = self.lifecycle().find(id, scope).await?;
        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str, scope: Scope) -> AppResult<Option<User>> {
        let query = UserEntity::find().filter(user::Column::Email.eq(email));
        let result = restrict::<UserEntity>(query, scope)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn list(&self, scope: Scope) -> AppResult<Vec<User>> {
        let models = self.lifecycle().list(scope).await?;
        Ok(models.into_iter().map(User::from).collect())
    }

    async fn create(&self, input: CreateUser) -> AppResult<User> {
        input.validate().map_err(DomainError::from)?;
        self.ensure_unique(Some(&input.username), Some(&input.email), None)
            .await?;

        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(input.username),
            email: Set(input.email),
            last_login: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            is_active: Set(true),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn update(&self, id: Uuid, input: UpdateUser) -> AppResult<User> {
        input.validate().map_err(DomainError::from)?;

        // Only allow updating active (non-deleted) users
        let user = self.lifecycle().get(id, Scope::Active).await?;
        self.ensure_unique(input.username.as_deref(), input.email.as_deref(), Some(id))
            .await?;

        let mut active: ActiveModel = user.into();

        if let Some(username) = input.username {
            active.username = Set(username);
        }
        if let Some(email) = input.email {
            active.email = Set(email);
        }
        if let Some(last_login) = input.last_login {
            active.last_login = Set(Some(last_login));
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<Transitioned<User>> {
        let outcome = self.lifecycle().delete(id).await?;
        Ok(outcome.map(User::from))
    }

    async fn restore(&self, id: Uuid) -> AppResult<Transitioned<User>> {
        let outcome = self.lifecycle().restore(id).await?;
        Ok(outcome.map(User::from))
    }

    async fn hard_delete(&self, id: Uuid) -> AppResult<()> {
        self.lifecycle().hard_delete(id).await
    }
}
