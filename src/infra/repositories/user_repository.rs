//! User repository backed by the `users` table.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, Unchanged,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{NewUser, User, UserChanges};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Every method is a single store call. Lookups return `Ok(None)` when no
/// row matches; store failures surface as [`AppError::Store`].
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user; id and `created_at` are assigned by the store
    async fn create(&self, user: NewUser) -> AppResult<User>;

    /// All users, newest first
    async fn find_all(&self) -> AppResult<Vec<User>>;

    /// Find user by ID
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    /// Find user by (already normalized) email
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Write only the supplied fields. Callers check existence first.
    async fn update(&self, id: i64, changes: UserChanges) -> AppResult<User>;

    /// Remove the row; `true` when a row was deleted
    async fn delete(&self, id: i64) -> AppResult<bool>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: Arc<DatabaseConnection>,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn create(&self, user: NewUser) -> AppResult<User> {
        let active_model = ActiveModel {
            name: Set(user.name),
            email: Set(user.email),
            ..Default::default()
        };

        let model = active_model.insert(self.db.as_ref()).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .order_by_desc(user::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(self.db.as_ref())
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn update(&self, id: i64, changes: UserChanges) -> AppResult<User> {
        // Nothing to write: read the row back instead of issuing an empty UPDATE
        if changes.is_empty() {
            return self.find_by_id(id).await?.ok_or(AppError::NotFound(id));
        }

        let mut active = ActiveModel {
            id: Unchanged(id),
            ..Default::default()
        };
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(email) = changes.email {
            active.email = Set(email);
        }

        let model = active.update(self.db.as_ref()).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => AppError::NotFound(id),
            other => AppError::Store(other),
        })?;
        Ok(User::from(model))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = UserEntity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected > 0)
    }
}
