//! User service - Request orchestration for the `users` resource.
//!
//! Each operation runs validation, existence and uniqueness checks, then a
//! single repository call. Ids arrive as raw path segments and are parsed
//! before the store is touched.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{
    normalize_email, parse_user_id, validate_user, NewUser, User, UserChanges, UserInput,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UserRepository;

const CREATE_CONFLICT_MESSAGE: &str =
    "User with this email already exists. Please use a different email address.";
const CREATE_CONFLICT_DETAILS: &str = "This email address is already taken";
const UPDATE_CONFLICT_MESSAGE: &str = "Email already exists";
const UPDATE_CONFLICT_DETAILS: &str = "Another user with this email already exists";

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Validate and insert a new user
    async fn create_user(&self, input: UserInput) -> AppResult<User>;

    /// List all users, newest first
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Get user by raw id
    async fn get_user(&self, id: &str) -> AppResult<User>;

    /// Apply a partial update
    async fn update_user(&self, id: &str, input: UserInput) -> AppResult<User>;

    /// Delete a user, returning the deleted id
    async fn delete_user(&self, id: &str) -> AppResult<i64>;
}

/// Concrete implementation of UserService using a repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    async fn existing(&self, id: i64) -> AppResult<User> {
        self.repo.find_by_id(id).await?.ok_or_not_found(id)
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn create_user(&self, input: UserInput) -> AppResult<User> {
        let (name, email) = (input.name_str(), input.email_str());
        validate_user(name, email)
            .into_result()
            .map_err(AppError::validation)?;

        // Both present after validation
        let name = name.unwrap_or_default().trim().to_string();
        let email = normalize_email(email.unwrap_or_default());

        // Not atomic with the insert: concurrent creates may both pass
        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict(
                CREATE_CONFLICT_MESSAGE,
                CREATE_CONFLICT_DETAILS,
            ));
        }

        let user = self.repo.create(NewUser { name, email }).await?;
        tracing::info!(user_id = user.id, "User created");
        Ok(user)
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repo.find_all().await
    }

    async fn get_user(&self, id: &str) -> AppResult<User> {
        let id = parse_user_id(id)?;
        self.existing(id).await
    }

    async fn update_user(&self, id: &str, input: UserInput) -> AppResult<User> {
        let id = parse_user_id(id)?;
        let current = self.existing(id).await?;

        let (has_name, has_email) = (input.has_name(), input.has_email());

        if has_name || has_email {
            let name = if has_name {
                input.name_str()
            } else {
                Some(current.name.as_str())
            };
            let email = if has_email {
                input.email_str()
            } else {
                Some(current.email.as_str())
            };
            validate_user(name, email)
                .into_result()
                .map_err(AppError::validation)?;
        }

        let mut changes = UserChanges::default();
        if has_name {
            changes.name = input.name_str().map(|n| n.trim().to_string());
        }
        if has_email {
            changes.email = input.email_str().map(normalize_email);
        }

        if let Some(email) = changes.email.as_deref().filter(|e| *e != current.email) {
            if let Some(other) = self.repo.find_by_email(email).await? {
                if other.id != id {
                    return Err(AppError::conflict(
                        UPDATE_CONFLICT_MESSAGE,
                        UPDATE_CONFLICT_DETAILS,
                    ));
                }
            }
        }

        let user = self.repo.update(id, changes).await?;
        tracing::info!(user_id = user.id, "User updated");
        Ok(user)
    }

    async fn delete_user(&self, id: &str) -> AppResult<i64> {
        let id = parse_user_id(id)?;
        self.existing(id).await?;

        if !self.repo.delete(id).await? {
            // Row vanished between the lookup and the delete
            return Err(AppError::NotFound(id));
        }
        tracing::info!(user_id = id, "User deleted");
        Ok(id)
    }
}
