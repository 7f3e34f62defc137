//! User record store: the port and its SeaORM adapter.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Unchanged, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, Set, SqlErr,
};
use thiserror::Error;
use uuid::Uuid;

use super::entities::user::{self, Entity as UserEntity};
use super::entities::UserActiveModel;
use common::AppError;
use domain::{User, UserProfile};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Failures raised by a record store.
///
/// `DuplicateEmail` is the store's own uniqueness verdict and is authoritative
/// even when a prior lookup found the address free.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("email '{0}' is already taken")]
    DuplicateEmail(String),

    #[error("record '{0}' not found")]
    NotFound(String),

    #[error(transparent)]
    Database(#[from] DbErr),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail(email) => AppError::EmailAlreadyUsed(email),
            StoreError::NotFound(id) => AppError::UserNotFound(id),
            StoreError::Database(e) => AppError::Database(e),
        }
    }
}

/// User record store trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by identifier
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<User>>;

    /// Find user by exact email address
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Insert a new record; the store assigns the identifier
    async fn insert(&self, profile: UserProfile) -> StoreResult<User>;

    /// Overwrite every attribute of an existing record
    async fn replace(&self, user: User) -> StoreResult<User>;

    /// Remove a record; `false` when nothing matched
    async fn delete_by_id(&self, id: &str) -> StoreResult<bool>;

    /// List every record
    async fn list(&self) -> StoreResult<Vec<User>>;

    /// Check that the store is reachable
    async fn ping(&self) -> StoreResult<()>;
}

/// Map a write failure, recognising unique-index violations on email.
fn write_error(err: DbErr, email: &str) -> StoreError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => StoreError::DuplicateEmail(email.to_owned()),
        _ => StoreError::Database(err),
    }
}

/// PostgreSQL-backed implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<User>> {
        let result = UserEntity::find_by_id(id.to_owned()).one(&self.db).await?;
        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::EmailAddress.eq(email))
            .one(&self.db)
            .await?;

        Ok(result.map(User::from))
    }

    async fn insert(&self, profile: UserProfile) -> StoreResult<User> {
        let email = profile.email_address.clone();
        let active_model = UserActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            first_name: Set(profile.first_name),
            last_name: Set(profile.last_name),
            email_address: Set(profile.email_address),
            date_of_birth: Set(profile.date_of_birth),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, &email))?;
        Ok(User::from(model))
    }

    async fn replace(&self, user: User) -> StoreResult<User> {
        let id = user.id.clone();
        let email = user.email_address.clone();
        let active_model = UserActiveModel {
            id: Unchanged(user.id),
            first_name: Set(user.first_name),
            last_name: Set(user.last_name),
            email_address: Set(user.email_address),
            date_of_birth: Set(user.date_of_birth),
        };

        match active_model.update(&self.db).await {
            Ok(model) => Ok(User::from(model)),
            Err(DbErr::RecordNotUpdated) => Err(StoreError::NotFound(id)),
            Err(e) => Err(write_error(e, &email)),
        }
    }

    async fn delete_by_id(&self, id: &str) -> StoreResult<bool> {
        let result = UserEntity::delete_by_id(id.to_owned()).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    async fn list(&self) -> StoreResult<Vec<User>> {
        let models = UserEntity::find().all(&self.db).await?;
        Ok(models.into_iter().map(User::from).collect())
    }

    async fn ping(&self) -> StoreResult<()> {
        self.db.ping().await?;
        Ok(())
    }
}
