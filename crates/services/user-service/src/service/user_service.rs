//! User service - the user lifecycle rules.
//!
//! Validates input, enforces email uniqueness and existence checks, and
//! orchestrates record store calls. Holds no state of its own.

use async_trait::async_trait;
use std::sync::Arc;

use common::{AppError, AppResult};
use domain::{User, UserFields};

use crate::repository::UserRepository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// Validate and insert a new user; the store assigns the identifier
    async fn create_user(&self, fields: UserFields) -> AppResult<User>;

    /// Get user by identifier
    async fn fetch_user(&self, id: &str) -> AppResult<User>;

    /// List every user
    async fn fetch_all_users(&self) -> AppResult<Vec<User>>;

    /// Replace every attribute of an existing user, keeping its identifier
    async fn edit_user(&self, id: &str, fields: UserFields) -> AppResult<User>;

    /// Permanently remove a user
    async fn delete_user(&self, id: &str) -> AppResult<()>;
}

/// Concrete implementation of UserService using a record store.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    async fn email_taken(&self, email: &str) -> AppResult<bool> {
        Ok(self.repo.find_by_email(email).await?.is_some())
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn create_user(&self, fields: UserFields) -> AppResult<User> {
        let profile = fields.into_profile()?;

        // Fast path only; the store's unique index has the final word
        if self.email_taken(&profile.email_address).await? {
            tracing::warn!(email = %profile.email_address, "Create rejected, email in use");
            return Err(AppError::email_already_used(profile.email_address));
        }

        let user = self.repo.insert(profile).await?;
        tracing::info!(user_id = %user.id, "User created");
        Ok(user)
    }

    async fn fetch_user(&self, id: &str) -> AppResult<User> {
        tracing::debug!(user_id = %id, "Fetching user");
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::user_not_found(id))
    }

    async fn fetch_all_users(&self) -> AppResult<Vec<User>> {
        Ok(self.repo.list().await?)
    }

    async fn edit_user(&self, id: &str, fields: UserFields) -> AppResult<User> {
        let profile = fields.into_profile()?;
        let existing = self.fetch_user(id).await?;

        if profile.email_address != existing.email_address
            && self.email_taken(&profile.email_address).await?
        {
            tracing::warn!(user_id = %id, email = %profile.email_address, "Edit rejected, email in use");
            return Err(AppError::email_already_used(profile.email_address));
        }

        let user = self.repo.replace(existing.replaced_with(profile)).await?;
        tracing::info!(user_id = %user.id, "User replaced");
        Ok(user)
    }

    async fn delete_user(&self, id: &str) -> AppResult<()> {
        self.fetch_user(id).await?;

        // Gone between the lookup and the delete
        if !self.repo.delete_by_id(id).await? {
            return Err(AppError::user_not_found(id));
        }

        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{MockUserRepository, StoreError};
    use chrono::{Duration, NaiveDate};
    use domain::UserProfile;

    fn stored_user() -> User {
        User {
            id: "userId".to_string(),
            first_name: "firstName".to_string(),
            last_name: "lastName".to_string(),
            email_address: "valid@email.address".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
        }
    }

    fn fields(email: &str) -> UserFields {
        UserFields {
            first_name: "firstName".to_string(),
            last_name: "lastName".to_string(),
            email_address: email.to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2000, 1, 1),
        }
    }

    fn service(repo: MockUserRepository) -> UserManager {
        UserManager::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn test_create_user_inserts_when_email_free() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .withf(|email| email == "valid@email.address")
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_insert()
            .times(1)
            .returning(|profile: UserProfile| Ok(User::from_profile("userId", profile)));

        let user = service(repo)
            .create_user(fields("valid@email.address"))
            .await
            .unwrap();

        assert_eq!(user, stored_user());
    }

    #[tokio::test]
    async fn test_create_user_rejects_known_email_without_insert() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|_| Ok(Some(stored_user())));
        repo.expect_insert().never();

        let err = service(repo)
            .create_user(fields("valid@email.address"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::EmailAlreadyUsed(ref email) if email == "valid@email.address"));
        assert_eq!(err.to_string(), "User with email 'valid@email.address' already exists.");
    }

    #[tokio::test]
    async fn test_create_user_normalizes_store_duplicate() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_insert()
            .returning(|profile: UserProfile| Err(StoreError::DuplicateEmail(profile.email_address)));

        let err = service(repo)
            .create_user(fields("valid@email.address"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::EmailAlreadyUsed(_)));
    }

    #[tokio::test]
    async fn test_create_user_invalid_fields_never_touch_store() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().never();
        repo.expect_insert().never();

        let invalid = UserFields {
            date_of_birth: Some(domain::today()),
            ..fields("not-an-email")
        };
        let err = service(repo).create_user(invalid).await.unwrap_err();

        match err {
            AppError::Validation(violations) => assert_eq!(violations.len(), 2),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_user_propagates_database_failure() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|_| Err(StoreError::Database(sea_orm::DbErr::Custom("down".into()))));

        let err = service(repo)
            .create_user(fields("valid@email.address"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Database(_)));
    }

    #[tokio::test]
    async fn test_fetch_user_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .withf(|id| id == "userId")
            .times(1)
            .returning(|_| Ok(Some(stored_user())));

        let user = service(repo).fetch_user("userId").await.unwrap();

        assert_eq!(user, stored_user());
    }

    #[tokio::test]
    async fn test_fetch_user_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let err = service(repo).fetch_user("userId").await.unwrap_err();

        assert_eq!(err.to_string(), "The user with id 'userId' does not exist");
    }

    #[tokio::test]
    async fn test_fetch_all_users() {
        let mut repo = MockUserRepository::new();
        repo.expect_list()
            .times(1)
            .returning(|| Ok(vec![stored_user()]));

        let users = service(repo).fetch_all_users().await.unwrap();

        assert_eq!(users, vec![stored_user()]);
    }

    #[tokio::test]
    async fn test_edit_user_replaces_all_fields_keeping_id() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(Some(stored_user())));
        repo.expect_find_by_email().never();
        repo.expect_replace().times(1).returning(|user| Ok(user));

        let update = UserFields {
            first_name: "updatedFirstName".to_string(),
            last_name: "updatedLastName".to_string(),
            ..fields("valid@email.address")
        };
        let user = service(repo).edit_user("userId", update).await.unwrap();

        assert_eq!(user.id, "userId");
        assert_eq!(user.first_name, "updatedFirstName");
        assert_eq!(user.last_name, "updatedLastName");
        assert_eq!(user.email_address, "valid@email.address");
    }

    #[tokio::test]
    async fn test_edit_user_not_found_skips_replace() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_replace().never();

        let err = service(repo)
            .edit_user("userId", fields("valid@email.address"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::UserNotFound(ref id) if id == "userId"));
    }

    #[tokio::test]
    async fn test_edit_user_rejects_email_owned_by_another_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(Some(stored_user())));
        repo.expect_find_by_email()
            .withf(|email| email == "taken@email.address")
            .returning(|email| {
                Ok(Some(User {
                    id: "otherId".to_string(),
                    email_address: email.to_string(),
                    ..stored_user()
                }))
            });
        repo.expect_replace().never();

        let err = service(repo)
            .edit_user("userId", fields("taken@email.address"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::EmailAlreadyUsed(_)));
    }

    #[tokio::test]
    async fn test_edit_user_normalizes_store_duplicate() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(Some(stored_user())));
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_replace()
            .times(1)
            .returning(|user: User| Err(StoreError::DuplicateEmail(user.email_address)));

        let err = service(repo)
            .edit_user("userId", fields("taken@email.address"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::EmailAlreadyUsed(ref email) if email == "taken@email.address"));
    }

    #[tokio::test]
    async fn test_edit_user_vanished_between_lookup_and_replace() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(Some(stored_user())));
        repo.expect_replace()
            .times(1)
            .returning(|user: User| Err(StoreError::NotFound(user.id)));

        let err = service(repo)
            .edit_user("userId", fields("valid@email.address"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::UserNotFound(ref id) if id == "userId"));
        assert_eq!(err.to_string(), "The user with id 'userId' does not exist");
    }

    #[tokio::test]
    async fn test_edit_user_rejects_future_date_before_lookup() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().never();

        let future = UserFields {
            date_of_birth: Some(domain::today() + Duration::days(1)),
            ..fields("valid@email.address")
        };
        let err = service(repo).edit_user("userId", future).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_delete_user_removes_existing() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(Some(stored_user())));
        repo.expect_delete_by_id()
            .withf(|id| id == "userId")
            .times(1)
            .returning(|_| Ok(true));

        assert!(service(repo).delete_user("userId").await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_user_not_found_skips_delete() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_delete_by_id().never();

        let err = service(repo).delete_user("userId").await.unwrap_err();

        assert!(matches!(err, AppError::UserNotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_user_vanished_between_lookup_and_delete() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(Some(stored_user())));
        repo.expect_delete_by_id().returning(|_| Ok(false));

        let err = service(repo).delete_user("userId").await.unwrap_err();

        assert!(matches!(err, AppError::UserNotFound(_)));
    }
}
