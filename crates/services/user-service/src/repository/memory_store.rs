//! Process-local record store for development and testing.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use domain::{User, UserProfile};

use super::user_repository::{StoreError, StoreResult, UserRepository};

/// In-memory implementation of UserRepository.
///
/// Email uniqueness is checked and enforced under the same write lock, so
/// concurrent inserts of one address cannot both succeed. Listing follows
/// insertion order.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email_address == email).cloned())
    }

    async fn insert(&self, profile: UserProfile) -> StoreResult<User> {
        let mut users = self.users.write().await;

        if users.iter().any(|u| u.email_address == profile.email_address) {
            return Err(StoreError::DuplicateEmail(profile.email_address));
        }

        let user = User::from_profile(Uuid::new_v4().to_string(), profile);
        users.push(user.clone());
        Ok(user)
    }

    async fn replace(&self, user: User) -> StoreResult<User> {
        let mut users = self.users.write().await;

        let position = users
            .iter()
            .position(|u| u.id == user.id)
            .ok_or_else(|| StoreError::NotFound(user.id.clone()))?;

        if users
            .iter()
            .any(|u| u.id != user.id && u.email_address == user.email_address)
        {
            return Err(StoreError::DuplicateEmail(user.email_address));
        }

        users[position] = user.clone();
        Ok(user)
    }

    async fn delete_by_id(&self, id: &str) -> StoreResult<bool> {
        let mut users = self.users.write().await;
        match users.iter().position(|u| u.id == id) {
            Some(position) => {
                users.remove(position);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list(&self) -> StoreResult<Vec<User>> {
        Ok(self.users.read().await.clone())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
