use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::UserDocument;
use crate::store::{StoreError, UserStore};

/// In-process document collection. Used by the test suite and when
/// `DATABASE_URL=memory://`.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<UserDocument>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn list(&self) -> Result<Vec<UserDocument>, StoreError> {
        Ok(self.users.read().await.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserDocument>, StoreError> {
        Ok(self.users.read().await.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserDocument>, StoreError> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create(&self, user: UserDocument) -> Result<UserDocument, StoreError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.username == user.username) {
            return Err(StoreError::DuplicateUsername);
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn save(&self, user: &UserDocument) -> Result<bool, StoreError> {
        let mut users = self.users.write().await;
        if users
            .iter()
            .any(|u| u.id != user.id && u.username == user.username)
        {
            return Err(StoreError::DuplicateUsername);
        }
        match users.iter_mut().find(|u| u.id == user.id) {
            Some(stored) => {
                *stored = user.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() != before)
    }
}
