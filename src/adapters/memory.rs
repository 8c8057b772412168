use crate::domain::model::User;
use crate::domain::ports::UserRepository;
use crate::utils::error::{RegistrationError, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Process-local store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, user_id: &str) -> Option<User> {
        self.users.read().await.get(user_id).cloned()
    }

    pub async fn all(&self) -> Vec<User> {
        self.users.read().await.values().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn create_user(&self, user: &User) -> Result<()> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.user_id) {
            return Err(RegistrationError::RepositoryError {
                message: format!("User {} already exists", user.user_id),
                source: None,
            });
        }
        users.insert(user.user_id.clone(), user.clone());
        Ok(())
    }
}
