use anyhow::Result;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domains::User;

use super::{DuplicateEmail, UserRepository};

#[derive(Default)]
pub struct MemoryUserRepository {
    users: RwLock<Vec<User>>,
}

#[async_trait::async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_one(&self, id: Uuid) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|user| user.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<User>> {
        Ok(self.users.read().await.clone())
    }

    async fn insert(&self, user: &User) -> Result<()> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email.eq_ignore_ascii_case(&user.email)) {
            return Err(DuplicateEmail(user.email.clone()).into());
        }

        users.push(user.clone());
        Ok(())
    }
}
