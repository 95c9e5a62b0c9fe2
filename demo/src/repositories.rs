pub mod memory;

use anyhow::Result;
use uuid::Uuid;

use crate::domains::User;

#[derive(Debug, thiserror::Error)]
#[error("email {0} is already registered")]
pub struct DuplicateEmail(pub String);

#[async_trait::async_trait]
pub trait UserRepository {
    async fn find_one(&self, id: Uuid) -> Result<Option<User>>;
    async fn list(&self) -> Result<Vec<User>>;
    /// Fails with [`DuplicateEmail`] when the email is taken.
    async fn insert(&self, user: &User) -> Result<()>;
}
