use crate::domain::model::User;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Durable store for user records. Implementations never generate ids and
/// must refuse to overwrite an existing `user_id`.
pub trait UserRepository: Send + Sync {
    fn create_user(&self, user: &User) -> impl std::future::Future<Output = Result<()>> + Send;
}

#[async_trait]
pub trait CredentialHasher: Send + Sync {
    async fn hash(&self, plaintext: &str) -> Result<String>;
    async fn verify(&self, plaintext: &str, hashed: &str) -> Result<bool>;
}

pub trait ConfigProvider: Send + Sync {
    fn users_table(&self) -> &str;
    fn log_level(&self) -> &str;
    fn production(&self) -> bool;
    fn debug(&self) -> bool;
    fn bcrypt_cost(&self) -> u32;
}
