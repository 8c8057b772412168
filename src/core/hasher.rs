use crate::domain::ports::CredentialHasher;
use crate::utils::error::{RegistrationError, Result};
use async_trait::async_trait;

pub const DEFAULT_COST: u32 = 10;
pub const MIN_COST: u32 = 4;
pub const MAX_COST: u32 = 31;

/// Salted bcrypt. The work runs on the blocking pool.
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

#[async_trait]
impl CredentialHasher for BcryptHasher {
    async fn hash(&self, plaintext: &str) -> Result<String> {
        let cost = self.cost;
        let plaintext = plaintext.to_owned();

        tokio::task::spawn_blocking(move || bcrypt::hash(plaintext, cost))
            .await
            .map_err(|e| RegistrationError::hashing("Hashing task did not complete", e))?
            .map_err(|e| RegistrationError::hashing("bcrypt rejected the credential", e))
    }

    async fn verify(&self, plaintext: &str, hashed: &str) -> Result<bool> {
        let plaintext = plaintext.to_owned();
        let hashed = hashed.to_owned();

        tokio::task::spawn_blocking(move || bcrypt::verify(plaintext, &hashed))
            .await
            .map_err(|e| RegistrationError::hashing("Verification task did not complete", e))?
            .map_err(|e| RegistrationError::hashing("bcrypt could not verify the credential", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    #[tokio::test]
    async fn test_hash_is_salted_and_verifiable() {
        let hasher = BcryptHasher::new(MIN_COST);

        let first = hasher.hash("longenough1").await.unwrap();
        let second = hasher.hash("longenough1").await.unwrap();

        assert_ne!(first, second);
        assert_ne!(first, "longenough1");
        assert!(hasher.verify("longenough1", &first).await.unwrap());
        assert!(hasher.verify("longenough1", &second).await.unwrap());
        assert!(!hasher.verify("wrong-password", &first).await.unwrap());
    }

    #[tokio::test]
    async fn test_hash_encodes_cost() {
        let hasher = BcryptHasher::new(5);
        let hashed = hasher.hash("longenough1").await.unwrap();
        assert!(hashed.starts_with("$2b$05$"));
    }

    #[tokio::test]
    async fn test_invalid_cost_surfaces_hashing_error() {
        let hasher = BcryptHasher::new(MAX_COST + 1);
        let err = assert_err!(hasher.hash("longenough1").await);
        assert!(matches!(err, RegistrationError::HashingError { .. }));
        assert_eq!(err.status_code(), 500);
    }

    #[tokio::test]
    async fn test_verify_against_garbage_hash_is_an_error() {
        let hasher = BcryptHasher::default();
        assert_eq!(hasher.cost(), DEFAULT_COST);
        assert_err!(hasher.verify("longenough1", "not-a-hash").await);
    }

    #[tokio::test]
    async fn test_min_cost_hash_succeeds() {
        let hasher = BcryptHasher::new(MIN_COST);
        let hashed = assert_ok!(hasher.hash("x").await);
        assert!(hashed.starts_with("$2b$04$"));
    }
}
