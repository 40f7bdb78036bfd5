//! Argon2 password hashing implementation.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use async_trait::async_trait;

use blog_core::ports::{AuthError, PasswordService};

/// Run CPU-bound hashing on the blocking thread pool.
async fn off_executor<T, F>(work: F) -> Result<T, AuthError>
where
    F: FnOnce() -> Result<T, AuthError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AuthError::HashingError(e.to_string()))?
}

/// Argon2id work factor.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHashConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for PasswordHashConfig {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

/// Argon2-based password service.
#[derive(Clone)]
pub struct Argon2PasswordService {
    argon2: Argon2<'static>,
}

impl Argon2PasswordService {
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }

    /// Build a hasher with an explicit work factor.
    pub fn with_config(config: PasswordHashConfig) -> Result<Self, AuthError> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| AuthError::HashingError(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl Default for Argon2PasswordService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PasswordService for Argon2PasswordService {
    async fn hash(&self, password: &str) -> Result<String, AuthError> {
        let argon2 = self.argon2.clone();
        let password = password.to_owned();

        off_executor(move || {
            let salt = SaltString::generate(&mut OsRng);
            argon2
                .hash_password(password.as_bytes(), &salt)
                .map(|h| h.to_string())
                .map_err(|e| AuthError::HashingError(e.to_string()))
        })
        .await
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let argon2 = self.argon2.clone();
        let password = password.to_owned();
        let hash = hash.to_owned();

        off_executor(move || {
            let parsed_hash =
                PasswordHash::new(&hash).map_err(|e| AuthError::HashingError(e.to_string()))?;

            // Parameters are read from the stored hash, so older work factors still verify.
            Ok(argon2
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap() -> Argon2PasswordService {
        Argon2PasswordService::with_config(PasswordHashConfig {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_hash_and_verify() {
        let service = cheap();
        let password = "secure_password_123";

        let hash = service.hash(password).await.unwrap();
        assert!(service.verify(password, &hash).await.unwrap());
        assert!(!service.verify("wrong_password", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_same_password_gets_fresh_salt() {
        let service = cheap();

        let first = service.hash("secret123").await.unwrap();
        let second = service.hash("secret123").await.unwrap();

        assert_ne!(first, second);
        assert!(service.verify("secret123", &first).await.unwrap());
        assert!(service.verify("secret123", &second).await.unwrap());
    }

    #[tokio::test]
    async fn test_hash_from_other_work_factor_verifies() {
        let hash = cheap().hash("secret123").await.unwrap();
        assert!(Argon2PasswordService::new().verify("secret123", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_malformed_hash_is_an_error() {
        assert!(cheap().verify("secret123", "not-a-phc-string").await.is_err());
    }

    #[test]
    fn test_invalid_work_factor_is_rejected() {
        let result = Argon2PasswordService::with_config(PasswordHashConfig {
            memory_kib: 1,
            iterations: 0,
            parallelism: 1,
        });
        assert!(matches!(result, Err(AuthError::HashingError(_))));
    }
}
