//! Password hashing and verification.
use async_trait::async_trait;
use scrypt::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    },
    Params, Scrypt,
};
use tracing::{debug, instrument};

use crate::shared::AppError;

/// Hashing seam used by the driver service; implementations run off the async workers
#[async_trait]
pub trait PasswordHashing {
    async fn hash_password(&self, password: String) -> Result<String, AppError>;
    async fn verify_password(&self, password: String, digest: String) -> Result<bool, AppError>;
}

/// Salted scrypt hasher producing PHC strings (`$scrypt$ln=..,r=..,p=..$salt$hash`)
///
/// The cost is only used when hashing; verification reads the parameters
/// embedded in the stored digest, so changing the cost doesn't lock out
/// existing drivers.
#[derive(Debug, Clone, Copy)]
pub struct CredentialHasher {
    params: Params,
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self {
            params: Params::recommended(),
        }
    }
}

impl CredentialHasher {
    /// Hasher with a custom work factor (`N = 2^log_n`)
    pub fn with_cost(log_n: u8) -> Result<Self, AppError> {
        let params = Params::new(
            log_n,
            Params::RECOMMENDED_R,
            Params::RECOMMENDED_P,
            Params::RECOMMENDED_LEN,
        )
        .map_err(|e| AppError::Hashing(e.to_string()))?;
        Ok(Self { params })
    }

    pub fn log_n(&self) -> u8 {
        self.params.log_n()
    }

    /// Hash a password with a fresh random salt
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Scrypt
            .hash_password_customized(password.as_bytes(), None, None, self.params, &salt)
            .map_err(|e| AppError::Hashing(e.to_string()))?;
        Ok(hash.to_string())
    }

    /// Verify a password against a stored digest. Malformed digests never match.
    pub fn verify(&self, password: &str, digest: &str) -> bool {
        let parsed_hash = match PasswordHash::new(digest) {
            Ok(h) => h,
            Err(e) => {
                debug!(error = %e, "Stored digest is not a valid PHC string");
                return false;
            }
        };
        Scrypt
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }

    /// Runs [`hash`](Self::hash) on the blocking pool
    #[instrument(skip_all)]
    pub async fn hash_blocking(&self, password: String) -> Result<String, AppError> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::Hashing(e.to_string()))?
    }

    /// Runs [`verify`](Self::verify) on the blocking pool
    #[instrument(skip_all)]
    pub async fn verify_blocking(
        &self,
        password: String,
        digest: String,
    ) -> Result<bool, AppError> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.verify(&password, &digest))
            .await
            .map_err(|e| AppError::Hashing(e.to_string()))
    }
}

#[async_trait]
impl PasswordHashing for CredentialHasher {
    async fn hash_password(&self, password: String) -> Result<String, AppError> {
        self.hash_blocking(password).await
    }

    async fn verify_password(&self, password: String, digest: String) -> Result<bool, AppError> {
        self.verify_blocking(password, digest).await
    }
}
