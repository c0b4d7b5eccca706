//! Credential hashing - the only place plaintext passwords are handled.
//!
//! Hashes are Argon2id PHC strings with a per-call random salt, so the
//! same plaintext never hashes to the same value twice.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use crate::config::HasherSettings;
use crate::errors::{AppError, AppResult};

/// One-way hash and verify boundary for passwords.
pub trait CredentialHasher: Send + Sync {
    /// Hash a plaintext password.
    ///
    /// # Errors
    /// Returns `InvalidInput` when no plaintext is given.
    fn hash(&self, plaintext: Option<&str>) -> AppResult<String>;

    /// Check a plaintext against a stored hash.
    ///
    /// A missing argument or a malformed hash is simply "no match".
    fn verify(&self, plaintext: Option<&str>, hash: Option<&str>) -> bool;
}

/// Argon2id implementation of [`CredentialHasher`].
#[derive(Clone)]
pub struct Argon2Hasher {
    argon2: Argon2<'static>,
}

impl std::fmt::Debug for Argon2Hasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let params = self.argon2.params();
        f.debug_struct("Argon2Hasher")
            .field("memory_kib", &params.m_cost())
            .field("iterations", &params.t_cost())
            .field("parallelism", &params.p_cost())
            .finish()
    }
}

impl Argon2Hasher {
    /// Build a hasher with explicit cost parameters.
    ///
    /// # Errors
    /// Returns an internal error if Argon2 rejects the parameters
    /// (e.g. memory below 8 KiB per lane).
    pub fn new(settings: HasherSettings) -> AppResult<Self> {
        let params = Params::new(
            settings.memory_kib,
            settings.iterations,
            settings.parallelism,
            None,
        )
        .map_err(|e| AppError::internal(format!("Invalid Argon2 parameters: {}", e)))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, plaintext: Option<&str>) -> AppResult<String> {
        let plaintext =
            plaintext.ok_or_else(|| AppError::invalid_input("Password is required for hashing"))?;

        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?;
        Ok(hash.to_string())
    }

    fn verify(&self, plaintext: Option<&str>, hash: Option<&str>) -> bool {
        let (Some(plaintext), Some(hash)) = (plaintext, hash) else {
            return false;
        };

        match PasswordHash::new(hash) {
            // Cost parameters come from the PHC string, so hashes made
            // under older settings still verify.
            Ok(parsed) => self
                .argon2
                .verify_password(plaintext.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::debug!("Unparseable password hash: {}", e);
                false
            }
        }
    }
}
