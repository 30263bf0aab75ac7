//! Argon2id password hashing for user accounts

use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as Argon2Hasher, PasswordVerifier,
        SaltString,
    },
    Algorithm, Argon2, Params, Version,
};

use crate::auth::config::PasswordConfig;
use crate::error::Error;

/// Password hasher using Argon2id
///
/// Hashes are stored in PHC string format, so verification reads the
/// parameters back from the hash itself.
#[derive(Clone)]
pub struct PasswordHasher {
    params: Params,
    min_password_length: usize,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        let config = PasswordConfig::default();
        Self::new(&config).unwrap_or_else(|_| Self {
            params: Params::default(),
            min_password_length: config.min_password_length,
        })
    }
}

impl PasswordHasher {
    /// Create a hasher from configuration; fails on invalid Argon2 parameters.
    pub fn new(config: &PasswordConfig) -> Result<Self, Error> {
        let params = Params::new(
            config.memory_cost_kib,
            config.time_cost,
            config.parallelism,
            None,
        )
        .map_err(|e| Error::Auth(format!("Invalid Argon2 parameters: {}", e)))?;

        Ok(Self {
            params,
            min_password_length: config.min_password_length,
        })
    }

    /// Hash a password
    ///
    /// Fails with [`Error::ValidationError`] when the password is shorter
    /// than the configured minimum.
    pub fn hash(&self, password: &str) -> Result<String, Error> {
        self.check_policy(password)?;

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone());

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| Error::Auth(format!("Failed to hash password: {}", e)))?;

        Ok(hash.to_string())
    }

    /// Verify a password against a stored hash (constant-time).
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, Error> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| Error::Auth(format!("Invalid password hash format: {}", e)))?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(Error::Auth(format!("Password verification failed: {}", e))),
        }
    }

    /// Check the password policy without hashing.
    pub fn check_policy(&self, password: &str) -> Result<(), Error> {
        if password.chars().count() < self.min_password_length {
            return Err(Error::ValidationError(format!(
                "Password must be at least {} characters",
                self.min_password_length
            )));
        }
        Ok(())
    }

    pub fn min_password_length(&self) -> usize {
        self.min_password_length
    }
}

#[cfg(test)]
pub(crate) fn fast_hasher() -> PasswordHasher {
    PasswordHasher::new(&PasswordConfig {
        memory_cost_kib: 1024,
        time_cost: 1,
        parallelism: 1,
        min_password_length: 6,
    })
    .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = fast_hasher();
        let hash = hasher.hash("rental-desk").unwrap();
        assert!(hash.starts_with("$argon2id$"));

        assert!(hasher.verify("rental-desk", &hash).unwrap());
        assert!(!hasher.verify("rental-desq", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let hasher = fast_hasher();
        let first = hasher.hash("secret1").unwrap();
        let second = hasher.hash("secret1").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_short_password_rejected() {
        let hasher = fast_hasher();
        let err = hasher.hash("abc12").unwrap_err();
        assert!(matches!(err, Error::ValidationError(_)));
        assert!(hasher.check_policy("abc123").is_ok());
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        let hasher = fast_hasher();
        assert!(hasher.verify("whatever", "not-a-phc-string").is_err());
    }

    #[test]
    fn test_invalid_parameters_do_not_panic() {
        let config = PasswordConfig {
            memory_cost_kib: 1,
            time_cost: 0,
            parallelism: 0,
            min_password_length: 6,
        };
        assert!(PasswordHasher::new(&config).is_err());
        assert_eq!(PasswordHasher::default().min_password_length(), 6);
    }
}
