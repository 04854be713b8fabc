//! # auth-adapters
//!
//! Argon2-based implementation of the `CredentialHasher` port. The domain
//! stores whatever opaque string this produces; verification parses the
//! PHC-format hash back and checks the candidate against it.

use anyhow::anyhow;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use domains::ports::CredentialHasher;

/// Default-parameter Argon2id hasher with a per-credential random salt.
#[derive(Debug, Default)]
pub struct ArgonCredentialHasher;

impl ArgonCredentialHasher {
    pub fn new() -> Self {
        Self
    }
}

impl CredentialHasher for ArgonCredentialHasher {
    fn hash(&self, password: &str) -> anyhow::Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| anyhow!("password hashing failed: {err}"))?;
        Ok(hash.to_string())
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        let parsed = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(_) => return false,
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trip() {
        let hasher = ArgonCredentialHasher::new();
        let hash = hasher.hash("correct horse battery").unwrap();
        assert!(hasher.verify("correct horse battery", &hash));
        assert!(!hasher.verify("wrong password", &hash));
    }

    #[test]
    fn verify_rejects_garbage_hashes() {
        let hasher = ArgonCredentialHasher::new();
        assert!(!hasher.verify("anything", "not-a-phc-string"));
    }

    #[test]
    fn salting_makes_hashes_unique() {
        let hasher = ArgonCredentialHasher::new();
        let a = hasher.hash("same input").unwrap();
        let b = hasher.hash("same input").unwrap();
        assert_ne!(a, b);
    }
}
