//! Password hashing
//!
//! Two schemes are supported. Unsalted SHA-256 keeps existing `users.csv` files
//! readable; Argon2id with a random salt is available for new deployments.
//! Verification looks at the stored string, so a table may mix both.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher as _, PasswordVerifier as _};
use sha2::{Digest, Sha256};

use truckreg_types::{HashScheme, PasswordHashError};

/// Prefix of every Argon2 PHC string
const ARGON2_PREFIX: &str = "$argon2";

/// One-way password hashing and verification
pub trait PasswordHasher {
    /// Hash a plaintext password into the string stored on disk
    fn hash(&self, password: &str) -> Result<String, PasswordHashError>;

    /// Check a plaintext password against a stored hash
    fn verify(&self, password: &str, stored: &str) -> bool;
}

/// Unsalted SHA-256, lowercase hex
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl PasswordHasher for Sha256Hasher {
    fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        let digest = Sha256::digest(password.as_bytes());
        Ok(format!("{:x}", digest))
    }

    fn verify(&self, password: &str, stored: &str) -> bool {
        match self.hash(password) {
            Ok(hash) => hash.as_bytes() == stored.as_bytes(),
            Err(_) => false,
        }
    }
}

/// Salted Argon2id (default parameters)
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Hasher;

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordHashError(e.to_string()))
    }

    fn verify(&self, password: &str, stored: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(stored) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

/// Hashes with the configured scheme, verifies with whichever scheme produced the stored hash
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordPolicy {
    scheme: HashScheme,
}

impl PasswordPolicy {
    pub fn new(scheme: HashScheme) -> Self {
        Self { scheme }
    }

    pub fn scheme(&self) -> HashScheme {
        self.scheme
    }
}

impl PasswordHasher for PasswordPolicy {
    fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        match self.scheme {
            HashScheme::Sha256 => Sha256Hasher.hash(password),
            HashScheme::Argon2 => Argon2Hasher.hash(password),
        }
    }

    fn verify(&self, password: &str, stored: &str) -> bool {
        if stored.starts_with(ARGON2_PREFIX) {
            Argon2Hasher.verify(password, stored)
        } else {
            Sha256Hasher.verify(password, stored)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_digest() {
        let hash = Sha256Hasher.hash("abc").unwrap();
        assert_eq!(
            hash,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_sha256_is_deterministic() {
        let a = Sha256Hasher.hash("pw1").unwrap();
        let b = Sha256Hasher.hash("pw1").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(Sha256Hasher.verify("pw1", &a));
        assert!(!Sha256Hasher.verify("pw1x", &a));
    }

    #[test]
    fn test_argon2_is_salted() {
        let a = Argon2Hasher.hash("pw1").unwrap();
        let b = Argon2Hasher.hash("pw1").unwrap();
        assert_ne!(a, b);
        assert!(a.starts_with(ARGON2_PREFIX));
        assert!(Argon2Hasher.verify("pw1", &a));
        assert!(Argon2Hasher.verify("pw1", &b));
        assert!(!Argon2Hasher.verify("pw2", &a));
    }

    #[test]
    fn test_argon2_rejects_garbage_hash() {
        assert!(!Argon2Hasher.verify("pw1", "not-a-phc-string"));
    }

    #[test]
    fn test_policy_verifies_mixed_schemes() {
        let sha = Sha256Hasher.hash("secret").unwrap();
        let argon = Argon2Hasher.hash("secret").unwrap();

        for scheme in [HashScheme::Sha256, HashScheme::Argon2] {
            let policy = PasswordPolicy::new(scheme);
            assert!(policy.verify("secret", &sha));
            assert!(policy.verify("secret", &argon));
            assert!(!policy.verify("Secret", &sha));
            assert!(!policy.verify("Secret", &argon));
        }
    }

    #[test]
    fn test_policy_hashes_with_configured_scheme() {
        let sha = PasswordPolicy::new(HashScheme::Sha256).hash("pw").unwrap();
        assert!(!sha.starts_with(ARGON2_PREFIX));

        let argon = PasswordPolicy::new(HashScheme::Argon2).hash("pw").unwrap();
        assert!(argon.starts_with(ARGON2_PREFIX));
    }
}
