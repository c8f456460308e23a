//! Domain services

pub mod password;
pub mod validation;

pub use password::{Argon2Hasher, PasswordHasher, PasswordPolicy, Sha256Hasher};
pub use validation::{first_missing, validate_weight};
