//! Error types for truckreg

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),
}

/// Backing table could not be read or written
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Password hashing failed (never produced by the SHA-256 scheme)
#[derive(Debug, Error)]
#[error("Password hashing failed: {0}")]
pub struct PasswordHashError(pub String);

/// Outcome of a rejected account registration
#[derive(Debug, Error)]
pub enum RegisterError {
    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error(transparent)]
    Hashing(#[from] PasswordHashError),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Outcome of a rejected login
///
/// Unknown usernames and wrong passwords are reported the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    #[error("Invalid username or password")]
    InvalidCredentials,
}

/// Outcome of a rejected truck record insert
#[derive(Debug, Error)]
pub enum AddRecordError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Weight must be a non-negative number of tons, got {0}")]
    InvalidWeight(f64),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Errors surfaced by the registry service to the presentation layer
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Not logged in")]
    NotAuthenticated,

    #[error("Account no longer exists: {0}")]
    UnknownOwner(String),

    #[error(transparent)]
    Register(#[from] RegisterError),

    #[error(transparent)]
    Login(#[from] LoginError),

    #[error(transparent)]
    AddRecord(#[from] AddRecordError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("{0}")]
    Service(#[from] ServiceError),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, Error>;
