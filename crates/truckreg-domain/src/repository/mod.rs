//! Repository trait definitions for data persistence

use truckreg_types::{AddRecordError, LoginError, RegisterError, TruckFields, TruckRecord};

/// Repository for user accounts (username -> password hash)
pub trait AccountRepository {
    /// Create an account, rejecting duplicates and empty fields
    fn register(&mut self, username: &str, password: &str) -> Result<(), RegisterError>;

    /// Check a username/password pair
    fn login(&self, username: &str, password: &str) -> Result<(), LoginError>;

    /// Whether an account with this exact username exists
    fn contains(&self, username: &str) -> bool;
}

/// Repository for truck records owned by accounts
pub trait TruckRecordRepository {
    /// Insert or replace the record keyed by `fields.truck_number`
    fn add_record(&mut self, owner: &str, fields: TruckFields) -> Result<(), AddRecordError>;

    /// All records owned by `owner`, in table order
    fn list_records(&self, owner: &str) -> Vec<TruckRecord>;
}
