//! Persistent stores for accounts and truck records
//!
//! Both stores keep their whole table in memory and rewrite the backing CSV
//! file after every successful mutation. One process per file is assumed:
//! there is no locking, so two processes writing the same table will
//! overwrite each other's changes.

pub mod credentials;
mod ordered;
pub mod records;
pub mod table;

pub use credentials::{CredentialStore, ACCOUNTS_SCHEMA};
pub use records::{RecordStore, RECORDS_SCHEMA};
pub use table::{LoadedTable, TableSchema};
