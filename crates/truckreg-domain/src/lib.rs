//! Domain layer - repository traits and business rules for accounts and truck records

pub mod repository;
pub mod service;

pub use repository::{AccountRepository, TruckRecordRepository};
