//! Account and truck record types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    /// Case-sensitive unique login name
    pub username: String,

    /// One-way hash of the password (hex SHA-256 or Argon2 PHC string)
    pub password_hash: String,
}

/// Caller-supplied values for a truck registration
///
/// Carries no owner; records take it from the authenticated session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TruckFields {
    pub truck_number: String,
    pub driver_name: String,
    pub driver_id: String,
    pub contact_number: String,
    pub registration_date: NaiveDate,
    /// Measured weight in tons
    #[serde(default)]
    pub weight: f64,
    /// Area where the truck was weighed
    #[serde(default)]
    pub area: String,
}

impl TruckFields {
    pub fn new(
        truck_number: impl Into<String>,
        driver_name: impl Into<String>,
        driver_id: impl Into<String>,
        contact_number: impl Into<String>,
        registration_date: NaiveDate,
    ) -> Self {
        Self {
            truck_number: truck_number.into(),
            driver_name: driver_name.into(),
            driver_id: driver_id.into(),
            contact_number: contact_number.into(),
            registration_date,
            weight: 0.0,
            area: String::new(),
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.area = area.into();
        self
    }
}

/// Stored truck record, keyed by truck number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TruckRecord {
    pub truck_number: String,
    pub driver_name: String,
    pub driver_id: String,
    pub contact_number: String,
    pub registration_date: NaiveDate,
    pub weight: f64,
    pub area: String,
    /// Username of the account that registered the truck
    pub owner: String,
}

impl TruckRecord {
    /// Attach an owner to caller-supplied fields
    pub fn from_fields(fields: TruckFields, owner: impl Into<String>) -> Self {
        Self {
            truck_number: fields.truck_number,
            driver_name: fields.driver_name,
            driver_id: fields.driver_id,
            contact_number: fields.contact_number,
            registration_date: fields.registration_date,
            weight: fields.weight,
            area: fields.area,
            owner: owner.into(),
        }
    }
}
