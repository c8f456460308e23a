//! Truck record store backed by `truck_data.csv`

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use truckreg_domain::repository::TruckRecordRepository;
use truckreg_domain::service::{first_missing, validate_weight};
use truckreg_types::{AddRecordError, StoreError, TruckFields, TruckRecord};

use crate::ordered::OrderedTable;
use crate::table::{read_table, write_table, LoadedTable, TableSchema};

/// On-disk layout of the truck records table
pub const RECORDS_SCHEMA: TableSchema = TableSchema {
    header: &[
        "Truck Number",
        "Driver's Name",
        "Driver's Id",
        "Contact Number",
        "Registration Date",
        "Weight",
        "Area",
        "Username",
    ],
    key_column: "Truck Number",
};

#[derive(Debug, Serialize, Deserialize)]
struct RecordRow {
    #[serde(rename = "Truck Number")]
    truck_number: String,
    #[serde(rename = "Driver's Name")]
    driver_name: String,
    #[serde(rename = "Driver's Id")]
    driver_id: String,
    #[serde(rename = "Contact Number")]
    contact_number: String,
    #[serde(rename = "Registration Date")]
    registration_date: NaiveDate,
    /// Blank cells load as 0.0
    #[serde(rename = "Weight", default)]
    weight: Option<f64>,
    #[serde(rename = "Area", default)]
    area: String,
    #[serde(rename = "Username")]
    owner: String,
}

impl From<RecordRow> for TruckRecord {
    fn from(row: RecordRow) -> Self {
        Self {
            truck_number: row.truck_number,
            driver_name: row.driver_name,
            driver_id: row.driver_id,
            contact_number: row.contact_number,
            registration_date: row.registration_date,
            weight: row.weight.unwrap_or(0.0),
            area: row.area,
            owner: row.owner,
        }
    }
}

impl From<&TruckRecord> for RecordRow {
    fn from(record: &TruckRecord) -> Self {
        Self {
            truck_number: record.truck_number.clone(),
            driver_name: record.driver_name.clone(),
            driver_id: record.driver_id.clone(),
            contact_number: record.contact_number.clone(),
            registration_date: record.registration_date,
            weight: Some(record.weight),
            area: record.area.clone(),
            owner: record.owner.clone(),
        }
    }
}

/// Persistent store for truck records, keyed by truck number
pub struct RecordStore {
    store_path: PathBuf,
    records: OrderedTable<TruckRecord>,
    /// Rows skipped on load; the next rewrite drops them from the file
    skipped_rows: usize,
}

impl RecordStore {
    /// Create or load the records table
    pub fn open(store_path: PathBuf) -> Result<Self, StoreError> {
        let (records, skipped_rows) = load_records(&store_path)?;
        Ok(Self {
            store_path,
            records,
            skipped_rows,
        })
    }

    /// Re-read the table from disk, discarding the in-memory copy
    pub fn reload(&mut self) -> Result<(), StoreError> {
        (self.records, self.skipped_rows) = load_records(&self.store_path)?;
        Ok(())
    }

    /// Save store to disk
    fn save(&mut self) -> Result<(), StoreError> {
        let rows: Vec<RecordRow> = self.records.iter().map(RecordRow::from).collect();
        write_table(&self.store_path, &RECORDS_SCHEMA, &rows)?;

        if self.skipped_rows > 0 {
            warn!(
                path = %self.store_path.display(),
                dropped = self.skipped_rows,
                "Rewrite dropped rows that could not be decoded"
            );
            self.skipped_rows = 0;
        }
        Ok(())
    }

    /// Insert a record for `owner`, replacing any record with the same truck number
    pub fn add_record(&mut self, owner: &str, fields: TruckFields) -> Result<(), AddRecordError> {
        if let Some(field) = first_missing(&[
            ("truck_number", fields.truck_number.as_str()),
            ("driver_name", fields.driver_name.as_str()),
            ("driver_id", fields.driver_id.as_str()),
            ("contact_number", fields.contact_number.as_str()),
        ]) {
            return Err(AddRecordError::MissingField(field));
        }
        if !validate_weight(fields.weight) {
            return Err(AddRecordError::InvalidWeight(fields.weight));
        }

        let key = fields.truck_number.clone();
        let record = TruckRecord::from_fields(fields, owner);

        let previous = self.records.upsert(key.clone(), record);
        let replaced_owner = previous.as_ref().map(|p| p.owner.clone());
        if let Err(e) = self.save() {
            self.records.revert(&key, previous);
            return Err(e.into());
        }

        match replaced_owner {
            Some(prev_owner) if prev_owner != owner => {
                warn!(truck_number = %key, previous_owner = %prev_owner, owner, "Truck record reassigned");
            }
            Some(_) => info!(truck_number = %key, owner, "Truck record updated"),
            None => info!(truck_number = %key, owner, "Truck record registered"),
        }
        Ok(())
    }

    /// Records owned by `owner`, in table order
    pub fn list_records(&self, owner: &str) -> Vec<TruckRecord> {
        self.records
            .iter()
            .filter(|r| r.owner == owner)
            .cloned()
            .collect()
    }

    /// Get a record by truck number
    pub fn get(&self, truck_number: &str) -> Option<&TruckRecord> {
        self.records.get(truck_number)
    }

    /// Get total record count across all owners
    pub fn count(&self) -> usize {
        self.records.len()
    }
}

fn load_records(path: &Path) -> Result<(OrderedTable<TruckRecord>, usize), StoreError> {
    let (rows, skipped) = match read_table::<RecordRow>(path, &RECORDS_SCHEMA)? {
        LoadedTable::Rows { rows, skipped } => (rows, skipped),
        LoadedTable::MissingKeyColumn | LoadedTable::Reset => (Vec::new(), 0),
    };
    let records: Vec<TruckRecord> = rows.into_iter().map(TruckRecord::from).collect();
    Ok((OrderedTable::from_rows(records, |r| r.truck_number.clone()), skipped))
}

impl TruckRecordRepository for RecordStore {
    fn add_record(&mut self, owner: &str, fields: TruckFields) -> Result<(), AddRecordError> {
        RecordStore::add_record(self, owner, fields)
    }

    fn list_records(&self, owner: &str) -> Vec<TruckRecord> {
        RecordStore::list_records(self, owner)
    }
}
