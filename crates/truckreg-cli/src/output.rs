//! Output formatting module

use serde_json::json;
use truckreg_types::{OutputFormat, Result, TruckRecord};

/// Print a one-line outcome, or `{"ok": true, "message": ...}` as JSON
pub fn output_message(output_format: OutputFormat, message: &str) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(&json!({ "ok": true, "message": message }))?;
        println!("{}", content);
    } else {
        println!("{}", message);
    }
    Ok(())
}

pub fn output_records(output_format: OutputFormat, owner: &str, records: &[TruckRecord]) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(records)?;
        println!("{}", content);
        return Ok(());
    }

    println!("\nRegistered Trucks for {}", owner);
    println!("{}", "=".repeat(21 + owner.chars().count()));

    if records.is_empty() {
        println!("No trucks registered yet.");
        return Ok(());
    }

    for record in records {
        println!("Truck Number:      {}", record.truck_number);
        println!("Driver's Name:     {}", record.driver_name);
        println!("Driver's Id:       {}", record.driver_id);
        println!("Contact Number:    {}", record.contact_number);
        println!("Registration Date: {}", record.registration_date);
        println!("Weight:            {} tons", record.weight);
        println!("Area:              {}", record.area);
        println!("---");
    }
    println!("Total: {}", records.len());

    Ok(())
}
