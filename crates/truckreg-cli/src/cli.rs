//! CLI definition using clap

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use truckreg_types::{HashScheme, OutputFormat};

#[derive(Parser)]
#[command(name = "truckreg")]
#[command(author = "yuuji")]
#[command(version)]
#[command(about = "Truck registration with per-account records")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory override (tables and session file)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new account and sign in
    Signup {
        /// Username (case-sensitive)
        username: String,

        /// Password. Falls back to TRUCKREG_PASSWORD if omitted.
        #[arg(long, short = 'p')]
        password: Option<String>,
    },

    /// Sign in to an existing account
    Login {
        /// Username (case-sensitive)
        username: String,

        /// Password. Falls back to TRUCKREG_PASSWORD if omitted.
        #[arg(long, short = 'p')]
        password: Option<String>,
    },

    /// Sign out (stored data is kept)
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Register a truck under the signed-in account
    AddTruck {
        /// Truck number (re-registering the same number replaces it)
        #[arg(long, short = 't')]
        truck_number: String,

        /// Driver's name
        #[arg(long)]
        driver_name: String,

        /// Driver's ID
        #[arg(long)]
        driver_id: String,

        /// Contact number
        #[arg(long, short = 'c')]
        contact: String,

        /// Registration date (YYYY-MM-DD). Defaults to today.
        #[arg(long, short = 'd')]
        date: Option<NaiveDate>,

        /// Weight in tons
        #[arg(long, short = 'w', default_value = "0.0")]
        weight: f64,

        /// Area where the truck was weighed
        #[arg(long, short = 'a')]
        area: Option<String>,
    },

    /// List trucks registered by the signed-in account
    Trucks,

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set data directory
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// Set password hash scheme for new accounts
        #[arg(long)]
        set_hash: Option<HashScheme>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}
