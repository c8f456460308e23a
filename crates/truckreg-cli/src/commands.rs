//! Command handlers

use crate::cli::{Cli, Commands};
use crate::output::{output_message, output_records};
use chrono::{Local, NaiveDate};
use tracing::debug;
use truckreg_app::logging::{init_logging, LogConfig};
use truckreg_app::repository::{open_registry, save_session};
use truckreg_app::{Config, Session};
use truckreg_types::{HashScheme, OutputFormat, Result, ServiceError, TruckFields};

/// Environment variable consulted when `--password` is omitted
const PASSWORD_ENV: &str = "TRUCKREG_PASSWORD";

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    init_logging(LogConfig::verbose(cli.verbose))?;

    // Load config
    let mut config = Config::load()?;

    // Override from CLI args
    if let Some(ref data_dir) = cli.data_dir {
        config.data_dir = Some(data_dir.clone());
    }
    let output_format = cli.format.unwrap_or(config.output_format);
    debug!(data_dir = ?config.data_dir().ok(), hash_scheme = %config.hash_scheme, "Configuration loaded");

    match &cli.command {
        Commands::Signup { username, password } => {
            cmd_signup(&config, output_format, username, password.clone())
        }

        Commands::Login { username, password } => {
            cmd_login(&config, output_format, username, password.clone())
        }

        Commands::Logout => cmd_logout(&config, output_format),

        Commands::Whoami => cmd_whoami(&config, output_format),

        Commands::AddTruck {
            truck_number,
            driver_name,
            driver_id,
            contact,
            date,
            weight,
            area,
        } => {
            let registration_date = date.unwrap_or_else(today);
            let fields = TruckFields::new(
                truck_number.clone(),
                driver_name.clone(),
                driver_id.clone(),
                contact.clone(),
                registration_date,
            )
            .with_weight(*weight)
            .with_area(area.clone().unwrap_or_default());
            cmd_add_truck(&config, output_format, fields)
        }

        Commands::Trucks => cmd_trucks(&config, output_format),

        Commands::Config {
            show,
            set_data_dir,
            set_hash,
            set_output,
            reset,
        } => cmd_config(
            *show,
            set_data_dir.clone(),
            *set_hash,
            *set_output,
            *reset,
        ),
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn resolve_password(password: Option<String>) -> String {
    password
        .or_else(|| std::env::var(PASSWORD_ENV).ok())
        .unwrap_or_default()
}

fn cmd_signup(
    config: &Config,
    output_format: OutputFormat,
    username: &str,
    password: Option<String>,
) -> Result<()> {
    let mut registry = open_registry(config)?;
    registry.register(username, &resolve_password(password))?;
    save_session(config, &registry)?;

    output_message(output_format, "Account registered successfully!")
}

fn cmd_login(
    config: &Config,
    output_format: OutputFormat,
    username: &str,
    password: Option<String>,
) -> Result<()> {
    let mut registry = open_registry(config)?;
    registry.login(username, &resolve_password(password))?;
    save_session(config, &registry)?;

    output_message(output_format, &format!("Welcome, {}!", username))
}

fn cmd_logout(config: &Config, output_format: OutputFormat) -> Result<()> {
    let session_path = config.session_path()?;
    let mut session = Session::load(&session_path);

    if session.sign_out().is_none() {
        return output_message(output_format, "Not logged in.");
    }
    Session::clear(&session_path)?;

    output_message(output_format, "Logged out successfully!")
}

fn cmd_whoami(config: &Config, output_format: OutputFormat) -> Result<()> {
    let session = Session::load(&config.session_path()?);

    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&session)?);
        return Ok(());
    }

    match session.current_user() {
        Some(user) => println!("Logged in as {}", user),
        None => println!("Not logged in."),
    }
    Ok(())
}

fn cmd_add_truck(config: &Config, output_format: OutputFormat, fields: TruckFields) -> Result<()> {
    let mut registry = open_registry(config)?;
    let truck_number = fields.truck_number.clone();
    registry.add_record(fields)?;

    output_message(
        output_format,
        &format!("Truck {} registered successfully!", truck_number),
    )
}

fn cmd_trucks(config: &Config, output_format: OutputFormat) -> Result<()> {
    let registry = open_registry(config)?;
    let owner = registry
        .current_user()
        .ok_or(ServiceError::NotAuthenticated)?
        .to_string();
    let records = registry.list_records()?;

    output_records(output_format, &owner, &records)
}

fn cmd_config(
    show: bool,
    set_data_dir: Option<std::path::PathBuf>,
    set_hash: Option<HashScheme>,
    set_output: Option<OutputFormat>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(data_dir) = set_data_dir {
        config.data_dir = Some(data_dir);
        modified = true;
    }

    if let Some(hash_scheme) = set_hash {
        config.hash_scheme = hash_scheme;
        modified = true;
    }

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
