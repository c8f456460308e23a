//! Configuration management for truckreg
//!
//! Config stored at: ~/.config/truckreg/config.json

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use truckreg_types::{ConfigError, HashScheme, OutputFormat, Result};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the tables and the session file
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Accounts table file name
    #[serde(default = "default_users_file")]
    pub users_file: String,

    /// Truck records table file name
    #[serde(default = "default_records_file")]
    pub records_file: String,

    /// Hash scheme for new accounts (sha256, argon2)
    #[serde(default)]
    pub hash_scheme: HashScheme,

    /// Default output format (json, table)
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,
}

fn default_users_file() -> String {
    "users.csv".to_string()
}

fn default_records_file() -> String {
    "truck_data.csv".to_string()
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Table
}

const SESSION_FILE: &str = "session.json";

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            users_file: default_users_file(),
            records_file: default_records_file(),
            hash_scheme: HashScheme::default(),
            output_format: default_output_format(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("truckreg");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Get the data directory path
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.data_dir {
            return Ok(dir.clone());
        }

        let data_dir = dirs::data_dir()
            .ok_or(ConfigError::NotFound)?
            .join("truckreg");
        Ok(data_dir)
    }

    /// Path of the accounts table
    pub fn users_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join(&self.users_file))
    }

    /// Path of the truck records table
    pub fn records_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join(&self.records_file))
    }

    /// Path of the persisted CLI session
    pub fn session_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join(SESSION_FILE))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from a specific file, or default if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save config to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Truck Registry Configuration")?;
        writeln!(f, "============================")?;
        writeln!(f)?;
        writeln!(
            f,
            "Data dir:       {}",
            self.data_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "(error)".to_string())
        )?;
        writeln!(f, "Users file:     {}", self.users_file)?;
        writeln!(f, "Records file:   {}", self.records_file)?;
        writeln!(f, "Hash scheme:    {}", self.hash_scheme)?;
        writeln!(f, "Output format:  {}", self.output_format)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:    {}", path.display())?;
        }

        Ok(())
    }
}
