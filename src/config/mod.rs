use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_session_price")]
    pub default_session_price: f64,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// First year offered by the annual/monthly dashboards.
    #[serde(default = "default_first_year")]
    pub first_year: i32,
    #[serde(default = "default_slot_start")]
    pub slot_start_hour: u32,
    #[serde(default = "default_slot_end")]
    pub slot_end_hour: u32,
    #[serde(default = "default_slot_minutes")]
    pub slot_minutes: u32,
    /// Optional prefix prepended to document storage keys (e.g. a bucket name).
    #[serde(default)]
    pub bucket_prefix: String,
}

fn default_session_price() -> f64 {
    0.0
}
fn default_currency_symbol() -> String {
    "R$".to_string()
}
fn default_first_year() -> i32 {
    2023
}
fn default_slot_start() -> u32 {
    8
}
fn default_slot_end() -> u32 {
    22
}
fn default_slot_minutes() -> u32 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file())
    }
}

impl Config {
    fn with_database(db_path: PathBuf) -> Self {
        Self {
            database: db_path.to_string_lossy().to_string(),
            default_session_price: default_session_price(),
            currency_symbol: default_currency_symbol(),
            first_year: default_first_year(),
            slot_start_hour: default_slot_start(),
            slot_end_hour: default_slot_end(),
            slot_minutes: default_slot_minutes(),
            bucket_prefix: String::new(),
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rclinic")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rclinic")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rclinic.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rclinic.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| {
            AppError::Config(format!("failed to parse {}: {}", path.display(), e))
        })
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Initialize configuration and database files.
    /// Returns the resolved database path.
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();

        // DB name: user provided or default
        let db_path = match custom_name {
            Some(name) => {
                let p = Path::new(&name);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    dir.join(p)
                }
            }
            None => Self::database_file(),
        };

        // Write config file
        if !is_test {
            fs::create_dir_all(&dir)?;
            let yaml = Self::with_database(db_path.clone()).to_yaml()?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Create empty DB file if not exists
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        Ok(db_path)
    }
}
