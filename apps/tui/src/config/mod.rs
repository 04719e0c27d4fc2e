use color_eyre::eyre::{eyre, WrapErr};
use dotenv::dotenv;
use std::env;
use std::path::{Path, PathBuf};

use trendboard_core::DashboardConfig;

const DEFAULT_DATA_PATH: &str = "data/trends.json";
const DEFAULT_CONFIG_PATH: &str = "trendboard.toml";
const DEFAULT_LOG_FILE: &str = "trendboard.log";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_path: PathBuf,
    pub log_file: PathBuf,
    pub debug: bool,
    pub dashboard: DashboardConfig,
}

impl AppConfig {
    /// Defaults with the given snapshot path; used by tests and embedders.
    pub fn with_data_path(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            debug: false,
            dashboard: DashboardConfig::default(),
        }
    }
}

/// Initializes the application configuration from `.env`, the environment,
/// and the dashboard config file
pub fn init_app_config() -> color_eyre::eyre::Result<AppConfig> {
    // Load environment variables from .env file
    dotenv().ok();

    let dashboard = match env::var("TRENDBOARD_CONFIG") {
        // An explicit config path must exist
        Ok(path) => load_dashboard_config(Path::new(&path))?,
        Err(_) => {
            let default_path = Path::new(DEFAULT_CONFIG_PATH);
            if default_path.exists() {
                load_dashboard_config(default_path)?
            } else {
                DashboardConfig::default()
            }
        }
    };

    Ok(AppConfig {
        data_path: get_data_path(),
        log_file: get_log_file(),
        debug: env::var("DEBUG").is_ok_and(|value| !value.is_empty() && value != "0"),
        dashboard,
    })
}

/// Reads a TOML dashboard config
pub fn load_dashboard_config(path: &Path) -> color_eyre::eyre::Result<DashboardConfig> {
    let source = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read config {}", path.display()))?;

    DashboardConfig::from_toml_str(&source)
        .map_err(|e| eyre!("Invalid config {}: {e}", path.display()))
}

/// Gets the path of the trends snapshot
pub fn get_data_path() -> PathBuf {
    env::var("TRENDS_PATH").map_or_else(|_| PathBuf::from(DEFAULT_DATA_PATH), PathBuf::from)
}

/// Gets the log file written while the dashboard owns the terminal
pub fn get_log_file() -> PathBuf {
    env::var("LOG_FILE").map_or_else(|_| PathBuf::from(DEFAULT_LOG_FILE), PathBuf::from)
}
