/*
 * Application settings for hosts of the presenter layer: the log level and
 * whether log output is also written to a file. Settings are persisted as JSON
 * (`settings.json`) in the per-user local configuration directory.
 *
 * The `ConfigManagerOperations` trait allows mock implementations in tests;
 * `CoreConfigManager` is the file-backed implementation.
 */
use crate::core::path_utils;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;

pub const SETTINGS_FILENAME: &str = "settings.json";

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    NoProjectDirectory,
    Json(serde_json::Error),
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Json(err)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Configuration I/O error: {e}"),
            ConfigError::NoProjectDirectory => {
                write!(f, "Could not determine project directory for configuration")
            }
            ConfigError::Json(e) => write!(f, "Configuration file format error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Json(e) => Some(e),
            ConfigError::NoProjectDirectory => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: LogLevel,
    pub log_to_file: bool,
    pub log_file_name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            log_level: LogLevel::Info,
            log_to_file: false,
            log_file_name: "presenter.log".to_string(),
        }
    }
}

pub trait ConfigManagerOperations: Send + Sync {
    fn load_config(&self, app_name: &str) -> Result<AppConfig>;
    fn save_config(&self, app_name: &str, config: &AppConfig) -> Result<()>;
    // The directory the settings (and the optional log file) live in.
    fn config_dir(&self, app_name: &str) -> Result<PathBuf>;
}

/*
 * File-backed configuration. By default the directory comes from
 * `path_utils::get_base_app_config_local_dir`; `with_config_dir` pins it to a
 * fixed location instead.
 */
#[derive(Debug, Default)]
pub struct CoreConfigManager {
    config_dir_override: Option<PathBuf>,
}

impl CoreConfigManager {
    pub fn new() -> Self {
        CoreConfigManager {
            config_dir_override: None,
        }
    }

    pub fn with_config_dir(dir: impl Into<PathBuf>) -> Self {
        CoreConfigManager {
            config_dir_override: Some(dir.into()),
        }
    }

    fn settings_path(&self, app_name: &str) -> Result<PathBuf> {
        Ok(self.config_dir(app_name)?.join(SETTINGS_FILENAME))
    }
}

impl ConfigManagerOperations for CoreConfigManager {
    fn config_dir(&self, app_name: &str) -> Result<PathBuf> {
        let dir = match &self.config_dir_override {
            Some(dir) => path_utils::ensure_dir(dir),
            None => path_utils::get_base_app_config_local_dir(app_name),
        };
        dir.ok_or(ConfigError::NoProjectDirectory)
    }

    /*
     * Loads the settings for `app_name`. A missing or blank settings file yields
     * the defaults; unknown fields are ignored and absent fields take their
     * default values.
     */
    fn load_config(&self, app_name: &str) -> Result<AppConfig> {
        log::trace!("CoreConfigManager: Loading config for app '{app_name}'");
        let file_path = self.settings_path(app_name)?;

        if !file_path.exists() {
            log::debug!("CoreConfigManager: Settings file {file_path:?} does not exist.");
            return Ok(AppConfig::default());
        }

        let contents = fs::read_to_string(&file_path)?;
        if contents.trim().is_empty() {
            log::debug!("CoreConfigManager: Settings file {file_path:?} is empty.");
            return Ok(AppConfig::default());
        }

        let config: AppConfig = serde_json::from_str(&contents)?;
        log::debug!("CoreConfigManager: Loaded {config:?} from {file_path:?}.");
        Ok(config)
    }

    fn save_config(&self, app_name: &str, config: &AppConfig) -> Result<()> {
        log::trace!("CoreConfigManager: Saving config for app '{app_name}'");
        let file_path = self.settings_path(app_name)?;
        let json = serde_json::to_string_pretty(config)?;
        fs::write(&file_path, json)?;
        log::debug!("CoreConfigManager: Saved {config:?} to {file_path:?}.");
        Ok(())
    }
}
