/*
 * Logging setup on top of `simplelog`. `initialize_logging` installs a default
 * logger once and may be called any number of times (tests call it freely);
 * `initialize_logging_with` builds the logger from an `AppConfig`, optionally
 * adding a log file next to the settings. The log file is appended to, never
 * truncated.
 */
use crate::core::AppConfig;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Once;

static INIT: Once = Once::new();

#[derive(Debug)]
pub enum LoggingError {
    Io(io::Error),
    SetLogger(log::SetLoggerError),
}

impl From<io::Error> for LoggingError {
    fn from(err: io::Error) -> Self {
        LoggingError::Io(err)
    }
}

impl From<log::SetLoggerError> for LoggingError {
    fn from(err: log::SetLoggerError) -> Self {
        LoggingError::SetLogger(err)
    }
}

impl std::fmt::Display for LoggingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoggingError::Io(e) => write!(f, "Could not open log file: {e}"),
            LoggingError::SetLogger(e) => write!(f, "Logger already installed: {e}"),
        }
    }
}

impl std::error::Error for LoggingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoggingError::Io(e) => Some(e),
            LoggingError::SetLogger(e) => Some(e),
        }
    }
}

#[cfg(not(test))]
const DEFAULT_LEVEL: log::LevelFilter = log::LevelFilter::Info;
#[cfg(not(test))]
const DEFAULT_COLOR: ColorChoice = ColorChoice::Auto;

#[cfg(test)]
const DEFAULT_LEVEL: log::LevelFilter = log::LevelFilter::Trace;
#[cfg(test)]
const DEFAULT_COLOR: ColorChoice = ColorChoice::Never;

pub fn initialize_logging() {
    INIT.call_once(|| {
        if let Err(e) = TermLogger::init(
            DEFAULT_LEVEL,
            Config::default(),
            TerminalMode::Mixed,
            DEFAULT_COLOR,
        ) {
            eprintln!("Failed to initialize logging: {e}");
        }
    });
}

/*
 * Installs a terminal logger at the configured level and, when `log_to_file`
 * is set, a file logger appending to `config.log_file_name` inside `log_dir`.
 * Fails with `SetLogger` if a logger is already installed; an existing log
 * file is left as it was.
 */
pub fn initialize_logging_with(config: &AppConfig, log_dir: &Path) -> Result<(), LoggingError> {
    let level = config.log_level.to_level_filter();
    let log_config = ConfigBuilder::new()
        .add_filter_allow_str(env!("CARGO_CRATE_NAME"))
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        log_config.clone(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if config.log_to_file {
        let log_path = log_dir.join(&config.log_file_name);
        let log_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;
        loggers.push(WriteLogger::new(level, log_config, log_file));
    }

    CombinedLogger::init(loggers)?;
    log::debug!("Logging: Initialized at level {level}.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogLevel;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_initialize_logging_is_repeatable() {
        initialize_logging();
        initialize_logging();
        log::trace!("Logging: still usable after repeated initialization.");
    }

    #[test]
    fn test_initialize_logging_with_fails_when_logger_installed() {
        // Arrange
        initialize_logging();
        let dir = tempdir().unwrap();
        let config = AppConfig {
            log_level: LogLevel::Debug,
            ..AppConfig::default()
        };

        // Act & Assert
        match initialize_logging_with(&config, dir.path()) {
            Err(LoggingError::SetLogger(_)) => {}
            other => panic!("Expected SetLogger error, got {other:?}"),
        }
    }

    #[test]
    fn test_initialize_logging_with_keeps_existing_log_file() {
        // Arrange
        initialize_logging();
        let dir = tempdir().unwrap();
        let config = AppConfig {
            log_to_file: true,
            log_file_name: "kept.log".to_string(),
            ..AppConfig::default()
        };
        let log_path = dir.path().join("kept.log");
        fs::write(&log_path, "earlier session\n").unwrap();

        // Act
        let result = initialize_logging_with(&config, dir.path());

        // Assert
        assert!(matches!(result, Err(LoggingError::SetLogger(_))));
        assert_eq!(fs::read_to_string(&log_path).unwrap(), "earlier session\n");
    }

    #[test]
    fn test_initialize_logging_with_reports_unopenable_log_file() {
        initialize_logging();
        let dir = tempdir().unwrap();
        let config = AppConfig {
            log_to_file: true,
            log_file_name: "missing_dir/app.log".to_string(),
            ..AppConfig::default()
        };

        match initialize_logging_with(&config, dir.path()) {
            Err(LoggingError::Io(_)) => {}
            other => panic!("Expected Io error, got {other:?}"),
        }
    }
}
