use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use tracing_subscriber::EnvFilter;
use chrono::{DateTime, Local};

use crate::get_create_pbti_dir;

/// Log levels representing increasing verbosity.
///
/// Setting a level enables that level and all less verbose levels below it:
///
/// - **Silent (0)**: No logging output
/// - **Error (1)**: Only error messages
/// - **Warn (2)**: Warning and error messages
/// - **Info (3)**: Informational, warning, and error messages (default)
/// - **Debug (4)**: All messages, including every parsed verse and subheader
///
/// The level is read from the `LOG_LEVEL` environment variable, or set at
/// runtime with `set_log_level()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Silent = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
}

impl Level {
    /// Parse a log level from a string (case insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "silent" => Some(Level::Silent),
            "error" => Some(Level::Error),
            "warn" => Some(Level::Warn),
            "info" => Some(Level::Info),
            "debug" => Some(Level::Debug),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Silent => "Silent",
            Level::Error => "Error",
            Level::Warn => "Warn",
            Level::Info => "Info",
            Level::Debug => "Debug",
        }
    }
}

/// Rotates log files, keeping only the last 5 log files
fn rotate_log_files(log_file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    match log_file.try_exists() {
        Ok(true) => {}
        Ok(false) | Err(_) => return Ok(()),
    }

    let metadata = std::fs::metadata(log_file)?;
    let modified = metadata.modified()?;

    let datetime: DateTime<Local> = modified.into();
    let timestamp = datetime.format("%Y-%m-%dT%H-%M-%S");

    let parent = log_file.parent().ok_or("No parent directory")?;
    let new_path = parent.join(format!("log.{}.txt", timestamp));

    std::fs::rename(log_file, &new_path)?;

    let mut log_files: Vec<PathBuf> = std::fs::read_dir(parent)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            if let Some(filename) = path.file_name().and_then(|n| n.to_str()) {
                filename.starts_with("log.") && filename.ends_with(".txt") && filename != "log.txt"
            } else {
                false
            }
        })
        .collect();

    // The timestamp in the name sorts by date
    log_files.sort();

    if log_files.len() > 5 {
        for file in &log_files[0..log_files.len() - 5] {
            if let Err(e) = std::fs::remove_file(file) {
                eprintln!("Failed to remove old log file {:?}: {}", file, e);
            }
        }
    }

    Ok(())
}

fn env_flag(key: &str) -> bool {
    std::env::var(key)
        .map(|v| v.to_lowercase() == "true")
        .unwrap_or(false)
}

pub struct Logger {
    log_file: PathBuf,
    disable_log: bool,
    enable_print_log: bool,
    level: Arc<Mutex<Level>>,
}

impl Logger {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let data_dir = get_create_pbti_dir()
            .map_err(|e| format!("Failed to get pbti dir: {}", e))?;

        std::fs::create_dir_all(&data_dir)?;
        let log_file = data_dir.join("log.txt");

        if let Err(e) = rotate_log_files(&log_file) {
            eprintln!("Failed to rotate log files: {}", e);
        }

        let level = std::env::var("LOG_LEVEL")
            .ok()
            .and_then(|v| Level::from_str(&v))
            .unwrap_or(Level::Info);

        Ok(Logger {
            log_file,
            disable_log: env_flag("DISABLE_LOG"),
            enable_print_log: env_flag("ENABLE_PRINT_LOG"),
            level: Arc::new(Mutex::new(level)),
        })
    }

    fn disabled() -> Self {
        Logger {
            log_file: PathBuf::new(),
            disable_log: true,
            enable_print_log: false,
            level: Arc::new(Mutex::new(Level::Info)),
        }
    }

    pub fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .with_writer(std::io::stderr)
            .finish();

        tracing::subscriber::set_global_default(subscriber)?;

        Ok(())
    }

    fn write_to_file(&self, message: &str) -> Result<(), Box<dyn std::error::Error>> {
        if self.disable_log {
            return Ok(());
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_file)?;

        let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3fZ");
        file.write_all(format!("[{}] {}\n", timestamp, message).as_bytes())?;

        Ok(())
    }

    fn enabled(&self, msg_level: Level) -> bool {
        match self.level.lock() {
            Ok(level) => *level >= msg_level,
            Err(_) => true,
        }
    }

    fn log(&self, msg_level: Level, msg: &str) {
        if !self.enabled(msg_level) {
            return;
        }

        if self.enable_print_log {
            match msg_level {
                Level::Error => tracing::error!("{}", msg),
                Level::Warn => tracing::warn!("{}", msg),
                Level::Info => tracing::info!("{}", msg),
                Level::Debug => tracing::debug!("{}", msg),
                Level::Silent => {}
            }
        }

        let formatted_msg = format!("{}: {}", msg_level.as_str().to_uppercase(), msg);
        if let Err(e) = self.write_to_file(&formatted_msg) {
            eprintln!("Failed to write to log file: {}", e);
        }
    }

    pub fn get_level(&self) -> Level {
        self.level.lock().map(|l| *l).unwrap_or(Level::Info)
    }

    pub fn set_level(&self, new_level: Level) {
        if let Ok(mut level) = self.level.lock() {
            *level = new_level;
        }
    }
}

pub static LOGGER: OnceLock<Logger> = OnceLock::new();
static TRACING_INITIALIZED: OnceLock<()> = OnceLock::new();

fn with_logger<F, R>(f: F) -> R
where
    F: FnOnce(&Logger) -> R,
{
    TRACING_INITIALIZED.get_or_init(|| {
        // A subscriber may already be set by the host binary.
        let _ = Logger::init_tracing();
    });

    let logger = LOGGER.get_or_init(|| {
        match Logger::new() {
            Ok(logger) => logger,
            Err(e) => {
                eprintln!("Failed to create logger: {}", e);
                Logger::disabled()
            }
        }
    });

    f(logger)
}

pub fn info(msg: &str) {
    with_logger(|logger| logger.log(Level::Info, msg));
}

pub fn warn(msg: &str) {
    with_logger(|logger| logger.log(Level::Warn, msg));
}

pub fn error(msg: &str) {
    with_logger(|logger| logger.log(Level::Error, msg));
}

pub fn debug(msg: &str) {
    with_logger(|logger| logger.log(Level::Debug, msg));
}

pub fn get_log_level() -> Level {
    with_logger(|logger| logger.get_level())
}

pub fn set_log_level(level: Level) {
    with_logger(|logger| logger.set_level(level));
}

/// Set the log level from a string (case insensitive).
///
/// Returns false if the string is not a valid level.
pub fn set_log_level_str(level_str: &str) -> bool {
    if let Some(level) = Level::from_str(level_str) {
        set_log_level(level);
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_level_from_str() {
        assert_eq!(Level::from_str("DEBUG"), Some(Level::Debug));
        assert_eq!(Level::from_str("warn"), Some(Level::Warn));
        assert_eq!(Level::from_str("verbose"), None);
        assert!(Level::Debug > Level::Info);
        assert!(Level::Silent < Level::Error);
    }

    #[test]
    fn test_disabled_logger_filters_by_level() {
        let logger = Logger::disabled();
        assert!(logger.enabled(Level::Warn));
        assert!(!logger.enabled(Level::Debug));
        logger.set_level(Level::Silent);
        assert!(!logger.enabled(Level::Error));
    }

    #[test]
    fn test_rotate_keeps_five() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..7 {
            std::fs::write(dir.path().join(format!("log.2024-01-0{}T00-00-00.txt", i + 1)), "old").unwrap();
        }
        let log_file = dir.path().join("log.txt");
        std::fs::write(&log_file, "current").unwrap();

        rotate_log_files(&log_file).unwrap();

        assert!(!log_file.exists());
        let count = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(count, 5);
    }

    #[test]
    #[serial]
    fn test_set_log_level_str() {
        let before = get_log_level();
        assert!(set_log_level_str("debug"));
        assert_eq!(get_log_level(), Level::Debug);
        assert!(!set_log_level_str("loud"));
        assert_eq!(get_log_level(), Level::Debug);
        set_log_level(before);
    }
}
