pub mod types;
pub mod error;
pub mod config;
pub mod logger;
pub mod chapter_parser;
pub mod document;
pub mod importer;
pub mod loader;

pub mod db;

use std::env;
use std::fs::create_dir_all;
use std::path::PathBuf;
use std::error::Error;
use app_dirs::{get_app_root, AppDataType, AppInfo};

pub use error::ImportError;

pub const APP_INFO: AppInfo = AppInfo{name: "pbti-import", author: "pbti"};

/// Directory for the log files.
///
/// Precedence:
/// - the PBTI_DIR env var
/// - the user data dir, e.g. ~/.local/share/pbti-import
pub fn get_create_pbti_dir() -> Result<PathBuf, Box<dyn Error>> {
    let p = match env::var("PBTI_DIR") {
        Ok(s) if !s.is_empty() => PathBuf::from(s),
        _ => get_app_root(AppDataType::UserData, &APP_INFO)?,
    };
    if !p.exists() {
        create_dir_all(&p)?;
    }
    Ok(p)
}
