use std::path::PathBuf;
use std::str::FromStr;

use dotenvy::dotenv;
use serde::Serialize;

use crate::error::ImportError;

pub const DEFAULT_BOOK_NUMBER: i32 = 490;
pub const DEFAULT_CHAPTER_COUNT: i32 = 21;
pub const DEFAULT_UPLOAD_DIR: &str = "upload";
pub const DEFAULT_DOC_EXTENSION: &str = "docx";
pub const DEFAULT_DATABASE_PATH: &str = "PBTI.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportConfig {
    pub book_number: i32,
    /// Chapters are numbered 1..=chapter_count
    pub chapter_count: i32,
    pub upload_dir: PathBuf,
    pub doc_extension: String,
    pub database_path: PathBuf,
}

impl Default for ImportConfig {
    fn default() -> Self {
        ImportConfig {
            book_number: DEFAULT_BOOK_NUMBER,
            chapter_count: DEFAULT_CHAPTER_COUNT,
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            doc_extension: DEFAULT_DOC_EXTENSION.to_string(),
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
        }
    }
}

fn parse_var<T: FromStr>(key: &str, value: String) -> Result<T, ImportError> {
    value.trim().parse().map_err(|_| ImportError::Config {
        key: key.to_string(),
        value,
    })
}

impl ImportConfig {
    /// Defaults, overridden by the PBTI_* variables from the environment or a
    /// .env file.
    pub fn from_env() -> Result<Self, ImportError> {
        dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ImportError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ImportConfig::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("PBTI_BOOK_NUMBER") {
            config.book_number = parse_var("PBTI_BOOK_NUMBER", v)?;
        }
        if let Some(v) = get("PBTI_CHAPTER_COUNT") {
            config.chapter_count = parse_var("PBTI_CHAPTER_COUNT", v)?;
        }
        if let Some(v) = get("PBTI_UPLOAD_DIR") {
            config.upload_dir = PathBuf::from(v);
        }
        if let Some(v) = get("PBTI_DOC_EXTENSION") {
            config.doc_extension = v.trim().trim_start_matches('.').to_string();
        }
        if let Some(v) = get("PBTI_DATABASE_PATH") {
            config.database_path = PathBuf::from(v);
        }

        Ok(config)
    }

    /// upload/3.docx
    pub fn chapter_path(&self, chapter: i32) -> PathBuf {
        self.upload_dir.join(format!("{}.{}", chapter, self.doc_extension))
    }

    pub fn chapters(&self) -> std::ops::RangeInclusive<i32> {
        1..=self.chapter_count
    }
}
