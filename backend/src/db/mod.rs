pub mod models;
pub mod schema;

use std::fs;
use std::path::Path;

use diesel::prelude::*;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use crate::error::ImportError;
use crate::logger::info;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Establish a connection to the SQLite file, creating its parent directory
/// if needed.
pub fn establish_connection(db_path: &Path) -> Result<SqliteConnection, ImportError> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|source| ImportError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    let db_url = db_path.to_str().ok_or_else(|| ImportError::Connection {
        url: db_path.display().to_string(),
        reason: "Invalid database path".to_string(),
    })?;

    connect(db_url)
}

/// A fresh in-memory database, used by tests and dry runs.
pub fn establish_memory_connection() -> Result<SqliteConnection, ImportError> {
    connect(":memory:")
}

fn connect(db_url: &str) -> Result<SqliteConnection, ImportError> {
    SqliteConnection::establish(db_url).map_err(|e| ImportError::Connection {
        url: db_url.to_string(),
        reason: e.to_string(),
    })
}

/// Create the stories and verses tables if they don't exist yet.
pub fn run_migrations(conn: &mut SqliteConnection) -> Result<(), ImportError> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| ImportError::Migration(e.to_string()))?;

    if !applied.is_empty() {
        info(&format!("Applied {} database migrations", applied.len()));
    }
    Ok(())
}

pub fn open_database(db_path: &Path) -> Result<SqliteConnection, ImportError> {
    let mut conn = establish_connection(db_path)?;
    run_migrations(&mut conn)?;
    Ok(conn)
}

pub fn count_stories(conn: &mut SqliteConnection, book: i32) -> Result<i64, ImportError> {
    use schema::stories::dsl::*;
    Ok(stories.filter(book_number.eq(book)).count().get_result(conn)?)
}

pub fn count_verses(conn: &mut SqliteConnection, book: i32) -> Result<i64, ImportError> {
    use schema::verses::dsl::*;
    Ok(verses.filter(book_number.eq(book)).count().get_result(conn)?)
}

/// Stories of a chapter, ordered by section index.
pub fn get_stories(
    conn: &mut SqliteConnection,
    book: i32,
    chapter_num: i32,
) -> Result<Vec<models::Story>, ImportError> {
    use schema::stories::dsl::*;
    Ok(stories
        .filter(book_number.eq(book))
        .filter(chapter.eq(chapter_num))
        .order(order_if_several.asc())
        .select(models::Story::as_select())
        .load(conn)?)
}

pub fn get_verse_text(
    conn: &mut SqliteConnection,
    book: i32,
    chapter_num: i32,
    verse_num: i32,
) -> Result<Option<String>, ImportError> {
    use schema::verses::dsl::*;
    Ok(verses
        .filter(book_number.eq(book))
        .filter(chapter.eq(chapter_num))
        .filter(verse.eq(verse_num))
        .select(text)
        .first::<String>(conn)
        .optional()?)
}
