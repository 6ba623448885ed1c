use diesel::sqlite::SqliteConnection;

use crate::chapter_parser::BookBuilder;
use crate::config::ImportConfig;
use crate::document::{reader_for_extension, ParagraphSource};
use crate::error::ImportError;
use crate::loader::{load_book, LoadStats};
use crate::logger::info;
use crate::types::{BookStructure, ChapterStructure};

/// Read and parse chapters 1..=chapter_count of the configured book.
///
/// `on_chapter` is called after each chapter is parsed. The first unreadable
/// or malformed chapter stops the run.
pub fn parse_book<F>(
    config: &ImportConfig,
    source: &dyn ParagraphSource,
    mut on_chapter: F,
) -> Result<BookStructure, ImportError>
where
    F: FnMut(&ChapterStructure),
{
    let mut builder = BookBuilder::new();

    for chapter in config.chapters() {
        let path = config.chapter_path(chapter);
        info(&format!("Reading chapter {} from {}", chapter, path.display()));

        let paragraphs = source.read_paragraphs(&path)?;
        let structure = builder.process_paragraphs(chapter, paragraphs.as_slice())?;
        on_chapter(structure);
    }

    Ok(builder.finish())
}

/// Parse every chapter, then load the whole book in one transaction.
///
/// Nothing is written unless every chapter parses.
pub fn import_book(config: &ImportConfig, conn: &mut SqliteConnection) -> Result<LoadStats, ImportError> {
    let source = reader_for_extension(&config.doc_extension)?;
    let book = parse_book(config, source.as_ref(), |_| {})?;
    load_book(conn, config.book_number, &book)
}
