//! Idempotent loading of a parsed book into the stories and verses tables
//!
//! Rows already present for (book_number, chapter, verse) are left untouched,
//! so loading the same book twice leaves the store as after the first load.
//! The whole book is loaded in one transaction.

use diesel::dsl::exists;
use diesel::prelude::*;
use serde::Serialize;

use crate::db::models::{NewStory, NewVerse};
use crate::db::schema::{stories, verses};
use crate::error::ImportError;
use crate::logger::{debug, error, info, warn};
use crate::types::{BookStructure, ChapterStructure};

/// Stored as the verse of a story whose section has no verse.
pub const NO_FIRST_VERSE: i32 = -1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadStats {
    pub stories_inserted: usize,
    pub stories_skipped: usize,
    /// Sections with no verse between their subheader and the next one,
    /// stored with `NO_FIRST_VERSE`.
    pub stories_without_verse: usize,
    pub verses_inserted: usize,
    pub verses_skipped: usize,
}

/// Insert the stories and verses of every chapter of the book.
///
/// Any error rolls back the whole book.
pub fn load_book(
    conn: &mut SqliteConnection,
    book_number: i32,
    book: &BookStructure,
) -> Result<LoadStats, ImportError> {
    info(&format!(
        "Loading book {}: {} chapters, {} sections, {} verses",
        book_number,
        book.chapters.len(),
        book.section_count(),
        book.verse_count(),
    ));

    let res = conn.transaction::<_, ImportError, _>(|conn| {
        let mut stats = LoadStats::default();
        for chapter in book.chapters.values() {
            insert_stories(conn, book_number, chapter, &mut stats)?;
            insert_verses(conn, book_number, chapter, &mut stats)?;
        }
        Ok(stats)
    });

    match res {
        Ok(stats) => {
            info(&format!("Book {} loaded: {:?}", book_number, stats));
            Ok(stats)
        }
        Err(e) => {
            error(&format!("Book {} load rolled back: {}", book_number, e));
            Err(e)
        }
    }
}

fn insert_stories(
    conn: &mut SqliteConnection,
    book_number: i32,
    chapter: &ChapterStructure,
    stats: &mut LoadStats,
) -> Result<(), ImportError> {
    for (&section, first_verse) in chapter.section_first_verses.range(1..) {
        let title = chapter
            .section_titles
            .get(&section)
            .ok_or(ImportError::MissingTitle {
                chapter: chapter.chapter,
                section,
            })?;

        // Verseless sections share NO_FIRST_VERSE, so their section index is part of the key
        let (verse_num, section_key) = match *first_verse {
            Some(v) => (v, None),
            None => {
                warn(&format!(
                    "Chapter {}: section [{}] {:?} has no verses, stored with verse {}",
                    chapter.chapter, section, title, NO_FIRST_VERSE
                ));
                stats.stories_without_verse += 1;
                (NO_FIRST_VERSE, Some(section))
            }
        };

        if story_exists(conn, book_number, chapter.chapter, verse_num, section_key)? {
            stats.stories_skipped += 1;
            continue;
        }

        diesel::insert_into(stories::table)
            .values(&NewStory {
                book_number,
                chapter: chapter.chapter,
                verse: verse_num,
                order_if_several: section,
                title,
            })
            .execute(conn)?;

        stats.stories_inserted += 1;
    }

    Ok(())
}

fn insert_verses(
    conn: &mut SqliteConnection,
    book_number: i32,
    chapter: &ChapterStructure,
    stats: &mut LoadStats,
) -> Result<(), ImportError> {
    for (verse, text) in chapter.chapter_verses() {
        if verse_exists(conn, book_number, chapter.chapter, verse)? {
            stats.verses_skipped += 1;
            continue;
        }

        diesel::insert_into(verses::table)
            .values(&NewVerse {
                book_number,
                chapter: chapter.chapter,
                verse,
                text,
            })
            .execute(conn)?;

        debug(&format!("{} {} {}", book_number, chapter.chapter, verse));
        stats.verses_inserted += 1;
    }

    Ok(())
}

fn story_exists(
    conn: &mut SqliteConnection,
    book: i32,
    chapter_num: i32,
    verse_num: i32,
    section: Option<i32>,
) -> Result<bool, diesel::result::Error> {
    use crate::db::schema::stories::dsl::*;
    let query = stories
        .filter(book_number.eq(book))
        .filter(chapter.eq(chapter_num))
        .filter(verse.eq(verse_num));

    match section {
        Some(n) => diesel::select(exists(query.filter(order_if_several.eq(n)))).get_result(conn),
        None => diesel::select(exists(query)).get_result(conn),
    }
}

fn verse_exists(
    conn: &mut SqliteConnection,
    book: i32,
    chapter_num: i32,
    verse_num: i32,
) -> Result<bool, diesel::result::Error> {
    use crate::db::schema::verses::dsl::*;
    diesel::select(exists(
        verses
            .filter(book_number.eq(book))
            .filter(chapter.eq(chapter_num))
            .filter(verse.eq(verse_num)),
    ))
    .get_result(conn)
}
