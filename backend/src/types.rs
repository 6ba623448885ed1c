use std::collections::BTreeMap;
use serde::Serialize;

/// Verse number -> verse text
pub type VerseMap = BTreeMap<i32, String>;

/// A bracket- or asterisk-prefixed annotation paragraph. Collected while
/// parsing but never written to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrossReference {
    /// Running index, not reset between chapters.
    pub index: i32,
    pub chapter: i32,
    /// The number in `[12]`, if the marker has one.
    pub marker: Option<i32>,
    pub text: String,
}

/// Parsed structure of one chapter document.
///
/// Verses before the first subheader are kept in `pre_header_verses`. They
/// are persisted as verses but never belong to a story. Titled sections are
/// numbered from 1 in the three `section_*` maps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChapterStructure {
    pub chapter: i32,
    /// First paragraph of the document, not classified.
    pub banner: Option<String>,
    pub pre_header_verses: VerseMap,
    pub section_titles: BTreeMap<i32, String>,
    /// `None` while no verse has followed the subheader.
    pub section_first_verses: BTreeMap<i32, Option<i32>>,
    pub section_verses: BTreeMap<i32, VerseMap>,
    pub cross_references: Vec<CrossReference>,
}

impl ChapterStructure {
    pub fn new(chapter: i32) -> Self {
        ChapterStructure {
            chapter,
            ..Default::default()
        }
    }

    pub fn section_count(&self) -> usize {
        self.section_titles.len()
    }

    /// All verses of the chapter: the pre-header verses first, then each
    /// section's verses in section order.
    pub fn all_verses(&self) -> impl Iterator<Item = (i32, &str)> + '_ {
        self.pre_header_verses
            .iter()
            .chain(self.section_verses.values().flat_map(|m| m.iter()))
            .map(|(n, text)| (*n, text.as_str()))
    }

    /// One text per verse number of the chapter. A number repeated in a later
    /// section replaces the earlier text.
    pub fn chapter_verses(&self) -> BTreeMap<i32, &str> {
        self.all_verses().collect()
    }

    pub fn verse_count(&self) -> usize {
        self.all_verses().count()
    }
}

/// Chapter number -> parsed chapter, for one book.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BookStructure {
    pub chapters: BTreeMap<i32, ChapterStructure>,
}

impl BookStructure {
    pub fn insert_chapter(&mut self, chapter: ChapterStructure) {
        self.chapters.insert(chapter.chapter, chapter);
    }

    pub fn section_count(&self) -> usize {
        self.chapters.values().map(|c| c.section_count()).sum()
    }

    pub fn verse_count(&self) -> usize {
        self.chapters.values().map(|c| c.verse_count()).sum()
    }

    pub fn cross_reference_count(&self) -> usize {
        self.chapters.values().map(|c| c.cross_references.len()).sum()
    }
}
