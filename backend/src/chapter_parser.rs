//! Paragraph classifier and structure builder
//!
//! Turns the flat paragraph list of a chapter document into sections
//! ("stories") and verses:
//!
//! - `12 Some text` → verse 12 in the current section
//! - `[3] note`, `* note` → cross reference, collected but not persisted
//! - any other non-empty paragraph → subheader, opens a new section
//!
//! The first verse that follows a subheader is recorded as the first verse of
//! that section. Verses before the first subheader are kept as pre-header
//! verses and never become the first verse of any section.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::ImportError;
use crate::logger;
use crate::types::{BookStructure, ChapterStructure, CrossReference, VerseMap};

lazy_static! {
    // 12 In the beginning; 7
    // Leading ASCII digits are the verse number, the rest is its text
    pub static ref RE_VERSE: Regex = Regex::new(r"(?s)^([0-9]+)(.*)$").unwrap();
    // [12] text; [] text; * text
    pub static ref RE_CROSS_REFERENCE: Regex = Regex::new(r"(?s)^(?:\[?([0-9]*)\]?|\*)(.*)$").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphKind {
    Empty,
    Verse,
    CrossReference,
    Subheader,
}

/// Classify a paragraph by its first character, after trimming.
pub fn classify(text: &str) -> ParagraphKind {
    match text.trim().chars().next() {
        None => ParagraphKind::Empty,
        Some(c) if c.is_ascii_digit() => ParagraphKind::Verse,
        Some('[') | Some('*') => ParagraphKind::CrossReference,
        Some(_) => ParagraphKind::Subheader,
    }
}

/// Split a verse paragraph into its number and trimmed text.
///
/// Returns None if the paragraph doesn't start with digits, or the number
/// doesn't fit an i32.
pub fn split_verse(text: &str) -> Option<(i32, String)> {
    let caps = RE_VERSE.captures(text)?;
    let verse_number: i32 = caps[1].parse().ok()?;
    Some((verse_number, caps[2].trim().to_string()))
}

/// Per-chapter parsing state. A new one is created for every chapter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserState {
    /// 0 until the first subheader.
    pub current_section: i32,
    pub saw_any_section: bool,
}

impl ParserState {
    pub fn new() -> Self {
        Self::default()
    }

    fn current_verses<'a>(&self, chapter: &'a mut ChapterStructure) -> &'a mut VerseMap {
        if self.current_section == 0 {
            &mut chapter.pre_header_verses
        } else {
            chapter.section_verses.entry(self.current_section).or_default()
        }
    }
}

/// Accumulates the parsed chapters of one book.
#[derive(Debug, Default)]
pub struct BookBuilder {
    book: BookStructure,
    cross_reference_index: i32,
}

impl BookBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the paragraphs of one chapter document and record the result.
    ///
    /// The first paragraph is the chapter banner and is not classified.
    /// Processing a chapter number again replaces the earlier result.
    pub fn process_paragraphs<S: AsRef<str>>(
        &mut self,
        chapter: i32,
        paragraphs: &[S],
    ) -> Result<&ChapterStructure, ImportError> {
        let structure = self.build_chapter(chapter, paragraphs)?;
        self.book.insert_chapter(structure);
        Ok(&self.book.chapters[&chapter])
    }

    fn build_chapter<S: AsRef<str>>(
        &mut self,
        chapter: i32,
        paragraphs: &[S],
    ) -> Result<ChapterStructure, ImportError> {
        let mut structure = ChapterStructure::new(chapter);
        let mut state = ParserState::new();

        let mut paragraphs = paragraphs.iter().map(|p| p.as_ref().trim());

        if let Some(banner) = paragraphs.next() {
            logger::info(&format!("Chapter {}: {}", chapter, banner));
            structure.banner = Some(banner.to_string());
        }

        for text in paragraphs {
            self.process_paragraph(&mut state, &mut structure, text)?;
        }

        logger::info(&format!(
            "Chapter {}: {} sections, {} verses, {} cross references",
            chapter,
            structure.section_count(),
            structure.verse_count(),
            structure.cross_references.len(),
        ));

        Ok(structure)
    }

    fn process_paragraph(
        &mut self,
        state: &mut ParserState,
        structure: &mut ChapterStructure,
        text: &str,
    ) -> Result<(), ImportError> {
        match classify(text) {
            ParagraphKind::Empty => Ok(()),
            ParagraphKind::Verse => process_verse(state, structure, text),
            ParagraphKind::CrossReference => {
                self.process_cross_reference(structure, text);
                Ok(())
            }
            ParagraphKind::Subheader => {
                process_subheader(state, structure, text);
                Ok(())
            }
        }
    }

    fn process_cross_reference(&mut self, structure: &mut ChapterStructure, text: &str) {
        let Some(caps) = RE_CROSS_REFERENCE.captures(text) else {
            return;
        };

        self.cross_reference_index += 1;
        let marker = caps.get(1).and_then(|m| m.as_str().parse::<i32>().ok());

        structure.cross_references.push(CrossReference {
            index: self.cross_reference_index,
            chapter: structure.chapter,
            marker,
            text: text.to_string(),
        });
    }

    pub fn book(&self) -> &BookStructure {
        &self.book
    }

    pub fn finish(self) -> BookStructure {
        self.book
    }
}

fn process_verse(
    state: &ParserState,
    structure: &mut ChapterStructure,
    text: &str,
) -> Result<(), ImportError> {
    let (verse_number, verse) = split_verse(text).ok_or_else(|| ImportError::VerseParse {
        chapter: structure.chapter,
        text: text.to_string(),
    })?;

    logger::debug(&format!("{} {}", verse_number, verse));

    state.current_verses(structure).insert(verse_number, verse);

    if state.saw_any_section {
        let first_verse = structure
            .section_first_verses
            .entry(state.current_section)
            .or_insert(None);
        if first_verse.is_none() {
            *first_verse = Some(verse_number);
        }
    }

    Ok(())
}

fn process_subheader(state: &mut ParserState, structure: &mut ChapterStructure, text: &str) {
    state.saw_any_section = true;
    state.current_section += 1;

    let idx = state.current_section;
    structure.section_verses.insert(idx, VerseMap::new());
    structure.section_first_verses.insert(idx, None);
    structure.section_titles.insert(idx, text.to_string());

    logger::debug(&format!("[{}] {}", idx, text));
}

/// Parse a single chapter on its own, e.g. for inspecting one document.
pub fn parse_chapter<S: AsRef<str>>(chapter: i32, paragraphs: &[S]) -> Result<ChapterStructure, ImportError> {
    BookBuilder::new().build_chapter(chapter, paragraphs)
}
