//! Chapter document readers
//!
//! A reader turns one chapter file into its ordered list of paragraph texts.
//! The first paragraph is the chapter banner; the readers return it like any
//! other paragraph and leave the interpretation to the parser.

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use crate::error::ImportError;

pub trait ParagraphSource {
    fn read_paragraphs(&self, path: &Path) -> Result<Vec<String>, ImportError>;
}

fn document_error(path: &Path, reason: impl ToString) -> ImportError {
    ImportError::Document {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

/// Reads the body paragraphs of a Word .docx package.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxReader;

impl ParagraphSource for DocxReader {
    fn read_paragraphs(&self, path: &Path) -> Result<Vec<String>, ImportError> {
        let file = File::open(path).map_err(|source| ImportError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut archive = ZipArchive::new(file).map_err(|e| document_error(path, e))?;
        let mut entry = archive
            .by_name("word/document.xml")
            .map_err(|e| document_error(path, e))?;

        let mut xml = String::new();
        entry
            .read_to_string(&mut xml)
            .map_err(|e| document_error(path, e))?;

        paragraphs_from_document_xml(&xml).map_err(|e| document_error(path, e))
    }
}

/// One paragraph per line of a UTF-8 text file.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextReader;

impl ParagraphSource for PlainTextReader {
    fn read_paragraphs(&self, path: &Path) -> Result<Vec<String>, ImportError> {
        let text = fs::read_to_string(path).map_err(|source| ImportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(text.lines().map(|line| line.to_string()).collect())
    }
}

pub fn reader_for_extension(ext: &str) -> Result<Box<dyn ParagraphSource>, ImportError> {
    match ext.trim_start_matches('.').to_lowercase().as_str() {
        "docx" => Ok(Box::new(DocxReader)),
        "txt" => Ok(Box::new(PlainTextReader)),
        _ => Err(ImportError::UnsupportedDocument(ext.to_string())),
    }
}

/// Extract the body-level paragraphs from the WordprocessingML of
/// `word/document.xml`.
///
/// - text is taken from `<w:t>` elements
/// - `<w:tab/>` becomes `\t`, `<w:br/>` and `<w:cr/>` become `\n`
/// - paragraphs in tables and text boxes are not body paragraphs and are skipped
pub fn paragraphs_from_document_xml(xml: &str) -> Result<Vec<String>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);

    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_paragraph = false;
    let mut in_run = false;
    let mut in_text = false;
    // Depth inside w:tbl / w:txbxContent
    let mut skip_depth = 0usize;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:tbl" | b"w:txbxContent" => skip_depth += 1,
                _ if skip_depth > 0 => {}
                b"w:p" => {
                    in_paragraph = true;
                    current.clear();
                }
                b"w:r" => in_run = true,
                b"w:t" => in_text = true,
                _ => {}
            },

            Event::Empty(e) => match e.name().as_ref() {
                _ if skip_depth > 0 => {}
                b"w:p" => paragraphs.push(String::new()),
                b"w:tab" if in_run => current.push('\t'),
                b"w:br" | b"w:cr" if in_run => current.push('\n'),
                _ => {}
            },

            Event::End(e) => match e.name().as_ref() {
                b"w:tbl" | b"w:txbxContent" => skip_depth = skip_depth.saturating_sub(1),
                _ if skip_depth > 0 => {}
                b"w:p" if in_paragraph => {
                    paragraphs.push(std::mem::take(&mut current));
                    in_paragraph = false;
                }
                b"w:r" => in_run = false,
                b"w:t" => in_text = false,
                _ => {}
            },

            Event::Text(t) if in_text && skip_depth == 0 => {
                current.push_str(&t.unescape()?);
            }

            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}
