use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use diesel::sqlite::SqliteConnection;

use pbti_backend::chapter_parser::BookBuilder;
use pbti_backend::db::{establish_memory_connection, run_migrations};
use pbti_backend::types::BookStructure;

#[allow(dead_code)]
pub const BOOK: i32 = 490;

#[allow(dead_code)]
pub fn memory_db() -> SqliteConnection {
    let mut conn = establish_memory_connection().expect("Can't open in-memory db");
    run_migrations(&mut conn).expect("Migrations failed");
    conn
}

/// Parse chapters given as (chapter, paragraphs) into one book.
#[allow(dead_code)]
pub fn build_book(chapters: &[(i32, Vec<&str>)]) -> BookStructure {
    let mut builder = BookBuilder::new();
    for (chapter, paras) in chapters {
        builder
            .process_paragraphs(*chapter, paras.as_slice())
            .expect("Chapter failed to parse");
    }
    builder.finish()
}

#[allow(dead_code)]
pub fn write_txt_chapter(dir: &Path, chapter: i32, paras: &[&str]) {
    fs::write(dir.join(format!("{}.txt", chapter)), paras.join("\n")).expect("Can't write chapter");
}

/// Write a minimal .docx package with one body paragraph per item.
#[allow(dead_code)]
pub fn write_docx_chapter(dir: &Path, chapter: i32, paras: &[&str]) {
    let body: String = paras
        .iter()
        .map(|p| {
            let escaped = p.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;");
            format!(r#"<w:p><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#, escaped)
        })
        .collect();

    let document_xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
        body
    );

    let file = fs::File::create(dir.join(format!("{}.docx", chapter))).expect("Can't create docx");
    let mut zip = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default();
    zip.start_file("word/document.xml", options).expect("start_file failed");
    zip.write_all(document_xml.as_bytes()).expect("write failed");
    zip.finish().expect("finish failed");
}

#[allow(dead_code)]
pub fn verse_map(items: &[(i32, &str)]) -> BTreeMap<i32, String> {
    items.iter().map(|(n, t)| (*n, t.to_string())).collect()
}
