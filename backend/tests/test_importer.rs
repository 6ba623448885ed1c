use pbti_backend::config::ImportConfig;
use pbti_backend::db::{count_stories, count_verses, get_stories, get_verse_text, open_database};
use pbti_backend::document::{DocxReader, ParagraphSource, PlainTextReader};
use pbti_backend::error::ImportError;
use pbti_backend::importer::{import_book, parse_book};

mod helpers;
use helpers as h;

fn config_for(dir: &std::path::Path, ext: &str, chapter_count: i32) -> ImportConfig {
    ImportConfig {
        book_number: h::BOOK,
        chapter_count,
        upload_dir: dir.to_path_buf(),
        doc_extension: ext.to_string(),
        database_path: dir.join("PBTI.sqlite3"),
    }
}

#[test]
fn test_import_txt_chapters() {
    let dir = tempfile::tempdir().unwrap();
    h::write_txt_chapter(dir.path(), 1, &["Chapter 1", "Intro Section", "1 In the beginning", "2 the earth was formless"]);
    h::write_txt_chapter(dir.path(), 2, &["Chapter 2", "Sec A", "1 text one", "[1] note", "Sec B", "2 text two"]);

    let config = config_for(dir.path(), "txt", 2);
    let mut conn = open_database(&config.database_path).unwrap();

    let stats = import_book(&config, &mut conn).unwrap();
    assert_eq!(stats.stories_inserted, 3);
    assert_eq!(stats.verses_inserted, 4);

    let stories = get_stories(&mut conn, h::BOOK, 2).unwrap();
    assert_eq!(stories.iter().map(|s| s.title.as_str()).collect::<Vec<_>>(), vec!["Sec A", "Sec B"]);

    // Second run against the same file changes nothing
    let stats = import_book(&config, &mut conn).unwrap();
    assert_eq!(stats.stories_inserted, 0);
    assert_eq!(stats.verses_inserted, 0);
    assert_eq!(count_stories(&mut conn, h::BOOK).unwrap(), 3);
    assert_eq!(count_verses(&mut conn, h::BOOK).unwrap(), 4);
}

#[test]
fn test_import_docx_chapters() {
    let dir = tempfile::tempdir().unwrap();
    h::write_docx_chapter(dir.path(), 1, &["Chapter 1", "Heaven & Earth", "1 In the beginning", "2 the earth was formless"]);

    let config = config_for(dir.path(), "docx", 1);
    let mut conn = open_database(&config.database_path).unwrap();

    let stats = import_book(&config, &mut conn).unwrap();
    assert_eq!(stats.stories_inserted, 1);
    assert_eq!(stats.verses_inserted, 2);

    let stories = get_stories(&mut conn, h::BOOK, 1).unwrap();
    assert_eq!(stories[0].title, "Heaven & Earth");
    assert_eq!(get_verse_text(&mut conn, h::BOOK, 1, 1).unwrap().as_deref(), Some("In the beginning"));
}

#[test]
fn test_docx_reader_returns_banner_first() {
    let dir = tempfile::tempdir().unwrap();
    h::write_docx_chapter(dir.path(), 5, &["Banner", "", "Sec", "1 text"]);

    let paragraphs = DocxReader.read_paragraphs(&dir.path().join("5.docx")).unwrap();
    assert_eq!(paragraphs, vec!["Banner", "", "Sec", "1 text"]);
}

#[test]
fn test_not_a_docx_is_a_document_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("1.docx");
    std::fs::write(&path, "plain text, not a zip").unwrap();

    let res = DocxReader.read_paragraphs(&path);
    assert!(matches!(res, Err(ImportError::Document { .. })));
}

#[test]
fn test_missing_chapter_aborts_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    h::write_txt_chapter(dir.path(), 1, &["Chapter 1", "Sec", "1 text"]);
    // No 2.txt

    let config = config_for(dir.path(), "txt", 2);
    let mut conn = open_database(&config.database_path).unwrap();

    let res = import_book(&config, &mut conn);
    match res {
        Err(ImportError::Io { path, .. }) => assert_eq!(path, dir.path().join("2.txt")),
        other => panic!("expected Io error, got {:?}", other),
    }
    assert_eq!(count_verses(&mut conn, h::BOOK).unwrap(), 0);
}

#[test]
fn test_malformed_chapter_aborts_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    h::write_txt_chapter(dir.path(), 1, &["Chapter 1", "Sec", "1 text"]);
    h::write_txt_chapter(dir.path(), 2, &["Chapter 2", "Sec", "12345678901234 text"]);

    let config = config_for(dir.path(), "txt", 2);
    let mut conn = open_database(&config.database_path).unwrap();

    let res = import_book(&config, &mut conn);
    assert!(matches!(res, Err(ImportError::VerseParse { chapter: 2, .. })));
    assert_eq!(count_verses(&mut conn, h::BOOK).unwrap(), 0);
    assert_eq!(count_stories(&mut conn, h::BOOK).unwrap(), 0);
}

#[test]
fn test_parse_book_reports_each_chapter() {
    let dir = tempfile::tempdir().unwrap();
    for chapter in 1..=3 {
        h::write_txt_chapter(dir.path(), chapter, &["Banner", "Sec", "1 text"]);
    }

    let config = config_for(dir.path(), "txt", 3);
    let mut seen = Vec::new();
    let book = parse_book(&config, &PlainTextReader, |c| seen.push(c.chapter)).unwrap();

    assert_eq!(seen, vec![1, 2, 3]);
    assert_eq!(book.chapters.len(), 3);
    assert_eq!(book.verse_count(), 3);
}

#[test]
fn test_unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_for(dir.path(), "pdf", 1);
    config.database_path = dir.path().join("db.sqlite3");
    let mut conn = open_database(&config.database_path).unwrap();

    let res = import_book(&config, &mut conn);
    assert!(matches!(res, Err(ImportError::UnsupportedDocument(_))));
}
