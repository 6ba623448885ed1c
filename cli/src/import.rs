use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use pbti_backend::config::ImportConfig;
use pbti_backend::db;
use pbti_backend::document::reader_for_extension;
use pbti_backend::importer::parse_book;
use pbti_backend::loader::load_book;
use pbti_backend::logger;

pub fn run_import(config: &ImportConfig, dry_run: bool) -> Result<()> {
    logger::info("=== import ===");
    logger::info(&format!("{:?}", config));

    if !config.upload_dir.is_dir() {
        anyhow::bail!("Upload directory not found: {}", config.upload_dir.display());
    }

    let source = reader_for_extension(&config.doc_extension)?;

    let pb = ProgressBar::new(config.chapter_count.max(0) as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );
    pb.set_message("Parsing chapters...");

    let book = parse_book(config, source.as_ref(), |chapter| {
        pb.set_message(format!(
            "Chapter {}: {} sections, {} verses",
            chapter.chapter,
            chapter.section_count(),
            chapter.verse_count()
        ));
        pb.inc(1);
    });
    pb.finish_and_clear();
    let book = book.context("Failed to parse chapter documents")?;

    info!(
        "Parsed {} chapters: {} sections, {} verses, {} cross references",
        book.chapters.len(),
        book.section_count(),
        book.verse_count(),
        book.cross_reference_count(),
    );

    if dry_run {
        info!("Dry run, database not touched");
        return Ok(());
    }

    let mut conn = db::open_database(&config.database_path)
        .with_context(|| format!("Failed to open database: {}", config.database_path.display()))?;

    let stats = load_book(&mut conn, config.book_number, &book)
        .context("Error inserting data into database")?;

    info!(
        "Book {}: {} stories inserted, {} skipped, {} without verses; {} verses inserted, {} skipped",
        config.book_number,
        stats.stories_inserted,
        stats.stories_skipped,
        stats.stories_without_verse,
        stats.verses_inserted,
        stats.verses_skipped,
    );

    Ok(())
}
