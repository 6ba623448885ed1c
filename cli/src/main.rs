mod import;

use std::path::{Path, PathBuf};
use std::process::exit;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;

use pbti_backend::chapter_parser::parse_chapter;
use pbti_backend::config::ImportConfig;
use pbti_backend::document::reader_for_extension;

#[derive(Parser, Debug)]
#[command(author, version, about = "Import chapter documents of a book into the stories and verses tables", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse every chapter document of the book, then load stories and verses
    /// into the database in one transaction. Existing rows are kept.
    Import {
        /// Numeric code of the book
        #[arg(long, value_name = "NUMBER")]
        book_number: Option<i32>,

        /// Number of chapters, read as 1..=N
        #[arg(long, value_name = "N")]
        chapter_count: Option<i32>,

        /// Folder with the chapter documents, named <chapter>.<extension>
        #[arg(long, value_name = "DIRECTORY_PATH")]
        upload_dir: Option<PathBuf>,

        /// Chapter document extension (docx or txt)
        #[arg(long, value_name = "EXT")]
        extension: Option<String>,

        /// Path to the SQLite database
        #[arg(long, value_name = "FILE_PATH")]
        database: Option<PathBuf>,

        /// Parse all chapters and report, without writing to the database
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },

    /// Parse one chapter document and print its structure as JSON
    #[command(arg_required_else_help = true)]
    Parse {
        /// Path to the chapter document
        #[arg(value_name = "FILE_PATH")]
        path: PathBuf,

        /// Chapter number to report in the output
        #[arg(long, default_value_t = 1)]
        chapter: i32,
    },
}

fn parse_document(path: &Path, chapter: i32) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();

    let source = reader_for_extension(ext)?;
    let paragraphs = source.read_paragraphs(path)?;
    let structure = parse_chapter(chapter, paragraphs.as_slice())?;

    let json = serde_json::to_string_pretty(&structure)
        .context("Failed to serialize chapter structure")?;
    println!("{}", json);

    Ok(())
}

fn main() {
    if dotenv().is_err() {
        println!("Info: No .env file found or failed to load.");
    }

    let cli = Cli::parse();

    let command_result = match cli.command {
        Commands::Import { book_number, chapter_count, upload_dir, extension, database, dry_run } => {
            ImportConfig::from_env()
                .map_err(anyhow::Error::from)
                .map(|mut config| {
                    if let Some(n) = book_number { config.book_number = n; }
                    if let Some(n) = chapter_count { config.chapter_count = n; }
                    if let Some(p) = upload_dir { config.upload_dir = p; }
                    if let Some(e) = extension { config.doc_extension = e.trim_start_matches('.').to_string(); }
                    if let Some(p) = database { config.database_path = p; }
                    config
                })
                .and_then(|config| import::run_import(&config, dry_run))
        }

        Commands::Parse { path, chapter } => {
            if !path.exists() {
                Err(anyhow::anyhow!("Document does not exist: {:?}", path))
            } else {
                parse_document(&path, chapter)
            }
        }
    };

    if let Err(e) = command_result {
        eprintln!("Error executing command: {:#}", e);
        exit(1);
    }
}
