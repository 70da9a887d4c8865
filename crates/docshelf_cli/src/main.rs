//! Command-line driver for the docshelf catalog.

use bytes::Bytes;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use docshelf_core::{
    search, text::human_size, Catalog, Config, HttpRemoteStore, NewFile, RemoteStore, Store,
};

#[derive(Parser)]
#[command(name = "dshelf", about = "Docshelf catalog CLI", version)]
struct Cli {
    /// Remote store URL (can also be set via REMOTE_URL env var)
    #[arg(short, long, env = "REMOTE_URL")]
    server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add files to the catalog
    Add { paths: Vec<PathBuf> },
    /// List documents grouped by category
    List,
    /// Search document names
    Search { query: String },
    /// Write a document's content to a file
    Get {
        id: String,
        /// Output path (defaults to the document name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Remove one document
    Rm { id: String },
    /// Remove every document
    Clear {
        /// Confirm the wipe; without this flag nothing happens
        #[arg(long)]
        yes: bool,
    },
    /// Replace the local catalog with the remote store listing
    Pull,
}

fn mime_for_path(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("txt") | Some("log") => "text/plain",
        Some("md") => "text/markdown",
        Some("html") | Some("htm") => "text/html",
        Some("css") => "text/css",
        Some("csv") => "text/csv",
        Some("js") => "text/javascript",
        Some("json") => "application/json",
        Some("xml") => "application/xml",
        Some("pdf") => "application/pdf",
        Some("zip") => "application/zip",
        Some("gz") => "application/gzip",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        _ => "application/octet-stream",
    }
}

fn print_warnings(warnings: &[docshelf_core::AppError]) {
    for warning in warnings {
        eprintln!("warning: {}", warning);
    }
}

async fn run(cli: Cli, catalog: Catalog) -> anyhow::Result<()> {
    let mut had_failures = false;
    match cli.command {
        Commands::Add { paths } => {
            if paths.is_empty() {
                anyhow::bail!("No files given");
            }
            let mut files = Vec::new();
            for path in &paths {
                let bytes = std::fs::read(path)?;
                let name = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .map(str::to_string)
                    .unwrap_or_default();
                files.push(NewFile::new(name, mime_for_path(path), Bytes::from(bytes)));
            }

            let outcome = catalog.add(files).await?;
            for doc in &outcome.added {
                println!("Added: {} ({}, {})", doc.name, doc.id, human_size(doc.size));
            }
            for failure in &outcome.failed {
                eprintln!("Failed: {}: {}", failure.name, failure.error);
            }
            print_warnings(&outcome.warnings);
            had_failures = !outcome.failed.is_empty();
        }
        Commands::List => {
            let docs = catalog.list().await;
            if docs.is_empty() {
                println!("No documents.");
                return Ok(());
            }
            for (category, items) in search::group(&docs) {
                println!("{} ({})", category.label(), items.len());
                for doc in items {
                    println!(
                        "  {:<36} {:<30} {:>10}  {}",
                        doc.id,
                        doc.name,
                        human_size(doc.size),
                        doc.date.format("%Y-%m-%d %H:%M")
                    );
                }
            }
        }
        Commands::Search { query } => {
            let docs = catalog.list().await;
            let ranked = search::rank(&query, &docs);
            if ranked.is_empty() {
                println!("No matching documents.");
                return Ok(());
            }
            for entry in ranked {
                println!("{:>4}  {:<36} {}", entry.score, entry.doc.id, entry.doc.name);
            }
        }
        Commands::Get { id, output } => {
            let content = catalog.resolve_content(&id).await?;
            if content.is_placeholder() {
                eprintln!("Content unavailable; writing a metadata placeholder instead.");
            }
            let path = output.unwrap_or_else(|| PathBuf::from(content.file_name()));
            std::fs::write(&path, content.bytes())?;
            println!("Wrote {}", path.display());
        }
        Commands::Rm { id } => {
            let outcome = catalog.remove(&id).await;
            print_warnings(&outcome.warnings);
            if outcome.removed {
                println!("Removed: {}", id);
            } else {
                println!("No document with id {}", id);
            }
        }
        Commands::Clear { yes } => {
            if !yes {
                anyhow::bail!("Refusing to clear without --yes");
            }
            let outcome = catalog.clear().await;
            print_warnings(&outcome.warnings);
            println!("Removed {} document(s)", outcome.cleared);
        }
        Commands::Pull => {
            let docs = catalog.refresh().await?;
            println!("Catalog now holds {} document(s)", docs.len());
        }
    }

    catalog.flush()?;
    if had_failures {
        std::process::exit(1);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docshelf=warn".into()),
        )
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env();
    if cli.server.is_some() {
        config.remote_url = cli.server.clone();
    }

    let store = Store::open(&config.db_path)?;
    let remote: Option<Arc<dyn RemoteStore>> = config
        .remote_url
        .as_ref()
        .map(|url| Arc::new(HttpRemoteStore::new(url.clone())) as Arc<dyn RemoteStore>);
    let catalog = Catalog::new(store, remote, config.max_file_size);

    run(cli, catalog).await
}
