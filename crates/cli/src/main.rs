//! Blockdoc command line front end
//!
//! Exports block documents, materializes report data, prints pagination,
//! and manages custom templates stored next to the editor settings.

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{ExportArgs, NewArgs, PaginateArgs, ReportArgs, TemplateCommand};
use store::SettingsManager;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default settings directory, relative to the working directory
const DEFAULT_CONFIG_DIR: &str = ".blockdoc";

#[derive(Parser, Debug)]
#[command(name = "blockdoc")]
#[command(author, version, about = "Export and manage block documents", long_about = None)]
struct Cli {
    /// Directory holding settings.json and the template store
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export a document to DOCX, PDF, HTML, Markdown, LaTeX, or text
    Export(ExportArgs),

    /// Build an academic report document from structured data
    Report(ReportArgs),

    /// Print how a document splits into pages
    Paginate(PaginateArgs),

    /// Manage custom templates
    Template {
        #[command(subcommand)]
        command: TemplateCommand,
    },

    /// Write a new document
    New(NewArgs),
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_dir = cli
        .config_dir
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR));
    let mut settings = SettingsManager::new(&config_dir);
    settings.load().await?;
    tracing::debug!(dir = %config_dir.display(), "loaded settings");

    match cli.command {
        Command::Export(args) => commands::export(args, &settings).await,
        Command::Report(args) => commands::report(args).await,
        Command::Paginate(args) => commands::paginate(args, &settings).await,
        Command::Template { command } => commands::template(command, &settings).await,
        Command::New(args) => commands::new_document(args, &settings).await,
    }
}
