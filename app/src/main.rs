#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod command;

use command::{
    ColumnsInput, ColumnsStrategy, CommandStrategy, ExtractInput, ExtractStrategy, InfoStrategy,
    InitStrategy, TemplateStrategy, VersionStrategy,
};

#[derive(Parser)]
#[command(name = "contacts")]
#[command(about = "Extract structured contacts from spreadsheet text blocks", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract contacts from a CSV file
    Extract {
        /// CSV file to read
        #[arg(short, long)]
        input: PathBuf,

        /// Column holding the contact blocks
        #[arg(short, long)]
        column: Option<String>,

        /// Output CSV path, or '-' for stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Column grouping contacts by organization
        #[arg(long)]
        org_column: Option<String>,

        /// Skip speculative email inference
        #[arg(long)]
        no_infer: bool,

        /// Parse rows in parallel
        #[arg(long)]
        parallel: bool,

        /// Print the email pattern resolved for each organization
        #[arg(long)]
        show_patterns: bool,

        /// Print the resolved patterns as JSON
        #[arg(long, requires = "show_patterns")]
        json: bool,
    },
    /// List the columns of a CSV file
    Columns {
        /// CSV file to read
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Show the prompt format that produces parseable contact blocks
    Template,
    /// Initialize configuration
    Init,
    /// Show configuration
    Info,
    /// Show version
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Extract {
            input,
            column,
            output,
            org_column,
            no_infer,
            parallel,
            show_patterns,
            json,
        } => ExtractStrategy.execute(ExtractInput {
            input,
            column,
            output,
            org_column,
            no_infer,
            parallel,
            show_patterns,
            json,
        }),
        Commands::Columns { input } => ColumnsStrategy.execute(ColumnsInput { input }),
        Commands::Template => TemplateStrategy.execute(()),
        Commands::Init => InitStrategy.execute(()),
        Commands::Info => InfoStrategy.execute(()),
        Commands::Version => VersionStrategy.execute(()),
    }
}
