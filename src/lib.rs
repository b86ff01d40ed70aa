//! Markupconv: converts object detection markup between dataset layouts.
//!
//! Three layouts are supported: `internal` (per-image JSON plus a label
//! inventory), `internalCSV` (one flat table) and `pascalVOC` (one XML
//! document). Every layout is read into the same intermediate
//! representation and written back out from it, so 3 readers and 3 writers
//! cover all 9 conversions.
//!
//! # Modules
//!
//! - [`ir`]: Intermediate representation, readers and writers
//! - [`config`]: Conversion settings from `config.json` and the command line
//! - [`validation`]: Checks run on settings before any conversion work
//! - [`conversion`]: The read, write and image copy pipeline
//! - [`error`]: Error types for markupconv operations

pub mod config;
pub mod conversion;
pub mod error;
pub mod ir;
pub mod validation;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use error::MarkupError;

/// The markupconv CLI application.
#[derive(Parser)]
#[command(name = "markupconv")]
#[command(version, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Convert a dataset from one layout to another.
    Convert(ConvertArgs),
}

/// Arguments for the convert subcommand.
///
/// Flags override the values read from the config file.
#[derive(clap::Args)]
struct ConvertArgs {
    /// JSON config file (defaults to ./config.json when present).
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Source layout ('internal', 'internalCSV' or 'pascalVOC').
    #[arg(long)]
    input_format: Option<String>,

    /// Target layout ('internal', 'internalCSV' or 'pascalVOC').
    #[arg(long)]
    output_format: Option<String>,

    /// Source dataset directory.
    #[arg(long, short = 'i')]
    input_path: Option<PathBuf>,

    /// Target dataset directory (created if missing).
    #[arg(long, short = 'o')]
    output_path: Option<PathBuf>,

    /// Hide progress bars.
    #[arg(long, short = 'q')]
    quiet: bool,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    report: String,
}

/// Run the markupconv CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), MarkupError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Convert(args)) => run_convert(args),
        None => {
            println!("markupconv {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Converts object detection markup between internal, internalCSV and pascalVOC.");
            println!();
            println!("Run 'markupconv --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the convert subcommand.
fn run_convert(args: ConvertArgs) -> Result<(), MarkupError> {
    let overrides = config::ConvertConfig {
        input_format: args.input_format,
        output_format: args.output_format,
        input_path: args.input_path,
        output_path: args.output_path,
    };
    let settings = config::ConvertConfig::discover(args.config.as_deref())?.merge(overrides);

    let opts = conversion::ConvertOptions {
        show_progress: !args.quiet,
    };
    let report = conversion::convert(&settings, &opts)?;

    match args.report.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&report).map_err(|source| {
                MarkupError::InternalJsonWrite {
                    path: PathBuf::from("<stdout>"),
                    source,
                }
            })?;
            println!("{json}");
        }
        _ => print!("{}", report),
    }

    Ok(())
}
