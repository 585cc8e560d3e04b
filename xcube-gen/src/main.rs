//! xcube-gen - cube listing to XMage deck file
//!
//! Resolves every card of a cube listing to its oldest print from a regular
//! set (or to a fixed print for promos), groups the cards by bucket and
//! writes the result as an XMage `.dck` file.
//!
//! Example:
//!
//! ```text
//! xcube-gen cube.dck --input vintage-cube.json
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use xcube_common::config::TomlConfig;

use xcube_gen::oracle::MtgApiClient;
use xcube_gen::{ListingFile, XMageExporter};

/// Command-line arguments for xcube-gen
#[derive(Parser, Debug)]
#[command(name = "xcube-gen")]
#[command(about = "Generate an XMage deck file from a cube listing")]
#[command(after_help = "example: xcube-gen cube.dck --input vintage-cube.json")]
#[command(version)]
struct Args {
    /// File to write the deck to
    file: PathBuf,

    /// Cube listing (JSON) to read cards from
    #[arg(short, long, env = "XCUBE_INPUT")]
    input: PathBuf,

    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level or filter directives, e.g. "debug" or "xcube_gen=trace"
    #[arg(long)]
    log_level: Option<String>,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("xcube-gen: error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = TomlConfig::load(args.config.as_deref()).context("Failed to load configuration")?;

    xcube_common::logging::init_tracing(&config.logging, args.log_level.as_deref())
        .context("Failed to initialize logging")?;

    info!("Starting xcube-gen {}", env!("CARGO_PKG_VERSION"));

    let client = MtgApiClient::new(&config.oracle).context("Failed to create card API client")?;
    let source = ListingFile::new(&args.input);
    let exporter = XMageExporter::new();

    let cube = xcube_gen::generate(&args.file, &config, &source, &client, &client, &exporter)
        .with_context(|| format!("Failed to generate {}", args.file.display()))?;

    info!(
        "Done: {} cards ({} distinct) written to {}",
        cube.len(),
        cube.entries().len(),
        args.file.display()
    );

    Ok(())
}
