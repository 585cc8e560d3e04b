//! xcube-min - strip comments and blank lines from an XMage deck file
//!
//! ```text
//! xcube-min cube.dck                  # writes cube.min.dck
//! xcube-min cube.dck -o small.dck
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use xcube_common::config::LoggingConfig;

/// Command-line arguments for xcube-min
#[derive(Parser, Debug)]
#[command(name = "xcube-min")]
#[command(about = "Minimize an XMage deck file")]
#[command(after_help = "example: xcube-min deck.dck")]
#[command(version)]
struct Args {
    /// XMage deck file to minimize
    deck: PathBuf,

    /// Where to write the result (default: <stem>.min.dck beside the deck)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log level or filter directives
    #[arg(long)]
    log_level: Option<String>,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("xcube-min: error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let logging = LoggingConfig {
        level: "warn".to_string(),
        file: None,
    };
    xcube_common::logging::init_tracing(&logging, args.log_level.as_deref())
        .context("Failed to initialize logging")?;

    let (target, kept) = xcube_min::minimize(&args.deck, args.output.as_deref())
        .with_context(|| format!("Failed to minimize {}", args.deck.display()))?;

    info!("{} lines written to {}", kept, target.display());
    Ok(())
}
