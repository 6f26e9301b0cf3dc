//! # Quill
//!
//! A minimal text editor: menus, a text area, and find/replace bars in as
//! many independent windows as you like.
//!
//! ```bash
//! # Run the editor
//! cargo run
//!
//! # Open a file, logging at debug level
//! cargo run -- -vv notes.txt
//! ```

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quill_core::Config;
use quill_ui::{run, Flags};

/// Quill - a minimal text editor
#[derive(Parser, Debug)]
#[command(name = "quill")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File to open
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

/// Loads the config named on the command line, or the default one.
///
/// A bad config file is logged and replaced by defaults.
fn load_config(path: Option<&PathBuf>) -> Config {
    match path {
        Some(path) => Config::load_from(path).unwrap_or_else(|e| {
            tracing::warn!("Could not load {}: {}", path.display(), e);
            Config::default()
        }),
        None => Config::load(),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            args.log_level(),
        ))
        .init();

    tracing::info!("Starting Quill v{}", env!("CARGO_PKG_VERSION"));

    let flags = Flags {
        config: load_config(args.config.as_ref()),
        file: args.file,
    };

    run(flags).map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
