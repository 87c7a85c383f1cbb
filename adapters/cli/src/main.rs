#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that replays road edit scripts and prints the result.

mod ascii;
mod config;
mod script;
mod session;

use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use crate::{config::CliConfig, session::Session};

/// Replays pointer gestures against a road grid and prints the resulting map.
#[derive(Debug, Parser)]
#[command(name = "road-placer", version)]
struct Cli {
    /// TOML configuration file; built-in defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Edit script to replay; read from standard input when omitted.
    #[arg(long)]
    script: Option<PathBuf>,
    /// Log every placement, removal and reclassification.
    #[arg(short, long)]
    verbose: bool,
}

/// Entry point for the road placer command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = CliConfig::load(cli.config.as_deref())?;
    let source = read_script(cli.script.as_deref())?;
    let steps = script::parse(&source).context("failed to parse edit script")?;

    let mut session = Session::new(config)?;
    for step in steps {
        session.run(step);
    }

    let tally = session.tally();
    info!(
        "replayed script: {} placed, {} removed, {} rejected",
        tally.placed, tally.removed, tally.rejected
    );
    if tally.rejected > 0 {
        warn!("{} edits were rejected", tally.rejected);
    }
    print!("{}", session.report());
    Ok(())
}

fn read_script(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read script at {}", path.display())),
        None => {
            let mut source = String::new();
            let _ = io::stdin()
                .read_to_string(&mut source)
                .context("failed to read script from standard input")?;
            Ok(source)
        }
    }
}
