//! GL Capabilities Report
//!
//! Replays a recorded driver snapshot through a context and prints what the
//! driver supports.
//!
//! ```text
//! glcaps [SNAPSHOT.json] [--settings SETTINGS.json] [--json]
//! ```
//!
//! Without a snapshot path a built-in GL ES 3.0 driver is used.

mod report;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Parser;
use glcaps_context::{Context, ContextSettings, DriverSnapshot, SnapshotDriver};

use crate::report::Report;

#[derive(Debug, Parser)]
#[command(name = "glcaps", about = "Report what a GL driver supports", version)]
struct Args {
    /// Driver snapshot (JSON). Defaults to the built-in GL ES 3.0 driver.
    snapshot: Option<PathBuf>,

    /// Context settings (JSON).
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Output as JSON instead of human-readable text.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    tracing::info!("glcaps v{}", glcaps_core::VERSION);

    let snapshot = match &args.snapshot {
        Some(path) => DriverSnapshot::load(path)?,
        None => {
            tracing::info!("no snapshot given, using the built-in GL ES 3.0 driver");
            DriverSnapshot::embedded_3_0()
        }
    };

    let settings = match &args.settings {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read settings {}", path.display()))?;
            serde_json::from_str::<ContextSettings>(&json).context("invalid settings")?
        }
        None => ContextSettings::default(),
    };

    let mut ctx = Context::new(SnapshotDriver::new(snapshot), settings);
    ctx.initialize().context("failed to initialize GL context")?;

    let report = Report::collect(&ctx);
    if args.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{report}");
    }

    tracing::debug!(calls = ctx.call_count(), "report complete");
    for (symbol, count) in ctx.call_counters() {
        tracing::debug!("{symbol}: {count}");
    }

    Ok(())
}
