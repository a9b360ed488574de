//! Runs a beaker scenario from a TOML file and reports the state after each phase.
//!
//! ```text
//! phscale-sim crates/sim/scenarios/acid_dilution.toml --log-level debug
//! ```
//!
//! `RUST_LOG` takes precedence over `--log-level` when set.

mod scenario;

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::scenario::Scenario;

#[derive(Parser, Debug)]
#[command(name = "phscale-sim", version, about = "Run a phscale beaker scenario")]
struct Args {
    /// Path to the scenario TOML file.
    scenario: PathBuf,

    /// Log filter used when `RUST_LOG` is not set (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&args.log_level))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let text = fs::read_to_string(&args.scenario)
        .with_context(|| format!("failed to read {}", args.scenario.display()))?;
    let scenario = Scenario::from_toml(&text)?;

    for result in scenario.run()? {
        println!("{}", result.row());
    }
    Ok(())
}
