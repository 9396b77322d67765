//! Mint curve simulator binary.
//!
//! Runs the minting loop for one growth function and prints
//! `x total supply [minted]` per step to stdout. Logs go to stderr.

use std::io::{self, BufWriter};

use anyhow::{Context, Result};
use clap::Parser;
use mint_curve::constants::{DEFAULT_BOUND, LONG_RUN_BOUND};
use mint_curve::{run, ClampPolicy, GrowthFn, SimConfig};
use tracing::info;

/// Token minting growth simulator.
#[derive(Parser, Debug)]
#[command(
    name = "mint-sim",
    version,
    about = "Simulate a token minting curve over a growing input sequence"
)]
struct Args {
    /// Growth function: constant, linear, quadratic, cubic, exponential, sublinear, sqrt
    #[arg(long, default_value_t = GrowthFn::Quadratic)]
    growth: GrowthFn,

    /// Exclusive upper bound of the step counter
    #[arg(long, default_value_t = DEFAULT_BOUND, conflicts_with = "long_run")]
    bound: u64,

    /// Run to the long-run bound (10,000,000,000)
    #[arg(long)]
    long_run: bool,

    /// Floor the average at 1000, divide by average/1000 and cap minted at 1,000,000
    #[arg(long)]
    clamp: bool,

    /// Print the minted amount as a fourth column
    #[arg(long)]
    show_minted: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Log output format ("text" or "json")
    #[arg(long, default_value = "text")]
    log_format: String,
}

impl Args {
    /// Convert CLI args into a SimConfig.
    fn into_config(self) -> SimConfig {
        let bound = if self.long_run { LONG_RUN_BOUND } else { self.bound };

        SimConfig {
            bound,
            growth: self.growth,
            clamp: self.clamp.then(ClampPolicy::default),
            show_minted: self.show_minted,
            log_level: self.log_level,
            log_format: self.log_format,
        }
    }
}

fn main() -> Result<()> {
    let config = Args::parse().into_config();

    init_logging(&config.log_level, &config.log_format);

    info!("mint-sim v{}", env!("CARGO_PKG_VERSION"));

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let summary = run(&config, &mut out).context("failed to write simulation output")?;

    info!(steps = summary.steps, supply = %summary.supply, "done");
    Ok(())
}

/// Initialize tracing subscriber with the given log level and output format.
///
/// Pass `format = "json"` for structured JSON output. Any other value
/// defaults to human-readable text. Both write to stderr.
fn init_logging(level_str: &str, format: &str) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_str));

    if format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(io::stderr),
            )
            .init();
    }
}
