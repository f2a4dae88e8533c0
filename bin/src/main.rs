//! Ronda CLI binary.
//!
//! Runs the momentum / low-volatility long-short backtest on a CSV of daily
//! prices.

mod cmd;
mod config;
mod data;

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::config::ConfigArgs;

#[derive(Parser)]
#[command(name = "ronda")]
#[command(about = "Momentum / low-volatility long-short factor research", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full backtest and report performance statistics
    Backtest {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        config: ConfigArgs,

        /// Output format for the statistics
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Write daily leg returns and equity curves to this CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compute month-end combined factor scores
    Scores {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        config: ConfigArgs,

        /// Write scores to this CSV file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List available factors, or describe one
    Factors {
        /// Factor to describe (lists all factors when omitted)
        name: Option<String>,
    },
}

/// Where the daily panel comes from.
#[derive(Debug, Args)]
struct InputArgs {
    /// Wide CSV with a date column and one column per ticker
    prices: PathBuf,

    /// Name of the date column
    #[arg(long, default_value = "date")]
    date_column: String,

    /// The CSV already holds daily simple returns rather than prices
    #[arg(long)]
    returns: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Backtest {
            input,
            config,
            format,
            output,
        } => cmd::backtest::run_backtest(&input, &config, format, output.as_deref()),
        Commands::Scores {
            input,
            config,
            output,
        } => cmd::scores::show_scores(&input, &config, output.as_deref()),
        Commands::Factors { name } => cmd::factors::list_factors(name.as_deref()),
    }
}

/// Logs go to stderr so stdout stays parseable.
fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
