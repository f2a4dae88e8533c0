//! Backtest command implementation.

use std::path::Path;

use anyhow::Result;
use ronda_eval::{Backtest, BacktestConfig, Leg, LegStats, PerformanceStats};
use serde::Serialize;

use crate::config::ConfigArgs;
use crate::{InputArgs, OutputFormat, data};

/// JSON report of a backtest run.
#[derive(Debug, Serialize)]
struct Report<'a> {
    config: &'a BacktestConfig,
    first_date: Option<String>,
    last_date: Option<String>,
    days: usize,
    positioned_days: usize,
    rebalance_dates: usize,
    stats: &'a LegStats,
}

/// Run the backtest on a price (or return) CSV.
pub(crate) fn run_backtest(
    input: &InputArgs,
    config: &ConfigArgs,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let config = config.resolve()?;
    let returns = super::load_returns(input)?;
    let result = Backtest::new(config.clone()).run(&returns)?;

    if let Some(path) = output {
        let mut df = result.returns.to_dataframe()?;
        data::write_csv(&mut df, Some(path))?;
    }

    let dates = &result.returns.dates;
    match format {
        OutputFormat::Json => {
            let report = Report {
                config: &config,
                first_date: dates.first().map(ToString::to_string),
                last_date: dates.last().map(ToString::to_string),
                days: result.returns.len(),
                positioned_days: result.returns.positioned_days(),
                rebalance_dates: result.combined.n_dates(),
                stats: &result.stats,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            if let (Some(first), Some(last)) = (dates.first(), dates.last()) {
                println!("Period:          {first} to {last}");
            }
            println!("Symbols:         {}", returns.n_symbols());
            println!("Trading days:    {}", result.returns.len());
            println!("Positioned days: {}", result.returns.positioned_days());
            println!("Rebalances:      {}", result.combined.n_dates());
            println!();
            println!(
                "{:<12} {:>10} {:>10} {:>10} {:>10}",
                "leg", "CAGR", "Vol", "Sharpe", "Max DD"
            );
            println!("{}", "-".repeat(56));
            for leg in Leg::ALL {
                println!("{}", format_stats_row(leg, result.stats.get(leg)));
            }
        }
    }

    Ok(())
}

fn format_stats_row(leg: Leg, stats: &PerformanceStats) -> String {
    let percent = |v: Option<f64>| v.map_or_else(|| "n/a".to_string(), |x| format!("{:.2}%", x * 100.0));
    let ratio = |v: Option<f64>| v.map_or_else(|| "n/a".to_string(), |x| format!("{x:.2}"));
    format!(
        "{:<12} {:>10} {:>10} {:>10} {:>10}",
        leg.to_string(),
        percent(stats.cagr),
        percent(stats.vol),
        ratio(stats.sharpe),
        percent(stats.max_drawdown)
    )
}
