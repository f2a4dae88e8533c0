//! Scores command implementation.

use std::path::Path;

use anyhow::Result;
use ronda_eval::Backtest;
use tracing::info;

use crate::config::ConfigArgs;
use crate::{InputArgs, data};

/// Write month-end combined scores as CSV, higher is more attractive.
pub(crate) fn show_scores(input: &InputArgs, config: &ConfigArgs, output: Option<&Path>) -> Result<()> {
    let config = config.resolve()?;
    let returns = super::load_returns(input)?;
    let (_, _, combined) = Backtest::new(config).combined_scores(&returns)?;

    info!(
        dates = combined.n_dates(),
        symbols = combined.n_symbols(),
        present = combined.count_present(),
        "computed combined scores"
    );

    let mut df = combined.to_dataframe()?;
    data::write_csv(&mut df, output)
}
