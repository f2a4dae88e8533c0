//! CLI subcommand modules.
//!
//! This module contains the implementations for all ronda CLI subcommands.

pub(crate) mod backtest;
pub(crate) mod factors;
pub(crate) mod scores;

use anyhow::Result;
use ronda_signals::simple_returns;
use ronda_traits::Panel;

use crate::InputArgs;
use crate::data;

/// Load the input CSV as a daily return panel.
pub(crate) fn load_returns(input: &InputArgs) -> Result<Panel> {
    let panel = data::load_panel(&input.prices, &input.date_column)?;
    if input.returns {
        Ok(panel)
    } else {
        Ok(simple_returns(&panel)?)
    }
}
