//! Historical volatility factor: trailing standard deviation of daily returns.

use ronda_traits::{Factor, Panel, Result, RondaError, stats};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configuration for the volatility factor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolatilityConfig {
    /// Number of trailing trading days (default: 63 days ≈ 3 months)
    pub window: usize,

    /// Minimum present returns in the window for a value (default: 2)
    ///
    /// The default accepts partial windows. Set it equal to `window` to
    /// require a full window, as momentum does.
    pub min_periods: usize,
}

impl Default for VolatilityConfig {
    fn default() -> Self {
        Self {
            window: 63,
            min_periods: 2,
        }
    }
}

impl VolatilityConfig {
    /// Checks that the window can produce a sample standard deviation.
    ///
    /// # Errors
    ///
    /// Returns [`RondaError::InvalidConfig`] unless `2 <= min_periods <= window`.
    pub fn validate(&self) -> Result<()> {
        if self.min_periods < 2 {
            return Err(RondaError::InvalidConfig(format!(
                "volatility min_periods must be at least 2, got {}",
                self.min_periods
            )));
        }
        if self.min_periods > self.window {
            return Err(RondaError::InvalidConfig(format!(
                "volatility min_periods ({}) exceeds window ({})",
                self.min_periods, self.window
            )));
        }
        Ok(())
    }
}

/// Trailing volatility factor.
///
/// For each symbol and date, the sample standard deviation (N-1) of the
/// present returns among the most recent `window` rows. Lower values are
/// preferred when combined with momentum.
#[derive(Debug, Clone, Default)]
pub struct VolatilityFactor {
    config: VolatilityConfig,
}

impl VolatilityFactor {
    /// Create a new volatility factor with the given configuration.
    #[must_use]
    pub const fn new(config: VolatilityConfig) -> Self {
        Self { config }
    }

    /// Get the trailing window in days.
    #[must_use]
    pub const fn window(&self) -> usize {
        self.config.window
    }
}

impl Factor for VolatilityFactor {
    fn name(&self) -> &str {
        "volatility"
    }

    fn lookback(&self) -> usize {
        self.config.window
    }

    fn compute(&self, returns: &Panel) -> Result<Panel> {
        self.config.validate()?;

        let window = self.config.window;
        let min_periods = self.config.min_periods;
        let volatility = returns.map_columns(|column| rolling_std(column, window, min_periods));

        debug!(
            dates = returns.n_dates(),
            symbols = returns.n_symbols(),
            present = volatility.count_present(),
            "computed volatility"
        );

        Ok(volatility)
    }
}

fn rolling_std(column: &[Option<f64>], window: usize, min_periods: usize) -> Vec<Option<f64>> {
    (0..column.len())
        .map(|t| {
            let start = (t + 1).saturating_sub(window);
            let observed = stats::present(&column[start..=t]);
            if observed.len() < min_periods { None } else { stats::sample_std(&observed) }
        })
        .collect()
}
