//! Long-term momentum factor: 12-month cumulative return, skipping the most recent month.

use ronda_traits::{Factor, Panel, Result, RondaError};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configuration for the momentum factor.
///
/// The factor compounds returns over a long lookback window, typically 12
/// months (252 trading days), then lags the result by the skip period so the
/// most recent month's short-term reversal is excluded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MomentumConfig {
    /// Number of trading days compounded (default: 252 days ≈ 12 months)
    pub lookback_days: usize,

    /// Number of recent days skipped to avoid reversal (default: 21 days ≈ 1 month)
    pub skip_days: usize,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self {
            lookback_days: 252,
            skip_days: 21,
        }
    }
}

impl MomentumConfig {
    /// Checks that the window is usable.
    ///
    /// # Errors
    ///
    /// Returns [`RondaError::InvalidConfig`] when `lookback_days` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.lookback_days == 0 {
            return Err(RondaError::InvalidConfig(
                "momentum lookback_days must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// 12-1 momentum factor.
///
/// For each symbol and date `t`, the raw value is
/// `∏(1 + r) - 1` over the `lookback_days` returns ending at `t - skip_days`.
/// The value is present only if every return in that window is present;
/// a partial window is missing, never a shorter-period estimate.
///
/// # Example
///
/// ```ignore
/// use ronda_signals::MomentumFactor;
/// use ronda_traits::Factor;
///
/// let factor = MomentumFactor::default();
/// let monthly = factor.month_end_scores(&returns)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct MomentumFactor {
    config: MomentumConfig,
}

impl MomentumFactor {
    /// Create a new momentum factor with the given configuration.
    #[must_use]
    pub const fn new(config: MomentumConfig) -> Self {
        Self { config }
    }

    /// Get the compounding window in days.
    #[must_use]
    pub const fn lookback_days(&self) -> usize {
        self.config.lookback_days
    }

    /// Get the number of recent days skipped.
    #[must_use]
    pub const fn skip_days(&self) -> usize {
        self.config.skip_days
    }
}

impl Factor for MomentumFactor {
    fn name(&self) -> &str {
        "momentum"
    }

    fn lookback(&self) -> usize {
        self.config.lookback_days + self.config.skip_days
    }

    fn compute(&self, returns: &Panel) -> Result<Panel> {
        self.config.validate()?;

        let window = self.config.lookback_days;
        let compounded = returns.map_columns(|column| rolling_compound(column, window));
        let momentum = compounded.shift(self.config.skip_days);

        debug!(
            dates = returns.n_dates(),
            symbols = returns.n_symbols(),
            present = momentum.count_present(),
            "computed momentum"
        );

        Ok(momentum)
    }
}

/// Trailing compounded return over exactly `window` rows.
///
/// Row `t` covers rows `t + 1 - window ..= t`; any missing return in the
/// window makes the output missing.
fn rolling_compound(column: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    (0..column.len())
        .map(|t| {
            if t + 1 < window {
                return None;
            }
            column[t + 1 - window..=t]
                .iter()
                .try_fold(1.0, |growth, r| r.map(|r| growth * (1.0 + r)))
                .map(|growth| growth - 1.0)
        })
        .collect()
}
