//! Performance statistics for daily return series.
//!
//! This module aggregates a daily return series into:
//! - CAGR: geometric growth annualized over the observed day count
//! - Annualized volatility: sample standard deviation scaled by `√days_per_year`
//! - Sharpe ratio: CAGR over volatility
//! - Maximum drawdown: worst decline of equity from its running peak
//!
//! Every statistic is an `Option`; a series with no present returns yields
//! a record where all four are `None` instead of an error.

use ronda_traits::{Result, RondaError, stats};
use serde::{Deserialize, Serialize};

/// Configuration for performance statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Number of trading days per year for annualization (default: 252)
    pub trading_days_per_year: usize,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            trading_days_per_year: 252,
        }
    }
}

impl PerformanceConfig {
    /// Checks that annualization is possible.
    ///
    /// # Errors
    ///
    /// Returns [`RondaError::InvalidConfig`] if `trading_days_per_year` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.trading_days_per_year == 0 {
            return Err(RondaError::InvalidConfig(
                "trading_days_per_year must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Summary statistics of one daily return series.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PerformanceStats {
    /// Compound annual growth rate
    pub cagr: Option<f64>,
    /// Annualized volatility
    pub vol: Option<f64>,
    /// CAGR divided by annualized volatility
    pub sharpe: Option<f64>,
    /// Minimum of `equity / running_peak - 1` (zero or negative)
    pub max_drawdown: Option<f64>,
    /// Number of present returns used
    pub n_obs: usize,
}

impl PerformanceStats {
    /// Calculate statistics from a daily return series.
    ///
    /// Missing returns are dropped before any aggregation. With `n` present
    /// returns and `D` trading days per year:
    ///
    /// - `cagr = ∏(1 + r)^(D / n) - 1`
    /// - `vol = sample_std(r) · √D`, reported as `0` when the standard
    ///   deviation is below [`stats::MIN_STD_THRESHOLD`] and `None` with a
    ///   single observation
    /// - `sharpe = cagr / vol`, `None` when `vol` is zero or undefined
    ///
    /// # Example
    ///
    /// ```rust
    /// use ronda_eval::{PerformanceConfig, PerformanceStats};
    ///
    /// let stats = PerformanceStats::calculate(&[Some(0.01), None, Some(-0.005)], &PerformanceConfig::default());
    /// assert_eq!(stats.n_obs, 2);
    /// ```
    pub fn calculate(returns: &[Option<f64>], config: &PerformanceConfig) -> Self {
        let observed = stats::present(returns);
        let n_obs = observed.len();
        if n_obs == 0 || config.trading_days_per_year == 0 {
            return Self {
                n_obs,
                ..Self::default()
            };
        }

        let days_per_year = config.trading_days_per_year as f64;
        let growth: f64 = observed.iter().map(|r| 1.0 + r).product();
        let cagr = Some(growth.powf(days_per_year / n_obs as f64) - 1.0).filter(|x| x.is_finite());

        let vol = stats::sample_std(&observed).map(|std| {
            if std < stats::MIN_STD_THRESHOLD { 0.0 } else { std * days_per_year.sqrt() }
        });

        let sharpe = match (cagr, vol) {
            (Some(c), Some(v)) if v > 0.0 => Some(c / v),
            _ => None,
        };

        Self {
            cagr,
            vol,
            sharpe,
            max_drawdown: max_drawdown(&observed),
            n_obs,
        }
    }
}

/// Cumulative growth of one unit invested, `∏(1 + r)`.
///
/// Missing returns leave the equity unchanged, so the curve has one value
/// per input day and starts from `1.0` before the first present return.
pub fn equity_curve(returns: &[Option<f64>]) -> Vec<f64> {
    returns
        .iter()
        .scan(1.0, |equity, r| {
            if let Some(r) = r.filter(|x| x.is_finite()) {
                *equity *= 1.0 + r;
            }
            Some(*equity)
        })
        .collect()
}

/// Minimum of `equity / running_peak - 1`, with the peak starting at the
/// first day's equity.
fn max_drawdown(returns: &[f64]) -> Option<f64> {
    let mut equity = 1.0;
    let mut peak = f64::NEG_INFINITY;
    let mut worst: Option<f64> = None;

    for r in returns {
        equity *= 1.0 + r;
        peak = peak.max(equity);
        if peak <= 0.0 {
            continue;
        }
        let drawdown = equity / peak - 1.0;
        worst = Some(worst.map_or(drawdown, |w: f64| w.min(drawdown)));
    }

    worst
}
