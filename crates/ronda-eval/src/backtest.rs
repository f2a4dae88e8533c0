//! End-to-end backtest driver.
//!
//! Runs the full research pipeline on a daily return panel: momentum and
//! volatility factors, month-end sampling, cross-sectional standardization,
//! linear combination, monthly-rebalanced long/short portfolio and summary
//! statistics for every leg.

use ronda_combine::{CombineWeights, Combiner, CrossSectionalStandardizer, FactorScore, LinearCombiner};
use ronda_signals::{MomentumConfig, MomentumFactor, VolatilityConfig, VolatilityFactor};
use ronda_traits::{Factor, Panel, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::metrics::{PerformanceConfig, PerformanceStats};
use crate::portfolio::{Leg, PortfolioBuilder, PortfolioConfig, PortfolioReturns};

/// Backtesting configuration.
///
/// Every section falls back to its default, so a partial JSON document such
/// as `{"portfolio": {"top_quantile": 0.1}}` is valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BacktestConfig {
    /// Momentum factor parameters
    pub momentum: MomentumConfig,
    /// Volatility factor parameters
    pub volatility: VolatilityConfig,
    /// Factor blend weights
    pub weights: CombineWeights,
    /// Quantile bucket sizes
    pub portfolio: PortfolioConfig,
    /// Annualization settings
    pub performance: PerformanceConfig,
}

impl BacktestConfig {
    /// Validates every section.
    ///
    /// # Errors
    ///
    /// Returns the first [`ronda_traits::RondaError::InvalidConfig`] found.
    pub fn validate(&self) -> Result<()> {
        self.momentum.validate()?;
        self.volatility.validate()?;
        self.weights.validate()?;
        self.portfolio.validate()?;
        self.performance.validate()
    }
}

/// Summary statistics of the three portfolio legs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegStats {
    /// Long leg statistics
    pub long: PerformanceStats,
    /// Short leg statistics
    pub short: PerformanceStats,
    /// Long-short statistics
    pub long_short: PerformanceStats,
}

impl LegStats {
    /// Statistics for one leg.
    #[must_use]
    pub const fn get(&self, leg: Leg) -> &PerformanceStats {
        match leg {
            Leg::Long => &self.long,
            Leg::Short => &self.short,
            Leg::LongShort => &self.long_short,
        }
    }
}

/// Backtesting results.
#[derive(Debug, Clone)]
pub struct BacktestResult {
    /// Raw month-end momentum
    pub momentum: Panel,
    /// Raw month-end volatility
    pub volatility: Panel,
    /// Month-end combined scores, higher is more attractive
    pub combined: Panel,
    /// Daily leg returns
    pub returns: PortfolioReturns,
    /// Summary statistics per leg
    pub stats: LegStats,
}

/// Backtesting engine.
#[derive(Debug, Clone, Default)]
pub struct Backtest {
    config: BacktestConfig,
}

impl Backtest {
    /// Create a new backtest with configuration.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use ronda_eval::{Backtest, BacktestConfig};
    ///
    /// let backtest = Backtest::new(BacktestConfig::default());
    /// let result = backtest.run(&returns)?;
    /// println!("Sharpe: {:?}", result.stats.long_short.sharpe);
    /// ```
    #[must_use]
    pub const fn new(config: BacktestConfig) -> Self {
        Self { config }
    }

    /// Get the backtest configuration.
    #[must_use]
    pub const fn config(&self) -> &BacktestConfig {
        &self.config
    }

    /// Month-end combined scores for a daily return panel.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or a stage rejects
    /// its input.
    pub fn combined_scores(&self, returns: &Panel) -> Result<(Panel, Panel, Panel)> {
        self.config.validate()?;

        let momentum = MomentumFactor::new(self.config.momentum.clone()).month_end_scores(returns)?;
        let volatility =
            VolatilityFactor::new(self.config.volatility.clone()).month_end_scores(returns)?;
        debug!(
            rebalance_dates = momentum.n_dates(),
            momentum_present = momentum.count_present(),
            volatility_present = volatility.count_present(),
            "sampled factors at month-end"
        );

        let standardizer = CrossSectionalStandardizer::new();
        let combined = LinearCombiner::momentum_low_vol(&self.config.weights).combine(&[
            FactorScore::new("momentum", standardizer.apply(&momentum)),
            FactorScore::new("volatility", standardizer.apply(&volatility)),
        ])?;

        if combined.count_present() == 0 {
            warn!(
                return_dates = returns.n_dates(),
                "no combined scores; the return history may be shorter than the momentum lookback"
            );
        }

        Ok((momentum, volatility, combined))
    }

    /// Run the backtest on a daily return panel.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or a stage rejects
    /// its input. Missing data never causes an error.
    pub fn run(&self, returns: &Panel) -> Result<BacktestResult> {
        let (momentum, volatility, combined) = self.combined_scores(returns)?;

        let portfolio = PortfolioBuilder::new(self.config.portfolio.clone()).build(&combined, returns)?;

        let performance = &self.config.performance;
        let stats = LegStats {
            long: PerformanceStats::calculate(portfolio.series(Leg::Long), performance),
            short: PerformanceStats::calculate(portfolio.series(Leg::Short), performance),
            long_short: PerformanceStats::calculate(portfolio.series(Leg::LongShort), performance),
        };

        debug!(
            days = portfolio.len(),
            positioned_days = portfolio.positioned_days(),
            long_short_cagr = ?stats.long_short.cagr,
            long_short_sharpe = ?stats.long_short.sharpe,
            "backtest complete"
        );

        Ok(BacktestResult {
            momentum,
            volatility,
            combined,
            returns: portfolio,
            stats,
        })
    }
}
