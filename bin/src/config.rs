//! Backtest configuration from a JSON file plus command-line overrides.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use ronda_eval::BacktestConfig;

/// Configuration flags shared by the pipeline commands.
///
/// Every flag overrides the matching field of the `--config` file, which in
/// turn overrides the built-in defaults.
#[derive(Debug, Default, Args)]
pub(crate) struct ConfigArgs {
    /// JSON configuration file (missing sections use defaults)
    #[arg(short, long)]
    pub(crate) config: Option<PathBuf>,

    /// Momentum compounding window in trading days
    #[arg(long)]
    pub(crate) lookback_days: Option<usize>,

    /// Most recent trading days excluded from momentum
    #[arg(long)]
    pub(crate) skip_days: Option<usize>,

    /// Volatility window in trading days
    #[arg(long)]
    pub(crate) vol_window: Option<usize>,

    /// Minimum returns in the volatility window (set to the window for a strict full window)
    #[arg(long)]
    pub(crate) vol_min_periods: Option<usize>,

    /// Weight on standardized momentum
    #[arg(long)]
    pub(crate) weight_mom: Option<f64>,

    /// Weight on standardized volatility (subtracted)
    #[arg(long)]
    pub(crate) weight_vol: Option<f64>,

    /// Fraction of the cross-section held long
    #[arg(long)]
    pub(crate) top_quantile: Option<f64>,

    /// Fraction of the cross-section held short
    #[arg(long)]
    pub(crate) bottom_quantile: Option<f64>,

    /// Trading days per year for annualization
    #[arg(long)]
    pub(crate) trading_days: Option<usize>,
}

impl ConfigArgs {
    /// Loads the config file, applies the overrides and validates the result.
    pub(crate) fn resolve(&self) -> Result<BacktestConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("failed to read config file {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("failed to parse config file {}", path.display()))?
            }
            None => BacktestConfig::default(),
        };

        if let Some(v) = self.lookback_days {
            config.momentum.lookback_days = v;
        }
        if let Some(v) = self.skip_days {
            config.momentum.skip_days = v;
        }
        if let Some(v) = self.vol_window {
            config.volatility.window = v;
        }
        if let Some(v) = self.vol_min_periods {
            config.volatility.min_periods = v;
        }
        if let Some(v) = self.weight_mom {
            config.weights.weight_mom = v;
        }
        if let Some(v) = self.weight_vol {
            config.weights.weight_vol = v;
        }
        if let Some(v) = self.top_quantile {
            config.portfolio.top_quantile = v;
        }
        if let Some(v) = self.bottom_quantile {
            config.portfolio.bottom_quantile = v;
        }
        if let Some(v) = self.trading_days {
            config.performance.trading_days_per_year = v;
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::*;

    #[test]
    fn test_resolve_defaults() {
        let config = ConfigArgs::default().resolve().unwrap();
        assert_eq!(config, BacktestConfig::default());
    }

    #[test]
    fn test_overrides_win_over_file() {
        let path = env::temp_dir().join(format!("ronda-config-{}.json", std::process::id()));
        fs::write(&path, r#"{"momentum": {"lookback_days": 126}, "portfolio": {"top_quantile": 0.3}}"#)
            .unwrap();

        let args = ConfigArgs {
            config: Some(path.clone()),
            top_quantile: Some(0.1),
            ..Default::default()
        };
        let config = args.resolve().unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.momentum.lookback_days, 126);
        assert_eq!(config.momentum.skip_days, 21);
        assert_eq!(config.portfolio.top_quantile, 0.1);
        assert_eq!(config.portfolio.bottom_quantile, 0.2);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let args = ConfigArgs {
            bottom_quantile: Some(0.0),
            ..Default::default()
        };
        assert!(args.resolve().is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let args = ConfigArgs {
            config: Some(PathBuf::from("/nonexistent/ronda.json")),
            ..Default::default()
        };
        let err = args.resolve().unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
