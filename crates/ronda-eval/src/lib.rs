//! Portfolio construction and evaluation for ronda.
//!
//! This crate turns month-end combined factor scores into daily portfolio
//! returns and summarizes them:
//! - Monthly-rebalanced quantile long/short portfolios ([`PortfolioBuilder`])
//! - CAGR, volatility, Sharpe ratio and maximum drawdown ([`PerformanceStats`])
//! - The end-to-end pipeline from daily returns to statistics ([`Backtest`])
//!
//! # Example
//!
//! ```rust,ignore
//! use ronda_eval::{Backtest, BacktestConfig};
//! use ronda_signals::simple_returns;
//!
//! let returns = simple_returns(&prices)?;
//! let result = Backtest::new(BacktestConfig::default()).run(&returns)?;
//! println!("long-short CAGR: {:?}", result.stats.long_short.cagr);
//! ```

pub mod backtest;
pub mod metrics;
pub mod portfolio;

// Re-export main types
pub use backtest::{Backtest, BacktestConfig, BacktestResult, LegStats};
pub use metrics::{PerformanceConfig, PerformanceStats, equity_curve};
pub use portfolio::{Leg, LegAssignment, PortfolioBuilder, PortfolioConfig, PortfolioReturns};
