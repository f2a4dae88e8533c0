#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ronda/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! ## Crate Organization
//!
//! - [`traits`] - Panel, statistics, the [`Factor`] trait and errors
//! - [`signals`] - Momentum and volatility factors, returns and resampling
//! - [`combine`] - Cross-sectional standardization and factor combination
//! - [`eval`] - Portfolio construction, performance statistics and the backtest driver

/// Version information for the ronda crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Core Types
// ============================================================================

/// Core types and trait definitions.
///
/// - [`Panel`] - Date × symbol table with explicit missing values
/// - [`Factor`] - Rolling-window factor computed from daily returns
/// - [`stats`](ronda_traits::stats) - Stateless cross-sectional statistics
pub mod traits {
    pub use ronda_traits::*;
}

pub use ronda_combine::Combiner;
pub use ronda_traits::{Date, Factor, Panel, Result, RondaError, Symbol};

// ============================================================================
// Factors
// ============================================================================

/// Factor implementations.
///
/// ```ignore
/// use ronda::signals::{MomentumFactor, VolatilityFactor};
/// use ronda::Factor;
///
/// let factors: Vec<Box<dyn Factor>> = vec![
///     Box::new(MomentumFactor::default()),
///     Box::new(VolatilityFactor::default()),
/// ];
/// ```
pub mod signals {
    pub use ronda_signals::*;
}

// ============================================================================
// Factor Combination
// ============================================================================

/// Cross-sectional standardization and factor combination.
///
/// The [`LinearCombiner`](ronda_combine::LinearCombiner) computes
/// `Σ wᵢ · zᵢ` on the dates and symbols shared by every input.
pub mod combine {
    pub use ronda_combine::*;
}

// ============================================================================
// Evaluation
// ============================================================================

/// Portfolio construction, performance statistics and backtesting.
///
/// ```text
/// cagr   = ∏(1 + r)^(252 / n) − 1
/// vol    = sample_std(r) · √252
/// sharpe = cagr / vol
/// max_dd = min(equity / running_peak − 1)
/// ```
pub mod eval {
    pub use ronda_eval::*;
}

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```ignore
/// use ronda::prelude::*;
/// ```
pub mod prelude {
    pub use crate::combine::{
        CombineWeights, CrossSectionalStandardizer, FactorScore, LinearCombiner,
    };
    pub use crate::eval::{
        Backtest, BacktestConfig, BacktestResult, Leg, PerformanceConfig, PerformanceStats,
        PortfolioBuilder, PortfolioConfig, PortfolioReturns,
    };
    pub use crate::signals::{
        MomentumConfig, MomentumFactor, VolatilityConfig, VolatilityFactor, simple_returns,
    };
    pub use crate::{Combiner, Date, Factor, Panel, Result, RondaError, Symbol};
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2, "Version should have at least major.minor");
    }

    #[test]
    fn test_re_exports() {
        fn _accept_factor(_factor: &dyn Factor) {}
        fn _accept_combiner(_combiner: &dyn Combiner) {}

        _accept_factor(&signals::MomentumFactor::default());
        _accept_combiner(&combine::LinearCombiner::default());
    }

    #[test]
    fn test_error_types() {
        let _result: Result<()> = Ok(());
        let error = RondaError::InvalidConfig("test".to_string());
        assert!(error.to_string().contains("test"));
    }
}
