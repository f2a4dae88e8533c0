//! Factor registry for discovering and constructing available factors.

use ronda_traits::{Factor, Result, RondaError};
use serde::{Deserialize, Serialize};

use crate::{MomentumFactor, VolatilityFactor};

/// Factor category classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FactorCategory {
    /// Price momentum factors
    Momentum,
    /// Return dispersion factors
    Volatility,
}

impl FactorCategory {
    /// Get a human-readable description of the category.
    #[must_use]
    pub const fn description(&self) -> &str {
        match self {
            Self::Momentum => "Price momentum and trend-following factors",
            Self::Volatility => "Realized return volatility factors",
        }
    }
}

/// Metadata about a factor.
#[derive(Debug, Clone, Serialize)]
pub struct FactorInfo {
    /// Unique identifier for the factor
    pub name: &'static str,

    /// Category classification
    pub category: FactorCategory,

    /// Human-readable description
    pub description: &'static str,

    /// Default lookback period in trading days
    pub typical_lookback: usize,

    /// Whether a higher raw value is preferred in the combined score
    pub higher_is_better: bool,
}

/// Get information about all available factors.
#[must_use]
pub fn available_factors() -> Vec<FactorInfo> {
    vec![
        FactorInfo {
            name: "momentum",
            category: FactorCategory::Momentum,
            description: "12-month compounded return, skipping the most recent month",
            typical_lookback: 273,
            higher_is_better: true,
        },
        FactorInfo {
            name: "volatility",
            category: FactorCategory::Volatility,
            description: "3-month trailing standard deviation of daily returns",
            typical_lookback: 63,
            higher_is_better: false,
        },
    ]
}

/// Get information about a specific factor by name.
#[must_use]
pub fn get_factor_info(name: &str) -> Option<FactorInfo> {
    available_factors().into_iter().find(|info| info.name == name)
}

/// Construct a factor with its default configuration.
///
/// # Errors
///
/// Returns [`RondaError::Other`] for an unknown factor name.
pub fn create_factor(name: &str) -> Result<Box<dyn Factor>> {
    match name {
        "momentum" => Ok(Box::new(MomentumFactor::default())),
        "volatility" => Ok(Box::new(VolatilityFactor::default())),
        _ => Err(RondaError::Other(format!(
            "unknown factor '{name}', expected one of: {}",
            available_factors().iter().map(|f| f.name).collect::<Vec<_>>().join(", ")
        ))),
    }
}
