//! Factor implementations for the ronda research pipeline.
//!
//! This crate turns a daily return panel into raw factor panels:
//! - Momentum: 12-month compounded return skipping the most recent month
//! - Volatility: 3-month trailing standard deviation of daily returns
//!
//! It also derives the return panel itself from prices and resamples daily
//! panels to month-end. Factors return raw values; cross-sectional
//! standardization happens in `ronda-combine`.
//!
//! # Example
//!
//! ```ignore
//! use ronda_signals::{MomentumFactor, VolatilityFactor, simple_returns};
//! use ronda_traits::Factor;
//!
//! let returns = simple_returns(&prices)?;
//! let momentum = MomentumFactor::default().month_end_scores(&returns)?;
//! let volatility = VolatilityFactor::default().month_end_scores(&returns)?;
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod momentum;
pub mod registry;
pub mod resample;
pub mod returns;
pub mod volatility;

// Re-export key types
pub use momentum::{MomentumConfig, MomentumFactor};
pub use registry::{FactorCategory, FactorInfo, available_factors, create_factor, get_factor_info};
pub use resample::{month_end_prices, monthly_returns};
pub use returns::simple_returns;
pub use volatility::{VolatilityConfig, VolatilityFactor};
