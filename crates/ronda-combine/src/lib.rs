//! Factor standardization and combination for ronda.
//!
//! Raw month-end factor panels are first converted to per-date z-scores by
//! the [`CrossSectionalStandardizer`], then blended into a single score panel
//! by a [`Combiner`]. The only strategy shipped is the [`LinearCombiner`],
//! whose [`LinearCombiner::momentum_low_vol`] preset rewards high momentum
//! and low volatility.
//!
//! # Examples
//!
//! ```rust,no_run
//! use ronda_combine::{
//!     CombineWeights, Combiner, CrossSectionalStandardizer, FactorScore, LinearCombiner,
//! };
//! # fn run(momentum: ronda_traits::Panel, volatility: ronda_traits::Panel) -> ronda_traits::Result<()> {
//! let standardizer = CrossSectionalStandardizer::new();
//! let combined = LinearCombiner::momentum_low_vol(&CombineWeights::default()).combine(&[
//!     FactorScore::new("momentum", standardizer.apply(&momentum)),
//!     FactorScore::new("volatility", standardizer.apply(&volatility)),
//! ])?;
//! # Ok(())
//! # }
//! ```

mod combiner;
mod linear;
mod standardize;

// Re-export main types
pub use combiner::{Combiner, FactorScore};
pub use linear::{CombineWeights, FactorWeight, LinearCombiner, LinearCombinerConfig};
pub use standardize::CrossSectionalStandardizer;
