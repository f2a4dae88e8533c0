//! Factor trait for rolling-window signals computed from a return panel.
//!
//! A factor turns a daily return panel into a daily panel of raw factor
//! values, one column per symbol. The raw values are then sampled at
//! month-end, which is the native frequency of factor scores.

use crate::{Panel, Result};

/// A per-asset signal computed from daily returns.
///
/// Implementations must be pure functions of their configuration and the
/// input panel, and thread-safe (`Send + Sync`) so that independent factors
/// can be computed in parallel.
///
/// # Example
///
/// ```no_run
/// use ronda_traits::{Factor, Panel, Result};
///
/// struct LastReturn;
///
/// impl Factor for LastReturn {
///     fn name(&self) -> &str {
///         "last_return"
///     }
///
///     fn lookback(&self) -> usize {
///         1
///     }
///
///     fn compute(&self, returns: &Panel) -> Result<Panel> {
///         Ok(returns.clone())
///     }
/// }
/// ```
pub trait Factor: Send + Sync {
    /// Returns the name of this factor.
    ///
    /// Used to label combined inputs and log lines.
    fn name(&self) -> &str;

    /// Number of trailing daily rows needed before the first value can appear.
    fn lookback(&self) -> usize;

    /// Computes the daily factor panel.
    ///
    /// The output has the same dates and symbols as `returns`. Cells that
    /// cannot be computed are missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the factor configuration is invalid.
    fn compute(&self, returns: &Panel) -> Result<Panel>;

    /// Computes the factor and samples it at month-end.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Factor::compute`].
    fn month_end_scores(&self, returns: &Panel) -> Result<Panel> {
        Ok(self.compute(returns)?.month_end())
    }
}
