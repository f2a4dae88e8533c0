//! Core trait definition for factor combiners.

use ronda_traits::{Panel, Result};

/// A standardized factor panel tagged with the factor's name.
///
/// Each panel holds cross-sectional z-scores at month-end. The combiner
/// takes several of these and produces a single score panel.
#[derive(Debug, Clone)]
pub struct FactorScore {
    /// Factor name, used to look up its weight
    pub name: String,

    /// Standardized month-end scores
    pub panel: Panel,
}

impl FactorScore {
    /// Tag a panel with a factor name.
    pub fn new(name: impl Into<String>, panel: Panel) -> Self {
        Self {
            name: name.into(),
            panel,
        }
    }
}

/// Combines multiple standardized factor panels into one score panel.
///
/// Implementations must never treat a missing cell as zero. All
/// implementations must be thread-safe (Send + Sync).
///
/// # Examples
///
/// ```rust,no_run
/// use ronda_combine::{Combiner, FactorScore};
/// use ronda_traits::{Panel, Result};
///
/// struct FirstFactor;
///
/// impl Combiner for FirstFactor {
///     fn combine(&self, factors: &[FactorScore]) -> Result<Panel> {
///         Ok(factors[0].panel.clone())
///     }
///
///     fn name(&self) -> &str {
///         "first"
///     }
/// }
/// ```
pub trait Combiner: Send + Sync {
    /// Combine factor panels into a composite score panel.
    ///
    /// Higher combined scores are more attractive.
    ///
    /// # Errors
    ///
    /// Returns an error if no factors are provided or a factor is not
    /// recognized by the combiner.
    fn combine(&self, factors: &[FactorScore]) -> Result<Panel>;

    /// Name of this combination strategy.
    fn name(&self) -> &str;
}
