//! Per-date cross-sectional standardization.

use std::cell::Cell;

use ronda_traits::{Panel, stats};
use tracing::debug;

/// Converts each date's cross-section to population z-scores.
///
/// Every row is transformed on its own: the mean and standard deviation come
/// from that date's present values only, and no state carries from one date
/// to the next. Symbols missing on a date stay missing. A date with fewer
/// than 2 present values, or with a standard deviation below
/// [`stats::MIN_STD_THRESHOLD`], becomes entirely missing.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossSectionalStandardizer;

impl CrossSectionalStandardizer {
    /// Create a new standardizer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Standardize every row of `panel`.
    #[must_use]
    pub fn apply(&self, panel: &Panel) -> Panel {
        let degenerate = Cell::new(0usize);
        let standardized = panel.map_rows(|row| {
            let (z, result) = stats::standardize(row);
            if !result.applied && result.n_present > 0 {
                degenerate.set(degenerate.get() + 1);
            }
            z
        });

        debug!(
            dates = panel.n_dates(),
            symbols = panel.n_symbols(),
            degenerate_dates = degenerate.get(),
            "standardized cross-sections"
        );

        standardized
    }
}
