//! Statistical utility functions for cross-sections and return series.
//!
//! Every function here is stateless and works on a single slice: a
//! cross-section for one date, or one return series. Missing values are
//! skipped, never treated as zero.

/// Minimum threshold for standard deviation to avoid division by zero.
/// Values below this threshold are treated as zero variance.
pub const MIN_STD_THRESHOLD: f64 = 1e-10;

/// Z-score standardization result containing computed statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardizeResult {
    /// Mean of the present values, if any.
    pub mean: Option<f64>,
    /// Population standard deviation of the present values, if any.
    pub std: Option<f64>,
    /// Number of present values.
    pub n_present: usize,
    /// Whether standardization was applied.
    pub applied: bool,
}

/// Collects the present values of a slice, preserving order.
pub fn present(values: &[Option<f64>]) -> Vec<f64> {
    values.iter().filter_map(|v| v.filter(|x| x.is_finite())).collect()
}

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (N-1 denominator), `None` with fewer than 2 values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean(values)?;
    let variance =
        values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(variance.sqrt())
}

/// Population standard deviation (N denominator), `None` for an empty slice.
pub fn population_std(values: &[f64]) -> Option<f64> {
    let mean = mean(values)?;
    let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

/// Standardizes a cross-section to population z-scores.
///
/// Mean and standard deviation are computed over the present values only;
/// missing inputs stay missing.
///
/// # Edge Cases
///
/// - Fewer than 2 present values: every output is missing
/// - Standard deviation below [`MIN_STD_THRESHOLD`]: every output is missing
///
/// # Examples
///
/// ```
/// use ronda_traits::stats::standardize;
///
/// let (z, result) = standardize(&[Some(1.0), None, Some(3.0)]);
/// assert!(result.applied);
/// assert_eq!(z, vec![Some(-1.0), None, Some(1.0)]);
/// ```
pub fn standardize(values: &[Option<f64>]) -> (Vec<Option<f64>>, StandardizeResult) {
    let observed = present(values);
    let n_present = observed.len();
    let mean = mean(&observed);
    let std = population_std(&observed);

    let (Some(m), Some(s)) = (mean, std) else {
        return (
            vec![None; values.len()],
            StandardizeResult {
                mean,
                std,
                n_present,
                applied: false,
            },
        );
    };

    if n_present < 2 || s < MIN_STD_THRESHOLD {
        return (
            vec![None; values.len()],
            StandardizeResult {
                mean,
                std,
                n_present,
                applied: false,
            },
        );
    }

    let standardized = values
        .iter()
        .map(|v| v.filter(|x| x.is_finite()).map(|x| (x - m) / s))
        .collect();

    (
        standardized,
        StandardizeResult {
            mean,
            std,
            n_present,
            applied: true,
        },
    )
}

/// Population z-scores of a cross-section, without the statistics.
///
/// Shorthand for [`standardize`] when only the scores are needed.
pub fn zscore(values: &[Option<f64>]) -> Vec<Option<f64>> {
    standardize(values).0
}

/// Linear-interpolation quantile of an ascending slice.
///
/// Uses `pos = q * (n - 1)` and interpolates between the neighbouring order
/// statistics. Returns `None` for an empty slice or `q` outside `[0, 1]`.
pub fn quantile_linear(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }

    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;

    Some(sorted[lower] + frac * (sorted[upper] - sorted[lower]))
}
