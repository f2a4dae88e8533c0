//! Weighted linear combination of standardized factors.

use ndarray::Array2;
use ronda_traits::{Panel, Result, RondaError};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::combiner::{Combiner, FactorScore};

/// Weights of the momentum / low-volatility blend.
///
/// Both weights are magnitudes. Volatility enters the combined score with a
/// negative sign because lower volatility is preferred.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombineWeights {
    /// Weight on the momentum z-score (default: 0.5)
    pub weight_mom: f64,

    /// Weight on the volatility z-score, subtracted (default: 0.5)
    pub weight_vol: f64,
}

impl Default for CombineWeights {
    fn default() -> Self {
        Self {
            weight_mom: 0.5,
            weight_vol: 0.5,
        }
    }
}

impl CombineWeights {
    /// Checks that both weights are finite, non-negative and not both zero.
    ///
    /// # Errors
    ///
    /// Returns [`RondaError::InvalidConfig`] for an unusable weight pair.
    pub fn validate(&self) -> Result<()> {
        for (name, weight) in [("weight_mom", self.weight_mom), ("weight_vol", self.weight_vol)] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(RondaError::InvalidConfig(format!(
                    "{name} must be a finite non-negative number, got {weight}"
                )));
            }
        }
        if self.weight_mom == 0.0 && self.weight_vol == 0.0 {
            return Err(RondaError::InvalidConfig("combine weights are both zero".to_string()));
        }
        Ok(())
    }
}

/// Signed weight for one named factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorWeight {
    /// Factor name the weight applies to
    pub factor: String,

    /// Signed weight; negative values reward low factor scores
    pub weight: f64,
}

/// Configuration for the linear combiner.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearCombinerConfig {
    /// Weight for each factor, looked up by name
    pub weights: Vec<FactorWeight>,
}

/// Linear combiner: `Σ wᵢ · zᵢ` over the inner-aligned inputs.
///
/// Inputs are restricted to the dates and symbols present in every panel.
/// A combined cell is present only when every input is present at that
/// date and symbol; absent inputs are never treated as zero.
///
/// # Examples
///
/// ```rust,no_run
/// use ronda_combine::{CombineWeights, Combiner, FactorScore, LinearCombiner};
/// # fn run(momentum_z: ronda_traits::Panel, volatility_z: ronda_traits::Panel) -> ronda_traits::Result<()> {
/// let combiner = LinearCombiner::momentum_low_vol(&CombineWeights::default());
/// let combined = combiner.combine(&[
///     FactorScore::new("momentum", momentum_z),
///     FactorScore::new("volatility", volatility_z),
/// ])?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct LinearCombiner {
    config: LinearCombinerConfig,
}

impl LinearCombiner {
    /// Create a new linear combiner with the given configuration.
    #[must_use]
    pub const fn new(config: LinearCombinerConfig) -> Self {
        Self { config }
    }

    /// `weight_mom · momentum − weight_vol · volatility`.
    #[must_use]
    pub fn momentum_low_vol(weights: &CombineWeights) -> Self {
        Self::new(LinearCombinerConfig {
            weights: vec![
                FactorWeight {
                    factor: "momentum".to_string(),
                    weight: weights.weight_mom,
                },
                FactorWeight {
                    factor: "volatility".to_string(),
                    weight: -weights.weight_vol,
                },
            ],
        })
    }

    /// Signed weight configured for `factor`.
    pub fn weight(&self, factor: &str) -> Option<f64> {
        self.config.weights.iter().find(|w| w.factor == factor).map(|w| w.weight)
    }
}

impl Combiner for LinearCombiner {
    fn combine(&self, factors: &[FactorScore]) -> Result<Panel> {
        if factors.is_empty() {
            return Err("Cannot combine zero factors".into());
        }

        let weights = factors
            .iter()
            .map(|f| {
                self.weight(&f.name).ok_or_else(|| {
                    RondaError::InvalidConfig(format!("no weight configured for factor '{}'", f.name))
                })
            })
            .collect::<Result<Vec<f64>>>()?;

        let panels: Vec<&Panel> = factors.iter().map(|f| &f.panel).collect();
        let (dates, symbols) = Panel::inner_index(&panels);
        if dates.is_empty() || symbols.is_empty() {
            warn!(
                factors = factors.len(),
                dates = dates.len(),
                symbols = symbols.len(),
                "factor panels share no dates or symbols"
            );
        }

        let aligned = panels
            .iter()
            .map(|p| p.reindex(&dates, &symbols))
            .collect::<Result<Vec<Panel>>>()?;

        let mut values = Array2::from_elem((dates.len(), symbols.len()), None);
        for ((i, j), cell) in values.indexed_iter_mut() {
            *cell = aligned
                .iter()
                .zip(&weights)
                .try_fold(0.0, |acc, (panel, w)| panel.get(i, j).map(|z| acc + w * z));
        }

        let combined = Panel::new(dates, symbols, values)?;
        debug!(
            combiner = self.name(),
            dates = combined.n_dates(),
            symbols = combined.n_symbols(),
            present = combined.count_present(),
            "combined factors"
        );

        Ok(combined)
    }

    fn name(&self) -> &str {
        "linear"
    }
}
