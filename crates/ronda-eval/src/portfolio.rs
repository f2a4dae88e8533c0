//! Monthly-rebalanced quantile long/short portfolio construction.
//!
//! Month-end combined scores are forward filled onto the daily return
//! calendar, so a leg chosen at one month-end is held unchanged until the
//! next. Each day the present scores are split by linear-interpolation
//! quantile thresholds into a long leg (top) and a short leg (bottom), and
//! each leg earns the equal-weighted mean of its members' realized returns.

use derive_more::Display;
use ndarray::ArrayView1;
use polars::prelude::*;
use ronda_traits::{Date, DATE_FORMAT, Panel, Result, RondaError, stats};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::metrics::equity_curve;

/// Portfolio construction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortfolioConfig {
    /// Fraction of the cross-section held long (default: 0.2)
    pub top_quantile: f64,

    /// Fraction of the cross-section held short (default: 0.2)
    pub bottom_quantile: f64,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            top_quantile: 0.2,
            bottom_quantile: 0.2,
        }
    }
}

impl PortfolioConfig {
    /// Checks that both fractions lie in `(0, 1)` and sum to less than 1.
    ///
    /// At a sum of exactly 1 both thresholds meet at the median, which puts
    /// the median ticker in both legs whenever the cross-section is odd.
    ///
    /// # Errors
    ///
    /// Returns [`RondaError::InvalidConfig`] for out-of-range fractions.
    pub fn validate(&self) -> Result<()> {
        for (name, q) in [("top_quantile", self.top_quantile), ("bottom_quantile", self.bottom_quantile)] {
            if !(q > 0.0 && q < 1.0) {
                return Err(RondaError::InvalidConfig(format!("{name} must be in (0, 1), got {q}")));
            }
        }
        if self.top_quantile + self.bottom_quantile >= 1.0 {
            return Err(RondaError::InvalidConfig(format!(
                "top_quantile + bottom_quantile must be below 1, got {}",
                self.top_quantile + self.bottom_quantile
            )));
        }
        Ok(())
    }

    /// Smallest cross-section that takes a position.
    ///
    /// `max(ceil(1 / top_quantile), ceil(1 / bottom_quantile))`: with fewer
    /// names a quantile bucket cannot hold a whole ticker.
    #[must_use]
    pub fn min_cross_section(&self) -> usize {
        // The epsilon keeps 1 / 0.2 at 5 rather than 5.000000000000001 → 6.
        let names = |q: f64| (1.0 / q - 1e-9).ceil().max(1.0) as usize;
        names(self.top_quantile).max(names(self.bottom_quantile))
    }
}

/// One of the three portfolio return series.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Leg {
    /// Equal-weighted top bucket
    #[display("long")]
    Long,
    /// Equal-weighted bottom bucket
    #[display("short")]
    Short,
    /// Long minus short
    #[display("long_short")]
    LongShort,
}

impl Leg {
    /// All legs in output column order.
    pub const ALL: [Self; 3] = [Self::Long, Self::Short, Self::LongShort];
}

/// Column indices of the tickers held on one date.
///
/// The two sets are always disjoint and never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegAssignment {
    /// Tickers with score at or above the top threshold
    pub long: Vec<usize>,
    /// Tickers with score at or below the bottom threshold
    pub short: Vec<usize>,
}

/// Daily long, short and long-short returns on the return panel's calendar.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioReturns {
    /// Trading dates, identical to the return panel's dates
    pub dates: Vec<Date>,
    /// Long leg returns
    pub long: Vec<Option<f64>>,
    /// Short leg returns
    pub short: Vec<Option<f64>>,
    /// Long minus short returns
    pub long_short: Vec<Option<f64>>,
}

impl PortfolioReturns {
    /// Return series for one leg.
    pub fn series(&self, leg: Leg) -> &[Option<f64>] {
        match leg {
            Leg::Long => &self.long,
            Leg::Short => &self.short,
            Leg::LongShort => &self.long_short,
        }
    }

    /// Number of dates.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether there are no dates.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Number of dates with a long-short return.
    pub fn positioned_days(&self) -> usize {
        self.long_short.iter().filter(|r| r.is_some()).count()
    }

    /// Converts the series to a DataFrame.
    ///
    /// Columns: `date`, then `long`, `short` and `long_short` returns, then
    /// `long_equity`, `short_equity` and `long_short_equity` growth of one
    /// unit.
    ///
    /// # Errors
    ///
    /// Returns an error if Polars fails to assemble the frame.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let dates: Vec<String> =
            self.dates.iter().map(|d| d.format(DATE_FORMAT).to_string()).collect();
        let mut columns = vec![Column::new("date".into(), dates)];

        for leg in Leg::ALL {
            columns.push(Column::new(leg.to_string().into(), self.series(leg).to_vec()));
        }
        for leg in Leg::ALL {
            let name = format!("{leg}_equity");
            columns.push(Column::new(name.into(), equity_curve(self.series(leg))));
        }

        Ok(DataFrame::new(columns)?)
    }
}

/// Builds daily leg returns from month-end scores.
#[derive(Debug, Clone, Default)]
pub struct PortfolioBuilder {
    config: PortfolioConfig,
}

impl PortfolioBuilder {
    /// Create a new builder with the given configuration.
    #[must_use]
    pub const fn new(config: PortfolioConfig) -> Self {
        Self { config }
    }

    /// Get the builder configuration.
    #[must_use]
    pub const fn config(&self) -> &PortfolioConfig {
        &self.config
    }

    /// Forward fills month-end scores onto the daily return index.
    ///
    /// The result has the return panel's dates and symbols. Each row is the
    /// most recent month-end row dated on or before that day, so a ticker
    /// unscored at the latest rebalance has no exposure. Days before the
    /// first month-end and symbols absent from `combined` are missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the reindexed panel is invalid.
    pub fn daily_exposure(&self, combined: &Panel, returns: &Panel) -> Result<Panel> {
        combined.forward_fill_onto(returns.dates())?.reindex(returns.dates(), returns.symbols())
    }

    /// Splits one date's scores into long and short legs.
    ///
    /// Uses only the given cross-section. Returns `None`, meaning no
    /// position, when fewer than [`PortfolioConfig::min_cross_section`]
    /// scores are present, when either leg is empty, or when a tie puts a
    /// ticker in both legs.
    pub fn assign_legs(&self, scores: &[Option<f64>]) -> Option<LegAssignment> {
        let observed: Vec<(usize, f64)> = scores
            .iter()
            .enumerate()
            .filter_map(|(j, s)| s.filter(|x| x.is_finite()).map(|x| (j, x)))
            .collect();
        if observed.is_empty() || observed.len() < self.config.min_cross_section() {
            return None;
        }

        let mut sorted: Vec<f64> = observed.iter().map(|&(_, s)| s).collect();
        sorted.sort_by(f64::total_cmp);
        let top = stats::quantile_linear(&sorted, 1.0 - self.config.top_quantile)?;
        let bottom = stats::quantile_linear(&sorted, self.config.bottom_quantile)?;

        let long: Vec<usize> = observed.iter().filter(|&&(_, s)| s >= top).map(|&(j, _)| j).collect();
        let short: Vec<usize> =
            observed.iter().filter(|&&(_, s)| s <= bottom).map(|&(j, _)| j).collect();

        if long.is_empty() || short.is_empty() || long.iter().any(|j| short.contains(j)) {
            return None;
        }

        Some(LegAssignment { long, short })
    }

    /// Builds daily long, short and long-short returns.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the exposure
    /// panel cannot be built.
    pub fn build(&self, combined: &Panel, returns: &Panel) -> Result<PortfolioReturns> {
        self.config.validate()?;

        let exposure = self.daily_exposure(combined, returns)?;
        let n_dates = returns.n_dates();
        let mut long = Vec::with_capacity(n_dates);
        let mut short = Vec::with_capacity(n_dates);
        let mut long_short = Vec::with_capacity(n_dates);
        let mut no_position = 0usize;

        for i in 0..n_dates {
            let scores = exposure.row(i).to_vec();
            let Some(legs) = self.assign_legs(&scores) else {
                no_position += 1;
                long.push(None);
                short.push(None);
                long_short.push(None);
                continue;
            };

            let realized = returns.row(i);
            let long_ret = leg_mean(realized, &legs.long);
            let short_ret = leg_mean(realized, &legs.short);
            long.push(long_ret);
            short.push(short_ret);
            long_short.push(long_ret.zip(short_ret).map(|(l, s)| l - s));
        }

        debug!(
            days = n_dates,
            rebalances = combined.n_dates(),
            no_position_days = no_position,
            top_quantile = self.config.top_quantile,
            bottom_quantile = self.config.bottom_quantile,
            "built long/short portfolio"
        );

        Ok(PortfolioReturns {
            dates: returns.dates().to_vec(),
            long,
            short,
            long_short,
        })
    }
}

/// Equal-weighted mean of the present returns of a leg's tickers.
fn leg_mean(realized: ArrayView1<'_, Option<f64>>, members: &[usize]) -> Option<f64> {
    let observed: Vec<Option<f64>> = members.iter().map(|&j| realized[j]).collect();
    stats::mean(&stats::present(&observed))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use chrono::{Datelike, Duration, NaiveDate, Weekday};

    use super::*;

    fn symbols(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("S{i}")).collect()
    }

    fn weekdays(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
        let mut dates = Vec::new();
        let mut d = start;
        while d <= end {
            if !matches!(d.weekday(), Weekday::Sat | Weekday::Sun) {
                dates.push(d);
            }
            d += Duration::days(1);
        }
        dates
    }

    #[test]
    fn test_default_config() {
        let config = PortfolioConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.min_cross_section(), 5);

        let config = PortfolioConfig {
            top_quantile: 0.1,
            bottom_quantile: 0.3,
        };
        assert_eq!(config.min_cross_section(), 10);
    }

    #[test]
    fn test_invalid_config() {
        for (top, bottom) in [(0.0, 0.2), (0.2, 1.0), (0.6, 0.5), (0.5, 0.5), (f64::NAN, 0.2)] {
            let config = PortfolioConfig {
                top_quantile: top,
                bottom_quantile: bottom,
            };
            assert!(config.validate().is_err(), "({top}, {bottom}) should be rejected");
        }
    }

    #[test]
    fn test_five_ticker_example() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let combined = Panel::from_columns(
            vec![date],
            symbols(5),
            [5.0, 4.0, 3.0, 2.0, 1.0].iter().map(|s| vec![Some(*s)]).collect(),
        )
        .unwrap();
        let returns = Panel::from_columns(
            vec![date],
            symbols(5),
            [0.05, 0.03, 0.0, -0.02, -0.04].iter().map(|r| vec![Some(*r)]).collect(),
        )
        .unwrap();

        let builder = PortfolioBuilder::default();
        let legs = builder.assign_legs(&[Some(5.0), Some(4.0), Some(3.0), Some(2.0), Some(1.0)]).unwrap();
        assert_eq!(legs.long, vec![0]);
        assert_eq!(legs.short, vec![4]);

        let portfolio = builder.build(&combined, &returns).unwrap();
        assert_relative_eq!(portfolio.long[0].unwrap(), 0.05, epsilon = 1e-12);
        assert_relative_eq!(portfolio.short[0].unwrap(), -0.04, epsilon = 1e-12);
        assert_relative_eq!(portfolio.long_short[0].unwrap(), 0.09, epsilon = 1e-12);
    }

    #[test]
    fn test_small_cross_section_takes_no_position() {
        let builder = PortfolioBuilder::default();
        assert!(builder.assign_legs(&[Some(3.0), Some(2.0), None, Some(1.0), Some(0.0)]).is_none());
        assert!(builder.assign_legs(&[None, None]).is_none());
        assert!(builder.assign_legs(&[]).is_none());
    }

    #[test]
    fn test_ties_never_share_a_ticker() {
        let builder = PortfolioBuilder::default();
        assert!(builder.assign_legs(&[Some(1.0); 6]).is_none());

        let scores = [Some(2.0), Some(2.0), Some(1.0), Some(0.0), Some(-1.0), Some(-1.0)];
        let legs = builder.assign_legs(&scores).unwrap();
        assert_eq!(legs.long, vec![0, 1]);
        assert_eq!(legs.short, vec![4, 5]);
        assert!(legs.long.iter().all(|j| !legs.short.contains(j)));
    }

    #[test]
    fn test_exposure_constant_within_month() {
        let daily = weekdays(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 29).unwrap(),
        );
        let jan_end = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let feb_end = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();

        let combined = Panel::from_columns(
            vec![jan_end, feb_end],
            symbols(2),
            vec![vec![Some(1.0), Some(-1.0)], vec![Some(-1.0), Some(1.0)]],
        )
        .unwrap();
        let returns = Panel::missing(daily.clone(), symbols(2)).unwrap();

        let exposure = PortfolioBuilder::default().daily_exposure(&combined, &returns).unwrap();
        for (i, date) in daily.iter().enumerate() {
            let expected = if *date < jan_end {
                (None, None)
            } else if *date < feb_end {
                (Some(1.0), Some(-1.0))
            } else {
                (Some(-1.0), Some(1.0))
            };
            assert_eq!((exposure.get(i, 0), exposure.get(i, 1)), expected, "date {date}");
        }

        // The change point is the month-end date itself.
        let feb_idx = exposure.date_index(feb_end).unwrap();
        assert_eq!(exposure.get(feb_idx, 0), Some(-1.0));
        assert_eq!(exposure.get(feb_idx - 1, 0), Some(1.0));
    }

    #[test]
    fn test_leg_mean_skips_missing_returns() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let combined = Panel::from_columns(
            vec![date],
            symbols(10),
            (0..10).map(|i| vec![Some(f64::from(i))]).collect(),
        )
        .unwrap();
        let mut realized: Vec<Vec<Option<f64>>> = (0..10).map(|_| vec![Some(0.0)]).collect();
        realized[0] = vec![Some(-0.02)];
        realized[1] = vec![None];
        realized[8] = vec![Some(0.01)];
        realized[9] = vec![Some(0.03)];
        let returns = Panel::from_columns(vec![date], symbols(10), realized).unwrap();

        let portfolio = PortfolioBuilder::default().build(&combined, &returns).unwrap();
        assert_relative_eq!(portfolio.long[0].unwrap(), 0.02, epsilon = 1e-12);
        assert_relative_eq!(portfolio.short[0].unwrap(), -0.02, epsilon = 1e-12);
        assert_relative_eq!(portfolio.long_short[0].unwrap(), 0.04, epsilon = 1e-12);
    }

    #[test]
    fn test_near_half_quantiles_split_odd_cross_section() {
        let builder = PortfolioBuilder::new(PortfolioConfig {
            top_quantile: 0.45,
            bottom_quantile: 0.45,
        });
        assert!(builder.config().validate().is_ok());

        let scores: Vec<Option<f64>> = (0..9).map(|i| Some(f64::from(i))).collect();
        let legs = builder.assign_legs(&scores).unwrap();
        assert_eq!(legs.long, vec![5, 6, 7, 8]);
        assert_eq!(legs.short, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_unscored_ticker_drops_out_at_next_rebalance() {
        let daily = weekdays(
            NaiveDate::from_ymd_opt(2024, 1, 29).unwrap(),
            NaiveDate::from_ymd_opt(2024, 4, 5).unwrap(),
        );
        let rebalances = vec![
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 28).unwrap(),
        ];

        // S0 tops January and is unscored afterwards; S1..S5 are scored throughout.
        let mut scores: Vec<Vec<Option<f64>>> =
            (1..6).map(|i| vec![Some(f64::from(i)); 3]).collect();
        scores.insert(0, vec![Some(9.0), None, None]);
        let combined = Panel::from_columns(rebalances, symbols(6), scores).unwrap();

        let mut realized: Vec<Vec<Option<f64>>> =
            (0..6).map(|_| vec![Some(0.0); daily.len()]).collect();
        realized[0] = vec![None; daily.len()];
        realized[5] = vec![Some(0.01); daily.len()];
        let returns = Panel::from_columns(daily.clone(), symbols(6), realized).unwrap();

        let builder = PortfolioBuilder::default();
        let exposure = builder.daily_exposure(&combined, &returns).unwrap();
        let jan_idx = exposure.date_index(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()).unwrap();
        let apr_idx = exposure.date_index(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()).unwrap();
        assert_eq!(exposure.get(jan_idx, 0), Some(9.0));
        assert_eq!(exposure.get(apr_idx, 0), None);

        let legs = builder.assign_legs(&exposure.row(apr_idx).to_vec()).unwrap();
        assert_eq!(legs.long, vec![5]);
        assert_eq!(legs.short, vec![1]);

        let portfolio = builder.build(&combined, &returns).unwrap();
        assert_relative_eq!(portfolio.long[apr_idx].unwrap(), 0.01, epsilon = 1e-12);
    }

    #[test]
    fn test_leg_with_no_present_returns_is_missing() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let combined = Panel::from_columns(
            vec![date],
            symbols(10),
            (0..10).map(|i| vec![Some(f64::from(i))]).collect(),
        )
        .unwrap();
        let mut realized: Vec<Vec<Option<f64>>> = (0..10).map(|_| vec![Some(0.01)]).collect();
        realized[0] = vec![None];
        realized[1] = vec![None];
        let returns = Panel::from_columns(vec![date], symbols(10), realized).unwrap();

        let builder = PortfolioBuilder::default();
        let legs = builder.assign_legs(&combined.row(0).to_vec()).unwrap();
        assert_eq!(legs.short, vec![0, 1]);

        let portfolio = builder.build(&combined, &returns).unwrap();
        assert_relative_eq!(portfolio.long[0].unwrap(), 0.01, epsilon = 1e-12);
        assert_eq!(portfolio.short[0], None);
        assert_eq!(portfolio.long_short[0], None);
        assert_eq!(portfolio.positioned_days(), 0);
    }

    #[test]
    fn test_to_dataframe_columns() {
        let portfolio = PortfolioReturns {
            dates: vec![
                NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            ],
            long: vec![None, Some(0.1)],
            short: vec![None, Some(0.0)],
            long_short: vec![None, Some(0.1)],
        };

        let df = portfolio.to_dataframe().unwrap();
        assert_eq!(df.height(), 2);
        let names: Vec<String> = df.get_column_names().iter().map(|n| n.to_string()).collect();
        assert_eq!(
            names,
            ["date", "long", "short", "long_short", "long_equity", "short_equity", "long_short_equity"]
        );
        assert_eq!(portfolio.positioned_days(), 1);
        assert_eq!(portfolio.series(Leg::LongShort), &[None, Some(0.1)]);
    }
}
