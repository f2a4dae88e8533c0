//! Simple returns derived from a price panel.

use ronda_traits::{Panel, Result};
use tracing::debug;

/// Computes daily simple returns `price[t] / price[t-1] - 1`.
///
/// A return is missing when either price is missing or the prior price is
/// zero. The first row has no prior price and is dropped, as is every row
/// where all returns are missing.
///
/// # Errors
///
/// Returns an error only if the resulting index is invalid, which cannot
/// happen for a valid input panel.
pub fn simple_returns(prices: &Panel) -> Result<Panel> {
    let n_symbols = prices.n_symbols();
    let mut dates = Vec::with_capacity(prices.n_dates().saturating_sub(1));
    let mut columns: Vec<Vec<Option<f64>>> = vec![Vec::with_capacity(dates.capacity()); n_symbols];

    for t in 1..prices.n_dates() {
        let row: Vec<Option<f64>> = (0..n_symbols)
            .map(|j| match (prices.get(t - 1, j), prices.get(t, j)) {
                (Some(prev), Some(curr)) if prev != 0.0 => Some(curr / prev - 1.0),
                _ => None,
            })
            .collect();

        if row.iter().all(Option::is_none) {
            continue;
        }
        dates.push(prices.dates()[t]);
        for (column, value) in columns.iter_mut().zip(row) {
            column.push(value);
        }
    }

    debug!(
        price_rows = prices.n_dates(),
        return_rows = dates.len(),
        symbols = n_symbols,
        "derived simple returns"
    );

    Panel::from_columns(dates, prices.symbols().to_vec(), columns)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn test_simple_returns() {
        let prices = Panel::from_columns(
            vec![d(2), d(3), d(4)],
            vec!["A".to_string(), "B".to_string()],
            vec![vec![Some(100.0), Some(110.0), Some(99.0)], vec![Some(50.0), None, Some(55.0)]],
        )
        .unwrap();

        let returns = simple_returns(&prices).unwrap();
        assert_eq!(returns.dates(), &[d(3), d(4)]);

        let a = returns.series("A").unwrap();
        assert_relative_eq!(a[0].unwrap(), 0.1, epsilon = 1e-12);
        assert_relative_eq!(a[1].unwrap(), -0.1, epsilon = 1e-12);

        // A gap never becomes a zero return, nor a two-day return.
        assert_eq!(returns.series("B").unwrap(), vec![None, None]);
    }

    #[test]
    fn test_all_missing_rows_dropped() {
        let prices = Panel::from_columns(
            vec![d(2), d(3), d(4)],
            vec!["A".to_string()],
            vec![vec![Some(100.0), None, Some(101.0)]],
        )
        .unwrap();

        let returns = simple_returns(&prices).unwrap();
        assert_eq!(returns.n_dates(), 0);
    }

    #[test]
    fn test_single_row_prices() {
        let prices =
            Panel::from_columns(vec![d(2)], vec!["A".to_string()], vec![vec![Some(100.0)]]).unwrap();
        let returns = simple_returns(&prices).unwrap();
        assert!(returns.is_empty());
        assert_eq!(returns.n_symbols(), 1);
    }
}
