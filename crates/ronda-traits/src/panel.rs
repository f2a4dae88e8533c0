//! Date × symbol panels with explicit missing values.
//!
//! A [`Panel`] is the single container used for prices, returns, raw factors,
//! standardized factors and combined scores. Rows are trading dates in
//! strictly increasing order, columns are unique symbols, and every cell is
//! an `Option<f64>` so that absence is never confused with zero.

use std::collections::{HashMap, HashSet};

use ndarray::{Array2, ArrayView1};
use polars::prelude::*;

use crate::types::{DATE_FORMAT, parse_date, year_month};
use crate::{Date, Result, RondaError, Symbol};

/// A time series panel indexed by date (rows) and symbol (columns).
///
/// # Invariants
///
/// - `dates` are strictly increasing (sorted and unique)
/// - `symbols` are unique
/// - `values` has shape `(dates.len(), symbols.len())`
///
/// Non-finite numbers are never stored; they are normalized to `None` on
/// construction through [`Panel::from_columns`].
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    dates: Vec<Date>,
    symbols: Vec<Symbol>,
    values: Array2<Option<f64>>,
}

impl Panel {
    /// Creates a panel after validating its shape and index.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape does not match the index lengths, if the
    /// dates are not strictly increasing, or if a symbol appears twice.
    pub fn new(dates: Vec<Date>, symbols: Vec<Symbol>, values: Array2<Option<f64>>) -> Result<Self> {
        let (rows, cols) = values.dim();
        if rows != dates.len() {
            return Err(RondaError::DimensionMismatch {
                expected: dates.len(),
                actual: rows,
            });
        }
        if cols != symbols.len() {
            return Err(RondaError::DimensionMismatch {
                expected: symbols.len(),
                actual: cols,
            });
        }

        if let Some(pair) = dates.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(RondaError::InvalidData(format!(
                "dates must be strictly increasing, found {} followed by {}",
                pair[0], pair[1]
            )));
        }

        let mut seen = HashSet::with_capacity(symbols.len());
        for symbol in &symbols {
            if !seen.insert(symbol.as_str()) {
                return Err(RondaError::InvalidData(format!("duplicate symbol: {symbol}")));
            }
        }

        Ok(Self {
            dates,
            symbols,
            values,
        })
    }

    /// Creates a panel from one vector of values per symbol.
    ///
    /// Non-finite values (NaN, ±Inf) are stored as missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the number of columns differs from the number of
    /// symbols, if any column length differs from the number of dates, or if
    /// [`Panel::new`] rejects the index.
    pub fn from_columns(
        dates: Vec<Date>,
        symbols: Vec<Symbol>,
        columns: Vec<Vec<Option<f64>>>,
    ) -> Result<Self> {
        if columns.len() != symbols.len() {
            return Err(RondaError::DimensionMismatch {
                expected: symbols.len(),
                actual: columns.len(),
            });
        }

        let n_dates = dates.len();
        let mut values = Array2::from_elem((n_dates, columns.len()), None);
        for (j, column) in columns.into_iter().enumerate() {
            if column.len() != n_dates {
                return Err(RondaError::DimensionMismatch {
                    expected: n_dates,
                    actual: column.len(),
                });
            }
            for (i, value) in column.into_iter().enumerate() {
                values[[i, j]] = value.filter(|v| v.is_finite());
            }
        }

        Self::new(dates, symbols, values)
    }

    /// Creates a panel where every cell is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if [`Panel::new`] rejects the index.
    pub fn missing(dates: Vec<Date>, symbols: Vec<Symbol>) -> Result<Self> {
        let values = Array2::from_elem((dates.len(), symbols.len()), None);
        Self::new(dates, symbols, values)
    }

    /// Row index of the panel.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Column index of the panel.
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Underlying `(dates × symbols)` array.
    pub const fn values(&self) -> &Array2<Option<f64>> {
        &self.values
    }

    /// Number of dates (rows).
    pub fn n_dates(&self) -> usize {
        self.dates.len()
    }

    /// Number of symbols (columns).
    pub fn n_symbols(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the panel has no cells.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Cell value, `None` when missing or out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get((row, col)).copied().flatten()
    }

    /// Position of a symbol in the column index.
    pub fn symbol_index(&self, symbol: &str) -> Option<usize> {
        self.symbols.iter().position(|s| s == symbol)
    }

    /// Position of a date in the row index.
    pub fn date_index(&self, date: Date) -> Option<usize> {
        self.dates.binary_search(&date).ok()
    }

    /// Cross-section for one date.
    pub fn row(&self, row: usize) -> ArrayView1<'_, Option<f64>> {
        self.values.row(row)
    }

    /// Time series for one symbol.
    pub fn column(&self, col: usize) -> ArrayView1<'_, Option<f64>> {
        self.values.column(col)
    }

    /// Time series for a symbol by name.
    ///
    /// # Errors
    ///
    /// Returns [`RondaError::SymbolNotFound`] when the symbol is not a column.
    pub fn series(&self, symbol: &str) -> Result<Vec<Option<f64>>> {
        let col = self
            .symbol_index(symbol)
            .ok_or_else(|| RondaError::SymbolNotFound(symbol.to_string()))?;
        Ok(self.values.column(col).to_vec())
    }

    /// Number of non-missing cells.
    pub fn count_present(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Applies a time-series transform to every symbol independently.
    ///
    /// `f` receives one column (oldest date first) and must return one value
    /// per date. Non-finite outputs are stored as missing.
    #[must_use]
    pub fn map_columns<F>(&self, f: F) -> Self
    where
        F: Fn(&[Option<f64>]) -> Vec<Option<f64>>,
    {
        let mut values = Array2::from_elem(self.values.dim(), None);
        for (j, column) in self.values.columns().into_iter().enumerate() {
            let output = f(&column.to_vec());
            debug_assert_eq!(output.len(), self.dates.len());
            for (i, value) in output.into_iter().take(self.dates.len()).enumerate() {
                values[[i, j]] = value.filter(|v| v.is_finite());
            }
        }
        self.with_values(values)
    }

    /// Applies a cross-sectional transform to every date independently.
    ///
    /// `f` receives one row and must return one value per symbol. It sees
    /// nothing from other dates. Non-finite outputs are stored as missing.
    #[must_use]
    pub fn map_rows<F>(&self, f: F) -> Self
    where
        F: Fn(&[Option<f64>]) -> Vec<Option<f64>>,
    {
        let mut values = Array2::from_elem(self.values.dim(), None);
        for (i, row) in self.values.rows().into_iter().enumerate() {
            let output = f(&row.to_vec());
            debug_assert_eq!(output.len(), self.symbols.len());
            for (j, value) in output.into_iter().take(self.symbols.len()).enumerate() {
                values[[i, j]] = value.filter(|v| v.is_finite());
            }
        }
        self.with_values(values)
    }

    /// Shifts every column forward by `periods` rows.
    ///
    /// The value at row `i` becomes the value previously at row `i - periods`;
    /// the first `periods` rows become missing.
    #[must_use]
    pub fn shift(&self, periods: usize) -> Self {
        self.map_columns(|column| {
            (0..column.len())
                .map(|i| if i >= periods { column[i - periods] } else { None })
                .collect()
        })
    }

    /// Samples the panel at month-end.
    ///
    /// Produces one row per calendar month present in the index, labeled with
    /// the last date of that month in the panel. Each cell holds the last
    /// non-missing value observed within the month, or `None` if the month
    /// has no value for that symbol.
    #[must_use]
    pub fn month_end(&self) -> Self {
        let runs = self.month_runs();
        let mut values = Array2::from_elem((runs.len(), self.symbols.len()), None);
        for (k, &(start, end)) in runs.iter().enumerate() {
            for j in 0..self.symbols.len() {
                values[[k, j]] = (start..end).rev().find_map(|i| self.values[[i, j]]);
            }
        }

        Self {
            dates: runs.iter().map(|&(_, end)| self.dates[end - 1]).collect(),
            symbols: self.symbols.clone(),
            values,
        }
    }

    /// Aggregates each month's values per symbol with `f`.
    ///
    /// `f` receives the non-missing values of one symbol within one month in
    /// date order. Rows are labeled like [`Panel::month_end`].
    #[must_use]
    pub fn resample_monthly<F>(&self, f: F) -> Self
    where
        F: Fn(&[f64]) -> Option<f64>,
    {
        let runs = self.month_runs();
        let mut values = Array2::from_elem((runs.len(), self.symbols.len()), None);
        for (k, &(start, end)) in runs.iter().enumerate() {
            for j in 0..self.symbols.len() {
                let observed: Vec<f64> = (start..end).filter_map(|i| self.values[[i, j]]).collect();
                values[[k, j]] = f(&observed).filter(|v| v.is_finite());
            }
        }

        Self {
            dates: runs.iter().map(|&(_, end)| self.dates[end - 1]).collect(),
            symbols: self.symbols.clone(),
            values,
        }
    }

    /// Last date of each calendar month present in the index.
    pub fn month_end_dates(&self) -> Vec<Date> {
        self.month_runs().iter().map(|&(_, end)| self.dates[end - 1]).collect()
    }

    /// Forward fills this panel onto a (typically daily) date index.
    ///
    /// Each target date `d` takes a copy of the most recent row of this panel
    /// dated on or before `d`, missing cells included, so a symbol missing
    /// at one sample carries nothing forward from earlier samples. A row
    /// dated exactly `d` applies on `d` itself. Target dates before this
    /// panel's first date are missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the target dates are not strictly increasing.
    pub fn forward_fill_onto(&self, dates: &[Date]) -> Result<Self> {
        let n_symbols = self.symbols.len();
        let mut values = Array2::from_elem((dates.len(), n_symbols), None);
        let mut latest: Option<usize> = None;
        let mut cursor = 0;

        for (i, &date) in dates.iter().enumerate() {
            while cursor < self.dates.len() && self.dates[cursor] <= date {
                latest = Some(cursor);
                cursor += 1;
            }
            if let Some(k) = latest {
                values.row_mut(i).assign(&self.values.row(k));
            }
        }

        Self::new(dates.to_vec(), self.symbols.clone(), values)
    }

    /// Selects an exact date and symbol index.
    ///
    /// Cells whose date or symbol is absent from this panel are missing.
    /// No filling or shifting takes place.
    ///
    /// # Errors
    ///
    /// Returns an error if the requested index is itself invalid.
    pub fn reindex(&self, dates: &[Date], symbols: &[Symbol]) -> Result<Self> {
        let col_lookup: HashMap<&str, usize> =
            self.symbols.iter().enumerate().map(|(j, s)| (s.as_str(), j)).collect();
        let cols: Vec<Option<usize>> =
            symbols.iter().map(|s| col_lookup.get(s.as_str()).copied()).collect();

        let mut values = Array2::from_elem((dates.len(), symbols.len()), None);
        for (i, &date) in dates.iter().enumerate() {
            let Some(row) = self.date_index(date) else {
                continue;
            };
            for (j, col) in cols.iter().enumerate() {
                if let Some(col) = col {
                    values[[i, j]] = self.values[[row, *col]];
                }
            }
        }

        Self::new(dates.to_vec(), symbols.to_vec(), values)
    }

    /// Dates and symbols present in every panel.
    ///
    /// Dates keep chronological order; symbols keep the order of the first
    /// panel.
    pub fn inner_index(panels: &[&Self]) -> (Vec<Date>, Vec<Symbol>) {
        let Some((first, rest)) = panels.split_first() else {
            return (Vec::new(), Vec::new());
        };

        let dates = first
            .dates
            .iter()
            .filter(|d| rest.iter().all(|p| p.date_index(**d).is_some()))
            .copied()
            .collect();

        let symbol_sets: Vec<HashSet<&str>> = rest
            .iter()
            .map(|p| p.symbols.iter().map(String::as_str).collect())
            .collect();
        let symbols = first
            .symbols
            .iter()
            .filter(|s| symbol_sets.iter().all(|set| set.contains(s.as_str())))
            .cloned()
            .collect();

        (dates, symbols)
    }

    /// Converts the panel to a wide DataFrame with a `date` column.
    ///
    /// # Errors
    ///
    /// Returns an error if Polars fails to assemble the frame.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let mut columns = Vec::with_capacity(self.symbols.len() + 1);
        let dates: Vec<String> =
            self.dates.iter().map(|d| d.format(DATE_FORMAT).to_string()).collect();
        columns.push(Column::new("date".into(), dates));

        for (j, symbol) in self.symbols.iter().enumerate() {
            let values: Vec<Option<f64>> = self.values.column(j).to_vec();
            columns.push(Column::new(symbol.as_str().into(), values));
        }

        Ok(DataFrame::new(columns)?)
    }

    /// Builds a panel from a wide DataFrame.
    ///
    /// `date_col` holds the row index (strings in `YYYY-MM-DD` or a date
    /// type); every other column is read as one symbol. Rows are sorted by
    /// date; duplicate dates are rejected.
    ///
    /// # Errors
    ///
    /// Returns an error if the date column is absent or unparsable, if a value
    /// column cannot be cast to `f64`, or if the index is invalid.
    pub fn from_dataframe(df: &DataFrame, date_col: &str) -> Result<Self> {
        let date_series = df
            .column(date_col)
            .map_err(|_| RondaError::MissingColumn(date_col.to_string()))?
            .as_materialized_series()
            .cast(&DataType::String)?;

        let mut raw_dates = Vec::with_capacity(df.height());
        for (row, value) in date_series.str()?.into_iter().enumerate() {
            let value = value
                .ok_or_else(|| RondaError::InvalidDate(format!("null date at row {row}")))?;
            raw_dates.push(parse_date(value)?);
        }

        let mut order: Vec<usize> = (0..raw_dates.len()).collect();
        order.sort_by_key(|&i| raw_dates[i]);
        let dates: Vec<Date> = order.iter().map(|&i| raw_dates[i]).collect();

        let mut symbols = Vec::new();
        let mut columns = Vec::new();
        for name in df.get_column_names() {
            if name.as_str() == date_col {
                continue;
            }
            let series = df.column(name.as_str())?.as_materialized_series().cast(&DataType::Float64)?;
            let raw: Vec<Option<f64>> = series.f64()?.into_iter().collect();
            columns.push(order.iter().map(|&i| raw[i]).collect());
            symbols.push(name.to_string());
        }

        Self::from_columns(dates, symbols, columns)
    }

    /// Half-open row ranges `[start, end)` of each calendar month.
    fn month_runs(&self) -> Vec<(usize, usize)> {
        let mut runs = Vec::new();
        let mut start = 0;
        for i in 1..=self.dates.len() {
            let boundary =
                i == self.dates.len() || year_month(self.dates[i]) != year_month(self.dates[start]);
            if boundary {
                runs.push((start, i));
                start = i;
            }
        }
        runs
    }

    fn with_values(&self, values: Array2<Option<f64>>) -> Self {
        Self {
            dates: self.dates.clone(),
            symbols: self.symbols.clone(),
            values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd_opt(y, m, day).unwrap()
    }

    fn symbols(names: &[&str]) -> Vec<Symbol> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_new_rejects_unsorted_dates() {
        let result = Panel::missing(vec![d(2024, 1, 3), d(2024, 1, 2)], symbols(&["A"]));
        assert!(matches!(result, Err(RondaError::InvalidData(_))));
    }

    #[test]
    fn test_new_rejects_duplicate_dates() {
        let result = Panel::missing(vec![d(2024, 1, 2), d(2024, 1, 2)], symbols(&["A"]));
        assert!(matches!(result, Err(RondaError::InvalidData(_))));
    }

    #[test]
    fn test_new_rejects_duplicate_symbols() {
        let result = Panel::missing(vec![d(2024, 1, 2)], symbols(&["A", "A"]));
        assert!(matches!(result, Err(RondaError::InvalidData(_))));
    }

    #[test]
    fn test_from_columns_shape_mismatch() {
        let result = Panel::from_columns(
            vec![d(2024, 1, 2), d(2024, 1, 3)],
            symbols(&["A"]),
            vec![vec![Some(1.0)]],
        );
        assert!(matches!(result, Err(RondaError::DimensionMismatch { expected: 2, actual: 1 })));
    }

    #[test]
    fn test_from_columns_normalizes_nan() {
        let panel = Panel::from_columns(
            vec![d(2024, 1, 2), d(2024, 1, 3)],
            symbols(&["A"]),
            vec![vec![Some(f64::NAN), Some(1.0)]],
        )
        .unwrap();
        assert_eq!(panel.get(0, 0), None);
        assert_eq!(panel.get(1, 0), Some(1.0));
        assert_eq!(panel.count_present(), 1);
    }

    #[test]
    fn test_shift() {
        let panel = Panel::from_columns(
            vec![d(2024, 1, 2), d(2024, 1, 3), d(2024, 1, 4)],
            symbols(&["A"]),
            vec![vec![Some(1.0), Some(2.0), Some(3.0)]],
        )
        .unwrap();
        let shifted = panel.shift(2);
        assert_eq!(shifted.series("A").unwrap(), vec![None, None, Some(1.0)]);
    }

    #[test]
    fn test_month_end_takes_last_observed_value() {
        let panel = Panel::from_columns(
            vec![d(2024, 1, 30), d(2024, 1, 31), d(2024, 2, 1), d(2024, 2, 29)],
            symbols(&["A", "B"]),
            vec![
                vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)],
                vec![Some(10.0), None, None, None],
            ],
        )
        .unwrap();

        let sampled = panel.month_end();
        assert_eq!(sampled.dates(), &[d(2024, 1, 31), d(2024, 2, 29)]);
        assert_eq!(sampled.series("A").unwrap(), vec![Some(2.0), Some(4.0)]);
        assert_eq!(sampled.series("B").unwrap(), vec![Some(10.0), None]);
    }

    #[test]
    fn test_month_end_dates_use_last_trading_day() {
        // 2021-01-31 is a Sunday; the last trading row of January is the 29th.
        let panel = Panel::missing(
            vec![d(2021, 1, 28), d(2021, 1, 29), d(2021, 2, 1)],
            symbols(&["A"]),
        )
        .unwrap();
        assert_eq!(panel.month_end_dates(), vec![d(2021, 1, 29), d(2021, 2, 1)]);
    }

    #[test]
    fn test_resample_monthly() {
        let panel = Panel::from_columns(
            vec![d(2024, 1, 30), d(2024, 1, 31), d(2024, 2, 1)],
            symbols(&["A"]),
            vec![vec![Some(1.0), Some(2.0), None]],
        )
        .unwrap();
        let summed = panel.resample_monthly(|values| {
            if values.is_empty() { None } else { Some(values.iter().sum()) }
        });
        assert_eq!(summed.series("A").unwrap(), vec![Some(3.0), None]);
    }

    #[test]
    fn test_forward_fill_boundary_is_sample_date() {
        let monthly = Panel::from_columns(
            vec![d(2024, 1, 31), d(2024, 2, 29)],
            symbols(&["A"]),
            vec![vec![Some(1.0), Some(2.0)]],
        )
        .unwrap();
        let daily = [d(2024, 1, 30), d(2024, 1, 31), d(2024, 2, 1), d(2024, 2, 29), d(2024, 3, 1)];

        let filled = monthly.forward_fill_onto(&daily).unwrap();
        assert_eq!(
            filled.series("A").unwrap(),
            vec![None, Some(1.0), Some(1.0), Some(2.0), Some(2.0)]
        );
    }

    #[test]
    fn test_forward_fill_copies_whole_rows() {
        let monthly = Panel::from_columns(
            vec![d(2024, 1, 31), d(2024, 2, 29)],
            symbols(&["A", "B"]),
            vec![vec![Some(1.0), None], vec![Some(3.0), Some(4.0)]],
        )
        .unwrap();
        let filled = monthly.forward_fill_onto(&[d(2024, 2, 1), d(2024, 3, 1)]).unwrap();

        // A was scored in January only; it has nothing to carry into March.
        assert_eq!(filled.series("A").unwrap(), vec![Some(1.0), None]);
        assert_eq!(filled.series("B").unwrap(), vec![Some(3.0), Some(4.0)]);
    }

    #[test]
    fn test_reindex_and_inner_index() {
        let a = Panel::from_columns(
            vec![d(2024, 1, 31), d(2024, 2, 29)],
            symbols(&["X", "Y"]),
            vec![vec![Some(1.0), Some(2.0)], vec![Some(3.0), Some(4.0)]],
        )
        .unwrap();
        let b = Panel::from_columns(
            vec![d(2024, 2, 29), d(2024, 3, 28)],
            symbols(&["Y", "Z"]),
            vec![vec![Some(5.0), Some(6.0)], vec![Some(7.0), Some(8.0)]],
        )
        .unwrap();

        let (dates, syms) = Panel::inner_index(&[&a, &b]);
        assert_eq!(dates, vec![d(2024, 2, 29)]);
        assert_eq!(syms, symbols(&["Y"]));

        let aligned = a.reindex(&dates, &syms).unwrap();
        assert_eq!(aligned.n_dates(), 1);
        assert_eq!(aligned.get(0, 0), Some(4.0));
    }

    #[test]
    fn test_dataframe_round_trip() {
        let panel = Panel::from_columns(
            vec![d(2024, 1, 31), d(2024, 2, 29)],
            symbols(&["X", "Y"]),
            vec![vec![Some(1.0), None], vec![Some(3.0), Some(4.0)]],
        )
        .unwrap();

        let df = panel.to_dataframe().unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 3);

        let restored = Panel::from_dataframe(&df, "date").unwrap();
        assert_eq!(restored, panel);
    }

    #[test]
    fn test_from_dataframe_sorts_rows() {
        let df = df! {
            "date" => &["2024-01-03", "2024-01-02"],
            "A" => &[2.0, 1.0],
        }
        .unwrap();

        let panel = Panel::from_dataframe(&df, "date").unwrap();
        assert_eq!(panel.dates(), &[d(2024, 1, 2), d(2024, 1, 3)]);
        assert_eq!(panel.series("A").unwrap(), vec![Some(1.0), Some(2.0)]);
    }

    #[test]
    fn test_from_dataframe_missing_date_column() {
        let df = df! { "A" => &[1.0] }.unwrap();
        let result = Panel::from_dataframe(&df, "date");
        assert!(matches!(result, Err(RondaError::MissingColumn(_))));
    }
}
