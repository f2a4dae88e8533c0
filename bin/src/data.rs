//! CSV input and output for the ronda CLI.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::*;
use ronda_traits::Panel;
use tracing::info;

/// Load a wide daily panel from CSV.
///
/// The file has one date column and one numeric column per ticker. Empty
/// cells are missing values.
pub(crate) fn load_panel(path: &Path, date_column: &str) -> Result<Panel> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("failed to open {}", path.display()))?
        .finish()
        .with_context(|| format!("failed to read CSV {}", path.display()))?;

    let panel = Panel::from_dataframe(&df, date_column)
        .with_context(|| format!("invalid panel in {}", path.display()))?;

    info!(
        path = %path.display(),
        dates = panel.n_dates(),
        symbols = panel.n_symbols(),
        "loaded panel"
    );

    Ok(panel)
}

/// Write a DataFrame as CSV to `path`, or to stdout when `path` is `None`.
pub(crate) fn write_csv(df: &mut DataFrame, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            let mut file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            CsvWriter::new(&mut file).include_header(true).finish(df)?;
            info!(path = %path.display(), rows = df.height(), "wrote CSV");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            CsvWriter::new(&mut stdout).include_header(true).finish(df)?;
            stdout.flush()?;
        }
    }
    Ok(())
}
