//! CSV export of filtered summary rows
//!
//! Writes the `Accession,Length,Description` table in retrieval order,
//! overwriting any existing file at the target path. The empty-set guard
//! lives here too: [`export_summary`] creates neither output file when
//! there are no rows to report.

use crate::error::Result;
use crate::plot;
use crate::summary::SequenceSummary;
use std::path::Path;

/// Default CSV output filename
pub const DEFAULT_CSV_PATH: &str = "output.csv";

/// Write summary rows as CSV
///
/// Emits the header followed by one row per record, in input order.
/// Existing files are overwritten without confirmation; filesystem
/// errors propagate.
pub fn write_csv<P: AsRef<Path>>(rows: &[SequenceSummary], path: P) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the CSV and render the length chart, unless there is nothing to write
///
/// Returns `Ok(false)` without touching the filesystem when `rows` is
/// empty, so an all-filtered-out run leaves no partial outputs behind.
pub fn export_summary<P, Q>(rows: &[SequenceSummary], csv_path: P, plot_path: Q) -> Result<bool>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    if rows.is_empty() {
        return Ok(false);
    }

    write_csv(rows, csv_path)?;
    plot::render_length_plot(rows, plot_path)?;
    Ok(true)
}
