//! Summary rows: projection, length filtering, and plot ordering
//!
//! A [`SequenceSummary`] is the three-column view of a parsed record that
//! both the CSV export and the chart consume. Serde renames produce the
//! exact `Accession,Length,Description` header.

use crate::error::Result;
use crate::formats::genbank::GenBankRecord;
use serde::{Deserialize, Serialize};

/// One output row: accession, length, description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceSummary {
    /// Record identifier (versioned accession when available)
    #[serde(rename = "Accession")]
    pub accession: String,
    /// Sequence length in base pairs
    #[serde(rename = "Length")]
    pub length: u64,
    /// Free-text description
    #[serde(rename = "Description")]
    pub description: String,
}

impl From<&GenBankRecord> for SequenceSummary {
    fn from(record: &GenBankRecord) -> Self {
        SequenceSummary {
            accession: record.id().to_string(),
            length: record.length() as u64,
            description: record.definition.clone(),
        }
    }
}

/// Keep records whose length lies in `[min_len, max_len]` inclusive
///
/// Retrieval order is preserved; boundary lengths are retained. Parse
/// errors from the record stream propagate unchanged.
pub fn filter_by_length<I>(records: I, min_len: u64, max_len: u64) -> Result<Vec<SequenceSummary>>
where
    I: IntoIterator<Item = Result<GenBankRecord>>,
{
    let mut filtered = Vec::new();
    for record in records {
        let record = record?;
        let length = record.length() as u64;
        if length >= min_len && length <= max_len {
            filtered.push(SequenceSummary::from(&record));
        }
    }
    Ok(filtered)
}

/// Rows re-sorted by length descending for the chart
///
/// The sort is stable: rows with equal lengths keep their relative
/// retrieval order. The CSV keeps the original order; only the chart
/// uses this ordering.
pub fn sort_for_plot(rows: &[SequenceSummary]) -> Vec<SequenceSummary> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| b.length.cmp(&a.length));
    sorted
}
