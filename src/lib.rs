//! gbfetch: fetch, filter, and chart GenBank nucleotide records
//!
//! gbfetch retrieves nucleotide records for a taxonomic ID from NCBI
//! Entrez, filters them by sequence length, and writes two artifacts: a
//! CSV summary (`Accession,Length,Description`) and a PNG chart of record
//! lengths sorted longest-first.
//!
//! # Pipeline
//!
//! 1. Resolve the TaxID to a scientific name (`efetch`, taxonomy db)
//! 2. Search the nucleotide db with history enabled (`esearch`), keeping
//!    the server-side session tokens
//! 3. Fetch one batch of GenBank flat-file records for that session
//!    (`efetch`, capped at [`entrez::MAX_FETCH_CEILING`])
//! 4. Keep records whose length falls in the requested inclusive range
//! 5. Export CSV and render the length chart
//!
//! # Example
//!
//! ```no_run
//! use gbfetch::entrez::{EntrezClient, EntrezConfig};
//! use gbfetch::formats::GenBankParser;
//! use gbfetch::summary::filter_by_length;
//! use gbfetch::report;
//! use std::io::Cursor;
//!
//! # fn main() -> gbfetch::Result<()> {
//! let client = EntrezClient::new(EntrezConfig::new("me@example.org", "key"))?;
//! let taxon = client.resolve_taxon("9606")?;
//! println!("Organism: {} (TaxID: 9606)", taxon.scientific_name);
//!
//! let session = client.search_nucleotide("9606")?;
//! if session.count > 0 {
//!     let text = client.fetch_genbank_batch(&session, 100)?;
//!     let records = GenBankParser::new(Cursor::new(text));
//!     let filtered = filter_by_length(records, 600, 1300)?;
//!     report::export_summary(&filtered, "output.csv", "plot.png")?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod entrez;
pub mod error;
pub mod formats;
pub mod plot;
pub mod report;
pub mod summary;

pub use entrez::{EntrezClient, EntrezConfig, SearchSession, TaxonInfo};
pub use error::{GbfetchError, Result};
pub use formats::{GenBankParser, GenBankRecord};
pub use summary::SequenceSummary;
