//! GenBank flat-file parser
//!
//! Parses the sections of a GenBank record this tool consumes:
//!
//! - **LOCUS**: record name
//! - **DEFINITION**: brief description (may span several lines)
//! - **ACCESSION**: primary accession number
//! - **VERSION**: accession.version identifier
//! - **ORIGIN**: nucleotide sequence
//! - **//**: record terminator
//!
//! Record length is derived from the parsed sequence rather than the
//! declared LOCUS length, so entries delivered without ORIGIN data (for
//! example CONTIG-only records) report a length of zero.
//!
//! # Example
//!
//! ```
//! use gbfetch::formats::genbank::GenBankParser;
//! use std::io::Cursor;
//!
//! let text = "LOCUS       AB000001        12 bp    DNA     linear   PLN 01-JAN-2020\n\
//!             DEFINITION  Example record.\n\
//!             ACCESSION   AB000001\n\
//!             VERSION     AB000001.1\n\
//!             ORIGIN\n\
//!                     1 acgtacgtac gt\n\
//!             //\n";
//!
//! let records: Vec<_> = GenBankParser::new(Cursor::new(text))
//!     .collect::<gbfetch::Result<_>>()
//!     .unwrap();
//! assert_eq!(records[0].id(), "AB000001.1");
//! assert_eq!(records[0].length(), 12);
//! ```

use crate::error::{GbfetchError, Result};
use std::io::BufRead;

/// One parsed GenBank entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenBankRecord {
    /// LOCUS name
    pub locus: String,
    /// Brief description from the DEFINITION section
    pub definition: String,
    /// Primary accession number
    pub accession: String,
    /// Accession.version identifier (may be empty for unversioned entries)
    pub version: String,
    /// Nucleotide sequence (lowercase), empty when the record carries no ORIGIN data
    pub sequence: String,
}

impl GenBankRecord {
    /// Record identifier: versioned accession when present, else the
    /// accession, else the LOCUS name
    pub fn id(&self) -> &str {
        if !self.version.is_empty() {
            &self.version
        } else if !self.accession.is_empty() {
            &self.accession
        } else {
            &self.locus
        }
    }

    /// Sequence length in base pairs, derived from the parsed sequence
    pub fn length(&self) -> usize {
        self.sequence.len()
    }
}

/// Streaming GenBank parser
///
/// Reads records one at a time from any `BufRead`, so a fetched response
/// body and a file on disk parse identically.
pub struct GenBankParser<R: BufRead> {
    reader: R,
    current_line: String,
    done: bool,
}

impl<R: BufRead> GenBankParser<R> {
    /// Create parser from a buffered reader
    pub fn new(reader: R) -> Self {
        GenBankParser {
            reader,
            current_line: String::new(),
            done: false,
        }
    }

    /// Read next line into the reused buffer
    fn read_line(&mut self) -> Result<bool> {
        self.current_line.clear();
        let bytes_read = self.reader.read_line(&mut self.current_line)?;
        Ok(bytes_read > 0)
    }

    /// Parse the LOCUS line into the record name
    fn parse_locus(&self) -> Result<String> {
        // LOCUS format: LOCUS       NAME      LENGTH bp  MOLTYPE  TOPOLOGY DIV  DATE
        let parts: Vec<&str> = self.current_line.split_whitespace().collect();

        if parts.len() < 2 {
            return Err(GbfetchError::InvalidGenBankFormat {
                msg: format!("Invalid LOCUS line: {}", self.current_line.trim_end()),
            });
        }

        Ok(parts[1].to_string())
    }

    /// Read multi-line field value (inline, no peeking)
    /// Returns the value and whether we should skip the next read
    fn read_continuing_lines(&mut self, initial_value: String) -> Result<(String, bool)> {
        let mut value = initial_value;
        let mut has_next_line = false;

        loop {
            if !self.read_line()? {
                break;
            }

            // Continuation lines start with whitespace
            if self.current_line.starts_with("  ") {
                value.push(' ');
                value.push_str(self.current_line.trim());
            } else {
                // Not a continuation - we've read the next section's line
                has_next_line = true;
                break;
            }
        }

        Ok((value, has_next_line))
    }

    /// Parse ORIGIN section (sequence data)
    fn parse_origin(&mut self) -> Result<String> {
        let mut sequence = String::new();

        while self.read_line()? {
            let line = &self.current_line;

            // End of sequence
            if line.starts_with("//") {
                break;
            }

            // Sequence line: "   1 acgtacgtac acgtacgtac"
            // Skip the leading base number, keep only bases
            for word in line.split_whitespace() {
                if word.chars().all(|c| c.is_ascii_digit()) {
                    continue;
                }
                sequence.push_str(&word.to_lowercase());
            }
        }

        Ok(sequence)
    }
}

impl<R: BufRead> Iterator for GenBankParser<R> {
    type Item = Result<GenBankRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut locus = String::new();
        let mut definition = String::new();
        let mut accession = String::new();
        let mut version = String::new();
        let mut sequence = String::new();
        let mut started = false;

        // Read record line by line
        let mut skip_read = false;
        loop {
            if !skip_read {
                match self.read_line() {
                    Ok(false) => {
                        // EOF; only trailing whitespace may follow the last record
                        self.done = true;
                        return None;
                    }
                    Err(e) => return Some(Err(e)),
                    Ok(true) => {}
                }
            }
            skip_read = false;

            let line = self.current_line.trim_end();

            // Record terminator
            if line.starts_with("//") {
                if started {
                    break;
                }
                continue;
            }

            if line.starts_with("LOCUS") {
                started = true;
                match self.parse_locus() {
                    Ok(name) => locus = name,
                    Err(e) => return Some(Err(e)),
                }
            } else if line.starts_with("DEFINITION") {
                let value = line["DEFINITION".len()..].trim().to_string();
                match self.read_continuing_lines(value) {
                    Ok((v, has_next)) => {
                        definition = v;
                        skip_read = has_next;
                    }
                    Err(e) => return Some(Err(e)),
                }
            } else if line.starts_with("ACCESSION") {
                // Secondary accessions may follow the primary one
                accession = line["ACCESSION".len()..]
                    .split_whitespace()
                    .next()
                    .unwrap_or("")
                    .to_string();
            } else if line.starts_with("VERSION") {
                version = line["VERSION".len()..]
                    .split_whitespace()
                    .next()
                    .unwrap_or("")
                    .to_string();
            } else if line.starts_with("ORIGIN") {
                match self.parse_origin() {
                    Ok(seq) => sequence = seq,
                    Err(e) => return Some(Err(e)),
                }
                // ORIGIN is the last section before //
                break;
            }
        }

        Some(Ok(GenBankRecord {
            locus,
            definition,
            accession,
            version,
            sequence,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SINGLE_RECORD: &str = "\
LOCUS       AB000001                 20 bp    DNA     linear   PLN 01-JAN-2020
DEFINITION  Arabidopsis thaliana mRNA for hypothetical protein,
            partial cds.
ACCESSION   AB000001 AB999999
VERSION     AB000001.2
KEYWORDS    .
SOURCE      Arabidopsis thaliana (thale cress)
ORIGIN
        1 acgtacgtac acgtacgtac
//
";

    fn parse_all(text: &str) -> Vec<GenBankRecord> {
        GenBankParser::new(Cursor::new(text))
            .collect::<Result<Vec<_>>>()
            .expect("parse failed")
    }

    #[test]
    fn parses_single_record() {
        let records = parse_all(SINGLE_RECORD);
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.locus, "AB000001");
        assert_eq!(record.accession, "AB000001");
        assert_eq!(record.version, "AB000001.2");
        assert_eq!(
            record.definition,
            "Arabidopsis thaliana mRNA for hypothetical protein, partial cds."
        );
        assert_eq!(record.sequence, "acgtacgtacacgtacgtac");
        assert_eq!(record.length(), 20);
    }

    #[test]
    fn id_prefers_versioned_accession() {
        let records = parse_all(SINGLE_RECORD);
        assert_eq!(records[0].id(), "AB000001.2");

        let unversioned = GenBankRecord {
            locus: "LOC1".to_string(),
            definition: String::new(),
            accession: "AB000002".to_string(),
            version: String::new(),
            sequence: String::new(),
        };
        assert_eq!(unversioned.id(), "AB000002");
    }

    #[test]
    fn parses_multiple_records_in_order() {
        let text = format!(
            "{}{}",
            SINGLE_RECORD,
            SINGLE_RECORD.replace("AB000001", "AB000002")
        );
        let records = parse_all(&text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].accession, "AB000001");
        assert_eq!(records[1].accession, "AB000002");
    }

    #[test]
    fn record_without_origin_has_zero_length() {
        let text = "\
LOCUS       CM000001             1000000 bp    DNA     linear   CON 01-JAN-2020
DEFINITION  Example chromosome, whole genome shotgun sequence.
ACCESSION   CM000001
VERSION     CM000001.1
CONTIG      join(AB000001.1:1..1000000)
//
";
        let records = parse_all(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].length(), 0);
    }

    #[test]
    fn invalid_locus_line_is_rejected() {
        let text = "LOCUS\nDEFINITION  Broken.\n//\n";
        let result: Result<Vec<_>> = GenBankParser::new(Cursor::new(text)).collect();
        assert!(matches!(
            result,
            Err(GbfetchError::InvalidGenBankFormat { .. })
        ));
    }

    #[test]
    fn blank_lines_between_records_are_ignored() {
        let text = format!("\n{}\n\n", SINGLE_RECORD);
        let records = parse_all(&text);
        assert_eq!(records.len(), 1);
    }
}
