//! Format parsers
//!
//! Currently only the GenBank flat-file format, which is what Entrez
//! `efetch` returns for `rettype=gb&retmode=text`.

pub mod genbank;

pub use genbank::{GenBankParser, GenBankRecord};
