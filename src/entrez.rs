//! NCBI Entrez E-utilities client
//!
//! Blocking client for the three E-utilities calls this tool needs:
//! taxonomy lookup (`efetch`), nucleotide search with history
//! (`esearch`), and a single GenBank flat-file batch fetch (`efetch`).
//!
//! Contact email, API key, and tool name are carried in an explicit
//! [`EntrezConfig`] value scoped to the client rather than process-wide
//! state, and are attached to every request as query parameters.
//!
//! # Example
//!
//! ```no_run
//! use gbfetch::entrez::{EntrezClient, EntrezConfig};
//!
//! # fn main() -> gbfetch::Result<()> {
//! let client = EntrezClient::new(EntrezConfig::new("me@example.org", "key"))?;
//! let taxon = client.resolve_taxon("9606")?;
//! println!("Organism: {} (TaxID: 9606)", taxon.scientific_name);
//! # Ok(())
//! # }
//! ```

use crate::error::{GbfetchError, Result};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;

/// Base URL for the NCBI E-utilities endpoints
pub const EUTILS_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

/// Default HTTP timeout (30 seconds)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default number of records requested in the batch fetch
pub const DEFAULT_FETCH_CAP: usize = 100;

/// Hard ceiling on the batch size, regardless of the requested cap
pub const MAX_FETCH_CEILING: usize = 500;

/// Per-run Entrez request configuration
#[derive(Debug, Clone)]
pub struct EntrezConfig {
    /// Registered contact email, sent with every request
    pub email: String,
    /// NCBI API key, sent with every request when non-empty
    pub api_key: String,
    /// Tool name reported to NCBI
    pub tool: String,
}

impl EntrezConfig {
    /// Create a config with the default tool name
    pub fn new(email: impl Into<String>, api_key: impl Into<String>) -> Self {
        EntrezConfig {
            email: email.into(),
            api_key: api_key.into(),
            tool: env!("CARGO_PKG_NAME").to_string(),
        }
    }
}

/// Server-side search session from an `esearch` call with history enabled
///
/// The tokens identify a result set NCBI retains for a follow-up fetch.
/// Created once by [`EntrezClient::search_nucleotide`], consumed once by
/// [`EntrezClient::fetch_genbank_batch`], never persisted.
#[derive(Debug, Clone)]
pub struct SearchSession {
    /// Total number of matching records
    pub count: u64,
    /// Opaque web environment token
    pub web_env: String,
    /// Opaque query key within the web environment
    pub query_key: String,
}

/// Resolved taxonomy entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonInfo {
    /// Numeric taxonomy identifier, as returned by the service
    pub tax_id: String,
    /// Scientific name of the organism
    pub scientific_name: String,
}

/// Blocking E-utilities client
pub struct EntrezClient {
    client: Client,
    config: EntrezConfig,
    base_url: String,
    timeout: Duration,
}

impl EntrezClient {
    /// Create a client with the default endpoint and timeout
    pub fn new(config: EntrezConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .user_agent(format!(
                "{}/{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| GbfetchError::Network(e.to_string()))?;

        Ok(EntrezClient {
            client,
            config,
            base_url: EUTILS_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Resolve a taxonomic ID to its scientific name
    ///
    /// Issues `efetch` against the taxonomy database with `retmode=xml`
    /// and returns the first taxon in the response. Any transport, HTTP,
    /// or document-shape failure propagates; there is no retry.
    pub fn resolve_taxon(&self, taxid: &str) -> Result<TaxonInfo> {
        let xml = self.get(
            "efetch.fcgi",
            &[("db", "taxonomy"), ("id", taxid), ("retmode", "xml")],
        )?;
        parse_taxon_xml(&xml)
    }

    /// Search the nucleotide database for records tagged with a TaxID
    ///
    /// Uses `usehistory=y` so the server retains the result set for the
    /// follow-up batch fetch. When the count is zero the caller must skip
    /// the fetch entirely; the session tokens may be empty in that case.
    pub fn search_nucleotide(&self, taxid: &str) -> Result<SearchSession> {
        let term = format!("txid{}[Organism]", taxid);
        let xml = self.get(
            "esearch.fcgi",
            &[("db", "nucleotide"), ("term", &term), ("usehistory", "y")],
        )?;
        parse_search_xml(&xml)
    }

    /// Fetch one batch of GenBank flat-file records for a search session
    ///
    /// Requests at most `min(max_fetch, 500)` records in a single call.
    /// There is no multi-batch pagination even when the session count
    /// exceeds the batch size; that is a scope limitation of this tool.
    pub fn fetch_genbank_batch(&self, session: &SearchSession, max_fetch: usize) -> Result<String> {
        let batch_size = effective_batch_size(max_fetch);
        let retmax = batch_size.to_string();
        self.get(
            "efetch.fcgi",
            &[
                ("db", "nucleotide"),
                ("rettype", "gb"),
                ("retmode", "text"),
                ("retmax", &retmax),
                ("WebEnv", &session.web_env),
                ("query_key", &session.query_key),
            ],
        )
    }

    /// Issue a GET against one endpoint with identification parameters
    fn get(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<String> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let mut request = self
            .client
            .get(&url)
            .query(&[("tool", self.config.tool.as_str())])
            .query(&[("email", self.config.email.as_str())]);
        if !self.config.api_key.is_empty() {
            request = request.query(&[("api_key", self.config.api_key.as_str())]);
        }

        let response = request.query(params).send().map_err(|e| {
            if e.is_timeout() {
                GbfetchError::Timeout {
                    seconds: self.timeout.as_secs(),
                    url: url.clone(),
                }
            } else {
                GbfetchError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GbfetchError::Http {
                status: status.as_u16(),
                url,
            });
        }

        response
            .text()
            .map_err(|e| GbfetchError::Network(e.to_string()))
    }
}

/// Clamp a requested fetch cap to the hard batch ceiling
pub fn effective_batch_size(requested: usize) -> usize {
    requested.min(MAX_FETCH_CEILING)
}

#[derive(Debug, Deserialize)]
#[serde(rename = "TaxaSet")]
struct TaxaSetXml {
    #[serde(rename = "Taxon", default)]
    taxa: Vec<TaxonXml>,
}

#[derive(Debug, Deserialize)]
struct TaxonXml {
    #[serde(rename = "TaxId")]
    tax_id: String,
    #[serde(rename = "ScientificName")]
    scientific_name: String,
}

/// Parse an `efetch` taxonomy response (`TaxaSet/Taxon`)
pub fn parse_taxon_xml(xml: &str) -> Result<TaxonInfo> {
    let parsed: TaxaSetXml =
        quick_xml::de::from_str(xml).map_err(|e| GbfetchError::MalformedResponse {
            msg: format!("taxonomy document: {}", e),
        })?;

    let taxon = parsed
        .taxa
        .into_iter()
        .next()
        .ok_or_else(|| GbfetchError::MalformedResponse {
            msg: "taxonomy document contains no Taxon records".to_string(),
        })?;

    Ok(TaxonInfo {
        tax_id: taxon.tax_id,
        scientific_name: taxon.scientific_name,
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename = "eSearchResult")]
struct ESearchResultXml {
    #[serde(rename = "Count")]
    count: u64,
    #[serde(rename = "QueryKey")]
    query_key: Option<String>,
    #[serde(rename = "WebEnv")]
    web_env: Option<String>,
    #[serde(rename = "ERROR")]
    error: Option<String>,
}

/// Parse an `esearch` response (`eSearchResult`)
///
/// Session tokens are required whenever the count is positive; a zero
/// count is valid without them since no fetch will follow.
pub fn parse_search_xml(xml: &str) -> Result<SearchSession> {
    let parsed: ESearchResultXml =
        quick_xml::de::from_str(xml).map_err(|e| GbfetchError::MalformedResponse {
            msg: format!("search document: {}", e),
        })?;

    if let Some(error) = parsed.error {
        return Err(GbfetchError::MalformedResponse {
            msg: format!("search reported an error: {}", error),
        });
    }

    let (web_env, query_key) = match (parsed.web_env, parsed.query_key) {
        (Some(web_env), Some(query_key)) => (web_env, query_key),
        _ if parsed.count == 0 => (String::new(), String::new()),
        _ => {
            return Err(GbfetchError::MalformedResponse {
                msg: "search document is missing WebEnv/QueryKey session tokens".to_string(),
            });
        }
    };

    Ok(SearchSession {
        count: parsed.count,
        web_env,
        query_key,
    })
}
