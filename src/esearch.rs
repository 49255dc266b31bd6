//! PubMed ESearch API Client
//!
//! Resolves a free-text query into a list of PubMed IDs via the NCBI
//! E-utilities esearch endpoint. The query string is passed verbatim
//! (URL-encoded); up to [`MAX_RESULTS`] matches are requested in one call.

use crate::error::{PubmedError, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

/// NCBI esearch endpoint
const ESEARCH_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi";

/// Maximum number of IDs requested per query
const MAX_RESULTS: usize = 100;

/// ESearch response envelope
#[derive(Debug, Deserialize)]
struct EsearchResponse {
    #[serde(default)]
    esearchresult: EsearchResult,
}

#[derive(Debug, Default, Deserialize)]
struct EsearchResult {
    #[serde(default)]
    idlist: Vec<String>,
}

/// Fetch PubMed IDs matching a search query.
///
/// Returns the ID list in the order the endpoint emits it, empty when the
/// query matches nothing or the `idlist` field is absent. Non-2xx responses
/// fail with [`PubmedError::Api`]; transport failures with
/// [`PubmedError::Network`]. No retries.
pub async fn fetch_ids(client: &Client, query: &str) -> Result<Vec<String>> {
    fetch_ids_at(client, ESEARCH_URL, query).await
}

/// Fetch from an explicit endpoint, so tests can point at a local server
async fn fetch_ids_at(client: &Client, endpoint: &str, query: &str) -> Result<Vec<String>> {
    info!(query = query, "Fetching PubMed IDs");

    let url = build_search_url(endpoint, query);
    debug!(url = %url, "Sending esearch request");

    let response = client.get(&url).send().await?;
    let status = response.status();

    if !status.is_success() {
        return Err(PubmedError::Api {
            code: i32::from(status.as_u16()),
            message: format!("esearch error: {}", status),
        });
    }

    let body = response.text().await?;
    let ids = parse_search_response(&body)?;

    info!(count = ids.len(), "ESearch complete");
    Ok(ids)
}

/// Build the esearch request URL
fn build_search_url(endpoint: &str, query: &str) -> String {
    format!(
        "{}?db=pubmed&term={}&retmode=json&retmax={}",
        endpoint,
        urlencoding::encode(query),
        MAX_RESULTS
    )
}

/// Parse the esearch JSON response into an ID list
fn parse_search_response(json_str: &str) -> Result<Vec<String>> {
    let response: EsearchResponse = serde_json::from_str(json_str)
        .map_err(|e| PubmedError::Parse(format!("Failed to parse esearch response: {}", e)))?;
    Ok(response.esearchresult.idlist)
}
