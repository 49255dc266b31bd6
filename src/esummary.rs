//! PubMed ESummary API Client
//!
//! Fetches full metadata for a list of PubMed IDs via the NCBI E-utilities
//! esummary endpoint and runs the affiliation classifier on each record's
//! author list. All IDs are joined into a single comma-separated request
//! parameter; there is no chunking, which is a known scalability limit for
//! very large ID sets.
//!
//! The esummary `result` object maps each requested ID to a record object
//! and also carries one aggregate `uids` key (an array of the IDs). We walk
//! the requested ID list and look each one up in the map, so the aggregate
//! key is never mistaken for a record and output order follows the search
//! result order.

use crate::classify::{self, Author};
use crate::error::{PubmedError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use tracing::{debug, info, warn};

/// NCBI esummary endpoint
const ESUMMARY_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esummary.fcgi";

/// Sentinel for intentionally unpopulated fields
pub const NOT_AVAILABLE: &str = "N/A";

/// One enriched paper record, ready for output.
///
/// Serializes to the fixed six-field shape shared by the CSV and stdout
/// writers: the flagged-author list renders comma-joined (or the `"N/A"`
/// sentinel when empty), and the two placeholder fields always carry the
/// sentinel — extraction for them is future scope.
#[derive(Debug, Clone, Serialize)]
pub struct PaperRecord {
    /// PubMed ID the record was fetched under
    #[serde(rename = "PubmedID")]
    pub pubmed_id: String,
    /// Paper title, when the summary provides one
    #[serde(rename = "Title")]
    pub title: Option<String>,
    /// Free-text publication date (not a structured date)
    #[serde(rename = "Publication Date")]
    pub pub_date: Option<String>,
    /// Names of authors flagged as non-academic; empty when none
    #[serde(rename = "Non-academic Author(s)", serialize_with = "join_or_na")]
    pub non_academic_authors: Vec<String>,
    /// Reserved for affiliation extraction that does not exist yet
    #[serde(rename = "Company Affiliation(s)")]
    pub company_affiliations: &'static str,
    /// Reserved for email extraction that does not exist yet
    #[serde(rename = "Corresponding Author Email")]
    pub corresponding_email: &'static str,
}

/// Serialize the flagged-author list as a comma-joined string, `"N/A"` when empty
fn join_or_na<S: Serializer>(authors: &[String], serializer: S) -> std::result::Result<S::Ok, S::Error> {
    if authors.is_empty() {
        serializer.serialize_str(NOT_AVAILABLE)
    } else {
        serializer.serialize_str(&authors.join(", "))
    }
}

/// Per-record shape inside the esummary `result` map
#[derive(Debug, Deserialize)]
struct SummaryEntry {
    title: Option<String>,
    pubdate: Option<String>,
    #[serde(default)]
    authors: Vec<Author>,
}

/// Fetch metadata for the given PubMed IDs.
///
/// An empty ID list short-circuits to an empty result without touching the
/// network. Otherwise issues one request for all IDs; non-2xx responses fail
/// with [`PubmedError::Api`], transport failures with
/// [`PubmedError::Network`]. The returned list never exceeds `ids` in length.
pub async fn fetch_details(client: &Client, ids: &[String]) -> Result<Vec<PaperRecord>> {
    fetch_details_at(client, ESUMMARY_URL, ids).await
}

/// Fetch from an explicit endpoint, so tests can point at a local server
async fn fetch_details_at(
    client: &Client,
    endpoint: &str,
    ids: &[String],
) -> Result<Vec<PaperRecord>> {
    if ids.is_empty() {
        warn!("No PubMed IDs provided for fetching details");
        return Ok(Vec::new());
    }

    info!(count = ids.len(), "Fetching details for PubMed IDs");

    let url = build_summary_url(endpoint, ids);
    debug!(url = %url, "Sending esummary request");

    let response = client.get(&url).send().await?;
    let status = response.status();

    if !status.is_success() {
        return Err(PubmedError::Api {
            code: i32::from(status.as_u16()),
            message: format!("esummary error: {}", status),
        });
    }

    let body = response.text().await?;
    let papers = parse_summary_response(&body, ids)?;

    info!(count = papers.len(), "ESummary complete");
    Ok(papers)
}

/// Build the esummary request URL with all IDs comma-joined
fn build_summary_url(endpoint: &str, ids: &[String]) -> String {
    format!(
        "{}?db=pubmed&id={}&retmode=json",
        endpoint,
        urlencoding::encode(&ids.join(","))
    )
}

/// Parse the esummary JSON response into paper records.
///
/// Walks `ids` in order and looks each one up in the `result` map. Entries
/// that are absent or not objects (including the aggregate `uids` array) are
/// skipped rather than treated as records.
fn parse_summary_response(json_str: &str, ids: &[String]) -> Result<Vec<PaperRecord>> {
    let body: Value = serde_json::from_str(json_str)
        .map_err(|e| PubmedError::Parse(format!("Failed to parse esummary response: {}", e)))?;

    let result = match body.get("result").and_then(Value::as_object) {
        Some(map) => map,
        None => return Ok(Vec::new()),
    };

    let mut papers = Vec::new();

    for id in ids {
        let value = match result.get(id) {
            Some(v) if v.is_object() => v,
            _ => continue,
        };

        let entry: SummaryEntry = match serde_json::from_value(value.clone()) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(id = %id, error = %e, "Skipping malformed summary entry");
                continue;
            }
        };

        papers.push(PaperRecord {
            pubmed_id: id.clone(),
            title: entry.title,
            pub_date: entry.pubdate,
            non_academic_authors: classify::non_academic_authors(&entry.authors),
            company_affiliations: NOT_AVAILABLE,
            corresponding_email: NOT_AVAILABLE,
        });
    }

    Ok(papers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    const SAMPLE: &str = r#"{
        "result": {
            "uids": ["1001", "1002"],
            "1001": {
                "title": "Deep learning for slide review",
                "pubdate": "2024 Jan",
                "authors": [
                    {"name": "John Smith", "affiliation": "Stanford University"}
                ]
            },
            "1002": {
                "title": "Assay automation at scale",
                "pubdate": "2023 Nov 12",
                "authors": [
                    {"name": "Jane Doe", "affiliation": "Acme Corp"},
                    {"name": "Alex Roe", "affiliation": ""}
                ]
            }
        }
    }"#;

    #[tokio::test]
    async fn test_empty_id_list_short_circuits() {
        // Client never issues a request, so a plain client is safe here.
        let client = Client::new();
        let papers = fetch_details(&client, &[]).await.unwrap();
        assert!(papers.is_empty());
    }

    #[tokio::test]
    async fn test_server_error_is_api_error_and_nothing_is_written() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", mockito::Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let dir = tempdir().unwrap();
        let output_path = dir.path().join("papers.csv");

        let client = Client::new();
        let result = fetch_details_at(&client, &server.url(), &ids(&["1001"])).await;

        mock.assert_async().await;
        assert!(matches!(
            result,
            Err(PubmedError::Api { code: 500, .. })
        ));
        // The writer only runs after a successful fetch, so the output path
        // is never touched.
        assert!(!output_path.exists());
    }

    #[test]
    fn test_build_summary_url_joins_ids() {
        let url = build_summary_url(ESUMMARY_URL, &ids(&["1001", "1002"]));
        assert!(url.starts_with(ESUMMARY_URL));
        assert!(url.contains("db=pubmed"));
        assert!(url.contains("id=1001%2C1002"));
        assert!(url.contains("retmode=json"));
    }

    #[test]
    fn test_parse_skips_aggregate_uids_key() {
        let papers = parse_summary_response(SAMPLE, &ids(&["1001", "1002"])).unwrap();
        assert_eq!(papers.len(), 2);
        assert_eq!(papers[0].pubmed_id, "1001");
        assert_eq!(papers[1].pubmed_id, "1002");
    }

    #[test]
    fn test_parse_extracts_fields_and_flags_authors() {
        let papers = parse_summary_response(SAMPLE, &ids(&["1001", "1002"])).unwrap();

        assert_eq!(
            papers[0].title.as_deref(),
            Some("Deep learning for slide review")
        );
        assert_eq!(papers[0].pub_date.as_deref(), Some("2024 Jan"));
        assert!(papers[0].non_academic_authors.is_empty());

        assert_eq!(papers[1].non_academic_authors, vec!["Jane Doe"]);
    }

    #[test]
    fn test_placeholder_fields_carry_sentinel() {
        let papers = parse_summary_response(SAMPLE, &ids(&["1001"])).unwrap();
        assert_eq!(papers[0].company_affiliations, NOT_AVAILABLE);
        assert_eq!(papers[0].corresponding_email, NOT_AVAILABLE);
    }

    #[test]
    fn test_parse_preserves_requested_order() {
        let papers = parse_summary_response(SAMPLE, &ids(&["1002", "1001"])).unwrap();
        assert_eq!(papers[0].pubmed_id, "1002");
        assert_eq!(papers[1].pubmed_id, "1001");
    }

    #[test]
    fn test_parse_skips_ids_missing_from_result() {
        let papers = parse_summary_response(SAMPLE, &ids(&["1001", "9999"])).unwrap();
        assert_eq!(papers.len(), 1);
        assert_eq!(papers[0].pubmed_id, "1001");
    }

    #[test]
    fn test_missing_result_map_is_empty() {
        let papers = parse_summary_response("{}", &ids(&["1001"])).unwrap();
        assert!(papers.is_empty());
    }

    #[test]
    fn test_record_without_authors_has_empty_flag_list() {
        let body = r#"{"result": {"uids": ["5"], "5": {"title": "No authors", "pubdate": "2020"}}}"#;
        let papers = parse_summary_response(body, &ids(&["5"])).unwrap();
        assert_eq!(papers.len(), 1);
        assert!(papers[0].non_academic_authors.is_empty());
    }
}
