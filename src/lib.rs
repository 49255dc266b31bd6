//! # rustpubmed
//!
//! PubMed Paper Fetcher - flags non-academic authors by affiliation
//!
//! ## Modules
//!
//! - [`esearch`] - PubMed esearch client (query -> PubMed IDs)
//! - [`esummary`] - PubMed esummary client (IDs -> paper records)
//! - [`classify`] - Non-academic author heuristic
//! - [`output`] - CSV file / stdout rendering
//! - [`error`] - Custom error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rustpubmed::{esearch, esummary};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = reqwest::Client::new();
//!     let ids = esearch::fetch_ids(&client, "crispr delivery").await?;
//!     let papers = esummary::fetch_details(&client, &ids).await?;
//!     println!("Found {} papers", papers.len());
//!     Ok(())
//! }
//! ```

pub mod classify;
pub mod error;
pub mod esearch;
pub mod esummary;
pub mod output;

pub use error::{PubmedError, Result};
