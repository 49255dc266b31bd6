//! Affiliation Classifier
//!
//! Flags authors whose affiliation text lacks academic keywords. This is a
//! substring heuristic, not a trained classifier: a single keyword hit
//! anywhere in the affiliation suppresses the flag, even when the academic
//! name is incidental ("Google, near Stanford University" counts as
//! academic). Authors with no affiliation text are treated as unknown and
//! never flagged.

use serde::{Deserialize, Serialize};

/// Keywords marking an affiliation as academic (matched case-insensitively)
const ACADEMIC_KEYWORDS: &[&str] = &["university", "institute", "college", "academy"];

/// Display name used when the summary endpoint omits the author name
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// One author entry from the esummary `authors` array
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Author {
    /// Display name; absent entries render as [`UNKNOWN_AUTHOR`]
    pub name: Option<String>,
    /// Free-text affiliation, possibly empty or absent
    #[serde(default)]
    pub affiliation: Option<String>,
}

impl Author {
    /// Display name, falling back to the `"Unknown"` sentinel.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNKNOWN_AUTHOR)
    }
}

/// Return the names of authors whose affiliation looks non-academic.
///
/// An author is flagged when the affiliation text is non-empty AND contains
/// none of the academic keywords. Pure and synchronous; order follows the
/// input author list.
pub fn non_academic_authors(authors: &[Author]) -> Vec<String> {
    authors
        .iter()
        .filter(|author| {
            let affiliation = author
                .affiliation
                .as_deref()
                .unwrap_or_default()
                .to_lowercase();
            !affiliation.is_empty()
                && !ACADEMIC_KEYWORDS
                    .iter()
                    .any(|keyword| affiliation.contains(keyword))
        })
        .map(|author| author.display_name().to_string())
        .collect()
}
