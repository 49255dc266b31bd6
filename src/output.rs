//! Output Writer
//!
//! Renders enriched paper records either as a CSV file or as one JSON line
//! per record on stdout. Both paths serialize [`PaperRecord`] directly, so
//! they share the same fixed six-field shape: PubmedID, Title, Publication
//! Date, Non-academic Author(s), Company Affiliation(s), Corresponding
//! Author Email.

use crate::error::Result;
use crate::esummary::PaperRecord;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Save records to a CSV file at `path`, overwriting any existing file.
///
/// Writes the header row plus one row per record in arrival order. Repeated
/// calls with the same records produce byte-identical files.
pub fn save_csv(path: &Path, records: &[PaperRecord]) -> Result<()> {
    info!(path = %path.display(), count = records.len(), "Saving results");

    let mut wtr = csv::WriterBuilder::new().has_headers(true).from_path(path)?;

    for record in records {
        wtr.serialize(record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Print each record as one JSON line to the given writer, in arrival order.
pub fn print_records<W: Write>(out: &mut W, records: &[PaperRecord]) -> Result<()> {
    for record in records {
        let line = serde_json::to_string(record)?;
        writeln!(out, "{}", line)?;
    }
    Ok(())
}
