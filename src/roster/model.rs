use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::foundation::error::{CertigenError, CertigenResult};

/// One roster entry: the identity fields for a single certificate.
///
/// Rows are immutable once read; each row drives exactly one render attempt
/// and at most one delivery attempt.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct RosterRow {
    /// Recipient name as printed on the certificate.
    #[serde(rename = "Name")]
    pub name: String,
    /// Institution name as printed on the certificate.
    #[serde(rename = "College Name")]
    pub institution: String,
    /// Delivery address for the finished artifact.
    #[serde(rename = "Email")]
    pub email: String,
    /// Optional roll number; disambiguates output filenames and is embedded
    /// in the QR payload when present.
    #[serde(rename = "Roll_No", default)]
    pub roll_number: Option<String>,
}

/// Read a roster CSV into rows.
///
/// Column headers are exact-match and case-sensitive: `Name`, `College Name`,
/// `Email`, and optionally `Roll_No`. An empty roll-number cell is normalized
/// to `None`.
pub fn load_roster(path: impl AsRef<Path>) -> CertigenResult<Vec<RosterRow>> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| CertigenError::roster(format!("open '{}': {e}", path.display())))?;

    let mut rows = Vec::new();
    for (idx, result) in reader.deserialize::<RosterRow>().enumerate() {
        let mut row =
            result.map_err(|e| CertigenError::roster(format!("row {}: {e}", idx + 1)))?;
        if row
            .roll_number
            .as_deref()
            .is_some_and(|r| r.trim().is_empty())
        {
            row.roll_number = None;
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Reject a roster that would produce ambiguous or undeliverable rows.
///
/// Blank `Name` or `Email` cells and duplicate `Email` values abort the batch
/// up front; nothing is rendered for an invalid roster.
pub fn validate_roster(rows: &[RosterRow]) -> CertigenResult<()> {
    let mut seen = HashSet::new();
    for (idx, row) in rows.iter().enumerate() {
        let line = idx + 1;
        if row.name.trim().is_empty() {
            return Err(CertigenError::roster(format!("row {line}: blank Name")));
        }
        if row.email.trim().is_empty() {
            return Err(CertigenError::roster(format!("row {line}: blank Email")));
        }
        if !seen.insert(row.email.as_str()) {
            return Err(CertigenError::roster(format!(
                "row {line}: duplicate Email '{}'",
                row.email
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/roster/model.rs"]
mod tests;
