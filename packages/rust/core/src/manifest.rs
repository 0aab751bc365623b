//! Dependency manifest loading.
//!
//! The manifest is a JSON array of objects with `name`, `version`, `license`
//! and an optional `repository`. Shape errors and empty identifiers are
//! rejected here so later stages can trust every record.

use std::path::Path;

use tracing::{debug, instrument};

use licensebundle_shared::{DependencyRecord, LicenseBundleError, Result};

/// Read and validate the manifest at `path`, preserving record order.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_manifest(path: &Path) -> Result<Vec<DependencyRecord>> {
    let content = std::fs::read_to_string(path).map_err(|e| LicenseBundleError::io(path, e))?;
    let records = parse_manifest(&content)
        .map_err(|e| LicenseBundleError::manifest(path, e.to_string()))?;
    validate_records(&records)?;

    debug!(records = records.len(), "manifest loaded");
    Ok(records)
}

/// Parse manifest JSON without touching the filesystem.
pub fn parse_manifest(content: &str) -> serde_json::Result<Vec<DependencyRecord>> {
    serde_json::from_str(content)
}

fn validate_records(records: &[DependencyRecord]) -> Result<()> {
    for (index, record) in records.iter().enumerate() {
        if record.name.trim().is_empty() {
            return Err(LicenseBundleError::validation(
                index,
                "`name` must not be empty",
            ));
        }
        if record.version.trim().is_empty() {
            return Err(LicenseBundleError::validation(
                index,
                format!("{}: `version` must not be empty", record.name),
            ));
        }
        // Both fields become a path component under each registry root.
        for (field, value) in [("name", &record.name), ("version", &record.version)] {
            if !is_path_safe(value) {
                return Err(LicenseBundleError::validation(
                    index,
                    format!("`{field}` {value:?} must not contain path separators or `..`"),
                ));
            }
        }
    }
    Ok(())
}

fn is_path_safe(value: &str) -> bool {
    !value.contains(['/', '\\']) && !value.contains("..")
}
