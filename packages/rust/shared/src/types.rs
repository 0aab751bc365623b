//! Core domain types for the license bundler.

use serde::{Deserialize, Serialize};

/// License file names tried inside a dependency's source directory, in
/// priority order. The first one present wins.
pub const DEFAULT_LICENSE_CANDIDATES: [&str; 4] =
    ["LICENSE", "LICENSE-MIT", "LICENSE-APACHE", "COPYING"];

/// Rendered in place of a license expression the manifest leaves null.
pub const UNKNOWN_LICENSE: &str = "UNKNOWN";

/// Directory name a package is unpacked under in a registry root
/// (`<name>-<version>`).
pub fn source_dir_name(name: &str, version: &str) -> String {
    format!("{name}-{version}")
}

// ---------------------------------------------------------------------------
// DependencyRecord
// ---------------------------------------------------------------------------

/// One entry of the dependency manifest (`licenses.json`).
///
/// Fields beyond these four are ignored, so the output of
/// `cargo license --json` can be fed in as-is. Crates that only declare a
/// `license-file` come through with `"license": null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyRecord {
    /// Package name as published in the registry.
    pub name: String,
    /// Exact published version.
    pub version: String,
    /// SPDX-like license expression. The key must be present; `null` is allowed.
    #[serde(deserialize_with = "Option::deserialize")]
    pub license: Option<String>,
    /// Source repository URL, if the package declares one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
}

impl DependencyRecord {
    /// The license expression, or [`UNKNOWN_LICENSE`] when null or empty.
    pub fn license_expr(&self) -> &str {
        self.license
            .as_deref()
            .filter(|l| !l.is_empty())
            .unwrap_or(UNKNOWN_LICENSE)
    }

    /// The repository URL, treating an empty string as absent.
    pub fn repository_url(&self) -> Option<&str> {
        self.repository.as_deref().filter(|r| !r.is_empty())
    }
}
