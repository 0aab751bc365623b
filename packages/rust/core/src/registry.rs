//! License file discovery in the local package cache.
//!
//! A registry source directory (e.g. `~/.cargo/registry/src`) holds one
//! subdirectory per registry index; each of those is a registry root
//! containing unpacked `<name>-<version>` package directories.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument, warn};

use licensebundle_shared::{LicenseBundleError, Result, source_dir_name};

/// Resolves dependency license files across an ordered set of registry roots.
#[derive(Debug, Clone)]
pub struct LicenseLocator {
    roots: Vec<PathBuf>,
    candidates: Vec<String>,
}

impl LicenseLocator {
    /// Build a locator over explicit roots and candidate file names.
    pub fn new(roots: Vec<PathBuf>, candidates: Vec<String>) -> Self {
        Self { roots, candidates }
    }

    /// Build a locator over every registry root found under `src_dir`.
    pub fn from_registry_src(src_dir: &Path, candidates: &[String]) -> Result<Self> {
        Ok(Self::new(registry_roots(src_dir)?, candidates.to_vec()))
    }

    /// Find the license file for `name` at `version`.
    ///
    /// Roots are searched in order. Inside a matching `<name>-<version>`
    /// directory the candidates are tried in priority order and the first
    /// regular file wins. A matching directory without any candidate does not
    /// end the search; later roots are still tried.
    #[instrument(skip(self))]
    pub fn find_license_file(&self, name: &str, version: &str) -> Option<PathBuf> {
        let dir_name = source_dir_name(name, version);

        for root in &self.roots {
            let package_dir = root.join(&dir_name);
            if !package_dir.is_dir() {
                continue;
            }

            let found = self
                .candidates
                .iter()
                .map(|candidate| package_dir.join(candidate))
                .find(|path| path.is_file());

            match found {
                Some(path) => {
                    debug!(path = %path.display(), "license file found");
                    return Some(path);
                }
                None => {
                    debug!(dir = %package_dir.display(), "no license candidate in package directory");
                }
            }
        }

        None
    }
}

/// List the immediate subdirectories of `src_dir`, sorted by path.
///
/// A missing `src_dir` yields no roots rather than an error, so every record
/// is reported as unresolved instead of aborting the run.
pub fn registry_roots(src_dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = match std::fs::read_dir(src_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(path = %src_dir.display(), "registry source directory does not exist");
            return Ok(Vec::new());
        }
        Err(e) => return Err(LicenseBundleError::io(src_dir, e)),
    };

    let mut roots = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| LicenseBundleError::io(src_dir, e))?;
        let path = entry.path();
        if path.is_dir() {
            roots.push(path);
        }
    }
    roots.sort();

    debug!(count = roots.len(), path = %src_dir.display(), "registry roots discovered");
    Ok(roots)
}

/// Read a license file, dropping any bytes that are not valid UTF-8.
pub fn read_license_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| LicenseBundleError::io(path, e))?;

    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    Ok(text)
}
