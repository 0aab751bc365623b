//! End-to-end bundle run: manifest → resolve → render → write.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use sha2::{Digest, Sha256};
use tracing::{debug, info, instrument, warn};

use licensebundle_shared::{BundleSettings, DependencyRecord, LicenseBundleError, Result};

use crate::manifest::load_manifest;
use crate::registry::{LicenseLocator, read_license_text};
use crate::render::{render_document, render_entry};

/// Result of a completed bundle run.
#[derive(Debug, Clone)]
pub struct BundleReport {
    /// Path the bundle was written to.
    pub output_path: PathBuf,
    /// Number of records in the manifest.
    pub total: usize,
    /// Records that produced an entry block, in manifest order.
    pub included: Vec<DependencyRecord>,
    /// Records with no discoverable license file, in manifest order.
    pub skipped: Vec<DependencyRecord>,
    /// Hex SHA-256 of the written bundle.
    pub sha256: String,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// The rendered bundle before it is written anywhere.
#[derive(Debug, Clone)]
pub struct RenderedBundle {
    /// Complete Markdown document.
    pub document: String,
    /// Records that produced an entry block.
    pub included: Vec<DependencyRecord>,
    /// Records that were skipped.
    pub skipped: Vec<DependencyRecord>,
}

/// Progress callback for reporting bundle status to the operator.
pub trait ProgressReporter: Send + Sync {
    /// Called once the manifest is loaded.
    fn started(&self, total: usize);
    /// Called when a record's license file was found and embedded.
    fn resolved(&self, record: &DependencyRecord, license_file: &Path);
    /// Called when a record has no discoverable license file.
    fn missing(&self, record: &DependencyRecord);
    /// Called after the bundle has been written.
    fn done(&self, report: &BundleReport);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn started(&self, _total: usize) {}
    fn resolved(&self, _record: &DependencyRecord, _license_file: &Path) {}
    fn missing(&self, _record: &DependencyRecord) {}
    fn done(&self, _report: &BundleReport) {}
}

/// Run the bundler: load the manifest, resolve every record, and write the
/// bundle to `settings.output_path`.
///
/// Unresolved records are skipped and reported through `reporter`; a missing
/// or malformed manifest aborts before anything is written.
#[instrument(skip_all, fields(
    manifest = %settings.manifest_path.display(),
    output = %settings.output_path.display()
))]
pub fn run(settings: &BundleSettings, reporter: &dyn ProgressReporter) -> Result<BundleReport> {
    let start = Instant::now();

    let records = load_manifest(&settings.manifest_path)?;
    reporter.started(records.len());

    let locator = LicenseLocator::from_registry_src(&settings.registry_src, &settings.candidates)?;
    let rendered = render_bundle(&records, &locator, reporter)?;

    write_atomic(&settings.output_path, &rendered.document)?;

    let report = BundleReport {
        output_path: settings.output_path.clone(),
        total: records.len(),
        included: rendered.included,
        skipped: rendered.skipped,
        sha256: format!("{:x}", Sha256::digest(rendered.document.as_bytes())),
        elapsed: start.elapsed(),
    };

    info!(
        included = report.included.len(),
        skipped = report.skipped.len(),
        sha256 = %report.sha256,
        "license bundle written"
    );
    reporter.done(&report);

    Ok(report)
}

/// Resolve and render every record in manifest order, entirely in memory.
pub fn render_bundle(
    records: &[DependencyRecord],
    locator: &LicenseLocator,
    reporter: &dyn ProgressReporter,
) -> Result<RenderedBundle> {
    let mut entries = Vec::with_capacity(records.len());
    let mut included = Vec::new();
    let mut skipped = Vec::new();

    for record in records {
        let Some(license_file) = locator.find_license_file(&record.name, &record.version) else {
            warn!(name = %record.name, version = %record.version, "no license file found");
            reporter.missing(record);
            skipped.push(record.clone());
            continue;
        };

        let license_text = read_license_text(&license_file)?;
        entries.push(render_entry(record, &license_text));
        reporter.resolved(record, &license_file);
        included.push(record.clone());
    }

    Ok(RenderedBundle {
        document: render_document(&entries),
        included,
        skipped,
    })
}

/// Write `content` to `path` through a sibling temp file and a rename.
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent).map_err(|e| LicenseBundleError::io(parent, e))?;

    let file_name = path.file_name().ok_or_else(|| {
        LicenseBundleError::config(format!("invalid output path: {}", path.display()))
    })?;
    let temp = parent.join(format!(".{}.tmp", file_name.to_string_lossy()));

    std::fs::write(&temp, content).map_err(|e| LicenseBundleError::io(&temp, e))?;
    std::fs::rename(&temp, path).map_err(|e| LicenseBundleError::io(path, e))?;

    debug!(path = %path.display(), size = content.len(), "wrote bundle");
    Ok(())
}
