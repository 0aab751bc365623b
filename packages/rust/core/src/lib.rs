//! The license bundler: turns a dependency manifest into a single Markdown
//! document of third-party license texts.
//!
//! [`bundle::run`] ties together [`manifest`] loading, [`registry`] lookup
//! and [`render`]ing.

pub mod bundle;
pub mod manifest;
pub mod registry;
pub mod render;

pub use bundle::{BundleReport, ProgressReporter, RenderedBundle, SilentProgress, render_bundle, run};
pub use manifest::{load_manifest, parse_manifest};
pub use registry::{LicenseLocator, read_license_text, registry_roots};
pub use render::{BUNDLE_HEADER, render_document, render_entry};
