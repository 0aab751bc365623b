//! Shared types, error model, and configuration for the license bundler.
//!
//! This crate is the foundation depended on by the other licensebundle crates.
//! It provides:
//! - [`LicenseBundleError`] — the unified error type
//! - Domain types ([`DependencyRecord`], [`DEFAULT_LICENSE_CANDIDATES`], [`source_dir_name`])
//! - Configuration ([`AppConfig`], [`BundleSettings`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, BundleSettings, DefaultsConfig, RegistryConfig, config_dir, config_file_path,
    default_registry_src, init_config, load_config, load_config_from,
};
pub use error::{LicenseBundleError, Result};
pub use types::{DEFAULT_LICENSE_CANDIDATES, DependencyRecord, UNKNOWN_LICENSE, source_dir_name};
