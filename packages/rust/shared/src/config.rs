//! Application configuration for the license bundler.
//!
//! User config lives at `~/.licensebundle/licensebundle.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LicenseBundleError, Result};
use crate::types::DEFAULT_LICENSE_CANDIDATES;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "licensebundle.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".licensebundle";

// ---------------------------------------------------------------------------
// Config structs (matching licensebundle.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Input/output defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Where and how license files are looked up.
    #[serde(default)]
    pub registry: RegistryConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Dependency manifest path, relative to the working directory.
    #[serde(default = "default_manifest")]
    pub manifest: String,

    /// Bundle output path, relative to the working directory.
    #[serde(default = "default_output")]
    pub output: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            manifest: default_manifest(),
            output: default_output(),
        }
    }
}

fn default_manifest() -> String {
    "licenses.json".into()
}
fn default_output() -> String {
    "THIRD-PARTY-LICENSES.md".into()
}

/// `[registry]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Registry source directory whose subdirectories are the registry roots.
    /// Unset means the local Cargo cache (see [`default_registry_src`]).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src_dir: Option<String>,

    /// License file names to try, in priority order.
    #[serde(default = "default_candidates")]
    pub candidates: Vec<String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            src_dir: None,
            candidates: default_candidates(),
        }
    }
}

fn default_candidates() -> Vec<String> {
    DEFAULT_LICENSE_CANDIDATES
        .iter()
        .map(|c| (*c).to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Bundle settings (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime bundle configuration — merged from config file + CLI flags.
#[derive(Debug, Clone)]
pub struct BundleSettings {
    /// Dependency manifest to read.
    pub manifest_path: PathBuf,
    /// Bundle file to write.
    pub output_path: PathBuf,
    /// Registry source directory (e.g. `~/.cargo/registry/src`).
    pub registry_src: PathBuf,
    /// License file names in priority order.
    pub candidates: Vec<String>,
}

impl TryFrom<&AppConfig> for BundleSettings {
    type Error = LicenseBundleError;

    fn try_from(config: &AppConfig) -> Result<Self> {
        let registry_src = match &config.registry.src_dir {
            Some(dir) => PathBuf::from(dir),
            None => default_registry_src()?,
        };

        if config.registry.candidates.is_empty() {
            return Err(LicenseBundleError::config(
                "registry.candidates must list at least one file name",
            ));
        }

        Ok(Self {
            manifest_path: PathBuf::from(&config.defaults.manifest),
            output_path: PathBuf::from(&config.defaults.output),
            registry_src,
            candidates: config.registry.candidates.clone(),
        })
    }
}

/// The local Cargo registry source cache: `$CARGO_HOME/registry/src`, or
/// `~/.cargo/registry/src` when `CARGO_HOME` is unset.
pub fn default_registry_src() -> Result<PathBuf> {
    let cargo_home = match std::env::var_os("CARGO_HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home),
        _ => dirs::home_dir()
            .ok_or_else(|| LicenseBundleError::config("could not determine home directory"))?
            .join(".cargo"),
    };
    Ok(cargo_home.join("registry").join("src"))
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.licensebundle/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| LicenseBundleError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.licensebundle/licensebundle.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| LicenseBundleError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        LicenseBundleError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| LicenseBundleError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| LicenseBundleError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| LicenseBundleError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
