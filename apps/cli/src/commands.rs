//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use licensebundle_core::{BundleReport, ProgressReporter};
use licensebundle_shared::{
    AppConfig, BundleSettings, DependencyRecord, init_config, load_config,
};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// licensebundle — collect third-party license texts into one Markdown file.
#[derive(Parser)]
#[command(
    name = "licensebundle",
    version,
    about = "Bundle the license texts of a dependency manifest into one Markdown file.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Dependency manifest (JSON array). Defaults to `licenses.json`.
    #[arg(short, long)]
    pub manifest: Option<PathBuf>,

    /// Bundle output path. Defaults to `THIRD-PARTY-LICENSES.md`.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Registry source directory. Defaults to `$CARGO_HOME/registry/src`.
    #[arg(long)]
    pub registry_src: Option<PathBuf>,

    /// Without a subcommand the bundle is built.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
///
/// Logs go to stderr; stdout carries only the operator lines printed by
/// [`CliProgress`].
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "licensebundle=error",
        1 => "licensebundle=info",
        2 => "licensebundle=debug",
        _ => "licensebundle=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        None => cmd_bundle(&cli),
        Some(Command::Config { action }) => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(&cli),
        },
    }
}

/// Merge the config file with CLI overrides into runtime settings.
fn resolve_settings(cli: &Cli, mut config: AppConfig) -> Result<BundleSettings> {
    if let Some(src) = &cli.registry_src {
        config.registry.src_dir = Some(src.to_string_lossy().into_owned());
    }

    let mut settings = BundleSettings::try_from(&config)?;
    if let Some(manifest) = &cli.manifest {
        settings.manifest_path = manifest.clone();
    }
    if let Some(output) = &cli.output {
        settings.output_path = output.clone();
    }
    Ok(settings)
}

fn cmd_bundle(cli: &Cli) -> Result<()> {
    let settings = resolve_settings(cli, load_config()?)?;

    info!(
        manifest = %settings.manifest_path.display(),
        output = %settings.output_path.display(),
        registry_src = %settings.registry_src.display(),
        "bundling third-party licenses"
    );

    let reporter = CliProgress::new();
    let report = licensebundle_core::run(&settings, &reporter)?;

    info!(
        total = report.total,
        included = report.included.len(),
        skipped = report.skipped.len(),
        elapsed_ms = report.elapsed.as_millis() as u64,
        "bundle complete"
    );

    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(cli: &Cli) -> Result<()> {
    let config = load_config()?;
    println!("{}", toml::to_string_pretty(&config)?);

    let settings = resolve_settings(cli, config)?;
    println!("# resolved");
    println!("manifest     = {}", settings.manifest_path.display());
    println!("output       = {}", settings.output_path.display());
    println!("registry_src = {}", settings.registry_src.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter: an indicatif bar on stderr plus the operator
/// warning and completion lines on stdout.
struct CliProgress {
    bar: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let bar = ProgressBar::new(0);
        if let Ok(style) = ProgressStyle::with_template("{bar:30.cyan/blue} {pos}/{len} {msg}") {
            bar.set_style(style);
        }
        Self { bar }
    }
}

impl ProgressReporter for CliProgress {
    fn started(&self, total: usize) {
        self.bar.set_length(total as u64);
    }

    fn resolved(&self, record: &DependencyRecord, _license_file: &Path) {
        self.bar.set_message(format!("{} {}", record.name, record.version));
        self.bar.inc(1);
    }

    fn missing(&self, record: &DependencyRecord) {
        self.bar.suspend(|| println!("{}", missing_line(record)));
        self.bar.inc(1);
    }

    fn done(&self, report: &BundleReport) {
        self.bar.finish_and_clear();
        println!("{}", done_line(&report.output_path));
    }
}

/// Operator warning for a dependency without a license file.
fn missing_line(record: &DependencyRecord) -> String {
    format!(
        "⚠️  No license file found for {} {}",
        record.name, record.version
    )
}

/// Completion line, preceded by a blank line.
fn done_line(output_path: &Path) -> String {
    format!("\n✅ License bundle written to: {}", output_path.display())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_builds_bundle() {
        let cli = Cli::try_parse_from(["licensebundle"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.manifest.is_none());
        assert!(cli.output.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn overrides_parse() {
        let cli = Cli::try_parse_from([
            "licensebundle",
            "--manifest",
            "deps.json",
            "-o",
            "NOTICE.md",
            "--registry-src",
            "/opt/cargo/registry/src",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.manifest, Some(PathBuf::from("deps.json")));
        assert_eq!(cli.output, Some(PathBuf::from("NOTICE.md")));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn config_subcommand_parses() {
        let cli = Cli::try_parse_from(["licensebundle", "config", "show"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Config {
                action: ConfigAction::Show
            })
        ));
    }

    #[test]
    fn operator_lines_match_expected_text() {
        let record = DependencyRecord {
            name: "ghost".into(),
            version: "0.0.1".into(),
            license: Some("MIT".into()),
            repository: None,
        };
        assert_eq!(
            missing_line(&record),
            "⚠️  No license file found for ghost 0.0.1"
        );
        assert_eq!(
            done_line(Path::new("THIRD-PARTY-LICENSES.md")),
            "\n✅ License bundle written to: THIRD-PARTY-LICENSES.md"
        );
    }

    #[test]
    fn cli_flags_override_config() {
        let cli = Cli::try_parse_from([
            "licensebundle",
            "--registry-src",
            "/srv/registry/src",
            "--output",
            "dist/LICENSES.md",
        ])
        .unwrap();

        let settings = resolve_settings(&cli, AppConfig::default()).unwrap();
        assert_eq!(settings.registry_src, PathBuf::from("/srv/registry/src"));
        assert_eq!(settings.output_path, PathBuf::from("dist/LICENSES.md"));
        assert_eq!(settings.manifest_path, PathBuf::from("licenses.json"));
    }
}
