//! licensebundle CLI — third-party license bundler.
//!
//! Reads a dependency manifest, finds each dependency's license file in the
//! local Cargo registry cache, and writes one Markdown bundle.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
