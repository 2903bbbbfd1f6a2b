use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use pyinfer::{CanonicalDocument, InferResult};
use pyinfer_util::Diagnostics;
use tracing_subscriber::EnvFilter;

/// Read a Python project's configuration and output a PEP 621 `pyproject.toml`
#[derive(Parser)]
#[clap(version)]
struct Opts {
    /// Directory from which to read configuration [default: current directory]
    input_directory: Option<PathBuf>,

    /// Path to which to write TOML [default: standard output]
    #[clap(short, long)]
    output: Option<PathBuf>,
}

fn main() -> InferResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let opts = Opts::parse();
    let directory = match opts.input_directory {
        Some(directory) => directory,
        None => std::env::current_dir().context("failed to determine the current directory")?,
    };

    let mut diagnostics = Diagnostics::new();
    let document = CanonicalDocument::from_directory(&directory, &mut diagnostics)?;
    let toml = document.to_toml_string()?;

    match opts.output {
        None => print!("{toml}"),
        Some(output) => {
            if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            fs::write(&output, toml)
                .with_context(|| format!("failed to write {}", output.display()))?;
        }
    }
    Ok(())
}
