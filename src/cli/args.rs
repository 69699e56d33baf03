//! Command line argument parsing and validation.

use clap::Parser;
use std::path::PathBuf;

/// Native bundling orchestrator for pre-built JVM applications
#[derive(Parser, Debug)]
#[command(
    name = "fxpack",
    version,
    about = "Native bundling orchestrator for pre-built JVM applications",
    long_about = "Drives external bundler engines over a pre-built application: assembles the \
engine parameters from a TOML bundle descriptor, applies toolchain-conditioned workarounds, \
patches generated JNLP descriptors and signs the referenced jars.

Usage:
  fxpack --config bundle.toml
  fxpack --config bundle.toml --bundler deb --fail-on-error
  fxpack --config bundle.toml --bundler jnlp --bundle-arguments '{\"jnlp.outfile\":\"app.jnlp\"}'

Exit code 0 = every selected engine ran per the configured failure policy."
)]
pub struct Args {
    /// Bundle descriptor (TOML)
    #[arg(short, long, value_name = "FILE", default_value = "bundle.toml", env = "FXPACK_CONFIG")]
    pub config: PathBuf,

    /// Engine to run (`deb`, `mac.app`, ...) or ALL
    #[arg(short, long, value_name = "ID", default_value = "ALL")]
    pub bundler: String,

    /// Directory holding the built application (jars, resources)
    #[arg(long, value_name = "DIR", default_value = "target/app")]
    pub app_output_dir: PathBuf,

    /// Directory the native artifacts are produced into
    #[arg(long, value_name = "DIR", default_value = "target/native")]
    pub native_output_dir: PathBuf,

    /// Working directory for external tools
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub project_root: PathBuf,

    /// Explicit java executable used to probe the toolchain version
    #[arg(long, value_name = "PATH")]
    pub java: Option<PathBuf>,

    /// Toolchain version override (for example `1.8.0_92`); skips probing
    #[arg(long, value_name = "VERSION")]
    pub toolchain_version: Option<String>,

    /// Explicit packager tool; `PATH` lookup otherwise
    #[arg(long, value_name = "PATH")]
    pub packager: Option<PathBuf>,

    /// Extra bundle arguments as an inline JSON object, merged over the
    /// descriptor's bundle_arguments
    #[arg(long, value_name = "JSON")]
    pub bundle_arguments: Option<String>,

    /// Promote per-engine errors and missed candidates to fatal
    #[arg(long)]
    pub fail_on_error: bool,

    /// Verbose engine output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.bundler.trim().is_empty() {
            return Err("Bundler id cannot be empty".to_string());
        }
        if let Some(raw) = &self.toolchain_version {
            if crate::bundler::platform::ToolchainVersion::parse(raw).is_none() {
                return Err(format!("Invalid toolchain version: {raw}"));
            }
        }
        Ok(())
    }
}
