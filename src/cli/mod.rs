//! Command line interface for the bundling orchestrator.

mod args;

pub use args::Args;

use crate::bundler::engine::{external, EngineRegistry};
use crate::bundler::orchestrator::{Orchestrator, OutputPaths};
use crate::bundler::platform::{OsFamily, PlatformInfo, ToolchainVersion};
use crate::bundler::settings::BundleConfig;
use crate::error::{CliError, Result};
use std::collections::BTreeMap;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let mut config = BundleConfig::load(&args.config).await.map_err(|e| {
        CliError::ConfigUnreadable {
            path: args.config.display().to_string(),
            reason: e.to_string(),
        }
    })?;

    if args.fail_on_error {
        config.switches.fail_on_error = true;
    }
    if args.verbose {
        config.app.verbose = true;
    }
    if let Some(raw) = &args.bundle_arguments {
        merge_inline_arguments(&mut config.bundle_arguments, raw)?;
    }

    let platform = match &args.toolchain_version {
        Some(raw) => {
            // validated already, parse cannot fail here
            let toolchain = ToolchainVersion::parse(raw).unwrap_or_default();
            PlatformInfo::new(OsFamily::current(), toolchain)
        }
        None => PlatformInfo::detect(args.java.as_deref()).await?,
    };
    log::debug!("bundling on {platform:?}");

    let mut registry = EngineRegistry::new();
    if config.switches.only_custom_engines {
        log::info!("built-in engines disabled, expecting custom registrations only");
    } else {
        external::register_builtin_engines(&mut registry, platform.os, args.packager.as_deref());
    }

    let paths = OutputPaths {
        app_output_dir: args.app_output_dir.clone(),
        native_output_dir: args.native_output_dir.clone(),
        project_root: args.project_root.clone(),
    };

    let orchestrator = Orchestrator::new(config, platform, registry, paths, args.bundler.clone())
        .with_packager_tool(args.packager.clone());
    let report = orchestrator.run().await?;
    log::info!("bundling finished, executed engines: {:?}", report.executed);
    Ok(0)
}

/// Merges an inline JSON object of bundle arguments over the descriptor's.
///
/// Inline values win; overwrites are logged so a surprising precedence is
/// at least visible.
fn merge_inline_arguments(
    arguments: &mut BTreeMap<String, String>,
    raw: &str,
) -> Result<()> {
    let inline: BTreeMap<String, String> = serde_json::from_str(raw)?;
    for (key, value) in inline {
        if arguments.contains_key(&key) {
            log::warn!("inline bundle argument {key:?} overrides the descriptor value");
        }
        arguments.insert(key, value);
    }
    Ok(())
}
