//! Adapters around the external packager tool.
//!
//! The built-in engines all shell out to the same deployment tool with a
//! different `-native` target; the tool itself stays opaque to the rest of
//! the pipeline. Everything an engine knows about the host is injected at
//! construction time.

use super::BundlerEngine;
use crate::bundler::error::{EngineError, EngineResult};
use crate::bundler::params::{keys, ParamValue, ParameterMap};
use crate::bundler::platform::OsFamily;
use crate::bundler::resources::ResourceSet;
use std::path::{Path, PathBuf};
use std::process::Stdio;

/// Default name of the external packager executable.
pub const PACKAGER_TOOL: &str = "javapackager";

/// Parameter keys the adapter maps to dedicated tool flags; everything
/// else string-shaped is forwarded as a `-B` bundler argument.
const STRUCTURAL_KEYS: &[&str] = &[
    keys::APP_NAME,
    keys::MAIN_CLASS,
    keys::VERBOSE,
    keys::APP_RESOURCES,
    keys::APP_RESOURCES_LIST,
    keys::SECONDARY_LAUNCHERS,
];

/// One built-in engine: a named `-native` target of the external packager.
pub struct ExternalPackagerEngine {
    id: &'static str,
    name: &'static str,
    /// OS family this target can be produced on; `None` is host-agnostic.
    target_os: Option<OsFamily>,
    host_os: OsFamily,
    /// Explicit tool path; `PATH` lookup otherwise.
    tool: Option<PathBuf>,
    /// Whether to forward the additional-bundler-resources parameter.
    extended_resources: bool,
}

impl ExternalPackagerEngine {
    fn new(
        id: &'static str,
        name: &'static str,
        target_os: Option<OsFamily>,
        host_os: OsFamily,
        tool: Option<PathBuf>,
    ) -> Self {
        Self {
            id,
            name,
            target_os,
            host_os,
            tool,
            extended_resources: false,
        }
    }

    /// Builds the full argument vector for one invocation.
    pub fn tool_arguments(&self, params: &ParameterMap, output_dir: &Path) -> Vec<String> {
        let mut args = vec![
            "-deploy".to_string(),
            "-native".to_string(),
            self.id.to_string(),
            "-outdir".to_string(),
            output_dir.display().to_string(),
        ];
        if let Some(name) = params.str_value(keys::APP_NAME) {
            args.push("-name".to_string());
            args.push(name.to_string());
        }
        if let Some(main_class) = params.str_value(keys::MAIN_CLASS) {
            args.push("-appclass".to_string());
            args.push(main_class.to_string());
        }
        if let Some(resources) = params.app_resources() {
            args.push("-srcdir".to_string());
            args.push(resources.base_dir().display().to_string());
        }
        if params.flag(keys::VERBOSE) {
            args.push("-v".to_string());
        }

        for key in params.key_set() {
            if STRUCTURAL_KEYS.contains(&key) {
                continue;
            }
            if !self.extended_resources && key == keys::MAC_BUNDLER_RESOURCES {
                continue;
            }
            match params.get(key) {
                Some(ParamValue::Str(value)) => args.push(format!("-B{key}={value}")),
                Some(ParamValue::Bool(value)) => args.push(format!("-B{key}={value}")),
                Some(ParamValue::List(values)) => {
                    args.push(format!("-B{key}={}", values.join(" ")))
                }
                Some(ParamValue::Map(map)) => {
                    for (k, v) in map {
                        args.push(format!("-B{key}={k}={v}"));
                    }
                }
                _ => {}
            }
        }
        args
    }

    /// The tool takes exactly one source directory. When workarounds
    /// appended further resource sets, every set is first copied into a
    /// staging directory which then serves as that single source.
    fn merged_params(&self, params: &ParameterMap) -> EngineResult<ParameterMap> {
        let sets = match params.get(keys::APP_RESOURCES_LIST) {
            Some(ParamValue::ResourceList(sets)) if sets.len() > 1 => sets,
            _ => return Ok(params.clone()),
        };

        let staging = tempfile::TempDir::new().map_err(stage_error)?.keep();
        log::info!(
            "merging {} resource sets into {staging:?} for the {:?} engine",
            sets.len(),
            self.id
        );

        for set in sets {
            for rel in set.files() {
                let target = staging.join(rel);
                if let Some(parent) = target.parent() {
                    std::fs::create_dir_all(parent).map_err(stage_error)?;
                }
                std::fs::copy(set.base_dir().join(rel), &target).map_err(stage_error)?;
            }
        }

        let files: Vec<PathBuf> = sets
            .iter()
            .flat_map(|set| set.files().iter().cloned())
            .collect();
        let mut merged = params.clone();
        merged.insert(
            keys::APP_RESOURCES,
            ParamValue::Resources(ResourceSet::new(&staging, files)),
        );
        Ok(merged)
    }
}

fn stage_error(e: std::io::Error) -> EngineError {
    EngineError::Config {
        message: format!("cannot stage the combined resource sets: {e}"),
        advice: "check the temp directory for space and permissions".to_string(),
    }
}

impl BundlerEngine for ExternalPackagerEngine {
    fn id(&self) -> &str {
        self.id
    }

    fn name(&self) -> &str {
        self.name
    }

    fn validate(&self, params: &ParameterMap) -> EngineResult<bool> {
        if let Some(target) = self.target_os {
            if target != self.host_os {
                return Err(EngineError::UnsupportedPlatform);
            }
        }
        if params.str_value(keys::APP_NAME).is_none() {
            return Err(EngineError::Config {
                message: "no application name configured".to_string(),
                advice: "set app_name in the bundle descriptor".to_string(),
            });
        }
        if params.str_value(keys::MAIN_CLASS).is_none() {
            return Err(EngineError::Config {
                message: "no main class configured".to_string(),
                advice: "set main_class in the bundle descriptor".to_string(),
            });
        }
        match params.app_resources() {
            Some(resources) if !resources.is_empty() => Ok(true),
            _ => Err(EngineError::Config {
                message: "application resources are missing or empty".to_string(),
                advice: "build the application before bundling and check the app output directory"
                    .to_string(),
            }),
        }
    }

    fn execute(&self, params: &ParameterMap, output_dir: &Path) -> EngineResult<()> {
        let tool = match &self.tool {
            Some(path) => path.clone(),
            None => which::which(PACKAGER_TOOL).map_err(|e| EngineError::Config {
                message: format!("packager tool not found: {e}"),
                advice: format!(
                    "install the packaging toolchain or put {PACKAGER_TOOL} on the PATH"
                ),
            })?,
        };

        let params = self.merged_params(params)?;
        let args = self.tool_arguments(&params, output_dir);
        log::info!("running {:?} engine via {tool:?}", self.id);
        log::debug!("packager arguments: {args:?}");

        let status = std::process::Command::new(&tool)
            .args(&args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| EngineError::Config {
                message: format!("cannot spawn {tool:?}: {e}"),
                advice: "check that the packager tool is executable".to_string(),
            })?;

        if !status.success() {
            return Err(EngineError::Config {
                message: format!("packager exited with {status}"),
                advice: "check the packager output above for the underlying failure".to_string(),
            });
        }
        Ok(())
    }

    fn image_root(&self, params: &ParameterMap, output_dir: &Path) -> Option<PathBuf> {
        // installers stage their payload inside the app image folder
        match self.id {
            "exe" | "msi" | "deb" | "rpm" => params
                .str_value(keys::APP_NAME)
                .map(|name| output_dir.join(name)),
            _ => None,
        }
    }
}

/// Registers the built-in engine set, in the order candidates are
/// considered, plus the extended `mac.app` replacement.
pub fn register_builtin_engines(
    registry: &mut super::EngineRegistry,
    host_os: OsFamily,
    tool: Option<&Path>,
) {
    let tool_path = || tool.map(Path::to_path_buf);
    let builtin: [(&'static str, &'static str, Option<OsFamily>); 10] = [
        ("linux.app", "Linux Application Image", Some(OsFamily::Linux)),
        ("deb", "DEB Installer", Some(OsFamily::Linux)),
        ("rpm", "RPM Bundle", Some(OsFamily::Linux)),
        ("windows.app", "Windows Application Image", Some(OsFamily::Windows)),
        ("exe", "EXE Installer", Some(OsFamily::Windows)),
        ("msi", "Windows Installer Package", Some(OsFamily::Windows)),
        ("mac.app", "Mac Application Image", Some(OsFamily::Mac)),
        ("dmg", "Mac DMG Installer", Some(OsFamily::Mac)),
        ("pkg", "Mac PKG Installer", Some(OsFamily::Mac)),
        ("jnlp", "Web Start Descriptor", None),
    ];
    for (id, name, target) in builtin {
        registry.register(Box::new(ExternalPackagerEngine::new(
            id,
            name,
            target,
            host_os,
            tool_path(),
        )));
    }

    let mut extended = ExternalPackagerEngine::new(
        "mac.app",
        "Mac Application Image (extended resources)",
        Some(OsFamily::Mac),
        host_os,
        tool_path(),
    );
    extended.extended_resources = true;
    registry.register_mac_app_replacement(Box::new(extended));
}
