//! Application identity and entry-point settings.

use super::SecondaryLauncher;
use crate::bundler::error::{Error, Result};
use std::collections::BTreeMap;
use std::path::PathBuf;

fn default_version() -> String {
    "1.0".to_string()
}

/// Identity, entry point and runtime arguments of the application being
/// bundled, plus its secondary launchers.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct AppSettings {
    /// Name of the packaged executable. Also decides icon lookup and the
    /// generated runtime cfg-file name.
    pub app_name: String,

    /// Application identifier; used as bundle display id on macOS and as
    /// GUID source by some installers.
    #[serde(default)]
    pub identifier: Option<String>,

    /// Vendor of the application. Required by several installer formats.
    pub vendor: String,

    /// Release version handed to the native installers.
    ///
    /// Most installer formats only accept digits and dots; the orchestrator
    /// sanitizes this value unless sanitizing is explicitly skipped.
    #[serde(default = "default_version")]
    pub native_release_version: String,

    /// Entry point class launched at runtime.
    pub main_class: String,

    /// Primary application jar, relative to the app output directory.
    pub main_jar: PathBuf,

    /// Launcher classpath override.
    #[serde(default)]
    pub classpath: Option<String>,

    /// JVM system properties baked into the bundle.
    #[serde(default)]
    pub jvm_properties: BTreeMap<String, String>,

    /// JVM flags passed at invocation time.
    #[serde(default)]
    pub jvm_args: Vec<String>,

    /// User-overridable JVM arguments (key and value are concatenated
    /// without a joining character at launch).
    #[serde(default)]
    pub user_jvm_args: BTreeMap<String, String>,

    /// Program arguments passed to the application when started.
    #[serde(default)]
    pub launcher_args: Vec<String>,

    /// Desktop shortcut hint.
    #[serde(default)]
    pub need_shortcut: bool,

    /// System menu entry hint.
    #[serde(default)]
    pub need_menu: bool,

    /// Verbose engine output.
    #[serde(default)]
    pub verbose: bool,

    /// Extra files copied into the app output folder before resources are
    /// gathered (README, licenses, third-party tools).
    #[serde(default)]
    pub additional_app_resources: Option<PathBuf>,

    /// Extra files for the bundler image roots (non-overriding files like
    /// images or separated modules). Copied per engine.
    #[serde(default)]
    pub additional_bundler_resources: Option<PathBuf>,

    /// Additional executables bundled alongside the primary launcher.
    #[serde(default)]
    pub secondary_launchers: Vec<SecondaryLauncher>,
}

impl AppSettings {
    /// Validates launcher naming and returns all launcher names, primary
    /// first.
    ///
    /// Every secondary launcher needs its own non-empty name, and no two of
    /// the N+1 names (primary + secondaries) may be equal: a duplicate name
    /// would overwrite the primary launcher inside the bundle.
    pub fn validated_launcher_names(&self) -> Result<Vec<String>> {
        if self
            .secondary_launchers
            .iter()
            .any(|launcher| launcher.app_name.trim().is_empty())
        {
            return Err(Error::LauncherConfiguration(
                "not all secondary launchers have been configured properly, appName is missing"
                    .to_string(),
            ));
        }

        let mut names = Vec::with_capacity(self.secondary_launchers.len() + 1);
        names.push(self.app_name.clone());
        names.extend(
            self.secondary_launchers
                .iter()
                .map(|launcher| launcher.app_name.clone()),
        );

        let unique: std::collections::BTreeSet<&String> = names.iter().collect();
        if unique.len() != names.len() {
            return Err(Error::LauncherConfiguration(
                "secondary launcher needs to have a different name, please adjust appName inside your configuration"
                    .to_string(),
            ));
        }

        Ok(names)
    }
}
