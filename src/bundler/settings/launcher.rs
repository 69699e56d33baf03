//! Secondary launcher definitions.

use std::collections::BTreeMap;
use std::path::PathBuf;

/// An additional executable bundled alongside the primary launcher.
///
/// Everything except `app_name` is optional; unset fields fall back to the
/// engine's defaults rather than inheriting from the primary launcher. The
/// name must differ from the primary launcher's and from every other
/// secondary, since all launchers land in the same bundle directory.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct SecondaryLauncher {
    /// Name of this launcher's executable. Required and unique.
    pub app_name: String,

    /// Entry point class, when different from the primary launcher.
    #[serde(default)]
    pub main_class: Option<String>,

    /// Jar to launch, when different from the primary jar.
    #[serde(default)]
    pub main_jar: Option<PathBuf>,

    /// Release version of this launcher.
    #[serde(default)]
    pub native_release_version: Option<String>,

    /// Vendor override.
    #[serde(default)]
    pub vendor: Option<String>,

    /// Identifier override.
    #[serde(default)]
    pub identifier: Option<String>,

    /// Classpath override; may be completely different when launching
    /// another jar.
    #[serde(default)]
    pub classpath: Option<String>,

    /// JVM system properties for this launcher.
    #[serde(default)]
    pub jvm_properties: BTreeMap<String, String>,

    /// JVM flags for this launcher.
    #[serde(default)]
    pub jvm_args: Vec<String>,

    /// User-overridable JVM arguments for this launcher.
    #[serde(default)]
    pub user_jvm_args: BTreeMap<String, String>,

    /// Program arguments for this launcher.
    #[serde(default)]
    pub launcher_args: Vec<String>,

    /// Desktop shortcut hint.
    #[serde(default)]
    pub need_shortcut: bool,

    /// System menu entry hint.
    #[serde(default)]
    pub need_menu: bool,
}
