//! The parameter map shared between the orchestrator and bundler engines.
//!
//! Keys are plain strings because that is the contract external engines
//! understand; values are a small closed set of shapes. Cross-cutting
//! "workaround already ran" state deliberately lives outside the map in
//! [`WorkaroundContext`] so engines never observe it.

use crate::bundler::error::{Error, Result};
use crate::bundler::resources::ResourceSet;
use std::collections::BTreeMap;

/// Well-known parameter keys understood by the standard engines.
pub mod keys {
    /// Verbose engine output
    pub const VERBOSE: &str = "verbose";
    /// Application display name
    pub const APP_NAME: &str = "name";
    /// Release version as handed to installers
    pub const VERSION: &str = "appVersion";
    /// Vendor / publisher
    pub const VENDOR: &str = "vendor";
    /// Application identifier (bundle id, installer GUID source)
    pub const IDENTIFIER: &str = "identifier";
    /// Desktop shortcut hint
    pub const SHORTCUT_HINT: &str = "shortcutHint";
    /// System menu entry hint
    pub const MENU_HINT: &str = "menuHint";
    /// Entry point class
    pub const MAIN_CLASS: &str = "mainClass";
    /// Primary application jar
    pub const MAIN_JAR: &str = "mainJar";
    /// Launcher classpath override
    pub const CLASSPATH: &str = "classpath";
    /// JVM system properties
    pub const JVM_PROPERTIES: &str = "jvmProperties";
    /// JVM flags
    pub const JVM_OPTIONS: &str = "jvmOptions";
    /// User-overridable JVM arguments
    pub const USER_JVM_OPTIONS: &str = "userJvmOptions";
    /// Program arguments passed at launch
    pub const ARGUMENTS: &str = "arguments";
    /// Primary application payload
    pub const APP_RESOURCES: &str = "appResources";
    /// Additional payload sets appended by workarounds
    pub const APP_RESOURCES_LIST: &str = "appResourcesList";
    /// Secondary launcher definitions (list of nested maps)
    pub const SECONDARY_LAUNCHERS: &str = "secondaryLaunchers";
    /// Marker requesting a runtime-less bundle
    pub const RUNTIME: &str = "runtime";
    /// Forces the legacy property-file cfg format
    pub const LAUNCHER_CFG_FORMAT: &str = "launcher-cfg-format";
    /// Mandatory output file of the jnlp engine
    pub const JNLP_OUTFILE: &str = "jnlp.outfile";
    /// All-permissions marker of the jnlp engine; spelled (typo included)
    /// the way the packager expects it
    pub const JNLP_ALL_PERMISSIONS: &str = "jnlp.allPermisions";
    /// Resource directory handed to the extended mac.app engine
    pub const MAC_BUNDLER_RESOURCES: &str = "mac.app.additionalBundlerResources";
}

/// A value stored in the parameter map.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// A plain string
    Str(String),
    /// A boolean flag
    Bool(bool),
    /// A list of strings
    List(Vec<String>),
    /// A nested string-to-string map
    Map(BTreeMap<String, String>),
    /// A list of nested parameter maps (secondary launchers)
    MapList(Vec<ParameterMap>),
    /// An application payload
    Resources(ResourceSet),
    /// Multiple payload sets
    ResourceList(Vec<ResourceSet>),
}

impl ParamValue {
    /// String view, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Boolean view; string values spell booleans the way user-supplied
    /// bundle-arguments do.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(b) => Some(*b),
            ParamValue::Str(s) => Some(s.eq_ignore_ascii_case("true")),
            _ => None,
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

/// String-keyed parameter map threaded through one orchestration pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterMap {
    entries: BTreeMap<String, ParamValue>,
}

impl ParameterMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, replacing any previous one.
    pub fn insert(&mut self, key: &str, value: impl Into<ParamValue>) {
        self.entries.insert(key.to_string(), value.into());
    }

    /// Inserts only when the value is present.
    pub fn insert_opt(&mut self, key: &str, value: Option<impl Into<ParamValue>>) {
        if let Some(value) = value {
            self.insert(key, value);
        }
    }

    /// Looks up a raw value.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.get(key)
    }

    /// Looks up a string value.
    pub fn str_value(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ParamValue::as_str)
    }

    /// Whether a flag-like value is set to true.
    pub fn flag(&self, key: &str) -> bool {
        self.get(key).and_then(ParamValue::as_bool).unwrap_or(false)
    }

    /// Whether the key exists at all.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// The primary application payload, if assembled.
    pub fn app_resources(&self) -> Option<&ResourceSet> {
        match self.get(keys::APP_RESOURCES) {
            Some(ParamValue::Resources(set)) => Some(set),
            _ => None,
        }
    }

    /// All keys currently present.
    pub fn key_set(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Merges user-supplied bundle-arguments into the map.
    ///
    /// A key that already exists is a hard configuration error; the error
    /// lists exactly the colliding keys, sorted, and nothing is merged in
    /// that case.
    pub fn merge_user_arguments(&mut self, arguments: &BTreeMap<String, String>) -> Result<()> {
        let duplicates: Vec<String> = arguments
            .keys()
            .filter(|key| self.entries.contains_key(*key))
            .cloned()
            .collect();
        if !duplicates.is_empty() {
            return Err(Error::DuplicateBundleArguments { keys: duplicates });
        }
        for (key, value) in arguments {
            self.entries
                .insert(key.clone(), ParamValue::Str(value.clone()));
        }
        Ok(())
    }
}

/// Per-run markers written by workaround policies and read by the
/// orchestrator's post-processing step.
///
/// Lives outside the [`ParameterMap`] on purpose: these flags coordinate
/// the pipeline itself and must never leak into an engine's input.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkaroundContext {
    /// The selector decided the app-image bundler must run so installers
    /// can pick up renamed cfg files afterwards.
    pub cfg_fix_requested: bool,
    /// The renamed cfg files were already propagated into the resource
    /// list; later installer candidates must not do it again.
    pub cfg_fix_propagated: bool,
    /// The extended mac.app engine was already substituted this run.
    pub mac_engine_substituted: bool,
}
