//! Configuration structures for a bundling pass.
//!
//! These types map from the TOML build descriptor the CLI loads; every
//! field carries a serde default so sparse descriptors stay valid.

mod core;
mod keystore;
mod launcher;
mod switches;

pub use core::AppSettings;
pub use keystore::KeystoreSettings;
pub use launcher::SecondaryLauncher;
pub use switches::WorkaroundSwitches;

use crate::bundler::error::Result;
use crate::bundler::error::{Context, ErrorExt};
use std::collections::BTreeMap;
use std::path::Path;

/// Complete build descriptor: application identity plus signing and
/// workaround configuration.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct BundleConfig {
    /// Application identity, entry point and launchers.
    pub app: AppSettings,

    /// Keystore parameters for jar signing.
    #[serde(default)]
    pub keystore: KeystoreSettings,

    /// Per-workaround skip flags and failure policy.
    #[serde(default)]
    pub switches: WorkaroundSwitches,

    /// User-level bundle arguments handed through to the engines.
    ///
    /// Keys must not collide with parameters derived from `app`; a
    /// collision aborts the run before any engine executes.
    #[serde(default)]
    pub bundle_arguments: BTreeMap<String, String>,
}

impl BundleConfig {
    /// Parses a descriptor from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid bundle descriptor")
    }

    /// Loads a descriptor file.
    pub async fn load(path: &Path) -> Result<Self> {
        let text = tokio::fs::read_to_string(path)
            .await
            .fs_context("reading bundle descriptor", path)?;
        Self::from_toml_str(&text)
    }
}
