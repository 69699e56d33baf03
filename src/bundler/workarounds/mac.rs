//! Mac engine substitution.
//!
//! The stock `mac.app` engine ignores additional bundler resources; an
//! extended variant registered next to it honours them. When the build
//! configures such resources on a Mac host, the orchestrator swaps the
//! engine once per pass and points the replacement at the right subtree.

use crate::bundler::platform::{OsFamily, PlatformInfo};
use std::path::{Path, PathBuf};

/// Whether the extended `mac.app` engine must replace the stock one.
pub fn engine_substitution_needed(
    platform: &PlatformInfo,
    bundler_resources: Option<&Path>,
) -> bool {
    platform.os == OsFamily::Mac && bundler_resources.is_some_and(Path::is_dir)
}

/// The resource subtree handed to the extended engine.
///
/// A `mac.app/` subfolder wins when present, so one resources directory
/// can serve several engines side by side; otherwise the whole tree is
/// used.
pub fn bundler_resource_root(bundler_resources: &Path) -> PathBuf {
    let scoped = bundler_resources.join("mac.app");
    if scoped.is_dir() {
        scoped
    } else {
        bundler_resources.to_path_buf()
    }
}
