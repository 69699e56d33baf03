//! Platform-independent parameter corrections.

use crate::bundler::params::{keys, ParameterMap};
use crate::bundler::platform::PlatformInfo;

/// Whether runtime-less bundles need the legacy property-file cfg format.
///
/// Java 8 between update 60 (inclusive) and update 92 (exclusive) writes a
/// cfg format the launcher cannot read when no runtime is bundled.
pub fn legacy_cfg_format_needed(platform: &PlatformInfo) -> bool {
    platform.toolchain.is_major(8)
        && platform.toolchain.at_least_update(60)
        && !platform.toolchain.at_least_update(92)
}

/// Forces the legacy cfg format, but only for bundles that actually carry
/// the runtime marker; bundles with a full runtime are unaffected.
pub fn apply_legacy_cfg_format(params: &mut ParameterMap) {
    if !params.contains_key(keys::RUNTIME) {
        return;
    }
    log::info!("forcing the legacy property-file launcher cfg format");
    params.insert(keys::LAUNCHER_CFG_FORMAT, "prop");
}

/// Whether the jars referenced from generated JNLP files must be signed.
pub fn jnlp_signing_needed(params: &ParameterMap) -> bool {
    params.flag(keys::JNLP_ALL_PERMISSIONS)
}
