//! Windows JNLP path correction.
//!
//! Since Java 8 update 60 the generating engine on Windows writes jar
//! references with backslash separators into JNLP files, which web-start
//! clients reject. The actual rewrite lives in the JNLP patcher; this
//! module only decides when it has to run.

use crate::bundler::platform::{OsFamily, PlatformInfo};

/// Whether generated JNLP files carry backslash jar paths on this host.
pub fn jnlp_path_fix_needed(platform: &PlatformInfo) -> bool {
    platform.os == OsFamily::Windows
        && platform.toolchain.is_major(8)
        && platform.toolchain.at_least_update(60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::platform::ToolchainVersion;

    #[test]
    fn only_windows_java8_from_update_60() {
        let windows = |major, update| {
            PlatformInfo::new(OsFamily::Windows, ToolchainVersion::new(major, update))
        };
        assert!(!jnlp_path_fix_needed(&windows(8, 59)));
        assert!(jnlp_path_fix_needed(&windows(8, 60)));
        assert!(jnlp_path_fix_needed(&windows(8, 121)));
        assert!(!jnlp_path_fix_needed(&windows(9, 0)));

        let linux = PlatformInfo::new(OsFamily::Linux, ToolchainVersion::new(8, 60));
        assert!(!jnlp_path_fix_needed(&linux));
    }
}
