//! Conditional corrections for known packaging-toolchain defects.
//!
//! Every policy here is split into a pure predicate over an injected
//! [`PlatformInfo`](crate::bundler::platform::PlatformInfo) and a
//! best-effort effect. Predicates decide *whether* a toolchain generation
//! needs the correction; effects apply it and log warnings instead of
//! failing the run when the filesystem does not cooperate.

pub mod generic;
pub mod linux;
pub mod mac;
pub mod windows;

use crate::bundler::platform::{OsFamily, PlatformInfo};

/// Warns when the `deb` engine is about to run on a filesystem known to
/// make dpkg painfully slow. Best effort: unreadable mount tables are
/// simply ignored.
pub async fn advise_on_slow_dpkg_filesystem(platform: &PlatformInfo) {
    if platform.os != OsFamily::Linux {
        return;
    }
    let mounts = match tokio::fs::read_to_string("/proc/mounts").await {
        Ok(mounts) => mounts,
        Err(_) => return,
    };
    if let Some(fs_type) = root_filesystem_type(&mounts) {
        if fs_type == "ext4" || fs_type == "btrfs" {
            log::warn!(
                "building a DEB package on {fs_type} can take a long time, \
                 dpkg-deb is known to be slow on this filesystem"
            );
        }
    }
}

/// Extracts the filesystem type of the `/` mount from `/proc/mounts` text.
fn root_filesystem_type(mounts: &str) -> Option<String> {
    mounts.lines().find_map(|line| {
        let mut fields = line.split_whitespace();
        let _device = fields.next()?;
        let mount_point = fields.next()?;
        let fs_type = fields.next()?;
        if mount_point == "/" {
            Some(fs_type.to_string())
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_the_root_mount_type() {
        let mounts = "sysfs /sys sysfs rw 0 0\n\
                      /dev/sda1 / ext4 rw,relatime 0 0\n\
                      tmpfs /tmp tmpfs rw 0 0\n";
        assert_eq!(root_filesystem_type(mounts), Some("ext4".to_string()));
    }

    #[test]
    fn missing_root_mount_yields_none() {
        assert_eq!(root_filesystem_type("tmpfs /tmp tmpfs rw 0 0\n"), None);
    }
}
