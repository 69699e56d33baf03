//! Linux cfg-file corrections.
//!
//! The generated native launcher truncates the name of its runtime cfg
//! file at the last dot, so a launcher called `some.app-1.2` searches for
//! `some.app-1.cfg` while the generator wrote `some.app-1.2.cfg`. The
//! rename below closes that gap; the propagation step then makes sure
//! installer engines bundle the renamed files too instead of the stale
//! originals.

use crate::bundler::error::Result;
use crate::bundler::params::{keys, ParamValue, ParameterMap};
use crate::bundler::platform::PlatformInfo;
use crate::bundler::resources::ResourceSet;
use crate::bundler::utils::fs as fsutil;
use std::path::{Path, PathBuf};

/// Whether this toolchain generation truncates cfg-file names.
///
/// Present since Java 8 update 40 and never fixed afterwards.
pub fn cfg_file_rename_needed(platform: &PlatformInfo) -> bool {
    (platform.toolchain.is_major(8) && platform.toolchain.at_least_update(40))
        || platform.toolchain.major >= 9
}

/// The cfg-file name the launcher actually looks for, or `None` when the
/// launcher name has no dot and needs no rename.
pub fn truncated_cfg_name(launcher_name: &str) -> Option<String> {
    let cut = launcher_name.rfind('.')?;
    Some(format!("{}.cfg", &launcher_name[..cut]))
}

/// Directory holding the generated cfg files inside the app image.
pub fn cfg_directory(native_output_dir: &Path, primary_app_name: &str) -> PathBuf {
    native_output_dir.join(primary_app_name).join("app")
}

/// Renames the generated cfg file of every dot-containing launcher name to
/// the name the native launcher searches for.
///
/// Rename failures are warnings; the returned list holds the absolute
/// paths of the files that were actually renamed.
pub async fn apply_cfg_file_rename(
    native_output_dir: &Path,
    launcher_names: &[String],
) -> Vec<PathBuf> {
    let Some(primary) = launcher_names.first() else {
        return Vec::new();
    };
    let cfg_dir = cfg_directory(native_output_dir, primary);

    let mut renamed = Vec::new();
    for name in launcher_names {
        let Some(fixed_name) = truncated_cfg_name(name) else {
            continue;
        };
        let generated = cfg_dir.join(format!("{name}.cfg"));
        let expected = cfg_dir.join(&fixed_name);

        if !generated.is_file() {
            log::debug!("no cfg file to rename at {generated:?}");
            continue;
        }

        log::info!("renaming cfg file {generated:?} to {expected:?}");
        match tokio::fs::rename(&generated, &expected).await {
            Ok(()) => renamed.push(expected),
            Err(e) => log::warn!("couldn't rename cfg file {generated:?}: {e}"),
        }
    }
    renamed
}

/// Makes renamed cfg files visible to installer engines running later in
/// the same pass.
///
/// Toolchains that understand multiple resource sets get the fixed files
/// appended as an additional set. Java 8 before update 60 only accepts a
/// single set, so there the whole payload plus the fixed cfg files is
/// staged into a fresh directory which then replaces the primary set.
pub async fn propagate_cfg_files_into_installers(
    params: &mut ParameterMap,
    platform: &PlatformInfo,
    renamed_cfg_files: &[PathBuf],
) -> Result<()> {
    if renamed_cfg_files.is_empty() {
        return Ok(());
    }
    let Some(primary) = params.app_resources().cloned() else {
        log::warn!("no application resources assembled, cannot propagate cfg files");
        return Ok(());
    };

    let single_set_only =
        platform.toolchain.is_major(8) && !platform.toolchain.at_least_update(60);

    if single_set_only {
        // stage everything into one directory and hand that over instead
        let staging = tokio::task::spawn_blocking(tempfile::TempDir::new)
            .await
            .map_err(|e| {
                crate::bundler::error::Error::GenericError(format!(
                    "staging setup task panicked: {e}"
                ))
            })??
            .keep();
        log::info!("staging installer resources into {staging:?}");

        for rel in primary.files() {
            fsutil::copy_file(&primary.base_dir().join(rel), &staging.join(rel)).await?;
        }
        for cfg in renamed_cfg_files {
            if let Some(file_name) = cfg.file_name() {
                fsutil::copy_file(cfg, &staging.join(file_name)).await?;
            }
        }

        let staged = ResourceSet::walk(&staging).await?;
        params.insert(keys::APP_RESOURCES, ParamValue::Resources(staged));
        return Ok(());
    }

    let cfg_set = cfg_resource_set(renamed_cfg_files);
    let mut list = match params.get(keys::APP_RESOURCES_LIST) {
        Some(ParamValue::ResourceList(list)) => list.clone(),
        _ => vec![primary],
    };
    list.push(cfg_set);
    params.insert(keys::APP_RESOURCES_LIST, ParamValue::ResourceList(list));
    Ok(())
}

fn cfg_resource_set(renamed_cfg_files: &[PathBuf]) -> ResourceSet {
    let base = renamed_cfg_files
        .first()
        .and_then(|path| path.parent())
        .map(Path::to_path_buf)
        .unwrap_or_default();
    let files = renamed_cfg_files
        .iter()
        .filter_map(|path| path.file_name())
        .map(PathBuf::from);
    ResourceSet::new(base, files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::platform::{OsFamily, ToolchainVersion};

    fn linux(major: u32, update: u32) -> PlatformInfo {
        PlatformInfo::new(OsFamily::Linux, ToolchainVersion::new(major, update))
    }

    #[test]
    fn rename_predicate_covers_the_affected_generations() {
        assert!(!cfg_file_rename_needed(&linux(8, 39)));
        assert!(cfg_file_rename_needed(&linux(8, 40)));
        assert!(cfg_file_rename_needed(&linux(8, 112)));
        assert!(cfg_file_rename_needed(&linux(9, 0)));
        assert!(!cfg_file_rename_needed(&linux(7, 80)));
    }

    #[test]
    fn truncation_cuts_at_the_last_dot_only() {
        assert_eq!(truncated_cfg_name("some.app"), Some("some.cfg".to_string()));
        assert_eq!(
            truncated_cfg_name("foo.bar.1.2"),
            Some("foo.bar.1.cfg".to_string())
        );
        assert_eq!(truncated_cfg_name("plain"), None);
    }

    #[tokio::test]
    async fn renames_primary_and_dotted_secondaries() {
        let out = tempfile::tempdir().unwrap();
        let cfg_dir = cfg_directory(out.path(), "my.app");
        std::fs::create_dir_all(&cfg_dir).unwrap();
        std::fs::write(cfg_dir.join("my.app.cfg"), b"cfg").unwrap();
        std::fs::write(cfg_dir.join("admin.cfg"), b"cfg").unwrap();
        std::fs::write(cfg_dir.join("tool.v2.cfg"), b"cfg").unwrap();

        let names = vec![
            "my.app".to_string(),
            "admin".to_string(),
            "tool.v2".to_string(),
        ];
        let renamed = apply_cfg_file_rename(out.path(), &names).await;

        assert_eq!(renamed.len(), 2);
        assert!(cfg_dir.join("my.cfg").is_file());
        assert!(cfg_dir.join("tool.cfg").is_file());
        // dotless secondary untouched
        assert!(cfg_dir.join("admin.cfg").is_file());
        assert!(!cfg_dir.join("my.app.cfg").exists());
    }

    #[tokio::test]
    async fn propagation_appends_a_second_resource_set() {
        let app = tempfile::tempdir().unwrap();
        std::fs::write(app.path().join("app.jar"), b"jar").unwrap();
        let resources = ResourceSet::walk(app.path()).await.unwrap();

        let mut params = ParameterMap::new();
        params.insert(keys::APP_RESOURCES, ParamValue::Resources(resources));

        let cfg_dir = tempfile::tempdir().unwrap();
        let cfg = cfg_dir.path().join("my.cfg");
        std::fs::write(&cfg, b"cfg").unwrap();

        propagate_cfg_files_into_installers(&mut params, &linux(8, 92), &[cfg])
            .await
            .unwrap();

        match params.get(keys::APP_RESOURCES_LIST) {
            Some(ParamValue::ResourceList(list)) => {
                assert_eq!(list.len(), 2);
                assert!(list[1].files().contains(Path::new("my.cfg")));
            }
            other => panic!("unexpected value: {other:?}"),
        }
    }

    #[tokio::test]
    async fn pre_update_60_stages_a_combined_single_set() {
        let app = tempfile::tempdir().unwrap();
        std::fs::write(app.path().join("app.jar"), b"jar").unwrap();
        let resources = ResourceSet::walk(app.path()).await.unwrap();

        let mut params = ParameterMap::new();
        params.insert(keys::APP_RESOURCES, ParamValue::Resources(resources));

        let cfg_dir = tempfile::tempdir().unwrap();
        let cfg = cfg_dir.path().join("my.cfg");
        std::fs::write(&cfg, b"cfg").unwrap();

        propagate_cfg_files_into_installers(&mut params, &linux(8, 45), &[cfg])
            .await
            .unwrap();

        // no second set; the primary one was replaced by a staged superset
        assert!(!params.contains_key(keys::APP_RESOURCES_LIST));
        let staged = params.app_resources().unwrap();
        assert!(staged.files().contains(Path::new("app.jar")));
        assert!(staged.files().contains(Path::new("my.cfg")));
        assert_ne!(staged.base_dir(), app.path());
    }
}
