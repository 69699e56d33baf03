//! The bundling pass: parameter assembly, candidate iteration, workaround
//! application and post-processing.
//!
//! One [`Orchestrator`] value drives one pass. The pass assembles a single
//! [`ParameterMap`] up front, then walks the engine registry in
//! registration order; each selected engine is validated, executed and
//! post-processed sequentially. Per-engine failures go through the failure
//! policy (strict aborts, lenient logs and moves on); configuration errors
//! discovered before any engine runs always abort.

use crate::bundler::engine::{
    self, external, BundlerEngine, EngineRegistry, JNLP_ID, LINUX_APP_ID, MAC_APP_ID,
};
use crate::bundler::error::{EngineError, EngineResult, Error, Result};
use crate::bundler::jnlp::JnlpPatcher;
use crate::bundler::params::{keys, ParamValue, ParameterMap, WorkaroundContext};
use crate::bundler::platform::{OsFamily, PlatformInfo};
use crate::bundler::resources::ResourceSet;
use crate::bundler::settings::{BundleConfig, SecondaryLauncher};
use crate::bundler::signing::{self, SigningRequest};
use crate::bundler::utils::fs as fsutil;
use crate::bundler::workarounds;
use std::path::{Path, PathBuf};

/// Directories one bundling pass works with.
#[derive(Debug, Clone)]
pub struct OutputPaths {
    /// Directory holding the built application (jars, resources).
    pub app_output_dir: PathBuf,
    /// Directory the native artifacts are produced into.
    pub native_output_dir: PathBuf,
    /// Working directory for external tools.
    pub project_root: PathBuf,
}

/// What a finished pass did.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Identifiers of the engines that executed, in order.
    pub executed: Vec<String>,
}

/// Source and destination resolution for one engine's share of the
/// additional bundler resources.
#[derive(Debug, PartialEq)]
enum ResourceCopy {
    Skipped(&'static str),
    /// Copy the given source into the engine's app image.
    ImageRoot(PathBuf),
    /// Copy the given source into the shared images root.
    GenericRoot(PathBuf),
}

/// Drives one bundling pass over a fixed configuration, platform and
/// engine registry.
pub struct Orchestrator {
    config: BundleConfig,
    platform: PlatformInfo,
    registry: EngineRegistry,
    paths: OutputPaths,
    requested: String,
    packager_tool: Option<PathBuf>,
}

impl Orchestrator {
    /// Creates a pass for the given configuration. `requested` is an
    /// engine identifier or the `ALL` wildcard.
    pub fn new(
        config: BundleConfig,
        platform: PlatformInfo,
        registry: EngineRegistry,
        paths: OutputPaths,
        requested: impl Into<String>,
    ) -> Self {
        Self {
            config,
            platform,
            registry,
            paths,
            requested: requested.into(),
            packager_tool: None,
        }
    }

    /// Points the signing step at an explicit packager executable instead
    /// of looking it up on the `PATH`.
    pub fn with_packager_tool(mut self, tool: Option<PathBuf>) -> Self {
        self.packager_tool = tool;
        self
    }

    /// Runs the pass to completion.
    pub async fn run(&self) -> Result<RunReport> {
        self.registry.ensure_not_empty()?;
        let launcher_names = self.config.app.validated_launcher_names()?;

        let mut params = self.assemble_params().await?;
        let mut ctx = WorkaroundContext::default();
        let mut report = RunReport::default();

        for candidate in self.registry.engines() {
            if !engine::should_run(
                &self.requested,
                candidate,
                &self.platform,
                &self.config.switches,
                &mut ctx,
            ) {
                continue;
            }

            let engine = self.select_engine(candidate, &mut params, &mut ctx);
            log::info!("considering engine {:?}", engine.name());

            self.copy_additional_bundler_resources(engine, &params).await;
            if engine.id() == "deb" {
                workarounds::advise_on_slow_dpkg_filesystem(&self.platform).await;
            }

            if !self.gate(engine, engine.validate(&params))? {
                continue;
            }

            if engine.id() == JNLP_ID && !params.contains_key(keys::JNLP_OUTFILE) {
                if self.config.switches.fail_on_error {
                    return Err(Error::EngineConfig {
                        name: engine.name().to_string(),
                        message: "no jnlp.outfile configured".to_string(),
                        advice: "add a jnlp.outfile entry to bundle_arguments".to_string(),
                    });
                }
                log::warn!("skipping jnlp engine, no jnlp.outfile was configured");
                continue;
            }

            log::info!("executing engine {:?}", engine.name());
            let executed = self.gate(
                engine,
                engine
                    .execute(&params, &self.paths.native_output_dir)
                    .map(|()| true),
            )?;
            if !executed {
                continue;
            }
            report.executed.push(engine.id().to_string());

            self.post_process(engine.id(), &launcher_names, &mut params, &mut ctx)
                .await?;
        }

        if report.executed.is_empty() {
            if self.config.switches.fail_on_error {
                return Err(Error::NoEngineMatched(self.requested.clone()));
            }
            log::warn!(
                "no bundler ran for requested id {:?}, please check your configuration",
                self.requested
            );
        }
        Ok(report)
    }

    /// Builds the parameter map every engine of this pass receives.
    async fn assemble_params(&self) -> Result<ParameterMap> {
        let app = &self.config.app;
        let mut params = ParameterMap::new();

        params.insert(keys::APP_NAME, app.app_name.as_str());
        params.insert(
            keys::VERSION,
            self.release_version(&app.native_release_version),
        );
        params.insert(keys::VENDOR, app.vendor.as_str());
        params.insert_opt(keys::IDENTIFIER, app.identifier.clone());
        params.insert(keys::VERBOSE, app.verbose);
        params.insert(keys::SHORTCUT_HINT, app.need_shortcut);
        params.insert(keys::MENU_HINT, app.need_menu);
        params.insert(keys::MAIN_CLASS, app.main_class.as_str());
        params.insert(keys::MAIN_JAR, app.main_jar.display().to_string());
        params.insert_opt(keys::CLASSPATH, app.classpath.clone());
        params.insert(
            keys::JVM_PROPERTIES,
            ParamValue::Map(app.jvm_properties.clone()),
        );
        params.insert(keys::JVM_OPTIONS, ParamValue::List(app.jvm_args.clone()));
        params.insert(
            keys::USER_JVM_OPTIONS,
            ParamValue::Map(app.user_jvm_args.clone()),
        );
        params.insert(
            keys::ARGUMENTS,
            ParamValue::List(app.launcher_args.clone()),
        );

        if !app.secondary_launchers.is_empty() {
            let launchers = app
                .secondary_launchers
                .iter()
                .map(secondary_launcher_params)
                .collect();
            params.insert(keys::SECONDARY_LAUNCHERS, ParamValue::MapList(launchers));
        }

        if let Some(extra) = &app.additional_app_resources {
            if extra.is_dir() {
                log::info!("copying additional application resources from {extra:?}");
                fsutil::copy_dir(extra, &self.paths.app_output_dir).await?;
            } else {
                log::warn!("additional application resources {extra:?} do not exist, skipping");
            }
        }

        let resources = ResourceSet::walk(&self.paths.app_output_dir).await?;
        if resources.is_empty() {
            log::warn!(
                "no application resources found under {:?}",
                self.paths.app_output_dir
            );
        }
        params.insert(keys::APP_RESOURCES, ParamValue::Resources(resources));

        params.merge_user_arguments(&self.config.bundle_arguments)?;

        if workarounds::generic::legacy_cfg_format_needed(&self.platform) {
            if self.config.switches.skip_legacy_cfg_format {
                log::info!("skipped forcing the legacy launcher cfg format");
            } else {
                workarounds::generic::apply_legacy_cfg_format(&mut params);
            }
        }

        if self.config.switches.skip_main_class_scan {
            log::info!("skipped checking for the main class inside the resource jars");
        } else if let Some(resources) = params.app_resources() {
            if !main_class_present(resources, &app.main_class).await {
                log::warn!(
                    "main class {:?} was not found inside any resource jar, \
                     the bundled application might not start",
                    app.main_class
                );
            }
        }

        Ok(params)
    }

    /// Installer formats reject anything but digits and dots in the
    /// version; the raw value is kept only on request.
    fn release_version(&self, raw: &str) -> String {
        if self.config.switches.skip_version_sanitizing {
            return raw.to_string();
        }
        let sanitized: String = raw
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect();
        if sanitized.is_empty() {
            log::warn!("version {raw:?} has no digits at all, falling back to 1.0");
            return "1.0".to_string();
        }
        if sanitized != raw {
            log::warn!("sanitized release version {raw:?} to {sanitized:?} for the installers");
        }
        sanitized
    }

    /// Picks the engine actually used for a selected candidate, swapping
    /// in the extended `mac.app` variant when the substitution workaround
    /// applies.
    fn select_engine<'a>(
        &'a self,
        candidate: &'a dyn BundlerEngine,
        params: &mut ParameterMap,
        ctx: &mut WorkaroundContext,
    ) -> &'a dyn BundlerEngine {
        if candidate.id() != MAC_APP_ID {
            return candidate;
        }
        if self.config.switches.skip_mac_engine_substitution {
            log::info!("skipped substituting the extended mac.app engine");
            return candidate;
        }
        let resources = self.config.app.additional_bundler_resources.as_deref();
        if !workarounds::mac::engine_substitution_needed(&self.platform, resources) {
            return candidate;
        }
        let Some(replacement) = self.registry.mac_app_replacement() else {
            log::warn!("no extended mac.app engine registered, using the stock one");
            return candidate;
        };
        if !ctx.mac_engine_substituted {
            ctx.mac_engine_substituted = true;
            if let Some(resources) = resources {
                let root = workarounds::mac::bundler_resource_root(resources);
                params.insert(keys::MAC_BUNDLER_RESOURCES, root.display().to_string());
            }
            log::info!("substituting the extended mac.app engine for this pass");
        }
        replacement
    }

    /// Copies the configured additional bundler resources to wherever this
    /// engine expects them. Best effort: every failure is a warning.
    async fn copy_additional_bundler_resources(
        &self,
        engine: &dyn BundlerEngine,
        params: &ParameterMap,
    ) {
        let Some(resources) = self.config.app.additional_bundler_resources.as_deref() else {
            return;
        };
        if !resources.is_dir() {
            log::warn!("additional bundler resources {resources:?} do not exist, skipping");
            return;
        }
        // the substituted mac.app engine receives the directory as a
        // parameter instead of a copy
        if params.contains_key(keys::MAC_BUNDLER_RESOURCES) && engine.id() == MAC_APP_ID {
            return;
        }

        let (source, target) = match resolve_resource_copy(engine.id(), resources) {
            ResourceCopy::Skipped(reason) => {
                log::warn!(
                    "additional bundler resources are not copied for {:?}: {reason}",
                    engine.id()
                );
                return;
            }
            ResourceCopy::ImageRoot(source) => {
                match engine.image_root(params, &self.paths.native_output_dir) {
                    Some(root) => (source, root),
                    None => {
                        log::warn!(
                            "engine {:?} reports no image root, not copying bundler resources",
                            engine.id()
                        );
                        return;
                    }
                }
            }
            ResourceCopy::GenericRoot(source) => {
                (source, self.paths.native_output_dir.join("images"))
            }
        };

        log::info!("copying additional bundler resources from {source:?} into {target:?}");
        if let Err(e) = fsutil::copy_dir(&source, &target).await {
            log::warn!("couldn't copy additional bundler resources: {e}");
        }
    }

    /// Applies the failure policy to an engine signal. `Ok(true)` means
    /// keep going with this engine, `Ok(false)` means skip it.
    fn gate(&self, engine: &dyn BundlerEngine, result: EngineResult<bool>) -> Result<bool> {
        match result {
            Ok(proceed) => {
                if !proceed {
                    log::info!("engine {:?} declined the current input", engine.name());
                }
                Ok(proceed)
            }
            Err(EngineError::UnsupportedPlatform) => {
                log::debug!("engine {:?} does not run on this platform", engine.name());
                Ok(false)
            }
            Err(EngineError::Config { message, advice }) => {
                if self.config.switches.fail_on_error {
                    return Err(Error::EngineConfig {
                        name: engine.name().to_string(),
                        message,
                        advice,
                    });
                }
                log::warn!("engine {:?} skipped: {message}", engine.name());
                log::warn!("advice to fix: {advice}");
                Ok(false)
            }
        }
    }

    /// Workarounds that run after a specific engine produced its artifact.
    async fn post_process(
        &self,
        engine_id: &str,
        launcher_names: &[String],
        params: &mut ParameterMap,
        ctx: &mut WorkaroundContext,
    ) -> Result<()> {
        if engine_id == LINUX_APP_ID && self.platform.os == OsFamily::Linux {
            self.fix_linux_cfg_files(launcher_names, params, ctx).await?;
        }
        if engine_id == JNLP_ID {
            self.patch_jnlp_output(params).await?;
        }
        Ok(())
    }

    async fn fix_linux_cfg_files(
        &self,
        launcher_names: &[String],
        params: &mut ParameterMap,
        ctx: &mut WorkaroundContext,
    ) -> Result<()> {
        if !workarounds::linux::cfg_file_rename_needed(&self.platform) {
            return Ok(());
        }
        if self.config.switches.skip_cfg_file_rename {
            log::info!("skipped renaming the launcher cfg files");
            return Ok(());
        }

        let renamed =
            workarounds::linux::apply_cfg_file_rename(&self.paths.native_output_dir, launcher_names)
                .await;
        if renamed.is_empty() {
            return Ok(());
        }

        if !ctx.cfg_fix_requested || ctx.cfg_fix_propagated {
            return Ok(());
        }
        if self.config.switches.skip_installer_cfg_propagation {
            log::info!("skipped propagating renamed cfg files into the installers");
            return Ok(());
        }

        workarounds::linux::propagate_cfg_files_into_installers(params, &self.platform, &renamed)
            .await?;
        ctx.cfg_fix_propagated = true;
        Ok(())
    }

    async fn patch_jnlp_output(&self, params: &ParameterMap) -> Result<()> {
        let patcher = JnlpPatcher::new(&self.paths.native_output_dir)?;

        if workarounds::windows::jnlp_path_fix_needed(&self.platform) {
            if self.config.switches.skip_jnlp_path_fix {
                log::info!("skipped fixing jar paths inside the JNLP files");
            } else {
                log::info!("fixing backslash jar paths inside the JNLP files");
                patcher.fix_paths().await;
            }
        }

        if workarounds::generic::jnlp_signing_needed(params) {
            if self.config.switches.skip_jnlp_jar_signing {
                log::info!("skipped signing the jars referenced from the JNLP files");
            } else {
                self.sign_jnlp_jars(&patcher, params).await?;
            }
        }
        Ok(())
    }

    /// Signs every jar the generated JNLP files reference, then refreshes
    /// the recorded sizes.
    async fn sign_jnlp_jars(&self, patcher: &JnlpPatcher, params: &ParameterMap) -> Result<()> {
        let references = patcher.jar_references().await;
        if references.is_empty() {
            log::info!("no jar references found inside the JNLP files, nothing to sign");
            return Ok(());
        }

        let verbose = params.flag(keys::VERBOSE);
        let request =
            SigningRequest::from_settings(&self.config.keystore, &self.config.switches, verbose)?;

        if self.config.switches.per_jar_signing {
            let tool = signing::resolve_tool(None, "jarsigner")?;
            let jars: Vec<PathBuf> = references
                .iter()
                .map(|rel| self.paths.native_output_dir.join(rel))
                .collect();
            request
                .sign_jars_individually(&tool, &jars, &self.paths.project_root)
                .await?;
        } else {
            let tool = self.resolved_packager_tool()?;
            let jars: Vec<PathBuf> = references.iter().map(PathBuf::from).collect();
            request
                .sign_jars_combined(
                    &tool,
                    &self.paths.native_output_dir,
                    &jars,
                    &self.paths.project_root,
                )
                .await?;
        }

        if self.config.switches.skip_jnlp_size_recalc {
            log::info!("skipped recalculating jar sizes inside the JNLP files");
            return Ok(());
        }
        let sizes = patcher.collect_sizes(&references).await;
        patcher.recalculate_sizes(&sizes).await;
        Ok(())
    }

    /// The packager executable for combined signing: the configured one
    /// when set, the same `PATH` lookup the engines use otherwise.
    fn resolved_packager_tool(&self) -> Result<PathBuf> {
        signing::resolve_tool(self.packager_tool.as_deref(), external::PACKAGER_TOOL)
    }
}

/// Per-engine disposition for the additional-bundler-resources copy.
///
/// A subfolder named after the engine scopes the copy to that engine, so
/// one resources directory can serve several engines side by side; the
/// installer formats then receive their subfolder inside the app image.
/// Without such a subfolder the whole tree goes to the shared images root.
fn resolve_resource_copy(engine_id: &str, resources: &Path) -> ResourceCopy {
    match engine_id {
        "windows.app" | "windows.service" | "linux.app" => {
            return ResourceCopy::Skipped(
                "the app image already carries the additional application resources",
            );
        }
        "mac.app" => {
            return ResourceCopy::Skipped("use the extended mac engine for additional resources");
        }
        "mac.daemon" => {
            return ResourceCopy::Skipped("the engine keeps no image root to copy into");
        }
        _ => {}
    }

    let scoped = resources.join(engine_id);
    if !scoped.is_dir() {
        return ResourceCopy::GenericRoot(resources.to_path_buf());
    }
    match engine_id {
        "exe" | "msi" | "deb" | "rpm" => ResourceCopy::ImageRoot(scoped),
        "mac.appStore" | "dmg" | "pkg" => {
            ResourceCopy::Skipped("this installer format does not take extra resources")
        }
        _ => {
            log::warn!(
                "no image directory is known for engine {engine_id:?}, \
                 copying the whole resources tree instead of its subfolder"
            );
            ResourceCopy::GenericRoot(resources.to_path_buf())
        }
    }
}

/// The nested parameter map describing one secondary launcher.
fn secondary_launcher_params(launcher: &SecondaryLauncher) -> ParameterMap {
    let mut params = ParameterMap::new();
    params.insert(keys::APP_NAME, launcher.app_name.as_str());
    params.insert_opt(keys::MAIN_CLASS, launcher.main_class.clone());
    params.insert_opt(
        keys::MAIN_JAR,
        launcher.main_jar.as_ref().map(|jar| jar.display().to_string()),
    );
    params.insert_opt(keys::VERSION, launcher.native_release_version.clone());
    params.insert_opt(keys::VENDOR, launcher.vendor.clone());
    params.insert_opt(keys::IDENTIFIER, launcher.identifier.clone());
    params.insert_opt(keys::CLASSPATH, launcher.classpath.clone());
    params.insert(
        keys::JVM_PROPERTIES,
        ParamValue::Map(launcher.jvm_properties.clone()),
    );
    params.insert(keys::JVM_OPTIONS, ParamValue::List(launcher.jvm_args.clone()));
    params.insert(
        keys::USER_JVM_OPTIONS,
        ParamValue::Map(launcher.user_jvm_args.clone()),
    );
    params.insert(
        keys::ARGUMENTS,
        ParamValue::List(launcher.launcher_args.clone()),
    );
    params.insert(keys::SHORTCUT_HINT, launcher.need_shortcut);
    params.insert(keys::MENU_HINT, launcher.need_menu);
    params
}

/// Looks for the compiled main class inside the resource jars.
///
/// Pure read access, so jars that cannot be opened only cost a warning.
async fn main_class_present(resources: &ResourceSet, main_class: &str) -> bool {
    let entry_name = format!("{}.class", main_class.replace('.', "/"));
    let jars: Vec<PathBuf> = resources
        .absolute_files()
        .filter(|path| path.extension().and_then(|e| e.to_str()) == Some("jar"))
        .collect();

    let result = tokio::task::spawn_blocking(move || {
        for jar in jars {
            let file = match std::fs::File::open(&jar) {
                Ok(file) => file,
                Err(e) => {
                    log::warn!("cannot open {jar:?} for the main-class scan: {e}");
                    continue;
                }
            };
            let mut archive = match zip::ZipArchive::new(file) {
                Ok(archive) => archive,
                Err(e) => {
                    log::warn!("cannot read {jar:?} as a jar archive: {e}");
                    continue;
                }
            };
            if archive.by_name(&entry_name).is_ok() {
                log::debug!("main class found inside {jar:?}");
                return true;
            }
        }
        false
    })
    .await;

    match result {
        Ok(found) => found,
        Err(e) => {
            log::warn!("main-class scan task panicked: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_sanitizing_keeps_digits_and_dots() {
        let orchestrator = test_orchestrator(Default::default());
        assert_eq!(orchestrator.release_version("1.2.3"), "1.2.3");
        assert_eq!(orchestrator.release_version("1.2.3-SNAPSHOT"), "1.2.3");
        assert_eq!(orchestrator.release_version("v2.0"), "2.0");
        assert_eq!(orchestrator.release_version("beta"), "1.0");
    }

    #[test]
    fn version_sanitizing_can_be_switched_off() {
        let mut config = BundleConfig::default();
        config.switches.skip_version_sanitizing = true;
        let orchestrator = test_orchestrator(config);
        assert_eq!(
            orchestrator.release_version("1.2.3-SNAPSHOT"),
            "1.2.3-SNAPSHOT"
        );
    }

    #[test]
    fn secondary_launcher_maps_skip_unset_overrides() {
        let launcher = SecondaryLauncher {
            app_name: "admin".to_string(),
            main_class: Some("com.acme.Admin".to_string()),
            ..Default::default()
        };
        let params = secondary_launcher_params(&launcher);
        assert_eq!(params.str_value(keys::APP_NAME), Some("admin"));
        assert_eq!(params.str_value(keys::MAIN_CLASS), Some("com.acme.Admin"));
        assert!(!params.contains_key(keys::MAIN_JAR));
        assert!(!params.contains_key(keys::VENDOR));
    }

    #[tokio::test]
    async fn main_class_scan_reads_resource_jars() {
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let jar_path = dir.path().join("app.jar");
        let file = std::fs::File::create(&jar_path).unwrap();
        let mut jar = zip::ZipWriter::new(file);
        jar.start_file(
            "com/acme/Main.class",
            zip::write::SimpleFileOptions::default(),
        )
        .unwrap();
        jar.write_all(b"\xca\xfe\xba\xbe").unwrap();
        jar.finish().unwrap();

        let resources = ResourceSet::walk(dir.path()).await.unwrap();
        assert!(main_class_present(&resources, "com.acme.Main").await);
        assert!(!main_class_present(&resources, "com.acme.Other").await);
    }

    fn test_orchestrator(config: BundleConfig) -> Orchestrator {
        Orchestrator::new(
            config,
            PlatformInfo::new(
                OsFamily::Linux,
                crate::bundler::platform::ToolchainVersion::new(8, 92),
            ),
            EngineRegistry::new(),
            OutputPaths {
                app_output_dir: PathBuf::from("target/app"),
                native_output_dir: PathBuf::from("target/native"),
                project_root: PathBuf::from("."),
            },
            engine::ALL_ENGINES,
        )
    }

    #[test]
    fn engine_named_subfolder_scopes_the_bundler_resource_copy() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("deb")).unwrap();

        // the deb engine only receives its own subfolder, inside its image
        assert_eq!(
            resolve_resource_copy("deb", dir.path()),
            ResourceCopy::ImageRoot(dir.path().join("deb"))
        );
        // a sibling engine without a subfolder still gets the whole tree,
        // but only into the shared images root
        assert_eq!(
            resolve_resource_copy("rpm", dir.path()),
            ResourceCopy::GenericRoot(dir.path().to_path_buf())
        );
    }

    #[test]
    fn without_a_subfolder_installers_fall_back_to_the_shared_images_root() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            resolve_resource_copy("exe", dir.path()),
            ResourceCopy::GenericRoot(dir.path().to_path_buf())
        );
        // the mac installer formats are only refused once they ask for a
        // scoped copy of their own
        assert_eq!(
            resolve_resource_copy("dmg", dir.path()),
            ResourceCopy::GenericRoot(dir.path().to_path_buf())
        );
        std::fs::create_dir_all(dir.path().join("dmg")).unwrap();
        assert!(matches!(
            resolve_resource_copy("dmg", dir.path()),
            ResourceCopy::Skipped(_)
        ));
    }

    #[test]
    fn app_image_engines_never_take_bundler_resources() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("linux.app")).unwrap();
        for id in ["linux.app", "windows.app", "windows.service", "mac.app", "mac.daemon"] {
            assert!(matches!(
                resolve_resource_copy(id, dir.path()),
                ResourceCopy::Skipped(_)
            ));
        }
        // custom engines with a subfolder have no known image directory,
        // they get the whole tree like any other unknown id
        std::fs::create_dir_all(dir.path().join("my.engine")).unwrap();
        assert_eq!(
            resolve_resource_copy("my.engine", dir.path()),
            ResourceCopy::GenericRoot(dir.path().to_path_buf())
        );
    }

    #[test]
    fn explicit_packager_tool_wins_over_the_path_lookup() {
        let tool = PathBuf::from("/opt/jdk/bin/javapackager");
        let orchestrator =
            test_orchestrator(Default::default()).with_packager_tool(Some(tool.clone()));
        assert_eq!(orchestrator.resolved_packager_tool().unwrap(), tool);
    }
}
