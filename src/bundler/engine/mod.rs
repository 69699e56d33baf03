//! Bundler engine contract, registry and candidate selection.

pub mod external;

use crate::bundler::error::{EngineResult, Error, Result};
use crate::bundler::params::{ParameterMap, WorkaroundContext};
use crate::bundler::platform::{OsFamily, PlatformInfo};
use crate::bundler::settings::WorkaroundSwitches;
use crate::bundler::workarounds;
use std::path::{Path, PathBuf};

/// Wildcard identifier selecting every registered engine.
pub const ALL_ENGINES: &str = "ALL";

/// Identifier of the Linux app-image engine (the carve-out target).
pub const LINUX_APP_ID: &str = "linux.app";

/// Identifier of the stock Mac app-image engine.
pub const MAC_APP_ID: &str = "mac.app";

/// Identifier of the web-start descriptor engine.
pub const JNLP_ID: &str = "jnlp";

/// One bundler engine: a thing that turns an assembled parameter map into
/// a native artifact below the output directory.
///
/// Engines run sequentially and synchronously; the orchestrator owns all
/// asynchrony around them.
pub trait BundlerEngine: Send + Sync {
    /// Stable identifier used for selection (`deb`, `mac.app`, ...).
    fn id(&self) -> &str;

    /// Human-readable name for log output.
    fn name(&self) -> &str;

    /// Checks the parameter map against this engine's requirements.
    ///
    /// `Ok(false)` means the engine declines the input without it being an
    /// error (wrong payload shape for this format, for example).
    fn validate(&self, params: &ParameterMap) -> EngineResult<bool>;

    /// Produces the artifact below `output_dir`.
    fn execute(&self, params: &ParameterMap, output_dir: &Path) -> EngineResult<()>;

    /// Root directory of the app image this engine packages, when it has
    /// one. Used as the target for additional bundler resources.
    fn image_root(&self, _params: &ParameterMap, _output_dir: &Path) -> Option<PathBuf> {
        None
    }
}

/// Holder of every engine available to one orchestration pass.
///
/// Engines are registered explicitly at startup, in the order they should
/// be considered; there is no runtime discovery.
#[derive(Default)]
pub struct EngineRegistry {
    engines: Vec<Box<dyn BundlerEngine>>,
    mac_app_replacement: Option<Box<dyn BundlerEngine>>,
}

impl EngineRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an engine, keeping registration order.
    ///
    /// A second engine with an already-registered identifier is skipped
    /// with a warning instead of shadowing the first.
    pub fn register(&mut self, engine: Box<dyn BundlerEngine>) {
        if self.engines.iter().any(|known| known.id() == engine.id()) {
            log::warn!(
                "skipping engine {:?}: identifier {:?} is already registered",
                engine.name(),
                engine.id()
            );
            return;
        }
        log::debug!("registered engine {:?} as {:?}", engine.name(), engine.id());
        self.engines.push(engine);
    }

    /// Drops every registered engine. Used before registering only custom
    /// engines.
    pub fn clear(&mut self) {
        self.engines.clear();
    }

    /// Installs the extended `mac.app` variant the substitution workaround
    /// swaps in.
    pub fn register_mac_app_replacement(&mut self, engine: Box<dyn BundlerEngine>) {
        self.mac_app_replacement = Some(engine);
    }

    /// The extended `mac.app` variant, when one was installed.
    pub fn mac_app_replacement(&self) -> Option<&dyn BundlerEngine> {
        self.mac_app_replacement.as_deref()
    }

    /// All engines in registration order.
    pub fn engines(&self) -> impl Iterator<Item = &dyn BundlerEngine> {
        self.engines.iter().map(Box::as_ref)
    }

    /// Number of registered engines.
    pub fn len(&self) -> usize {
        self.engines.len()
    }

    /// Whether no engine is registered.
    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }

    /// A registry without a single engine cannot do anything useful; that
    /// is a configuration error, not a quiet no-op.
    pub fn ensure_not_empty(&self) -> Result<()> {
        if self.engines.is_empty() {
            return Err(Error::EmptyEngineRegistry);
        }
        Ok(())
    }
}

/// Decides whether `candidate` runs for the requested identifier.
///
/// Matching is wildcard (`ALL`) or exact. Two exclusions narrow the match:
/// the `jnlp` engine never runs when skipped by configuration, and hosts
/// with an unclassifiable OS skip app-image engines entirely. One
/// carve-out widens it: on Linux with the cfg-file rename needed,
/// `linux.app` runs ahead of whatever else was requested (anything but
/// `jnlp` or `linux.app` itself) so later engines pick up the renamed
/// files — and the context records that this pass owes the installers
/// that propagation.
pub fn should_run(
    requested: &str,
    candidate: &dyn BundlerEngine,
    platform: &PlatformInfo,
    switches: &WorkaroundSwitches,
    ctx: &mut WorkaroundContext,
) -> bool {
    let id = candidate.id();

    if id == JNLP_ID && switches.skip_jnlp {
        log::debug!("skipping jnlp engine per configuration");
        return false;
    }
    if platform.os == OsFamily::Unknown && id.ends_with(".app") {
        log::warn!("host OS could not be classified, skipping app-image engine {id:?}");
        return false;
    }

    let matched = requested == ALL_ENGINES || requested == id;

    let carve = id == LINUX_APP_ID
        && platform.os == OsFamily::Linux
        && requested != JNLP_ID
        && requested != LINUX_APP_ID
        && workarounds::linux::cfg_file_rename_needed(platform)
        && !switches.skip_cfg_file_rename;
    if carve {
        if !matched {
            log::info!(
                "running {LINUX_APP_ID:?} ahead of the requested engine, \
                 its cfg files need fixing first"
            );
        }
        ctx.cfg_fix_requested = true;
    }

    matched || carve
}
