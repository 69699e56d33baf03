//! End-to-end orchestration tests with in-memory engines.

use fxpack::bundler::engine::{BundlerEngine, EngineRegistry};
use fxpack::bundler::error::{EngineError, EngineResult, Error};
use fxpack::bundler::orchestrator::{Orchestrator, OutputPaths};
use fxpack::bundler::params::ParameterMap;
use fxpack::bundler::platform::{OsFamily, PlatformInfo, ToolchainVersion};
use fxpack::bundler::settings::BundleConfig;
use std::path::Path;
use std::sync::{Arc, Mutex};

#[derive(Clone, Copy)]
enum Behavior {
    Succeed,
    Unsupported,
    ConfigError,
}

/// Engine that records its executions instead of producing artifacts.
struct RecordingEngine {
    id: &'static str,
    behavior: Behavior,
    executions: Arc<Mutex<Vec<String>>>,
}

impl BundlerEngine for RecordingEngine {
    fn id(&self) -> &str {
        self.id
    }

    fn name(&self) -> &str {
        self.id
    }

    fn validate(&self, _params: &ParameterMap) -> EngineResult<bool> {
        match self.behavior {
            Behavior::Succeed => Ok(true),
            Behavior::Unsupported => Err(EngineError::UnsupportedPlatform),
            Behavior::ConfigError => Err(EngineError::Config {
                message: "missing something".to_string(),
                advice: "configure it".to_string(),
            }),
        }
    }

    fn execute(&self, _params: &ParameterMap, _output_dir: &Path) -> EngineResult<()> {
        self.executions
            .lock()
            .expect("executions lock")
            .push(self.id.to_string());
        Ok(())
    }
}

struct Harness {
    executions: Arc<Mutex<Vec<String>>>,
    registry: EngineRegistry,
    paths: OutputPaths,
}

impl Harness {
    fn new() -> Self {
        // kept (not dropped) so the directories outlive the orchestrator
        let app_dir = tempfile::tempdir().expect("app dir").keep();
        let native_dir = tempfile::tempdir().expect("native dir").keep();
        let paths = OutputPaths {
            app_output_dir: app_dir,
            native_output_dir: native_dir,
            project_root: std::env::current_dir().expect("cwd"),
        };
        Self {
            executions: Arc::new(Mutex::new(Vec::new())),
            registry: EngineRegistry::new(),
            paths,
        }
    }

    fn engine(&mut self, id: &'static str, behavior: Behavior) {
        self.registry.register(Box::new(RecordingEngine {
            id,
            behavior,
            executions: Arc::clone(&self.executions),
        }));
    }

    fn orchestrator(self, config: BundleConfig, requested: &str) -> (Orchestrator, Arc<Mutex<Vec<String>>>) {
        let platform = PlatformInfo::new(OsFamily::Linux, ToolchainVersion::new(8, 60));
        let executions = Arc::clone(&self.executions);
        (
            Orchestrator::new(config, platform, self.registry, self.paths, requested),
            executions,
        )
    }

    fn executed(executions: &Arc<Mutex<Vec<String>>>) -> Vec<String> {
        executions.lock().expect("executions lock").clone()
    }
}

fn minimal_config() -> BundleConfig {
    BundleConfig::from_toml_str(
        r#"
        [app]
        app_name = "demo"
        vendor = "acme"
        main_class = "com.acme.Main"
        main_jar = "demo.jar"

        [switches]
        skip_main_class_scan = true
        "#,
    )
    .expect("config")
}

#[tokio::test]
async fn engines_run_in_registration_order() {
    let mut harness = Harness::new();
    harness.engine("alpha", Behavior::Succeed);
    harness.engine("beta", Behavior::Succeed);

    let (orchestrator, executions) = harness.orchestrator(minimal_config(), "ALL");
    let report = orchestrator.run().await.expect("run");

    assert_eq!(report.executed, vec!["alpha", "beta"]);
    assert_eq!(Harness::executed(&executions), vec!["alpha", "beta"]);
}

#[tokio::test]
async fn duplicate_launcher_names_abort_before_any_engine() {
    let mut config = minimal_config();
    config.app.secondary_launchers.push(Default::default());
    config.app.secondary_launchers[0].app_name = "demo".to_string();

    let mut harness = Harness::new();
    harness.engine("alpha", Behavior::Succeed);
    let (orchestrator, executions) = harness.orchestrator(config, "ALL");

    let err = orchestrator.run().await.expect_err("duplicate names");
    assert!(matches!(err, Error::LauncherConfiguration(_)));
    assert!(Harness::executed(&executions).is_empty());
}

#[tokio::test]
async fn colliding_bundle_arguments_abort_before_any_engine() {
    let mut config = minimal_config();
    config
        .bundle_arguments
        .insert("name".to_string(), "other".to_string());

    let mut harness = Harness::new();
    harness.engine("alpha", Behavior::Succeed);
    let (orchestrator, executions) = harness.orchestrator(config, "ALL");

    let err = orchestrator.run().await.expect_err("collision");
    match err {
        Error::DuplicateBundleArguments { keys } => assert_eq!(keys, vec!["name"]),
        other => panic!("unexpected error: {other}"),
    }
    assert!(Harness::executed(&executions).is_empty());
}

#[tokio::test]
async fn unsupported_platform_engines_are_skipped_silently() {
    let mut harness = Harness::new();
    harness.engine("alpha", Behavior::Unsupported);
    harness.engine("beta", Behavior::Succeed);

    let (orchestrator, executions) = harness.orchestrator(minimal_config(), "ALL");
    let report = orchestrator.run().await.expect("run");

    assert_eq!(report.executed, vec!["beta"]);
    assert_eq!(Harness::executed(&executions), vec!["beta"]);
}

#[tokio::test]
async fn config_errors_follow_the_failure_policy() {
    // lenient: log and keep going
    let mut harness = Harness::new();
    harness.engine("alpha", Behavior::ConfigError);
    harness.engine("beta", Behavior::Succeed);
    let (orchestrator, executions) = harness.orchestrator(minimal_config(), "ALL");
    let report = orchestrator.run().await.expect("lenient run");
    assert_eq!(report.executed, vec!["beta"]);
    assert_eq!(Harness::executed(&executions), vec!["beta"]);

    // strict: abort on the first configuration error
    let mut config = minimal_config();
    config.switches.fail_on_error = true;
    let mut harness = Harness::new();
    harness.engine("alpha", Behavior::ConfigError);
    harness.engine("beta", Behavior::Succeed);
    let (orchestrator, executions) = harness.orchestrator(config, "ALL");
    let err = orchestrator.run().await.expect_err("strict run");
    assert!(matches!(err, Error::EngineConfig { .. }));
    assert!(Harness::executed(&executions).is_empty());
}

#[tokio::test]
async fn installer_request_runs_the_linux_app_engine_first() {
    let mut harness = Harness::new();
    harness.engine("linux.app", Behavior::Succeed);
    harness.engine("deb", Behavior::Succeed);

    // platform is Linux 8u60, so the cfg-rename carve-out applies
    let (orchestrator, executions) = harness.orchestrator(minimal_config(), "deb");
    let report = orchestrator.run().await.expect("run");

    assert_eq!(report.executed, vec!["linux.app", "deb"]);
    assert_eq!(Harness::executed(&executions), vec!["linux.app", "deb"]);
}

#[tokio::test]
async fn skip_jnlp_excludes_the_jnlp_engine() {
    let mut config = minimal_config();
    config.switches.skip_jnlp = true;
    config
        .bundle_arguments
        .insert("jnlp.outfile".to_string(), "demo.jnlp".to_string());

    let mut harness = Harness::new();
    harness.engine("jnlp", Behavior::Succeed);
    harness.engine("beta", Behavior::Succeed);

    let (orchestrator, executions) = harness.orchestrator(config, "ALL");
    let report = orchestrator.run().await.expect("run");
    assert_eq!(report.executed, vec!["beta"]);
    assert_eq!(Harness::executed(&executions), vec!["beta"]);
}

#[tokio::test]
async fn jnlp_engine_needs_an_outfile() {
    // lenient: skipped with a warning
    let mut harness = Harness::new();
    harness.engine("jnlp", Behavior::Succeed);
    let (orchestrator, executions) = harness.orchestrator(minimal_config(), "jnlp");
    let report = orchestrator.run().await.expect("lenient run");
    assert!(report.executed.is_empty());
    assert!(Harness::executed(&executions).is_empty());

    // strict: fatal
    let mut config = minimal_config();
    config.switches.fail_on_error = true;
    let mut harness = Harness::new();
    harness.engine("jnlp", Behavior::Succeed);
    let (orchestrator, _) = harness.orchestrator(config, "jnlp");
    let err = orchestrator.run().await.expect_err("strict run");
    assert!(matches!(err, Error::EngineConfig { .. }));

    // with an outfile the engine runs and its output gets post-processed
    let mut config = minimal_config();
    config
        .bundle_arguments
        .insert("jnlp.outfile".to_string(), "demo.jnlp".to_string());
    let mut harness = Harness::new();
    harness.engine("jnlp", Behavior::Succeed);
    let (orchestrator, executions) = harness.orchestrator(config, "jnlp");
    let report = orchestrator.run().await.expect("run");
    assert_eq!(report.executed, vec!["jnlp"]);
    assert_eq!(Harness::executed(&executions), vec!["jnlp"]);
}

#[tokio::test]
async fn zero_candidates_follow_the_failure_policy() {
    let mut harness = Harness::new();
    harness.engine("alpha", Behavior::Succeed);
    let (orchestrator, _) = harness.orchestrator(minimal_config(), "nonexistent");
    let report = orchestrator.run().await.expect("lenient run");
    assert!(report.executed.is_empty());

    let mut config = minimal_config();
    config.switches.fail_on_error = true;
    let mut harness = Harness::new();
    harness.engine("alpha", Behavior::Succeed);
    let (orchestrator, _) = harness.orchestrator(config, "nonexistent");
    let err = orchestrator.run().await.expect_err("strict run");
    assert!(matches!(err, Error::NoEngineMatched(_)));
}

#[tokio::test]
async fn empty_registry_is_fatal() {
    let harness = Harness::new();
    let (orchestrator, _) = harness.orchestrator(minimal_config(), "ALL");
    let err = orchestrator.run().await.expect_err("empty registry");
    assert!(matches!(err, Error::EmptyEngineRegistry));
}
