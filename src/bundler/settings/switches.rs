//! Per-workaround skip flags and the failure policy.
//!
//! Each generation of the packaging toolchain ships its own set of defects;
//! the corrections default to on and every one of them can be disabled
//! individually when a fixed toolchain makes it obsolete.

/// Feature switches controlling workaround application and failure policy.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(default)]
pub struct WorkaroundSwitches {
    /// Skip renaming the generated runtime cfg file when the launcher name
    /// contains a version-like dot.
    pub skip_cfg_file_rename: bool,

    /// Skip propagating renamed cfg files into installer resources.
    pub skip_installer_cfg_propagation: bool,

    /// Skip forcing the legacy property-file cfg format for runtime-less
    /// bundles.
    pub skip_legacy_cfg_format: bool,

    /// Skip rewriting backslash jar paths inside generated JNLP files.
    pub skip_jnlp_path_fix: bool,

    /// Skip signing the jars referenced from generated JNLP files.
    pub skip_jnlp_jar_signing: bool,

    /// Skip recalculating jar sizes inside JNLP files after signing.
    pub skip_jnlp_size_recalc: bool,

    /// Skip substituting the extended mac.app engine.
    pub skip_mac_engine_substitution: bool,

    /// Sign each jar with its own external signer call instead of one
    /// combined (blob) invocation.
    pub per_jar_signing: bool,

    /// Never run the jnlp engine.
    pub skip_jnlp: bool,

    /// Promote per-engine configuration errors and missed candidates to
    /// fatal errors instead of warnings.
    pub fail_on_error: bool,

    /// Drop the built-in engines and use only the registered custom ones.
    pub only_custom_engines: bool,

    /// Keep the release version verbatim instead of reducing it to digits
    /// and dots.
    pub skip_version_sanitizing: bool,

    /// Skip the keystore file-existence check.
    pub skip_keystore_check: bool,

    /// Omit the key password argument entirely when signing per jar.
    pub skip_keypass: bool,

    /// Skip scanning the resource jars for the configured main class.
    pub skip_main_class_scan: bool,
}
