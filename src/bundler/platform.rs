//! Host platform and toolchain detection.
//!
//! Everything downstream receives a [`PlatformInfo`] value instead of
//! reading the environment itself, so the whole conditional-workaround
//! matrix can be tested by substitution.

use crate::bundler::error::Result;
use std::path::Path;

/// Host operating system family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    /// Microsoft Windows
    Windows,
    /// Linux distributions
    Linux,
    /// Apple macOS
    Mac,
    /// Could not be classified; app-image bundling is skipped on such hosts
    Unknown,
}

impl OsFamily {
    /// Classifies the host this process runs on.
    pub fn current() -> Self {
        match std::env::consts::OS {
            "windows" => OsFamily::Windows,
            "linux" => OsFamily::Linux,
            "macos" => OsFamily::Mac,
            _ => OsFamily::Unknown,
        }
    }
}

/// Version of the packaging toolchain the bundler engines belong to.
///
/// The legacy scheme (`1.8.0_92`) carries the interesting information in the
/// update number; the modern scheme (`9`, `9.0.1`) has no update concept and
/// parses with `update == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToolchainVersion {
    /// Major version (8, 9, ...)
    pub major: u32,
    /// Update number within a legacy major release (the `_NN` suffix)
    pub update: u32,
}

impl ToolchainVersion {
    /// Creates a version from its parts.
    pub fn new(major: u32, update: u32) -> Self {
        Self { major, update }
    }

    /// Parses a toolchain version string.
    ///
    /// Accepts the legacy `1.8.0_45`, vendor-suffixed `1.8.0_45-internal`
    /// and modern `9` / `9.0.1` forms. Returns `None` when no major version
    /// can be extracted.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        let (version_part, update_part) = match raw.split_once('_') {
            Some((v, u)) => (v, Some(u)),
            None => (raw, None),
        };

        let major = if let Some(rest) = version_part.strip_prefix("1.") {
            rest.split('.').next()?.parse::<u32>().ok()?
        } else {
            let digits: String = version_part
                .chars()
                .take_while(|c| c.is_ascii_digit())
                .collect();
            digits.parse::<u32>().ok()?
        };

        // vendor builds report things like "45-internal"; keep the digits only
        let update = update_part
            .map(|u| u.chars().filter(|c| c.is_ascii_digit()).collect::<String>())
            .and_then(|digits| digits.parse::<u32>().ok())
            .unwrap_or(0);

        Some(Self { major, update })
    }

    /// Whether this is the given major version.
    pub fn is_major(&self, major: u32) -> bool {
        self.major == major
    }

    /// Whether the update number is at least the given one.
    pub fn at_least_update(&self, update: u32) -> bool {
        self.update >= update
    }
}

/// Immutable view of the host the orchestration pass runs on.
///
/// Constructed once per run and injected into every workaround predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformInfo {
    /// Host OS family
    pub os: OsFamily,
    /// Version of the packaging toolchain
    pub toolchain: ToolchainVersion,
}

impl PlatformInfo {
    /// Creates a platform description from known values (used in tests and
    /// by explicit CLI overrides).
    pub fn new(os: OsFamily, toolchain: ToolchainVersion) -> Self {
        Self { os, toolchain }
    }

    /// Detects the host platform and probes the toolchain version by
    /// running `<java> -version`.
    ///
    /// A probe failure is not fatal: the OS stays whatever the host
    /// reports and the toolchain defaults to `0.0`, which makes every
    /// version-gated workaround predicate answer "not needed".
    pub async fn detect(java_executable: Option<&Path>) -> Result<Self> {
        let os = OsFamily::current();

        let exe = match java_executable {
            Some(path) => path.to_path_buf(),
            None => match which::which("java") {
                Ok(path) => path,
                Err(e) => {
                    log::warn!("java executable not found ({e}); toolchain version unknown");
                    return Ok(Self::new(os, ToolchainVersion::default()));
                }
            },
        };

        let output = tokio::process::Command::new(&exe)
            .arg("-version")
            .output()
            .await;

        let toolchain = match output {
            Ok(out) => {
                // `java -version` historically prints to stderr
                let text = String::from_utf8_lossy(&out.stderr);
                let text = if text.trim().is_empty() {
                    String::from_utf8_lossy(&out.stdout).into_owned()
                } else {
                    text.into_owned()
                };
                match parse_version_banner(&text) {
                    Some(version) => version,
                    None => {
                        log::warn!("could not parse toolchain version from {exe:?} output");
                        ToolchainVersion::default()
                    }
                }
            }
            Err(e) => {
                log::warn!("probing {exe:?} failed ({e}); toolchain version unknown");
                ToolchainVersion::default()
            }
        };

        Ok(Self::new(os, toolchain))
    }
}

/// Extracts the toolchain version from a `java -version` banner.
///
/// The banner's first line looks like `java version "1.8.0_92"` or
/// `openjdk version "9.0.1"`; the quoted value is what we parse.
pub fn parse_version_banner(banner: &str) -> Option<ToolchainVersion> {
    let first_line = banner.lines().find(|line| line.contains("version"))?;
    let start = first_line.find('"')? + 1;
    let end = first_line[start..].find('"')? + start;
    ToolchainVersion::parse(&first_line[start..end])
}
