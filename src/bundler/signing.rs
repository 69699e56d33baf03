//! Jar signing via external tools.
//!
//! Two mutually exclusive strategies: one combined invocation of the
//! packager's signing routine covering the whole batch, or one signer call
//! per jar. Preconditions are enforced before any subprocess is spawned;
//! once spawning started, a failure aborts the remaining work but already
//! signed jars are not rolled back.

use crate::bundler::error::{Error, Result};
use crate::bundler::settings::{KeystoreSettings, WorkaroundSwitches};
use std::path::{Path, PathBuf};
use std::process::Stdio;

/// A validated signing request.
///
/// Constructed through [`SigningRequest::from_settings`], which enforces
/// the preconditions; the struct itself is inert data afterwards.
#[derive(Debug, Clone)]
pub struct SigningRequest {
    /// Keystore file.
    pub keystore: PathBuf,
    /// Keystore alias.
    pub alias: String,
    /// Store password.
    pub store_password: String,
    /// Key password; already fallen back to the store password when the
    /// configuration left it unset.
    pub key_password: String,
    /// Keystore type.
    pub store_type: String,
    /// Verbatim pass-through arguments for the per-jar signer.
    pub passthrough_args: Vec<String>,
    /// Omit `-keypass` entirely in per-jar mode.
    pub skip_keypass: bool,
    /// Ask the tools for verbose output.
    pub verbose: bool,
}

impl SigningRequest {
    /// Validates the signing configuration and builds a request.
    ///
    /// Fatal configuration errors: missing keystore (unless checking is
    /// skipped), empty alias, empty store password. The key password falls
    /// back to the store password when unset.
    pub fn from_settings(
        keystore: &KeystoreSettings,
        switches: &WorkaroundSwitches,
        verbose: bool,
    ) -> Result<Self> {
        if switches.skip_keystore_check {
            log::info!("skipped checking if keystore exists");
        } else if !keystore.keystore.exists() {
            return Err(Error::SigningPrecondition(format!(
                "keystore does not exist (expected at {:?})",
                keystore.keystore
            )));
        }

        if keystore.alias.trim().is_empty() {
            return Err(Error::SigningPrecondition(
                "an alias is required for signing jars".to_string(),
            ));
        }

        if keystore.store_password.is_empty() {
            return Err(Error::SigningPrecondition(
                "a store password is required for signing jars".to_string(),
            ));
        }

        let key_password = keystore
            .key_password
            .clone()
            .unwrap_or_else(|| keystore.store_password.clone());

        Ok(Self {
            keystore: keystore.keystore.clone(),
            alias: keystore.alias.clone(),
            store_password: keystore.store_password.clone(),
            key_password,
            store_type: keystore.store_type.clone(),
            passthrough_args: keystore.additional_signer_args.clone(),
            skip_keypass: switches.skip_keypass,
            verbose,
        })
    }

    /// Builds the argument vector for one per-jar signer invocation.
    ///
    /// Order matters to the tool: pass-through arguments first with
    /// `-keystore` injected when none of them names one, then `-strict`,
    /// `-storepass`, optionally `-keypass`, the jar path, the alias and
    /// optionally `-verbose`.
    pub fn signer_arguments(&self, jar: &Path) -> Vec<String> {
        let mut args = Vec::new();

        // pass-through args may carry their own keystore (non-file stores)
        let contains_keystore = self
            .passthrough_args
            .iter()
            .any(|arg| arg.trim().eq_ignore_ascii_case("-keystore"));
        args.extend(self.passthrough_args.iter().cloned());

        if !contains_keystore {
            args.push("-keystore".to_string());
            args.push(self.keystore.display().to_string());
        }

        args.push("-strict".to_string());

        args.push("-storepass".to_string());
        args.push(self.store_password.clone());

        if !self.skip_keypass {
            args.push("-keypass".to_string());
            args.push(self.key_password.clone());
        }

        args.push(jar.display().to_string());
        args.push(self.alias.clone());

        if self.verbose {
            args.push("-verbose".to_string());
        }

        args
    }

    /// Signs each jar with its own signer call, in the given order.
    ///
    /// Standard I/O is inherited and every call is waited on to completion;
    /// the first non-zero exit aborts the remaining jars and surfaces as
    /// the error. Jars signed before the failure stay signed.
    pub async fn sign_jars_individually(
        &self,
        signer_tool: &Path,
        jars: &[PathBuf],
        project_root: &Path,
    ) -> Result<()> {
        for jar in jars {
            let args = self.signer_arguments(jar);
            if self.verbose {
                log::info!(
                    "running command: {} {}",
                    signer_tool.display(),
                    args.join(" ")
                );
            }
            log::info!("signing {jar:?}");

            let status = tokio::process::Command::new(signer_tool)
                .args(&args)
                .current_dir(project_root)
                .stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit())
                .status()
                .await
                .map_err(|e| Error::GenericError(format!("cannot spawn signer for {jar:?}: {e}")))?;

            if !status.success() {
                return Err(Error::SignerFailed { jar: jar.clone() });
            }
        }
        Ok(())
    }

    /// Signs the whole batch with a single combined packager invocation.
    ///
    /// All-or-nothing: the external call either succeeds for every jar or
    /// the batch fails as one unit.
    pub async fn sign_jars_combined(
        &self,
        packager_tool: &Path,
        native_output_dir: &Path,
        jars: &[PathBuf],
        project_root: &Path,
    ) -> Result<()> {
        let args = self.combined_arguments(native_output_dir, jars);
        if self.verbose {
            log::info!(
                "running command: {} {}",
                packager_tool.display(),
                args.join(" ")
            );
        }
        log::info!("signing {} jar file(s) in one combined call", jars.len());

        let status = tokio::process::Command::new(packager_tool)
            .args(&args)
            .current_dir(project_root)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| Error::BlobSigningFailed {
                count: jars.len(),
                reason: format!("cannot spawn packager: {e}"),
            })?;

        if !status.success() {
            return Err(Error::BlobSigningFailed {
                count: jars.len(),
                reason: format!("packager exited with {status}"),
            });
        }
        Ok(())
    }

    /// Builds the argument vector for the combined signing invocation.
    pub fn combined_arguments(&self, native_output_dir: &Path, jars: &[PathBuf]) -> Vec<String> {
        let mut args = vec![
            "-signJar".to_string(),
            "-keyStore".to_string(),
            self.keystore.display().to_string(),
            "-alias".to_string(),
            self.alias.clone(),
            "-storePass".to_string(),
            self.store_password.clone(),
            "-keyPass".to_string(),
            self.key_password.clone(),
            "-storeType".to_string(),
            self.store_type.clone(),
            "-outdir".to_string(),
            native_output_dir.display().to_string(),
            "-srcdir".to_string(),
            native_output_dir.display().to_string(),
        ];
        for jar in jars {
            args.push("-srcfiles".to_string());
            args.push(jar.display().to_string());
        }
        if self.verbose {
            args.push("-verbose".to_string());
        }
        args
    }
}

/// Resolves an external tool: explicit path wins, otherwise `PATH` lookup.
pub fn resolve_tool(explicit: Option<&Path>, name: &str) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(which::which(name)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keystore_in(dir: &Path) -> KeystoreSettings {
        let path = dir.join("keystore.jks");
        std::fs::write(&path, b"store").unwrap();
        KeystoreSettings {
            keystore: path,
            alias: "myalias".to_string(),
            store_password: "storepw".to_string(),
            key_password: Some("keypw".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn missing_keystore_is_fatal_unless_check_skipped() {
        let settings = KeystoreSettings {
            keystore: PathBuf::from("/definitely/not/here.jks"),
            alias: "a".to_string(),
            store_password: "pw".to_string(),
            ..Default::default()
        };

        let err =
            SigningRequest::from_settings(&settings, &WorkaroundSwitches::default(), false)
                .unwrap_err();
        assert!(err.to_string().contains("keystore does not exist"));

        let switches = WorkaroundSwitches {
            skip_keystore_check: true,
            ..Default::default()
        };
        assert!(SigningRequest::from_settings(&settings, &switches, false).is_ok());
    }

    #[test]
    fn empty_alias_or_store_password_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = keystore_in(dir.path());
        settings.alias = "  ".to_string();
        assert!(
            SigningRequest::from_settings(&settings, &WorkaroundSwitches::default(), false)
                .is_err()
        );

        let mut settings = keystore_in(dir.path());
        settings.store_password = String::new();
        assert!(
            SigningRequest::from_settings(&settings, &WorkaroundSwitches::default(), false)
                .is_err()
        );
    }

    #[test]
    fn key_password_falls_back_to_store_password() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = keystore_in(dir.path());
        settings.key_password = None;

        let request =
            SigningRequest::from_settings(&settings, &WorkaroundSwitches::default(), false)
                .unwrap();
        assert_eq!(request.key_password, "storepw");
    }

    #[test]
    fn signer_arguments_follow_the_documented_order() {
        let dir = tempfile::tempdir().unwrap();
        let settings = keystore_in(dir.path());
        let request =
            SigningRequest::from_settings(&settings, &WorkaroundSwitches::default(), true)
                .unwrap();

        let args = request.signer_arguments(Path::new("out/app.jar"));
        let keystore = settings.keystore.display().to_string();
        assert_eq!(
            args,
            vec![
                "-keystore",
                keystore.as_str(),
                "-strict",
                "-storepass",
                "storepw",
                "-keypass",
                "keypw",
                "out/app.jar",
                "myalias",
                "-verbose",
            ]
        );
    }

    #[test]
    fn skip_keypass_omits_the_keypass_pair_entirely() {
        let dir = tempfile::tempdir().unwrap();
        let settings = keystore_in(dir.path());
        let switches = WorkaroundSwitches {
            skip_keypass: true,
            ..Default::default()
        };
        let request = SigningRequest::from_settings(&settings, &switches, false).unwrap();

        let args = request.signer_arguments(Path::new("app.jar"));
        assert!(!args.contains(&"-keypass".to_string()));
        assert!(!args.contains(&"keypw".to_string()));
    }

    #[test]
    fn passthrough_keystore_suppresses_injection() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = keystore_in(dir.path());
        settings.additional_signer_args = vec![
            "-keystore".to_string(),
            "NONE".to_string(),
            "-tsa".to_string(),
            "http://tsa.example".to_string(),
        ];
        let request =
            SigningRequest::from_settings(&settings, &WorkaroundSwitches::default(), false)
                .unwrap();

        let args = request.signer_arguments(Path::new("app.jar"));
        // exactly one -keystore: the pass-through one, before -strict
        assert_eq!(args.iter().filter(|a| *a == "-keystore").count(), 1);
        let keystore_pos = args.iter().position(|a| a == "-keystore").unwrap();
        let strict_pos = args.iter().position(|a| a == "-strict").unwrap();
        assert!(keystore_pos < strict_pos);
    }

    #[test]
    fn combined_arguments_list_every_jar() {
        let dir = tempfile::tempdir().unwrap();
        let settings = keystore_in(dir.path());
        let request =
            SigningRequest::from_settings(&settings, &WorkaroundSwitches::default(), false)
                .unwrap();

        let jars = vec![PathBuf::from("app.jar"), PathBuf::from("lib/dep.jar")];
        let args = request.combined_arguments(Path::new("native"), &jars);
        assert_eq!(args.iter().filter(|a| *a == "-srcfiles").count(), 2);
        assert!(args.contains(&"app.jar".to_string()));
        assert!(args.contains(&"lib/dep.jar".to_string()));
        assert_eq!(args[0], "-signJar");
    }
}
