//! Application resource discovery.
//!
//! A [`ResourceSet`] is the payload contract handed to bundler engines: a
//! base directory plus every readable file beneath it, materialized into an
//! in-memory set before any engine runs. It is computed once per bundling
//! pass and never mutated afterwards; workarounds that need to adjust the
//! payload do so by *adding* further sets, not by editing this one.

use crate::bundler::error::Result;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// A base directory and the set of files beneath it, stored relative to
/// that base.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceSet {
    base_dir: PathBuf,
    files: BTreeSet<PathBuf>,
}

impl ResourceSet {
    /// Creates a resource set from a base directory and relative paths.
    pub fn new<I>(base_dir: impl Into<PathBuf>, files: I) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        Self {
            base_dir: base_dir.into(),
            files: files.into_iter().collect(),
        }
    }

    /// Walks `base_dir` exhaustively and gathers every readable file.
    ///
    /// Unreadable entries are skipped with a warning; a missing base
    /// directory yields an empty set rather than an error, because engines
    /// validate their own inputs later.
    pub async fn walk(base_dir: &Path) -> Result<Self> {
        let base = base_dir.to_path_buf();
        let files = tokio::task::spawn_blocking(move || collect_relative_files(&base))
            .await
            .map_err(|e| {
                crate::bundler::error::Error::GenericError(format!(
                    "resource walk task panicked: {e}"
                ))
            })?;

        Ok(Self {
            base_dir: base_dir.to_path_buf(),
            files,
        })
    }

    /// The directory all file paths are relative to.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// The relative file paths in this set.
    pub fn files(&self) -> &BTreeSet<PathBuf> {
        &self.files
    }

    /// Absolute path of every file in the set.
    pub fn absolute_files(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.files.iter().map(|rel| self.base_dir.join(rel))
    }

    /// Whether the set holds no files.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Number of files in the set.
    pub fn len(&self) -> usize {
        self.files.len()
    }
}

fn collect_relative_files(base: &Path) -> BTreeSet<PathBuf> {
    let mut files = BTreeSet::new();
    if !base.is_dir() {
        return files;
    }
    for entry in walkdir::WalkDir::new(base) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("skipping unreadable entry under {base:?}: {e}");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        // engines read these later, so only advertise what we can open
        if std::fs::File::open(entry.path()).is_err() {
            log::warn!("skipping unreadable file {:?}", entry.path());
            continue;
        }
        if let Ok(rel) = entry.path().strip_prefix(base) {
            log::debug!("adding {:?} to application resources", entry.path());
            files.insert(rel.to_path_buf());
        }
    }
    files
}
