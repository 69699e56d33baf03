//! Patching of generated JNLP deployment descriptors.
//!
//! The generating engine emits one fixed-shape line per jar reference;
//! everything here is deliberately line-oriented text patching against that
//! single pattern, isolated behind [`JnlpPatcher`] so a structured-XML
//! implementation could replace it without touching the orchestrator.
//! Non-matching lines always pass through untouched, and read/write
//! failures are warnings, never run-aborting errors.

use crate::bundler::error::Result;
use regex::Regex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// The jar-reference line shape, evaluated once per line.
///
/// Group 2 is the quoted href, group 4 the quoted size.
const JNLP_JAR_PATTERN: &str = r#"(.*)href=(".*?")(.*)size=(".*?")(.*)"#;

/// Rewrites generated `*.jnlp` files underneath the native output
/// directory.
pub struct JnlpPatcher {
    native_output_dir: PathBuf,
    pattern: Regex,
}

impl JnlpPatcher {
    /// Creates a patcher rooted at the native output directory.
    pub fn new(native_output_dir: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            native_output_dir: native_output_dir.into(),
            pattern: Regex::new(JNLP_JAR_PATTERN)?,
        })
    }

    /// Finds every generated `.jnlp` file under the native output
    /// directory. Walk errors are logged and skipped.
    pub async fn discover(&self) -> Vec<PathBuf> {
        let root = self.native_output_dir.clone();
        let walk = tokio::task::spawn_blocking(move || {
            let mut found = Vec::new();
            for entry in walkdir::WalkDir::new(&root) {
                match entry {
                    Ok(entry) => {
                        if entry.file_type().is_file()
                            && entry.path().extension().and_then(|e| e.to_str()) == Some("jnlp")
                        {
                            found.push(entry.path().to_path_buf());
                        }
                    }
                    Err(e) => log::warn!("skipping entry while searching JNLP files: {e}"),
                }
            }
            found
        })
        .await;

        match walk {
            Ok(found) => found,
            Err(e) => {
                log::warn!("JNLP discovery task panicked: {e}");
                Vec::new()
            }
        }
    }

    /// Replaces backslashes with forward slashes inside the href group of
    /// every jar-reference line, rewriting each file in full.
    pub async fn fix_paths(&self) {
        for file in self.discover().await {
            self.rewrite_file(&file, |pattern, line| fix_paths_in_line(pattern, line))
                .await;
        }
    }

    /// Extracts the quote-stripped href of every `<jar href=` line across
    /// all discovered files, in discovery order.
    pub async fn jar_references(&self) -> Vec<String> {
        let mut references = Vec::new();
        for file in self.discover().await {
            let content = match tokio::fs::read_to_string(&file).await {
                Ok(content) => content,
                Err(e) => {
                    log::warn!("cannot read JNLP file {file:?}: {e}");
                    continue;
                }
            };
            for line in content.lines() {
                if let Some(reference) = extract_jar_reference(&self.pattern, line) {
                    references.push(reference);
                }
            }
        }
        references
    }

    /// Replaces the size group of every jar-reference line whose href is a
    /// known key in `sizes`; unknown files pass through unmodified.
    pub async fn recalculate_sizes(&self, sizes: &BTreeMap<String, u64>) {
        for file in self.discover().await {
            self.rewrite_file(&file, |pattern, line| {
                recalculate_line(pattern, line, sizes)
            })
            .await;
        }
    }

    /// Byte lengths of the given relative jar paths, resolved against the
    /// native output directory. Missing files are simply absent from the
    /// result.
    pub async fn collect_sizes(&self, references: &[String]) -> BTreeMap<String, u64> {
        let mut sizes = BTreeMap::new();
        for reference in references {
            let path = self.native_output_dir.join(reference);
            match tokio::fs::metadata(&path).await {
                Ok(meta) => {
                    sizes.insert(reference.clone(), meta.len());
                }
                Err(e) => log::warn!("cannot size {path:?}: {e}"),
            }
        }
        sizes
    }

    async fn rewrite_file<F>(&self, file: &Path, transform: F)
    where
        F: Fn(&Regex, &str) -> String,
    {
        let content = match tokio::fs::read_to_string(file).await {
            Ok(content) => content,
            Err(e) => {
                log::warn!("cannot read JNLP file {file:?}: {e}");
                return;
            }
        };

        let mut patched: String = content
            .lines()
            .map(|line| transform(&self.pattern, line))
            .collect::<Vec<_>>()
            .join("\n");
        if content.ends_with('\n') {
            patched.push('\n');
        }

        if let Err(e) = tokio::fs::write(file, patched).await {
            log::warn!("cannot rewrite JNLP file {file:?}: {e}");
        }
    }
}

/// Rewrites one line: backslashes inside the href group become forward
/// slashes, everything else stays byte-identical.
pub fn fix_paths_in_line(pattern: &Regex, line: &str) -> String {
    let captures = match pattern.captures(line) {
        Some(captures) => captures,
        None => return line.to_string(),
    };
    let raw_href = &captures[2];
    if !raw_href.contains('\\') {
        return line.to_string();
    }
    format!(
        "{}href={}{}size={}{}",
        &captures[1],
        raw_href.replace('\\', "/"),
        &captures[3],
        &captures[4],
        &captures[5]
    )
}

/// Extracts the quote-stripped jar reference of a `<jar href=` line.
pub fn extract_jar_reference(pattern: &Regex, line: &str) -> Option<String> {
    if !line.trim_start().starts_with("<jar href=") {
        return None;
    }
    let captures = pattern.captures(line)?;
    let raw = &captures[2];
    Some(raw[1..raw.len() - 1].to_string())
}

/// Rewrites one line: the size group is replaced with the known byte
/// length of the referenced file, when known.
pub fn recalculate_line(pattern: &Regex, line: &str, sizes: &BTreeMap<String, u64>) -> String {
    let captures = match pattern.captures(line) {
        Some(captures) => captures,
        None => return line.to_string(),
    };
    let raw_href = &captures[2];
    let href = &raw_href[1..raw_href.len() - 1];
    match sizes.get(href) {
        Some(size) => format!(
            "{}href={}{}size=\"{}\"{}",
            &captures[1], raw_href, &captures[3], size, &captures[5]
        ),
        None => line.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern() -> Regex {
        Regex::new(JNLP_JAR_PATTERN).unwrap()
    }

    #[test]
    fn fix_paths_is_noop_without_backslashes() {
        let line = r#"        <jar href="lib/dep.jar" size="1234" download="eager" />"#;
        assert_eq!(fix_paths_in_line(&pattern(), line), line);
    }

    #[test]
    fn fix_paths_touches_only_the_href_group() {
        let line = r#"        <jar href="lib\dep.jar" size="12\34" />"#;
        let fixed = fix_paths_in_line(&pattern(), line);
        assert_eq!(fixed, r#"        <jar href="lib/dep.jar" size="12\34" />"#);
    }

    #[test]
    fn non_matching_lines_pass_through() {
        let line = "<information>";
        assert_eq!(fix_paths_in_line(&pattern(), line), line);
        assert_eq!(
            recalculate_line(&pattern(), line, &BTreeMap::new()),
            line
        );
    }

    #[test]
    fn extracts_quoted_jar_reference() {
        let line = r#"    <jar href="lib/dep.jar" size="99" />"#;
        assert_eq!(
            extract_jar_reference(&pattern(), line),
            Some("lib/dep.jar".to_string())
        );
        // not a jar line, even though it matches the pattern shape
        let other = r#"    <icon href="logo.png" size="10" />"#;
        assert_eq!(extract_jar_reference(&pattern(), other), None);
    }

    #[test]
    fn recalculate_replaces_known_sizes_and_is_idempotent() {
        let mut sizes = BTreeMap::new();
        sizes.insert("app.jar".to_string(), 4096u64);

        let line = r#"<jar href="app.jar" size="17" main="true" />"#;
        let once = recalculate_line(&pattern(), line, &sizes);
        assert_eq!(once, r#"<jar href="app.jar" size="4096" main="true" />"#);
        let twice = recalculate_line(&pattern(), &once, &sizes);
        assert_eq!(twice, once);
    }

    #[test]
    fn recalculate_passes_unknown_files_through() {
        let sizes = BTreeMap::new();
        let line = r#"<jar href="unknown.jar" size="17" />"#;
        assert_eq!(recalculate_line(&pattern(), line, &sizes), line);
    }

    #[tokio::test]
    async fn patcher_rewrites_files_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let jnlp = dir.path().join("app.jnlp");
        std::fs::write(
            &jnlp,
            "<jnlp>\n  <jar href=\"lib\\dep.jar\" size=\"1\" />\n</jnlp>\n",
        )
        .unwrap();

        let patcher = JnlpPatcher::new(dir.path()).unwrap();
        patcher.fix_paths().await;

        let content = std::fs::read_to_string(&jnlp).unwrap();
        assert!(content.contains(r#"href="lib/dep.jar""#));
        assert!(content.ends_with("</jnlp>\n"));

        assert_eq!(patcher.jar_references().await, vec!["lib/dep.jar"]);
    }

    #[tokio::test]
    async fn collect_sizes_skips_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("lib")).unwrap();
        std::fs::write(dir.path().join("lib/dep.jar"), vec![0u8; 321]).unwrap();

        let patcher = JnlpPatcher::new(dir.path()).unwrap();
        let sizes = patcher
            .collect_sizes(&["lib/dep.jar".to_string(), "missing.jar".to_string()])
            .await;
        assert_eq!(sizes.get("lib/dep.jar"), Some(&321));
        assert!(!sizes.contains_key("missing.jar"));
    }
}
