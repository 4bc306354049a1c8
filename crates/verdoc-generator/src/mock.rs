//! Recording generator for testing.
//!
//! Provides [`RecordingGenerator`] for unit testing without spawning processes.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::generator::{GeneratorError, SiteGenerator};

/// A recorded generator call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    ClearSnapshots,
    Build,
    Snapshot(String),
    BuildInto(PathBuf),
}

/// Generator that records calls instead of running commands.
///
/// When a docs directory is configured, every `build`, `snapshot_version`
/// and `build_into` call also captures the sorted list of files in it,
/// relative to the docs directory.
///
/// # Example
///
/// ```ignore
/// use verdoc_generator::{Invocation, RecordingGenerator, SiteGenerator};
///
/// let generator = RecordingGenerator::new()
///     .with_docs_dir("website/docs")
///     .failing_on(Invocation::Snapshot("2.0".to_owned()));
///
/// generator.snapshot_version("1.0")?;
/// assert!(generator.snapshot_version("2.0").is_err());
/// ```
#[derive(Debug, Default)]
pub struct RecordingGenerator {
    docs_dir: Option<PathBuf>,
    fail_on: Option<Invocation>,
    calls: RwLock<Vec<(Invocation, Option<Vec<PathBuf>>)>>,
}

impl RecordingGenerator {
    /// Create a new recording generator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture a listing of `docs_dir` on each build or snapshot.
    #[must_use]
    pub fn with_docs_dir(mut self, docs_dir: impl Into<PathBuf>) -> Self {
        self.docs_dir = Some(docs_dir.into());
        self
    }

    /// Fail with [`GeneratorError::Failed`] when `invocation` is made.
    #[must_use]
    pub fn failing_on(mut self, invocation: Invocation) -> Self {
        self.fail_on = Some(invocation);
        self
    }

    /// All calls made so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.calls
            .read()
            .unwrap()
            .iter()
            .map(|(invocation, _)| invocation.clone())
            .collect()
    }

    /// Docs directory listing captured for the first matching call.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn listing(&self, invocation: &Invocation) -> Option<Vec<PathBuf>> {
        self.calls
            .read()
            .unwrap()
            .iter()
            .find(|(recorded, _)| recorded == invocation)
            .and_then(|(_, listing)| listing.clone())
    }

    fn record(&self, invocation: Invocation, capture: bool) -> Result<(), GeneratorError> {
        let listing = match (&self.docs_dir, capture) {
            (Some(docs_dir), true) => Some(list_files(docs_dir).map_err(|e| {
                GeneratorError::Io {
                    path: docs_dir.clone(),
                    source: e,
                }
            })?),
            _ => None,
        };

        let fail = self.fail_on.as_ref() == Some(&invocation);
        let command = format!("{invocation:?}");
        self.calls.write().unwrap().push((invocation, listing));

        if fail {
            return Err(GeneratorError::Failed {
                command,
                code: Some(1),
                stderr: "injected failure".to_owned(),
            });
        }
        Ok(())
    }
}

impl SiteGenerator for RecordingGenerator {
    fn clear_snapshots(&self) -> Result<(), GeneratorError> {
        self.record(Invocation::ClearSnapshots, false)
    }

    fn build(&self) -> Result<(), GeneratorError> {
        self.record(Invocation::Build, true)
    }

    fn snapshot_version(&self, version: &str) -> Result<(), GeneratorError> {
        self.record(Invocation::Snapshot(version.to_owned()), true)
    }

    fn build_into(&self, out_dir: &Path) -> Result<(), GeneratorError> {
        self.record(Invocation::BuildInto(out_dir.to_path_buf()), true)
    }
}

/// Sorted relative paths of all files under `root`. A missing root is empty.
fn list_files(root: &Path) -> std::io::Result<Vec<PathBuf>> {
    fn walk(root: &Path, dir: &Path, files: &mut Vec<PathBuf>) -> std::io::Result<()> {
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_dir() {
                walk(root, &path, files)?;
            } else if let Ok(relative) = path.strip_prefix(root) {
                files.push(relative.to_path_buf());
            }
        }
        Ok(())
    }

    let mut files = Vec::new();
    if root.is_dir() {
        walk(root, root, &mut files)?;
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_records_in_order() {
        let generator = RecordingGenerator::new();
        generator.clear_snapshots().unwrap();
        generator.snapshot_version("1.0").unwrap();
        generator.build_into(Path::new("build/1.0")).unwrap();
        generator.build().unwrap();

        assert_eq!(
            generator.invocations(),
            vec![
                Invocation::ClearSnapshots,
                Invocation::Snapshot("1.0".to_owned()),
                Invocation::BuildInto(PathBuf::from("build/1.0")),
                Invocation::Build,
            ]
        );
    }

    #[test]
    fn test_injected_failure_is_still_recorded() {
        let generator =
            RecordingGenerator::new().failing_on(Invocation::Snapshot("2.0".to_owned()));
        generator.snapshot_version("1.0").unwrap();
        assert!(generator.snapshot_version("2.0").is_err());
        assert_eq!(generator.invocations().len(), 2);
    }

    #[test]
    fn test_captures_docs_listing() {
        let docs = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(docs.path().join("guide")).unwrap();
        std::fs::write(docs.path().join("overview.md"), "").unwrap();
        std::fs::write(docs.path().join("guide/intro.md"), "").unwrap();

        let generator = RecordingGenerator::new().with_docs_dir(docs.path());
        generator.snapshot_version("1.0").unwrap();

        assert_eq!(
            generator.listing(&Invocation::Snapshot("1.0".to_owned())),
            Some(vec![
                PathBuf::from("guide/intro.md"),
                PathBuf::from("overview.md")
            ])
        );
    }
}
