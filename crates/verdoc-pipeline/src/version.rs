//! Version directory enumeration.

use std::path::PathBuf;

use crate::docset::Docset;
use crate::error::PipelineError;

/// Processing order for version directories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VersionOrder {
    /// Lexicographic by directory name.
    #[default]
    Ascending,
    /// Reverse lexicographic, newest first.
    LatestFirst,
}

/// One version subdirectory of a docset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionDir {
    /// Directory name, e.g. `v1.2`.
    pub name: String,
    pub path: PathBuf,
}

impl VersionDir {
    /// Version label passed to the generator: the name with `prefix`
    /// stripped once and surrounding whitespace trimmed (`v1.2` -> `1.2`).
    pub fn label(&self, prefix: &str) -> Result<String, PipelineError> {
        let label = self.name.strip_prefix(prefix).unwrap_or(&self.name).trim();
        if label.is_empty() {
            return Err(PipelineError::EmptyVersionLabel(self.name.clone()));
        }
        Ok(label.to_owned())
    }
}

/// List the docset's version directories in the requested order.
///
/// Only immediate, non-hidden subdirectories count; files are ignored.
pub fn enumerate_versions(
    docset: &Docset,
    order: VersionOrder,
) -> Result<Vec<VersionDir>, PipelineError> {
    let entries = std::fs::read_dir(&docset.root).map_err(PipelineError::io(&docset.root))?;

    let mut versions = Vec::new();
    for entry in entries {
        let entry = entry.map_err(PipelineError::io(&docset.root))?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') || !path.is_dir() {
            continue;
        }
        versions.push(VersionDir { name, path });
    }

    versions.sort_by(|a, b| a.name.cmp(&b.name));
    if order == VersionOrder::LatestFirst {
        versions.reverse();
    }
    Ok(versions)
}
