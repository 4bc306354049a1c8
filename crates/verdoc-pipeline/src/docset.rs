//! Docset selection and precondition checks.

use std::path::{Component, Path, PathBuf};

use tracing::warn;

use crate::error::{DirKind, MissingDirectory, PipelineError};

/// Filesystem layout the pipeline reads from and writes to.
#[derive(Debug, Clone)]
pub struct ContentLayout {
    /// Content root holding one directory per docset.
    pub content_dir: PathBuf,
    /// Generator site root.
    pub site_dir: PathBuf,
    /// Generator docs input directory (absolute).
    pub docs_dir: PathBuf,
    /// Parent directory for per-version staging directories.
    pub staging_dir: PathBuf,
}

/// A named collection of versioned documentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Docset {
    pub name: String,
    pub root: PathBuf,
}

/// Result of checking a docset's preconditions.
#[derive(Debug, PartialEq, Eq)]
pub enum Preflight {
    Ready(Docset),
    Missing(MissingDirectory),
}

/// Check that the content root, the docset and the site root all exist.
///
/// Missing directories are reported in that order and logged; they are not
/// errors. A docset name that is not a plain directory name is an error.
pub fn validate_docset(layout: &ContentLayout, name: &str) -> Result<Preflight, PipelineError> {
    let mut components = Path::new(name).components();
    let is_plain = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if !is_plain {
        return Err(PipelineError::InvalidDocset(name.to_owned()));
    }

    let root = layout.content_dir.join(name);
    let checks = [
        (DirKind::Content, &layout.content_dir),
        (DirKind::Docset, &root),
        (DirKind::Site, &layout.site_dir),
    ];
    for (kind, path) in checks {
        if !path.is_dir() {
            warn!(%kind, path = %path.display(), "Expected directory doesn't exist");
            return Ok(Preflight::Missing(MissingDirectory {
                kind,
                path: path.clone(),
            }));
        }
    }

    Ok(Preflight::Ready(Docset {
        name: name.to_owned(),
        root,
    }))
}
