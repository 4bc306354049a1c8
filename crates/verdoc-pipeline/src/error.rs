//! Pipeline errors and run outcomes.

use std::fmt;
use std::path::PathBuf;

use verdoc_content::DocumentError;
use verdoc_generator::GeneratorError;

/// Fatal pipeline error. Any of these aborts the whole run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{0}")]
    Document(#[from] DocumentError),

    #[error("Invalid document pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Failed to list documents: {0}")]
    Glob(#[from] glob::GlobError),

    #[error(
        "{} and {} both map to {}",
        .first.display(),
        .second.display(),
        .output.display()
    )]
    DuplicateOutput {
        output: PathBuf,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Invalid docset name {0:?}: must be a single directory name")]
    InvalidDocset(String),

    #[error("Version directory {0:?} has an empty label")]
    EmptyVersionLabel(String),

    #[error("{0}")]
    Generator(#[from] GeneratorError),
}

impl PipelineError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}

/// Which expected directory is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirKind {
    Content,
    Docset,
    Site,
}

impl fmt::Display for DirKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Content => "content",
            Self::Docset => "docset",
            Self::Site => "website",
        })
    }
}

/// An expected directory that does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingDirectory {
    pub kind: DirKind,
    pub path: PathBuf,
}

/// Why a run had nothing to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Skip {
    MissingDirectory(MissingDirectory),
    NoVersions { docset_root: PathBuf },
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDirectory(missing) => write!(
                f,
                "This \"{}\" directory doesn't exist: {}",
                missing.kind,
                missing.path.display()
            ),
            Self::NoVersions { docset_root } => write!(
                f,
                "There are no versions in this docset: {}",
                docset_root.display()
            ),
        }
    }
}

/// Summary of a completed run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Labels of versions handed to the generator, in processing order.
    pub published: Vec<String>,
    /// Names of version directories skipped for having no documents.
    pub skipped: Vec<String>,
    /// Documents written across all published versions.
    pub documents: usize,
}

/// Result of a pipeline run that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Completed(RunReport),
    NothingToDo(Skip),
}
