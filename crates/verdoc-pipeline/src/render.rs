//! Rendering one version directory into generator-ready documents.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use glob::MatchOptions;
use tracing::{debug, info};
use verdoc_content::Document;

use crate::error::PipelineError;
use crate::version::VersionDir;

/// One written output document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    /// Source Markdown file.
    pub source: PathBuf,
    /// Output path relative to the output directory.
    pub output: PathBuf,
}

/// Documents written for one version.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RenderedVersion {
    pub files: Vec<RenderedFile>,
}

impl RenderedVersion {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Find all Markdown files under `dir`, sorted by path.
///
/// Hidden files and directories are not matched.
pub fn discover_documents(dir: &Path) -> Result<Vec<PathBuf>, PipelineError> {
    let pattern = format!("{}/**/*.md", glob::Pattern::escape(&dir.to_string_lossy()));
    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };

    let mut files = Vec::new();
    for entry in glob::glob_with(&pattern, options)? {
        let path = entry?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Remove `dir` and everything in it. A missing directory is fine.
pub fn clear_dir(dir: &Path) -> Result<(), PipelineError> {
    match fs::remove_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(PipelineError::io(dir)(e)),
    }
}

/// Render every document of `version` into `out_dir`.
///
/// `out_dir` is cleared first, so afterwards it holds exactly the returned
/// files. A version without documents yields an empty [`RenderedVersion`]
/// and leaves `out_dir` absent.
pub fn render_version(
    version: &VersionDir,
    out_dir: &Path,
) -> Result<RenderedVersion, PipelineError> {
    clear_dir(out_dir)?;

    let sources = discover_documents(&version.path)?;
    if sources.is_empty() {
        info!(version = %version.path.display(), "No topics found for version");
        return Ok(RenderedVersion::default());
    }

    let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::with_capacity(sources.len());
    let mut files = Vec::with_capacity(sources.len());
    for source in sources {
        let document = Document::read(&source)?;
        let output = document.relative_output_path()?;
        if let Some(first) = claimed.get(&output) {
            return Err(PipelineError::DuplicateOutput {
                output,
                first: first.clone(),
                second: source,
            });
        }

        let target = out_dir.join(&output);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(PipelineError::io(parent))?;
        }
        fs::write(&target, document.render()?).map_err(PipelineError::io(&target))?;
        debug!(source = %source.display(), output = %output.display(), "Rendered document");

        claimed.insert(output.clone(), source.clone());
        files.push(RenderedFile { source, output });
    }

    info!(version = %version.name, documents = files.len(), "Rendered version");
    Ok(RenderedVersion { files })
}
