//! Multi-version runs: stage, publish, invoke the generator.
//!
//! Every version is first rendered into its own staging directory. Staging
//! touches no shared state, so versions render in parallel. Publishing then
//! copies one staged version at a time into the generator's docs directory
//! and runs the generator against it, oldest to newest (or newest first for
//! per-version site builds).

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tempfile::TempDir;
use tracing::{info, warn};
use verdoc_generator::{GeneratorError, SiteGenerator};

use crate::docset::{ContentLayout, Docset, Preflight, validate_docset};
use crate::error::{DirKind, MissingDirectory, Outcome, PipelineError, RunReport, Skip};
use crate::render::{RenderedVersion, clear_dir, render_version};
use crate::version::{VersionDir, VersionOrder, enumerate_versions};

/// A version rendered into a private staging directory.
struct StagedVersion {
    version: VersionDir,
    label: String,
    rendered: RenderedVersion,
    dir: TempDir,
}

/// Content transformer bound to a layout and a generator.
pub struct Pipeline<'g, G: SiteGenerator + ?Sized> {
    layout: ContentLayout,
    label_prefix: String,
    generator: &'g G,
}

impl<'g, G: SiteGenerator + ?Sized> Pipeline<'g, G> {
    pub fn new(layout: ContentLayout, generator: &'g G) -> Self {
        Self {
            layout,
            label_prefix: "v".to_owned(),
            generator,
        }
    }

    /// Prefix stripped from version directory names to form labels.
    #[must_use]
    pub fn with_label_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.label_prefix = prefix.into();
        self
    }

    pub fn layout(&self) -> &ContentLayout {
        &self.layout
    }

    /// Rebuild every version snapshot of `docset`, oldest first.
    ///
    /// All versions are rendered before the generator is touched. Prior
    /// snapshots are then removed and each version is published in turn, so
    /// the docs directory ends up holding exactly the newest version's documents.
    pub fn snapshot_versions(&self, docset: &str) -> Result<Outcome, PipelineError> {
        let (docset, versions) = match self.prepare(docset, VersionOrder::Ascending)? {
            Ok(prepared) => prepared,
            Err(skip) => return Ok(Outcome::NothingToDo(skip)),
        };
        info!(docset = %docset.name, versions = versions.len(), "Snapshotting versions");

        let staged = self.stage(&versions)?;
        self.generator.clear_snapshots()?;

        self.publish_each(staged, |staged| self.generator.snapshot_version(&staged.label))
    }

    /// Build one site per version of `docset`, newest first.
    ///
    /// The newest version with documents is built into `out_root`; each older
    /// one into `out_root/<label>`.
    pub fn build_versions(&self, docset: &str, out_root: &Path) -> Result<Outcome, PipelineError> {
        let (docset, versions) = match self.prepare(docset, VersionOrder::LatestFirst)? {
            Ok(prepared) => prepared,
            Err(skip) => return Ok(Outcome::NothingToDo(skip)),
        };
        info!(docset = %docset.name, versions = versions.len(), "Building versioned sites");

        let staged = self.stage(&versions)?;

        let mut latest_built = false;
        self.publish_each(staged, |staged| {
            let out_dir: PathBuf = if latest_built {
                out_root.join(&staged.label)
            } else {
                out_root.to_path_buf()
            };
            latest_built = true;
            self.generator.build_into(&out_dir)
        })
    }

    /// Build the site from whatever the docs directory currently holds.
    pub fn build_site(&self) -> Result<Outcome, PipelineError> {
        if !self.layout.site_dir.is_dir() {
            warn!(path = %self.layout.site_dir.display(), "Site directory doesn't exist");
            return Ok(Outcome::NothingToDo(Skip::MissingDirectory(
                MissingDirectory {
                    kind: DirKind::Site,
                    path: self.layout.site_dir.clone(),
                },
            )));
        }
        info!(site = %self.layout.site_dir.display(), "Building site");
        self.generator.build()?;
        Ok(Outcome::Completed(RunReport::default()))
    }

    /// Validate the docset and list its versions, or say why there is nothing to do.
    fn prepare(
        &self,
        docset: &str,
        order: VersionOrder,
    ) -> Result<Result<(Docset, Vec<VersionDir>), Skip>, PipelineError> {
        let docset = match validate_docset(&self.layout, docset)? {
            Preflight::Ready(docset) => docset,
            Preflight::Missing(missing) => return Ok(Err(Skip::MissingDirectory(missing))),
        };

        let versions = enumerate_versions(&docset, order)?;
        if versions.is_empty() {
            warn!(docset = %docset.root.display(), "There are no versions in this docset");
            return Ok(Err(Skip::NoVersions {
                docset_root: docset.root,
            }));
        }
        Ok(Ok((docset, versions)))
    }

    /// Render all versions into fresh staging directories, in parallel.
    ///
    /// The first failure aborts staging; staged directories are discarded.
    fn stage(&self, versions: &[VersionDir]) -> Result<Vec<StagedVersion>, PipelineError> {
        let staging_root = &self.layout.staging_dir;
        fs::create_dir_all(staging_root).map_err(PipelineError::io(staging_root))?;
        let prefix = self.label_prefix.as_str();

        versions
            .par_iter()
            .map(|version| -> Result<StagedVersion, PipelineError> {
                let label = version.label(prefix)?;
                let dir = tempfile::Builder::new()
                    .prefix(&format!("{}-", version.name))
                    .tempdir_in(staging_root)
                    .map_err(PipelineError::io(staging_root))?;
                let rendered = render_version(version, dir.path())?;
                Ok(StagedVersion {
                    version: version.clone(),
                    label,
                    rendered,
                    dir,
                })
            })
            .collect()
    }

    /// Publish staged versions in order, running `invoke` after each one.
    ///
    /// A version without documents still clears the docs directory, but
    /// `invoke` is not called for it.
    fn publish_each<F>(
        &self,
        staged: Vec<StagedVersion>,
        mut invoke: F,
    ) -> Result<Outcome, PipelineError>
    where
        F: FnMut(&StagedVersion) -> Result<(), GeneratorError>,
    {
        let mut report = RunReport::default();
        for version in staged {
            if version.rendered.is_empty() {
                clear_dir(&self.layout.docs_dir)?;
                warn!(version = %version.version.name, "Skipping version without topics");
                report.skipped.push(version.version.name.clone());
                continue;
            }

            self.install(&version)?;
            info!(
                version = %version.version.name,
                label = %version.label,
                documents = version.rendered.files.len(),
                "Publishing version"
            );
            invoke(&version)?;

            report.documents += version.rendered.files.len();
            report.published.push(version.label);
        }
        Ok(Outcome::Completed(report))
    }

    /// Replace the docs directory contents with a staged version.
    fn install(&self, staged: &StagedVersion) -> Result<(), PipelineError> {
        let docs_dir = &self.layout.docs_dir;
        clear_dir(docs_dir)?;
        for file in &staged.rendered.files {
            let from = staged.dir.path().join(&file.output);
            let to = docs_dir.join(&file.output);
            if let Some(parent) = to.parent() {
                fs::create_dir_all(parent).map_err(PipelineError::io(parent))?;
            }
            fs::copy(&from, &to).map_err(PipelineError::io(&to))?;
        }
        Ok(())
    }
}
