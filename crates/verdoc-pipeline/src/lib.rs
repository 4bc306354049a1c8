//! Versioned content pipeline for verdoc.
//!
//! Turns a docset's version directories into generator input:
//!
//! 1. [`validate_docset`] checks the content, docset and site directories
//! 2. [`enumerate_versions`] lists version directories in a stable order
//! 3. [`render_version`] writes one version's documents under their slug paths
//! 4. [`Pipeline`] stages every version, then publishes them one at a time
//!    into the generator's docs directory and invokes the generator
//!
//! Missing directories and empty docsets are not errors: runs report them as
//! [`Outcome::NothingToDo`]. Everything else that goes wrong aborts the run
//! with a [`PipelineError`].

mod docset;
mod error;
mod pipeline;
mod render;
mod version;

pub use docset::{ContentLayout, Docset, Preflight, validate_docset};
pub use error::{DirKind, MissingDirectory, Outcome, PipelineError, RunReport, Skip};
pub use pipeline::Pipeline;
pub use render::{RenderedFile, RenderedVersion, clear_dir, discover_documents, render_version};
pub use version::{VersionDir, VersionOrder, enumerate_versions};
