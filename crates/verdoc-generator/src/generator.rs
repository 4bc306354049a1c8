//! Generator trait and error type.

use std::path::{Path, PathBuf};

/// External static-site generator operations.
///
/// Calls are synchronous: each returns once the generator has finished.
pub trait SiteGenerator {
    /// Remove snapshots left by earlier runs (versioned docs, sidebars, manifest).
    ///
    /// Artifacts that do not exist are skipped.
    fn clear_snapshots(&self) -> Result<(), GeneratorError>;

    /// Build the site from the current docs directory.
    fn build(&self) -> Result<(), GeneratorError>;

    /// Snapshot the current docs directory as `version`.
    fn snapshot_version(&self, version: &str) -> Result<(), GeneratorError>;

    /// Build the site into `out_dir`.
    fn build_into(&self, out_dir: &Path) -> Result<(), GeneratorError>;
}

/// Generator error.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// Command template has no program.
    #[error("No program configured for the {0} command")]
    EmptyCommand(&'static str),

    /// Process could not be started.
    #[error("Failed to execute `{command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    /// Process ran and reported failure.
    #[error("`{command}` {}{}", explain_exit(.code.as_ref()), stderr_report(.stderr))]
    Failed {
        command: String,
        /// Exit code, `None` when terminated by a signal.
        code: Option<i32>,
        stderr: String,
    },

    /// Filesystem error while managing generator artifacts.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn explain_exit(code: Option<&i32>) -> String {
    match code {
        Some(code) => format!("exited with status: {code}"),
        None => "was terminated by a signal".to_owned(),
    }
}

fn stderr_report(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!("\nstderr:\n{stderr}")
    }
}
