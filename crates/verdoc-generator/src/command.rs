//! Process-backed generator.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use crate::generator::{GeneratorError, SiteGenerator};

/// An argv list with `{name}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    argv: Vec<String>,
}

impl CommandTemplate {
    #[must_use]
    pub fn new(argv: Vec<String>) -> Self {
        Self { argv }
    }

    /// Substitute `{name}` placeholders in every argument.
    #[must_use]
    pub fn render(&self, vars: &[(&str, &str)]) -> Vec<String> {
        self.argv
            .iter()
            .map(|arg| {
                vars.iter().fold(arg.clone(), |acc, (name, value)| {
                    acc.replace(&format!("{{{name}}}"), value)
                })
            })
            .collect()
    }
}

/// Command templates for each generator operation.
#[derive(Debug, Clone)]
pub struct GeneratorCommands {
    /// Generic site build.
    pub build: CommandTemplate,
    /// Version snapshot, `{version}` is the version label.
    pub snapshot: CommandTemplate,
    /// Build into a directory, `{out_dir}` is the target.
    pub build_into: CommandTemplate,
}

/// Runs generator commands as child processes in the site directory.
///
/// Output is captured and logged at debug level. A non-zero exit becomes
/// [`GeneratorError::Failed`] carrying the captured stderr.
#[derive(Debug)]
pub struct CommandGenerator {
    site_dir: PathBuf,
    commands: GeneratorCommands,
    snapshot_artifacts: Vec<PathBuf>,
}

impl CommandGenerator {
    /// Create a generator rooted at `site_dir`.
    ///
    /// `snapshot_artifacts` are paths relative to `site_dir`.
    #[must_use]
    pub fn new(
        site_dir: impl Into<PathBuf>,
        commands: GeneratorCommands,
        snapshot_artifacts: impl IntoIterator<Item = impl Into<PathBuf>>,
    ) -> Self {
        Self {
            site_dir: site_dir.into(),
            commands,
            snapshot_artifacts: snapshot_artifacts.into_iter().map(Into::into).collect(),
        }
    }

    fn run(&self, argv: &[String], purpose: &'static str) -> Result<(), GeneratorError> {
        let (program, args) = argv
            .split_first()
            .ok_or(GeneratorError::EmptyCommand(purpose))?;
        let rendered = render_command(argv);

        info!(command = %rendered, cwd = %self.site_dir.display(), "Running {purpose} command");
        let output = Command::new(program)
            .args(args)
            .current_dir(&self.site_dir)
            .output()
            .map_err(|e| GeneratorError::Spawn {
                command: rendered.clone(),
                source: e,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        debug!(command = %rendered, status = %output.status, "stdout:\n{stdout}\nstderr:\n{stderr}");

        if output.status.success() {
            Ok(())
        } else {
            Err(GeneratorError::Failed {
                command: rendered,
                code: output.status.code(),
                stderr: stderr.trim().to_owned(),
            })
        }
    }
}

impl SiteGenerator for CommandGenerator {
    fn clear_snapshots(&self) -> Result<(), GeneratorError> {
        for artifact in &self.snapshot_artifacts {
            let path = self.site_dir.join(artifact);
            if remove_path(&path).map_err(|e| GeneratorError::Io {
                path: path.clone(),
                source: e,
            })? {
                debug!(path = %path.display(), "Removed snapshot artifact");
            }
        }
        Ok(())
    }

    fn build(&self) -> Result<(), GeneratorError> {
        self.run(&self.commands.build.render(&[]), "build")
    }

    fn snapshot_version(&self, version: &str) -> Result<(), GeneratorError> {
        let argv = self.commands.snapshot.render(&[("version", version)]);
        self.run(&argv, "snapshot")
    }

    fn build_into(&self, out_dir: &Path) -> Result<(), GeneratorError> {
        let out_dir = out_dir.to_string_lossy();
        let argv = self.commands.build_into.render(&[("out_dir", &*out_dir)]);
        self.run(&argv, "build-into")
    }
}

/// Remove a file or directory tree. Returns `false` if nothing was there.
fn remove_path(path: &Path) -> std::io::Result<bool> {
    let metadata = match std::fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };
    if metadata.is_dir() {
        std::fs::remove_dir_all(path)?;
    } else {
        std::fs::remove_file(path)?;
    }
    Ok(true)
}

/// Render argv for logs and error messages, quoting arguments with spaces.
fn render_command(argv: &[String]) -> String {
    argv.iter()
        .map(|arg| {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                format!("'{arg}'")
            } else {
                arg.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
