//! CLI command implementations.

mod build;
mod build_versions;
mod prebuild;

use std::path::PathBuf;

use clap::Args;
use tracing::debug;
use verdoc_config::{CliSettings, Config};
use verdoc_generator::{CommandGenerator, CommandTemplate, GeneratorCommands};
use verdoc_pipeline::{ContentLayout, Outcome, RunReport};

use crate::error::CliError;
use crate::output::Output;

pub(crate) use build::BuildArgs;
pub(crate) use build_versions::BuildVersionsArgs;
pub(crate) use prebuild::PrebuildArgs;

/// Flags shared by every command.
#[derive(Args)]
pub(crate) struct CommonArgs {
    /// Path to configuration file (default: auto-discover verdoc.toml).
    #[arg(short, long, env = "VERDOC_CONFIG")]
    config: Option<PathBuf>,

    /// Content root directory (overrides config).
    #[arg(long)]
    content_dir: Option<PathBuf>,

    /// Generator site root directory (overrides config).
    #[arg(long)]
    site_dir: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

/// Loaded configuration with the pieces every command needs.
pub(crate) struct Project {
    pub(crate) config: Config,
    pub(crate) layout: ContentLayout,
    pub(crate) generator: CommandGenerator,
}

impl Project {
    pub(crate) fn load(common: &CommonArgs) -> Result<Self, CliError> {
        let cli_settings = CliSettings {
            content_dir: common.content_dir.clone(),
            site_dir: common.site_dir.clone(),
        };
        let config = Config::load(common.config.as_deref(), Some(&cli_settings))?;

        let paths = &config.paths;
        let layout = ContentLayout {
            content_dir: paths.content_dir.clone(),
            site_dir: paths.site_dir.clone(),
            docs_dir: paths.site_docs_dir(),
            staging_dir: paths.staging_dir(),
        };
        debug!(
            config = ?config.config_path,
            content = %layout.content_dir.display(),
            site = %layout.site_dir.display(),
            docs = %layout.docs_dir.display(),
            "Resolved project layout"
        );

        let commands = GeneratorCommands {
            build: CommandTemplate::new(config.generator.build.clone()),
            snapshot: CommandTemplate::new(config.generator.snapshot.clone()),
            build_into: CommandTemplate::new(config.generator.build_into.clone()),
        };
        let generator = CommandGenerator::new(
            &paths.site_dir,
            commands,
            &config.generator.snapshot_artifacts,
        );

        Ok(Self {
            config,
            layout,
            generator,
        })
    }

    pub(crate) fn label_prefix(&self) -> &str {
        &self.config.versions.prefix
    }
}

/// Print the outcome of a run. Skips are warnings, not failures.
pub(crate) fn report_outcome(output: &Output, outcome: &Outcome, action: &str) {
    match outcome {
        Outcome::NothingToDo(skip) => output.warning(&skip.to_string()),
        Outcome::Completed(report) => {
            for name in &report.skipped {
                output.warning(&format!("No topics found for version {name}, skipped"));
            }
            output.success(&summary(report, action));
        }
    }
}

fn summary(report: &RunReport, action: &str) -> String {
    match report.published.as_slice() {
        [] => format!("{action}: no versions had topics"),
        labels => format!(
            "{action} {} version(s) ({} documents): {}",
            labels.len(),
            report.documents,
            labels.join(", ")
        ),
    }
}
