//! `verdoc build-versions` command implementation.

use std::path::PathBuf;

use clap::Args;
use verdoc_pipeline::Pipeline;

use super::{CommonArgs, Project, report_outcome};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build-versions command.
#[derive(Args)]
pub(crate) struct BuildVersionsArgs {
    /// Docset directory name under the content root.
    #[arg(short, long, env = "DOCSET")]
    docset: String,

    /// Output root (default: <site-dir>/build). The latest version is built
    /// here, older versions into `<out-dir>/<label>`.
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    #[command(flatten)]
    pub(crate) common: CommonArgs,
}

impl BuildVersionsArgs {
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let project = Project::load(&self.common)?;

        let out_dir = self
            .out_dir
            .unwrap_or_else(|| project.layout.site_dir.join("build"));

        output.info(&format!("Docset: {}", self.docset));
        output.info(&format!("Output: {}", out_dir.display()));

        let pipeline = Pipeline::new(project.layout.clone(), &project.generator)
            .with_label_prefix(project.label_prefix());
        let outcome = pipeline.build_versions(&self.docset, &out_dir)?;

        report_outcome(output, &outcome, "Built");
        Ok(())
    }
}
