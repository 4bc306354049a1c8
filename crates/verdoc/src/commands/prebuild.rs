//! `verdoc prebuild` command implementation.

use clap::Args;
use verdoc_pipeline::Pipeline;

use super::{CommonArgs, Project, report_outcome};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the prebuild command.
#[derive(Args)]
pub(crate) struct PrebuildArgs {
    /// Docset directory name under the content root.
    #[arg(short, long, env = "DOCSET")]
    docset: String,

    #[command(flatten)]
    pub(crate) common: CommonArgs,
}

impl PrebuildArgs {
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let project = Project::load(&self.common)?;

        output.info(&format!("Docset: {}", self.docset));
        output.info(&format!(
            "Content: {}",
            project.layout.content_dir.display()
        ));
        output.info(&format!("Site: {}", project.layout.site_dir.display()));

        let pipeline = Pipeline::new(project.layout.clone(), &project.generator)
            .with_label_prefix(project.label_prefix());
        let outcome = pipeline.snapshot_versions(&self.docset)?;

        report_outcome(output, &outcome, "Snapshotted");
        Ok(())
    }
}
