//! `verdoc build` command implementation.

use clap::Args;
use verdoc_pipeline::{Outcome, Pipeline};

use super::{CommonArgs, Project};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    #[command(flatten)]
    pub(crate) common: CommonArgs,
}

impl BuildArgs {
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let project = Project::load(&self.common)?;
        output.info(&format!("Site: {}", project.layout.site_dir.display()));

        let pipeline = Pipeline::new(project.layout.clone(), &project.generator);
        match pipeline.build_site()? {
            Outcome::NothingToDo(skip) => output.warning(&skip.to_string()),
            Outcome::Completed(_) => output.success("Site built successfully"),
        }
        Ok(())
    }
}
