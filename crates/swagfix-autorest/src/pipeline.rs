use std::fmt;

use log::info;
use swagfix_core::NormalizeReport;
use swagfix_core::config::SwagfixConfig;
use swagfix_core::fixup;

use crate::download::Downloader;
use crate::error::ToolError;
use crate::generate;
use crate::runner::CommandRunner;
use crate::tools;

/// One stage of client generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    FetchNuget,
    FetchAutorest,
    Fixup,
    Generate,
}

impl Step {
    /// Every step, in the order they depend on each other.
    pub const ALL: [Step; 4] = [
        Step::FetchNuget,
        Step::FetchAutorest,
        Step::Fixup,
        Step::Generate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Step::FetchNuget => "fetch-nuget",
            Step::FetchAutorest => "fetch-autorest",
            Step::Fixup => "fixup",
            Step::Generate => "generate",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a finished pipeline did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    pub completed: Vec<Step>,
    pub normalize: Option<NormalizeReport>,
}

/// Runs steps in order; the first failure stops the run.
pub struct Pipeline<'a> {
    config: &'a SwagfixConfig,
    downloader: &'a dyn Downloader,
    runner: &'a dyn CommandRunner,
    steps: Vec<Step>,
}

impl<'a> Pipeline<'a> {
    /// A pipeline running every step.
    pub fn new(
        config: &'a SwagfixConfig,
        downloader: &'a dyn Downloader,
        runner: &'a dyn CommandRunner,
    ) -> Self {
        Self {
            config,
            downloader,
            runner,
            steps: Step::ALL.to_vec(),
        }
    }

    pub fn with_steps(mut self, steps: impl IntoIterator<Item = Step>) -> Self {
        self.steps = steps.into_iter().collect();
        self
    }

    pub fn without(mut self, step: Step) -> Self {
        self.steps.retain(|s| *s != step);
        self
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn run(&self) -> Result<PipelineReport, ToolError> {
        let mut report = PipelineReport::default();
        for &step in &self.steps {
            info!("step {step}");
            match step {
                Step::FetchNuget => {
                    tools::fetch_nuget(self.downloader, &self.config.toolchain)?;
                }
                Step::FetchAutorest => {
                    tools::fetch_autorest(self.runner, &self.config.toolchain)?;
                }
                Step::Fixup => {
                    let normalized = fixup::fixup_file(&self.config.input, &self.config.fixed)?;
                    report.normalize = Some(normalized);
                }
                Step::Generate => generate::generate_code(self.runner, self.config)?,
            }
            report.completed.push(step);
        }
        Ok(report)
    }
}
