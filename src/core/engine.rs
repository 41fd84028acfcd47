use crate::adapters::archive;
use crate::adapters::workspace::BootstrapDir;
use crate::core::finalizer::finalize;
use crate::core::resolver::resolve;
use crate::core::transformer::transform;
use crate::domain::model::{ScaffoldOutcome, ServiceInputs, SubstitutionRecord};
use crate::domain::ports::ArchiveFetcher;
use crate::utils::error::ScaffoldError;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Configure,
    Resolve,
    Acquire,
    Extract,
    Transform,
    Finalize,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Configure => "configure",
            Phase::Resolve => "resolve",
            Phase::Acquire => "acquire",
            Phase::Extract => "extract",
            Phase::Transform => "transform",
            Phase::Finalize => "finalize",
        })
    }
}

/// A failure tagged with the phase it stopped the run in.
#[derive(Error, Debug)]
#[error("[{phase}] {source}")]
pub struct RunError {
    pub phase: Phase,
    #[source]
    pub source: ScaffoldError,
}

impl RunError {
    pub fn new(phase: Phase, source: ScaffoldError) -> Self {
        Self { phase, source }
    }
}

/// What to fetch and where the finished project goes.
#[derive(Debug, Clone)]
pub struct ScaffoldPlan {
    pub archive_url: String,
    /// The project lands in `<output_dir>/<ServiceNamePill>`.
    pub output_dir: PathBuf,
}

impl ScaffoldPlan {
    pub fn destination(&self, record: &SubstitutionRecord) -> PathBuf {
        self.output_dir.join(record.service_name_pill())
    }
}

pub struct ScaffoldEngine<F: ArchiveFetcher> {
    fetcher: F,
    workspace: BootstrapDir,
}

impl<F: ArchiveFetcher> ScaffoldEngine<F> {
    pub fn new(fetcher: F, workspace: BootstrapDir) -> Self {
        Self { fetcher, workspace }
    }

    pub fn workspace(&self) -> &BootstrapDir {
        &self.workspace
    }

    /// Runs resolve, acquire, extract, transform and finalize in order,
    /// stopping at the first failure. The bootstrap directory is cleaned up
    /// on both outcomes; after a failure that is best effort.
    pub async fn run(
        &self,
        plan: &ScaffoldPlan,
        inputs: &ServiceInputs,
    ) -> Result<ScaffoldOutcome, RunError> {
        tracing::info!("Resolving service parameters");
        let record = resolve(&inputs.name, &inputs.route, &inputs.port)
            .map_err(|e| RunError::new(Phase::Resolve, e))?;
        tracing::debug!("Substitution record: {:?}", record);

        let destination = plan.destination(&record);
        let result = self.materialize(plan, &record, &destination).await;

        match result {
            Ok(outcome) => {
                tracing::info!("Project ready at {}", outcome.project_dir.display());
                Ok(outcome)
            }
            Err(err) => {
                if let Err(e) = self.workspace.cleanup() {
                    tracing::warn!(
                        "Could not clean up {} after failure: {}",
                        self.workspace.root().display(),
                        e
                    );
                }
                Err(err)
            }
        }
    }

    async fn materialize(
        &self,
        plan: &ScaffoldPlan,
        record: &SubstitutionRecord,
        destination: &Path,
    ) -> Result<ScaffoldOutcome, RunError> {
        tracing::info!("Downloading template from {}", plan.archive_url);
        self.workspace
            .prepare()
            .map_err(|e| RunError::new(Phase::Acquire, e))?;
        let archive_path = self.workspace.archive_path();
        let bytes = self
            .fetcher
            .fetch(&plan.archive_url, &archive_path)
            .await
            .map_err(|e| RunError::new(Phase::Acquire, e))?;
        tracing::debug!("Downloaded {} bytes", bytes);

        tracing::info!("Extracting archive");
        let extraction_root = self.workspace.extraction_root();
        let files = archive::extract(&archive_path, &extraction_root)
            .map_err(|e| RunError::new(Phase::Extract, e))?;
        tracing::debug!("Extracted {} files", files);

        tracing::info!("Rendering template");
        let report = transform(&extraction_root, record)
            .map_err(|e| RunError::new(Phase::Transform, e))?;
        tracing::info!(
            "Rendered {} files, renamed {}",
            report.contents_rendered,
            report.files_renamed
        );

        tracing::info!("Moving project to {}", destination.display());
        let project_dir =
            finalize(&self.workspace, destination).map_err(|e| RunError::new(Phase::Finalize, e))?;

        Ok(ScaffoldOutcome {
            project_dir,
            record: record.clone(),
            report,
        })
    }
}
