// Process interactor - Orchestrates per-episode track splitting

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::config_initialization::Settings;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::planner::EpisodePlanner;
use crate::ports::*;
use crate::utils::Utils;

/// Container extension picked up from the processing queue
const CONTAINER_EXTENSION: &str = "mkv";

#[derive(Debug, Clone, Default)]
pub struct ProcessRequest {
    /// Single container to process; the whole queue directory when absent
    pub input: Option<PathBuf>,
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EpisodeStatus {
    Planned,
    Completed,
    Failed,
}

/// Result for one container
#[derive(Debug, Clone, Serialize)]
pub struct EpisodeOutcome {
    pub source: PathBuf,
    pub status: EpisodeStatus,
    pub inventory: Option<ContainerTrackInventory>,
    pub plan: Option<EpisodePlan>,
    pub error: Option<String>,
    pub elapsed_seconds: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub dry_run: bool,
    pub episodes: Vec<EpisodeOutcome>,
}

impl ProcessReport {
    pub fn failed(&self) -> usize {
        self.episodes
            .iter()
            .filter(|episode| episode.status == EpisodeStatus::Failed)
            .count()
    }
}

/// Interactor for the process use case
pub struct ProcessInteractor {
    probe_port: Arc<dyn ProbePort>,
    execute_port: Arc<dyn ExecutePort>,
    fs_port: Arc<dyn FsPort>,
    planner: EpisodePlanner,
    queue_dir: PathBuf,
    keep_intermediate: bool,
    continue_on_error: bool,
}

impl ProcessInteractor {
    pub fn new(
        probe_port: Arc<dyn ProbePort>,
        execute_port: Arc<dyn ExecutePort>,
        fs_port: Arc<dyn FsPort>,
        settings: &Settings,
    ) -> Self {
        Self {
            probe_port,
            execute_port,
            fs_port,
            planner: EpisodePlanner::new(settings),
            queue_dir: settings.paths.to_be_processed_dir.clone(),
            keep_intermediate: settings.pipeline.keep_intermediate,
            continue_on_error: settings.pipeline.continue_on_error,
        }
    }

    pub async fn execute(&self, request: ProcessRequest) -> Result<ProcessReport, DomainError> {
        let started_at = Utc::now();
        let inputs = self.resolve_inputs(request.input.as_deref()).await?;
        info!("Processing {} containers", inputs.len());

        let mut episodes = Vec::with_capacity(inputs.len());
        for input in inputs {
            let (outcome, failure) = self.process_episode(&input, request.dry_run).await;

            if let Some(e) = failure {
                if !self.continue_on_error {
                    return Err(e);
                }
            }
            episodes.push(outcome);
        }

        let report = ProcessReport {
            started_at,
            finished_at: Utc::now(),
            dry_run: request.dry_run,
            episodes,
        };

        if report.failed() > 0 {
            warn!(
                "{} of {} containers failed",
                report.failed(),
                report.episodes.len()
            );
        }
        Ok(report)
    }

    async fn resolve_inputs(&self, input: Option<&Path>) -> Result<Vec<PathBuf>, DomainError> {
        if let Some(path) = input {
            if !self.fs_port.exists(path).await? {
                return Err(DomainError::FsFail(format!(
                    "Input file does not exist: {}",
                    path.display()
                )));
            }
            return Ok(vec![path.to_path_buf()]);
        }

        let queued: Vec<PathBuf> = self
            .fs_port
            .list_files(&self.queue_dir)
            .await?
            .into_iter()
            .map(|entry| entry.path)
            .filter(|path| {
                path.extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(CONTAINER_EXTENSION))
            })
            .collect();

        if queued.is_empty() {
            warn!("No containers queued in {}", self.queue_dir.display());
        }
        Ok(queued)
    }

    /// Probe, plan and (unless `dry_run`) run one container; the failure, if
    /// any, is returned alongside the recorded outcome
    async fn process_episode(
        &self,
        source: &Path,
        dry_run: bool,
    ) -> (EpisodeOutcome, Option<DomainError>) {
        let timer = Instant::now();
        info!("Processing: {}", source.display());

        let mut outcome = EpisodeOutcome {
            source: source.to_path_buf(),
            status: EpisodeStatus::Failed,
            inventory: None,
            plan: None,
            error: None,
            elapsed_seconds: 0.0,
        };

        let result = async {
            let inventory = self.probe_port.inspect(source).await?;
            let plan = self.planner.plan(source, &inventory)?;
            outcome.inventory = Some(inventory);
            outcome.plan = Some(plan.clone());

            if dry_run {
                return Ok(EpisodeStatus::Planned);
            }
            self.run_plan(&plan).await?;
            Ok::<_, DomainError>(EpisodeStatus::Completed)
        }
        .await;

        let failure = match result {
            Ok(status) => {
                outcome.status = status;
                None
            }
            Err(e) => {
                error!("{}: {}", source.display(), e);
                outcome.error = Some(e.to_string());
                Some(e)
            }
        };

        let elapsed = timer.elapsed();
        outcome.elapsed_seconds = elapsed.as_secs_f64();
        info!(
            "Finished {} ({:?}) in {}",
            source.display(),
            outcome.status,
            Utils::format_duration(elapsed)
        );
        (outcome, failure)
    }

    /// Run every stage in order, then drop the intermediate files
    async fn run_plan(&self, plan: &EpisodePlan) -> Result<(), DomainError> {
        self.fs_port.create_directory(&plan.intermediate_dir).await?;
        self.fs_port.create_directory(&plan.ready_dir).await?;

        for stage in &plan.stages {
            self.execute_port.run_stage(stage).await?;
        }

        if !self.keep_intermediate && self.fs_port.exists(&plan.intermediate_dir).await? {
            info!("Removing {}", plan.intermediate_dir.display());
            self.fs_port.delete_directory(&plan.intermediate_dir).await?;
        }
        Ok(())
    }
}
