//! Subprocess execution adapter
//!
//! Runs external tools through `tokio::process`, bounding how many processes
//! of a stage run at once.

use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Process-based execution adapter
pub struct ProcessExecAdapter {
    max_jobs: usize,
}

impl ProcessExecAdapter {
    /// Create new adapter running at most `max_jobs` processes per stage
    pub fn new(max_jobs: usize) -> Result<Self, DomainError> {
        if max_jobs == 0 {
            return Err(DomainError::BadArgs(
                "Job limit must be at least 1".to_string(),
            ));
        }
        Ok(Self { max_jobs })
    }
}

#[async_trait]
impl ExecutePort for ProcessExecAdapter {
    async fn run_capture(&self, invocation: &ToolInvocation) -> Result<ToolOutput, DomainError> {
        run_invocation(invocation, false).await
    }

    async fn run_stage(&self, stage: &Stage) -> Result<(), DomainError> {
        info!(
            "Starting stage {} ({} commands, {} at a time)",
            stage.kind,
            stage.invocations.len(),
            self.max_jobs
        );

        let semaphore = Arc::new(Semaphore::new(self.max_jobs));
        let mut tasks = JoinSet::new();

        for invocation in stage.invocations.iter().cloned() {
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|e| DomainError::InternalError(format!("Job limiter closed: {}", e)))?;
                run_invocation(&invocation, true).await.map(|_| ())
            });
        }

        let mut first_error = None;
        while let Some(joined) = tasks.join_next().await {
            let result = joined
                .map_err(|e| DomainError::InternalError(format!("Tool task aborted: {}", e)))
                .and_then(|result| result);

            if let Err(e) = result {
                error!("Stage {}: {}", stage.kind, e);
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => {
                info!("Stage {} completed", stage.kind);
                Ok(())
            }
        }
    }
}

/// Run one tool to completion, failing on a non-zero exit
async fn run_invocation(invocation: &ToolInvocation, echo_output: bool) -> Result<ToolOutput, DomainError> {
    info!("{}", invocation);

    let output = Command::new(&invocation.program)
        .args(&invocation.args)
        .stdin(Stdio::null())
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|e| DomainError::ToolLaunch {
            program: invocation.program.clone(),
            message: e.to_string(),
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if echo_output {
        for line in stdout.lines().filter(|line| !line.trim().is_empty()) {
            debug!("{}: {}", invocation.program, line);
        }
    }

    if !output.status.success() && invocation.is_warning_exit(output.status.code()) {
        warn!("{} finished with warnings ({})", invocation.program, output.status);
        for line in stdout.lines().filter(|line| !line.trim().is_empty()) {
            warn!("{}: {}", invocation.program, line);
        }
    } else if !output.status.success() {
        return Err(DomainError::ToolFailed {
            invocation: invocation.to_string(),
            status: output.status.to_string(),
            stderr: stderr.trim().to_string(),
        });
    }

    Ok(ToolOutput { stdout, stderr })
}
