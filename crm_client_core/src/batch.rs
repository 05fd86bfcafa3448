//! Sequential clone batch for one assignment
//!
//! The batch attempts the starter repository (when the assignment has one)
//! and then every accepted submission in upstream order. Each attempt is
//! isolated: a failure is recorded as `Error cloning <full name>: <cause>`
//! and the next entry is attempted. Nothing is retried and nothing runs in
//! parallel.

use crate::cloner::{CloneExecutor, DEFAULT_STARTER_FOLDER, RepositoryCloner};
use crate::error::{CloneError, CloneFailure};
use crate::models::{AcceptedSubmission, RosterLookup, StarterRepository};
use crate::naming::resolve_folder_name;
use crate::progress::{BatchProgress, NullProgress};
use log::{debug, info};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Result of one clone attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CloneOutcome {
    pub destination: PathBuf,
    pub source_full_name: String,
    pub succeeded: bool,
    pub error_message: Option<String>,
}

/// Aggregate result of a batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchResult {
    /// Number of successful clones
    pub total_cloned: usize,
    /// One formatted message per failed attempt, in attempt order
    pub failures: Vec<String>,
    /// Every attempt, in attempt order
    pub outcomes: Vec<CloneOutcome>,
}

impl BatchResult {
    pub fn total_attempts(&self) -> usize {
        self.outcomes.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    fn record(&mut self, outcome: CloneOutcome) {
        if outcome.succeeded {
            self.total_cloned += 1;
        } else if let Some(message) = &outcome.error_message {
            self.failures.push(message.clone());
        }
        self.outcomes.push(outcome);
    }
}

/// Format the failure line reported for a repository
pub fn failure_message(full_name: &str, cause: &CloneFailure) -> String {
    format!("Error cloning {full_name}: {cause}")
}

/// One planned clone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneJob {
    pub remote: String,
    pub folder: String,
}

/// Plans and runs the clones of one assignment
pub struct BatchOrchestrator<'a> {
    executor: CloneExecutor<'a>,
    starter_folder: String,
    progress: &'a dyn BatchProgress,
}

impl<'a> BatchOrchestrator<'a> {
    pub fn new(cloner: &'a dyn RepositoryCloner) -> Self {
        Self {
            executor: CloneExecutor::new(cloner),
            starter_folder: DEFAULT_STARTER_FOLDER.to_string(),
            progress: &NullProgress,
        }
    }

    /// Override the folder the starter repository is cloned into
    pub fn with_starter_folder(mut self, folder: &str) -> Self {
        self.starter_folder = folder.to_string();
        self
    }

    pub fn with_progress(mut self, progress: &'a dyn BatchProgress) -> Self {
        self.progress = progress;
        self
    }

    /// Clone jobs in attempt order: starter first, then submissions
    pub fn plan<R>(
        &self,
        starter: Option<&StarterRepository>,
        submissions: &[AcceptedSubmission],
        roster: &R,
    ) -> Vec<CloneJob>
    where
        R: RosterLookup + ?Sized,
    {
        let starter = starter.filter(|repo| repo.id != 0).map(|repo| CloneJob {
            remote: repo.full_name.clone(),
            folder: self.starter_folder.clone(),
        });

        starter
            .into_iter()
            .chain(submissions.iter().map(|submission| CloneJob {
                remote: submission.repository.full_name.clone(),
                folder: resolve_folder_name(submission, roster),
            }))
            .collect()
    }

    /// Attempt every entry exactly once and fold the outcomes
    pub async fn run<R>(
        &self,
        assignment_path: &Path,
        starter: Option<&StarterRepository>,
        submissions: &[AcceptedSubmission],
        roster: &R,
    ) -> BatchResult
    where
        R: RosterLookup + ?Sized,
    {
        let jobs = self.plan(starter, submissions, roster);
        self.execute(assignment_path, &jobs).await
    }

    /// Run already planned jobs
    pub async fn execute(&self, assignment_path: &Path, jobs: &[CloneJob]) -> BatchResult {
        let mut result = BatchResult::default();
        // Folder name -> remote that claimed it
        let mut claimed: HashMap<&str, &str> = HashMap::with_capacity(jobs.len());

        info!(
            "Cloning {} repositories into {}",
            jobs.len(),
            assignment_path.display()
        );
        self.progress.batch_started(jobs.len());

        for (index, job) in jobs.iter().enumerate() {
            let destination = assignment_path.join(&job.folder);
            self.progress
                .clone_started(index, &job.remote, &destination);

            let attempt = match claimed.get(job.folder.as_str()) {
                Some(claimed_by) => {
                    debug!(
                        "Folder {} already claimed by {claimed_by}, skipping {}",
                        job.folder, job.remote
                    );
                    Err(CloneError::new(
                        &job.remote,
                        destination.clone(),
                        CloneFailure::FolderTaken {
                            folder: job.folder.clone(),
                            claimed_by: claimed_by.to_string(),
                        },
                    ))
                }
                None => {
                    claimed.insert(job.folder.as_str(), &job.remote);
                    self.executor.clone(&destination, &job.remote).await
                }
            };

            let outcome = match attempt {
                Ok(()) => CloneOutcome {
                    destination,
                    source_full_name: job.remote.clone(),
                    succeeded: true,
                    error_message: None,
                },
                Err(error) => CloneOutcome {
                    destination,
                    source_full_name: job.remote.clone(),
                    succeeded: false,
                    error_message: Some(failure_message(&job.remote, error.cause())),
                },
            };

            self.progress.clone_finished(&outcome);
            result.record(outcome);
        }

        info!(
            "Batch finished: {} cloned, {} failed",
            result.total_cloned,
            result.failures.len()
        );
        self.progress.batch_finished(&result);
        result
    }
}
