//! Clone command orchestrator
//!
//! Resolves which assignment the working directory belongs to, binds the
//! assignment folder on first use and hands the accepted submissions to the
//! core batch orchestrator.

use crate::error::CommandError;
use crate::prompt::Selector;
use anyhow::{Context, Result};
use crm_client_core::error::IoError;
use crm_client_core::naming::validate_folder_name;
use crm_client_core::progress::NullProgress;
use crm_client_core::{
    Assignment, AssignmentStore, BatchOrchestrator, BatchProgress, BatchResult, ClassroomApi,
    RemoteAssignment, RepositoryCloner, Student, Workspace,
};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

/// Clone command options
#[derive(Debug, Clone)]
pub struct CloneOptions {
    /// Assignment to clone when the folder is not bound yet
    pub assignment_id: Option<i64>,
    /// Folder for the starter repository, relative to the assignment folder
    pub starter_folder: String,
    /// Page size for listing accepted submissions
    pub page_size: u32,
}

/// What a clone run did
#[derive(Debug, Clone)]
pub struct CloneReport {
    pub assignment: RemoteAssignment,
    pub assignment_path: PathBuf,
    /// True when this run created the assignment binding
    pub newly_bound: bool,
    pub result: BatchResult,
}

/// Bindings visible from `cwd`, failing when there are none
pub fn clone_context(cwd: &Path) -> Result<Workspace> {
    let workspace = Workspace::discover(cwd).context("Failed to read .crm bindings")?;
    if workspace.is_empty() {
        return Err(CommandError::NotInitialized {
            path: cwd.to_path_buf(),
        }
        .into());
    }
    Ok(workspace)
}

/// Orchestrator for the clone command
pub struct CloneOrchestrator<'a> {
    api: &'a dyn ClassroomApi,
    cloner: &'a dyn RepositoryCloner,
    selector: &'a dyn Selector,
    progress: &'a dyn BatchProgress,
}

impl<'a> CloneOrchestrator<'a> {
    pub fn new(
        api: &'a dyn ClassroomApi,
        cloner: &'a dyn RepositoryCloner,
        selector: &'a dyn Selector,
    ) -> Self {
        Self {
            api,
            cloner,
            selector,
            progress: &NullProgress,
        }
    }

    pub fn with_progress(mut self, progress: &'a dyn BatchProgress) -> Self {
        self.progress = progress;
        self
    }

    /// Run the clone flow from `cwd`
    pub async fn run(&self, cwd: &Path, options: &CloneOptions) -> Result<CloneReport> {
        validate_folder_name(&options.starter_folder)?;

        let workspace = clone_context(cwd)?;
        let assignment_id = self
            .resolve_assignment_id(cwd, &workspace, options)
            .await?;
        let assignment = self
            .api
            .get_assignment(assignment_id)
            .await
            .with_context(|| format!("Failed to fetch assignment {assignment_id}"))?;
        debug!("Assignment {} is '{}'", assignment.id, assignment.slug);

        let (assignment_path, newly_bound) = self.assignment_path(cwd, &workspace, &assignment)?;

        let submissions = self
            .api
            .list_accepted_assignments(assignment.id, options.page_size)
            .await
            .with_context(|| {
                format!(
                    "Failed to list accepted submissions of assignment {}",
                    assignment.id
                )
            })?;
        info!(
            "{} accepted submission(s) for {}",
            submissions.len(),
            assignment.slug
        );

        let roster: &[Student] = workspace
            .classroom
            .as_ref()
            .map(|bound| bound.value.students.as_slice())
            .unwrap_or_default();
        if roster.is_empty() {
            debug!("Empty roster, folders will use repository names");
        }

        let result = BatchOrchestrator::new(self.cloner)
            .with_starter_folder(&options.starter_folder)
            .with_progress(self.progress)
            .run(&assignment_path, assignment.starter(), &submissions, roster)
            .await;

        Ok(CloneReport {
            assignment,
            assignment_path,
            newly_bound,
            result,
        })
    }

    /// Assignment binding first, then the flag, then a prompt
    async fn resolve_assignment_id(
        &self,
        cwd: &Path,
        workspace: &Workspace,
        options: &CloneOptions,
    ) -> Result<i64> {
        if let Some(bound) = &workspace.assignment {
            if let Some(flag) = options.assignment_id
                && flag != bound.value.id
            {
                warn!(
                    "Ignoring --assignment {flag}: {} is bound to assignment {}",
                    bound.path.display(),
                    bound.value.id
                );
            }
            debug!(
                "Using assignment {} bound at {}",
                bound.value.id,
                bound.path.display()
            );
            return Ok(bound.value.id);
        }

        if let Some(id) = options.assignment_id {
            return Ok(id);
        }

        let Some(classroom) = &workspace.classroom else {
            return Err(CommandError::NoClassroom {
                path: cwd.to_path_buf(),
            }
            .into());
        };
        let classroom_id = classroom.value.classroom.id;
        let assignments = self
            .api
            .list_assignments(classroom_id)
            .await
            .with_context(|| format!("Failed to list assignments of classroom {classroom_id}"))?;

        self.selector.select_assignment(&assignments)
    }

    /// Bound folder, or `<classroom>/<slug>` created and bound now
    fn assignment_path(
        &self,
        cwd: &Path,
        workspace: &Workspace,
        assignment: &RemoteAssignment,
    ) -> Result<(PathBuf, bool)> {
        if let Some(bound) = &workspace.assignment {
            return Ok((bound.path.clone(), false));
        }

        let Some(classroom) = &workspace.classroom else {
            return Err(CommandError::NoClassroom {
                path: cwd.to_path_buf(),
            }
            .into());
        };

        validate_folder_name(&assignment.slug)?;
        let path = classroom.path.join(&assignment.slug);
        std::fs::create_dir_all(&path)
            .map_err(|e| crm_client_core::Error::from(IoError::from_std(e).with_path(&path)))
            .with_context(|| format!("Failed to create {}", path.display()))?;

        if AssignmentStore::is_bound(&path) {
            debug!("{} is already bound", path.display());
            return Ok((path, false));
        }

        AssignmentStore::save(&path, &Assignment::new(assignment.id, &assignment.slug))
            .context("Failed to bind the assignment folder")?;
        info!("Bound {} to assignment {}", path.display(), assignment.id);
        Ok((path, true))
    }
}
