//! Init command orchestrator
//!
//! Binds the working directory to a GitHub Classroom classroom.

use crate::error::CommandError;
use crate::prompt::Selector;
use anyhow::{Context, Result};
use crm_client_core::models::{ClassroomInfo, Organization};
use crm_client_core::store;
use crm_client_core::{Classroom, ClassroomApi, ClassroomStore};
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Where `init` runs and what is already bound there
#[derive(Debug, Clone)]
pub struct InitContext {
    pub path: PathBuf,
    pub existing: Option<Classroom>,
}

/// What an init run did
#[derive(Debug, Clone)]
pub struct InitReport {
    pub path: PathBuf,
    pub classroom: Classroom,
    /// Roster entries carried over from the previous binding
    pub kept_students: usize,
}

/// Check that `cwd` can hold a classroom binding
///
/// A classroom bound in a parent folder makes `cwd` part of that classroom,
/// so binding here is refused.
pub fn init_context(cwd: &Path) -> Result<InitContext> {
    let discovered =
        store::discover::<Classroom>(cwd).context("Failed to read the classroom binding")?;

    match discovered {
        Some(bound) if bound.path != cwd => Err(CommandError::NestedClassroom {
            cwd: cwd.to_path_buf(),
            classroom: bound.path,
        }
        .into()),
        Some(bound) => Ok(InitContext {
            path: bound.path,
            existing: Some(bound.value),
        }),
        None => Ok(InitContext {
            path: cwd.to_path_buf(),
            existing: None,
        }),
    }
}

/// Orchestrator for the init command
pub struct InitOrchestrator<'a> {
    api: &'a dyn ClassroomApi,
    selector: &'a dyn Selector,
}

impl<'a> InitOrchestrator<'a> {
    pub fn new(api: &'a dyn ClassroomApi, selector: &'a dyn Selector) -> Self {
        Self { api, selector }
    }

    /// Bind `context.path` to a classroom
    ///
    /// The id comes from the flag, then the existing binding, then a prompt.
    /// An existing roster is preserved.
    pub async fn run(&self, context: InitContext, classroom_id: Option<i64>) -> Result<InitReport> {
        let classroom_id = match (classroom_id, &context.existing) {
            (Some(id), _) => id,
            (None, Some(existing)) => {
                debug!("Refreshing classroom {}", existing.classroom.id);
                existing.classroom.id
            }
            (None, None) => {
                let classrooms = self
                    .api
                    .list_classrooms()
                    .await
                    .context("Failed to list classrooms")?;
                let active: Vec<_> = classrooms.into_iter().filter(|c| !c.archived).collect();
                self.selector.select_classroom(&active)?
            }
        };

        let remote = self
            .api
            .get_classroom(classroom_id)
            .await
            .with_context(|| format!("Failed to fetch classroom {classroom_id}"))?;
        let organization = remote
            .organization
            .ok_or(CommandError::MissingOrganization { id: remote.id })?;

        let mut classroom = Classroom::new(
            Organization {
                id: organization.id,
                login: organization.login,
            },
            ClassroomInfo {
                id: remote.id,
                name: remote.name,
            },
        );
        if let Some(existing) = context.existing {
            classroom.students = existing.students;
        }

        ClassroomStore::save(&context.path, &classroom)
            .context("Failed to write the classroom binding")?;
        info!(
            "Bound {} to classroom {} ({})",
            context.path.display(),
            classroom.classroom.id,
            classroom.organization.login
        );

        Ok(InitReport {
            path: context.path,
            kept_students: classroom.students.len(),
            classroom,
        })
    }
}
