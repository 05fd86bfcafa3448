//! Interactive selection of classrooms and assignments

use crate::error::CommandError;
use crate::terminal;
use anyhow::{Context, Result};
use crm_client_core::{RemoteAssignment, RemoteClassroom};
use dialoguer::Select;

/// Chooses one entry from a list fetched from the API
///
/// Implementations return the chosen id, or an error when nothing can be
/// chosen.
pub trait Selector: Send + Sync {
    fn select_classroom(&self, classrooms: &[RemoteClassroom]) -> Result<i64>;

    fn select_assignment(&self, assignments: &[RemoteAssignment]) -> Result<i64>;
}

/// Terminal selection list
#[derive(Debug, Default, Clone, Copy)]
pub struct DialoguerSelector;

impl DialoguerSelector {
    fn choose(
        &self,
        what: &'static str,
        flag: &'static str,
        labels: &[String],
    ) -> Result<usize> {
        if labels.is_empty() {
            return Err(CommandError::NothingToSelect { what }.into());
        }
        if !terminal::can_prompt() {
            return Err(CommandError::NotInteractive { what, flag }.into());
        }

        Select::new()
            .with_prompt(format!("Select a {what}"))
            .items(labels)
            .default(0)
            .interact_opt()
            .context("Failed to read selection")?
            .ok_or_else(|| CommandError::SelectionCancelled { what }.into())
    }
}

impl Selector for DialoguerSelector {
    fn select_classroom(&self, classrooms: &[RemoteClassroom]) -> Result<i64> {
        let labels: Vec<String> = classrooms.iter().map(classroom_label).collect();
        let index = self.choose("classroom", "--classroom <ID>", &labels)?;
        Ok(classrooms[index].id)
    }

    fn select_assignment(&self, assignments: &[RemoteAssignment]) -> Result<i64> {
        let labels: Vec<String> = assignments.iter().map(assignment_label).collect();
        let index = self.choose("assignment", "--assignment <ID>", &labels)?;
        Ok(assignments[index].id)
    }
}

/// Selection line for a classroom
pub fn classroom_label(classroom: &RemoteClassroom) -> String {
    if classroom.archived {
        format!("{} (#{}, archived)", classroom.name, classroom.id)
    } else {
        format!("{} (#{})", classroom.name, classroom.id)
    }
}

/// Selection line for an assignment
pub fn assignment_label(assignment: &RemoteAssignment) -> String {
    format!(
        "{} [{}] ({} accepted)",
        assignment.title, assignment.slug, assignment.accepted
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        let classroom = RemoteClassroom {
            id: 3,
            name: "CS 101".to_string(),
            archived: true,
            organization: None,
        };
        let assignment = RemoteAssignment {
            id: 7,
            title: "Lab 1".to_string(),
            slug: "lab-1".to_string(),
            assignment_type: None,
            accepted: 12,
            starter_code_repository: None,
        };

        assert_eq!(classroom_label(&classroom), "CS 101 (#3, archived)");
        assert_eq!(assignment_label(&assignment), "Lab 1 [lab-1] (12 accepted)");
    }

    #[test]
    fn test_empty_list_is_nothing_to_select() {
        let error = DialoguerSelector.select_assignment(&[]).unwrap_err();

        assert!(matches!(
            error.downcast_ref::<CommandError>(),
            Some(CommandError::NothingToSelect { what: "assignment" })
        ));
    }
}
