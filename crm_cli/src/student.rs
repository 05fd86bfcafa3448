//! Roster maintenance on the discovered classroom binding

use crate::error::CommandError;
use anyhow::{Context, Result};
use crm_client_core::error::ValidationError;
use crm_client_core::naming::canonical_folder_name;
use crm_client_core::store::{self, Bound};
use crm_client_core::{Classroom, ClassroomStore, Student};
use log::{info, warn};
use std::path::Path;

fn classroom_binding(cwd: &Path) -> Result<Bound<Classroom>> {
    store::discover::<Classroom>(cwd)
        .context("Failed to read the classroom binding")?
        .ok_or_else(|| {
            CommandError::NoClassroom {
                path: cwd.to_path_buf(),
            }
            .into()
        })
}

fn require(parameter: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::invalid_parameter(
            parameter,
            "must not be empty",
        ));
    }
    Ok(())
}

/// Add or replace a roster entry; returns the classroom folder
pub fn add_student(cwd: &Path, name: &str, email: &str, login: &str) -> Result<Bound<Classroom>> {
    require("name", name)?;
    require("email", email)?;
    require("login", login)?;
    if !email.contains('@') {
        return Err(ValidationError::invalid_parameter("email", "must contain '@'").into());
    }

    if canonical_folder_name(name).is_none() {
        warn!("'{name}' has a single name part; submissions by {login} keep the repository name");
    }

    let mut bound = classroom_binding(cwd)?;
    bound
        .value
        .add_student(Student::new(name.trim(), email.trim(), login.trim()));
    ClassroomStore::save(&bound.path, &bound.value)?;

    info!("Added {login} to the roster in {}", bound.path.display());
    Ok(bound)
}

/// Remove the entry with `login`
pub fn remove_student(cwd: &Path, login: &str) -> Result<Bound<Classroom>> {
    let mut bound = classroom_binding(cwd)?;
    if !bound.value.remove_student(login) {
        return Err(CommandError::StudentNotFound {
            login: login.to_string(),
        }
        .into());
    }
    ClassroomStore::save(&bound.path, &bound.value)?;

    info!("Removed {login} from the roster in {}", bound.path.display());
    Ok(bound)
}

/// Roster of the discovered classroom, sorted by login
pub fn list_students(cwd: &Path) -> Result<Vec<Student>> {
    let mut students = classroom_binding(cwd)?.value.students;
    students.sort_by_key(|s| s.github_login.to_lowercase());
    Ok(students)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crm_client_core::models::{ClassroomInfo, Organization};
    use tempfile::TempDir;

    fn bound_classroom() -> TempDir {
        let temp = TempDir::new().unwrap();
        let classroom = Classroom::new(
            Organization {
                id: 1,
                login: "classroom-org".to_string(),
            },
            ClassroomInfo {
                id: 10,
                name: "Intro".to_string(),
            },
        );
        ClassroomStore::save(temp.path(), &classroom).unwrap();
        temp
    }

    #[test]
    fn test_add_from_subfolder_updates_classroom() {
        let temp = bound_classroom();
        let nested = temp.path().join("lab-1").join("lovelace.ada");
        std::fs::create_dir_all(&nested).unwrap();

        let bound = add_student(&nested, "Ada Lovelace", "ada@example.edu", "ada").unwrap();

        assert_eq!(bound.path, temp.path());
        let saved = ClassroomStore::load(temp.path()).unwrap();
        assert_eq!(saved.students.len(), 1);
        assert_eq!(saved.students[0].github_login, "ada");
    }

    #[test]
    fn test_remove_unknown_login() {
        let temp = bound_classroom();

        let error = remove_student(temp.path(), "nobody").unwrap_err();

        assert!(matches!(
            error.downcast_ref::<CommandError>(),
            Some(CommandError::StudentNotFound { .. })
        ));
    }

    #[test]
    fn test_list_sorted_by_login() {
        let temp = bound_classroom();
        add_student(temp.path(), "Grace Hopper", "grace@example.edu", "grace").unwrap();
        add_student(temp.path(), "Ada Lovelace", "ada@example.edu", "Ada").unwrap();

        let logins: Vec<String> = list_students(temp.path())
            .unwrap()
            .into_iter()
            .map(|s| s.github_login)
            .collect();

        assert_eq!(logins, vec!["Ada", "grace"]);
    }

    #[test]
    fn test_invalid_email_is_rejected() {
        let temp = bound_classroom();

        let error = add_student(temp.path(), "Ada Lovelace", "ada", "ada").unwrap_err();

        assert!(error.downcast_ref::<ValidationError>().is_some());
    }

    #[test]
    fn test_outside_classroom() {
        let temp = TempDir::new().unwrap();

        let error = list_students(temp.path()).unwrap_err();

        assert!(matches!(
            error.downcast_ref::<CommandError>(),
            Some(CommandError::NoClassroom { .. })
        ));
    }
}
