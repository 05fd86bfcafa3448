//! Classroom REST API payloads

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteOrganization {
    pub id: i64,
    pub login: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteClassroom {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub archived: bool,
    /// Only present on the single-classroom endpoint
    #[serde(default)]
    pub organization: Option<RemoteOrganization>,
}

/// Starter code template of an assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarterRepository {
    pub id: i64,
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteAssignment {
    pub id: i64,
    pub title: String,
    pub slug: String,
    #[serde(default, rename = "type")]
    pub assignment_type: Option<String>,
    #[serde(default)]
    pub accepted: u32,
    #[serde(default)]
    pub starter_code_repository: Option<StarterRepository>,
}

impl RemoteAssignment {
    /// Starter repository, if the assignment has one (id 0 means none)
    pub fn starter(&self) -> Option<&StarterRepository> {
        self.starter_code_repository
            .as_ref()
            .filter(|repo| repo.id != 0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRepository {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    pub full_name: String,
}

/// Author identity on an accepted assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub id: i64,
    pub login: String,
}

/// One accepted assignment: a repository and the students that own it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptedSubmission {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub submitted: bool,
    pub students: Vec<Author>,
    pub repository: SubmissionRepository,
}

impl AcceptedSubmission {
    /// Login of the only author, `None` for group submissions
    pub fn sole_author(&self) -> Option<&str> {
        match self.students.as_slice() {
            [author] => Some(author.login.as_str()),
            _ => None,
        }
    }
}
