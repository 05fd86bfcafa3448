//! Test data builders for clone scenarios

use crate::mocks::MockClassroomApi;
use crm_client_core::models::{
    AcceptedSubmission, Author, Classroom, ClassroomInfo, Organization, RemoteAssignment,
    RemoteClassroom, RemoteOrganization, StarterRepository, Student, SubmissionRepository,
};

/// Roster entry with an `@example.edu` address
pub fn student(name: &str, login: &str) -> Student {
    Student::new(name, &format!("{login}@example.edu"), login)
}

pub fn author(login: &str) -> Author {
    Author {
        id: 0,
        login: login.to_string(),
    }
}

/// Accepted submission of `full_name` owned by `logins`
pub fn submission(full_name: &str, logins: &[&str]) -> AcceptedSubmission {
    let name = full_name
        .rsplit_once('/')
        .map(|(_, name)| name)
        .unwrap_or(full_name);
    AcceptedSubmission {
        id: 0,
        submitted: false,
        students: logins.iter().map(|login| author(login)).collect(),
        repository: SubmissionRepository {
            id: 0,
            name: name.to_string(),
            full_name: full_name.to_string(),
        },
    }
}

pub fn starter(full_name: &str) -> StarterRepository {
    StarterRepository {
        id: 1,
        full_name: full_name.to_string(),
    }
}

/// Builder for a classroom, one assignment and its accepted submissions
pub struct TestDataBuilder {
    organization: Organization,
    classroom: ClassroomInfo,
    assignment_id: i64,
    assignment_title: String,
    assignment_slug: String,
    starter: Option<StarterRepository>,
    students: Vec<Student>,
    submissions: Vec<AcceptedSubmission>,
}

/// Fixtures produced by [`TestDataBuilder`]
#[derive(Debug, Clone)]
pub struct TestScenario {
    /// Local classroom binding, roster included
    pub classroom: Classroom,
    pub remote_classroom: RemoteClassroom,
    pub assignment: RemoteAssignment,
    pub submissions: Vec<AcceptedSubmission>,
}

impl TestDataBuilder {
    /// Create a builder for classroom 10 of `classroom-org` with assignment 7 (`lab-1`)
    pub fn new() -> Self {
        Self {
            organization: Organization {
                id: 1,
                login: "classroom-org".to_string(),
            },
            classroom: ClassroomInfo {
                id: 10,
                name: "Intro to Programming".to_string(),
            },
            assignment_id: 7,
            assignment_title: "Lab 1".to_string(),
            assignment_slug: "lab-1".to_string(),
            starter: None,
            students: Vec::new(),
            submissions: Vec::new(),
        }
    }

    pub fn with_organization(mut self, id: i64, login: &str) -> Self {
        self.organization = Organization {
            id,
            login: login.to_string(),
        };
        self
    }

    pub fn with_classroom(mut self, id: i64, name: &str) -> Self {
        self.classroom = ClassroomInfo {
            id,
            name: name.to_string(),
        };
        self
    }

    pub fn with_assignment(mut self, id: i64, title: &str, slug: &str) -> Self {
        self.assignment_id = id;
        self.assignment_title = title.to_string();
        self.assignment_slug = slug.to_string();
        self
    }

    /// Give the assignment a starter repository in the organization
    pub fn with_starter(mut self, name: &str) -> Self {
        self.starter = Some(starter(&format!("{}/{name}", self.organization.login)));
        self
    }

    /// Add a roster entry
    pub fn with_student(mut self, name: &str, login: &str) -> Self {
        self.students.push(student(name, login));
        self
    }

    /// Add a single-author submission named `<slug>-<login>`
    pub fn with_individual_submission(mut self, login: &str) -> Self {
        let full_name = format!(
            "{}/{}-{login}",
            self.organization.login, self.assignment_slug
        );
        self.submissions.push(submission(&full_name, &[login]));
        self
    }

    /// Add a group submission named `<slug>-<team>`
    pub fn with_group_submission(mut self, team: &str, logins: &[&str]) -> Self {
        let full_name = format!(
            "{}/{}-{team}",
            self.organization.login, self.assignment_slug
        );
        self.submissions.push(submission(&full_name, logins));
        self
    }

    pub fn build(self) -> TestScenario {
        let remote_classroom = RemoteClassroom {
            id: self.classroom.id,
            name: self.classroom.name.clone(),
            archived: false,
            organization: Some(RemoteOrganization {
                id: self.organization.id,
                login: self.organization.login.clone(),
            }),
        };

        let assignment = RemoteAssignment {
            id: self.assignment_id,
            title: self.assignment_title,
            slug: self.assignment_slug,
            assignment_type: Some("individual".to_string()),
            accepted: self.submissions.len() as u32,
            starter_code_repository: self.starter,
        };

        let mut classroom = Classroom::new(self.organization, self.classroom);
        for student in self.students {
            classroom.add_student(student);
        }

        TestScenario {
            classroom,
            remote_classroom,
            assignment,
            submissions: self.submissions,
        }
    }
}

impl Default for TestDataBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestScenario {
    /// Mock API serving this scenario's classroom, assignment and submissions
    pub fn api(&self) -> MockClassroomApi {
        MockClassroomApi::new()
            .with_classroom(self.remote_classroom.clone())
            .with_assignment(self.remote_classroom.id, self.assignment.clone())
            .with_accepted(self.assignment.id, self.submissions.clone())
    }
}
