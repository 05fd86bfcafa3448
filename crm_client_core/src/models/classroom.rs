use serde::{Deserialize, Serialize};

/// Organization that owns the classroom
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Organization {
    pub id: i64,
    pub login: String,
}

/// Classroom identity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClassroomInfo {
    pub id: i64,
    pub name: String,
}

/// One roster entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Student {
    pub name: String,
    pub email: String,
    #[serde(rename = "GithubUser")]
    pub github_login: String,
}

impl Student {
    pub fn new(name: &str, email: &str, github_login: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            github_login: github_login.to_string(),
        }
    }
}

/// Classroom binding persisted in `.crm/classroom.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Classroom {
    pub organization: Organization,
    pub classroom: ClassroomInfo,
    #[serde(default)]
    pub students: Vec<Student>,
}

impl Classroom {
    pub fn new(organization: Organization, classroom: ClassroomInfo) -> Self {
        Self {
            organization,
            classroom,
            students: Vec::new(),
        }
    }

    /// Add a student, replacing any entry with the same login
    pub fn add_student(&mut self, student: Student) {
        match self
            .students
            .iter_mut()
            .find(|s| s.github_login.eq_ignore_ascii_case(&student.github_login))
        {
            Some(existing) => *existing = student,
            None => self.students.push(student),
        }
    }

    /// Remove the student with the given login; false if absent
    pub fn remove_student(&mut self, login: &str) -> bool {
        let before = self.students.len();
        self.students
            .retain(|s| !s.github_login.eq_ignore_ascii_case(login));
        self.students.len() != before
    }
}

/// Lookup from GitHub login to roster entry
///
/// A miss is a normal outcome, never an error.
pub trait RosterLookup {
    fn find_student(&self, login: &str) -> Option<&Student>;
}

impl RosterLookup for [Student] {
    fn find_student(&self, login: &str) -> Option<&Student> {
        self.iter()
            .find(|s| s.github_login.eq_ignore_ascii_case(login))
    }
}

impl RosterLookup for Vec<Student> {
    fn find_student(&self, login: &str) -> Option<&Student> {
        self.as_slice().find_student(login)
    }
}

impl RosterLookup for Classroom {
    fn find_student(&self, login: &str) -> Option<&Student> {
        self.students.find_student(login)
    }
}
