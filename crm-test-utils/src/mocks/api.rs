//! In-memory classroom API

use async_trait::async_trait;
use crm_client_core::ClassroomApi;
use crm_client_core::error::ApiError;
use crm_client_core::models::{AcceptedSubmission, RemoteAssignment, RemoteClassroom};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct MockApiState {
    classrooms: Vec<RemoteClassroom>,
    /// classroom id -> assignments
    assignments: HashMap<i64, Vec<RemoteAssignment>>,
    /// assignment id -> accepted submissions
    accepted: HashMap<i64, Vec<AcceptedSubmission>>,
    fail_with_status: Option<u16>,
    calls: Vec<String>,
}

/// Mock [`ClassroomApi`] backed by in-memory fixtures
///
/// Unknown ids answer with a 404 status error, like the real endpoint.
#[derive(Debug, Clone, Default)]
pub struct MockClassroomApi {
    state: Arc<Mutex<MockApiState>>,
}

impl MockClassroomApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_classroom(self, classroom: RemoteClassroom) -> Self {
        self.state.lock().unwrap().classrooms.push(classroom);
        self
    }

    pub fn with_assignment(self, classroom_id: i64, assignment: RemoteAssignment) -> Self {
        self.state
            .lock()
            .unwrap()
            .assignments
            .entry(classroom_id)
            .or_default()
            .push(assignment);
        self
    }

    pub fn with_accepted(self, assignment_id: i64, submissions: Vec<AcceptedSubmission>) -> Self {
        self.state
            .lock()
            .unwrap()
            .accepted
            .insert(assignment_id, submissions);
        self
    }

    /// Make every call fail with the given HTTP status
    pub fn failing_with(self, status: u16) -> Self {
        self.state.lock().unwrap().fail_with_status = Some(status);
        self
    }

    /// Calls received so far, formatted as `method:arg[:arg]`
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    fn record(&self, call: String) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call.clone());
        match state.fail_with_status {
            Some(status) => Err(ApiError::status(status, &call, "mock failure")),
            None => Ok(()),
        }
    }
}

fn not_found(path: String) -> ApiError {
    ApiError::status(404, &path, "Not Found")
}

#[async_trait]
impl ClassroomApi for MockClassroomApi {
    async fn list_classrooms(&self) -> Result<Vec<RemoteClassroom>, ApiError> {
        self.record("list_classrooms".to_string())?;
        Ok(self.state.lock().unwrap().classrooms.clone())
    }

    async fn get_classroom(&self, classroom_id: i64) -> Result<RemoteClassroom, ApiError> {
        self.record(format!("get_classroom:{classroom_id}"))?;
        self.state
            .lock()
            .unwrap()
            .classrooms
            .iter()
            .find(|c| c.id == classroom_id)
            .cloned()
            .ok_or_else(|| not_found(format!("/classrooms/{classroom_id}")))
    }

    async fn list_assignments(
        &self,
        classroom_id: i64,
    ) -> Result<Vec<RemoteAssignment>, ApiError> {
        self.record(format!("list_assignments:{classroom_id}"))?;
        let state = self.state.lock().unwrap();
        if !state.classrooms.iter().any(|c| c.id == classroom_id) {
            return Err(not_found(format!("/classrooms/{classroom_id}/assignments")));
        }
        Ok(state
            .assignments
            .get(&classroom_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_assignment(&self, assignment_id: i64) -> Result<RemoteAssignment, ApiError> {
        self.record(format!("get_assignment:{assignment_id}"))?;
        self.state
            .lock()
            .unwrap()
            .assignments
            .values()
            .flatten()
            .find(|a| a.id == assignment_id)
            .cloned()
            .ok_or_else(|| not_found(format!("/assignments/{assignment_id}")))
    }

    async fn list_accepted_assignments(
        &self,
        assignment_id: i64,
        per_page: u32,
    ) -> Result<Vec<AcceptedSubmission>, ApiError> {
        self.record(format!(
            "list_accepted_assignments:{assignment_id}:{per_page}"
        ))?;
        let state = self.state.lock().unwrap();
        let known = state.accepted.contains_key(&assignment_id)
            || state
                .assignments
                .values()
                .flatten()
                .any(|a| a.id == assignment_id);
        if !known {
            return Err(not_found(format!(
                "/assignments/{assignment_id}/accepted_assignments"
            )));
        }
        Ok(state
            .accepted
            .get(&assignment_id)
            .cloned()
            .unwrap_or_default())
    }
}
