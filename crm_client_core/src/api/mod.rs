//! GitHub Classroom REST API
//!
//! [`ClassroomApi`] is the seam the command layer talks to; the client is
//! constructed once per process and passed by reference.

mod rest;
mod token;

pub use rest::RestClassroomApi;
pub use token::resolve_token;

use crate::error::ApiError;
use crate::models::{AcceptedSubmission, RemoteAssignment, RemoteClassroom};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Default API endpoint
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// Page size used when listing accepted assignments
pub const DEFAULT_PAGE_SIZE: u32 = 15;

/// Largest page the API accepts
pub const MAX_PAGE_SIZE: u32 = 100;

/// API client settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub page_size: u32,
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout_seconds: 30,
        }
    }
}

/// Read access to classrooms, assignments and accepted submissions
#[async_trait]
pub trait ClassroomApi: Send + Sync {
    /// Classrooms visible to the authenticated user
    async fn list_classrooms(&self) -> Result<Vec<RemoteClassroom>, ApiError>;

    async fn get_classroom(&self, classroom_id: i64) -> Result<RemoteClassroom, ApiError>;

    async fn list_assignments(&self, classroom_id: i64)
    -> Result<Vec<RemoteAssignment>, ApiError>;

    async fn get_assignment(&self, assignment_id: i64) -> Result<RemoteAssignment, ApiError>;

    /// Every accepted submission of an assignment, all pages materialized
    async fn list_accepted_assignments(
        &self,
        assignment_id: i64,
        per_page: u32,
    ) -> Result<Vec<AcceptedSubmission>, ApiError>;
}
