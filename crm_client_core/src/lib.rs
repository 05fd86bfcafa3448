//! Classroom repository manager core library
//!
//! This is the core library for `crm`, providing the clone orchestration
//! (folder naming, clone execution, batch folding), the `.crm` binding
//! stores and the classroom REST API client.

pub mod api;
pub mod batch;
pub mod cloner;
pub mod error;
pub mod models;
pub mod naming;
pub mod progress;
pub mod store;

// Re-export main types
pub use api::{ApiConfig, ClassroomApi, RestClassroomApi};
pub use batch::{BatchOrchestrator, BatchResult, CloneJob, CloneOutcome};
pub use cloner::{
    CloneConfig, CloneExecutor, CloneProgram, GhCloner, GitCloner, RepositoryCloner, cloner_for,
};
pub use error::{Error, Result};
pub use models::{
    AcceptedSubmission, Assignment, Classroom, RemoteAssignment, RemoteClassroom, RosterLookup,
    StarterRepository, Student,
};
pub use naming::resolve_folder_name;
pub use progress::{BatchProgress, NullProgress};
pub use store::{AssignmentStore, ClassroomStore, Workspace};
