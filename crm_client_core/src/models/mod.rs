//! Domain models
//!
//! Local bindings (`Assignment`, `Classroom`) are persisted under `.crm/`;
//! the remote types mirror the classroom REST API payloads.

pub mod assignment;
pub mod classroom;
pub mod remote;

pub use assignment::Assignment;
pub use classroom::{Classroom, ClassroomInfo, Organization, RosterLookup, Student};
pub use remote::{
    AcceptedSubmission, Author, RemoteAssignment, RemoteClassroom, RemoteOrganization,
    StarterRepository, SubmissionRepository,
};
