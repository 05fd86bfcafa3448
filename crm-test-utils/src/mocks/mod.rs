//! Mock implementations for testing

mod api;
mod cloner;

pub use api::MockClassroomApi;
pub use cloner::{CloneAttempt, MockCloner};
