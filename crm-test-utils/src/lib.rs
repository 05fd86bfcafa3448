//! Test utilities for the classroom repository manager
//!
//! This crate provides mock implementations of the clone and API seams,
//! and builders for roster and submission fixtures.

pub mod builders;
pub mod mocks;

// Re-export commonly used types
pub use builders::{TestDataBuilder, TestScenario};
pub use mocks::{CloneAttempt, MockClassroomApi, MockCloner};
