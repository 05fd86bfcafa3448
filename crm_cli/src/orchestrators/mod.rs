//! Command orchestrators for business logic
//!
//! This module provides orchestrators that coordinate between the CLI layer
//! and the core library services. Collaborators are passed in by reference
//! so tests can substitute mocks.

pub mod clone_orchestrator;
pub mod init_orchestrator;
