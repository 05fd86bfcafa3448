//! Classroom repository manager CLI library
//!
//! The `crm` binary is a thin layer over these modules.

pub mod config;
pub mod error;
pub mod orchestrators;
pub mod output;
pub mod paths;
pub mod progress;
pub mod prompt;
pub mod student;
pub mod terminal;
