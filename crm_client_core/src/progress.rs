//! Progress reporting for clone batches
//!
//! The batch orchestrator notifies a [`BatchProgress`] before and after each
//! clone. Observers only watch; they cannot change the outcome.

use crate::batch::{BatchResult, CloneOutcome};
use std::path::Path;

/// Receives batch lifecycle notifications
pub trait BatchProgress: Send + Sync {
    /// Called once with the number of entries that will be attempted
    fn batch_started(&self, _total: usize) {}

    /// Called before each clone attempt (`index` is zero based)
    fn clone_started(&self, _index: usize, _remote: &str, _destination: &Path) {}

    /// Called after each attempt with its outcome
    fn clone_finished(&self, _outcome: &CloneOutcome) {}

    /// Called once after every entry has been attempted
    fn batch_finished(&self, _result: &BatchResult) {}
}

/// Observer that ignores every notification
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgress;

impl BatchProgress for NullProgress {}
