//! Mock repository cloner

use async_trait::async_trait;
use crm_client_core::RepositoryCloner;
use crm_client_core::error::CloneFailure;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// One recorded call to the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneAttempt {
    pub full_name: String,
    pub destination: PathBuf,
}

#[derive(Debug, Default)]
struct MockCloneBehavior {
    failures: HashMap<String, String>,
    fail_all: Option<String>,
    populate: bool,
    attempts: Vec<CloneAttempt>,
}

/// Mock cloner that records every attempt
///
/// Clones are cheap handles onto the same state, so a test can hand one to
/// the code under test and inspect the other afterwards.
#[derive(Debug, Clone, Default)]
pub struct MockCloner {
    behavior: Arc<Mutex<MockCloneBehavior>>,
}

impl MockCloner {
    /// Create a mock that succeeds for every repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail clones of `full_name` with the given cause
    pub fn fail_for(self, full_name: &str, cause: &str) -> Self {
        self.behavior
            .lock()
            .unwrap()
            .failures
            .insert(full_name.to_string(), cause.to_string());
        self
    }

    /// Fail every clone with the given cause
    pub fn fail_all(self, cause: &str) -> Self {
        self.behavior.lock().unwrap().fail_all = Some(cause.to_string());
        self
    }

    /// Write a working copy to disk on success
    ///
    /// A populated destination then fails the next clone the way `git` does.
    pub fn populating(self) -> Self {
        self.behavior.lock().unwrap().populate = true;
        self
    }

    /// Every attempt so far, in call order
    pub fn attempts(&self) -> Vec<CloneAttempt> {
        self.behavior.lock().unwrap().attempts.clone()
    }

    pub fn attempted_destinations(&self) -> Vec<PathBuf> {
        self.attempts().into_iter().map(|a| a.destination).collect()
    }

    pub fn attempt_count(&self) -> usize {
        self.behavior.lock().unwrap().attempts.len()
    }
}

fn is_populated(path: &Path) -> bool {
    std::fs::read_dir(path)
        .map(|mut entries| entries.next().is_some())
        .unwrap_or(false)
}

#[async_trait]
impl RepositoryCloner for MockCloner {
    async fn clone_repository(
        &self,
        full_name: &str,
        destination: &Path,
    ) -> Result<(), CloneFailure> {
        let (failure, populate) = {
            let mut behavior = self.behavior.lock().unwrap();
            behavior.attempts.push(CloneAttempt {
                full_name: full_name.to_string(),
                destination: destination.to_path_buf(),
            });
            let failure = behavior
                .failures
                .get(full_name)
                .or(behavior.fail_all.as_ref())
                .cloned();
            (failure, behavior.populate)
        };

        if let Some(cause) = failure {
            return Err(CloneFailure::Other(cause));
        }

        if populate {
            if is_populated(destination) {
                return Err(CloneFailure::Other(format!(
                    "destination path '{}' already exists and is not an empty directory",
                    destination.display()
                )));
            }
            std::fs::create_dir_all(destination.join(".git"))
                .map_err(|e| CloneFailure::Other(e.to_string()))?;
            std::fs::write(destination.join("README.md"), full_name)
                .map_err(|e| CloneFailure::Other(e.to_string()))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_attempts_and_failures() {
        let cloner = MockCloner::new().fail_for("org/b", "boom");

        assert!(
            cloner
                .clone_repository("org/a", Path::new("/tmp/a"))
                .await
                .is_ok()
        );
        let error = cloner
            .clone_repository("org/b", Path::new("/tmp/b"))
            .await
            .unwrap_err();

        assert_eq!(error.to_string(), "boom");
        assert_eq!(cloner.attempt_count(), 2);
        assert_eq!(cloner.attempts()[1].full_name, "org/b");
    }
}
