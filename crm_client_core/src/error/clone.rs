//! Repository clone error types

use std::path::PathBuf;
use thiserror::Error;

/// Failure reported by a single-repository clone primitive
#[derive(Error, Debug)]
pub enum CloneFailure {
    /// The clone program could not be started
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The clone program ran and exited unsuccessfully
    #[error("{}", format_exit(.program, .code, .stderr))]
    ExitStatus {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    /// Another entry of the same batch already claimed the destination folder
    #[error("folder '{folder}' is already used by {claimed_by}")]
    FolderTaken { folder: String, claimed_by: String },

    /// Free-form failure (used by alternative primitives)
    #[error("{0}")]
    Other(String),
}

fn format_exit(program: &str, code: &Option<i32>, stderr: &str) -> String {
    let status = match code {
        Some(code) => format!("{program} exited with status {code}"),
        None => format!("{program} was terminated by a signal"),
    };
    if stderr.is_empty() {
        status
    } else {
        format!("{status}: {stderr}")
    }
}

/// One failed clone, as reported by the clone executor
#[derive(Error, Debug)]
#[error("failed to clone {remote} into {}: {source}", .destination.display())]
pub struct CloneError {
    /// Remote repository full name (`owner/name`)
    pub remote: String,
    /// Local destination that was requested
    pub destination: PathBuf,
    /// Underlying primitive failure
    #[source]
    pub source: CloneFailure,
}

impl CloneError {
    pub fn new(remote: &str, destination: PathBuf, source: CloneFailure) -> Self {
        Self {
            remote: remote.to_string(),
            destination,
            source,
        }
    }

    /// The underlying cause, without remote and destination
    pub fn cause(&self) -> &CloneFailure {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_status_with_stderr() {
        let failure = CloneFailure::ExitStatus {
            program: "gh".to_string(),
            code: Some(1),
            stderr: "repository not found".to_string(),
        };
        assert_eq!(
            failure.to_string(),
            "gh exited with status 1: repository not found"
        );
    }

    #[test]
    fn test_exit_status_by_signal_without_stderr() {
        let failure = CloneFailure::ExitStatus {
            program: "git".to_string(),
            code: None,
            stderr: String::new(),
        };
        assert_eq!(failure.to_string(), "git was terminated by a signal");
    }

    #[test]
    fn test_clone_error_embeds_remote_and_cause() {
        let error = CloneError::new(
            "org/lab-1-team",
            PathBuf::from("/work/lab-1/lab-1-team"),
            CloneFailure::Other("timeout".to_string()),
        );
        assert_eq!(error.cause().to_string(), "timeout");
        assert_eq!(
            error.to_string(),
            "failed to clone org/lab-1-team into /work/lab-1/lab-1-team: timeout"
        );
    }
}
