//! Binding store error types

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Which `.crm` binding a store operation was working on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Assignment,
    Classroom,
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Assignment => f.write_str("assignment"),
            Binding::Classroom => f.write_str("classroom"),
        }
    }
}

/// Errors raised while reading or writing binding files
#[derive(Error, Debug)]
pub enum StoreError {
    /// The binding marker does not exist at the given directory
    #[error("No {binding} found in {}", .path.display())]
    NotFound { binding: Binding, path: PathBuf },

    /// Marker exists but could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Marker or its directory could not be written
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Marker content is not valid JSON for the binding
    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Binding could not be serialized
    #[error("Failed to serialize {binding}: {source}")]
    Serialize {
        binding: Binding,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    /// Create a not found error
    pub fn not_found(binding: Binding, path: &Path) -> Self {
        Self::NotFound {
            binding,
            path: path.to_path_buf(),
        }
    }

    /// True for the distinguished "binding absent" condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_not_found_display() {
        let error = StoreError::not_found(Binding::Classroom, Path::new("/work"));
        assert!(error.is_not_found());
        assert_eq!(error.to_string(), "No classroom found in /work");
    }

    #[test]
    fn test_read_error_is_not_not_found() {
        let error = StoreError::Read {
            path: PathBuf::from("/work/.crm/assignment.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(!error.is_not_found());
        assert!(error.to_string().contains("assignment.json"));
    }
}
