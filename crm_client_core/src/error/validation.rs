//! Validation related error types

use thiserror::Error;

/// Validation and configuration errors
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Invalid input parameter
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter { parameter: String, reason: String },

    /// Folder name that is not a single usable path component
    #[error("Invalid folder name '{name}': {reason}")]
    InvalidFolderName { name: String, reason: String },
}

impl ValidationError {
    /// Create an invalid parameter error
    pub fn invalid_parameter(parameter: &str, reason: &str) -> Self {
        Self::InvalidParameter {
            parameter: parameter.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create an invalid folder name error
    pub fn invalid_folder_name(name: &str, reason: &str) -> Self {
        Self::InvalidFolderName {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }
}
