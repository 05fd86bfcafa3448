//! Error types for the classroom repository manager core library
//!
//! This module contains all error types used throughout the library, organized
//! into logical categories for better maintainability and clarity.

use thiserror::Error;

pub mod api;
pub mod clone;
pub mod io;
pub mod store;
pub mod validation;

pub use self::api::ApiError;
pub use self::clone::{CloneError, CloneFailure};
pub use self::io::{IoError, IoErrorKind};
pub use self::store::{Binding, StoreError};
pub use self::validation::ValidationError;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the core library
///
/// Errors are categorized into five main types:
/// - I/O errors: filesystem operations outside the binding stores
/// - API errors: classroom REST API failures
/// - Store errors: reading or writing `.crm` binding files
/// - Clone errors: a single repository clone that failed
/// - Validation errors: invalid input or configuration
#[derive(Error, Debug)]
pub enum Error {
    /// I/O related errors
    #[error(transparent)]
    Io(#[from] IoError),

    /// Classroom API errors
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Binding store errors
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Repository clone errors
    #[error(transparent)]
    Clone(#[from] CloneError),

    /// Validation related errors
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl Error {
    /// True when the error is a missing assignment or classroom binding
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Store(store) if store.is_not_found())
    }
}

// Conversions from external error types

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Io(IoError::from_std(source))
    }
}
