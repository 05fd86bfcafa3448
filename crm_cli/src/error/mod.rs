use colored::*;
use crm_client_core::error::{ApiError, IoError, IoErrorKind, StoreError, ValidationError};
use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Command-level failures raised by the CLI itself
#[derive(Error, Debug)]
pub enum CommandError {
    /// Neither a classroom nor an assignment binding is visible
    #[error(
        "No classroom or assignment found in {} or its parent folders",
        .path.display()
    )]
    NotInitialized { path: PathBuf },

    /// A classroom binding is required but missing
    #[error("No classroom found in {} or its parent folders", .path.display())]
    NoClassroom { path: PathBuf },

    /// `init` was run below an existing classroom folder
    #[error(
        "{} is inside the classroom bound at {}",
        .cwd.display(),
        .classroom.display()
    )]
    NestedClassroom { cwd: PathBuf, classroom: PathBuf },

    #[error("No {what} available to choose from")]
    NothingToSelect { what: &'static str },

    /// A choice is needed but there is no terminal to ask on
    #[error("Cannot choose a {what} without an interactive terminal")]
    NotInteractive {
        what: &'static str,
        flag: &'static str,
    },

    #[error("No {what} selected")]
    SelectionCancelled { what: &'static str },

    #[error("No student with GitHub login '{login}' in the roster")]
    StudentNotFound { login: String },

    #[error("Classroom {id} has no organization")]
    MissingOrganization { id: i64 },
}

/// CLI-specific error type with semantic exit codes
#[derive(Debug)]
pub struct CliError {
    /// The main error message
    message: String,

    /// Error category for exit code determination
    category: ErrorCategory,

    /// Additional context information
    context: Vec<(String, String)>,

    /// Suggestions for recovery
    pub suggestions: Vec<String>,

    /// Source error if any
    source: Option<Box<dyn StdError + Send + Sync>>,
}

/// Error categories that map to exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorCategory {
    General,
    Misuse,
    Network,
    Filesystem,
    NotInitialized,
}

/// Semantic exit codes for failed runs; success exits with 0
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    GeneralError = 1,
    Misuse = 2,
    NetworkError = 3,
    FilesystemError = 4,
    NotInitialized = 5,
}

/// Extension trait for adding context to errors
pub trait ErrorContext {
    fn with_context(self, key: &str, value: &str) -> Self;
    fn with_suggestion(self, suggestion: &str) -> Self;
    fn with_source(self, source: Box<dyn StdError + Send + Sync>) -> Self;
}

impl CliError {
    fn new(message: &str, category: ErrorCategory) -> Self {
        Self {
            message: message.to_string(),
            category,
            context: Vec::new(),
            suggestions: Vec::new(),
            source: None,
        }
    }

    /// Create a general error
    pub fn general(message: &str) -> Self {
        Self::new(message, ErrorCategory::General)
    }

    /// Create a command misuse error
    pub fn misuse(message: &str) -> Self {
        Self::new(message, ErrorCategory::Misuse)
            .with_suggestion("Run 'crm --help' for usage information")
    }

    /// Create a network error
    pub fn network(message: &str) -> Self {
        Self::new(message, ErrorCategory::Network)
            .with_suggestion("Check your internet connection")
            .with_suggestion("Verify GitHub status at https://www.githubstatus.com")
    }

    /// Create a filesystem error
    pub fn filesystem(message: &str) -> Self {
        let mut error = Self::new(message, ErrorCategory::Filesystem);

        if message.contains("not found") {
            error
                .suggestions
                .push("Check if the file or directory exists".to_string());
        } else if message.contains("permission") || message.contains("denied") {
            error.suggestions.push("Check file permissions".to_string());
        }

        error
    }

    /// Create an error for commands run outside a bound folder
    pub fn not_initialized(message: &str) -> Self {
        Self::new(message, ErrorCategory::NotInitialized)
            .with_suggestion("Run 'crm init' in the classroom folder first")
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self.category {
            ErrorCategory::General => ExitCode::GeneralError,
            ErrorCategory::Misuse => ExitCode::Misuse,
            ErrorCategory::Network => ExitCode::NetworkError,
            ErrorCategory::Filesystem => ExitCode::FilesystemError,
            ErrorCategory::NotInitialized => ExitCode::NotInitialized,
        }
    }

    fn label(&self) -> &'static str {
        match self.category {
            ErrorCategory::General => "Error",
            ErrorCategory::Misuse => "Usage Error",
            ErrorCategory::Network => "Network Error",
            ErrorCategory::Filesystem => "File Error",
            ErrorCategory::NotInitialized => "Not Initialized",
        }
    }

    /// Format the error for user display
    pub fn format_for_user(&self, debug: bool) -> String {
        let mut output = String::new();

        let prefix = match self.category {
            ErrorCategory::Misuse | ErrorCategory::NotInitialized => self.label().yellow(),
            _ => self.label().red(),
        };
        output.push_str(&format!("{}: {}\n", prefix, self.message));

        if !self.context.is_empty() {
            output.push_str("\nContext:\n");
            for (key, value) in &self.context {
                output.push_str(&format!("  {}: {}\n", key.bold(), value));
            }
        }

        // Error chain in debug mode
        if debug && let Some(source) = &self.source {
            output.push_str("\nCaused by:\n");
            let mut current: Option<&dyn StdError> = Some(source.as_ref());
            let mut level = 1;

            while let Some(err) = current {
                output.push_str(&format!("  {level}: {err}\n"));
                current = err.source();
                level += 1;
            }
        }

        if !self.suggestions.is_empty() {
            output.push_str("\nSuggestions:\n");
            for suggestion in &self.suggestions {
                output.push_str(&format!("  • {suggestion}\n"));
            }
        }

        output
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label(), self.message)?;

        for (key, value) in &self.context {
            write!(f, " ({key}: {value})")?;
        }

        Ok(())
    }
}

impl StdError for CliError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl ErrorContext for CliError {
    fn with_context(mut self, key: &str, value: &str) -> Self {
        self.context.push((key.to_string(), value.to_string()));
        self
    }

    fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.suggestions.push(suggestion.to_string());
        self
    }

    fn with_source(mut self, source: Box<dyn StdError + Send + Sync>) -> Self {
        self.source = Some(source);
        self
    }
}

fn from_command_error(error: &CommandError, message: &str) -> CliError {
    match error {
        CommandError::NotInitialized { .. } | CommandError::NoClassroom { .. } => {
            CliError::not_initialized(message)
        }
        CommandError::NestedClassroom { classroom, .. } => CliError::misuse(message)
            .with_suggestion(&format!("Run 'crm init' in {} instead", classroom.display())),
        CommandError::NotInteractive { flag, .. } => {
            CliError::misuse(message).with_suggestion(&format!("Pass {flag} to skip the prompt"))
        }
        CommandError::SelectionCancelled { .. } => CliError::misuse(message),
        CommandError::StudentNotFound { .. } => {
            CliError::general(message).with_suggestion("Run 'crm student list' to see the roster")
        }
        CommandError::NothingToSelect { .. } | CommandError::MissingOrganization { .. } => {
            CliError::general(message)
        }
    }
}

fn from_api_error(error: &ApiError, message: &str) -> CliError {
    match error {
        ApiError::MissingToken | ApiError::InvalidToken => CliError::general(message)
            .with_suggestion("Set GH_TOKEN or run 'gh auth login'"),
        ApiError::Status { status, .. } if *status == 401 || *status == 403 => {
            CliError::general(message)
                .with_suggestion("Check that your token can read the classroom organization")
        }
        error if error.is_network() => CliError::network(message),
        _ => CliError::general(message),
    }
}

fn from_store_error(error: &StoreError, message: &str) -> CliError {
    match error {
        StoreError::NotFound { .. } => CliError::not_initialized(message),
        StoreError::Read { .. } | StoreError::Write { .. } => CliError::filesystem(message),
        StoreError::Parse { path, .. } => {
            CliError::general(message).with_context("file", &path.display().to_string())
        }
        StoreError::Serialize { .. } => CliError::general(message),
    }
}

fn from_core_io_error(error: &IoError, message: &str) -> CliError {
    match error.kind {
        IoErrorKind::NotFound | IoErrorKind::PermissionDenied => CliError::filesystem(message),
        IoErrorKind::Other => CliError::general(message),
    }
}

fn from_core_error(error: &crm_client_core::Error, message: &str) -> CliError {
    use crm_client_core::Error;

    match error {
        Error::Io(e) => from_core_io_error(e, message),
        Error::Api(e) => from_api_error(e, message),
        Error::Store(e) => from_store_error(e, message),
        Error::Validation(_) => CliError::misuse(message),
        Error::Clone(_) => CliError::general(message),
    }
}

/// Classify an error by the first recognizable cause in its chain
impl From<anyhow::Error> for CliError {
    fn from(error: anyhow::Error) -> Self {
        let message = format!("{error:#}");

        let mut classified = None;
        for cause in error.chain() {
            classified = if let Some(e) = cause.downcast_ref::<CommandError>() {
                Some(from_command_error(e, &message))
            } else if let Some(e) = cause.downcast_ref::<ApiError>() {
                Some(from_api_error(e, &message))
            } else if let Some(e) = cause.downcast_ref::<StoreError>() {
                Some(from_store_error(e, &message))
            } else if let Some(e) = cause.downcast_ref::<crm_client_core::Error>() {
                Some(from_core_error(e, &message))
            } else if cause.downcast_ref::<ValidationError>().is_some() {
                Some(CliError::misuse(&message))
            } else if let Some(e) = cause.downcast_ref::<IoError>() {
                Some(from_core_io_error(e, &message))
            } else if let Some(e) = cause.downcast_ref::<io::Error>() {
                Some(match e.kind() {
                    io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
                        CliError::filesystem(&message)
                    }
                    _ => CliError::general(&message),
                })
            } else {
                None
            };
            if classified.is_some() {
                break;
            }
        }

        classified
            .unwrap_or_else(|| CliError::general(&message))
            .with_source(error.into())
    }
}
