//! Local folder names for accepted submissions
//!
//! Single-author submissions whose author is on the roster are stored under
//! `lastname.firstname`; everything else keeps the repository name.

use crate::error::ValidationError;
use crate::models::{AcceptedSubmission, RosterLookup};

/// Decide the local folder name for a submission
pub fn resolve_folder_name<R>(submission: &AcceptedSubmission, roster: &R) -> String
where
    R: RosterLookup + ?Sized,
{
    submission
        .sole_author()
        .and_then(|login| roster.find_student(login))
        .and_then(|student| canonical_folder_name(&student.name))
        .unwrap_or_else(|| submission.repository.name.clone())
}

/// `lastname.firstname` for a full name, `None` if it has fewer than two tokens
///
/// Tokens are lower-cased and stripped of anything but alphanumerics, `-` and
/// `_`; multiple first-name tokens are joined with `-`.
pub fn canonical_folder_name(full_name: &str) -> Option<String> {
    let tokens: Vec<String> = full_name
        .split_whitespace()
        .map(clean_token)
        .filter(|t| !t.is_empty())
        .collect();

    let (last, first) = tokens.split_last()?;
    if first.is_empty() {
        return None;
    }

    Some(format!("{last}.{}", first.join("-")))
}

fn clean_token(token: &str) -> String {
    token
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Check that a folder name is a single, usable path component
pub fn validate_folder_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::invalid_folder_name(name, "must not be empty"));
    }
    if name == "." || name == ".." {
        return Err(ValidationError::invalid_folder_name(
            name,
            "must not refer to the current or parent directory",
        ));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(ValidationError::invalid_folder_name(
            name,
            "must not contain path separators",
        ));
    }
    Ok(())
}
