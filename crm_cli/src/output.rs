//! User-facing text for command results

use colored::*;
use crm_client_core::{BatchResult, Student};

pub const FAILURE_HEADER: &str = "Some repositories failed to clone.";
pub const VERBOSE_HINT: &str = "Run with --verbose flag to see more details";

/// Summary printed after a clone batch
///
/// Failures are listed one per line only in verbose mode; the final count
/// line is always present.
pub fn summary_lines(result: &BatchResult, verbose: bool) -> Vec<String> {
    let mut lines = Vec::new();

    if result.has_failures() {
        lines.push(FAILURE_HEADER.to_string());
        if verbose {
            lines.extend(result.failures.iter().cloned());
        } else {
            lines.push(VERBOSE_HINT.to_string());
        }
    }

    lines.push(format!("Cloned {} repos.", result.total_cloned));
    lines
}

/// Print the batch summary on stdout
pub fn print_summary(result: &BatchResult, verbose: bool) {
    for line in summary_lines(result, verbose) {
        if line == FAILURE_HEADER {
            println!("{}", line.yellow());
        } else if line.starts_with("Error cloning") {
            println!("{}", line.red());
        } else {
            println!("{line}");
        }
    }
}

/// Roster rows as `login  name  email`, aligned on the login column
pub fn roster_lines(students: &[Student]) -> Vec<String> {
    let width = students
        .iter()
        .map(|s| s.github_login.len())
        .max()
        .unwrap_or(0);

    students
        .iter()
        .map(|s| {
            format!(
                "{:width$}  {}  <{}>",
                s.github_login,
                s.name,
                s.email,
                width = width
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with_failures(failures: &[&str], cloned: usize) -> BatchResult {
        BatchResult {
            total_cloned: cloned,
            failures: failures.iter().map(|f| f.to_string()).collect(),
            outcomes: Vec::new(),
        }
    }

    #[test]
    fn test_clean_summary() {
        let lines = summary_lines(&result_with_failures(&[], 3), false);
        assert_eq!(lines, vec!["Cloned 3 repos."]);
    }

    #[test]
    fn test_failures_hidden_without_verbose() {
        let lines = summary_lines(
            &result_with_failures(&["Error cloning org/a: boom"], 2),
            false,
        );
        assert_eq!(
            lines,
            vec![FAILURE_HEADER, VERBOSE_HINT, "Cloned 2 repos."]
        );
    }

    #[test]
    fn test_failures_listed_with_verbose() {
        let lines = summary_lines(
            &result_with_failures(&["Error cloning org/a: boom", "Error cloning org/b: nope"], 0),
            true,
        );
        assert_eq!(
            lines,
            vec![
                FAILURE_HEADER,
                "Error cloning org/a: boom",
                "Error cloning org/b: nope",
                "Cloned 0 repos."
            ]
        );
    }

    #[test]
    fn test_roster_alignment() {
        let students = vec![
            Student::new("Ada Lovelace", "ada@example.edu", "ada"),
            Student::new("Grace Hopper", "grace@example.edu", "ghopper"),
        ];

        let lines = roster_lines(&students);

        assert_eq!(lines[0], "ada      Ada Lovelace  <ada@example.edu>");
        assert_eq!(lines[1], "ghopper  Grace Hopper  <grace@example.edu>");
    }
}
