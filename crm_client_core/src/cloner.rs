//! Single-repository clone primitives and the clone executor
//!
//! A [`RepositoryCloner`] performs one network clone. The [`CloneExecutor`]
//! wraps a cloner and turns whatever it reports into a typed [`CloneError`]
//! carrying the remote name and destination, so callers can record the
//! failure and move on.

use crate::error::{CloneError, CloneFailure};
use async_trait::async_trait;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

/// Default base URL used by [`GitCloner`]
pub const DEFAULT_GIT_BASE_URL: &str = "https://github.com";

/// Default folder name for the starter code clone
pub const DEFAULT_STARTER_FOLDER: &str = ".main";

/// Clones one remote repository into a local path
#[async_trait]
pub trait RepositoryCloner: Send + Sync {
    /// Clone `full_name` (`owner/repo`) into `destination`
    async fn clone_repository(&self, full_name: &str, destination: &Path)
    -> Result<(), CloneFailure>;
}

/// Which program performs the clone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CloneProgram {
    /// `gh repo clone`, reusing the GitHub CLI's credentials
    #[default]
    Gh,
    /// Plain `git clone` over `git_base_url`
    Git,
}

/// Clone settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloneConfig {
    pub program: CloneProgram,
    pub starter_folder: String,
    pub git_base_url: String,
}

impl Default for CloneConfig {
    fn default() -> Self {
        Self {
            program: CloneProgram::Gh,
            starter_folder: DEFAULT_STARTER_FOLDER.to_string(),
            git_base_url: DEFAULT_GIT_BASE_URL.to_string(),
        }
    }
}

/// Build the cloner selected by the configuration
pub fn cloner_for(config: &CloneConfig) -> Box<dyn RepositoryCloner> {
    match config.program {
        CloneProgram::Gh => Box::new(GhCloner::new()),
        CloneProgram::Git => Box::new(GitCloner::new(&config.git_base_url)),
    }
}

/// Clones through `gh repo clone`
#[derive(Debug, Clone)]
pub struct GhCloner {
    program: String,
}

impl Default for GhCloner {
    fn default() -> Self {
        Self::new()
    }
}

impl GhCloner {
    pub fn new() -> Self {
        Self::with_program("gh")
    }

    /// Use a different executable in place of `gh`
    pub fn with_program(program: &str) -> Self {
        Self {
            program: program.to_string(),
        }
    }
}

#[async_trait]
impl RepositoryCloner for GhCloner {
    async fn clone_repository(
        &self,
        full_name: &str,
        destination: &Path,
    ) -> Result<(), CloneFailure> {
        let args: Vec<OsString> = vec![
            "repo".into(),
            "clone".into(),
            full_name.into(),
            destination.as_os_str().to_owned(),
        ];
        run_clone(&self.program, args).await
    }
}

/// Clones through `git clone <base_url>/<owner>/<repo>.git`
#[derive(Debug, Clone)]
pub struct GitCloner {
    base_url: String,
}

impl GitCloner {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Remote URL for a repository full name
    pub fn remote_url(&self, full_name: &str) -> String {
        format!("{}/{full_name}.git", self.base_url)
    }
}

#[async_trait]
impl RepositoryCloner for GitCloner {
    async fn clone_repository(
        &self,
        full_name: &str,
        destination: &Path,
    ) -> Result<(), CloneFailure> {
        let args: Vec<OsString> = vec![
            "clone".into(),
            "--quiet".into(),
            self.remote_url(full_name).into(),
            destination.as_os_str().to_owned(),
        ];
        run_clone("git", args).await
    }
}

async fn run_clone(program: &str, args: Vec<OsString>) -> Result<(), CloneFailure> {
    debug!("Running {program} {args:?}");

    let output = Command::new(program)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|source| CloneFailure::Spawn {
            program: program.to_string(),
            source,
        })?;

    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let last_line = stderr
        .lines()
        .map(str::trim)
        .rfind(|line| !line.is_empty())
        .unwrap_or_default()
        .to_string();

    Err(CloneFailure::ExitStatus {
        program: program.to_string(),
        code: output.status.code(),
        stderr: last_line,
    })
}

/// Runs one clone as an isolated, fallible unit of work
///
/// The destination's parent must already exist. Nothing is retried and a
/// partially populated destination is left as is.
pub struct CloneExecutor<'a> {
    cloner: &'a dyn RepositoryCloner,
}

impl<'a> CloneExecutor<'a> {
    pub fn new(cloner: &'a dyn RepositoryCloner) -> Self {
        Self { cloner }
    }

    /// Clone `remote_full_name` into `destination`
    pub async fn clone(&self, destination: &Path, remote_full_name: &str) -> Result<(), CloneError> {
        debug!(
            "Cloning {remote_full_name} into {}",
            destination.display()
        );

        match self
            .cloner
            .clone_repository(remote_full_name, destination)
            .await
        {
            Ok(()) => {
                info!("Cloned {remote_full_name} into {}", destination.display());
                Ok(())
            }
            Err(failure) => {
                warn!("Failed to clone {remote_full_name}: {failure}");
                Err(CloneError::new(
                    remote_full_name,
                    destination.to_path_buf(),
                    failure,
                ))
            }
        }
    }
}
