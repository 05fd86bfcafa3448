use crate::error::ApiError;
use log::debug;
use std::process::Stdio;
use tokio::process::Command;

const TOKEN_VARIABLES: [&str; 2] = ["GH_TOKEN", "GITHUB_TOKEN"];

/// Find a GitHub token: `GH_TOKEN`, then `GITHUB_TOKEN`, then `gh auth token`
pub async fn resolve_token() -> Result<String, ApiError> {
    if let Some(token) = token_from_env() {
        return Ok(token);
    }

    debug!("No token in environment, asking the GitHub CLI");
    let output = Command::new("gh")
        .args(["auth", "token"])
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .await;

    match output {
        Ok(output) if output.status.success() => {
            let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if token.is_empty() {
                Err(ApiError::MissingToken)
            } else {
                Ok(token)
            }
        }
        Ok(_) => Err(ApiError::MissingToken),
        Err(e) => {
            debug!("Could not run gh: {e}");
            Err(ApiError::MissingToken)
        }
    }
}

fn token_from_env() -> Option<String> {
    TOKEN_VARIABLES.iter().find_map(|name| {
        std::env::var(name)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    })
}
