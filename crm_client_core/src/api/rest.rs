use super::{ApiConfig, ClassroomApi, MAX_PAGE_SIZE, resolve_token};
use crate::error::ApiError;
use crate::models::{AcceptedSubmission, RemoteAssignment, RemoteClassroom};
use async_trait::async_trait;
use log::debug;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use std::time::Duration;

const API_VERSION: &str = "2022-11-28";

/// [`ClassroomApi`] over HTTPS
pub struct RestClassroomApi {
    client: reqwest::Client,
    base_url: String,
    page_size: u32,
}

impl RestClassroomApi {
    /// Create a client with an explicit token
    pub fn new(config: &ApiConfig, token: &str) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static(API_VERSION),
        );
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| ApiError::InvalidToken)?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .user_agent(concat!("crm/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|source| ApiError::ClientBuild { source })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            page_size: config.page_size,
        })
    }

    /// Create a client with a token from the environment or the GitHub CLI
    pub async fn from_environment(config: &ApiConfig) -> Result<Self, ApiError> {
        let token = resolve_token().await?;
        Self::new(config, &token)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        debug!("GET {url}");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::status(status.as_u16(), url, &error_message(&body)));
        }

        response.json::<T>().await.map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }

    /// Fetch pages until one comes back shorter than `per_page`
    async fn get_all_pages<T: DeserializeOwned>(
        &self,
        path: &str,
        per_page: u32,
    ) -> Result<Vec<T>, ApiError> {
        let per_page = per_page.clamp(1, MAX_PAGE_SIZE);
        let mut items = Vec::new();
        let mut page = 1u32;

        loop {
            let url = format!("{}?page={page}&per_page={per_page}", self.url(path));
            let batch: Vec<T> = self.get_json(&url).await?;
            let len = batch.len();
            items.extend(batch);

            if len < per_page as usize {
                break;
            }
            page += 1;
        }

        debug!("{path}: {} item(s) over {page} page(s)", items.len());
        Ok(items)
    }
}

/// Pull `message` out of a GitHub error body, falling back to the raw text
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

#[async_trait]
impl ClassroomApi for RestClassroomApi {
    async fn list_classrooms(&self) -> Result<Vec<RemoteClassroom>, ApiError> {
        self.get_all_pages("/classrooms", self.page_size).await
    }

    async fn get_classroom(&self, classroom_id: i64) -> Result<RemoteClassroom, ApiError> {
        self.get_json(&self.url(&format!("/classrooms/{classroom_id}")))
            .await
    }

    async fn list_assignments(
        &self,
        classroom_id: i64,
    ) -> Result<Vec<RemoteAssignment>, ApiError> {
        self.get_all_pages(
            &format!("/classrooms/{classroom_id}/assignments"),
            self.page_size,
        )
        .await
    }

    async fn get_assignment(&self, assignment_id: i64) -> Result<RemoteAssignment, ApiError> {
        self.get_json(&self.url(&format!("/assignments/{assignment_id}")))
            .await
    }

    async fn list_accepted_assignments(
        &self,
        assignment_id: i64,
        per_page: u32,
    ) -> Result<Vec<AcceptedSubmission>, ApiError> {
        self.get_all_pages(
            &format!("/assignments/{assignment_id}/accepted_assignments"),
            per_page,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_from_json_body() {
        assert_eq!(
            error_message(r#"{"message": "Not Found", "documentation_url": "x"}"#),
            "Not Found"
        );
        assert_eq!(error_message("  bad gateway \n"), "bad gateway");
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let config = ApiConfig {
            base_url: "http://localhost:8080/".to_string(),
            ..Default::default()
        };
        let api = RestClassroomApi::new(&config, "token").unwrap();
        assert_eq!(api.url("/classrooms"), "http://localhost:8080/classrooms");
    }

    #[test]
    fn test_token_with_newline_is_rejected() {
        let result = RestClassroomApi::new(&ApiConfig::default(), "bad\ntoken");
        assert!(matches!(result, Err(ApiError::InvalidToken)));
    }
}
