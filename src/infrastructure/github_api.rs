use crate::config::GitHubSettings;
use crate::domain::{RawActivityEvent, RepositorySummary};
use anyhow::{Context, Result};
use octocrab::Octocrab;
use octocrab::service::middleware::retry::RetryConfig;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// How a single GitHub request failed
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("GitHub responded with HTTP {0}")]
    Status(u16),
    #[error("GitHub request failed: {0}")]
    Transport(#[source] octocrab::Error),
    #[error("unexpected GitHub payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Forbidden, too-many-requests, server errors and anything that never got
    /// a response all mean we should back off.
    pub fn is_throttling(&self) -> bool {
        match self {
            ApiError::Status(status) => matches!(status, 403 | 429) || *status >= 500,
            ApiError::Transport(_) => true,
            ApiError::Decode(_) => false,
        }
    }
}

/// Unauthenticated client for the public user endpoints
pub struct GitHubClient {
    client: Octocrab,
    username: String,
}

impl GitHubClient {
    pub fn new(settings: &GitHubSettings) -> Result<Self> {
        let client = Octocrab::builder()
            .add_retry_config(RetryConfig::None)
            .base_uri(settings.api_base.as_str())
            .with_context(|| format!("Invalid GitHub API base URL: {}", settings.api_base))?
            .build()
            .context("Failed to create GitHub client")?;

        Ok(Self {
            client,
            username: settings.username.clone(),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Up to 100 public repositories, most recently updated first
    pub async fn fetch_repositories(&self) -> Result<Vec<RepositorySummary>, ApiError> {
        self.get_json(format!(
            "/users/{}/repos?type=public&sort=updated&per_page=100",
            self.username
        ))
        .await
    }

    /// Up to 100 most recent public events
    pub async fn fetch_public_events(&self) -> Result<Vec<RawActivityEvent>, ApiError> {
        self.get_json(format!("/users/{}/events/public?per_page=100", self.username))
            .await
    }

    async fn get_json<T: DeserializeOwned>(&self, route: String) -> Result<T, ApiError> {
        tracing::debug!(%route, "GET");
        let response = self
            .client
            ._get(route)
            .await
            .map_err(ApiError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        let body = self
            .client
            .body_to_string(response)
            .await
            .map_err(ApiError::Transport)?;
        Ok(serde_json::from_str(&body)?)
    }
}
