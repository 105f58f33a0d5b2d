use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use reqwest::header::ACCEPT;

use super::types::{GitHubRepo, Release};

/// Versioned JSON media type the release API is asked for.
const ACCEPT_JSON: &str = "application/vnd.github.v3+json";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GetLatestRelease: Send + Sync {
    /// Fetch the latest published release of the repository.
    ///
    /// Returns `Ok(None)` when the API answers with a non-success status;
    /// only transport-level failures are errors.
    async fn latest_release(&self, repo: &GitHubRepo) -> Result<Option<Release>>;
}

pub struct GitHub {
    pub client: Client,
    pub api_url: String,
}

impl GitHub {
    pub fn new(client: Client, api_url: Option<String>) -> Self {
        let api_url = api_url.unwrap_or_else(|| "https://api.github.com".to_string());
        Self { client, api_url }
    }
}

#[async_trait]
impl GetLatestRelease for GitHub {
    #[tracing::instrument(skip(self, repo))]
    async fn latest_release(&self, repo: &GitHubRepo) -> Result<Option<Release>> {
        GitHub::fetch_latest_release(repo, &self.client, &self.api_url).await
    }
}

impl GitHub {
    #[tracing::instrument(skip(client, api_url))]
    pub async fn fetch_latest_release(
        repo: &GitHubRepo,
        client: &Client,
        api_url: &str,
    ) -> Result<Option<Release>> {
        let url = format!(
            "{}/repos/{}/{}/releases/latest",
            api_url, repo.owner, repo.repo
        );

        debug!("Fetching latest release from {}...", url);

        let response = client
            .get(&url)
            .header(ACCEPT, ACCEPT_JSON)
            .send()
            .await
            .context("Failed to send request to GitHub API")?;

        if !response.status().is_success() {
            debug!(
                "Latest release query for {} answered {}",
                repo,
                response.status()
            );
            return Ok(None);
        }

        let release = response
            .json::<Release>()
            .await
            .context("Failed to parse JSON response from GitHub API")?;

        Ok(Some(release))
    }
}
