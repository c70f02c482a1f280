//! GitHub profile and repository reads.

use folio_core::connection::{GithubProfile, GithubRepo};

use super::{ensure_success, ProviderError, USER_AGENT};

/// Number of most recently updated repositories kept on the profile.
const REPO_PAGE_SIZE: &str = "10";

pub struct GithubClient {
    client: reqwest::Client,
    api_url: String,
}

impl GithubClient {
    /// `api_url` is the REST base, e.g. `https://api.github.com`.
    pub fn new(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
        }
    }

    /// `GET /user`, then the user's repositories.
    ///
    /// A failed repository listing leaves `repos` empty rather than failing
    /// the whole link.
    pub async fn fetch_profile(&self, access_token: &str) -> Result<GithubProfile, ProviderError> {
        let response = self
            .client
            .get(format!("{}/user", self.api_url))
            .bearer_auth(access_token)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .await?;
        let mut profile: GithubProfile = ensure_success("GitHub", response).await?.json().await?;

        if let Some(repos_url) = profile.repos_url.clone() {
            match self.fetch_repos(&repos_url, access_token).await {
                Ok(repos) => profile.repos = repos,
                Err(e) => {
                    tracing::warn!(error = %e, login = %profile.login, "GitHub repository listing failed");
                }
            }
        }

        Ok(profile)
    }

    async fn fetch_repos(
        &self,
        repos_url: &str,
        access_token: &str,
    ) -> Result<Vec<GithubRepo>, ProviderError> {
        let response = self
            .client
            .get(repos_url)
            .query(&[("sort", "updated"), ("per_page", REPO_PAGE_SIZE)])
            .bearer_auth(access_token)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .await?;
        Ok(ensure_success("GitHub", response).await?.json().await?)
    }
}
