//! LinkedIn profile read.

use chrono::Utc;
use folio_core::connection::LinkedinProfile;
use serde::Deserialize;

use super::{ensure_success, ProviderError, USER_AGENT};

/// The subset of `GET /v2/me` used for the profile.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MeResponse {
    id: String,
    #[serde(default)]
    localized_first_name: Option<String>,
    #[serde(default)]
    localized_last_name: Option<String>,
}

impl MeResponse {
    fn into_profile(self, account_email: Option<&str>) -> LinkedinProfile {
        let name = [self.localized_first_name, self.localized_last_name]
            .into_iter()
            .flatten()
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        LinkedinProfile {
            id: self.id,
            name: (!name.is_empty()).then_some(name),
            email: account_email.map(str::to_string),
            experiences: Vec::new(),
            skills: Vec::new(),
        }
    }
}

pub struct LinkedinClient {
    client: reqwest::Client,
    api_url: String,
}

impl LinkedinClient {
    pub fn new(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
        }
    }

    /// `GET /v2/me`.
    pub async fn fetch_me(
        &self,
        access_token: &str,
        account_email: Option<&str>,
    ) -> Result<LinkedinProfile, ProviderError> {
        let response = self
            .client
            .get(format!("{}/v2/me", self.api_url))
            .bearer_auth(access_token)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await?;
        let me: MeResponse = ensure_success("LinkedIn", response).await?.json().await?;
        Ok(me.into_profile(account_email))
    }

    /// Like [`fetch_me`](Self::fetch_me), but any failure yields a synthetic
    /// profile built from the account email.
    pub async fn fetch_profile_or_fallback(
        &self,
        access_token: &str,
        account_email: Option<&str>,
    ) -> LinkedinProfile {
        match self.fetch_me(access_token, account_email).await {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!(error = %e, "LinkedIn profile fetch failed, using fallback profile");
                LinkedinProfile::fallback(account_email, Utc::now())
            }
        }
    }
}
