//! Clients for the linked-account providers.
//!
//! The provider access token arrives already exchanged; these clients only
//! read the profile it grants access to and narrow it into a
//! [`ProviderProfile`](folio_core::connection::ProviderProfile) variant.

pub mod github;
pub mod linkedin;

pub use github::GithubClient;
pub use linkedin::LinkedinClient;

use crate::error::AppError;

/// Errors from a provider REST API.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("{provider} API error ({status}): {body}")]
    ApiError {
        provider: &'static str,
        status: u16,
        body: String,
    },
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        AppError::Upstream(err.to_string())
    }
}

/// Return the response unchanged on 2xx, otherwise an
/// [`ProviderError::ApiError`] carrying status and body.
async fn ensure_success(
    provider: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response, ProviderError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::ApiError {
            provider,
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}

/// Providers reject requests without a user agent.
const USER_AGENT: &str = concat!("folio/", env!("CARGO_PKG_VERSION"));
