//! Linked third-party accounts and their provider profiles.
//!
//! Each provider returns a differently shaped profile. The OAuth callback
//! narrows the raw response into one [`ProviderProfile`] variant before it is
//! stored, so everything downstream (listing, import) works with typed data.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::error::CoreError;
use crate::types::Timestamp;

/// Services a user can link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum ServiceName {
    Github,
    Linkedin,
}

impl ServiceName {
    pub fn as_str(self) -> &'static str {
        match self {
            ServiceName::Github => "github",
            ServiceName::Linkedin => "linkedin",
        }
    }

    /// Human-readable provider name.
    pub fn label(self) -> &'static str {
        match self {
            ServiceName::Github => "GitHub",
            ServiceName::Linkedin => "LinkedIn",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        match raw {
            "github" => Ok(ServiceName::Github),
            "linkedin" => Ok(ServiceName::Linkedin),
            other => Err(CoreError::Validation(format!(
                "Unsupported service '{other}'. Must be one of: github, linkedin"
            ))),
        }
    }
}

impl std::fmt::Display for ServiceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// GitHub
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GithubRepo {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GithubProfile {
    pub id: i64,
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub repos_url: Option<String>,
    #[serde(default)]
    pub repos: Vec<GithubRepo>,
}

// ---------------------------------------------------------------------------
// LinkedIn
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LinkedinExperience {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LinkedinProfile {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub experiences: Vec<LinkedinExperience>,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl LinkedinProfile {
    /// Synthetic profile used when the LinkedIn profile endpoint cannot be
    /// read. Named after the local part of the account email.
    pub fn fallback(account_email: Option<&str>, now: Timestamp) -> Self {
        let name = account_email
            .and_then(|e| e.split('@').next())
            .filter(|local| !local.is_empty())
            .unwrap_or("LinkedIn User")
            .to_string();
        Self {
            id: format!("linkedin_{}", now.timestamp_millis()),
            name: Some(name),
            email: account_email.map(str::to_string),
            experiences: Vec::new(),
            skills: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tagged union
// ---------------------------------------------------------------------------

/// A provider profile, tagged by provider in its stored JSON form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "provider", rename_all = "lowercase")]
#[ts(export)]
pub enum ProviderProfile {
    Github(GithubProfile),
    Linkedin(LinkedinProfile),
}

impl ProviderProfile {
    pub fn service(&self) -> ServiceName {
        match self {
            ProviderProfile::Github(_) => ServiceName::Github,
            ProviderProfile::Linkedin(_) => ServiceName::Linkedin,
        }
    }

    /// The account id on the provider side.
    pub fn service_user_id(&self) -> String {
        match self {
            ProviderProfile::Github(p) => p.id.to_string(),
            ProviderProfile::Linkedin(p) => p.id.clone(),
        }
    }

    /// Decode a stored profile. Rows that do not match any variant yield
    /// `None` rather than an error.
    pub fn from_stored(value: &Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }

    pub fn to_stored(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    #[test]
    fn service_parse_is_exact() {
        assert_eq!(ServiceName::parse("github").unwrap(), ServiceName::Github);
        assert_matches!(ServiceName::parse("GitHub"), Err(CoreError::Validation(_)));
        assert_matches!(ServiceName::parse("twitter"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn github_profile_narrows_from_api_payload() {
        let raw = json!({
            "id": 583231,
            "login": "octocat",
            "name": "The Octocat",
            "avatar_url": "https://avatars.githubusercontent.com/u/583231",
            "repos_url": "https://api.github.com/users/octocat/repos",
            "public_repos": 8,
            "site_admin": false,
        });
        let profile: GithubProfile = serde_json::from_value(raw).unwrap();
        assert_eq!(profile.login, "octocat");
        assert!(profile.repos.is_empty());
        assert_eq!(profile.email, None);
    }

    #[test]
    fn stored_form_is_tagged_by_provider() {
        let profile = ProviderProfile::Linkedin(LinkedinProfile {
            id: "abc".into(),
            name: Some("Ada".into()),
            email: None,
            experiences: vec![],
            skills: vec!["Rust".into()],
        });
        let stored = profile.to_stored();
        assert_eq!(stored["provider"], json!("linkedin"));
        assert_eq!(ProviderProfile::from_stored(&stored), Some(profile));
    }

    #[test]
    fn untagged_stored_value_is_none() {
        assert_eq!(ProviderProfile::from_stored(&json!({ "id": 1 })), None);
    }

    #[test]
    fn service_user_id_per_variant() {
        let gh = ProviderProfile::Github(GithubProfile {
            id: 9,
            login: "x".into(),
            name: None,
            email: None,
            avatar_url: None,
            bio: None,
            html_url: None,
            repos_url: None,
            repos: vec![],
        });
        assert_eq!(gh.service_user_id(), "9");
        assert_eq!(gh.service(), ServiceName::Github);
    }

    #[test]
    fn linkedin_fallback_uses_email_local_part() {
        let now = chrono::Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let p = LinkedinProfile::fallback(Some("ada@example.com"), now);
        assert_eq!(p.name.as_deref(), Some("ada"));
        assert_eq!(p.id, format!("linkedin_{}", now.timestamp_millis()));

        let anon = LinkedinProfile::fallback(None, now);
        assert_eq!(anon.name.as_deref(), Some("LinkedIn User"));
    }
}
