use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long background tasks get to drain after shutdown (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Origin of the public SPA, used to build share links.
    pub public_base_url: String,
    /// GitHub REST API base URL.
    pub github_api_url: String,
    /// LinkedIn REST API base URL.
    pub linkedin_api_url: String,
    /// Secret the provider-token encryption key is derived from.
    pub token_encryption_key: String,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                    |
    /// |-------------------------|----------------------------|
    /// | `HOST`                  | `0.0.0.0`                  |
    /// | `PORT`                  | `3000`                     |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                       |
    /// | `PUBLIC_BASE_URL`       | `http://localhost:5173`    |
    /// | `GITHUB_API_URL`        | `https://api.github.com`   |
    /// | `LINKEDIN_API_URL`      | `https://api.linkedin.com` |
    /// | `TOKEN_ENCRYPTION_KEY`  | value of `JWT_SECRET`      |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let public_base_url = trim_base(
            std::env::var("PUBLIC_BASE_URL").unwrap_or_else(|_| "http://localhost:5173".into()),
        );
        let github_api_url = trim_base(
            std::env::var("GITHUB_API_URL").unwrap_or_else(|_| "https://api.github.com".into()),
        );
        let linkedin_api_url = trim_base(
            std::env::var("LINKEDIN_API_URL").unwrap_or_else(|_| "https://api.linkedin.com".into()),
        );

        let jwt = JwtConfig::from_env();

        let token_encryption_key =
            std::env::var("TOKEN_ENCRYPTION_KEY").unwrap_or_else(|_| jwt.secret.clone());
        assert!(
            !token_encryption_key.is_empty(),
            "TOKEN_ENCRYPTION_KEY must not be empty"
        );

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            public_base_url,
            github_api_url,
            linkedin_api_url,
            token_encryption_key,
            jwt,
        }
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
