use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development except
/// the secrets (`JWT_SECRET`, `CATALOG_API_KEY`), which must be set.
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
    /// Graceful shutdown timeout in seconds (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// External catalog provider settings.
    pub catalog: CatalogSettings,
    /// JWT token configuration (secret, expiry duration).
    pub jwt: JwtConfig,
}

/// Connection settings for the external catalog provider.
#[derive(Debug, Clone)]
pub struct CatalogSettings {
    /// Base URL of the provider API, no trailing slash.
    pub base_url: String,
    /// API key sent with every request.
    pub api_key: String,
    /// Origin-country filter for the popular-discover query.
    pub origin_country: String,
    /// Minimum vote average for the popular-discover query.
    pub min_vote_average: f64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                        |
    /// |----------------------------|--------------------------------|
    /// | `HOST`                     | `0.0.0.0`                      |
    /// | `PORT`                     | `3000`                         |
    /// | `CORS_ORIGINS`             | `http://localhost:5173`        |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                           |
    /// | `SHUTDOWN_TIMEOUT_SECS`    | `30`                           |
    /// | `CATALOG_BASE_URL`         | `https://api.themoviedb.org/3` |
    /// | `CATALOG_API_KEY`          | **required**                   |
    /// | `CATALOG_ORIGIN_COUNTRY`   | `KR`                           |
    /// | `CATALOG_MIN_VOTE_AVERAGE` | `7.0`                          |
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

        let catalog = CatalogSettings::from_env();
        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            catalog,
            jwt,
        }
    }
}

impl CatalogSettings {
    /// Load catalog provider settings from environment variables.
    ///
    /// # Panics
    ///
    /// Panics if `CATALOG_API_KEY` is not set or is empty.
    pub fn from_env() -> Self {
        let base_url = std::env::var("CATALOG_BASE_URL")
            .unwrap_or_else(|_| "https://api.themoviedb.org/3".into());

        let api_key =
            std::env::var("CATALOG_API_KEY").expect("CATALOG_API_KEY must be set in the environment");
        assert!(!api_key.is_empty(), "CATALOG_API_KEY must not be empty");

        let origin_country = std::env::var("CATALOG_ORIGIN_COUNTRY")
            .unwrap_or_else(|_| dorama_catalog::client::DEFAULT_ORIGIN_COUNTRY.into());

        let min_vote_average: f64 = std::env::var("CATALOG_MIN_VOTE_AVERAGE")
            .unwrap_or_else(|_| dorama_catalog::client::DEFAULT_MIN_VOTE_AVERAGE.to_string())
            .parse()
            .expect("CATALOG_MIN_VOTE_AVERAGE must be a valid f64");

        Self {
            base_url,
            api_key,
            origin_country,
            min_vote_average,
        }
    }

    /// Build a [`dorama_catalog::CatalogClient`] from these settings.
    pub fn build_client(&self) -> dorama_catalog::CatalogClient {
        dorama_catalog::CatalogClient::new(self.base_url.clone(), self.api_key.clone())
            .with_origin_country(self.origin_country.clone())
            .with_min_vote_average(self.min_vote_average)
    }
}
