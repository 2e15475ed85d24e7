use reporter_core::storage::{clamp_ttl, DEFAULT_SIGNED_URL_TTL_SECS};

/// Server configuration loaded from environment variables.
///
/// All fields except `DATABASE_URL` and `S3_BUCKET` have defaults suitable
/// for local development.
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
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Object storage used for signed upload/download URLs.
    pub storage: StorageConfig,
}

/// S3-compatible object storage settings.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub bucket: String,
    pub region: String,
    /// Custom endpoint for S3-compatible services (MinIO, R2). Enables
    /// path-style addressing when set.
    pub endpoint: Option<String>,
    /// Lifetime of issued URLs in seconds, clamped to the S3 maximum.
    pub signed_url_ttl_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `DATABASE_URL`         | required                   |
    ///
    /// Panics on missing or malformed values so misconfiguration fails at
    /// startup.
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

        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url,
            storage: StorageConfig::from_env(),
        }
    }
}

impl StorageConfig {
    /// | Env Var               | Default     |
    /// |-----------------------|-------------|
    /// | `S3_BUCKET`           | required    |
    /// | `S3_REGION`           | `us-east-1` |
    /// | `S3_ENDPOINT`         | unset       |
    /// | `SIGNED_URL_TTL_SECS` | `900`       |
    pub fn from_env() -> Self {
        let bucket = std::env::var("S3_BUCKET").expect("S3_BUCKET must be set");
        let region = std::env::var("S3_REGION").unwrap_or_else(|_| "us-east-1".into());
        let endpoint = std::env::var("S3_ENDPOINT")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let signed_url_ttl_secs: u64 = std::env::var("SIGNED_URL_TTL_SECS")
            .map(|v| v.parse().expect("SIGNED_URL_TTL_SECS must be a valid u64"))
            .unwrap_or(DEFAULT_SIGNED_URL_TTL_SECS);

        Self {
            bucket,
            region,
            endpoint,
            signed_url_ttl_secs: clamp_ttl(signed_url_ttl_secs),
        }
    }
}
