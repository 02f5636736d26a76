//! Service configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address to listen on (default: "0.0.0.0:8000").
    pub listen_addr: String,

    /// `SQLite` database URL (default: "sqlite://launchpad.db").
    pub database_url: String,

    /// Directory uploaded assets are written under, one subdirectory per game.
    pub uploads_dir: PathBuf,

    /// Directory generated documentation is written under.
    pub docs_dir: PathBuf,

    /// CORS allowed origins.
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    pub request_timeout_seconds: u64,

    /// Upper bound for a single world, payment or assistant call, in seconds.
    pub provider_timeout_seconds: u64,

    /// Platform wallet receiving STRK publishing fees.
    pub platform_strk_address: String,

    /// Platform wallet receiving BTC publishing fees.
    pub platform_btc_address: String,

    /// Base64-encoded 32-byte message cipher key. `None` means an ephemeral key.
    pub encryption_key: Option<String>,
}

/// Launchpad secrets file structure.
#[derive(Debug, Deserialize)]
struct LaunchpadSecrets {
    encryption_key: String,
}

impl ServiceConfig {
    /// Load configuration from environment variables and secrets files.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            listen_addr: std::env::var("LISTEN_ADDR").unwrap_or(defaults.listen_addr),
            database_url: std::env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            uploads_dir: std::env::var("UPLOADS_DIR").map_or(defaults.uploads_dir, PathBuf::from),
            docs_dir: std::env::var("DOCS_DIR").map_or(defaults.docs_dir, PathBuf::from),
            cors_origins: std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "*".into())
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            max_body_bytes: env_parse("MAX_BODY_BYTES").unwrap_or(defaults.max_body_bytes),
            request_timeout_seconds: env_parse("REQUEST_TIMEOUT_SECONDS")
                .unwrap_or(defaults.request_timeout_seconds),
            provider_timeout_seconds: env_parse("PROVIDER_TIMEOUT_SECONDS")
                .unwrap_or(defaults.provider_timeout_seconds),
            platform_strk_address: std::env::var("PLATFORM_STRK_ADDRESS")
                .unwrap_or(defaults.platform_strk_address),
            platform_btc_address: std::env::var("PLATFORM_BTC_ADDRESS")
                .unwrap_or(defaults.platform_btc_address),
            encryption_key: load_encryption_key(),
        }
    }

    /// Provider call timeout as a [`Duration`].
    #[must_use]
    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_seconds)
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|s| s.parse().ok())
}

/// Load the message cipher key from a secrets file or the environment.
fn load_encryption_key() -> Option<String> {
    let secret_paths = [
        ".secrets/launchpad.json",
        "launchpad/.secrets/launchpad.json",
        "../.secrets/launchpad.json",
    ];

    for path in &secret_paths {
        if let Ok(secrets) = load_secrets_file::<LaunchpadSecrets>(path) {
            tracing::info!(path = %path, "Loaded encryption key from secrets file");
            return Some(secrets.encryption_key);
        }
    }

    tracing::debug!("Secrets file not found, using environment variables");
    std::env::var("ENCRYPTION_KEY").ok()
}

/// Load secrets from a JSON file.
fn load_secrets_file<T: serde::de::DeserializeOwned>(path: &str) -> Result<T, std::io::Error> {
    let path = Path::new(path);
    if !path.exists() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Secrets file not found",
        ));
    }
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8000".into(),
            database_url: "sqlite://launchpad.db".into(),
            uploads_dir: PathBuf::from("uploads"),
            docs_dir: PathBuf::from("docs"),
            cors_origins: vec!["*".into()],
            max_body_bytes: 16 * 1024 * 1024, // 16MB, room for asset uploads
            request_timeout_seconds: 30,
            provider_timeout_seconds: 10,
            platform_strk_address: "0x_platform_address".into(),
            platform_btc_address: "platform_btc_address".into(),
            encryption_key: None,
        }
    }
}
