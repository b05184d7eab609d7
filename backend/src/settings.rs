//! Service configuration loaded via OrthoConfig.
//!
//! Every value can come from `STUDIO_*` environment variables, the command
//! line or a configuration file. Unset values fall back to the defaults
//! exposed by the accessors below.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_UPLOADS_DIR: &str = "uploads";
const DEFAULT_ENVIRONMENT: &str = "development";
const DEFAULT_CANVA_API_BASE_URL: &str = "https://api.canva.com";
const DEFAULT_CANVA_REDIRECT_URI: &str = "http://localhost:3000/canva/callback";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// `host` is not an IP address.
    #[error("invalid host address `{value}`")]
    InvalidHost { value: String },
    /// `canva_api_base_url` does not parse.
    #[error("invalid canva api base url `{value}`: {message}")]
    InvalidCanvaBaseUrl { value: String, message: String },
}

/// Runtime settings for the studio backend.
///
/// Numeric settings carry their defaults in the derive; text settings stay
/// optional and are defaulted by the accessors.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STUDIO")]
pub struct AppSettings {
    /// Interface to bind; must be an IP address.
    pub host: Option<String>,
    /// Port to bind.
    #[ortho_config(default = 4000)]
    pub port: u16,
    /// PostgreSQL connection string; without it the service runs on fixtures.
    pub database_url: Option<String>,
    /// HMAC secret for session tokens.
    pub jwt_secret: Option<String>,
    /// Session token lifetime in days.
    #[ortho_config(default = 7)]
    pub token_ttl_days: i64,
    /// Root of the upload areas.
    pub uploads_dir: Option<PathBuf>,
    /// Deployment label reported by the health summary.
    pub environment: Option<String>,
    /// Largest accepted JSON body.
    #[ortho_config(default = 52_428_800)]
    pub json_limit_bytes: usize,
    /// Canva Connect API root.
    pub canva_api_base_url: Option<String>,
    /// OAuth client id registered with Canva.
    pub canva_client_id: Option<String>,
    /// OAuth client secret registered with Canva.
    pub canva_client_secret: Option<String>,
    /// Redirect URI sent with the Canva authorisation request.
    pub canva_redirect_uri: Option<String>,
    /// Per-request timeout for Canva calls.
    #[ortho_config(default = 10)]
    pub canva_timeout_secs: u64,
    /// Pool size for the database.
    #[ortho_config(default = 10)]
    pub db_max_connections: u32,
}

impl AppSettings {
    /// Socket address built from `host` and `port`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidHost`] when `host` is not an IP
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let ip = match self.host.as_deref() {
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            Some(raw) => raw.parse().map_err(|_| SettingsError::InvalidHost {
                value: raw.to_owned(),
            })?,
        };
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref().filter(|url| !url.trim().is_empty())
    }

    /// Configured token secret, ignoring blank values.
    pub fn jwt_secret(&self) -> Option<&str> {
        self.jwt_secret
            .as_deref()
            .filter(|secret| !secret.trim().is_empty())
    }

    /// Token lifetime; never shorter than one day.
    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::days(self.token_ttl_days.max(1))
    }

    /// Uploads root, `uploads` unless configured.
    pub fn uploads_dir(&self) -> PathBuf {
        self.uploads_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOADS_DIR))
    }

    /// Deployment label, `development` unless configured.
    pub fn environment(&self) -> &str {
        self.environment.as_deref().unwrap_or(DEFAULT_ENVIRONMENT)
    }

    /// Largest accepted JSON body in bytes.
    pub fn json_limit_bytes(&self) -> usize {
        self.json_limit_bytes
    }

    /// Base URL of the Canva Connect API.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidCanvaBaseUrl`] when the configured
    /// value does not parse.
    pub fn canva_api_base_url(&self) -> Result<Url, SettingsError> {
        let raw = self
            .canva_api_base_url
            .as_deref()
            .unwrap_or(DEFAULT_CANVA_API_BASE_URL);
        Url::parse(raw).map_err(|err| SettingsError::InvalidCanvaBaseUrl {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    /// Canva client id; empty when unset.
    pub fn canva_client_id(&self) -> &str {
        self.canva_client_id.as_deref().unwrap_or_default()
    }

    /// Canva client secret; empty when unset.
    pub fn canva_client_secret(&self) -> &str {
        self.canva_client_secret.as_deref().unwrap_or_default()
    }

    /// Redirect URI for the Canva authorisation flow.
    pub fn canva_redirect_uri(&self) -> &str {
        self.canva_redirect_uri
            .as_deref()
            .unwrap_or(DEFAULT_CANVA_REDIRECT_URI)
    }

    /// Per-request timeout for Canva calls.
    pub fn canva_timeout(&self) -> Duration {
        Duration::from_secs(self.canva_timeout_secs)
    }

    /// Upper bound on pooled database connections.
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
    }
}
