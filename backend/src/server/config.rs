//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use studio_backend::outbound::canva::CanvaCredentials;
use studio_backend::outbound::persistence::DbPool;
use url::Url;
use zeroize::Zeroizing;

/// Canva Connect endpoint and application credentials.
pub struct CanvaConfig {
    pub(crate) base_url: Url,
    pub(crate) credentials: CanvaCredentials,
    pub(crate) timeout: Duration,
}

impl CanvaConfig {
    #[must_use]
    pub fn new(base_url: Url, credentials: CanvaCredentials, timeout: Duration) -> Self {
        Self {
            base_url,
            credentials,
            timeout,
        }
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) uploads_dir: PathBuf,
    pub(crate) json_limit: usize,
    pub(crate) environment: String,
    pub(crate) token_secret: Zeroizing<Vec<u8>>,
    pub(crate) token_ttl: chrono::Duration,
    pub(crate) canva: CanvaConfig,
}

impl ServerConfig {
    /// Construct a server configuration; optional parts are attached with the
    /// `with_*` methods.
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        token_secret: Vec<u8>,
        token_ttl: chrono::Duration,
        canva: CanvaConfig,
    ) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            uploads_dir: PathBuf::from("uploads"),
            json_limit: 50 * 1024 * 1024,
            environment: "development".to_owned(),
            token_secret: Zeroizing::new(token_secret),
            token_ttl,
            canva,
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// Without one the repositories fall back to fixtures.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    #[must_use]
    pub fn with_uploads_dir(mut self, dir: PathBuf) -> Self {
        self.uploads_dir = dir;
        self
    }

    /// Cap accepted JSON bodies at `bytes`.
    #[must_use]
    pub fn with_json_limit(mut self, bytes: usize) -> Self {
        self.json_limit = bytes;
        self
    }

    #[must_use]
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
