//! Builders for HTTP state ports and the health check.
//!
//! Repositories are Diesel-backed when a pool is configured and fixtures
//! otherwise; the remaining adapters (upload store, token codec, hasher and
//! Canva client) are shared by both variants.

use std::io;
use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::warn;

use studio_backend::domain::ports::{
    BackgroundRepository, BrandKitRepository, ConnectivityCheck, FixtureBackgroundRepository,
    FixtureBrandKitRepository, FixtureCanvaTokenProvider, FixtureConnectivityCheck,
    FixtureTemplateRepository, FixtureUserRepository, TemplateRepository, UserRepository,
};
use studio_backend::domain::{
    AccountsService, BackgroundService, BrandKitService, CanvaPassThroughService,
    DesignFileService, TemplateCommandService, TemplateQueryService,
};
use studio_backend::inbound::http::health::HealthState;
use studio_backend::inbound::http::state::{HttpState, HttpStatePorts};
use studio_backend::outbound::canva::{CanvaCredentials, CanvaHttpClient};
use studio_backend::outbound::persistence::{
    DieselBackgroundRepository, DieselBrandKitRepository, DieselConnectivityCheck,
    DieselTemplateRepository, DieselUserRepository,
};
use studio_backend::outbound::security::{BcryptPasswordHasher, JwtTokenCodec};
use studio_backend::outbound::storage::FsAssetStore;

use super::ServerConfig;

/// Adapters every service variant shares.
struct SharedAdapters {
    assets: Arc<FsAssetStore>,
    tokens: Arc<JwtTokenCodec>,
    hasher: Arc<BcryptPasswordHasher>,
    canva: Arc<CanvaHttpClient>,
    clock: Arc<dyn Clock>,
}

impl SharedAdapters {
    fn build(config: &ServerConfig) -> io::Result<Self> {
        let assets = FsAssetStore::open(&config.uploads_dir)
            .map_err(|err| io::Error::other(format!("uploads directory unavailable: {err}")))?;
        let canva = CanvaHttpClient::new(
            config.canva.base_url.clone(),
            CanvaCredentials {
                client_id: config.canva.credentials.client_id.clone(),
                client_secret: config.canva.credentials.client_secret.clone(),
                redirect_uri: config.canva.credentials.redirect_uri.clone(),
            },
            config.canva.timeout,
        )
        .map_err(|err| io::Error::other(format!("canva client construction failed: {err}")))?;
        Ok(Self {
            assets: Arc::new(assets),
            tokens: Arc::new(JwtTokenCodec::new(
                config.token_secret.to_vec(),
                config.token_ttl,
            )),
            hasher: Arc::new(BcryptPasswordHasher::default()),
            canva: Arc::new(canva),
            clock: Arc::new(DefaultClock),
        })
    }
}

/// Wire the services over one set of repositories.
fn assemble_ports<U, T, K, B>(
    users: Arc<U>,
    templates: Arc<T>,
    kits: Arc<K>,
    backgrounds: Arc<B>,
    shared: SharedAdapters,
) -> HttpStatePorts
where
    U: UserRepository + 'static,
    T: TemplateRepository + 'static,
    K: BrandKitRepository + 'static,
    B: BackgroundRepository + 'static,
{
    let SharedAdapters {
        assets,
        tokens,
        hasher,
        canva,
        clock,
    } = shared;
    HttpStatePorts {
        accounts: Arc::new(AccountsService::new(
            Arc::clone(&users),
            hasher,
            tokens,
            Arc::clone(&clock),
        )),
        templates: Arc::new(TemplateQueryService::new(Arc::clone(&templates))),
        templates_command: Arc::new(TemplateCommandService::new(
            Arc::clone(&templates),
            Arc::clone(&assets),
            Arc::clone(&clock),
        )),
        design_files: Arc::new(DesignFileService::new(
            Arc::clone(&templates),
            assets,
            Arc::clone(&clock),
        )),
        backgrounds: Arc::new(BackgroundService::new(
            backgrounds,
            templates,
            users,
            Arc::clone(&clock),
        )),
        brand_kits: Arc::new(BrandKitService::new(kits, clock)),
        canva: Arc::new(CanvaPassThroughService::new(
            canva,
            Arc::new(FixtureCanvaTokenProvider),
        )),
    }
}

/// Build handler state, choosing Diesel repositories when a pool exists.
///
/// # Errors
///
/// Fails when the uploads directory cannot be prepared or the Canva client
/// cannot be built.
pub fn build_http_state(config: &ServerConfig) -> io::Result<HttpState> {
    let shared = SharedAdapters::build(config)?;
    let ports = match &config.db_pool {
        Some(pool) => assemble_ports(
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselTemplateRepository::new(pool.clone())),
            Arc::new(DieselBrandKitRepository::new(pool.clone())),
            Arc::new(DieselBackgroundRepository::new(pool.clone())),
            shared,
        ),
        None => {
            warn!("no database configured; persistence uses fixture adapters");
            assemble_ports(
                Arc::new(FixtureUserRepository),
                Arc::new(FixtureTemplateRepository),
                Arc::new(FixtureBrandKitRepository),
                Arc::new(FixtureBackgroundRepository),
                shared,
            )
        }
    };
    Ok(HttpState::new(ports))
}

/// Build the health state, probing the pool when one is configured.
pub fn build_health_state(config: &ServerConfig) -> HealthState {
    let database: Arc<dyn ConnectivityCheck> = match &config.db_pool {
        Some(pool) => Arc::new(DieselConnectivityCheck::new(pool.clone())),
        None => Arc::new(FixtureConnectivityCheck),
    };
    HealthState::new(config.environment.clone(), database)
}
