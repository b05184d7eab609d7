//! Backend entry-point: loads settings, prepares persistence and serves the
//! REST API.

mod server;

use std::ffi::OsString;
use std::io;

use actix_web::web;
use ortho_config::OrthoConfig;
use rand::RngCore;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use zeroize::Zeroizing;

use studio_backend::outbound::canva::CanvaCredentials;
use studio_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use studio_backend::settings::AppSettings;

use server::{CanvaConfig, ServerConfig, build_health_state, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args: Vec<OsString> = std::env::args_os().collect();
    let settings = AppSettings::load_from_iter(args)
        .map_err(|e| io::Error::other(format!("failed to load settings: {e}")))?;

    let config = server_config(&settings)?;
    let config = match settings.database_url() {
        Some(url) => config.with_db_pool(prepare_database(url, &settings).await?),
        None => {
            warn!("STUDIO_DATABASE_URL not set; running without persistence");
            config
        }
    };

    let health_state = web::Data::new(build_health_state(&config));
    info!(addr = %config.bind_addr(), environment = settings.environment(), "starting server");
    create_server(health_state, config)?.await
}

fn server_config(settings: &AppSettings) -> io::Result<ServerConfig> {
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;
    let canva_base = settings.canva_api_base_url().map_err(io::Error::other)?;
    let canva = CanvaConfig::new(
        canva_base,
        CanvaCredentials {
            client_id: settings.canva_client_id().to_owned(),
            client_secret: Zeroizing::new(settings.canva_client_secret().to_owned()),
            redirect_uri: settings.canva_redirect_uri().to_owned(),
        },
        settings.canva_timeout(),
    );
    Ok(ServerConfig::new(
        bind_addr,
        token_secret(settings)?,
        settings.token_ttl(),
        canva,
    )
    .with_uploads_dir(settings.uploads_dir())
    .with_json_limit(settings.json_limit_bytes())
    .with_environment(settings.environment()))
}

/// Configured token secret; debug builds fall back to a random one.
fn token_secret(settings: &AppSettings) -> io::Result<Vec<u8>> {
    if let Some(secret) = settings.jwt_secret() {
        return Ok(secret.as_bytes().to_vec());
    }
    if cfg!(debug_assertions) {
        warn!("STUDIO_JWT_SECRET not set; using temporary token secret (dev only)");
        let mut secret = vec![0_u8; 64];
        rand::thread_rng().fill_bytes(&mut secret);
        Ok(secret)
    } else {
        Err(io::Error::other("STUDIO_JWT_SECRET must be set"))
    }
}

async fn prepare_database(url: &str, settings: &AppSettings) -> io::Result<DbPool> {
    let migration_url = url.to_owned();
    let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&migration_url))
        .await
        .map_err(|e| io::Error::other(format!("migration task failed: {e}")))?
        .map_err(io::Error::other)?;
    info!(applied, "database schema up to date");

    DbPool::new(PoolConfig::new(url).with_max_size(settings.db_max_connections()))
        .await
        .map_err(io::Error::other)
}
