//! Embedded PostgreSQL provisioning for the Diesel integration suites.
//!
//! One cluster is shared per test binary. A template database is migrated
//! once per migration set through the same code path the server uses at
//! startup; every test clones it into its own temporary database.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use pg_embedded_setup_unpriv::test_support::hash_directory;
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use postgres::{Client, NoTls};
use studio_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use tokio::runtime::Runtime;
use uuid::Uuid;

use super::format_postgres_error;

static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const TEMPLATE_NAME_PREFIX: &str = "studio_template";
const SHARED_CLUSTER_RETRIES: usize = 5;
const SHARED_CLUSTER_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Keeps the password stable when a data directory is reused between runs.
fn ensure_stable_password() {
    if std::env::var_os("PG_PASSWORD").is_none() {
        // SAFETY: called before the cluster bootstrap spawns any threads.
        unsafe {
            std::env::set_var("PG_PASSWORD", "studio_embedded_test");
        }
    }
}

fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    ensure_stable_password();
    let mut attempt = 1;
    loop {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(error) if attempt < SHARED_CLUSTER_RETRIES => {
                eprintln!("pg-embed: attempt {attempt} failed, retrying: {error:?}");
                std::thread::sleep(SHARED_CLUSTER_RETRY_DELAY);
                attempt += 1;
            }
            Err(error) => return Err(format!("{error:?}")),
        }
    }
}

/// A migrated temporary database plus a runtime and pool for driving it.
pub struct DatabaseContext {
    pub runtime: Runtime,
    pub pool: DbPool,
    pub database_url: String,
    _database: TemporaryDatabase,
}

fn template_database_name() -> Result<String, String> {
    let migrations = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations");
    let hash = hash_directory(migrations).map_err(|err| format!("hash migrations: {err}"))?;
    let short_hash = hash.get(..8).unwrap_or(&hash);
    Ok(format!("{TEMPLATE_NAME_PREFIX}_{short_hash}"))
}

/// Create the migrated template once per migration set.
fn ensure_template_database(cluster: &ClusterHandle) -> Result<String, String> {
    let template_name = template_database_name()?;
    let _lock = TEMPLATE_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let exists = cluster
        .database_exists(template_name.as_str())
        .map_err(|err| format!("template check: {err:?}"))?;
    if !exists {
        cluster
            .create_database(template_name.as_str())
            .map_err(|err| format!("create template: {err:?}"))?;
        let url = cluster.connection().database_url(&template_name);
        run_pending_migrations(&url).map_err(|err| format!("migrate template: {err}"))?;
    }
    Ok(template_name)
}

/// Provision a fresh migrated database on the shared cluster.
pub fn provision_database() -> Result<DatabaseContext, String> {
    let cluster = shared_cluster()?;
    let template_name = ensure_template_database(cluster)?;
    let db_name = format!("test_{}", Uuid::new_v4().simple());
    let database = cluster
        .temporary_database_from_template(db_name.as_str(), template_name.as_str())
        .map_err(|err| format!("create database from template: {err:?}"))?;
    let database_url = database.url().to_string();

    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let pool = runtime
        .block_on(DbPool::new(PoolConfig::new(database_url.as_str()).with_max_size(2)))
        .map_err(|err| err.to_string())?;
    Ok(DatabaseContext {
        runtime,
        pool,
        database_url,
        _database: database,
    })
}

/// Drop `table` to simulate schema loss.
pub fn drop_table(url: &str, table: &str) -> Result<(), String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    let escaped = table.replace('"', "\"\"");
    client
        .batch_execute(&format!(r#"DROP TABLE IF EXISTS "{escaped}" CASCADE"#))
        .map_err(|err| format_postgres_error(&err))
}
