//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Each repository implements one domain port over a shared [`DbPool`].
//! Row structs and table definitions stay private to this module; the
//! adapters only translate between rows and domain types.
//!
//! ```ignore
//! use studio_backend::outbound::persistence::{DbPool, DieselTemplateRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/studio")).await?;
//! let templates = DieselTemplateRepository::new(pool);
//! ```

mod diesel_background_repository;
mod diesel_basic_error_mapping;
mod diesel_brand_kit_repository;
mod diesel_connectivity_check;
mod diesel_template_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_background_repository::DieselBackgroundRepository;
pub use diesel_brand_kit_repository::DieselBrandKitRepository;
pub use diesel_connectivity_check::DieselConnectivityCheck;
pub use diesel_template_repository::DieselTemplateRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DEFAULT_MAX_CONNECTIONS, DbPool, PoolConfig, PoolError};
