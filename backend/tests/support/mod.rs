//! Shared helper utilities for backend integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`; each
//! suite pulls this module in with `mod support;`.

pub mod cluster_skip;
pub mod embedded_postgres;

pub use cluster_skip::handle_cluster_setup_failure;
pub use embedded_postgres::{DatabaseContext, drop_table, provision_database};

/// Render a `postgres` error with enough detail to be useful in CI logs.
///
/// The `postgres::Error` `Display` implementation often collapses database
/// errors to a generic `db error`, so prefer the SQLSTATE and message.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}

/// Fixed instant with whole seconds so timestamps survive the round trip
/// through `TIMESTAMPTZ` unchanged.
pub fn fixed_now() -> chrono::DateTime<chrono::Utc> {
    use chrono::TimeZone as _;
    chrono::Utc
        .with_ymd_and_hms(2025, 1, 9, 8, 30, 0)
        .single()
        .expect("valid fixed instant")
}

/// Account owning `email`, with the username taken from its local part.
pub fn sample_user(email: &str) -> studio_backend::domain::User {
    use studio_backend::domain::{Email, Plan, User, UserId, UserPreferences, UserProfile};

    let email = Email::new(email).expect("valid email");
    User {
        id: UserId::random(),
        username: email.local_part().to_owned(),
        email,
        password_hash: "$2b$04$fixturehashfixturehashfixturehashfixturehashfixtureha".to_owned(),
        plan: Plan::Premium,
        profile: UserProfile::default(),
        preferences: UserPreferences::default(),
        created_at: fixed_now(),
        updated_at: fixed_now(),
    }
}
