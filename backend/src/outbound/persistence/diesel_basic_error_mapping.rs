//! Shared Diesel error mapping for the repositories.
//!
//! Every repository port error carries `Connection` and `Query` variants;
//! these helpers route pool and Diesel failures to them, and let callers
//! intercept unique violations first.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map a pool failure through the repository's connection constructor.
pub(crate) fn map_basic_pool_error<E>(error: PoolError, connection: impl FnOnce(String) -> E) -> E {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Name of the violated unique constraint, when `error` is one.
///
/// Returns `Some("")` for unique violations whose driver did not report a
/// constraint name.
pub(crate) fn unique_violation(error: &DieselError) -> Option<&str> {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            Some(info.constraint_name().unwrap_or_default())
        }
        _ => None,
    }
}

/// Map Diesel failures onto query or connection errors.
///
/// Raw driver messages stay in debug logs; the returned error carries a
/// fixed description.
pub(crate) fn map_basic_diesel_error<E>(
    error: DieselError,
    query: impl FnOnce(&'static str) -> E,
    connection: impl FnOnce(&'static str) -> E,
) -> E {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DeserializationError(_) => query("row decode error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        _ => query("database error"),
    }
}
