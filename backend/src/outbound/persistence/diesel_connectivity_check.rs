//! Database connectivity check backing the health endpoint.

use async_trait::async_trait;
use diesel::sql_types::Integer;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::ConnectivityCheck;

use super::pool::DbPool;

/// Check that runs `SELECT 1` on a pooled connection.
#[derive(Clone)]
pub struct DieselConnectivityCheck {
    pool: DbPool,
}

impl DieselConnectivityCheck {
    /// Create a check over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConnectivityCheck for DieselConnectivityCheck {
    async fn is_connected(&self) -> bool {
        let mut conn = match self.pool.get().await {
            Ok(conn) => conn,
            Err(error) => {
                warn!(%error, "database check could not check out a connection");
                return false;
            }
        };
        match diesel::select(diesel::dsl::sql::<Integer>("1"))
            .get_result::<i32>(&mut conn)
            .await
        {
            Ok(_) => true,
            Err(error) => {
                warn!(%error, "database check query failed");
                false
            }
        }
    }
}
