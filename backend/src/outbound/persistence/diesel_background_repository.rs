//! PostgreSQL-backed `BackgroundRepository` implementation using Diesel ORM.
//!
//! Expired rows are swept whenever a new background is stored; reads filter
//! them out so a missed sweep never serves a lapsed image.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{BackgroundPersistenceError, BackgroundRepository};
use crate::domain::{BackgroundId, TemplateBackground, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::TemplateBackgroundRow;
use super::pool::{DbPool, PoolError};
use super::schema::template_backgrounds as backgrounds;

/// Diesel-backed implementation of the `BackgroundRepository` port.
#[derive(Clone)]
pub struct DieselBackgroundRepository {
    pool: DbPool,
}

impl DieselBackgroundRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> BackgroundPersistenceError {
    map_basic_pool_error(error, BackgroundPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> BackgroundPersistenceError {
    map_basic_diesel_error(
        error,
        BackgroundPersistenceError::query,
        BackgroundPersistenceError::connection,
    )
}

fn row_to_background(row: TemplateBackgroundRow) -> TemplateBackground {
    TemplateBackground {
        id: BackgroundId::from_uuid(row.id),
        template_ref: row.template_ref,
        user_id: UserId::from_uuid(row.user_id),
        image_data: row.image_data,
        image_type: row.image_type,
        file_name: row.file_name,
        created_at: row.created_at,
        expires_at: row.expires_at,
    }
}

fn background_to_row(background: &TemplateBackground) -> TemplateBackgroundRow {
    TemplateBackgroundRow {
        id: *background.id.as_uuid(),
        template_ref: background.template_ref.clone(),
        user_id: *background.user_id.as_uuid(),
        image_data: background.image_data.clone(),
        image_type: background.image_type.clone(),
        file_name: background.file_name.clone(),
        created_at: background.created_at,
        expires_at: background.expires_at,
    }
}

#[async_trait]
impl BackgroundRepository for DieselBackgroundRepository {
    async fn replace(
        &self,
        background: &TemplateBackground,
        now: DateTime<Utc>,
    ) -> Result<(), BackgroundPersistenceError> {
        let row = background_to_row(background);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                let lapsed = backgrounds::table.filter(backgrounds::expires_at.le(now));
                let expired = diesel::delete(lapsed).execute(conn).await?;
                if expired > 0 {
                    debug!(expired, "swept expired backgrounds");
                }
                diesel::delete(
                    backgrounds::table
                        .filter(backgrounds::template_ref.eq(&row.template_ref))
                        .filter(backgrounds::user_id.eq(row.user_id)),
                )
                .execute(conn)
                .await?;
                diesel::insert_into(backgrounds::table)
                    .values(&row)
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn latest(
        &self,
        template_ref: &str,
        user_id: &UserId,
        now: DateTime<Utc>,
    ) -> Result<Option<TemplateBackground>, BackgroundPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<TemplateBackgroundRow> = backgrounds::table
            .filter(backgrounds::template_ref.eq(template_ref))
            .filter(backgrounds::user_id.eq(user_id.as_uuid()))
            .filter(backgrounds::expires_at.gt(now))
            .order_by(backgrounds::created_at.desc())
            .select(TemplateBackgroundRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(row_to_background))
    }

    async fn delete_for(
        &self,
        template_ref: &str,
        user_id: &UserId,
    ) -> Result<u64, BackgroundPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(
            backgrounds::table
                .filter(backgrounds::template_ref.eq(template_ref))
                .filter(backgrounds::user_id.eq(user_id.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(deleted as u64)
    }

    async fn delete_by_id(&self, id: &BackgroundId) -> Result<bool, BackgroundPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(backgrounds::table.filter(backgrounds::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
