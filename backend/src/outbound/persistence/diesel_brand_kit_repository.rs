//! PostgreSQL-backed `BrandKitRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::domain::ports::{BrandKitPersistenceError, BrandKitRepository};
use crate::domain::{BrandKit, ColorSlot, HexColor, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{BrandKitRow, BrandKitUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::brand_kits;

/// Diesel-backed implementation of the `BrandKitRepository` port.
#[derive(Clone)]
pub struct DieselBrandKitRepository {
    pool: DbPool,
}

impl DieselBrandKitRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> BrandKitPersistenceError {
    map_basic_pool_error(error, BrandKitPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> BrandKitPersistenceError {
    map_basic_diesel_error(
        error,
        BrandKitPersistenceError::query,
        BrandKitPersistenceError::connection,
    )
}

fn corrupt(id: Uuid, what: impl std::fmt::Display) -> BrandKitPersistenceError {
    BrandKitPersistenceError::corrupt(format!("brand kit {id}: {what}"))
}

fn decode<T: DeserializeOwned>(
    id: Uuid,
    column: &str,
    value: serde_json::Value,
) -> Result<T, BrandKitPersistenceError> {
    serde_json::from_value(value).map_err(|err| corrupt(id, format!("{column}: {err}")))
}

fn encode<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, BrandKitPersistenceError> {
    serde_json::to_value(value)
        .map_err(|err| BrandKitPersistenceError::query(format!("encode brand kit: {err}")))
}

fn row_to_kit(row: BrandKitRow) -> Result<BrandKit, BrandKitPersistenceError> {
    let id = row.id;
    let colour = |raw: String, slot: ColorSlot| {
        HexColor::new(raw, slot).map_err(|err| corrupt(id, err))
    };
    Ok(BrandKit {
        id,
        user_id: UserId::from_uuid(row.user_id),
        primary_color: colour(row.primary_color, ColorSlot::Primary)?,
        secondary_color: colour(row.secondary_color, ColorSlot::Secondary)?,
        accent_color: colour(row.accent_color, ColorSlot::Accent)?,
        logo: row
            .logo
            .map(|logo| decode(id, "logo", logo))
            .transpose()?,
        fonts: decode(id, "fonts", row.fonts)?,
        custom_elements: decode(id, "custom_elements", row.custom_elements)?,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn kit_to_row(kit: &BrandKit) -> Result<BrandKitRow, BrandKitPersistenceError> {
    Ok(BrandKitRow {
        id: kit.id,
        user_id: *kit.user_id.as_uuid(),
        primary_color: kit.primary_color.to_string(),
        secondary_color: kit.secondary_color.to_string(),
        accent_color: kit.accent_color.to_string(),
        logo: kit.logo.as_ref().map(encode).transpose()?,
        fonts: encode(&kit.fonts)?,
        custom_elements: encode(&kit.custom_elements)?,
        created_at: kit.created_at,
        updated_at: kit.updated_at,
    })
}

#[async_trait]
impl BrandKitRepository for DieselBrandKitRepository {
    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<BrandKit>, BrandKitPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<BrandKitRow> = brand_kits::table
            .filter(brand_kits::user_id.eq(user_id.as_uuid()))
            .select(BrandKitRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_kit).transpose()
    }

    async fn upsert(&self, kit: &BrandKit) -> Result<(), BrandKitPersistenceError> {
        let row = kit_to_row(kit)?;
        let changes = BrandKitUpdate {
            primary_color: &row.primary_color,
            secondary_color: &row.secondary_color,
            accent_color: &row.accent_color,
            logo: row.logo.as_ref(),
            fonts: &row.fonts,
            custom_elements: &row.custom_elements,
            updated_at: row.updated_at,
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(brand_kits::table)
            .values(&row)
            .on_conflict(brand_kits::user_id)
            .do_update()
            .set(&changes)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn delete_by_user(&self, user_id: &UserId) -> Result<bool, BrandKitPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted =
            diesel::delete(brand_kits::table.filter(brand_kits::user_id.eq(user_id.as_uuid())))
                .execute(&mut conn)
                .await
                .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
