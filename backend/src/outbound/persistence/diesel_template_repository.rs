//! PostgreSQL-backed `TemplateRepository` implementation using Diesel ORM.
//!
//! Canvas objects are stored as a single `jsonb` array so unknown object
//! fields survive a round trip.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{TemplatePersistenceError, TemplateRepository};
use crate::domain::{
    CanvasObject, Dimensions, Template, TemplateCategory, TemplateFilter, TemplateId, TemplateKey,
    TemplateType, UserId,
};

use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, unique_violation,
};
use super::models::{TemplateRow, TemplateUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::templates;

/// Diesel-backed implementation of the `TemplateRepository` port.
#[derive(Clone)]
pub struct DieselTemplateRepository {
    pool: DbPool,
}

impl DieselTemplateRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TemplatePersistenceError {
    map_basic_pool_error(error, TemplatePersistenceError::connection)
}

fn map_write_error(
    error: diesel::result::Error,
    key: Option<&TemplateKey>,
) -> TemplatePersistenceError {
    if unique_violation(&error).is_some() {
        let key = key.map(ToString::to_string).unwrap_or_default();
        return TemplatePersistenceError::duplicate_key(key);
    }
    map_diesel_error(error)
}

fn map_diesel_error(error: diesel::result::Error) -> TemplatePersistenceError {
    map_basic_diesel_error(
        error,
        TemplatePersistenceError::query,
        TemplatePersistenceError::connection,
    )
}

fn corrupt(id: uuid::Uuid, what: impl std::fmt::Display) -> TemplatePersistenceError {
    TemplatePersistenceError::corrupt(format!("template {id}: {what}"))
}

fn dimension(id: uuid::Uuid, value: i32) -> Result<u32, TemplatePersistenceError> {
    u32::try_from(value).map_err(|_| corrupt(id, format!("negative dimension {value}")))
}

fn dimension_for_db(value: u32) -> Result<i32, TemplatePersistenceError> {
    i32::try_from(value)
        .map_err(|_| TemplatePersistenceError::query(format!("dimension {value} out of range")))
}

fn row_to_template(row: TemplateRow) -> Result<Template, TemplatePersistenceError> {
    let id = row.id;
    let template_type = row
        .template_type
        .parse::<TemplateType>()
        .map_err(|err| corrupt(id, err))?;
    let category = row
        .category
        .parse::<TemplateCategory>()
        .map_err(|err| corrupt(id, err))?;
    let template_key = row
        .template_key
        .map(TemplateKey::new)
        .transpose()
        .map_err(|err| corrupt(id, err))?;
    let objects: Vec<CanvasObject> =
        serde_json::from_value(row.objects).map_err(|err| corrupt(id, err))?;
    Ok(Template {
        id: TemplateId::from_uuid(id),
        template_key,
        name: row.name,
        description: row.description,
        template_type,
        category,
        thumbnail: row.thumbnail,
        thumbnail_filename: row.thumbnail_filename,
        design_filename: row.design_filename,
        file_url: row.file_url,
        dimensions: Dimensions::new(dimension(id, row.width)?, dimension(id, row.height)?),
        canvas_size: row.canvas_size,
        background_color: row.background_color,
        background_image: row.background_image,
        objects,
        is_real_estate: row.is_real_estate,
        created_by: row.created_by.map(UserId::from_uuid),
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn objects_json(template: &Template) -> Result<serde_json::Value, TemplatePersistenceError> {
    serde_json::to_value(&template.objects)
        .map_err(|err| TemplatePersistenceError::query(format!("encode objects: {err}")))
}

fn template_to_row(template: &Template) -> Result<TemplateRow, TemplatePersistenceError> {
    Ok(TemplateRow {
        id: *template.id.as_uuid(),
        template_key: template.template_key.as_ref().map(ToString::to_string),
        name: template.name.clone(),
        description: template.description.clone(),
        template_type: template.template_type.as_str().to_owned(),
        category: template.category.as_str().to_owned(),
        thumbnail: template.thumbnail.clone(),
        thumbnail_filename: template.thumbnail_filename.clone(),
        design_filename: template.design_filename.clone(),
        file_url: template.file_url.clone(),
        width: dimension_for_db(template.dimensions.width)?,
        height: dimension_for_db(template.dimensions.height)?,
        canvas_size: template.canvas_size.clone(),
        background_color: template.background_color.clone(),
        background_image: template.background_image.clone(),
        objects: objects_json(template)?,
        is_real_estate: template.is_real_estate,
        created_by: template.created_by.map(|user| *user.as_uuid()),
        created_at: template.created_at,
        updated_at: template.updated_at,
    })
}

fn collect(rows: Vec<TemplateRow>) -> Result<Vec<Template>, TemplatePersistenceError> {
    rows.into_iter().map(row_to_template).collect()
}

#[async_trait]
impl TemplateRepository for DieselTemplateRepository {
    async fn list(
        &self,
        filter: &TemplateFilter,
    ) -> Result<Vec<Template>, TemplatePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = templates::table
            .select(TemplateRow::as_select())
            .order_by(templates::created_at.desc())
            .into_boxed();
        if let Some(kind) = filter.template_type {
            query = query.filter(templates::template_type.eq(kind.as_str()));
        }
        if let Some(category) = filter.category {
            query = query.filter(templates::category.eq(category.as_str()));
        }
        if filter.real_estate_only {
            query = query.filter(templates::is_real_estate.eq(true));
        }
        let rows = query.load(&mut conn).await.map_err(map_diesel_error)?;
        collect(rows)
    }

    async fn find_by_id(
        &self,
        id: &TemplateId,
    ) -> Result<Option<Template>, TemplatePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<TemplateRow> = templates::table
            .filter(templates::id.eq(id.as_uuid()))
            .select(TemplateRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_template).transpose()
    }

    async fn find_by_key(
        &self,
        key: &TemplateKey,
    ) -> Result<Option<Template>, TemplatePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<TemplateRow> = templates::table
            .filter(templates::template_key.eq(key.as_ref()))
            .select(TemplateRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_template).transpose()
    }

    async fn insert(&self, template: &Template) -> Result<(), TemplatePersistenceError> {
        let row = template_to_row(template)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(templates::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_write_error(err, template.template_key.as_ref()))
    }

    async fn update(&self, template: &Template) -> Result<bool, TemplatePersistenceError> {
        let objects = objects_json(template)?;
        let changes = TemplateUpdate {
            template_key: template.template_key.as_ref().map(AsRef::as_ref),
            name: &template.name,
            description: template.description.as_deref(),
            template_type: template.template_type.as_str(),
            category: template.category.as_str(),
            thumbnail: &template.thumbnail,
            thumbnail_filename: template.thumbnail_filename.as_deref(),
            design_filename: template.design_filename.as_deref(),
            file_url: template.file_url.as_deref(),
            width: dimension_for_db(template.dimensions.width)?,
            height: dimension_for_db(template.dimensions.height)?,
            canvas_size: &template.canvas_size,
            background_color: &template.background_color,
            background_image: template.background_image.as_deref(),
            objects: &objects,
            is_real_estate: template.is_real_estate,
            updated_at: template.updated_at,
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let target = templates::table.filter(templates::id.eq(template.id.as_uuid()));
        let updated = diesel::update(target)
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(|err| map_write_error(err, template.template_key.as_ref()))?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: &TemplateId) -> Result<bool, TemplatePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(templates::table.filter(templates::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn referenced_design_files(&self) -> Result<Vec<String>, TemplatePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let names: Vec<Option<String>> = templates::table
            .filter(templates::design_filename.is_not_null())
            .filter(templates::design_filename.ne(""))
            .select(templates::design_filename)
            .distinct()
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(names.into_iter().flatten().collect())
    }
}
