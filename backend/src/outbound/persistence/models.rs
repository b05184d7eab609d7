//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. JSON columns are carried as
//! `serde_json::Value` and decoded by the repositories.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{brand_kits, template_backgrounds, templates, users};

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Row struct for reading from and writing to the users table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub plan: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub company: String,
    pub position: String,
    pub location: String,
    pub bio: String,
    pub preferences: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset for overwriting an account; identity and creation time stay.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserUpdate<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub plan: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub phone: &'a str,
    pub company: &'a str,
    pub position: &'a str,
    pub location: &'a str,
    pub bio: &'a str,
    pub preferences: &'a serde_json::Value,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

/// Row struct for the templates table.
///
/// `AsChangeset` treats `None` as "leave unchanged", so updates go through
/// [`TemplateUpdate`] instead.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = templates)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TemplateRow {
    pub id: Uuid,
    pub template_key: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub template_type: String,
    pub category: String,
    pub thumbnail: String,
    pub thumbnail_filename: Option<String>,
    pub design_filename: Option<String>,
    pub file_url: Option<String>,
    pub width: i32,
    pub height: i32,
    pub canvas_size: String,
    pub background_color: String,
    pub background_image: Option<String>,
    pub objects: serde_json::Value,
    pub is_real_estate: bool,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full overwrite of a template's mutable columns, nulls included.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = templates)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct TemplateUpdate<'a> {
    pub template_key: Option<&'a str>,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub template_type: &'a str,
    pub category: &'a str,
    pub thumbnail: &'a str,
    pub thumbnail_filename: Option<&'a str>,
    pub design_filename: Option<&'a str>,
    pub file_url: Option<&'a str>,
    pub width: i32,
    pub height: i32,
    pub canvas_size: &'a str,
    pub background_color: &'a str,
    pub background_image: Option<&'a str>,
    pub objects: &'a serde_json::Value,
    pub is_real_estate: bool,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Brand kits
// ---------------------------------------------------------------------------

/// Row struct for the brand_kits table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = brand_kits)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BrandKitRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub logo: Option<serde_json::Value>,
    pub fonts: serde_json::Value,
    pub custom_elements: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Columns replaced when an upsert hits an existing kit.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = brand_kits)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct BrandKitUpdate<'a> {
    pub primary_color: &'a str,
    pub secondary_color: &'a str,
    pub accent_color: &'a str,
    pub logo: Option<&'a serde_json::Value>,
    pub fonts: &'a serde_json::Value,
    pub custom_elements: &'a serde_json::Value,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Template backgrounds
// ---------------------------------------------------------------------------

/// Row struct for the template_backgrounds table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = template_backgrounds)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TemplateBackgroundRow {
    pub id: Uuid,
    pub template_ref: String,
    pub user_id: Uuid,
    pub image_data: String,
    pub image_type: String,
    pub file_name: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
