//! OpenAPI schema definitions for domain types.
//!
//! Types whose serde shape is driven by validation newtypes or an open
//! `extra` map do not derive `ToSchema` themselves. This module provides
//! schema stand-ins for them using utoipa's external schema registration.
//!
//! The schema wrappers mirror the serialized structure of their domain types
//! but live in the inbound adapter layer where framework concerns belong.

use utoipa::ToSchema;

use crate::domain::{
    BrandFont, BrandLogo, CustomElement, Dimensions, TemplateCategory, TemplateType,
};

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// A uniqueness constraint was violated.
    #[schema(rename = "conflict")]
    Conflict,
    /// A backing service could not be reached.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "Template type is required")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Template`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Template)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct TemplateSchema {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    #[schema(example = "template_1736411400000_k3j9x2m1q")]
    template_key: Option<String>,
    #[schema(example = "Flyer Inmobiliario - Jan 9, 2025")]
    name: String,
    description: Option<String>,
    #[schema(rename = "type")]
    template_type: TemplateType,
    category: TemplateCategory,
    #[schema(example = "/uploads/default-thumbnail.png")]
    thumbnail: String,
    thumbnail_filename: Option<String>,
    design_filename: Option<String>,
    file_url: Option<String>,
    dimensions: Dimensions,
    #[schema(example = "1080x1080")]
    canvas_size: String,
    #[schema(example = "#ffffff")]
    background_color: String,
    background_image: Option<String>,
    /// Canvas objects; unknown fields round-trip unchanged.
    #[schema(value_type = Vec<Object>)]
    objects: Vec<serde_json::Value>,
    is_real_estate: bool,
    created_by: Option<String>,
    created_at: String,
    updated_at: String,
}

/// OpenAPI schema for [`crate::domain::BrandKit`] as served to its owner.
#[derive(ToSchema)]
#[schema(as = crate::domain::BrandKit)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct BrandKitSchema {
    /// Absent when the defaults are served and nothing is stored.
    id: Option<String>,
    #[schema(example = "#00525b")]
    primary_color: String,
    #[schema(example = "#01aac7")]
    secondary_color: String,
    #[schema(example = "#32e0c5")]
    accent_color: String,
    logo: Option<BrandLogo>,
    fonts: Vec<BrandFont>,
    custom_elements: Vec<CustomElement>,
}
