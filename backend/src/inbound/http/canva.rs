//! Canva pass-through HTTP handlers.
//!
//! ```text
//! POST /api/canva/designs/create
//! POST /api/canva/designs/export
//! POST /api/canva/designs/brand-kit
//! GET  /api/canva/templates
//! GET  /api/canva/brand-kits
//! POST /api/canva/auth/callback
//! GET  /api/canva/auth/url
//! ```
//!
//! Plan gates live in the domain service; handlers only shape requests
//! and responses.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{Error, ExportFormat};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error};

fn required<'a>(raw: &'a str, field: &'static str, message: &str) -> Result<&'a str, Error> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(missing_field_error(FieldName::new(field), message));
    }
    Ok(value)
}

/// Body of `POST /api/canva/designs/create`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateDesignBody {
    pub template_id: String,
}

/// Body of `POST /api/canva/designs/export`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportDesignBody {
    pub design_id: String,
    /// Any format Canva accepts; sent upstream lower-cased.
    pub format: String,
}

/// Body of `POST /api/canva/designs/brand-kit`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplyBrandKitBody {
    pub design_id: String,
    pub brand_kit_id: String,
}

/// Body of `POST /api/canva/auth/callback`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct AuthCallbackBody {
    pub code: String,
    /// Opaque value echoed by Canva; the requesting user's id.
    pub state: String,
}

/// Create a Canva design from a template.
#[utoipa::path(
    post,
    path = "/api/canva/designs/create",
    request_body = CreateDesignBody,
    responses(
        (status = 200, description = "Design created"),
        (status = 400, description = "Template ID is required", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Plan does not include Canva", body = ErrorSchema),
        (status = 500, description = "Failed to create design", body = ErrorSchema)
    ),
    tags = ["canva"],
    operation_id = "createCanvaDesign"
)]
#[post("/designs/create")]
pub async fn create_design(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<CreateDesignBody>,
) -> ApiResult<HttpResponse> {
    let template_id = required(&payload.template_id, "templateId", "Template ID is required")?;
    let design = state.canva.create_design(user.claims(), template_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "design": design })))
}

/// Export a Canva design.
#[utoipa::path(
    post,
    path = "/api/canva/designs/export",
    request_body = ExportDesignBody,
    responses(
        (status = 200, description = "Export started"),
        (status = 400, description = "Design ID or format missing", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Plan does not include the format", body = ErrorSchema),
        (status = 500, description = "Failed to export design", body = ErrorSchema)
    ),
    tags = ["canva"],
    operation_id = "exportCanvaDesign"
)]
#[post("/designs/export")]
pub async fn export_design(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<ExportDesignBody>,
) -> ApiResult<HttpResponse> {
    let design_id = required(&payload.design_id, "designId", "Design ID is required")?;
    let format = ExportFormat::new(required(&payload.format, "format", "Format is required")?);
    let export = state
        .canva
        .export_design(user.claims(), design_id, format)
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "export": export })))
}

/// Apply a Canva brand kit to a design.
#[utoipa::path(
    post,
    path = "/api/canva/designs/brand-kit",
    request_body = ApplyBrandKitBody,
    responses(
        (status = 200, description = "Brand kit applied"),
        (status = 400, description = "Design or brand kit ID missing", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Plan does not include brand kits", body = ErrorSchema),
        (status = 500, description = "Failed to apply brand kit", body = ErrorSchema)
    ),
    tags = ["canva"],
    operation_id = "applyCanvaBrandKit"
)]
#[post("/designs/brand-kit")]
pub async fn apply_brand_kit(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<ApplyBrandKitBody>,
) -> ApiResult<HttpResponse> {
    let design_id = required(&payload.design_id, "designId", "Design ID is required")?;
    let brand_kit_id = required(
        &payload.brand_kit_id,
        "brandKitId",
        "Brand kit ID is required",
    )?;
    state
        .canva
        .apply_brand_kit(user.claims(), design_id, brand_kit_id)
        .await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Brand kit applied successfully",
        "designId": design_id,
        "brandKitId": brand_kit_id,
    })))
}

/// Real-estate templates from Canva.
#[utoipa::path(
    get,
    path = "/api/canva/templates",
    responses(
        (status = 200, description = "Templates"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Plan does not include templates", body = ErrorSchema),
        (status = 500, description = "Failed to fetch templates", body = ErrorSchema)
    ),
    tags = ["canva"],
    operation_id = "listCanvaTemplates"
)]
#[get("/templates")]
pub async fn list_templates(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<HttpResponse> {
    let templates = state.canva.templates(user.claims()).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "templates": templates })))
}

/// The caller's Canva brand kits.
#[utoipa::path(
    get,
    path = "/api/canva/brand-kits",
    responses(
        (status = 200, description = "Brand kits"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Plan does not include brand kits", body = ErrorSchema),
        (status = 500, description = "Failed to fetch brand kits", body = ErrorSchema)
    ),
    tags = ["canva"],
    operation_id = "listCanvaBrandKits"
)]
#[get("/brand-kits")]
pub async fn list_brand_kits(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<HttpResponse> {
    let brand_kits = state.canva.brand_kits(user.claims()).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "brandKits": brand_kits })))
}

/// Exchange an OAuth code for tokens.
#[utoipa::path(
    post,
    path = "/api/canva/auth/callback",
    request_body = AuthCallbackBody,
    responses(
        (status = 200, description = "Tokens issued"),
        (status = 400, description = "Authorization code is required", body = ErrorSchema),
        (status = 500, description = "Failed to complete authentication", body = ErrorSchema)
    ),
    tags = ["canva"],
    operation_id = "completeCanvaAuth",
    security([])
)]
#[post("/auth/callback")]
pub async fn auth_callback(
    state: web::Data<HttpState>,
    payload: web::Json<AuthCallbackBody>,
) -> ApiResult<HttpResponse> {
    let tokens = state
        .canva
        .complete_authorization(&payload.code, &payload.state)
        .await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "access_token": tokens.access_token,
        "refresh_token": tokens.refresh_token,
        "expires_in": tokens.expires_in,
    })))
}

/// Consent-screen URL for the caller.
#[utoipa::path(
    get,
    path = "/api/canva/auth/url",
    responses(
        (status = 200, description = "Authorization URL"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Plan does not include Canva", body = ErrorSchema)
    ),
    tags = ["canva"],
    operation_id = "canvaAuthUrl"
)]
#[get("/auth/url")]
pub async fn auth_url(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<HttpResponse> {
    let url = state.canva.authorization_url(user.claims())?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "authUrl": url })))
}
