//! Brand kit HTTP handlers.
//!
//! ```text
//! GET    /api/brand-kit/test
//! GET    /api/brand-kit
//! PUT    /api/brand-kit
//! PATCH  /api/brand-kit
//! DELETE /api/brand-kit
//! GET    /api/brand-kit/logo
//! ```

use actix_web::{HttpResponse, delete, get, patch, put, web};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::BrandKitView;
use crate::domain::{
    BrandFont, BrandKit, BrandKitPatch, BrandLogo, ColorSlot, CustomElement, Error, HexColor,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::schemas::{BrandKitSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;

/// Distinguish an absent field from an explicit `null`.
fn explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Body of `PUT`/`PATCH /api/brand-kit`; omitted fields keep their value.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BrandKitBody {
    #[schema(example = "#00525b")]
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub accent_color: Option<String>,
    /// `null` removes the stored logo.
    #[serde(default, deserialize_with = "explicit_null")]
    #[schema(value_type = Option<BrandLogo>)]
    pub logo: Option<Option<BrandLogo>>,
    pub fonts: Option<Vec<BrandFont>>,
    pub custom_elements: Option<Vec<CustomElement>>,
}

fn colour(raw: Option<String>, slot: ColorSlot) -> Result<Option<HexColor>, Error> {
    raw.map(|value| HexColor::new(value, slot).map_err(Error::from))
        .transpose()
}

impl BrandKitBody {
    fn into_patch(self) -> Result<BrandKitPatch, Error> {
        Ok(BrandKitPatch {
            primary_color: colour(self.primary_color, ColorSlot::Primary)?,
            secondary_color: colour(self.secondary_color, ColorSlot::Secondary)?,
            accent_color: colour(self.accent_color, ColorSlot::Accent)?,
            logo: self.logo,
            fonts: self.fonts,
            custom_elements: self.custom_elements,
        })
    }
}

/// Brand kit as served to its owner.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandKitResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub primary_color: HexColor,
    pub secondary_color: HexColor,
    pub accent_color: HexColor,
    pub logo: Option<BrandLogo>,
    pub fonts: Vec<BrandFont>,
    pub custom_elements: Vec<CustomElement>,
}

impl BrandKitResponse {
    fn new(kit: BrandKit, persisted: bool) -> Self {
        Self {
            id: persisted.then_some(kit.id),
            primary_color: kit.primary_color,
            secondary_color: kit.secondary_color,
            accent_color: kit.accent_color,
            logo: kit.logo,
            fonts: kit.fonts,
            custom_elements: kit.custom_elements,
        }
    }
}

impl From<BrandKitView> for BrandKitResponse {
    fn from(view: BrandKitView) -> Self {
        Self::new(view.kit, view.persisted)
    }
}

/// Router smoke check.
#[utoipa::path(
    get,
    path = "/api/brand-kit/test",
    responses((status = 200, description = "Router is mounted")),
    tags = ["brand-kit"],
    operation_id = "brandKitTest",
    security([])
)]
#[get("/test")]
pub async fn brand_kit_test() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "message": "Brand kit router is working" }))
}

/// The caller's brand kit, or the defaults when none is stored.
#[utoipa::path(
    get,
    path = "/api/brand-kit",
    responses(
        (status = 200, description = "Brand kit", body = BrandKitSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["brand-kit"],
    operation_id = "getBrandKit"
)]
#[get("")]
pub async fn get_brand_kit(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<HttpResponse> {
    let view = state.brand_kits.get(&user.claims().user_id).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(json!({
            "success": true,
            "brandKit": BrandKitResponse::from(view),
        })))
}

async fn apply_update(
    state: &HttpState,
    user: &AuthenticatedUser,
    body: BrandKitBody,
) -> ApiResult<HttpResponse> {
    let patch = body.into_patch()?;
    let kit = state.brand_kits.update(&user.claims().user_id, patch).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Brand kit updated successfully",
        "brandKit": BrandKitResponse::new(kit, true),
    })))
}

/// Update the supplied fields, creating the kit when needed.
#[utoipa::path(
    put,
    path = "/api/brand-kit",
    request_body = BrandKitBody,
    responses(
        (status = 200, description = "Brand kit updated", body = BrandKitSchema),
        (status = 400, description = "Invalid colour, font or element", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["brand-kit"],
    operation_id = "updateBrandKit"
)]
#[put("")]
pub async fn update_brand_kit(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<BrandKitBody>,
) -> ApiResult<HttpResponse> {
    apply_update(&state, &user, payload.into_inner()).await
}

/// Same as `PUT /api/brand-kit`.
#[utoipa::path(
    patch,
    path = "/api/brand-kit",
    request_body = BrandKitBody,
    responses(
        (status = 200, description = "Brand kit updated", body = BrandKitSchema),
        (status = 400, description = "Invalid colour, font or element", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["brand-kit"],
    operation_id = "patchBrandKit"
)]
#[patch("")]
pub async fn patch_brand_kit(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<BrandKitBody>,
) -> ApiResult<HttpResponse> {
    apply_update(&state, &user, payload.into_inner()).await
}

/// Remove the caller's brand kit.
#[utoipa::path(
    delete,
    path = "/api/brand-kit",
    responses(
        (status = 200, description = "Brand kit deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["brand-kit"],
    operation_id = "deleteBrandKit"
)]
#[delete("")]
pub async fn delete_brand_kit(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<HttpResponse> {
    state.brand_kits.delete(&user.claims().user_id).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Brand kit deleted successfully",
    })))
}

/// The stored logo, or `null`.
#[utoipa::path(
    get,
    path = "/api/brand-kit/logo",
    responses(
        (status = 200, description = "Logo or null"),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["brand-kit"],
    operation_id = "getBrandKitLogo"
)]
#[get("/logo")]
pub async fn get_logo(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<HttpResponse> {
    let logo = state.brand_kits.logo(&user.claims().user_id).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(json!({ "success": true, "logo": logo })))
}
