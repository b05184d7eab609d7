//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the REST API. It registers:
//!
//! - **Paths**: every HTTP endpoint from the inbound layer
//! - **Schemas**: wrappers for domain types ([`ErrorSchema`], [`ErrorCodeSchema`],
//!   [`TemplateSchema`], [`BrandKitSchema`]) that keep utoipa out of the domain
//! - **Security**: the bearer token scheme issued by sign-up and sign-in
//!
//! The generated document is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::schemas::{BrandKitSchema, ErrorCodeSchema, ErrorSchema, TemplateSchema};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the bearer security scheme.
pub const BEARER_SCHEME: &str = "BearerAuth";

/// Enrich the generated document with the bearer security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token returned by sign-up or sign-in."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Studio backend API",
        description = "Accounts, templates, design files, brand kits and Canva pass-through.",
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        crate::inbound::http::health::status,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::accounts::signup,
        crate::inbound::http::accounts::signin,
        crate::inbound::http::accounts::validate,
        crate::inbound::http::accounts::update_profile,
        crate::inbound::http::templates::templates_test,
        crate::inbound::http::templates::list_templates,
        crate::inbound::http::templates::list_real_estate,
        crate::inbound::http::templates::get_template_by_query,
        crate::inbound::http::templates::get_template,
        crate::inbound::http::templates::get_template_by_key,
        crate::inbound::http::templates::create_template,
        crate::inbound::http::templates::update_template,
        crate::inbound::http::templates::update_template_by_key,
        crate::inbound::http::templates::delete_template,
        crate::inbound::http::templates::duplicate_template,
        crate::inbound::http::templates::upload_thumbnail,
        crate::inbound::http::template_assets::list_files,
        crate::inbound::http::template_assets::get_design_by_query,
        crate::inbound::http::template_assets::get_design,
        crate::inbound::http::template_assets::save_design,
        crate::inbound::http::template_assets::save_design_large,
        crate::inbound::http::template_assets::save_thumbnail,
        crate::inbound::http::template_assets::get_thumbnail,
        crate::inbound::http::template_assets::upload_file,
        crate::inbound::http::template_assets::upload_image,
        crate::inbound::http::template_assets::upload_multiple,
        crate::inbound::http::template_assets::cleanup_orphaned_files,
        crate::inbound::http::template_assets::delete_file,
        crate::inbound::http::backgrounds::save_background,
        crate::inbound::http::backgrounds::get_background,
        crate::inbound::http::backgrounds::delete_backgrounds,
        crate::inbound::http::backgrounds::delete_background_by_id,
        crate::inbound::http::brand_kit::brand_kit_test,
        crate::inbound::http::brand_kit::get_brand_kit,
        crate::inbound::http::brand_kit::update_brand_kit,
        crate::inbound::http::brand_kit::patch_brand_kit,
        crate::inbound::http::brand_kit::delete_brand_kit,
        crate::inbound::http::brand_kit::get_logo,
        crate::inbound::http::canva::create_design,
        crate::inbound::http::canva::export_design,
        crate::inbound::http::canva::apply_brand_kit,
        crate::inbound::http::canva::list_templates,
        crate::inbound::http::canva::list_brand_kits,
        crate::inbound::http::canva::auth_callback,
        crate::inbound::http::canva::auth_url,
    ),
    components(schemas(ErrorSchema, ErrorCodeSchema, TemplateSchema, BrandKitSchema)),
    tags(
        (name = "health", description = "Status summary and orchestration checks"),
        (name = "auth", description = "Sign-up, sign-in and profile"),
        (name = "templates", description = "Template documents"),
        (name = "files", description = "Design files, thumbnails and uploads"),
        (name = "backgrounds", description = "Per-user template backgrounds"),
        (name = "brand-kit", description = "The caller's brand kit"),
        (name = "canva", description = "Canva Connect pass-through")
    )
)]
pub struct ApiDoc;
