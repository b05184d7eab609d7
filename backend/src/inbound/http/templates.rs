//! Template CRUD handlers.
//!
//! ```text
//! GET    /api/templates
//! GET    /api/templates/test
//! GET    /api/templates/real-estate
//! GET    /api/templates/get?id=
//! GET    /api/templates/by-key/{key}
//! PUT    /api/templates/by-key/{key}
//! POST   /api/templates
//! GET    /api/templates/{id}
//! PUT    /api/templates/{id}
//! DELETE /api/templates/{id}
//! POST   /api/templates/{id}/duplicate
//! POST   /api/templates/{id}/thumbnail
//! ```
//!
//! Fixed segments must be registered before the `{id}` routes.

use std::str::FromStr;

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::TemplateSelector;
use crate::domain::{
    CanvasObject, Dimensions, Error, Template, TemplateCategory, TemplateDraft, TemplateFilter,
    TemplateKey, TemplatePatch, TemplateType,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, TemplateSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, decode_field, missing_field_error, parse_template_id,
};

const ID: FieldName = FieldName::new("id");

fn invalid(err: impl ToString) -> Error {
    Error::invalid_request(err.to_string())
}

fn parse_key(raw: &str) -> Result<TemplateKey, Error> {
    TemplateKey::new(raw).map_err(|_| Error::not_found("Template not found"))
}

/// Listing filters.
#[derive(Debug, Default, Deserialize, Serialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct TemplateListQuery {
    /// Template type, e.g. `square-post`.
    #[serde(rename = "type")]
    pub template_type: Option<String>,
    /// Gallery category, e.g. `flyers`.
    pub category: Option<String>,
    /// `true` restricts to the real-estate gallery.
    pub is_real_estate: Option<String>,
}

impl TemplateListQuery {
    fn into_filter(self) -> Result<TemplateFilter, Error> {
        let present = |raw: Option<String>| raw.filter(|value| !value.is_empty());
        Ok(TemplateFilter {
            template_type: present(self.template_type)
                .map(|raw| TemplateType::from_str(&raw))
                .transpose()
                .map_err(invalid)?,
            category: present(self.category)
                .map(|raw| TemplateCategory::from_str(&raw))
                .transpose()
                .map_err(invalid)?,
            real_estate_only: self.is_real_estate.as_deref() == Some("true"),
        })
    }
}

/// `?id=` of `GET /api/templates/get`.
#[derive(Debug, Default, Deserialize, Serialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TemplateIdQuery {
    /// Template id.
    pub id: Option<String>,
}

/// Body of `POST /api/templates`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTemplateBody {
    /// Display name; generated from the type and date when absent.
    pub name: Option<String>,
    /// Required template type.
    #[serde(rename = "type")]
    #[schema(example = "square-post")]
    pub template_type: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// Canvas size; the type's default when absent.
    pub dimensions: Option<Dimensions>,
    /// Image URL placed at the top-left of the canvas.
    pub brand_kit_logo: Option<String>,
    /// Stable editor key; generated when absent or blank.
    pub template_key: Option<String>,
    /// Whether the template belongs to the real-estate gallery.
    pub is_real_estate: Option<bool>,
}

impl CreateTemplateBody {
    fn into_draft(self) -> Result<TemplateDraft, Error> {
        let template_type = TemplateType::parse(self.template_type.as_deref()).map_err(invalid)?;
        let template_key = self
            .template_key
            .filter(|key| !key.trim().is_empty())
            .map(TemplateKey::new)
            .transpose()
            .map_err(invalid)?;
        Ok(TemplateDraft {
            name: self.name,
            description: self.description,
            dimensions: self
                .dimensions
                .map(Dimensions::validated)
                .transpose()
                .map_err(invalid)?,
            brand_kit_logo: self.brand_kit_logo,
            template_key,
            is_real_estate: self.is_real_estate,
            ..TemplateDraft::new(template_type)
        })
    }
}

/// Body of the template update routes; absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTemplateBody {
    /// New display name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New template type, e.g. `story`.
    #[serde(rename = "type")]
    pub template_type: Option<String>,
    /// New gallery category.
    pub category: Option<String>,
    /// Thumbnail URL or data URL.
    pub thumbnail: Option<String>,
    /// Stored thumbnail file name.
    pub thumbnail_filename: Option<String>,
    /// Stored design document name.
    pub design_filename: Option<String>,
    /// Public URL of the design document.
    pub file_url: Option<String>,
    /// Canvas size in pixels.
    pub dimensions: Option<Dimensions>,
    /// Legacy `"<width>x<height>"` size string.
    pub canvas_size: Option<String>,
    /// Canvas background colour.
    pub background_color: Option<String>,
    /// Canvas background image URL.
    pub background_image: Option<String>,
    /// Full replacement of the canvas objects.
    #[schema(value_type = Option<Vec<Object>>)]
    pub objects: Option<Vec<CanvasObject>>,
    /// Whether the template belongs to the real-estate gallery.
    pub is_real_estate: Option<bool>,
}

impl UpdateTemplateBody {
    fn into_patch(self) -> Result<TemplatePatch, Error> {
        Ok(TemplatePatch {
            template_type: self
                .template_type
                .map(|raw| TemplateType::from_str(&raw))
                .transpose()
                .map_err(invalid)?,
            category: self
                .category
                .map(|raw| TemplateCategory::from_str(&raw))
                .transpose()
                .map_err(invalid)?,
            name: self.name,
            description: self.description,
            thumbnail: self.thumbnail,
            thumbnail_filename: self.thumbnail_filename,
            design_filename: self.design_filename,
            file_url: self.file_url,
            dimensions: self
                .dimensions
                .map(Dimensions::validated)
                .transpose()
                .map_err(invalid)?,
            canvas_size: self.canvas_size,
            background_color: self.background_color,
            background_image: self.background_image,
            objects: self.objects,
            is_real_estate: self.is_real_estate,
        })
    }
}

/// Body of `POST /api/templates/{id}/thumbnail`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ThumbnailBody {
    /// Base64 PNG or data URL.
    pub thumbnail_data: Option<String>,
}

/// Liveness check for the templates router.
#[utoipa::path(
    get,
    path = "/api/templates/test",
    responses((status = 200, description = "Router is mounted")),
    tags = ["templates"],
    operation_id = "templatesTest",
    security([])
)]
#[get("/test")]
pub async fn templates_test() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "message": "Templates API is working",
        "timestamp": Utc::now(),
    }))
}

/// List templates, newest first.
#[utoipa::path(
    get,
    path = "/api/templates",
    params(TemplateListQuery),
    responses(
        (status = 200, description = "Templates", body = [TemplateSchema]),
        (status = 400, description = "Unknown type or category", body = ErrorSchema)
    ),
    tags = ["templates"],
    operation_id = "listTemplates",
    security([])
)]
#[get("")]
pub async fn list_templates(
    state: web::Data<HttpState>,
    query: web::Query<TemplateListQuery>,
) -> ApiResult<web::Json<Vec<Template>>> {
    let filter = query.into_inner().into_filter()?;
    state.templates.list(filter).await.map(web::Json)
}

/// List the real-estate gallery.
#[utoipa::path(
    get,
    path = "/api/templates/real-estate",
    responses((status = 200, description = "Templates", body = [TemplateSchema])),
    tags = ["templates"],
    operation_id = "listRealEstateTemplates",
    security([])
)]
#[get("/real-estate")]
pub async fn list_real_estate(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<Template>>> {
    let filter = TemplateFilter {
        real_estate_only: true,
        ..TemplateFilter::default()
    };
    state.templates.list(filter).await.map(web::Json)
}

async fn fetch(state: &HttpState, raw: Option<&str>) -> ApiResult<HttpResponse> {
    let id = parse_template_id(raw, ID)?;
    let template = state.templates.get(&TemplateSelector::Id(id)).await?;
    Ok(HttpResponse::Ok().json(template))
}

/// Fetch a template by `?id=`.
#[utoipa::path(
    get,
    path = "/api/templates/get",
    params(TemplateIdQuery),
    responses(
        (status = 200, description = "Template", body = TemplateSchema),
        (status = 400, description = "Invalid template ID", body = ErrorSchema),
        (status = 404, description = "Template not found", body = ErrorSchema)
    ),
    tags = ["templates"],
    operation_id = "getTemplateByQuery",
    security([])
)]
#[get("/get")]
pub async fn get_template_by_query(
    state: web::Data<HttpState>,
    query: web::Query<TemplateIdQuery>,
) -> ApiResult<HttpResponse> {
    fetch(&state, query.id.as_deref()).await
}

/// Fetch a template by id.
#[utoipa::path(
    get,
    path = "/api/templates/{id}",
    params(("id" = String, Path, description = "Template id")),
    responses(
        (status = 200, description = "Template", body = TemplateSchema),
        (status = 400, description = "Invalid template ID format", body = ErrorSchema),
        (status = 404, description = "Template not found", body = ErrorSchema)
    ),
    tags = ["templates"],
    operation_id = "getTemplate",
    security([])
)]
#[get("/{id}")]
pub async fn get_template(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    fetch(&state, Some(path.as_str())).await
}

/// Fetch a template by client key.
#[utoipa::path(
    get,
    path = "/api/templates/by-key/{key}",
    params(("key" = String, Path, description = "Template key")),
    responses(
        (status = 200, description = "Template", body = TemplateSchema),
        (status = 404, description = "Template not found", body = ErrorSchema)
    ),
    tags = ["templates"],
    operation_id = "getTemplateByKey",
    security([])
)]
#[get("/by-key/{key}")]
pub async fn get_template_by_key(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let key = parse_key(&path)?;
    let template = state.templates.get(&TemplateSelector::Key(key)).await?;
    Ok(HttpResponse::Ok().json(template))
}

/// Create a template with type-specific defaults.
#[utoipa::path(
    post,
    path = "/api/templates",
    request_body = CreateTemplateBody,
    responses(
        (status = 201, description = "Template created", body = TemplateSchema),
        (status = 400, description = "Missing or invalid template type", body = ErrorSchema),
        (status = 409, description = "Template key already exists", body = ErrorSchema)
    ),
    tags = ["templates"],
    operation_id = "createTemplate",
    security([])
)]
#[post("")]
pub async fn create_template(
    state: web::Data<HttpState>,
    payload: web::Json<CreateTemplateBody>,
) -> ApiResult<HttpResponse> {
    let draft = payload.into_inner().into_draft()?;
    let template = state.templates_command.create(draft).await?;
    Ok(HttpResponse::Created().json(template))
}

async fn apply_update(
    state: &HttpState,
    selector: TemplateSelector,
    body: UpdateTemplateBody,
) -> ApiResult<HttpResponse> {
    let patch = body.into_patch()?;
    let template = state.templates_command.update(&selector, patch).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "template": template })))
}

/// Merge changes into a template.
#[utoipa::path(
    put,
    path = "/api/templates/{id}",
    params(("id" = String, Path, description = "Template id")),
    request_body = UpdateTemplateBody,
    responses(
        (status = 200, description = "Template updated"),
        (status = 400, description = "Invalid template ID format", body = ErrorSchema),
        (status = 404, description = "Template not found", body = ErrorSchema)
    ),
    tags = ["templates"],
    operation_id = "updateTemplate",
    security([])
)]
#[put("/{id}")]
pub async fn update_template(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateTemplateBody>,
) -> ApiResult<HttpResponse> {
    let id = parse_template_id(Some(path.as_str()), ID)?;
    apply_update(&state, TemplateSelector::Id(id), payload.into_inner()).await
}

/// Merge changes into a template addressed by key.
#[utoipa::path(
    put,
    path = "/api/templates/by-key/{key}",
    params(("key" = String, Path, description = "Template key")),
    request_body = UpdateTemplateBody,
    responses(
        (status = 200, description = "Template updated"),
        (status = 404, description = "Template not found", body = ErrorSchema)
    ),
    tags = ["templates"],
    operation_id = "updateTemplateByKey",
    security([])
)]
#[put("/by-key/{key}")]
pub async fn update_template_by_key(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateTemplateBody>,
) -> ApiResult<HttpResponse> {
    let key = parse_key(&path)?;
    apply_update(&state, TemplateSelector::Key(key), payload.into_inner()).await
}

/// Delete a template together with its design file and thumbnail.
#[utoipa::path(
    delete,
    path = "/api/templates/{id}",
    params(("id" = String, Path, description = "Template id")),
    responses(
        (status = 200, description = "Template deleted"),
        (status = 400, description = "Invalid template ID format", body = ErrorSchema),
        (status = 404, description = "Template not found", body = ErrorSchema)
    ),
    tags = ["templates"],
    operation_id = "deleteTemplate",
    security([])
)]
#[delete("/{id}")]
pub async fn delete_template(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_template_id(Some(path.as_str()), ID)?;
    let deleted = state.templates_command.delete(&id).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "deletedTemplate": deleted })))
}

/// Copy a template under a new id and key.
#[utoipa::path(
    post,
    path = "/api/templates/{id}/duplicate",
    params(("id" = String, Path, description = "Template id")),
    responses(
        (status = 201, description = "Copy created", body = TemplateSchema),
        (status = 404, description = "Template not found", body = ErrorSchema)
    ),
    tags = ["templates"],
    operation_id = "duplicateTemplate",
    security([])
)]
#[post("/{id}/duplicate")]
pub async fn duplicate_template(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_template_id(Some(path.as_str()), ID)?;
    let copy = state.templates_command.duplicate(&id).await?;
    Ok(HttpResponse::Created().json(copy))
}

/// Replace a template's thumbnail image.
#[utoipa::path(
    post,
    path = "/api/templates/{id}/thumbnail",
    params(("id" = String, Path, description = "Template id")),
    request_body = ThumbnailBody,
    responses(
        (status = 200, description = "Thumbnail stored"),
        (status = 400, description = "No thumbnail file uploaded", body = ErrorSchema),
        (status = 404, description = "Template not found", body = ErrorSchema)
    ),
    tags = ["templates"],
    operation_id = "uploadTemplateThumbnail",
    security([])
)]
#[post("/{id}/thumbnail")]
pub async fn upload_thumbnail(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<ThumbnailBody>,
) -> ApiResult<HttpResponse> {
    const FIELD: FieldName = FieldName::new("thumbnailData");
    let id = parse_template_id(Some(path.as_str()), ID)?;
    let raw = payload
        .into_inner()
        .thumbnail_data
        .filter(|data| !data.trim().is_empty())
        .ok_or_else(|| missing_field_error(FIELD, "No thumbnail file uploaded"))?;
    let png = decode_field(&raw, FIELD)?.bytes;
    let template = state.templates_command.replace_thumbnail(&id, png).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "thumbnail": template.thumbnail,
        "template": template,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TemplateId;
    use crate::inbound::http::test_utils::{TestPorts, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;
    use serde_json::Value;

    fn template(kind: TemplateType) -> Template {
        TemplateDraft::new(kind)
            .into_template(Utc::now(), &mut rand::thread_rng())
            .expect("built-in layout")
    }

    fn routes(cfg: &mut web::ServiceConfig) {
        cfg.service(
            web::scope("/api/templates")
                .service(templates_test)
                .service(list_templates)
                .service(list_real_estate)
                .service(get_template_by_query)
                .service(get_template_by_key)
                .service(update_template_by_key)
                .service(create_template)
                .service(get_template)
                .service(update_template)
                .service(delete_template)
                .service(duplicate_template)
                .service(upload_thumbnail),
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn list_passes_the_filter() {
        let mut ports = TestPorts::default();
        ports
            .templates
            .expect_list()
            .withf(|filter: &TemplateFilter| {
                filter.template_type == Some(TemplateType::Story)
                    && filter.category.is_none()
                    && filter.real_estate_only
            })
            .return_once(|_| Ok(vec![template(TemplateType::Story)]));
        let app = test::init_service(test_app(ports).configure(routes)).await;

        let req = test::TestRequest::get()
            .uri("/api/templates?type=story&isRealEstate=true")
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body[0]["type"], "story");
        assert_eq!(body[0]["category"], "stories");
    }

    #[rstest]
    #[actix_web::test]
    async fn list_rejects_unknown_types() {
        let mut ports = TestPorts::default();
        ports.templates.expect_list().never();
        let app = test::init_service(test_app(ports).configure(routes)).await;

        let req = test::TestRequest::get()
            .uri("/api/templates?type=poster")
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[rstest]
    #[case("/api/templates/get", "Invalid template ID")]
    #[case("/api/templates/get?id=undefined", "Invalid template ID")]
    #[case("/api/templates/get?id=null", "Invalid template ID")]
    #[case("/api/templates/get?id=abc", "Invalid template ID format")]
    #[case("/api/templates/abc", "Invalid template ID format")]
    #[actix_web::test]
    async fn bad_ids_are_rejected_before_lookup(#[case] uri: &str, #[case] message: &str) {
        let mut ports = TestPorts::default();
        ports.templates.expect_get().never();
        let app = test::init_service(test_app(ports).configure(routes)).await;

        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], message);
    }

    #[rstest]
    #[actix_web::test]
    async fn missing_template_is_not_found() {
        let mut ports = TestPorts::default();
        ports
            .templates
            .expect_get()
            .return_once(|_| Err(Error::not_found("Template not found")));
        let app = test::init_service(test_app(ports).configure(routes)).await;

        let uri = format!("/api/templates/{}", TemplateId::random());
        let res = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[actix_web::test]
    async fn by_key_lookup_uses_the_key() {
        let mut ports = TestPorts::default();
        ports
            .templates
            .expect_get()
            .withf(|selector: &TemplateSelector| {
                matches!(selector, TemplateSelector::Key(key) if key.as_ref() == "promo")
            })
            .return_once(|_| Ok(template(TemplateType::Brochure)));
        let app = test::init_service(test_app(ports).configure(routes)).await;

        let req = test::TestRequest::get()
            .uri("/api/templates/by-key/promo")
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
    }

    #[rstest]
    #[case(json!({"name": "x"}), "Template type is required")]
    #[case(json!({"type": "poster"}), "Invalid template type")]
    #[actix_web::test]
    async fn create_validates_the_type(#[case] body: Value, #[case] message: &str) {
        let mut ports = TestPorts::default();
        ports.templates_command.expect_create().never();
        let app = test::init_service(test_app(ports).configure(routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/templates")
            .set_json(&body)
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], message);
    }

    #[rstest]
    #[case(json!({"width": 0, "height": 10}))]
    #[case(json!({"width": 10, "height": 3_000_000_000_u64}))]
    #[actix_web::test]
    async fn create_rejects_out_of_range_dimensions(#[case] dimensions: Value) {
        let mut ports = TestPorts::default();
        ports.templates_command.expect_create().never();
        let app = test::init_service(test_app(ports).configure(routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/templates")
            .set_json(json!({"type": "story", "dimensions": dimensions}))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(
            body["message"],
            "Dimensions must be between 1 and 2147483647 pixels"
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn update_rejects_zero_height() {
        let mut ports = TestPorts::default();
        ports.templates_command.expect_update().never();
        let app = test::init_service(test_app(ports).configure(routes)).await;

        let req = test::TestRequest::put()
            .uri(&format!("/api/templates/{}", TemplateId::random()))
            .set_json(json!({"dimensions": {"width": 500, "height": 0}}))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[rstest]
    #[actix_web::test]
    async fn create_returns_the_new_template() {
        let mut ports = TestPorts::default();
        ports
            .templates_command
            .expect_create()
            .withf(|draft: &TemplateDraft| {
                draft.template_type == TemplateType::SquarePost
                    && draft.brand_kit_logo.as_deref() == Some("/logo.png")
                    && draft.template_key.is_none()
            })
            .return_once(|draft| {
                draft
                    .into_template(Utc::now(), &mut rand::thread_rng())
                    .map_err(|err| Error::internal(err.to_string()))
            });
        let app = test::init_service(test_app(ports).configure(routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/templates")
            .set_json(json!({"type": "square-post", "brandKitLogo": "/logo.png", "templateKey": ""}))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["objects"][0]["id"], "brand-logo");
        assert_eq!(body["canvasSize"], "1080x1080");
    }

    #[rstest]
    #[actix_web::test]
    async fn update_by_id_wraps_the_template() {
        let existing = template(TemplateType::Story);
        let id = existing.id;
        let mut ports = TestPorts::default();
        ports
            .templates_command
            .expect_update()
            .withf(move |selector: &TemplateSelector, patch: &TemplatePatch| {
                *selector == TemplateSelector::Id(id) && patch.name.as_deref() == Some("Renamed")
            })
            .return_once(move |_, patch| Ok(patch.apply_to(existing, Utc::now())));
        let app = test::init_service(test_app(ports).configure(routes)).await;

        let req = test::TestRequest::put()
            .uri(&format!("/api/templates/{id}"))
            .set_json(json!({"name": "Renamed"}))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["template"]["name"], "Renamed");
    }

    #[rstest]
    #[actix_web::test]
    async fn delete_returns_the_removed_template() {
        let existing = template(TemplateType::DigitalBadge);
        let id = existing.id;
        let mut ports = TestPorts::default();
        ports
            .templates_command
            .expect_delete()
            .return_once(move |_| Ok(existing));
        let app = test::init_service(test_app(ports).configure(routes)).await;

        let req = test::TestRequest::delete()
            .uri(&format!("/api/templates/{id}"))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["deletedTemplate"]["id"], id.to_string());
    }

    #[rstest]
    #[actix_web::test]
    async fn duplicate_is_created() {
        let copy = template(TemplateType::Brochure);
        let mut ports = TestPorts::default();
        ports
            .templates_command
            .expect_duplicate()
            .return_once(move |_| Ok(copy));
        let app = test::init_service(test_app(ports).configure(routes)).await;

        let req = test::TestRequest::post()
            .uri(&format!("/api/templates/{}/duplicate", TemplateId::random()))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::CREATED);
    }

    #[rstest]
    #[actix_web::test]
    async fn thumbnail_upload_requires_data() {
        let mut ports = TestPorts::default();
        ports.templates_command.expect_replace_thumbnail().never();
        let app = test::init_service(test_app(ports).configure(routes)).await;

        let req = test::TestRequest::post()
            .uri(&format!("/api/templates/{}/thumbnail", TemplateId::random()))
            .set_json(json!({}))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "No thumbnail file uploaded");
    }

    #[rstest]
    #[actix_web::test]
    async fn thumbnail_upload_decodes_data_urls() {
        let mut stored = template(TemplateType::SquarePost);
        stored.thumbnail = "/uploads/thumbnails/thumb-1-abc.png".to_owned();
        let mut ports = TestPorts::default();
        ports
            .templates_command
            .expect_replace_thumbnail()
            .withf(|_, png: &Vec<u8>| png.as_slice() == b"hi")
            .return_once(move |_, _| Ok(stored));
        let app = test::init_service(test_app(ports).configure(routes)).await;

        let req = test::TestRequest::post()
            .uri(&format!("/api/templates/{}/thumbnail", TemplateId::random()))
            .set_json(json!({"thumbnailData": "data:image/png;base64,aGk="}))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["thumbnail"], "/uploads/thumbnails/thumb-1-abc.png");
    }

    #[rstest]
    #[actix_web::test]
    async fn test_route_reports_the_router() {
        let app = test::init_service(test_app(TestPorts::default()).configure(routes)).await;

        let req = test::TestRequest::get().uri("/api/templates/test").to_request();
        let res = test::call_service(&app, req).await;

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "Templates API is working");
    }
}
