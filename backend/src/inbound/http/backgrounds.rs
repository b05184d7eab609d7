//! Template background handlers.
//!
//! ```text
//! POST   /api/templates/backgrounds
//! DELETE /api/templates/backgrounds/{backgroundId}
//! GET    /api/templates/backgrounds/{templateId}/{userId}
//! DELETE /api/templates/backgrounds/{templateId}/{userId}
//! ```
//!
//! The single-segment delete takes a background id; the two-segment routes
//! address a (template, user) pair.

use actix_web::{HttpResponse, delete, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{
    BackgroundId, BackgroundValidationError, Error, NewBackground, TemplateBackground,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_background_id, parse_user_id};

const USER_ID: FieldName = FieldName::new("userId");

/// Body of `POST /api/templates/backgrounds`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SaveBackgroundBody {
    /// Template id or key.
    pub template_id: String,
    pub user_id: String,
    /// Base64 image.
    pub image_data: String,
    #[schema(example = "image/jpeg")]
    pub image_type: String,
    pub file_name: Option<String>,
}

impl SaveBackgroundBody {
    fn into_background(self) -> Result<NewBackground, Error> {
        let missing = [&self.template_id, &self.user_id, &self.image_data, &self.image_type]
            .iter()
            .any(|value| value.trim().is_empty());
        if missing {
            return Err(Error::invalid_request(
                BackgroundValidationError::MissingFields.to_string(),
            ));
        }
        let user_id = parse_user_id(self.user_id.trim(), USER_ID)?;
        NewBackground::new(
            &self.template_id,
            user_id,
            &self.image_data,
            &self.image_type,
            self.file_name.as_deref(),
        )
        .map_err(|err| Error::invalid_request(err.to_string()))
    }
}

/// Background as served to the editor.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundResponse {
    pub id: BackgroundId,
    pub image_data: String,
    pub image_type: String,
    pub file_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<TemplateBackground> for BackgroundResponse {
    fn from(background: TemplateBackground) -> Self {
        Self {
            id: background.id,
            image_data: background.image_data,
            image_type: background.image_type,
            file_name: background.file_name,
            created_at: background.created_at,
        }
    }
}

/// Store a background, replacing the pair's previous one.
#[utoipa::path(
    post,
    path = "/api/templates/backgrounds",
    request_body = SaveBackgroundBody,
    responses(
        (status = 200, description = "Background saved"),
        (status = 400, description = "Missing fields or invalid user ID", body = ErrorSchema),
        (status = 404, description = "Template or user not found", body = ErrorSchema)
    ),
    tags = ["backgrounds"],
    operation_id = "saveBackground",
    security([])
)]
#[post("/backgrounds")]
pub async fn save_background(
    state: web::Data<HttpState>,
    payload: web::Json<SaveBackgroundBody>,
) -> ApiResult<HttpResponse> {
    let background = payload.into_inner().into_background()?;
    let id = state.backgrounds.save(background).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Template background saved successfully",
        "backgroundId": id,
    })))
}

/// Most recent live background for a template and user.
#[utoipa::path(
    get,
    path = "/api/templates/backgrounds/{templateId}/{userId}",
    params(
        ("templateId" = String, Path, description = "Template id or key"),
        ("userId" = String, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "Background", body = BackgroundResponse),
        (status = 400, description = "Invalid user ID format", body = ErrorSchema),
        (status = 404, description = "Template background not found", body = ErrorSchema)
    ),
    tags = ["backgrounds"],
    operation_id = "getBackground",
    security([])
)]
#[get("/backgrounds/{template_id}/{user_id}")]
pub async fn get_background(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (template_ref, user_id) = path.into_inner();
    let user_id = parse_user_id(&user_id, USER_ID)?;
    let background = state.backgrounds.latest(&template_ref, &user_id).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "background": BackgroundResponse::from(background),
    })))
}

/// Remove every background for a template and user.
#[utoipa::path(
    delete,
    path = "/api/templates/backgrounds/{templateId}/{userId}",
    params(
        ("templateId" = String, Path, description = "Template id or key"),
        ("userId" = String, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "Backgrounds deleted"),
        (status = 400, description = "Invalid user ID format", body = ErrorSchema)
    ),
    tags = ["backgrounds"],
    operation_id = "deleteBackgrounds",
    security([])
)]
#[delete("/backgrounds/{template_id}/{user_id}")]
pub async fn delete_backgrounds(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (template_ref, user_id) = path.into_inner();
    let user_id = parse_user_id(&user_id, USER_ID)?;
    let deleted = state.backgrounds.delete_for(&template_ref, &user_id).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Template background deleted successfully",
        "deletedCount": deleted,
    })))
}

/// Remove one background by id.
#[utoipa::path(
    delete,
    path = "/api/templates/backgrounds/{backgroundId}",
    params(("backgroundId" = String, Path, description = "Background id")),
    responses(
        (status = 200, description = "Background deleted"),
        (status = 400, description = "Invalid background ID format", body = ErrorSchema),
        (status = 404, description = "Template background not found", body = ErrorSchema)
    ),
    tags = ["backgrounds"],
    operation_id = "deleteBackgroundById",
    security([])
)]
#[delete("/backgrounds/{background_id}")]
pub async fn delete_background_by_id(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_background_id(&path, FieldName::new("backgroundId"))?;
    state.backgrounds.delete_by_id(&id).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Template background deleted successfully",
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;
    use crate::inbound::http::test_utils::{TestPorts, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use chrono::Duration;
    use rstest::rstest;
    use serde_json::Value;

    fn routes(cfg: &mut web::ServiceConfig) {
        cfg.service(
            web::scope("/api/templates")
                .service(save_background)
                .service(delete_background_by_id)
                .service(get_background)
                .service(delete_backgrounds),
        );
    }

    fn stored(user_id: UserId) -> TemplateBackground {
        let now = Utc::now();
        TemplateBackground {
            id: BackgroundId::random(),
            template_ref: "promo".to_owned(),
            user_id,
            image_data: "aGk=".to_owned(),
            image_type: "image/png".to_owned(),
            file_name: "bg.png".to_owned(),
            created_at: now,
            expires_at: now + Duration::hours(24),
        }
    }

    #[rstest]
    #[case(json!({"templateId": "t", "userId": "u", "imageData": "x"}))]
    #[case(json!({"templateId": " ", "userId": "u", "imageData": "x", "imageType": "image/png"}))]
    #[actix_web::test]
    async fn save_requires_every_field(#[case] body: Value) {
        let mut ports = TestPorts::default();
        ports.backgrounds.expect_save().never();
        let app = test::init_service(test_app(ports).configure(routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/templates/backgrounds")
            .set_json(&body)
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(
            body["message"],
            "Missing required fields: templateId, userId, imageData, imageType"
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn save_rejects_malformed_user_ids() {
        let mut ports = TestPorts::default();
        ports.backgrounds.expect_save().never();
        let app = test::init_service(test_app(ports).configure(routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/templates/backgrounds")
            .set_json(json!({"templateId": "t", "userId": "u", "imageData": "x", "imageType": "image/png"}))
            .to_request();
        let res = test::call_service(&app, req).await;

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "Invalid user ID format");
    }

    #[rstest]
    #[actix_web::test]
    async fn save_returns_the_new_id() {
        let user = UserId::random();
        let id = BackgroundId::random();
        let mut ports = TestPorts::default();
        ports
            .backgrounds
            .expect_save()
            .withf(move |background: &NewBackground| {
                background.template_ref() == "promo" && background.user_id() == user
            })
            .return_once(move |_| Ok(id));
        let app = test::init_service(test_app(ports).configure(routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/templates/backgrounds")
            .set_json(json!({
                "templateId": "promo",
                "userId": user.to_string(),
                "imageData": "aGk=",
                "imageType": "image/png"
            }))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["backgroundId"], id.to_string());
    }

    #[rstest]
    #[actix_web::test]
    async fn latest_background_is_served_without_owner_fields() {
        let user = UserId::random();
        let mut ports = TestPorts::default();
        ports
            .backgrounds
            .expect_latest()
            .withf(move |template_ref: &str, user_id: &UserId| {
                template_ref == "promo" && *user_id == user
            })
            .return_once(move |_, _| Ok(stored(user)));
        let app = test::init_service(test_app(ports).configure(routes)).await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/templates/backgrounds/promo/{user}"))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["background"]["fileName"], "bg.png");
        assert!(body["background"].get("userId").is_none());
    }

    #[rstest]
    #[actix_web::test]
    async fn lookup_rejects_malformed_user_ids() {
        let mut ports = TestPorts::default();
        ports.backgrounds.expect_latest().never();
        let app = test::init_service(test_app(ports).configure(routes)).await;

        let req = test::TestRequest::get()
            .uri("/api/templates/backgrounds/promo/nope")
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[rstest]
    #[actix_web::test]
    async fn pair_delete_reports_the_count() {
        let mut ports = TestPorts::default();
        ports
            .backgrounds
            .expect_delete_for()
            .return_once(|_, _| Ok(2));
        let app = test::init_service(test_app(ports).configure(routes)).await;

        let req = test::TestRequest::delete()
            .uri(&format!("/api/templates/backgrounds/promo/{}", UserId::random()))
            .to_request();
        let res = test::call_service(&app, req).await;

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["deletedCount"], 2);
        assert_eq!(body["message"], "Template background deleted successfully");
    }

    #[rstest]
    #[actix_web::test]
    async fn by_id_delete_validates_the_id() {
        let mut ports = TestPorts::default();
        ports.backgrounds.expect_delete_by_id().never();
        ports.backgrounds.expect_delete_for().never();
        let app = test::init_service(test_app(ports).configure(routes)).await;

        let req = test::TestRequest::delete()
            .uri("/api/templates/backgrounds/nope")
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "Invalid background ID format");
    }

    #[rstest]
    #[actix_web::test]
    async fn by_id_delete_surfaces_not_found() {
        let mut ports = TestPorts::default();
        ports
            .backgrounds
            .expect_delete_by_id()
            .return_once(|_| Err(Error::not_found("Template background not found")));
        let app = test::init_service(test_app(ports).configure(routes)).await;

        let req = test::TestRequest::delete()
            .uri(&format!(
                "/api/templates/backgrounds/{}",
                BackgroundId::random()
            ))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
