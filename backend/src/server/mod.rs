//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{CanvaConfig, ServerConfig};
pub use state_builders::build_health_state;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use studio_backend::Trace;
#[cfg(debug_assertions)]
use studio_backend::doc::ApiDoc;
use studio_backend::inbound::http::error::{
    json_error_handler, path_error_handler, query_error_handler, route_not_found,
};
use studio_backend::inbound::http::health::{HealthState, live, ready, status};
use studio_backend::inbound::http::state::HttpState;
use studio_backend::inbound::http::{
    accounts, backgrounds, brand_kit, canva, template_assets, templates,
};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    json_limit: usize,
}

fn auth_scope() -> actix_web::Scope {
    web::scope("/api/auth")
        .service(accounts::signup)
        .service(accounts::signin)
        .service(accounts::validate)
        .service(accounts::update_profile)
}

/// Fixed paths are registered before `/{id}` so they are not read as ids.
fn templates_scope() -> actix_web::Scope {
    web::scope("/api/templates")
        .service(templates::templates_test)
        .service(templates::list_real_estate)
        .service(templates::get_template_by_query)
        .service(template_assets::list_files)
        .service(template_assets::get_design_by_query)
        .service(template_assets::get_design)
        .service(template_assets::save_design)
        .service(template_assets::save_design_large)
        .service(template_assets::save_thumbnail)
        .service(template_assets::get_thumbnail)
        .service(template_assets::upload_file)
        .service(template_assets::upload_image)
        .service(template_assets::upload_multiple)
        .service(template_assets::cleanup_orphaned_files)
        .service(template_assets::delete_file)
        .service(backgrounds::save_background)
        .service(backgrounds::delete_background_by_id)
        .service(backgrounds::get_background)
        .service(backgrounds::delete_backgrounds)
        .service(templates::get_template_by_key)
        .service(templates::update_template_by_key)
        .service(templates::list_templates)
        .service(templates::create_template)
        .service(templates::duplicate_template)
        .service(templates::upload_thumbnail)
        .service(templates::get_template)
        .service(templates::update_template)
        .service(templates::delete_template)
}

fn brand_kit_scope() -> actix_web::Scope {
    web::scope("/api/brand-kit")
        .service(brand_kit::brand_kit_test)
        .service(brand_kit::get_logo)
        .service(brand_kit::get_brand_kit)
        .service(brand_kit::update_brand_kit)
        .service(brand_kit::patch_brand_kit)
        .service(brand_kit::delete_brand_kit)
}

fn canva_scope() -> actix_web::Scope {
    web::scope("/api/canva")
        .service(canva::create_design)
        .service(canva::export_design)
        .service(canva::apply_brand_kit)
        .service(canva::list_templates)
        .service(canva::list_brand_kits)
        .service(canva::auth_callback)
        .service(canva::auth_url)
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        json_limit,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(
            web::JsonConfig::default()
                .limit(json_limit)
                .error_handler(json_error_handler),
        )
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .wrap(Trace)
        .service(status)
        .service(ready)
        .service(live)
        .service(auth_scope())
        .service(templates_scope())
        .service(brand_kit_scope())
        .service(canva_scope());

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app.default_service(web::to(route_not_found))
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is bound.
/// - `config`: pre-built [`ServerConfig`] with binding, storage and adapter settings.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when the adapters cannot be built, or when
/// binding the socket or starting the server fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(build_http_state(&config)?);
    let json_limit = config.json_limit;
    let bind_addr = config.bind_addr();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            json_limit,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    //! Routing tests over the fully wired fixture app.

    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;
    use serde_json::Value;
    use studio_backend::domain::ports::FixtureConnectivityCheck;
    use studio_backend::domain::{Email, Plan, SessionClaims, UserId};
    use studio_backend::domain::ports::TokenCodec;
    use studio_backend::outbound::security::JwtTokenCodec;

    use super::*;

    const SECRET: &[u8] = b"routing-test-secret";

    fn fixture_deps(dir: &tempfile::TempDir, json_limit: usize) -> AppDependencies {
        let canva = CanvaConfig::new(
            url::Url::parse("http://127.0.0.1:9").expect("url"),
            studio_backend::outbound::canva::CanvaCredentials {
                client_id: "client".to_owned(),
                client_secret: zeroize::Zeroizing::new("secret".to_owned()),
                redirect_uri: "http://localhost:3000/canva/callback".to_owned(),
            },
            std::time::Duration::from_secs(1),
        );
        let config = ServerConfig::new(
            "127.0.0.1:0".parse().expect("addr"),
            SECRET.to_vec(),
            chrono::Duration::days(7),
            canva,
        )
        .with_uploads_dir(dir.path().join("uploads"))
        .with_json_limit(json_limit);
        AppDependencies {
            health_state: web::Data::new(HealthState::new(
                "test",
                Arc::new(FixtureConnectivityCheck),
            )),
            http_state: web::Data::new(build_http_state(&config).expect("state")),
            json_limit,
        }
    }

    fn bearer_for(plan: Plan) -> String {
        let codec = JwtTokenCodec::new(SECRET, chrono::Duration::days(7));
        let claims = SessionClaims {
            user_id: UserId::random(),
            email: Email::new("agent@example.com").expect("email"),
            plan,
        };
        let token = codec
            .issue(&claims, chrono::Utc::now())
            .expect("token")
            .token;
        format!("Bearer {token}")
    }

    #[rstest]
    #[actix_rt::test]
    async fn unknown_routes_get_the_error_envelope() {
        let dir = tempfile::tempdir().expect("temp dir");
        let app = test::init_service(build_app(fixture_deps(&dir, 1024))).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/nowhere").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert!(res.headers().contains_key("trace-id"));
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], "not_found");
        assert_eq!(body["message"], "Route not found");
    }

    #[rstest]
    #[case("/api/templates/test")]
    #[case("/api/brand-kit/test")]
    #[case("/api/health")]
    #[case("/health/live")]
    #[actix_rt::test]
    async fn public_health_endpoints_answer(#[case] uri: &str) {
        let dir = tempfile::tempdir().expect("temp dir");
        let app = test::init_service(build_app(fixture_deps(&dir, 1024))).await;
        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[rstest]
    #[actix_rt::test]
    async fn fixed_template_paths_win_over_ids() {
        let dir = tempfile::tempdir().expect("temp dir");
        let app = test::init_service(build_app(fixture_deps(&dir, 1024))).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/templates/files")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert!(body.is_object());
    }

    #[rstest]
    #[actix_rt::test]
    async fn brand_kit_requires_a_token() {
        let dir = tempfile::tempdir().expect("temp dir");
        let app = test::init_service(build_app(fixture_deps(&dir, 1024))).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/brand-kit").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    #[actix_rt::test]
    async fn signed_tokens_reach_authenticated_routes() {
        let dir = tempfile::tempdir().expect("temp dir");
        let app = test::init_service(build_app(fixture_deps(&dir, 1024))).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/brand-kit")
                .insert_header(("Authorization", bearer_for(Plan::Premium)))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[rstest]
    #[actix_rt::test]
    async fn token_validation_is_a_post() {
        let dir = tempfile::tempdir().expect("temp dir");
        let app = test::init_service(build_app(fixture_deps(&dir, 1024))).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/auth/validate")
                .insert_header(("Authorization", bearer_for(Plan::UltraPremium)))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["email"], "agent@example.com");
        assert_eq!(body["plan"], "Ultra-Premium");
    }

    #[rstest]
    #[actix_rt::test]
    async fn background_delete_by_id_is_a_single_segment() {
        let dir = tempfile::tempdir().expect("temp dir");
        let app = test::init_service(build_app(fixture_deps(&dir, 1024))).await;
        let res = test::call_service(
            &app,
            test::TestRequest::delete()
                .uri(&format!(
                    "/api/templates/backgrounds/{}",
                    studio_backend::domain::BackgroundId::random()
                ))
                .to_request(),
        )
        .await;
        // Reaches the repository, which has no database behind it.
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], "service_unavailable");
    }

    #[rstest]
    #[actix_rt::test]
    async fn writes_without_a_database_are_unavailable() {
        let dir = tempfile::tempdir().expect("temp dir");
        let app = test::init_service(build_app(fixture_deps(&dir, 1024))).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/auth/signup")
                .set_json(serde_json::json!({
                    "email": "new@example.com",
                    "password": "secret1",
                }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], "service_unavailable");
    }

    #[rstest]
    #[actix_rt::test]
    async fn oversized_json_bodies_are_rejected() {
        let dir = tempfile::tempdir().expect("temp dir");
        let app = test::init_service(build_app(fixture_deps(&dir, 64))).await;
        let payload = serde_json::json!({ "email": "x".repeat(200), "password": "secret1" });
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/auth/signin")
                .set_json(payload)
                .to_request(),
        )
        .await;
        assert!(res.status().is_client_error());
        let body: Value = test::read_body_json(res).await;
        assert!(body["code"].is_string());
    }
}
