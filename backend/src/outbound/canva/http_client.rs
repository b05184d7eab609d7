//! Reqwest-backed `CanvaClient`.
//!
//! This adapter owns transport details only: bearer headers, request
//! timeouts, status mapping and JSON decoding into domain values.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;
use zeroize::Zeroizing;

use super::dto::{
    ApplyBrandKitRequest, BrandKitsDto, CreateDesignRequest, DesignDto, ExportDto, ExportRequest,
    TemplatesDto, TokenDto, TokenRequest,
};
use crate::domain::ports::{CanvaClient, CanvaClientError};
use crate::domain::{
    CANVA_SCOPES, CANVA_TEMPLATE_CATEGORY, CANVA_TEMPLATE_LIMIT, CanvaBrandKit, CanvaDesign,
    CanvaExport, CanvaTemplate, CanvaTokens, ExportFormat,
};

/// OAuth client registration.
pub struct CanvaCredentials {
    /// Registered client id.
    pub client_id: String,
    /// Registered client secret.
    pub client_secret: Zeroizing<String>,
    /// Redirect URI registered with Canva.
    pub redirect_uri: String,
}

/// Canva adapter that calls one API base URL.
pub struct CanvaHttpClient {
    client: Client,
    base_url: Url,
    credentials: CanvaCredentials,
}

impl CanvaHttpClient {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        credentials: CanvaCredentials,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            credentials,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, CanvaClientError> {
        self.base_url
            .join(path)
            .map_err(|err| CanvaClientError::invalid_request(format!("bad endpoint {path}: {err}")))
    }

    fn design_endpoint(&self, design_id: &str, action: &str) -> Result<Url, CanvaClientError> {
        let mut url = self.endpoint("/v1/designs")?;
        url.path_segments_mut()
            .map_err(|()| CanvaClientError::invalid_request("base URL cannot carry a path"))?
            .push(design_id)
            .push(action);
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Vec<u8>, CanvaClientError> {
        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        Ok(body.to_vec())
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, CanvaClientError> {
        let body = self.send(request).await?;
        decode(&body)
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, CanvaClientError> {
    serde_json::from_slice(body)
        .map_err(|err| CanvaClientError::decode(format!("invalid Canva JSON payload: {err}")))
}

#[async_trait]
impl CanvaClient for CanvaHttpClient {
    async fn create_design(
        &self,
        access_token: &str,
        template_id: &str,
    ) -> Result<CanvaDesign, CanvaClientError> {
        let request = self
            .client
            .post(self.endpoint("/v1/designs")?)
            .bearer_auth(access_token)
            .json(&CreateDesignRequest {
                template_id,
                brand_kit_id: None,
            });
        let design: DesignDto = self.send_json(request).await?;
        Ok(design.into_domain(template_id))
    }

    async fn export_design(
        &self,
        access_token: &str,
        design_id: &str,
        format: &ExportFormat,
    ) -> Result<CanvaExport, CanvaClientError> {
        let request = self
            .client
            .post(self.design_endpoint(design_id, "export")?)
            .bearer_auth(access_token)
            .json(&ExportRequest {
                format: format.as_str(),
                quality: "high",
                size: "original",
            });
        let export: ExportDto = self.send_json(request).await?;
        Ok(export.into())
    }

    async fn apply_brand_kit(
        &self,
        access_token: &str,
        design_id: &str,
        brand_kit_id: &str,
    ) -> Result<(), CanvaClientError> {
        let request = self
            .client
            .post(self.design_endpoint(design_id, "brand-kit")?)
            .bearer_auth(access_token)
            .json(&ApplyBrandKitRequest { brand_kit_id });
        self.send(request).await.map(|_| ())
    }

    async fn list_templates(
        &self,
        access_token: &str,
    ) -> Result<Vec<CanvaTemplate>, CanvaClientError> {
        let limit = CANVA_TEMPLATE_LIMIT.to_string();
        let request = self
            .client
            .get(self.endpoint("/v1/templates")?)
            .bearer_auth(access_token)
            .query(&[("category", CANVA_TEMPLATE_CATEGORY), ("limit", limit.as_str())]);
        let page: TemplatesDto = self.send_json(request).await?;
        debug!(count = page.templates.len(), "fetched canva templates");
        Ok(page.templates.into_iter().map(Into::into).collect())
    }

    async fn list_brand_kits(
        &self,
        access_token: &str,
    ) -> Result<Vec<CanvaBrandKit>, CanvaClientError> {
        let request = self
            .client
            .get(self.endpoint("/v1/brand-kits")?)
            .bearer_auth(access_token);
        let page: BrandKitsDto = self.send_json(request).await?;
        Ok(page.brand_kits.into_iter().map(Into::into).collect())
    }

    async fn exchange_code(&self, code: &str) -> Result<CanvaTokens, CanvaClientError> {
        let request = self
            .client
            .post(self.endpoint("/oauth/token")?)
            .json(&TokenRequest {
                grant_type: "authorization_code",
                client_id: &self.credentials.client_id,
                client_secret: &self.credentials.client_secret,
                code,
                redirect_uri: &self.credentials.redirect_uri,
            });
        let tokens: TokenDto = self.send_json(request).await?;
        Ok(tokens.into())
    }

    fn authorize_url(&self, state: &str) -> Result<String, CanvaClientError> {
        let mut url = self.endpoint("/oauth/authorize")?;
        url.query_pairs_mut()
            .append_pair("client_id", &self.credentials.client_id)
            .append_pair("redirect_uri", &self.credentials.redirect_uri)
            .append_pair("response_type", "code")
            .append_pair("scope", CANVA_SCOPES)
            .append_pair("state", state);
        Ok(url.into())
    }
}

fn map_transport_error(error: reqwest::Error) -> CanvaClientError {
    if error.is_timeout() {
        CanvaClientError::timeout(error.to_string())
    } else {
        CanvaClientError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> CanvaClientError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::TOO_MANY_REQUESTS => CanvaClientError::rate_limited(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            CanvaClientError::timeout(message)
        }
        _ if status.is_client_error() => CanvaClientError::invalid_request(message),
        _ => CanvaClientError::upstream(status.as_u16(), message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn credentials() -> CanvaCredentials {
        CanvaCredentials {
            client_id: "client-1".to_owned(),
            client_secret: Zeroizing::new("shh".to_owned()),
            redirect_uri: "http://localhost:3000/canva/callback".to_owned(),
        }
    }

    fn client_for(base: &str, timeout: Duration) -> CanvaHttpClient {
        let base = Url::parse(base).expect("base url");
        CanvaHttpClient::new(base, credentials(), timeout).expect("client builds")
    }

    async fn server_and_client() -> (MockServer, CanvaHttpClient) {
        let server = MockServer::start().await;
        let client = client_for(&server.uri(), Duration::from_secs(5));
        (server, client)
    }

    #[tokio::test]
    async fn create_design_posts_template_and_maps_urls() {
        let (server, client) = server_and_client().await;
        Mock::given(method("POST"))
            .and(path("/v1/designs"))
            .and(header("authorization", "Bearer tok"))
            .and(body_json(json!({"template_id": "tpl-9", "brand_kit_id": null})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "dsg-1",
                "status": "draft",
                "edit_url": "https://canva.example/edit",
                "preview_url": "https://canva.example/view"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let design = client.create_design("tok", "tpl-9").await.expect("design");
        assert_eq!(design.id, "dsg-1");
        assert_eq!(design.template_id, "tpl-9");
        assert_eq!(design.edit_url.as_deref(), Some("https://canva.example/edit"));
    }

    #[tokio::test]
    async fn export_sends_lower_case_format() {
        let (server, client) = server_and_client().await;
        Mock::given(method("POST"))
            .and(path("/v1/designs/dsg-1/export"))
            .and(body_json(json!({"format": "pdf", "quality": "high", "size": "original"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "exp-1",
                "status": "in_progress",
                "download_url": null,
                "expires_at": "2025-01-10T00:00:00Z"
            })))
            .mount(&server)
            .await;

        let export = client
            .export_design("tok", "dsg-1", &ExportFormat::new("PDF"))
            .await
            .expect("export");
        assert_eq!(export.id, "exp-1");
        assert!(export.download_url.is_none());
    }

    #[tokio::test]
    async fn templates_are_requested_for_real_estate() {
        let (server, client) = server_and_client().await;
        Mock::given(method("GET"))
            .and(path("/v1/templates"))
            .and(query_param("category", "real-estate"))
            .and(query_param("limit", "50"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "templates": [{
                    "id": "ct-1",
                    "name": "Open house",
                    "type": "flyer",
                    "thumbnail_url": "https://canva.example/t.png"
                }]
            })))
            .mount(&server)
            .await;

        let templates = client.list_templates("tok").await.expect("templates");
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].canva_template_id, "ct-1");
        assert_eq!(templates[0].thumbnail.as_deref(), Some("https://canva.example/t.png"));
    }

    #[tokio::test]
    async fn brand_kits_map_logo_urls() {
        let (server, client) = server_and_client().await;
        Mock::given(method("GET"))
            .and(path("/v1/brand-kits"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "brand_kits": [{"id": "bk-1", "logo_url": "https://canva.example/l.png",
                                "colors": ["#000000"]}]
            })))
            .mount(&server)
            .await;

        let kits = client.list_brand_kits("tok").await.expect("kits");
        assert_eq!(kits[0].logo.as_deref(), Some("https://canva.example/l.png"));
        assert_eq!(kits[0].colors, json!(["#000000"]));
    }

    #[tokio::test]
    async fn code_exchange_sends_client_credentials() {
        let (server, client) = server_and_client().await;
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .and(body_json(json!({
                "grant_type": "authorization_code",
                "client_id": "client-1",
                "client_secret": "shh",
                "code": "abc",
                "redirect_uri": "http://localhost:3000/canva/callback"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "at",
                "refresh_token": "rt",
                "expires_in": 3600
            })))
            .mount(&server)
            .await;

        let tokens = client.exchange_code("abc").await.expect("tokens");
        assert_eq!(tokens.access_token, "at");
        assert_eq!(tokens.expires_in, Some(3600));
    }

    #[tokio::test]
    async fn rate_limits_are_reported() {
        let (server, client) = server_and_client().await;
        Mock::given(method("GET"))
            .and(path("/v1/brand-kits"))
            .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
            .mount(&server)
            .await;

        let err = client.list_brand_kits("tok").await.expect_err("429");
        assert!(matches!(err, CanvaClientError::RateLimited { .. }));
    }

    #[tokio::test]
    async fn slow_responses_time_out() {
        let server = MockServer::start().await;
        let client = client_for(&server.uri(), Duration::from_millis(100));
        Mock::given(method("GET"))
            .and(path("/v1/brand-kits"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"brand_kits": []}))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let err = client.list_brand_kits("tok").await.expect_err("timeout");
        assert!(matches!(err, CanvaClientError::Timeout { .. }));
    }

    #[tokio::test]
    async fn malformed_bodies_are_decode_errors() {
        let (server, client) = server_and_client().await;
        Mock::given(method("POST"))
            .and(path("/v1/designs"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = client.create_design("tok", "tpl").await.expect_err("decode");
        assert!(matches!(err, CanvaClientError::Decode { .. }));
    }

    #[rstest]
    #[case::rate_limited(StatusCode::TOO_MANY_REQUESTS, "rate_limited")]
    #[case::gateway_timeout(StatusCode::GATEWAY_TIMEOUT, "timeout")]
    #[case::unauthorised(StatusCode::UNAUTHORIZED, "invalid_request")]
    #[case::server_error(StatusCode::BAD_GATEWAY, "upstream")]
    fn statuses_map_to_error_classes(#[case] status: StatusCode, #[case] class: &str) {
        assert_eq!(map_status_error(status, b"{}").class(), class);
    }

    #[rstest]
    fn authorize_url_encodes_the_query() {
        let client = client_for("https://api.canva.com", Duration::from_secs(1));
        let url = Url::parse(&client.authorize_url("user-1").expect("url")).expect("parses");
        assert_eq!(url.path(), "/oauth/authorize");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            [
                ("client_id", "client-1"),
                ("redirect_uri", "http://localhost:3000/canva/callback"),
                ("response_type", "code"),
                ("scope", CANVA_SCOPES),
                ("state", "user-1"),
            ]
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
        );
    }

    #[rstest]
    fn long_bodies_are_truncated_in_messages() {
        let body = "x".repeat(400);
        assert!(body_preview(body.as_bytes()).ends_with("..."));
    }
}
