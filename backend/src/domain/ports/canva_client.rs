//! Driven port for the Canva REST API.
//!
//! The domain owns request and response shapes; adapters translate them to
//! Canva's snake_case wire format.

use async_trait::async_trait;

use crate::domain::{
    CanvaBrandKit, CanvaDesign, CanvaExport, CanvaTemplate, CanvaTokens, ExportFormat,
};

use super::define_port_error;

define_port_error! {
    /// Errors surfaced while calling Canva.
    pub enum CanvaClientError {
        /// Network transport failed before receiving a response.
        Transport { message: String } =>
            "canva transport failed: {message}",
        /// Canva call exceeded its timeout.
        Timeout { message: String } =>
            "canva timeout: {message}",
        /// Canva rate-limited the request.
        RateLimited { message: String } =>
            "canva rate limited request: {message}",
        /// Canva rejected the request as invalid.
        InvalidRequest { message: String } =>
            "canva request invalid: {message}",
        /// Canva answered with a server error.
        Upstream { status: u16, message: String } =>
            "canva returned {status}: {message}",
        /// Canva response could not be decoded.
        Decode { message: String } =>
            "canva response decode failed: {message}",
    }
}

impl CanvaClientError {
    /// Short class label used in logs.
    #[must_use]
    pub const fn class(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "transport",
            Self::Timeout { .. } => "timeout",
            Self::RateLimited { .. } => "rate_limited",
            Self::InvalidRequest { .. } => "invalid_request",
            Self::Upstream { .. } => "upstream",
            Self::Decode { .. } => "decode",
        }
    }
}

/// Operations forwarded to Canva on behalf of a user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CanvaClient: Send + Sync {
    /// Create a design from a Canva template.
    async fn create_design(
        &self,
        access_token: &str,
        template_id: &str,
    ) -> Result<CanvaDesign, CanvaClientError>;

    /// Start an export of `design_id`.
    async fn export_design(
        &self,
        access_token: &str,
        design_id: &str,
        format: &ExportFormat,
    ) -> Result<CanvaExport, CanvaClientError>;

    /// Apply a Canva brand kit to a design.
    async fn apply_brand_kit(
        &self,
        access_token: &str,
        design_id: &str,
        brand_kit_id: &str,
    ) -> Result<(), CanvaClientError>;

    /// Real-estate templates available to the user.
    async fn list_templates(&self, access_token: &str)
    -> Result<Vec<CanvaTemplate>, CanvaClientError>;

    /// Brand kits in the user's Canva account.
    async fn list_brand_kits(
        &self,
        access_token: &str,
    ) -> Result<Vec<CanvaBrandKit>, CanvaClientError>;

    /// Exchange an OAuth authorisation code for tokens.
    async fn exchange_code(&self, code: &str) -> Result<CanvaTokens, CanvaClientError>;

    /// Consent-screen URL carrying `state`.
    fn authorize_url(&self, state: &str) -> Result<String, CanvaClientError>;
}

/// Client used when Canva is not configured; every call fails as a
/// transport error.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCanvaClient;

impl FixtureCanvaClient {
    fn unconfigured() -> CanvaClientError {
        CanvaClientError::transport("canva client is not configured")
    }
}

#[async_trait]
impl CanvaClient for FixtureCanvaClient {
    async fn create_design(
        &self,
        _access_token: &str,
        _template_id: &str,
    ) -> Result<CanvaDesign, CanvaClientError> {
        Err(Self::unconfigured())
    }

    async fn export_design(
        &self,
        _access_token: &str,
        _design_id: &str,
        _format: &ExportFormat,
    ) -> Result<CanvaExport, CanvaClientError> {
        Err(Self::unconfigured())
    }

    async fn apply_brand_kit(
        &self,
        _access_token: &str,
        _design_id: &str,
        _brand_kit_id: &str,
    ) -> Result<(), CanvaClientError> {
        Err(Self::unconfigured())
    }

    async fn list_templates(
        &self,
        _access_token: &str,
    ) -> Result<Vec<CanvaTemplate>, CanvaClientError> {
        Err(Self::unconfigured())
    }

    async fn list_brand_kits(
        &self,
        _access_token: &str,
    ) -> Result<Vec<CanvaBrandKit>, CanvaClientError> {
        Err(Self::unconfigured())
    }

    async fn exchange_code(&self, _code: &str) -> Result<CanvaTokens, CanvaClientError> {
        Err(Self::unconfigured())
    }

    fn authorize_url(&self, _state: &str) -> Result<String, CanvaClientError> {
        Err(Self::unconfigured())
    }
}
