//! Canva pass-through service implementing the [`CanvaService`] driving port.
//!
//! Plan gates run before the token lookup so a Free caller never causes an
//! outbound request. Upstream failures are terminal: they are logged with
//! their class and surfaced as an internal error naming the operation.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::domain::ports::{CanvaClient, CanvaClientError, CanvaService, CanvaTokenProvider};
use crate::domain::service_support::map_canva_token_error;
use crate::domain::{
    CanvaBrandKit, CanvaDesign, CanvaExport, CanvaFeature, CanvaTemplate, CanvaTokens, Error,
    ExportFormat, SessionClaims,
};

fn upstream_failure(operation: &'static str, err: CanvaClientError) -> Error {
    match &err {
        CanvaClientError::RateLimited { .. } | CanvaClientError::Timeout { .. } => {
            warn!(operation, class = err.class(), error = %err, "canva call failed");
        }
        _ => error!(operation, class = err.class(), error = %err, "canva call failed"),
    }
    Error::internal(operation)
}

/// Canva use-cases over an HTTP client and a per-user token source.
#[derive(Clone)]
pub struct CanvaPassThroughService<C, P> {
    client: Arc<C>,
    tokens: Arc<P>,
}

impl<C, P> CanvaPassThroughService<C, P> {
    /// Create the service.
    pub fn new(client: Arc<C>, tokens: Arc<P>) -> Self {
        Self { client, tokens }
    }
}

impl<C, P> CanvaPassThroughService<C, P>
where
    C: CanvaClient,
    P: CanvaTokenProvider,
{
    async fn token_for(
        &self,
        caller: &SessionClaims,
        feature: CanvaFeature,
    ) -> Result<String, Error> {
        feature.authorize(caller.plan)?;
        self.tokens
            .access_token(&caller.user_id)
            .await
            .map_err(map_canva_token_error)
    }
}

#[async_trait]
impl<C, P> CanvaService for CanvaPassThroughService<C, P>
where
    C: CanvaClient,
    P: CanvaTokenProvider,
{
    async fn create_design(
        &self,
        caller: &SessionClaims,
        template_id: &str,
    ) -> Result<CanvaDesign, Error> {
        let token = self.token_for(caller, CanvaFeature::Designs).await?;
        let design = self
            .client
            .create_design(&token, template_id)
            .await
            .map_err(|err| upstream_failure("Failed to create design", err))?;
        info!(user_id = %caller.user_id, design_id = %design.id, "canva design created");
        Ok(design)
    }

    async fn export_design(
        &self,
        caller: &SessionClaims,
        design_id: &str,
        format: ExportFormat,
    ) -> Result<CanvaExport, Error> {
        let token = self.token_for(caller, format.feature()).await?;
        self.client
            .export_design(&token, design_id, &format)
            .await
            .map_err(|err| upstream_failure("Failed to export design", err))
    }

    async fn apply_brand_kit(
        &self,
        caller: &SessionClaims,
        design_id: &str,
        brand_kit_id: &str,
    ) -> Result<(), Error> {
        let token = self.token_for(caller, CanvaFeature::BrandKits).await?;
        self.client
            .apply_brand_kit(&token, design_id, brand_kit_id)
            .await
            .map_err(|err| upstream_failure("Failed to apply brand kit", err))
    }

    async fn templates(&self, caller: &SessionClaims) -> Result<Vec<CanvaTemplate>, Error> {
        let token = self.token_for(caller, CanvaFeature::Templates).await?;
        self.client
            .list_templates(&token)
            .await
            .map_err(|err| upstream_failure("Failed to fetch templates", err))
    }

    async fn brand_kits(&self, caller: &SessionClaims) -> Result<Vec<CanvaBrandKit>, Error> {
        let token = self.token_for(caller, CanvaFeature::BrandKits).await?;
        self.client
            .list_brand_kits(&token)
            .await
            .map_err(|err| upstream_failure("Failed to fetch brand kits", err))
    }

    async fn complete_authorization(&self, code: &str, state: &str) -> Result<CanvaTokens, Error> {
        if code.trim().is_empty() {
            return Err(Error::invalid_request("Authorization code is required"));
        }
        let tokens = self
            .client
            .exchange_code(code)
            .await
            .map_err(|err| upstream_failure("Failed to complete authentication", err))?;
        info!(state, "canva authorization completed");
        Ok(tokens)
    }

    fn authorization_url(&self, caller: &SessionClaims) -> Result<String, Error> {
        CanvaFeature::Designs.authorize(caller.plan)?;
        self.client
            .authorize_url(&caller.user_id.to_string())
            .map_err(|err| upstream_failure("Failed to build Canva authorization URL", err))
    }
}
