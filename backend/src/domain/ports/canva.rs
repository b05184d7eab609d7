//! Driving port for Canva pass-through operations.

use async_trait::async_trait;

use crate::domain::{
    CanvaBrandKit, CanvaDesign, CanvaExport, CanvaTemplate, CanvaTokens, Error, ExportFormat,
    SessionClaims,
};

/// Canva use-cases, gated by the caller's plan.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CanvaService: Send + Sync {
    /// Create a design from a Canva template.
    async fn create_design(
        &self,
        caller: &SessionClaims,
        template_id: &str,
    ) -> Result<CanvaDesign, Error>;

    /// Export a design.
    async fn export_design(
        &self,
        caller: &SessionClaims,
        design_id: &str,
        format: ExportFormat,
    ) -> Result<CanvaExport, Error>;

    /// Apply a Canva brand kit to a design.
    async fn apply_brand_kit(
        &self,
        caller: &SessionClaims,
        design_id: &str,
        brand_kit_id: &str,
    ) -> Result<(), Error>;

    /// Browse Canva templates.
    async fn templates(&self, caller: &SessionClaims) -> Result<Vec<CanvaTemplate>, Error>;

    /// List Canva brand kits.
    async fn brand_kits(&self, caller: &SessionClaims) -> Result<Vec<CanvaBrandKit>, Error>;

    /// Finish the OAuth flow.
    async fn complete_authorization(&self, code: &str, state: &str) -> Result<CanvaTokens, Error>;

    /// Consent-screen URL for the caller.
    fn authorization_url(&self, caller: &SessionClaims) -> Result<String, Error>;
}
