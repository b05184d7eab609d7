//! Canva pass-through values and the plan gates in front of them.

use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::{Error, Plan};

/// Scopes requested when sending a user through Canva's consent screen.
pub const CANVA_SCOPES: &str = "designs:read designs:write brand_kit:read brand_kit:write";
/// Category requested when browsing Canva templates.
pub const CANVA_TEMPLATE_CATEGORY: &str = "real-estate";
/// Page size when browsing Canva templates.
pub const CANVA_TEMPLATE_LIMIT: u32 = 50;

/// Canva feature a user is trying to reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvaFeature {
    /// Creating designs or starting the OAuth flow.
    Designs,
    /// Exporting a design as PDF.
    PdfExport,
    /// Exporting a design in any other format.
    Export,
    /// Listing or applying brand kits.
    BrandKits,
    /// Browsing Canva templates.
    Templates,
}

impl CanvaFeature {
    /// Check `plan` against the feature, failing with a 403-class error.
    ///
    /// Only PDF is gated on export; every plan may export other formats.
    ///
    /// # Examples
    /// ```
    /// use studio_backend::domain::{CanvaFeature, Plan};
    ///
    /// assert!(CanvaFeature::Designs.authorize(Plan::Free).is_err());
    /// assert!(CanvaFeature::Export.authorize(Plan::Free).is_ok());
    /// assert!(CanvaFeature::PdfExport.authorize(Plan::Premium).is_err());
    /// assert!(CanvaFeature::PdfExport.authorize(Plan::UltraPremium).is_ok());
    /// ```
    pub fn authorize(self, plan: Plan) -> Result<(), Error> {
        let message = match self {
            Self::Export => return Ok(()),
            Self::PdfExport if plan.includes_pdf_export() => return Ok(()),
            Self::PdfExport => "PDF export requires Ultra-Premium plan",
            _ if plan.includes_canva() => return Ok(()),
            Self::Designs => "Canva access requires Premium or Ultra-Premium plan",
            Self::BrandKits => "Brand kit access requires Premium or Ultra-Premium plan",
            Self::Templates => "Template access requires Premium or Ultra-Premium plan",
        };
        Err(Error::forbidden(message))
    }
}

/// Export format as Canva expects it: lower-cased, otherwise unchecked.
///
/// # Examples
/// ```
/// use studio_backend::domain::{CanvaFeature, ExportFormat};
///
/// let format = ExportFormat::new(" PDF ");
/// assert_eq!(format.as_str(), "pdf");
/// assert_eq!(format.feature(), CanvaFeature::PdfExport);
/// assert_eq!(ExportFormat::new("Gif").feature(), CanvaFeature::Export);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ExportFormat(String);

impl ExportFormat {
    /// Normalise a caller-supplied format name.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    /// Name sent upstream.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Gate guarding an export in this format.
    #[must_use]
    pub fn feature(&self) -> CanvaFeature {
        if self.0 == "pdf" {
            CanvaFeature::PdfExport
        } else {
            CanvaFeature::Export
        }
    }
}

/// Design created in Canva from a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CanvaDesign {
    /// Canva design id.
    pub id: String,
    /// Template the design was created from.
    pub template_id: String,
    /// Upstream status.
    pub status: Option<String>,
    /// Editor URL.
    pub edit_url: Option<String>,
    /// Preview URL.
    pub preview_url: Option<String>,
}

/// Export job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CanvaExport {
    /// Export id.
    pub id: String,
    /// Upstream status.
    pub status: Option<String>,
    /// Download URL once ready.
    pub download_url: Option<String>,
    /// Expiry of the download URL.
    pub expires_at: Option<String>,
}

/// Template listed by Canva.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CanvaTemplate {
    /// Canva id.
    pub id: String,
    /// Name.
    pub name: Option<String>,
    /// Design type.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Thumbnail URL.
    pub thumbnail: Option<String>,
    /// Category.
    pub category: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Same as `id`; kept for the editor's lookup.
    pub canva_template_id: String,
}

/// Brand kit stored in the user's Canva account.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CanvaBrandKit {
    /// Canva id.
    pub id: String,
    /// Name.
    pub name: Option<String>,
    /// Logo URL.
    pub logo: Option<String>,
    /// Palette as returned by Canva.
    #[schema(value_type = Object)]
    pub colors: Value,
    /// Fonts as returned by Canva.
    #[schema(value_type = Object)]
    pub fonts: Value,
}

/// Tokens returned by the OAuth code exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CanvaTokens {
    /// Access token.
    pub access_token: String,
    /// Refresh token.
    pub refresh_token: Option<String>,
    /// Lifetime in seconds.
    pub expires_in: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(CanvaFeature::Designs, "Canva access requires Premium or Ultra-Premium plan")]
    #[case(CanvaFeature::PdfExport, "PDF export requires Ultra-Premium plan")]
    #[case(CanvaFeature::BrandKits, "Brand kit access requires Premium or Ultra-Premium plan")]
    #[case(CanvaFeature::Templates, "Template access requires Premium or Ultra-Premium plan")]
    fn free_plan_is_refused(#[case] feature: CanvaFeature, #[case] message: &str) {
        let err = feature.authorize(Plan::Free).expect_err("free plan is gated");
        assert_eq!(err.code(), ErrorCode::Forbidden);
        assert_eq!(err.message(), message);
    }

    #[rstest]
    #[case(Plan::Free)]
    #[case(Plan::Premium)]
    fn pdf_export_needs_ultra_premium(#[case] plan: Plan) {
        let err = CanvaFeature::PdfExport
            .authorize(plan)
            .expect_err("pdf gated");
        assert_eq!(err.message(), "PDF export requires Ultra-Premium plan");
    }

    #[rstest]
    #[case(Plan::Free, CanvaFeature::Export)]
    #[case(Plan::Premium, CanvaFeature::Templates)]
    #[case(Plan::Premium, CanvaFeature::Export)]
    #[case(Plan::UltraPremium, CanvaFeature::PdfExport)]
    #[case(Plan::UltraPremium, CanvaFeature::BrandKits)]
    fn allowed_features_pass(#[case] plan: Plan, #[case] feature: CanvaFeature) {
        assert!(feature.authorize(plan).is_ok());
    }

    #[rstest]
    #[case("PDF", "pdf", CanvaFeature::PdfExport)]
    #[case("pdf", "pdf", CanvaFeature::PdfExport)]
    #[case("PNG", "png", CanvaFeature::Export)]
    #[case("Mp4", "mp4", CanvaFeature::Export)]
    fn export_formats_are_lower_cased(
        #[case] raw: &str,
        #[case] sent: &str,
        #[case] feature: CanvaFeature,
    ) {
        let format = ExportFormat::new(raw);
        assert_eq!(format.as_str(), sent);
        assert_eq!(format.feature(), feature);
    }
}
