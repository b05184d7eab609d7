//! Canva wire shapes.
//!
//! Responses decode into these snake_case DTOs and are mapped into domain
//! values in one pass; unknown fields are ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{CanvaBrandKit, CanvaDesign, CanvaExport, CanvaTemplate, CanvaTokens};

#[derive(Debug, Serialize)]
pub(super) struct CreateDesignRequest<'a> {
    pub(super) template_id: &'a str,
    pub(super) brand_kit_id: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub(super) struct ExportRequest<'a> {
    pub(super) format: &'a str,
    pub(super) quality: &'a str,
    pub(super) size: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct ApplyBrandKitRequest<'a> {
    pub(super) brand_kit_id: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct TokenRequest<'a> {
    pub(super) grant_type: &'a str,
    pub(super) client_id: &'a str,
    pub(super) client_secret: &'a str,
    pub(super) code: &'a str,
    pub(super) redirect_uri: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct DesignDto {
    id: String,
    status: Option<String>,
    edit_url: Option<String>,
    preview_url: Option<String>,
}

impl DesignDto {
    pub(super) fn into_domain(self, template_id: &str) -> CanvaDesign {
        CanvaDesign {
            id: self.id,
            template_id: template_id.to_owned(),
            status: self.status,
            edit_url: self.edit_url,
            preview_url: self.preview_url,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ExportDto {
    id: String,
    status: Option<String>,
    download_url: Option<String>,
    expires_at: Option<String>,
}

impl From<ExportDto> for CanvaExport {
    fn from(dto: ExportDto) -> Self {
        Self {
            id: dto.id,
            status: dto.status,
            download_url: dto.download_url,
            expires_at: dto.expires_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct TemplatesDto {
    #[serde(default)]
    pub(super) templates: Vec<TemplateDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TemplateDto {
    id: String,
    name: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    thumbnail_url: Option<String>,
    category: Option<String>,
    description: Option<String>,
}

impl From<TemplateDto> for CanvaTemplate {
    fn from(dto: TemplateDto) -> Self {
        Self {
            canva_template_id: dto.id.clone(),
            id: dto.id,
            name: dto.name,
            kind: dto.kind,
            thumbnail: dto.thumbnail_url,
            category: dto.category,
            description: dto.description,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct BrandKitsDto {
    #[serde(default)]
    pub(super) brand_kits: Vec<BrandKitDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct BrandKitDto {
    id: String,
    name: Option<String>,
    logo_url: Option<String>,
    #[serde(default)]
    colors: Value,
    #[serde(default)]
    fonts: Value,
}

impl From<BrandKitDto> for CanvaBrandKit {
    fn from(dto: BrandKitDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            logo: dto.logo_url,
            colors: dto.colors,
            fonts: dto.fonts,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct TokenDto {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<u64>,
}

impl From<TokenDto> for CanvaTokens {
    fn from(dto: TokenDto) -> Self {
        Self {
            access_token: dto.access_token,
            refresh_token: dto.refresh_token,
            expires_in: dto.expires_in,
        }
    }
}
