//! Driving ports for reading and changing templates.

use async_trait::async_trait;

use crate::domain::{Error, Template, TemplateFilter, TemplateId, TemplateKey, TemplatePatch};
use crate::domain::template::defaults::TemplateDraft;

/// How a request addresses a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSelector {
    /// By identifier.
    Id(TemplateId),
    /// By client key.
    Key(TemplateKey),
}

/// Read-side template operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TemplatesQuery: Send + Sync {
    /// Templates matching `filter`, newest first.
    async fn list(&self, filter: TemplateFilter) -> Result<Vec<Template>, Error>;

    /// One template; 404-class error when missing.
    async fn get(&self, selector: &TemplateSelector) -> Result<Template, Error>;
}

/// Write-side template operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TemplatesCommand: Send + Sync {
    /// Create a template with type-specific defaults.
    async fn create(&self, draft: TemplateDraft) -> Result<Template, Error>;

    /// Merge `patch` into a template, replacing its design file when asked.
    async fn update(
        &self,
        selector: &TemplateSelector,
        patch: TemplatePatch,
    ) -> Result<Template, Error>;

    /// Delete a template and its files, returning what was deleted.
    async fn delete(&self, id: &TemplateId) -> Result<Template, Error>;

    /// Copy a template under a new id and key.
    async fn duplicate(&self, id: &TemplateId) -> Result<Template, Error>;

    /// Store a new thumbnail image and point the template at it.
    async fn replace_thumbnail(&self, id: &TemplateId, png: Vec<u8>) -> Result<Template, Error>;
}
