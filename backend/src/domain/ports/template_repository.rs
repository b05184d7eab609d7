//! Port abstraction for template persistence.
use async_trait::async_trait;

use crate::domain::{Template, TemplateFilter, TemplateId, TemplateKey};

use super::{NO_DATABASE, define_port_error};

define_port_error! {
    /// Persistence errors raised by template repository adapters.
    pub enum TemplatePersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "template repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "template repository query failed: {message}",
        /// The template key is already used by another template.
        DuplicateKey { key: String } => "template key {key} already exists",
        /// A stored row could not be turned back into a template.
        Corrupt { message: String } => "stored template is invalid: {message}",
    }
}

/// Template storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TemplateRepository: Send + Sync {
    /// Templates matching `filter`, newest first.
    async fn list(&self, filter: &TemplateFilter)
    -> Result<Vec<Template>, TemplatePersistenceError>;

    /// Fetch by identifier.
    async fn find_by_id(&self, id: &TemplateId)
    -> Result<Option<Template>, TemplatePersistenceError>;

    /// Fetch by client key.
    async fn find_by_key(
        &self,
        key: &TemplateKey,
    ) -> Result<Option<Template>, TemplatePersistenceError>;

    /// Insert a new template.
    async fn insert(&self, template: &Template) -> Result<(), TemplatePersistenceError>;

    /// Overwrite a template. Returns `false` when it does not exist.
    async fn update(&self, template: &Template) -> Result<bool, TemplatePersistenceError>;

    /// Remove a template. Returns `false` when it does not exist.
    async fn delete(&self, id: &TemplateId) -> Result<bool, TemplatePersistenceError>;

    /// Every non-empty `designFilename` currently referenced.
    async fn referenced_design_files(&self) -> Result<Vec<String>, TemplatePersistenceError>;
}

/// Repository with no templates; writes fail as connection errors.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTemplateRepository;

#[async_trait]
impl TemplateRepository for FixtureTemplateRepository {
    async fn list(
        &self,
        _filter: &TemplateFilter,
    ) -> Result<Vec<Template>, TemplatePersistenceError> {
        Ok(Vec::new())
    }

    async fn find_by_id(
        &self,
        _id: &TemplateId,
    ) -> Result<Option<Template>, TemplatePersistenceError> {
        Ok(None)
    }

    async fn find_by_key(
        &self,
        _key: &TemplateKey,
    ) -> Result<Option<Template>, TemplatePersistenceError> {
        Ok(None)
    }

    async fn insert(&self, _template: &Template) -> Result<(), TemplatePersistenceError> {
        Err(TemplatePersistenceError::connection(NO_DATABASE))
    }

    async fn update(&self, _template: &Template) -> Result<bool, TemplatePersistenceError> {
        Err(TemplatePersistenceError::connection(NO_DATABASE))
    }

    async fn delete(&self, _id: &TemplateId) -> Result<bool, TemplatePersistenceError> {
        Err(TemplatePersistenceError::connection(NO_DATABASE))
    }

    async fn referenced_design_files(&self) -> Result<Vec<String>, TemplatePersistenceError> {
        Ok(Vec::new())
    }
}
