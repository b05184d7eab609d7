//! Port abstraction for template background persistence.
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{BackgroundId, TemplateBackground, UserId};

use super::{NO_DATABASE, define_port_error};

define_port_error! {
    /// Persistence errors raised by background repository adapters.
    pub enum BackgroundPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "background repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "background repository query failed: {message}",
    }
}

/// Background storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BackgroundRepository: Send + Sync {
    /// Store `background`, first removing rows expired at `now` and any
    /// existing background for the same template and user.
    async fn replace(
        &self,
        background: &TemplateBackground,
        now: DateTime<Utc>,
    ) -> Result<(), BackgroundPersistenceError>;

    /// Most recent background for the pair that is still live at `now`.
    async fn latest(
        &self,
        template_ref: &str,
        user_id: &UserId,
        now: DateTime<Utc>,
    ) -> Result<Option<TemplateBackground>, BackgroundPersistenceError>;

    /// Remove every background for the pair, returning how many went.
    async fn delete_for(
        &self,
        template_ref: &str,
        user_id: &UserId,
    ) -> Result<u64, BackgroundPersistenceError>;

    /// Remove one background. Returns `false` when it does not exist.
    async fn delete_by_id(&self, id: &BackgroundId) -> Result<bool, BackgroundPersistenceError>;
}

/// Repository with no backgrounds; writes fail as connection errors.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureBackgroundRepository;

#[async_trait]
impl BackgroundRepository for FixtureBackgroundRepository {
    async fn replace(
        &self,
        _background: &TemplateBackground,
        _now: DateTime<Utc>,
    ) -> Result<(), BackgroundPersistenceError> {
        Err(BackgroundPersistenceError::connection(NO_DATABASE))
    }

    async fn latest(
        &self,
        _template_ref: &str,
        _user_id: &UserId,
        _now: DateTime<Utc>,
    ) -> Result<Option<TemplateBackground>, BackgroundPersistenceError> {
        Ok(None)
    }

    async fn delete_for(
        &self,
        _template_ref: &str,
        _user_id: &UserId,
    ) -> Result<u64, BackgroundPersistenceError> {
        Err(BackgroundPersistenceError::connection(NO_DATABASE))
    }

    async fn delete_by_id(&self, _id: &BackgroundId) -> Result<bool, BackgroundPersistenceError> {
        Err(BackgroundPersistenceError::connection(NO_DATABASE))
    }
}
