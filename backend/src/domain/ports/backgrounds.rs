//! Driving port for template backgrounds.

use async_trait::async_trait;

use crate::domain::{BackgroundId, Error, NewBackground, TemplateBackground, UserId};

/// Background use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Backgrounds: Send + Sync {
    /// Store a background, replacing any earlier one for the pair.
    async fn save(&self, background: NewBackground) -> Result<BackgroundId, Error>;

    /// Most recent live background for the pair.
    async fn latest(&self, template_ref: &str, user_id: &UserId)
    -> Result<TemplateBackground, Error>;

    /// Remove every background for the pair.
    async fn delete_for(&self, template_ref: &str, user_id: &UserId) -> Result<u64, Error>;

    /// Remove one background.
    async fn delete_by_id(&self, id: &BackgroundId) -> Result<(), Error>;
}
