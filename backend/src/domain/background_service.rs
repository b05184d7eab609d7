//! Background service implementing the [`Backgrounds`] driving port.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{BackgroundRepository, Backgrounds, TemplateRepository, UserRepository};
use crate::domain::service_support::{
    map_background_repository_error, map_template_repository_error, map_user_repository_error,
};
use crate::domain::{BackgroundId, Error, NewBackground, TemplateBackground, TemplateId, UserId};

const BACKGROUND_NOT_FOUND: &str = "Template background not found";

/// Background use-cases over the background, template and user stores.
#[derive(Clone)]
pub struct BackgroundService<B, T, U> {
    backgrounds: Arc<B>,
    templates: Arc<T>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<B, T, U> BackgroundService<B, T, U> {
    /// Create the service.
    pub fn new(
        backgrounds: Arc<B>,
        templates: Arc<T>,
        users: Arc<U>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            backgrounds,
            templates,
            users,
            clock,
        }
    }
}

impl<B, T, U> BackgroundService<B, T, U>
where
    B: BackgroundRepository,
    T: TemplateRepository,
    U: UserRepository,
{
    /// Template keys are not checked: the editor saves backgrounds for
    /// templates that only exist client-side.
    async fn ensure_template(&self, template_ref: &str) -> Result<(), Error> {
        let Ok(id) = TemplateId::new(template_ref) else {
            return Ok(());
        };
        self.templates
            .find_by_id(&id)
            .await
            .map_err(map_template_repository_error)?
            .map(|_| ())
            .ok_or_else(|| Error::not_found("Template not found"))
    }

    async fn ensure_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(map_user_repository_error)?
            .map(|_| ())
            .ok_or_else(|| Error::not_found("User not found"))
    }
}

#[async_trait]
impl<B, T, U> Backgrounds for BackgroundService<B, T, U>
where
    B: BackgroundRepository,
    T: TemplateRepository,
    U: UserRepository,
{
    async fn save(&self, background: NewBackground) -> Result<BackgroundId, Error> {
        self.ensure_template(background.template_ref()).await?;
        self.ensure_user(&background.user_id()).await?;

        let now = self.clock.utc();
        let stored = background.into_background(now);
        self.backgrounds
            .replace(&stored, now)
            .await
            .map_err(map_background_repository_error)?;
        info!(
            background_id = %stored.id,
            template_ref = %stored.template_ref,
            user_id = %stored.user_id,
            "template background saved"
        );
        Ok(stored.id)
    }

    async fn latest(
        &self,
        template_ref: &str,
        user_id: &UserId,
    ) -> Result<TemplateBackground, Error> {
        let now = self.clock.utc();
        self.backgrounds
            .latest(template_ref, user_id, now)
            .await
            .map_err(map_background_repository_error)?
            .filter(|background| !background.is_expired(now))
            .ok_or_else(|| Error::not_found(BACKGROUND_NOT_FOUND))
    }

    async fn delete_for(&self, template_ref: &str, user_id: &UserId) -> Result<u64, Error> {
        let removed = self
            .backgrounds
            .delete_for(template_ref, user_id)
            .await
            .map_err(map_background_repository_error)?;
        info!(template_ref, user_id = %user_id, removed, "template backgrounds deleted");
        Ok(removed)
    }

    async fn delete_by_id(&self, id: &BackgroundId) -> Result<(), Error> {
        let deleted = self
            .backgrounds
            .delete_by_id(id)
            .await
            .map_err(map_background_repository_error)?;
        if deleted {
            Ok(())
        } else {
            Err(Error::not_found(BACKGROUND_NOT_FOUND))
        }
    }
}
