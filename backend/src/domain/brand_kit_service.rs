//! Brand kit service implementing the [`BrandKits`] driving port.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{BrandKitRepository, BrandKitView, BrandKits};
use crate::domain::service_support::map_brand_kit_repository_error;
use crate::domain::{BrandKit, BrandKitPatch, BrandKitValidationError, BrandLogo, Error, UserId};

impl From<BrandKitValidationError> for Error {
    fn from(err: BrandKitValidationError) -> Self {
        let details = match &err {
            BrandKitValidationError::InvalidColor { slot } => json!({ "field": slot.field() }),
            BrandKitValidationError::EmptyFontName { index } => {
                json!({ "field": "fonts", "index": index })
            }
            BrandKitValidationError::EmptyElementName { index }
            | BrandKitValidationError::EmptyElementData { index } => {
                json!({ "field": "customElements", "index": index })
            }
        };
        Error::invalid_request(err.to_string()).with_details(details)
    }
}

/// Brand kit use-cases over a repository holding one kit per user.
#[derive(Clone)]
pub struct BrandKitService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> BrandKitService<R> {
    /// Create the service.
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

impl<R: BrandKitRepository> BrandKitService<R> {
    async fn stored(&self, user_id: &UserId) -> Result<Option<BrandKit>, Error> {
        self.repo
            .find_by_user(user_id)
            .await
            .map_err(map_brand_kit_repository_error)
    }
}

#[async_trait]
impl<R> BrandKits for BrandKitService<R>
where
    R: BrandKitRepository,
{
    async fn get(&self, user_id: &UserId) -> Result<BrandKitView, Error> {
        match self.stored(user_id).await? {
            Some(kit) => Ok(BrandKitView {
                kit,
                persisted: true,
            }),
            None => {
                debug!(user_id = %user_id, "serving default brand kit");
                Ok(BrandKitView {
                    kit: BrandKit::with_defaults(*user_id, self.clock.utc()),
                    persisted: false,
                })
            }
        }
    }

    async fn update(&self, user_id: &UserId, patch: BrandKitPatch) -> Result<BrandKit, Error> {
        patch.validate()?;
        let now = self.clock.utc();
        let current = self
            .stored(user_id)
            .await?
            .unwrap_or_else(|| BrandKit::with_defaults(*user_id, now));
        let kit = patch.apply_to(current, now);
        self.repo
            .upsert(&kit)
            .await
            .map_err(map_brand_kit_repository_error)?;
        info!(user_id = %user_id, brand_kit_id = %kit.id, "brand kit saved");
        Ok(kit)
    }

    async fn delete(&self, user_id: &UserId) -> Result<(), Error> {
        let removed = self
            .repo
            .delete_by_user(user_id)
            .await
            .map_err(map_brand_kit_repository_error)?;
        info!(user_id = %user_id, removed, "brand kit deleted");
        Ok(())
    }

    async fn logo(&self, user_id: &UserId) -> Result<Option<BrandLogo>, Error> {
        Ok(self.stored(user_id).await?.and_then(|kit| kit.logo))
    }
}
