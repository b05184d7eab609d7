//! Template services implementing the template query and command ports.
//!
//! Files attached to a template (design document, thumbnails) are removed
//! before the record changes. The two steps are independent: a failed file
//! removal is logged and never blocks the record update.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::asset::names;
use crate::domain::ports::{
    AssetStore, TemplateRepository, TemplateSelector, TemplatesCommand, TemplatesQuery,
};
use crate::domain::service_support::{map_asset_store_error, map_template_repository_error};
use crate::domain::template::defaults::duplicate;
use crate::domain::{
    AssetFilename, AssetKind, AssetLocation, DEFAULT_THUMBNAIL, Error, Template, TemplateDraft,
    TemplateFilter, TemplateId, TemplatePatch,
};

const TEMPLATE_NOT_FOUND: &str = "Template not found";

async fn find_template<R: TemplateRepository + ?Sized>(
    repo: &R,
    selector: &TemplateSelector,
) -> Result<Template, Error> {
    let found = match selector {
        TemplateSelector::Id(id) => repo.find_by_id(id).await,
        TemplateSelector::Key(key) => repo.find_by_key(key).await,
    }
    .map_err(map_template_repository_error)?;
    found.ok_or_else(|| Error::not_found(TEMPLATE_NOT_FOUND))
}

/// Template read service.
#[derive(Clone)]
pub struct TemplateQueryService<R> {
    repo: Arc<R>,
}

impl<R> TemplateQueryService<R> {
    /// Create the service.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R> TemplatesQuery for TemplateQueryService<R>
where
    R: TemplateRepository,
{
    async fn list(&self, filter: TemplateFilter) -> Result<Vec<Template>, Error> {
        self.repo
            .list(&filter)
            .await
            .map_err(map_template_repository_error)
    }

    async fn get(&self, selector: &TemplateSelector) -> Result<Template, Error> {
        find_template(self.repo.as_ref(), selector).await
    }
}

/// Template write service.
#[derive(Clone)]
pub struct TemplateCommandService<R, S> {
    repo: Arc<R>,
    assets: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<R, S> TemplateCommandService<R, S> {
    /// Create the service.
    pub fn new(repo: Arc<R>, assets: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repo,
            assets,
            clock,
        }
    }
}

impl<R, S> TemplateCommandService<R, S>
where
    R: TemplateRepository,
    S: AssetStore,
{
    async fn remove_quietly(&self, location: AssetLocation) {
        match self.assets.delete(&location).await {
            Ok(true) => info!(path = %location.public_path(), "removed template file"),
            Ok(false) => {}
            Err(err) => warn!(path = %location.public_path(), error = %err, "could not remove template file"),
        }
    }

    async fn remove_design(&self, filename: Option<&str>) {
        let Some(name) = filename.filter(|name| !name.is_empty()) else {
            return;
        };
        match AssetFilename::new(name) {
            Ok(filename) => {
                self.remove_quietly(AssetLocation::new(AssetKind::Designs, filename))
                    .await;
            }
            Err(_) => warn!(filename = name, "stored design filename is not a plain name"),
        }
    }

    async fn remove_thumbnail(&self, public_path: &str) {
        if public_path == DEFAULT_THUMBNAIL {
            return;
        }
        if let Some(location) = AssetLocation::from_public_path(public_path) {
            self.remove_quietly(location).await;
        }
    }

    async fn save(&self, template: &Template) -> Result<(), Error> {
        let updated = self
            .repo
            .update(template)
            .await
            .map_err(map_template_repository_error)?;
        if updated {
            Ok(())
        } else {
            Err(Error::not_found(TEMPLATE_NOT_FOUND))
        }
    }
}

#[async_trait]
impl<R, S> TemplatesCommand for TemplateCommandService<R, S>
where
    R: TemplateRepository,
    S: AssetStore,
{
    async fn create(&self, draft: TemplateDraft) -> Result<Template, Error> {
        let now = self.clock.utc();
        let template = {
            let mut rng = rand::thread_rng();
            draft.into_template(now, &mut rng)
        }
        .map_err(|err| Error::internal(err.to_string()))?;

        self.repo
            .insert(&template)
            .await
            .map_err(map_template_repository_error)?;
        info!(template_id = %template.id, template_type = %template.template_type, "template created");
        Ok(template)
    }

    async fn update(
        &self,
        selector: &TemplateSelector,
        patch: TemplatePatch,
    ) -> Result<Template, Error> {
        let existing = find_template(self.repo.as_ref(), selector).await?;
        if patch.replaces_design() && patch.design_filename != existing.design_filename {
            self.remove_design(existing.design_filename.as_deref()).await;
        }
        let template = patch.apply_to(existing, self.clock.utc());
        self.save(&template).await?;
        Ok(template)
    }

    async fn delete(&self, id: &TemplateId) -> Result<Template, Error> {
        let template = find_template(self.repo.as_ref(), &TemplateSelector::Id(*id)).await?;

        self.remove_design(template.design_filename.as_deref()).await;
        self.remove_thumbnail(&template.thumbnail).await;
        if let Some(name) = template.thumbnail_filename.as_deref() {
            if let Ok(filename) = AssetFilename::new(name) {
                self.remove_quietly(AssetLocation::new(AssetKind::Thumbnails, filename))
                    .await;
            }
        }

        let deleted = self
            .repo
            .delete(id)
            .await
            .map_err(map_template_repository_error)?;
        if !deleted {
            return Err(Error::not_found(TEMPLATE_NOT_FOUND));
        }
        info!(template_id = %id, "template deleted");
        Ok(template)
    }

    async fn duplicate(&self, id: &TemplateId) -> Result<Template, Error> {
        let source = find_template(self.repo.as_ref(), &TemplateSelector::Id(*id)).await?;
        let now = self.clock.utc();
        let copy = {
            let mut rng = rand::thread_rng();
            duplicate(&source, now, &mut rng)
        };
        self.repo
            .insert(&copy)
            .await
            .map_err(map_template_repository_error)?;
        Ok(copy)
    }

    async fn replace_thumbnail(&self, id: &TemplateId, png: Vec<u8>) -> Result<Template, Error> {
        let mut template = find_template(self.repo.as_ref(), &TemplateSelector::Id(*id)).await?;
        if png.is_empty() {
            return Err(Error::invalid_request("No thumbnail file uploaded"));
        }

        let now = self.clock.utc();
        let filename = {
            let mut rng = rand::thread_rng();
            names::template_thumbnail(now, &mut rng)
        }
        .map_err(|err| Error::internal(err.to_string()))?;
        let location = AssetLocation::new(AssetKind::Thumbnails, filename);

        self.remove_thumbnail(&template.thumbnail).await;
        self.assets
            .write(&location, &png)
            .await
            .map_err(map_asset_store_error)?;

        template.thumbnail = location.public_path();
        template.updated_at = now;
        self.save(&template).await?;
        Ok(template)
    }
}

#[cfg(test)]
#[path = "template_service_tests.rs"]
mod tests;
