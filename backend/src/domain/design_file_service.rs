//! Design documents, thumbnails and general uploads.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::Value;
use tracing::{info, warn};

use crate::domain::asset::names;
use crate::domain::ports::{
    AssetInventory, AssetStore, CleanupReport, DesignFiles, DesignVariant, SavedFile,
    TemplateRepository, ThumbnailUpload, UploadFile, UploadedAsset,
};
use crate::domain::service_support::{map_asset_store_error, map_template_repository_error};
use crate::domain::{
    AssetFilename, AssetKind, AssetLocation, AssetValidationError, Error, MAX_FILES_PER_UPLOAD,
    StoredAsset, TemplateId, ensure_document_allowed, ensure_image,
};

const OCTET_STREAM: &str = "application/octet-stream";

fn invalid(err: AssetValidationError) -> Error {
    Error::invalid_request(err.to_string())
}

/// File use-cases over an asset store, with template lookups for linking
/// thumbnails and finding orphaned designs.
#[derive(Clone)]
pub struct DesignFileService<R, S> {
    templates: Arc<R>,
    assets: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<R, S> DesignFileService<R, S> {
    /// Create the service.
    pub fn new(templates: Arc<R>, assets: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            templates,
            assets,
            clock,
        }
    }
}

/// A document upload that passed validation and has its stored name.
struct StagedDocument {
    location: AssetLocation,
    original: AssetFilename,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

impl<R, S> DesignFileService<R, S>
where
    R: TemplateRepository,
    S: AssetStore,
{
    fn stage_document(&self, file: UploadFile) -> Result<StagedDocument, Error> {
        let original = match file.original_name {
            Some(name) if !file.bytes.is_empty() => name,
            _ => return Err(Error::invalid_request("No file uploaded")),
        };
        ensure_document_allowed(&original).map_err(invalid)?;
        let filename = names::document(&original, self.clock.utc()).map_err(invalid)?;
        Ok(StagedDocument {
            location: AssetLocation::new(AssetKind::Files, filename),
            original,
            content_type: file.content_type,
            bytes: file.bytes,
        })
    }

    async fn store_document(&self, staged: StagedDocument) -> Result<UploadedAsset, Error> {
        let StagedDocument {
            location,
            original,
            content_type,
            bytes,
        } = staged;
        let size = self.store(&location, &bytes).await?;
        Ok(UploadedAsset {
            path: location.public_path(),
            filename: location.filename,
            original_name: Some(original.to_string()),
            size,
            mimetype: content_type.unwrap_or_else(|| OCTET_STREAM.to_owned()),
        })
    }

    async fn list(&self, kind: AssetKind) -> Result<Vec<StoredAsset>, Error> {
        self.assets.list(kind).await.map_err(map_asset_store_error)
    }

    async fn store(&self, location: &AssetLocation, bytes: &[u8]) -> Result<u64, Error> {
        self.assets
            .write(location, bytes)
            .await
            .map_err(map_asset_store_error)
    }

    async fn try_link_thumbnail(
        &self,
        template_id: &TemplateId,
        filename: &AssetFilename,
    ) -> Result<bool, Error> {
        let Some(mut template) = self
            .templates
            .find_by_id(template_id)
            .await
            .map_err(map_template_repository_error)?
        else {
            return Ok(false);
        };
        template.thumbnail_filename = Some(filename.to_string());
        template.updated_at = self.clock.utc();
        self.templates
            .update(&template)
            .await
            .map_err(map_template_repository_error)
    }

    async fn link_thumbnail(&self, template_id: &TemplateId, filename: &AssetFilename) {
        let outcome = self.try_link_thumbnail(template_id, filename).await;
        match outcome {
            Ok(true) => info!(template_id = %template_id, %filename, "thumbnail linked to template"),
            Ok(false) => warn!(template_id = %template_id, "thumbnail saved for unknown template"),
            Err(err) => warn!(template_id = %template_id, error = %err, "could not link thumbnail"),
        }
    }
}

#[async_trait]
impl<R, S> DesignFiles for DesignFileService<R, S>
where
    R: TemplateRepository,
    S: AssetStore,
{
    async fn list_files(&self) -> Result<AssetInventory, Error> {
        Ok(AssetInventory {
            files: self.list(AssetKind::Files).await?,
            images: self.list(AssetKind::Images).await?,
            designs: self.list(AssetKind::Designs).await?,
        })
    }

    async fn read_design(&self, filename: &AssetFilename) -> Result<Value, Error> {
        let location = AssetLocation::new(AssetKind::Designs, filename.clone());
        let bytes = self
            .assets
            .read(&location)
            .await
            .map_err(map_asset_store_error)?
            .ok_or_else(|| Error::not_found("Design file not found"))?;
        serde_json::from_slice(&bytes)
            .map_err(|err| Error::internal(format!("design file {filename} is not JSON: {err}")))
    }

    async fn save_design(
        &self,
        design: Value,
        filename: Option<AssetFilename>,
        variant: DesignVariant,
    ) -> Result<SavedFile, Error> {
        if design.is_null() {
            let message = match variant {
                DesignVariant::Standard => "No design data provided (file or JSON)",
                DesignVariant::Large => "No design data provided",
            };
            return Err(Error::invalid_request(message));
        }
        let filename = match filename {
            Some(name) => name,
            None => {
                let now = self.clock.utc();
                let mut rng = rand::thread_rng();
                names::design(variant.prefix(), now, &mut rng).map_err(invalid)?
            }
        };
        let bytes = serde_json::to_vec_pretty(&design)
            .map_err(|err| Error::internal(format!("failed to encode design: {err}")))?;
        let location = AssetLocation::new(AssetKind::Designs, filename);
        let size = self.store(&location, &bytes).await?;
        info!(filename = %location.filename, size, "design saved");
        Ok(SavedFile {
            filename: location.filename,
            size,
        })
    }

    async fn save_thumbnail(&self, upload: ThumbnailUpload) -> Result<AssetFilename, Error> {
        if upload.png.is_empty() {
            return Err(Error::invalid_request("No thumbnail data provided"));
        }
        let filename =
            names::editor_thumbnail(&upload.template_ref, self.clock.utc()).map_err(invalid)?;
        let location = AssetLocation::new(AssetKind::Thumbnails, filename);
        self.store(&location, &upload.png).await?;
        if let Some(template_id) = upload.template_id.as_ref() {
            self.link_thumbnail(template_id, &location.filename).await;
        }
        Ok(location.filename)
    }

    async fn read_thumbnail(&self, filename: &AssetFilename) -> Result<Vec<u8>, Error> {
        let location = AssetLocation::new(AssetKind::Thumbnails, filename.clone());
        self.assets
            .read(&location)
            .await
            .map_err(map_asset_store_error)?
            .ok_or_else(|| Error::not_found("Thumbnail not found"))
    }

    async fn upload_document(&self, file: UploadFile) -> Result<UploadedAsset, Error> {
        let staged = self.stage_document(file)?;
        self.store_document(staged).await
    }

    async fn upload_image(&self, file: UploadFile) -> Result<UploadedAsset, Error> {
        if file.bytes.is_empty() {
            return Err(Error::invalid_request("No image uploaded"));
        }
        let mime = ensure_image(file.content_type.as_deref()).map_err(invalid)?;
        let filename = {
            let now = self.clock.utc();
            let mut rng = rand::thread_rng();
            names::image(file.original_name.as_ref(), now, &mut rng)
        }
        .map_err(invalid)?;
        let location = AssetLocation::new(AssetKind::Images, filename);
        let size = self.store(&location, &file.bytes).await?;
        Ok(UploadedAsset {
            path: location.public_path(),
            filename: location.filename,
            original_name: file.original_name.map(|name| name.to_string()),
            size,
            mimetype: mime.essence_str().to_owned(),
        })
    }

    async fn upload_documents(&self, files: Vec<UploadFile>) -> Result<Vec<UploadedAsset>, Error> {
        if files.is_empty() {
            return Err(Error::invalid_request("No files uploaded"));
        }
        if files.len() > MAX_FILES_PER_UPLOAD {
            return Err(Error::invalid_request("Too many files"));
        }
        let staged = files
            .into_iter()
            .map(|file| self.stage_document(file))
            .collect::<Result<Vec<_>, _>>()?;
        let mut uploaded = Vec::with_capacity(staged.len());
        for document in staged {
            uploaded.push(self.store_document(document).await?);
        }
        Ok(uploaded)
    }

    async fn cleanup_orphaned_designs(&self) -> Result<CleanupReport, Error> {
        let referenced: HashSet<String> = self
            .templates
            .referenced_design_files()
            .await
            .map_err(map_template_repository_error)?
            .into_iter()
            .collect();

        let mut report = CleanupReport::default();
        for asset in self.list(AssetKind::Designs).await? {
            if referenced.contains(asset.filename.as_ref()) {
                continue;
            }
            let location = AssetLocation::new(AssetKind::Designs, asset.filename);
            match self.assets.delete(&location).await {
                Ok(true) => report.removed.push(location.filename.to_string()),
                Ok(false) => {}
                Err(err) => warn!(filename = %location.filename, error = %err, "could not remove orphaned design"),
            }
        }
        info!(removed = report.removed.len(), "orphaned design cleanup finished");
        Ok(report)
    }

    async fn delete_file(&self, location: &AssetLocation) -> Result<(), Error> {
        let deleted = self
            .assets
            .delete(location)
            .await
            .map_err(map_asset_store_error)?;
        if deleted {
            Ok(())
        } else {
            Err(Error::not_found("File not found"))
        }
    }
}

#[cfg(test)]
#[path = "design_file_service_tests.rs"]
mod tests;
