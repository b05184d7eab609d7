//! Driving port for design documents, thumbnails and general uploads.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{AssetFilename, AssetLocation, Error, StoredAsset, TemplateId};

/// Files currently stored, grouped by area.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetInventory {
    /// General documents.
    pub files: Vec<StoredAsset>,
    /// Images.
    pub images: Vec<StoredAsset>,
    /// Saved designs.
    pub designs: Vec<StoredAsset>,
}

impl AssetInventory {
    /// Number of files across all areas.
    #[must_use]
    pub fn total(&self) -> usize {
        self.files.len() + self.images.len() + self.designs.len()
    }
}

/// Naming scheme for a saved design.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesignVariant {
    /// `design-<ms>-<rand>.json`.
    Standard,
    /// `design-large-<ms>-<rand>.json`.
    Large,
}

impl DesignVariant {
    /// Filename prefix.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Standard => "design",
            Self::Large => "design-large",
        }
    }
}

/// A file that was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFile {
    /// Stored name.
    pub filename: AssetFilename,
    /// Bytes written.
    pub size: u64,
}

/// Thumbnail rendered by the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailUpload {
    /// Template id or key used in the filename.
    pub template_ref: String,
    /// Template to link the thumbnail to, when addressed by id.
    pub template_id: Option<TemplateId>,
    /// PNG bytes.
    pub png: Vec<u8>,
}

/// A file submitted for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// Name on the client.
    pub original_name: Option<AssetFilename>,
    /// Declared mime type.
    pub content_type: Option<String>,
    /// Decoded content.
    pub bytes: Vec<u8>,
}

/// A stored upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedAsset {
    /// Stored name.
    pub filename: AssetFilename,
    /// Name on the client.
    pub original_name: Option<String>,
    /// Bytes written.
    pub size: u64,
    /// Mime type.
    pub mimetype: String,
    /// Public path.
    pub path: String,
}

/// Outcome of removing unreferenced design files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// Names of removed files.
    pub removed: Vec<String>,
}

/// Design-file and upload use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DesignFiles: Send + Sync {
    /// Inventory of the files, images and designs areas.
    async fn list_files(&self) -> Result<AssetInventory, Error>;

    /// Parsed design document.
    async fn read_design(&self, filename: &AssetFilename) -> Result<Value, Error>;

    /// Write a design document as pretty JSON.
    async fn save_design(
        &self,
        design: Value,
        filename: Option<AssetFilename>,
        variant: DesignVariant,
    ) -> Result<SavedFile, Error>;

    /// Store an editor-rendered thumbnail.
    async fn save_thumbnail(&self, upload: ThumbnailUpload) -> Result<AssetFilename, Error>;

    /// Raw thumbnail bytes.
    async fn read_thumbnail(&self, filename: &AssetFilename) -> Result<Vec<u8>, Error>;

    /// Store a general document.
    async fn upload_document(&self, file: UploadFile) -> Result<UploadedAsset, Error>;

    /// Store an image.
    async fn upload_image(&self, file: UploadFile) -> Result<UploadedAsset, Error>;

    /// Store several documents at once.
    async fn upload_documents(&self, files: Vec<UploadFile>) -> Result<Vec<UploadedAsset>, Error>;

    /// Remove design files no template references.
    async fn cleanup_orphaned_designs(&self) -> Result<CleanupReport, Error>;

    /// Delete one stored file.
    async fn delete_file(&self, location: &AssetLocation) -> Result<(), Error>;
}
