//! Port abstraction for the uploaded-file store.
use async_trait::async_trait;

use crate::domain::{AssetKind, AssetLocation, StoredAsset};

use super::define_port_error;

define_port_error! {
    /// Errors raised by asset store adapters.
    pub enum AssetStoreError {
        /// The store root could not be opened.
        Unavailable { message: String } => "asset store unavailable: {message}",
        /// A read, write or delete failed.
        Io { message: String } => "asset store i/o failed: {message}",
    }
}

/// Byte storage addressed by [`AssetLocation`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Write `bytes`, replacing any existing file. Returns the byte count.
    async fn write(&self, location: &AssetLocation, bytes: &[u8]) -> Result<u64, AssetStoreError>;

    /// Read a file, or `None` when it does not exist.
    async fn read(&self, location: &AssetLocation) -> Result<Option<Vec<u8>>, AssetStoreError>;

    /// Delete a file. Returns `false` when it did not exist.
    async fn delete(&self, location: &AssetLocation) -> Result<bool, AssetStoreError>;

    /// Metadata for every file in an area.
    async fn list(&self, kind: AssetKind) -> Result<Vec<StoredAsset>, AssetStoreError>;
}

/// Store that accepts writes and holds nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAssetStore;

#[async_trait]
impl AssetStore for FixtureAssetStore {
    async fn write(&self, _location: &AssetLocation, bytes: &[u8]) -> Result<u64, AssetStoreError> {
        Ok(bytes.len() as u64)
    }

    async fn read(&self, _location: &AssetLocation) -> Result<Option<Vec<u8>>, AssetStoreError> {
        Ok(None)
    }

    async fn delete(&self, _location: &AssetLocation) -> Result<bool, AssetStoreError> {
        Ok(false)
    }

    async fn list(&self, _kind: AssetKind) -> Result<Vec<StoredAsset>, AssetStoreError> {
        Ok(Vec::new())
    }
}
