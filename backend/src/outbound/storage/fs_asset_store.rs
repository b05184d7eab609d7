//! `AssetStore` backed by a directory tree opened through `cap_std`.
//!
//! The uploads root is opened once; every operation is relative to it so a
//! filename can never reach outside its area. Blocking filesystem calls run
//! on tokio's blocking pool.

use std::io;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use cap_std::{ambient_authority, fs::Dir};
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::ports::{AssetStore, AssetStoreError};
use crate::domain::{AssetFilename, AssetKind, AssetLocation, StoredAsset};

const AREAS: [AssetKind; 4] = [
    AssetKind::Files,
    AssetKind::Images,
    AssetKind::Designs,
    AssetKind::Thumbnails,
];

/// Asset store rooted at the configured uploads directory.
#[derive(Clone)]
pub struct FsAssetStore {
    root: Arc<Dir>,
}

impl FsAssetStore {
    /// Open `root`, creating it and every area directory when missing.
    ///
    /// # Errors
    ///
    /// Returns [`AssetStoreError::Unavailable`] when the tree cannot be
    /// created or opened.
    pub fn open(root: &Path) -> Result<Self, AssetStoreError> {
        let unavailable =
            |error: io::Error| AssetStoreError::unavailable(format!("{}: {error}", root.display()));
        Dir::create_ambient_dir_all(root, ambient_authority()).map_err(unavailable)?;
        let dir = Dir::open_ambient_dir(root, ambient_authority()).map_err(unavailable)?;
        for kind in AREAS {
            dir.create_dir_all(kind.dir_name()).map_err(unavailable)?;
        }
        Ok(Self {
            root: Arc::new(dir),
        })
    }

    async fn run<T, F>(&self, op: F) -> Result<T, AssetStoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Dir) -> io::Result<T> + Send + 'static,
    {
        let root = Arc::clone(&self.root);
        tokio::task::spawn_blocking(move || op(&root))
            .await
            .map_err(|err| AssetStoreError::io(format!("blocking task failed: {err}")))?
            .map_err(|err| AssetStoreError::io(err.to_string()))
    }
}

fn relative(location: &AssetLocation) -> String {
    format!("{}/{}", location.kind.dir_name(), location.filename)
}

fn timestamp(time: io::Result<cap_std::time::SystemTime>) -> Option<DateTime<Utc>> {
    time.ok().map(|t| DateTime::<Utc>::from(t.into_std()))
}

fn list_area(root: &Dir, kind: AssetKind) -> io::Result<Vec<StoredAsset>> {
    let area = match root.open_dir(kind.dir_name()) {
        Ok(area) => area,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err),
    };
    let mut assets = Vec::new();
    for entry in area.entries()? {
        let entry = entry?;
        let metadata = entry.metadata()?;
        if !metadata.is_file() {
            continue;
        }
        let Some(filename) = entry
            .file_name()
            .to_str()
            .and_then(|raw| AssetFilename::new(raw).ok())
        else {
            debug!(area = kind.dir_name(), "skipping unlisted file");
            continue;
        };
        let location = AssetLocation::new(kind, filename);
        assets.push(StoredAsset {
            path: location.public_path(),
            filename: location.filename,
            size: metadata.len(),
            created: timestamp(metadata.created()),
            modified: timestamp(metadata.modified()),
        });
    }
    assets.sort_by(|a, b| a.filename.as_ref().cmp(b.filename.as_ref()));
    Ok(assets)
}

#[async_trait]
impl AssetStore for FsAssetStore {
    async fn write(&self, location: &AssetLocation, bytes: &[u8]) -> Result<u64, AssetStoreError> {
        let path = relative(location);
        let bytes = bytes.to_vec();
        self.run(move |root| {
            root.write(&path, &bytes)?;
            Ok(bytes.len() as u64)
        })
        .await
    }

    async fn read(&self, location: &AssetLocation) -> Result<Option<Vec<u8>>, AssetStoreError> {
        let path = relative(location);
        self.run(move |root| match root.read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        })
        .await
    }

    async fn delete(&self, location: &AssetLocation) -> Result<bool, AssetStoreError> {
        let path = relative(location);
        self.run(move |root| match root.remove_file(&path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err),
        })
        .await
    }

    async fn list(&self, kind: AssetKind) -> Result<Vec<StoredAsset>, AssetStoreError> {
        self.run(move |root| list_area(root, kind)).await
    }
}
