//! Driving port for the caller's brand kit.

use async_trait::async_trait;

use crate::domain::{BrandKit, BrandKitPatch, BrandLogo, Error, UserId};

/// A brand kit as served to its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandKitView {
    /// Kit contents.
    pub kit: BrandKit,
    /// Whether the kit is stored; defaults are served without an id.
    pub persisted: bool,
}

/// Brand kit use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BrandKits: Send + Sync {
    /// The stored kit, or an unsaved default one.
    async fn get(&self, user_id: &UserId) -> Result<BrandKitView, Error>;

    /// Apply a partial update, creating the kit when needed.
    async fn update(&self, user_id: &UserId, patch: BrandKitPatch) -> Result<BrandKit, Error>;

    /// Remove the kit.
    async fn delete(&self, user_id: &UserId) -> Result<(), Error>;

    /// The stored logo, if any.
    async fn logo(&self, user_id: &UserId) -> Result<Option<BrandLogo>, Error>;
}
