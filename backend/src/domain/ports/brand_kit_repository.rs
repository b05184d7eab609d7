//! Port abstraction for brand kit persistence.
use async_trait::async_trait;

use crate::domain::{BrandKit, UserId};

use super::{NO_DATABASE, define_port_error};

define_port_error! {
    /// Persistence errors raised by brand kit repository adapters.
    pub enum BrandKitPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "brand kit repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "brand kit repository query failed: {message}",
        /// A stored row could not be turned back into a brand kit.
        Corrupt { message: String } => "stored brand kit is invalid: {message}",
    }
}

/// Brand kit storage, one kit per user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BrandKitRepository: Send + Sync {
    /// The user's kit, if saved.
    async fn find_by_user(&self, user_id: &UserId)
    -> Result<Option<BrandKit>, BrandKitPersistenceError>;

    /// Insert or replace the user's kit.
    async fn upsert(&self, kit: &BrandKit) -> Result<(), BrandKitPersistenceError>;

    /// Remove the user's kit. Returns `false` when none was stored.
    async fn delete_by_user(&self, user_id: &UserId) -> Result<bool, BrandKitPersistenceError>;
}

/// Repository with no saved kits; writes fail as connection errors.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureBrandKitRepository;

#[async_trait]
impl BrandKitRepository for FixtureBrandKitRepository {
    async fn find_by_user(
        &self,
        _user_id: &UserId,
    ) -> Result<Option<BrandKit>, BrandKitPersistenceError> {
        Ok(None)
    }

    async fn upsert(&self, _kit: &BrandKit) -> Result<(), BrandKitPersistenceError> {
        Err(BrandKitPersistenceError::connection(NO_DATABASE))
    }

    async fn delete_by_user(&self, _user_id: &UserId) -> Result<bool, BrandKitPersistenceError> {
        Err(BrandKitPersistenceError::connection(NO_DATABASE))
    }
}
