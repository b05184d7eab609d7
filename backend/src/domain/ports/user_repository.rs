//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Email, User, UserId};

use super::{NO_DATABASE, define_port_error};

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A unique column (email or username) already holds the value.
        Duplicate { field: String } => "user {field} already exists",
    }
}

/// Account storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account; unique clashes surface as `Duplicate`.
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Overwrite an existing account. Returns `false` when it does not exist.
    async fn update(&self, user: &User) -> Result<bool, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by sign-in email.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError>;

    /// Whether `username` is taken.
    async fn username_exists(&self, username: &str) -> Result<bool, UserPersistenceError>;
}

/// Repository used without a database: lookups miss and writes fail as
/// connection errors.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserRepository;

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn create(&self, _user: &User) -> Result<(), UserPersistenceError> {
        Err(UserPersistenceError::connection(NO_DATABASE))
    }

    async fn update(&self, _user: &User) -> Result<bool, UserPersistenceError> {
        Err(UserPersistenceError::connection(NO_DATABASE))
    }

    async fn find_by_id(&self, _id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(None)
    }

    async fn find_by_email(&self, _email: &Email) -> Result<Option<User>, UserPersistenceError> {
        Ok(None)
    }

    async fn username_exists(&self, _username: &str) -> Result<bool, UserPersistenceError> {
        Ok(false)
    }
}
