//! Driven port for password hashing.
use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHashError {
        /// Hashing failed.
        Hash { message: String } => "password hashing failed: {message}",
        /// A stored hash could not be parsed.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
    }
}

/// One-way password hashing. Implementations are CPU-bound; callers run them
/// off the async executor.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plain-text password.
    fn hash(&self, password: &str) -> Result<String, PasswordHashError>;

    /// Whether `password` matches `hash`.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError>;
}

/// Reversible stand-in for tests and fixture wiring. Never use in production.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePasswordHasher;

impl PasswordHasher for FixturePasswordHasher {
    fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        Ok(format!("plain:{password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError> {
        hash.strip_prefix("plain:")
            .map(|stored| stored == password)
            .ok_or_else(|| PasswordHashError::malformed_hash("missing fixture prefix"))
    }
}
