//! Authentication primitives: credentials, session claims and bearer parsing.
//!
//! Inbound payload parsing stays outside the domain; these constructors
//! validate raw strings before a handler talks to a port or service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::domain::{Email, Plan, UserId};

/// Login or signup values were missing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsValidationError {
    /// Email or password was blank.
    #[error("Email and password required")]
    Missing,
}

/// Validated email/password pair.
///
/// ## Invariants
/// - `email` is trimmed and non-empty.
/// - `password` is non-empty and keeps caller whitespace; it is zeroed on
///   drop.
///
/// # Examples
/// ```
/// use studio_backend::domain::Credentials;
///
/// let creds = Credentials::try_from_parts(" ana@example.com ", "s3cret").unwrap();
/// assert_eq!(creds.email().as_ref(), "ana@example.com");
/// assert_eq!(creds.password(), "s3cret");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    email: Email,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Construct credentials from raw inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        if password.is_empty() {
            return Err(CredentialsValidationError::Missing);
        }
        let email = Email::new(email).map_err(|_| CredentialsValidationError::Missing)?;
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email used for lookups.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Plain-text password supplied by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Identity carried by a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject.
    pub user_id: UserId,
    /// Email at issue time.
    pub email: Email,
    /// Plan at issue time.
    pub plan: Plan,
}

/// A freshly signed bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Compact JWS.
    pub token: String,
    /// Expiry instant.
    pub expires_at: DateTime<Utc>,
}

/// Reasons an `Authorization` header is unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BearerError {
    /// No header was sent.
    #[error("No token provided")]
    Missing,
    /// The header lacks a token after the scheme.
    #[error("Malformed token")]
    Malformed,
}

/// Extract the token from an `Authorization` header value.
///
/// # Examples
/// ```
/// use studio_backend::domain::{BearerError, bearer_token};
///
/// assert_eq!(bearer_token(Some("Bearer abc")), Ok("abc"));
/// assert_eq!(bearer_token(Some("Bearer ")), Err(BearerError::Malformed));
/// assert_eq!(bearer_token(None), Err(BearerError::Missing));
/// ```
pub fn bearer_token(header: Option<&str>) -> Result<&str, BearerError> {
    let header = header.map(str::trim).filter(|value| !value.is_empty());
    let header = header.ok_or(BearerError::Missing)?;
    let token = header
        .strip_prefix("Bearer")
        .ok_or(BearerError::Malformed)?
        .trim();
    if token.is_empty() || token.contains(char::is_whitespace) {
        return Err(BearerError::Malformed);
    }
    Ok(token)
}
