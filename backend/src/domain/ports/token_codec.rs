//! Driven port for signing and verifying bearer tokens.
use chrono::{DateTime, Utc};

use crate::domain::{IssuedToken, SessionClaims};

use super::define_port_error;

define_port_error! {
    /// Errors raised by token codecs.
    pub enum TokenError {
        /// The token is malformed or its signature does not verify.
        Invalid { message: String } => "token invalid: {message}",
        /// The token's expiry has passed.
        Expired => "token expired",
        /// Signing failed.
        Signing { message: String } => "token signing failed: {message}",
    }
}

/// Issues and verifies session tokens.
#[cfg_attr(test, mockall::automock)]
pub trait TokenCodec: Send + Sync {
    /// Sign `claims`, issued at `now`.
    fn issue(&self, claims: &SessionClaims, now: DateTime<Utc>) -> Result<IssuedToken, TokenError>;

    /// Verify `token` and return its claims.
    fn verify(&self, token: &str) -> Result<SessionClaims, TokenError>;
}
