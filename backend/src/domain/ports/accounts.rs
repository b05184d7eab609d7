//! Driving port for account sign-up, sign-in and profile maintenance.
//!
//! Inbound adapters call it to authenticate callers without importing the
//! backing repository, hasher or token codec.

use async_trait::async_trait;

use crate::domain::{
    Credentials, Error, IssuedToken, Plan, PreferencesPatch, SessionClaims, User, UserId,
    UserProfile,
};

/// Validated sign-up request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupRequest {
    /// Email and password.
    pub credentials: Credentials,
    /// Requested plan; `Free` when absent.
    pub plan: Option<Plan>,
    /// Initial profile.
    pub profile: UserProfile,
}

/// Result of a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInResult {
    /// Bearer token for subsequent requests.
    pub token: IssuedToken,
    /// The signed-in user.
    pub user: User,
}

/// Profile replacement submitted by the account owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    /// Account to update; must match the caller.
    pub id: UserId,
    /// New profile; absent fields are already blank.
    pub profile: UserProfile,
    /// New plan; `Free` when absent.
    pub plan: Option<Plan>,
    /// Preference changes merged over the defaults.
    pub preferences: Option<PreferencesPatch>,
}

/// Account use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Create an account with a unique username derived from the email.
    async fn signup(&self, request: SignupRequest) -> Result<User, Error>;

    /// Check credentials and issue a token.
    async fn signin(&self, credentials: Credentials) -> Result<SignInResult, Error>;

    /// Replace the caller's profile.
    async fn update_profile(
        &self,
        caller: &SessionClaims,
        update: ProfileUpdate,
    ) -> Result<User, Error>;

    /// Verify a bearer token.
    fn authenticate(&self, token: &str) -> Result<SessionClaims, Error>;
}
