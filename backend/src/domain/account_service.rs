//! Account service implementing the [`AccountService`] driving port.
//!
//! Password hashing is CPU-bound, so it runs on Tokio's blocking pool rather
//! than on an actix worker.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{
    AccountService, PasswordHashError, PasswordHasher, ProfileUpdate, SignInResult, SignupRequest,
    TokenCodec, TokenError, UserPersistenceError, UserRepository,
};
use crate::domain::service_support::{map_password_hash_error, map_user_repository_error};
use crate::domain::{
    Credentials, Error, SessionClaims, User, UserId, UserPreferences, username_candidate,
};

/// Upper bound on numbered username candidates tried at signup.
const MAX_USERNAME_ATTEMPTS: u32 = 1_000;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Account use-cases backed by a user repository, hasher and token codec.
#[derive(Clone)]
pub struct AccountsService<U, H, T> {
    users: Arc<U>,
    hasher: Arc<H>,
    tokens: Arc<T>,
    clock: Arc<dyn Clock>,
}

impl<U, H, T> AccountsService<U, H, T> {
    /// Create the service.
    ///
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use mockable::DefaultClock;
    /// # use studio_backend::domain::AccountsService;
    /// # use studio_backend::domain::ports::{FixturePasswordHasher, FixtureUserRepository};
    /// # use studio_backend::outbound::security::JwtTokenCodec;
    /// let codec = JwtTokenCodec::new(b"dev-secret", chrono::Duration::days(7));
    /// let service = AccountsService::new(
    ///     Arc::new(FixtureUserRepository),
    ///     Arc::new(FixturePasswordHasher),
    ///     Arc::new(codec),
    ///     Arc::new(DefaultClock),
    /// );
    /// # let _ = service;
    /// ```
    pub fn new(users: Arc<U>, hasher: Arc<H>, tokens: Arc<T>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            hasher,
            tokens,
            clock,
        }
    }
}

impl<U, H, T> AccountsService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
    T: TokenCodec,
{
    async fn hash_password(&self, password: String) -> Result<String, Error> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
            .map_err(map_password_hash_error)
    }

    async fn verify_password(&self, password: String, hash: String) -> Result<bool, Error> {
        let hasher = Arc::clone(&self.hasher);
        let outcome = tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|err| Error::internal(format!("password check task failed: {err}")))?;
        match outcome {
            Ok(matches) => Ok(matches),
            // A corrupt stored hash cannot match anything.
            Err(PasswordHashError::MalformedHash { message }) => {
                debug!(%message, "stored password hash is malformed");
                Ok(false)
            }
            Err(err) => Err(map_password_hash_error(err)),
        }
    }

    async fn unique_username(&self, credentials: &Credentials) -> Result<String, Error> {
        for attempt in 0..MAX_USERNAME_ATTEMPTS {
            let candidate = username_candidate(credentials.email(), attempt);
            let taken = self
                .users
                .username_exists(&candidate)
                .await
                .map_err(map_user_repository_error)?;
            if !taken {
                return Ok(candidate);
            }
        }
        Err(Error::conflict("Could not derive a unique username"))
    }
}

#[async_trait]
impl<U, H, T> AccountService for AccountsService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
    T: TokenCodec,
{
    async fn signup(&self, request: SignupRequest) -> Result<User, Error> {
        let SignupRequest {
            credentials,
            plan,
            profile,
        } = request;

        let existing = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_repository_error)?;
        if existing.is_some() {
            return Err(Error::conflict("Email already in use"));
        }

        let username = self.unique_username(&credentials).await?;
        let password_hash = self.hash_password(credentials.password().to_owned()).await?;
        let now = self.clock.utc();
        let user = User {
            id: UserId::random(),
            username,
            email: credentials.email().clone(),
            password_hash,
            plan: plan.unwrap_or_default(),
            profile: profile.trimmed(),
            preferences: UserPreferences::default(),
            created_at: now,
            updated_at: now,
        };

        match self.users.create(&user).await {
            Ok(()) => {}
            Err(UserPersistenceError::Duplicate { field }) if field == "email" => {
                return Err(Error::conflict("Email already in use"));
            }
            Err(err) => return Err(map_user_repository_error(err)),
        }
        info!(user_id = %user.id, plan = %user.plan, "account created");
        Ok(user)
    }

    async fn signin(&self, credentials: Credentials) -> Result<SignInResult, Error> {
        let user = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(|| Error::unauthorized(INVALID_CREDENTIALS))?;

        let matches = self
            .verify_password(credentials.password().to_owned(), user.password_hash.clone())
            .await?;
        if !matches {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        let claims = SessionClaims {
            user_id: user.id,
            email: user.email.clone(),
            plan: user.plan,
        };
        let token = self
            .tokens
            .issue(&claims, self.clock.utc())
            .map_err(|err| Error::internal(err.to_string()))?;
        debug!(user_id = %user.id, "session token issued");
        Ok(SignInResult { token, user })
    }

    async fn update_profile(
        &self,
        caller: &SessionClaims,
        update: ProfileUpdate,
    ) -> Result<User, Error> {
        if update.id != caller.user_id {
            return Err(Error::forbidden("Cannot update another user's profile"));
        }
        let mut user = self
            .users
            .find_by_id(&update.id)
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(|| Error::not_found("User not found"))?;

        user.profile = update.profile.trimmed();
        user.plan = update.plan.unwrap_or_default();
        user.preferences = update
            .preferences
            .unwrap_or_default()
            .apply_to(UserPreferences::default());
        user.updated_at = self.clock.utc();

        let updated = self
            .users
            .update(&user)
            .await
            .map_err(map_user_repository_error)?;
        if !updated {
            return Err(Error::not_found("User not found"));
        }
        Ok(user)
    }

    fn authenticate(&self, token: &str) -> Result<SessionClaims, Error> {
        self.tokens.verify(token).map_err(|err| {
            match &err {
                TokenError::Expired => debug!("bearer token expired"),
                other => debug!(error = %other, "bearer token rejected"),
            }
            Error::unauthorized("Invalid token")
        })
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
