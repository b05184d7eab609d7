//! Driven port resolving a user's Canva access token.
use async_trait::async_trait;

use crate::domain::UserId;

use super::define_port_error;

define_port_error! {
    /// Errors raised while resolving Canva tokens.
    pub enum CanvaTokenError {
        /// No token is available for the user.
        Unavailable { message: String } => "canva token unavailable: {message}",
    }
}

/// Looks up the Canva access token to use for a user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CanvaTokenProvider: Send + Sync {
    /// Access token for `user_id`.
    async fn access_token(&self, user_id: &UserId) -> Result<String, CanvaTokenError>;
}

/// Provider that derives a placeholder token from the user id.
///
/// Stored OAuth tokens are not persisted yet, so every user gets
/// `mock_canva_token_<userId>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCanvaTokenProvider;

#[async_trait]
impl CanvaTokenProvider for FixtureCanvaTokenProvider {
    async fn access_token(&self, user_id: &UserId) -> Result<String, CanvaTokenError> {
        Ok(format!("mock_canva_token_{user_id}"))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[tokio::test]
    async fn fixture_token_embeds_user_id() {
        let user_id = UserId::random();
        let token = FixtureCanvaTokenProvider
            .access_token(&user_id)
            .await
            .expect("fixture token");
        assert_eq!(token, format!("mock_canva_token_{user_id}"));
    }
}
