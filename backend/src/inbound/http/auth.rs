//! Bearer authentication for HTTP handlers.
//!
//! Handlers that need a caller take [`AuthenticatedUser`] as an argument;
//! the extractor reads the `Authorization` header and verifies the token
//! through the account port held in [`HttpState`].

use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::{Error, SessionClaims, bearer_token};
use crate::inbound::http::state::HttpState;

/// Verified claims of the calling user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(pub SessionClaims);

impl AuthenticatedUser {
    /// Claims carried by the token.
    #[must_use]
    pub fn claims(&self) -> &SessionClaims {
        &self.0
    }

    /// Consume the wrapper.
    #[must_use]
    pub fn into_claims(self) -> SessionClaims {
        self.0
    }
}

fn authenticate_request(req: &HttpRequest) -> Result<AuthenticatedUser, Error> {
    let header = match req.headers().get(AUTHORIZATION) {
        Some(value) => Some(
            value
                .to_str()
                .map_err(|_| Error::unauthorized("Malformed token"))?,
        ),
        None => None,
    };
    let token = bearer_token(header).map_err(|err| {
        debug!(reason = %err, "bearer token rejected");
        Error::unauthorized(err.to_string())
    })?;
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state is not registered"))?;
    state.accounts.authenticate(token).map(AuthenticatedUser)
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate_request(req))
    }
}
