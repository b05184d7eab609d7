//! `TokenCodec` issuing HS256 JSON Web Tokens.
//!
//! Claims on the wire are `{sub, email, plan, iat, exp}`.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::domain::ports::{TokenCodec, TokenError};
use crate::domain::{Email, IssuedToken, Plan, SessionClaims, UserId};

#[derive(Debug, Serialize, Deserialize)]
struct WireClaims {
    sub: String,
    email: String,
    plan: String,
    iat: i64,
    exp: i64,
}

/// HMAC-SHA256 token codec with a fixed lifetime.
pub struct JwtTokenCodec {
    secret: Zeroizing<Vec<u8>>,
    ttl: Duration,
}

impl JwtTokenCodec {
    /// Codec signing with `secret`; tokens live for `ttl`.
    pub fn new(secret: impl Into<Vec<u8>>, ttl: Duration) -> Self {
        Self {
            secret: Zeroizing::new(secret.into()),
            ttl,
        }
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation
    }
}

fn invalid(message: impl std::fmt::Display) -> TokenError {
    TokenError::invalid(message.to_string())
}

impl TokenCodec for JwtTokenCodec {
    fn issue(&self, claims: &SessionClaims, now: DateTime<Utc>) -> Result<IssuedToken, TokenError> {
        let expires_at = now + self.ttl;
        let wire = WireClaims {
            sub: claims.user_id.to_string(),
            email: claims.email.to_string(),
            plan: claims.plan.as_str().to_owned(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &wire,
            &EncodingKey::from_secret(&self.secret),
        )
        .map_err(|err| TokenError::signing(err.to_string()))?;
        Ok(IssuedToken { token, expires_at })
    }

    fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let data = decode::<WireClaims>(
            token,
            &DecodingKey::from_secret(&self.secret),
            &Self::validation(),
        )
        .map_err(|err| match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::expired(),
            _ => invalid(err),
        })?;
        let wire = data.claims;
        Ok(SessionClaims {
            user_id: UserId::new(&wire.sub).map_err(invalid)?,
            email: Email::new(wire.email).map_err(invalid)?,
            plan: wire.plan.parse::<Plan>().map_err(invalid)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn codec() -> JwtTokenCodec {
        JwtTokenCodec::new("test-secret", Duration::days(7))
    }

    fn claims() -> SessionClaims {
        SessionClaims {
            user_id: UserId::random(),
            email: Email::new("ana@example.com").expect("email"),
            plan: Plan::Premium,
        }
    }

    #[rstest]
    fn issued_tokens_verify(codec: JwtTokenCodec) {
        let claims = claims();
        let now = Utc::now();
        let issued = codec.issue(&claims, now).expect("issue");
        assert_eq!(issued.expires_at, now + Duration::days(7));
        assert_eq!(codec.verify(&issued.token).expect("verify"), claims);
    }

    #[rstest]
    fn expired_tokens_are_rejected(codec: JwtTokenCodec) {
        let issued = codec
            .issue(&claims(), Utc::now() - Duration::days(8))
            .expect("issue");
        assert_eq!(codec.verify(&issued.token), Err(TokenError::Expired));
    }

    #[rstest]
    fn foreign_signatures_are_invalid(codec: JwtTokenCodec) {
        let other = JwtTokenCodec::new("another-secret", Duration::days(7));
        let issued = other.issue(&claims(), Utc::now()).expect("issue");
        assert!(matches!(
            codec.verify(&issued.token),
            Err(TokenError::Invalid { .. })
        ));
    }

    #[rstest]
    #[case("")]
    #[case("not.a.jwt")]
    fn garbage_is_invalid(codec: JwtTokenCodec, #[case] token: &str) {
        assert!(matches!(codec.verify(token), Err(TokenError::Invalid { .. })));
    }
}
