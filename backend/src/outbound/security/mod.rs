//! Credential adapters: password hashing and bearer token signing.

mod bcrypt_password_hasher;
mod jwt_token_codec;

pub use bcrypt_password_hasher::BcryptPasswordHasher;
pub use jwt_token_codec::JwtTokenCodec;
