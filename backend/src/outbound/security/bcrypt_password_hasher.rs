//! `PasswordHasher` backed by bcrypt.

use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Work factor used for new hashes.
pub const DEFAULT_COST: u32 = 10;

/// bcrypt hasher with a fixed cost.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Hasher using `cost` rounds; bcrypt accepts 4 to 31.
    pub const fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::with_cost(DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        bcrypt::hash(password, self.cost).map_err(|err| PasswordHashError::hash(err.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError> {
        bcrypt::verify(password, hash)
            .map_err(|err| PasswordHashError::malformed_hash(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn hasher() -> BcryptPasswordHasher {
        // Minimum cost keeps the tests fast.
        BcryptPasswordHasher::with_cost(4)
    }

    #[rstest]
    fn hashes_verify_only_the_original_password() {
        let hash = hasher().hash("s3cret").expect("hash");
        assert!(hash.starts_with("$2"));
        assert!(hasher().verify("s3cret", &hash).expect("verify"));
        assert!(!hasher().verify("S3cret", &hash).expect("verify"));
    }

    #[rstest]
    fn hashes_are_salted() {
        let first = hasher().hash("same").expect("hash");
        let second = hasher().hash("same").expect("hash");
        assert_ne!(first, second);
    }

    #[rstest]
    fn malformed_hashes_are_reported() {
        let err = hasher().verify("pw", "not-a-hash").expect_err("malformed");
        assert!(matches!(err, PasswordHashError::MalformedHash { .. }));
    }
}
