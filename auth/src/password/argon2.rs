use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// One-way salted password hashing.
///
/// Argon2id with default parameters. The salt is generated per call and
/// embedded in the PHC output, so `verify` needs nothing but the stored hash.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password.
    ///
    /// # Returns
    /// PHC string (`$argon2id$v=19$...`) carrying algorithm, parameters, salt and digest
    ///
    /// # Errors
    /// * `HashingFailed` - The Argon2 primitive rejected the input
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Check a plaintext password against a stored PHC hash.
    ///
    /// A mismatch is `Ok(false)`, not an error.
    ///
    /// # Errors
    /// * `MalformedHash` - The stored value is not a parseable PHC string
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| PasswordError::MalformedHash(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("secret").expect("Failed to hash password");

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("secret", &hash).expect("Failed to verify"));
    }

    #[test]
    fn test_verify_wrong_password_is_false() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("secret").expect("Failed to hash password");

        assert!(!hasher.verify("secreT", &hash).expect("Failed to verify"));
        assert!(!hasher.verify("", &hash).expect("Failed to verify"));
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        let hasher = PasswordHasher::new();
        let first = hasher.hash("secret").unwrap();
        let second = hasher.hash("secret").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("secret", &first).unwrap());
        assert!(hasher.verify("secret", &second).unwrap());
    }

    #[test]
    fn test_hash_does_not_contain_plaintext() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("plaintext_marker").unwrap();

        assert!(!hash.contains("plaintext_marker"));
    }

    #[test]
    fn test_verify_malformed_hash() {
        let hasher = PasswordHasher::new();
        let result = hasher.verify("password", "not-a-phc-string");

        assert!(matches!(result, Err(PasswordError::MalformedHash(_))));
    }
}
