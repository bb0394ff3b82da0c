use anyhow::{Context, Result};
use bcrypt::{hash, verify};

/// Hashes a password with bcrypt at the given work factor.
pub fn hash_password(password: &str, cost: u32) -> Result<String> {
    hash(password, cost).context("Failed to hash password")
}

/// Checks a password against a stored bcrypt hash.
///
/// A malformed hash is an error, not a mismatch.
pub fn verify_password(password: &str, hashed: &str) -> Result<bool> {
    verify(password, hashed).context("Failed to verify password")
}

#[cfg(test)]
mod tests {
    use super::*;
    /// Mirrors bcrypt's private `MIN_COST`.
    const MIN_COST: u32 = 4;

    #[test]
    fn test_hash_password_success() {
        let password = "testpassword123";
        let hash = hash_password(password, MIN_COST).unwrap();

        assert!(!hash.is_empty());
        assert_ne!(hash, password);
    }

    #[test]
    fn test_verify_password_correct() {
        let hash = hash_password("correctpassword", MIN_COST).unwrap();
        assert!(verify_password("correctpassword", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_incorrect() {
        let hash = hash_password("correctpassword", MIN_COST).unwrap();
        assert!(!verify_password("wrongpassword", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_invalid_hash() {
        assert!(verify_password("testpassword", "not_a_valid_bcrypt_hash").is_err());
    }

    #[test]
    fn test_hash_generates_unique_hashes() {
        let hash1 = hash_password("samepassword", MIN_COST).unwrap();
        let hash2 = hash_password("samepassword", MIN_COST).unwrap();

        assert_ne!(hash1, hash2);
        assert!(verify_password("samepassword", &hash1).unwrap());
        assert!(verify_password("samepassword", &hash2).unwrap());
    }

    #[test]
    fn test_hash_special_characters() {
        let password = "p@ss<w0rd>!#$%^&*()";
        let hash = hash_password(password, MIN_COST).unwrap();
        assert!(verify_password(password, &hash).unwrap());
    }

    #[test]
    fn test_invalid_cost_is_error() {
        assert!(hash_password("password", 2).is_err());
    }
}
