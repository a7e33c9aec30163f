//! Password value object - Domain layer password handling.
//!
//! Encapsulates Argon2 hashing/verification and the password policy:
//! 8-16 characters, at least one uppercase letter and at least one
//! special character.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::config::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH, PASSWORD_SPECIAL_CHARS};
use crate::errors::{AppError, AppResult};

/// Password value object that handles hashing and verification.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output (security)
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

/// Check a plain-text password against the policy.
///
/// Used both by the `validator` derives on request DTOs and by
/// `Password::new` as the last line of defense before hashing.
pub fn check_policy(plain_text: &str) -> Result<(), &'static str> {
    // Bounds are in characters, not bytes
    let length = plain_text.chars().count();
    if length < MIN_PASSWORD_LENGTH {
        return Err("Password must be at least 8 characters");
    }
    if length > MAX_PASSWORD_LENGTH {
        return Err("Password must not exceed 16 characters");
    }
    if !plain_text.chars().any(|c| c.is_ascii_uppercase()) {
        return Err("Password must contain at least one uppercase letter");
    }
    if !plain_text.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(c)) {
        return Err("Password must contain at least one special character");
    }
    Ok(())
}

impl Password {
    /// Create a new password by validating the policy and hashing
    /// the plain text.
    pub fn new(plain_text: &str) -> AppResult<Self> {
        check_policy(plain_text).map_err(AppError::validation)?;
        let hash = Self::hash(plain_text)?;
        Ok(Self { hash })
    }

    /// Create a Password from an existing hash (from database).
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text password against this hash.
    pub fn verify(&self, plain_text: &str) -> bool {
        Self::verify_hash(plain_text, &self.hash).unwrap_or(false)
    }

    fn hash(plain_text: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::argon2()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?;
        Ok(hash.to_string())
    }

    fn verify_hash(plain_text: &str, hash: &str) -> AppResult<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| AppError::internal(format!("Invalid hash format: {}", e)))?;
        Ok(Self::argon2()
            .verify_password(plain_text.as_bytes(), &parsed)
            .is_ok())
    }

    #[inline]
    fn argon2() -> Argon2<'static> {
        Argon2::default()
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for Password {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_and_verify() {
        let plain = "Secure@123";
        let password = Password::new(plain).unwrap();

        assert!(password.verify(plain));
        assert!(!password.verify("Wrong@123"));
    }

    #[test]
    fn test_password_from_hash() {
        let plain = "Testing@12";
        let password = Password::new(plain).unwrap();
        let hash = password.as_str().to_string();

        let restored = Password::from_hash(hash);
        assert!(restored.verify(plain));
    }

    #[test]
    fn test_same_password_different_salts() {
        let plain = "SamePass@1";
        let pass1 = Password::new(plain).unwrap();
        let pass2 = Password::new(plain).unwrap();

        // Different salts produce different hashes
        assert_ne!(pass1.as_str(), pass2.as_str());
        assert!(pass1.verify(plain));
        assert!(pass2.verify(plain));
    }

    #[test]
    fn policy_rejects_short_and_long() {
        assert!(check_policy("Ab@1").is_err());
        assert!(check_policy("Abcdefgh@123456789").is_err());
    }

    #[test]
    fn policy_requires_uppercase_and_special() {
        assert!(check_policy("alllower@1").is_err());
        assert!(check_policy("NoSpecial1").is_err());
        assert!(check_policy("GoodPass@1").is_ok());
    }

    #[test]
    fn policy_accepts_boundary_lengths() {
        assert!(check_policy("Abcdef@1").is_ok()); // 8 chars
        assert!(check_policy("Abcdefghijklmn@1").is_ok()); // 16 chars
    }

    #[test]
    fn policy_counts_characters_not_bytes() {
        // 16 chars but 18 bytes; must still be accepted
        assert!(check_policy("Aéçdefghijklmn@1").is_ok());
        // 7 chars padded past 8 bytes by multibyte letters; still too short
        assert!(check_policy("Aéçdé@1").is_err());
    }
}
