//! Password value objects.
//!
//! `PlainPassword` carries the caller's raw secret as far as policy checks and
//! hashing. `Password` is what the registry keeps: an Argon2id hash that can
//! only be used for verification.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::constants::REDACTED;
use crate::error::{DomainError, DomainResult};

/// Raw password as supplied by a caller.
///
/// Deserializable so request bodies can carry it, but not
/// `Serialize` and not `Display`.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct PlainPassword(String);

impl PlainPassword {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the raw secret.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for PlainPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PlainPassword").field(&REDACTED).finish()
    }
}

impl From<&str> for PlainPassword {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for PlainPassword {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// Verified against when the username is unknown, so that a miss costs the
/// same as a wrong password.
static DUMMY_PASSWORD: Lazy<Option<Password>> =
    Lazy::new(|| Password::hash(&PlainPassword::new("dummy-password-0000")).ok());

/// Stored password: an Argon2id PHC string.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password").field("hash", &REDACTED).finish()
    }
}

impl Password {
    /// Hash a plain password with a fresh random salt.
    ///
    /// Policy enforcement is not done here; see `PasswordPolicySet`.
    pub fn hash(plain: &PlainPassword) -> DomainResult<Self> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::argon2()
            .hash_password(plain.expose().as_bytes(), &salt)
            .map_err(|e| DomainError::internal(format!("Password hash failed: {}", e)))?;
        Ok(Self {
            hash: hash.to_string(),
        })
    }

    /// Wrap an existing hash.
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    /// Get the hash string.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Verify a plain password against this hash.
    ///
    /// A malformed stored hash never verifies.
    pub fn verify(&self, plain: &PlainPassword) -> bool {
        match PasswordHash::new(&self.hash) {
            Ok(parsed) => Self::argon2()
                .verify_password(plain.expose().as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }

    /// Spend one verification on a throwaway hash. Always returns false.
    pub fn verify_dummy(plain: &PlainPassword) -> bool {
        if let Some(dummy) = DUMMY_PASSWORD.as_ref() {
            let _ = dummy.verify(plain);
        }
        false
    }

    #[inline]
    fn argon2() -> Argon2<'static> {
        Argon2::default()
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for Password {}
