//! Password Digest Verification
//!
//! Stored credentials are a hex-encoded salted one-way digest:
//! `hex(SHA-256(password || salt))`, with the salt stored beside it.
//!
//! ## Security Features
//! - Clear text is zeroized on drop and redacted in `Debug`
//! - Digest comparison is constant-time

use std::fmt;

use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::{constant_time_eq, random_token, sha256};

/// Length of a freshly generated salt, in bytes of entropy
pub const SALT_BYTES: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("Password cannot be empty")]
    Empty,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password as submitted by a login form.
///
/// No policy checks beyond non-emptiness: existing accounts must be able to
/// log in with whatever password they were provisioned with.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    pub fn new(raw: String) -> Result<Self, PasswordError> {
        if raw.is_empty() {
            return Err(PasswordError::Empty);
        }
        Ok(Self(raw))
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Salted Digest (safe to store)
// ============================================================================

/// Stored digest plus the salt it was computed with
#[derive(Clone, PartialEq, Eq)]
pub struct SaltedDigest {
    digest: String,
    salt: String,
}

impl SaltedDigest {
    /// Wrap a digest/salt pair read from storage
    pub fn from_stored(digest: impl Into<String>, salt: impl Into<String>) -> Self {
        Self {
            digest: digest.into().to_ascii_lowercase(),
            salt: salt.into(),
        }
    }

    /// Digest `password` under `salt`
    pub fn compute(password: &ClearTextPassword, salt: &str) -> Self {
        Self {
            digest: digest_hex(password, salt),
            salt: salt.to_string(),
        }
    }

    /// Digest `password` under a fresh random salt
    pub fn generate(password: &ClearTextPassword) -> Self {
        Self::compute(password, &random_token(SALT_BYTES))
    }

    pub fn digest(&self) -> &str {
        &self.digest
    }

    pub fn salt(&self) -> &str {
        &self.salt
    }

    /// Recompute under the stored salt and compare in constant time
    pub fn verify(&self, password: &ClearTextPassword) -> bool {
        let candidate = digest_hex(password, &self.salt);
        constant_time_eq(candidate.as_bytes(), self.digest.as_bytes())
    }
}

impl fmt::Debug for SaltedDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SaltedDigest")
            .field("digest", &"[HASH]")
            .field("salt", &"[SALT]")
            .finish()
    }
}

fn digest_hex(password: &ClearTextPassword, salt: &str) -> String {
    let mut material = Vec::with_capacity(password.as_bytes().len() + salt.len());
    material.extend_from_slice(password.as_bytes());
    material.extend_from_slice(salt.as_bytes());
    let hash = sha256(&material);
    material.zeroize();
    hex::encode(hash)
}
