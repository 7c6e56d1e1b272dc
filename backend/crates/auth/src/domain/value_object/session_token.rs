//! Session Token Value Object
//!
//! Opaque identifier naming one live session. 128 bits of OS randomness
//! rendered as 32 lowercase hex characters.

use std::borrow::Borrow;
use std::fmt;

/// Bytes of entropy per token
pub const TOKEN_BYTES: usize = 16;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    /// Mint a fresh unguessable token
    pub fn generate() -> Self {
        Self(platform::crypto::random_token(TOKEN_BYTES))
    }

    /// Wrap a token received from a client
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short prefix safe to put in logs
    pub fn redacted(&self) -> &str {
        redact(&self.0)
    }
}

/// First 8 chars of a raw token, for log fields
pub fn redact(token: &str) -> &str {
    token.get(..8).unwrap_or(token)
}

impl Borrow<str> for SessionToken {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionToken({}..)", self.redacted())
    }
}
