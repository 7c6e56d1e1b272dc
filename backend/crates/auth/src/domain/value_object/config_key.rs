//! Reference configuration keys read by the auth subsystem

use derive_more::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ConfigKey {
    /// Redirect target when no token was sent
    #[display("LOGIN_URL")]
    LoginUrl,
    /// Redirect target for an unknown or expired token
    #[display("UNAUTHORIZED_URL")]
    UnauthorizedUrl,
    /// Redirect target for a known token on a path it may not use
    #[display("FORBIDDEN_URL")]
    ForbiddenUrl,
    /// Sliding session lifetime, whole minutes
    #[display("SESSION_TIMEOUT_MINUTE")]
    SessionTimeoutMinute,
}

impl ConfigKey {
    /// Row key in the config table
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LoginUrl => "LOGIN_URL",
            Self::UnauthorizedUrl => "UNAUTHORIZED_URL",
            Self::ForbiddenUrl => "FORBIDDEN_URL",
            Self::SessionTimeoutMinute => "SESSION_TIMEOUT_MINUTE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_row_key() {
        for key in [
            ConfigKey::LoginUrl,
            ConfigKey::UnauthorizedUrl,
            ConfigKey::ForbiddenUrl,
            ConfigKey::SessionTimeoutMinute,
        ] {
            assert_eq!(key.to_string(), key.as_str());
        }
    }
}
