//! Application Configuration
//!
//! Process-level settings for the auth subsystem, plus the fallbacks used
//! when a runtime config row is missing or malformed.

use std::time::Duration;

use chrono::TimeDelta;

use crate::domain::repository::ConfigLookup;
use crate::domain::value_object::config_key::ConfigKey;

/// Config rows that hold a redirect URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectTarget {
    Login,
    Unauthorized,
    Forbidden,
}

impl RedirectTarget {
    pub const fn key(self) -> ConfigKey {
        match self {
            RedirectTarget::Login => ConfigKey::LoginUrl,
            RedirectTarget::Unauthorized => ConfigKey::UnauthorizedUrl,
            RedirectTarget::Forbidden => ConfigKey::ForbiddenUrl,
        }
    }
}

/// Paths reachable without a session.
///
/// An entry ending in `/` matches as a prefix; anything else must match
/// exactly.
#[derive(Debug, Clone)]
pub struct PublicPaths(Vec<String>);

impl PublicPaths {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self(paths.into_iter().map(Into::into).collect())
    }

    pub fn is_public(&self, path: &str) -> bool {
        self.0.iter().any(|entry| {
            if entry.ends_with('/') {
                path.starts_with(entry.as_str())
            } else {
                path == entry
            }
        })
    }
}

impl Default for PublicPaths {
    fn default() -> Self {
        Self::new(["/login", "/logout/", "/menu", "/health"])
    }
}

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Request header carrying the session token
    pub token_header: String,
    /// Period between expiry sweeps
    pub sweep_interval: Duration,
    pub public_paths: PublicPaths,
    /// Used when `LOGIN_URL` is not configured
    pub fallback_login_url: String,
    /// Used when `UNAUTHORIZED_URL` is not configured
    pub fallback_unauthorized_url: String,
    /// Used when `FORBIDDEN_URL` is not configured
    pub fallback_forbidden_url: String,
    /// Used when `SESSION_TIMEOUT_MINUTE` is missing or not a positive integer
    pub fallback_session_timeout: TimeDelta,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_header: "token".to_string(),
            sweep_interval: Duration::from_secs(60),
            public_paths: PublicPaths::default(),
            fallback_login_url: "/login".to_string(),
            fallback_unauthorized_url: "/401".to_string(),
            fallback_forbidden_url: "/403".to_string(),
            fallback_session_timeout: TimeDelta::minutes(30),
        }
    }
}

impl AuthConfig {
    /// URL for `target`, read from the config store at call time
    pub fn resolve_url<C: ConfigLookup + ?Sized>(
        &self,
        config: &C,
        target: RedirectTarget,
    ) -> String {
        let key = target.key();
        if let Some(url) = config.get(key).filter(|v| !v.trim().is_empty()) {
            return url;
        }

        let fallback = match target {
            RedirectTarget::Login => &self.fallback_login_url,
            RedirectTarget::Unauthorized => &self.fallback_unauthorized_url,
            RedirectTarget::Forbidden => &self.fallback_forbidden_url,
        };
        tracing::warn!(key = %key, fallback = %fallback, "Config key missing, using fallback");
        fallback.clone()
    }

    /// Session lifetime as configured right now
    pub fn resolve_session_timeout<C: ConfigLookup + ?Sized>(&self, config: &C) -> TimeDelta {
        let raw = config.get(ConfigKey::SessionTimeoutMinute);
        match raw.as_deref().map(str::trim).map(str::parse::<i64>) {
            Some(Ok(minutes)) if minutes > 0 => TimeDelta::minutes(minutes),
            _ => {
                tracing::warn!(
                    key = %ConfigKey::SessionTimeoutMinute,
                    value = ?raw,
                    fallback_minutes = self.fallback_session_timeout.num_minutes(),
                    "Session timeout missing or invalid, using fallback"
                );
                self.fallback_session_timeout
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapConfig(HashMap<&'static str, &'static str>);

    impl ConfigLookup for MapConfig {
        fn get(&self, key: ConfigKey) -> Option<String> {
            self.0.get(key.as_str()).map(|v| v.to_string())
        }
    }

    #[test]
    fn test_public_paths_exact_and_prefix() {
        let paths = PublicPaths::default();
        assert!(paths.is_public("/login"));
        assert!(paths.is_public("/logout/abc123"));
        assert!(paths.is_public("/health"));
        assert!(!paths.is_public("/login/extra"));
        assert!(!paths.is_public("/logout"));
        assert!(!paths.is_public("/orders"));
    }

    #[test]
    fn test_configured_values_win() {
        let config = AuthConfig::default();
        let store = MapConfig(
            [("FORBIDDEN_URL", "/denied"), ("SESSION_TIMEOUT_MINUTE", " 45 ")].into(),
        );

        assert_eq!(config.resolve_url(&store, RedirectTarget::Forbidden), "/denied");
        assert_eq!(config.resolve_session_timeout(&store), TimeDelta::minutes(45));
    }

    #[test]
    fn test_fallbacks() {
        let config = AuthConfig::default();
        let store = MapConfig([("SESSION_TIMEOUT_MINUTE", "soon"), ("LOGIN_URL", "")].into());

        assert_eq!(config.resolve_url(&store, RedirectTarget::Login), "/login");
        assert_eq!(config.resolve_url(&store, RedirectTarget::Unauthorized), "/401");
        assert_eq!(config.resolve_session_timeout(&store), TimeDelta::minutes(30));
    }

    #[test]
    fn test_each_target_reads_its_own_row() {
        let config = AuthConfig::default();
        let store = MapConfig(
            [
                ("LOGIN_URL", "/signin"),
                ("UNAUTHORIZED_URL", "/expired"),
                ("FORBIDDEN_URL", "/denied"),
                ("SESSION_TIMEOUT_MINUTE", "/not-a-url"),
            ]
            .into(),
        );

        assert_eq!(config.resolve_url(&store, RedirectTarget::Login), "/signin");
        assert_eq!(config.resolve_url(&store, RedirectTarget::Unauthorized), "/expired");
        assert_eq!(config.resolve_url(&store, RedirectTarget::Forbidden), "/denied");

        let empty = MapConfig(HashMap::new());
        assert_eq!(config.resolve_url(&empty, RedirectTarget::Forbidden), "/403");
    }

    #[test]
    fn test_non_positive_timeout_falls_back() {
        let config = AuthConfig::default();
        let store = MapConfig([("SESSION_TIMEOUT_MINUTE", "0")].into());
        assert_eq!(config.resolve_session_timeout(&store), TimeDelta::minutes(30));
    }
}
