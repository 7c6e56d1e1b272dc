//! Authorization Gate
//!
//! Per-request decision: public path, missing token, unknown token,
//! forbidden path, or authorized. Mapping a decision to an HTTP status and
//! redirect target happens in the presentation layer.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::session::Session;
use crate::domain::value_object::session_token::redact;
use crate::error::{AuthError, AuthResult};
use crate::infra::session_registry::{Lookup, SessionRegistry};

#[derive(Debug, Clone)]
pub enum Decision {
    /// Whitelisted path; no session consulted
    Public,
    NoToken,
    UnknownToken,
    /// Live session, but `path` is in none of its groups. Expiry untouched.
    Forbidden,
    /// Expiry has been extended
    Authorized(Session),
}

impl Decision {
    /// `Ok(None)` for public paths, `Ok(Some(session))` when authorized
    pub fn into_result(self) -> AuthResult<Option<Session>> {
        match self {
            Decision::Public => Ok(None),
            Decision::Authorized(session) => Ok(Some(session)),
            Decision::NoToken => Err(AuthError::MissingToken),
            Decision::UnknownToken => Err(AuthError::UnknownOrExpiredToken),
            Decision::Forbidden => Err(AuthError::PathNotPermitted),
        }
    }
}

pub struct AuthorizationGate {
    sessions: Arc<SessionRegistry>,
    config: Arc<AuthConfig>,
}

impl AuthorizationGate {
    pub fn new(sessions: Arc<SessionRegistry>, config: Arc<AuthConfig>) -> Self {
        Self { sessions, config }
    }

    pub fn check(&self, token: &str, path: &str) -> Decision {
        if self.config.public_paths.is_public(path) {
            return Decision::Public;
        }

        let token = token.trim();
        if token.is_empty() {
            return Decision::NoToken;
        }

        match self
            .sessions
            .touch_and_get_if(token, |session| session.permits(path))
        {
            Lookup::NotFound => Decision::UnknownToken,
            Lookup::Denied(session) => {
                tracing::warn!(
                    user_id = %session.user_id,
                    role_id = %session.role_id,
                    path = %path,
                    "Path not permitted"
                );
                Decision::Forbidden
            }
            Lookup::Touched(session) => {
                tracing::debug!(token = %redact(token), path = %path, "Request authorized");
                Decision::Authorized(session)
            }
        }
    }
}
