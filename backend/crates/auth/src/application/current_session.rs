//! Current Session Use Case
//!
//! Backs the get-menu call: resolve the caller's token to its session and
//! slide the expiry.

use std::sync::Arc;

use crate::domain::entity::session::Session;
use crate::error::{AuthError, AuthResult};
use crate::infra::session_registry::SessionRegistry;

pub struct CurrentSessionUseCase {
    sessions: Arc<SessionRegistry>,
}

impl CurrentSessionUseCase {
    pub fn new(sessions: Arc<SessionRegistry>) -> Self {
        Self { sessions }
    }

    pub fn execute(&self, token: Option<&str>) -> AuthResult<Session> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingToken)?;

        self.sessions
            .touch_and_get(token)
            .ok_or(AuthError::UnknownOrExpiredToken)
    }
}
