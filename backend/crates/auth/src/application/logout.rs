//! Logout Use Case

use std::sync::Arc;

use crate::domain::value_object::session_token::redact;
use crate::infra::session_registry::SessionRegistry;

pub struct LogoutUseCase {
    sessions: Arc<SessionRegistry>,
}

impl LogoutUseCase {
    pub fn new(sessions: Arc<SessionRegistry>) -> Self {
        Self { sessions }
    }

    /// Drop the session if it exists. Unknown tokens are not an error.
    pub fn execute(&self, token: &str) {
        if self.sessions.delete(token) {
            tracing::info!(token = %redact(token), "User logged out");
        } else {
            tracing::debug!(token = %redact(token), "Logout for unknown token");
        }
    }
}
