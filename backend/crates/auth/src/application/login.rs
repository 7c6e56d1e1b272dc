//! Login Use Case
//!
//! Verifies a username/password pair against the credential cache and
//! registers a new in-memory session.

use std::sync::Arc;

use chrono::Utc;
use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::entity::session::Session;
use crate::domain::repository::{ConfigLookup, CredentialDirectory, RoleDirectory};
use crate::domain::value_object::session_token::SessionToken;
use crate::error::{AuthError, AuthResult};
use crate::infra::session_registry::SessionRegistry;

/// Login input
pub struct LoginInput {
    pub user_name: String,
    pub password: String,
}

/// Login use case
pub struct LoginUseCase<C, R, K>
where
    C: CredentialDirectory,
    R: RoleDirectory,
    K: ConfigLookup,
{
    credentials: Arc<C>,
    roles: Arc<R>,
    config_store: Arc<K>,
    sessions: Arc<SessionRegistry>,
    config: Arc<AuthConfig>,
}

impl<C, R, K> LoginUseCase<C, R, K>
where
    C: CredentialDirectory,
    R: RoleDirectory,
    K: ConfigLookup,
{
    pub fn new(
        credentials: Arc<C>,
        roles: Arc<R>,
        config_store: Arc<K>,
        sessions: Arc<SessionRegistry>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            credentials,
            roles,
            config_store,
            sessions,
            config,
        }
    }

    pub fn execute(&self, input: LoginInput) -> AuthResult<Session> {
        let user = self
            .credentials
            .find_by_user_name(&input.user_name)
            .ok_or(AuthError::InvalidCredentials)?;

        let password =
            ClearTextPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        if !user.password.verify(&password) {
            return Err(AuthError::InvalidCredentials);
        }

        // Only reachable with the right password
        if !user.can_login() {
            return Err(AuthError::AccountInactive);
        }

        let access = self.roles.resolve_access(&user.role_id)?;
        let idle_timeout = self.config.resolve_session_timeout(&*self.config_store);

        let session = Session::new(
            SessionToken::generate(),
            &user,
            access,
            idle_timeout,
            Utc::now(),
        );
        self.sessions.insert(session.clone())?;

        tracing::info!(
            user_id = %user.id,
            role_id = %user.role_id,
            token = %session.token.redacted(),
            expires_at = %session.expires_at,
            "User logged in"
        );

        Ok(session)
    }
}
