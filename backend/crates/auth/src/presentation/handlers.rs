//! HTTP Handlers

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use kernel::envelope::Envelope;
use kernel::error::app_error::AppError;
use std::sync::Arc;

use platform::header::extract_header;

use crate::application::config::{AuthConfig, RedirectTarget};
use crate::application::{
    CurrentSessionUseCase, LoginInput, LoginUseCase, LogoutUseCase, ReloadCacheUseCase,
};
use crate::domain::repository::ReferenceDirectory;
use crate::error::{AuthError, AuthResult};
use crate::infra::session_registry::SessionRegistry;
use crate::presentation::dto::{LoginRequest, SessionViewResponse};
use crate::presentation::middleware::redirect_response;

/// Shared state for auth handlers
pub struct AuthAppState<R>
where
    R: ReferenceDirectory,
{
    pub directory: Arc<R>,
    pub sessions: Arc<SessionRegistry>,
    pub config: Arc<AuthConfig>,
}

impl<R> AuthAppState<R>
where
    R: ReferenceDirectory,
{
    pub fn new(directory: Arc<R>, sessions: Arc<SessionRegistry>, config: Arc<AuthConfig>) -> Self {
        Self {
            directory,
            sessions,
            config,
        }
    }
}

// Manual impl; `R` itself need not be `Clone`.
impl<R> Clone for AuthAppState<R>
where
    R: ReferenceDirectory,
{
    fn clone(&self) -> Self {
        Self {
            directory: Arc::clone(&self.directory),
            sessions: Arc::clone(&self.sessions),
            config: Arc::clone(&self.config),
        }
    }
}

// ============================================================================
// Login / Logout
// ============================================================================

/// POST /login
///
/// An unreadable body is answered with the same failed envelope as a
/// rejected login.
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Response
where
    R: ReferenceDirectory,
{
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            tracing::debug!(reason = %rejection.body_text(), "Unreadable login body");
            return AppError::bad_request(rejection.body_text()).into_response();
        }
    };

    let use_case = LoginUseCase::new(
        state.directory.clone(),
        state.directory.clone(),
        state.directory.clone(),
        state.sessions.clone(),
        state.config.clone(),
    );

    let input = LoginInput {
        user_name: req.username,
        password: req.password,
    };

    match use_case.execute(input) {
        Ok(session) => Json(Envelope::ok(SessionViewResponse::from(&session))).into_response(),
        Err(err) => err.into_response(),
    }
}

/// POST /logout/{token}
pub async fn logout<R>(State(state): State<AuthAppState<R>>, Path(token): Path<String>) -> StatusCode
where
    R: ReferenceDirectory,
{
    LogoutUseCase::new(state.sessions.clone()).execute(&token);
    StatusCode::NO_CONTENT
}

// ============================================================================
// Menu
// ============================================================================

/// GET /menu
///
/// Whitelisted, so it resolves the token itself. Missing and unknown
/// tokens both redirect to the unauthorized URL.
pub async fn menu<R>(State(state): State<AuthAppState<R>>, headers: HeaderMap) -> Response
where
    R: ReferenceDirectory,
{
    let token = extract_header(&headers, &state.config.token_header);
    let use_case = CurrentSessionUseCase::new(state.sessions.clone());

    match use_case.execute(token.as_deref()) {
        Ok(session) => Json(Envelope::ok(SessionViewResponse::from(&session))).into_response(),
        Err(err @ (AuthError::MissingToken | AuthError::UnknownOrExpiredToken)) => {
            let location = state
                .config
                .resolve_url(&*state.directory, RedirectTarget::Unauthorized);
            redirect_response(StatusCode::UNAUTHORIZED, &location, &err)
        }
        Err(err) => err.into_response(),
    }
}

// ============================================================================
// Health / Admin
// ============================================================================

/// GET /health
pub async fn health() -> Json<Envelope<&'static str>> {
    Json(Envelope::ok("ok"))
}

/// POST /admin/reload-cache
pub async fn reload_cache<R>(
    State(state): State<AuthAppState<R>>,
) -> AuthResult<Json<Envelope<&'static str>>>
where
    R: ReferenceDirectory,
{
    ReloadCacheUseCase::new(state.directory.clone())
        .execute()
        .await?;

    Ok(Json(Envelope::ok("reloaded")))
}
