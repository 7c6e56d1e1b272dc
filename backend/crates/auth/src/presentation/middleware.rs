//! Auth Middleware
//!
//! Runs the authorization gate on every request and turns its decision
//! into either a pass-through or a redirect.

use axum::Json;
use axum::extract::{Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use kernel::envelope::Envelope;

use platform::header::extract_header;

use crate::application::{AuthorizationGate, RedirectTarget};
use crate::domain::repository::ReferenceDirectory;
use crate::error::AuthError;
use crate::presentation::handlers::AuthAppState;

/// Middleware that requires a session permitted for the request path.
///
/// On success the resolved `Session` is placed in request extensions.
pub async fn authorize<R>(
    State(state): State<AuthAppState<R>>,
    mut req: Request,
    next: Next,
) -> Response
where
    R: ReferenceDirectory,
{
    let token = extract_header(req.headers(), &state.config.token_header).unwrap_or_default();
    let path = req.uri().path().to_string();

    let gate = AuthorizationGate::new(state.sessions.clone(), state.config.clone());

    let err = match gate.check(&token, &path).into_result() {
        Ok(None) => return next.run(req).await,
        Ok(Some(session)) => {
            req.extensions_mut().insert(session);
            return next.run(req).await;
        }
        Err(err) => err,
    };

    let Some((status, target)) = redirect_for(&err) else {
        return err.into_response();
    };

    let location = state.config.resolve_url(&*state.directory, target);
    tracing::debug!(path = %path, status = status.as_u16(), location = %location, "Request redirected");

    redirect_response(status, &location, &err)
}

/// Status and redirect row for a gate refusal
fn redirect_for(err: &AuthError) -> Option<(StatusCode, RedirectTarget)> {
    match err {
        AuthError::MissingToken => Some((StatusCode::MOVED_PERMANENTLY, RedirectTarget::Login)),
        AuthError::UnknownOrExpiredToken => {
            Some((StatusCode::UNAUTHORIZED, RedirectTarget::Unauthorized))
        }
        AuthError::PathNotPermitted => Some((StatusCode::FORBIDDEN, RedirectTarget::Forbidden)),
        _ => None,
    }
}

/// `Location` header plus a failed envelope naming the reason
pub(crate) fn redirect_response(status: StatusCode, location: &str, err: &AuthError) -> Response {
    let body = Json(Envelope::<()>::failed(err.public_message()));

    match header::HeaderValue::from_str(location) {
        Ok(value) => (status, [(header::LOCATION, value)], body).into_response(),
        Err(_) => {
            tracing::warn!(location = %location, "Redirect target is not a valid header value");
            (status, body).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_for_gate_refusals() {
        assert_eq!(
            redirect_for(&AuthError::MissingToken),
            Some((StatusCode::MOVED_PERMANENTLY, RedirectTarget::Login))
        );
        assert_eq!(
            redirect_for(&AuthError::UnknownOrExpiredToken),
            Some((StatusCode::UNAUTHORIZED, RedirectTarget::Unauthorized))
        );
        assert_eq!(
            redirect_for(&AuthError::PathNotPermitted),
            Some((StatusCode::FORBIDDEN, RedirectTarget::Forbidden))
        );
        assert_eq!(redirect_for(&AuthError::InvalidCredentials), None);
    }
}
