//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::domain::repository::ReferenceDirectory;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::authorize;

/// Auth routes only, gated
pub fn auth_router<R>(state: AuthAppState<R>) -> Router
where
    R: ReferenceDirectory,
{
    auth_router_with(state, Router::new())
}

/// Auth routes merged with `protected`, all behind the authorization gate.
///
/// The gate also covers the fallback, so unknown paths still need a
/// session. Handlers in `protected` can take `Extension<Session>`.
pub fn auth_router_with<R>(state: AuthAppState<R>, protected: Router<AuthAppState<R>>) -> Router
where
    R: ReferenceDirectory,
{
    Router::new()
        .route("/login", post(handlers::login::<R>))
        .route("/logout/{token}", post(handlers::logout::<R>))
        .route("/menu", get(handlers::menu::<R>))
        .route("/health", get(handlers::health))
        .route("/admin/reload-cache", post(handlers::reload_cache::<R>))
        .merge(protected)
        .layer(middleware::from_fn_with_state(state.clone(), authorize::<R>))
        .with_state(state)
}
