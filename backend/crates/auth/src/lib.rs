//! Auth (Session Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, capability traits
//! - `application/` - Use cases: login, logout, authorization, sweeping
//! - `infra/` - Session registry, reference caches, PostgreSQL source
//! - `presentation/` - HTTP handlers, DTOs, middleware, router
//!
//! ## Features
//! - Username + password login against cached credentials
//! - In-memory sessions keyed by an opaque header token
//! - Sliding expiration, with a background sweeper for idle sessions
//! - Per-path authorization from role permission groups
//!
//! ## Security Model
//! - Salted SHA-256 digests compared in constant time
//! - 128-bit random tokens from the OS generator
//! - Unknown user and wrong password are indistinguishable to callers

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::expiry_sweeper::{ExpirySweeper, SweeperHandle};
pub use error::{AuthError, AuthResult};
pub use infra::cache::ReferenceCaches;
pub use infra::postgres::PgReferenceSource;
pub use infra::session_registry::SessionRegistry;
pub use presentation::handlers::AuthAppState;
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
