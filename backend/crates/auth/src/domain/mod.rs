//! Domain Layer
//!
//! Contains entities, value objects, and the capability traits the
//! application layer consumes.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{role::RoleAccess, session::Session, web_user::WebUser};
pub use repository::{
    CacheReload, ConfigLookup, CredentialDirectory, ReferenceDirectory, ReferenceSource,
    RoleDirectory,
};
