//! Infrastructure Layer
//!
//! Database reads, in-memory caches and the session store.

pub mod cache;
pub mod postgres;
pub mod session_registry;

pub use cache::{ReferenceCache, ReferenceCaches};
pub use postgres::PgReferenceSource;
pub use session_registry::{Lookup, SessionRegistry};
