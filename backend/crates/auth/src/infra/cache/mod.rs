//! In-memory reference caches

pub mod directory;
pub mod reference_cache;

pub use directory::ReferenceCaches;
pub use reference_cache::ReferenceCache;
