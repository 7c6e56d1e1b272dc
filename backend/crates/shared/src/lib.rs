//! Shared Kernel - Domain-crossing minimal core
//!
//! Vocabulary every back-office crate agrees on:
//! - Error kinds, the unified [`error::app_error::AppError`] and result alias
//! - The `{status, message, data}` response envelope
//! - Typed ID wrappers for reference entities
//!
//! Only things with one meaning across all domains live here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod envelope;
pub mod id;
