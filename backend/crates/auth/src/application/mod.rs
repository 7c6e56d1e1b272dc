//! Application Layer
//!
//! Use cases and application services.

pub mod authorize;
pub mod config;
pub mod current_session;
pub mod expiry_sweeper;
pub mod login;
pub mod logout;
pub mod reload_cache;

// Re-exports
pub use authorize::{AuthorizationGate, Decision};
pub use config::{AuthConfig, PublicPaths, RedirectTarget};
pub use current_session::CurrentSessionUseCase;
pub use expiry_sweeper::{ExpirySweeper, SweeperHandle};
pub use login::{LoginInput, LoginUseCase};
pub use logout::LogoutUseCase;
pub use reload_cache::ReloadCacheUseCase;
