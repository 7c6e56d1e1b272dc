//! Capability Traits
//!
//! `ReferenceSource` is the persistent store, read in bulk. The directory
//! traits are what login and authorization consume; they are answered from
//! in-memory reference caches and never touch the store per request.

use kernel::id::{RoleId, WebUserId};

use crate::domain::entity::role::{MenuEntry, Permission, Role, RoleAccess, RoleGrant};
use crate::domain::entity::web_user::WebUser;
use crate::domain::value_object::config_key::ConfigKey;
use crate::error::AuthResult;

/// Bulk loaders for every reference table
#[trait_variant::make(ReferenceSource: Send)]
pub trait LocalReferenceSource {
    async fn load_users(&self) -> AuthResult<Vec<WebUser>>;

    async fn load_roles(&self) -> AuthResult<Vec<Role>>;

    async fn load_permissions(&self) -> AuthResult<Vec<Permission>>;

    async fn load_menu(&self) -> AuthResult<Vec<MenuEntry>>;

    async fn load_grants(&self) -> AuthResult<Vec<RoleGrant>>;

    /// All `(key, value)` config rows
    async fn load_config(&self) -> AuthResult<Vec<(String, String)>>;
}

/// Credential lookup
pub trait CredentialDirectory: Send + Sync {
    fn find_by_user_name(&self, user_name: &str) -> Option<WebUser>;

    fn find_by_id(&self, user_id: &WebUserId) -> Option<WebUser>;
}

/// Role, menu and permission lookup
pub trait RoleDirectory: Send + Sync {
    /// Resolve the role's menu tree and permission path groups.
    ///
    /// Fails with `AccountInactive` when the role is disabled.
    fn resolve_access(&self, role_id: &RoleId) -> AuthResult<RoleAccess>;
}

/// Key-value configuration lookup
pub trait ConfigLookup: Send + Sync {
    fn get(&self, key: ConfigKey) -> Option<String>;
}

/// Wholesale reload of every reference cache
#[trait_variant::make(CacheReload: Send)]
pub trait LocalCacheReload {
    async fn reinit_cache(&self) -> AuthResult<()>;
}

/// Everything the HTTP layer needs from reference data
pub trait ReferenceDirectory:
    CredentialDirectory + RoleDirectory + ConfigLookup + CacheReload + Send + Sync + 'static
{
}

impl<T> ReferenceDirectory for T where
    T: CredentialDirectory + RoleDirectory + ConfigLookup + CacheReload + Send + Sync + 'static
{
}
