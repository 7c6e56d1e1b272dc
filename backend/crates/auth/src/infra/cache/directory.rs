//! Reference Directory backed by in-memory caches
//!
//! Holds one [`ReferenceCache`] per reference table and answers the
//! credential, role and config lookups from them. A reload reads every
//! table first and only then swaps the caches, so a failed read leaves the
//! previous contents in place.

use std::collections::HashMap;
use std::sync::Arc;

use kernel::id::{MenuId, PermissionId, RoleId, WebUserId};
use tokio::sync::Mutex;

use crate::domain::entity::role::{MenuEntry, Permission, Role, RoleAccess, RoleGrant};
use crate::domain::entity::web_user::WebUser;
use crate::domain::repository::{
    CacheReload, ConfigLookup, CredentialDirectory, ReferenceSource, RoleDirectory,
};
use crate::domain::value_object::config_key::ConfigKey;
use crate::error::{AuthError, AuthResult};
use crate::infra::cache::reference_cache::ReferenceCache;

pub struct ReferenceCaches<S> {
    source: Arc<S>,
    /// Keyed by login name
    users: ReferenceCache<String, WebUser>,
    roles: ReferenceCache<RoleId, Role>,
    permissions: ReferenceCache<PermissionId, Permission>,
    menu: ReferenceCache<MenuId, MenuEntry>,
    grants: ReferenceCache<RoleId, Vec<PermissionId>>,
    config: ReferenceCache<String, String>,
    reloading: Mutex<()>,
}

impl<S: ReferenceSource + Send + Sync> ReferenceCaches<S> {
    /// Build and populate every cache.
    ///
    /// Fails with `CacheLoadFailure` if any table cannot be read; callers
    /// must not serve traffic without a successful load.
    pub async fn load(source: Arc<S>) -> AuthResult<Self> {
        let caches = Self {
            source,
            users: ReferenceCache::new(),
            roles: ReferenceCache::new(),
            permissions: ReferenceCache::new(),
            menu: ReferenceCache::new(),
            grants: ReferenceCache::new(),
            config: ReferenceCache::new(),
            reloading: Mutex::new(()),
        };

        caches.reload().await.map_err(|e| match e {
            AuthError::CacheLoadFailure(msg) => AuthError::CacheLoadFailure(msg),
            other => AuthError::CacheLoadFailure(other.to_string()),
        })?;

        Ok(caches)
    }

    /// Re-read every table and replace all caches
    pub async fn reload(&self) -> AuthResult<()> {
        let _guard = self.reloading.lock().await;

        let (users, roles, permissions, menu, grants, config) = tokio::try_join!(
            self.source.load_users(),
            self.source.load_roles(),
            self.source.load_permissions(),
            self.source.load_menu(),
            self.source.load_grants(),
            self.source.load_config(),
        )?;

        let counts = (
            users.len(),
            roles.len(),
            permissions.len(),
            menu.len(),
            grants.len(),
            config.len(),
        );

        self.users
            .replace_all(users.into_iter().map(|u| (u.user_name.clone(), u)));
        self.roles.replace_all(roles.into_iter().map(|r| (r.id, r)));
        self.permissions
            .replace_all(permissions.into_iter().map(|p| (p.id, p)));
        self.menu.replace_all(menu.into_iter().map(|m| (m.id, m)));
        self.grants.replace_all(group_grants(grants));
        self.config.replace_all(config);

        tracing::info!(
            users = counts.0,
            roles = counts.1,
            permissions = counts.2,
            menu_entries = counts.3,
            grants = counts.4,
            config_rows = counts.5,
            "Reference caches loaded"
        );

        Ok(())
    }
}

fn group_grants(grants: Vec<RoleGrant>) -> HashMap<RoleId, Vec<PermissionId>> {
    let mut by_role: HashMap<RoleId, Vec<PermissionId>> = HashMap::new();
    for grant in grants {
        by_role
            .entry(grant.role_id)
            .or_default()
            .push(grant.permission_id);
    }
    by_role
}

impl<S: Send + Sync> CredentialDirectory for ReferenceCaches<S> {
    fn find_by_user_name(&self, user_name: &str) -> Option<WebUser> {
        self.users.get(user_name)
    }

    fn find_by_id(&self, user_id: &WebUserId) -> Option<WebUser> {
        self.users
            .snapshot()
            .values()
            .find(|u| u.id == *user_id)
            .cloned()
    }
}

impl<S: Send + Sync> RoleDirectory for ReferenceCaches<S> {
    fn resolve_access(&self, role_id: &RoleId) -> AuthResult<RoleAccess> {
        let role = self
            .roles
            .get(role_id)
            .ok_or_else(|| AuthError::Internal(format!("Role {} not found", role_id)))?;

        if !role.active {
            return Err(AuthError::AccountInactive);
        }

        let granted = self.grants.get(role_id).unwrap_or_default();
        let permissions = self.permissions.snapshot();
        let menu = self.menu.snapshot();

        Ok(RoleAccess::assemble(role, &granted, &permissions, menu.values()))
    }
}

impl<S: Send + Sync> ConfigLookup for ReferenceCaches<S> {
    fn get(&self, key: ConfigKey) -> Option<String> {
        self.config.get(key.as_str())
    }
}

impl<S: ReferenceSource + Send + Sync> CacheReload for ReferenceCaches<S> {
    async fn reinit_cache(&self) -> AuthResult<()> {
        self.reload().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::fixtures::{alice_source, ALICE_PASSWORD};
    use platform::password::ClearTextPassword;

    #[tokio::test]
    async fn test_load_populates_every_lookup() {
        let source = Arc::new(alice_source());
        let caches = ReferenceCaches::load(Arc::clone(&source)).await.unwrap();

        let alice = caches.find_by_user_name("alice").unwrap();
        assert!(alice
            .password
            .verify(&ClearTextPassword::new(ALICE_PASSWORD.to_string()).unwrap()));
        assert_eq!(caches.find_by_id(&alice.id).unwrap().user_name, "alice");

        let access = caches.resolve_access(&alice.role_id).unwrap();
        assert_eq!(access.role.name, "admin");
        assert!(access.permissions.iter().any(|g| g.contains("/reports")));

        assert_eq!(caches.get(ConfigKey::ForbiddenUrl).as_deref(), Some("/403"));
        assert_eq!(
            caches.get(ConfigKey::SessionTimeoutMinute).as_deref(),
            Some("30")
        );
    }

    #[tokio::test]
    async fn test_initial_load_failure_is_fatal() {
        let source = alice_source();
        source.fail_next_loads(true);

        let result = ReferenceCaches::load(Arc::new(source)).await;

        assert!(matches!(result, Err(AuthError::CacheLoadFailure(_))));
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_previous_contents() {
        let source = Arc::new(alice_source());
        let caches = ReferenceCaches::load(Arc::clone(&source)).await.unwrap();

        source.fail_next_loads(true);
        assert!(caches.reinit_cache().await.is_err());

        assert!(caches.find_by_user_name("alice").is_some());
        assert_eq!(caches.get(ConfigKey::LoginUrl).as_deref(), Some("/login"));
    }

    #[tokio::test]
    async fn test_reload_picks_up_changes() {
        let source = Arc::new(alice_source());
        let caches = ReferenceCaches::load(Arc::clone(&source)).await.unwrap();

        source.set_config("FORBIDDEN_URL", "/denied");
        source.remove_user("alice");
        caches.reinit_cache().await.unwrap();

        assert_eq!(caches.get(ConfigKey::ForbiddenUrl).as_deref(), Some("/denied"));
        assert!(caches.find_by_user_name("alice").is_none());
    }

    #[tokio::test]
    async fn test_inactive_or_missing_role() {
        let source = Arc::new(alice_source());
        let caches = ReferenceCaches::load(Arc::clone(&source)).await.unwrap();

        assert!(matches!(
            caches.resolve_access(&RoleId::new()),
            Err(AuthError::Internal(_))
        ));

        let role_id = caches.find_by_user_name("alice").unwrap().role_id;
        source.set_role_active(role_id, false);
        caches.reinit_cache().await.unwrap();

        assert!(matches!(
            caches.resolve_access(&role_id),
            Err(AuthError::AccountInactive)
        ));
    }
}
