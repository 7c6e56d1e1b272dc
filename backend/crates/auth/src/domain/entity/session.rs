//! Session Entity
//!
//! Server-side session held in memory by the session registry.
//! Created at login, mutated only to slide its expiry forward, destroyed
//! by logout or by the expiry sweeper.

use chrono::{DateTime, TimeDelta, Utc};
use kernel::id::{RoleId, WebUserId};

use crate::domain::entity::role::{MenuGroup, RoleAccess};
use crate::domain::entity::web_user::WebUser;
use crate::domain::value_object::{
    permission_group::PermissionGroup, session_token::SessionToken,
};

#[derive(Debug, Clone)]
pub struct Session {
    pub token: SessionToken,
    pub user_id: WebUserId,
    pub user_name: String,
    pub display_name: String,
    pub role_id: RoleId,
    pub role_name: String,
    pub expires_at: DateTime<Utc>,
    /// Sliding window captured from config at login
    pub idle_timeout: TimeDelta,
    pub menu: Vec<MenuGroup>,
    pub permissions: Vec<PermissionGroup>,
}

impl Session {
    /// Create a session for `user`; expires `idle_timeout` after `now`
    pub fn new(
        token: SessionToken,
        user: &WebUser,
        access: RoleAccess,
        idle_timeout: TimeDelta,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            token,
            user_id: user.id,
            user_name: user.user_name.clone(),
            display_name: user.name.clone(),
            role_id: access.role.id,
            role_name: access.role.name,
            expires_at: now + idle_timeout,
            idle_timeout,
            menu: access.menu,
            permissions: access.permissions,
        }
    }

    /// Expired once the expiry is strictly before `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }

    /// Slide expiry to `now + idle_timeout`
    pub fn extend_from(&mut self, now: DateTime<Utc>) {
        self.expires_at = now + self.idle_timeout;
    }

    /// Exact membership of `path` in any granted path group
    pub fn permits(&self, path: &str) -> bool {
        self.permissions.iter().any(|group| group.contains(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::role::Role;
    use platform::password::{ClearTextPassword, SaltedDigest};

    fn session(paths: &[&str]) -> Session {
        let user = WebUser {
            id: WebUserId::new(),
            name: "Alice".to_string(),
            user_name: "alice".to_string(),
            password: SaltedDigest::generate(&ClearTextPassword::new("pw".to_string()).unwrap()),
            role_id: RoleId::new(),
            active: true,
        };
        let access = RoleAccess {
            role: Role {
                id: user.role_id,
                name: "admin".to_string(),
                active: true,
            },
            menu: Vec::new(),
            permissions: paths.iter().map(|p| PermissionGroup::parse(*p)).collect(),
        };
        Session::new(
            SessionToken::generate(),
            &user,
            access,
            TimeDelta::minutes(30),
            Utc::now(),
        )
    }

    #[test]
    fn test_permits_any_group() {
        let s = session(&["/orders;/reports", "/stock"]);
        assert!(s.permits("/orders"));
        assert!(s.permits("/stock"));
        assert!(!s.permits("/billing"));
    }

    #[test]
    fn test_expiry_is_strict() {
        let s = session(&[]);
        assert!(!s.is_expired_at(s.expires_at));
        assert!(s.is_expired_at(s.expires_at + TimeDelta::milliseconds(1)));
    }

    #[test]
    fn test_extend_slides_window() {
        let mut s = session(&[]);
        let later = Utc::now() + TimeDelta::minutes(10);
        s.extend_from(later);
        assert_eq!(s.expires_at, later + TimeDelta::minutes(30));
    }
}
