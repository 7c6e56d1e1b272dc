//! Web User Entity
//!
//! Back-office login identity. Owned by the credential store; this
//! subsystem only reads it.

use kernel::id::{RoleId, WebUserId};
use platform::password::SaltedDigest;

#[derive(Debug, Clone)]
pub struct WebUser {
    pub id: WebUserId,
    /// Display name
    pub name: String,
    /// Login name (unique)
    pub user_name: String,
    /// Stored digest and salt
    pub password: SaltedDigest,
    pub role_id: RoleId,
    pub active: bool,
}

impl WebUser {
    /// Check if user can login
    pub fn can_login(&self) -> bool {
        self.active
    }
}
