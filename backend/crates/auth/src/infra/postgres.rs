//! PostgreSQL Reference Source
//!
//! Bulk reads of the reference tables. Only the cache reload path calls
//! these; nothing here runs per request.

use platform::password::SaltedDigest;
use sqlx::PgPool;
use uuid::Uuid;

use kernel::id::{MenuId, PermissionId, RoleId, WebUserId};

use crate::domain::entity::role::{MenuEntry, Permission, Role, RoleGrant};
use crate::domain::entity::web_user::WebUser;
use crate::domain::repository::ReferenceSource;
use crate::domain::value_object::permission_group::PermissionGroup;
use crate::error::AuthResult;

/// PostgreSQL-backed reference source
#[derive(Clone)]
pub struct PgReferenceSource {
    pool: PgPool,
}

impl PgReferenceSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ReferenceSource for PgReferenceSource {
    async fn load_users(&self) -> AuthResult<Vec<WebUser>> {
        let rows = sqlx::query_as::<_, WebUserRow>(
            r#"
            SELECT
                id,
                name,
                username,
                password,
                salt,
                role_id,
                active
            FROM web_user
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(WebUserRow::into_web_user).collect())
    }

    async fn load_roles(&self) -> AuthResult<Vec<Role>> {
        let rows = sqlx::query_as::<_, RoleRow>("SELECT id, name, active FROM role")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| Role {
                id: RoleId::from_uuid(r.id),
                name: r.name,
                active: r.active,
            })
            .collect())
    }

    async fn load_permissions(&self) -> AuthResult<Vec<Permission>> {
        let rows = sqlx::query_as::<_, PermissionRow>(
            "SELECT id, name, outcome, path FROM permission",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| Permission {
                id: PermissionId::from_uuid(r.id),
                name: r.name,
                outcome: r.outcome,
                paths: PermissionGroup::parse(&r.path),
            })
            .collect())
    }

    async fn load_menu(&self) -> AuthResult<Vec<MenuEntry>> {
        let rows = sqlx::query_as::<_, MenuRow>(
            r#"
            SELECT
                id,
                parent_id,
                name,
                icon,
                permission_id,
                sort_order
            FROM menu
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| MenuEntry {
                id: MenuId::from_uuid(r.id),
                parent_id: r.parent_id.map(MenuId::from_uuid),
                name: r.name,
                icon: r.icon.unwrap_or_default(),
                permission_id: r.permission_id.map(PermissionId::from_uuid),
                sort_order: r.sort_order,
            })
            .collect())
    }

    async fn load_grants(&self) -> AuthResult<Vec<RoleGrant>> {
        let rows = sqlx::query_as::<_, (Uuid, Uuid)>(
            "SELECT role_id, permission_id FROM role_permission",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(role_id, permission_id)| RoleGrant {
                role_id: RoleId::from_uuid(role_id),
                permission_id: PermissionId::from_uuid(permission_id),
            })
            .collect())
    }

    async fn load_config(&self) -> AuthResult<Vec<(String, String)>> {
        let rows = sqlx::query_as::<_, (String, String)>(r#"SELECT key, value FROM config"#)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct WebUserRow {
    id: Uuid,
    name: String,
    username: String,
    password: String,
    salt: String,
    role_id: Uuid,
    active: bool,
}

impl WebUserRow {
    fn into_web_user(self) -> WebUser {
        WebUser {
            id: WebUserId::from_uuid(self.id),
            name: self.name,
            user_name: self.username,
            password: SaltedDigest::from_stored(self.password, self.salt),
            role_id: RoleId::from_uuid(self.role_id),
            active: self.active,
        }
    }
}

#[derive(sqlx::FromRow)]
struct RoleRow {
    id: Uuid,
    name: String,
    active: bool,
}

#[derive(sqlx::FromRow)]
struct PermissionRow {
    id: Uuid,
    name: String,
    outcome: String,
    path: String,
}

#[derive(sqlx::FromRow)]
struct MenuRow {
    id: Uuid,
    parent_id: Option<Uuid>,
    name: String,
    icon: Option<String>,
    permission_id: Option<Uuid>,
    sort_order: i32,
}
