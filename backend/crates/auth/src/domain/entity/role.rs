//! Role, Permission and Menu Entities
//!
//! Reference data resolved once per login into a [`RoleAccess`] snapshot.
//! The snapshot is never re-resolved for the lifetime of the session.

use std::collections::{HashMap, HashSet};

use kernel::id::{MenuId, PermissionId, RoleId};

use crate::domain::value_object::permission_group::PermissionGroup;

#[derive(Debug, Clone)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct Permission {
    pub id: PermissionId,
    pub name: String,
    /// Front-end route the menu leaf opens
    pub outcome: String,
    /// API paths this permission allows
    pub paths: PermissionGroup,
}

/// One row of the menu table. Rows without a parent are groups; rows with a
/// parent are leaves bound to a permission.
#[derive(Debug, Clone)]
pub struct MenuEntry {
    pub id: MenuId,
    pub parent_id: Option<MenuId>,
    pub name: String,
    pub icon: String,
    pub permission_id: Option<PermissionId>,
    pub sort_order: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleGrant {
    pub role_id: RoleId,
    pub permission_id: PermissionId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub name: String,
    pub path: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuGroup {
    pub name: String,
    pub icon: String,
    pub items: Vec<MenuItem>,
}

/// What a role may see and call, as of login time
#[derive(Debug, Clone)]
pub struct RoleAccess {
    pub role: Role,
    pub menu: Vec<MenuGroup>,
    pub permissions: Vec<PermissionGroup>,
}

impl RoleAccess {
    /// Build the snapshot for `role` from its granted permission ids.
    ///
    /// Grants pointing at unknown permissions are ignored. Groups end up in
    /// the tree only if at least one of their leaves is granted.
    pub fn assemble<'a>(
        role: Role,
        granted: &[PermissionId],
        permissions: &HashMap<PermissionId, Permission>,
        menu: impl IntoIterator<Item = &'a MenuEntry>,
    ) -> Self {
        let mut seen = HashSet::new();
        let granted: Vec<&Permission> = granted
            .iter()
            .filter(|id| seen.insert(**id))
            .filter_map(|id| permissions.get(id))
            .collect();
        let granted_ids: HashSet<PermissionId> = granted.iter().map(|p| p.id).collect();

        let mut entries: Vec<&MenuEntry> = menu.into_iter().collect();
        entries.sort_by(|a, b| (a.sort_order, &a.name).cmp(&(b.sort_order, &b.name)));

        let menu = entries
            .iter()
            .filter(|e| e.parent_id.is_none())
            .filter_map(|group| {
                let items: Vec<MenuItem> = entries
                    .iter()
                    .filter(|leaf| leaf.parent_id == Some(group.id))
                    .filter_map(|leaf| {
                        let pid = leaf.permission_id.filter(|pid| granted_ids.contains(pid))?;
                        let permission = permissions.get(&pid)?;
                        Some(MenuItem {
                            name: leaf.name.clone(),
                            path: permission.outcome.clone(),
                            icon: leaf.icon.clone(),
                        })
                    })
                    .collect();

                (!items.is_empty()).then(|| MenuGroup {
                    name: group.name.clone(),
                    icon: group.icon.clone(),
                    items,
                })
            })
            .collect();

        Self {
            role,
            menu,
            permissions: granted.into_iter().map(|p| p.paths.clone()).collect(),
        }
    }
}
