//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::entity::role::{MenuGroup, MenuItem};
use crate::domain::entity::session::Session;

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// ============================================================================
// Session View
// ============================================================================

/// What the client learns about its session. No credential material.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionViewResponse {
    pub token: String,
    pub username: String,
    pub display_name: String,
    pub role_name: String,
    pub menu: Vec<MenuGroupDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MenuGroupDto {
    pub name: String,
    pub icon: String,
    pub items: Vec<MenuItemDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MenuItemDto {
    pub name: String,
    pub path: String,
    pub icon: String,
}

impl From<&Session> for SessionViewResponse {
    fn from(session: &Session) -> Self {
        Self {
            token: session.token.as_str().to_string(),
            username: session.user_name.clone(),
            display_name: session.display_name.clone(),
            role_name: session.role_name.clone(),
            menu: session.menu.iter().map(MenuGroupDto::from).collect(),
        }
    }
}

impl From<&MenuGroup> for MenuGroupDto {
    fn from(group: &MenuGroup) -> Self {
        Self {
            name: group.name.clone(),
            icon: group.icon.clone(),
            items: group.items.iter().map(MenuItemDto::from).collect(),
        }
    }
}

impl From<&MenuItem> for MenuItemDto {
    fn from(item: &MenuItem) -> Self {
        Self {
            name: item.name.clone(),
            path: item.path.clone(),
            icon: item.icon.clone(),
        }
    }
}
