//! Value Object Module

pub mod config_key;
pub mod permission_group;
pub mod session_token;
