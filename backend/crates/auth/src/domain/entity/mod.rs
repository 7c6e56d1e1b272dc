//! Entity Module

pub mod role;
pub mod session;
pub mod web_user;
