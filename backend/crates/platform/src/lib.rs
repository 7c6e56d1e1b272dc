//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (OS randomness, SHA-256, constant-time compare)
//! - Salted password digest verification
//! - Request header extraction

pub mod crypto;
pub mod header;
pub mod password;
