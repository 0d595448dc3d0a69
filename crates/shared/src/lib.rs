//! Shared utilities and common types for the Bookline backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Cryptographic utilities (API key hashing and generation)
//! - Page-based pagination types
//! - Common validation logic

pub mod crypto;
pub mod pagination;
pub mod validation;
