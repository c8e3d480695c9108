//! ShopSync Core - Catalog types and pure data transforms.
//!
//! This crate provides the types shared across all ShopSync components:
//! - `client` - Admin API client and sync orchestrator
//! - `cli` - Command-line front-end
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no async. This keeps it lightweight and fully testable without
//! any network access.
//!
//! # Modules
//!
//! - [`types`] - Catalog records (collections, products, collects) and
//!   type-safe ID newtypes
//! - [`decode`] - JSON payload decoding with diagnostic errors
//! - [`export`] - CSV export formatting

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod decode;
pub mod export;
pub mod types;

pub use decode::{DecodeError, decode_collections, decode_collects, decode_products};
pub use types::*;
