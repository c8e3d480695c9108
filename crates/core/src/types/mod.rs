//! Catalog types for ShopSync.
//!
//! These mirror the Admin API wire format (snake_case JSON fields,
//! ISO-8601 timestamps) while staying ergonomic on the Rust side.

pub mod collect;
pub mod collection;
pub mod id;
pub mod product;

pub use collect::Collect;
pub use collection::{Collection, CollectionImage};
pub use id::*;
pub use product::{Product, ProductImage, ProductVariant};
