//! Collect records - the product/collection join table.

use serde::{Deserialize, Serialize};

use super::id::{CollectId, CollectionId, ProductId};

/// A collect: the membership link associating one product with one
/// collection.
///
/// Collects are fetched transiently to resolve a collection's product
/// membership and are never persisted - only their `product_id` values
/// feed into the batched product lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collect {
    /// Unique collect ID.
    pub id: CollectId,
    /// The product this link points at.
    pub product_id: ProductId,
    /// The collection this link belongs to.
    pub collection_id: CollectionId,
}
