//! Collection records from the Admin API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::CollectionId;

/// A custom collection - a named grouping of products in the catalog.
///
/// Identity is the `id`; two collections with the same ID compare equal
/// regardless of other fields. A fetched listing always replaces the
/// previous one wholesale, so records are immutable once decoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    /// Unique, stable collection ID.
    pub id: CollectionId,
    /// Display title.
    pub title: String,
    /// URL handle (slug).
    pub handle: String,
    /// Publication scope (e.g. "web", "global").
    pub published_scope: String,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Collection image, absent when none is set.
    #[serde(default)]
    pub image: Option<CollectionImage>,
}

impl PartialEq for Collection {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Collection {}

impl std::hash::Hash for Collection {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Image attached to a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionImage {
    /// Image URL.
    pub src: String,
    /// Width in pixels.
    pub width: i64,
    /// Height in pixels.
    pub height: i64,
    /// Alt text, absent when not provided.
    #[serde(default)]
    pub alt: Option<String>,
    /// Upload timestamp.
    pub created_at: DateTime<Utc>,
}
