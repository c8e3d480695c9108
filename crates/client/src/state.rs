//! Published synchronization state.

use shopsync_core::{Collection, Product};

use crate::error::SyncError;

/// Advisory notice - a successful operation whose result deserves a
/// user-visible message. Not an error: connection state is unaffected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// The collection listing decoded successfully but was empty.
    NoCollections,
    /// The product listing decoded successfully but was empty.
    NoProducts,
    /// The selected collection has no member products.
    NoCollectionProducts,
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoCollections => f.write_str("No collections found"),
            Self::NoProducts => f.write_str("No products found"),
            Self::NoCollectionProducts => f.write_str("No products in this collection"),
        }
    }
}

/// Snapshot of the synchronization state observed by the presentation
/// layer.
///
/// Snapshots are published whole: every mutation replaces the previous
/// snapshot atomically, so an observer never sees a mix of old and new
/// entries in any list.
#[derive(Debug, Clone, Default)]
pub struct SyncState {
    /// Whether the last connectivity probe succeeded.
    pub is_connected: bool,
    /// A connectivity probe is in flight.
    pub verifying: bool,
    /// A collection listing fetch is in flight.
    pub loading_collections: bool,
    /// A product listing fetch is in flight.
    pub loading_products: bool,
    /// A collection-membership fetch is in flight.
    pub loading_collection_products: bool,
    /// Terminal failure of the most recent operation, cleared at the
    /// start of any new operation.
    pub last_error: Option<SyncError>,
    /// Advisory notice from the most recent operation.
    pub notice: Option<Notice>,
    /// Current collection listing.
    pub collections: Vec<Collection>,
    /// Current product listing.
    pub products: Vec<Product>,
    /// The collection targeted by the most recent membership fetch,
    /// recorded before that fetch starts.
    pub selected_collection: Option<Collection>,
    /// Products belonging to `selected_collection`.
    pub collection_products: Vec<Product>,
}

impl SyncState {
    /// Whether any operation is currently in flight.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.verifying
            || self.loading_collections
            || self.loading_products
            || self.loading_collection_products
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_idle_and_disconnected() {
        let state = SyncState::default();
        assert!(!state.is_connected);
        assert!(!state.is_busy());
        assert!(state.last_error.is_none());
        assert!(state.notice.is_none());
        assert!(state.collections.is_empty());
    }

    #[test]
    fn test_notice_display() {
        assert_eq!(Notice::NoCollections.to_string(), "No collections found");
    }
}
