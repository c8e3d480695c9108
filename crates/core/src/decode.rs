//! JSON payload decoding for Admin API responses.
//!
//! Each listing endpoint wraps its records in a single-key envelope
//! (`{"custom_collections": [...]}`, `{"products": [...]}`,
//! `{"collects": [...]}`). The decoders unwrap the envelope and return
//! the records, failing the whole decode when any required field is
//! missing. Unknown fields are ignored.

use serde::Deserialize;
use thiserror::Error;

use crate::types::{Collect, Collection, Product};

/// Which payload kind a decode was attempting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    /// A `custom_collections` listing.
    Collections,
    /// A `products` listing.
    Products,
    /// A `collects` listing.
    Collects,
}

impl std::fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Collections => f.write_str("collections"),
            Self::Products => f.write_str("products"),
            Self::Collects => f.write_str("collects"),
        }
    }
}

/// Decode failure for a catalog payload.
///
/// The underlying `serde_json` error carries the failing field and the
/// line/column position, which is surfaced verbatim for diagnostics.
#[derive(Debug, Error)]
#[error("invalid {kind} payload: {source}")]
pub struct DecodeError {
    /// Payload kind that failed to decode.
    pub kind: PayloadKind,
    source: serde_json::Error,
}

#[derive(Deserialize)]
struct CollectionsEnvelope {
    custom_collections: Vec<Collection>,
}

#[derive(Deserialize)]
struct ProductsEnvelope {
    products: Vec<Product>,
}

#[derive(Deserialize)]
struct CollectsEnvelope {
    collects: Vec<Collect>,
}

/// Decode a custom-collections listing payload.
///
/// # Errors
///
/// Returns `DecodeError` when the body is not a well-formed collections
/// envelope or any record is missing a required field.
pub fn decode_collections(bytes: &[u8]) -> Result<Vec<Collection>, DecodeError> {
    serde_json::from_slice::<CollectionsEnvelope>(bytes)
        .map(|envelope| envelope.custom_collections)
        .map_err(|source| DecodeError {
            kind: PayloadKind::Collections,
            source,
        })
}

/// Decode a products listing payload.
///
/// # Errors
///
/// Returns `DecodeError` when the body is not a well-formed products
/// envelope or any record is missing a required field.
pub fn decode_products(bytes: &[u8]) -> Result<Vec<Product>, DecodeError> {
    serde_json::from_slice::<ProductsEnvelope>(bytes)
        .map(|envelope| envelope.products)
        .map_err(|source| DecodeError {
            kind: PayloadKind::Products,
            source,
        })
}

/// Decode a collects listing payload.
///
/// # Errors
///
/// Returns `DecodeError` when the body is not a well-formed collects
/// envelope or any record is missing a required field.
pub fn decode_collects(bytes: &[u8]) -> Result<Vec<Collect>, DecodeError> {
    serde_json::from_slice::<CollectsEnvelope>(bytes)
        .map(|envelope| envelope.collects)
        .map_err(|source| DecodeError {
            kind: PayloadKind::Collects,
            source,
        })
}
