//! CSV export formatting.
//!
//! Pure functions rendering in-memory records to RFC 4180 CSV. Every row
//! carries the full column set: missing optional fields render as an
//! explicit placeholder ("Not published") or an empty field rather than
//! being omitted, so the column count is constant across rows.

use std::borrow::Cow;

use chrono::{DateTime, Utc};

use crate::types::{Collection, Product};

/// Header row for collection exports.
pub const COLLECTION_HEADERS: [&str; 6] = [
    "ID",
    "Title",
    "Handle",
    "Published Scope",
    "Last Updated",
    "Image URL",
];

/// Header row for product exports.
pub const PRODUCT_HEADERS: [&str; 9] = [
    "ID",
    "Title",
    "Handle",
    "Vendor",
    "Type",
    "Status",
    "Published At",
    "Variants",
    "Price Range",
];

/// Medium date-time rendering for exported timestamps.
fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%b %-d, %Y %H:%M:%S").to_string()
}

/// Quote a field per RFC 4180 when it contains the delimiter, a quote,
/// or a line break. Inner quotes are doubled.
fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

fn push_row(out: &mut String, fields: &[Cow<'_, str>]) {
    let mut first = true;
    for field in fields {
        if !first {
            out.push(',');
        }
        out.push_str(field);
        first = false;
    }
    out.push('\n');
}

/// Render a collection listing as CSV, header row first.
#[must_use]
pub fn collections_to_csv(collections: &[Collection]) -> String {
    let mut out = String::new();
    push_row(&mut out, &COLLECTION_HEADERS.map(Cow::Borrowed));

    for collection in collections {
        let updated = format_timestamp(&collection.updated_at);
        let image_url = collection
            .image
            .as_ref()
            .map_or("", |image| image.src.as_str());

        push_row(
            &mut out,
            &[
                Cow::Owned(collection.id.to_string()),
                escape_field(&collection.title),
                escape_field(&collection.handle),
                escape_field(&collection.published_scope),
                escape_field(&updated),
                escape_field(image_url),
            ],
        );
    }

    out
}

/// Render a product listing as CSV, header row first.
#[must_use]
pub fn products_to_csv(products: &[Product]) -> String {
    let mut out = String::new();
    push_row(&mut out, &PRODUCT_HEADERS.map(Cow::Borrowed));

    for product in products {
        let published = product
            .published_at
            .as_ref()
            .map_or_else(|| "Not published".to_string(), format_timestamp);
        let price_range = product.price_range().unwrap_or_default();

        push_row(
            &mut out,
            &[
                Cow::Owned(product.id.to_string()),
                escape_field(&product.title),
                escape_field(&product.handle),
                escape_field(&product.vendor),
                escape_field(&product.product_type),
                escape_field(&product.status),
                escape_field(&published),
                Cow::Owned(product.variants.len().to_string()),
                escape_field(&price_range),
            ],
        );
    }

    out
}
