//! Product records from the Admin API.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{ImageId, ProductId, VariantId};

/// A product with its variants and images.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// URL handle (slug).
    pub handle: String,
    /// Vendor / brand name.
    pub vendor: String,
    /// Product type / category.
    pub product_type: String,
    /// Lifecycle status (e.g. "active", "draft", "archived").
    pub status: String,
    /// Publication timestamp, absent for unpublished products.
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Variants in position order.
    pub variants: Vec<ProductVariant>,
    /// Images in display order.
    pub images: Vec<ProductImage>,
}

impl Product {
    /// Format the price range across all variants.
    ///
    /// Prices come from the API as decimal strings and are parsed as
    /// `Decimal` only to compute min/max - never as binary floats, so the
    /// source scale is preserved ("10.00" stays "10.00"). When min and max
    /// are equal the range collapses to a single value.
    ///
    /// Returns `None` when the product has no variants or a price does not
    /// parse as a decimal.
    #[must_use]
    pub fn price_range(&self) -> Option<String> {
        let prices: Vec<Decimal> = self
            .variants
            .iter()
            .map(|v| v.price.parse::<Decimal>().ok())
            .collect::<Option<Vec<_>>>()?;

        let min = prices.iter().min()?;
        let max = prices.iter().max()?;

        if min == max {
            Some(format!("${min}"))
        } else {
            Some(format!("${min} - ${max}"))
        }
    }
}

impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Product {}

/// A product variant - a specific purchasable combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariant {
    /// Unique variant ID.
    pub id: VariantId,
    /// Variant title (combination of option values).
    pub title: String,
    /// Price as a decimal string (preserves precision).
    pub price: String,
    /// SKU code, absent when not assigned.
    #[serde(default)]
    pub sku: Option<String>,
    /// 1-based position within the product.
    pub position: i32,
    /// Tracked inventory quantity.
    pub inventory_quantity: i64,
}

/// An image attached to a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    /// Unique image ID.
    pub id: ImageId,
    /// Image URL.
    pub src: String,
    /// Width in pixels.
    pub width: i64,
    /// Height in pixels.
    pub height: i64,
    /// Alt text, absent when not provided.
    #[serde(default)]
    pub alt: Option<String>,
}
