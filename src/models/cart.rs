//! Cart models.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::models::common::{deserialize_nodes, Money};

/// A validated add-to-cart request.
///
/// The constructor guarantees a non-empty variant ID and a quantity of at
/// least one, so a `LineItemInput` can always be submitted.
///
/// # Example
///
/// ```rust
/// use storefront::models::LineItemInput;
/// use storefront::ValidationError;
///
/// assert!(LineItemInput::new("gid://shopify/ProductVariant/1", 2).is_ok());
/// assert_eq!(LineItemInput::new("", 1), Err(ValidationError::EmptyVariantId));
/// assert_eq!(LineItemInput::new("gid://shopify/ProductVariant/1", 0), Err(ValidationError::ZeroQuantity));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemInput {
    #[serde(rename = "merchandiseId")]
    variant_id: String,
    quantity: u32,
}

impl LineItemInput {
    /// Validates and creates a line item.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyVariantId`] for a blank variant ID and
    /// [`ValidationError::ZeroQuantity`] for a zero quantity.
    pub fn new(variant_id: impl Into<String>, quantity: u32) -> Result<Self, ValidationError> {
        let variant_id = variant_id.into();
        if variant_id.trim().is_empty() {
            return Err(ValidationError::EmptyVariantId);
        }
        if quantity == 0 {
            return Err(ValidationError::ZeroQuantity);
        }
        Ok(Self {
            variant_id,
            quantity,
        })
    }

    /// Returns the variant (merchandise) ID.
    #[must_use]
    pub fn variant_id(&self) -> &str {
        &self.variant_id
    }

    /// Returns the quantity.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// The variant behind a cart line.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartMerchandise {
    /// Variant global ID.
    pub id: String,
    /// Variant title.
    #[serde(default)]
    pub title: String,
}

/// A line in the cart.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Line global ID.
    pub id: String,
    /// Quantity of the variant.
    pub quantity: u32,
    /// The variant.
    pub merchandise: CartMerchandise,
}

/// Cart totals.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartCost {
    /// Total before taxes and shipping.
    pub subtotal_amount: Money,
    /// Total amount.
    pub total_amount: Money,
}

/// A Storefront cart, as returned by `cartCreate` and `cartLinesAdd`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Cart global ID, reused for subsequent additions.
    pub id: String,
    /// Hosted checkout page.
    pub checkout_url: String,
    /// Number of items across all lines.
    #[serde(default)]
    pub total_quantity: u32,
    /// Cart lines.
    #[serde(deserialize_with = "deserialize_nodes")]
    pub lines: Vec<CartLine>,
    /// Totals, when requested.
    #[serde(default)]
    pub cost: Option<CartCost>,
}

impl Cart {
    /// Returns the line for a variant, if present.
    #[must_use]
    pub fn line_for(&self, variant_id: &str) -> Option<&CartLine> {
        self.lines
            .iter()
            .find(|line| line.merchandise.id == variant_id)
    }
}
