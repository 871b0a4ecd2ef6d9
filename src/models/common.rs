//! Shared Storefront value types.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Image shown for products that have no images of their own.
pub const DEFAULT_PRODUCT_IMAGE: &str =
    "http://www.netum.vn/public/default/img/icon/default-product-image.png";

/// A monetary amount in a given currency.
///
/// The Storefront API returns amounts as decimal strings; they are kept as
/// such to avoid rounding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    /// Decimal amount, e.g. `"29.99"`.
    pub amount: String,
    /// ISO 4217 currency code, e.g. `"USD"`.
    pub currency_code: String,
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency_code)
    }
}

/// A product image.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// Image URL.
    pub url: String,
    /// Alt text, if the merchant set one.
    #[serde(default)]
    pub alt_text: Option<String>,
}

/// Source and alt text ready for an `<img>` tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageRef<'a> {
    /// Image URL.
    pub src: &'a str,
    /// Alt text (empty when none).
    pub alt: &'a str,
}

impl<'a> ImageRef<'a> {
    /// Returns the first image, or [`DEFAULT_PRODUCT_IMAGE`] with empty alt text.
    #[must_use]
    pub fn first_or_default(images: &'a [Image]) -> Self {
        images.first().map_or(
            Self {
                src: DEFAULT_PRODUCT_IMAGE,
                alt: "",
            },
            |image| Self {
                src: &image.url,
                alt: image.alt_text.as_deref().unwrap_or_default(),
            },
        )
    }
}

/// Relay-style page information.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Whether more items follow this page.
    #[serde(default)]
    pub has_next_page: bool,
    /// Cursor of the last item on this page.
    #[serde(default)]
    pub end_cursor: Option<String>,
}

/// An edge of a GraphQL connection.
#[derive(Clone, Debug, Deserialize)]
pub struct Edge<T> {
    /// Opaque pagination cursor of this item.
    #[serde(default)]
    pub cursor: Option<String>,
    /// The item.
    pub node: T,
}

/// A GraphQL connection (`{ edges { cursor node } pageInfo }`).
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    /// The edges of this page.
    pub edges: Vec<Edge<T>>,
    /// Page information, when requested.
    #[serde(default)]
    pub page_info: PageInfo,
}

impl<T> Connection<T> {
    /// Returns the cursor of the last edge, falling back to `pageInfo.endCursor`.
    #[must_use]
    pub fn last_cursor(&self) -> Option<&str> {
        self.edges
            .last()
            .and_then(|edge| edge.cursor.as_deref())
            .or(self.page_info.end_cursor.as_deref())
    }
}

/// Deserializes a connection into just its nodes.
pub(crate) fn deserialize_nodes<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let connection = Connection::<T>::deserialize(deserializer)?;
    Ok(connection.edges.into_iter().map(|edge| edge.node).collect())
}
