//! Product models.
//!
//! [`Product`] is the full record shown on a product page, while
//! [`ProductSummary`] carries just what a catalog tile needs. Connections
//! returned by the Storefront API (`variants`, `images`) are flattened into
//! plain vectors on deserialization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::common::{deserialize_nodes, Connection, Image, ImageRef, Money};

/// Suffix appended to every page title.
pub const SITE_NAME: &str = "Next Shopify Storefront";

/// Path of the product detail page.
pub const PRODUCT_PATH: &str = "/product";

/// Returns the detail page link for a product handle.
///
/// # Example
///
/// ```rust
/// use storefront::models::product_path;
///
/// assert_eq!(product_path("red shirt"), "/product?handle=red%20shirt");
/// ```
#[must_use]
pub fn product_path(handle: &str) -> String {
    format!("{PRODUCT_PATH}?handle={}", urlencoding::encode(handle))
}

/// A product option such as "Size" or "Color".
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductOption {
    /// Global ID of the option.
    pub id: String,
    /// Option name.
    pub name: String,
    /// Values the option can take, in merchant order.
    #[serde(rename = "optionValues", deserialize_with = "deserialize_option_values")]
    pub values: Vec<String>,
}

#[derive(Deserialize)]
struct OptionValue {
    name: String,
}

fn deserialize_option_values<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let values = Vec::<OptionValue>::deserialize(deserializer)?;
    Ok(values.into_iter().map(|value| value.name).collect())
}

/// One option choice of a variant, e.g. `Size = M`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectedOption {
    /// Option name.
    pub name: String,
    /// Chosen value.
    pub value: String,
}

impl SelectedOption {
    /// Creates a selected option.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A purchasable variant of a product.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    /// Global ID, used as the cart merchandise ID.
    pub id: String,
    /// Variant title, e.g. "M / Red".
    pub title: String,
    /// Option choices that identify this variant.
    pub selected_options: Vec<SelectedOption>,
    /// Unit price.
    pub price: Money,
    /// Whether the variant can currently be bought.
    #[serde(default = "default_available")]
    pub available_for_sale: bool,
}

const fn default_available() -> bool {
    true
}

impl ProductVariant {
    /// Returns `true` if every given choice matches this variant.
    #[must_use]
    pub fn matches(&self, selections: &[SelectedOption]) -> bool {
        selections
            .iter()
            .all(|selection| self.selected_options.contains(selection))
    }
}

/// A product as shown on its detail page.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Global ID.
    pub id: String,
    /// URL handle.
    pub handle: String,
    /// Product title.
    pub title: String,
    /// Plain text description.
    #[serde(default)]
    pub description: String,
    /// Last modification time.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Options, e.g. size and color.
    #[serde(default)]
    pub options: Vec<ProductOption>,
    /// Purchasable variants.
    #[serde(deserialize_with = "deserialize_nodes")]
    pub variants: Vec<ProductVariant>,
    /// Product images.
    #[serde(deserialize_with = "deserialize_nodes")]
    pub images: Vec<Image>,
}

impl Product {
    /// Returns the primary image, falling back to the default product image.
    #[must_use]
    pub fn primary_image(&self) -> ImageRef<'_> {
        ImageRef::first_or_default(&self.images)
    }

    /// Looks up a variant by ID.
    #[must_use]
    pub fn variant(&self, id: &str) -> Option<&ProductVariant> {
        self.variants.iter().find(|variant| variant.id == id)
    }

    /// Resolves the variant matching all of the given option choices.
    ///
    /// Returns `None` until one choice per product option has been made, or
    /// when no variant has that combination.
    #[must_use]
    pub fn variant_for_options(&self, selections: &[SelectedOption]) -> Option<&ProductVariant> {
        let complete = self
            .options
            .iter()
            .all(|option| selections.iter().any(|s| s.name == option.name));
        if !complete {
            return None;
        }

        self.variants.iter().find(|variant| variant.matches(selections))
    }

    /// Returns the HTML page title.
    #[must_use]
    pub fn page_title(&self) -> String {
        format!("{} - {SITE_NAME}", self.title)
    }

    /// Returns the detail page link.
    #[must_use]
    pub fn path(&self) -> String {
        product_path(&self.handle)
    }
}

/// Variant price bounds.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    /// Lowest variant price.
    pub min_variant_price: Money,
}

/// A product as shown in the catalog grid.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    /// Global ID.
    pub id: String,
    /// URL handle.
    pub handle: String,
    /// Product title.
    pub title: String,
    /// Price range across variants.
    pub price_range: PriceRange,
    /// Thumbnail candidates.
    #[serde(deserialize_with = "deserialize_nodes")]
    pub images: Vec<Image>,
}

impl ProductSummary {
    /// Returns the tile image, falling back to the default product image.
    #[must_use]
    pub fn thumbnail(&self) -> ImageRef<'_> {
        ImageRef::first_or_default(&self.images)
    }

    /// Price shown under the tile, e.g. `$29.99`.
    #[must_use]
    pub fn display_price(&self) -> String {
        format!("${}", self.price_range.min_variant_price.amount)
    }

    /// Returns the detail page link.
    #[must_use]
    pub fn path(&self) -> String {
        product_path(&self.handle)
    }
}

/// One page of catalog results.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductListPage {
    /// Products in backend order.
    pub products: Vec<ProductSummary>,
    /// Cursor of the last product, `None` for an empty page.
    pub cursor: Option<String>,
    /// Whether more products follow.
    pub has_next_page: bool,
}

impl From<Connection<ProductSummary>> for ProductListPage {
    fn from(connection: Connection<ProductSummary>) -> Self {
        let cursor = connection.last_cursor().map(String::from);
        let has_next_page = connection.page_info.has_next_page;
        Self {
            products: connection.edges.into_iter().map(|edge| edge.node).collect(),
            cursor,
            has_next_page,
        }
    }
}

/// Storefront `ProductSortKeys`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductSortKeys {
    /// Sort by title.
    Title,
    /// Sort by product type.
    ProductType,
    /// Sort by vendor.
    Vendor,
    /// Sort by last update.
    UpdatedAt,
    /// Sort by creation date.
    CreatedAt,
    /// Sort by sales.
    #[default]
    BestSelling,
    /// Sort by price.
    Price,
    /// Sort by ID.
    Id,
    /// Sort by search relevance.
    Relevance,
}

/// Catalog query: search text plus ordering.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    /// Free text search, empty for all products.
    pub query: String,
    /// Sort key.
    pub sort_key: ProductSortKeys,
    /// Reverse the sort order.
    pub reverse: bool,
}

impl ProductQuery {
    /// Creates a query for the given search text with default ordering.
    #[must_use]
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            query: text.into(),
            ..Self::default()
        }
    }

    /// Applies a sort menu preset.
    #[must_use]
    pub fn sorted_by(mut self, option: SortOption) -> Self {
        let (sort_key, reverse) = option.sort();
        self.sort_key = sort_key;
        self.reverse = reverse;
        self
    }

    /// Search filter sent to the API, `None` when the text is blank.
    #[must_use]
    pub fn filter(&self) -> Option<&str> {
        let trimmed = self.query.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    /// Returns the sort menu entry matching this query's ordering, if any.
    #[must_use]
    pub fn sort_option(&self) -> Option<SortOption> {
        SortOption::ALL
            .into_iter()
            .find(|option| option.sort() == (self.sort_key, self.reverse))
    }
}

/// Entries of the catalog sort menu.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortOption {
    /// Best selling first.
    #[default]
    Featured,
    /// Most relevant to the search text.
    Relevance,
    /// Title A to Z.
    TitleAscending,
    /// Title Z to A.
    TitleDescending,
    /// Cheapest first.
    PriceAscending,
    /// Most expensive first.
    PriceDescending,
    /// Newest first.
    Newest,
}

impl SortOption {
    /// All entries in menu order.
    pub const ALL: [Self; 7] = [
        Self::Featured,
        Self::Relevance,
        Self::TitleAscending,
        Self::TitleDescending,
        Self::PriceAscending,
        Self::PriceDescending,
        Self::Newest,
    ];

    /// Menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Featured => "Featured",
            Self::Relevance => "Relevance",
            Self::TitleAscending => "Alphabetically, A-Z",
            Self::TitleDescending => "Alphabetically, Z-A",
            Self::PriceAscending => "Price, low to high",
            Self::PriceDescending => "Price, high to low",
            Self::Newest => "Date, new to old",
        }
    }

    /// Sort key and direction sent to the API.
    #[must_use]
    pub const fn sort(self) -> (ProductSortKeys, bool) {
        match self {
            Self::Featured => (ProductSortKeys::BestSelling, false),
            Self::Relevance => (ProductSortKeys::Relevance, false),
            Self::TitleAscending => (ProductSortKeys::Title, false),
            Self::TitleDescending => (ProductSortKeys::Title, true),
            Self::PriceAscending => (ProductSortKeys::Price, false),
            Self::PriceDescending => (ProductSortKeys::Price, true),
            Self::Newest => (ProductSortKeys::CreatedAt, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::common::DEFAULT_PRODUCT_IMAGE;
    use serde_json::json;

    fn product_json() -> serde_json::Value {
        json!({
            "id": "gid://shopify/Product/1",
            "handle": "classic-tee",
            "title": "Classic Tee",
            "description": "A soft cotton tee.",
            "updatedAt": "2025-03-01T12:00:00Z",
            "options": [
                { "id": "o1", "name": "Size", "optionValues": [{ "name": "S" }, { "name": "M" }] },
                { "id": "o2", "name": "Color", "optionValues": [{ "name": "Red" }] }
            ],
            "variants": { "edges": [
                { "node": {
                    "id": "gid://shopify/ProductVariant/11",
                    "title": "S / Red",
                    "availableForSale": true,
                    "selectedOptions": [{ "name": "Size", "value": "S" }, { "name": "Color", "value": "Red" }],
                    "price": { "amount": "20.0", "currencyCode": "USD" }
                }},
                { "node": {
                    "id": "gid://shopify/ProductVariant/12",
                    "title": "M / Red",
                    "availableForSale": false,
                    "selectedOptions": [{ "name": "Size", "value": "M" }, { "name": "Color", "value": "Red" }],
                    "price": { "amount": "22.0", "currencyCode": "USD" }
                }}
            ]},
            "images": { "edges": [] }
        })
    }

    // === Product Tests ===

    #[test]
    fn test_product_deserializes_flattened_connections() {
        let product: Product = serde_json::from_value(product_json()).unwrap();

        assert_eq!(product.handle, "classic-tee");
        assert_eq!(product.variants.len(), 2);
        assert_eq!(product.options[0].values, vec!["S", "M"]);
        assert!(product.updated_at.is_some());
        assert!(!product.variants[1].available_for_sale);
    }

    #[test]
    fn test_product_without_images_uses_default_image() {
        let product: Product = serde_json::from_value(product_json()).unwrap();

        assert_eq!(product.primary_image().src, DEFAULT_PRODUCT_IMAGE);
        assert_eq!(product.page_title(), "Classic Tee - Next Shopify Storefront");
    }

    #[test]
    fn test_variant_for_options_resolves_complete_selection() {
        let product: Product = serde_json::from_value(product_json()).unwrap();

        let variant = product.variant_for_options(&[
            SelectedOption::new("Size", "M"),
            SelectedOption::new("Color", "Red"),
        ]);
        assert_eq!(variant.map(|v| v.id.as_str()), Some("gid://shopify/ProductVariant/12"));
    }

    #[test]
    fn test_variant_for_options_requires_every_option() {
        let product: Product = serde_json::from_value(product_json()).unwrap();

        assert!(product
            .variant_for_options(&[SelectedOption::new("Size", "M")])
            .is_none());
        assert!(product
            .variant_for_options(&[
                SelectedOption::new("Size", "XL"),
                SelectedOption::new("Color", "Red"),
            ])
            .is_none());
    }

    #[test]
    fn test_product_path_encodes_handle() {
        assert_eq!(product_path("classic-tee"), "/product?handle=classic-tee");
        assert_eq!(product_path("a&b"), "/product?handle=a%26b");
    }

    // === Catalog Tests ===

    #[test]
    fn test_product_list_page_from_connection() {
        let connection: Connection<ProductSummary> = serde_json::from_value(json!({
            "edges": [{
                "cursor": "cursor-1",
                "node": {
                    "id": "gid://shopify/Product/1",
                    "handle": "classic-tee",
                    "title": "Classic Tee",
                    "priceRange": { "minVariantPrice": { "amount": "20.0", "currencyCode": "USD" } },
                    "images": { "edges": [{ "node": { "url": "https://cdn.shopify.com/t.png", "altText": null } }] }
                }
            }],
            "pageInfo": { "hasNextPage": true }
        }))
        .unwrap();

        let page = ProductListPage::from(connection);
        assert_eq!(page.cursor.as_deref(), Some("cursor-1"));
        assert!(page.has_next_page);
        assert_eq!(page.products[0].display_price(), "$20.0");
        assert_eq!(page.products[0].thumbnail().src, "https://cdn.shopify.com/t.png");
        assert_eq!(page.products[0].thumbnail().alt, "");
    }

    #[test]
    fn test_sort_keys_serialize_as_graphql_enum() {
        assert_eq!(
            serde_json::to_value(ProductSortKeys::BestSelling).unwrap(),
            json!("BEST_SELLING")
        );
        assert_eq!(
            serde_json::to_value(ProductSortKeys::CreatedAt).unwrap(),
            json!("CREATED_AT")
        );
    }

    #[test]
    fn test_query_filter_ignores_blank_text() {
        assert_eq!(ProductQuery::search("  ").filter(), None);
        assert_eq!(ProductQuery::search(" shirt ").filter(), Some("shirt"));
    }

    #[test]
    fn test_sort_option_round_trips_through_query() {
        for option in SortOption::ALL {
            let query = ProductQuery::search("tee").sorted_by(option);
            assert_eq!(query.sort_option(), Some(option), "{}", option.label());
        }
    }
}
