//! Catalog and checkout operations against the Storefront API.
//!
//! [`CatalogApi`] is the typed boundary the [`Storefront`](crate::Storefront)
//! controller talks to. [`StorefrontService`] implements it over a
//! [`StorefrontClient`]; tests substitute their own implementation.
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront::services::{CatalogApi, StorefrontService};
//! use storefront::{ShopDomain, StorefrontConfig};
//!
//! let config = StorefrontConfig::builder()
//!     .shop(ShopDomain::new("my-store").unwrap())
//!     .build()?;
//! let service = StorefrontService::new(&config);
//!
//! let product = service.product_by_handle("classic-tee").await?;
//! println!("{}", product.title);
//! ```

pub mod queries;

use serde::Deserialize;
use serde_json::json;

use crate::clients::graphql::{GraphqlError, UserError};
use crate::clients::StorefrontClient;
use crate::config::StorefrontConfig;
use crate::error::{StorefrontError, ValidationError};
use crate::models::{
    Cart, Connection, LineItemInput, Product, ProductListPage, ProductQuery, ProductSummary,
};

/// Message stored when a handle matches no product.
pub const PRODUCT_NOT_FOUND: &str = "Product not found";

/// The three backend operations the storefront needs.
///
/// Every method resolves to the typed data or a [`StorefrontError`]; nothing
/// is retried here.
#[allow(async_fn_in_trait)]
pub trait CatalogApi: Send + Sync {
    /// Fetches a product by its handle.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Api`] with [`PRODUCT_NOT_FOUND`] for an
    /// unknown handle.
    async fn product_by_handle(&self, handle: &str) -> Result<Product, StorefrontError>;

    /// Fetches up to `first` products after `cursor`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorefrontError`] when the request fails.
    async fn products(
        &self,
        query: &ProductQuery,
        cursor: Option<&str>,
        first: u32,
    ) -> Result<ProductListPage, StorefrontError>;

    /// Adds a line to the cart `cart_id`, creating a cart when `None`.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Api`] when the backend rejects the line
    /// (unknown variant, out of stock).
    async fn add_line_item(
        &self,
        cart_id: Option<&str>,
        line: &LineItemInput,
    ) -> Result<Cart, StorefrontError>;
}

#[derive(Deserialize)]
struct ProductData {
    product: Option<Product>,
}

#[derive(Deserialize)]
struct ProductsData {
    products: Connection<ProductSummary>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartPayload {
    cart: Option<Cart>,
    #[serde(default)]
    user_errors: Vec<UserError>,
}

impl CartPayload {
    fn into_cart(self) -> Result<Cart, GraphqlError> {
        if !self.user_errors.is_empty() {
            return Err(GraphqlError::UserErrors {
                errors: self.user_errors,
            });
        }
        self.cart.ok_or(GraphqlError::MissingData { field: "cart" })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartCreateData {
    cart_create: CartPayload,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartLinesAddData {
    cart_lines_add: CartPayload,
}

/// [`CatalogApi`] backed by the Shopify Storefront API.
#[derive(Debug)]
pub struct StorefrontService {
    client: StorefrontClient,
}

impl StorefrontService {
    /// Creates a service with a new client for `config`.
    #[must_use]
    pub fn new(config: &StorefrontConfig) -> Self {
        Self::with_client(StorefrontClient::new(config))
    }

    /// Wraps an existing client.
    #[must_use]
    pub const fn with_client(client: StorefrontClient) -> Self {
        Self { client }
    }

    /// Returns the underlying client.
    #[must_use]
    pub const fn client(&self) -> &StorefrontClient {
        &self.client
    }
}

impl CatalogApi for StorefrontService {
    async fn product_by_handle(&self, handle: &str) -> Result<Product, StorefrontError> {
        if handle.trim().is_empty() {
            return Err(ValidationError::EmptyHandle.into());
        }

        tracing::debug!(handle, "Fetching product");
        let data: ProductData = self
            .client
            .execute(queries::PRODUCT_BY_HANDLE, json!({ "handle": handle }))
            .await?;

        data.product
            .ok_or_else(|| StorefrontError::api(PRODUCT_NOT_FOUND))
    }

    async fn products(
        &self,
        query: &ProductQuery,
        cursor: Option<&str>,
        first: u32,
    ) -> Result<ProductListPage, StorefrontError> {
        tracing::debug!(query = %query.query, ?cursor, first, "Fetching products");
        let variables = json!({
            "first": first,
            "after": cursor,
            "query": query.filter(),
            "sortKey": query.sort_key,
            "reverse": query.reverse,
        });

        let data: ProductsData = self.client.execute(queries::PRODUCTS, variables).await?;
        Ok(data.products.into())
    }

    async fn add_line_item(
        &self,
        cart_id: Option<&str>,
        line: &LineItemInput,
    ) -> Result<Cart, StorefrontError> {
        let cart = match cart_id {
            Some(cart_id) => {
                tracing::debug!(cart_id, variant_id = line.variant_id(), "Adding cart line");
                let data: CartLinesAddData = self
                    .client
                    .execute(
                        &queries::cart_lines_add(),
                        json!({ "cartId": cart_id, "lines": [line] }),
                    )
                    .await?;
                data.cart_lines_add.into_cart()?
            }
            None => {
                tracing::debug!(variant_id = line.variant_id(), "Creating cart");
                let data: CartCreateData = self
                    .client
                    .execute(&queries::cart_create(), json!({ "lines": [line] }))
                    .await?;
                data.cart_create.into_cart()?
            }
        };
        Ok(cart)
    }
}
