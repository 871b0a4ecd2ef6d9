//! # Next Shopify Storefront
//!
//! Catalog, product page and cart state for a storefront backed by the
//! Shopify Storefront API.
//!
//! ## Overview
//!
//! The crate has three layers:
//!
//! - **API client** ([`clients`], [`services`], [`models`]): typed GraphQL
//!   calls for products, paginated catalog pages and cart mutations
//! - **State** ([`state`]): [`AsyncResource`](state::AsyncResource) lifecycles
//!   for the `product`, `products` and `checkout` slices, plus the views
//!   derived from them
//! - **Controller** ([`Storefront`]): turns shopper intents into state
//!   transitions around API calls and drops stale responses
//!
//! ## Quick Start
//!
//! ```rust
//! use storefront::{ApiVersion, ShopDomain, StorefrontConfig, StorefrontToken};
//!
//! let config = StorefrontConfig::builder()
//!     .shop(ShopDomain::new("my-store").unwrap())
//!     .token(StorefrontToken::Public("public-access-token".to_string()))
//!     .api_version(ApiVersion::latest())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.shop().as_ref(), "my-store.myshopify.com");
//! ```
//!
//! ## Browsing and Adding to Cart
//!
//! ```rust,ignore
//! use storefront::{ProductForm, ProductQuery, SortOption, Storefront, StorefrontConfig};
//! use storefront::state::ProductView;
//!
//! let config = StorefrontConfig::from_env()?;
//! let store = Storefront::from_config(&config);
//!
//! // Catalog with "load more"
//! store.search(ProductQuery::search("tee").sorted_by(SortOption::PriceAscending)).await;
//! store.load_more().await;
//!
//! // Product page
//! store.load_product("classic-tee").await;
//! let mut form = ProductForm::new();
//! store.with_state(|state| {
//!     if let ProductView::Ready(product) = state.product.view() {
//!         form.select_option(product, "Size", "M");
//!     }
//! });
//! form.set_quantity(2);
//!
//! // Rejected locally when no variant is selected
//! store.add_to_cart(&form).await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: the store is an explicit value passed to whoever needs it
//! - **Fail-fast validation**: configuration newtypes and line items validate on construction
//! - **Latest request wins**: every fetch carries a request id; superseded responses are dropped
//! - **Async-first**: designed for use with the Tokio runtime

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
mod storefront;

// Re-export public types at crate root for convenience
pub use config::{
    ApiVersion, HostUrl, ShopDomain, StorefrontConfig, StorefrontConfigBuilder, DEFAULT_PAGE_SIZE,
};
pub use error::{ConfigError, StorefrontError, ValidationError};

pub use clients::{
    GraphqlError, HttpError, HttpResponse, HttpResponseError, MaxHttpRetriesExceededError,
    StorefrontClient, StorefrontToken,
};

pub use models::{
    Cart, LineItemInput, Product, ProductListPage, ProductQuery, ProductSortKeys, ProductSummary,
    SortOption,
};
pub use services::{CatalogApi, StorefrontService};
pub use state::{AsyncResource, ProductForm, StoreState};
pub use storefront::{Dispatch, Storefront};
