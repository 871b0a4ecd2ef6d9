//! Typed Storefront API models.
//!
//! - [`Product`], [`ProductVariant`], [`ProductOption`]: the product page
//! - [`ProductSummary`], [`ProductListPage`], [`ProductQuery`]: the catalog
//! - [`LineItemInput`], [`Cart`]: checkout
//! - [`Connection`], [`PageInfo`]: GraphQL pagination wrappers

mod cart;
mod common;
mod product;

pub use cart::{Cart, CartCost, CartLine, CartMerchandise, LineItemInput};
pub use common::{Connection, Edge, Image, ImageRef, Money, PageInfo, DEFAULT_PRODUCT_IMAGE};
pub use product::{
    product_path, PriceRange, Product, ProductListPage, ProductOption, ProductQuery,
    ProductSortKeys, ProductSummary, ProductVariant, SelectedOption, SortOption, PRODUCT_PATH,
    SITE_NAME,
};
