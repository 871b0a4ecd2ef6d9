//! Storefront state containers.
//!
//! # Overview
//!
//! - [`AsyncResource`]: lifecycle of one fetch, guarded by [`RequestId`]s
//! - [`ProductsState`]: catalog listing with "load more" pagination
//! - [`ProductState`] / [`ProductForm`]: product page and its add-to-cart form
//! - [`CheckoutState`]: the cart built by add-to-cart
//!
//! The slices are independent. Each one is mutated only through its own
//! `begin`/`complete` pair, and views are derived from state with `view()`.

mod checkout;
mod product;
mod products;
mod resource;

pub use checkout::CheckoutState;
pub use product::{ProductForm, ProductState, ProductView};
pub use products::{
    no_match_message, products_page_title, LoadMoreView, ProductsState, ProductsView,
};
pub use resource::{AsyncResource, RequestId, Status, TransitionError};

/// All storefront state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StoreState {
    /// Product page.
    pub product: ProductState,
    /// Catalog listing.
    pub products: ProductsState,
    /// Cart.
    pub checkout: CheckoutState,
}
