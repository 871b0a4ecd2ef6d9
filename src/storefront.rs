//! The storefront controller.
//!
//! [`Storefront`] turns shopper intents (open a product, search, load more,
//! add to cart) into state transitions around a [`CatalogApi`] call:
//!
//! 1. the slice's `begin` marks the resource `Loading` and returns a request id
//! 2. the API call is awaited with no lock held
//! 3. the slice's `complete` applies the result if the id is still current
//!
//! Responses that lost a race against a newer request are dropped and
//! reported as [`Dispatch::Stale`]. Cart additions are mutations rather than
//! fetches, so they run one at a time and each one sees the cart created by
//! the previous one.
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront::{ProductQuery, ShopDomain, Storefront, StorefrontConfig};
//! use storefront::state::ProductsView;
//!
//! let config = StorefrontConfig::builder()
//!     .shop(ShopDomain::new("my-store").unwrap())
//!     .build()?;
//! let store = Storefront::from_config(&config);
//!
//! store.search(ProductQuery::search("tee")).await;
//! store.with_state(|state| match state.products.view() {
//!     ProductsView::Listing { products, .. } => println!("{} products", products.len()),
//!     other => println!("{other:?}"),
//! });
//! ```

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::config::{StorefrontConfig, DEFAULT_PAGE_SIZE};
use crate::error::StorefrontError;
use crate::models::{LineItemInput, ProductQuery};
use crate::services::{CatalogApi, StorefrontService};
use crate::state::{ProductForm, RequestId, StoreState, TransitionError};

/// What happened to a dispatched intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// The response was applied to state (as data or as an error).
    Applied,
    /// A newer request superseded this one; its response was dropped.
    Stale,
    /// Nothing to do, so no request was sent.
    Skipped,
}

/// Drives storefront state from shopper intents.
///
/// Every method takes `&self`; overlapping calls are safe. For products and
/// the catalog the latest request wins, while cart additions queue up.
#[derive(Debug)]
pub struct Storefront<A> {
    api: A,
    state: Mutex<StoreState>,
    // Serializes cart additions; held across the cart request
    cart_lock: tokio::sync::Mutex<()>,
    page_size: u32,
}

impl Storefront<StorefrontService> {
    /// Creates a storefront talking to the shop in `config`.
    #[must_use]
    pub fn from_config(config: &StorefrontConfig) -> Self {
        Self::new(StorefrontService::new(config)).with_page_size(config.page_size())
    }
}

impl<A: CatalogApi> Storefront<A> {
    /// Creates a storefront over `api` with empty state.
    #[must_use]
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: Mutex::new(StoreState::default()),
            cart_lock: tokio::sync::Mutex::new(()),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Sets the number of products requested per page (at least one).
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Returns the backend.
    #[must_use]
    pub const fn api(&self) -> &A {
        &self.api
    }

    /// Returns the page size.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn settle(resource: &'static str, id: RequestId, outcome: Result<(), TransitionError>) -> Dispatch {
        match outcome {
            Ok(()) => Dispatch::Applied,
            Err(error) => {
                tracing::warn!(resource, request = %id, %error, "Discarding response");
                Dispatch::Stale
            }
        }
    }

    /// Loads the product page for `handle`.
    pub async fn load_product(&self, handle: &str) -> Dispatch {
        let id = self.lock().product.begin(handle);
        let result = self.api.product_by_handle(handle).await;
        let outcome = self.lock().product.complete(id, result);
        Self::settle("product", id, outcome)
    }

    /// Starts a new catalog search and loads its first page.
    pub async fn search(&self, query: ProductQuery) -> Dispatch {
        let id = self.lock().products.begin_search(query.clone());
        let result = self.api.products(&query, None, self.page_size).await;
        let outcome = self.lock().products.complete_first_page(id, result);
        Self::settle("products.first_page", id, outcome)
    }

    /// Loads the next catalog page after the current cursor.
    ///
    /// Returns [`Dispatch::Skipped`] when there is no next page or a
    /// "load more" is already in flight.
    pub async fn load_more(&self) -> Dispatch {
        let pending = {
            let mut state = self.lock();
            state
                .products
                .begin_load_more()
                .map(|(id, cursor)| (id, cursor, state.products.query().clone()))
        };
        let Some((id, cursor, query)) = pending else {
            return Dispatch::Skipped;
        };

        let result = self
            .api
            .products(&query, Some(&cursor), self.page_size)
            .await;
        let outcome = self.lock().products.complete_next_page(id, result);
        Self::settle("products.next_page", id, outcome)
    }

    /// Submits the product form's line item.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Validation`] without sending a request
    /// when no variant is selected.
    pub async fn add_to_cart(&self, form: &ProductForm) -> Result<Dispatch, StorefrontError> {
        let line = form.line_item()?;
        Ok(self.submit_line(line).await)
    }

    /// Adds `quantity` of `variant_id` to the cart.
    ///
    /// Waits for any earlier cart addition to finish, then adds to the cart
    /// it created.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Validation`] without sending a request for
    /// an empty variant ID or a zero quantity.
    pub async fn add_line_item(
        &self,
        variant_id: &str,
        quantity: u32,
    ) -> Result<Dispatch, StorefrontError> {
        let line = LineItemInput::new(variant_id, quantity)?;
        Ok(self.submit_line(line).await)
    }

    async fn submit_line(&self, line: LineItemInput) -> Dispatch {
        let _queued = self.cart_lock.lock().await;
        let (id, cart_id) = self.lock().checkout.begin();
        let result = self.api.add_line_item(cart_id.as_deref(), &line).await;
        let outcome = self.lock().checkout.complete(id, result);
        Self::settle("checkout.cart", id, outcome)
    }

    /// Runs `f` against the current state.
    pub fn with_state<R>(&self, f: impl FnOnce(&StoreState) -> R) -> R {
        f(&self.lock())
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> StoreState {
        self.lock().clone()
    }
}
