//! Catalog listing state with "load more" pagination.
//!
//! The first page and each following page are tracked by separate
//! [`AsyncResource`]s so a failed "load more" leaves the listing intact.

use crate::error::StorefrontError;
use crate::models::{PageInfo, ProductListPage, ProductQuery, ProductSummary, SITE_NAME};
use crate::state::resource::{AsyncResource, RequestId, TransitionError};

/// Returns the message shown when a search matched nothing.
#[must_use]
pub fn no_match_message(query: &str) -> String {
    format!("Your search - {query} - did not match any products.")
}

/// Returns the catalog page title.
#[must_use]
pub fn products_page_title() -> String {
    format!("Products - {SITE_NAME}")
}

/// State of the "load more" control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadMoreView<'a> {
    /// No further pages.
    Hidden,
    /// More pages can be requested.
    Ready,
    /// The next page is loading.
    Loading,
    /// The last "load more" failed; it can be retried.
    Error(&'a StorefrontError),
}

/// What the catalog page shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProductsView<'a> {
    /// No search issued yet.
    Idle,
    /// The first page is loading.
    Loading,
    /// The first page failed.
    Error(&'a StorefrontError),
    /// The search completed without matches.
    Empty {
        /// The search text.
        query: &'a str,
    },
    /// Products to show.
    Listing {
        /// Products loaded so far, in order.
        products: &'a [ProductSummary],
        /// State of the "load more" control.
        load_more: LoadMoreView<'a>,
    },
}

/// The catalog slice.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductsState {
    query: ProductQuery,
    first_page: AsyncResource<PageInfo>,
    next_page: AsyncResource<PageInfo>,
    products: Vec<ProductSummary>,
    pagination: PageInfo,
}

fn page_info(page: &ProductListPage) -> PageInfo {
    PageInfo {
        has_next_page: page.has_next_page,
        end_cursor: page.cursor.clone(),
    }
}

impl ProductsState {
    /// Creates an idle catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new search, discarding the current listing.
    ///
    /// Any in-flight "load more" for the previous search is invalidated.
    pub fn begin_search(&mut self, query: ProductQuery) -> RequestId {
        self.query = query;
        self.products.clear();
        self.pagination = PageInfo::default();
        self.next_page.reset();
        self.first_page.request()
    }

    /// Applies the first page result of request `id`.
    ///
    /// # Errors
    ///
    /// Returns a [`TransitionError`] when `id` is stale or no search is
    /// loading; the state is left unchanged.
    pub fn complete_first_page(
        &mut self,
        id: RequestId,
        result: Result<ProductListPage, StorefrontError>,
    ) -> Result<(), TransitionError> {
        match result {
            Ok(page) => {
                let info = page_info(&page);
                self.first_page.succeed(id, info.clone())?;
                self.products = page.products;
                self.pagination = info;
            }
            Err(error) => self.first_page.fail(id, error)?,
        }
        Ok(())
    }

    /// Starts loading the page after the current cursor.
    ///
    /// Returns the request id and cursor, or `None` when the first page has
    /// not loaded, no further page exists, or a "load more" is in flight.
    pub fn begin_load_more(&mut self) -> Option<(RequestId, String)> {
        if self.first_page.data().is_none()
            || self.next_page.is_loading()
            || !self.pagination.has_next_page
        {
            return None;
        }
        let cursor = self.pagination.end_cursor.clone()?;
        Some((self.next_page.request(), cursor))
    }

    /// Applies the "load more" result of request `id`.
    ///
    /// Success appends the products and advances the cursor. Failure only
    /// marks the "load more" resource as failed.
    ///
    /// # Errors
    ///
    /// Returns a [`TransitionError`] when `id` is stale or nothing is loading.
    pub fn complete_next_page(
        &mut self,
        id: RequestId,
        result: Result<ProductListPage, StorefrontError>,
    ) -> Result<(), TransitionError> {
        match result {
            Ok(page) => {
                let mut info = page_info(&page);
                if info.end_cursor.is_none() {
                    info.end_cursor = self.pagination.end_cursor.clone();
                }
                self.next_page.succeed(id, info.clone())?;
                self.products.extend(page.products);
                self.pagination = info;
            }
            Err(error) => self.next_page.fail(id, error)?,
        }
        Ok(())
    }

    /// Returns the active query.
    #[must_use]
    pub const fn query(&self) -> &ProductQuery {
        &self.query
    }

    /// Returns the first page resource.
    #[must_use]
    pub const fn first_page(&self) -> &AsyncResource<PageInfo> {
        &self.first_page
    }

    /// Returns the "load more" resource.
    #[must_use]
    pub const fn next_page(&self) -> &AsyncResource<PageInfo> {
        &self.next_page
    }

    /// Returns every product loaded so far.
    #[must_use]
    pub fn products(&self) -> &[ProductSummary] {
        &self.products
    }

    /// Returns the cursor the next "load more" would use.
    #[must_use]
    pub fn cursor(&self) -> Option<&str> {
        self.pagination.end_cursor.as_deref()
    }

    /// Returns `true` if the backend reported more products.
    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        self.pagination.has_next_page
    }

    /// Derives what the catalog page shows.
    #[must_use]
    pub fn view(&self) -> ProductsView<'_> {
        if self.first_page.is_loading() {
            return ProductsView::Loading;
        }
        if let Some(error) = self.first_page.error() {
            return ProductsView::Error(error);
        }
        if self.first_page.data().is_none() {
            return ProductsView::Idle;
        }
        if self.products.is_empty() {
            return ProductsView::Empty {
                query: &self.query.query,
            };
        }

        let load_more = if self.next_page.is_loading() {
            LoadMoreView::Loading
        } else if let Some(error) = self.next_page.error() {
            LoadMoreView::Error(error)
        } else if self.pagination.has_next_page {
            LoadMoreView::Ready
        } else {
            LoadMoreView::Hidden
        };

        ProductsView::Listing {
            products: &self.products,
            load_more,
        }
    }
}
