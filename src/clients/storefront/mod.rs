//! Storefront API client.
//!
//! - [`StorefrontClient`]: GraphQL client for Storefront API operations
//! - [`StorefrontToken`]: public or private access token
//!
//! The Storefront API differs from the Admin API:
//!
//! - **Endpoint**: `/api/{version}/graphql.json` (no `/admin` prefix)
//! - **Authentication**: storefront token headers, or tokenless access for
//!   product, collection and cart queries
//! - **Access Level**: storefront data only (products, collections, cart)

mod client;
mod storefront_http;
mod token;

pub use client::StorefrontClient;
pub use token::{StorefrontToken, PRIVATE_HEADER_NAME, PUBLIC_HEADER_NAME};
