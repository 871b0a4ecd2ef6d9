//! API client layer for the Shopify Storefront API.
//!
//! # Overview
//!
//! - [`HttpRequest`] / [`HttpResponse`]: request and response values
//! - [`HttpMethod`], [`DataType`]: method and body content type
//! - [`HttpError`]: HTTP-level failures
//! - [`graphql`]: typed GraphQL envelope and [`GraphqlError`]
//! - [`storefront::StorefrontClient`]: the Storefront GraphQL client
//!
//! # Retry Behavior
//!
//! - **429 (Rate Limited)**: retried after `Retry-After`, or 1 second if absent
//! - **500 (Server Error)**: retried after a fixed 1-second delay
//! - **Other errors**: returned immediately
//!
//! The default `tries` is 1, meaning no automatic retries.

mod errors;
pub mod graphql;
mod http_request;
mod http_response;
pub mod storefront;

pub use errors::{
    HttpError, HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
};
pub use http_request::{DataType, HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;

pub use graphql::GraphqlError;
pub use storefront::{StorefrontClient, StorefrontToken};

/// Fixed retry wait time in seconds.
pub const RETRY_WAIT_TIME: u64 = 1;

/// Crate version from Cargo.toml, sent in the User-Agent header.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");
