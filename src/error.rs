//! Error types for the storefront crate.
//!
//! This module contains the configuration errors raised while building a
//! [`StorefrontConfig`](crate::StorefrontConfig), the local validation errors
//! for user input, and [`StorefrontError`], the error value stored in state
//! containers and shown to the shopper.
//!
//! # Error Handling
//!
//! Configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Failed API calls are converted into a
//! [`StorefrontError`] whose `Display` output is the plain text message
//! rendered by the view.
//!
//! # Example
//!
//! ```rust
//! use storefront::{ConfigError, ShopDomain};
//!
//! let result = ShopDomain::new("");
//! assert!(matches!(result, Err(ConfigError::InvalidShopDomain { .. })));
//! ```

use thiserror::Error;

use crate::clients::graphql::GraphqlError;
use crate::clients::HttpError;

/// Errors that can occur during storefront configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Shop domain is invalid.
    #[error("Invalid shop domain '{domain}'. Expected format: 'shop-name' or 'shop-name.myshopify.com'.")]
    InvalidShopDomain {
        /// The invalid domain that was provided.
        domain: String,
    },

    /// API version is invalid.
    #[error("Invalid API version '{version}'. Expected format: 'YYYY-MM' (e.g., '2024-01') or 'unstable'.")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Host URL is invalid.
    #[error("Invalid host URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://proxy.example.com').")]
    InvalidHostUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A storefront access token was configured but is empty.
    #[error("Storefront access token cannot be empty. Omit the token for tokenless access.")]
    EmptyStorefrontToken,

    /// The product page size must be at least one.
    #[error("Page size must be greater than zero.")]
    InvalidPageSize,
}

/// Local validation failures for shopper input.
///
/// These are detected before any request is sent.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// No product variant has been selected.
    #[error("Please select a product variant.")]
    EmptyVariantId,

    /// The requested quantity is zero.
    #[error("Quantity must be at least 1.")]
    ZeroQuantity,

    /// No product handle was given.
    #[error("Product handle cannot be empty.")]
    EmptyHandle,
}

/// Error captured into a state container when a request fails.
///
/// `StorefrontError` is `Clone` so it can be stored in
/// [`AsyncResource`](crate::state::AsyncResource) and handed to views. Its
/// `Display` output is the message shown to the shopper as-is.
///
/// # Example
///
/// ```rust
/// use storefront::{StorefrontError, ValidationError};
///
/// let error = StorefrontError::from(ValidationError::EmptyVariantId);
/// assert_eq!(error.to_string(), "Please select a product variant.");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorefrontError {
    /// The request did not complete (connection, DNS, TLS or timeout failure).
    #[error("{message}")]
    Network {
        /// Description of the transport failure.
        message: String,
    },

    /// The backend answered with an error payload.
    #[error("{message}")]
    Api {
        /// The backend's error message.
        message: String,
    },

    /// Local input was rejected before sending a request.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl StorefrontError {
    /// Creates an [`Api`](Self::Api) error from a message.
    #[must_use]
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Returns `true` if the request never reached the backend.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}

impl From<GraphqlError> for StorefrontError {
    fn from(error: GraphqlError) -> Self {
        match error {
            GraphqlError::Http(HttpError::Network(e)) => Self::Network {
                message: format!("Network error: {e}"),
            },
            GraphqlError::Http(HttpError::Response(e)) => Self::Api {
                message: http_failure_message(e.code, &e.message),
            },
            GraphqlError::Http(HttpError::MaxRetries(e)) => Self::Api {
                message: http_failure_message(e.code, &e.message),
            },
            other => Self::Api {
                message: other.to_string(),
            },
        }
    }
}

/// Extracts the readable part of a failed response's serialized error body.
///
/// Shopify answers with `errors` as a string, as a list of `{ message }`
/// objects, or with an OAuth style `error` / `error_description` pair.
fn http_failure_message(code: u16, serialized: &str) -> String {
    let body: serde_json::Value = serde_json::from_str(serialized).unwrap_or_default();

    let message = match &body["errors"] {
        serde_json::Value::String(text) => Some(text.clone()),
        serde_json::Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item["message"].as_str().or_else(|| item.as_str()))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => body["error_description"]
            .as_str()
            .or_else(|| body["error"].as_str())
            .map(String::from),
    };

    message
        .filter(|text| !text.trim().is_empty())
        .unwrap_or_else(|| format!("Request failed ({code})"))
}
