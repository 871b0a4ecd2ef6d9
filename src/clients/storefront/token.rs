//! Storefront API access tokens.
//!
//! - **Public tokens** are safe to ship to the browser and use the
//!   `X-Shopify-Storefront-Access-Token` header.
//! - **Private tokens** are server-side only and use the
//!   `Shopify-Storefront-Private-Token` header.
//!
//! The [`Debug`] output of [`StorefrontToken`] masks the token value.

use std::fmt;

/// HTTP header name for public storefront access tokens.
pub const PUBLIC_HEADER_NAME: &str = "X-Shopify-Storefront-Access-Token";

/// HTTP header name for private storefront access tokens.
pub const PRIVATE_HEADER_NAME: &str = "Shopify-Storefront-Private-Token";

/// A Shopify Storefront API access token.
///
/// # Example
///
/// ```rust
/// use storefront::StorefrontToken;
///
/// let token = StorefrontToken::Public("my-token".to_string());
/// assert_eq!(token.header_name(), "X-Shopify-Storefront-Access-Token");
/// assert_eq!(token.header_value(), "my-token");
/// assert_eq!(format!("{token:?}"), "StorefrontToken::Public(*****)");
/// ```
#[derive(Clone)]
pub enum StorefrontToken {
    /// Public storefront access token for client-side use.
    Public(String),
    /// Private storefront access token for server-side use.
    Private(String),
}

impl StorefrontToken {
    /// Returns the HTTP header name for this token type.
    #[must_use]
    pub const fn header_name(&self) -> &'static str {
        match self {
            Self::Public(_) => PUBLIC_HEADER_NAME,
            Self::Private(_) => PRIVATE_HEADER_NAME,
        }
    }

    /// Returns the token value sent in the header.
    #[must_use]
    pub fn header_value(&self) -> &str {
        match self {
            Self::Public(token) | Self::Private(token) => token,
        }
    }
}

impl fmt::Debug for StorefrontToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Public(_) => f.write_str("StorefrontToken::Public(*****)"),
            Self::Private(_) => f.write_str("StorefrontToken::Private(*****)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_names_by_token_type() {
        let public = StorefrontToken::Public("token".to_string());
        let private = StorefrontToken::Private("token".to_string());

        assert_eq!(public.header_name(), PUBLIC_HEADER_NAME);
        assert_eq!(private.header_name(), PRIVATE_HEADER_NAME);
    }

    #[test]
    fn test_header_value_returns_token_string() {
        let token = StorefrontToken::Private("my-private-token".to_string());
        assert_eq!(token.header_value(), "my-private-token");
    }

    #[test]
    fn test_debug_masks_token_value() {
        let public = format!("{:?}", StorefrontToken::Public("super-secret".to_string()));
        let private = format!("{:?}", StorefrontToken::Private("super-secret".to_string()));

        assert_eq!(public, "StorefrontToken::Public(*****)");
        assert_eq!(private, "StorefrontToken::Private(*****)");
        assert!(!public.contains("super-secret"));
    }
}
