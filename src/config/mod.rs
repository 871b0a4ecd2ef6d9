//! Configuration types for the storefront.
//!
//! # Overview
//!
//! - [`StorefrontConfig`]: shop, token, API version and request settings
//! - [`StorefrontConfigBuilder`]: builder for [`StorefrontConfig`]
//! - [`ShopDomain`]: a validated Shopify shop domain
//! - [`HostUrl`]: a validated proxy host URL
//! - [`ApiVersion`]: the Storefront API version to use
//!
//! # Example
//!
//! ```rust
//! use storefront::{ApiVersion, ShopDomain, StorefrontConfig, StorefrontToken};
//!
//! let config = StorefrontConfig::builder()
//!     .shop(ShopDomain::new("my-store").unwrap())
//!     .token(StorefrontToken::Public("public-token".to_string()))
//!     .api_version(ApiVersion::latest())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.page_size(), 20);
//! ```

mod newtypes;
mod version;

pub use newtypes::{HostUrl, ShopDomain};
pub use version::ApiVersion;

use crate::clients::storefront::StorefrontToken;
use crate::error::ConfigError;

/// Number of products requested per page when not configured.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Environment variable holding the shop domain.
pub const ENV_STORE_DOMAIN: &str = "SHOPIFY_STORE_DOMAIN";
/// Environment variable holding a public storefront access token.
pub const ENV_PUBLIC_TOKEN: &str = "SHOPIFY_STOREFRONT_ACCESS_TOKEN";
/// Environment variable holding a private storefront access token.
pub const ENV_PRIVATE_TOKEN: &str = "SHOPIFY_STOREFRONT_PRIVATE_TOKEN";
/// Environment variable holding the API version.
pub const ENV_API_VERSION: &str = "SHOPIFY_API_VERSION";

/// Configuration for talking to a shop's Storefront API.
///
/// `StorefrontConfig` is `Clone`, `Send` and `Sync`. Build it with
/// [`StorefrontConfig::builder`] or read it from the environment with
/// [`StorefrontConfig::from_env`].
#[derive(Clone, Debug)]
pub struct StorefrontConfig {
    shop: ShopDomain,
    token: Option<StorefrontToken>,
    api_version: ApiVersion,
    api_host: Option<HostUrl>,
    user_agent_prefix: Option<String>,
    page_size: u32,
    tries: u32,
}

impl StorefrontConfig {
    /// Creates a new builder for constructing a `StorefrontConfig`.
    #[must_use]
    pub fn builder() -> StorefrontConfigBuilder {
        StorefrontConfigBuilder::new()
    }

    /// Reads the configuration from the process environment.
    ///
    /// `SHOPIFY_STORE_DOMAIN` is required. A private token takes precedence
    /// over a public one; with neither set the client is tokenless.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a variable is missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a variable is missing or invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let shop = lookup(ENV_STORE_DOMAIN).ok_or(ConfigError::MissingRequiredField {
            field: ENV_STORE_DOMAIN,
        })?;

        let mut builder = Self::builder().shop(ShopDomain::new(shop)?);

        if let Some(token) = lookup(ENV_PRIVATE_TOKEN) {
            builder = builder.token(StorefrontToken::Private(token));
        } else if let Some(token) = lookup(ENV_PUBLIC_TOKEN) {
            builder = builder.token(StorefrontToken::Public(token));
        }

        if let Some(version) = lookup(ENV_API_VERSION) {
            builder = builder.api_version(version.parse()?);
        }

        builder.build()
    }

    /// Returns the shop domain.
    #[must_use]
    pub const fn shop(&self) -> &ShopDomain {
        &self.shop
    }

    /// Returns the storefront access token, if any.
    #[must_use]
    pub const fn token(&self) -> Option<&StorefrontToken> {
        self.token.as_ref()
    }

    /// Returns the API version.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the API host override, if configured.
    #[must_use]
    pub const fn api_host(&self) -> Option<&HostUrl> {
        self.api_host.as_ref()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the number of products fetched per page.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Returns how many times a request is attempted (1 = no retries).
    #[must_use]
    pub const fn tries(&self) -> u32 {
        self.tries
    }
}

// Verify StorefrontConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<StorefrontConfig>();
};

/// Builder for constructing [`StorefrontConfig`] instances.
///
/// `shop` is required. Defaults:
///
/// - `token`: `None` (tokenless access)
/// - `api_version`: latest stable version
/// - `api_host`: `None` (requests go to the shop domain)
/// - `user_agent_prefix`: `None`
/// - `page_size`: [`DEFAULT_PAGE_SIZE`]
/// - `tries`: 1
#[derive(Debug, Default)]
pub struct StorefrontConfigBuilder {
    shop: Option<ShopDomain>,
    token: Option<StorefrontToken>,
    api_version: Option<ApiVersion>,
    api_host: Option<HostUrl>,
    user_agent_prefix: Option<String>,
    page_size: Option<u32>,
    tries: Option<u32>,
}

impl StorefrontConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the shop domain (required).
    #[must_use]
    pub fn shop(mut self, shop: ShopDomain) -> Self {
        self.shop = Some(shop);
        self
    }

    /// Sets the storefront access token.
    #[must_use]
    pub fn token(mut self, token: StorefrontToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Sets the API version.
    #[must_use]
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Routes requests through `host` instead of the shop domain.
    #[must_use]
    pub fn api_host(mut self, host: HostUrl) -> Self {
        self.api_host = Some(host);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the number of products fetched per page.
    #[must_use]
    pub const fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Sets how many times a request is attempted on 429/500 responses.
    #[must_use]
    pub const fn tries(mut self, tries: u32) -> Self {
        self.tries = Some(tries);
        self
    }

    /// Builds the [`StorefrontConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `shop` is not set,
    /// [`ConfigError::EmptyStorefrontToken`] for an empty token and
    /// [`ConfigError::InvalidPageSize`] for a zero page size.
    pub fn build(self) -> Result<StorefrontConfig, ConfigError> {
        let shop = self
            .shop
            .ok_or(ConfigError::MissingRequiredField { field: "shop" })?;

        if self
            .token
            .as_ref()
            .is_some_and(|token| token.header_value().trim().is_empty())
        {
            return Err(ConfigError::EmptyStorefrontToken);
        }

        let page_size = self.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size == 0 {
            return Err(ConfigError::InvalidPageSize);
        }

        Ok(StorefrontConfig {
            shop,
            token: self.token,
            api_version: self.api_version.unwrap_or_else(ApiVersion::latest),
            api_host: self.api_host,
            user_agent_prefix: self.user_agent_prefix,
            page_size,
            tries: self.tries.unwrap_or(1).max(1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn shop() -> ShopDomain {
        ShopDomain::new("test-shop").unwrap()
    }

    #[test]
    fn test_builder_requires_shop() {
        let result = StorefrontConfigBuilder::new().build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "shop" })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = StorefrontConfig::builder().shop(shop()).build().unwrap();

        assert_eq!(config.shop().as_ref(), "test-shop.myshopify.com");
        assert!(config.token().is_none());
        assert_eq!(config.api_version(), &ApiVersion::latest());
        assert!(config.api_host().is_none());
        assert!(config.user_agent_prefix().is_none());
        assert_eq!(config.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(config.tries(), 1);
    }

    #[test]
    fn test_builder_rejects_empty_token() {
        let result = StorefrontConfig::builder()
            .shop(shop())
            .token(StorefrontToken::Public("  ".to_string()))
            .build();

        assert!(matches!(result, Err(ConfigError::EmptyStorefrontToken)));
    }

    #[test]
    fn test_builder_rejects_zero_page_size() {
        let result = StorefrontConfig::builder().shop(shop()).page_size(0).build();

        assert!(matches!(result, Err(ConfigError::InvalidPageSize)));
    }

    #[test]
    fn test_builder_clamps_tries_to_one() {
        let config = StorefrontConfig::builder()
            .shop(shop())
            .tries(0)
            .build()
            .unwrap();

        assert_eq!(config.tries(), 1);
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let host = HostUrl::new("http://localhost:3000").unwrap();

        let config = StorefrontConfig::builder()
            .shop(shop())
            .token(StorefrontToken::Private("secret".to_string()))
            .api_version(ApiVersion::V2025_07)
            .api_host(host.clone())
            .user_agent_prefix("NextStorefront/1.0")
            .page_size(8)
            .tries(3)
            .build()
            .unwrap();

        assert_eq!(config.api_version(), &ApiVersion::V2025_07);
        assert_eq!(config.api_host(), Some(&host));
        assert_eq!(config.user_agent_prefix(), Some("NextStorefront/1.0"));
        assert_eq!(config.page_size(), 8);
        assert_eq!(config.tries(), 3);
        assert_eq!(config.token().unwrap().header_value(), "secret");
    }

    #[test]
    fn test_from_lookup_requires_store_domain() {
        let result = StorefrontConfig::from_lookup(|_| None);

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField {
                field: ENV_STORE_DOMAIN
            })
        ));
    }

    #[test]
    fn test_from_lookup_prefers_private_token() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (ENV_STORE_DOMAIN, "env-shop"),
            (ENV_PUBLIC_TOKEN, "public"),
            (ENV_PRIVATE_TOKEN, "private"),
            (ENV_API_VERSION, "2025-04"),
        ]);

        let config =
            StorefrontConfig::from_lookup(|key| vars.get(key).map(ToString::to_string)).unwrap();

        assert_eq!(config.shop().shop_name(), "env-shop");
        assert!(matches!(
            config.token(),
            Some(StorefrontToken::Private(token)) if token == "private"
        ));
        assert_eq!(config.api_version(), &ApiVersion::V2025_04);
    }

    #[test]
    fn test_from_lookup_rejects_invalid_version() {
        let vars: HashMap<&str, &str> =
            HashMap::from([(ENV_STORE_DOMAIN, "env-shop"), (ENV_API_VERSION, "latest")]);

        let result = StorefrontConfig::from_lookup(|key| vars.get(key).map(ToString::to_string));

        assert!(matches!(result, Err(ConfigError::InvalidApiVersion { .. })));
    }

    #[test]
    fn test_config_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StorefrontConfig>();
    }
}
