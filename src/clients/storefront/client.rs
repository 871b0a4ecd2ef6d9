//! Storefront GraphQL client.
//!
//! [`StorefrontClient`] sends GraphQL operations to
//! `https://{shop}/api/{version}/graphql.json`, either returning the raw
//! [`HttpResponse`] ([`query`](StorefrontClient::query)) or decoding the
//! `data` field into a typed value ([`execute`](StorefrontClient::execute)).
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront::{ShopDomain, StorefrontClient, StorefrontConfig, StorefrontToken};
//! use serde_json::json;
//!
//! let config = StorefrontConfig::builder()
//!     .shop(ShopDomain::new("my-store").unwrap())
//!     .token(StorefrontToken::Public("public-access-token".to_string()))
//!     .build()
//!     .unwrap();
//! let client = StorefrontClient::new(&config);
//!
//! let response = client.query(
//!     "query GetProduct($handle: String!) { product(handle: $handle) { title } }",
//!     Some(json!({ "handle": "my-product" })),
//!     None,
//!     None,
//! ).await?;
//! ```

use std::collections::HashMap;

use serde::de::DeserializeOwned;

use crate::clients::graphql::{GraphqlError, GraphqlResponse};
use crate::clients::storefront::storefront_http::StorefrontHttpClient;
use crate::clients::{DataType, HttpMethod, HttpRequest, HttpResponse};
use crate::config::{ApiVersion, StorefrontConfig};

/// GraphQL client for the Shopify Storefront API.
///
/// `StorefrontClient` is `Send + Sync` and can be shared across tasks.
#[derive(Debug)]
pub struct StorefrontClient {
    http_client: StorefrontHttpClient,
    api_version: ApiVersion,
    tries: u32,
}

// Verify StorefrontClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<StorefrontClient>();
};

impl StorefrontClient {
    /// Creates a client using the configured API version.
    #[must_use]
    pub fn new(config: &StorefrontConfig) -> Self {
        Self::create_client(config, config.api_version().clone())
    }

    /// Creates a client with an API version override.
    ///
    /// # Example
    ///
    /// ```rust
    /// use storefront::{ApiVersion, ShopDomain, StorefrontClient, StorefrontConfig};
    ///
    /// let config = StorefrontConfig::builder()
    ///     .shop(ShopDomain::new("my-store").unwrap())
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = StorefrontClient::with_version(&config, ApiVersion::V2025_07);
    /// assert_eq!(client.api_version(), &ApiVersion::V2025_07);
    /// ```
    #[must_use]
    pub fn with_version(config: &StorefrontConfig, version: ApiVersion) -> Self {
        let config_version = config.api_version();
        if &version == config_version {
            tracing::debug!(
                "Storefront client has a redundant API version override to the default {}",
                config_version
            );
        } else {
            tracing::debug!(
                "Storefront client overriding default API version {} with {}",
                config_version,
                version
            );
        }

        Self::create_client(config, version)
    }

    fn create_client(config: &StorefrontConfig, api_version: ApiVersion) -> Self {
        Self {
            http_client: StorefrontHttpClient::new(config, &api_version),
            api_version,
            tries: config.tries(),
        }
    }

    /// Returns the API version being used by this client.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Executes a GraphQL query and returns the raw response.
    ///
    /// `tries` defaults to the configured value.
    ///
    /// # Errors
    ///
    /// Returns [`GraphqlError::Http`] for network errors, non-2xx responses
    /// and retry exhaustion. GraphQL-level errors stay in
    /// `response.body["errors"]`.
    pub async fn query(
        &self,
        query: &str,
        variables: Option<serde_json::Value>,
        headers: Option<HashMap<String, String>>,
        tries: Option<u32>,
    ) -> Result<HttpResponse, GraphqlError> {
        self.execute_query(query, variables, headers, tries, false)
            .await
    }

    /// Like [`query`](Self::query) but appends `?debug=true` so the response
    /// `extensions` carry query cost details.
    ///
    /// # Errors
    ///
    /// Returns [`GraphqlError::Http`] for HTTP-level errors.
    pub async fn query_with_debug(
        &self,
        query: &str,
        variables: Option<serde_json::Value>,
        headers: Option<HashMap<String, String>>,
        tries: Option<u32>,
    ) -> Result<HttpResponse, GraphqlError> {
        self.execute_query(query, variables, headers, tries, true)
            .await
    }

    /// Executes a GraphQL operation and decodes its `data` into `T`.
    ///
    /// # Errors
    ///
    /// - [`GraphqlError::Http`] for HTTP-level errors
    /// - [`GraphqlError::Graphql`] when the response carries `errors`
    /// - [`GraphqlError::MissingData`] when `data` is null
    /// - [`GraphqlError::Deserialize`] when `data` does not match `T`
    pub async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, GraphqlError> {
        let response = self
            .execute_query(query, Some(variables), None, None, false)
            .await?;
        let envelope: GraphqlResponse<T> = serde_json::from_value(response.body)?;
        envelope.into_data()
    }

    async fn execute_query(
        &self,
        query: &str,
        variables: Option<serde_json::Value>,
        headers: Option<HashMap<String, String>>,
        tries: Option<u32>,
        debug: bool,
    ) -> Result<HttpResponse, GraphqlError> {
        let body = serde_json::json!({
            "query": query,
            "variables": variables
        });

        let mut builder = HttpRequest::builder(HttpMethod::Post, "graphql.json")
            .body(body)
            .body_type(DataType::Json)
            .tries(tries.unwrap_or(self.tries));

        if debug {
            builder = builder.query_param("debug", "true");
        }

        if let Some(extra_headers) = headers {
            builder = builder.extra_headers(extra_headers);
        }

        let request = builder.build().map_err(|e| GraphqlError::Http(e.into()))?;
        self.http_client.request(request).await.map_err(Into::into)
    }
}
