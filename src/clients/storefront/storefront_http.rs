//! Internal HTTP transport for Storefront API requests.

use std::collections::HashMap;
use std::time::Duration;

use crate::clients::errors::{HttpError, HttpResponseError, MaxHttpRetriesExceededError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::clients::{RETRY_WAIT_TIME, SDK_VERSION};
use crate::config::{ApiVersion, StorefrontConfig};

/// Internal HTTP client for Storefront API requests.
///
/// Requests go to `{origin}/api/{version}/{path}`, where the origin is the
/// shop domain over HTTPS unless an `api_host` is configured.
#[derive(Debug)]
pub(super) struct StorefrontHttpClient {
    client: reqwest::Client,
    /// Origin (e.g., `https://my-store.myshopify.com`).
    base_uri: String,
    /// Base path (e.g., `/api/2025-10`).
    base_path: String,
    default_headers: HashMap<String, String>,
}

// Verify StorefrontHttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<StorefrontHttpClient>();
};

impl StorefrontHttpClient {
    /// Creates a new Storefront HTTP client.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created (TLS
    /// backend initialization failure).
    #[must_use]
    pub(super) fn new(config: &StorefrontConfig, api_version: &ApiVersion) -> Self {
        let shop = config.shop();
        let base_path = format!("/api/{api_version}");

        let api_host = config.api_host();
        let base_uri = api_host.map_or_else(
            || format!("https://{}", shop.as_ref()),
            |host| host.origin().to_string(),
        );

        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Next Shopify Storefront v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        // Proxies route on the Host header
        if api_host.is_some() {
            default_headers.insert("Host".to_string(), shop.as_ref().to_string());
        }

        if let Some(token) = config.token() {
            default_headers.insert(
                token.header_name().to_string(),
                token.header_value().to_string(),
            );
        }

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_uri,
            base_path,
            default_headers,
        }
    }

    /// Sends a request, retrying 429 and 500 responses while attempts remain.
    pub(super) async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = format!("{}{}/{}", self.base_uri, self.base_path, request.path);

        let mut headers = self.default_headers.clone();
        if let Some(body_type) = &request.body_type {
            headers.insert(
                "Content-Type".to_string(),
                body_type.as_content_type().to_string(),
            );
        }
        if let Some(extra) = &request.extra_headers {
            headers.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        }

        let mut tries: u32 = 0;
        loop {
            tries += 1;
            tracing::debug!(%url, attempt = tries, "Sending Storefront API request");

            let mut req_builder = match request.http_method {
                HttpMethod::Post => self.client.post(&url),
            };
            for (key, value) in &headers {
                req_builder = req_builder.header(key, value);
            }
            if let Some(query) = &request.query {
                req_builder = req_builder.query(query);
            }
            if let Some(body) = &request.body {
                req_builder = req_builder.body(body.to_string());
            }

            let res = req_builder.send().await?;

            let code = res.status().as_u16();
            let res_headers = Self::parse_response_headers(res.headers());
            let body_text = res.text().await.unwrap_or_default();
            let body = Self::parse_body(code, body_text);

            let response = HttpResponse::new(code, res_headers, body);

            if let Some(reason) = response.deprecation_reason() {
                tracing::warn!(
                    "Deprecated request to Shopify Storefront API at {}, received reason: {}",
                    request.path,
                    reason
                );
            }

            if response.is_ok() {
                return Ok(response);
            }

            let error_message = Self::serialize_error(&response);
            let error_reference = response.request_id().map(String::from);

            let should_retry = code == 429 || code == 500;
            if !should_retry || request.tries <= 1 {
                return Err(HttpError::Response(HttpResponseError {
                    code,
                    message: error_message,
                    error_reference,
                }));
            }

            if tries >= request.tries {
                return Err(HttpError::MaxRetries(MaxHttpRetriesExceededError {
                    code,
                    tries: request.tries,
                    message: error_message,
                    error_reference,
                }));
            }

            let delay = Self::calculate_retry_delay(&response, code);
            tracing::debug!(status = code, ?delay, "Retrying Storefront API request");
            tokio::time::sleep(delay).await;
        }
    }

    fn parse_body(code: u16, body_text: String) -> serde_json::Value {
        if body_text.is_empty() {
            return serde_json::json!({});
        }
        serde_json::from_str(&body_text).unwrap_or_else(|_| {
            if code >= 500 {
                serde_json::json!({ "raw_body": body_text })
            } else {
                serde_json::json!({})
            }
        })
    }

    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    // 429 honours Retry-After; 500 always waits the fixed delay
    fn calculate_retry_delay(response: &HttpResponse, status: u16) -> Duration {
        if status == 429 {
            if let Some(delay) = response
                .retry_request_after
                .and_then(|seconds| Duration::try_from_secs_f64(seconds).ok())
            {
                return delay;
            }
        }
        Duration::from_secs(RETRY_WAIT_TIME)
    }

    fn serialize_error(response: &HttpResponse) -> String {
        let mut error_body = serde_json::Map::new();

        for key in ["errors", "error"] {
            if let Some(value) = response.body.get(key) {
                error_body.insert(key.to_string(), value.clone());
            }
        }
        if response.body.get("error").is_some() {
            if let Some(desc) = response.body.get("error_description") {
                error_body.insert("error_description".to_string(), desc.clone());
            }
        }

        if let Some(request_id) = response.request_id() {
            error_body.insert(
                "error_reference".to_string(),
                serde_json::json!(format!(
                    "If you report this error, please include this id: {request_id}."
                )),
            );
        }

        serde_json::to_string(&error_body).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
impl StorefrontHttpClient {
    fn base_uri(&self) -> &str {
        &self.base_uri
    }

    fn base_path(&self) -> &str {
        &self.base_path
    }

    fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }
}
