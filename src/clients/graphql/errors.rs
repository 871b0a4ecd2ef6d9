//! GraphQL error types.
//!
//! The Storefront API reports query problems with HTTP 200 and an `errors`
//! array, and mutation problems through a `userErrors` field. Both are
//! surfaced here as typed variants next to the HTTP-level failures.

use thiserror::Error;

use crate::clients::graphql::response::{GraphqlErrorMessage, UserError};
use crate::clients::HttpError;

/// Error type for Storefront GraphQL operations.
///
/// # Example
///
/// ```rust
/// use storefront::clients::graphql::{GraphqlError, GraphqlErrorMessage};
///
/// let error = GraphqlError::Graphql {
///     errors: vec![GraphqlErrorMessage {
///         message: "Throttled".to_string(),
///         path: None,
///     }],
/// };
/// assert_eq!(error.to_string(), "Throttled");
/// ```
#[derive(Debug, Error)]
pub enum GraphqlError {
    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The response carried a non-empty top-level `errors` array.
    #[error("{}", graphql_messages(.errors))]
    Graphql {
        /// The errors reported by the API.
        errors: Vec<GraphqlErrorMessage>,
    },

    /// A mutation rejected its input through `userErrors`.
    #[error("{}", user_error_messages(.errors))]
    UserErrors {
        /// The user errors reported by the mutation.
        errors: Vec<UserError>,
    },

    /// The response had no value for a field the operation requires.
    #[error("Response is missing '{field}'")]
    MissingData {
        /// The missing field.
        field: &'static str,
    },

    /// The response body did not match the expected shape.
    #[error("Unexpected response shape: {0}")]
    Deserialize(#[from] serde_json::Error),
}

fn graphql_messages(errors: &[GraphqlErrorMessage]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

fn user_error_messages(errors: &[UserError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
