//! Typed GraphQL response envelope.

use serde::{Deserialize, Serialize};

use crate::clients::graphql::GraphqlError;

/// A single entry of a GraphQL `errors` array.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphqlErrorMessage {
    /// Human-readable error message.
    pub message: String,
    /// Path of the field that failed, if reported.
    #[serde(default)]
    pub path: Option<Vec<serde_json::Value>>,
}

/// A mutation `userErrors` entry (`CartUserError` in the Storefront schema).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserError {
    /// Path to the input field that caused the error.
    #[serde(default)]
    pub field: Option<Vec<String>>,
    /// Human-readable error message.
    pub message: String,
    /// Machine-readable error code.
    #[serde(default)]
    pub code: Option<String>,
}

/// The standard `{ data, errors, extensions }` response body.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphqlResponse<T> {
    /// The operation result.
    pub data: Option<T>,
    /// Errors reported alongside (or instead of) the data.
    #[serde(default)]
    pub errors: Vec<GraphqlErrorMessage>,
    /// Cost and debug information.
    #[serde(default)]
    pub extensions: Option<serde_json::Value>,
}

impl<T> GraphqlResponse<T> {
    /// Returns the data, failing on any reported error or missing data.
    ///
    /// Partial responses (data together with errors) are treated as failures.
    ///
    /// # Errors
    ///
    /// Returns [`GraphqlError::Graphql`] when `errors` is non-empty and
    /// [`GraphqlError::MissingData`] when `data` is null.
    pub fn into_data(self) -> Result<T, GraphqlError> {
        if !self.errors.is_empty() {
            return Err(GraphqlError::Graphql {
                errors: self.errors,
            });
        }
        self.data.ok_or(GraphqlError::MissingData { field: "data" })
    }
}
