//! GraphQL support shared by the Storefront client.
//!
//! - [`GraphqlResponse`]: the typed `{ data, errors, extensions }` envelope
//! - [`GraphqlError`]: HTTP, GraphQL, user and decoding errors
//!
//! GraphQL-level errors arrive with HTTP 200. [`GraphqlResponse::into_data`]
//! turns them into [`GraphqlError::Graphql`] so callers only see data on
//! success.

mod errors;
mod response;

pub use errors::GraphqlError;
pub use response::{GraphqlErrorMessage, GraphqlResponse, UserError};
