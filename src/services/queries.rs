//! GraphQL documents sent to the Storefront API.

/// Fetches one product by handle.
pub const PRODUCT_BY_HANDLE: &str = r"
query ProductByHandle($handle: String!) {
  product(handle: $handle) {
    id
    handle
    title
    description
    updatedAt
    options {
      id
      name
      optionValues {
        name
      }
    }
    variants(first: 250) {
      edges {
        node {
          id
          title
          availableForSale
          selectedOptions {
            name
            value
          }
          price {
            amount
            currencyCode
          }
        }
      }
    }
    images(first: 10) {
      edges {
        node {
          url
          altText
        }
      }
    }
  }
}
";

/// Fetches one page of the catalog.
pub const PRODUCTS: &str = r"
query Products($first: Int!, $after: String, $query: String, $sortKey: ProductSortKeys, $reverse: Boolean) {
  products(first: $first, after: $after, query: $query, sortKey: $sortKey, reverse: $reverse) {
    edges {
      cursor
      node {
        id
        handle
        title
        priceRange {
          minVariantPrice {
            amount
            currencyCode
          }
        }
        images(first: 1) {
          edges {
            node {
              url
              altText
            }
          }
        }
      }
    }
    pageInfo {
      hasNextPage
      endCursor
    }
  }
}
";

const CART_FIELDS: &str = r"
      id
      checkoutUrl
      totalQuantity
      lines(first: 100) {
        edges {
          node {
            id
            quantity
            merchandise {
              ... on ProductVariant {
                id
                title
              }
            }
          }
        }
      }
      cost {
        subtotalAmount {
          amount
          currencyCode
        }
        totalAmount {
          amount
          currencyCode
        }
      }
";

/// Creates a cart holding the given lines.
#[must_use]
pub fn cart_create() -> String {
    format!(
        r"
mutation CartCreate($lines: [CartLineInput!]!) {{
  cartCreate(input: {{ lines: $lines }}) {{
    cart {{{CART_FIELDS}    }}
    userErrors {{
      field
      message
      code
    }}
  }}
}}
"
    )
}

/// Adds lines to an existing cart.
#[must_use]
pub fn cart_lines_add() -> String {
    format!(
        r"
mutation CartLinesAdd($cartId: ID!, $lines: [CartLineInput!]!) {{
  cartLinesAdd(cartId: $cartId, lines: $lines) {{
    cart {{{CART_FIELDS}    }}
    userErrors {{
      field
      message
      code
    }}
  }}
}}
"
    )
}
