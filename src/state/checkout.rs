//! Checkout (cart) state.

use crate::error::StorefrontError;
use crate::models::Cart;
use crate::state::resource::{AsyncResource, RequestId, TransitionError};

/// The checkout slice.
///
/// Holds the last add-to-cart response. The cart ID it carries is reused for
/// every later addition, so lines accumulate in one cart.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CheckoutState {
    cart: AsyncResource<Cart>,
    cart_id: Option<String>,
}

impl CheckoutState {
    /// Creates an empty checkout slice.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts an add-to-cart request.
    ///
    /// Returns the request id and the cart to add to (`None` creates one).
    pub fn begin(&mut self) -> (RequestId, Option<String>) {
        (self.cart.request(), self.cart_id.clone())
    }

    /// Applies the result of request `id`.
    ///
    /// # Errors
    ///
    /// Returns a [`TransitionError`] when `id` is stale or nothing is loading.
    pub fn complete(
        &mut self,
        id: RequestId,
        result: Result<Cart, StorefrontError>,
    ) -> Result<(), TransitionError> {
        match result {
            Ok(cart) => {
                let cart_id = cart.id.clone();
                self.cart.succeed(id, cart)?;
                self.cart_id = Some(cart_id);
            }
            Err(error) => self.cart.fail(id, error)?,
        }
        Ok(())
    }

    /// Returns the add-to-cart resource.
    #[must_use]
    pub const fn cart(&self) -> &AsyncResource<Cart> {
        &self.cart
    }

    /// Returns the ID of the cart lines are added to.
    #[must_use]
    pub fn cart_id(&self) -> Option<&str> {
        self.cart_id.as_deref()
    }

    /// Returns the hosted checkout link of the latest cart.
    #[must_use]
    pub fn checkout_url(&self) -> Option<&str> {
        self.cart.data().map(|cart| cart.checkout_url.as_str())
    }

    /// Returns the number of items in the latest cart.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.cart.data().map_or(0, |cart| cart.total_quantity)
    }
}
