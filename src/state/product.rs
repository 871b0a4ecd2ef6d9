//! Product page state.

use crate::error::{StorefrontError, ValidationError};
use crate::models::{LineItemInput, Product, SelectedOption};
use crate::state::resource::{AsyncResource, RequestId, TransitionError};

/// What the product page shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProductView<'a> {
    /// No product requested.
    Idle,
    /// The product is loading.
    Loading,
    /// Loading failed.
    Error(&'a StorefrontError),
    /// The product is ready.
    Ready(&'a Product),
}

/// The product slice.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductState {
    handle: Option<String>,
    resource: AsyncResource<Product>,
}

impl ProductState {
    /// Creates an idle product slice.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts loading the product with `handle`.
    pub fn begin(&mut self, handle: impl Into<String>) -> RequestId {
        self.handle = Some(handle.into());
        self.resource.request()
    }

    /// Applies the result of request `id`.
    ///
    /// # Errors
    ///
    /// Returns a [`TransitionError`] when `id` is stale or nothing is loading.
    pub fn complete(
        &mut self,
        id: RequestId,
        result: Result<Product, StorefrontError>,
    ) -> Result<(), TransitionError> {
        self.resource.complete(id, result)
    }

    /// Returns the handle last requested.
    #[must_use]
    pub fn handle(&self) -> Option<&str> {
        self.handle.as_deref()
    }

    /// Returns the underlying resource.
    #[must_use]
    pub const fn resource(&self) -> &AsyncResource<Product> {
        &self.resource
    }

    /// Derives what the product page shows.
    #[must_use]
    pub fn view(&self) -> ProductView<'_> {
        if self.resource.is_loading() {
            ProductView::Loading
        } else if let Some(error) = self.resource.error() {
            ProductView::Error(error)
        } else if let Some(product) = self.resource.data() {
            ProductView::Ready(product)
        } else {
            ProductView::Idle
        }
    }
}

/// Local add-to-cart form on the product page.
///
/// Nothing here is sent anywhere until [`line_item`](Self::line_item) is
/// submitted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductForm {
    variant_id: String,
    quantity: u32,
    selections: Vec<SelectedOption>,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self {
            variant_id: String::new(),
            quantity: 1,
            selections: Vec::new(),
        }
    }
}

impl ProductForm {
    /// Creates a form with no variant and a quantity of one.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Chooses a value for one option and re-resolves the variant.
    ///
    /// The variant is cleared until the choices identify exactly one variant
    /// of `product`.
    pub fn select_option(
        &mut self,
        product: &Product,
        name: impl Into<String>,
        value: impl Into<String>,
    ) {
        let selection = SelectedOption::new(name, value);
        match self.selections.iter_mut().find(|s| s.name == selection.name) {
            Some(existing) => existing.value = selection.value,
            None => self.selections.push(selection),
        }

        self.variant_id = product
            .variant_for_options(&self.selections)
            .map(|variant| variant.id.clone())
            .unwrap_or_default();
    }

    /// Chooses a variant directly.
    pub fn select_variant(&mut self, variant_id: impl Into<String>) {
        self.variant_id = variant_id.into();
    }

    /// Sets the quantity, clamped to at least one.
    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity.max(1);
    }

    /// Returns the selected variant ID (empty when none).
    #[must_use]
    pub fn variant_id(&self) -> &str {
        &self.variant_id
    }

    /// Returns the quantity.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns the option choices made so far.
    #[must_use]
    pub fn selections(&self) -> &[SelectedOption] {
        &self.selections
    }

    /// Validates the form into a line item.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyVariantId`] until a variant is chosen.
    pub fn line_item(&self) -> Result<LineItemInput, ValidationError> {
        LineItemInput::new(self.variant_id.clone(), self.quantity)
    }
}
