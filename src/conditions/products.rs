//! Product quantity conditions

use std::collections::BTreeMap;

use crate::{
    cart::{Cart, ProductId},
    conditions::ConditionError,
};

/// At least `min_quantity` units of one product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByProductIdCondition {
    product_id: ProductId,
    min_quantity: u32,
}

impl ByProductIdCondition {
    /// Require at least `min_quantity` units of `product_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ConditionError::NonPositiveQuantity`] if `min_quantity` is zero.
    pub fn new(product_id: ProductId, min_quantity: u32) -> Result<Self, ConditionError> {
        if min_quantity == 0 {
            return Err(ConditionError::NonPositiveQuantity(product_id));
        }

        Ok(Self {
            product_id,
            min_quantity,
        })
    }

    /// Require at least one unit of `product_id`.
    pub fn any(product_id: ProductId) -> Self {
        Self {
            product_id,
            min_quantity: 1,
        }
    }

    /// Returns the product
    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    /// Returns the minimum quantity
    pub fn min_quantity(&self) -> u32 {
        self.min_quantity
    }

    pub(crate) fn is_satisfied(&self, cart: &dyn Cart) -> bool {
        cart.product_quantity(self.product_id) >= self.min_quantity
    }
}

/// Minimum quantities of several products, all of which must be met.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MultipleProductsCondition {
    required: BTreeMap<ProductId, u32>,
}

impl MultipleProductsCondition {
    /// Build from `(product, min_quantity)` pairs. A repeated product keeps its last quantity.
    ///
    /// # Errors
    ///
    /// Returns [`ConditionError::NonPositiveQuantity`] if any quantity is zero.
    pub fn new(
        requirements: impl IntoIterator<Item = (ProductId, u32)>,
    ) -> Result<Self, ConditionError> {
        requirements
            .into_iter()
            .try_fold(Self::default(), |condition, (product, quantity)| {
                condition.with_requirement(product, quantity)
            })
    }

    /// Add or replace the requirement for one product.
    ///
    /// # Errors
    ///
    /// Returns [`ConditionError::NonPositiveQuantity`] if `quantity` is zero.
    pub fn with_requirement(
        mut self,
        product: ProductId,
        quantity: u32,
    ) -> Result<Self, ConditionError> {
        if quantity == 0 {
            return Err(ConditionError::NonPositiveQuantity(product));
        }

        self.required.insert(product, quantity);

        Ok(self)
    }

    /// Returns the required products and their minimum quantities
    pub fn required_products(&self) -> &BTreeMap<ProductId, u32> {
        &self.required
    }

    pub(crate) fn is_satisfied(&self, cart: &dyn Cart) -> bool {
        self.required
            .iter()
            .all(|(product, quantity)| cart.product_quantity(*product) >= *quantity)
    }
}
