//! Cart total condition

use rust_decimal::Decimal;

use crate::{cart::Cart, conditions::ConditionError};

/// The cart total is at least `min_total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartTotalCondition {
    min_total: Decimal,
}

impl CartTotalCondition {
    /// Require a cart total of at least `min_total`.
    ///
    /// # Errors
    ///
    /// Returns [`ConditionError::NegativeThreshold`] if `min_total` is below zero.
    pub fn new(min_total: Decimal) -> Result<Self, ConditionError> {
        if min_total < Decimal::ZERO {
            return Err(ConditionError::NegativeThreshold(min_total));
        }

        Ok(Self { min_total })
    }

    /// Returns the threshold
    pub fn min_total(&self) -> Decimal {
        self.min_total
    }

    pub(crate) fn is_satisfied(&self, cart: &dyn Cart) -> bool {
        cart.total() >= self.min_total
    }
}
