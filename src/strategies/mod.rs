//! Strategies
//!
//! A strategy folds the registered discounts into the single amount taken off a cart.

use std::{fmt, sync::Arc};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{
    cart::{Cart, User},
    discounts::Discount,
};

pub mod best;
pub mod combinable;
pub mod ordered;

#[cfg(test)]
pub(crate) mod test_support;

pub use best::BestDiscountStrategy;
pub use combinable::CombinableDiscountsStrategy;
pub use ordered::OrderedDiscountStrategy;

/// A discount that contributed to an outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedDiscount {
    /// Discount code
    pub code: String,

    /// Amount it contributed
    pub amount: Decimal,

    /// Whether it was combinable
    pub combinable: bool,
}

/// Result of applying a strategy
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StrategyOutcome {
    /// Combined discount amount
    pub total: Decimal,

    /// Discounts applied in order. Only the ordered strategy records these.
    pub applied: SmallVec<[AppliedDiscount; 4]>,
}

impl StrategyOutcome {
    /// An outcome without a trace
    pub fn from_total(total: Decimal) -> Self {
        Self {
            total,
            applied: SmallVec::new(),
        }
    }
}

/// Discount strategy capability.
pub trait DiscountStrategy: fmt::Debug + Send + Sync {
    /// Combine `discounts` for the cart and user.
    fn apply_discounts(
        &self,
        discounts: &[Arc<dyn Discount>],
        cart: &dyn Cart,
        user: Option<&dyn User>,
    ) -> StrategyOutcome;
}

/// Names a built-in strategy in configuration.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// [`BestDiscountStrategy`]
    Best,

    /// [`CombinableDiscountsStrategy`]
    Combinable,

    /// [`OrderedDiscountStrategy`]
    #[default]
    Ordered,
}

impl StrategyKind {
    /// Build the strategy this kind names.
    pub fn strategy(self) -> Box<dyn DiscountStrategy> {
        match self {
            StrategyKind::Best => Box::new(BestDiscountStrategy),
            StrategyKind::Combinable => Box::new(CombinableDiscountsStrategy),
            StrategyKind::Ordered => Box::new(OrderedDiscountStrategy),
        }
    }
}
