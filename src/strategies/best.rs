//! Best Discount Strategy

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::trace;

use crate::{
    cart::{Cart, User},
    discounts::Discount,
    strategies::{DiscountStrategy, StrategyOutcome},
};

/// Applies only the single largest applicable discount, combinable or not.
#[derive(Debug, Clone, Copy, Default)]
pub struct BestDiscountStrategy;

impl DiscountStrategy for BestDiscountStrategy {
    fn apply_discounts(
        &self,
        discounts: &[Arc<dyn Discount>],
        cart: &dyn Cart,
        user: Option<&dyn User>,
    ) -> StrategyOutcome {
        let best = discounts
            .iter()
            .filter(|discount| discount.is_applicable(cart, user))
            .map(|discount| {
                let amount = discount.calculate(cart, user);
                trace!(code = discount.code(), %amount, "candidate discount");
                amount
            })
            .fold(Decimal::ZERO, Decimal::max);

        StrategyOutcome::from_total(best)
    }
}
