//! Combinable Discounts Strategy

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::trace;

use crate::{
    cart::{Cart, User},
    discounts::Discount,
    strategies::{DiscountStrategy, StrategyOutcome},
};

/// Sums every applicable combinable discount. Non-combinable discounts never count, even alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct CombinableDiscountsStrategy;

impl DiscountStrategy for CombinableDiscountsStrategy {
    fn apply_discounts(
        &self,
        discounts: &[Arc<dyn Discount>],
        cart: &dyn Cart,
        user: Option<&dyn User>,
    ) -> StrategyOutcome {
        let total = discounts
            .iter()
            .filter(|discount| discount.is_applicable(cart, user) && discount.is_combinable())
            .map(|discount| {
                let amount = discount.calculate(cart, user);
                trace!(code = discount.code(), %amount, "stacking discount");
                amount
            })
            .sum::<Decimal>();

        StrategyOutcome::from_total(total)
    }
}
