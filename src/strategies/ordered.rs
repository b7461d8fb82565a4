//! Ordered Discount Strategy

use std::sync::Arc;

use tracing::trace;

use crate::{
    cart::{Cart, User},
    discounts::Discount,
    strategies::{AppliedDiscount, DiscountStrategy, StrategyOutcome},
};

/// Applies discounts by ascending priority, stopping after the first non-combinable one.
///
/// Discounts sharing a priority keep their input order. The outcome records every discount that
/// fired.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderedDiscountStrategy;

impl DiscountStrategy for OrderedDiscountStrategy {
    fn apply_discounts(
        &self,
        discounts: &[Arc<dyn Discount>],
        cart: &dyn Cart,
        user: Option<&dyn User>,
    ) -> StrategyOutcome {
        let mut ordered: Vec<&Arc<dyn Discount>> = discounts.iter().collect();

        // `sort_by_key` is stable, so ties keep registration order.
        ordered.sort_by_key(|discount| discount.priority());

        let mut outcome = StrategyOutcome::default();

        for discount in ordered {
            if !discount.is_applicable(cart, user) {
                continue;
            }

            let amount = discount.calculate(cart, user);
            let combinable = discount.is_combinable();

            trace!(
                code = discount.code(),
                priority = discount.priority(),
                %amount,
                combinable,
                "applying discount"
            );

            outcome.total += amount;
            outcome.applied.push(AppliedDiscount {
                code: discount.code().to_string(),
                amount,
                combinable,
            });

            if !combinable {
                break;
            }
        }

        outcome
    }
}
