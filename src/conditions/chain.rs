//! Condition chain

use jiff::Timestamp;

use crate::{
    cart::{Cart, User},
    conditions::Condition,
};

/// Conditions joined with AND, evaluated in order.
///
/// An empty chain is satisfied.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConditionChain {
    conditions: Vec<Condition>,
}

impl ConditionChain {
    /// Create a chain from conditions.
    pub fn new(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Self {
            conditions: conditions.into_iter().collect(),
        }
    }

    /// Append a condition.
    #[must_use]
    pub fn with(mut self, condition: impl Into<Condition>) -> Self {
        self.conditions.push(condition.into());
        self
    }

    /// Returns the conditions
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Number of direct members.
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// Whether the chain has no members.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Whether every member holds right now.
    pub fn is_satisfied(&self, cart: &dyn Cart, user: Option<&dyn User>) -> bool {
        self.is_satisfied_at(cart, user, Timestamp::now())
    }

    /// Whether every member holds at `now`. Stops at the first failure.
    pub fn is_satisfied_at(&self, cart: &dyn Cart, user: Option<&dyn User>, now: Timestamp) -> bool {
        self.conditions
            .iter()
            .all(|condition| condition.is_satisfied_at(cart, user, now))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use crate::{
        cart::{Basket, ProductId, Shopper},
        conditions::{ByProductIdCondition, CartTotalCondition, DiscountCodeCondition},
        products::Product,
        values::Money,
    };

    use super::*;

    #[test]
    fn empty_chain_is_satisfied() {
        let basket = Basket::new(USD);

        assert!(ConditionChain::default().is_satisfied(&basket, None));
    }

    #[test]
    fn all_members_must_hold() -> TestResult {
        let book = Product::new(5, "Book", Money::usd(Decimal::from(12))?);
        let basket = Basket::with_products([(&book, 2)], USD)?;
        let shopper = Shopper::authenticated(1);

        let chain = ConditionChain::default()
            .with(ByProductIdCondition::new(ProductId(5), 2)?)
            .with(CartTotalCondition::new(Decimal::from(20))?)
            .with(Condition::AuthenticatedUser);

        assert_eq!(chain.len(), 3);
        assert!(chain.is_satisfied(&basket, Some(&shopper)));
        assert!(!chain.is_satisfied(&basket, None));

        Ok(())
    }

    #[test]
    fn nested_chains_compose() {
        let basket = Basket::new(USD);

        let inner = ConditionChain::default().with(DiscountCodeCondition::new("A", "A"));
        let outer = ConditionChain::new([Condition::from(inner.clone())])
            .with(DiscountCodeCondition::new("B", "C"));

        assert!(inner.is_satisfied(&basket, None));
        assert!(!outer.is_satisfied(&basket, None));
    }
}
