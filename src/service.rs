//! Discount Service
//!
//! Holds the discount registry and hands evaluation off to a strategy.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::{
    cart::{Cart, User},
    discounts::Discount,
    strategies::{DiscountStrategy, StrategyKind, StrategyOutcome},
};

/// Discounts in registration order, indexed by code.
#[derive(Debug, Default)]
struct Registry {
    entries: Vec<Arc<dyn Discount>>,
    index: FxHashMap<String, usize>,
}

impl Registry {
    fn upsert(&mut self, discount: Arc<dyn Discount>) -> bool {
        if let Some(slot) = self
            .index
            .get(discount.code())
            .and_then(|&position| self.entries.get_mut(position))
        {
            *slot = discount;
            return true;
        }

        self.index
            .insert(discount.code().to_string(), self.entries.len());
        self.entries.push(discount);

        false
    }

    fn remove(&mut self, code: &str) -> bool {
        let Some(position) = self.index.remove(code) else {
            return false;
        };

        if position < self.entries.len() {
            self.entries.remove(position);
        }

        for later in self.index.values_mut() {
            if *later > position {
                *later -= 1;
            }
        }

        true
    }

    fn get(&self, code: &str) -> Option<&Arc<dyn Discount>> {
        let position = *self.index.get(code)?;

        self.entries.get(position)
    }
}

/// Registry of discounts evaluated with one strategy.
///
/// Every method takes `&self`, so a service can be shared between threads behind an `Arc`.
/// Evaluation works on a snapshot of the registry taken under a read lock.
#[derive(Debug)]
pub struct DiscountService {
    strategy: Box<dyn DiscountStrategy>,
    registry: RwLock<Registry>,
}

impl Default for DiscountService {
    fn default() -> Self {
        Self::from_kind(StrategyKind::default())
    }
}

impl DiscountService {
    /// Create an empty service using `strategy`.
    pub fn new(strategy: impl DiscountStrategy + 'static) -> Self {
        Self::with_boxed_strategy(Box::new(strategy))
    }

    /// Create an empty service using one of the built-in strategies.
    pub fn from_kind(kind: StrategyKind) -> Self {
        Self::with_boxed_strategy(kind.strategy())
    }

    fn with_boxed_strategy(strategy: Box<dyn DiscountStrategy>) -> Self {
        Self {
            strategy,
            registry: RwLock::new(Registry::default()),
        }
    }

    /// Register a discount, replacing any discount with the same code in place.
    pub fn register_discount(&self, discount: impl Discount + 'static) -> &Self {
        self.register_shared(Arc::new(discount))
    }

    /// Register an already shared discount, replacing any discount with the same code in place.
    pub fn register_shared(&self, discount: Arc<dyn Discount>) -> &Self {
        let code = discount.code().to_string();
        let replaced = self.write().upsert(discount);

        debug!(code, replaced, "registered discount");

        self
    }

    /// Register each discount in turn.
    pub fn register_discounts<D>(&self, discounts: impl IntoIterator<Item = D>) -> &Self
    where
        D: Discount + 'static,
    {
        for discount in discounts {
            self.register_discount(discount);
        }

        self
    }

    /// Remove the discount registered under `code`, if any.
    pub fn remove_discount(&self, code: &str) -> &Self {
        let removed = self.write().remove(code);

        debug!(code, removed, "removed discount");

        self
    }

    /// Total discount for the cart and user under this service's strategy.
    pub fn calculate_discount(&self, cart: &dyn Cart, user: Option<&dyn User>) -> Decimal {
        self.evaluate(cart, user).total
    }

    /// Apply the strategy, keeping the list of discounts that fired.
    ///
    /// Only the ordered strategy records applied discounts; other strategies leave the list empty.
    pub fn evaluate(&self, cart: &dyn Cart, user: Option<&dyn User>) -> StrategyOutcome {
        let discounts = self.discounts();
        let outcome = self.strategy.apply_discounts(&discounts, cart, user);

        debug!(
            registered = discounts.len(),
            applied = outcome.applied.len(),
            total = %outcome.total,
            "evaluated discounts"
        );

        outcome
    }

    /// Snapshot of the registered discounts in registration order.
    pub fn discounts(&self) -> Vec<Arc<dyn Discount>> {
        self.read().entries.clone()
    }

    /// The discount registered under `code`.
    pub fn discount(&self, code: &str) -> Option<Arc<dyn Discount>> {
        self.read().get(code).cloned()
    }

    /// Number of registered discounts.
    pub fn len(&self) -> usize {
        self.read().entries.len()
    }

    /// Whether no discounts are registered.
    pub fn is_empty(&self) -> bool {
        self.read().entries.is_empty()
    }

    // Registry updates are single assignments, so a poisoned lock still holds a usable registry.
    fn read(&self) -> RwLockReadGuard<'_, Registry> {
        self.registry.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Registry> {
        self.registry.write().unwrap_or_else(PoisonError::into_inner)
    }
}
