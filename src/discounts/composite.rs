//! Composite Discount
//!
//! One calculator gated by a list of conditions, with an optional cap.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use rust_decimal::Decimal;

use crate::{
    calculators::DiscountCalculator,
    cart::{Cart, User},
    conditions::Condition,
    discounts::{DEFAULT_PRIORITY, Discount, DiscountError},
};

static NEXT_SYNTHETIC_CODE: AtomicU64 = AtomicU64::new(1);

/// A calculator combined with conditions
#[derive(Debug, Clone)]
pub struct CompositeDiscount {
    code: String,
    calculator: Arc<dyn DiscountCalculator>,
    conditions: Vec<Condition>,
    combinable: bool,
    max_amount: Option<Decimal>,
    priority: i32,
}

impl CompositeDiscount {
    /// Create a discount.
    ///
    /// The code is taken from the first discount code condition, if there is one. Otherwise the
    /// discount gets a `discount_{n}` code unique within the process.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::NegativeCap`] if `max_amount` is below zero.
    pub fn new(
        calculator: Arc<dyn DiscountCalculator>,
        conditions: Vec<Condition>,
        combinable: bool,
        max_amount: Option<Decimal>,
        priority: i32,
    ) -> Result<Self, DiscountError> {
        if let Some(cap) = max_amount.filter(|cap| *cap < Decimal::ZERO) {
            return Err(DiscountError::NegativeCap(cap));
        }

        Ok(Self::assemble(
            calculator, conditions, combinable, max_amount, priority,
        ))
    }

    /// Create an uncapped, non-combinable discount with the default priority.
    pub fn with_defaults(
        calculator: Arc<dyn DiscountCalculator>,
        conditions: Vec<Condition>,
    ) -> Self {
        Self::assemble(calculator, conditions, false, None, DEFAULT_PRIORITY)
    }

    fn assemble(
        calculator: Arc<dyn DiscountCalculator>,
        conditions: Vec<Condition>,
        combinable: bool,
        max_amount: Option<Decimal>,
        priority: i32,
    ) -> Self {
        let code = conditions
            .iter()
            .find_map(Condition::expected_code)
            .map_or_else(synthetic_code, str::to_string);

        Self {
            code,
            calculator,
            conditions,
            combinable,
            max_amount,
            priority,
        }
    }

    /// Returns the conditions
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Returns the cap
    pub fn max_amount(&self) -> Option<Decimal> {
        self.max_amount
    }
}

fn synthetic_code() -> String {
    let id = NEXT_SYNTHETIC_CODE.fetch_add(1, Ordering::Relaxed);

    format!("discount_{id}")
}

impl Discount for CompositeDiscount {
    fn code(&self) -> &str {
        &self.code
    }

    fn is_applicable(&self, cart: &dyn Cart, user: Option<&dyn User>) -> bool {
        self.conditions
            .iter()
            .all(|condition| condition.is_satisfied(cart, user))
    }

    fn calculate(&self, cart: &dyn Cart, _user: Option<&dyn User>) -> Decimal {
        let amount = self.calculator.calculate(cart).max(Decimal::ZERO);

        match self.max_amount {
            Some(cap) => amount.min(cap),
            None => amount,
        }
    }

    fn is_combinable(&self) -> bool {
        self.combinable
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}
