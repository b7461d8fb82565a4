//! Shared fixtures for strategy tests.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use rust_decimal::Decimal;

use crate::{
    cart::{Cart, User},
    discounts::Discount,
};

/// A discount with fixed answers that counts how often it is calculated.
#[derive(Debug)]
pub(crate) struct StubDiscount {
    pub code: &'static str,
    pub priority: i32,
    pub combinable: bool,
    pub amount: Decimal,
    pub applicable: bool,
    pub calculations: AtomicUsize,
}

impl StubDiscount {
    pub(crate) fn new(code: &'static str, priority: i32, combinable: bool, amount: i64) -> Self {
        Self {
            code,
            priority,
            combinable,
            amount: Decimal::from(amount),
            applicable: true,
            calculations: AtomicUsize::new(0),
        }
    }

    pub(crate) fn inapplicable(mut self) -> Self {
        self.applicable = false;
        self
    }

    pub(crate) fn calculations(&self) -> usize {
        self.calculations.load(Ordering::SeqCst)
    }
}

impl Discount for StubDiscount {
    fn code(&self) -> &str {
        self.code
    }

    fn is_applicable(&self, _cart: &dyn Cart, _user: Option<&dyn User>) -> bool {
        self.applicable
    }

    fn calculate(&self, _cart: &dyn Cart, _user: Option<&dyn User>) -> Decimal {
        self.calculations.fetch_add(1, Ordering::SeqCst);
        self.amount
    }

    fn is_combinable(&self) -> bool {
        self.combinable
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}

/// A(priority 10, combinable, 5), B(20, not combinable, 7), C(30, combinable, 3).
pub(crate) fn abc() -> [Arc<StubDiscount>; 3] {
    [
        Arc::new(StubDiscount::new("A", 10, true, 5)),
        Arc::new(StubDiscount::new("B", 20, false, 7)),
        Arc::new(StubDiscount::new("C", 30, true, 3)),
    ]
}

/// The same three discounts as trait objects.
pub(crate) fn discounts() -> Vec<Arc<dyn Discount>> {
    as_dyn(&abc())
}

pub(crate) fn as_dyn(stubs: &[Arc<StubDiscount>]) -> Vec<Arc<dyn Discount>> {
    stubs
        .iter()
        .map(|stub| Arc::clone(stub) as Arc<dyn Discount>)
        .collect()
}
