//! Discounts

use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    cart::{Cart, User},
    conditions::ConditionError,
    values::ValueError,
};

pub mod composite;

pub use composite::CompositeDiscount;

/// Priority given to discounts that do not set one.
pub const DEFAULT_PRIORITY: i32 = 100;

/// Errors raised while building discounts.
#[derive(Debug, Error)]
pub enum DiscountError {
    /// A maximum discount amount was below zero.
    #[error("maximum discount amount must not be negative, got {0}")]
    NegativeCap(Decimal),

    /// Invalid amount or percentage.
    #[error(transparent)]
    Value(#[from] ValueError),

    /// Invalid condition.
    #[error(transparent)]
    Condition(#[from] ConditionError),
}

/// Discount capability.
pub trait Discount: fmt::Debug + Send + Sync {
    /// Registry key for this discount.
    fn code(&self) -> &str;

    /// Whether every condition holds for the cart and user.
    fn is_applicable(&self, cart: &dyn Cart, user: Option<&dyn User>) -> bool;

    /// Amount this discount is worth for the cart and user.
    fn calculate(&self, cart: &dyn Cart, user: Option<&dyn User>) -> Decimal;

    /// Whether this discount may be summed with others.
    fn is_combinable(&self) -> bool;

    /// Evaluation order for the ordered strategy, lower first.
    fn priority(&self) -> i32;
}
