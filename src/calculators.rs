//! Calculators
//!
//! A calculator turns a cart into a raw discount amount, before any cap is applied.

use std::fmt;

use rust_decimal::Decimal;

use crate::{
    cart::Cart,
    values::{Money, Percent, ValueError},
};

/// Discount calculator capability.
///
/// Implementations must not return a negative amount.
pub trait DiscountCalculator: fmt::Debug + Send + Sync {
    /// Raw discount amount for the cart, in the cart currency.
    fn calculate(&self, cart: &dyn Cart) -> Decimal;
}

/// A fixed amount off, whatever the cart holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedAmountCalculator {
    money: Money,
}

impl FixedAmountCalculator {
    /// Create a fixed amount calculator.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::NonPositiveAmount`] if the amount is zero.
    pub fn new(money: Money) -> Result<Self, ValueError> {
        if money.is_zero() {
            return Err(ValueError::NonPositiveAmount(money.amount()));
        }

        Ok(Self { money })
    }

    /// Returns the configured amount
    pub fn money(&self) -> Money {
        self.money
    }
}

impl DiscountCalculator for FixedAmountCalculator {
    fn calculate(&self, _cart: &dyn Cart) -> Decimal {
        self.money.amount()
    }
}

/// A percentage of the cart total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PercentageCalculator {
    percent: Percent,
}

impl PercentageCalculator {
    /// Create a percentage calculator from a value in `0..=100`.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::PercentOutOfRange`] if the value is outside `0..=100`.
    pub fn new(percent: Decimal) -> Result<Self, ValueError> {
        Ok(Self {
            percent: Percent::new(percent)?,
        })
    }

    /// Returns the percentage
    pub fn percent(&self) -> Percent {
        self.percent
    }
}

impl From<Percent> for PercentageCalculator {
    fn from(percent: Percent) -> Self {
        Self { percent }
    }
}

impl DiscountCalculator for PercentageCalculator {
    fn calculate(&self, cart: &dyn Cart) -> Decimal {
        self.percent.of(cart.total())
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use crate::{cart::Basket, products::Product};

    use super::*;

    fn basket() -> TestResult<Basket> {
        let desk = Product::new(1, "Desk", Money::usd(Decimal::new(12_000, 2))?);
        let chair = Product::new(2, "Chair", Money::usd(Decimal::new(4_550, 2))?);

        Ok(Basket::with_products([(&desk, 1), (&chair, 2)], USD)?)
    }

    #[test]
    fn fixed_amount_ignores_cart() -> TestResult {
        let calculator = FixedAmountCalculator::new(Money::usd(Decimal::from(15))?)?;

        assert_eq!(calculator.calculate(&basket()?), Decimal::from(15));
        assert_eq!(calculator.calculate(&Basket::new(USD)), Decimal::from(15));

        Ok(())
    }

    #[test]
    fn fixed_amount_rejects_zero() -> TestResult {
        let result = FixedAmountCalculator::new(Money::usd(Decimal::ZERO)?);

        assert_eq!(result, Err(ValueError::NonPositiveAmount(Decimal::ZERO)));

        Ok(())
    }

    #[test]
    fn percentage_of_total() -> TestResult {
        let basket = basket()?;

        for points in [0, 10, 25, 33, 50, 100] {
            let percent = Decimal::from(points);
            let calculator = PercentageCalculator::new(percent)?;

            assert_eq!(
                calculator.calculate(&basket),
                basket.total() * percent / Decimal::ONE_HUNDRED,
                "{points}% of the basket total"
            );
        }

        Ok(())
    }

    #[test]
    fn percentage_rejects_out_of_range() {
        assert!(PercentageCalculator::new(Decimal::from(101)).is_err());
        assert!(PercentageCalculator::new(Decimal::from(-1)).is_err());
    }
}
