//! Discount Factory
//!
//! Builders for the common discount shapes. Each builder appends a discount code condition when
//! a code is given, and a date range condition when a validity bound is given.

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    calculators::{DiscountCalculator, FixedAmountCalculator, PercentageCalculator},
    conditions::{Condition, DateRangeCondition, DiscountCodeCondition},
    discounts::{CompositeDiscount, DEFAULT_PRIORITY, DiscountError},
    values::Money,
};

/// Options shared by every factory builder
#[derive(Debug, Clone)]
pub struct DiscountOptions {
    /// Conditions the discount starts with
    pub conditions: Vec<Condition>,

    /// Whether the discount may be summed with others
    pub combinable: bool,

    /// Upper bound on the discount amount
    pub max_amount: Option<Decimal>,

    /// Evaluation order, lower first
    pub priority: i32,

    /// Code supplied by the shopper, matched against the discount code
    pub provided_code: Option<String>,

    /// Start of the validity window
    pub valid_from: Option<Timestamp>,

    /// End of the validity window
    pub valid_to: Option<Timestamp>,
}

impl Default for DiscountOptions {
    fn default() -> Self {
        Self {
            conditions: Vec::new(),
            combinable: false,
            max_amount: None,
            priority: DEFAULT_PRIORITY,
            provided_code: None,
            valid_from: None,
            valid_to: None,
        }
    }
}

impl DiscountOptions {
    /// Add a condition
    #[must_use]
    pub fn with_condition(mut self, condition: impl Into<Condition>) -> Self {
        self.conditions.push(condition.into());
        self
    }

    /// Replace the conditions
    #[must_use]
    pub fn with_conditions(mut self, conditions: Vec<Condition>) -> Self {
        self.conditions = conditions;
        self
    }

    /// Set whether the discount may be summed with others
    #[must_use]
    pub fn combinable(mut self, combinable: bool) -> Self {
        self.combinable = combinable;
        self
    }

    /// Cap the discount amount
    #[must_use]
    pub fn with_max_amount(mut self, max_amount: Decimal) -> Self {
        self.max_amount = Some(max_amount);
        self
    }

    /// Set the priority
    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Set the code supplied by the shopper
    #[must_use]
    pub fn with_provided_code(mut self, code: impl Into<String>) -> Self {
        self.provided_code = Some(code.into());
        self
    }

    /// Restrict the discount to a validity window
    #[must_use]
    pub fn valid_between(mut self, from: Option<Timestamp>, to: Option<Timestamp>) -> Self {
        self.valid_from = from;
        self.valid_to = to;
        self
    }
}

/// Builds [`CompositeDiscount`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscountFactory;

impl DiscountFactory {
    /// A fixed amount off.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscountError`] if the amount is zero, the cap is negative or the validity
    /// window is inverted.
    pub fn create_fixed_discount(
        &self,
        code: &str,
        amount: Money,
        options: DiscountOptions,
    ) -> Result<CompositeDiscount, DiscountError> {
        let calculator = FixedAmountCalculator::new(amount)?;

        self.create_custom_discount(code, Arc::new(calculator), options)
    }

    /// A percentage of the cart total, `percentage` in `0..=100`.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscountError`] if the percentage is out of range, the cap is negative or the
    /// validity window is inverted.
    pub fn create_percentage_discount(
        &self,
        code: &str,
        percentage: Decimal,
        options: DiscountOptions,
    ) -> Result<CompositeDiscount, DiscountError> {
        let calculator = PercentageCalculator::new(percentage)?;

        self.create_custom_discount(code, Arc::new(calculator), options)
    }

    /// A discount driven by any calculator.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscountError`] if the cap is negative or the validity window is inverted.
    pub fn create_custom_discount(
        &self,
        code: &str,
        calculator: Arc<dyn DiscountCalculator>,
        options: DiscountOptions,
    ) -> Result<CompositeDiscount, DiscountError> {
        let DiscountOptions {
            mut conditions,
            combinable,
            max_amount,
            priority,
            provided_code,
            valid_from,
            valid_to,
        } = options;

        if !code.is_empty() {
            conditions.push(
                DiscountCodeCondition::new(code, provided_code.unwrap_or_default()).into(),
            );
        }

        if valid_from.is_some() || valid_to.is_some() {
            conditions.push(DateRangeCondition::new(valid_from, valid_to)?.into());
        }

        CompositeDiscount::new(calculator, conditions, combinable, max_amount, priority)
    }
}

#[cfg(test)]
mod tests {
    use jiff::ToSpan;
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use crate::{
        cart::{Basket, ProductId},
        conditions::ByProductIdCondition,
        discounts::Discount,
        products::Product,
    };

    use super::*;

    fn basket() -> TestResult<Basket> {
        let scarf = Product::new(2, "Scarf", Money::usd(Decimal::from(20))?);

        Ok(Basket::with_products([(&scarf, 3)], USD)?)
    }

    #[test]
    fn code_appends_code_condition() -> TestResult {
        let discount = DiscountFactory.create_fixed_discount(
            "WINTER",
            Money::usd(Decimal::from(5))?,
            DiscountOptions::default().with_provided_code("WINTER"),
        )?;

        assert_eq!(discount.code(), "WINTER");
        assert_eq!(
            discount.conditions(),
            &[Condition::from(DiscountCodeCondition::new("WINTER", "WINTER"))]
        );
        assert!(discount.is_applicable(&basket()?, None));

        Ok(())
    }

    #[test]
    fn missing_provided_code_never_matches() -> TestResult {
        let discount = DiscountFactory.create_percentage_discount(
            "quantity_discount",
            Decimal::from(10),
            DiscountOptions::default()
                .with_condition(ByProductIdCondition::new(ProductId(2), 3)?)
                .combinable(true),
        )?;

        assert_eq!(discount.conditions().len(), 2);
        assert!(!discount.is_applicable(&basket()?, None));

        Ok(())
    }

    #[test]
    fn empty_code_adds_no_condition() -> TestResult {
        let discount = DiscountFactory.create_percentage_discount(
            "",
            Decimal::from(10),
            DiscountOptions::default(),
        )?;

        assert!(discount.conditions().is_empty());
        assert!(discount.code().starts_with("discount_"));
        assert_eq!(discount.calculate(&basket()?, None), Decimal::from(6));

        Ok(())
    }

    #[test]
    fn validity_bound_appends_date_range() -> TestResult {
        let from = Timestamp::now().checked_sub(1.hour())?;

        let discount = DiscountFactory.create_fixed_discount(
            "",
            Money::usd(Decimal::from(5))?,
            DiscountOptions::default().valid_between(Some(from), None),
        )?;

        assert_eq!(
            discount.conditions(),
            &[Condition::from(DateRangeCondition::new(Some(from), None)?)]
        );
        assert!(discount.is_applicable(&basket()?, None));

        Ok(())
    }

    #[test]
    fn expired_window_is_not_applicable() -> TestResult {
        let to = Timestamp::now().checked_sub(24.hours())?;

        let discount = DiscountFactory.create_fixed_discount(
            "",
            Money::usd(Decimal::from(5))?,
            DiscountOptions::default().valid_between(None, Some(to)),
        )?;

        assert!(!discount.is_applicable(&basket()?, None));

        Ok(())
    }

    #[test]
    fn options_flow_into_discount() -> TestResult {
        let discount = DiscountFactory.create_percentage_discount(
            "",
            Decimal::from(50),
            DiscountOptions::default()
                .combinable(true)
                .with_max_amount(Decimal::from(12))
                .with_priority(5),
        )?;

        assert!(discount.is_combinable());
        assert_eq!(discount.priority(), 5);
        assert_eq!(discount.calculate(&basket()?, None), Decimal::from(12));

        Ok(())
    }

    #[test]
    fn custom_calculator_is_used() -> TestResult {
        #[derive(Debug)]
        struct PerLine;

        impl DiscountCalculator for PerLine {
            fn calculate(&self, cart: &dyn crate::cart::Cart) -> Decimal {
                Decimal::from(cart.items().len())
            }
        }

        let discount = DiscountFactory.create_custom_discount(
            "",
            Arc::new(PerLine),
            DiscountOptions::default(),
        )?;

        assert_eq!(discount.calculate(&basket()?, None), Decimal::ONE);

        Ok(())
    }

    #[test]
    fn invalid_values_are_rejected() -> TestResult {
        assert!(matches!(
            DiscountFactory.create_percentage_discount(
                "",
                Decimal::from(120),
                DiscountOptions::default()
            ),
            Err(DiscountError::Value(_))
        ));
        assert!(matches!(
            DiscountFactory.create_fixed_discount(
                "",
                Money::usd(Decimal::ZERO)?,
                DiscountOptions::default()
            ),
            Err(DiscountError::Value(_))
        ));

        Ok(())
    }
}
