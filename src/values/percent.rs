//! Percent

use std::fmt;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;

use crate::values::ValueError;

/// A percentage between 0 and 100 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Percent {
    value: Decimal,
}

impl Percent {
    /// Create a percentage from a value in `0..=100`.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::PercentOutOfRange`] if the value is outside `0..=100`.
    pub fn new(value: Decimal) -> Result<Self, ValueError> {
        if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
            return Err(ValueError::PercentOutOfRange(value));
        }

        Ok(Self { value })
    }

    /// Returns the value in points (`15` for 15%)
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Returns the value as a fraction (`0.15` for 15%)
    pub fn as_decimal(&self) -> Decimal {
        self.value / Decimal::ONE_HUNDRED
    }

    /// Returns the fraction as a [`Percentage`]
    pub fn as_percentage(&self) -> Percentage {
        Percentage::from(self.as_decimal())
    }

    /// Apply this percentage to an amount.
    pub fn of(&self, amount: Decimal) -> Decimal {
        self.as_percentage() * amount
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.value.normalize())
    }
}
