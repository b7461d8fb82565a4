//! Money

use std::fmt;

use rust_decimal::Decimal;
use rusty_money::iso::{self, Currency};

use crate::values::ValueError;

/// A non-negative amount in a single currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Money {
    amount: Decimal,
    currency: &'static Currency,
}

impl Money {
    /// Create a new amount in the given currency.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::NegativeAmount`] if `amount` is below zero.
    pub fn new(amount: Decimal, currency: &'static Currency) -> Result<Self, ValueError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(ValueError::NegativeAmount(amount));
        }

        Ok(Self { amount, currency })
    }

    /// Create a new amount in US dollars.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::NegativeAmount`] if `amount` is below zero.
    pub fn usd(amount: Decimal) -> Result<Self, ValueError> {
        Self::new(amount, iso::USD)
    }

    /// Zero in the given currency.
    pub fn zero(currency: &'static Currency) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    /// Look up a supported ISO currency by its alpha code.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::UnknownCurrency`] for codes outside USD, EUR, GBP and JPY.
    pub fn parse_currency(code: &str) -> Result<&'static Currency, ValueError> {
        match code {
            "USD" => Ok(iso::USD),
            "EUR" => Ok(iso::EUR),
            "GBP" => Ok(iso::GBP),
            "JPY" => Ok(iso::JPY),
            other => Err(ValueError::UnknownCurrency(other.to_string())),
        }
    }

    /// Returns the amount
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the currency
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Whether the amount is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Add two amounts of the same currency.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::CurrencyMismatch`] if the currencies differ.
    pub fn add(&self, other: &Money) -> Result<Money, ValueError> {
        self.ensure_same_currency(other)?;

        Ok(Money {
            amount: self.amount + other.amount,
            currency: self.currency,
        })
    }

    /// Subtract `other`, flooring the result at zero.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::CurrencyMismatch`] if the currencies differ.
    pub fn subtract(&self, other: &Money) -> Result<Money, ValueError> {
        self.ensure_same_currency(other)?;

        Ok(Money {
            amount: (self.amount - other.amount).max(Decimal::ZERO),
            currency: self.currency,
        })
    }

    /// Scale the amount by a non-negative multiplier.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::NegativeAmount`] if the multiplier is negative.
    pub fn multiply(&self, multiplier: Decimal) -> Result<Money, ValueError> {
        Money::new(self.amount * multiplier, self.currency)
    }

    /// View as a [`rusty_money::Money`] for formatting.
    pub fn as_rusty(&self) -> rusty_money::Money<'static, Currency> {
        rusty_money::Money::from_decimal(self.amount, self.currency)
    }

    fn ensure_same_currency(&self, other: &Money) -> Result<(), ValueError> {
        if self.currency == other.currency {
            Ok(())
        } else {
            Err(ValueError::CurrencyMismatch {
                expected: self.currency.iso_alpha_code,
                actual: other.currency.iso_alpha_code,
            })
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_rusty())
    }
}
