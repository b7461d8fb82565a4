//! Values
//!
//! Validated monetary amounts and percentages used by calculators and caps.

use thiserror::Error;

pub mod money;
pub mod percent;

pub use money::Money;
pub use percent::Percent;

/// Errors raised while constructing or combining values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValueError {
    /// A monetary amount was below zero.
    #[error("amount must not be negative, got {0}")]
    NegativeAmount(rust_decimal::Decimal),

    /// A monetary amount that must be strictly positive was zero or less.
    #[error("amount must be greater than zero, got {0}")]
    NonPositiveAmount(rust_decimal::Decimal),

    /// A percentage fell outside of `0..=100`.
    #[error("percentage must be between 0 and 100, got {0}")]
    PercentOutOfRange(rust_decimal::Decimal),

    /// Unknown currency code
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Arithmetic between two amounts of different currencies.
    #[error("cannot operate on different currencies: {expected} and {actual}")]
    CurrencyMismatch {
        /// Currency of the left-hand operand
        expected: &'static str,

        /// Currency of the right-hand operand
        actual: &'static str,
    },
}
