//! Checkout Summary

use std::io;

use rusty_money::iso::Currency;
use serde::Serialize;
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{
    cart::Cart,
    strategies::{AppliedDiscount, StrategyOutcome},
    values::{Money, ValueError},
};

/// Errors that can occur when building or printing a summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// An amount could not be represented as money.
    #[error(transparent)]
    Value(#[from] ValueError),

    /// IO error
    #[error("IO error")]
    IO,
}

/// Subtotal, discount and total for one cart.
///
/// Serializes to `{cart_id, subtotal, discount, total, applied}` with amounts as decimal strings.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutSummary {
    cart_id: String,
    #[serde(serialize_with = "serialize_amount")]
    subtotal: Money,
    #[serde(serialize_with = "serialize_amount")]
    discount: Money,
    #[serde(serialize_with = "serialize_amount")]
    total: Money,
    applied: SmallVec<[AppliedDiscount; 4]>,
}

fn serialize_amount<S: serde::Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
    Serialize::serialize(&money.amount(), serializer)
}

impl CheckoutSummary {
    /// Summarise `cart` after `outcome`. The total never drops below zero.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::Value`] if the cart total or discount is negative.
    pub fn new(
        cart_id: impl Into<String>,
        cart: &dyn Cart,
        outcome: StrategyOutcome,
    ) -> Result<Self, SummaryError> {
        let currency = cart.currency();
        let subtotal = Money::new(cart.total(), currency)?;
        let discount = Money::new(outcome.total, currency)?;
        let total = subtotal.subtract(&discount)?;

        Ok(Self {
            cart_id: cart_id.into(),
            subtotal,
            discount,
            total,
            applied: outcome.applied,
        })
    }

    /// Cart identifier
    pub fn cart_id(&self) -> &str {
        &self.cart_id
    }

    /// Cart total before discounts
    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    /// Discount taken off
    pub fn discount(&self) -> Money {
        self.discount
    }

    /// Amount payable
    pub fn total(&self) -> Money {
        self.total
    }

    /// Discounts that fired, in the order they were applied
    pub fn applied(&self) -> &[AppliedDiscount] {
        &self.applied
    }

    /// Currency of every amount
    pub fn currency(&self) -> &'static Currency {
        self.subtotal.currency()
    }

    /// Print the applied discounts and totals.
    ///
    /// # Errors
    ///
    /// Returns an error if an amount cannot be formatted or the output cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), SummaryError> {
        let mut builder = Builder::default();

        builder.push_record(["Discount", "Combinable", "Amount"]);

        for applied in &self.applied {
            let amount = Money::new(applied.amount, self.currency())?;

            builder.push_record([
                applied.code.clone(),
                if applied.combinable { "yes" } else { "no" }.to_string(),
                amount.to_string(),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Columns::new(2..3), Alignment::right());

        writeln!(out, "\nCart {}\n{table}", self.cart_id).map_err(|_err| SummaryError::IO)?;

        for (label, value) in [
            ("Subtotal:", self.subtotal),
            ("Discount:", self.discount),
            ("Total:", self.total),
        ] {
            writeln!(out, " {label:<10}{:>12}", value.to_string()).map_err(|_err| SummaryError::IO)?;
        }

        writeln!(out).map_err(|_err| SummaryError::IO)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::iso::USD;
    use smallvec::smallvec;
    use testresult::TestResult;

    use crate::{cart::Basket, products::Product};

    use super::*;

    fn basket() -> TestResult<Basket> {
        let widget = Product::new(1, "Widget", Money::usd(Decimal::from(20))?);

        Ok(Basket::with_products([(&widget, 2)], USD)?)
    }

    fn outcome(total: i64) -> StrategyOutcome {
        StrategyOutcome {
            total: Decimal::from(total),
            applied: smallvec![AppliedDiscount {
                code: "SPRING".to_string(),
                amount: Decimal::from(total),
                combinable: false,
            }],
        }
    }

    #[test]
    fn total_is_subtotal_less_discount() -> TestResult {
        let summary = CheckoutSummary::new("cart-1", &basket()?, outcome(15))?;

        assert_eq!(summary.cart_id(), "cart-1");
        assert_eq!(summary.subtotal().amount(), Decimal::from(40));
        assert_eq!(summary.discount().amount(), Decimal::from(15));
        assert_eq!(summary.total().amount(), Decimal::from(25));
        assert_eq!(summary.applied().len(), 1);

        Ok(())
    }

    #[test]
    fn total_is_floored_at_zero() -> TestResult {
        let summary = CheckoutSummary::new("cart-2", &basket()?, outcome(55))?;

        assert_eq!(summary.total().amount(), Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn serializes_amounts_and_trace() -> TestResult {
        let summary = CheckoutSummary::new("cart-3", &basket()?, outcome(15))?;

        let json = serde_json::to_value(&summary)?;

        assert_eq!(
            json,
            serde_json::json!({
                "cart_id": "cart-3",
                "subtotal": "40",
                "discount": "15",
                "total": "25",
                "applied": [{"code": "SPRING", "amount": "15", "combinable": false}],
            })
        );

        Ok(())
    }

    #[test]
    fn write_to_renders_applied_discounts_and_totals() -> TestResult {
        let summary = CheckoutSummary::new("cart-4", &basket()?, outcome(15))?;

        let mut out = Vec::new();
        summary.write_to(&mut out)?;

        let output = String::from_utf8(out)?;

        assert!(output.contains("cart-4"));
        assert!(output.contains("SPRING"));
        assert!(output.contains("Subtotal:"));
        assert!(output.contains("Total:"));

        Ok(())
    }
}
