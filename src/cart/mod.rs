//! Cart
//!
//! The capabilities the discount engine reads from: a cart of line items and an optional user.

use std::fmt;

use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use rusty_money::iso::Currency;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::products::Product;

pub mod basket;
pub mod user;

pub use basket::Basket;
pub use user::{Shopper, User};

/// Product identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Product category identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub u64);

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors raised while mutating a cart.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// A product's currency differs from the cart currency (product, product currency, cart currency).
    #[error("Product {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(ProductId, &'static str, &'static str),
}

/// A single line in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    /// Product identifier
    pub product_id: ProductId,

    /// Product name
    pub name: String,

    /// Unit price
    pub price: Decimal,

    /// Number of units
    pub quantity: u32,

    /// Product category, if any
    pub category_id: Option<CategoryId>,
}

impl LineItem {
    /// Price of all units on this line, saturating at [`Decimal::MAX`].
    pub fn line_total(&self) -> Decimal {
        self.price
            .checked_mul(Decimal::from(self.quantity))
            .unwrap_or(Decimal::MAX)
    }
}

/// Cart capability.
///
/// Discounts only ever read through this trait; the mutators exist for the code that fills the
/// cart.
pub trait Cart {
    /// Sum of price times quantity over every line.
    fn total(&self) -> Decimal;

    /// Units of `product` in the cart, zero when absent.
    fn product_quantity(&self, product: ProductId) -> u32;

    /// Distinct categories of the products in the cart.
    fn category_ids(&self) -> FxHashSet<CategoryId>;

    /// Lines in insertion order.
    fn items(&self) -> &[LineItem];

    /// Currency every line is priced in.
    fn currency(&self) -> &'static Currency;

    /// Add one unit of `product`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::CurrencyMismatch`] if the product is priced in another currency.
    fn add_item(&mut self, product: &Product) -> Result<(), CartError>;

    /// Remove one unit of `product`, if present.
    fn remove_item(&mut self, product: ProductId);

    /// Remove every line.
    fn clear(&mut self);
}
