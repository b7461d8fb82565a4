//! Rebate
//!
//! Rebate is a discount evaluation engine for shopping carts. Discounts pair a calculator (a
//! fixed amount or a percentage of the cart total) with conditions over the cart and the
//! shopper, and a strategy decides how the applicable discounts combine.

pub mod calculators;
pub mod cart;
pub mod catalog;
pub mod conditions;
pub mod discounts;
pub mod factory;
pub mod prelude;
pub mod products;
pub mod service;
pub mod strategies;
pub mod summary;
pub mod utils;
pub mod values;
