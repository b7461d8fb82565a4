//! Checkout Example
//!
//! Loads a discount catalog, fills a basket with the sample storefront products and prints the
//! checkout summary.
//!
//! Use `-c` to load a different catalog
//! Use `--code` to supply a discount code
//! Use `-a` to check out as a signed-in shopper
//! Use `--json` to print the summary as JSON

use std::io;

use anyhow::Result;
use clap::Parser;
use rust_decimal::Decimal;
use rusty_money::iso::USD;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Registry,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use rebate::{
    cart::{Basket, Shopper, User},
    catalog::DiscountCatalog,
    products::Product,
    summary::CheckoutSummary,
    utils::{CheckoutArgs, LogFormat},
    values::Money,
};

const ELECTRONICS: u64 = 1;
const CLOTHING: u64 = 2;
const BOOKS: u64 = 3;

/// Checkout Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let args = CheckoutArgs::parse();

    init_subscriber(&args)?;

    let mut catalog = DiscountCatalog::from_path(&args.catalog)?;

    if let Some(strategy) = args.strategy {
        catalog.strategy = strategy;
    }

    let service = catalog.into_service(args.code.as_deref())?;

    let products = storefront_products()?;
    let basket = Basket::with_products(
        products
            .iter()
            .zip([1_u32, 0, 2, 0, 1])
            .filter(|(_, quantity)| *quantity > 0),
        USD,
    )?;

    let shopper = if args.authenticated {
        Shopper::authenticated(1)
    } else {
        Shopper::guest(1)
    };

    info!(
        discounts = service.len(),
        authenticated = shopper.is_authenticated(),
        "evaluating basket"
    );

    let outcome = service.evaluate(&basket, Some(&shopper));
    let summary = CheckoutSummary::new("1", &basket, outcome)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();

        summary.write_to(&mut handle)?;
    }

    Ok(())
}

fn storefront_products() -> Result<Vec<Product>> {
    Ok(vec![
        Product::new(1, "Premium Smartphone", Money::usd(Decimal::new(89999, 2))?)
            .in_category(ELECTRONICS),
        Product::new(2, "Wireless Headphones", Money::usd(Decimal::new(14999, 2))?)
            .in_category(ELECTRONICS),
        Product::new(3, "Designer Jeans", Money::usd(Decimal::new(7999, 2))?)
            .in_category(CLOTHING),
        Product::new(4, "Winter Jacket", Money::usd(Decimal::new(12999, 2))?)
            .in_category(CLOTHING),
        Product::new(5, "Programming Masterclass", Money::usd(Decimal::new(4999, 2))?)
            .in_category(BOOKS),
    ])
}

fn init_subscriber(args: &CheckoutArgs) -> Result<()> {
    match args.log_format {
        LogFormat::Compact => init_with_layer(
            args,
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(true)
                .with_writer(io::stderr),
        ),
        LogFormat::Json => init_with_layer(
            args,
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_target(true)
                .with_writer(io::stderr),
        ),
    }
}

fn init_with_layer<L>(args: &CheckoutArgs, fmt_layer: L) -> Result<()>
where
    L: Layer<Registry> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))?;

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .try_init()?;

    Ok(())
}
