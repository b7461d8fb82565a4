//! Utils

use std::path::PathBuf;

use clap::Parser;

use crate::strategies::StrategyKind;

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Arguments for the checkout demo
#[derive(Debug, Parser)]
pub struct CheckoutArgs {
    /// Discount catalog to load
    #[clap(short, long, default_value = "fixtures/discounts/storefront.yml")]
    pub catalog: PathBuf,

    /// Discount code supplied by the shopper
    #[clap(long)]
    pub code: Option<String>,

    /// Treat the shopper as signed in
    #[clap(short, long)]
    pub authenticated: bool,

    /// Override the catalog's strategy
    #[clap(short, long, value_enum)]
    pub strategy: Option<StrategyKind>,

    /// Print the summary as JSON instead of a table
    #[clap(long)]
    pub json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[clap(short, long, default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[clap(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}
