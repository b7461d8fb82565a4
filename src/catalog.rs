//! Discount Catalog
//!
//! Discount definitions loaded from YAML and built through the [`DiscountFactory`].

use std::{fs, path::Path};

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::{
    conditions::{ConditionError, ConditionResolver, DateRangeCondition},
    discounts::{CompositeDiscount, DEFAULT_PRIORITY, DiscountError},
    factory::{DiscountFactory, DiscountOptions},
    service::DiscountService,
    strategies::StrategyKind,
    values::{Money, ValueError},
};

/// Catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading the catalog file
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A condition or validity window in an entry was invalid
    #[error("Invalid conditions for discount {code}: {source}")]
    Condition {
        /// Discount code
        code: String,

        /// Underlying error
        source: ConditionError,
    },

    /// An entry could not be built into a discount
    #[error("Invalid discount {code}: {source}")]
    Discount {
        /// Discount code
        code: String,

        /// Underlying error
        source: DiscountError,
    },

    /// An amount or currency was invalid
    #[error("Invalid amount for discount {code}: {source}")]
    Value {
        /// Discount code
        code: String,

        /// Underlying error
        source: ValueError,
    },
}

/// How a catalog entry calculates its amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    /// Fixed amount in major currency units
    Fixed,

    /// Percentage of the cart total
    Percentage,
}

/// One discount definition
#[derive(Debug, Clone, Deserialize)]
pub struct DiscountEntry {
    /// Discount code, also required from the shopper
    pub code: String,

    /// Calculation kind
    #[serde(rename = "type")]
    pub kind: DiscountKind,

    /// Fixed amount or percentage
    pub amount: Decimal,

    /// Currency of a fixed amount
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Condition descriptors
    #[serde(default)]
    pub conditions: Vec<Value>,

    /// Whether the discount may be summed with others
    #[serde(default = "default_combinable")]
    pub combinable: bool,

    /// Evaluation order, lower first
    #[serde(default = "default_priority")]
    pub priority: i32,

    /// Upper bound on the discount amount
    #[serde(default)]
    pub max_discount: Option<Decimal>,

    /// Start of the validity window
    #[serde(default)]
    pub valid_from: Option<String>,

    /// End of the validity window
    #[serde(default)]
    pub valid_to: Option<String>,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_combinable() -> bool {
    true
}

fn default_priority() -> i32 {
    DEFAULT_PRIORITY
}

impl DiscountEntry {
    /// Build this entry through `factory`.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] naming the entry's code if any field is invalid.
    pub fn build(
        &self,
        factory: &DiscountFactory,
        provided_code: Option<&str>,
    ) -> Result<CompositeDiscount, CatalogError> {
        let conditions =
            ConditionResolver::resolve_all(&self.conditions).map_err(|source| self.condition(source))?;

        let window = DateRangeCondition::parse(self.valid_from.as_deref(), self.valid_to.as_deref())
            .map_err(|source| self.condition(source))?;

        let mut options = DiscountOptions::default()
            .with_conditions(conditions)
            .combinable(self.combinable)
            .with_priority(self.priority)
            .valid_between(window.valid_from(), window.valid_to());

        if let Some(cap) = self.max_discount {
            options = options.with_max_amount(cap);
        }

        if let Some(code) = provided_code {
            options = options.with_provided_code(code);
        }

        let built = match self.kind {
            DiscountKind::Fixed => {
                let currency = Money::parse_currency(&self.currency).map_err(|source| self.value(source))?;
                let amount = Money::new(self.amount, currency).map_err(|source| self.value(source))?;

                factory.create_fixed_discount(&self.code, amount, options)
            }
            DiscountKind::Percentage => {
                factory.create_percentage_discount(&self.code, self.amount, options)
            }
        };

        built.map_err(|source| CatalogError::Discount {
            code: self.code.clone(),
            source,
        })
    }

    fn condition(&self, source: ConditionError) -> CatalogError {
        CatalogError::Condition {
            code: self.code.clone(),
            source,
        }
    }

    fn value(&self, source: ValueError) -> CatalogError {
        CatalogError::Value {
            code: self.code.clone(),
            source,
        }
    }
}

/// A strategy and the discounts it evaluates
#[derive(Debug, Clone, Deserialize)]
pub struct DiscountCatalog {
    /// Strategy the service should use
    #[serde(default)]
    pub strategy: StrategyKind,

    /// Discount definitions in document order
    #[serde(default)]
    pub discounts: Vec<DiscountEntry>,
}

impl DiscountCatalog {
    /// Parse a catalog from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Yaml`] if the document is malformed.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        Ok(serde_norway::from_str(yaml)?)
    }

    /// Read and parse a catalog file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let catalog = Self::from_yaml_str(&contents)?;

        debug!(
            path = %path.display(),
            discounts = catalog.discounts.len(),
            strategy = ?catalog.strategy,
            "loaded discount catalog"
        );

        Ok(catalog)
    }

    /// Build every discount in document order, matching codes against `provided_code`.
    ///
    /// # Errors
    ///
    /// Returns the first entry's [`CatalogError`].
    pub fn build_discounts(
        &self,
        provided_code: Option<&str>,
    ) -> Result<Vec<CompositeDiscount>, CatalogError> {
        let factory = DiscountFactory;

        self.discounts
            .iter()
            .map(|entry| entry.build(&factory, provided_code))
            .collect()
    }

    /// Build a service using the catalog's strategy with every discount registered.
    ///
    /// # Errors
    ///
    /// Returns the first entry's [`CatalogError`].
    pub fn into_service(self, provided_code: Option<&str>) -> Result<DiscountService, CatalogError> {
        let discounts = self.build_discounts(provided_code)?;
        let service = DiscountService::from_kind(self.strategy);

        service.register_discounts(discounts);

        Ok(service)
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use crate::{
        cart::{Basket, Shopper},
        discounts::Discount,
        products::Product,
    };

    use super::*;

    const STOREFRONT: &str = include_str!("../fixtures/discounts/storefront.yml");

    #[test]
    fn storefront_catalog_parses_in_document_order() -> TestResult {
        let catalog = DiscountCatalog::from_yaml_str(STOREFRONT)?;

        assert_eq!(catalog.strategy, StrategyKind::Ordered);
        assert_eq!(
            catalog
                .discounts
                .iter()
                .map(|entry| entry.code.as_str())
                .collect::<Vec<_>>(),
            ["quantity_discount", "price_discount", "auth_discount"]
        );

        let price = catalog.discounts.get(1).ok_or("missing price_discount")?;

        assert_eq!(price.kind, DiscountKind::Fixed);
        assert_eq!(price.amount, Decimal::new(200, 2));
        assert_eq!(price.priority, 110);
        assert!(price.combinable);

        Ok(())
    }

    #[test]
    fn entries_take_the_codes_they_declare() -> TestResult {
        let discounts = DiscountCatalog::from_yaml_str(STOREFRONT)?.build_discounts(None)?;

        assert_eq!(
            discounts.iter().map(Discount::code).collect::<Vec<_>>(),
            ["quantity_discount", "price_discount", "auth_discount"]
        );

        Ok(())
    }

    #[test]
    fn discounts_need_their_code_to_apply() -> TestResult {
        let catalog = DiscountCatalog::from_yaml_str(STOREFRONT)?;
        let gadget = Product::new(4, "Gadget", Money::usd(Decimal::from(50))?);
        let basket = Basket::with_products([(&gadget, 1)], USD)?;
        let shopper = Shopper::authenticated(1);

        let without_code = catalog.clone().into_service(None)?;
        let with_code = catalog.into_service(Some("auth_discount"))?;

        assert_eq!(
            without_code.calculate_discount(&basket, Some(&shopper)),
            Decimal::ZERO
        );
        assert_eq!(
            with_code.calculate_discount(&basket, Some(&shopper)),
            Decimal::from(10)
        );
        assert_eq!(
            with_code.calculate_discount(&basket, None),
            Decimal::ZERO
        );

        Ok(())
    }

    #[test]
    fn defaults_fill_missing_fields() -> TestResult {
        let catalog = DiscountCatalog::from_yaml_str(
            "discounts:\n  - code: plain\n    type: fixed\n    amount: 5\n",
        )?;
        let entry = catalog.discounts.first().ok_or("missing entry")?;

        assert_eq!(catalog.strategy, StrategyKind::Ordered);
        assert_eq!(entry.currency, "USD");
        assert_eq!(entry.priority, DEFAULT_PRIORITY);
        assert!(entry.combinable);
        assert!(entry.conditions.is_empty());
        assert!(entry.max_discount.is_none());

        Ok(())
    }

    #[test]
    fn unknown_condition_names_the_entry() -> TestResult {
        let catalog = DiscountCatalog::from_yaml_str(
            "discounts:\n  - code: odd\n    type: percentage\n    amount: 5\n    conditions:\n      - type: lunar_phase\n",
        )?;

        let error = catalog.build_discounts(None).err().ok_or("expected an error")?;

        assert!(matches!(
            error,
            CatalogError::Condition {
                ref code,
                source: ConditionError::UnknownConditionType(ref kind),
            } if code == "odd" && kind == "lunar_phase"
        ));

        Ok(())
    }

    #[test]
    fn inverted_window_is_rejected() -> TestResult {
        let catalog = DiscountCatalog::from_yaml_str(
            "discounts:\n  - code: late\n    type: fixed\n    amount: 5\n    valid_from: 2025-06-01\n    valid_to: 2025-01-01\n",
        )?;

        let error = catalog.build_discounts(None).err().ok_or("expected an error")?;

        assert!(matches!(
            error,
            CatalogError::Condition {
                source: ConditionError::InvertedDateRange { .. },
                ..
            }
        ));

        Ok(())
    }

    #[test]
    fn out_of_range_percentage_is_a_discount_error() -> TestResult {
        let catalog = DiscountCatalog::from_yaml_str(
            "discounts:\n  - code: greedy\n    type: percentage\n    amount: 150\n",
        )?;

        let error = catalog.build_discounts(None).err().ok_or("expected an error")?;

        assert!(matches!(
            error,
            CatalogError::Discount {
                source: DiscountError::Value(ValueError::PercentOutOfRange(_)),
                ..
            }
        ));

        Ok(())
    }

    #[test]
    fn unknown_currency_is_a_value_error() -> TestResult {
        let catalog = DiscountCatalog::from_yaml_str(
            "discounts:\n  - code: coins\n    type: fixed\n    amount: 5\n    currency: XYZ\n",
        )?;

        let error = catalog.build_discounts(None).err().ok_or("expected an error")?;

        assert!(matches!(
            error,
            CatalogError::Value {
                source: ValueError::UnknownCurrency(_),
                ..
            }
        ));

        Ok(())
    }
}
