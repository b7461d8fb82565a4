//! Condition descriptors
//!
//! Serializable forms of [`Condition`] tagged by `type`, and a resolver for descriptors that
//! arrive as untyped JSON or YAML values.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    cart::{CategoryId, ProductId},
    conditions::{
        ByProductIdCondition, CartTotalCondition, Condition, ConditionChain, ConditionError,
        DateRangeCondition, DiscountCodeCondition, MultipleProductsCondition,
        ProductCategoryCondition,
    },
};

/// One product requirement of a `multiple_products` descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRequirement {
    /// Product identifier
    pub product_id: ProductId,

    /// Minimum quantity
    pub min_quantity: u32,
}

/// Condition descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConditionDescriptor {
    /// [`ByProductIdCondition`]
    ByProductId {
        /// Product identifier
        product_id: ProductId,

        /// Minimum quantity, one when omitted
        #[serde(default = "one")]
        min_quantity: u32,
    },

    /// [`CartTotalCondition`]
    CartTotal {
        /// Minimum cart total
        min_total: Decimal,
    },

    /// [`MultipleProductsCondition`]
    MultipleProducts {
        /// Required products
        products: Vec<ProductRequirement>,
    },

    /// [`ProductCategoryCondition`]
    ProductCategory {
        /// Categories
        category_ids: Vec<CategoryId>,

        /// Whether every category must be present
        #[serde(default)]
        require_all: bool,
    },

    /// [`Condition::AuthenticatedUser`]
    #[serde(rename = "authenticated")]
    AuthenticatedUser,

    /// [`DiscountCodeCondition`]
    DiscountCode {
        /// Code the discount expects
        expected_code: String,

        /// Code the shopper supplied
        #[serde(default)]
        provided_code: String,
    },

    /// [`DateRangeCondition`]
    DateRange {
        /// Start of the window (RFC 3339 or `YYYY-MM-DD`)
        #[serde(default)]
        valid_from: Option<String>,

        /// End of the window (RFC 3339 or `YYYY-MM-DD`)
        #[serde(default)]
        valid_to: Option<String>,
    },

    /// [`ConditionChain`]
    Chain {
        /// Members
        conditions: Vec<ConditionDescriptor>,
    },
}

fn one() -> u32 {
    1
}

impl Condition {
    /// Describe this condition.
    pub fn to_descriptor(&self) -> ConditionDescriptor {
        match self {
            Condition::ByProductId(condition) => ConditionDescriptor::ByProductId {
                product_id: condition.product_id(),
                min_quantity: condition.min_quantity(),
            },
            Condition::CartTotal(condition) => ConditionDescriptor::CartTotal {
                min_total: condition.min_total(),
            },
            Condition::MultipleProducts(condition) => ConditionDescriptor::MultipleProducts {
                products: condition
                    .required_products()
                    .iter()
                    .map(|(product_id, min_quantity)| ProductRequirement {
                        product_id: *product_id,
                        min_quantity: *min_quantity,
                    })
                    .collect(),
            },
            Condition::ProductCategory(condition) => ConditionDescriptor::ProductCategory {
                category_ids: condition.category_ids().to_vec(),
                require_all: condition.requires_all(),
            },
            Condition::AuthenticatedUser => ConditionDescriptor::AuthenticatedUser,
            Condition::DiscountCode(condition) => ConditionDescriptor::DiscountCode {
                expected_code: condition.expected_code().to_string(),
                provided_code: condition.provided_code().to_string(),
            },
            Condition::DateRange(condition) => ConditionDescriptor::DateRange {
                valid_from: condition.valid_from().map(|from| from.to_string()),
                valid_to: condition.valid_to().map(|to| to.to_string()),
            },
            Condition::Chain(chain) => ConditionDescriptor::Chain {
                conditions: chain
                    .conditions()
                    .iter()
                    .map(Condition::to_descriptor)
                    .collect(),
            },
        }
    }
}

impl TryFrom<ConditionDescriptor> for Condition {
    type Error = ConditionError;

    fn try_from(descriptor: ConditionDescriptor) -> Result<Self, Self::Error> {
        let condition = match descriptor {
            ConditionDescriptor::ByProductId {
                product_id,
                min_quantity,
            } => ByProductIdCondition::new(product_id, min_quantity)?.into(),
            ConditionDescriptor::CartTotal { min_total } => {
                CartTotalCondition::new(min_total)?.into()
            }
            ConditionDescriptor::MultipleProducts { products } => {
                MultipleProductsCondition::new(
                    products
                        .into_iter()
                        .map(|requirement| (requirement.product_id, requirement.min_quantity)),
                )?
                .into()
            }
            ConditionDescriptor::ProductCategory {
                category_ids,
                require_all,
            } => ProductCategoryCondition::new(category_ids, require_all)?.into(),
            ConditionDescriptor::AuthenticatedUser => Condition::AuthenticatedUser,
            ConditionDescriptor::DiscountCode {
                expected_code,
                provided_code,
            } => DiscountCodeCondition::new(expected_code, provided_code).into(),
            ConditionDescriptor::DateRange {
                valid_from,
                valid_to,
            } => DateRangeCondition::parse(valid_from.as_deref(), valid_to.as_deref())?.into(),
            ConditionDescriptor::Chain { conditions } => ConditionChain::new(
                conditions
                    .into_iter()
                    .map(Condition::try_from)
                    .collect::<Result<Vec<_>, _>>()?,
            )
            .into(),
        };

        Ok(condition)
    }
}

/// Resolves untyped condition values into conditions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConditionResolver;

impl ConditionResolver {
    /// Type tags the resolver understands.
    pub const KNOWN_TYPES: [&'static str; 8] = [
        "by_product_id",
        "cart_total",
        "multiple_products",
        "product_category",
        "authenticated",
        "discount_code",
        "date_range",
        "chain",
    ];

    /// Resolve one value into a condition.
    ///
    /// # Errors
    ///
    /// - [`ConditionError::NotACondition`]: the value is not an object with a string `type`.
    /// - [`ConditionError::UnknownConditionType`]: the `type` names no condition.
    /// - [`ConditionError::InvalidDescriptor`]: fields are missing or malformed.
    /// - any construction error of the resolved condition.
    pub fn resolve(value: &Value) -> Result<Condition, ConditionError> {
        let Some(object) = value.as_object() else {
            return Err(ConditionError::NotACondition(value.to_string()));
        };

        let Some(kind) = object.get("type").and_then(Value::as_str) else {
            return Err(ConditionError::NotACondition(value.to_string()));
        };

        if !Self::KNOWN_TYPES.contains(&kind) {
            return Err(ConditionError::UnknownConditionType(kind.to_string()));
        }

        // Members are resolved one by one so a nested unknown tag is reported as such.
        if kind == "chain" {
            let Some(members) = object.get("conditions").and_then(Value::as_array) else {
                return Err(ConditionError::NotACondition(value.to_string()));
            };

            return Ok(ConditionChain::new(Self::resolve_all(members)?).into());
        }

        let descriptor: ConditionDescriptor =
            serde_json::from_value(value.clone()).map_err(|source| {
                ConditionError::InvalidDescriptor {
                    kind: kind.to_string(),
                    source,
                }
            })?;

        Condition::try_from(descriptor)
    }

    /// Resolve a list of values, failing on the first invalid one.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by [`ConditionResolver::resolve`].
    pub fn resolve_all(values: &[Value]) -> Result<Vec<Condition>, ConditionError> {
        values.iter().map(Self::resolve).collect()
    }
}
