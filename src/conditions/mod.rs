//! Conditions
//!
//! Predicates over a cart and an optional user that decide whether a discount qualifies.
//! Every condition is pure for a given cart, user and instant; only [`DateRangeCondition`]
//! reads the clock.

use jiff::Timestamp;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::cart::{Cart, ProductId, User};

pub mod cart_total;
pub mod category;
pub mod chain;
pub mod code;
pub mod date_range;
pub mod descriptor;
pub mod products;

pub use cart_total::CartTotalCondition;
pub use category::ProductCategoryCondition;
pub use chain::ConditionChain;
pub use code::DiscountCodeCondition;
pub use date_range::DateRangeCondition;
pub use descriptor::{ConditionDescriptor, ConditionResolver, ProductRequirement};
pub use products::{ByProductIdCondition, MultipleProductsCondition};

/// Errors raised while building or resolving conditions.
#[derive(Debug, Error)]
pub enum ConditionError {
    /// A required quantity was zero.
    #[error("quantity for product {0} must be a positive integer")]
    NonPositiveQuantity(ProductId),

    /// A category condition was given no categories.
    #[error("at least one category ID must be provided")]
    EmptyCategories,

    /// A cart total threshold was below zero.
    #[error("minimum cart total must not be negative, got {0}")]
    NegativeThreshold(Decimal),

    /// A validity window ends before it starts.
    #[error("validity window ends ({to}) before it starts ({from})")]
    InvertedDateRange {
        /// Start of the window
        from: Timestamp,

        /// End of the window
        to: Timestamp,
    },

    /// A validity bound could not be parsed.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// A descriptor carried a type tag that names no condition.
    #[error("unknown condition type: {0}")]
    UnknownConditionType(String),

    /// A value offered as a condition is not shaped like one.
    #[error("not a condition: {0}")]
    NotACondition(String),

    /// A descriptor with a known type had missing or malformed fields.
    #[error("invalid {kind} condition: {source}")]
    InvalidDescriptor {
        /// Condition type tag
        kind: String,

        /// Underlying deserialization error
        source: serde_json::Error,
    },
}

/// A discount condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// A minimum quantity of one product.
    ByProductId(ByProductIdCondition),

    /// A minimum cart total.
    CartTotal(CartTotalCondition),

    /// Minimum quantities of several products, all required.
    MultipleProducts(MultipleProductsCondition),

    /// Any (or all) of a set of categories.
    ProductCategory(ProductCategoryCondition),

    /// A signed-in user.
    AuthenticatedUser,

    /// A matching discount code.
    DiscountCode(DiscountCodeCondition),

    /// The current instant inside a validity window.
    DateRange(DateRangeCondition),

    /// All nested conditions.
    Chain(ConditionChain),
}

impl Condition {
    /// Return whether the condition holds for the cart and user right now.
    pub fn is_satisfied(&self, cart: &dyn Cart, user: Option<&dyn User>) -> bool {
        self.is_satisfied_at(cart, user, Timestamp::now())
    }

    /// Return whether the condition holds for the cart and user at `now`.
    pub fn is_satisfied_at(
        &self,
        cart: &dyn Cart,
        user: Option<&dyn User>,
        now: Timestamp,
    ) -> bool {
        match self {
            Condition::ByProductId(condition) => condition.is_satisfied(cart),
            Condition::CartTotal(condition) => condition.is_satisfied(cart),
            Condition::MultipleProducts(condition) => condition.is_satisfied(cart),
            Condition::ProductCategory(condition) => condition.is_satisfied(cart),
            Condition::AuthenticatedUser => user.is_some_and(User::is_authenticated),
            Condition::DiscountCode(condition) => condition.is_satisfied(),
            Condition::DateRange(condition) => condition.is_satisfied_at(now),
            Condition::Chain(chain) => chain.is_satisfied_at(cart, user, now),
        }
    }

    /// The expected code, if this is a discount code condition.
    pub fn expected_code(&self) -> Option<&str> {
        match self {
            Condition::DiscountCode(condition) => Some(condition.expected_code()),
            _ => None,
        }
    }
}

impl From<ByProductIdCondition> for Condition {
    fn from(condition: ByProductIdCondition) -> Self {
        Condition::ByProductId(condition)
    }
}

impl From<CartTotalCondition> for Condition {
    fn from(condition: CartTotalCondition) -> Self {
        Condition::CartTotal(condition)
    }
}

impl From<MultipleProductsCondition> for Condition {
    fn from(condition: MultipleProductsCondition) -> Self {
        Condition::MultipleProducts(condition)
    }
}

impl From<ProductCategoryCondition> for Condition {
    fn from(condition: ProductCategoryCondition) -> Self {
        Condition::ProductCategory(condition)
    }
}

impl From<DiscountCodeCondition> for Condition {
    fn from(condition: DiscountCodeCondition) -> Self {
        Condition::DiscountCode(condition)
    }
}

impl From<DateRangeCondition> for Condition {
    fn from(condition: DateRangeCondition) -> Self {
        Condition::DateRange(condition)
    }
}

impl From<ConditionChain> for Condition {
    fn from(chain: ConditionChain) -> Self {
        Condition::Chain(chain)
    }
}
