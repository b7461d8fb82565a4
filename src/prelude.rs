//! Rebate prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    calculators::{DiscountCalculator, FixedAmountCalculator, PercentageCalculator},
    cart::{Basket, Cart, CartError, CategoryId, LineItem, ProductId, Shopper, User},
    catalog::{CatalogError, DiscountCatalog},
    conditions::{
        ByProductIdCondition, CartTotalCondition, Condition, ConditionChain, ConditionDescriptor,
        ConditionError, ConditionResolver, DateRangeCondition, DiscountCodeCondition,
        MultipleProductsCondition, ProductCategoryCondition,
    },
    discounts::{CompositeDiscount, Discount, DiscountError},
    factory::{DiscountFactory, DiscountOptions},
    products::Product,
    service::DiscountService,
    strategies::{
        AppliedDiscount, BestDiscountStrategy, CombinableDiscountsStrategy, DiscountStrategy,
        OrderedDiscountStrategy, StrategyKind, StrategyOutcome,
    },
    summary::{CheckoutSummary, SummaryError},
    values::{Money, Percent, ValueError},
};
