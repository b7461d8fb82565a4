//! Products

use crate::{
    cart::{CategoryId, ProductId},
    values::Money,
};

/// Product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Product identifier
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Product price
    pub price: Money,

    /// Product category
    pub category_id: Option<CategoryId>,
}

impl Product {
    /// Create a product without a category.
    pub fn new(id: u64, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: ProductId(id),
            name: name.into(),
            price,
            category_id: None,
        }
    }

    /// Set the product category.
    #[must_use]
    pub fn in_category(mut self, category: u64) -> Self {
        self.category_id = Some(CategoryId(category));
        self
    }
}
