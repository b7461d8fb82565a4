//! Product category condition

use smallvec::SmallVec;

use crate::{
    cart::{Cart, CategoryId},
    conditions::ConditionError,
};

/// The cart holds products from any (or, with `require_all`, every) listed category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCategoryCondition {
    category_ids: SmallVec<[CategoryId; 4]>,
    require_all: bool,
}

impl ProductCategoryCondition {
    /// Create a category condition. Duplicate categories are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ConditionError::EmptyCategories`] if no categories are given.
    pub fn new(
        category_ids: impl IntoIterator<Item = CategoryId>,
        require_all: bool,
    ) -> Result<Self, ConditionError> {
        let mut unique: SmallVec<[CategoryId; 4]> = SmallVec::new();

        for category in category_ids {
            if !unique.contains(&category) {
                unique.push(category);
            }
        }

        if unique.is_empty() {
            return Err(ConditionError::EmptyCategories);
        }

        Ok(Self {
            category_ids: unique,
            require_all,
        })
    }

    /// Returns the categories
    pub fn category_ids(&self) -> &[CategoryId] {
        &self.category_ids
    }

    /// Whether every category must be present
    pub fn requires_all(&self) -> bool {
        self.require_all
    }

    pub(crate) fn is_satisfied(&self, cart: &dyn Cart) -> bool {
        let present = cart.category_ids();
        let mut categories = self.category_ids.iter();

        if self.require_all {
            categories.all(|category| present.contains(category))
        } else {
            categories.any(|category| present.contains(category))
        }
    }
}
