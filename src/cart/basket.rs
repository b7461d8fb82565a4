//! Basket

use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use rusty_money::iso::Currency;

use crate::{
    cart::{Cart, CartError, CategoryId, LineItem, ProductId},
    products::Product,
};

/// In-memory cart
#[derive(Debug, Clone)]
pub struct Basket {
    items: Vec<LineItem>,
    currency: &'static Currency,
}

impl Basket {
    /// Create an empty basket in the given currency.
    pub fn new(currency: &'static Currency) -> Self {
        Basket {
            items: Vec::new(),
            currency,
        }
    }

    /// Create a basket holding `quantity` units of each product.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if any product is priced in another currency.
    pub fn with_products<'p>(
        products: impl IntoIterator<Item = (&'p Product, u32)>,
        currency: &'static Currency,
    ) -> Result<Self, CartError> {
        let mut basket = Basket::new(currency);

        for (product, quantity) in products {
            basket.add_units(product, quantity)?;
        }

        Ok(basket)
    }

    /// Get the number of lines in the basket.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the basket is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn add_units(&mut self, product: &Product, quantity: u32) -> Result<(), CartError> {
        let product_currency = product.price.currency();

        if product_currency != self.currency {
            return Err(CartError::CurrencyMismatch(
                product.id,
                product_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        if quantity == 0 {
            return Ok(());
        }

        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.product_id == product.id)
        {
            item.quantity = item.quantity.saturating_add(quantity);
        } else {
            self.items.push(LineItem {
                product_id: product.id,
                name: product.name.clone(),
                price: product.price.amount(),
                quantity,
                category_id: product.category_id,
            });
        }

        Ok(())
    }

    fn position(&self, product: ProductId) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.product_id == product)
    }
}

impl Cart for Basket {
    fn total(&self) -> Decimal {
        self.items
            .iter()
            .map(LineItem::line_total)
            .try_fold(Decimal::ZERO, Decimal::checked_add)
            .unwrap_or(Decimal::MAX)
    }

    fn product_quantity(&self, product: ProductId) -> u32 {
        self.items
            .iter()
            .find(|item| item.product_id == product)
            .map_or(0, |item| item.quantity)
    }

    fn category_ids(&self) -> FxHashSet<CategoryId> {
        self.items
            .iter()
            .filter_map(|item| item.category_id)
            .collect()
    }

    fn items(&self) -> &[LineItem] {
        &self.items
    }

    fn currency(&self) -> &'static Currency {
        self.currency
    }

    fn add_item(&mut self, product: &Product) -> Result<(), CartError> {
        self.add_units(product, 1)
    }

    fn remove_item(&mut self, product: ProductId) {
        let Some(idx) = self.position(product) else {
            return;
        };

        let Some(item) = self.items.get_mut(idx) else {
            return;
        };

        if item.quantity > 1 {
            item.quantity -= 1;
        } else {
            self.items.remove(idx);
        }
    }

    fn clear(&mut self) {
        self.items.clear();
    }
}
