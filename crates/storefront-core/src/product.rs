//! # Products
//!
//! A single `Product` type covers both catalog variants:
//!
//! ```text
//! ┌──────────────────────────┬──────────────────────────────────────────────┐
//! │ ProductKind::Physical    │ finite stock, "{name} - ${price} - Stock: N" │
//! │ ProductKind::Digital     │ UNLIMITED_STOCK, "(Digital) ... Unlimited"   │
//! └──────────────────────────┴──────────────────────────────────────────────┘
//! ```
//!
//! Both kinds share the same stock rules: `validate_stock` is a pure query and
//! `deduct_stock` subtracts without a guard, firing the out-of-stock listeners
//! when the counter lands on exactly zero.
//!
//! Stock lives in a `Cell`, so orders can hold plain `&Product` references
//! and still deduct. This makes `Product` `!Sync`; the validate-then-deduct
//! sequence is not atomic and would need a lock under concurrent callers.

use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;
use tracing::{debug, info};
use uuid::Uuid;

use crate::events::{OutOfStockEvent, OutOfStockListeners};
use crate::money::Money;
use crate::UNLIMITED_STOCK;

/// The catalog variant of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    /// Shipped goods with a finite stock count.
    #[default]
    Physical,
    /// Downloadable goods; stock is effectively unlimited.
    Digital,
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductKind::Physical => write!(f, "physical"),
            ProductKind::Digital => write!(f, "digital"),
        }
    }
}

/// A product available for sale.
#[derive(Debug)]
pub struct Product {
    id: String,
    name: String,
    price: Money,
    kind: ProductKind,
    stock: Cell<i64>,
    listeners: OutOfStockListeners,
}

impl Product {
    /// Creates a physical product with a finite starting stock.
    pub fn physical(name: impl Into<String>, price: Money, stock: i64) -> Self {
        Self::with_kind(ProductKind::Physical, name.into(), price, stock)
    }

    /// Creates a digital product; its stock starts at [`UNLIMITED_STOCK`].
    pub fn digital(name: impl Into<String>, price: Money) -> Self {
        Self::with_kind(ProductKind::Digital, name.into(), price, UNLIMITED_STOCK)
    }

    fn with_kind(kind: ProductKind, name: String, price: Money, stock: i64) -> Self {
        Product {
            id: Uuid::new_v4().to_string(),
            name,
            price,
            kind,
            stock: Cell::new(stock),
            listeners: OutOfStockListeners::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn price(&self) -> Money {
        self.price
    }

    #[inline]
    pub fn kind(&self) -> ProductKind {
        self.kind
    }

    #[inline]
    pub fn stock(&self) -> i64 {
        self.stock.get()
    }

    /// Registers a callback fired when a deduction empties the stock.
    pub fn on_out_of_stock<F>(&mut self, listener: F)
    where
        F: Fn(&OutOfStockEvent) + 'static,
    {
        self.listeners.subscribe(listener);
    }

    /// Returns true iff `quantity` units are available.
    ///
    /// Non-positive quantities are not rejected here; callers validate them
    /// (see [`crate::validation::validate_quantity`]).
    pub fn validate_stock(&self, quantity: i64) -> bool {
        let available = self.stock.get();
        debug!(product = %self.name, available, quantity, "Validating stock");
        available >= quantity
    }

    /// Removes `quantity` units from stock.
    ///
    /// No guard: calling this without a prior [`validate_stock`](Self::validate_stock)
    /// can drive the counter negative. The subtraction saturates at the `i64`
    /// bounds, so a digital product stays at [`UNLIMITED_STOCK`] even for a
    /// negative quantity. Listeners fire only when this call leaves the stock
    /// at exactly zero.
    pub fn deduct_stock(&self, quantity: i64) {
        let remaining = self.stock.get().saturating_sub(quantity);
        self.stock.set(remaining);
        debug!(product = %self.name, quantity, remaining, "Stock deducted");

        if remaining == 0 {
            info!(product = %self.name, "Product is out of stock");
            if !self.listeners.is_empty() {
                self.listeners
                    .notify(&OutOfStockEvent::new(&self.id, &self.name));
            }
        }
    }

    /// Human-readable catalog line for this product.
    pub fn display_details(&self) -> String {
        match self.kind {
            ProductKind::Physical => {
                format!("{} - {} - Stock: {}", self.name, self.price, self.stock.get())
            }
            ProductKind::Digital => {
                format!("{} (Digital) - {} - Unlimited Stock", self.name, self.price)
            }
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_details())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn laptop() -> Product {
        Product::physical("Laptop", Money::from_major_minor(1000, 0), 5)
    }

    fn recording(product: &mut Product) -> Rc<RefCell<Vec<String>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        product.on_out_of_stock(move |event| sink.borrow_mut().push(event.message.clone()));
        seen
    }

    #[test]
    fn test_validate_stock() {
        let product = laptop();
        assert!(product.validate_stock(5));
        assert!(product.validate_stock(1));
        assert!(!product.validate_stock(6));
        assert_eq!(product.stock(), 5);
    }

    #[test]
    fn test_deduct_stock_partial_does_not_notify() {
        let mut product = laptop();
        let seen = recording(&mut product);

        product.deduct_stock(3);

        assert_eq!(product.stock(), 2);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_deduct_stock_to_zero_notifies_once() {
        let mut product = Product::physical("Smartphone", Money::from_major_minor(700, 0), 2);
        let seen = recording(&mut product);

        product.deduct_stock(2);

        assert_eq!(product.stock(), 0);
        assert_eq!(*seen.borrow(), vec!["Smartphone is now out of stock!"]);
    }

    #[test]
    fn test_deduct_below_zero_is_unguarded_and_silent() {
        let mut product = laptop();
        let seen = recording(&mut product);

        product.deduct_stock(7);

        assert_eq!(product.stock(), -2);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_deduct_saturates_at_stock_bounds() {
        let ebook = Product::digital("E-Book", Money::from_cents(1999));
        ebook.deduct_stock(-1);
        assert_eq!(ebook.stock(), UNLIMITED_STOCK);

        let product = Product::physical("Cable", Money::from_cents(500), i64::MIN + 1);
        product.deduct_stock(5);
        assert_eq!(product.stock(), i64::MIN);
    }

    #[test]
    fn test_all_listeners_fire_in_order() {
        let mut product = Product::physical("Mouse", Money::from_cents(2500), 1);
        let seen = Rc::new(RefCell::new(Vec::new()));
        for tag in 1..=3 {
            let sink = Rc::clone(&seen);
            product.on_out_of_stock(move |_| sink.borrow_mut().push(tag));
        }

        product.deduct_stock(1);

        assert_eq!(*seen.borrow(), vec![1, 2, 3]);
    }

    #[test]
    fn test_display_details_physical() {
        let product = laptop();
        assert_eq!(product.display_details(), "Laptop - $1000.00 - Stock: 5");
        product.deduct_stock(3);
        assert_eq!(product.to_string(), "Laptop - $1000.00 - Stock: 2");
    }

    #[test]
    fn test_display_details_digital() {
        let ebook = Product::digital("E-Book", Money::from_cents(1999));
        assert_eq!(ebook.kind(), ProductKind::Digital);
        assert_eq!(ebook.stock(), UNLIMITED_STOCK);
        ebook.deduct_stock(10);
        assert_eq!(ebook.display_details(), "E-Book (Digital) - $19.99 - Unlimited Stock");
    }

    #[test]
    fn test_products_get_distinct_ids() {
        assert_ne!(laptop().id(), laptop().id());
    }

    proptest! {
        #[test]
        fn prop_validate_stock_matches_comparison(stock in 0i64..10_000, quantity in -100i64..10_100) {
            let product = Product::physical("Widget", Money::from_cents(100), stock);
            prop_assert_eq!(product.validate_stock(quantity), stock >= quantity);
            prop_assert_eq!(product.stock(), stock);
        }

        #[test]
        fn prop_deduct_subtracts_and_notifies_only_at_zero(stock in 1i64..10_000, pick in 0.0f64..=1.0) {
            let quantity = ((stock as f64 * pick) as i64).clamp(1, stock);
            let mut product = Product::physical("Widget", Money::from_cents(100), stock);
            let fired = Rc::new(Cell::new(0u32));
            let counter = Rc::clone(&fired);
            product.on_out_of_stock(move |_| counter.set(counter.get() + 1));

            product.deduct_stock(quantity);

            prop_assert_eq!(product.stock(), stock - quantity);
            prop_assert_eq!(fired.get(), u32::from(stock == quantity));
        }
    }
}
