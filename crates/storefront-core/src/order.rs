//! # Orders
//!
//! `Order` coordinates one transaction at a time: it binds a customer, a
//! product and a quantity, optionally carries a discount, and on completion
//! prices the order and deducts stock.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Empty ──create()──► Bound ──apply_discount()──► DiscountAttached      │
//! │                         │                              │                │
//! │                         └────────complete()────────────┴──► Completed   │
//! │                                                                         │
//! │   create() from ANY state rebinds (fresh id, discount cleared).         │
//! │   A failed create() leaves the order exactly as it was.                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Completion Sequence
//! ```text
//! complete_with(report)
//!      │
//!      ├── gross = unit price × quantity
//!      ├── final = discount(gross) or gross
//!      ├── report(&receipt)            ◄── caller renders the summary here
//!      └── product.deduct_stock(qty)   ◄── out-of-stock listeners fire here
//! ```
//! The report always precedes any out-of-stock notification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::customer::Customer;
use crate::discount::Discount;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::product::Product;

// =============================================================================
// Order Status
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Nothing bound yet.
    #[default]
    Empty,
    /// Customer, product and quantity bound; no discount.
    Bound,
    /// Bound with a discount attached.
    DiscountAttached,
    /// Priced, reported and stock deducted. Still reusable via `create`.
    Completed,
}

// =============================================================================
// Order Receipt
// =============================================================================

/// Everything the caller needs to render a completed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub order_id: String,
    pub customer_name: String,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: Money,
    /// Unit price × quantity, before discount.
    pub gross_price: Money,
    /// Price after discount; may be negative with a large fixed discount.
    pub final_price: Money,
    /// Description of the applied discount, if any.
    pub discount: Option<String>,
    pub completed_at: DateTime<Utc>,
}

impl OrderReceipt {
    #[inline]
    pub fn is_discounted(&self) -> bool {
        self.discount.is_some()
    }
}

// =============================================================================
// Order
// =============================================================================

#[derive(Debug, Clone, Copy)]
struct Binding<'a> {
    customer: &'a Customer,
    product: &'a Product,
    quantity: i64,
}

/// A reusable order coordinator.
///
/// Holds references to the customer and product it is bound to; the caller
/// owns the catalog and must keep it alive for as long as the order.
#[derive(Debug)]
pub struct Order<'a> {
    id: String,
    binding: Option<Binding<'a>>,
    discount: Option<Box<dyn Discount>>,
    status: OrderStatus,
}

impl Default for Order<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Order<'a> {
    pub fn new() -> Self {
        Order {
            id: Uuid::new_v4().to_string(),
            binding: None,
            discount: None,
            status: OrderStatus::Empty,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn customer(&self) -> Option<&'a Customer> {
        self.binding.map(|b| b.customer)
    }

    pub fn product(&self) -> Option<&'a Product> {
        self.binding.map(|b| b.product)
    }

    pub fn quantity(&self) -> Option<i64> {
        self.binding.map(|b| b.quantity)
    }

    pub fn discount(&self) -> Option<&dyn Discount> {
        self.discount.as_deref()
    }

    /// Binds a customer, product and quantity if the product has the stock.
    ///
    /// On success the order gets a fresh id and any previously attached
    /// discount is dropped, so every transaction starts undiscounted.
    ///
    /// ## Errors
    /// [`CoreError::InsufficientStock`] when `product.validate_stock(quantity)`
    /// fails; the order is left untouched.
    pub fn create(
        &mut self,
        customer: &'a Customer,
        product: &'a Product,
        quantity: i64,
    ) -> CoreResult<()> {
        if !product.validate_stock(quantity) {
            info!(
                product = %product.name(),
                available = product.stock(),
                requested = quantity,
                "Insufficient stock"
            );
            return Err(CoreError::InsufficientStock {
                product: product.name().to_string(),
                available: product.stock(),
                requested: quantity,
            });
        }

        self.id = Uuid::new_v4().to_string();
        self.binding = Some(Binding {
            customer,
            product,
            quantity,
        });
        self.discount = None;
        self.status = OrderStatus::Bound;

        info!(
            order_id = %self.id,
            customer = %customer,
            product = %product.name(),
            quantity,
            "Order bound"
        );
        Ok(())
    }

    /// Attaches a discount, replacing any existing one.
    ///
    /// Not checked against the binding: a discount on an empty order is kept
    /// until the next successful `create` clears it.
    pub fn apply_discount<D>(&mut self, discount: D)
    where
        D: Discount + 'static,
    {
        self.apply_boxed_discount(Box::new(discount));
    }

    /// Same as [`apply_discount`](Self::apply_discount) for an already boxed discount.
    pub fn apply_boxed_discount(&mut self, discount: Box<dyn Discount>) {
        info!(order_id = %self.id, discount = %discount.describe(), "Discount attached");
        self.discount = Some(discount);
        if self.binding.is_some() {
            self.status = OrderStatus::DiscountAttached;
        }
    }

    /// Completes the order without a report callback.
    pub fn complete(&mut self) -> CoreResult<OrderReceipt> {
        self.complete_with(|_| {})
    }

    /// Prices the order, hands the receipt to `report`, then deducts stock.
    ///
    /// ## Errors
    /// - [`CoreError::OrderNotBound`] if no `create` has succeeded yet
    /// - [`CoreError::AmountOverflow`] if unit price × quantity overflows
    pub fn complete_with<F>(&mut self, report: F) -> CoreResult<OrderReceipt>
    where
        F: FnOnce(&OrderReceipt),
    {
        let Binding {
            customer,
            product,
            quantity,
        } = self.binding.ok_or_else(|| CoreError::OrderNotBound {
            order_id: self.id.clone(),
        })?;

        let gross_price = product
            .price()
            .checked_multiply_quantity(quantity)
            .ok_or_else(|| CoreError::AmountOverflow {
                product: product.name().to_string(),
                quantity,
            })?;

        let final_price = match &self.discount {
            Some(discount) => discount.apply_discount(gross_price),
            None => gross_price,
        };

        let receipt = OrderReceipt {
            order_id: self.id.clone(),
            customer_name: customer.full_name(),
            product_name: product.name().to_string(),
            quantity,
            unit_price: product.price(),
            gross_price,
            final_price,
            discount: self.discount.as_ref().map(|d| d.describe()),
            completed_at: Utc::now(),
        };

        report(&receipt);
        product.deduct_stock(quantity);
        self.status = OrderStatus::Completed;

        info!(
            order_id = %receipt.order_id,
            product = %receipt.product_name,
            quantity,
            final_price = %receipt.final_price,
            "Order completed"
        );
        Ok(receipt)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
