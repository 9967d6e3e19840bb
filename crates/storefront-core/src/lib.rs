//! # storefront-core: Pure Business Logic for the Storefront
//!
//! This crate models the whole storefront: products, customers, discounts
//! and orders. It never prints; everything observable is handed back to the
//! caller as receipts, events or errors.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Storefront Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 storefront-demo (driver)                        │   │
//! │  │   config ──► scenario runner ──► transcript (stdout)            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ storefront-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐          │   │
//! │  │   │  order   │ │ product  │ │ discount │ │  money   │          │   │
//! │  │   │  Order   │ │ Product  │ │ Discount │ │  Money   │          │   │
//! │  │   │ Receipt  │ │  events  │ │ Pct/Fixed│ │          │          │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘          │   │
//! │  │                                                                 │   │
//! │  │   NO STDOUT • NO FILES • SINGLE-THREADED                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic
//! - [`product`] - Physical and digital products with stock tracking
//! - [`events`] - Out-of-stock notifications
//! - [`discount`] - Percentage and fixed discounts
//! - [`customer`] - Customer identity
//! - [`order`] - Order coordinator and receipts
//! - [`validation`] - Input validation for catalog data
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::{Customer, Money, Order, PercentageDiscount, Product};
//!
//! let customer = Customer::new("John", "Doe");
//! let laptop = Product::physical("Laptop", Money::from_major_minor(1000, 0), 5);
//!
//! let mut order = Order::new();
//! order.create(&customer, &laptop, 3).unwrap();
//! order.apply_discount(PercentageDiscount::new(10));
//!
//! let receipt = order.complete().unwrap();
//! assert_eq!(receipt.final_price.to_string(), "$2700.00");
//! assert_eq!(laptop.stock(), 2);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod customer;
pub mod discount;
pub mod error;
pub mod events;
pub mod money;
pub mod order;
pub mod product;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use customer::Customer;
pub use discount::{Discount, FixedDiscount, PercentageDiscount};
pub use error::{CoreError, CoreResult, ValidationError};
pub use events::OutOfStockEvent;
pub use money::Money;
pub use order::{Order, OrderReceipt, OrderStatus};
pub use product::{Product, ProductKind};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Stock assigned to digital products.
///
/// Digital goods never run out in practice; the counter still exists so
/// both kinds share the same validate/deduct rules.
pub const UNLIMITED_STOCK: i64 = i64::MAX;

/// Maximum quantity accepted for a single scripted order line.
pub const MAX_ORDER_QUANTITY: i64 = 999;
