//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - Order and stock failures                       │
//! │  └── ValidationError  - Catalog/scenario input failures                │
//! │                                                                         │
//! │  storefront-demo errors (app)                                          │
//! │  └── DemoError        - Config, I/O, wrapped CoreError                 │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DemoError → stderr                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, quantities)
//! 3. Errors are enum variants, never String
//! 4. The core never prints; callers render these messages

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Not enough stock to bind an order.
    ///
    /// ## User Workflow
    /// ```text
    /// order.create(customer, laptop, 3)
    ///      │
    ///      ▼
    /// Check stock: available=2
    ///      │
    ///      ▼
    /// InsufficientStock { product: "Laptop", available: 2, requested: 3 }
    ///      │
    ///      ▼
    /// Transcript: "Insufficient stock for Laptop. Available: 2"
    /// ```
    #[error("Insufficient stock for {product}. Available: {available}")]
    InsufficientStock {
        product: String,
        available: i64,
        requested: i64,
    },

    /// `complete` was called before any successful `create`.
    #[error("Order {order_id} has no customer or product bound")]
    OrderNotBound { order_id: String },

    /// Gross price does not fit in the money representation.
    #[error("Price of {quantity} unit(s) of {product} overflows")]
    AmountOverflow { product: String, quantity: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised while checking catalog and scenario data before any order runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Duplicate value (e.g., two products with the same key).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// A reference to something that was never declared.
    #[error("{field} refers to unknown '{value}'")]
    UnknownReference { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
