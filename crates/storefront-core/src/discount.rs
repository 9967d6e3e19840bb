//! # Discounts
//!
//! A discount turns a gross price into a final price. Results are never
//! clamped: a fixed discount larger than the gross price yields a negative
//! final price, and that is what gets reported.

use std::fmt;

use crate::money::Money;

/// Pricing capability attached to an order.
pub trait Discount: fmt::Debug {
    /// Computes the final price from the gross price. Pure.
    fn apply_discount(&self, gross: Money) -> Money;

    /// Short label for receipts and logs, e.g. `"10% off"`.
    fn describe(&self) -> String;
}

/// Takes `percent`% off the gross price.
///
/// The percentage is expected in `0..=100` but not enforced here;
/// scenario input is checked with [`crate::validation::validate_percentage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PercentageDiscount {
    percent: u32,
}

impl PercentageDiscount {
    pub const fn new(percent: u32) -> Self {
        PercentageDiscount { percent }
    }

    pub const fn percent(&self) -> u32 {
        self.percent
    }
}

impl Discount for PercentageDiscount {
    fn apply_discount(&self, gross: Money) -> Money {
        gross.apply_percentage_discount(self.percent)
    }

    fn describe(&self) -> String {
        format!("{}% off", self.percent)
    }
}

/// Subtracts a fixed amount from the gross price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDiscount {
    amount: Money,
}

impl FixedDiscount {
    pub const fn new(amount: Money) -> Self {
        FixedDiscount { amount }
    }

    pub const fn amount(&self) -> Money {
        self.amount
    }
}

impl Discount for FixedDiscount {
    fn apply_discount(&self, gross: Money) -> Money {
        gross - self.amount
    }

    fn describe(&self) -> String {
        format!("{} off", self.amount)
    }
}
