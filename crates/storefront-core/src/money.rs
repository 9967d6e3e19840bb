//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    $1000.00 × 3 = 300000 cents, 10% off = 270000 cents                 │
//! │    Sub-cent discount results are rounded half-to-even, explicitly      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::Money;
//!
//! let price = Money::from_cents(1099); // $10.99
//! let doubled = price.checked_multiply_quantity(2).unwrap(); // $21.98
//! let total = price + Money::from_cents(500); // $15.99
//! assert_eq!(doubled.to_string(), "$21.98");
//! assert_eq!(total.to_string(), "$15.99");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Fixed discounts larger than the gross price produce
///   negative final prices, and those are reported as-is
/// - **Single field tuple struct**: Zero-cost abstraction over i64
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► × quantity ──► gross price ──► Discount ──► final price
///                                                                   │
///                                         Displayed as "$2700.00" ◄─┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let price = Money::from_major_minor(1000, 0); // $1000.00
    /// assert_eq!(price.cents(), 100_000);
    ///
    /// let negative = Money::from_major_minor(-5, 50); // -$5.50
    /// assert_eq!(negative.cents(), -550);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity, returning `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(70_000); // $700.00
    /// let gross = unit_price.checked_multiply_quantity(2).unwrap();
    /// assert_eq!(gross.cents(), 140_000);
    ///
    /// assert!(unit_price.checked_multiply_quantity(i64::MAX).is_none());
    /// ```
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Returns `percent`% of this amount, rounded half-to-even to the cent.
    ///
    /// ## Bankers Rounding
    /// ```text
    /// $0.05 × 50% = 2.5 cents → 2 cents (2 is even)
    /// $0.07 × 50% = 3.5 cents → 4 cents (4 is even)
    /// ```
    ///
    /// Results outside the `i64` range saturate at `i64::MIN`/`i64::MAX`.
    pub fn percentage(&self, percent: u32) -> Money {
        let scaled = self.0 as i128 * percent as i128;
        let cents = div_round_half_even(scaled, 100);
        let clamped = i64::try_from(cents).unwrap_or(if cents < 0 { i64::MIN } else { i64::MAX });
        Money::from_cents(clamped)
    }

    /// Applies a percentage discount and returns the discounted amount.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let gross = Money::from_cents(300_000); // $3000.00
    /// let discounted = gross.apply_percentage_discount(10); // 10% off
    /// assert_eq!(discounted.cents(), 270_000); // $2700.00
    /// ```
    ///
    /// Saturates instead of wrapping when the discount exceeds the `i64` range.
    pub fn apply_percentage_discount(&self, percent: u32) -> Money {
        Money(self.0.saturating_sub(self.percentage(percent).0))
    }
}

/// Integer division rounding half-to-even. `denominator` must be positive.
fn div_round_half_even(numerator: i128, denominator: i128) -> i128 {
    let quotient = numerator.div_euclid(denominator);
    let twice_remainder = numerator.rem_euclid(denominator) * 2;

    if twice_remainder > denominator || (twice_remainder == denominator && quotient % 2 != 0) {
        quotient + 1
    } else {
        quotient
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders `$D.CC`, or `-$D.CC` for negative values.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(10, 99).cents(), 1099);
        assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "$10.99");
        assert_eq!(Money::from_cents(270_000).to_string(), "$2700.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
        assert_eq!(Money::from_cents(-5).to_string(), "-$0.05");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert!((b - a).is_negative());
    }

    #[test]
    fn test_percentage_discount() {
        let gross = Money::from_cents(300_000);
        assert_eq!(gross.apply_percentage_discount(10).cents(), 270_000);
        assert_eq!(gross.apply_percentage_discount(0), gross);
        assert!(gross.apply_percentage_discount(100).is_zero());
    }

    #[test]
    fn test_percentage_rounds_half_to_even() {
        assert_eq!(Money::from_cents(5).percentage(50).cents(), 2);
        assert_eq!(Money::from_cents(7).percentage(50).cents(), 4);
        assert_eq!(Money::from_cents(1).percentage(49).cents(), 0);
        assert_eq!(Money::from_cents(1).percentage(51).cents(), 1);
        assert_eq!(Money::from_cents(-5).percentage(50).cents(), -2);
    }

    #[test]
    fn test_percentage_saturates_instead_of_wrapping() {
        let gross = Money::from_cents(i64::MAX / 2);
        assert_eq!(gross.percentage(1000).cents(), i64::MAX);
        assert_eq!(gross.apply_percentage_discount(1000).cents(), i64::MAX / 2 - i64::MAX);
        assert!(gross.apply_percentage_discount(1000).is_negative());

        let negative = Money::from_cents(i64::MIN / 2);
        assert_eq!(negative.percentage(1000).cents(), i64::MIN);
    }

    #[test]
    fn test_checked_multiply_quantity() {
        let price = Money::from_cents(100_000);
        assert_eq!(price.checked_multiply_quantity(3), Some(Money::from_cents(300_000)));
        assert_eq!(price.checked_multiply_quantity(i64::MAX), None);
    }

    #[test]
    fn test_serializes_as_cents() {
        let json = serde_json::to_string(&Money::from_cents(1099)).unwrap();
        assert_eq!(json, "1099");
    }
}
