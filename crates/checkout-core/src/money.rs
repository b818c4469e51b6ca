//! # Money Module
//!
//! Provides the `Money` type for handling monetary values exactly.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Catalog prices may carry sub-cent precision (2.9999), and the          │
//! │  running total must round to 2 fraction digits, half away from zero:    │
//! │    2.9999 + 2.8888 = 5.8887  →  $5.89 (NOT bankers-rounded 5.88)        │
//! │                                                                         │
//! │  OUR SOLUTION: rust_decimal                                             │
//! │    Exact base-10 arithmetic; rounding happens ONCE, explicitly,         │
//! │    with MidpointAwayFromZero when a total is presented                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use checkout_core::money::Money;
//!
//! let price = Money::from_cents(1099); // $10.99
//! let line = price.multiply_quantity(3);
//! assert_eq!(line, Money::from_cents(3297));
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};

/// Number of fraction digits a presented total carries.
pub const TOTAL_SCALE: u32 = 2;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value backed by exact decimal arithmetic.
///
/// ## Design Decisions
/// - **Decimal (base-10)**: unit prices may carry more than 2 fraction
///   digits, so integer cents cannot represent them
/// - **Single field tuple struct**: zero-cost abstraction over `Decimal`
/// - **Transparent serde**: serializes as a plain JSON number/string
///
/// Intermediate values stay unrounded; [`Money::round_to_cents`] is the
/// single place where presentation rounding happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Wraps a raw decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from cents (the smallest presentable unit).
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, TOTAL_SCALE))
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// let price = Money::from_major_minor(10, 99); // $10.99
    /// let refund = Money::from_major_minor(-5, 50); // -$5.50
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -$5.50, not -$4.50
    #[inline]
    pub fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money::from_cents(major * 100 - minor)
        } else {
            Money::from_cents(major * 100 + minor)
        }
    }

    /// Returns the underlying decimal amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Rounds to 2 fraction digits, half away from zero.
    ///
    /// ## Rounding Contract
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  ROUND HALF AWAY FROM ZERO (MidpointAwayFromZero)                   │
    /// │                                                                     │
    /// │    5.8887 → 5.89      2.505  → 2.51      -2.505 → -2.51             │
    /// │                                                                     │
    /// │  Bankers rounding (half to even) would give 2.505 → 2.50, which     │
    /// │  is NOT what a running checkout total displays.                     │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let raw = Money::new("5.8887".parse::<Decimal>().unwrap());
    /// assert_eq!(raw.round_to_cents(), Money::from_cents(589));
    /// ```
    pub fn round_to_cents(&self) -> Money {
        Money(
            self.0
                .round_dp_with_strategy(TOTAL_SCALE, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299); // $2.99
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total, Money::from_cents(897)); // $8.97
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * Decimal::from(qty))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for logs and debugging. The surrounding service layer is
/// responsible for locale-aware formatting.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0.is_sign_negative() && !self.0.is_zero() {
            "-"
        } else {
            ""
        };
        write!(f, "{}${}", sign, self.0.abs())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
