//! # Money Module
//!
//! Provides the `Money` type for peso amounts and the `Denomination` /
//! `Tender` types for physical cash.
//!
//! ## Why Integer Centavos?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With floating point change arithmetic:                                 │
//! │    (20.0 - 19.9) * 100 = 10.000000000000142  ❌ WRONG!                  │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Centavos                                         │
//! │    2000 - 1990 = 10 centavos, every time                                │
//! │                                                                         │
//! │  Decimal amounts from the presentation layer are rounded to the        │
//! │  nearest centavo exactly once, at the boundary.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vend_core::money::{Denomination, Money, Tender};
//!
//! let price = Money::from_pesos(12); // PHP 12.00
//! let total = price * 3_u32;         // PHP 36.00
//!
//! let tender = Tender::new()
//!     .with(Denomination::TWENTY, 2)
//!     .with(Denomination::ONE, 1);
//! assert_eq!(tender.total(), Money::from_pesos(41));
//! assert!(tender.total() >= total);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::error::CashError;

// =============================================================================
// Money Type
// =============================================================================

/// A peso amount in centavos (1/100 PHP).
///
/// ## Design Decisions
/// - **i64 (signed)**: differences such as `paid - due` may be negative
/// - **Single field tuple struct**: zero-cost abstraction over i64
///
/// ## Where Money is Used
/// ```text
/// Item.unit_price ──► quote (price × qty) ──► sell(total_price)
///                                                  │
/// Tender.total() ──► amount_paid ──────────────────┤
///                                                  ▼
///                         change = amount_paid - total_price
///                                                  │
///                         CashRegister.dispense_change(change)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from centavos.
    ///
    /// ## Example
    /// ```rust
    /// use vend_core::money::Money;
    ///
    /// let price = Money::from_cents(1250); // PHP 12.50
    /// assert_eq!(price.cents(), 1250);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole pesos.
    #[inline]
    pub const fn from_pesos(pesos: i64) -> Self {
        Money(pesos * 100)
    }

    /// Creates a Money value from a decimal peso amount, rounding to the
    /// nearest centavo.
    ///
    /// This is the only place a float enters the money path. Callers that
    /// already hold whole pesos should use [`Money::from_pesos`].
    ///
    /// ## Example
    /// ```rust
    /// use vend_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(19.9).cents(), 1990);
    /// assert_eq!(Money::from_decimal(0.005).cents(), 1);
    /// ```
    pub fn from_decimal(pesos: f64) -> Self {
        Money((pesos * 100.0).round() as i64)
    }

    /// Returns the value in centavos.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-peso portion.
    #[inline]
    pub const fn pesos(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the centavo portion (always 0-99).
    #[inline]
    pub const fn centavos_part(&self) -> i64 {
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

/// Display shows the amount the way the machine's panels print it.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}PHP {}.{:02}",
            sign,
            self.pesos().abs(),
            self.centavos_part()
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

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by a slot quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Denomination
// =============================================================================

/// A coin or bill value the register recognises, in whole pesos.
///
/// Only the eight values in [`Denomination::ALL`] can be constructed, so a
/// `Denomination` in hand is always a valid one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(try_from = "u32", into = "u32")]
#[ts(export)]
pub struct Denomination(u32);

impl Denomination {
    pub const ONE: Denomination = Denomination(1);
    pub const FIVE: Denomination = Denomination(5);
    pub const TEN: Denomination = Denomination(10);
    pub const TWENTY: Denomination = Denomination(20);
    pub const FIFTY: Denomination = Denomination(50);
    pub const ONE_HUNDRED: Denomination = Denomination(100);
    pub const TWO_HUNDRED: Denomination = Denomination(200);
    pub const FIVE_HUNDRED: Denomination = Denomination(500);

    /// Every accepted denomination, ascending.
    pub const ALL: [Denomination; 8] = [
        Self::ONE,
        Self::FIVE,
        Self::TEN,
        Self::TWENTY,
        Self::FIFTY,
        Self::ONE_HUNDRED,
        Self::TWO_HUNDRED,
        Self::FIVE_HUNDRED,
    ];

    /// Order in which change is paid out. The 200 bill is accepted and may be
    /// counted by the feasibility check, but is never handed out as change.
    pub const DISPENSE_ORDER: [Denomination; 7] = [
        Self::FIVE_HUNDRED,
        Self::ONE_HUNDRED,
        Self::FIFTY,
        Self::TWENTY,
        Self::TEN,
        Self::FIVE,
        Self::ONE,
    ];

    /// Looks up a denomination by its peso value.
    ///
    /// ## Example
    /// ```rust
    /// use vend_core::money::Denomination;
    ///
    /// assert_eq!(Denomination::new(20), Some(Denomination::TWENTY));
    /// assert_eq!(Denomination::new(2), None);
    /// ```
    pub fn new(pesos: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.0 == pesos)
    }

    /// Returns the face value in pesos.
    #[inline]
    pub const fn pesos(&self) -> u32 {
        self.0
    }

    /// Returns the face value as Money.
    #[inline]
    pub const fn value(&self) -> Money {
        Money::from_pesos(self.0 as i64)
    }
}

impl TryFrom<u32> for Denomination {
    type Error = CashError;

    fn try_from(pesos: u32) -> Result<Self, Self::Error> {
        Denomination::new(pesos).ok_or(CashError::InvalidDenomination(pesos))
    }
}

impl From<Denomination> for u32 {
    fn from(d: Denomination) -> u32 {
        d.0
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PHP {}", self.0)
    }
}

// =============================================================================
// Tender
// =============================================================================

/// Cash inserted by a buyer, counted per denomination.
///
/// ## Payment Flow
/// ```text
/// Buyer inserts: 2 × PHP 20, 1 × PHP 1
///      │
///      ▼
/// Tender { 20: 2, 1: 1 } ── total() ──► PHP 41.00 (amount_paid)
///      │
///      ▼
/// Deposited into the register reserve BEFORE the change check,
/// so the buyer's own coins can be handed back as change.
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Tender {
    counts: BTreeMap<Denomination, u32>,
}

impl Tender {
    /// Creates an empty tender.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of `count` pieces of `denomination`.
    pub fn with(mut self, denomination: Denomination, count: u32) -> Self {
        self.insert(denomination, count);
        self
    }

    /// Adds `count` pieces of `denomination`. Zero counts are not stored;
    /// the count saturates at `u32::MAX`.
    pub fn insert(&mut self, denomination: Denomination, count: u32) {
        if count > 0 {
            let held = self.counts.entry(denomination).or_insert(0);
            *held = held.saturating_add(count);
        }
    }

    /// Number of pieces of `denomination` in this tender.
    pub fn count(&self, denomination: Denomination) -> u32 {
        self.counts.get(&denomination).copied().unwrap_or(0)
    }

    /// Total value of the tender.
    pub fn total(&self) -> Money {
        self.counts
            .iter()
            .map(|(d, &n)| d.value() * n)
            .sum()
    }

    /// Iterates `(denomination, count)` pairs, ascending by denomination.
    pub fn iter(&self) -> impl Iterator<Item = (Denomination, u32)> + '_ {
        self.counts.iter().map(|(&d, &n)| (d, n))
    }

    /// True if no cash was inserted.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.pesos(), 10);
        assert_eq!(money.centavos_part(), 99);
    }

    #[test]
    fn test_from_decimal_rounds_to_centavo() {
        assert_eq!(Money::from_decimal(5.0).cents(), 500);
        assert_eq!(Money::from_decimal(19.9).cents(), 1990);
        assert_eq!(Money::from_decimal(12.345).cents(), 1235);
        // The subtraction that drifts in floating point stays exact here
        let change = Money::from_decimal(20.0) - Money::from_decimal(19.9);
        assert_eq!(change.cents(), 10);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "PHP 10.99");
        assert_eq!(Money::from_pesos(5).to_string(), "PHP 5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-PHP 5.50");
        assert_eq!(Money::zero().to_string(), "PHP 0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_pesos(10);
        let b = Money::from_pesos(5);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((b - a).cents(), -500);
        assert_eq!((a * 3_u32).cents(), 3000);

        let total: Money = [a, b, b].into_iter().sum();
        assert_eq!(total, Money::from_pesos(20));
    }

    #[test]
    fn test_zero_and_checks() {
        assert!(Money::zero().is_zero());
        assert!(Money::from_cents(1).is_positive());
        assert!(Money::from_cents(-1).is_negative());
    }

    #[test]
    fn test_denomination_lookup() {
        for d in Denomination::ALL {
            assert_eq!(Denomination::new(d.pesos()), Some(d));
        }
        assert_eq!(Denomination::new(0), None);
        assert_eq!(Denomination::new(2), None);
        assert_eq!(Denomination::new(1000), None);
        assert!(matches!(
            Denomination::try_from(3),
            Err(CashError::InvalidDenomination(3))
        ));
    }

    #[test]
    fn test_dispense_order_skips_two_hundred() {
        assert!(!Denomination::DISPENSE_ORDER.contains(&Denomination::TWO_HUNDRED));
        assert!(Denomination::DISPENSE_ORDER
            .windows(2)
            .all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_denomination_serde_rejects_unknown_values() {
        let ok: Denomination = serde_json::from_str("50").unwrap();
        assert_eq!(ok, Denomination::FIFTY);
        assert!(serde_json::from_str::<Denomination>("7").is_err());
    }

    #[test]
    fn test_tender_total() {
        let mut tender = Tender::new()
            .with(Denomination::FIVE_HUNDRED, 1)
            .with(Denomination::ONE, 3);
        tender.insert(Denomination::ONE, 2);
        tender.insert(Denomination::TEN, 0);

        assert_eq!(tender.count(Denomination::ONE), 5);
        assert_eq!(tender.count(Denomination::TEN), 0);
        assert_eq!(tender.total(), Money::from_pesos(505));
        assert_eq!(tender.iter().count(), 2);
        assert!(Tender::new().is_empty());
    }

    #[test]
    fn test_tender_insert_saturates() {
        let mut tender = Tender::new().with(Denomination::ONE, u32::MAX);
        tender.insert(Denomination::ONE, 5);
        assert_eq!(tender.count(Denomination::ONE), u32::MAX);
        assert_eq!(tender.total(), Money::from_pesos(i64::from(u32::MAX)));
    }
}
