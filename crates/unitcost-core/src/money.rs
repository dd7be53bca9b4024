//! # Money Module
//!
//! Provides the `Money` and `UnitPrice` types for handling monetary values
//! safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  The recipe invariant "total cost == sum of line costs" must hold       │
//! │  EXACTLY across any number of repeated edits. So line costs and         │
//! │  totals are integer cents, and totals are always a full re-sum.         │
//! │                                                                         │
//! │  Unit prices are finer than a cent ($4.00 / 500 g = $0.008/g), so       │
//! │  they get their own scale: integer micro-dollars.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Three Scales
//! ```text
//! Money      cents          (i64)   package price, line cost, total cost
//! UnitPrice  micro-dollars  (i64)   cost per gram/ml/item, cost per yield
//! Quantity   milli-units    (i64)   package magnitude, quantity used
//! ```
//!
//! Division always happens in i128 with half-up rounding, once per derived
//! value.

use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ts_rs::TS;

use crate::units::Quantity;

/// Micro-dollars per cent.
const MICROS_PER_CENT: i64 = 10_000;
/// Cents per (unit price micros × quantity milli) product.
const COST_PRODUCT_PER_CENT: i128 = 10_000_000;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: lets validation see a negative parsed price before
///   rejecting it
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Wire format**: serializes as a plain decimal dollar amount, matching
///   the pricing service's payload (`"price": 3.5`)
///
/// ## Where Money Flows
/// ```text
/// PackageInfo.price ──► UnitPrice (per gram) ──► IngredientLine.cost
///                                                      │
///                                    Σ lines ──► RecipeResult.total_cost
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use unitcost_core::money::Money;
    ///
    /// let price = Money::from_cents(349); // $3.49
    /// assert_eq!(price.cents(), 349);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
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

    /// Parses a decimal dollar string ("4.00", "3.5", "-1") into cents
    /// using pure integer math.
    ///
    /// At most two fractional digits are accepted. Returns `None` for
    /// anything that is not a decimal number; the sign is preserved so the
    /// validation layer can reject negative prices with the right error.
    ///
    /// ## Example
    /// ```rust
    /// use unitcost_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("4.00"), Some(Money::from_cents(400)));
    /// assert_eq!(Money::parse_decimal("3.5"), Some(Money::from_cents(350)));
    /// assert_eq!(Money::parse_decimal("-1"), Some(Money::from_cents(-100)));
    /// assert_eq!(Money::parse_decimal("abc"), None);
    /// ```
    pub fn parse_decimal(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let (whole, frac) = match unsigned.split_once('.') {
            Some((w, f)) => (w, f),
            None => (unsigned, ""),
        };
        if whole.is_empty() && frac.is_empty() {
            return None;
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit())
        {
            return None;
        }
        if frac.len() > 2 {
            return None;
        }
        let whole_val: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
        let mut frac_val: i64 = if frac.is_empty() { 0 } else { frac.parse().ok()? };
        for _ in frac.len()..2 {
            frac_val *= 10;
        }
        let cents = whole_val.checked_mul(100)?.checked_add(frac_val)?;
        Some(Money(if negative { -cents } else { cents }))
    }

    /// Formats as a plain two-decimal string ("4.00", "-0.50"), the form
    /// an edit form is seeded with.
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }

    /// Derives the price of one base unit from a package price and size.
    ///
    /// `size` must be positive (validated by the engine before this is
    /// called); a non-positive size yields a zero price.
    ///
    /// ## Example
    /// ```rust
    /// use unitcost_core::money::Money;
    /// use unitcost_core::units::Quantity;
    ///
    /// // $4.00 for 500 g → $0.008/g
    /// let price = Money::from_cents(400);
    /// let per_gram = price.per_unit(Quantity::from_whole(500));
    /// assert_eq!(per_gram.micros(), 8_000);
    /// ```
    pub fn per_unit(&self, size: Quantity) -> UnitPrice {
        if size.milli() <= 0 {
            return UnitPrice::zero();
        }
        let micros = (self.0 as i128 * COST_PRODUCT_PER_CENT + size.milli() as i128 / 2)
            / size.milli() as i128;
        UnitPrice(micros as i64)
    }

    /// Derives the cost per produced item from a recipe total and yield.
    ///
    /// `portions` must be positive (an upstream precondition on the yield
    /// count); a non-positive yield gives a zero unit cost.
    ///
    /// ## Example
    /// ```rust
    /// use unitcost_core::money::Money;
    ///
    /// // $0.82 across 6 cookies ≈ $0.136667 each
    /// let total = Money::from_cents(82);
    /// assert_eq!(total.per_portion(6).micros(), 136_667);
    /// ```
    pub fn per_portion(&self, portions: i64) -> UnitPrice {
        if portions <= 0 {
            return UnitPrice::zero();
        }
        let micros =
            (self.0 as i128 * MICROS_PER_CENT as i128 + portions as i128 / 2) / portions as i128;
        UnitPrice(micros as i64)
    }
}

/// Display implementation shows money in a human-readable format.
///
/// This is for debugging. Use frontend formatting for actual UI display
/// to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

/// Default money is zero.
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

/// Totals are a full re-sum of line costs, never an incremental delta.
impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        Money(iter.map(|m| m.0).sum())
    }
}

/// Money crosses the wire as a plain decimal dollar amount.
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0 as f64 / 100.0)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let dollars = f64::deserialize(deserializer)?;
        if !dollars.is_finite() {
            return Err(D::Error::custom("money must be a finite number"));
        }
        Ok(Money((dollars * 100.0).round() as i64))
    }
}

// =============================================================================
// Unit Price
// =============================================================================

/// A price per single base unit (or per produced item), in integer
/// micro-dollars (1/1,000,000 of a dollar).
///
/// ## Why Not Cents?
/// A 500 g bag for $4.00 costs $0.008 per gram. Cents cannot express that;
/// micro-dollars hold six decimal places, which matches the precision the
/// pricing service reports (`cost_per_unit: 0.008`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, TS)]
#[ts(export)]
pub struct UnitPrice(i64);

impl UnitPrice {
    /// Creates a unit price from micro-dollars.
    #[inline]
    pub const fn from_micros(micros: i64) -> Self {
        UnitPrice(micros)
    }

    /// Returns the value in micro-dollars.
    #[inline]
    pub const fn micros(&self) -> i64 {
        self.0
    }

    /// Zero unit price.
    #[inline]
    pub const fn zero() -> Self {
        UnitPrice(0)
    }

    /// Checks if the unit price is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// The cost of using `quantity` of the ingredient, rounded to cents.
    ///
    /// ## Example
    /// ```rust
    /// use unitcost_core::money::UnitPrice;
    /// use unitcost_core::units::Quantity;
    ///
    /// // $0.008/g × 60 g = $0.48
    /// let per_gram = UnitPrice::from_micros(8_000);
    /// let cost = per_gram.cost_of(Quantity::from_whole(60));
    /// assert_eq!(cost.cents(), 48);
    /// ```
    pub fn cost_of(&self, quantity: Quantity) -> Money {
        let product = self.0 as i128 * quantity.milli() as i128;
        Money::from_cents(((product + COST_PRODUCT_PER_CENT / 2) / COST_PRODUCT_PER_CENT) as i64)
    }
}

/// Debug-friendly display: "$0.008", "$1.25".
impl fmt::Display for UnitPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let whole = (self.0 / 1_000_000).abs();
        let frac = (self.0 % 1_000_000).abs();
        let digits = format!("{frac:06}");
        let trimmed = digits.trim_end_matches('0');
        let frac_str = if trimmed.len() < 2 { &digits[..2] } else { trimmed };
        write!(f, "{sign}${whole}.{frac_str}")
    }
}

impl Default for UnitPrice {
    fn default() -> Self {
        UnitPrice::zero()
    }
}

/// Unit prices cross the wire as a plain decimal dollar amount.
impl Serialize for UnitPrice {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0 as f64 / 1_000_000.0)
    }
}

impl<'de> Deserialize<'de> for UnitPrice {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let dollars = f64::deserialize(deserializer)?;
        if !dollars.is_finite() {
            return Err(D::Error::custom("unit price must be a finite number"));
        }
        Ok(UnitPrice((dollars * 1_000_000.0).round() as i64))
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
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_cents(48);
        let b = Money::from_cents(22);

        assert_eq!((a + b).cents(), 70);
        assert_eq!((a - b).cents(), 26);

        let total: Money = [a, b, Money::from_cents(12)].into_iter().sum();
        assert_eq!(total.cents(), 82);
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(Money::parse_decimal("3.50"), Some(Money::from_cents(350)));
        assert_eq!(Money::parse_decimal("4"), Some(Money::from_cents(400)));
        assert_eq!(Money::parse_decimal("0"), Some(Money::zero()));
        assert_eq!(Money::parse_decimal(".5"), Some(Money::from_cents(50)));
        assert_eq!(Money::parse_decimal("-1"), Some(Money::from_cents(-100)));
        assert_eq!(Money::parse_decimal("abc"), None);
        assert_eq!(Money::parse_decimal(""), None);
        assert_eq!(Money::parse_decimal("4.005"), None); // finer than cents
    }

    #[test]
    fn test_to_decimal_string() {
        assert_eq!(Money::from_cents(350).to_decimal_string(), "3.50");
        assert_eq!(Money::from_cents(400).to_decimal_string(), "4.00");
        assert_eq!(Money::from_cents(-50).to_decimal_string(), "-0.50");
    }

    #[test]
    fn test_per_unit() {
        // $4.00 / 500 g = $0.008/g
        let per_gram = Money::from_cents(400).per_unit(Quantity::from_whole(500));
        assert_eq!(per_gram.micros(), 8_000);

        // $2.76 / 12 items = $0.23/item
        let per_item = Money::from_cents(276).per_unit(Quantity::from_whole(12));
        assert_eq!(per_item.micros(), 230_000);
    }

    #[test]
    fn test_per_unit_guards_non_positive_size() {
        let price = Money::from_cents(400);
        assert!(price.per_unit(Quantity::from_whole(0)).is_zero());
    }

    #[test]
    fn test_cost_of() {
        // $0.008/g × 60 g = $0.48
        let cost = UnitPrice::from_micros(8_000).cost_of(Quantity::from_whole(60));
        assert_eq!(cost.cents(), 48);

        // fractional quantity: $0.012/g × 62.5 g = $0.75
        let cost = UnitPrice::from_micros(12_000).cost_of(Quantity::from_milli(62_500));
        assert_eq!(cost.cents(), 75);
    }

    #[test]
    fn test_per_portion() {
        // $0.82 / 6 ≈ $0.136667
        assert_eq!(Money::from_cents(82).per_portion(6).micros(), 136_667);
        // exact division
        assert_eq!(Money::from_cents(600).per_portion(6).micros(), 1_000_000);
        // guarded
        assert!(Money::from_cents(82).per_portion(0).is_zero());
    }

    #[test]
    fn test_unit_price_display() {
        assert_eq!(UnitPrice::from_micros(8_000).to_string(), "$0.008");
        assert_eq!(UnitPrice::from_micros(1_250_000).to_string(), "$1.25");
        assert_eq!(UnitPrice::from_micros(0).to_string(), "$0.00");
    }

    #[test]
    fn test_money_serde_is_decimal_dollars() {
        let price: Money = serde_json::from_str("3.5").unwrap();
        assert_eq!(price, Money::from_cents(350));
        assert_eq!(serde_json::to_string(&price).unwrap(), "3.5");

        let per_unit: UnitPrice = serde_json::from_str("0.008").unwrap();
        assert_eq!(per_unit.micros(), 8_000);
    }
}
