//! # Unit Normalizer
//!
//! Parses human-written package-size expressions into a canonical
//! (magnitude, base unit) pair.
//!
//! ## Base Units
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Unit Normalization                                   │
//! │                                                                         │
//! │  Input            Token     Scale        Canonical                     │
//! │  ─────            ─────     ─────        ─────────                     │
//! │  "454g"           g         × 1          454 g                         │
//! │  "1kg"            kg        × 1000       1000 g                        │
//! │  "1L"             l         × 1000       1000 ml                       │
//! │  "12 item"        item      × 1          12 item                       │
//! │  "16oz"           oz        × 28.35      453.6 g                       │
//! │  "2 cup"          cup       × 240        480 ml                        │
//! │                                                                         │
//! │  Every quantity is reduced to grams, milliliters, or a discrete        │
//! │  item count before any cost arithmetic happens.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Magnitude Representation
//! Magnitudes are stored as [`Quantity`]: integer milli-base-units
//! (milligrams, micro-liters-as-milli-ml, thousandths of an item). Every
//! conversion factor in this module is exact at that resolution, so
//! normalization never loses information the cost engine cares about.

use std::fmt;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ts_rs::TS;

use crate::error::ParseError;

// =============================================================================
// Base Unit
// =============================================================================

/// The unit family a quantity is normalized into before arithmetic.
///
/// Matches the pricing service's wire values: `"g"`, `"ml"`, `"item"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum BaseUnit {
    /// Mass, stored in grams (solids, powders).
    #[serde(rename = "g")]
    Gram,
    /// Volume, stored in milliliters (liquids).
    #[serde(rename = "ml")]
    Milliliter,
    /// Discrete count (eggs, scoops sold by the piece). Never scaled.
    #[serde(rename = "item")]
    Item,
}

impl BaseUnit {
    /// The canonical display suffix, as used in package size strings
    /// (`"454g"`, `"750ml"`, `"12item"`).
    #[inline]
    pub const fn suffix(&self) -> &'static str {
        match self {
            BaseUnit::Gram => "g",
            BaseUnit::Milliliter => "ml",
            BaseUnit::Item => "item",
        }
    }
}

impl fmt::Display for BaseUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

// =============================================================================
// Quantity
// =============================================================================

/// Thousandths of a base unit per whole unit.
const MILLI_PER_UNIT: i64 = 1_000;

/// An amount of a base unit, in integer milli-units.
///
/// ## Why Integer Milli-Units?
/// The cost engine follows the same rule as the money type: no binary
/// floating point in arithmetic that feeds an invariant. Package sizes and
/// recipe quantities come in as decimal text ("454", "0.5") with at most
/// three fractional digits, so thousandths are lossless.
///
/// ## Example
/// ```rust
/// use unitcost_core::units::Quantity;
///
/// let grams = Quantity::parse("60").unwrap();
/// assert_eq!(grams.milli(), 60_000);
/// assert_eq!(grams.to_string(), "60");
///
/// let half = Quantity::parse("0.5").unwrap();
/// assert_eq!(half.to_string(), "0.5");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, TS)]
#[ts(export)]
pub struct Quantity(i64);

impl Quantity {
    /// Creates a quantity from milli-base-units.
    #[inline]
    pub const fn from_milli(milli: i64) -> Self {
        Quantity(milli)
    }

    /// Creates a quantity from whole base units (e.g. grams).
    #[inline]
    pub const fn from_whole(units: i64) -> Self {
        Quantity(units * MILLI_PER_UNIT)
    }

    /// Returns the value in milli-base-units.
    #[inline]
    pub const fn milli(&self) -> i64 {
        self.0
    }

    /// Checks if the quantity is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the quantity is greater than zero.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Parses a sign-free decimal string ("454", "0.5", "12.345").
    ///
    /// At most three fractional digits are accepted; anything finer than
    /// the milli-unit resolution is rejected rather than silently rounded.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ParseError::Empty);
        }
        parse_milli(trimmed)
            .map(Quantity)
            .ok_or_else(|| ParseError::InvalidMagnitude {
                input: trimmed.to_string(),
            })
    }
}

/// Displays the magnitude as decimal text with trailing zeros trimmed
/// ("454", "0.5"). This is the form used when seeding an edit form and
/// when rebuilding a package size string.
impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / MILLI_PER_UNIT;
        let frac = (self.0 % MILLI_PER_UNIT).abs();
        if frac == 0 {
            write!(f, "{whole}")
        } else {
            let digits = format!("{frac:03}");
            write!(f, "{}.{}", whole, digits.trim_end_matches('0'))
        }
    }
}

/// Quantities cross the wire as plain decimal base units (60 means 60 g).
impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0 as f64 / MILLI_PER_UNIT as f64)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        if !value.is_finite() {
            return Err(D::Error::custom("quantity must be a finite number"));
        }
        Ok(Quantity((value * MILLI_PER_UNIT as f64).round() as i64))
    }
}

/// Parses a sign-free decimal into milli-units with pure integer math.
fn parse_milli(text: &str) -> Option<i64> {
    let (whole, frac) = match text.split_once('.') {
        Some((w, f)) => (w, f),
        None => (text, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if frac.len() > 3 {
        return None;
    }
    let whole_val: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let mut frac_val: i64 = if frac.is_empty() { 0 } else { frac.parse().ok()? };
    for _ in frac.len()..3 {
        frac_val *= 10;
    }
    whole_val
        .checked_mul(MILLI_PER_UNIT)?
        .checked_add(frac_val)
}

// =============================================================================
// Conversion Constants (milli-base-units per purchase unit)
// =============================================================================

/// Milligrams per ounce (28.35 g).
pub const MILLI_PER_OZ: i64 = 28_350;
/// Milligrams per pound (453.592 g).
pub const MILLI_PER_LB: i64 = 453_592;
/// Milli-milliliters per teaspoon (5 ml).
pub const MILLI_PER_TSP: i64 = 5_000;
/// Milli-milliliters per tablespoon (15 ml).
pub const MILLI_PER_TBSP: i64 = 15_000;
/// Milli-milliliters per fluid ounce (30 ml).
pub const MILLI_PER_FL_OZ: i64 = 30_000;
/// Milli-milliliters per US cup (240 ml).
pub const MILLI_PER_CUP: i64 = 240_000;

/// Looks up the conversion factor and base unit for a unit token.
///
/// Returns milli-base-units per one whole token unit.
fn unit_factor(token: &str) -> Option<(i64, BaseUnit)> {
    match token {
        "g" | "gram" | "grams" => Some((1_000, BaseUnit::Gram)),
        "kg" | "kilogram" | "kilograms" => Some((1_000_000, BaseUnit::Gram)),
        "oz" | "ounce" | "ounces" => Some((MILLI_PER_OZ, BaseUnit::Gram)),
        "lb" | "lbs" | "pound" | "pounds" => Some((MILLI_PER_LB, BaseUnit::Gram)),
        "ml" | "milliliter" | "milliliters" => Some((1_000, BaseUnit::Milliliter)),
        "l" | "liter" | "liters" | "litre" | "litres" => Some((1_000_000, BaseUnit::Milliliter)),
        "tsp" | "teaspoon" | "teaspoons" => Some((MILLI_PER_TSP, BaseUnit::Milliliter)),
        "tbsp" | "tablespoon" | "tablespoons" => Some((MILLI_PER_TBSP, BaseUnit::Milliliter)),
        "fl oz" | "floz" | "fluid ounce" | "fluid ounces" => {
            Some((MILLI_PER_FL_OZ, BaseUnit::Milliliter))
        }
        "cup" | "cups" => Some((MILLI_PER_CUP, BaseUnit::Milliliter)),
        "item" | "items" | "each" => Some((1_000, BaseUnit::Item)),
        _ => None,
    }
}

// =============================================================================
// Normalization
// =============================================================================

/// A package-size expression reduced to canonical form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TS)]
#[ts(export)]
pub struct NormalizedSize {
    /// The magnitude in the base unit (always base units; "1kg" is 1000 g).
    pub magnitude: Quantity,
    /// The base unit family of the expression.
    pub unit: BaseUnit,
}

/// Parses a package-size expression into a [`NormalizedSize`].
///
/// ## Grammar
/// A sign-free decimal number, optional whitespace, then a unit token
/// matched case-insensitively. Larger units are scaled down to base units
/// (`kg` × 1000 → g, `l` × 1000 → ml); `item` is a discrete count and is
/// never scaled.
///
/// ## Example
/// ```rust
/// use unitcost_core::units::{normalize, BaseUnit, Quantity};
///
/// let size = normalize("1kg").unwrap();
/// assert_eq!(size.magnitude, Quantity::from_whole(1000));
/// assert_eq!(size.unit, BaseUnit::Gram);
///
/// assert!(normalize("abc").is_err());
/// ```
///
/// ## Edge Cases
/// A magnitude of exactly 0 is a valid parse; positivity is the cost
/// engine's precondition to check before use, not this function's.
pub fn normalize(text: &str) -> Result<NormalizedSize, ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }

    // Split at the first character that cannot be part of the number.
    let number_end = trimmed
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(trimmed.len());
    let (number, rest) = trimmed.split_at(number_end);

    if number.is_empty() {
        return Err(ParseError::MissingMagnitude {
            input: trimmed.to_string(),
        });
    }
    let magnitude_milli = parse_milli(number).ok_or_else(|| ParseError::InvalidMagnitude {
        input: trimmed.to_string(),
    })?;

    let token = rest.trim().to_lowercase();
    if token.is_empty() {
        return Err(ParseError::MissingUnit {
            input: trimmed.to_string(),
        });
    }
    let (factor, unit) = unit_factor(&token).ok_or(ParseError::UnknownUnit { token })?;

    // i128 intermediate with half-up rounding; only the imperial factors
    // can produce a sub-milli remainder.
    let total = (magnitude_milli as i128 * factor as i128 + 500) / 1_000;
    if total > i64::MAX as i128 {
        return Err(ParseError::InvalidMagnitude {
            input: trimmed.to_string(),
        });
    }

    Ok(NormalizedSize {
        magnitude: Quantity::from_milli(total as i64),
        unit,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
