//! # Domain Types
//!
//! Core domain types for the Unit Cost Calculator.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌───────────────────┐      ┌───────────────────┐                      │
//! │  │   RecipeResult    │ 1..n │  IngredientLine   │                      │
//! │  │  ───────────────  │─────►│  ───────────────  │                      │
//! │  │  recipe_name      │      │  ingredient       │                      │
//! │  │  ingredients      │      │  quantity, unit   │                      │
//! │  │  total_cost       │      │  cost             │                      │
//! │  │  yield_count      │      │  manually_adjusted│                      │
//! │  │  unit_cost        │      │  package_info ────┼──┐                   │
//! │  └───────────────────┘      └───────────────────┘  │ 0..1              │
//! │                                                    ▼                   │
//! │  ┌───────────────────┐      ┌───────────────────────────┐              │
//! │  │     EditDraft     │      │       PackageInfo         │              │
//! │  │  ───────────────  │      │  ───────────────────────  │              │
//! │  │  target_index     │      │  size ("454g")            │              │
//! │  │  raw_size_input   │      │  price, cost_per_unit     │              │
//! │  │  raw_price_input  │      │  unit                     │              │
//! │  └───────────────────┘      └───────────────────────────┘              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! `RecipeResult` is created once from the pricing service's response and
//! only ever changed by whole-structure replacement. No field is mutated in
//! isolation, so totals and per-line costs always come from one consistent
//! snapshot.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{Money, UnitPrice};
use crate::units::{BaseUnit, Quantity};

// =============================================================================
// Package Info
// =============================================================================

/// The purchase reference an ingredient's cost is derived from.
///
/// ## Invariants
/// - `cost_per_unit == price / magnitude(size)`
/// - `unit` equals the owning line's unit family; the engine never changes
///   a line's unit family, only its size and price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PackageInfo {
    /// Canonical display form: magnitude + base-unit suffix, no space
    /// ("454g", "750ml", "12item").
    pub size: String,

    /// Price paid for one package of `size`.
    pub price: Money,

    /// Price of a single base unit (gram, milliliter, or item).
    pub cost_per_unit: UnitPrice,

    /// Unit family of the package.
    pub unit: BaseUnit,
}

impl PackageInfo {
    /// Builds a package reference from a magnitude already normalized into
    /// base units, deriving the size string and the per-unit price.
    ///
    /// ## Example
    /// ```rust
    /// use unitcost_core::money::Money;
    /// use unitcost_core::types::PackageInfo;
    /// use unitcost_core::units::{BaseUnit, Quantity};
    ///
    /// let pkg = PackageInfo::from_magnitude(
    ///     Quantity::from_whole(500),
    ///     Money::from_cents(400),
    ///     BaseUnit::Gram,
    /// );
    /// assert_eq!(pkg.size, "500g");
    /// assert_eq!(pkg.cost_per_unit.micros(), 8_000);
    /// ```
    pub fn from_magnitude(magnitude: Quantity, price: Money, unit: BaseUnit) -> Self {
        PackageInfo {
            size: format!("{}{}", magnitude, unit.suffix()),
            price,
            cost_per_unit: price.per_unit(magnitude),
            unit,
        }
    }
}

// =============================================================================
// Ingredient Line
// =============================================================================

/// One ingredient's contribution to a recipe.
///
/// Positions in `RecipeResult::ingredients` are stable identifiers for the
/// duration of a session; the edit engine addresses lines by index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct IngredientLine {
    /// Display name ("peanut butter").
    pub ingredient: String,

    /// Amount actually used in the recipe, in base units.
    pub quantity: Quantity,

    /// Unit family of `quantity` (and of the package, when present).
    pub unit: BaseUnit,

    /// Current cost contribution of this line; never negative.
    pub cost: Money,

    /// Free-text annotation from the pricing service ("estimated at 30g
    /// per scoop"). Opaque to the engine, never mutated by it.
    #[serde(default)]
    pub note: Option<String>,

    /// Purchase reference, when the pricing service supplied one. Lines
    /// without one are not editable.
    #[serde(default)]
    pub package_info: Option<PackageInfo>,

    /// True once the user has overridden this line at least once.
    /// Never reverts to false.
    #[serde(default)]
    pub manually_adjusted: bool,

    /// True when the pricing service had no price for this ingredient
    /// (cost zero, no package). Carried through untouched by edits.
    #[serde(default)]
    pub unknown_ingredient: bool,
}

impl IngredientLine {
    /// Whether the user can override this line's pricing.
    #[inline]
    pub fn is_editable(&self) -> bool {
        self.package_info.is_some()
    }
}

// =============================================================================
// Recipe Result
// =============================================================================

/// A fully priced recipe, as returned by the pricing service and as
/// replaced wholesale after every saved edit.
///
/// ## Invariants
/// - `total_cost == Σ ingredients[i].cost` at all times after any
///   recomputation
/// - `unit_cost == total_cost / yield_count` (`yield_count > 0` is
///   established upstream)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RecipeResult {
    /// Recipe name, when one was found in the source text.
    pub recipe_name: Option<String>,

    /// Ingredient lines in display order.
    pub ingredients: Vec<IngredientLine>,

    /// Sum of all line costs.
    pub total_cost: Money,

    /// Number of items the recipe produces; immutable in this crate's
    /// scope.
    pub yield_count: i64,

    /// Cost per produced item (`total_cost / yield_count`).
    pub unit_cost: UnitPrice,
}

impl RecipeResult {
    /// Re-sums every line cost. Always a full re-sum, not an incremental
    /// delta, so floating-point drift cannot accumulate across repeated
    /// edits.
    pub fn sum_of_lines(&self) -> Money {
        self.ingredients.iter().map(|line| line.cost).sum()
    }
}

// =============================================================================
// Edit Draft
// =============================================================================

/// Unvalidated text captured while an edit form is open.
///
/// Transient: discarded on cancel or successful save, never part of a
/// [`RecipeResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EditDraft {
    /// Position of the line being edited.
    pub target_index: usize,

    /// User-entered package size text.
    pub raw_size_input: String,

    /// User-entered package price text.
    pub raw_price_input: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
