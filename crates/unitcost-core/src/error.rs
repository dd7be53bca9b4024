//! # Error Types
//!
//! Domain-specific error types for unitcost-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  unitcost-core errors (this file)                                      │
//! │  ├── ParseError  - A package-size expression does not match the        │
//! │  │                 unit grammar ("454g", "1kg", "12 item", ...)        │
//! │  └── EditError   - An edit submission was rejected (bad size, bad     │
//! │                    price, line not editable, ...)                      │
//! │                                                                        │
//! │  unitcost-session errors (separate crate)                              │
//! │  └── ApiError    - What the frontend sees (serialized)                 │
//! │                                                                        │
//! │  Flow: ParseError → EditError → ApiError → Frontend                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (the offending input, the index)
//! 3. Errors are enum variants, never String
//! 4. Every failure leaves the prior `RecipeResult` fully intact

use thiserror::Error;

use crate::units::BaseUnit;

// =============================================================================
// Parse Error
// =============================================================================

/// A package-size expression failed to parse.
///
/// The unit grammar is: a sign-free decimal number, optional whitespace,
/// then a unit token (`g`, `kg`, `ml`, `l`, `item`, plus the purchase units
/// `oz`, `lb`, `tsp`, `tbsp`, `cup`, `fl oz`).
///
/// The caller must not proceed to recompute on any of these; the prior
/// state stays unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input was empty (or all whitespace).
    #[error("package size is empty")]
    Empty,

    /// No leading number was found (e.g. `"abc"`, `"g"`).
    #[error("package size '{input}' has no leading number")]
    MissingMagnitude { input: String },

    /// The leading number is malformed (e.g. `"1.2.3kg"`) or finer than
    /// the milli-unit resolution this crate computes in.
    #[error("package size '{input}' has an invalid number")]
    InvalidMagnitude { input: String },

    /// The number was not followed by a unit token.
    #[error("package size '{input}' is missing a unit")]
    MissingUnit { input: String },

    /// The unit token is not recognized.
    #[error("unknown unit '{token}'")]
    UnknownUnit { token: String },
}

// =============================================================================
// Edit Error
// =============================================================================

/// An edit submission was rejected.
///
/// ## When These Occur
/// ```text
/// save_edit(result, index, "500", "4.00")
///      │
///      ├── index past the end?        → IndexOutOfRange
///      ├── line has no package_info?  → NotEditable
///      ├── size not a number or ≤ 0?  → InvalidPackageSize
///      ├── size unit ≠ line unit?     → UnitMismatch
///      └── price not a number or < 0? → InvalidPackagePrice
/// ```
///
/// All of these are scoped to a single edit attempt; no other data is
/// affected and nothing is fatal to the process.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// The ingredient index does not exist in the current result.
    #[error("ingredient index {index} out of range (recipe has {len} lines)")]
    IndexOutOfRange { index: usize, len: usize },

    /// The line has no package reference, so there is nothing to edit.
    ///
    /// The pricing service leaves `package_info` absent for ingredients it
    /// could not price; those lines are not editable.
    #[error("ingredient {index} has no package info and cannot be edited")]
    NotEditable { index: usize },

    /// The package size input is not a number, or is zero/negative.
    #[error("invalid package size: '{input}'")]
    InvalidPackageSize { input: String },

    /// The package price input is not a number, or is negative.
    /// A price of zero is permitted (free ingredients are valid).
    #[error("invalid package price: '{input}'")]
    InvalidPackagePrice { input: String },

    /// A size expression carried a unit from a different family than the
    /// ingredient (e.g. `"1l"` on a gram line). The engine never changes a
    /// line's unit family.
    #[error("package unit {found} does not match ingredient unit {expected}")]
    UnitMismatch { expected: BaseUnit, found: BaseUnit },

    /// Yield must be a positive number of produced items.
    #[error("yield must be a positive number, got {yield_count}")]
    InvalidYield { yield_count: i64 },

    /// A stored size string failed to re-parse (see [`ParseError`]).
    #[error(transparent)]
    Parse(#[from] ParseError),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with EditError.
pub type CoreResult<T> = Result<T, EditError>;

// =============================================================================
// Unit Tests
// =============================================================================
