//! # Validation Module
//!
//! Input validation for edit submissions.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript)                                        │
//! │  ├── Basic format checks (empty field, obvious typos)                  │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (Rust)                                           │
//! │  ├── Decimal parsing with pure integer math                            │
//! │  └── Sign/positivity rules the engine relies on                        │
//! │                                                                         │
//! │  There is no storage layer; a rejected edit simply leaves the          │
//! │  current result untouched and the user re-prompted.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::EditError;
use crate::money::Money;
use crate::units::Quantity;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, EditError>;

/// Validates a raw package-size input as a bare magnitude.
///
/// ## Rules
/// - Must be a decimal number
/// - Must be strictly positive (a package of size 0 cannot price anything)
///
/// ## Example
/// ```rust
/// use unitcost_core::validation::parse_size_input;
///
/// assert!(parse_size_input("500").is_ok());
/// assert!(parse_size_input("0").is_err());
/// assert!(parse_size_input("-1").is_err());
/// assert!(parse_size_input("abc").is_err());
/// ```
pub fn parse_size_input(input: &str) -> ValidationResult<Quantity> {
    let magnitude = Quantity::parse(input).map_err(|_| EditError::InvalidPackageSize {
        input: input.to_string(),
    })?;

    if !magnitude.is_positive() {
        return Err(EditError::InvalidPackageSize {
            input: input.to_string(),
        });
    }

    Ok(magnitude)
}

/// Validates a raw package-price input.
///
/// ## Rules
/// - Must be a decimal number
/// - Must be non-negative; zero is allowed (free ingredients are valid)
///
/// ## Example
/// ```rust
/// use unitcost_core::validation::parse_price_input;
///
/// assert!(parse_price_input("4.00").is_ok());
/// assert!(parse_price_input("0").is_ok());
/// assert!(parse_price_input("-1").is_err());
/// ```
pub fn parse_price_input(input: &str) -> ValidationResult<Money> {
    let price = Money::parse_decimal(input).ok_or_else(|| EditError::InvalidPackagePrice {
        input: input.to_string(),
    })?;

    if price.is_negative() {
        return Err(EditError::InvalidPackagePrice {
            input: input.to_string(),
        });
    }

    Ok(price)
}

/// Validates a yield count (number of items a recipe produces).
///
/// ## Rules
/// - Must be positive; upstream enforces this before a result exists, and
///   the assembly path re-checks it
pub fn validate_yield_count(yield_count: i64) -> ValidationResult<()> {
    if yield_count <= 0 {
        return Err(EditError::InvalidYield { yield_count });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
