//! # Cost Recomputation Engine
//!
//! Pure functions that turn a user's package correction into a new, fully
//! consistent [`RecipeResult`].
//!
//! ## Edit Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Edit Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │ Viewing  │────►│ Editing  │────►│ Validate │────►│   New    │       │
//! │  │  (line)  │     │ (draft)  │     │ + price  │     │  Result  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                 │                              │
//! │                   start_edit         save_edit                          │
//! │                        │                 │                              │
//! │                        ▼                 ▼                              │
//! │                   cancel ──► draft dropped, result untouched            │
//! │                                                                         │
//! │  save_edit recomputes ONE line, then re-sums the whole recipe.          │
//! │  Every other line is field-for-field identical to before.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function here is deterministic and allocation is the only side
//! effect: the input result is never mutated, success returns a replacement
//! structure, and failure returns an error with the prior state intact.

use crate::error::{CoreResult, EditError};
use crate::money::Money;
use crate::types::{EditDraft, IngredientLine, PackageInfo, RecipeResult};
use crate::units::{normalize, BaseUnit, Quantity};
use crate::validation;

// =============================================================================
// Edit Operations
// =============================================================================

/// Opens an edit on one ingredient line, seeding the form from the stored
/// package reference.
///
/// The size field is seeded with the normalized magnitude (re-derived via
/// the unit normalizer, so "1kg" seeds as "1000"), the price field with the
/// package price formatted to two decimals.
///
/// ## Errors
/// - [`EditError::IndexOutOfRange`] if the index does not exist
/// - [`EditError::NotEditable`] if the line has no package reference
/// - [`EditError::Parse`] if the stored size string does not match the
///   unit grammar (the pricing service occasionally emits annotated sizes
///   like "810g (27 servings)")
pub fn start_edit(result: &RecipeResult, index: usize) -> CoreResult<EditDraft> {
    let line = line_at(result, index)?;
    let package = line
        .package_info
        .as_ref()
        .ok_or(EditError::NotEditable { index })?;

    let normalized = normalize(&package.size)?;

    Ok(EditDraft {
        target_index: index,
        raw_size_input: normalized.magnitude.to_string(),
        raw_price_input: package.price.to_decimal_string(),
    })
}

/// Applies a package correction and returns the replacement result.
///
/// ## Steps
/// 1. Resolve the size input to a positive magnitude in the line's base
///    unit (bare numbers like "500", or full expressions like "1kg")
/// 2. Parse the price input (zero allowed, negative rejected)
/// 3. Derive the new unit price and the new line cost from the line's
///    existing quantity - the amount used is never re-entered
/// 4. Rebuild the package reference with a base-unit size string (never
///    re-normalized back to kg/L)
/// 5. Replace the one line, re-sum the total, re-derive the unit cost
///
/// ## Example
/// ```rust
/// use unitcost_core::engine::save_edit;
/// # let payload = r#"{
/// #   "recipe_name": null,
/// #   "ingredients": [{
/// #     "ingredient": "peanut butter", "quantity": 60, "unit": "g", "cost": 0.72,
/// #     "package_info": {"size": "454g", "price": 3.5, "cost_per_unit": 0.007709, "unit": "g"}
/// #   }],
/// #   "total_cost": 0.72, "yield_count": 6, "unit_cost": 0.12
/// # }"#;
/// # let result: unitcost_core::types::RecipeResult = serde_json::from_str(payload).unwrap();
///
/// let updated = save_edit(&result, 0, "500", "4.00").unwrap();
/// let pkg = updated.ingredients[0].package_info.as_ref().unwrap();
/// assert_eq!(pkg.size, "500g");
/// assert_eq!(pkg.cost_per_unit.micros(), 8_000); // $0.008/g
/// assert_eq!(updated.ingredients[0].cost.cents(), 48); // × 60 g
/// assert!(updated.ingredients[0].manually_adjusted);
/// ```
pub fn save_edit(
    result: &RecipeResult,
    index: usize,
    raw_size: &str,
    raw_price: &str,
) -> CoreResult<RecipeResult> {
    let line = line_at(result, index)?;
    if !line.is_editable() {
        return Err(EditError::NotEditable { index });
    }

    let magnitude = resolve_size(raw_size, line.unit)?;
    let price = validation::parse_price_input(raw_price)?;

    let package = PackageInfo::from_magnitude(magnitude, price, line.unit);
    let cost = package.cost_per_unit.cost_of(line.quantity);

    let mut ingredients = result.ingredients.clone();
    ingredients[index] = IngredientLine {
        cost,
        manually_adjusted: true,
        package_info: Some(package),
        ..line.clone()
    };

    // Full re-sum, not an incremental delta.
    let total_cost: Money = ingredients.iter().map(|l| l.cost).sum();
    let unit_cost = total_cost.per_portion(result.yield_count);

    Ok(RecipeResult {
        recipe_name: result.recipe_name.clone(),
        ingredients,
        total_cost,
        yield_count: result.yield_count,
        unit_cost,
    })
}

/// Resolves a raw size input to a magnitude in the line's base unit.
///
/// The edit form normally submits a bare number ("500"), taken to be in
/// the line's own base unit. A full expression with a unit token ("1kg")
/// is run through the normalizer and must reduce to the same unit family.
fn resolve_size(raw: &str, unit: BaseUnit) -> CoreResult<Quantity> {
    if let Ok(magnitude) = validation::parse_size_input(raw) {
        return Ok(magnitude);
    }

    let normalized = normalize(raw).map_err(|_| EditError::InvalidPackageSize {
        input: raw.to_string(),
    })?;
    if normalized.unit != unit {
        return Err(EditError::UnitMismatch {
            expected: unit,
            found: normalized.unit,
        });
    }
    if !normalized.magnitude.is_positive() {
        return Err(EditError::InvalidPackageSize {
            input: raw.to_string(),
        });
    }
    Ok(normalized.magnitude)
}

fn line_at(result: &RecipeResult, index: usize) -> CoreResult<&IngredientLine> {
    result
        .ingredients
        .get(index)
        .ok_or(EditError::IndexOutOfRange {
            index,
            len: result.ingredients.len(),
        })
}

// =============================================================================
// Result Assembly
// =============================================================================

/// Prices one ingredient line from its package reference.
///
/// Lines without a package reference get a zero cost and are flagged
/// `unknown_ingredient`, exactly as the pricing service reports them.
pub fn price_line(
    ingredient: impl Into<String>,
    quantity: Quantity,
    unit: BaseUnit,
    note: Option<String>,
    package_info: Option<PackageInfo>,
) -> CoreResult<IngredientLine> {
    if let Some(package) = &package_info {
        if package.unit != unit {
            return Err(EditError::UnitMismatch {
                expected: unit,
                found: package.unit,
            });
        }
    }

    let (cost, unknown) = match &package_info {
        Some(package) => (package.cost_per_unit.cost_of(quantity), false),
        None => (Money::zero(), true),
    };

    Ok(IngredientLine {
        ingredient: ingredient.into(),
        quantity,
        unit,
        cost,
        note,
        package_info,
        manually_adjusted: false,
        unknown_ingredient: unknown,
    })
}

/// Assembles a [`RecipeResult`] from priced lines and a yield count.
///
/// This is the single place a result is created; every later change goes
/// through [`save_edit`] and replaces the structure wholesale.
pub fn assemble_result(
    recipe_name: Option<String>,
    ingredients: Vec<IngredientLine>,
    yield_count: i64,
) -> CoreResult<RecipeResult> {
    validation::validate_yield_count(yield_count)?;

    let total_cost: Money = ingredients.iter().map(|l| l.cost).sum();
    let unit_cost = total_cost.per_portion(yield_count);

    Ok(RecipeResult {
        recipe_name,
        ingredients,
        total_cost,
        yield_count,
        unit_cost,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
