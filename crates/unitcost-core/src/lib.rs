//! # unitcost-core: Pure Business Logic for the Unit Cost Calculator
//!
//! This crate is the **heart** of the Unit Cost Calculator. It contains the
//! unit-normalization and cost-recomputation engine as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Unit Cost Calculator Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (TypeScript)                        │   │
//! │  │    Recipe Form ──► Ingredient Table ──► Inline Edit Form        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    unitcost-session                             │   │
//! │  │    current RecipeResult + the single open EditDraft             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ unitcost-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   units   │  │   money   │  │  engine   │  │ validation│  │   │
//! │  │   │ normalize │  │   Money   │  │ save_edit │  │   rules   │  │   │
//! │  │   │ BaseUnit  │  │ UnitPrice │  │ start_edit│  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO RECIPE PARSING • NO PRICE LOOKUP • PURE FUNCTIONS│   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │       Pricing service (external, out of scope)                  │   │
//! │  │       recipe text ──► parsed ingredients ──► initial costs      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`units`] - Unit normalizer ("454g" → 454 grams) and the `Quantity`
//!   fixed-point magnitude type
//! - [`money`] - `Money` (integer cents) and `UnitPrice` (integer
//!   micro-dollars); no floating point in cost arithmetic
//! - [`types`] - Domain types (`RecipeResult`, `IngredientLine`, ...)
//! - [`engine`] - The cost recomputation engine (`start_edit`, `save_edit`)
//! - [`validation`] - Edit-input validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every operation is deterministic - same input =
//!    same output, which is what makes repeated edits idempotent
//! 2. **No I/O**: Network, LLM parsing, price databases and persistence are
//!    FORBIDDEN here - they live outside the workspace
//! 3. **Integer Arithmetic**: cents / micro-dollars / milli-units, so
//!    "total equals the sum of the lines" holds exactly
//! 4. **Replacement, Not Mutation**: a saved edit produces a whole new
//!    `RecipeResult`; a failed one leaves the old result untouched
//!
//! ## Example Usage
//!
//! ```rust
//! use unitcost_core::engine::save_edit;
//! use unitcost_core::types::RecipeResult;
//! use unitcost_core::units::normalize;
//!
//! // The normalizer reduces any package expression to base units.
//! let size = normalize("1kg").unwrap();
//! assert_eq!(size.magnitude.to_string(), "1000");
//!
//! // A user correction replaces the whole result in one step.
//! let payload = r#"{
//!     "recipe_name": null,
//!     "ingredients": [{
//!         "ingredient": "flour", "quantity": 240, "unit": "g", "cost": 0.24,
//!         "package_info": {"size": "2000g", "price": 2.0, "cost_per_unit": 0.001, "unit": "g"}
//!     }],
//!     "total_cost": 0.24, "yield_count": 12, "unit_cost": 0.02
//! }"#;
//! let result: RecipeResult = serde_json::from_str(payload).unwrap();
//! let updated = save_edit(&result, 0, "1000", "1.50").unwrap();
//! assert_eq!(updated.ingredients[0].cost.cents(), 36); // $0.0015/g × 240 g
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod engine;
pub mod error;
pub mod money;
pub mod types;
pub mod units;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use unitcost_core::Money` instead of
// `use unitcost_core::money::Money`

pub use engine::{assemble_result, price_line, save_edit, start_edit};
pub use error::{CoreResult, EditError, ParseError};
pub use money::{Money, UnitPrice};
pub use types::{EditDraft, IngredientLine, PackageInfo, RecipeResult};
pub use units::{normalize, BaseUnit, NormalizedSize, Quantity};
