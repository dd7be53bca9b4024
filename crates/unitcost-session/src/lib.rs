//! # unitcost-session: Edit Session State Layer
//!
//! The thin stateful layer between the frontend and the pure
//! [`unitcost_core`] engine. It owns exactly two things:
//!
//! 1. The current [`RecipeResult`](unitcost_core::types::RecipeResult),
//!    replaced wholesale on every saved edit
//! 2. The single open [`EditDraft`](unitcost_core::types::EditDraft) -
//!    opening a second edit while one is in progress is rejected
//!
//! All business logic is delegated to `unitcost-core`; this crate adds the
//! mutex, the JSON boundary with the pricing service, structured logging,
//! and the serialized error shape the frontend consumes.
//!
//! ## Example
//! ```rust
//! use unitcost_session::EditSession;
//!
//! let payload = r#"{
//!     "recipe_name": null,
//!     "ingredients": [{
//!         "ingredient": "flour", "quantity": 240, "unit": "g", "cost": 0.24,
//!         "package_info": {"size": "2000g", "price": 2.0, "cost_per_unit": 0.001, "unit": "g"}
//!     }],
//!     "total_cost": 0.24, "yield_count": 12, "unit_cost": 0.02
//! }"#;
//!
//! let session = EditSession::from_json(payload).unwrap();
//! let draft = session.begin_edit(0).unwrap();
//! assert_eq!(draft.raw_size_input, "2000");
//!
//! let updated = session.save("1000", "1.50").unwrap();
//! assert_eq!(updated.total_cost.cents(), 36);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod session;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{ApiError, ErrorCode};
pub use session::{ActiveEdit, EditSession};
