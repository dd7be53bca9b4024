//! # Edit Session
//!
//! Owns the current recipe result and the single open edit.
//!
//! ## Thread Safety
//! The session is wrapped in `Arc<Mutex<T>>` because:
//! 1. Multiple frontend calls may touch the session
//! 2. Only one call should modify it at a time
//! 3. The core engine itself is pure - serialization happens here
//!
//! ## Session Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Operations                                   │
//! │                                                                         │
//! │  Frontend Action          Session Call           State Change           │
//! │  ───────────────          ────────────           ────────────           │
//! │                                                                         │
//! │  Service responds ───────► from_json() ────────► result = parsed       │
//! │                                                                         │
//! │  Click "edit" ───────────► begin_edit(i) ──────► active = Some(draft)  │
//! │                                                                         │
//! │  Click "save" ───────────► save(size, price) ──► result = replacement  │
//! │                                                  active = None          │
//! │                                                                         │
//! │  Click "cancel" ─────────► cancel() ───────────► active = None         │
//! │                                                  (result untouched)     │
//! │                                                                         │
//! │  Render table ───────────► with_result(f) ─────► (read only)           │
//! │                                                                         │
//! │  At most ONE edit is open at a time; begin_edit while another is        │
//! │  open is rejected rather than silently replacing the draft.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use unitcost_core::engine;
use unitcost_core::types::{EditDraft, RecipeResult};

use crate::error::ApiError;

/// The one open edit, with the moment it was opened.
///
/// The timestamp exists for the session only (stale-form display in the
/// UI); it never enters a recomputed result, which keeps saves idempotent.
#[derive(Debug, Clone)]
pub struct ActiveEdit {
    /// The draft seeded by the core engine.
    pub draft: EditDraft,
    /// When the edit form was opened.
    pub opened_at: DateTime<Utc>,
}

#[derive(Debug)]
struct SessionInner {
    result: RecipeResult,
    active: Option<ActiveEdit>,
}

/// Shared edit-session state.
///
/// ## Why Not RwLock?
/// Session operations are quick, and most of them modify state. A RwLock
/// would add complexity with minimal benefit.
#[derive(Debug, Clone)]
pub struct EditSession {
    inner: Arc<Mutex<SessionInner>>,
}

impl EditSession {
    /// Creates a session around an already-parsed result.
    pub fn new(result: RecipeResult) -> Self {
        EditSession {
            inner: Arc::new(Mutex::new(SessionInner {
                result,
                active: None,
            })),
        }
    }

    /// Creates a session straight from the pricing service's JSON payload.
    ///
    /// Ingredients without `package_info` are tolerated and simply stay
    /// non-editable.
    pub fn from_json(payload: &str) -> Result<Self, ApiError> {
        let result: RecipeResult = serde_json::from_str(payload)?;
        debug!(
            ingredients = result.ingredients.len(),
            yield_count = result.yield_count,
            "session created from pricing payload"
        );
        Ok(EditSession::new(result))
    }

    /// Returns a snapshot of the current result.
    pub fn result(&self) -> RecipeResult {
        self.lock().result.clone()
    }

    /// Executes a function with read access to the current result.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let total = session.with_result(|r| r.total_cost);
    /// ```
    pub fn with_result<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&RecipeResult) -> R,
    {
        f(&self.lock().result)
    }

    /// Whether an edit form is currently open.
    pub fn is_editing(&self) -> bool {
        self.lock().active.is_some()
    }

    /// The currently open draft, if any.
    pub fn active_draft(&self) -> Option<EditDraft> {
        self.lock().active.as_ref().map(|a| a.draft.clone())
    }

    /// When the currently open edit was started, if any.
    pub fn active_since(&self) -> Option<DateTime<Utc>> {
        self.lock().active.as_ref().map(|a| a.opened_at)
    }

    /// Opens an edit on one ingredient line.
    ///
    /// Fails if another edit is already open, if the index does not exist,
    /// or if the line carries no package reference.
    pub fn begin_edit(&self, index: usize) -> Result<EditDraft, ApiError> {
        let mut inner = self.lock();
        if inner.active.is_some() {
            warn!(index, "begin_edit rejected: an edit is already open");
            return Err(ApiError::conflict(
                "another edit is already in progress; save or cancel it first",
            ));
        }

        let draft = engine::start_edit(&inner.result, index)?;
        debug!(
            index,
            size = %draft.raw_size_input,
            price = %draft.raw_price_input,
            "edit opened"
        );
        inner.active = Some(ActiveEdit {
            draft: draft.clone(),
            opened_at: Utc::now(),
        });
        Ok(draft)
    }

    /// Saves the open edit with the user's final input text.
    ///
    /// On success the held result is replaced wholesale and the draft is
    /// dropped. On any failure both the result and the draft are left
    /// untouched so the user can correct the form and retry.
    pub fn save(&self, raw_size: &str, raw_price: &str) -> Result<RecipeResult, ApiError> {
        let mut inner = self.lock();
        let index = match &inner.active {
            Some(active) => active.draft.target_index,
            None => {
                warn!("save rejected: no edit is open");
                return Err(ApiError::conflict("no edit is in progress"));
            }
        };

        match engine::save_edit(&inner.result, index, raw_size, raw_price) {
            Ok(updated) => {
                debug!(
                    index,
                    total = %updated.total_cost,
                    unit_cost = %updated.unit_cost,
                    "edit saved, result replaced"
                );
                inner.result = updated.clone();
                inner.active = None;
                Ok(updated)
            }
            Err(err) => {
                warn!(index, error = %err, "edit rejected");
                Err(err.into())
            }
        }
    }

    /// Discards the open edit, if any. The result is untouched; this never
    /// allocates a new result.
    ///
    /// Returns whether a draft was actually dropped.
    pub fn cancel(&self) -> bool {
        let mut inner = self.lock();
        match inner.active.take() {
            Some(active) => {
                debug!(index = active.draft.target_index, "edit cancelled");
                true
            }
            None => false,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SessionInner> {
        self.inner.lock().expect("session mutex poisoned")
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use unitcost_core::money::Money;

    const PAYLOAD: &str = r#"{
        "recipe_name": "Protein Balls",
        "ingredients": [
            {
                "ingredient": "peanut butter",
                "quantity": 60,
                "unit": "g",
                "cost": 0.42,
                "package_info": {"size": "454g", "price": 3.5, "cost_per_unit": 0.00771, "unit": "g"}
            },
            {
                "ingredient": "collagen powder",
                "quantity": 30,
                "unit": "g",
                "cost": 0,
                "unknown_ingredient": true
            }
        ],
        "total_cost": 0.42,
        "yield_count": 6,
        "unit_cost": 0.07
    }"#;

    fn session() -> EditSession {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .try_init();
        EditSession::from_json(PAYLOAD).unwrap()
    }

    #[test]
    fn test_from_json_and_snapshot() {
        let session = session();
        assert_eq!(session.result().total_cost, Money::from_cents(42));
        assert!(!session.is_editing());
    }

    #[test]
    fn test_from_json_rejects_bad_payload() {
        let err = EditSession::from_json("{not json").unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::PayloadError);
    }

    #[test]
    fn test_single_open_edit_enforced() {
        let session = session();

        let draft = session.begin_edit(0).unwrap();
        assert_eq!(draft.raw_size_input, "454");
        assert!(session.is_editing());
        assert!(session.active_since().is_some());

        let err = session.begin_edit(0).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::EditConflict);

        // After cancel a new edit can open again.
        assert!(session.cancel());
        assert!(!session.is_editing());
        assert!(session.begin_edit(0).is_ok());
    }

    #[test]
    fn test_save_replaces_result_and_closes_edit() {
        let session = session();
        session.begin_edit(0).unwrap();

        let updated = session.save("500", "4.00").unwrap();
        assert_eq!(updated.ingredients[0].cost, Money::from_cents(48));
        assert!(updated.ingredients[0].manually_adjusted);

        // The session now holds the replacement, and the draft is gone.
        assert_eq!(session.result(), updated);
        assert!(!session.is_editing());
    }

    #[test]
    fn test_failed_save_keeps_result_and_draft() {
        let session = session();
        let before = session.result();
        session.begin_edit(0).unwrap();

        let err = session.save("0", "4.00").unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ValidationError);

        // Result untouched, draft still open for a retry.
        assert_eq!(session.result(), before);
        assert!(session.is_editing());

        // And the retry succeeds.
        assert!(session.save("500", "4.00").is_ok());
    }

    #[test]
    fn test_save_without_open_edit() {
        let session = session();
        let err = session.save("500", "4.00").unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::EditConflict);
    }

    #[test]
    fn test_cancel_without_open_edit() {
        let session = session();
        assert!(!session.cancel());
        assert_eq!(
            session.result().recipe_name.as_deref(),
            Some("Protein Balls")
        );
    }

    #[test]
    fn test_unpriced_line_not_editable() {
        let session = session();
        let err = session.begin_edit(1).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ValidationError);
        assert!(!session.is_editing());
    }
}
